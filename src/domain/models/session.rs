//! 세션 및 프로바이더 결과 모델
//!
//! 호스팅 인증 프로바이더(GoTrue)가 돌려주는 세션과,
//! 프로바이더 호출의 성공/실패를 표현하는 태그드 결과 타입을 정의합니다.
//!
//! 프로바이더 응답을 느슨한 JSON 으로 다루지 않고 항상
//! `Ok(Session)` 또는 `Err(ProviderFailure { kind, message })` 형태로 변환하여,
//! 콜백 리졸버가 하나의 일관된 방식으로 상태 전이를 결정할 수 있도록 합니다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 프로바이더가 발급한 로그인 세션
///
/// GoTrue `/token`, `/verify` 응답 본문과 동일한 필드 이름을 사용합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 유효 시간 (초)
    #[serde(default)]
    pub expires_in: i64,
    /// 액세스 토큰 만료 시각 (Unix timestamp)
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: SessionUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// 세션에 포함된 사용자 정보 (필요한 필드만)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// 프로바이더 실패 분류
///
/// 화면에 보여줄 메시지와 재시도 경로가 분류마다 다릅니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// 만료되었거나 이미 사용된 자격 증명 (링크, 코드)
    InvalidOrExpired,
    /// PKCE code verifier 누락/불일치.
    /// 링크를 요청한 브라우저가 아닌 다른 브라우저에서 열었을 때 발생합니다.
    VerifierMismatch,
    /// 프로바이더 측 요청 빈도 제한
    RateLimited,
    /// 그 밖의 프로바이더 거부
    Rejected,
    /// 네트워크/전송 계층 실패
    Transport,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidOrExpired => "invalid_or_expired",
            FailureKind::VerifierMismatch => "verifier_mismatch",
            FailureKind::RateLimited => "rate_limited",
            FailureKind::Rejected => "rejected",
            FailureKind::Transport => "transport",
        }
    }
}

/// 프로바이더 호출 실패
///
/// `message` 는 사용자에게 그대로 보여줄 수 있는 문장입니다.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ProviderFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// 만료/무효 자격 증명 실패를 생성합니다.
    pub fn invalid_or_expired(detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) if !detail.trim().is_empty() => format!(
                "This sign-in code or link is invalid or expired ({}). Request a new one and try again.",
                detail.trim()
            ),
            _ => "This sign-in code or link is invalid or expired. Request a new one and try again."
                .to_string(),
        };
        Self::new(FailureKind::InvalidOrExpired, message)
    }

    /// code verifier 불일치 실패를 생성합니다.
    pub fn verifier_mismatch() -> Self {
        Self::new(
            FailureKind::VerifierMismatch,
            "This sign-in link was opened in a different browser than the one that requested it. \
             Open it in the original browser, or request a new link here.",
        )
    }

    pub fn transport(detail: impl std::fmt::Display) -> Self {
        log::warn!("인증 프로바이더 통신 실패: {}", detail);
        Self::new(
            FailureKind::Transport,
            "Could not reach the sign-in service. Check your connection and try again.",
        )
    }
}

/// 프로바이더 호출 결과
pub type ProviderResult<T> = Result<T, ProviderFailure>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_deserializes_gotrue_body() {
        let json = r#"{
            "access_token": "at",
            "token_type": "bearer",
            "expires_in": 3600,
            "expires_at": 1700003600,
            "refresh_token": "rt",
            "user": {"id": "u-1", "email": "user@example.com", "aud": "authenticated"}
        }"#;

        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.access_token, "at");
        assert_eq!(session.refresh_token, "rt");
        assert_eq!(session.expires_at, Some(1700003600));
        assert_eq!(session.user.email.as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_invalid_or_expired_message() {
        let failure = ProviderFailure::invalid_or_expired(None);
        assert_eq!(failure.kind, FailureKind::InvalidOrExpired);
        assert!(failure.message.contains("invalid or expired"));

        let failure = ProviderFailure::invalid_or_expired(Some("Token has expired or is invalid"));
        assert!(failure.message.contains("Token has expired or is invalid"));
    }

    #[test]
    fn test_verifier_mismatch_is_distinct_from_generic_failure() {
        let mismatch = ProviderFailure::verifier_mismatch();
        let generic = ProviderFailure::new(FailureKind::Rejected, "nope");

        assert_ne!(mismatch.kind, generic.kind);
        assert!(mismatch.message.contains("different browser"));
    }
}
