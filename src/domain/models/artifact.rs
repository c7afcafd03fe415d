//! 인증 아티팩트 (Authentication Artifact)
//!
//! 메일 링크나 사용자가 입력한 코드에서 추출되는 일회성 값입니다.
//! 저장되지 않으며, 콜백 리졸버가 정확히 한 번 소비합니다.
//!
//! # 우선순위
//!
//! URL 에 여러 형태가 동시에 있을 때 적용되는 고정된 우선순위:
//!
//! ```text
//! 토큰 쌍 (access + refresh)  >  PKCE code  >  token_hash  >  없음
//! ```
//!
//! 6자리 패스코드는 POST 폼으로만 들어오므로 URL 아티팩트와 섞이지 않습니다.

use crate::domain::dto::auth_request::CallbackQuery;

/// 허용되는 `token_hash` 검증 타입 (GoTrue `/verify` 의 `type`)
const TOKEN_HASH_TYPES: [&str; 6] = ["email", "magiclink", "signup", "invite", "recovery", "email_change"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthArtifact {
    /// 이미 발급된 토큰 쌍 (implicit flow)
    TokenPair {
        access_token: String,
        refresh_token: String,
    },
    /// PKCE authorization code. verifier 는 쿼리 또는 요청 브라우저의 쿠키에서 옵니다.
    Code {
        code: String,
        code_verifier: Option<String>,
    },
    /// `token_hash` 검증 링크
    TokenHash { token_hash: String, otp_type: String },
    /// 사용자가 직접 입력한 6자리 코드
    Passcode { email: String, token: String },
}

impl AuthArtifact {
    /// 콜백 쿼리에서 우선순위에 따라 하나의 아티팩트를 고릅니다.
    ///
    /// `stored_verifier` 는 로그인 요청 시 브라우저 쿠키에 저장해 둔 PKCE verifier 입니다.
    /// 쿼리에 `code_verifier` 가 있으면 그것을 우선합니다.
    pub fn from_callback(query: &CallbackQuery, stored_verifier: Option<&str>) -> Option<Self> {
        if let (Some(access_token), Some(refresh_token)) = (&query.access_token, &query.refresh_token) {
            return Some(AuthArtifact::TokenPair {
                access_token: access_token.clone(),
                refresh_token: refresh_token.clone(),
            });
        }

        if let Some(code) = &query.code {
            let code_verifier = query
                .code_verifier
                .clone()
                .or_else(|| stored_verifier.map(str::to_string));
            return Some(AuthArtifact::Code {
                code: code.clone(),
                code_verifier,
            });
        }

        if let Some(token_hash) = &query.token_hash {
            let otp_type = query
                .otp_type
                .as_deref()
                .filter(|t| TOKEN_HASH_TYPES.contains(t))
                .unwrap_or("email")
                .to_string();
            return Some(AuthArtifact::TokenHash {
                token_hash: token_hash.clone(),
                otp_type,
            });
        }

        None
    }

    /// 로그에 남길 아티팩트 종류 (값 자체는 절대 로그에 남기지 않습니다)
    pub fn shape(&self) -> &'static str {
        match self {
            AuthArtifact::TokenPair { .. } => "token_pair",
            AuthArtifact::Code { .. } => "code",
            AuthArtifact::TokenHash { .. } => "token_hash",
            AuthArtifact::Passcode { .. } => "passcode",
        }
    }
}
