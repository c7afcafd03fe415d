//! GoTrue (Supabase Auth) REST API 요청/응답 본문

use serde::{Deserialize, Serialize};
use crate::domain::models::session::SessionUser;

/// `POST /otp` 요청 본문
#[derive(Debug, Serialize)]
pub struct OtpRequest<'a> {
    pub email: &'a str,
    pub create_user: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_challenge: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_challenge_method: Option<&'a str>,
}

/// `POST /token?grant_type=pkce` 요청 본문
#[derive(Debug, Serialize)]
pub struct PkceGrantRequest<'a> {
    pub auth_code: &'a str,
    pub code_verifier: &'a str,
}

/// `POST /token?grant_type=refresh_token` 요청 본문
#[derive(Debug, Serialize)]
pub struct RefreshGrantRequest<'a> {
    pub refresh_token: &'a str,
}

/// `POST /verify` 요청 본문
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum VerifyRequest<'a> {
    Email {
        #[serde(rename = "type")]
        otp_type: &'a str,
        email: &'a str,
        token: &'a str,
    },
    TokenHash {
        #[serde(rename = "type")]
        otp_type: &'a str,
        token_hash: &'a str,
    },
}

/// `GET /user` 응답 (필요한 필드만)
pub type UserResponse = SessionUser;

/// GoTrue 에러 응답
///
/// 버전에 따라 `{error, error_description}` 또는 `{code, error_code, msg}` 형태가 섞여 옵니다.
#[derive(Debug, Default, Deserialize)]
pub struct GoTrueErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl GoTrueErrorBody {
    /// 사용자에게 보여줄 메시지를 고릅니다.
    pub fn message(&self) -> Option<&str> {
        self.msg
            .as_deref()
            .or(self.error_description.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
            .filter(|m| !m.trim().is_empty())
    }

    /// 에러 코드 (`error_code` 우선, 없으면 `error`)
    pub fn code(&self) -> Option<&str> {
        self.error_code.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_shapes() {
        let email = serde_json::to_value(VerifyRequest::Email {
            otp_type: "email",
            email: "user@example.com",
            token: "123456",
        })
        .unwrap();
        assert_eq!(email["type"], "email");
        assert_eq!(email["token"], "123456");

        let hash = serde_json::to_value(VerifyRequest::TokenHash {
            otp_type: "magiclink",
            token_hash: "h1",
        })
        .unwrap();
        assert_eq!(hash["type"], "magiclink");
        assert!(hash.get("email").is_none());
    }

    #[test]
    fn test_otp_request_omits_missing_challenge() {
        let body = serde_json::to_value(OtpRequest {
            email: "user@example.com",
            create_user: true,
            code_challenge: None,
            code_challenge_method: None,
        })
        .unwrap();
        assert!(body.get("code_challenge").is_none());
    }

    #[test]
    fn test_error_body_message_preference() {
        let body: GoTrueErrorBody = serde_json::from_str(
            r#"{"code":403,"error_code":"otp_expired","msg":"Token has expired or is invalid"}"#,
        )
        .unwrap();
        assert_eq!(body.code(), Some("otp_expired"));
        assert_eq!(body.message(), Some("Token has expired or is invalid"));

        let body: GoTrueErrorBody = serde_json::from_str(
            r#"{"error":"invalid_grant","error_description":"Invalid Refresh Token"}"#,
        )
        .unwrap();
        assert_eq!(body.code(), Some("invalid_grant"));
        assert_eq!(body.message(), Some("Invalid Refresh Token"));
    }
}
