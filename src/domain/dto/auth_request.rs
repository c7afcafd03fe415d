//! 로그인/콜백 요청 DTO
//!
//! 콜백 쿼리는 빈 문자열을 `None` 으로 정규화하여 받습니다
//! (`?code=` 처럼 값이 비어있는 파라미터는 없는 것으로 취급).

use serde::Deserialize;
use validator::Validate;
use crate::utils::string_utils::deserialize_optional_string;

/// `GET /auth/callback` 쿼리 파라미터
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CallbackQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub code: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub code_verifier: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub access_token: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub refresh_token: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub token_hash: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "deserialize_optional_string")]
    pub otp_type: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub next: Option<String>,

    /// 프로바이더가 전달한 에러 (`error=access_denied` 등)
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error_code: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error_description: Option<String>,
}

impl CallbackQuery {
    /// 프로바이더가 리다이렉트와 함께 넘긴 에러가 있으면 반환합니다.
    pub fn provider_error(&self) -> Option<ProviderRedirectError> {
        if self.error.is_none() && self.error_code.is_none() && self.error_description.is_none() {
            return None;
        }

        Some(ProviderRedirectError {
            error: self.error.clone().unwrap_or_else(|| "unknown_error".to_string()),
            error_code: self.error_code.clone(),
            description: self.error_description.clone(),
        })
    }
}

/// 리다이렉트 URL 에 실려 온 프로바이더 에러
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRedirectError {
    pub error: String,
    pub error_code: Option<String>,
    pub description: Option<String>,
}

/// `POST /login` 폼
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub next: Option<String>,
}

/// `POST /auth/callback` 폼 (6자리 코드 직접 입력)
#[derive(Debug, Deserialize, Validate)]
pub struct PasscodeForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, max = 6, message = "The code has 6 digits"))]
    pub token: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub next: Option<String>,
}

impl PasscodeForm {
    /// 공백을 제거한 코드가 숫자 6자리인지 확인합니다.
    pub fn is_well_formed(&self) -> bool {
        self.token.len() == 6 && self.token.chars().all(|c| c.is_ascii_digit())
    }
}

/// `POST /auth/resend` 폼
#[derive(Debug, Default, Deserialize)]
pub struct ResendForm {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub next: Option<String>,
}

/// `GET /login` 쿼리
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub next: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_form_validation() {
        let ok = LoginForm { email: "user@example.com".to_string(), next: None };
        assert!(ok.validate().is_ok());

        let bad = LoginForm { email: "not-an-email".to_string(), next: None };
        assert!(bad.validate().is_err());

        let empty = LoginForm { email: String::new(), next: None };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_passcode_form_shape() {
        let form = PasscodeForm {
            email: "user@example.com".to_string(),
            token: "123456".to_string(),
            next: None,
        };
        assert!(form.validate().is_ok());
        assert!(form.is_well_formed());

        let letters = PasscodeForm { token: "12a456".to_string(), ..form };
        assert!(letters.validate().is_ok());
        assert!(!letters.is_well_formed());
    }

    #[test]
    fn test_provider_error_from_query() {
        let query = actix_web::web::Query::<CallbackQuery>::from_query(
            "error=access_denied&error_code=otp_expired&error_description=Email+link+is+invalid+or+has+expired",
        )
        .unwrap()
        .into_inner();

        let error = query.provider_error().unwrap();
        assert_eq!(error.error, "access_denied");
        assert_eq!(error.error_code.as_deref(), Some("otp_expired"));
        assert_eq!(error.description.as_deref(), Some("Email link is invalid or has expired"));

        assert!(CallbackQuery::default().provider_error().is_none());
    }
}
