//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! HTML 페이지를 렌더링하는 핸들러는 실패를 직접 화면으로 그리고,
//! JSON 엔드포인트(`/auth/session`, `/auth/logout` 등)는 이 타입의
//! `ResponseError` 구현을 그대로 사용합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! fn require_email(raw: &str) -> Result<String, AppError> {
//!     if raw.trim().is_empty() {
//!         return Err(AppError::ValidationError("Email is required".to_string()));
//!     }
//!     Ok(raw.trim().to_string())
//! }
//! ```

use thiserror::Error;
use crate::domain::models::session::{FailureKind, ProviderFailure};

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// Redis 캐시 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 재전송 쿨다운 중 (429 Too Many Requests), 남은 초
    #[error("Please wait {0} seconds before requesting another email")]
    RateLimited(u64),

    /// 인증 프로바이더 거부/실패
    #[error("{0}")]
    Provider(#[from] ProviderFailure),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 사용자에게 그대로 보여줄 수 있는 메시지
    ///
    /// 프로바이더 메시지는 접두어 없이 그대로, 내부 에러는 일반 문구로 바꿉니다.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Provider(failure) => failure.message.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::RateLimited(_) => self.to_string(),
            _ => "Something went wrong on our side. Please try again.".to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    /// HTTP 상태 코드를 결정합니다.
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Provider(failure) => match failure.kind {
                FailureKind::InvalidOrExpired | FailureKind::VerifierMismatch => StatusCode::UNAUTHORIZED,
                FailureKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                FailureKind::Rejected => StatusCode::BAD_REQUEST,
                FailureKind::Transport => StatusCode::BAD_GATEWAY,
            },
            AppError::RedisError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 서버 로그에만 상세 내용을 남기고, 클라이언트에는 일반 문구를 보냅니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        let mut body = serde_json::json!({
            "error": self.user_message()
        });
        if let AppError::Provider(failure) = self {
            body["kind"] = serde_json::json!(failure.kind.as_str());
        }

        actix_web::HttpResponse::build(status).json(body)
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// 필드별 검증 메시지 중 첫 번째를 사용자 메시지로 사용합니다.
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        AppError::ValidationError(message)
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.user_message(), "Email is required");
    }

    #[test]
    fn test_rate_limited_response() {
        let error = AppError::RateLimited(42);
        assert_eq!(error.error_response().status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(error.user_message().contains("42 seconds"));
    }

    #[test]
    fn test_provider_failure_status_mapping() {
        let expired = AppError::from(ProviderFailure::invalid_or_expired(None));
        assert_eq!(expired.status_code(), StatusCode::UNAUTHORIZED);

        let mismatch = AppError::from(ProviderFailure::verifier_mismatch());
        assert_eq!(mismatch.status_code(), StatusCode::UNAUTHORIZED);

        let transport = AppError::from(ProviderFailure::new(FailureKind::Transport, "down"));
        assert_eq!(transport.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_provider_message_is_verbatim() {
        let error = AppError::from(ProviderFailure::new(
            FailureKind::Rejected,
            "Signups not allowed for otp",
        ));
        assert_eq!(error.user_message(), "Signups not allowed for otp");
    }

    #[test]
    fn test_internal_error_is_not_leaked() {
        let error = AppError::InternalError("redis pool exhausted".to_string());
        assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.user_message().contains("redis"));
    }

    #[test]
    fn test_validation_errors_use_field_message() {
        use validator::Validate;
        use crate::domain::dto::auth_request::LoginForm;

        let form = LoginForm { email: "not-an-email".to_string(), next: None };
        let error = AppError::from(form.validate().unwrap_err());
        assert_eq!(error.user_message(), "Enter a valid email address");
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
