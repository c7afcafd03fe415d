//! 요청 단위 인증 클라이언트 팩토리
//!
//! 프로바이더 클라이언트를 전역 싱글톤으로 두지 않습니다.
//! 앱 시작 시 팩토리 하나(공유 `reqwest::Client` 포함)를 만들어 `AppState` 에 넣고,
//! 핸들러는 요청마다 [`AuthClientFactory::for_request`] 로 그 요청의 쿠키에
//! 묶인 [`ScopedAuthClient`] 를 얻어 사용합니다.
//!
//! ```rust,ignore
//! let client = state.auth.for_request(&req);
//! let artifact = client.artifact(&query);
//! let resolver = CallbackResolver::new(client.provider());
//! ```

use std::sync::Arc;
use std::time::Duration;
use actix_web::HttpRequest;
use crate::config::SupabaseSettings;
use crate::domain::dto::auth_request::CallbackQuery;
use crate::domain::models::artifact::AuthArtifact;
use crate::errors::{AppResult, ErrorContext};
use crate::services::auth::gotrue_client::GoTrueClient;
use crate::services::auth::provider::AuthProvider;
use crate::services::auth::session_cookies::{
    read_cookie, read_login_email, ACCESS_TOKEN_COOKIE, CODE_VERIFIER_COOKIE,
};

const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct AuthClientFactory {
    provider: Arc<dyn AuthProvider>,
}

impl AuthClientFactory {
    /// GoTrue 프로바이더용 팩토리를 만듭니다.
    pub fn gotrue(settings: &SupabaseSettings) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("melodya-auth/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self::with_provider(Arc::new(GoTrueClient::new(http, settings))))
    }

    pub fn with_provider(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }

    /// 현재 요청의 쿠키에 묶인 클라이언트를 만듭니다.
    pub fn for_request(&self, req: &HttpRequest) -> ScopedAuthClient {
        ScopedAuthClient {
            provider: Arc::clone(&self.provider),
            code_verifier: read_cookie(req, CODE_VERIFIER_COOKIE),
            login_email: read_login_email(req),
            access_token: read_cookie(req, ACCESS_TOKEN_COOKIE),
        }
    }
}

/// 요청 하나의 수명 동안만 사용하는 프로바이더 클라이언트
pub struct ScopedAuthClient {
    provider: Arc<dyn AuthProvider>,
    code_verifier: Option<String>,
    login_email: Option<String>,
    access_token: Option<String>,
}

impl ScopedAuthClient {
    pub fn provider(&self) -> Arc<dyn AuthProvider> {
        Arc::clone(&self.provider)
    }

    /// 콜백 쿼리에서 처리할 아티팩트를 고릅니다 (쿠키의 PKCE verifier 포함).
    pub fn artifact(&self, query: &CallbackQuery) -> Option<AuthArtifact> {
        AuthArtifact::from_callback(query, self.code_verifier.as_deref())
    }

    pub fn login_email(&self) -> Option<&str> {
        self.login_email.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use crate::services::auth::testing::FakeProvider;

    #[test]
    fn test_scoped_client_reads_request_cookies() {
        let factory = AuthClientFactory::with_provider(Arc::new(FakeProvider::default()));
        let req = TestRequest::default()
            .cookie(Cookie::new(CODE_VERIFIER_COOKIE, "stored-verifier"))
            .cookie(Cookie::new(ACCESS_TOKEN_COOKIE, "T1"))
            .to_http_request();

        let client = factory.for_request(&req);
        let query = CallbackQuery {
            code: Some("abc123".to_string()),
            ..CallbackQuery::default()
        };

        assert_eq!(
            client.artifact(&query),
            Some(AuthArtifact::Code {
                code: "abc123".to_string(),
                code_verifier: Some("stored-verifier".to_string()),
            })
        );
        assert_eq!(client.access_token(), Some("T1"));
        assert_eq!(client.login_email(), None);
    }

    #[test]
    fn test_gotrue_factory_builds() {
        let settings = SupabaseSettings {
            auth_url: "https://xyz.supabase.co/auth/v1".to_string(),
            anon_key: "anon".to_string(),
            jwt_secret: None,
        };
        assert!(AuthClientFactory::gotrue(&settings).is_ok());
    }
}
