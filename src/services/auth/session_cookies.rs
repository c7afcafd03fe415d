//! 세션 및 로그인 보조 쿠키
//!
//! | 쿠키 | 내용 | 수명 |
//! |------|------|------|
//! | `sb-access-token` | 액세스 토큰 | 30일 |
//! | `sb-refresh-token` | 리프레시 토큰 | 30일 |
//! | `sb-code-verifier` | PKCE verifier | 10분 |
//! | `melodya-login-email` | 재전송용 이메일 | 1시간 |
//!
//! 모두 `HttpOnly`, `SameSite=Lax`, `Path=/` 이며
//! staging/production 에서는 `Secure` 가 붙습니다.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;
use crate::domain::models::session::Session;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";
pub const CODE_VERIFIER_COOKIE: &str = "sb-code-verifier";
pub const LOGIN_EMAIL_COOKIE: &str = "melodya-login-email";

const SESSION_MAX_AGE_DAYS: i64 = 30;
const VERIFIER_MAX_AGE_MINUTES: i64 = 10;
const LOGIN_EMAIL_MAX_AGE_HOURS: i64 = 1;

/// 쿠키 생성기. `secure` 는 실행 환경에 따라 결정됩니다.
#[derive(Debug, Clone, Copy)]
pub struct SessionCookies {
    secure: bool,
}

impl SessionCookies {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    fn build(&self, name: &'static str, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build(name, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .finish()
    }

    fn removal(&self, name: &'static str) -> Cookie<'static> {
        let mut cookie = self.build(name, String::new(), Duration::ZERO);
        cookie.make_removal();
        cookie
    }

    /// 수립된 세션을 담는 쿠키 두 개
    pub fn session(&self, session: &Session) -> Vec<Cookie<'static>> {
        let max_age = Duration::days(SESSION_MAX_AGE_DAYS);
        vec![
            self.build(ACCESS_TOKEN_COOKIE, session.access_token.clone(), max_age),
            self.build(REFRESH_TOKEN_COOKIE, session.refresh_token.clone(), max_age),
        ]
    }

    pub fn clear_session(&self) -> Vec<Cookie<'static>> {
        vec![self.removal(ACCESS_TOKEN_COOKIE), self.removal(REFRESH_TOKEN_COOKIE)]
    }

    pub fn code_verifier(&self, verifier: &str) -> Cookie<'static> {
        self.build(
            CODE_VERIFIER_COOKIE,
            verifier.to_string(),
            Duration::minutes(VERIFIER_MAX_AGE_MINUTES),
        )
    }

    pub fn clear_code_verifier(&self) -> Cookie<'static> {
        self.removal(CODE_VERIFIER_COOKIE)
    }

    pub fn login_email(&self, email: &str) -> Cookie<'static> {
        self.build(
            LOGIN_EMAIL_COOKIE,
            email.to_string(),
            Duration::hours(LOGIN_EMAIL_MAX_AGE_HOURS),
        )
    }

    pub fn clear_login_email(&self) -> Cookie<'static> {
        self.removal(LOGIN_EMAIL_COOKIE)
    }
}

/// 요청 쿠키 값 (비어있으면 `None`)
pub fn read_cookie(req: &HttpRequest, name: &str) -> Option<String> {
    req.cookie(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.trim().is_empty())
}

/// 캐시된 로그인 이메일
///
/// 인코딩은 actix 가 쿠키 직렬화/파싱 때 처리합니다.
pub fn read_login_email(req: &HttpRequest) -> Option<String> {
    read_cookie(req, LOGIN_EMAIL_COOKIE)
        .filter(|email| email.contains('@'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use crate::domain::models::session::SessionUser;

    fn session() -> Session {
        Session {
            access_token: "T1".to_string(),
            refresh_token: "T2".to_string(),
            expires_in: 3600,
            expires_at: None,
            token_type: "bearer".to_string(),
            user: SessionUser { id: "user-1".to_string(), email: None },
        }
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookies = SessionCookies::new(true).session(&session());

        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].name(), ACCESS_TOKEN_COOKIE);
        assert_eq!(cookies[0].value(), "T1");
        assert_eq!(cookies[1].value(), "T2");
        for cookie in &cookies {
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Lax));
            assert_eq!(cookie.path(), Some("/"));
        }
    }

    #[test]
    fn test_removal_cookie_expires() {
        let cookie = SessionCookies::new(false).clear_code_verifier();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn test_login_email_roundtrip_through_request() {
        let cookie = SessionCookies::new(false).login_email("user+feed@example.com");
        assert_eq!(cookie.value(), "user+feed@example.com");
        let req = TestRequest::default().cookie(cookie).to_http_request();

        assert_eq!(read_login_email(&req).as_deref(), Some("user+feed@example.com"));
    }

    #[test]
    fn test_login_email_is_decoded_once() {
        let req = TestRequest::default()
            .insert_header((actix_web::http::header::COOKIE, "melodya-login-email=user%40example.com"))
            .to_http_request();

        assert_eq!(read_login_email(&req).as_deref(), Some("user@example.com"));
    }

    #[test]
    fn test_missing_cookie() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(read_cookie(&req, ACCESS_TOKEN_COOKIE), None);
        assert_eq!(read_login_email(&req), None);
    }
}
