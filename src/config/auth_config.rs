//! # Authentication Configuration Module
//!
//! 호스팅 인증 프로바이더(Supabase GoTrue) 접속 정보와
//! 로그인 흐름 관련 설정을 관리하는 모듈입니다.
//!
//! ## 필수 환경 변수
//!
//! ```bash
//! export SUPABASE_URL="https://xyzcompany.supabase.co"
//! export SUPABASE_ANON_KEY="eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//! ```
//!
//! ## 선택 환경 변수
//!
//! ```bash
//! export SUPABASE_JWT_SECRET="..."        # 설정 시 액세스 토큰 서명 검증 (HS256)
//! export SITE_URL="https://melodya.app"   # 메일 링크가 돌아올 origin
//! export AUTH_FLOW="otp"                  # otp | pkce | magic_link
//! export RESEND_COOLDOWN_SECONDS="60"     # 30..=300
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{SupabaseConfig, AuthSettings};
//!
//! let supabase = SupabaseConfig::load()?;
//! let settings = AuthSettings::from_env();
//! println!("auth endpoint: {}", supabase.auth_url);
//! ```

use std::env;
use std::time::Duration;
use crate::config::data_config::Environment;
use crate::errors::AppError;

/// 콜백 라우트 경로 (정규화 대상의 기준 경로)
pub const CALLBACK_PATH: &str = "/auth/callback";

/// 로그인 폼 경로
pub const LOGIN_PATH: &str = "/login";

/// 프로바이더 접속 정보
///
/// 시작 시 한 번 로드되어 클라이언트 팩토리에 전달됩니다.
#[derive(Debug, Clone)]
pub struct SupabaseSettings {
    /// GoTrue 엔드포인트 (`{SUPABASE_URL}/auth/v1`)
    pub auth_url: String,
    /// 공개 API 키
    pub anon_key: String,
    /// 액세스 토큰 서명 검증용 비밀키 (선택)
    pub jwt_secret: Option<String>,
}

pub struct SupabaseConfig;

impl SupabaseConfig {
    /// 환경 변수에서 프로바이더 접속 정보를 로드합니다.
    ///
    /// # Errors
    ///
    /// `SUPABASE_URL` 또는 `SUPABASE_ANON_KEY` 가 없으면 `InternalError` 를 반환합니다.
    pub fn load() -> Result<SupabaseSettings, AppError> {
        let url = Self::required("SUPABASE_URL")?;
        let anon_key = Self::required("SUPABASE_ANON_KEY")?;
        let jwt_secret = env::var("SUPABASE_JWT_SECRET").ok().filter(|s| !s.trim().is_empty());

        if jwt_secret.is_none() {
            log::warn!("SUPABASE_JWT_SECRET not set, access token signatures will not be verified locally");
        }

        Ok(SupabaseSettings {
            auth_url: Self::auth_url(&url),
            anon_key,
            jwt_secret,
        })
    }

    /// 프로젝트 URL 로부터 GoTrue 엔드포인트를 만듭니다.
    pub fn auth_url(project_url: &str) -> String {
        format!("{}/auth/v1", project_url.trim().trim_end_matches('/'))
    }

    fn required(key: &str) -> Result<String, AppError> {
        env::var(key)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::InternalError(format!("{} must be set", key)))
    }
}

/// 자격 증명 발급 방식
///
/// 기본값은 `Otp` 입니다. 6자리 코드 입력 방식은 링크를 다른 브라우저에서 여는
/// 경우에 생기는 verifier 불일치 실패가 원천적으로 발생하지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    /// 메일로 받은 6자리 코드를 직접 입력
    Otp,
    /// PKCE 매직 링크 (`?code=`), verifier 는 요청 브라우저 쿠키에 보관
    Pkce,
    /// implicit 매직 링크 (`#access_token=..&refresh_token=..`)
    MagicLink,
}

impl AuthFlow {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "otp" | "code" => Ok(AuthFlow::Otp),
            "pkce" => Ok(AuthFlow::Pkce),
            "magic_link" | "magiclink" | "implicit" => Ok(AuthFlow::MagicLink),
            _ => Err(format!("Unsupported auth flow: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthFlow::Otp => "otp",
            AuthFlow::Pkce => "pkce",
            AuthFlow::MagicLink => "magic_link",
        }
    }

    /// 메일에 콜백 링크가 포함되는 흐름인지 여부
    pub fn uses_redirect(&self) -> bool {
        !matches!(self, AuthFlow::Otp)
    }
}

/// 로그인 흐름 설정
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// 메일 링크가 돌아올 절대 origin (`https://melodya.app`)
    pub site_url: String,
    pub flow: AuthFlow,
    pub resend_cooldown: Duration,
    pub secure_cookies: bool,
}

impl AuthSettings {
    pub const MIN_COOLDOWN_SECS: u64 = 30;
    pub const MAX_COOLDOWN_SECS: u64 = 300;
    pub const DEFAULT_COOLDOWN_SECS: u64 = 60;

    pub fn from_env() -> Self {
        let flow = env::var("AUTH_FLOW")
            .map(|raw| {
                AuthFlow::from_str(&raw).unwrap_or_else(|e| {
                    log::error!("{}. 기본값 otp 사용", e);
                    AuthFlow::Otp
                })
            })
            .unwrap_or(AuthFlow::Otp);

        let cooldown = env::var("RESEND_COOLDOWN_SECONDS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(Self::DEFAULT_COOLDOWN_SECS);

        Self {
            site_url: env::var("SITE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string())
                .trim_end_matches('/')
                .to_string(),
            flow,
            resend_cooldown: Self::clamp_cooldown(cooldown),
            secure_cookies: Environment::current().requires_secure_cookies(),
        }
    }

    /// 쿨다운을 30..=300 초 범위로 제한합니다.
    pub fn clamp_cooldown(secs: u64) -> Duration {
        Duration::from_secs(secs.clamp(Self::MIN_COOLDOWN_SECS, Self::MAX_COOLDOWN_SECS))
    }

    /// 메일 링크에 넣을 콜백 절대 URL
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.site_url, CALLBACK_PATH)
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:8080".to_string(),
            flow: AuthFlow::Otp,
            resend_cooldown: Duration::from_secs(Self::DEFAULT_COOLDOWN_SECS),
            secure_cookies: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_flow_from_string() {
        assert_eq!(AuthFlow::from_str("otp").unwrap(), AuthFlow::Otp);
        assert_eq!(AuthFlow::from_str("PKCE").unwrap(), AuthFlow::Pkce);
        assert_eq!(AuthFlow::from_str("magic_link").unwrap(), AuthFlow::MagicLink);
        assert_eq!(AuthFlow::from_str(" implicit ").unwrap(), AuthFlow::MagicLink);
        assert!(AuthFlow::from_str("password").is_err());
    }

    #[test]
    fn test_auth_flow_roundtrip() {
        for flow in [AuthFlow::Otp, AuthFlow::Pkce, AuthFlow::MagicLink] {
            assert_eq!(AuthFlow::from_str(flow.as_str()).unwrap(), flow);
        }
        assert!(!AuthFlow::Otp.uses_redirect());
        assert!(AuthFlow::Pkce.uses_redirect());
    }

    #[test]
    fn test_cooldown_is_clamped() {
        assert_eq!(AuthSettings::clamp_cooldown(5), Duration::from_secs(30));
        assert_eq!(AuthSettings::clamp_cooldown(45), Duration::from_secs(45));
        assert_eq!(AuthSettings::clamp_cooldown(3600), Duration::from_secs(300));
    }

    #[test]
    fn test_auth_url() {
        assert_eq!(
            SupabaseConfig::auth_url("https://xyz.supabase.co/"),
            "https://xyz.supabase.co/auth/v1"
        );
    }

    #[test]
    fn test_callback_url() {
        let settings = AuthSettings {
            site_url: "https://melodya.app".to_string(),
            ..AuthSettings::default()
        };
        assert_eq!(settings.callback_url(), "https://melodya.app/auth/callback");
    }
}
