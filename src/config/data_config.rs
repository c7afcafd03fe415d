//! # Server & Infrastructure Configuration
//!
//! 실행 환경, 서버 바인딩, Rate Limiting, CORS, Redis 관련 설정을 관리합니다.
//! 모든 값은 환경 변수에서 읽으며, 개발 환경에서 안전한 기본값을 제공합니다.

use std::env;

/// 애플리케이션 실행 환경
///
/// `ENVIRONMENT` 환경 변수로 결정되며, 설정되지 않으면 운영 환경으로 간주합니다.
/// 쿠키의 `Secure` 플래그 등 보안 관련 기본값이 환경에 따라 달라집니다.
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// 현재 실행 환경을 반환합니다.
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// HTTPS 전용 쿠키를 사용해야 하는 환경인지 여부
    pub fn requires_secure_cookies(&self) -> bool {
        matches!(self, Environment::Staging | Environment::Production)
    }
}

/// HTTP 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }
}

/// Rate Limiting 설정 (actix-governor)
///
/// 로그인/재전송 요청은 메일 발송으로 이어지므로 기본값을 낮게 잡습니다.
#[derive(Debug)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// 환경 변수에서 Rate Limiting 설정을 로드합니다.
    ///
    /// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 10)
    /// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 30)
    pub fn load() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 10 사용", e);
                10
            });

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u32>()
            .unwrap_or_else(|e| {
                log::error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 30 사용", e);
                30
            });

        Self { per_second, burst_size }
    }
}

/// CORS 설정
pub struct CorsConfig;

impl CorsConfig {
    const DEFAULT_ORIGINS: &'static str =
        "http://localhost:3000,http://127.0.0.1:3000,http://localhost:8080,http://127.0.0.1:8080";

    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분) 를 읽습니다.
    pub fn allowed_origins() -> Vec<String> {
        Self::parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| Self::DEFAULT_ORIGINS.to_string()),
        )
    }

    pub fn parse_origins(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(|s| s.trim().trim_end_matches('/'))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Redis 설정
pub struct RedisConfig;

impl RedisConfig {
    /// `REDIS_URL` 이 설정되어 있지 않으면 `None` (메모리 쿨다운 저장소 사용)
    pub fn url() -> Option<String> {
        env::var("REDIS_URL").ok().filter(|s| !s.trim().is_empty())
    }
}
