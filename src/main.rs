//! 멜로디야 인증 서비스 메인 애플리케이션
//!
//! 설정을 읽고 쿨다운 저장소와 인증 프로바이더 클라이언트를 준비한 뒤
//! Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use melodya_auth::caching::redis::RedisClient;
use melodya_auth::config::{AuthSettings, CorsConfig, RateLimitConfig, RedisConfig, ServerConfig, SupabaseConfig};
use melodya_auth::middlewares::RedirectNormalizerMiddleware;
use melodya_auth::routes::configure_all_routes;
use melodya_auth::services::login::{CooldownStore, MemoryCooldownStore, RedisCooldownStore};
use melodya_auth::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 멜로디야 인증 서비스 시작중...");

    let supabase = match SupabaseConfig::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("인증 프로바이더 설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };
    let settings = AuthSettings::from_env();

    info!(
        "🔐 로그인 방식: {}, 재전송 쿨다운: {}초, 콜백: {}",
        settings.flow.as_str(),
        settings.resend_cooldown.as_secs(),
        settings.callback_url()
    );

    let cooldown = initialize_cooldown_store().await;

    let state = match AppState::new(&supabase, settings, cooldown) {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            error!("애플리케이션 상태 초기화 실패: {}", e);
            std::process::exit(1);
        }
    };

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    // HTTP 서버 시작
    start_http_server(state).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 로깅, 경로 정규화, 리다이렉트 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 Login: http://{}/login", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 올바르지 않습니다 (0 값)"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = CorsConfig::allowed_origins();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            // 정규화된 경로로 판단하도록 NormalizePath 안쪽에 둠
            .wrap(RedirectNormalizerMiddleware)
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .run()
        .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=melodya_auth::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// 재전송 쿨다운 저장소를 준비합니다
///
/// `REDIS_URL` 이 있으면 Redis 를 사용하고, 없거나 연결에 실패하면 메모리 저장소로 대체합니다.
async fn initialize_cooldown_store() -> Arc<dyn CooldownStore> {
    let Some(url) = RedisConfig::url() else {
        info!("💾 REDIS_URL 미설정, 메모리 쿨다운 저장소 사용");
        return Arc::new(MemoryCooldownStore::new());
    };

    info!("📡 Redis 연결 중...");
    match RedisClient::new(&url).await {
        Ok(client) => {
            info!("✅ Redis 연결 성공");
            Arc::new(RedisCooldownStore::new(client))
        }
        Err(e) => {
            warn!("Redis 연결 실패, 메모리 쿨다운 저장소로 대체: {}", e);
            Arc::new(MemoryCooldownStore::new())
        }
    }
}

/// CORS 설정을 구성합니다
///
/// `CORS_ALLOWED_ORIGINS` 의 Origin 만 허용하고, 쿠키 기반 세션이므로 자격 증명을 지원합니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    let cors = allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}
