//! 라우트 설정 모듈
//!
//! 로그인 흐름의 페이지/엔드포인트와 헬스체크를 등록합니다.
//!
//! | 경로 | 핸들러 |
//! |------|--------|
//! | `GET /` | [`handlers::session::home`] |
//! | `GET/POST /login` | [`handlers::login`] |
//! | `POST /auth/resend` | [`handlers::login::resend_email`] |
//! | `GET/POST /auth/callback` | [`handlers::callback`] |
//! | `GET /auth/session`, `POST /auth/logout` | [`handlers::session`] |
//! | `GET /health` | [`health_check`] |
//!
//! 모든 페이지 요청은 먼저 `RedirectNormalizerMiddleware` 를 거칩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! let app = App::new()
//!     .app_data(web::Data::new(state))
//!     .configure(configure_all_routes);
//! ```

use actix_web::{get, web, HttpResponse};
use serde_json::json;
use crate::handlers;
use crate::state::AppState;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    configure_login_routes(cfg);
    configure_callback_routes(cfg);
    configure_session_routes(cfg);
}

/// 로그인 폼과 재전송
///
/// - `GET /login` - 로그인 폼
/// - `POST /login` - 자격 증명 발송
/// - `POST /auth/resend` - 재전송 (쿨다운)
///
/// ```bash
/// curl -X POST http://localhost:8080/login -d 'email=user@example.com&next=/profile'
/// ```
fn configure_login_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::login::show_login)
        .service(handlers::login::submit_login)
        .service(handlers::login::resend_email);
}

/// 콜백 경로
///
/// - `GET /auth/callback` - 메일 링크 처리
/// - `POST /auth/callback` - 6자리 코드 확인
fn configure_callback_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::callback::resolve_callback)
        .service(handlers::callback::verify_passcode);
}

fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::session::home)
        .service(handlers::session::session_status)
        .service(handlers::session::logout);
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 쿨다운 저장소가 응답하지 않으면 `503` 과 `degraded` 를 돌려줍니다.
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "melodya_auth",
///   "version": "0.1.0",
///   "timestamp": "2026-01-01T00:00:00Z",
///   "auth_flow": "otp",
///   "features": {
///     "cooldown_store": "redis",
///     "cooldown_store_healthy": true
///   }
/// }
/// ```
#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let store = state.login.cooldown_store();
    let healthy = store.is_healthy().await;

    let body = json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "auth_flow": state.login.settings().flow.as_str(),
        "features": {
            "cooldown_store": store.backend(),
            "cooldown_store_healthy": healthy
        }
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
