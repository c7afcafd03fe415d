//! # HTTP Request Handlers Module
//!
//! 로그인 흐름의 HTTP 엔드포인트를 처리합니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Browser (메일 링크, 로그인 폼, 코드 입력)
//! └─────────────────────┬───────────────────────┘
//!                       │ 303 / HTML / JSON
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈)                        ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 로그인, 콜백 리졸버            ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   AuthProvider - GoTrue REST                ← 외부 인증 프로바이더
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`login`**: 로그인 폼과 재전송
//!   - `GET /login`, `POST /login`, `POST /auth/resend`
//! - **`callback`**: 콜백 리졸버
//!   - `GET /auth/callback` (메일 링크), `POST /auth/callback` (6자리 코드)
//! - **`session`**: 세션 조회/종료와 홈
//!   - `GET /auth/session`, `POST /auth/logout`, `GET /`
//!
//! 페이지 핸들러는 실패를 HTML 로 직접 그리고, 성공하면 `303 See Other` 로 이동합니다.

use actix_web::http::header;
use actix_web::{HttpResponse, HttpResponseBuilder};

#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.clone())
                .wrap(crate::middlewares::RedirectNormalizerMiddleware)
                .configure(crate::routes::configure_all_routes),
        )
        .await
    };
}

pub mod callback;
pub mod login;
pub mod session;

/// 캐시되지 않는 `303 See Other` 응답
pub(crate) fn see_other(location: &str) -> HttpResponseBuilder {
    let mut builder = HttpResponse::SeeOther();
    builder
        .insert_header((header::LOCATION, location.to_string()))
        .insert_header((header::CACHE_CONTROL, "no-store"));
    builder
}
