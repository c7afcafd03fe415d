//! Session HTTP Handlers
//!
//! 세션 쿠키를 로컬에서 검사하여 상태를 알려주고, 로그아웃을 처리합니다.
//! 상태 조회에는 프로바이더 호출이 없습니다.
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use serde::Serialize;
use crate::config::LOGIN_PATH;
use crate::handlers::see_other;
use crate::services::auth::AccessClaims;
use crate::state::AppState;
use crate::views;

/// `GET /auth/session` 응답
#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<i64>,
}

impl SessionStatus {
    fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            email: None,
            expires_at: None,
        }
    }
}

impl From<AccessClaims> for SessionStatus {
    fn from(claims: AccessClaims) -> Self {
        Self {
            authenticated: !claims.is_expired(),
            user_id: Some(claims.sub),
            email: claims.email,
            expires_at: Some(claims.exp),
        }
    }
}

/// 액세스 토큰 쿠키의 클레임 (없거나 읽을 수 없으면 `None`)
fn current_claims(req: &HttpRequest, state: &AppState) -> Option<AccessClaims> {
    let client = state.auth.for_request(req);
    let token = client.access_token()?;

    match state.inspector.inspect(token) {
        Ok(claims) => Some(claims),
        Err(e) => {
            log::debug!("세션 쿠키 검사 실패: {}", e.kind.as_str());
            None
        }
    }
}

/// 현재 세션 상태
///
/// # Endpoint
/// `GET /auth/session`
///
/// ```json
/// { "authenticated": true, "user_id": "…", "email": "user@example.com", "expires_at": 1760000000 }
/// ```
#[get("/auth/session")]
pub async fn session_status(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let status = current_claims(&req, &state)
        .map(SessionStatus::from)
        .unwrap_or_else(SessionStatus::anonymous);

    HttpResponse::Ok()
        .insert_header((actix_web::http::header::CACHE_CONTROL, "no-store"))
        .json(status)
}

/// 로그아웃
///
/// 프로바이더 세션 종료는 실패해도 진행합니다. 쿠키는 항상 지웁니다.
///
/// # Endpoint
/// `POST /auth/logout`
#[post("/auth/logout")]
pub async fn logout(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let client = state.auth.for_request(&req);

    if let Some(token) = client.access_token() {
        if let Err(e) = client.provider().sign_out(token).await {
            log::warn!("프로바이더 로그아웃 실패, 쿠키만 제거: {}", e.kind.as_str());
        }
    }

    let mut response = see_other(LOGIN_PATH);
    for cookie in state.cookies.clear_session() {
        response.cookie(cookie);
    }
    response
        .cookie(state.cookies.clear_code_verifier())
        .cookie(state.cookies.clear_login_email())
        .finish()
}

/// 홈
///
/// # Endpoint
/// `GET /`
#[get("/")]
pub async fn home(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let email = current_claims(&req, &state)
        .filter(|claims| !claims.is_expired())
        .map(|claims| claims.email.unwrap_or(claims.sub));

    views::html(StatusCode::OK, views::home_page(email.as_deref()))
}
