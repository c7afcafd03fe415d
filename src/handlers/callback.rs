//! Callback HTTP Handlers
//!
//! 콜백 경로에서 인증 아티팩트를 세션으로 바꿉니다.
//!
//! # Endpoints
//!
//! - `GET /auth/callback` - 메일 링크 (`code`, 토큰 쌍, `token_hash`, 프로바이더 에러)
//! - `POST /auth/callback` - 사용자가 입력한 6자리 코드
//!
//! 결과는 둘 중 하나입니다.
//!
//! ```text
//! Resolved → 303 next  (세션이 있으면 세션 쿠키 설정, verifier 쿠키 제거)
//! Failed   → 실패 페이지 (캐시된 이메일이 있으면 코드 입력 + 재전송)
//! ```
use actix_web::{get, post, web, HttpRequest, HttpResponse, ResponseError};
use actix_web::http::StatusCode;
use crate::domain::dto::auth_request::{CallbackQuery, PasscodeForm};
use crate::domain::models::artifact::AuthArtifact;
use crate::domain::models::next_target::NextTarget;
use crate::domain::models::resolver_state::ResolverState;
use crate::domain::models::session::{ProviderFailure, Session};
use crate::errors::AppError;
use crate::handlers::see_other;
use crate::services::auth::ScopedAuthClient;
use crate::services::callback::{CallbackInput, CallbackResolver};
use crate::state::AppState;
use crate::views::{self, CallbackFailureView};

const MALFORMED_PASSCODE: &str = "Enter the 6-digit code from your email.";

/// 메일 링크 콜백
///
/// 쿼리를 해석할 수 없으면 아티팩트가 없는 방문으로 취급합니다 (`303 /`).
///
/// # Endpoint
/// `GET /auth/callback?code=..|access_token=..&refresh_token=..|token_hash=..&type=..&next=..`
#[get("/auth/callback")]
pub async fn resolve_callback(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    let query = web::Query::<CallbackQuery>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_else(|e| {
            log::debug!("콜백 쿼리 해석 실패, 빈 방문으로 처리: {}", e);
            CallbackQuery::default()
        });

    let client = state.auth.for_request(&req);
    let next = NextTarget::parse(query.next.as_deref());
    let input = CallbackInput {
        artifact: client.artifact(&query),
        next: next.clone(),
        provider_error: query.provider_error(),
    };

    let resolver = CallbackResolver::new(client.provider());
    let outcome = resolver.resolve(input).await;
    respond(&state, &client, &next, outcome).await
}

/// 6자리 코드 입력
///
/// 형식이 맞지 않는 코드는 프로바이더를 호출하지 않고 실패로 처리합니다.
///
/// # Endpoint
/// `POST /auth/callback` (form: `email`, `token`, `next`)
#[post("/auth/callback")]
pub async fn verify_passcode(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<PasscodeForm>,
) -> HttpResponse {
    let client = state.auth.for_request(&req);
    let form = form.into_inner();
    let next = NextTarget::parse(form.next.as_deref());

    let email = Some(form.email.trim())
        .filter(|e| !e.is_empty())
        .or(client.login_email())
        .map(str::to_string);
    let passcode = PasscodeForm {
        token: form.token.split_whitespace().collect(),
        ..form
    };

    let Some(email) = email.filter(|_| passcode.is_well_formed()) else {
        log::debug!("형식이 잘못된 코드 입력");
        return failure_page(
            &state,
            &client,
            &next,
            StatusCode::BAD_REQUEST,
            MALFORMED_PASSCODE,
        )
        .await;
    };

    let input = CallbackInput {
        artifact: Some(AuthArtifact::Passcode { email, token: passcode.token }),
        next: next.clone(),
        provider_error: None,
    };

    let resolver = CallbackResolver::new(client.provider());
    let outcome = resolver.resolve(input).await;
    respond(&state, &client, &next, outcome).await
}

async fn respond(
    state: &AppState,
    client: &ScopedAuthClient,
    next: &NextTarget,
    outcome: Option<ResolverState>,
) -> HttpResponse {
    match outcome {
        Some(ResolverState::Resolved { redirect_to, session: Some(session) }) => {
            establish(state, &redirect_to, &session)
        }
        Some(ResolverState::Resolved { redirect_to, session: None }) => see_other(&redirect_to).finish(),
        Some(ResolverState::Failed { kind, message }) => {
            let err = AppError::Provider(ProviderFailure::new(kind, message));
            failure_page(state, client, next, err.status_code(), &err.user_message()).await
        }
        None => see_other(next.as_str()).finish(),
    }
}

/// 세션 쿠키를 설정하고 이동합니다.
fn establish(state: &AppState, redirect_to: &str, session: &Session) -> HttpResponse {
    let mut response = see_other(redirect_to);
    for cookie in state.cookies.session(session) {
        response.cookie(cookie);
    }
    response
        .cookie(state.cookies.clear_code_verifier())
        .cookie(state.cookies.clear_login_email())
        .finish()
}

async fn failure_page(
    state: &AppState,
    client: &ScopedAuthClient,
    next: &NextTarget,
    status: StatusCode,
    message: &str,
) -> HttpResponse {
    let resend = match client.login_email() {
        Some(email) => Some((email, state.login.cooldown_remaining(email).await)),
        None => None,
    };

    views::html(
        status,
        views::callback_failure_page(&CallbackFailureView { message, next, resend }),
    )
}
