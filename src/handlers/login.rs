//! Login HTTP Handlers
//!
//! 이메일을 받아 자격 증명(6자리 코드 또는 링크)을 발송하고, 재전송을 처리합니다.
//!
//! # Endpoints
//!
//! - `GET /login` - 로그인 폼
//! - `POST /login` - 발송 요청
//! - `POST /auth/resend` - 캐시된 이메일로 재발송 (쿨다운 적용)
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, ResponseError};
use validator::Validate;
use crate::config::LOGIN_PATH;
use crate::domain::dto::auth_request::{LoginForm, LoginPageQuery, ResendForm};
use crate::domain::models::next_target::NextTarget;
use crate::errors::{AppError, AppResult};
use crate::handlers::see_other;
use crate::services::login::{IssueOutcome, IssuedCredential};
use crate::state::AppState;
use crate::utils::string_utils::{mask_email, validate_required_string};
use crate::views::{self, CheckEmailView};

/// 로그인 폼
///
/// # Endpoint
/// `GET /login?next={path}&error={message}`
#[get("/login")]
pub async fn show_login(req: HttpRequest, query: web::Query<LoginPageQuery>) -> HttpResponse {
    let next = NextTarget::parse(query.next.as_deref());
    let cached_email = crate::services::auth::session_cookies::read_login_email(&req);

    views::html(
        StatusCode::OK,
        views::login_page(&next, cached_email.as_deref(), query.error.as_deref()),
    )
}

/// 로그인 폼 제출
///
/// 검증 실패는 `400` 으로, 프로바이더 거부는 프로바이더 메시지 그대로 폼을 다시 그립니다.
/// 성공하면 이메일을 쿠키에 캐시하고 메일 확인 안내 페이지를 보여줍니다.
/// 같은 이메일의 쿨다운 창이 진행 중이면 발송 없이 안내 페이지를 `429` 로 보여줍니다.
///
/// # Endpoint
/// `POST /login` (form: `email`, `next`)
#[post("/login")]
pub async fn submit_login(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> HttpResponse {
    let form = form.into_inner();
    let next = NextTarget::parse(form.next.as_deref());

    let email = match validated_email(&form) {
        Ok(email) => email,
        Err(e) => return render_login_error(&next, &form.email, &e),
    };

    let client = state.auth.for_request(&req);
    match state
        .login
        .request_credential(client.provider().as_ref(), &email, &next)
        .await
    {
        Ok(IssueOutcome::Sent(issued)) => acknowledge(&state, &issued, &next, StatusCode::OK, None, None),
        Ok(IssueOutcome::CoolingDown { email, remaining }) => cooling_down(&state, email, &next, remaining),
        Err(e) => {
            log::warn!("자격 증명 발송 실패 - {}: {}", mask_email(&email), e);
            render_login_error(&next, &email, &e)
        }
    }
}

/// 재전송
///
/// 쿨다운 중이면 프로바이더를 호출하지 않고 남은 시간과 함께 `429` 를 돌려줍니다.
/// 캐시된 이메일이 없으면 로그인 폼으로 보냅니다.
///
/// # Endpoint
/// `POST /auth/resend` (form: `next`)
#[post("/auth/resend")]
pub async fn resend_email(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<ResendForm>,
) -> HttpResponse {
    let next = NextTarget::parse(form.next.as_deref());
    let client = state.auth.for_request(&req);

    let Some(email) = client.login_email().map(str::to_string) else {
        log::debug!("캐시된 이메일 없음, 로그인 폼으로 이동");
        return see_other(LOGIN_PATH).finish();
    };

    match state.login.resend(client.provider().as_ref(), &email, &next).await {
        Ok(IssueOutcome::Sent(issued)) => acknowledge(
            &state,
            &issued,
            &next,
            StatusCode::OK,
            Some("We sent you a new email."),
            None,
        ),
        Ok(IssueOutcome::CoolingDown { email, remaining }) => cooling_down(&state, email, &next, remaining),
        Err(e) => {
            log::warn!("재전송 실패 - {}: {}", mask_email(&email), e);
            let issued = IssuedCredential {
                cooldown_remaining: state.login.cooldown_remaining(&email).await,
                email,
                code_verifier: None,
            };
            acknowledge(&state, &issued, &next, e.status_code(), None, Some(&e.user_message()))
        }
    }
}

/// 쿨다운 중 안내 페이지 (`429`, 발송 없음)
fn cooling_down(state: &AppState, email: String, next: &NextTarget, remaining: u64) -> HttpResponse {
    let err = AppError::RateLimited(remaining);
    let issued = IssuedCredential {
        email,
        code_verifier: None,
        cooldown_remaining: remaining,
    };
    acknowledge(state, &issued, next, err.status_code(), None, Some(&err.user_message()))
}

/// 공백 제거 후 필수/형식 검증
fn validated_email(form: &LoginForm) -> AppResult<String> {
    let email = validate_required_string(&form.email, "Email")?;
    LoginForm { email: email.clone(), next: None }.validate()?;
    Ok(email)
}

fn render_login_error(next: &NextTarget, email: &str, err: &AppError) -> HttpResponse {
    views::html(
        err.status_code(),
        views::login_page(next, Some(email.trim()), Some(&err.user_message())),
    )
}

/// 메일 확인 안내 페이지와 보조 쿠키
fn acknowledge(
    state: &AppState,
    issued: &IssuedCredential,
    next: &NextTarget,
    status: StatusCode,
    notice: Option<&str>,
    error: Option<&str>,
) -> HttpResponse {
    let document = views::check_email_page(&CheckEmailView {
        email: &issued.email,
        next,
        flow: state.login.settings().flow,
        cooldown_remaining: issued.cooldown_remaining,
        notice,
        error,
    });

    let mut response = views::html(status, document);
    let mut cookies = vec![state.cookies.login_email(&issued.email)];
    if let Some(verifier) = &issued.code_verifier {
        cookies.push(state.cookies.code_verifier(verifier));
    }
    for cookie in cookies {
        if let Err(e) = response.add_cookie(&cookie) {
            log::error!("쿠키 설정 실패: {}", e);
        }
    }
    response
}
