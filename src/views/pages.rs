//! 로그인 흐름 페이지
//!
//! | 페이지 | 경로 |
//! |--------|------|
//! | 로그인 폼 | `GET/POST /login` |
//! | 메일 확인 안내 (코드 입력 + 재전송) | `POST /login`, `POST /auth/resend` |
//! | 콜백 실패 | `GET/POST /auth/callback` |
//! | 홈 | `GET /` |

use crate::config::AuthFlow;
use crate::domain::models::next_target::NextTarget;
use crate::views::layout::{message, page, RESEND_COUNTDOWN_JS};
use crate::utils::string_utils::escape_html;

/// 로그인 폼
pub fn login_page(next: &NextTarget, email: Option<&str>, error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Sign in to Melodya</h1>
<p class="muted">We'll email you a sign-in code. No password needed.</p>
{error}
<form method="post" action="/login">
<label for="email">Email</label>
<input id="email" name="email" type="email" autocomplete="email" required value="{email}">
<input type="hidden" name="next" value="{next}">
<button type="submit">Email me a sign-in code</button>
</form>"#,
        error = message("error", error),
        email = escape_html(email.unwrap_or_default()),
        next = escape_html(next.as_str()),
    );

    page("Sign in", &body)
}

/// 메일 확인 안내 페이지
pub struct CheckEmailView<'a> {
    pub email: &'a str,
    pub next: &'a NextTarget,
    pub flow: AuthFlow,
    pub cooldown_remaining: u64,
    pub notice: Option<&'a str>,
    pub error: Option<&'a str>,
}

pub fn check_email_page(view: &CheckEmailView<'_>) -> String {
    let instructions = match view.flow {
        AuthFlow::Otp => "Enter the 6-digit code from the email below.",
        AuthFlow::Pkce | AuthFlow::MagicLink => {
            "Open the link in the email using this browser, or enter the 6-digit code below."
        }
    };

    let body = format!(
        r#"<h1>Check your email</h1>
<p>We sent a sign-in email to <strong>{email}</strong>.</p>
<p class="muted">{instructions}</p>
{notice}
{error}
{code_form}
{resend}
<p class="muted"><a href="/login?next={next_query}">Use a different email</a></p>"#,
        email = escape_html(view.email),
        instructions = instructions,
        notice = message("notice", view.notice),
        error = message("error", view.error),
        code_form = passcode_form(view.email, view.next),
        resend = resend_form(view.next, view.cooldown_remaining),
        next_query = escape_html(&urlencoding::encode(view.next.as_str())),
    );

    page("Check your email", &body)
}

/// 콜백 실패 페이지
pub struct CallbackFailureView<'a> {
    pub message: &'a str,
    pub next: &'a NextTarget,
    /// 캐시된 이메일과 남은 쿨다운. 없으면 로그인 화면으로 돌아가는 링크만 보여줍니다.
    pub resend: Option<(&'a str, u64)>,
}

pub fn callback_failure_page(view: &CallbackFailureView<'_>) -> String {
    let next_query = escape_html(&urlencoding::encode(view.next.as_str()));

    let recovery = match view.resend {
        Some((email, remaining)) => format!(
            r#"<p class="muted">Signing in as <strong>{email}</strong>.</p>
{code_form}
{resend}
<p class="muted"><a href="/login?next={next_query}">Start over with a different email</a></p>"#,
            email = escape_html(email),
            code_form = passcode_form(email, view.next),
            resend = resend_form(view.next, remaining),
            next_query = next_query,
        ),
        None => format!(
            r#"<p><a href="/login?next={next_query}">Return to sign in and start over</a></p>"#,
            next_query = next_query,
        ),
    };

    let body = format!(
        r#"<h1>We couldn't sign you in</h1>
{message}
{recovery}"#,
        message = message("error", Some(view.message)),
        recovery = recovery,
    );

    page("Sign-in failed", &body)
}

/// 홈 페이지
pub fn home_page(signed_in_email: Option<&str>) -> String {
    let body = match signed_in_email {
        Some(email) => format!(
            r#"<h1>Melodya</h1>
<p>Signed in as <strong>{email}</strong>.</p>
<form method="post" action="/auth/logout"><button type="submit">Sign out</button></form>"#,
            email = escape_html(email),
        ),
        None => r#"<h1>Melodya</h1>
<p>Share what you're listening to.</p>
<p><a href="/login">Sign in with your email</a></p>"#
            .to_string(),
    };

    page("Home", &body)
}

fn passcode_form(email: &str, next: &NextTarget) -> String {
    format!(
        r#"<form method="post" action="/auth/callback">
<input type="hidden" name="email" value="{email}">
<input type="hidden" name="next" value="{next}">
<label for="token">6-digit code</label>
<input id="token" name="token" inputmode="numeric" autocomplete="one-time-code" pattern="[0-9]{{6}}" maxlength="6" required>
<button type="submit">Verify code</button>
</form>"#,
        email = escape_html(email),
        next = escape_html(next.as_str()),
    )
}

fn resend_form(next: &NextTarget, remaining: u64) -> String {
    format!(
        r#"<form method="post" action="/auth/resend">
<input type="hidden" name="next" value="{next}">
<button id="resend-button" type="submit" data-remaining="{remaining}"{disabled}>Resend email</button>
<p id="resend-countdown" class="muted">{countdown}</p>
</form>
<script>{script}</script>"#,
        next = escape_html(next.as_str()),
        remaining = remaining,
        disabled = if remaining > 0 { " disabled" } else { "" },
        countdown = if remaining > 0 {
            format!("You can request another email in {}s.", remaining)
        } else {
            String::new()
        },
        script = RESEND_COUNTDOWN_JS,
    )
}
