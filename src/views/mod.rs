//! 서버 렌더링 HTML 페이지
//!
//! 템플릿 엔진 없이 `format!` 으로 작은 페이지들을 만듭니다.
//! 사용자 입력과 프로바이더 메시지는 항상 [`escape_html`](crate::utils::string_utils::escape_html) 을 거칩니다.

pub mod layout;
pub mod pages;

pub use layout::html;
pub use pages::{
    callback_failure_page, check_email_page, home_page, login_page, CallbackFailureView, CheckEmailView,
};
