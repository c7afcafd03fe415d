//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스들은 전역 싱글톤이 아니라 시작 시 한 번 만들어져 `AppState` 를 통해
//! 핸들러에 전달됩니다. 프로바이더 호출은 요청마다 만들어지는
//! [`auth::ScopedAuthClient`] 를 거칩니다.
//!
//! # Modules
//!
//! - [`auth`] - 프로바이더 클라이언트, PKCE, 토큰 검사, 세션 쿠키
//! - [`callback`] - 리다이렉트 정규화와 콜백 리졸버
//! - [`login`] - 자격 증명 발송과 재전송 쿨다운
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::callback::{CallbackInput, CallbackResolver};
//!
//! let client = state.auth.for_request(&req);
//! let resolver = CallbackResolver::new(client.provider());
//! let outcome = resolver.resolve(CallbackInput { artifact, next, provider_error }).await;
//! ```

pub mod auth;
pub mod callback;
pub mod login;
