//! 인증 콜백 처리 모듈
//!
//! - [`normalizer`] - 흩어진 아티팩트를 콜백 경로의 쿼리로 모읍니다.
//! - [`resolver`] - 콜백 경로에서 아티팩트를 세션으로 바꿉니다.

pub mod normalizer;
pub mod resolver;

pub use normalizer::{RedirectNormalizer, FRAGMENT_FORWARDER_JS};
pub use resolver::{CallbackInput, CallbackResolver};
