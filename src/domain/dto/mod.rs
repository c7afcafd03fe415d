//! # Data Transfer Objects
//!
//! - [`auth_request`] - 브라우저 → 서버 (폼, 콜백 쿼리)
//! - [`gotrue`] - 서버 ↔ 인증 프로바이더 REST 본문

pub mod auth_request;
pub mod gotrue;

pub use auth_request::*;
