//! 로그인 폼 서비스 모듈
//!
//! - [`login_service`] - 자격 증명 발송, 재전송
//! - [`cooldown`] - 재전송 쿨다운 저장소 (Redis / 메모리)

pub mod cooldown;
pub mod login_service;

pub use cooldown::{CooldownStatus, CooldownStore, MemoryCooldownStore, RedisCooldownStore};
pub use login_service::{IssueOutcome, IssuedCredential, LoginService};
