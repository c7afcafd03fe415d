//! # Domain Models Module
//!
//! 인증 콜백 흐름의 값 객체들을 정의합니다.
//! 모두 요청 하나의 수명 동안만 존재하며 저장되지 않습니다.
//!
//! | 모델 | 역할 |
//! |------|------|
//! | [`location::Location`] | 정규화 대상이 되는 현재 위치 |
//! | [`artifact::AuthArtifact`] | URL/폼에서 추출한 인증 아티팩트 |
//! | [`next_target::NextTarget`] | 로그인 후 이동 경로 |
//! | [`session::Session`] | 프로바이더가 발급한 세션 |
//! | [`resolver_state::ResolverState`] | 콜백 리졸버 상태 |

pub mod artifact;
pub mod location;
pub mod next_target;
pub mod resolver_state;
pub mod session;

pub use artifact::AuthArtifact;
pub use location::Location;
pub use next_target::NextTarget;
pub use resolver_state::ResolverState;
pub use session::{FailureKind, ProviderFailure, ProviderResult, Session, SessionUser};
