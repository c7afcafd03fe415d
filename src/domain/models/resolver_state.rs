//! 콜백 리졸버 상태

use crate::domain::models::session::{FailureKind, ProviderFailure, Session};

/// 콜백 리졸버의 최종 상태
///
/// 처리 중 상태는 두지 않습니다. `resolve` 가 끝나야 값이 생깁니다.
///
/// ```text
/// Resolved   (세션 수립 또는 빈 방문 → 이동)
/// Failed     (재시도 UI 렌더링)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverState {
    /// 이동할 경로와 (있다면) 새로 수립된 세션
    Resolved {
        redirect_to: String,
        session: Option<Session>,
    },
    Failed { kind: FailureKind, message: String },
}

impl ResolverState {
    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            ResolverState::Resolved { redirect_to, .. } => Some(redirect_to),
            _ => None,
        }
    }
}

impl From<ProviderFailure> for ResolverState {
    fn from(failure: ProviderFailure) -> Self {
        ResolverState::Failed {
            kind: failure.kind,
            message: failure.message,
        }
    }
}
