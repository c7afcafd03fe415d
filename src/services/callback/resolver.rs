//! # 콜백 리졸버
//!
//! 정규화된 인증 아티팩트를 세션으로 바꾸고 이동할 곳을 결정합니다.
//!
//! ## 상태 전이
//!
//! ```text
//!              ┌─ 토큰 쌍      → set_session        ─┐
//!              ├─ code         → exchange_code      ─┤  성공 → Resolved(next, session)
//! 아티팩트 ────┼─ token_hash   → verify_token_hash  ─┤  실패 → Failed(kind, message)
//!              ├─ 6자리 코드   → verify_otp         ─┘
//!              ├─ 프로바이더 에러 파라미터            → Failed
//!              └─ 없음                                 → Resolved("/", 세션 없음)
//! ```
//!
//! 리졸버 하나는 아티팩트를 정확히 한 번 소비합니다. 두 번째 `resolve` 는
//! 프로바이더를 호출하지 않고 `None` 을 반환합니다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use crate::domain::dto::auth_request::ProviderRedirectError;
use crate::domain::models::artifact::AuthArtifact;
use crate::domain::models::next_target::NextTarget;
use crate::domain::models::resolver_state::ResolverState;
use crate::domain::models::session::{FailureKind, ProviderFailure, ProviderResult, Session};
use crate::services::auth::provider::AuthProvider;

/// 리졸버 입력
#[derive(Debug, Clone, Default)]
pub struct CallbackInput {
    pub artifact: Option<AuthArtifact>,
    pub next: NextTarget,
    /// 프로바이더가 리다이렉트에 실어 보낸 에러 (`error`, `error_code`, `error_description`)
    pub provider_error: Option<ProviderRedirectError>,
}

pub struct CallbackResolver {
    provider: Arc<dyn AuthProvider>,
    consumed: AtomicBool,
}

impl CallbackResolver {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            consumed: AtomicBool::new(false),
        }
    }

    /// 아티팩트를 한 번 처리하여 최종 상태를 반환합니다.
    ///
    /// 이미 소비된 리졸버에서는 아무것도 하지 않고 `None` 을 반환합니다.
    pub async fn resolve(&self, input: CallbackInput) -> Option<ResolverState> {
        if self.consumed.swap(true, Ordering::SeqCst) {
            log::debug!("이미 처리된 콜백, 중복 호출 무시");
            return None;
        }

        let CallbackInput { artifact, next, provider_error } = input;

        let Some(artifact) = artifact else {
            return Some(match provider_error {
                Some(error) => Self::redirect_failure(error).into(),
                // 아티팩트 없는 방문은 next 를 무시하고 홈으로
                None => ResolverState::Resolved {
                    redirect_to: NextTarget::HOME.to_string(),
                    session: None,
                },
            });
        };

        let shape = artifact.shape();
        let state = match self.exchange(artifact).await {
            Ok(session) => {
                log::info!("세션 수립 완료: artifact={}, user={}", shape, session.user.id);
                ResolverState::Resolved {
                    redirect_to: next.to_string(),
                    session: Some(session),
                }
            }
            Err(failure) => {
                log::warn!("콜백 처리 실패: artifact={}, kind={}", shape, failure.kind.as_str());
                failure.into()
            }
        };

        Some(state)
    }

    /// 아티팩트 종류에 맞는 프로바이더 호출 (최대 한 번)
    async fn exchange(&self, artifact: AuthArtifact) -> ProviderResult<Session> {
        match artifact {
            AuthArtifact::TokenPair { access_token, refresh_token } => {
                self.provider.set_session(&access_token, &refresh_token).await
            }
            AuthArtifact::Code { code, code_verifier: Some(code_verifier) } => {
                self.provider.exchange_code(&code, &code_verifier).await
            }
            AuthArtifact::Code { code_verifier: None, .. } => Err(ProviderFailure::verifier_mismatch()),
            AuthArtifact::TokenHash { token_hash, otp_type } => {
                self.provider.verify_token_hash(&token_hash, &otp_type).await
            }
            AuthArtifact::Passcode { email, token } => self.provider.verify_otp(&email, &token).await,
        }
    }

    fn redirect_failure(error: ProviderRedirectError) -> ProviderFailure {
        log::warn!("프로바이더 리다이렉트 에러: {} ({:?})", error.error, error.error_code);

        if error.error_code.as_deref() == Some("otp_expired") {
            return ProviderFailure::invalid_or_expired(None);
        }

        let message = error
            .description
            .unwrap_or_else(|| format!("Sign-in failed: {}", error.error.replace('_', " ")));
        ProviderFailure::new(FailureKind::Rejected, message)
    }
}
