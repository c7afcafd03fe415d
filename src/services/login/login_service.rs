//! # 로그인 서비스
//!
//! 이메일을 받아 프로바이더에 자격 증명 발송을 요청하고,
//! 재전송 쿨다운을 관리합니다.
//!
//! 발송 방식은 `AUTH_FLOW` 설정을 따릅니다.
//!
//! | 흐름 | 프로바이더 요청 | 사용자가 받는 것 |
//! |------|-----------------|------------------|
//! | `otp` | `POST /otp` | 6자리 코드 |
//! | `pkce` | `POST /otp?redirect_to=..` + S256 challenge | `?code=` 링크 |
//! | `magic_link` | `POST /otp?redirect_to=..` | `#access_token=..` 링크 |
//!
//! 실패 시 자동 재시도는 하지 않습니다. 프로바이더 메시지는 그대로 화면에 전달됩니다.

use std::sync::Arc;
use url::form_urlencoded;
use crate::config::{AuthFlow, AuthSettings};
use crate::domain::models::next_target::NextTarget;
use crate::errors::{AppError, AppResult};
use crate::services::auth::pkce::PkceChallenge;
use crate::services::auth::provider::AuthProvider;
use crate::services::login::cooldown::{CooldownStatus, CooldownStore};
use crate::utils::string_utils::{mask_email, validate_required_string};

/// 발송 성공 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredential {
    /// 정리된 이메일 (쿠키에 캐시됨)
    pub email: String,
    /// PKCE 흐름일 때 브라우저 쿠키에 보관할 verifier
    pub code_verifier: Option<String>,
    /// 재전송 가능까지 남은 초
    pub cooldown_remaining: u64,
}

/// 발송 요청 결과 (로그인, 재전송 공통)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    Sent(IssuedCredential),
    /// 쿨다운 중이라 발송하지 않음
    CoolingDown { email: String, remaining: u64 },
}

pub struct LoginService {
    settings: AuthSettings,
    cooldown: Arc<dyn CooldownStore>,
}

impl LoginService {
    pub fn new(settings: AuthSettings, cooldown: Arc<dyn CooldownStore>) -> Self {
        Self { settings, cooldown }
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    pub fn cooldown_store(&self) -> &Arc<dyn CooldownStore> {
        &self.cooldown
    }

    /// 로그인 폼 제출
    ///
    /// 같은 이메일의 쿨다운 창이 진행 중이면 프로바이더를 호출하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 빈 이메일
    /// * `Provider` - 프로바이더 거부/통신 실패 (메시지 그대로)
    pub async fn request_credential(
        &self,
        provider: &dyn AuthProvider,
        email: &str,
        next: &NextTarget,
    ) -> AppResult<IssueOutcome> {
        let email = validate_required_string(email, "Email")?;
        self.issue(provider, &email, next).await
    }

    /// 캐시된 이메일로 다시 발송합니다. 쿨다운 규칙은 로그인과 같습니다.
    pub async fn resend(
        &self,
        provider: &dyn AuthProvider,
        email: &str,
        next: &NextTarget,
    ) -> AppResult<IssueOutcome> {
        let email = validate_required_string(email, "Email")?;
        self.issue(provider, &email, next).await
    }

    /// 쿨다운 창을 먼저 점유하고 발송합니다. 발송이 실패하면 창을 해제합니다.
    async fn issue(
        &self,
        provider: &dyn AuthProvider,
        email: &str,
        next: &NextTarget,
    ) -> AppResult<IssueOutcome> {
        let window = self.settings.resend_cooldown;

        if let CooldownStatus::Active { remaining } = self.cooldown.try_start(email, window).await? {
            log::info!("쿨다운 중, 발송 생략: {} ({}초 남음)", mask_email(email), remaining);
            return Ok(IssueOutcome::CoolingDown {
                email: email.to_string(),
                remaining,
            });
        }

        match self.send(provider, email, next).await {
            Ok(issued) => Ok(IssueOutcome::Sent(IssuedCredential {
                cooldown_remaining: window.as_secs(),
                ..issued
            })),
            Err(e) => {
                if let Err(clear_err) = self.cooldown.clear(email).await {
                    log::warn!("쿨다운 해제 실패: {}", clear_err);
                }
                Err(e)
            }
        }
    }

    /// 캐시된 이메일의 남은 쿨다운 (없으면 0)
    pub async fn cooldown_remaining(&self, email: &str) -> u64 {
        match self.cooldown.remaining(email).await {
            Ok(remaining) => remaining.unwrap_or(0),
            Err(e) => {
                log::warn!("쿨다운 조회 실패, 0으로 처리: {}", e);
                0
            }
        }
    }

    async fn send(
        &self,
        provider: &dyn AuthProvider,
        email: &str,
        next: &NextTarget,
    ) -> AppResult<IssuedCredential> {
        let flow = self.settings.flow;
        let redirect_to = flow.uses_redirect().then(|| self.redirect_to(next));
        let challenge = (flow == AuthFlow::Pkce).then(PkceChallenge::generate);

        provider
            .send_credential(email, redirect_to.as_deref(), challenge.as_ref())
            .await
            .map_err(AppError::from)?;

        log::info!("자격 증명 발송 요청 완료: flow={}, email={}", flow.as_str(), mask_email(email));

        Ok(IssuedCredential {
            email: email.to_string(),
            code_verifier: challenge.map(|c| c.verifier),
            cooldown_remaining: 0,
        })
    }

    /// 메일 링크에 넣을 콜백 URL (`next` 가 기본값이 아니면 함께 전달)
    fn redirect_to(&self, next: &NextTarget) -> String {
        let callback = self.settings.callback_url();
        if next.is_home() {
            return callback;
        }

        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("next", next.as_str())
            .finish();
        format!("{}?{}", callback, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::domain::models::session::FailureKind;
    use crate::services::auth::testing::{FakeProvider, ProviderCall};
    use crate::services::login::cooldown::MemoryCooldownStore;

    fn service(flow: AuthFlow) -> LoginService {
        let settings = AuthSettings {
            site_url: "https://melodya.app".to_string(),
            flow,
            resend_cooldown: Duration::from_secs(60),
            secure_cookies: true,
        };
        LoginService::new(settings, Arc::new(MemoryCooldownStore::new()))
    }

    fn sent(outcome: IssueOutcome) -> IssuedCredential {
        match outcome {
            IssueOutcome::Sent(issued) => issued,
            other => panic!("expected a sent credential, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_otp_flow_sends_without_redirect() {
        let provider = FakeProvider::default();
        let issued = sent(
            service(AuthFlow::Otp)
                .request_credential(&provider, "  user@example.com ", &NextTarget::home())
                .await
                .unwrap(),
        );

        assert_eq!(issued.email, "user@example.com");
        assert_eq!(issued.code_verifier, None);
        assert_eq!(issued.cooldown_remaining, 60);
        assert_eq!(
            provider.calls(),
            vec![ProviderCall::SendCredential {
                email: "user@example.com".to_string(),
                redirect_to: None,
                with_challenge: false,
            }]
        );
    }

    #[actix_web::test]
    async fn test_pkce_flow_sends_challenge_and_redirect() {
        let provider = FakeProvider::default();
        let issued = sent(
            service(AuthFlow::Pkce)
                .request_credential(&provider, "user@example.com", &NextTarget::parse(Some("/profile")))
                .await
                .unwrap(),
        );

        assert_eq!(issued.code_verifier.as_ref().map(String::len), Some(64));
        assert_eq!(
            provider.calls(),
            vec![ProviderCall::SendCredential {
                email: "user@example.com".to_string(),
                redirect_to: Some("https://melodya.app/auth/callback?next=%2Fprofile".to_string()),
                with_challenge: true,
            }]
        );
    }

    #[actix_web::test]
    async fn test_magic_link_redirect_without_next() {
        let provider = FakeProvider::default();
        service(AuthFlow::MagicLink)
            .request_credential(&provider, "user@example.com", &NextTarget::home())
            .await
            .unwrap();

        assert_eq!(
            provider.calls(),
            vec![ProviderCall::SendCredential {
                email: "user@example.com".to_string(),
                redirect_to: Some("https://melodya.app/auth/callback".to_string()),
                with_challenge: false,
            }]
        );
    }

    #[actix_web::test]
    async fn test_provider_message_is_surfaced() {
        let provider = FakeProvider::rejecting_send("Signups not allowed for otp");
        let err = service(AuthFlow::Otp)
            .request_credential(&provider, "user@example.com", &NextTarget::home())
            .await
            .unwrap_err();

        match err {
            AppError::Provider(failure) => {
                assert_eq!(failure.kind, FailureKind::Rejected);
                assert_eq!(failure.message, "Signups not allowed for otp");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
        assert_eq!(provider.call_count(), 1);
    }

    #[actix_web::test]
    async fn test_blank_email_is_rejected_before_provider() {
        let provider = FakeProvider::default();
        let err = service(AuthFlow::Otp)
            .request_credential(&provider, "   ", &NextTarget::home())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[actix_web::test]
    async fn test_resend_inside_cooldown_makes_no_call() {
        let provider = FakeProvider::default();
        let service = service(AuthFlow::Otp);

        service
            .request_credential(&provider, "user@example.com", &NextTarget::home())
            .await
            .unwrap();
        let outcome = service
            .resend(&provider, "user@example.com", &NextTarget::home())
            .await
            .unwrap();

        match outcome {
            IssueOutcome::CoolingDown { remaining, .. } => assert!(remaining > 0 && remaining <= 60),
            other => panic!("expected cooldown, got {:?}", other),
        }
        assert_eq!(provider.call_count(), 1);
        assert!(service.cooldown_remaining("user@example.com").await > 0);
    }

    #[actix_web::test]
    async fn test_resend_after_cooldown_sends() {
        let provider = FakeProvider::default();
        let service = service(AuthFlow::Otp);

        let outcome = service
            .resend(&provider, "user@example.com", &NextTarget::home())
            .await
            .unwrap();

        assert!(matches!(outcome, IssueOutcome::Sent(ref issued) if issued.cooldown_remaining == 60));
        assert_eq!(provider.call_count(), 1);
    }

    #[actix_web::test]
    async fn test_second_login_inside_cooldown_makes_no_call() {
        let provider = FakeProvider::default();
        let service = service(AuthFlow::Otp);

        sent(
            service
                .request_credential(&provider, "user@example.com", &NextTarget::home())
                .await
                .unwrap(),
        );
        let outcome = service
            .request_credential(&provider, "User@Example.com", &NextTarget::home())
            .await
            .unwrap();

        assert!(matches!(outcome, IssueOutcome::CoolingDown { remaining, .. } if remaining > 0));
        assert_eq!(provider.call_count(), 1);
    }

    #[actix_web::test]
    async fn test_failed_resend_releases_cooldown() {
        let provider = FakeProvider::rejecting_send("Email rate limit exceeded");
        let service = service(AuthFlow::Otp);

        let result = service.resend(&provider, "user@example.com", &NextTarget::home()).await;

        assert!(matches!(result, Err(AppError::Provider(_))));
        assert_eq!(service.cooldown_remaining("user@example.com").await, 0);

        let again = service.resend(&provider, "user@example.com", &NextTarget::home()).await;
        assert!(again.is_err());
        assert_eq!(provider.call_count(), 2);
    }

    #[actix_web::test]
    async fn test_failed_login_releases_cooldown() {
        let provider = FakeProvider::rejecting_send("Signups not allowed for otp");
        let service = service(AuthFlow::Otp);

        assert!(service
            .request_credential(&provider, "user@example.com", &NextTarget::home())
            .await
            .is_err());
        assert_eq!(service.cooldown_remaining("user@example.com").await, 0);
    }
}
