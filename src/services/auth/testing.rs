//! 테스트용 가짜 프로바이더
//!
//! 호출을 순서대로 기록하고, 미리 정해 둔 결과를 돌려줍니다.

use std::sync::Mutex;
use async_trait::async_trait;
use crate::domain::models::session::{FailureKind, ProviderFailure, ProviderResult, Session, SessionUser};
use crate::services::auth::pkce::PkceChallenge;
use crate::services::auth::provider::AuthProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    SendCredential {
        email: String,
        redirect_to: Option<String>,
        with_challenge: bool,
    },
    SetSession { access_token: String, refresh_token: String },
    ExchangeCode { code: String, code_verifier: String },
    VerifyOtp { email: String, token: String },
    VerifyTokenHash { token_hash: String, otp_type: String },
    SignOut,
}

pub struct FakeProvider {
    calls: Mutex<Vec<ProviderCall>>,
    session_result: Mutex<ProviderResult<Session>>,
    send_result: Mutex<ProviderResult<()>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            session_result: Mutex::new(Ok(test_session("user@example.com"))),
            send_result: Mutex::new(Ok(())),
        }
    }
}

impl FakeProvider {
    /// 세션을 만드는 모든 호출이 주어진 실패를 돌려주도록 합니다.
    pub fn failing_with(failure: ProviderFailure) -> Self {
        let provider = Self::default();
        *provider.session_result.lock().unwrap() = Err(failure);
        provider
    }

    /// 자격 증명 발송이 주어진 실패를 돌려주도록 합니다.
    pub fn rejecting_send(message: &str) -> Self {
        let provider = Self::default();
        *provider.send_result.lock().unwrap() = Err(ProviderFailure::new(FailureKind::Rejected, message));
        provider
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: ProviderCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn session(&self) -> ProviderResult<Session> {
        self.session_result.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthProvider for FakeProvider {
    async fn send_credential(
        &self,
        email: &str,
        redirect_to: Option<&str>,
        challenge: Option<&PkceChallenge>,
    ) -> ProviderResult<()> {
        self.record(ProviderCall::SendCredential {
            email: email.to_string(),
            redirect_to: redirect_to.map(str::to_string),
            with_challenge: challenge.is_some(),
        });
        self.send_result.lock().unwrap().clone()
    }

    async fn set_session(&self, access_token: &str, refresh_token: &str) -> ProviderResult<Session> {
        self.record(ProviderCall::SetSession {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
        });
        self.session().map(|mut session| {
            session.access_token = access_token.to_string();
            session.refresh_token = refresh_token.to_string();
            session
        })
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> ProviderResult<Session> {
        self.record(ProviderCall::ExchangeCode {
            code: code.to_string(),
            code_verifier: code_verifier.to_string(),
        });
        self.session()
    }

    async fn verify_otp(&self, email: &str, token: &str) -> ProviderResult<Session> {
        self.record(ProviderCall::VerifyOtp {
            email: email.to_string(),
            token: token.to_string(),
        });
        self.session()
    }

    async fn verify_token_hash(&self, token_hash: &str, otp_type: &str) -> ProviderResult<Session> {
        self.record(ProviderCall::VerifyTokenHash {
            token_hash: token_hash.to_string(),
            otp_type: otp_type.to_string(),
        });
        self.session()
    }

    async fn sign_out(&self, _access_token: &str) -> ProviderResult<()> {
        self.record(ProviderCall::SignOut);
        Ok(())
    }
}

pub fn test_session(email: &str) -> Session {
    Session {
        access_token: "issued-access".to_string(),
        refresh_token: "issued-refresh".to_string(),
        expires_in: 3600,
        expires_at: None,
        token_type: "bearer".to_string(),
        user: SessionUser {
            id: "user-1".to_string(),
            email: Some(email.to_string()),
        },
    }
}
