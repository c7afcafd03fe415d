//! 인증 프로바이더 추상화
//!
//! 콜백 리졸버와 로그인 서비스는 이 trait 에만 의존합니다.
//! 운영에서는 [`GoTrueClient`](super::gotrue_client::GoTrueClient) 가,
//! 테스트에서는 호출을 기록하는 가짜 구현이 사용됩니다.
//!
//! 모든 메서드는 한 번의 프로바이더 호출에 대응하며, 결과는 항상
//! `ProviderResult` 로 분류되어 돌아옵니다.

use async_trait::async_trait;
use crate::domain::models::session::{ProviderResult, Session};
use crate::services::auth::pkce::PkceChallenge;

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// 이메일로 자격 증명(6자리 코드 또는 매직 링크)을 발송합니다.
    ///
    /// * `redirect_to` - 메일 링크가 돌아올 콜백 절대 URL (OTP 흐름에서는 `None`)
    /// * `challenge` - PKCE 흐름일 때 함께 보낼 challenge
    async fn send_credential(
        &self,
        email: &str,
        redirect_to: Option<&str>,
        challenge: Option<&PkceChallenge>,
    ) -> ProviderResult<()>;

    /// 이미 발급된 토큰 쌍으로 세션을 수립합니다.
    async fn set_session(&self, access_token: &str, refresh_token: &str) -> ProviderResult<Session>;

    /// PKCE authorization code 를 세션으로 교환합니다.
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> ProviderResult<Session>;

    /// 사용자가 입력한 6자리 코드를 검증합니다.
    async fn verify_otp(&self, email: &str, token: &str) -> ProviderResult<Session>;

    /// `token_hash` 링크를 검증합니다.
    async fn verify_token_hash(&self, token_hash: &str, otp_type: &str) -> ProviderResult<Session>;

    /// 프로바이더 측 세션을 종료합니다.
    async fn sign_out(&self, access_token: &str) -> ProviderResult<()>;
}
