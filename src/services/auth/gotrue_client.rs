//! # GoTrue (Supabase Auth) REST 클라이언트
//!
//! [`AuthProvider`] 의 운영 구현입니다. 모든 응답은 [`classify`] 를 거쳐
//! `ProviderResult` 로 변환되므로, 호출하는 쪽은 HTTP 상태나 에러 본문 형태를 알 필요가 없습니다.
//!
//! ## 사용하는 엔드포인트
//!
//! | 용도 | 엔드포인트 | 메서드 |
//! |------|------------|--------|
//! | 자격 증명 발송 | `/otp[?redirect_to=]` | POST |
//! | PKCE 코드 교환 | `/token?grant_type=pkce` | POST |
//! | 토큰 갱신 | `/token?grant_type=refresh_token` | POST |
//! | 코드/해시 검증 | `/verify` | POST |
//! | 사용자 조회 | `/user` | GET |
//! | 로그아웃 | `/logout` | POST |
//!
//! 모든 요청에는 `apikey` 헤더와 anon key bearer 가 붙습니다
//! (`/user`, `/logout` 은 사용자 액세스 토큰 bearer).

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use crate::config::SupabaseSettings;
use crate::domain::dto::gotrue::{
    GoTrueErrorBody, OtpRequest, PkceGrantRequest, RefreshGrantRequest, UserResponse, VerifyRequest,
};
use crate::domain::models::session::{FailureKind, ProviderFailure, ProviderResult, Session};
use crate::services::auth::pkce::PkceChallenge;
use crate::services::auth::provider::AuthProvider;
use crate::services::auth::token_inspector::TokenInspector;

/// 에러 분류에 쓰이는 프로바이더 호출 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SendCredential,
    SetSession,
    ExchangeCode,
    Verify,
    SignOut,
}

/// verifier 불일치를 나타내는 GoTrue 에러 코드
const VERIFIER_ERROR_CODES: [&str; 2] = ["bad_code_verifier", "flow_state_not_found"];

/// 요청 빈도 제한을 나타내는 GoTrue 에러 코드
const RATE_LIMIT_ERROR_CODES: [&str; 2] = ["over_email_send_rate_limit", "over_request_rate_limit"];

#[derive(Clone)]
pub struct GoTrueClient {
    http: reqwest::Client,
    auth_url: String,
    anon_key: String,
    inspector: TokenInspector,
}

impl GoTrueClient {
    /// 공유 HTTP 클라이언트와 접속 정보로 생성합니다.
    pub fn new(http: reqwest::Client, settings: &SupabaseSettings) -> Self {
        Self {
            http,
            auth_url: settings.auth_url.trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.clone(),
            inspector: TokenInspector::new(settings.jwt_secret.clone()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.auth_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// 요청을 보내고 성공 본문을 역직렬화합니다.
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, op: Operation) -> ProviderResult<T> {
        let response = builder.send().await.map_err(ProviderFailure::transport)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify(status.as_u16(), &body, op));
        }

        response.json::<T>().await.map_err(|e| {
            log::error!("{:?} 응답 파싱 실패: {}", op, e);
            ProviderFailure::transport(e)
        })
    }

    /// 본문이 필요 없는 요청 (`/otp`, `/logout`)
    async fn send_empty(&self, builder: RequestBuilder, op: Operation) -> ProviderResult<()> {
        let response = builder.send().await.map_err(ProviderFailure::transport)?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify(status.as_u16(), &body, op))
    }

    async fn fetch_user(&self, access_token: &str) -> ProviderResult<UserResponse> {
        let builder = self
            .http
            .get(self.endpoint("/user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token);

        self.send_json(builder, Operation::SetSession).await
    }

    async fn refresh(&self, refresh_token: &str) -> ProviderResult<Session> {
        let builder = self
            .request(Method::POST, "/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshGrantRequest { refresh_token });

        self.send_json(builder, Operation::SetSession).await
    }
}

#[async_trait]
impl AuthProvider for GoTrueClient {
    async fn send_credential(
        &self,
        email: &str,
        redirect_to: Option<&str>,
        challenge: Option<&PkceChallenge>,
    ) -> ProviderResult<()> {
        let mut builder = self.request(Method::POST, "/otp");
        if let Some(redirect_to) = redirect_to {
            builder = builder.query(&[("redirect_to", redirect_to)]);
        }

        let body = OtpRequest {
            email,
            create_user: true,
            code_challenge: challenge.map(|c| c.challenge.as_str()),
            code_challenge_method: challenge.map(|c| c.method()),
        };

        self.send_empty(builder.json(&body), Operation::SendCredential).await
    }

    async fn set_session(&self, access_token: &str, refresh_token: &str) -> ProviderResult<Session> {
        let claims = self.inspector.inspect(access_token)?;

        if claims.is_expired() {
            log::debug!("만료된 액세스 토큰, refresh 토큰으로 갱신합니다");
            return self.refresh(refresh_token).await;
        }

        let user = self.fetch_user(access_token).await?;

        Ok(Session {
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            expires_in: (claims.exp - Utc::now().timestamp()).max(0),
            expires_at: Some(claims.exp),
            token_type: "bearer".to_string(),
            user,
        })
    }

    async fn exchange_code(&self, code: &str, code_verifier: &str) -> ProviderResult<Session> {
        let builder = self
            .request(Method::POST, "/token")
            .query(&[("grant_type", "pkce")])
            .json(&PkceGrantRequest {
                auth_code: code,
                code_verifier,
            });

        self.send_json(builder, Operation::ExchangeCode).await
    }

    async fn verify_otp(&self, email: &str, token: &str) -> ProviderResult<Session> {
        let builder = self.request(Method::POST, "/verify").json(&VerifyRequest::Email {
            otp_type: "email",
            email,
            token,
        });

        self.send_json(builder, Operation::Verify).await
    }

    async fn verify_token_hash(&self, token_hash: &str, otp_type: &str) -> ProviderResult<Session> {
        let builder = self
            .request(Method::POST, "/verify")
            .json(&VerifyRequest::TokenHash { otp_type, token_hash });

        self.send_json(builder, Operation::Verify).await
    }

    async fn sign_out(&self, access_token: &str) -> ProviderResult<()> {
        let builder = self
            .http
            .post(self.endpoint("/logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token);

        self.send_empty(builder, Operation::SignOut).await
    }
}

/// 실패 응답을 `ProviderFailure` 로 분류합니다.
///
/// 우선순위: 빈도 제한 → verifier 불일치 → 만료/무효 → 그 밖의 거부.
/// 거부 메시지는 프로바이더가 보낸 문장을 그대로 사용합니다.
pub fn classify(status: u16, body: &str, op: Operation) -> ProviderFailure {
    let parsed: GoTrueErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = parsed.code().unwrap_or_default();
    let message = parsed
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("The sign-in service rejected the request (HTTP {}).", status));

    log::debug!("프로바이더 거부: op={:?}, status={}, code={}", op, status, code);

    if status == 429 || RATE_LIMIT_ERROR_CODES.contains(&code) {
        return ProviderFailure::new(FailureKind::RateLimited, message);
    }

    if op == Operation::ExchangeCode
        && (VERIFIER_ERROR_CODES.contains(&code) || mentions_code_verifier(&message))
    {
        return ProviderFailure::verifier_mismatch();
    }

    if code == "otp_expired" {
        return ProviderFailure::invalid_or_expired(None);
    }

    let client_error = (400..500).contains(&status);
    match op {
        Operation::Verify if client_error => ProviderFailure::invalid_or_expired(None),
        Operation::SetSession if status == 401 || status == 403 => ProviderFailure::invalid_or_expired(None),
        _ => ProviderFailure::new(FailureKind::Rejected, message),
    }
}

fn mentions_code_verifier(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("code verifier") || lower.contains("code_verifier")
}
