//! # 액세스 토큰 검사
//!
//! 프로바이더가 발급한 액세스 토큰(JWT)의 클레임을 로컬에서 읽습니다.
//!
//! - `SUPABASE_JWT_SECRET` 이 설정되어 있으면 HS256 서명과 `aud = authenticated` 를 검증합니다.
//! - 설정되어 있지 않으면 서명 검증 없이 클레임만 읽습니다. 이 경우 토큰의 진위는
//!   이후의 `GET /user` 호출(프로바이더)이 판정합니다.
//!
//! 만료(`exp`)는 jsonwebtoken 에 맡기지 않고 직접 비교합니다.
//! 만료된 토큰은 에러가 아니라 "리프레시가 필요한 토큰" 이기 때문입니다.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use crate::domain::models::session::{ProviderFailure, ProviderResult};

const AUDIENCE: &str = "authenticated";

/// 세션 판단에 필요한 액세스 토큰 클레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// 사용자 ID
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    /// 만료 시각 (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

#[derive(Clone)]
pub struct TokenInspector {
    secret: Option<String>,
}

impl TokenInspector {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// 액세스 토큰의 클레임을 읽습니다.
    ///
    /// # Errors
    ///
    /// 형식이 잘못되었거나 서명/audience 검증에 실패하면 `InvalidOrExpired`.
    pub fn inspect(&self, access_token: &str) -> ProviderResult<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let key = match &self.secret {
            Some(secret) => {
                validation.set_audience(&[AUDIENCE]);
                DecodingKey::from_secret(secret.as_bytes())
            }
            None => {
                validation.insecure_disable_signature_validation();
                validation.validate_aud = false;
                DecodingKey::from_secret(&[])
            }
        };

        decode::<AccessClaims>(access_token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAudience => {
                        log::warn!("액세스 토큰 검증 실패: {}", e);
                    }
                    _ => log::debug!("액세스 토큰 해석 실패: {}", e),
                }
                ProviderFailure::invalid_or_expired(None)
            })
    }
}
