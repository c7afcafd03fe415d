//! PKCE (RFC 7636) verifier / challenge 생성
//!
//! verifier 는 로그인 요청 브라우저의 HttpOnly 쿠키에만 보관되고,
//! 프로바이더에는 `S256` challenge 만 전달됩니다.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// challenge 계산 방식 (GoTrue 는 소문자 `s256` 을 받습니다)
pub const CHALLENGE_METHOD: &str = "s256";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceChallenge {
    pub verifier: String,
    pub challenge: String,
}

impl PkceChallenge {
    /// 새 verifier 를 만들고 challenge 를 계산합니다.
    ///
    /// verifier 는 UUID v4 두 개를 이어 붙인 64자의 `[0-9a-f]` 문자열로,
    /// RFC 7636 의 43..=128 자 제약을 만족합니다.
    pub fn generate() -> Self {
        let verifier = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        Self::from_verifier(verifier)
    }

    pub fn from_verifier(verifier: impl Into<String>) -> Self {
        let verifier = verifier.into();
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
        Self { verifier, challenge }
    }

    pub fn method(&self) -> &'static str {
        CHALLENGE_METHOD
    }
}
