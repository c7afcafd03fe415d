//! 인증 프로바이더 연동 모듈
//!
//! 호스팅 인증 프로바이더(GoTrue)와의 통신, PKCE, 액세스 토큰 검사,
//! 세션 쿠키를 담당합니다.
//!
//! # Modules
//!
//! - [`provider`] - `AuthProvider` trait (리졸버/로그인 서비스가 의존하는 경계)
//! - [`gotrue_client`] - reqwest 기반 GoTrue 구현과 에러 분류
//! - [`client_factory`] - 요청 단위 클라이언트 팩토리
//! - [`pkce`] - verifier / S256 challenge
//! - [`token_inspector`] - 액세스 토큰 클레임 검사 (jsonwebtoken)
//! - [`session_cookies`] - 세션/verifier/이메일 쿠키
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AuthClientFactory;
//!
//! let factory = AuthClientFactory::gotrue(&SupabaseConfig::load()?)?;
//! let client = factory.for_request(&req);
//! client.provider().send_credential("user@example.com", None, None).await?;
//! ```

pub mod client_factory;
pub mod gotrue_client;
pub mod pkce;
pub mod provider;
pub mod session_cookies;
pub mod token_inspector;

#[cfg(test)]
pub mod testing;

pub use client_factory::{AuthClientFactory, ScopedAuthClient};
pub use gotrue_client::GoTrueClient;
pub use pkce::PkceChallenge;
pub use provider::AuthProvider;
pub use session_cookies::SessionCookies;
pub use token_inspector::{AccessClaims, TokenInspector};
