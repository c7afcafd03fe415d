//! 멜로디야 인증 서비스
//!
//! 호스팅 인증 프로바이더(Supabase GoTrue) 앞단에서 비밀번호 없는 이메일 로그인을
//! 처리하는 actix-web 서비스입니다.
//!
//! # Features
//!
//! - **로그인 폼**: 이메일로 6자리 코드 또는 로그인 링크 발송 (`otp` / `pkce` / `magic_link`)
//! - **리다이렉트 정규화**: 어느 페이지에 도착한 인증 아티팩트든 콜백 경로로 모음
//! - **콜백 리졸버**: 아티팩트를 정확히 한 번 세션으로 교환하거나 재시도 UI 표시
//! - **재전송 쿨다운**: Redis (또는 메모리) 기반 고정 대기 시간
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │ RedirectNormalizer (MW)  │ ← 아티팩트가 실린 페이지 요청 → 303 /auth/callback
//! └──────────────────────────┘
//!              │
//!              ▼
//! ┌──────────────────────────┐
//! │   Routes / Handlers      │ ← HTML 페이지, 303, JSON
//! └──────────────────────────┘
//!              │
//!              ▼
//! ┌──────────────────────────┐
//! │ LoginService / Resolver  │ ← 발송, 쿨다운, 아티팩트 교환
//! └──────────────────────────┘
//!              │
//!              ▼
//! ┌──────────────────────────┐
//! │ AuthProvider (GoTrue)    │ ← reqwest REST
//! └──────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use melodya_auth::config::{AuthSettings, SupabaseConfig};
//! use melodya_auth::services::login::MemoryCooldownStore;
//! use melodya_auth::state::AppState;
//!
//! let state = AppState::new(&SupabaseConfig::load()?, AuthSettings::from_env(), Arc::new(MemoryCooldownStore::new()))?;
//! ```

pub mod config;
pub mod caching;
pub mod domain;
pub mod errors;
pub mod services;
pub mod utils;
pub mod views;
pub mod state;
pub mod middlewares;
#[macro_use]
pub mod handlers;
pub mod routes;
