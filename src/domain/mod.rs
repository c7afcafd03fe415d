//! # Domain Module
//!
//! 비밀번호 없는 이메일 로그인 흐름의 도메인 타입을 담습니다.
//!
//! ```text
//! domain/
//! ├── dto/      ← 폼/쿼리, 프로바이더 REST 본문
//! └── models/   ← 아티팩트, 위치, 세션, 리졸버 상태
//! ```

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
