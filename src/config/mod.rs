//! # Configuration Module
//!
//! 서비스 설정 관리를 담당하는 모듈입니다.
//! 환경 변수 기반의 설정값들을 중앙집중식으로 관리합니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, Rate Limiting, CORS, Redis 설정
//! - [`auth_config`] - 인증 프로바이더 접속 정보, 로그인 흐름 설정
//!
//! ## 설계 원칙
//!
//! - 민감한 정보는 환경 변수로만 제공
//! - 기본값은 개발 환경에서만 안전
//! - 필수 설정값 누락 시 서버가 시작되지 않음
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버 설정
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export ENVIRONMENT="production"  # development, test, staging, production
//!
//! # 인증 프로바이더
//! export SUPABASE_URL="https://xyzcompany.supabase.co"
//! export SUPABASE_ANON_KEY="public-anon-key"
//!
//! # 재전송 쿨다운 저장소 (선택, 없으면 프로세스 메모리)
//! export REDIS_URL="redis://localhost:6379"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
