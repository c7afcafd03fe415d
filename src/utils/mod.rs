//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 검증, 정리, HTML 이스케이프

pub mod string_utils;
