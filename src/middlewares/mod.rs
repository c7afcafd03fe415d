//! HTTP 미들웨어 모듈
//!
//! # Middlewares
//!
//! - [`RedirectNormalizerMiddleware`] - 인증 아티팩트가 실린 페이지 요청을 콜백 경로로 `303`
//!
//! Transform(설정)과 Service(요청 처리)를 파일로 나누어 둡니다.

pub mod redirect_normalizer;
mod redirect_normalizer_inner;

pub use redirect_normalizer::RedirectNormalizerMiddleware;
