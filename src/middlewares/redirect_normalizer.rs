//! 리다이렉트 정규화 미들웨어
//!
//! 콜백 경로가 아닌 곳으로 도착한 `GET`/`HEAD` 요청의 쿼리에 인증 아티팩트
//! (`code` 또는 완전한 토큰 쌍)가 있으면 `303 See Other` 로 콜백 경로에 보냅니다.
//! 프래그먼트는 서버에 오지 않으므로 브라우저 쪽 전달 스크립트가 처리합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::middlewares::RedirectNormalizerMiddleware;
//!
//! App::new()
//!     .wrap(RedirectNormalizerMiddleware)
//!     .configure(configure_all_routes)
//! ```

use std::future::{ready, Ready};

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use crate::middlewares::redirect_normalizer_inner::RedirectNormalizerService;

pub struct RedirectNormalizerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RedirectNormalizerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RedirectNormalizerService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RedirectNormalizerService { service }))
    }
}
