use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::{header, Method};
use actix_web::{Error, HttpResponse};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::location::Location;
use crate::services::callback::normalizer::RedirectNormalizer;

pub struct RedirectNormalizerService<S> {
    pub service: S,
}

impl<S, B> Service<ServiceRequest> for RedirectNormalizerService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if let Some(target) = redirect_target(&req) {
            log::debug!("인증 아티팩트를 콜백 경로로 이동: {}", req.path());

            let response = HttpResponse::SeeOther()
                .insert_header((header::LOCATION, target))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish();
            let (req, _) = req.into_parts();
            let res = ServiceResponse::new(req, response).map_into_right_body();
            return Box::pin(async move { Ok(res) });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 페이지 요청이면 정규화 대상 경로를 계산합니다.
fn redirect_target(req: &ServiceRequest) -> Option<String> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return None;
    }

    let location = Location::from_parts(req.path(), req.query_string());
    RedirectNormalizer::normalize(&location)
}
