// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::Error;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use std::future::{Ready, ready};
use std::pin::Pin;
use std::rc::Rc; // services are per-thread

use super::jwt::{Claims, JwtService};

/// Trait to add authentication methods to HttpRequest
pub trait AuthRequest {
    fn jwt_claims(&self) -> Option<Claims>;
    fn subject_id(&self) -> Option<i64>;

    fn is_authenticated(&self) -> bool;
}

impl AuthRequest for HttpRequest {
    fn jwt_claims(&self) -> Option<Claims> {
        self.extensions().get::<Claims>().cloned()
    }

    fn subject_id(&self) -> Option<i64> {
        self.jwt_claims().map(|claims| claims.sub)
    }

    fn is_authenticated(&self) -> bool {
        self.jwt_claims().is_some()
    }
}

// Bearer token authentication middleware. Routes wrapped by this factory are
// only reached with verified claims in the request extensions; everything
// else is rejected here with a 401 JSON envelope.
pub struct BearerAuthMiddlewareFactory;

impl<S, B> Transform<S, ServiceRequest> for BearerAuthMiddlewareFactory
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let jwt_service_data = req.app_data::<Data<JwtService>>().cloned();
        let service = self.service.clone();

        Box::pin(async move {
            let Some(jwt_service) = jwt_service_data else {
                log::error!("JWT service not registered; rejecting authenticated route");
                return Ok(reject(req, "Authentication service unavailable"));
            };

            let Some(token) = bearer_token(&req) else {
                log::debug!("Missing bearer token for {}", req.path());
                return Ok(reject(req, "Missing bearer token"));
            };

            match jwt_service.verify_token(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::debug!("Bearer token rejected for {}: {}", req.path(), err);
                    Ok(reject(req, "Invalid or expired bearer token"))
                }
            }
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

fn reject<B>(req: ServiceRequest, reason: &str) -> ServiceResponse<EitherBody<B>> {
    let (request, _payload) = req.into_parts();
    let response = HttpResponse::Unauthorized()
        .json(serde_json::json!({ "error": reason }))
        .map_into_right_body();
    ServiceResponse::new(request, response)
}
