use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::{config::Config, models::Role, utils::AppError};

/// Claims carried by tokens issued by the auth service
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// user id (ObjectId hex)
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub iat: usize,
    pub exp: usize,
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::Unauthorized("Token is expired".to_string()),
        _ => AppError::Unauthorized("Invalid token".to_string()),
    })
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let config = req.app_data::<web::Data<Config>>().ok_or_else(|| {
        AppError::Configuration("Config is not registered as app data".to_string())
    })?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_string()))?;

    verify_token(token, &config.jwt_secret)
}

/// Verifies the bearer token and stores its `Claims` in the request extensions
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(e) => {
                log::warn!("🔐 {} {} rejected: {}", req.method(), req.path(), e);
                let response = e.error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// Lets the request through only when the authenticated role is in `allowed`.
/// Must run inside `AuthMiddleware`.
pub struct RequireRole {
    allowed: &'static [Role],
}

impl RequireRole {
    pub const fn new(allowed: &'static [Role]) -> Self {
        Self { allowed }
    }

    pub const fn patient() -> Self {
        Self::new(&[Role::Patient])
    }

    pub const fn admin() -> Self {
        Self::new(&[Role::Admin])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleService {
            service,
            allowed: self.allowed,
        }))
    }
}

pub struct RequireRoleService<S> {
    service: S,
    allowed: &'static [Role],
}

impl<S, B> Service<ServiceRequest> for RequireRoleService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let role = req.extensions().get::<Claims>().map(|claims| claims.role);

        match role {
            Some(role) if self.allowed.contains(&role) => {
                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            _ => {
                log::warn!("⛔ {} {} denied for role {:?}", req.method(), req.path(), role);
                let response =
                    AppError::Unauthorized("You're not authorized".to_string()).error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// Signs a token the way the auth service does; tests only
#[cfg(test)]
pub fn sign_token(id: &str, role: Role, secret: &str, ttl_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        id: id.to_string(),
        role,
        iat: now as usize,
        exp: (now + ttl_secs) as usize,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}
