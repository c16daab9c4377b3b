use crate::error::AppError;
use crate::utils::JwtService;
use actix_web::http::Method;
use actix_web::http::header::HeaderMap;
use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};

/// 已登录用户 id, 由中间件写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub i32);

// 公开路径配置
struct PublicPaths {
    exact_paths: Vec<&'static str>,
    prefix_paths: Vec<&'static str>,
}

impl PublicPaths {
    fn new() -> Self {
        Self {
            // 完全匹配的公开路径
            exact_paths: vec![
                "/",
                "/products/",
                "/signup/",
                "/login/",
                "/logout/",
                "/token/refresh/",
                "/chatbot-api/",
                "/about/",
                "/contact/",
                "/swagger-ui",
                "/api-docs/openapi.json",
            ],
            // 前缀匹配的公开路径
            prefix_paths: vec!["/product/", "/swagger-ui/", "/api-docs/"],
        }
    }

    fn is_public_path(&self, path: &str) -> bool {
        if self.exact_paths.contains(&path) {
            return true;
        }

        self.prefix_paths
            .iter()
            .any(|&prefix| path.starts_with(prefix))
    }
}

pub struct AuthMiddleware {
    jwt_service: JwtService,
}

impl AuthMiddleware {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            jwt_service: self.jwt_service.clone(),
            public_paths: PublicPaths::new(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    jwt_service: JwtService,
    public_paths: PublicPaths,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行所有 CORS 预检请求
        if req.method() == Method::OPTIONS {
            return Box::pin(self.service.call(req));
        }

        let token = bearer_token(req.headers());

        // 公开路径: 带有效令牌时同样写入用户 id, 否则直接放行
        if self.public_paths.is_public_path(req.path()) {
            if let Some(user_id) = token.and_then(|t| self.authenticate(&t).ok()) {
                req.extensions_mut().insert(AuthenticatedUser(user_id));
            }
            return Box::pin(self.service.call(req));
        }

        match token.as_deref().map(|t| self.authenticate(t)) {
            Some(Ok(user_id)) => {
                req.extensions_mut().insert(AuthenticatedUser(user_id));
                Box::pin(self.service.call(req))
            }
            Some(Err(_)) => {
                let error = AppError::AuthError("Invalid access token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
            None => {
                let error = AppError::AuthError("Missing access token".to_string());
                Box::pin(async move { Err(error.into()) })
            }
        }
    }
}

impl<S> AuthMiddlewareService<S> {
    fn authenticate(&self, token: &str) -> Result<i32, AppError> {
        self.jwt_service.verify_access_token(token)?.user_id()
    }
}

/// 提取 `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        let paths = PublicPaths::new();
        assert!(paths.is_public_path("/"));
        assert!(paths.is_public_path("/products/"));
        assert!(paths.is_public_path("/product/aviator-gold/"));
        assert!(paths.is_public_path("/chatbot-api/"));
        assert!(paths.is_public_path("/swagger-ui/index.html"));

        assert!(!paths.is_public_path("/cart/"));
        assert!(!paths.is_public_path("/cart/add/1/"));
        assert!(!paths.is_public_path("/checkout/"));
        assert!(!paths.is_public_path("/process-order/"));
        assert!(!paths.is_public_path("/profile/"));
        assert!(!paths.is_public_path("/order/3/"));
    }

    #[test]
    fn test_bearer_token() {
        use actix_web::http::header::{AUTHORIZATION, HeaderValue};

        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def"));
    }
}
