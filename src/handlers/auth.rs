use super::redirect;
use crate::error::AppError;
use crate::middlewares::bearer_token;
use crate::models::*;
use crate::services::AuthService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

// 注册/登录返回 200, 令牌放在响应体中, 跳转目标见 redirect 字段

#[utoipa::path(
    post,
    path = "/signup/",
    tag = "auth",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "注册成功并登录", body = AuthResponse),
        (status = 400, description = "用户名或密码不符合要求")
    )
)]
pub async fn signup(
    auth_service: web::Data<AuthService>,
    form: web::Form<SignupForm>,
) -> Result<HttpResponse> {
    match auth_service.signup(form.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(
            ApiResponse::success_with_message(
                response,
                FlashMessage::success("Account created successfully!"),
            )
            .with_redirect("/"),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/login/",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "登录成功", body = AuthResponse),
        (status = 401, description = "用户名或密码错误")
    )
)]
pub async fn login(
    auth_service: web::Data<AuthService>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse> {
    match auth_service.login(form.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(
            ApiResponse::success_with_message(
                response,
                FlashMessage::success("You have been successfully logged in!"),
            )
            .with_redirect("/profile/"),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/token/refresh/",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "刷新令牌成功", body = AuthResponse),
        (status = 401, description = "无效的刷新令牌")
    )
)]
pub async fn refresh(
    auth_service: web::Data<AuthService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(token) = bearer_token(req.headers()) else {
        return Ok(AppError::AuthError("Missing refresh token".to_string()).error_response());
    };

    match auth_service.refresh_token(&token).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/logout/",
    tag = "auth",
    responses(
        (status = 303, description = "登出, 跳转首页")
    )
)]
pub async fn logout() -> Result<HttpResponse> {
    // 无状态令牌, 由客户端丢弃
    Ok(redirect(
        "/",
        Some(FlashMessage::success("You have been logged out successfully.")),
    ))
}

pub fn auth_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup/", web::post().to(signup))
        .route("/login/", web::post().to(login))
        .route("/logout/", web::get().to(logout))
        .route("/logout/", web::post().to(logout))
        .route("/token/refresh/", web::post().to(refresh));
}
