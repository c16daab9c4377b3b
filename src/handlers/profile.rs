use super::{get_user_id_from_request, redirect};
use crate::models::*;
use crate::services::{OrderService, UserService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/profile/",
    tag = "profile",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "用户信息、订单与地址", body = ProfileResponse),
        (status = 401, description = "未登录")
    )
)]
pub async fn profile(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match user_service.get_user_profile(user_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/update-profile/",
    tag = "profile",
    security(
        ("bearer_auth" = [])
    ),
    request_body(content = UpdateProfileForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "已更新, 跳转个人中心")
    )
)]
pub async fn update_profile(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    form: web::Form<UpdateProfileForm>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match user_service
        .update_user_profile(user_id, form.into_inner())
        .await
    {
        Ok(_) => Ok(redirect(
            "/profile/",
            Some(FlashMessage::success("Profile updated successfully.")),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/add-address/",
    tag = "profile",
    security(
        ("bearer_auth" = [])
    ),
    request_body(content = AddressForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "已保存, 跳转个人中心")
    )
)]
pub async fn add_address(
    user_service: web::Data<UserService>,
    req: HttpRequest,
    form: web::Form<AddressForm>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match user_service.add_address(user_id, form.into_inner()).await {
        Ok(_) => Ok(redirect(
            "/profile/",
            Some(FlashMessage::success("Address added successfully.")),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

/// GET 访问表单提交地址时回到个人中心
pub async fn profile_redirect() -> Result<HttpResponse> {
    Ok(redirect("/profile/", None))
}

#[utoipa::path(
    get,
    path = "/order/{order_id}/",
    tag = "profile",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("order_id" = i32, Path, description = "订单 id")
    ),
    responses(
        (status = 200, description = "订单详情", body = OrderDetailResponse),
        (status = 404, description = "订单不存在或不属于当前用户")
    )
)]
pub async fn order_detail(
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match order_service
        .get_user_order(user_id, path.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": order
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn profile_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile/", web::get().to(profile))
        .route("/update-profile/", web::post().to(update_profile))
        .route("/update-profile/", web::get().to(profile_redirect))
        .route("/add-address/", web::post().to(add_address))
        .route("/add-address/", web::get().to(profile_redirect))
        .route("/order/{order_id}/", web::get().to(order_detail));
}
