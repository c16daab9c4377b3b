use super::{get_user_id_from_request, redirect};
use crate::models::*;
use crate::services::{CheckoutService, OrderService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/checkout/",
    tag = "checkout",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "结算页: 购物车摘要", body = CartResponse),
        (status = 303, description = "购物车为空, 跳转购物车"),
        (status = 404, description = "购物车不存在")
    )
)]
pub async fn checkout(
    checkout_service: web::Data<CheckoutService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match checkout_service.checkout_summary(user_id).await {
        Ok(Some(summary)) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": summary
        }))),
        Ok(None) => Ok(redirect(
            "/cart/",
            Some(FlashMessage::warning(
                "Your cart is empty. Add some products before checkout.",
            )),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/process-order/",
    tag = "checkout",
    security(
        ("bearer_auth" = [])
    ),
    request_body(content = CheckoutForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "下单成功跳转订单确认页; 购物车为空跳转购物车"),
        (status = 404, description = "购物车不存在")
    )
)]
pub async fn process_order(
    checkout_service: web::Data<CheckoutService>,
    req: HttpRequest,
    form: web::Form<CheckoutForm>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match checkout_service.place_order(user_id, form.into_inner()).await {
        Ok(CheckoutOutcome::Placed(order)) => Ok(redirect(
            &format!("/order-confirmation/{}/", order.id),
            None,
        )),
        Ok(CheckoutOutcome::EmptyCart) => Ok(redirect(
            "/cart/",
            Some(FlashMessage::error("Your cart is empty.")),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

pub async fn process_order_redirect() -> Result<HttpResponse> {
    Ok(redirect("/checkout/", None))
}

#[utoipa::path(
    get,
    path = "/order-confirmation/{order_id}/",
    tag = "checkout",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("order_id" = i32, Path, description = "订单 id")
    ),
    responses(
        (status = 200, description = "订单确认", body = OrderDetailResponse),
        (status = 404, description = "订单不存在或不属于当前用户")
    )
)]
pub async fn order_confirmation(
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

pub fn checkout_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/checkout/", web::get().to(checkout))
        .route("/process-order/", web::post().to(process_order))
        .route("/process-order/", web::get().to(process_order_redirect))
        .route(
            "/order-confirmation/{order_id}/",
            web::get().to(order_confirmation),
        );
}
