use super::{get_user_id_from_request, redirect};
use crate::models::*;
use crate::services::CartService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/cart/",
    tag = "cart",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "购物车内容与总价", body = CartResponse),
        (status = 401, description = "未登录")
    )
)]
pub async fn cart_detail(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match cart_service.get_cart(user_id).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/add/{product_id}/",
    tag = "cart",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("product_id" = i32, Path, description = "商品 id")
    ),
    responses(
        (status = 303, description = "已加入购物车, 跳转购物车"),
        (status = 404, description = "商品不存在")
    )
)]
pub async fn add_to_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match cart_service.add_item(user_id, path.into_inner()).await {
        Ok(product) => Ok(redirect(
            "/cart/",
            Some(FlashMessage::success(format!(
                "{} added to cart!",
                product.name
            ))),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/remove/{item_id}/",
    tag = "cart",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("item_id" = i32, Path, description = "购物车条目 id")
    ),
    responses(
        (status = 303, description = "已移除, 跳转购物车"),
        (status = 404, description = "条目不存在或不属于当前用户")
    )
)]
pub async fn remove_from_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;

    match cart_service.remove_item(user_id, path.into_inner()).await {
        Ok(()) => Ok(redirect(
            "/cart/",
            Some(FlashMessage::success("Item removed from cart!")),
        )),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart/update/{item_id}/",
    tag = "cart",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("item_id" = i32, Path, description = "购物车条目 id")
    ),
    request_body(content = UpdateCartForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "已更新, 跳转购物车"),
        (status = 400, description = "数量不是整数"),
        (status = 404, description = "条目不存在或不属于当前用户")
    )
)]
pub async fn update_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    path: web::Path<i32>,
    form: web::Form<UpdateCartForm>,
) -> Result<HttpResponse> {
    let user_id = get_user_id_from_request(&req)?;
    let quantity = form.quantity()?;

    match cart_service
        .update_item(user_id, path.into_inner(), quantity)
        .await
    {
        Ok(_) => Ok(redirect("/cart/", None)),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("/", web::get().to(cart_detail))
            .route("/add/{product_id}/", web::get().to(add_to_cart))
            .route("/add/{product_id}/", web::post().to(add_to_cart))
            .route("/remove/{item_id}/", web::get().to(remove_from_cart))
            .route("/remove/{item_id}/", web::post().to(remove_from_cart))
            .route("/update/{item_id}/", web::post().to(update_cart)),
    );
}
