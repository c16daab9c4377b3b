use super::redirect;
use crate::models::*;
use crate::services::CatalogService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/",
    tag = "catalog",
    responses(
        (status = 200, description = "首页: 分类与推荐商品", body = HomeResponse)
    )
)]
pub async fn home(catalog_service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match catalog_service.home().await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/about/",
    tag = "pages",
    responses(
        (status = 200, description = "店铺信息", body = StoreInfoResponse)
    )
)]
pub async fn about(catalog_service: web::Data<CatalogService>) -> Result<HttpResponse> {
    let info = StoreInfoResponse::from(catalog_service.storefront());
    Ok(HttpResponse::Ok().json(ApiResponse::success(info)))
}

#[utoipa::path(
    get,
    path = "/contact/",
    tag = "pages",
    responses(
        (status = 200, description = "联系方式", body = StoreInfoResponse)
    )
)]
pub async fn contact(catalog_service: web::Data<CatalogService>) -> Result<HttpResponse> {
    let info = StoreInfoResponse::from(catalog_service.storefront());
    Ok(HttpResponse::Ok().json(ApiResponse::success(info)))
}

#[utoipa::path(
    post,
    path = "/contact/",
    tag = "pages",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "留言已收到, 跳转回联系页")
    )
)]
pub async fn submit_contact(form: web::Form<ContactForm>) -> Result<HttpResponse> {
    let form = form.into_inner();
    // 不发送邮件, 仅记录
    log::info!(
        "Contact message from {} <{}>: {}",
        form.name,
        form.email,
        form.message
    );
    Ok(redirect(
        "/contact/",
        Some(FlashMessage::success(
            "Thank you for your message! We will get back to you soon.",
        )),
    ))
}

pub fn pages_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home))
        .route("/about/", web::get().to(about))
        .route("/contact/", web::get().to(contact))
        .route("/contact/", web::post().to(submit_contact));
}
