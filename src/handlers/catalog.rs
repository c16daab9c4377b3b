use crate::models::*;
use crate::services::CatalogService;
use crate::utils::parse_optional_id;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/products/",
    tag = "catalog",
    params(
        ("category" = Option<i32>, Query, description = "分类 id"),
        ("search" = Option<String>, Query, description = "名称或描述关键字, 不区分大小写")
    ),
    responses(
        (status = 200, description = "在售商品列表", body = ProductListResponse),
        (status = 400, description = "分类 id 无效")
    )
)]
pub async fn product_list(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<ProductListQuery>,
) -> Result<HttpResponse> {
    let category_id = parse_optional_id(query.category.as_deref(), "category")?;

    match catalog_service
        .list_products(category_id, query.search.as_deref())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/product/{slug}/",
    tag = "catalog",
    params(
        ("slug" = String, Path, description = "商品 slug")
    ),
    responses(
        (status = 200, description = "商品详情与相关商品", body = ProductDetailResponse),
        (status = 404, description = "商品不存在或已下架")
    )
)]
pub async fn product_detail(
    catalog_service: web::Data<CatalogService>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match catalog_service.product_detail(&path.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/products/", web::get().to(product_list))
        .route("/product/{slug}/", web::get().to(product_detail));
}
