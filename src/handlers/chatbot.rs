use crate::models::*;
use crate::services::CatalogService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/chatbot-api/",
    tag = "chatbot",
    params(
        ("type" = Option<String>, Query, description = "categories | products"),
        ("query" = Option<String>, Query, description = "商品名称/描述/分类名称关键字"),
        ("category_id" = Option<i32>, Query, description = "按分类过滤, 优先于 query")
    ),
    responses(
        (status = 200, description = "分类列表", body = ChatbotCategoriesResponse),
        (status = 200, description = "商品列表", body = ChatbotProductsResponse),
        (status = 200, description = "未知 type", body = ChatbotErrorResponse)
    )
)]
pub async fn chatbot_api(
    catalog_service: web::Data<CatalogService>,
    query: web::Query<ChatbotQuery>,
) -> Result<HttpResponse> {
    let request = match query.into_inner().into_request() {
        Ok(request) => request,
        Err(e) => return Ok(e.error_response()),
    };

    let result = match request {
        ChatbotRequest::Categories => catalog_service
            .chatbot_categories()
            .await
            .map(|r| HttpResponse::Ok().json(r)),
        ChatbotRequest::Products { category_id, query } => catalog_service
            .chatbot_products(category_id, &query)
            .await
            .map(|r| HttpResponse::Ok().json(r)),
        ChatbotRequest::Invalid => Ok(HttpResponse::Ok().json(ChatbotErrorResponse {
            error: "Invalid query type".to_string(),
        })),
    };

    match result {
        Ok(response) => Ok(response),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn chatbot_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/chatbot-api/", web::get().to(chatbot_api));
}
