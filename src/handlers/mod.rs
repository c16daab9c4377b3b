pub mod auth;
pub mod cart;
pub mod catalog;
pub mod chatbot;
pub mod checkout;
pub mod pages;
pub mod profile;

pub use auth::auth_config;
pub use cart::cart_config;
pub use catalog::catalog_config;
pub use chatbot::chatbot_config;
pub use checkout::checkout_config;
pub use pages::pages_config;
pub use profile::profile_config;

use crate::error::{AppError, AppResult};
use crate::middlewares::AuthenticatedUser;
use crate::models::{ApiResponse, FlashMessage};
use actix_web::http::header;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, web};

/// 注册全部店面路由
pub fn storefront_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(pages_config)
        .configure(catalog_config)
        .configure(auth_config)
        .configure(cart_config)
        .configure(checkout_config)
        .configure(profile_config)
        .configure(chatbot_config);
}

fn get_user_id_from_request(req: &HttpRequest) -> AppResult<i32> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .map(|u| u.0)
        .ok_or_else(|| AppError::AuthError("Login required".to_string()))
}

/// 303 跳转, 同时在 body 中携带提示消息
fn redirect(location: &str, message: Option<FlashMessage>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .json(ApiResponse::redirect(location, message))
}
