use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        // 店面前端与聊天机器人部署在不同域名下
        .allowed_origin_fn(|_, _req_head| true)
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .supports_credentials()
        .max_age(3600)
}
