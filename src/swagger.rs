use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::pages::home,
        handlers::pages::about,
        handlers::pages::contact,
        handlers::pages::submit_contact,
        handlers::catalog::product_list,
        handlers::catalog::product_detail,
        handlers::chatbot::chatbot_api,
        handlers::auth::signup,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::auth::logout,
        handlers::cart::cart_detail,
        handlers::cart::add_to_cart,
        handlers::cart::remove_from_cart,
        handlers::cart::update_cart,
        handlers::checkout::checkout,
        handlers::checkout::process_order,
        handlers::checkout::order_confirmation,
        handlers::profile::profile,
        handlers::profile::update_profile,
        handlers::profile::add_address,
        handlers::profile::order_detail,
    ),
    components(
        schemas(
            MessageLevel,
            FlashMessage,
            ApiError,
            CategoryResponse,
            ProductImageResponse,
            ProductResponse,
            HomeResponse,
            ProductListResponse,
            ProductDetailResponse,
            ChatbotCategory,
            ChatbotProduct,
            ChatbotCategoriesResponse,
            ChatbotProductsResponse,
            ChatbotErrorResponse,
            CartItemResponse,
            CartResponse,
            UpdateCartForm,
            CheckoutForm,
            ShippingResponse,
            OrderSummaryResponse,
            OrderItemResponse,
            OrderDetailResponse,
            AddressForm,
            AddressResponse,
            SignupForm,
            LoginForm,
            UpdateProfileForm,
            UserResponse,
            AuthResponse,
            ProfileResponse,
            StoreInfoResponse,
            ContactForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "catalog", description = "Categories and products"),
        (name = "chatbot", description = "Chatbot JSON API"),
        (name = "auth", description = "Signup, login and tokens"),
        (name = "cart", description = "Shopping cart"),
        (name = "checkout", description = "Checkout and order confirmation"),
        (name = "profile", description = "Profile, addresses and order history"),
        (name = "pages", description = "About and contact pages"),
    ),
    info(
        title = "Glasses Storefront API",
        version = "1.0.0",
        description = "Storefront REST API documentation"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
