mod common;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use common::*;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use storefront_backend::handlers;
use storefront_backend::middlewares::AuthMiddleware;
use storefront_backend::services::*;
use storefront_backend::utils::JwtService;

const SECRET: &str = "test-secret";

fn jwt() -> JwtService {
    JwtService::new(SECRET, 3600, 7200)
}

fn bearer(user_id: i32, username: &str) -> (header::HeaderName, String) {
    let token = jwt().generate_access_token(user_id, username).unwrap();
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

macro_rules! storefront_app {
    ($db:expr) => {{
        let db: DatabaseConnection = $db.clone();
        let order_service = OrderService::new(db.clone());
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(jwt()))
                .app_data(web::Data::new(AuthService::new(db.clone(), jwt())))
                .app_data(web::Data::new(CatalogService::new(db.clone(), storefront())))
                .app_data(web::Data::new(CartService::new(db.clone())))
                .app_data(web::Data::new(CheckoutService::new(db.clone())))
                .app_data(web::Data::new(order_service.clone()))
                .app_data(web::Data::new(UserService::new(db.clone(), order_service)))
                .configure(handlers::storefront_config),
        )
        .await
    }};
}

fn location(resp: &actix_web::dev::ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_chatbot_api() {
    let db = setup_db().await;
    let readers = create_category(&db, "Readers", "readers").await;
    NewProduct::new(readers.id, "Blue Reader", "blue-reader", 2_500)
        .insert(&db)
        .await;
    NewProduct::new(readers.id, "Round", "round", 2_000)
        .insert(&db)
        .await;
    let app = storefront_app!(db);

    let req = test::TestRequest::get()
        .uri("/chatbot-api/?type=categories")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["categories"][0]["name"], "Readers");

    let req = test::TestRequest::get()
        .uri("/chatbot-api/?type=products&query=BLUE")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["slug"], "blue-reader");
    assert_eq!(products[0]["price"], 25.0);
    assert_eq!(products[0]["image_url"], "/static/images/no-image.jpg");

    let req = test::TestRequest::get()
        .uri("/chatbot-api/?type=everything")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid query type");

    let req = test::TestRequest::get()
        .uri("/chatbot-api/?type=products&category_id=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let db = setup_db().await;
    let app = storefront_app!(db);

    let req = test::TestRequest::get().uri("/cart/").to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/profile/")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let err = test::try_call_service(&app, req).await.unwrap_err();
    assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get().uri("/products/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_signup_login_and_refresh() {
    let db = setup_db().await;
    let app = storefront_app!(db);

    let req = test::TestRequest::post()
        .uri("/signup/")
        .set_form([
            ("username", "new.user"),
            ("password1", "frames-and-lenses"),
            ("password2", "frames-and-lenses"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"]["text"], "Account created successfully!");
    assert_eq!(body["redirect"], "/");
    assert_eq!(body["data"]["user"]["username"], "new.user");

    let req = test::TestRequest::post()
        .uri("/signup/")
        .set_form([
            ("username", "new.user"),
            ("password1", "frames-and-lenses"),
            ("password2", "frames-and-lenses"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_form([("username", "new.user"), ("password", "wrong-password")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Invalid username or password.");

    let req = test::TestRequest::post()
        .uri("/login/")
        .set_form([("username", "new.user"), ("password", "frames-and-lenses")])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["redirect"], "/profile/");
    let refresh_token = body["data"]["refresh_token"].as_str().unwrap().to_string();
    let access_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/token/refresh/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {refresh_token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert!(body["data"]["access_token"].is_string());

    // access token 不能用于刷新
    let req = test::TestRequest::post()
        .uri("/token/refresh/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {access_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/profile/")
        .insert_header((header::AUTHORIZATION, format!("Bearer {access_token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user"]["username"], "new.user");
}

#[actix_web::test]
async fn test_cart_flow_redirects_with_messages() {
    let db = setup_db().await;
    let alice = create_user(&db, "alice").await;
    let bob = create_user(&db, "bob").await;
    let category = create_category(&db, "Sunglasses", "sunglasses").await;
    let product = NewProduct::new(category.id, "Aviator", "aviator", 12_000)
        .insert(&db)
        .await;
    let app = storefront_app!(db);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}/", product.id))
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart/");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"]["level"], "success");
    assert_eq!(body["message"]["text"], "Aviator added to cart!");

    let req = test::TestRequest::get()
        .uri("/cart/")
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let item_id = body["data"]["items"][0]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["total_price"], 12_000);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/update/{item_id}/"))
        .insert_header(bearer(alice.id, "alice"))
        .set_form([("quantity", "two")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/update/{item_id}/"))
        .insert_header(bearer(alice.id, "alice"))
        .set_form([("quantity", "3")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    // 他人的购物车条目
    let req = test::TestRequest::post()
        .uri(&format!("/cart/remove/{item_id}/"))
        .insert_header(bearer(bob.id, "bob"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/checkout/")
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_price"], 36_000);

    let req = test::TestRequest::get()
        .uri(&format!("/cart/remove/{item_id}/"))
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"]["text"], "Item removed from cart!");
}

#[actix_web::test]
async fn test_checkout_empty_cart_redirects_to_cart() {
    let db = setup_db().await;
    let alice = create_user(&db, "alice").await;
    CartService::new(db.clone()).get_cart(alice.id).await.unwrap();
    let app = storefront_app!(db);

    let req = test::TestRequest::get()
        .uri("/checkout/")
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart/");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"]["level"], "warning");

    let req = test::TestRequest::post()
        .uri("/process-order/")
        .insert_header(bearer(alice.id, "alice"))
        .set_form([("first_name", "Alice")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart/");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"]["text"], "Your cart is empty.");
}

#[actix_web::test]
async fn test_process_order_and_view_confirmation() {
    let db = setup_db().await;
    let alice = create_user(&db, "alice").await;
    let bob = create_user(&db, "bob").await;
    let category = create_category(&db, "Readers", "readers").await;
    let product = NewProduct::new(category.id, "Round", "round", 2_000)
        .insert(&db)
        .await;
    CartService::new(db.clone())
        .add_item(alice.id, product.id)
        .await
        .unwrap();
    let app = storefront_app!(db);

    let req = test::TestRequest::post()
        .uri("/process-order/")
        .insert_header(bearer(alice.id, "alice"))
        .set_form([
            ("first_name", "Alice"),
            ("last_name", "Liddell"),
            ("address", "1 Rabbit Hole"),
            ("city", "Oxford"),
            ("save_address", "on"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let confirmation = location(&resp).to_string();
    assert!(confirmation.starts_with("/order-confirmation/"));

    let req = test::TestRequest::get()
        .uri(&confirmation)
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_price"], 2_000);
    assert_eq!(body["data"]["shipping"]["city"], "Oxford");
    assert_eq!(body["data"]["items"][0]["product_name"], "Round");

    let order_id = body["data"]["id"].as_i64().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/order/{order_id}/"))
        .insert_header(bearer(bob.id, "bob"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/profile/")
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["orders"][0]["id"], order_id);
    assert_eq!(body["data"]["addresses"][0]["name"], "Alice Liddell");
}

#[actix_web::test]
async fn test_profile_forms() {
    let db = setup_db().await;
    let alice = create_user(&db, "alice").await;
    let app = storefront_app!(db);

    let req = test::TestRequest::post()
        .uri("/update-profile/")
        .insert_header(bearer(alice.id, "alice"))
        .set_form([
            ("first_name", "Alice"),
            ("last_name", "Liddell"),
            ("phone", "555-0199"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile/");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"]["text"], "Profile updated successfully.");

    let req = test::TestRequest::post()
        .uri("/add-address/")
        .insert_header(bearer(alice.id, "alice"))
        .set_form([
            ("name", "Home"),
            ("address", "1 Rabbit Hole"),
            ("city", "Oxford"),
            ("country", "UK"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"]["text"], "Address added successfully.");

    let req = test::TestRequest::get()
        .uri("/update-profile/")
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/profile/");

    let req = test::TestRequest::get()
        .uri("/profile/")
        .insert_header(bearer(alice.id, "alice"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["user"]["first_name"], "Alice");
    assert_eq!(body["data"]["user"]["phone"], "555-0199");
    assert_eq!(body["data"]["addresses"][0]["name"], "Home");
    assert_eq!(body["data"]["addresses"][0]["state"], "");
}

#[actix_web::test]
async fn test_static_pages() {
    let db = setup_db().await;
    let app = storefront_app!(db);

    let req = test::TestRequest::get().uri("/about/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["name"], "Glasses Store");

    let req = test::TestRequest::post()
        .uri("/contact/")
        .set_form([
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("message", "Do you ship abroad?"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/contact/");

    let req = test::TestRequest::get().uri("/logout/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
}
