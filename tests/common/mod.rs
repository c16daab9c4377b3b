#![allow(dead_code)]

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use storefront_backend::config::{DatabaseConfig, StorefrontConfig};
use storefront_backend::database::{create_pool, run_migrations};
use storefront_backend::entities::{
    category_entity, product_entity, product_image_entity, user_entity,
};
use storefront_backend::utils::hash_password;

pub const PASSWORD: &str = "sunglasses42";

/// 每个测试独立的内存数据库
pub async fn setup_db() -> DatabaseConnection {
    let pool = create_pool(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
    })
    .await
    .unwrap();
    run_migrations(&pool).await.unwrap();
    pool
}

pub fn storefront() -> StorefrontConfig {
    StorefrontConfig::default()
}

pub async fn create_user(db: &DatabaseConnection, username: &str) -> user_entity::Model {
    user_entity::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash_password(PASSWORD).unwrap()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        email: Set(String::new()),
        phone: Set(String::new()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> category_entity::Model {
    category_entity::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(slug.to_string()),
        description: Set(format!("{name} frames")),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub struct NewProduct<'a> {
    pub category_id: i32,
    pub name: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
    pub price: i64,
    pub stock: i32,
    pub is_available: bool,
}

impl<'a> NewProduct<'a> {
    pub fn new(category_id: i32, name: &'a str, slug: &'a str, price: i64) -> Self {
        Self {
            category_id,
            name,
            slug,
            description: "",
            price,
            stock: 10,
            is_available: true,
        }
    }

    pub fn description(mut self, description: &'a str) -> Self {
        self.description = description;
        self
    }

    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    pub async fn insert(self, db: &DatabaseConnection) -> product_entity::Model {
        let now = Utc::now();
        product_entity::ActiveModel {
            category_id: Set(self.category_id),
            name: Set(self.name.to_string()),
            slug: Set(self.slug.to_string()),
            description: Set(self.description.to_string()),
            price: Set(self.price),
            stock: Set(self.stock),
            is_available: Set(self.is_available),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap()
    }
}

pub async fn add_image(
    db: &DatabaseConnection,
    product_id: i32,
    image: &str,
    is_primary: bool,
) -> product_image_entity::Model {
    product_image_entity::ActiveModel {
        product_id: Set(product_id),
        image: Set(image.to_string()),
        is_primary: Set(is_primary),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
