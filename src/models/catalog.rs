use crate::entities::{category_entity, product_entity, product_image_entity};
use crate::utils::media_path;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 商品图片 URL 解析: 主图 -> 第一张图 -> 占位图
pub fn resolve_image_url(
    images: &[product_image_entity::Model],
    media_url: &str,
    placeholder: &str,
) -> String {
    let primary = images.iter().filter(|i| i.is_primary).min_by_key(|i| i.id);
    let chosen = primary.or_else(|| images.iter().min_by_key(|i| i.id));

    match chosen {
        Some(image) => media_path(media_url, &image.image),
        None => placeholder.to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl From<category_entity::Model> for CategoryResponse {
    fn from(m: category_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            slug: m.slug,
            description: m.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductImageResponse {
    pub id: i32,
    pub url: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// 单价(分)
    pub price: i64,
    pub stock: i32,
    pub is_available: bool,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl ProductResponse {
    pub fn new(m: product_entity::Model, image_url: String) -> Self {
        Self {
            id: m.id,
            category_id: m.category_id,
            name: m.name,
            slug: m.slug,
            description: m.description,
            price: m.price,
            stock: m.stock,
            is_available: m.is_available,
            image_url,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HomeResponse {
    pub categories: Vec<CategoryResponse>,
    pub featured_products: Vec<ProductResponse>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductListQuery {
    /// 分类 id
    pub category: Option<String>,
    /// 名称/描述关键字
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub categories: Vec<CategoryResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub category: Option<CategoryResponse>,
    pub images: Vec<ProductImageResponse>,
    pub related_products: Vec<ProductResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: i32, path: &str, is_primary: bool) -> product_image_entity::Model {
        product_image_entity::Model {
            id,
            product_id: 1,
            image: path.to_string(),
            is_primary,
        }
    }

    const PLACEHOLDER: &str = "/static/images/no-image.jpg";

    #[test]
    fn test_primary_image_preferred() {
        let images = vec![
            image(1, "products/side.jpg", false),
            image(2, "products/front.jpg", true),
        ];
        assert_eq!(
            resolve_image_url(&images, "/media/", PLACEHOLDER),
            "/media/products/front.jpg"
        );
    }

    #[test]
    fn test_first_image_fallback() {
        let images = vec![
            image(5, "products/b.jpg", false),
            image(3, "products/a.jpg", false),
        ];
        assert_eq!(
            resolve_image_url(&images, "/media/", PLACEHOLDER),
            "/media/products/a.jpg"
        );
    }

    #[test]
    fn test_placeholder_fallback() {
        assert_eq!(resolve_image_url(&[], "/media/", PLACEHOLDER), PLACEHOLDER);
    }
}
