use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const CHATBOT_DESCRIPTION_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ChatbotQuery {
    /// `categories` 或 `products`
    #[serde(rename = "type", default)]
    pub query_type: String,
    #[serde(default)]
    pub query: String,
    pub category_id: Option<String>,
}

/// 已解析的聊天机器人请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatbotRequest {
    Categories,
    Products {
        category_id: Option<i32>,
        query: String,
    },
    Invalid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatbotCategory {
    pub id: i32,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatbotProduct {
    pub id: i32,
    pub name: String,
    /// 单价(元)
    pub price: f64,
    pub description: String,
    pub category: String,
    pub slug: String,
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatbotCategoriesResponse {
    pub categories: Vec<ChatbotCategory>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatbotProductsResponse {
    pub products: Vec<ChatbotProduct>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatbotErrorResponse {
    pub error: String,
}

impl ChatbotQuery {
    pub fn into_request(self) -> crate::AppResult<ChatbotRequest> {
        Ok(match self.query_type.as_str() {
            "categories" => ChatbotRequest::Categories,
            "products" => ChatbotRequest::Products {
                category_id: crate::utils::parse_optional_id(
                    self.category_id.as_deref(),
                    "category_id",
                )?,
                query: self.query.to_lowercase(),
            },
            _ => ChatbotRequest::Invalid,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(t: &str, q: &str, category_id: Option<&str>) -> ChatbotQuery {
        ChatbotQuery {
            query_type: t.to_string(),
            query: q.to_string(),
            category_id: category_id.map(str::to_string),
        }
    }

    #[test]
    fn test_into_request() {
        assert_eq!(
            query("categories", "", None).into_request().unwrap(),
            ChatbotRequest::Categories
        );
        assert_eq!(
            query("products", "Blue", None).into_request().unwrap(),
            ChatbotRequest::Products {
                category_id: None,
                query: "blue".to_string()
            }
        );
        assert_eq!(
            query("products", "", Some("3")).into_request().unwrap(),
            ChatbotRequest::Products {
                category_id: Some(3),
                query: String::new()
            }
        );
        assert_eq!(
            query("", "", None).into_request().unwrap(),
            ChatbotRequest::Invalid
        );
        assert_eq!(
            query("orders", "", None).into_request().unwrap(),
            ChatbotRequest::Invalid
        );
    }

    #[test]
    fn test_bad_category_id() {
        assert!(query("products", "", Some("x")).into_request().is_err());
    }
}
