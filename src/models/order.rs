use crate::entities::{order_entity, order_item_entity, product_entity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 结算表单, 字段不做格式校验, 缺省为空串
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    /// 勾选时保存为常用地址
    pub save_address: Option<String>,
}

impl CheckoutForm {
    pub fn wants_saved_address(&self) -> bool {
        self.save_address.as_deref().is_some_and(|v| !v.is_empty())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// 下单结果
#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    EmptyCart,
    Placed(order_entity::Model),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShippingResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderSummaryResponse {
    pub id: i32,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

impl From<order_entity::Model> for OrderSummaryResponse {
    fn from(m: order_entity::Model) -> Self {
        Self {
            id: m.id,
            total_price: m.total_price,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    /// 下单时单价(分)
    pub price: i64,
    pub total_price: i64,
}

impl OrderItemResponse {
    pub fn new(item: order_item_entity::Model, product: Option<product_entity::Model>) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            product_name: product.map(|p| p.name).unwrap_or_default(),
            quantity: item.quantity,
            price: item.price,
            total_price: item.total_price(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    pub id: i32,
    pub shipping: ShippingResponse,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
}

impl OrderDetailResponse {
    pub fn new(order: order_entity::Model, items: Vec<OrderItemResponse>) -> Self {
        Self {
            id: order.id,
            shipping: ShippingResponse {
                first_name: order.first_name,
                last_name: order.last_name,
                email: order.email,
                phone: order.phone,
                address: order.shipping_address,
                city: order.shipping_city,
                state: order.shipping_state,
                zip_code: order.shipping_zip,
                country: order.shipping_country,
            },
            total_price: order.total_price,
            created_at: order.created_at,
            items,
        }
    }
}
