use crate::entities::{cart_entity, cart_item_entity, product_entity};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 购物车行: (购物车条目, 当前商品)
pub type CartLine = (cart_item_entity::Model, product_entity::Model);

fn price_overflow() -> AppError {
    AppError::ValidationError("Cart total is too large".to_string())
}

/// 行小计 = 当前单价 * 数量
pub fn line_total(
    item: &cart_item_entity::Model,
    product: &product_entity::Model,
) -> AppResult<i64> {
    product
        .price
        .checked_mul(i64::from(item.quantity))
        .ok_or_else(price_overflow)
}

/// 购物车总价, 始终按商品当前价格计算
pub fn cart_total(lines: &[CartLine]) -> AppResult<i64> {
    lines.iter().try_fold(0i64, |total, (item, product)| {
        total
            .checked_add(line_total(item, product)?)
            .ok_or_else(price_overflow)
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub product_slug: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub total_price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub id: i32,
    pub items: Vec<CartItemResponse>,
    pub item_count: usize,
    pub total_price: i64,
}

impl CartResponse {
    pub fn new(cart: &cart_entity::Model, lines: &[CartLine]) -> AppResult<Self> {
        let items = lines
            .iter()
            .map(|(item, product)| {
                Ok(CartItemResponse {
                    id: item.id,
                    product_id: product.id,
                    product_name: product.name.clone(),
                    product_slug: product.slug.clone(),
                    unit_price: product.price,
                    quantity: item.quantity,
                    total_price: line_total(item, product)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            id: cart.id,
            item_count: items.len(),
            total_price: cart_total(lines)?,
            items,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartForm {
    /// 小于等于 0 时删除该条目
    pub quantity: Option<String>,
}

impl UpdateCartForm {
    pub fn quantity(&self) -> AppResult<i32> {
        match self.quantity.as_deref().map(str::trim) {
            None => Ok(1),
            Some(raw) => raw.parse().map_err(|_| {
                AppError::ValidationError("quantity must be an integer".to_string())
            }),
        }
    }
}

/// 修改数量的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartUpdate {
    Updated(i32),
    Removed,
}
