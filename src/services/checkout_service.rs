use crate::entities::{
    address_entity as addresses, cart_item_entity as cart_items, order_entity as orders,
    order_item_entity as order_items, product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::cart_service::{find_cart, load_cart_lines};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

#[derive(Clone)]
pub struct CheckoutService {
    pool: DatabaseConnection,
}

impl CheckoutService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 结算页数据; 购物车为空时返回 None
    pub async fn checkout_summary(&self, user_id: i32) -> AppResult<Option<CartResponse>> {
        let cart = find_cart(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        let lines = load_cart_lines(&self.pool, cart.id).await?;
        if lines.is_empty() {
            return Ok(None);
        }

        Ok(Some(CartResponse::new(&cart, &lines)?))
    }

    /// 下单
    ///
    /// 流程:
    /// 1. 购物车为空则不做任何修改
    /// 2. 按购物车当前总价创建订单
    /// 3. 逐条写入订单明细 (单价取商品当前价格), 并扣减库存 (不检查下限, 可为负)
    /// 4. 清空购物车
    /// 5. 需要时保存收货地址
    ///
    /// 以上步骤在同一事务内完成, 任一步失败整体回滚
    pub async fn place_order(
        &self,
        user_id: i32,
        form: CheckoutForm,
    ) -> AppResult<CheckoutOutcome> {
        let txn = self.pool.begin().await?;

        let cart = find_cart(&txn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart not found".to_string()))?;

        let lines = load_cart_lines(&txn, cart.id).await?;
        if lines.is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        let total_price = cart_total(&lines)?;
        let now = Utc::now();
        let save_address = form.wants_saved_address();
        let full_name = form.full_name();

        let order = orders::ActiveModel {
            user_id: Set(user_id),
            first_name: Set(form.first_name),
            last_name: Set(form.last_name),
            email: Set(form.email),
            phone: Set(form.phone),
            shipping_address: Set(form.address.clone()),
            shipping_city: Set(form.city.clone()),
            shipping_state: Set(form.state.clone()),
            shipping_zip: Set(form.zip_code.clone()),
            shipping_country: Set(form.country.clone()),
            total_price: Set(total_price),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for (item, product) in &lines {
            order_items::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(product.id),
                quantity: Set(item.quantity),
                price: Set(product.price),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            // 原子扣减, 不检查下限
            products::Entity::update_many()
                .col_expr(
                    products::Column::Stock,
                    Expr::col(products::Column::Stock).sub(item.quantity),
                )
                .col_expr(products::Column::UpdatedAt, Expr::value(now))
                .filter(products::Column::Id.eq(product.id))
                .exec(&txn)
                .await?;
        }

        cart_items::Entity::delete_many()
            .filter(cart_items::Column::CartId.eq(cart.id))
            .exec(&txn)
            .await?;

        if save_address {
            addresses::ActiveModel {
                user_id: Set(user_id),
                name: Set(full_name),
                address: Set(form.address),
                city: Set(form.city),
                state: Set(form.state),
                zip_code: Set(form.zip_code),
                country: Set(form.country),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        log::info!(
            "Order {} placed by user {}: {} items, total {}",
            order.id,
            user_id,
            lines.len(),
            order.total_price
        );

        Ok(CheckoutOutcome::Placed(order))
    }
}
