use crate::entities::{
    order_entity as orders, order_item_entity as order_items, product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 用户订单列表, 按下单时间倒序
    pub async fn get_user_orders(&self, user_id: i32) -> AppResult<Vec<OrderSummaryResponse>> {
        let list = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 订单详情, 只能查看自己的订单
    pub async fn get_user_order(
        &self,
        user_id: i32,
        order_id: i32,
    ) -> AppResult<OrderDetailResponse> {
        let order = orders::Entity::find_by_id(order_id)
            .filter(orders::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let items = order_items::Entity::find()
            .filter(order_items::Column::OrderId.eq(order.id))
            .order_by_asc(order_items::Column::Id)
            .find_also_related(products::Entity)
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|(item, product)| OrderItemResponse::new(item, product))
            .collect();

        Ok(OrderDetailResponse::new(order, items))
    }
}
