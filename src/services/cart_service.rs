use crate::entities::{cart_entity as carts, cart_item_entity as cart_items, product_entity as products};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set,
};

/// 获取用户购物车（不存在则创建）
pub async fn get_or_create_cart<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<carts::Model, DbErr> {
    if let Some(cart) = find_cart(db, user_id).await? {
        return Ok(cart);
    }
    let now = Utc::now();
    carts::ActiveModel {
        user_id: Set(user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn find_cart<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<Option<carts::Model>, DbErr> {
    carts::Entity::find()
        .filter(carts::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// 读取购物车条目及对应商品, 按加入顺序
pub async fn load_cart_lines<C: ConnectionTrait>(db: &C, cart_id: i32) -> AppResult<Vec<CartLine>> {
    let rows = cart_items::Entity::find()
        .filter(cart_items::Column::CartId.eq(cart_id))
        .order_by_asc(cart_items::Column::Id)
        .find_also_related(products::Entity)
        .all(db)
        .await?;

    rows.into_iter()
        .map(|(item, product)| {
            let item_id = item.id;
            product.map(|p| (item, p)).ok_or_else(|| {
                AppError::InternalError(format!("Cart item {item_id} references a missing product"))
            })
        })
        .collect()
}

#[derive(Clone)]
pub struct CartService {
    pool: DatabaseConnection,
}

impl CartService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_cart(&self, user_id: i32) -> AppResult<CartResponse> {
        let cart = get_or_create_cart(&self.pool, user_id).await?;
        let lines = load_cart_lines(&self.pool, cart.id).await?;
        CartResponse::new(&cart, &lines)
    }

    /// 加入购物车: 已存在则数量 +1, 否则新建数量为 1 的条目
    pub async fn add_item(&self, user_id: i32, product_id: i32) -> AppResult<products::Model> {
        let product = products::Entity::find_by_id(product_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let cart = get_or_create_cart(&self.pool, user_id).await?;

        let existing = cart_items::Entity::find()
            .filter(cart_items::Column::CartId.eq(cart.id))
            .filter(cart_items::Column::ProductId.eq(product.id))
            .one(&self.pool)
            .await?;

        match existing {
            Some(item) => {
                // 原子自增, 已达上限时不更新
                let result = cart_items::Entity::update_many()
                    .col_expr(
                        cart_items::Column::Quantity,
                        Expr::col(cart_items::Column::Quantity).add(1),
                    )
                    .filter(cart_items::Column::Id.eq(item.id))
                    .filter(cart_items::Column::Quantity.lt(i32::MAX))
                    .exec(&self.pool)
                    .await?;
                if result.rows_affected == 0 {
                    return Err(AppError::ValidationError(
                        "Cart item quantity is too large".to_string(),
                    ));
                }
            }
            None => {
                cart_items::ActiveModel {
                    cart_id: Set(cart.id),
                    product_id: Set(product.id),
                    quantity: Set(1),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?;
            }
        }

        Ok(product)
    }

    pub async fn remove_item(&self, user_id: i32, item_id: i32) -> AppResult<()> {
        let item = self.find_owned_item(user_id, item_id).await?;
        item.delete(&self.pool).await?;
        Ok(())
    }

    /// 修改数量, 小于等于 0 时删除条目
    pub async fn update_item(
        &self,
        user_id: i32,
        item_id: i32,
        quantity: i32,
    ) -> AppResult<CartUpdate> {
        let item = self.find_owned_item(user_id, item_id).await?;

        if quantity > 0 {
            let mut am = item.into_active_model();
            am.quantity = Set(quantity);
            am.update(&self.pool).await?;
            Ok(CartUpdate::Updated(quantity))
        } else {
            item.delete(&self.pool).await?;
            Ok(CartUpdate::Removed)
        }
    }

    /// 只能操作自己购物车里的条目, 否则视为不存在
    async fn find_owned_item(&self, user_id: i32, item_id: i32) -> AppResult<cart_items::Model> {
        cart_items::Entity::find_by_id(item_id)
            .inner_join(carts::Entity)
            .filter(carts::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))
    }
}
