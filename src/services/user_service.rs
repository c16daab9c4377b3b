use crate::entities::{address_entity as addresses, user_entity as users};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::OrderService;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};

#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
    order_service: OrderService,
}

impl UserService {
    pub fn new(pool: DatabaseConnection, order_service: OrderService) -> Self {
        Self {
            pool,
            order_service,
        }
    }

    async fn find_user(&self, user_id: i32) -> AppResult<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// 个人中心: 用户信息、订单、已保存地址
    pub async fn get_user_profile(&self, user_id: i32) -> AppResult<ProfileResponse> {
        let user = self.find_user(user_id).await?;
        let orders = self.order_service.get_user_orders(user_id).await?;

        let saved = addresses::Entity::find()
            .filter(addresses::Column::UserId.eq(user_id))
            .order_by_asc(addresses::Column::Id)
            .all(&self.pool)
            .await?;

        Ok(ProfileResponse {
            user: user.into(),
            orders,
            addresses: saved.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn update_user_profile(
        &self,
        user_id: i32,
        form: UpdateProfileForm,
    ) -> AppResult<UserResponse> {
        let mut model = self.find_user(user_id).await?.into_active_model();
        model.first_name = Set(form.first_name);
        model.last_name = Set(form.last_name);
        model.phone = Set(form.phone);
        let updated = model.update(&self.pool).await?;
        Ok(updated.into())
    }

    pub async fn add_address(&self, user_id: i32, form: AddressForm) -> AppResult<AddressResponse> {
        let saved = addresses::ActiveModel {
            user_id: Set(user_id),
            name: Set(form.name),
            address: Set(form.address),
            city: Set(form.city),
            state: Set(form.state),
            zip_code: Set(form.zip_code),
            country: Set(form.country),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;
        Ok(saved.into())
    }
}
