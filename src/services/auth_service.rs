use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

const INVALID_CREDENTIALS: &str = "Invalid username or password.";

#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DatabaseConnection, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn signup(&self, form: SignupForm) -> AppResult<AuthResponse> {
        let username = form.username.trim().to_string();
        validate_username(&username)?;

        if form.password1 != form.password2 {
            return Err(AppError::ValidationError(
                "The two password fields didn't match.".to_string(),
            ));
        }
        validate_password(&form.password1)?;

        // 检查用户名是否已被占用
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(username.as_str()))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::ValidationError(
                "A user with that username already exists.".to_string(),
            ));
        }

        let password_hash = hash_password(&form.password1)?;

        let user = users::ActiveModel {
            username: Set(username),
            password_hash: Set(password_hash),
            first_name: Set(String::new()),
            last_name: Set(String::new()),
            email: Set(String::new()),
            phone: Set(String::new()),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("New account registered: {}", user.username);
        self.issue_tokens(user)
    }

    pub async fn login(&self, form: LoginForm) -> AppResult<AuthResponse> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(form.username.trim()))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&form.password, &user.password_hash)? {
            return Err(AppError::AuthError(INVALID_CREDENTIALS.to_string()));
        }

        self.issue_tokens(user)
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(refresh_token)?;
        let user = users::Entity::find_by_id(claims.user_id()?)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthError("User no longer exists".to_string()))?;

        self.issue_tokens(user)
    }

    fn issue_tokens(&self, user: users::Model) -> AppResult<AuthResponse> {
        let access_token = self
            .jwt_service
            .generate_access_token(user.id, &user.username)?;
        let refresh_token = self
            .jwt_service
            .generate_refresh_token(user.id, &user.username)?;

        Ok(AuthResponse {
            user: user.into(),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
