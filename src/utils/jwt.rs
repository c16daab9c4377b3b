use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const ACCESS_TOKEN: &str = "access";
const REFRESH_TOKEN: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub username: String,
    pub exp: i64,
    pub iat: i64,
    pub token_type: String, // "access" or "refresh"
}

impl Claims {
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub
            .parse()
            .map_err(|_| AppError::AuthError("Malformed token subject".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expires_in: i64,
    refresh_token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expires_in: i64, refresh_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expires_in: access_expires_in,
            refresh_token_expires_in: refresh_expires_in,
        }
    }

    fn generate_token(
        &self,
        user_id: i32,
        username: &str,
        token_type: &str,
        expires_in: i64,
    ) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expires_in);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn generate_access_token(&self, user_id: i32, username: &str) -> AppResult<String> {
        self.generate_token(user_id, username, ACCESS_TOKEN, self.access_token_expires_in)
    }

    pub fn generate_refresh_token(&self, user_id: i32, username: &str) -> AppResult<String> {
        self.generate_token(user_id, username, REFRESH_TOKEN, self.refresh_token_expires_in)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        Ok(decode::<Claims>(token, &self.decoding_key, &validation)?.claims)
    }

    pub fn verify_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != ACCESS_TOKEN {
            return Err(AppError::AuthError("Invalid access token type".to_string()));
        }

        Ok(claims)
    }

    pub fn verify_refresh_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != REFRESH_TOKEN {
            return Err(AppError::AuthError("Invalid refresh token type".to_string()));
        }

        Ok(claims)
    }

    pub fn get_access_token_expires_in(&self) -> i64 {
        self.access_token_expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_roundtrip() {
        let jwt = JwtService::new("test-secret", 60, 120);
        let token = jwt.generate_access_token(42, "alice").unwrap();

        let claims = jwt.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let jwt = JwtService::new("test-secret", 60, 120);
        let access = jwt.generate_access_token(1, "alice").unwrap();
        let refresh = jwt.generate_refresh_token(1, "alice").unwrap();

        assert!(jwt.verify_refresh_token(&access).is_err());
        assert!(jwt.verify_access_token(&refresh).is_err());
        assert!(jwt.verify_refresh_token(&refresh).is_ok());
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issuer = JwtService::new("secret-a", 60, 120);
        let verifier = JwtService::new("secret-b", 60, 120);
        let token = issuer.generate_access_token(1, "alice").unwrap();

        assert!(matches!(
            verifier.verify_access_token(&token),
            Err(AppError::JwtError(_))
        ));
    }
}
