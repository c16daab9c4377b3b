use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};
use regex::Regex;
use std::sync::LazyLock;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid username pattern"));

/// 用户名: 1-150 个字符, 仅字母数字与 @.+-_
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.is_empty() {
        return Err(AppError::ValidationError(
            "Username is required.".to_string(),
        ));
    }
    if username.chars().count() > 150 {
        return Err(AppError::ValidationError(
            "Username must be 150 characters or fewer.".to_string(),
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(AppError::ValidationError(
            "Username may contain only letters, numbers, and @/./+/-/_ characters.".to_string(),
        ));
    }
    Ok(())
}

/// 验证密码强度
pub fn validate_password(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if !(8..=128).contains(&len) {
        return Err(AppError::ValidationError(
            "Password must be between 8 and 128 characters.".to_string(),
        ));
    }

    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::ValidationError(
            "Password can't be entirely numeric.".to_string(),
        ));
    }

    Ok(())
}

/// 对密码进行哈希
pub fn hash_password(password: &str) -> AppResult<String> {
    Ok(hash(password, DEFAULT_COST)?)
}

/// 验证密码
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    Ok(verify(password, hash)?)
}
