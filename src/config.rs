use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub storefront: StorefrontConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

/// 店铺展示相关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
    /// 商品图片路径前缀
    pub media_url: String,
    /// 商品没有任何图片时使用
    pub placeholder_image: String,
    /// 首页推荐商品数量
    pub featured_limit: u64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            name: "Glasses Store".to_string(),
            contact_email: "support@example.com".to_string(),
            contact_phone: String::new(),
            contact_address: String::new(),
            media_url: "/media/".to_string(),
            placeholder_image: "/static/images/no-image.jpg".to_string(),
            featured_limit: 8,
        }
    }
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 配置文件不存在时完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::from_env_defaults()?,
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "cannot read config file {config_path}: {e}"
                )));
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> AppResult<Self> {
        toml::from_str(config_str)
            .map_err(|e| AppError::ConfigError(format!("failed to parse config file: {e}")))
    }

    fn from_env_defaults() -> AppResult<Self> {
        // 数据库 URL 在无配置文件时必须提供
        let database_url = get_env("DATABASE_URL").ok_or_else(|| {
            AppError::ConfigError(
                "DATABASE_URL is not set and config.toml was not found".to_string(),
            )
        })?;

        Ok(Config {
            server: ServerConfig {
                host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: get_env_parse("SERVER_PORT", 8080u16),
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
            },
            jwt: JwtConfig {
                secret: get_env("JWT_SECRET")
                    .unwrap_or_else(|| "change-me-in-production".to_string()),
                access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                refresh_token_expires_in: get_env_parse("JWT_REFRESH_EXPIRES_IN", 2_592_000i64),
            },
            storefront: StorefrontConfig::default(),
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("JWT_REFRESH_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.refresh_token_expires_in = n;
        }

        // Storefront
        if let Ok(v) = env::var("STORE_NAME") {
            self.storefront.name = v;
        }
        if let Ok(v) = env::var("STORE_CONTACT_EMAIL") {
            self.storefront.contact_email = v;
        }
        if let Ok(v) = env::var("STORE_CONTACT_PHONE") {
            self.storefront.contact_phone = v;
        }
        if let Ok(v) = env::var("STORE_CONTACT_ADDRESS") {
            self.storefront.contact_address = v;
        }
        if let Ok(v) = env::var("STORE_MEDIA_URL") {
            self.storefront.media_url = v;
        }
        if let Ok(v) = env::var("STORE_PLACEHOLDER_IMAGE") {
            self.storefront.placeholder_image = v;
        }
        if let Ok(v) = env::var("STORE_FEATURED_LIMIT")
            && let Ok(n) = v.parse()
        {
            self.storefront.featured_limit = n;
        }
    }
}
