use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 提示消息级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// 一次性提示消息, 随响应返回给前端展示
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<FlashMessage>,
    /// 浏览器流程中应跳转到的页面
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            redirect: None,
            error: None,
        }
    }

    pub fn success_with_message(data: T, message: FlashMessage) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message),
            redirect: None,
            error: None,
        }
    }

    pub fn with_redirect(mut self, location: &str) -> Self {
        self.redirect = Some(location.to_string());
        self
    }
}

impl ApiResponse<()> {
    pub fn redirect(location: &str, message: Option<FlashMessage>) -> Self {
        let success = !matches!(
            message,
            Some(FlashMessage {
                level: MessageLevel::Error | MessageLevel::Warning,
                ..
            })
        );
        Self {
            success,
            data: None,
            message,
            redirect: Some(location.to_string()),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_envelope() {
        let ok = ApiResponse::redirect("/cart/", Some(FlashMessage::success("Added")));
        assert!(ok.success);
        assert_eq!(ok.redirect.as_deref(), Some("/cart/"));

        let warned = ApiResponse::redirect("/cart/", Some(FlashMessage::warning("Empty")));
        assert!(!warned.success);

        let bare = ApiResponse::redirect("/cart/", None);
        assert!(bare.success);
        assert!(bare.message.is_none());
    }

    #[test]
    fn test_message_level_serialization() {
        let json = serde_json::to_value(FlashMessage::warning("Your cart is empty.")).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["text"], "Your cart is empty.");
    }
}
