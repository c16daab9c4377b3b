use crate::config::StorefrontConfig;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoreInfoResponse {
    pub name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
}

impl From<&StorefrontConfig> for StoreInfoResponse {
    fn from(c: &StorefrontConfig) -> Self {
        Self {
            name: c.name.clone(),
            contact_email: c.contact_email.clone(),
            contact_phone: c.contact_phone.clone(),
            contact_address: c.contact_address.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}
