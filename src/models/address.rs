use crate::entities::address_entity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddressForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddressResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl From<address_entity::Model> for AddressResponse {
    fn from(m: address_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            address: m.address,
            city: m.city,
            state: m.state,
            zip_code: m.zip_code,
            country: m.country,
        }
    }
}
