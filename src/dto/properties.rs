use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    pub host_id: Uuid,
    pub name: String,
    pub description: String,
    pub location: String,
    pub price_per_night: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePropertyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_per_night: Option<Decimal>,
}
