use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Listing;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ListingList {
    #[schema(value_type = Vec<Listing>)]
    pub items: Vec<Listing>,
}
