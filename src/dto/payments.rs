use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::payments::PaymentMethod;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub booking_id: Uuid,
    pub amount: Decimal,
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// `payment_date` is stamped at creation and never rewritten.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePaymentRequest {
    pub amount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
}
