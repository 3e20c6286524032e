use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateMessageRequest {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub message_body: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMessageRequest {
    pub message_body: Option<String>,
}
