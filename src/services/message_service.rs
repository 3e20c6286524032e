use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::{
    dto::messages::{CreateMessageRequest, UpdateMessageRequest},
    entity::{
        Users,
        messages::{ActiveModel, Column, Entity as Messages, Model as MessageModel},
    },
    error::{AppError, AppResult},
    models::Message,
    routes::params::MessageFilter,
    services::{existing, now, paginate, referenced},
    state::AppState,
    validation,
};

pub async fn create_message(state: &AppState, payload: CreateMessageRequest) -> AppResult<Message> {
    validation::non_empty("message_body", &payload.message_body)?;
    let sender = referenced::<Users, _>(&state.orm, "sender_id", payload.sender_id).await?;
    let recipient =
        referenced::<Users, _>(&state.orm, "recipient_id", payload.recipient_id).await?;

    let message = ActiveModel {
        id: Set(Uuid::new_v4()),
        sender_id: Set(sender.id),
        recipient_id: Set(recipient.id),
        message_body: Set(payload.message_body),
        sent_at: Set(now()),
    }
    .insert(&state.orm)
    .await?;

    Ok(message_from_entity(message))
}

pub async fn get_message(state: &AppState, id: Uuid) -> AppResult<Message> {
    existing::<Messages>(&state.orm, id)
        .await
        .map(message_from_entity)
}

pub async fn list_messages(state: &AppState, filter: &MessageFilter) -> AppResult<Vec<Message>> {
    let finder = Messages::find()
        .filter(message_condition(filter))
        .order_by_asc(Column::SentAt);
    let items = paginate(finder, &filter.pagination)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(message_from_entity)
        .collect();
    Ok(items)
}

pub async fn count_messages(state: &AppState, filter: &MessageFilter) -> AppResult<u64> {
    let total = Messages::find()
        .filter(message_condition(filter))
        .count(&state.orm)
        .await?;
    Ok(total)
}

/// Only the body is editable; `sent_at` keeps the original send time.
pub async fn update_message(
    state: &AppState,
    id: Uuid,
    payload: UpdateMessageRequest,
) -> AppResult<Message> {
    let current = existing::<Messages>(&state.orm, id).await?;

    let mut active: ActiveModel = current.into();
    if let Some(body) = payload.message_body {
        validation::non_empty("message_body", &body)?;
        active.message_body = Set(body);
    }

    let message = active.update(&state.orm).await?;
    Ok(message_from_entity(message))
}

pub async fn delete_message(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Messages::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

fn message_condition(filter: &MessageFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(sender_id) = filter.sender_id {
        condition = condition.add(Column::SenderId.eq(sender_id));
    }
    if let Some(recipient_id) = filter.recipient_id {
        condition = condition.add(Column::RecipientId.eq(recipient_id));
    }
    if let Some(user_id) = filter.participant_id {
        condition = condition.add(
            Condition::any()
                .add(Column::SenderId.eq(user_id))
                .add(Column::RecipientId.eq(user_id)),
        );
    }
    condition
}

fn message_from_entity(model: MessageModel) -> Message {
    Message {
        id: model.id,
        sender_id: model.sender_id,
        recipient_id: model.recipient_id,
        message_body: model.message_body,
        sent_at: model.sent_at.with_timezone(&Utc),
    }
}
