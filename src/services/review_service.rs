use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::{
    dto::reviews::{CreateReviewRequest, UpdateReviewRequest},
    entity::{
        Properties, Users,
        reviews::{ActiveModel, Column, Entity as Reviews, Model as ReviewModel},
    },
    error::{AppError, AppResult},
    models::Review,
    routes::params::ReviewFilter,
    services::{existing, now, paginate, referenced},
    state::AppState,
    validation,
};

// Whether the reviewer actually stayed at the property is a seeding rule,
// not a storage constraint, so it is not checked here.
pub async fn create_review(state: &AppState, payload: CreateReviewRequest) -> AppResult<Review> {
    let rating = validation::rating(payload.rating)?;
    validation::non_empty("comment", &payload.comment)?;
    let property =
        referenced::<Properties, _>(&state.orm, "property_id", payload.property_id).await?;
    let author = referenced::<Users, _>(&state.orm, "user_id", payload.user_id).await?;

    let timestamp = now();
    let review = ActiveModel {
        id: Set(Uuid::new_v4()),
        property_id: Set(property.id),
        user_id: Set(author.id),
        rating: Set(rating),
        comment: Set(payload.comment),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(review_id = %review.id, property_id = %review.property_id, "review created");
    Ok(review_from_entity(review))
}

pub async fn get_review(state: &AppState, id: Uuid) -> AppResult<Review> {
    existing::<Reviews>(&state.orm, id)
        .await
        .map(review_from_entity)
}

pub async fn list_reviews(state: &AppState, filter: &ReviewFilter) -> AppResult<Vec<Review>> {
    let finder = Reviews::find()
        .filter(review_condition(filter))
        .order_by_asc(Column::CreatedAt);
    let items = paginate(finder, &filter.pagination)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(review_from_entity)
        .collect();
    Ok(items)
}

pub async fn count_reviews(state: &AppState, filter: &ReviewFilter) -> AppResult<u64> {
    let total = Reviews::find()
        .filter(review_condition(filter))
        .count(&state.orm)
        .await?;
    Ok(total)
}

pub async fn update_review(
    state: &AppState,
    id: Uuid,
    payload: UpdateReviewRequest,
) -> AppResult<Review> {
    let current = existing::<Reviews>(&state.orm, id).await?;

    let mut active: ActiveModel = current.into();
    if let Some(rating) = payload.rating {
        active.rating = Set(validation::rating(rating)?);
    }
    if let Some(comment) = payload.comment {
        validation::non_empty("comment", &comment)?;
        active.comment = Set(comment);
    }
    active.updated_at = Set(now());

    let review = active.update(&state.orm).await?;
    Ok(review_from_entity(review))
}

pub async fn delete_review(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Reviews::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

fn review_condition(filter: &ReviewFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(property_id) = filter.property_id {
        condition = condition.add(Column::PropertyId.eq(property_id));
    }
    if let Some(user_id) = filter.user_id {
        condition = condition.add(Column::UserId.eq(user_id));
    }
    condition
}

fn review_from_entity(model: ReviewModel) -> Review {
    Review {
        id: model.id,
        property_id: model.property_id,
        user_id: model.user_id,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
