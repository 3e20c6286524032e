use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
    sea_query::{Expr, Func},
};
use uuid::Uuid;

use crate::{
    dto::listings::{CreateListingRequest, UpdateListingRequest},
    entity::listings::{ActiveModel, Column, Entity as Listings, Model as ListingModel},
    error::{AppError, AppResult},
    models::Listing,
    routes::params::ListingFilter,
    services::{existing, now, paginate},
    state::AppState,
    validation,
};

pub async fn create_listing(
    state: &AppState,
    payload: CreateListingRequest,
) -> AppResult<Listing> {
    validation::short_text("title", &payload.title, 255)?;
    validation::non_empty("description", &payload.description)?;
    let price = validation::positive_money("price", payload.price)?;

    let timestamp = now();
    let listing = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(payload.title),
        description: Set(payload.description),
        price: Set(price),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(listing_id = %listing.id, "listing created");
    Ok(listing_from_entity(listing))
}

pub async fn get_listing(state: &AppState, id: Uuid) -> AppResult<Listing> {
    existing::<Listings>(&state.orm, id)
        .await
        .map(listing_from_entity)
}

pub async fn list_listings(state: &AppState, filter: &ListingFilter) -> AppResult<Vec<Listing>> {
    let finder = Listings::find()
        .filter(listing_condition(filter)?)
        .order_by_asc(Column::CreatedAt);
    let items = paginate(finder, &filter.pagination)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(listing_from_entity)
        .collect();
    Ok(items)
}

pub async fn count_listings(state: &AppState, filter: &ListingFilter) -> AppResult<u64> {
    let total = Listings::find()
        .filter(listing_condition(filter)?)
        .count(&state.orm)
        .await?;
    Ok(total)
}

pub async fn update_listing(
    state: &AppState,
    id: Uuid,
    payload: UpdateListingRequest,
) -> AppResult<Listing> {
    let current = existing::<Listings>(&state.orm, id).await?;

    let mut active: ActiveModel = current.into();
    if let Some(title) = payload.title {
        validation::short_text("title", &title, 255)?;
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        validation::non_empty("description", &description)?;
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(validation::positive_money("price", price)?);
    }
    active.updated_at = Set(now());

    let listing = active.update(&state.orm).await?;
    Ok(listing_from_entity(listing))
}

pub async fn delete_listing(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Listings::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

fn listing_condition(filter: &ListingFilter) -> AppResult<Condition> {
    let mut condition = Condition::all();

    // LOWER on both sides so postgres and sqlite agree.
    if let Some(search) = filter.q.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", search.to_lowercase());
        condition = condition.add(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(Column::Title))).like(pattern.clone()))
                .add(Expr::expr(Func::lower(Expr::col(Column::Description))).like(pattern)),
        );
    }
    if let Some(min_price) = filter.min_price {
        let cents = validation::money_to_cents("min_price", min_price)?;
        condition = condition.add(Column::Price.gte(cents));
    }
    if let Some(max_price) = filter.max_price {
        let cents = validation::money_to_cents("max_price", max_price)?;
        condition = condition.add(Column::Price.lte(cents));
    }
    Ok(condition)
}

fn listing_from_entity(model: ListingModel) -> Listing {
    Listing {
        id: model.id,
        title: model.title,
        description: model.description,
        price: validation::cents_to_money(model.price),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
