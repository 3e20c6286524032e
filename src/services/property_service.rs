use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::properties::{CreatePropertyRequest, UpdatePropertyRequest},
    entity::{
        Users,
        properties::{ActiveModel, Column, Entity as Properties, Model as PropertyModel},
        users::UserRole,
    },
    error::{AppError, AppResult},
    models::Property,
    routes::params::PropertyFilter,
    services::{cascade, existing, now, paginate, referenced},
    state::AppState,
    validation,
};

pub async fn create_property(
    state: &AppState,
    payload: CreatePropertyRequest,
) -> AppResult<Property> {
    validation::short_text("name", &payload.name, 100)?;
    validation::non_empty("description", &payload.description)?;
    validation::short_text("location", &payload.location, 100)?;
    let price_per_night = validation::positive_money("price_per_night", payload.price_per_night)?;

    let host = referenced::<Users, _>(&state.orm, "host_id", payload.host_id).await?;
    if host.role != UserRole::Host {
        return Err(AppError::validation(
            "host_id",
            format!("user {} has role {}, expected host", host.id, host.role),
        ));
    }

    let timestamp = now();
    let property = ActiveModel {
        id: Set(Uuid::new_v4()),
        host_id: Set(host.id),
        name: Set(payload.name),
        description: Set(payload.description),
        location: Set(payload.location),
        price_per_night: Set(price_per_night),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(
        property_id = %property.id,
        host_id = %property.host_id,
        "property created"
    );
    Ok(property_from_entity(property))
}

pub async fn get_property(state: &AppState, id: Uuid) -> AppResult<Property> {
    existing::<Properties>(&state.orm, id)
        .await
        .map(property_from_entity)
}

pub async fn list_properties(
    state: &AppState,
    filter: &PropertyFilter,
) -> AppResult<Vec<Property>> {
    let finder = Properties::find()
        .filter(property_condition(filter))
        .order_by_asc(Column::CreatedAt);
    let items = paginate(finder, &filter.pagination)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(property_from_entity)
        .collect();
    Ok(items)
}

pub async fn count_properties(state: &AppState, filter: &PropertyFilter) -> AppResult<u64> {
    let total = Properties::find()
        .filter(property_condition(filter))
        .count(&state.orm)
        .await?;
    Ok(total)
}

/// Changing the nightly rate leaves existing bookings' totals untouched.
pub async fn update_property(
    state: &AppState,
    id: Uuid,
    payload: UpdatePropertyRequest,
) -> AppResult<Property> {
    let current = existing::<Properties>(&state.orm, id).await?;

    let mut active: ActiveModel = current.into();
    if let Some(name) = payload.name {
        validation::short_text("name", &name, 100)?;
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        validation::non_empty("description", &description)?;
        active.description = Set(description);
    }
    if let Some(location) = payload.location {
        validation::short_text("location", &location, 100)?;
        active.location = Set(location);
    }
    if let Some(price) = payload.price_per_night {
        active.price_per_night = Set(validation::positive_money("price_per_night", price)?);
    }
    active.updated_at = Set(now());

    let property = active.update(&state.orm).await?;
    Ok(property_from_entity(property))
}

pub async fn delete_property(state: &AppState, id: Uuid) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    if Properties::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let mut removed = cascade::Removed::default();
    cascade::purge_properties(&txn, vec![id], &mut removed).await?;
    txn.commit().await?;

    tracing::info!(
        property_id = %id,
        bookings = removed.bookings,
        reviews = removed.reviews,
        payments = removed.payments,
        "property deleted"
    );
    Ok(())
}

fn property_condition(filter: &PropertyFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(host_id) = filter.host_id {
        condition = condition.add(Column::HostId.eq(host_id));
    }
    condition
}

fn property_from_entity(model: PropertyModel) -> Property {
    Property {
        id: model.id,
        host_id: model.host_id,
        name: model.name,
        description: model.description,
        location: model.location,
        price_per_night: validation::cents_to_money(model.price_per_night),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
