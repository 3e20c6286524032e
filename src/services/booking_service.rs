use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::bookings::{CreateBookingRequest, UpdateBookingRequest},
    entity::{
        Properties, Users,
        bookings::{ActiveModel, Column, Entity as Bookings, Model as BookingModel},
    },
    error::{AppError, AppResult},
    models::Booking,
    routes::params::BookingFilter,
    services::{cascade, existing, now, paginate, referenced},
    state::AppState,
    validation::{self, MAX_MONEY_CENTS},
};

/// `total_price` is the property's nightly rate times the number of nights,
/// computed once here.
pub async fn create_booking(state: &AppState, payload: CreateBookingRequest) -> AppResult<Booking> {
    let nights = validation::stay_nights(payload.start_date, payload.end_date)?;
    let property =
        referenced::<Properties, _>(&state.orm, "property_id", payload.property_id).await?;
    let guest = referenced::<Users, _>(&state.orm, "user_id", payload.user_id).await?;

    let total_price = property
        .price_per_night
        .checked_mul(nights)
        .filter(|cents| *cents <= MAX_MONEY_CENTS)
        .ok_or_else(|| AppError::validation("total_price", "must fit in 10 digits"))?;

    let timestamp = now();
    let booking = ActiveModel {
        id: Set(Uuid::new_v4()),
        property_id: Set(property.id),
        user_id: Set(guest.id),
        start_date: Set(payload.start_date),
        end_date: Set(payload.end_date),
        total_price: Set(total_price),
        status: Set(payload.status),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(
        booking_id = %booking.id,
        property_id = %booking.property_id,
        nights,
        status = %booking.status,
        "booking created"
    );
    Ok(booking_from_entity(booking))
}

pub async fn get_booking(state: &AppState, id: Uuid) -> AppResult<Booking> {
    existing::<Bookings>(&state.orm, id)
        .await
        .map(booking_from_entity)
}

pub async fn list_bookings(state: &AppState, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
    let finder = Bookings::find()
        .filter(booking_condition(filter))
        .order_by_asc(Column::CreatedAt);
    let items = paginate(finder, &filter.pagination)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect();
    Ok(items)
}

pub async fn count_bookings(state: &AppState, filter: &BookingFilter) -> AppResult<u64> {
    let total = Bookings::find()
        .filter(booking_condition(filter))
        .count(&state.orm)
        .await?;
    Ok(total)
}

/// Moving the dates does not reprice the booking.
pub async fn update_booking(
    state: &AppState,
    id: Uuid,
    payload: UpdateBookingRequest,
) -> AppResult<Booking> {
    let current = existing::<Bookings>(&state.orm, id).await?;

    if payload.start_date.is_some() || payload.end_date.is_some() {
        validation::stay_nights(
            payload.start_date.unwrap_or(current.start_date),
            payload.end_date.unwrap_or(current.end_date),
        )?;
    }
    if let Some(next) = payload.status {
        if !current.status.can_transition_to(next) {
            return Err(AppError::validation(
                "status",
                format!("cannot change from {} to {}", current.status, next),
            ));
        }
    }

    let mut active: ActiveModel = current.into();
    if let Some(start_date) = payload.start_date {
        active.start_date = Set(start_date);
    }
    if let Some(end_date) = payload.end_date {
        active.end_date = Set(end_date);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(now());

    let booking = active.update(&state.orm).await?;
    tracing::debug!(booking_id = %booking.id, status = %booking.status, "booking updated");
    Ok(booking_from_entity(booking))
}

pub async fn delete_booking(state: &AppState, id: Uuid) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    if Bookings::find_by_id(id).one(&txn).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let mut removed = cascade::Removed::default();
    cascade::purge_bookings(&txn, vec![id], &mut removed).await?;
    txn.commit().await?;

    tracing::info!(booking_id = %id, payments = removed.payments, "booking deleted");
    Ok(())
}

fn booking_condition(filter: &BookingFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(property_id) = filter.property_id {
        condition = condition.add(Column::PropertyId.eq(property_id));
    }
    if let Some(user_id) = filter.user_id {
        condition = condition.add(Column::UserId.eq(user_id));
    }
    if let Some(status) = filter.status {
        condition = condition.add(Column::Status.eq(status));
    }
    condition
}

fn booking_from_entity(model: BookingModel) -> Booking {
    Booking {
        id: model.id,
        property_id: model.property_id,
        user_id: model.user_id,
        start_date: model.start_date,
        end_date: model.end_date,
        total_price: validation::cents_to_money(model.total_price),
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
