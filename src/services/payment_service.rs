use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::{
    dto::payments::{CreatePaymentRequest, UpdatePaymentRequest},
    entity::{
        Bookings,
        payments::{ActiveModel, Column, Entity as Payments, Model as PaymentModel},
    },
    error::{AppError, AppResult},
    models::Payment,
    routes::params::PaymentFilter,
    services::{existing, now, paginate, referenced},
    state::AppState,
    validation,
};

/// Records a payment; nothing is charged.
pub async fn create_payment(state: &AppState, payload: CreatePaymentRequest) -> AppResult<Payment> {
    let amount = validation::positive_money("amount", payload.amount)?;
    let booking = referenced::<Bookings, _>(&state.orm, "booking_id", payload.booking_id).await?;

    let payment = ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking.id),
        amount: Set(amount),
        payment_method: Set(payload.payment_method),
        payment_date: Set(now()),
    }
    .insert(&state.orm)
    .await?;

    tracing::debug!(
        payment_id = %payment.id,
        booking_id = %payment.booking_id,
        method = %payment.payment_method,
        "payment recorded"
    );
    Ok(payment_from_entity(payment))
}

pub async fn get_payment(state: &AppState, id: Uuid) -> AppResult<Payment> {
    existing::<Payments>(&state.orm, id)
        .await
        .map(payment_from_entity)
}

pub async fn list_payments(state: &AppState, filter: &PaymentFilter) -> AppResult<Vec<Payment>> {
    let finder = Payments::find()
        .filter(payment_condition(filter))
        .order_by_asc(Column::PaymentDate);
    let items = paginate(finder, &filter.pagination)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(payment_from_entity)
        .collect();
    Ok(items)
}

pub async fn count_payments(state: &AppState, filter: &PaymentFilter) -> AppResult<u64> {
    let total = Payments::find()
        .filter(payment_condition(filter))
        .count(&state.orm)
        .await?;
    Ok(total)
}

pub async fn update_payment(
    state: &AppState,
    id: Uuid,
    payload: UpdatePaymentRequest,
) -> AppResult<Payment> {
    let current = existing::<Payments>(&state.orm, id).await?;

    let mut active: ActiveModel = current.into();
    if let Some(amount) = payload.amount {
        active.amount = Set(validation::positive_money("amount", amount)?);
    }
    if let Some(method) = payload.payment_method {
        active.payment_method = Set(method);
    }

    let payment = active.update(&state.orm).await?;
    Ok(payment_from_entity(payment))
}

pub async fn delete_payment(state: &AppState, id: Uuid) -> AppResult<()> {
    let result = Payments::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

fn payment_condition(filter: &PaymentFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(booking_id) = filter.booking_id {
        condition = condition.add(Column::BookingId.eq(booking_id));
    }
    condition
}

fn payment_from_entity(model: PaymentModel) -> Payment {
    Payment {
        id: model.id,
        booking_id: model.booking_id,
        amount: validation::cents_to_money(model.amount),
        payment_method: model.payment_method,
        payment_date: model.payment_date.with_timezone(&Utc),
    }
}
