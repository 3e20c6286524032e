//! Repository layer: create / get / list / count / update / delete per
//! entity, with field validation and application-level cascading deletes.

use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, EntityTrait, PrimaryKeyTrait, QuerySelect, Select,
    prelude::DateTimeWithTimeZone,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    routes::params::Pagination,
};

pub mod booking_service;
pub mod cascade;
pub mod listing_service;
pub mod message_service;
pub mod payment_service;
pub mod property_service;
pub mod review_service;
pub mod user_service;

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().into()
}

pub(crate) fn paginate<E: EntityTrait>(finder: Select<E>, pagination: &Pagination) -> Select<E> {
    match pagination.window() {
        Some((_, limit, offset)) => finder.limit(limit).offset(offset),
        None => finder,
    }
}

/// Loads the row a foreign key points at, or fails naming the key field.
pub(crate) async fn referenced<E, C>(conn: &C, field: &str, id: Uuid) -> AppResult<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    E::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| AppError::validation(field, format!("{id} does not exist")))
}

pub(crate) async fn existing<E>(conn: &DatabaseConnection, id: Uuid) -> AppResult<E::Model>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    E::find_by_id(id).one(conn).await?.ok_or(AppError::NotFound)
}
