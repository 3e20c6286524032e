//! Dependency-ordered deletes. Children go first so the routine is correct
//! on stores without native `ON DELETE CASCADE`; callers run it inside a
//! transaction.

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use crate::entity::{
    Bookings, Messages, Payments, Properties, Reviews, Users, bookings, messages, payments,
    properties, reviews, users,
};

/// Per-table row counts removed by one cascade.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    pub users: u64,
    pub properties: u64,
    pub bookings: u64,
    pub reviews: u64,
    pub payments: u64,
    pub messages: u64,
}

pub async fn purge_bookings<C: ConnectionTrait>(
    conn: &C,
    booking_ids: Vec<Uuid>,
    removed: &mut Removed,
) -> Result<(), DbErr> {
    if booking_ids.is_empty() {
        return Ok(());
    }
    removed.payments += Payments::delete_many()
        .filter(payments::Column::BookingId.is_in(booking_ids.clone()))
        .exec(conn)
        .await?
        .rows_affected;
    removed.bookings += Bookings::delete_many()
        .filter(bookings::Column::Id.is_in(booking_ids))
        .exec(conn)
        .await?
        .rows_affected;
    Ok(())
}

pub async fn purge_properties<C: ConnectionTrait>(
    conn: &C,
    property_ids: Vec<Uuid>,
    removed: &mut Removed,
) -> Result<(), DbErr> {
    if property_ids.is_empty() {
        return Ok(());
    }
    let booking_ids: Vec<Uuid> = Bookings::find()
        .select_only()
        .column(bookings::Column::Id)
        .filter(bookings::Column::PropertyId.is_in(property_ids.clone()))
        .into_tuple()
        .all(conn)
        .await?;
    purge_bookings(conn, booking_ids, removed).await?;

    removed.reviews += Reviews::delete_many()
        .filter(reviews::Column::PropertyId.is_in(property_ids.clone()))
        .exec(conn)
        .await?
        .rows_affected;
    removed.properties += Properties::delete_many()
        .filter(properties::Column::Id.is_in(property_ids))
        .exec(conn)
        .await?
        .rows_affected;
    Ok(())
}

/// Removes the user, the user's messages (either side), reviews, bookings
/// with their payments, and hosted properties with everything under them.
pub async fn purge_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Removed, DbErr> {
    let mut removed = Removed::default();

    removed.messages += Messages::delete_many()
        .filter(
            Condition::any()
                .add(messages::Column::SenderId.eq(user_id))
                .add(messages::Column::RecipientId.eq(user_id)),
        )
        .exec(conn)
        .await?
        .rows_affected;
    removed.reviews += Reviews::delete_many()
        .filter(reviews::Column::UserId.eq(user_id))
        .exec(conn)
        .await?
        .rows_affected;

    let own_bookings: Vec<Uuid> = Bookings::find()
        .select_only()
        .column(bookings::Column::Id)
        .filter(bookings::Column::UserId.eq(user_id))
        .into_tuple()
        .all(conn)
        .await?;
    purge_bookings(conn, own_bookings, &mut removed).await?;

    let hosted: Vec<Uuid> = Properties::find()
        .select_only()
        .column(properties::Column::Id)
        .filter(properties::Column::HostId.eq(user_id))
        .into_tuple()
        .all(conn)
        .await?;
    purge_properties(conn, hosted, &mut removed).await?;

    removed.users += Users::delete_many()
        .filter(users::Column::Id.eq(user_id))
        .exec(conn)
        .await?
        .rows_affected;
    Ok(removed)
}
