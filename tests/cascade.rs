mod common;

use common::{create_property, create_user, date, setup_state};
use travel_rental_api::{
    dto::{
        bookings::CreateBookingRequest, messages::CreateMessageRequest,
        payments::CreatePaymentRequest, reviews::CreateReviewRequest,
    },
    entity::{bookings::BookingStatus, payments::PaymentMethod, users::UserRole},
    error::AppError,
    models::{Booking, Property, User},
    routes::params::{
        BookingFilter, MessageFilter, PaymentFilter, PropertyFilter, ReviewFilter, UserFilter,
    },
    services::{
        booking_service, message_service, payment_service, property_service, review_service,
        user_service,
    },
    state::AppState,
};

struct World {
    host: User,
    guest: User,
    property: Property,
    booking: Booking,
}

/// One host with a property, one guest with a paid booking, a review, and a
/// message in each direction.
async fn build_world(state: &AppState) -> anyhow::Result<World> {
    let host = create_user(state, UserRole::Host).await?;
    let guest = create_user(state, UserRole::Guest).await?;
    let property = create_property(state, host.id, "150.00").await?;

    let booking = booking_service::create_booking(
        state,
        CreateBookingRequest {
            property_id: property.id,
            user_id: guest.id,
            start_date: date(2026, 9, 10),
            end_date: date(2026, 9, 12),
            status: BookingStatus::Confirmed,
        },
    )
    .await?;
    payment_service::create_payment(
        state,
        CreatePaymentRequest {
            booking_id: booking.id,
            amount: booking.total_price,
            payment_method: PaymentMethod::Stripe,
        },
    )
    .await?;
    review_service::create_review(
        state,
        CreateReviewRequest {
            property_id: property.id,
            user_id: guest.id,
            rating: 4,
            comment: "Great location and very clean.".into(),
        },
    )
    .await?;
    for (from, to) in [(guest.id, host.id), (host.id, guest.id)] {
        message_service::create_message(
            state,
            CreateMessageRequest {
                sender_id: from,
                recipient_id: to,
                message_body: "What time is check-in?".into(),
            },
        )
        .await?;
    }

    Ok(World {
        host,
        guest,
        property,
        booking,
    })
}

#[tokio::test]
async fn deleting_host_removes_everything_beneath() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let world = build_world(&state).await?;

    user_service::delete_user(&state, world.host.id).await?;

    assert!(matches!(
        property_service::get_property(&state, world.property.id).await,
        Err(AppError::NotFound)
    ));
    assert!(matches!(
        booking_service::get_booking(&state, world.booking.id).await,
        Err(AppError::NotFound)
    ));
    assert_eq!(
        payment_service::count_payments(&state, &PaymentFilter::default()).await?,
        0
    );
    assert_eq!(
        review_service::count_reviews(&state, &ReviewFilter::default()).await?,
        0
    );
    assert_eq!(
        message_service::count_messages(&state, &MessageFilter::default()).await?,
        0
    );

    // The guest has no dependents left but still exists.
    assert_eq!(user_service::get_user(&state, world.guest.id).await?.id, world.guest.id);
    assert_eq!(user_service::count_users(&state, &UserFilter::default()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn deleting_guest_keeps_the_property() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let world = build_world(&state).await?;

    user_service::delete_user(&state, world.guest.id).await?;

    assert_eq!(
        property_service::count_properties(&state, &PropertyFilter::default()).await?,
        1
    );
    assert_eq!(
        booking_service::count_bookings(&state, &BookingFilter::for_property(world.property.id))
            .await?,
        0
    );
    assert_eq!(
        payment_service::count_payments(&state, &PaymentFilter::default()).await?,
        0
    );
    assert_eq!(
        review_service::count_reviews(&state, &ReviewFilter::default()).await?,
        0
    );
    assert_eq!(
        message_service::count_messages(&state, &MessageFilter::default()).await?,
        0
    );
    Ok(())
}

#[tokio::test]
async fn deleting_booking_removes_its_payments() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let world = build_world(&state).await?;

    booking_service::delete_booking(&state, world.booking.id).await?;

    let filter = PaymentFilter {
        booking_id: Some(world.booking.id),
        ..Default::default()
    };
    assert_eq!(payment_service::count_payments(&state, &filter).await?, 0);
    // Reviews hang off the property, not the booking.
    assert_eq!(
        review_service::count_reviews(&state, &ReviewFilter::default()).await?,
        1
    );
    Ok(())
}

#[tokio::test]
async fn deleting_property_keeps_both_users() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let world = build_world(&state).await?;

    property_service::delete_property(&state, world.property.id).await?;

    assert_eq!(
        booking_service::count_bookings(&state, &BookingFilter::default()).await?,
        0
    );
    assert_eq!(
        review_service::count_reviews(&state, &ReviewFilter::default()).await?,
        0
    );
    assert_eq!(
        message_service::count_messages(&state, &MessageFilter::default()).await?,
        2
    );
    assert_eq!(user_service::count_users(&state, &UserFilter::default()).await?, 2);
    Ok(())
}
