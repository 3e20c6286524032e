mod common;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use common::{create_property, create_user, date, money, setup_state};
use travel_rental_api::{
    dto::{
        bookings::{CreateBookingRequest, UpdateBookingRequest},
        listings::CreateListingRequest,
    },
    entity::{bookings::BookingStatus, users::UserRole},
    routes::{
        bookings,
        listings,
        params::{BookingListQuery, ListingListQuery},
    },
};
use uuid::Uuid;

#[tokio::test]
async fn listing_handlers_round_trip() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let (status, Json(created)) = listings::create_listing(
        State(state.clone()),
        Json(CreateListingRequest {
            title: "Cozy Cottage".into(),
            description: "Charming cottage with garden".into(),
            price: money("120.00"),
        }),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let listing = created.data.expect("listing");

    let Json(fetched) = listings::get_listing(State(state.clone()), Path(listing.id)).await?;
    assert_eq!(fetched.data.expect("listing").title, "Cozy Cottage");

    let Json(page) = listings::list_listings(
        State(state.clone()),
        Query(ListingListQuery {
            page: Some(1),
            per_page: Some(10),
            q: None,
            min_price: None,
            max_price: None,
        }),
    )
    .await?;
    let meta = page.meta.expect("meta");
    assert_eq!(meta.total, Some(1));
    assert_eq!(meta.per_page, Some(10));
    assert_eq!(page.data.expect("items").items.len(), 1);

    listings::delete_listing(State(state.clone()), Path(listing.id)).await?;
    let missing = listings::get_listing(State(state), Path(listing.id))
        .await
        .unwrap_err()
        .into_response();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn booking_handlers_report_validation_errors() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let host = create_user(&state, UserRole::Host).await?;
    let guest = create_user(&state, UserRole::Guest).await?;
    let property = create_property(&state, host.id, "99.99").await?;

    let (_, Json(created)) = bookings::create_booking(
        State(state.clone()),
        Json(CreateBookingRequest {
            property_id: property.id,
            user_id: guest.id,
            start_date: date(2026, 11, 1),
            end_date: date(2026, 11, 3),
            status: BookingStatus::Pending,
        }),
    )
    .await?;
    let booking = created.data.expect("booking");
    assert_eq!(booking.total_price, money("199.98"));

    let rejected = bookings::update_booking(
        State(state.clone()),
        Path(booking.id),
        Json(UpdateBookingRequest {
            end_date: Some(date(2026, 10, 30)),
            ..Default::default()
        }),
    )
    .await
    .unwrap_err()
    .into_response();
    assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bad_status = bookings::list_bookings(
        State(state.clone()),
        Query(BookingListQuery {
            page: None,
            per_page: None,
            property_id: None,
            user_id: None,
            status: Some("approved".into()),
        }),
    )
    .await
    .unwrap_err()
    .into_response();
    assert_eq!(bad_status.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let Json(listed) = bookings::list_bookings(
        State(state.clone()),
        Query(BookingListQuery {
            page: None,
            per_page: None,
            property_id: Some(property.id),
            user_id: None,
            status: Some("pending".into()),
        }),
    )
    .await?;
    assert_eq!(listed.meta.expect("meta").total, Some(1));

    let missing = bookings::delete_booking(State(state), Path(Uuid::new_v4()))
        .await
        .unwrap_err()
        .into_response();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    Ok(())
}
