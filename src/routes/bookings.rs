use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::bookings::{BookingList, CreateBookingRequest, UpdateBookingRequest},
    error::AppResult,
    models::Booking,
    response::{ApiResponse, Meta},
    routes::params::{BookingFilter, BookingListQuery},
    services::booking_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route(
            "/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<u64>, Query, description = "Items per page, default 20, max 100"),
        ("property_id" = Option<Uuid>, Query, description = "Filter by property"),
        ("user_id" = Option<Uuid>, Query, description = "Filter by guest"),
        ("status" = Option<String>, Query, description = "pending, confirmed or cancelled"),
    ),
    responses(
        (status = 200, description = "List bookings", body = ApiResponse<BookingList>),
        (status = 422, description = "Unknown status"),
    ),
    tag = "Bookings"
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let filter = BookingFilter::try_from(query)?;
    let items = booking_service::list_bookings(&state, &filter).await?;
    let total = booking_service::count_bookings(&state, &filter).await?;

    let meta = match filter.pagination.window() {
        Some((page, per_page, _)) => Meta::new(page, per_page, total),
        None => Meta::total(total),
    };
    Ok(Json(ApiResponse::success(
        "Bookings",
        BookingList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Get booking", body = ApiResponse<Booking>),
        (status = 404, description = "Booking not found"),
    ),
    tag = "Bookings"
)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = booking_service::get_booking(&state, id).await?;
    Ok(Json(ApiResponse::success("Booking", booking, None)))
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Create booking; total_price is derived", body = ApiResponse<Booking>),
        (status = 422, description = "Invalid field or unknown property/guest"),
    ),
    tag = "Bookings"
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let booking = booking_service::create_booking(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Booking created",
            booking,
            Some(Meta::empty()),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Updated booking", body = ApiResponse<Booking>),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Invalid dates or status transition"),
    ),
    tag = "Bookings"
)]
pub async fn update_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = booking_service::update_booking(&state, id, payload).await?;
    Ok(Json(ApiResponse::success(
        "Updated",
        booking,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Deleted booking and its payments"),
        (status = 404, description = "Booking not found"),
    ),
    tag = "Bookings"
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    booking_service::delete_booking(&state, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
