use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::listings::{CreateListingRequest, ListingList, UpdateListingRequest},
    error::AppResult,
    models::Listing,
    response::{ApiResponse, Meta},
    routes::params::{ListingFilter, ListingListQuery},
    services::listing_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_listings).post(create_listing))
        .route(
            "/{id}",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
}

#[utoipa::path(
    get,
    path = "/api/listings",
    params(
        ("page" = Option<u64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<u64>, Query, description = "Items per page, default 20, max 100"),
        ("q" = Option<String>, Query, description = "Search in title or description"),
        ("min_price" = Option<String>, Query, description = "Lowest price, inclusive"),
        ("max_price" = Option<String>, Query, description = "Highest price, inclusive"),
    ),
    responses(
        (status = 200, description = "List listings", body = ApiResponse<ListingList>),
        (status = 400, description = "Bad query string"),
    ),
    tag = "Listings"
)]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingListQuery>,
) -> AppResult<Json<ApiResponse<ListingList>>> {
    let filter = ListingFilter::from(query);
    let items = listing_service::list_listings(&state, &filter).await?;
    let total = listing_service::count_listings(&state, &filter).await?;

    let meta = match filter.pagination.window() {
        Some((page, per_page, _)) => Meta::new(page, per_page, total),
        None => Meta::total(total),
    };
    Ok(Json(ApiResponse::success(
        "Listings",
        ListingList { items },
        Some(meta),
    )))
}

#[utoipa::path(
    get,
    path = "/api/listings/{id}",
    params(("id" = Uuid, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Get listing", body = ApiResponse<Listing>),
        (status = 404, description = "Listing not found"),
    ),
    tag = "Listings"
)]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Listing>>> {
    let listing = listing_service::get_listing(&state, id).await?;
    Ok(Json(ApiResponse::success("Listing", listing, None)))
}

#[utoipa::path(
    post,
    path = "/api/listings",
    request_body = CreateListingRequest,
    responses(
        (status = 201, description = "Create listing", body = ApiResponse<Listing>),
        (status = 422, description = "Invalid field"),
    ),
    tag = "Listings"
)]
pub async fn create_listing(
    State(state): State<AppState>,
    Json(payload): Json<CreateListingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Listing>>)> {
    let listing = listing_service::create_listing(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Listing created",
            listing,
            Some(Meta::empty()),
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/listings/{id}",
    params(("id" = Uuid, Path, description = "Listing ID")),
    request_body = UpdateListingRequest,
    responses(
        (status = 200, description = "Updated listing", body = ApiResponse<Listing>),
        (status = 404, description = "Listing not found"),
        (status = 422, description = "Invalid field"),
    ),
    tag = "Listings"
)]
pub async fn update_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateListingRequest>,
) -> AppResult<Json<ApiResponse<Listing>>> {
    let listing = listing_service::update_listing(&state, id, payload).await?;
    Ok(Json(ApiResponse::success(
        "Updated",
        listing,
        Some(Meta::empty()),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/listings/{id}",
    params(("id" = Uuid, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Deleted listing"),
        (status = 404, description = "Listing not found"),
    ),
    tag = "Listings"
)]
pub async fn delete_listing(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    listing_service::delete_listing(&state, id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
