use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        bookings::{BookingList, CreateBookingRequest, UpdateBookingRequest},
        listings::{CreateListingRequest, ListingList, UpdateListingRequest},
    },
    entity::bookings::BookingStatus,
    models::{Booking, Listing},
    response::{ApiResponse, Meta},
    routes::{bookings, health, listings},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        listings::list_listings,
        listings::get_listing,
        listings::create_listing,
        listings::update_listing,
        listings::delete_listing,
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking,
        bookings::delete_booking
    ),
    components(
        schemas(
            Listing,
            Booking,
            BookingStatus,
            CreateListingRequest,
            UpdateListingRequest,
            CreateBookingRequest,
            UpdateBookingRequest,
            ListingList,
            BookingList,
            Meta,
            ApiResponse<Listing>,
            ApiResponse<Booking>,
            ApiResponse<ListingList>,
            ApiResponse<BookingList>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Listings", description = "Listing endpoints"),
        (name = "Bookings", description = "Booking endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
