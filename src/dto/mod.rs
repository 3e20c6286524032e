pub mod bookings;
pub mod listings;
pub mod messages;
pub mod payments;
pub mod properties;
pub mod reviews;
pub mod users;
