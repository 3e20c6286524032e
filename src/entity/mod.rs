pub mod bookings;
pub mod listings;
pub mod messages;
pub mod payments;
pub mod properties;
pub mod reviews;
pub mod users;

pub use bookings::Entity as Bookings;
pub use listings::Entity as Listings;
pub use messages::Entity as Messages;
pub use payments::Entity as Payments;
pub use properties::Entity as Properties;
pub use reviews::Entity as Reviews;
pub use users::Entity as Users;
