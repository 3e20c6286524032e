#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database};
use travel_rental_api::{
    db::run_migrations,
    dto::{properties::CreatePropertyRequest, users::CreateUserRequest},
    entity::users::UserRole,
    models::{Property, User},
    services::{property_service, user_service},
    state::AppState,
};
use uuid::Uuid;

/// Fresh in-memory database with the schema applied. One pooled connection,
/// since every sqlite `:memory:` connection opens its own database.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let orm = Database::connect(options).await?;
    run_migrations(&orm).await?;
    Ok(AppState::new(orm))
}

pub fn new_user(role: UserRole) -> CreateUserRequest {
    let tag = Uuid::new_v4().simple().to_string();
    CreateUserRequest {
        username: format!("{role}.{}", &tag[..12]),
        email: format!("{role}.{}@example.com", &tag[..12]),
        password: "password123".into(),
        phone_number: "+1000000000".into(),
        role,
        first_name: "Test".into(),
        last_name: role.to_string(),
        is_superuser: false,
    }
}

pub async fn create_user(state: &AppState, role: UserRole) -> anyhow::Result<User> {
    Ok(user_service::create_user(state, new_user(role)).await?)
}

pub async fn create_property(
    state: &AppState,
    host_id: Uuid,
    price_per_night: &str,
) -> anyhow::Result<Property> {
    let property = property_service::create_property(
        state,
        CreatePropertyRequest {
            host_id,
            name: "Urban Loft".into(),
            description: "Modern loft in the heart of downtown".into(),
            location: "New York, NY".into(),
            price_per_night: price_per_night.parse::<Decimal>()?,
        },
    )
    .await?;
    Ok(property)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn money(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}
