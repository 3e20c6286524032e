//! Sample-data generator.
//!
//! Phases run in dependency order (users, properties, listings, bookings,
//! reviews, payments, messages) through the repository services, so every
//! row passes the same validation the API applies. Randomness comes from the
//! caller's [`Rng`]; seeding it with a fixed value reproduces the same shape
//! of data. A failing phase aborts the run; earlier phases stay committed.

use std::{collections::HashSet, fmt};

use chrono::{Duration, Utc};
use rand::{Rng, seq::SliceRandom};
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    dto::{
        bookings::CreateBookingRequest, listings::CreateListingRequest,
        messages::CreateMessageRequest, payments::CreatePaymentRequest,
        properties::CreatePropertyRequest, reviews::CreateReviewRequest, users::CreateUserRequest,
    },
    entity::{
        Bookings, Listings, Messages, Payments, Properties, Reviews, Users,
        bookings::BookingStatus, payments::PaymentMethod, users, users::UserRole,
    },
    error::{AppError, AppResult},
    models::{Booking, Property, User},
    services::{
        booking_service, listing_service, message_service, payment_service, property_service,
        review_service, user_service,
    },
    state::AppState,
    validation,
};

pub mod fixtures;

use fixtures::Person;

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    /// Wipe everything except superusers before seeding.
    pub clear: bool,
}

/// Rows produced per entity by one run. `users` counts every seeded account,
/// including ones that already existed and were reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub users: usize,
    pub properties: usize,
    pub listings: usize,
    pub bookings: usize,
    pub reviews: usize,
    pub payments: usize,
    pub messages: usize,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "users={} properties={} listings={} bookings={} reviews={} payments={} messages={}",
            self.users,
            self.properties,
            self.listings,
            self.bookings,
            self.reviews,
            self.payments,
            self.messages
        )
    }
}

#[derive(Debug, Clone)]
pub struct SeededUsers {
    pub admin: User,
    pub hosts: Vec<User>,
    pub guests: Vec<User>,
}

impl SeededUsers {
    pub fn count(&self) -> usize {
        1 + self.hosts.len() + self.guests.len()
    }
}

pub async fn run<R: Rng>(
    state: &AppState,
    rng: &mut R,
    options: SeedOptions,
) -> AppResult<SeedSummary> {
    if options.clear {
        tracing::info!("clearing existing data");
        clear_data(state).await?;
    }

    tracing::info!("seeding database");
    let users = seed_users(state).await?;
    let properties = seed_properties(state, &users.hosts).await?;
    let listings = seed_listings(state).await?;
    let bookings = seed_bookings(state, rng, &properties, &users.guests).await?;
    let reviews = seed_reviews(state, rng, &properties, &bookings).await?;
    let payments = seed_payments(state, rng, &bookings).await?;
    let messages = seed_messages(state, rng, &users).await?;

    let summary = SeedSummary {
        users: users.count(),
        properties: properties.len(),
        listings,
        bookings: bookings.len(),
        reviews,
        payments,
        messages,
    };
    tracing::info!(%summary, "seeding finished");
    Ok(summary)
}

/// Deletes children before parents; superusers are kept.
pub async fn clear_data(state: &AppState) -> AppResult<()> {
    let txn = state.orm.begin().await?;
    let messages = Messages::delete_many().exec(&txn).await?.rows_affected;
    let payments = Payments::delete_many().exec(&txn).await?.rows_affected;
    let reviews = Reviews::delete_many().exec(&txn).await?.rows_affected;
    let bookings = Bookings::delete_many().exec(&txn).await?.rows_affected;
    let properties = Properties::delete_many().exec(&txn).await?.rows_affected;
    let listings = Listings::delete_many().exec(&txn).await?.rows_affected;
    let users = Users::delete_many()
        .filter(users::Column::IsSuperuser.eq(false))
        .exec(&txn)
        .await?
        .rows_affected;
    txn.commit().await?;

    tracing::info!(
        messages,
        payments,
        reviews,
        bookings,
        properties,
        listings,
        users,
        "existing data cleared"
    );
    Ok(())
}

pub async fn seed_users(state: &AppState) -> AppResult<SeededUsers> {
    let (first_name, last_name, email, phone) = fixtures::ADMIN;
    let admin = ensure_user(
        state,
        CreateUserRequest {
            username: fixtures::ADMIN_USERNAME.to_string(),
            email: email.to_string(),
            password: fixtures::ADMIN_PASSWORD.to_string(),
            phone_number: phone.to_string(),
            role: UserRole::Admin,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            is_superuser: true,
        },
    )
    .await?;

    let mut hosts = Vec::with_capacity(fixtures::HOSTS.len());
    for person in fixtures::HOSTS {
        hosts.push(ensure_user(state, member(person, UserRole::Host)).await?);
    }

    let mut guests = Vec::with_capacity(fixtures::GUESTS.len());
    for person in fixtures::GUESTS {
        guests.push(ensure_user(state, member(person, UserRole::Guest)).await?);
    }

    let users = SeededUsers {
        admin,
        hosts,
        guests,
    };
    tracing::info!(count = users.count(), admin = %users.admin.email, "users ready");
    Ok(users)
}

/// Reuses the account registered under the same email so reseeding without
/// `clear` does not trip the email uniqueness rule.
async fn ensure_user(state: &AppState, request: CreateUserRequest) -> AppResult<User> {
    if let Some(user) = user_service::find_user_by_email(state, &request.email).await? {
        if user.role != request.role {
            return Err(AppError::validation(
                "role",
                format!("{} already exists as {}", user.email, user.role),
            ));
        }
        tracing::debug!(email = %user.email, "user already present");
        return Ok(user);
    }
    user_service::create_user(state, request).await
}

fn member((first_name, last_name, email, phone): Person, role: UserRole) -> CreateUserRequest {
    CreateUserRequest {
        username: fixtures::username(first_name, last_name),
        email: email.to_string(),
        password: fixtures::DEFAULT_PASSWORD.to_string(),
        phone_number: phone.to_string(),
        role,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        is_superuser: false,
    }
}

/// Hosts are assigned round-robin.
pub async fn seed_properties(state: &AppState, hosts: &[User]) -> AppResult<Vec<Property>> {
    if hosts.is_empty() {
        return Err(AppError::validation("host_id", "no hosts to own properties"));
    }

    let mut properties = Vec::with_capacity(fixtures::PROPERTIES.len());
    for (i, (name, description, location, cents)) in fixtures::PROPERTIES.into_iter().enumerate() {
        let host = &hosts[i % hosts.len()];
        let property = property_service::create_property(
            state,
            CreatePropertyRequest {
                host_id: host.id,
                name: name.to_string(),
                description: description.to_string(),
                location: location.to_string(),
                price_per_night: validation::cents_to_money(cents),
            },
        )
        .await?;
        properties.push(property);
    }

    tracing::info!(count = properties.len(), "properties created");
    Ok(properties)
}

pub async fn seed_listings(state: &AppState) -> AppResult<usize> {
    let mut created = 0;
    for (title, description, cents) in fixtures::LISTINGS {
        listing_service::create_listing(
            state,
            CreateListingRequest {
                title: title.to_string(),
                description: description.to_string(),
                price: validation::cents_to_money(cents),
            },
        )
        .await?;
        created += 1;
    }

    tracing::info!(count = created, "listings created");
    Ok(created)
}

/// Two to four bookings per property, starting within the next 30 days and
/// lasting one to fourteen nights.
pub async fn seed_bookings<R: Rng>(
    state: &AppState,
    rng: &mut R,
    properties: &[Property],
    guests: &[User],
) -> AppResult<Vec<Booking>> {
    let today = Utc::now().date_naive();
    let mut bookings = Vec::new();

    for property in properties {
        let count = rng.gen_range(2..=4);
        for _ in 0..count {
            let guest = guests
                .choose(rng)
                .ok_or_else(|| AppError::validation("user_id", "no guests to book with"))?;
            let status = *BookingStatus::ALL
                .choose(rng)
                .unwrap_or(&BookingStatus::Pending);
            let start_date = today + Duration::days(rng.gen_range(1..=30));
            let end_date = start_date + Duration::days(rng.gen_range(1..=14));

            let booking = booking_service::create_booking(
                state,
                CreateBookingRequest {
                    property_id: property.id,
                    user_id: guest.id,
                    start_date,
                    end_date,
                    status,
                },
            )
            .await?;
            bookings.push(booking);
        }
    }

    tracing::info!(count = bookings.len(), "bookings created");
    Ok(bookings)
}

/// One to three attempts per property. Each attempt picks one of the
/// property's bookings and lets its guest review; properties without
/// bookings and repeat reviewers are skipped.
pub async fn seed_reviews<R: Rng>(
    state: &AppState,
    rng: &mut R,
    properties: &[Property],
    bookings: &[Booking],
) -> AppResult<usize> {
    let mut created = 0;

    for property in properties {
        let attempts = rng.gen_range(1..=3);
        let stays: Vec<&Booking> = bookings
            .iter()
            .filter(|b| b.property_id == property.id)
            .collect();
        let mut reviewed: HashSet<Uuid> = HashSet::new();

        for _ in 0..attempts {
            let Some(booking) = stays.choose(rng) else {
                continue;
            };
            if !reviewed.insert(booking.user_id) {
                continue;
            }
            let rating = rng.gen_range(3..=5);
            let comment = fixtures::REVIEW_COMMENTS
                .choose(rng)
                .copied()
                .unwrap_or(fixtures::REVIEW_COMMENTS[0]);

            review_service::create_review(
                state,
                CreateReviewRequest {
                    property_id: property.id,
                    user_id: booking.user_id,
                    rating,
                    comment: comment.to_string(),
                },
            )
            .await?;
            created += 1;
        }
    }

    tracing::info!(count = created, "reviews created");
    Ok(created)
}

/// Confirmed bookings only: either one payment of the full total or two
/// payments of half each.
pub async fn seed_payments<R: Rng>(
    state: &AppState,
    rng: &mut R,
    bookings: &[Booking],
) -> AppResult<usize> {
    let mut created = 0;

    for booking in bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
    {
        let installments = rng.gen_range(1..=2);
        let amount = installment_amount(booking.total_price, installments);
        for _ in 0..installments {
            let payment_method = *PaymentMethod::ALL
                .choose(rng)
                .unwrap_or(&PaymentMethod::CreditCard);
            payment_service::create_payment(
                state,
                CreatePaymentRequest {
                    booking_id: booking.id,
                    amount,
                    payment_method,
                },
            )
            .await?;
            created += 1;
        }
    }

    tracing::info!(count = created, "payments created");
    Ok(created)
}

pub fn installment_amount(total: Decimal, installments: u32) -> Decimal {
    if installments > 1 {
        (total * Decimal::new(5, 1))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    } else {
        total
    }
}

/// Each host talks to two to four distinct guests, two to four rounds each.
/// The guest always writes; the host answers two times out of three.
pub async fn seed_messages<R: Rng>(
    state: &AppState,
    rng: &mut R,
    users: &SeededUsers,
) -> AppResult<usize> {
    let mut created = 0;

    for host in &users.hosts {
        let wanted = rng.gen_range(2..=4).min(users.guests.len());
        let partners: Vec<&User> = users.guests.choose_multiple(rng, wanted).collect();

        for guest in partners {
            let rounds = rng.gen_range(2..=4);
            for _ in 0..rounds {
                let body = fixtures::GUEST_MESSAGES
                    .choose(rng)
                    .copied()
                    .unwrap_or(fixtures::GUEST_MESSAGES[0]);
                send(state, guest.id, host.id, body.to_string()).await?;
                created += 1;

                if rng.gen_ratio(2, 3) {
                    let closing = fixtures::HOST_REPLY_CLOSINGS
                        .choose(rng)
                        .copied()
                        .unwrap_or(fixtures::HOST_REPLY_CLOSINGS[0]);
                    let reply = format!("{} {}", fixtures::HOST_REPLY_PREFIX, closing);
                    send(state, host.id, guest.id, reply).await?;
                    created += 1;
                }
            }
        }
    }

    tracing::info!(count = created, "messages created");
    Ok(created)
}

async fn send(
    state: &AppState,
    sender_id: Uuid,
    recipient_id: Uuid,
    message_body: String,
) -> AppResult<()> {
    message_service::create_message(
        state,
        CreateMessageRequest {
            sender_id,
            recipient_id,
            message_body,
        },
    )
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn two_installments_split_the_total() {
        let total = Decimal::from_str("750.00").unwrap();
        assert_eq!(installment_amount(total, 2), Decimal::from_str("375.00").unwrap());
        assert_eq!(installment_amount(total, 1), total);
    }

    #[test]
    fn odd_cent_totals_round_half_away_from_zero() {
        let total = Decimal::from_str("100.01").unwrap();
        assert_eq!(installment_amount(total, 2), Decimal::from_str("50.01").unwrap());
    }

    #[test]
    fn usernames_are_lowercase_dotted() {
        assert_eq!(fixtures::username("Sarah", "Johnson"), "sarah.johnson");
    }

    #[test]
    fn summary_display_lists_every_entity() {
        let summary = SeedSummary {
            users: 14,
            properties: 10,
            listings: 5,
            bookings: 30,
            reviews: 17,
            payments: 12,
            messages: 40,
        };
        assert_eq!(
            summary.to_string(),
            "users=14 properties=10 listings=5 bookings=30 reviews=17 payments=12 messages=40"
        );
    }
}
