mod common;

use std::collections::{HashMap, HashSet};

use common::setup_state;
use rand::{SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use travel_rental_api::{
    entity::{bookings::BookingStatus, users::UserRole},
    routes::params::{
        BookingFilter, ListingFilter, MessageFilter, PaymentFilter, PropertyFilter, ReviewFilter,
        UserFilter,
    },
    seed::{self, SeedOptions, SeedSummary, installment_amount},
    services::{
        booking_service, listing_service, message_service, payment_service, property_service,
        review_service, user_service,
    },
    state::AppState,
};

async fn stored_counts(state: &AppState) -> anyhow::Result<SeedSummary> {
    Ok(SeedSummary {
        users: user_service::count_users(state, &UserFilter::default()).await? as usize,
        properties: property_service::count_properties(state, &PropertyFilter::default()).await?
            as usize,
        listings: listing_service::count_listings(state, &ListingFilter::default()).await? as usize,
        bookings: booking_service::count_bookings(state, &BookingFilter::default()).await? as usize,
        reviews: review_service::count_reviews(state, &ReviewFilter::default()).await? as usize,
        payments: payment_service::count_payments(state, &PaymentFilter::default()).await? as usize,
        messages: message_service::count_messages(state, &MessageFilter::default()).await? as usize,
    })
}

#[tokio::test]
async fn seeded_data_respects_every_rule() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let mut rng = StdRng::seed_from_u64(7);

    let summary = seed::run(&state, &mut rng, SeedOptions { clear: true }).await?;
    assert_eq!(summary, stored_counts(&state).await?);
    assert_eq!(summary.users, 14);
    assert_eq!(summary.properties, 10);
    assert_eq!(summary.listings, 5);
    assert!((20..=40).contains(&summary.bookings));

    let users = user_service::list_users(&state, &UserFilter::default()).await?;
    let admins: Vec<_> = users.iter().filter(|u| u.role == UserRole::Admin).collect();
    assert_eq!(admins.len(), 1);
    assert!(admins[0].is_superuser);
    assert_eq!(users.iter().filter(|u| u.role == UserRole::Host).count(), 5);
    assert_eq!(users.iter().filter(|u| u.role == UserRole::Guest).count(), 8);

    let properties = property_service::list_properties(&state, &PropertyFilter::default()).await?;
    let hosts: HashSet<_> = users
        .iter()
        .filter(|u| u.role == UserRole::Host)
        .map(|u| u.id)
        .collect();
    assert!(properties.iter().all(|p| hosts.contains(&p.host_id)));
    // Ten properties over five hosts, round-robin.
    let mut per_host: HashMap<_, usize> = HashMap::new();
    for property in &properties {
        *per_host.entry(property.host_id).or_default() += 1;
    }
    assert!(per_host.values().all(|&n| n == 2));

    let prices: HashMap<_, _> = properties.iter().map(|p| (p.id, p.price_per_night)).collect();
    let bookings = booking_service::list_bookings(&state, &BookingFilter::default()).await?;
    let today = chrono::Utc::now().date_naive();
    for booking in &bookings {
        let nights = booking.nights();
        assert!((1..=14).contains(&nights));
        assert!(booking.start_date > today - chrono::Duration::days(1));
        assert_eq!(booking.total_price, prices[&booking.property_id] * Decimal::from(nights));
    }
    for property in &properties {
        let count = bookings.iter().filter(|b| b.property_id == property.id).count();
        assert!((2..=4).contains(&count));
    }

    let reviews = review_service::list_reviews(&state, &ReviewFilter::default()).await?;
    let mut reviewers = HashSet::new();
    for review in &reviews {
        assert!((3..=5).contains(&review.rating));
        assert!(
            bookings
                .iter()
                .any(|b| b.property_id == review.property_id && b.user_id == review.user_id),
            "review author never booked the property"
        );
        assert!(reviewers.insert((review.user_id, review.property_id)));
    }

    let payments = payment_service::list_payments(&state, &PaymentFilter::default()).await?;
    for booking in &bookings {
        let paid: Vec<_> = payments.iter().filter(|p| p.booking_id == booking.id).collect();
        if booking.status != BookingStatus::Confirmed {
            assert!(paid.is_empty());
            continue;
        }
        match paid.len() {
            1 => assert_eq!(paid[0].amount, booking.total_price),
            2 => {
                let half = installment_amount(booking.total_price, 2);
                assert!(paid.iter().all(|p| p.amount == half));
            }
            n => panic!("confirmed booking has {n} payments"),
        }
    }

    let messages = message_service::list_messages(&state, &MessageFilter::default()).await?;
    let guests: HashSet<_> = users
        .iter()
        .filter(|u| u.role == UserRole::Guest)
        .map(|u| u.id)
        .collect();
    for message in &messages {
        let guest_to_host = guests.contains(&message.sender_id) && hosts.contains(&message.recipient_id);
        let host_to_guest = hosts.contains(&message.sender_id) && guests.contains(&message.recipient_id);
        assert!(guest_to_host || host_to_guest);
        assert!(!message.message_body.trim().is_empty());
    }
    for host in &hosts {
        let filter = MessageFilter {
            recipient_id: Some(*host),
            ..Default::default()
        };
        let partners: HashSet<_> = message_service::list_messages(&state, &filter)
            .await?
            .into_iter()
            .map(|m| m.sender_id)
            .collect();
        assert!((2..=4).contains(&partners.len()));
    }
    Ok(())
}

#[tokio::test]
async fn clearing_and_reseeding_with_the_same_seed_repeats_counts() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let first = seed::run(&state, &mut StdRng::seed_from_u64(42), SeedOptions { clear: true }).await?;
    let admin = user_service::find_user_by_email(&state, "admin@travelapp.com")
        .await?
        .expect("admin seeded");

    let second =
        seed::run(&state, &mut StdRng::seed_from_u64(42), SeedOptions { clear: true }).await?;
    assert_eq!(first, second);
    assert_eq!(stored_counts(&state).await?, second);

    // The superuser survives the wipe.
    let again = user_service::find_user_by_email(&state, "admin@travelapp.com")
        .await?
        .expect("admin kept");
    assert_eq!(again.id, admin.id);
    Ok(())
}

#[tokio::test]
async fn reseeding_without_clear_only_adds() -> anyhow::Result<()> {
    let state = setup_state().await?;

    seed::run(&state, &mut StdRng::seed_from_u64(1), SeedOptions::default()).await?;
    let before = stored_counts(&state).await?;
    let user_ids: HashSet<_> = user_service::list_users(&state, &UserFilter::default())
        .await?
        .into_iter()
        .map(|u| u.id)
        .collect();

    let second = seed::run(&state, &mut StdRng::seed_from_u64(2), SeedOptions::default()).await?;
    let after = stored_counts(&state).await?;

    // Users are reused by email; everything else accumulates.
    assert_eq!(after.users, before.users);
    assert_eq!(after.properties, before.properties + second.properties);
    assert_eq!(after.listings, before.listings + second.listings);
    assert_eq!(after.bookings, before.bookings + second.bookings);
    assert_eq!(after.reviews, before.reviews + second.reviews);
    assert_eq!(after.payments, before.payments + second.payments);
    assert_eq!(after.messages, before.messages + second.messages);

    let user_ids_after: HashSet<_> = user_service::list_users(&state, &UserFilter::default())
        .await?
        .into_iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(user_ids, user_ids_after);
    Ok(())
}

#[tokio::test]
async fn clear_keeps_only_superusers() -> anyhow::Result<()> {
    let state = setup_state().await?;
    seed::run(&state, &mut StdRng::seed_from_u64(3), SeedOptions::default()).await?;

    seed::clear_data(&state).await?;

    let counts = stored_counts(&state).await?;
    assert_eq!(
        counts,
        SeedSummary {
            users: 1,
            ..SeedSummary::default()
        }
    );
    Ok(())
}
