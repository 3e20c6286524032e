use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{bookings::BookingStatus, users::UserRole},
    error::AppError,
};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    pub fn normalize(&self) -> (u64, u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        // Stores take a signed 64-bit OFFSET.
        let offset = (page - 1).saturating_mul(per_page).min(i64::MAX as u64);
        (page, per_page, offset)
    }

    /// `None` when neither field was given: the caller wants every row.
    pub fn window(&self) -> Option<(u64, u64, u64)> {
        if self.page.is_none() && self.per_page.is_none() {
            None
        } else {
            Some(self.normalize())
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub pagination: Pagination,
    pub role: Option<UserRole>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub pagination: Pagination,
    pub host_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub pagination: Pagination,
    /// Case-insensitive substring of title or description.
    pub q: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListingListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub q: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl From<ListingListQuery> for ListingFilter {
    fn from(query: ListingListQuery) -> Self {
        ListingFilter {
            pagination: Pagination {
                page: query.page,
                per_page: query.per_page,
            },
            q: query.q.filter(|q| !q.is_empty()),
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub pagination: Pagination,
    pub property_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn for_property(property_id: Uuid) -> Self {
        Self {
            property_id: Some(property_id),
            ..Self::default()
        }
    }
}

/// Query-string form of [`BookingFilter`]; `status` arrives as free text.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BookingListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub property_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub status: Option<String>,
}

impl TryFrom<BookingListQuery> for BookingFilter {
    type Error = AppError;

    fn try_from(query: BookingListQuery) -> Result<Self, Self::Error> {
        let status = query
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::parse::<BookingStatus>)
            .transpose()?;
        Ok(BookingFilter {
            pagination: Pagination {
                page: query.page,
                per_page: query.per_page,
            },
            property_id: query.property_id,
            user_id: query.user_id,
            status,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub pagination: Pagination,
    pub property_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub pagination: Pagination,
    pub booking_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    pub pagination: Pagination,
    pub sender_id: Option<Uuid>,
    pub recipient_id: Option<Uuid>,
    /// Matches messages where the user is on either side.
    pub participant_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));
        assert_eq!(Pagination::new(3, 500).normalize(), (3, 100, 200));
        assert_eq!(Pagination::new(0, 0).normalize(), (1, 1, 0));
    }

    #[test]
    fn huge_page_saturates_offset() {
        assert_eq!(
            Pagination::new(u64::MAX, 100).normalize(),
            (u64::MAX, 100, i64::MAX as u64)
        );
    }

    #[test]
    fn absent_pagination_means_unbounded() {
        assert!(Pagination::default().window().is_none());
        assert_eq!(
            Pagination {
                page: Some(2),
                per_page: None
            }
            .window(),
            Some((2, 20, 20))
        );
    }

    #[test]
    fn booking_query_status_is_validated() {
        let query = BookingListQuery {
            page: None,
            per_page: None,
            property_id: None,
            user_id: None,
            status: Some("approved".into()),
        };
        match BookingFilter::try_from(query) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "status"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn booking_query_empty_status_is_ignored() {
        let query = BookingListQuery {
            page: None,
            per_page: None,
            property_id: None,
            user_id: None,
            status: Some(String::new()),
        };
        assert!(BookingFilter::try_from(query).unwrap().status.is_none());
    }
}
