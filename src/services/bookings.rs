//! Booking workflow service
//!
//! Owns the WAITING -> APPROVED/REJECTED state machine and the role checks
//! around it. Roles are not persisted: ownership and bookership are derived
//! from foreign keys at request time.

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingDetails, BookingStatus, CreateBooking},
    repository::Repository,
};

/// True when the caller owns the item behind the booking
fn is_owner(item_owner_id: i32, caller_id: i32) -> bool {
    item_owner_id == caller_id
}

/// True when the caller placed the booking
fn is_booker(booking_booker_id: i32, caller_id: i32) -> bool {
    booking_booker_id == caller_id
}

/// Target status for an approval decision
fn decided_status(approved: bool) -> BookingStatus {
    if approved {
        BookingStatus::Approved
    } else {
        BookingStatus::Rejected
    }
}

/// Reject bookings with an empty or inverted time window
fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
    if start >= end {
        return Err(AppError::Validation(
            "Booking start must be before its end".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List bookings made by a user
    pub async fn get_user_bookings(&self, user_id: i32) -> AppResult<Vec<BookingDetails>> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.bookings.list_by_booker(user_id).await
    }

    /// List bookings on items the user owns
    pub async fn get_owner_bookings(&self, user_id: i32) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.bookings.list_by_owner(user_id).await
    }

    /// Get a booking, visible only to the booker or the item's owner
    pub async fn get_booking(&self, booking_id: i32, caller_id: i32) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_details_by_id(booking_id).await?;
        if is_booker(booking.booker.id, caller_id) || is_owner(booking.item.owner_id, caller_id) {
            Ok(booking)
        } else {
            Err(AppError::Authorization(
                "Only the booker or the item's owner may view a booking".to_string(),
            ))
        }
    }

    /// Create a booking in WAITING status
    pub async fn create_booking(
        &self,
        booking: CreateBooking,
        caller_id: i32,
    ) -> AppResult<BookingDetails> {
        validate_window(booking.start, booking.end)?;

        self.repository.users.get_by_id(caller_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        if is_owner(item.owner_id, caller_id) {
            return Err(AppError::NotFound(format!(
                "Item with id {} not bookable by its owner",
                item.id
            )));
        }
        if !item.available {
            return Err(AppError::BusinessRule(
                "Item is not available for booking".to_string(),
            ));
        }

        let created = self
            .repository
            .bookings
            .create(item.id, caller_id, booking.start, booking.end)
            .await?;
        tracing::info!(
            "Booking {} created: item={} booker={} [{} .. {}]",
            created.id,
            created.item_id,
            created.booker_id,
            created.start_date,
            created.end_date
        );
        self.repository.bookings.get_details_by_id(created.id).await
    }

    /// Approve or reject a WAITING booking; only the item's owner may decide
    pub async fn decide_booking(
        &self,
        booking_id: i32,
        approved: bool,
        caller_id: i32,
    ) -> AppResult<BookingDetails> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        let item = self.repository.items.get_by_id(booking.item_id).await?;

        if !is_owner(item.owner_id, caller_id) {
            return Err(AppError::Authorization(
                "Only the item's owner may approve or reject a booking".to_string(),
            ));
        }

        // The WAITING guard and the overlap check for approvals run
        // atomically in the repository
        let updated = self
            .repository
            .bookings
            .decide(&booking, decided_status(approved))
            .await?;
        tracing::info!("Booking {} decided: {:?}", booking_id, updated.status);
        self.repository.bookings.get_details_by_id(booking_id).await
    }

    /// Cancel a booking; only the booker may do so
    pub async fn delete_booking(&self, booking_id: i32, caller_id: i32) -> AppResult<()> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        if !is_booker(booking.booker_id, caller_id) {
            return Err(AppError::Authorization(
                "Only the booker may cancel a booking".to_string(),
            ));
        }
        self.repository.bookings.delete(booking_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn test_role_derivation() {
        assert!(is_owner(2, 2));
        assert!(!is_owner(2, 99));
        assert!(is_booker(1, 1));
        assert!(!is_booker(1, 2));
    }

    #[test]
    fn test_decided_status() {
        assert_eq!(decided_status(true), BookingStatus::Approved);
        assert_eq!(decided_status(false), BookingStatus::Rejected);
    }

    #[test]
    fn test_validate_window() {
        assert!(validate_window(at(10), at(12)).is_ok());
        assert!(validate_window(at(12), at(10)).is_err());
        assert!(validate_window(at(10), at(10)).is_err());
    }
}
