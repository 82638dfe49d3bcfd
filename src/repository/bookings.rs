//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails, BookingStatus},
        item::ItemShort,
        user::User,
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           i.id as item_id, i.name as item_name, i.owner_id,
           u.id as booker_id, u.name as booker_name, u.email as booker_email
    FROM bookings b
    JOIN items i ON b.item_id = i.id
    JOIN users u ON b.booker_id = u.id
"#;

fn details_from_row(row: &sqlx::postgres::PgRow) -> BookingDetails {
    BookingDetails {
        id: row.get("id"),
        start: row.get("start_date"),
        end: row.get("end_date"),
        status: row.get("status"),
        item: ItemShort {
            id: row.get("item_id"),
            name: row.get("item_name"),
            owner_id: row.get("owner_id"),
        },
        booker: User {
            id: row.get("booker_id"),
            name: row.get("booker_name"),
            email: row.get("booker_email"),
        },
    }
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "SELECT id, start_date, end_date, item_id, booker_id, status FROM bookings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Get booking by ID with item and booker details
    pub async fn get_details_by_id(&self, id: i32) -> AppResult<BookingDetails> {
        let row = sqlx::query(&format!("{} WHERE b.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;
        Ok(details_from_row(&row))
    }

    /// List bookings made by a user, most recent first
    pub async fn list_by_booker(&self, booker_id: i32) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query(&format!(
            "{} WHERE b.booker_id = $1 ORDER BY b.start_date DESC",
            DETAILS_SELECT
        ))
        .bind(booker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(details_from_row).collect())
    }

    /// List bookings on items owned by a user, most recent first
    pub async fn list_by_owner(&self, owner_id: i32) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query(&format!(
            "{} WHERE i.owner_id = $1 ORDER BY b.start_date DESC",
            DETAILS_SELECT
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(details_from_row).collect())
    }

    /// Create a booking in WAITING status.
    ///
    /// The item row is locked for the duration of the transaction, so the
    /// overlap check and the insert are atomic with respect to concurrent
    /// bookings and approvals of the same item.
    pub async fn create(
        &self,
        item_id: i32,
        booker_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT 1 FROM items WHERE id = $1 FOR UPDATE")
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        let overlaps: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE item_id = $1 AND status = 'APPROVED'
                  AND start_date < $3 AND end_date > $2
            )
            "#,
        )
        .bind(item_id)
        .bind(start)
        .bind(end)
        .fetch_one(&mut *tx)
        .await?;

        if overlaps {
            return Err(AppError::BusinessRule(
                "Item is already booked for this period".to_string(),
            ));
        }

        let booking = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (start_date, end_date, item_id, booker_id, status)
            VALUES ($1, $2, $3, $4, 'WAITING')
            RETURNING id, start_date, end_date, item_id, booker_id, status
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(item_id)
        .bind(booker_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Atomically decide a WAITING booking.
    ///
    /// The item row is locked first, then the overlap check (for approvals)
    /// and the status update run in the same transaction. The update only
    /// matches a WAITING row, so a booking transitions at most once; a row
    /// decided by a concurrent caller surfaces as a business rule error.
    pub async fn decide(&self, booking: &Booking, status: BookingStatus) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT 1 FROM items WHERE id = $1 FOR UPDATE")
            .bind(booking.item_id)
            .execute(&mut *tx)
            .await?;

        if status == BookingStatus::Approved {
            let overlaps: bool = sqlx::query_scalar(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM bookings
                    WHERE item_id = $1 AND id != $2 AND status = 'APPROVED'
                      AND start_date < $4 AND end_date > $3
                )
                "#,
            )
            .bind(booking.item_id)
            .bind(booking.id)
            .bind(booking.start_date)
            .bind(booking.end_date)
            .fetch_one(&mut *tx)
            .await?;

            if overlaps {
                return Err(AppError::BusinessRule(
                    "An approved booking already covers this period".to_string(),
                ));
            }
        }

        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings SET status = $1
            WHERE id = $2 AND status = 'WAITING'
            RETURNING id, start_date, end_date, item_id, booker_id, status
            "#,
        )
        .bind(status)
        .bind(booking.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::BusinessRule(format!("Booking {} has already been decided", booking.id))
        })?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a booking by ID
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Check whether a user has ever booked an item
    pub async fn exists_for_item_and_booker(&self, item_id: i32, booker_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM bookings WHERE item_id = $1 AND booker_id = $2)",
        )
        .bind(item_id)
        .bind(booker_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Check whether a user has a booking of an item that ended before `now`
    pub async fn ended_exists_for_item_and_booker(
        &self,
        item_id: i32,
        booker_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE item_id = $1 AND booker_id = $2 AND end_date < $3
            )
            "#,
        )
        .bind(item_id)
        .bind(booker_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// End of the most recent APPROVED booking started before `now`
    pub async fn last_booking_end(
        &self,
        item_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Option<DateTime<Utc>>> {
        let end: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT end_date FROM bookings
            WHERE item_id = $1 AND status = 'APPROVED' AND start_date < $2
            ORDER BY end_date DESC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(end)
    }

    /// Start of the nearest APPROVED booking starting after `now`
    pub async fn next_booking_start(
        &self,
        item_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Option<DateTime<Utc>>> {
        let start: Option<DateTime<Utc>> = sqlx::query_scalar(
            r#"
            SELECT start_date FROM bookings
            WHERE item_id = $1 AND status = 'APPROVED' AND start_date > $2
            ORDER BY start_date ASC
            LIMIT 1
            "#,
        )
        .bind(item_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        Ok(start)
    }
}
