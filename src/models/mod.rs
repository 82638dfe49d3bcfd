//! Data models for ShareIt

pub mod booking;
pub mod comment;
pub mod item;
pub mod request;
pub mod user;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails, BookingStatus};
pub use comment::CommentDetails;
pub use item::{Item, ItemDetails, ItemShort};
pub use request::{ItemRequest, ItemRequestDetails};
pub use user::User;
