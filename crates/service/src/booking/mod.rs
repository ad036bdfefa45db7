//! Bookings stored in the `checkout` collection.

pub mod repository;
pub mod service;

pub use service::BookingService;
