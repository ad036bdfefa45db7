//! Service layer for the car-doctor API.
//! - Repositories abstract the document store (MongoDB in production, in-memory for tests).
//! - Services apply the request-level rules (id parsing, body validation).
//! - `auth` issues and verifies bearer tokens.

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod errors;
