//! Document-level types for the car-doctor store: id parsing, BSON/JSON
//! rendering, write acknowledgments and the MongoDB connection.

pub mod ack;
pub mod booking;
pub mod catalog;
pub mod db;
pub mod document;
pub mod errors;

pub use mongodb::bson;
