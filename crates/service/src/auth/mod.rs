//! Bearer-token auth: claims, token issuing/verification and the listing policy.

pub mod errors;
pub mod policy;
pub mod token;

pub use errors::AuthError;
pub use token::{Claims, TokenService};
