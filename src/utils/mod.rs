// Utility functions
pub mod crypto;
pub mod error;
pub mod secure_url;

pub use error::*;
