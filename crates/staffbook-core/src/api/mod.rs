//! Remote store client for the employee collection.
//!
//! `EmployeeStore` is the seam the view talks to. `ApiClient` implements it
//! over plain REST: one collection resource, JSON bodies, one request per
//! call.

pub mod client;
pub mod error;

pub use client::{ApiClient, EmployeeStore};
pub use error::ApiError;
