//! Core library for Staffbook.
//!
//! Everything the terminal front-end needs that is not about drawing:
//!
//! - `api`: the `EmployeeStore` trait and its REST implementation
//! - `models`: employee records and the last-action audit note
//! - `form`: explicit form state and client-side validation
//! - `cache`: non-authoritative local cache of the list and last action
//! - `config`: base URL and directory resolution

pub mod api;
pub mod cache;
pub mod config;
pub mod form;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError, EmployeeStore};
pub use cache::CacheManager;
pub use config::Config;
pub use form::{Field, FieldErrors, FormState};
pub use models::{Department, Employee, EmployeeId, EmployeeType, LastAction};
