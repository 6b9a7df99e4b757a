//! Data models for the employee collection.
//!
//! - `Employee`: one record as the remote store sends and receives it
//! - `Department`, `EmployeeType`: coded choices with display labels
//! - `LastAction`: the audit note left in the local cache after a mutation

pub mod employee;
pub mod last_action;

pub use employee::{iso_date, parse_date, rating_label, Department, Employee, EmployeeId, EmployeeType};
pub use last_action::LastAction;
