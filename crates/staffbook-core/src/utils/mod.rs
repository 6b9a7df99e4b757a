//! Display helpers shared by the list and the detail panel.

pub mod format;

pub use format::{age_display, cmp_ignore_case, format_date, format_phone, truncate};
