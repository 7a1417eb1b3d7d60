//! Domain models for alarm tag conversion.
//!
//! This module contains the pure parts of the conversion: trigger lookup,
//! tag reconstruction, description cleanup, and row ordering. Nothing here
//! performs I/O.

mod alarm_row;
pub use alarm_row::AlarmRow;

mod config;
pub use config::{CONFIG_FILE_NAME, Config};

mod description;
pub use description::normalize_description;

/// Sort keys and the total order over alarm rows.
pub mod ordering;
pub use ordering::{TagKey, sort_rows};

/// Tag reconstruction from trigger expressions.
pub mod tag;
pub use tag::build_tag;

mod trigger;
pub use trigger::{TriggerIndex, TriggerInfo};
