//! HMI Alarm Tag Conversion
//!
//! Alarm exports are XML files of triggers and messages. Each message becomes
//! a PLC tag address paired with its description, and the combined rows are
//! ordered and written to a spreadsheet.

pub mod domain;
pub use domain::{AlarmRow, Config, TagKey, TriggerIndex, TriggerInfo};

/// Loading export files, batch conversion, and workbook output.
pub mod storage;
pub use storage::{Conversion, ConversionReport, Document};
