//! Output formatting for test records

pub mod formatter;
pub mod stream;
