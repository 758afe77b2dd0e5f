//! BeWell tools module
//!
//! Record logging and summary operations consumed by the CLI.

pub mod logging;
pub mod summary;
