//! Utility modules.

pub mod arabic;
