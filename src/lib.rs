//! minbar library.
//!
//! This library provides the core functionality for the minbar Discord bot:
//! Qur'an verses and tafsir, hadith lookup, prayer times, the Hijri calendar
//! and duas, with per-guild and per-user preferences.

pub mod aladhan;
pub mod bot;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod hisnulmuslim;
pub mod pagination;
pub mod preferences;
pub mod quran_com;
pub mod reference;
pub mod resolver;
pub mod sunnah;
pub mod surah;
pub mod tafsir;
pub mod tafsir_app;
pub mod types;
pub mod utils;

pub use config::Config;
pub use error::{MinbarError, Result};
