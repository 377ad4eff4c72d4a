//! Type definitions and aliases for the bot.
//!
//! This module contains shared types used throughout the application.

use crate::preferences::PreferenceStore;
use crate::sunnah::SunnahApi;

/// Bot application data shared across all commands.
///
/// This data is accessible in all command handlers through the context.
pub struct Data {
    /// HTTP client for making API requests
    pub http_client: reqwest::Client,
    /// Stored per-guild and per-user preferences
    pub preferences: PreferenceStore,
    /// sunnah.com API access
    pub sunnah: SunnahApi,
    /// Accent colour for embeds
    pub embed_colour: u32,
}

/// Error type for bot commands (maintains compatibility with poise).
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type alias for easier usage.
pub type Context<'a> = poise::Context<'a, Data, Error>;
