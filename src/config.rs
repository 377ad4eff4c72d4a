//! Configuration management for minbar.
//!
//! This module handles loading and validating environment variables and application settings.

use crate::error::{MinbarError, Result};
use std::env;

/// Embed accent colour used when EMBED_COLOUR is not set.
const DEFAULT_EMBED_COLOUR: u32 = 0x467f05;

/// Configuration for the application, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,
    /// Path to SQLite database file
    pub db_path: String,
    /// API key for api.sunnah.com
    pub sunnah_api_key: String,
    /// Accent colour for embeds
    pub embed_colour: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This will attempt to load a .env file if present using dotenv,
    /// then read required environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required environment variable is missing or invalid.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (ignore errors - it's optional)
        dotenv::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| MinbarError::Config(
                "Missing DISCORD_TOKEN environment variable. Set it in your environment or create a .env file (never commit this file).".to_string()
            ))?;

        let db_path = Self::get_db_path()?;

        let sunnah_api_key = env::var("SUNNAH_API_KEY")
            .map_err(|_| MinbarError::Config(
                "Missing SUNNAH_API_KEY environment variable. Request a key at https://sunnah.com/developers and set it in your environment or .env file.".to_string()
            ))?;

        let embed_colour = Self::get_embed_colour()?;

        Ok(Self {
            discord_token,
            db_path,
            sunnah_api_key,
            embed_colour,
        })
    }

    /// Get the database path from environment or use default.
    fn get_db_path() -> Result<String> {
        match env::var("DB_PATH") {
            Ok(path) => Ok(path),
            Err(_) => {
                let mut path = env::current_dir()
                    .map_err(|e| MinbarError::Config(
                        format!("Failed to determine current directory: {}", e)
                    ))?;

                path.push("data");
                path.push("minbar.db");

                path.into_os_string()
                    .into_string()
                    .map_err(|os_str| MinbarError::Config(
                        format!("Database path contains invalid Unicode: {:?}", os_str)
                    ))
            }
        }
    }

    /// Parse EMBED_COLOUR as hex ("467f05" or "#467f05") or fall back to the
    /// default.
    fn get_embed_colour() -> Result<u32> {
        match env::var("EMBED_COLOUR") {
            Ok(text) => {
                let trimmed = text.trim().trim_start_matches('#');
                u32::from_str_radix(trimmed, 16).map_err(|_| {
                    MinbarError::Config(format!(
                        "Invalid EMBED_COLOUR '{}'. Expected a hex colour like 467f05.",
                        text
                    ))
                })
            }
            Err(_) => Ok(DEFAULT_EMBED_COLOUR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_get_db_path_with_env_var() {
        // Save original value (if any)
        let original_value = env::var("DB_PATH").ok();

        // Set custom path
        let custom_path = "/custom/path/to/database.db";
        env::set_var("DB_PATH", custom_path);

        let result = Config::get_db_path();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), custom_path);

        // Restore original value
        match original_value {
            Some(val) => env::set_var("DB_PATH", val),
            None => env::remove_var("DB_PATH"),
        }
    }

    #[test]
    fn test_get_db_path_default() {
        // Save original value (if any)
        let original_value = env::var("DB_PATH").ok();

        env::remove_var("DB_PATH");

        let result = Config::get_db_path();
        assert!(result.is_ok());

        let path = result.unwrap();
        assert!(path.ends_with("data/minbar.db") || path.ends_with("data\\minbar.db"));

        // Restore original value
        if let Some(val) = original_value {
            env::set_var("DB_PATH", val);
        }
    }

    #[test]
    fn test_get_embed_colour() {
        let original_value = env::var("EMBED_COLOUR").ok();

        env::remove_var("EMBED_COLOUR");
        assert_eq!(Config::get_embed_colour().unwrap(), DEFAULT_EMBED_COLOUR);

        env::set_var("EMBED_COLOUR", "#72bcd4");
        assert_eq!(Config::get_embed_colour().unwrap(), 0x72bcd4);

        env::set_var("EMBED_COLOUR", "not-a-colour");
        assert!(Config::get_embed_colour().is_err());

        match original_value {
            Some(val) => env::set_var("EMBED_COLOUR", val),
            None => env::remove_var("EMBED_COLOUR"),
        }
    }
}
