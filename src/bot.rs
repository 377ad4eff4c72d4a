//! Bot startup and framework wiring.

use poise::serenity_prelude as serenity;
use tracing_subscriber::EnvFilter;

use crate::commands::{dua, hadith, hijri, prayer, quran, tafsir};
use crate::config::Config;
use crate::database::{self, PreferenceRepository};
use crate::preferences::PreferenceStore;
use crate::sunnah::SunnahApi;
use crate::types::Data;

pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize DB (creates file and tables if needed)
    database::init_db(&config.db_path).await?;

    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                quran::quran(),
                quran::aquran(),
                quran::rquran(),
                quran::raquran(),
                quran::surah(),
                quran::set_translation(),
                hadith::hadith(),
                hadith::ahadith(),
                hadith::rhadith(),
                tafsir::tafsir(),
                tafsir::atafsir(),
                tafsir::set_tafsir(),
                tafsir::set_arabic_tafsir(),
                prayer::prayertimes(),
                prayer::set_calculation_method(),
                prayer::methodlist(),
                dua::dua(),
                dua::rdua(),
                dua::dualist(),
                hijri::hijridate(),
                hijri::convert_to_hijri(),
                hijri::convert_from_hijri(),
            ],
            ..Default::default()
        })
        .setup({
            let config = config.clone();
            move |context, _ready, framework| {
                Box::pin(async move {
                    poise::builtins::register_globally(context, &framework.options().commands)
                        .await?;
                    tracing::info!("commands registered, bot ready");
                    Ok(Data {
                        http_client: reqwest::Client::new(),
                        preferences: PreferenceStore::new(PreferenceRepository::new(
                            config.db_path.clone(),
                        )),
                        sunnah: SunnahApi::new(config.sunnah_api_key.clone()),
                        embed_colour: config.embed_colour,
                    })
                })
            }
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;

    Ok(())
}
