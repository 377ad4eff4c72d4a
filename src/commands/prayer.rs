//! Prayer time commands backed by aladhan.com.

use poise::serenity_prelude as serenity;

use crate::aladhan;
use crate::commands::{base_embed, reply_error};
use crate::preferences::PreferenceKind;
use crate::types::{Context, Error};

const ICON: &str = "https://images-na.ssl-images-amazon.com/images/I/51q8CGXOltL.png";

/// Get prayer times for a location.
#[poise::command(slash_command)]
pub async fn prayertimes(
    context: Context<'_>,
    #[description = "The city or address, e.g. London or Makkah, Saudi Arabia"] location: String,
    #[description = "Calculation method number to use instead of your default"]
    calculation_method: Option<u8>,
) -> Result<(), Error> {
    context.defer().await?;

    let method = match calculation_method {
        Some(id) => match aladhan::validate_method(&id.to_string()) {
            Ok(id) => id,
            Err(err) => return reply_error(context, &err).await,
        },
        None => {
            let stored = context
                .data()
                .preferences
                .get(PreferenceKind::CalculationMethod, Some(context.author().id.get()))
                .await;
            match aladhan::validate_method(&stored) {
                Ok(id) => id,
                Err(err) => return reply_error(context, &err).await,
            }
        }
    };

    let times =
        match aladhan::fetch_prayer_times(&context.data().http_client, &location, method).await {
            Ok(times) => times,
            Err(err) => return reply_error(context, &err).await,
        };

    let method_label = aladhan::method_name(method).unwrap_or("Unknown");

    let embed = base_embed(context)
        .author(
            serenity::CreateEmbedAuthor::new(format!("Prayer Times for {}", location))
                .icon_url(ICON),
        )
        .title(times.date.clone())
        .field("**Imsak (إِمْسَاك)**", &times.imsak, true)
        .field("**Fajr (صلاة الفجر)**", &times.fajr, true)
        .field("**Sunrise (طلوع الشمس)**", &times.sunrise, true)
        .field("**Dhuhr (صلاة الظهر)**", &times.dhuhr, true)
        .field("**Asr (صلاة العصر)**", &times.asr, true)
        .field("**Asr - Hanafi (صلاة العصر - حنفي)**", &times.hanafi_asr, true)
        .field("**Maghrib (صلاة المغرب)**", &times.maghrib, true)
        .field("**Isha (صلاة العشاء)**", &times.isha, true)
        .field("**Midnight (منتصف الليل)**", &times.midnight, true)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Calculation Method: {}",
            method_label
        )));

    context
        .send(poise::CreateReply::default().embed(embed))
        .await?;
    Ok(())
}

/// Set your default prayer-time calculation method.
#[poise::command(slash_command, rename = "setcalculationmethod")]
pub async fn set_calculation_method(
    context: Context<'_>,
    #[description = "The method number, see /methodlist"] method: u8,
) -> Result<(), Error> {
    match context
        .data()
        .preferences
        .set(
            PreferenceKind::CalculationMethod,
            context.author().id.get(),
            &method.to_string(),
        )
        .await
    {
        Ok(stored) => {
            let name = stored
                .parse::<u8>()
                .ok()
                .and_then(aladhan::method_name)
                .unwrap_or("Unknown");
            context
                .say(format!(
                    "✅ Successfully set your calculation method to **{}**.",
                    name
                ))
                .await?;
        }
        Err(err) => return reply_error(context, &err).await,
    }
    Ok(())
}

/// List the available prayer-time calculation methods.
#[poise::command(slash_command)]
pub async fn methodlist(context: Context<'_>) -> Result<(), Error> {
    let mut description = String::new();
    for (id, name) in aladhan::CALCULATION_METHODS {
        description.push_str(&format!("**{}** - {}\n", id, name));
    }

    let embed = base_embed(context)
        .author(serenity::CreateEmbedAuthor::new("Calculation Methods").icon_url(ICON))
        .description(description);

    context
        .send(poise::CreateReply::default().embed(embed))
        .await?;
    Ok(())
}
