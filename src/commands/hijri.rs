//! Hijri calendar commands.

use poise::serenity_prelude as serenity;

use crate::aladhan::{self, HijriDate};
use crate::commands::{base_embed, reply_error};
use crate::types::{Context, Error};
use crate::utils::arabic::to_arabic_digits;

const ICON: &str =
    "https://icons.iconarchive.com/icons/paomedia/small-n-flat/512/calendar-icon.png";

/// Get the current Hijri date.
#[poise::command(slash_command)]
pub async fn hijridate(context: Context<'_>) -> Result<(), Error> {
    context.defer().await?;

    let hijri = match aladhan::today_hijri(&context.data().http_client).await {
        Ok(hijri) => hijri,
        Err(err) => return reply_error(context, &err).await,
    };

    let embed = base_embed(context)
        .author(serenity::CreateEmbedAuthor::new("Today's Hijri Date").icon_url(ICON))
        .description(format!(
            "{} {} {} AH",
            hijri.day, hijri.month_en, hijri.year
        ));

    context
        .send(poise::CreateReply::default().embed(embed))
        .await?;
    Ok(())
}

/// Convert a Gregorian date to a Hijri date.
#[poise::command(slash_command, rename = "converttohijri")]
pub async fn convert_to_hijri(
    context: Context<'_>,
    #[description = "The day, e.g. 1, 31"]
    #[min = 1]
    #[max = 31]
    day: u8,
    #[description = "The month, e.g. 1 for January, 12 for December"]
    #[min = 1]
    #[max = 12]
    month: u8,
    #[description = "The year, e.g. 2026"]
    #[min = 1924]
    #[max = 2077]
    year: u16,
) -> Result<(), Error> {
    context.defer().await?;

    let date = format!("{:02}-{:02}-{}", day, month, year);
    let hijri = match aladhan::to_hijri(&context.data().http_client, &date).await {
        Ok(hijri) => hijri,
        Err(err) => return reply_error(context, &err).await,
    };

    let embed = base_embed(context)
        .author(serenity::CreateEmbedAuthor::new("Gregorian → Hijri Conversion").icon_url(ICON))
        .description(format!(
            "{} is **{} {}, {} AH**.\n\nالتاريخ الهجري: __**{}**__",
            date,
            hijri.month_en,
            hijri.day,
            hijri.year,
            arabic_date_line(&hijri)
        ));

    context
        .send(poise::CreateReply::default().embed(embed))
        .await?;
    Ok(())
}

/// Convert a Hijri date to a Gregorian date.
#[poise::command(slash_command, rename = "convertfromhijri")]
pub async fn convert_from_hijri(
    context: Context<'_>,
    #[description = "The day, e.g. 1, 29"]
    #[min = 1]
    #[max = 30]
    day: u8,
    #[description = "The month, e.g. 1 for Muharram, 9 for Ramadan"]
    #[min = 1]
    #[max = 12]
    month: u8,
    #[description = "The year, e.g. 1448"]
    #[min = 1343]
    #[max = 1500]
    year: u16,
) -> Result<(), Error> {
    context.defer().await?;

    let date = format!("{:02}-{:02}-{}", day, month, year);
    let gregorian = match aladhan::to_gregorian(&context.data().http_client, &date).await {
        Ok(gregorian) => gregorian,
        Err(err) => return reply_error(context, &err).await,
    };

    let embed = base_embed(context)
        .author(serenity::CreateEmbedAuthor::new("Hijri → Gregorian Conversion").icon_url(ICON))
        .description(format!(
            "{} AH is **{} {} {}**.",
            date, gregorian.day, gregorian.month_en, gregorian.year
        ));

    context
        .send(poise::CreateReply::default().embed(embed))
        .await?;
    Ok(())
}

fn arabic_date_line(hijri: &HijriDate) -> String {
    format!(
        "{} {} {} {} هـ",
        hijri.weekday_ar,
        to_arabic_digits(&hijri.day.to_string()),
        hijri.month_ar,
        to_arabic_digits(&hijri.year.to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_date_line() {
        let hijri = HijriDate {
            day: 7,
            month_number: 3,
            month_en: "Rabīʿ al-awwal".to_string(),
            month_ar: "رَبيع الأوّل".to_string(),
            year: 1448,
            weekday_ar: "الثلاثاء".to_string(),
        };
        assert_eq!(arabic_date_line(&hijri), "الثلاثاء ٧ رَبيع الأوّل ١٤٤٨ هـ");
    }
}
