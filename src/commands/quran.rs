//! Qur'an verse commands.

use poise::serenity_prelude as serenity;
use rand::Rng;

use crate::commands::{base_embed, reply_error};
use crate::preferences::PreferenceKind;
use crate::quran_com;
use crate::reference::{parse_scripture_ref, ScriptureReference};
use crate::surah;
use crate::types::{Context, Error};
use crate::utils::arabic::to_arabic_digits;

const ICON: &str = "https://cdn6.aptoide.com/imgs/6/a/6/6a6336c9503e6bd4bdf98fda89381195_icon.png";

const TOO_LONG: &str = "This passage was too long to send.";

/// Discord allows 25 fields and 6000 characters per embed.
const MAX_VERSES: u16 = 25;
const MAX_EMBED_CHARS: usize = 6000;

/// Get a translation of a Qur'an passage, e.g. 2:255 or 1:1-7.
#[poise::command(slash_command)]
pub async fn quran(
    context: Context<'_>,
    #[description = "The verse(s) to fetch, e.g. 2:255 or 1:1-7"] reference: String,
    #[description = "Translation to use instead of the server default"] translation: Option<
        String,
    >,
    #[description = "Interpret the surah number as its revelation order"] reveal_order: Option<
        bool,
    >,
) -> Result<(), Error> {
    context.defer().await?;

    let parsed = match parse_scripture_ref(&reference, true, reveal_order.unwrap_or(false)) {
        Ok(parsed) => parsed,
        Err(err) => return reply_error(context, &err).await,
    };

    let info = match effective_translation(context, translation).await {
        Ok(info) => info,
        Err(err) => return reply_error(context, &err).await,
    };

    send_translation(context, &parsed, info.id).await
}

/// The translation to use: an explicit override resolved forgivingly, or the
/// server's stored preference.
async fn effective_translation(
    context: Context<'_>,
    input: Option<String>,
) -> crate::error::Result<&'static quran_com::TranslationInfo> {
    let key = match input {
        Some(input) => quran_com::translation_table()
            .resolve(&input)?
            .key
            .to_string(),
        None => {
            let guild = context.guild_id().map(|g| g.get());
            context
                .data()
                .preferences
                .get(PreferenceKind::Translation, guild)
                .await
        }
    };
    quran_com::translation_table().get(&key).ok_or_else(|| {
        // The stored form is validated on write, so this is a table bug
        tracing::error!(%key, "translation key missing from table");
        crate::error::MinbarError::InvalidTranslation(key)
    })
}

async fn send_translation(
    context: Context<'_>,
    parsed: &ScriptureReference,
    translation_id: u16,
) -> Result<(), Error> {
    if parsed.end_verse - parsed.start_verse >= MAX_VERSES {
        context.say(TOO_LONG).await?;
        return Ok(());
    }

    let mut verses = Vec::new();
    let mut translation_name = String::new();
    for verse in parsed.verses() {
        match quran_com::fetch_verse(
            &context.data().http_client,
            translation_id,
            parsed.surah,
            verse,
        )
        .await
        {
            Ok(fetched) => {
                translation_name = fetched.translation_name;
                verses.push((format!("{}:{}", parsed.surah, verse), fetched.text));
            }
            Err(err) => return reply_error(context, &err).await,
        }
    }

    let info = match surah::get(parsed.surah) {
        Ok(info) => info,
        Err(err) => return reply_error(context, &err).await,
    };

    let embed = base_embed(context)
        .author(
            serenity::CreateEmbedAuthor::new(format!(
                "Surah {} ({})",
                info.name, info.translated_name
            ))
            .icon_url(ICON),
        )
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Translation: {} | {}",
            translation_name,
            info.place.as_str()
        )));
    send_verse_embed(context, embed, verses).await
}

/// Get the Arabic text of a Qur'an passage.
#[poise::command(slash_command)]
pub async fn aquran(
    context: Context<'_>,
    #[description = "The verse(s) to fetch, e.g. 2:255 or 1:1-7"] reference: String,
    #[description = "Interpret the surah number as its revelation order"] reveal_order: Option<
        bool,
    >,
) -> Result<(), Error> {
    context.defer().await?;

    let parsed = match parse_scripture_ref(&reference, true, reveal_order.unwrap_or(false)) {
        Ok(parsed) => parsed,
        Err(err) => return reply_error(context, &err).await,
    };

    send_arabic(context, &parsed).await
}

async fn send_arabic(context: Context<'_>, parsed: &ScriptureReference) -> Result<(), Error> {
    if parsed.end_verse - parsed.start_verse >= MAX_VERSES {
        context.say(TOO_LONG).await?;
        return Ok(());
    }

    let mut verses = Vec::new();
    for verse in parsed.verses() {
        match quran_com::fetch_arabic_verse(&context.data().http_client, parsed.surah, verse).await
        {
            Ok(text) => {
                let key = to_arabic_digits(&format!("{}:{}", parsed.surah, verse));
                verses.push((key, text));
            }
            Err(err) => return reply_error(context, &err).await,
        }
    }

    let info = match surah::get(parsed.surah) {
        Ok(info) => info,
        Err(err) => return reply_error(context, &err).await,
    };

    let embed = base_embed(context).author(
        serenity::CreateEmbedAuthor::new(format!("سورة {}", info.arabic_name)).icon_url(ICON),
    );
    send_verse_embed(context, embed, verses).await
}

async fn send_verse_embed(
    context: Context<'_>,
    embed: serenity::CreateEmbed,
    verses: Vec<(String, String)>,
) -> Result<(), Error> {
    let total: usize = verses.iter().map(|(k, v)| k.len() + v.len()).sum();
    if total > MAX_EMBED_CHARS {
        context.say(TOO_LONG).await?;
        return Ok(());
    }

    let embed = if verses.len() == 1 {
        let (key, text) = &verses[0];
        embed.title(key).description(text)
    } else {
        let mut embed = embed;
        for (key, text) in verses {
            embed = embed.field(key, text, false);
        }
        embed
    };

    context
        .send(poise::CreateReply::default().embed(embed))
        .await?;
    Ok(())
}

/// Get a random verse from the Qur'an.
#[poise::command(slash_command)]
pub async fn rquran(
    context: Context<'_>,
    #[description = "Translation to use instead of the server default"] translation: Option<
        String,
    >,
) -> Result<(), Error> {
    context.defer().await?;

    let parsed = random_reference();

    let info = match effective_translation(context, translation).await {
        Ok(info) => info,
        Err(err) => return reply_error(context, &err).await,
    };

    send_translation(context, &parsed, info.id).await
}

/// Get a random verse from the Qur'an in Arabic.
#[poise::command(slash_command)]
pub async fn raquran(context: Context<'_>) -> Result<(), Error> {
    context.defer().await?;
    let parsed = random_reference();
    send_arabic(context, &parsed).await
}

fn random_reference() -> ScriptureReference {
    let mut rng = rand::rng();
    let surah_number = rng.random_range(1..=114u16);
    // The surah number is in range, so the entry exists
    let verse_count = surah::SURAHS[(surah_number - 1) as usize].verse_count;
    let verse = rng.random_range(1..=verse_count);
    ScriptureReference {
        surah: surah_number,
        start_verse: verse,
        end_verse: verse,
    }
}

/// View information about a surah.
#[poise::command(slash_command)]
pub async fn surah(
    context: Context<'_>,
    #[description = "The name or number of the surah, e.g. Al-Baqarah or 2"] surah: String,
    #[description = "Interpret a number as the surah's revelation order"] reveal_order: Option<
        bool,
    >,
) -> Result<(), Error> {
    let number = match resolve_surah_input(&surah, reveal_order.unwrap_or(false)) {
        Ok(number) => number,
        Err(err) => return reply_error(context, &err).await,
    };
    let info = match surah::get(number) {
        Ok(info) => info,
        Err(err) => return reply_error(context, &err).await,
    };

    let embed = base_embed(context)
        .author(
            serenity::CreateEmbedAuthor::new(format!(
                "Surah {} ({}) | سورة {}",
                info.name, info.translated_name, info.arabic_name
            ))
            .icon_url(ICON),
        )
        .description(format!(
            "\n• **Surah number**: {}\n• **Number of verses**: {}\n• **Revelation location**: {}\n• **Revelation order**: {}",
            info.number,
            info.verse_count,
            info.place.as_str(),
            info.revelation_order
        ));

    context
        .send(poise::CreateReply::default().embed(embed))
        .await?;
    Ok(())
}

/// Accept a surah number, a revelation-order number or a (possibly
/// misspelled) surah name.
fn resolve_surah_input(input: &str, reveal_order: bool) -> crate::error::Result<u16> {
    if let Ok(number) = input.trim().parse::<u16>() {
        if reveal_order {
            return surah::from_reveal_order(number);
        }
        surah::get(number)?;
        return Ok(number);
    }
    Ok(*surah::name_table().resolve(input)?.entry)
}

/// Set the default Qur'an translation for this server.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    rename = "settranslation"
)]
pub async fn set_translation(
    context: Context<'_>,
    #[description = "The translation key, e.g. khattab or haleem"] translation: String,
) -> Result<(), Error> {
    let Some(guild) = context.guild_id() else {
        context.say("❌ This command can only be used in a server.").await?;
        return Ok(());
    };

    match context
        .data()
        .preferences
        .set(PreferenceKind::Translation, guild.get(), &translation)
        .await
    {
        Ok(stored) => {
            let name = quran_com::translation_table()
                .get(&stored)
                .map(|info| info.name)
                .unwrap_or("unknown");
            context
                .say(format!(
                    "✅ Successfully set the server translation to **{}**.",
                    name
                ))
                .await?;
        }
        Err(err) => return reply_error(context, &err).await,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_reference_is_always_valid() {
        for _ in 0..500 {
            let parsed = random_reference();
            let count = surah::verse_count(parsed.surah).unwrap();
            assert!(parsed.start_verse >= 1 && parsed.start_verse <= count);
            assert_eq!(parsed.start_verse, parsed.end_verse);
        }
    }

    #[test]
    fn test_resolve_surah_input() {
        assert_eq!(resolve_surah_input("12", false).unwrap(), 12);
        assert_eq!(resolve_surah_input("Yusuf", false).unwrap(), 12);
        assert_eq!(resolve_surah_input("yusuf", false).unwrap(), 12);
        // Revelation order 5 is Al-Fatihah
        assert_eq!(resolve_surah_input("5", true).unwrap(), 1);
        assert!(resolve_surah_input("115", false).is_err());
    }
}
