//! Tafsir commands, English (quran.com) and Arabic (tafsir.app).

use poise::serenity_prelude as serenity;

use crate::commands::{base_embed, reply_error, send_paginated};
use crate::error::MinbarError;
use crate::pagination::{Paginator, PAGE_WIDTH};
use crate::preferences::PreferenceKind;
use crate::reference::parse_scripture_ref;
use crate::types::{Context, Error};
use crate::utils::arabic::to_arabic_digits;
use crate::{quran_com, surah, tafsir, tafsir_app};

const ICON: &str = "https://cdn6.aptoide.com/imgs/6/a/6/6a6336c9503e6bd4bdf98fda89381195_icon.png";

/// Get the tafsir of a Qur'an verse.
#[poise::command(slash_command)]
pub async fn tafsir(
    context: Context<'_>,
    #[description = "The verse, e.g. 2:255"] reference: String,
    #[description = "Tafsir to use instead of the server default"] name: Option<String>,
) -> Result<(), Error> {
    context.defer().await?;

    let parsed = match parse_scripture_ref(&reference, false, false) {
        Ok(parsed) => parsed,
        Err(err) => return reply_error(context, &err).await,
    };

    let key = match name {
        Some(input) => match tafsir::tafsir_table().resolve(&input) {
            Ok(hit) => hit.key.to_string(),
            Err(err) => return reply_error(context, &err).await,
        },
        None => {
            let guild = context.guild_id().map(|g| g.get());
            context
                .data()
                .preferences
                .get(PreferenceKind::Tafsir, guild)
                .await
        }
    };
    let Some(info) = tafsir::tafsir_table().get(&key) else {
        tracing::error!(%key, "tafsir key missing from table");
        return reply_error(context, &MinbarError::InvalidTafsir(key)).await;
    };

    let client = &context.data().http_client;
    let (content, used) =
        match quran_com::fetch_tafsir(client, info.id, parsed.surah, parsed.start_verse).await {
            Ok(content) => (content, info),
            // Several works skip verses; retry with the source that covers
            // everything
            Err(MinbarError::NotFound(_)) if key != tafsir::FALLBACK_TAFSIR => {
                let Some(fallback) = tafsir::tafsir_table().get(tafsir::FALLBACK_TAFSIR) else {
                    return reply_error(context, &MinbarError::InvalidTafsir(key)).await;
                };
                match quran_com::fetch_tafsir(
                    client,
                    fallback.id,
                    parsed.surah,
                    parsed.start_verse,
                )
                .await
                {
                    Ok(content) => (content, fallback),
                    Err(err) => return reply_error(context, &err).await,
                }
            }
            Err(err) => return reply_error(context, &err).await,
        };

    let surah_info = match surah::get(parsed.surah) {
        Ok(info) => info,
        Err(err) => return reply_error(context, &err).await,
    };

    let author_line = format!(
        "Tafsir of Surah {}, Verse {} | {}",
        surah_info.name, parsed.start_verse, used.name
    );
    let footer_base = format!("Author: {}", content.author);

    let paginator = Paginator::from_text(&content.text, PAGE_WIDTH, context.author().id.get());
    let embed_for = move |paginator: &Paginator| {
        let footer = if paginator.is_single_page() {
            footer_base.clone()
        } else {
            format!(
                "Page {}/{} | {}",
                paginator.page_number(),
                paginator.total_pages(),
                footer_base
            )
        };
        base_embed(context)
            .author(serenity::CreateEmbedAuthor::new(author_line.clone()).icon_url(ICON))
            .description(paginator.current().to_string())
            .footer(serenity::CreateEmbedFooter::new(footer))
    };

    send_paginated(context, paginator, embed_for).await
}

/// Get the Arabic tafsir of a Qur'an verse.
#[poise::command(slash_command)]
pub async fn atafsir(
    context: Context<'_>,
    #[description = "The verse, e.g. 2:255"] reference: String,
    #[description = "Tafsir to use instead of the server default"] name: Option<String>,
) -> Result<(), Error> {
    context.defer().await?;

    let parsed = match parse_scripture_ref(&reference, false, false) {
        Ok(parsed) => parsed,
        Err(err) => return reply_error(context, &err).await,
    };

    let key = match name {
        Some(input) => match tafsir_app::arabic_tafsir_table().resolve(&input) {
            Ok(hit) => hit.key.to_string(),
            Err(err) => return reply_error(context, &err).await,
        },
        None => {
            let guild = context.guild_id().map(|g| g.get());
            context
                .data()
                .preferences
                .get(PreferenceKind::ArabicTafsir, guild)
                .await
        }
    };
    let Some(info) = tafsir_app::arabic_tafsir_table().get(&key) else {
        tracing::error!(%key, "arabic tafsir key missing from table");
        return reply_error(context, &MinbarError::InvalidTafsir(key)).await;
    };

    let text = match tafsir_app::fetch_tafsir(
        &context.data().http_client,
        info,
        parsed.surah,
        parsed.start_verse,
    )
    .await
    {
        Ok(text) => text,
        Err(err) => return reply_error(context, &err).await,
    };

    let url = tafsir_app::page_url(info, parsed.surah, parsed.start_verse);
    let title = to_arabic_digits(&format!("{}:{}", parsed.surah, parsed.start_verse));

    let paginator = Paginator::from_text(&text, PAGE_WIDTH, context.author().id.get());
    let embed_for = move |paginator: &Paginator| {
        // Footnote numbering restarts on each page along with its notes
        let page = tafsir_app::split_footnotes(paginator.current());

        let mut embed = base_embed(context)
            .author(serenity::CreateEmbedAuthor::new(info.name).icon_url(ICON))
            .title(title.clone())
            .url(url.clone())
            .description(page.text);
        if !page.footnotes.is_empty() {
            embed = embed.field("الحواشي", page.footnotes, false);
        }
        if !paginator.is_single_page() {
            embed = embed.footer(serenity::CreateEmbedFooter::new(format!(
                "Page {}/{}",
                paginator.page_number(),
                paginator.total_pages()
            )));
        }
        embed
    };

    send_paginated(context, paginator, embed_for).await
}

/// Set the default tafsir for this server.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    rename = "settafsir"
)]
pub async fn set_tafsir(
    context: Context<'_>,
    #[description = "The tafsir key, e.g. ibnkathir"] name: String,
) -> Result<(), Error> {
    set_tafsir_preference(context, PreferenceKind::Tafsir, &name).await
}

/// Set the default Arabic tafsir for this server.
#[poise::command(
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    rename = "setatafsir"
)]
pub async fn set_arabic_tafsir(
    context: Context<'_>,
    #[description = "The tafsir key, e.g. tabari"] name: String,
) -> Result<(), Error> {
    set_tafsir_preference(context, PreferenceKind::ArabicTafsir, &name).await
}

async fn set_tafsir_preference(
    context: Context<'_>,
    kind: PreferenceKind,
    name: &str,
) -> Result<(), Error> {
    let Some(guild) = context.guild_id() else {
        context.say("❌ This command can only be used in a server.").await?;
        return Ok(());
    };

    match context.data().preferences.set(kind, guild.get(), name).await {
        Ok(stored) => {
            context
                .say(format!(
                    "✅ Successfully set the server tafsir to **{}**.",
                    stored
                ))
                .await?;
        }
        Err(err) => return reply_error(context, &err).await,
    }
    Ok(())
}
