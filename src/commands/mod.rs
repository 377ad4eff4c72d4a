//! Discord bot commands.
//!
//! This module contains all available bot commands organized by functionality.

pub mod dua;
pub mod hadith;
pub mod hijri;
pub mod prayer;
pub mod quran;
pub mod tafsir;

use poise::serenity_prelude as serenity;

use crate::error::MinbarError;
use crate::pagination::{Paginator, IDLE_TIMEOUT};
use crate::types::{Context, Error};

/// A blank embed in the configured accent colour.
pub(crate) fn base_embed(ctx: Context<'_>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new().colour(ctx.data().embed_colour)
}

/// Report a failed operation. User mistakes echo the error text as a hint;
/// everything else is logged and collapsed into a generic apology.
pub(crate) async fn reply_error(ctx: Context<'_>, err: &MinbarError) -> Result<(), Error> {
    if err.is_user_error() {
        ctx.say(format!("❌ {}", err)).await?;
    } else {
        tracing::error!(command = %ctx.command().name, %err, "command failed");
        ctx.say("❌ Something went wrong on our side. Please try again later.")
            .await?;
    }
    Ok(())
}

/// Send a paginated embed with previous/next buttons.
///
/// Single-page content goes out without buttons. Only the invoking user may
/// turn the pages; the buttons stop responding after the idle timeout.
pub(crate) async fn send_paginated(
    ctx: Context<'_>,
    mut paginator: Paginator,
    make_embed: impl Fn(&Paginator) -> serenity::CreateEmbed,
) -> Result<(), Error> {
    if paginator.is_single_page() {
        ctx.send(poise::CreateReply::default().embed(make_embed(&paginator)))
            .await?;
        return Ok(());
    }

    // Command invocation id keeps this message's buttons distinct from any
    // other paginated message in the channel
    let ctx_id = ctx.id();
    let prev_id = format!("{}prev", ctx_id);
    let next_id = format!("{}next", ctx_id);

    let components = serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(&prev_id).emoji('◀'),
        serenity::CreateButton::new(&next_id).emoji('▶'),
    ]);

    ctx.send(
        poise::CreateReply::default()
            .embed(make_embed(&paginator))
            .components(vec![components]),
    )
    .await?;

    while let Some(press) = serenity::ComponentInteractionCollector::new(ctx)
        .filter(move |press| press.data.custom_id.starts_with(&ctx_id.to_string()))
        .timeout(IDLE_TIMEOUT)
        .await
    {
        if !paginator.owned_by(press.user.id.get()) {
            // Acknowledge silently so the button doesn't error for others
            press
                .create_response(
                    ctx.serenity_context(),
                    serenity::CreateInteractionResponse::Acknowledge,
                )
                .await?;
            continue;
        }

        if press.data.custom_id == next_id {
            paginator.next_page();
        } else if press.data.custom_id == prev_id {
            paginator.previous_page();
        } else {
            continue;
        }

        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .embed(make_embed(&paginator)),
                ),
            )
            .await?;
    }

    Ok(())
}
