//! Dua commands from Fortress of the Muslim.

use poise::serenity_prelude as serenity;
use rand::prelude::IndexedRandom;

use crate::commands::{base_embed, reply_error, send_paginated};
use crate::hisnulmuslim::{self, DuaInfo};
use crate::pagination::{Paginator, PAGE_WIDTH};
use crate::types::{Context, Error};

const ICON: &str = "https://sunnah.com/images/hadith_icon2_huge.png";

/// Get duas for a topic from Fortress of the Muslim.
#[poise::command(slash_command)]
pub async fn dua(
    context: Context<'_>,
    #[description = "The topic, e.g. breaking fast"] topic: String,
) -> Result<(), Error> {
    let hit = match hisnulmuslim::dua_table().resolve(&topic) {
        Ok(hit) => hit,
        Err(err) => return reply_error(context, &err).await,
    };
    send_duas(context, hit.entry).await
}

/// Get duas for a random topic.
#[poise::command(slash_command)]
pub async fn rdua(context: Context<'_>) -> Result<(), Error> {
    // The table is non-empty, choose cannot fail
    let Some((_, info)) = hisnulmuslim::DUAS.choose(&mut rand::rng()) else {
        return Ok(());
    };
    send_duas(context, info).await
}

/// List the available dua topics.
#[poise::command(slash_command)]
pub async fn dualist(context: Context<'_>) -> Result<(), Error> {
    let mut description = String::from("**Type /dua <topic>**. Example: `/dua breaking fast`\n");
    for (_, info) in hisnulmuslim::DUAS {
        description.push('\n');
        description.push_str(info.name);
    }

    let embed = base_embed(context)
        .title("Dua List")
        .description(description)
        .footer(serenity::CreateEmbedFooter::new(
            "Source: Fortress of the Muslim (Hisn al-Muslim)",
        ));

    context
        .send(poise::CreateReply::default().embed(embed))
        .await?;
    Ok(())
}

async fn send_duas(context: Context<'_>, info: &DuaInfo) -> Result<(), Error> {
    context.defer().await?;

    let text = match hisnulmuslim::fetch_duas(&context.data().http_client, info).await {
        Ok(text) => text,
        Err(err) => return reply_error(context, &err).await,
    };

    let title = format!("Duas for {}", info.name);
    let paginator = Paginator::from_text(&text, PAGE_WIDTH, context.author().id.get());
    let embed_for = move |paginator: &Paginator| {
        let mut embed = base_embed(context)
            .title(title.clone())
            .description(paginator.current().to_string())
            .author(serenity::CreateEmbedAuthor::new("Fortress of the Muslim").icon_url(ICON));
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
