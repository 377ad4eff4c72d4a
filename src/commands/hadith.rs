//! Hadith commands backed by sunnah.com.

use poise::serenity_prelude as serenity;
use rand::Rng;

use crate::commands::{base_embed, reply_error, send_paginated};
use crate::pagination::Paginator;
use crate::reference::{parse_hadith_ref, HadithReference};
use crate::sunnah::{self, HadithLang};
use crate::types::{Context, Error};

const ICON: &str = "https://sunnah.com/images/hadith_icon2_huge.png";

/// Hadith text up to a field, leaving room for the footer within the embed.
const PAGE_WIDTH: usize = 1024;

/// Get a hadith in English from sunnah.com.
#[poise::command(slash_command)]
pub async fn hadith(
    context: Context<'_>,
    #[description = "The hadith collection, e.g. bukhari"] collection: String,
    #[description = "The reference, e.g. 1:1 (book:hadith) or a sunnah.com hadith number"]
    reference: String,
) -> Result<(), Error> {
    send_hadith(context, &collection, &reference, HadithLang::English).await
}

/// Get a hadith in Arabic from sunnah.com.
#[poise::command(slash_command)]
pub async fn ahadith(
    context: Context<'_>,
    #[description = "The hadith collection, e.g. bukhari"] collection: String,
    #[description = "The reference, e.g. 1:1 (book:hadith) or a sunnah.com hadith number"]
    reference: String,
) -> Result<(), Error> {
    send_hadith(context, &collection, &reference, HadithLang::Arabic).await
}

/// Get a random hadith from Riyadh as-Salihin.
#[poise::command(slash_command)]
pub async fn rhadith(context: Context<'_>) -> Result<(), Error> {
    let number = rand::rng().random_range(1..=sunnah::RANDOM_MAX_HADITH);
    send_hadith(
        context,
        sunnah::RANDOM_COLLECTION,
        &number.to_string(),
        HadithLang::English,
    )
    .await
}

async fn send_hadith(
    context: Context<'_>,
    collection: &str,
    reference: &str,
    lang: HadithLang,
) -> Result<(), Error> {
    context.defer().await?;

    let table = sunnah::collection_table();
    let hit = match table.resolve(collection) {
        Ok(hit) => hit,
        Err(err) => return reply_error(context, &err).await,
    };
    let collection_name = lang.collection_name(hit.entry);

    let parsed = match parse_hadith_ref(reference) {
        Ok(parsed) => parsed,
        Err(err) => return reply_error(context, &err).await,
    };

    let hadith = match context
        .data()
        .sunnah
        .fetch_hadith(&context.data().http_client, hit.key, &parsed, lang)
        .await
    {
        Ok(hadith) => hadith,
        Err(err) => return reply_error(context, &err).await,
    };

    let reference_line = reference_line(collection_name, &hadith.hadith_number, &parsed);
    // Bukhari and Muslim are sahih by definition; a grading line would be
    // noise
    let grading_line = if matches!(hit.key, "bukhari" | "muslim") {
        None
    } else {
        hadith.grading.as_ref().map(|grade| {
            let mut line = match lang {
                HadithLang::English => format!("Grading: {}", grade),
                HadithLang::Arabic => grade.clone(),
            };
            if let Some(graded_by) = &hadith.graded_by {
                line.push_str(&format!(" - {}", graded_by));
            }
            line
        })
    };

    let paginator = Paginator::from_text(&hadith.text, PAGE_WIDTH, context.author().id.get());
    let chapter_title = hadith.chapter_title.clone();
    let embed_for = move |paginator: &Paginator| {
        let mut footer = if paginator.is_single_page() {
            String::new()
        } else {
            format!("Page {}/{}\n", paginator.page_number(), paginator.total_pages())
        };
        footer.push_str(&reference_line);
        if let Some(grading) = &grading_line {
            footer.push('\n');
            footer.push_str(grading);
        }

        let mut embed = base_embed(context)
            .description(paginator.current().to_string())
            .author(serenity::CreateEmbedAuthor::new(collection_name).icon_url(ICON))
            .footer(serenity::CreateEmbedFooter::new(footer));
        if let Some(title) = &chapter_title {
            embed = embed.title(title);
        }
        embed
    };

    send_paginated(context, paginator, embed_for).await
}

fn reference_line(
    collection_name: &str,
    hadith_number: &str,
    parsed: &HadithReference,
) -> String {
    match parsed.book_number {
        Some(book) => format!(
            "Reference: {} {} (Book {}, Hadith {})",
            collection_name, hadith_number, book, parsed.hadith_number
        ),
        None => format!("Reference: {} {}", collection_name, hadith_number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::HadithRefKind;

    #[test]
    fn test_reference_line_forms() {
        let book_form = HadithReference {
            book_number: Some(1),
            hadith_number: 5,
            kind: HadithRefKind::BookAndHadith,
        };
        assert_eq!(
            reference_line("Sahīh al-Bukhārī", "5", &book_form),
            "Reference: Sahīh al-Bukhārī 5 (Book 1, Hadith 5)"
        );

        let global_form = HadithReference {
            book_number: None,
            hadith_number: 1051,
            kind: HadithRefKind::HadithNumber,
        };
        assert_eq!(
            reference_line("Sahīh Muslim", "1051", &global_form),
            "Reference: Sahīh Muslim 1051"
        );
    }
}
