//! Rendering of the two views (shortener and statistics) and the
//! shorten/visit actions. Purely derived display logic; every rule
//! lives in the registry.

use jiff::Timestamp;
use linklet_core::{CreateError, LinkId, Store, VisitError};
use linklet_registry::{CreateRequest, Generator, LinkRegistry};

/// The shortener view shows only the last few created links.
const RECENT_DISPLAY_LIMIT: usize = 5;

/// The statistics view truncates per-link click details.
const CLICK_DISPLAY_LIMIT: usize = 5;

type Result<T> = anyhow::Result<T>;

pub async fn shorten<S: Store, G: Generator>(
    registry: &LinkRegistry<S, G>,
    base_url: &str,
    url: String,
    validity: Option<u32>,
    code: Option<String>,
) -> Result<()> {
    let request = CreateRequest {
        original_url: url,
        validity_minutes: validity,
        custom_code: code,
    };

    match registry.create(request).await {
        Ok(record) => {
            println!("Short URL: {}", record.short_url(base_url));
            println!("Id:        {}", record.id);
            println!("Expires:   {}", record.expiry_at);
            Ok(())
        }
        // Input problems are reported all at once for the user to fix.
        Err(CreateError::Validation(errors)) => {
            for error in errors.iter() {
                eprintln!("error: {}", error);
            }
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

pub async fn visit<S: Store, G: Generator>(
    registry: &LinkRegistry<S, G>,
    id: u64,
) -> Result<()> {
    let id = LinkId::new(id);

    match registry.record_visit(id).await {
        Ok(_) => {
            // The registry recorded the click; navigating to the
            // target is our side effect. No redirect is served.
            if let Some(record) = registry.get(id).await? {
                println!("{}", record.original_url);
            }
            Ok(())
        }
        Err(VisitError::Expired(id)) => {
            println!("Link {} has expired; nothing to open.", id);
            Ok(())
        }
        Err(VisitError::NotFound(id)) => {
            eprintln!("error: no link with id {}", id);
            Ok(())
        }
        Err(other) => Err(other.into()),
    }
}

pub async fn list<S: Store, G: Generator>(
    registry: &LinkRegistry<S, G>,
    base_url: &str,
) -> Result<()> {
    let recent = registry.recent(RECENT_DISPLAY_LIMIT).await?;
    if recent.is_empty() {
        println!("No active links.");
        return Ok(());
    }

    for record in recent {
        println!("[{}] {}", record.id, record.short_url(base_url));
        println!("    Original: {}", record.original_url);
        println!(
            "    Expires:  {} | Clicks: {}",
            record.expiry_at, record.clicks
        );
    }
    Ok(())
}

pub async fn stats<S: Store, G: Generator>(
    registry: &LinkRegistry<S, G>,
    base_url: &str,
) -> Result<()> {
    let all = registry.list_all().await?;
    if all.is_empty() {
        println!("No URLs have been shortened yet.");
        return Ok(());
    }

    let now = Timestamp::now();
    for record in all {
        println!("{} [{}]", record.shortcode, record.status(now));
        println!("    Original:  {}", record.original_url);
        println!("    Short URL: {}", record.short_url(base_url));
        println!("    Created:   {}", record.created_at);
        println!("    Expires:   {}", record.expiry_at);
        println!("    Clicks:    {}", record.clicks);

        for click in record.click_events.iter().rev().take(CLICK_DISPLAY_LIMIT) {
            println!(
                "      {} | {} | {}",
                click.timestamp, click.source, click.location
            );
        }
        let hidden = record.click_events.len().saturating_sub(CLICK_DISPLAY_LIMIT);
        if hidden > 0 {
            println!("      ... and {} more clicks", hidden);
        }
    }
    Ok(())
}
