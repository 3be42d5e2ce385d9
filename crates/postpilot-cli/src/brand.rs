//! Brand lookup and brand guide command handlers for the CLI.

use std::fmt::Write as _;

use clap::Subcommand;
use postpilot_brandfetch::{BrandLookupService, NormalizedBrand};
use postpilot_core::{AppConfig, BrandGuide};
use postpilot_session::WorkspaceSession;

/// Sub-commands available under `brand`.
#[derive(Debug, Subcommand)]
pub enum BrandCommands {
    /// Fetch and normalize brand data for a domain
    Lookup { domain: String },
    /// Fetch brand data and write it into the current workspace's brand guide
    Import { domain: String },
    /// Show the current workspace's brand guide
    Show,
}

/// Dispatches a `brand` sub-command.
///
/// # Errors
///
/// Returns an error if the lookup fails or the brand guide cannot be written.
pub(crate) async fn run(
    session: &mut WorkspaceSession,
    config: &AppConfig,
    command: BrandCommands,
) -> anyhow::Result<()> {
    match command {
        BrandCommands::Lookup { domain } => run_brand_lookup(config, &domain).await,
        BrandCommands::Import { domain } => {
            let brand = lookup(config, &domain).await?;
            let guide = session.apply_brand(&brand).await?;
            println!(
                "imported {} into brand guide of workspace {}",
                brand.name, guide.workspace_id
            );
            print!("{}", guide_summary(&guide));
            Ok(())
        }
        BrandCommands::Show => {
            match session.brand_guide().await {
                Some(guide) => print!("{}", guide_summary(&guide)),
                None => println!("no brand guide for the current workspace"),
            }
            Ok(())
        }
    }
}

/// Prints the normalized brand for `domain` as JSON.
///
/// # Errors
///
/// Returns an error if the domain is invalid or the upstream lookup fails.
pub(crate) async fn run_brand_lookup(config: &AppConfig, domain: &str) -> anyhow::Result<()> {
    let brand = lookup(config, domain).await?;
    println!("{}", serde_json::to_string_pretty(&brand)?);
    Ok(())
}

async fn lookup(config: &AppConfig, domain: &str) -> anyhow::Result<NormalizedBrand> {
    let service = BrandLookupService::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build brand lookup client: {e}"))?;
    service
        .lookup(domain)
        .await
        .map_err(|e| anyhow::anyhow!("brand lookup for '{domain}' failed: {e}"))
}

pub(crate) fn guide_summary(guide: &BrandGuide) -> String {
    let none = "\u{2014}";
    let mut out = String::new();
    let _ = writeln!(out, "domain:     {}", guide.domain.as_deref().unwrap_or(none));
    let _ = writeln!(
        out,
        "colors:     primary {} / secondary {} / accent {} / background {}",
        guide.colors.primary, guide.colors.secondary, guide.colors.accent, guide.colors.background
    );
    let _ = writeln!(
        out,
        "fonts:      heading {} / body {}",
        guide.heading_font, guide.body_font
    );
    let _ = writeln!(out, "tagline:    {}", guide.tagline.as_deref().unwrap_or(none));
    let _ = writeln!(out, "logo:       {}", guide.logo_url.as_deref().unwrap_or(none));
    if !guide.voice_tones.is_empty() {
        let _ = writeln!(out, "voice:      {}", guide.voice_tones.join(", "));
    }
    out
}
