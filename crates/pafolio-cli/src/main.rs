//! Pafolio CLI — evidence portfolio manager for PA reporting.
//!
//! Set PAFOLIO_SHEET_URL for the remote spreadsheet backend (optional; a
//! local JSON store is used otherwise) and GEMINI_API_KEY for AI captions.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;

use pafolio_caption::{Captioner, GeminiCaptioner};
use pafolio_cli::{init_tracing, truncate_string};
use pafolio_core::{indicator_title, Config, MediaKind, INDICATORS};
use pafolio_embed::PreviewWorkshop;
use pafolio_services::{
    GalleryView, IntakeSession, ItemContent, Portfolio, SettlePolicy, ViewMode,
};
use pafolio_store::create_store;

#[derive(Parser)]
#[command(name = "pafolio", about = "PA evidence portfolio CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the indicator taxonomy
    Indicators,
    /// Show the gallery for one indicator
    List {
        /// Indicator id (e.g. d1-4)
        indicator: String,
        /// Render the published read-only view
        #[arg(long)]
        public: bool,
        /// Put one record fullscreen by id
        #[arg(long)]
        fullscreen: Option<Uuid>,
        /// Dump the raw records as JSON instead of the gallery
        #[arg(long)]
        json: bool,
    },
    /// Attach a file or link to an indicator
    Add {
        /// Indicator id (e.g. d1-4)
        indicator: String,
        /// Link to the evidence (YouTube / drive / website / image)
        #[arg(long, conflicts_with_all = ["file", "kind"])]
        url: Option<String>,
        /// Path of a file to attach inline
        #[arg(long, requires = "kind")]
        file: Option<std::path::PathBuf>,
        /// Declared kind for --file: IMAGE, VIDEO, PDF, or DOCX
        #[arg(long)]
        kind: Option<String>,
        /// Caption text
        #[arg(long)]
        caption: Option<String>,
        /// Ask the caption collaborator to write the caption
        #[arg(long)]
        ai_caption: bool,
    },
    /// Delete a record by id
    Delete {
        /// Record UUID
        id: Uuid,
    },
    /// Suggest a caption without submitting anything
    Caption {
        /// Indicator id (e.g. d1-4)
        indicator: String,
        /// File name hint
        #[arg(long, default_value = "no file selected")]
        hint: String,
        /// Existing notes to build on
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Print the public URL the portfolio is published under
    Publish,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn load_portfolio(config: &Config) -> anyhow::Result<Portfolio> {
    let store = create_store(config).context("Failed to create store")?;
    let portfolio = Portfolio::new(store, SettlePolicy::from_config(config));
    portfolio
        .refresh()
        .await
        .context("Failed to fetch records")?;
    Ok(portfolio)
}

fn print_gallery(view: &GalleryView, indicator: &str) {
    println!(
        "{} ({} items)",
        indicator_title(indicator),
        view.len()
    );
    if view.is_empty() {
        println!("  (no evidence attached to this indicator yet)");
        return;
    }

    for item in view.items() {
        println!();
        println!(
            "  [{}] {}  {}",
            item.record.media_kind,
            item.record.created_at.format("%Y-%m-%d"),
            truncate_string(&item.record.caption, 60)
        );
        match &item.content {
            ItemContent::Plan(plan) => {
                println!("    {:?} -> {}", plan.strategy(), plan.target_uri());
            }
            ItemContent::PreviewUnavailable { reason } => {
                println!("    preview unavailable: {}", reason);
            }
        }
        if let Some(note) = item.note {
            println!("    note: {}", note);
        }
        if let Some(url) = &item.open_external {
            println!("    open externally: {}", url);
        }
        if item.can_delete {
            println!("    id: {}", item.record.id);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Indicators => {
            for indicator in INDICATORS {
                println!("{:<10} {}", indicator.id, indicator.title);
            }
        }
        Commands::List {
            indicator,
            public,
            fullscreen,
            json,
        } => {
            let portfolio = load_portfolio(&config).await?;
            let records = portfolio.records_for(&indicator).await;

            if json {
                print_json(&records)?;
                return Ok(());
            }

            let workshop =
                PreviewWorkshop::new(&config.preview_dir).context("Failed to prepare previews")?;
            let mode = if public { ViewMode::Public } else { ViewMode::Admin };
            let mut view = GalleryView::build(records, mode, &workshop);

            if let Some(id) = fullscreen {
                if !view.set_fullscreen(id) {
                    anyhow::bail!("No record {} under indicator {}", id, indicator);
                }
            }

            print_gallery(&view, &indicator);

            if view.fullscreen_item().is_some() {
                println!();
                match view.fullscreen_plan(&workshop) {
                    Some(ItemContent::Plan(plan)) => {
                        println!("fullscreen: {:?} -> {}", plan.strategy(), plan.target_uri());
                    }
                    Some(ItemContent::PreviewUnavailable { reason }) => {
                        println!("fullscreen preview unavailable: {}", reason);
                    }
                    None => {}
                }
            }
        }
        Commands::Add {
            indicator,
            url,
            file,
            kind,
            caption,
            ai_caption,
        } => {
            let portfolio = load_portfolio(&config).await?;
            let mut session = IntakeSession::new(indicator.clone());

            match (&url, &file) {
                (Some(url), None) => {
                    session.select_kind(MediaKind::Link);
                    session.set_url(url.clone());
                }
                (None, Some(path)) => {
                    let kind_token = kind.as_deref().unwrap_or_default();
                    let media_kind = MediaKind::parse(kind_token).with_context(|| {
                        format!("Unknown kind '{}': use IMAGE, VIDEO, PDF, or DOCX", kind_token)
                    })?;
                    if media_kind == MediaKind::Link {
                        anyhow::bail!("Use --url for links instead of --file");
                    }
                    let bytes = std::fs::read(path)
                        .with_context(|| format!("Failed to read file: {}", path.display()))?;
                    let name = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("upload.bin")
                        .to_string();
                    session.select_kind(media_kind);
                    session.stage_file(name, bytes);
                }
                _ => anyhow::bail!("Provide exactly one of --url or --file"),
            }

            if let Some(caption) = caption {
                session.set_caption(caption);
            }
            if ai_caption {
                let captioner = GeminiCaptioner::new(config.gemini_api_key.clone())
                    .context("Failed to create captioner")?;
                let suggestion = captioner
                    .suggest(
                        indicator_title(&indicator),
                        session.file_name_hint(),
                        session.caption(),
                    )
                    .await;
                session.set_caption(suggestion);
            }

            let record = session.submit(&portfolio).await?;
            print_json(&record)?;
        }
        Commands::Delete { id } => {
            let portfolio = load_portfolio(&config).await?;
            portfolio.delete(id).await?;
            print_json(
                &serde_json::json!({ "success": true, "message": format!("Record {} deleted", id) }),
            )?;
        }
        Commands::Caption {
            indicator,
            hint,
            notes,
        } => {
            let captioner = GeminiCaptioner::new(config.gemini_api_key.clone())
                .context("Failed to create captioner")?;
            let suggestion = captioner
                .suggest(indicator_title(&indicator), &hint, &notes)
                .await;
            println!("{}", suggestion);
        }
        Commands::Publish => {
            let store = create_store(&config).context("Failed to create store")?;
            let portfolio = Portfolio::new(store, SettlePolicy::from_config(&config));
            let target = portfolio.publish()?;
            print_json(&serde_json::json!({ "published_at": target }))?;
        }
    }

    Ok(())
}
