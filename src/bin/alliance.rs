use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};

use alliance_tracker::{AppContext, Roster, config::Settings, report, tracker::parse_label};

#[derive(Parser, Debug)]
#[command(name = "alliance")]
#[command(about = "Snapshoty rankingu klanu ALLIANCE, zmiany punktów i osiągnięcia sezonu")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Zapisz ranking ze scrapera jako `current` i snapshot godzinowy
    Snapshot {
        /// Plik JSON: [{"nick": "...", "points": 123}, ...]
        file: PathBuf,
        /// Godzina snapshotu HHMM (domyślnie teraz)
        #[arg(long)]
        at: Option<String>,
    },
    /// Pokaż zmianę punktów od snapshotu `label` do `current`
    Compare {
        label: String,
        /// Wyślij raport na kanał Discorda
        #[arg(long)]
        post: bool,
        /// Wypisz wynik jako JSON
        #[arg(long)]
        json: bool,
    },
    /// Dopisz nowych zdobywców osiągnięcia sezonu
    Achievers {
        #[arg(long)]
        threshold: Option<u64>,
        #[arg(long)]
        season: Option<String>,
        /// Wyślij raport na kanał Discorda
        #[arg(long)]
        post: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load()?;
    let ctx: Arc<AppContext> = AppContext::bootstrap(settings)?;

    match cli.command {
        Command::Snapshot { file, at } => snapshot(&ctx, file, at),
        Command::Compare { label, post, json } => compare(&ctx, &label, post, json).await,
        Command::Achievers {
            threshold,
            season,
            post,
        } => achievers(&ctx, threshold, season, post).await,
    }
}

fn snapshot(ctx: &AppContext, file: PathBuf, at: Option<String>) -> Result<()> {
    let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("cannot read roster file {}", file.display()))?;
    let roster: Roster = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a roster JSON array", file.display()))?;

    let at = match at {
        Some(s) => NaiveTime::parse_from_str(&s, "%H%M")
            .with_context(|| format!("--at `{s}` is not a HHMM time"))?,
        None => chrono::Local::now().time(),
    };

    let label = ctx.tracker.record(&roster, at)?;
    println!("Zapisano {} graczy jako `current` i `{label}`.", roster.len());
    Ok(())
}

async fn compare(ctx: &AppContext, label: &str, post: bool, json: bool) -> Result<()> {
    let label = parse_label(label)?;
    let cmp = ctx.tracker.delta_since(&label)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cmp)?);
    } else {
        print!("{}", report::delta_text(&label, &cmp));
    }

    if post {
        let publisher = ctx
            .publisher()
            .context("--post wymaga discord.token i discord.report_channel_id")?;
        publisher.post(report::delta_embed(&label, &cmp)).await?;
    }
    Ok(())
}

async fn achievers(
    ctx: &AppContext,
    threshold: Option<u64>,
    season: Option<String>,
    post: bool,
) -> Result<()> {
    let threshold = threshold.unwrap_or(ctx.settings.achievements.threshold);
    let season = season.unwrap_or_else(|| ctx.settings.achievements.season.clone());

    let rec = ctx.tracker.sync_achievers(threshold, &season)?;
    print!("{}", report::achievers_text(&rec, threshold));

    if post {
        let publisher = ctx
            .publisher()
            .context("--post wymaga discord.token i discord.report_channel_id")?;
        publisher.post(report::achievers_embed(&rec, threshold)).await?;
    }
    Ok(())
}
