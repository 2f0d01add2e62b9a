//! Command implementations for the podcast timeline CLI.
//!
//! Handles:
//! - timeline: print year groups (or the empty/no-results state)
//! - year: activate one year point
//! - stats: episode count and years of history
//! - admin: episode and advertisement CRUD from JSON drafts

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use timeline_core::{
    activate, resolve_image, Activation, EpisodeFeed, FlattenedEvent, TimelineConfig,
    TimelineStats, TimelineView, TracingNotifier, YearGroup,
};
use timeline_store::{AdvertisementStore, JsonFileStore};
use timeline_types::{Advertisement, AdvertisementDraft, Episode, EpisodeDraft, Settings};

use crate::cli::AdminCommands;

/// Load settings and apply CLI overrides (highest precedence).
pub fn load_settings(
    config_path: Option<&str>,
    data_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(data) = data_override {
        settings.data_path = data.to_string();
    }
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }

    settings.validate().context("Invalid configuration")?;
    Ok(settings)
}

/// Install the tracing subscriber. RUST_LOG wins over the configured level.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Opened store plus the settings derived from it.
pub struct TimelineApp {
    pub config: TimelineConfig,
    store: Arc<JsonFileStore>,
}

impl TimelineApp {
    pub async fn open(settings: &Settings) -> Result<Self> {
        let path = settings.expanded_data_path();
        let store = JsonFileStore::open(&path)
            .await
            .with_context(|| format!("Failed to open data file {}", path.display()))?;

        Ok(Self {
            config: TimelineConfig::from(settings),
            store: Arc::new(store),
        })
    }

    /// A feed over the store, already loaded.
    pub async fn feed(&self) -> Result<EpisodeFeed> {
        let mut feed = EpisodeFeed::new(self.store.clone(), Arc::new(TracingNotifier));
        feed.refresh().await.context("Failed to load episodes")?;
        Ok(feed)
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }
}

fn read_draft<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Invalid draft in {}", path.display()))
}

fn date_label(event: &FlattenedEvent<'_>) -> String {
    if event.date_is_approximate {
        format!("c. {}", event.date)
    } else {
        event.date.to_string()
    }
}

fn event_line(event: &FlattenedEvent<'_>) -> String {
    if event.is_primary {
        format!("  * {}  {}", date_label(event), event.title)
    } else {
        format!(
            "  - {}  {}  (from: {})",
            date_label(event),
            event.title,
            event.episode.title
        )
    }
}

fn render_group(group: &YearGroup<'_>) -> String {
    let noun = if group.event_count() == 1 { "event" } else { "events" };
    let mut out = format!("{}  ({} {})\n", group.year, group.event_count(), noun);
    for event in &group.events {
        out.push_str(&event_line(event));
        out.push('\n');
    }
    out
}

/// Human-readable rendering of a timeline view.
pub fn render_view(view: &TimelineView<'_>) -> String {
    match view {
        TimelineView::Loading => "Loading episodes...\n".to_string(),
        TimelineView::Unavailable { message } => format!("Episodes unavailable: {message}\n"),
        TimelineView::Empty => "No episodes yet.\n".to_string(),
        TimelineView::NoResults { term } => format!("No episodes match \"{term}\".\n"),
        TimelineView::Ready { groups, stale } => {
            let mut out = String::new();
            if *stale {
                out.push_str("(showing last loaded data; refresh failed)\n");
            }
            for group in groups {
                out.push_str(&render_group(group));
            }
            out
        }
    }
}

/// Human-readable rendering of a year activation.
pub fn render_activation(activation: &Activation<'_>, config: &TimelineConfig) -> String {
    match activation {
        Activation::OpenEpisode(episode) => render_episode(episode),
        Activation::YearDetail(detail) => {
            let mut out = format!("{}: {} events\n", detail.year, detail.len());
            if !detail.episodes.is_empty() {
                out.push_str("Episodes:\n");
                for event in &detail.episodes {
                    out.push_str(&format!(
                        "{}\n      image: {}\n",
                        event_line(event),
                        resolve_image(event, &config.placeholder_image_url)
                    ));
                }
            }
            if !detail.historical_events.is_empty() {
                out.push_str("Historical events:\n");
                for event in &detail.historical_events {
                    out.push_str(&format!(
                        "{}\n      image: {}\n",
                        event_line(event),
                        resolve_image(event, &config.placeholder_image_url)
                    ));
                }
            }
            out
        }
    }
}

fn render_episode(episode: &Episode) -> String {
    let mut out = format!("{}\n", episode.title);
    let approx = if episode.date_is_approximate { " (approximate)" } else { "" };
    out.push_str(&format!("  date: {}{}\n", episode.historical_date, approx));
    if let Some(description) = &episode.description {
        out.push_str(&format!("  {description}\n"));
    }
    if let Some(url) = &episode.listen_url {
        out.push_str(&format!("  listen: {url}\n"));
    }
    for event in &episode.timeline_events {
        out.push_str(&format!("  - {}  {}\n", event.date, event.title));
    }
    out
}

pub fn render_stats(stats: &TimelineStats) -> String {
    format!(
        "{} episodes\n{} years of history\n",
        stats.episode_count, stats.years_of_history
    )
}

fn render_episode_row(episode: &Episode) -> String {
    format!(
        "{}  {}  {}  ({} timeline events)",
        episode.id,
        episode.historical_date,
        episode.title,
        episode.timeline_events.len()
    )
}

fn render_ad_row(ad: &Advertisement) -> String {
    format!(
        "{}  [{}]  {}  by {}",
        ad.id, ad.system, ad.description, ad.submitted_by
    )
}

/// Print the timeline, optionally filtered.
pub async fn show_timeline(app: &TimelineApp, search: Option<&str>, json: bool) -> Result<()> {
    let feed = app.feed().await?;
    let view = feed.view(search.unwrap_or_default());

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&view).context("Failed to serialize view")?
        );
    } else {
        print!("{}", render_view(&view));
    }
    Ok(())
}

/// Activate the year point for `year`.
pub async fn show_year(app: &TimelineApp, year: i32, search: Option<&str>) -> Result<()> {
    let feed = app.feed().await?;
    let view = feed.view(search.unwrap_or_default());

    let TimelineView::Ready { groups, .. } = &view else {
        print!("{}", render_view(&view));
        return Ok(());
    };

    let group = groups
        .iter()
        .find(|g| g.year == year)
        .with_context(|| format!("No events in {year}"))?;
    debug!(year, events = group.event_count(), "Activating year");

    let activation = activate(group)?;
    print!("{}", render_activation(&activation, &app.config));
    Ok(())
}

pub async fn show_stats(app: &TimelineApp) -> Result<()> {
    let feed = app.feed().await?;
    print!("{}", render_stats(&feed.stats()));
    Ok(())
}

/// Run an admin command against the store.
pub async fn handle_admin(app: &TimelineApp, command: AdminCommands) -> Result<()> {
    match command {
        AdminCommands::AddEpisode { file } => {
            let draft: EpisodeDraft = read_draft(&file)?;
            let mut feed = app.feed().await?;
            let episode = feed.add(draft).await?;
            println!("Created episode {}", episode.id);
        }
        AdminCommands::UpdateEpisode { id, file } => {
            let draft: EpisodeDraft = read_draft(&file)?;
            let mut feed = app.feed().await?;
            let episode = feed.update(&id, draft).await?;
            println!("Updated episode {}", episode.id);
        }
        AdminCommands::DeleteEpisode { id } => {
            let mut feed = app.feed().await?;
            feed.delete(&id).await?;
            println!("Deleted episode {id}");
        }
        AdminCommands::ListEpisodes => {
            let feed = app.feed().await?;
            for episode in feed.episodes() {
                println!("{}", render_episode_row(episode));
            }
        }
        AdminCommands::AddAd { file } => {
            let draft: AdvertisementDraft = read_draft(&file)?;
            let ad = app.store().create_advertisement(draft).await?;
            info!(ad_id = %ad.id, "Advertisement submitted");
            println!("Created advertisement {}", ad.id);
        }
        AdminCommands::UpdateAd { id, file } => {
            let draft: AdvertisementDraft = read_draft(&file)?;
            let ad = app.store().update_advertisement(&id, draft).await?;
            println!("Updated advertisement {}", ad.id);
        }
        AdminCommands::DeleteAd { id } => {
            app.store().delete_advertisement(&id).await?;
            println!("Deleted advertisement {id}");
        }
        AdminCommands::ListAds => {
            for ad in app.store().list_advertisements().await? {
                println!("{}", render_ad_row(&ad));
            }
        }
    }
    Ok(())
}
