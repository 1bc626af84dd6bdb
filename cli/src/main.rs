mod api;
mod map;
mod sync;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use location::{MapView, ShareLink, User, UserId, ValidationError, parse_map_view, parse_map_view_response};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use crate::api::{ApiError, FetchOutcome, HttpSyncApi, SyncApi};
use crate::map::{MapSurface, MemoryMap};
use crate::sync::{LoopHandle, StopSignal, spawn_share_loop, spawn_view_loop};

/// About 30 updates per second.
const DEFAULT_INTERVAL_MS: u64 = 33;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no view published for {0}")]
    NotFound(UserId),
    #[error("invalid map view: {0}")]
    InvalidView(#[from] ValidationError),
    #[error("expected `lat lon [zoom]`, got {0:?}")]
    InvalidViewLine(String),
    #[error("failed to read stdin: {0}")]
    Stdin(std::io::Error),
    #[error("failed to listen for ctrl-c: {0}")]
    Signal(std::io::Error),
    #[error("sync loop failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "coordshare", about = "Share and follow map viewports")]
struct Cli {
    #[arg(long, env = "COORDSHARE_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    /// Delay between sync requests.
    #[arg(
        long,
        env = "COORDSHARE_INTERVAL_MS",
        default_value_t = DEFAULT_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new share session and print its link.
    New,
    /// Publish a viewport continuously. Reads `lat lon [zoom]` lines from stdin.
    Share {
        /// Existing session id; a new one is created when omitted.
        id: Option<String>,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        lat: String,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        lon: String,
        #[arg(long)]
        zoom: Option<String>,
    },
    /// Follow a shared viewport, printing each change as JSON.
    View { id: String },
    /// Print the latest published viewport once.
    Get { id: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let api: Arc<dyn SyncApi> = Arc::new(HttpSyncApi::new(&cli.base_url));
    let interval = Duration::from_millis(cli.interval_ms);

    match cli.command {
        Command::New => run_new(api.as_ref(), &cli.base_url).await,
        Command::Share { id, lat, lon, zoom } => {
            let initial = view_from_parts(&lat, &lon, zoom.as_deref())?;
            run_share(api, &cli.base_url, id, initial, interval).await
        }
        Command::View { id } => run_view(api, UserId::from(id), interval).await,
        Command::Get { id } => run_get(api.as_ref(), &UserId::from(id)).await,
    }
}

async fn run_new(api: &dyn SyncApi, base_url: &str) -> Result<(), CliError> {
    let user = api.create_user().await?;
    let share = ShareLink::for_user(base_url, &user);
    print_json(&json!({ "id": user.id, "share": share.url }))
}

async fn run_share(
    api: Arc<dyn SyncApi>,
    base_url: &str,
    id: Option<String>,
    initial: MapView,
    interval: Duration,
) -> Result<(), CliError> {
    let user = match id {
        Some(id) => User { id: UserId::from(id) },
        None => api.create_user().await?,
    };
    eprintln!("sharing at {}", ShareLink::for_user(base_url, &user).url);

    let map = MemoryMap::new(initial);
    let handle = spawn_share_loop(api, map.clone(), user.id, interval, StopSignal::new());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.map_err(CliError::Signal)?;
                break;
            }
            line = lines.next_line(), if stdin_open => match line.map_err(CliError::Stdin)? {
                Some(line) => match parse_view_line(&line) {
                    Ok(Some(view)) => map.set_map_view(&view),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "skipping viewport line"),
                },
                None => stdin_open = false,
            },
        }
    }

    shutdown(handle).await
}

async fn run_view(api: Arc<dyn SyncApi>, id: UserId, interval: Duration) -> Result<(), CliError> {
    let map = MemoryMap::unset(MapView::new(0.0, 0.0, None));
    let mut changes = map.subscribe();
    let handle = spawn_view_loop(api, map, id, interval, StopSignal::new());

    loop {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.map_err(CliError::Signal)?;
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(view) = *changes.borrow_and_update() {
                    println!("{}", serde_json::to_string(&view)?);
                }
            }
        }
    }

    shutdown(handle).await
}

async fn run_get(api: &dyn SyncApi, id: &UserId) -> Result<(), CliError> {
    match api.fetch(id).await? {
        FetchOutcome::Found(body) => {
            let view = parse_map_view_response(&body)?;
            print_json(&serde_json::to_value(view)?)
        }
        FetchOutcome::NotFound => Err(CliError::NotFound(id.clone())),
    }
}

async fn shutdown(handle: LoopHandle) -> Result<(), CliError> {
    debug!(state = ?handle.state(), "stopping sync loop");
    handle.stop();
    handle.join().await?;
    Ok(())
}

/// Build a view from textual parts, validated like a published payload.
fn view_from_parts(lat: &str, lon: &str, zoom: Option<&str>) -> Result<MapView, CliError> {
    let payload = json!({ "location": { "latitude": lat, "longitude": lon }, "zoom": zoom });
    Ok(parse_map_view(&payload)?)
}

/// Parse a stdin line `lat lon [zoom]`. Blank lines and `#` comments yield `None`.
fn parse_view_line(line: &str) -> Result<Option<MapView>, CliError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    match parts.as_slice() {
        [lat, lon] => view_from_parts(lat, lon, None).map(Some),
        [lat, lon, zoom] => view_from_parts(lat, lon, Some(*zoom)).map(Some),
        _ => Err(CliError::InvalidViewLine(trimmed.to_owned())),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
