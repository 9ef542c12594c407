use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use vibewall::export::{self, DirectorySink};
use vibewall::logger::{self, LoggerConfig};
use vibewall::{AppConfig, AppState, HistoryStore, ImageClient, JsonFileStorage, Orchestrator, Phase};

#[derive(Debug, PartialEq)]
enum Command {
    Generate(String),
    Remix,
    View(usize),
    Close,
    Save(Option<usize>),
    SaveAll,
    History,
    Replay(usize),
    ClearHistory,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let Some(rest) = line.trim().strip_prefix('/') else {
            return Command::Generate(line.to_string());
        };
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        // Users count from 1.
        let index = parts
            .next()
            .and_then(|n| n.parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1));

        match (name, index) {
            ("remix", _) => Command::Remix,
            ("view", Some(i)) => Command::View(i),
            ("close", _) => Command::Close,
            ("save", i) => Command::Save(i),
            ("saveall", _) => Command::SaveAll,
            ("history", _) => Command::History,
            ("replay", Some(i)) => Command::Replay(i),
            ("clear-history", _) => Command::ClearHistory,
            ("help", _) => Command::Help,
            ("quit", _) | ("exit", _) => Command::Quit,
            _ => Command::Unknown(line.trim().to_string()),
        }
    }
}

fn print_help() {
    println!("Type a vibe and press enter to generate 4 wallpapers.");
    println!("  /remix            new batch for the current vibe");
    println!("  /view N, /close   open or close wallpaper N full-screen");
    println!("  /save [N]         download wallpaper N (or the open one)");
    println!("  /saveall          download every wallpaper as a zip");
    println!("  /history          list previous vibes");
    println!("  /replay N         generate again from history entry N");
    println!("  /clear-history    forget all previous vibes");
    println!("  /quit");
}

type RenderKey = (Phase, u64, Option<String>, Option<String>);

/// Snapshots with equal keys look the same on screen.
fn render_key(state: &AppState) -> RenderKey {
    (
        state.phase,
        state.latest_request,
        state.selected.clone(),
        state.error.clone(),
    )
}

fn render(state: &AppState) {
    match state.phase {
        Phase::Idle => {}
        Phase::Loading => println!("✨ Generating wallpapers for \"{}\"...", state.active_prompt),
        Phase::Failed => println!("❌ {}", state.error.as_deref().unwrap_or("Something went wrong.")),
        Phase::Success => {
            if let Some(image) = state.selected_image() {
                println!("🖼️  Viewing {} ({} bytes). /save, /remix or /close", image.id, image.image_data.len());
                return;
            }
            println!("🎨 {} wallpapers for \"{}\":", state.images.len(), state.active_prompt);
            for (i, image) in state.images.iter().enumerate() {
                println!("  {}. {} ({} KB)", i + 1, image.id, image.image_data.len() / 1024);
            }
        }
    }
}

fn render_history(entries: &[String]) {
    if entries.is_empty() {
        println!("No history yet.");
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("  {}. {}", i + 1, entry);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_config = if cfg!(debug_assertions) {
        LoggerConfig::development()
    } else {
        LoggerConfig::production()
    };
    logger::init_with_config(log_config)?;

    match dotenv::dotenv() {
        Ok(_) => log::debug!(".env file loaded"),
        Err(_) => log::debug!("No .env file found, using process environment"),
    }

    let config = AppConfig::from_env()?;
    logger::log_startup_info(&config);

    let client = ImageClient::new(config.gemini.clone())?;
    let history = HistoryStore::load(Arc::new(JsonFileStorage::new(&config.history_dir)));
    let orchestrator = Arc::new(Orchestrator::new(Arc::new(client), history));
    let sink = DirectorySink::new(&config.download_dir);

    let mut updates = orchestrator.subscribe();
    let renderer = tokio::spawn(async move {
        let mut last = None;
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update().clone();
            let key = render_key(&state);
            if last.as_ref() != Some(&key) {
                render(&state);
                last = Some(key);
            }
        }
    });

    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Generate(prompt) => {
                let orchestrator = orchestrator.clone();
                tokio::spawn(async move {
                    orchestrator.submit(&prompt).await;
                });
            }
            Command::Remix => {
                let orchestrator = orchestrator.clone();
                tokio::spawn(async move {
                    orchestrator.remix().await;
                });
            }
            Command::Replay(index) => {
                let orchestrator = orchestrator.clone();
                tokio::spawn(async move {
                    if orchestrator.replay(index).await.is_none() {
                        println!("No history entry {}", index + 1);
                    }
                });
            }
            Command::View(index) => {
                let state = orchestrator.state();
                match state.images.get(index) {
                    Some(image) => orchestrator.select_image(&image.id),
                    None => println!("No wallpaper {}", index + 1),
                }
            }
            Command::Close => orchestrator.close_image(),
            Command::Save(index) => {
                let state = orchestrator.state();
                let image = match index {
                    Some(i) => state.images.get(i),
                    None => state.selected_image(),
                };
                match image {
                    Some(image) => match export::export_one(image, &state.active_prompt, &sink) {
                        Ok(path) => println!("💾 Saved {}", path.display()),
                        Err(e) => println!("❌ Could not save: {}", e),
                    },
                    None => println!("Nothing to save"),
                }
            }
            Command::SaveAll => {
                let state = orchestrator.state();
                let base = export::archive_base_name(&state.active_prompt);
                if let Some(path) = export::export_all(&state.images, &base, &sink).await {
                    println!("📦 Saved {}", path.display());
                }
            }
            Command::History => render_history(&orchestrator.history()),
            Command::ClearHistory => {
                orchestrator.clear_history();
                println!("History cleared");
            }
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Unknown(input) => println!("Unknown command: {} (try /help)", input),
        }
    }

    orchestrator.shutdown();
    renderer.abort();
    Ok(())
}
