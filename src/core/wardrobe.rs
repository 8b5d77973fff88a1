use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::ProgressBar;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::closet::{ClosetStore, StoreError};
use crate::config::Settings;
use crate::models::{
    Classifier, Embedder, HubClassifier, HubClient, HubEmbedder, HubStylist, Stylist,
    EXPLANATION_FALLBACK, UNKNOWN_LABEL,
};
use crate::outfit::{generate_outfit, Event, Weather, OUTFIT_SIZE};
use crate::ui::Console;

/// Wires the console, the closet store, and the remote model providers
/// into the add / suggest / similar flows.
pub struct Wardrobe {
    settings: Settings,
    console: Console,
    store: ClosetStore,
    providers: Option<Providers>,
}

struct Providers {
    classifier: Box<dyn Classifier>,
    embedder: Box<dyn Embedder>,
    stylist: Box<dyn Stylist>,
}

impl Wardrobe {
    pub fn new(settings: Settings, closet_override: Option<PathBuf>) -> Result<Self> {
        let console = Console::new();

        let path = match closet_override {
            Some(path) => path,
            None => settings.closet_path()?,
        };

        // A broken closet file degrades to an empty closet for this run;
        // the file itself is left untouched until the next successful add.
        let store = match ClosetStore::open(settings.embedder.dimension, path.clone()) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("could not load closet from {}: {}", path.display(), e);
                console.warn(&format!("Could not load closet ({}), starting empty", e));
                ClosetStore::new(settings.embedder.dimension, path)
            }
        };

        let providers = settings.get_api_token().map(|token| {
            let client = Arc::new(HubClient::new(settings.hub.api_base.clone(), token));
            Providers {
                classifier: Box::new(
                    HubClassifier::new(client.clone()).with_model(&settings.classifier.model),
                ),
                embedder: Box::new(
                    HubEmbedder::new(client.clone())
                        .with_model(&settings.embedder.model, settings.embedder.dimension),
                ),
                stylist: Box::new(
                    HubStylist::new(client)
                        .with_model(&settings.stylist.model)
                        .with_max_new_tokens(settings.stylist.max_new_tokens),
                ),
            }
        });

        Ok(Self {
            settings,
            console,
            store,
            providers,
        })
    }

    fn missing_token_message(&self) -> String {
        format!(
            "Please set {} in your environment or .env file",
            self.settings.hub.token_env
        )
    }

    fn spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }

    /// Classify and embed one clothing photo, then add it to the closet.
    pub async fn add_item(&mut self, image_path: &Path) -> Result<()> {
        let Some(providers) = &self.providers else {
            self.console.error(&self.missing_token_message());
            return Ok(());
        };

        let image = fs::read(image_path)
            .with_context(|| format!("Failed to read image {}", image_path.display()))?;

        let spinner = self.spinner("Classifying...");
        let label = match providers.classifier.classify(&image).await {
            Ok(label) => label,
            Err(e) => {
                spinner.finish_and_clear();
                self.console.error(&format!("Classification failed: {}", e));
                UNKNOWN_LABEL.to_string()
            }
        };
        spinner.finish_and_clear();
        self.console.predicted_label(&label);

        let spinner = self.spinner("Embedding...");
        let vector = match providers.embedder.embed(&image).await {
            Ok(vector) => vector,
            Err(e) => {
                spinner.finish_and_clear();
                self.console.error(&format!("Embedding failed: {}", e));
                return Ok(());
            }
        };
        spinner.finish_and_clear();

        match self.store.add(vector, label) {
            Ok(()) => self.console.info("Item added to your closet."),
            Err(e @ StoreError::Dimension { .. }) => {
                self.console.error(&format!("Could not add item: {}", e));
            }
            Err(e) => {
                // The item is in memory for this session, just not on disk
                tracing::warn!("closet save failed: {}", e);
                self.console
                    .warn(&format!("Closet not saved to disk: {}", e));
            }
        }

        Ok(())
    }

    /// Suggest an outfit for the given context and explain it.
    pub async fn suggest(&self, weather: Weather, event: Event) -> Result<()> {
        let items = self.store.get_all_items();
        let outfit = generate_outfit(items, weather, event);
        let outfit = primary_labels(&outfit);

        self.console.outfit(&outfit);
        if outfit.is_empty() {
            return Ok(());
        }

        let explanation = match &self.providers {
            Some(providers) => {
                let spinner = self.spinner("Asking the stylist...");
                let result = providers.stylist.explain(&outfit, weather, event).await;
                spinner.finish_and_clear();
                match result {
                    Ok(text) => text,
                    Err(e) => {
                        self.console.error(&format!("Explanation failed: {}", e));
                        EXPLANATION_FALLBACK.to_string()
                    }
                }
            }
            None => {
                self.console.error(&self.missing_token_message());
                EXPLANATION_FALLBACK.to_string()
            }
        };

        self.console.explanation(&explanation);
        Ok(())
    }

    /// Find the stored items closest to a query photo.
    pub async fn similar(&self, image_path: &Path, top_k: usize) -> Result<()> {
        let Some(providers) = &self.providers else {
            self.console.error(&self.missing_token_message());
            return Ok(());
        };

        let image = fs::read(image_path)
            .with_context(|| format!("Failed to read image {}", image_path.display()))?;

        let spinner = self.spinner("Embedding...");
        let vector = match providers.embedder.embed(&image).await {
            Ok(vector) => vector,
            Err(e) => {
                spinner.finish_and_clear();
                self.console.error(&format!("Embedding failed: {}", e));
                return Ok(());
            }
        };
        spinner.finish_and_clear();

        match self.store.search(&vector, top_k) {
            Ok(labels) => self.console.similar_items(&labels),
            Err(e) => self.console.error(&format!("Search failed: {}", e)),
        }

        Ok(())
    }

    pub fn items(&self) {
        self.console.list_items(self.store.get_all_items());
    }

    pub async fn repl(&mut self) -> Result<()> {
        self.console
            .info("Interactive closet. Type 'help' for commands, 'exit' to quit.");

        loop {
            print!("\n{} ", "▶".cyan().bold());
            io::stdout().flush()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();

            if input.is_empty() {
                continue;
            }

            let mut parts = input.split_whitespace();
            let command = parts.next().unwrap_or("").to_lowercase();

            match command.as_str() {
                "exit" | "quit" | "q" => {
                    self.console.info("Goodbye!");
                    break;
                }
                "help" | "?" => {
                    self.print_help();
                }
                "items" | "closet" => {
                    self.items();
                }
                "add" => match parts.next() {
                    Some(path) => self.add_item(Path::new(path)).await?,
                    None => self.console.warn("Usage: add <image-path>"),
                },
                "suggest" => {
                    let weather = parts.next().and_then(parse_weather);
                    let event = parts.next().and_then(parse_event);
                    match (weather, event) {
                        (Some(weather), Some(event)) => self.suggest(weather, event).await?,
                        _ => self
                            .console
                            .warn("Usage: suggest <sunny|rainy|cold> <casual|formal|party>"),
                    }
                }
                "similar" => match parts.next() {
                    Some(path) => {
                        let top_k = parts
                            .next()
                            .and_then(|s| s.parse().ok())
                            .unwrap_or(OUTFIT_SIZE);
                        self.similar(Path::new(path), top_k).await?;
                    }
                    None => self.console.warn("Usage: similar <image-path> [k]"),
                },
                _ => {
                    self.console
                        .warn(&format!("Unknown command: {}. Type 'help'.", command));
                }
            }
        }

        Ok(())
    }

    fn print_help(&self) {
        println!("\n{}", "COMMANDS".bold().underline());
        println!("{}", "─".repeat(50));
        println!("  add <image-path>              add a clothing photo to the closet");
        println!("  suggest <weather> <event>     suggest an outfit (sunny|rainy|cold, casual|formal|party)");
        println!("  similar <image-path> [k]      find the closest closet items");
        println!("  items                         list the closet");
        println!("  exit                          quit");
    }
}

fn parse_weather(s: &str) -> Option<Weather> {
    <Weather as clap::ValueEnum>::from_str(s, true).ok()
}

fn parse_event(s: &str) -> Option<Event> {
    <Event as clap::ValueEnum>::from_str(s, true).ok()
}

/// ImageNet-style labels read "jersey, T-shirt, tee shirt"; keep the
/// first segment, lowercased, and drop duplicates that collapse to the
/// same primary form.
fn primary_labels(labels: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for label in labels {
        let primary = label
            .split(',')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();
        if !primary.is_empty() && !cleaned.contains(&primary) {
            cleaned.push(primary);
        }
    }
    cleaned.truncate(OUTFIT_SIZE);
    cleaned
}

/// Offline environment checks for the `doctor` command.
pub fn run_doctor(settings: &Settings) -> Result<()> {
    let console = Console::new();

    match Settings::config_path() {
        Ok(path) if path.exists() => {
            console.success(&format!("Config file: {}", path.display()));
        }
        Ok(path) => {
            console.warn(&format!(
                "Config file not written yet (will be created at {})",
                path.display()
            ));
        }
        Err(e) => console.error(&format!("Config directory: {}", e)),
    }

    if settings.get_api_token().is_some() {
        console.success("Inference API token resolved");
    } else {
        console.error(&format!(
            "No API token: set {} in your environment or .env file",
            settings.hub.token_env
        ));
    }

    let closet_path = settings.closet_path()?;
    if closet_path.exists() {
        match ClosetStore::open(settings.embedder.dimension, closet_path.clone()) {
            Ok(store) => console.success(&format!(
                "Closet file: {} ({} items, dim {})",
                closet_path.display(),
                store.len(),
                store.dimension()
            )),
            Err(e) => console.error(&format!("Closet file: {}", e)),
        }
    } else {
        console.info(&format!(
            "Closet file not created yet ({})",
            closet_path.display()
        ));
    }

    Ok(())
}
