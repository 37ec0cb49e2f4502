//! Command-line front end.
//!
//! Results go to stdout; logging goes to stderr (`RUST_LOG`, default `warn`).

use api_tester::app::ApiTester;
use api_tester::assets::{AssetCache, HttpAssetSource};
use api_tester::composer::ComposerInputs;
use api_tester::config::{self, AppConfig, CONFIG_FILE_NAME};
use api_tester::executor::{ExecutionConfig, ReqwestTransport};
use api_tester::formatter::{export_result, RenderedResult};
use api_tester::history::ui::{format_history_details, format_history_list, EMPTY_HISTORY_MESSAGE};
use api_tester::history::{HistoryConfig, HistoryEntry, HistoryStore};
use api_tester::models::HttpMethod;
use api_tester::storage::FileSlotStore;
use api_tester::surface::Surface;
use api_tester::theme::{Theme, ThemeStore};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Parser)]
#[command(name = "api-tester", version, about)]
struct Cli {
    /// Directory holding config.json, history, theme and the asset cache
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send one request and record it in history
    Send {
        /// Target URL
        url: String,

        /// HTTP method
        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Header as 'Key: Value'; may be repeated
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Request body (ignored for GET)
        #[arg(short = 'd', long)]
        data: Option<String>,

        /// Also write the response body to this file
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Inspect or edit the request history
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show or change the theme
    Theme {
        /// show, toggle, light or dark
        #[arg(default_value = "show")]
        action: String,
    },

    /// Manage the offline asset cache
    Assets {
        #[command(subcommand)]
        action: AssetsAction,
    },
}

#[derive(Debug, Subcommand)]
enum HistoryAction {
    /// List entries, newest first
    List,

    /// Delete the entry at INDEX
    Delete { index: usize },

    /// Load the entry at INDEX into the composer
    Replay {
        index: usize,

        /// Send the replayed request right away
        #[arg(long)]
        send: bool,
    },

    /// Delete every entry
    Clear,
}

#[derive(Debug, Subcommand)]
enum AssetsAction {
    /// Fetch every asset from BASE_URL into the current cache
    Install { base_url: String },

    /// Delete cache versions other than the current one
    Activate,

    /// Print an asset, cache first
    Get {
        path: String,

        /// Fall back to this origin on a cache miss
        #[arg(long)]
        base: Option<String>,
    },
}

/// Prints to the terminal.
struct TerminalSurface {
    inputs: Mutex<ComposerInputs>,
    show_history: bool,
}

impl TerminalSurface {
    fn new(inputs: ComposerInputs, show_history: bool) -> Self {
        Self {
            inputs: Mutex::new(inputs),
            show_history,
        }
    }
}

impl Surface for TerminalSurface {
    fn read_inputs(&self) -> ComposerInputs {
        self.inputs.lock().map(|i| i.clone()).unwrap_or_default()
    }

    fn set_inputs(&self, inputs: &ComposerInputs) {
        if let Ok(mut current) = self.inputs.lock() {
            *current = inputs.clone();
        }
    }

    fn render_result(&self, result: &RenderedResult) {
        println!("{}", result.to_display_string());
    }

    fn render_history(&self, entries: &[HistoryEntry]) {
        if !self.show_history {
            return;
        }

        if entries.is_empty() {
            println!("{}", EMPTY_HISTORY_MESSAGE);
        } else {
            for line in format_history_list(entries) {
                println!("{}", line);
            }
        }
    }

    fn warn(&self, message: &str) {
        eprintln!("Warning: {}", message);
    }
}

struct Context {
    config: AppConfig,
    data_dir: PathBuf,
}

impl Context {
    fn load(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let config_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => config::default_data_dir()?,
        };

        let mut config = config::load_config_file(&config_dir.join(CONFIG_FILE_NAME))?;
        if let Some(timeout) = cli.timeout {
            config.timeout_ms = Some(timeout);
            config.validate().map_err(config::ConfigError::Invalid)?;
        }

        let data_dir = config::resolve_data_dir(cli.data_dir.clone(), &config)?;
        log::debug!("Using data directory {}", data_dir.display());

        Ok(Self { config, data_dir })
    }

    fn slots(&self) -> FileSlotStore {
        FileSlotStore::new(&self.data_dir)
    }

    fn app(
        &self,
        inputs: ComposerInputs,
        show_history: bool,
    ) -> Result<ApiTester<TerminalSurface, ReqwestTransport, FileSlotStore>, Box<dyn Error>> {
        let transport = ReqwestTransport::new(&ExecutionConfig::from_app_config(&self.config))?;
        let history = HistoryStore::open(self.slots(), HistoryConfig::from_app_config(&self.config));
        let surface = Arc::new(TerminalSurface::new(inputs, show_history));

        Ok(ApiTester::new(surface, transport, history))
    }

    fn asset_cache(&self) -> AssetCache {
        AssetCache::new(self.data_dir.join("cache"))
    }
}

fn build_inputs(
    method: &str,
    url: String,
    headers: &[String],
    data: Option<String>,
) -> Result<ComposerInputs, Box<dyn Error>> {
    let method =
        HttpMethod::parse(method).ok_or_else(|| format!("Unknown HTTP method: {}", method))?;

    let mut inputs = ComposerInputs::new(method, url);
    inputs.header_rows.clear();
    for header in headers {
        if !inputs.add_preset(header) {
            return Err(format!("Invalid header (expected 'Key: Value'): {}", header).into());
        }
    }
    inputs.body = data.unwrap_or_default();

    Ok(inputs)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ctx = Context::load(&cli)?;

    match cli.command {
        Command::Send {
            url,
            method,
            headers,
            data,
            output,
        } => {
            let inputs = build_inputs(&method, url, &headers, data)?;
            let app = ctx.app(inputs, false)?;

            if let Some(report) = app.send_request().await {
                if let Some(path) = output {
                    export_result(&report.rendered, &path)?;
                    eprintln!("Response written to {}", path.display());
                }
            }
        }

        Command::History { action } => {
            let app = ctx.app(ComposerInputs::default(), true)?;

            match action.unwrap_or(HistoryAction::List) {
                HistoryAction::List => app.render_history(),
                HistoryAction::Delete { index } => {
                    if app.remove(index).is_none() {
                        eprintln!("No history entry at index {}", index);
                    }
                }
                HistoryAction::Replay { index, send } => {
                    if !app.replay(index) {
                        return Err(format!("No history entry at index {}", index).into());
                    }

                    if send {
                        app.send_request().await;
                    } else if let Some(entry) = app
                        .history()
                        .lock()
                        .ok()
                        .and_then(|h| h.get(index).cloned())
                    {
                        print!("{}", format_history_details(&entry));
                    }
                }
                HistoryAction::Clear => app.clear_history(),
            }
        }

        Command::Theme { action } => {
            let mut themes = ThemeStore::load(ctx.slots());

            let theme = match action.as_str() {
                "show" => themes.current(),
                "toggle" => themes.toggle(),
                other => {
                    let theme =
                        Theme::parse(other).ok_or_else(|| format!("Unknown theme: {}", other))?;
                    themes.set(theme);
                    theme
                }
            };
            println!("{}", theme);
        }

        Command::Assets { action } => {
            let cache = ctx.asset_cache();

            match action {
                AssetsAction::Install { base_url } => {
                    let source = HttpAssetSource::new(&base_url)?;
                    let count = cache.install(&source).await?;
                    println!("Installed {} assets into {}", count, cache.name());
                }
                AssetsAction::Activate => {
                    let deleted = cache.activate()?;
                    if deleted.is_empty() {
                        println!("No stale caches");
                    } else {
                        for name in deleted {
                            println!("Deleted {}", name);
                        }
                    }
                }
                AssetsAction::Get { path, base } => {
                    let bytes = match base {
                        Some(base) => {
                            let source = HttpAssetSource::new(&base)?;
                            cache.fetch(&path, &source).await?.0
                        }
                        None => cache.get_cached(&path)?,
                    };
                    std::io::stdout().write_all(&bytes)?;
                }
            }
        }
    }

    Ok(())
}
