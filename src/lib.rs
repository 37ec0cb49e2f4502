//! API tester: compose, send and replay ad-hoc HTTP requests.
//!
//! A request is composed from a method, a URL, header rows and a body, sent
//! once, and its outcome rendered. Every send that reaches the network is
//! recorded in a bounded, persisted history that can be listed, replayed
//! into the composer and pruned.
//!
//! # Architecture
//!
//! - **models**: outbound request and received response data
//! - **composer**: the user's inputs and how they become a request
//! - **executor**: sends one request and classifies the outcome
//! - **formatter**: renders an outcome for display and export
//! - **history**: the bounded most-recent-first log and its listing
//! - **storage**: the named-slot persistence port
//! - **theme**: persisted light/dark preference
//! - **assets**: versioned offline cache of the front end's static files
//! - **surface** / **app**: the UI port and the controller driving it
//! - **config**: user settings read from `config.json`
//!
//! # Example
//!
//! ```no_run
//! use api_tester::composer::ComposerInputs;
//! use api_tester::executor::{ExecutionConfig, Executor, ReqwestTransport};
//! use api_tester::history::{HistoryConfig, HistoryStore};
//! use api_tester::models::HttpMethod;
//! use api_tester::storage::MemorySlotStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let history = HistoryStore::open(MemorySlotStore::new(), HistoryConfig::default());
//! let transport = ReqwestTransport::new(&ExecutionConfig::default())?;
//! let executor = Executor::new(transport, history.into_shared());
//!
//! let inputs = ComposerInputs::new(HttpMethod::GET, "https://httpbin.org/get");
//! let report = executor.execute(&inputs).await?;
//! println!("{}", report.rendered.to_display_string());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod assets;
pub mod composer;
pub mod config;
pub mod executor;
pub mod formatter;
pub mod history;
pub mod models;
pub mod storage;
pub mod surface;
pub mod theme;

pub use app::ApiTester;
pub use composer::{ComposerInputs, HeaderRow};
pub use config::AppConfig;
pub use executor::{ExecuteError, ExecutionReport, Executor, Outcome, RequestError};
pub use formatter::RenderedResult;
pub use history::{HistoryEntry, HistoryStore};
pub use surface::Surface;
