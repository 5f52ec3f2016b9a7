//! Formatting service.
//!
//! Translations may be produced on any thread; the formatter itself lives
//! on a single tokio task and handles them strictly in order.
//!
//! # Architecture
//!
//! ```text
//! stdin / machine thread
//!        │  ServiceHandle::blocking_submit(FormatRequest)
//!        ▼
//! FormatterService::run()  ← async tokio task, owns Formatter
//!        │
//!        ├─ Format(request) → Formatter::format_instructions
//!        └─ Reset           → Formatter::reset
//!        │
//!        ▼
//! Vec<Instruction> (mpsc) ──▶ OutputSink
//!
//! SharedState (Arc<Mutex<ServiceState>>) ←── refreshed after every request
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use steno_format::config::AppConfig;
//! use steno_format::format::Formatter;
//! use steno_format::pipeline::{new_shared_state, service_channel, FormatRequest, FormatterService};
//! use steno_format::steno::Translation;
//!
//! #[tokio::main]
//! async fn main() {
//!     let formatter = Formatter::from_config(&AppConfig::default()).unwrap();
//!     let (handle, command_rx) = service_channel(16);
//!     let (output_tx, mut output_rx) = tokio::sync::mpsc::channel(16);
//!     let service = FormatterService::new(formatter, new_shared_state());
//!     tokio::spawn(service.run(command_rx, output_tx));
//!
//!     let hello = Translation::from_steno(&["HEL"], Some("hello"));
//!     handle.submit(FormatRequest::push(hello)).await.unwrap();
//!     println!("{:?}", output_rx.recv().await);
//! }
//! ```

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{
    service_channel, FormatRequest, FormatterService, ServiceCommand, ServiceError, ServiceHandle,
};
pub use state::{new_shared_state, ServicePhase, ServiceState, SharedState};
