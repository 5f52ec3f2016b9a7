//! Application entry point: steno translations in, keyboard edits out.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Build the [`Formatter`] from config.
//! 4. Create the tokio runtime and spawn the [`FormatterService`].
//! 5. Spawn the stdin reader thread.
//! 6. Print every instruction batch until stdin is closed.
//!
//! # Input
//!
//! One line per event:
//!
//! ```text
//! {"strokes": ["TEFT"], "english": "test"}
//! {"strokes": ["1-9"]}
//! *
//! !reset
//! ```

use std::io::BufRead;

use anyhow::Context as _;
use serde::Deserialize;
use tokio::sync::mpsc;

use steno_format::{
    config::AppConfig,
    format::Formatter,
    output::{Instruction, OutputSink, WriterOutput},
    pipeline::{new_shared_state, service_channel, FormatRequest, FormatterService, ServiceHandle},
    steno::Translation,
};

const UNDO_LINE: &str = "*";
const RESET_LINE: &str = "!reset";

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TranslationLine {
    strokes: Vec<String>,
    #[serde(default)]
    english: Option<String>,
}

impl TranslationLine {
    fn into_translation(self) -> Translation {
        let strokes: Vec<&str> = self.strokes.iter().map(String::as_str).collect();
        Translation::from_steno(&strokes, self.english.as_deref())
    }
}

// ---------------------------------------------------------------------------
// stdin reader
// ---------------------------------------------------------------------------

/// Read events from stdin and hand them to the service.  Keeps its own
/// stack of submitted translations so `*` knows what to take back.
fn read_stdin(handle: ServiceHandle) {
    let mut submitted: Vec<Translation> = Vec::new();

    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("stdin: read failed: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = match line {
            UNDO_LINE => match submitted.pop() {
                Some(last) => handle.blocking_submit(FormatRequest {
                    undo: vec![last],
                    do_: Vec::new(),
                    prev: submitted.last().cloned(),
                }),
                None => {
                    log::info!("stdin: nothing to undo");
                    continue;
                }
            },
            RESET_LINE => {
                submitted.clear();
                handle.blocking_reset()
            }
            _ => match serde_json::from_str::<TranslationLine>(line) {
                Ok(parsed) => {
                    let translation = parsed.into_translation();
                    let request = FormatRequest {
                        undo: Vec::new(),
                        do_: vec![translation.clone()],
                        prev: submitted.last().cloned(),
                    };
                    submitted.push(translation);
                    handle.blocking_submit(request)
                }
                Err(e) => {
                    log::warn!("stdin: ignoring malformed line {line:?}: {e}");
                    continue;
                }
            },
        };

        if let Err(e) = result {
            log::error!("stdin: {e}");
            break;
        }
    }
    log::debug!("stdin: closed");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("steno-format starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Formatter
    let formatter =
        Formatter::from_config(&config).context("invalid orthography rule in settings")?;

    // 4. Tokio runtime + formatting service
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    let (handle, command_rx) = service_channel(64);
    let (output_tx, mut output_rx) = mpsc::channel::<Vec<Instruction>>(64);
    let service = FormatterService::new(formatter, new_shared_state());
    rt.spawn(service.run(command_rx, output_tx));

    // 5. stdin reader thread
    let reader = std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || read_stdin(handle))
        .context("failed to spawn stdin reader thread")?;

    // 6. Print instructions until the service shuts down
    rt.block_on(async {
        let mut sink = WriterOutput::new(std::io::stdout());
        while let Some(batch) = output_rx.recv().await {
            for instruction in &batch {
                if let Err(e) = instruction.send_to(&mut sink as &mut dyn OutputSink) {
                    log::warn!("output: {e}");
                }
            }
        }
    });

    if reader.join().is_err() {
        log::error!("stdin reader thread panicked");
    }
    log::info!("steno-format shutting down");
    Ok(())
}
