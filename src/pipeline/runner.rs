//! Formatting service: one formatter on one tokio task.
//!
//! [`FormatterService`] owns the [`Formatter`] and handles
//! [`ServiceCommand`]s received over a `tokio::sync::mpsc` channel, so
//! translations produced on any thread are formatted strictly in order.
//!
//! # Flow
//!
//! ```text
//! ServiceHandle::submit(FormatRequest)      (any thread)
//!   └─▶ mpsc ─▶ FormatterService::run        [Formatting]
//!                 ├─ Formatter::format_instructions
//!                 ├─ refresh SharedState     [Idle]
//!                 └─▶ output mpsc: Vec<Instruction>
//! ```

use tokio::sync::mpsc;

use thiserror::Error;

use crate::format::Formatter;
use crate::output::Instruction;
use crate::steno::Translation;

use super::state::{ServicePhase, SharedState};

// ---------------------------------------------------------------------------
// ServiceError
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The service task has stopped.
    #[error("formatting service is not running")]
    Closed,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// One `format` call.
#[derive(Debug, Clone, Default)]
pub struct FormatRequest {
    pub undo: Vec<Translation>,
    pub do_: Vec<Translation>,
    pub prev: Option<Translation>,
}

impl FormatRequest {
    /// Append `translation`.
    pub fn push(translation: Translation) -> Self {
        Self {
            do_: vec![translation],
            ..Self::default()
        }
    }

    /// Take back `translation`.
    pub fn undo(translation: Translation) -> Self {
        Self {
            undo: vec![translation],
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub enum ServiceCommand {
    Format(FormatRequest),
    Reset,
}

// ---------------------------------------------------------------------------
// ServiceHandle
// ---------------------------------------------------------------------------

/// Cloneable sender side of the service.
#[derive(Debug, Clone)]
pub struct ServiceHandle {
    tx: mpsc::Sender<ServiceCommand>,
}

/// Create a handle and the receiver to pass to [`FormatterService::run`].
pub fn service_channel(capacity: usize) -> (ServiceHandle, mpsc::Receiver<ServiceCommand>) {
    let (tx, rx) = mpsc::channel(capacity);
    (ServiceHandle { tx }, rx)
}

impl ServiceHandle {
    pub async fn submit(&self, request: FormatRequest) -> Result<(), ServiceError> {
        self.send(ServiceCommand::Format(request)).await
    }

    pub async fn reset(&self) -> Result<(), ServiceError> {
        self.send(ServiceCommand::Reset).await
    }

    /// For threads outside the runtime.  Panics if called from async code.
    pub fn blocking_submit(&self, request: FormatRequest) -> Result<(), ServiceError> {
        self.blocking_send(ServiceCommand::Format(request))
    }

    /// For threads outside the runtime.  Panics if called from async code.
    pub fn blocking_reset(&self) -> Result<(), ServiceError> {
        self.blocking_send(ServiceCommand::Reset)
    }

    async fn send(&self, command: ServiceCommand) -> Result<(), ServiceError> {
        self.tx.send(command).await.map_err(|_| ServiceError::Closed)
    }

    fn blocking_send(&self, command: ServiceCommand) -> Result<(), ServiceError> {
        self.tx
            .blocking_send(command)
            .map_err(|_| ServiceError::Closed)
    }
}

// ---------------------------------------------------------------------------
// FormatterService
// ---------------------------------------------------------------------------

pub struct FormatterService {
    formatter: Formatter,
    state: SharedState,
}

impl FormatterService {
    pub fn new(formatter: Formatter, state: SharedState) -> Self {
        Self { formatter, state }
    }

    /// Run until every [`ServiceHandle`] is dropped.  Instructions for each
    /// request are sent on `output_tx`; empty batches are skipped.
    pub async fn run(
        mut self,
        mut command_rx: mpsc::Receiver<ServiceCommand>,
        output_tx: mpsc::Sender<Vec<Instruction>>,
    ) {
        while let Some(command) = command_rx.recv().await {
            match command {
                ServiceCommand::Format(request) => {
                    self.set_phase(ServicePhase::Formatting);
                    let instructions = self.formatter.format_instructions(
                        &request.undo,
                        &request.do_,
                        request.prev.as_ref(),
                    );
                    self.finish_request();
                    if !instructions.is_empty() && output_tx.send(instructions).await.is_err() {
                        log::warn!("pipeline: output receiver dropped, stopping");
                        self.set_error("output receiver dropped");
                        break;
                    }
                }
                ServiceCommand::Reset => {
                    self.formatter.reset();
                    self.finish_request();
                }
            }
        }

        self.set_phase(ServicePhase::Stopped);
        log::info!("pipeline: command channel closed, formatting service shutting down");
    }

    fn set_phase(&self, phase: ServicePhase) {
        log::trace!("pipeline: {}", phase.label());
        if let Ok(mut state) = self.state.lock() {
            state.phase = phase;
        }
    }

    fn set_error(&self, message: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.error_message = Some(message.to_string());
        }
    }

    fn finish_request(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.refresh(&self.formatter);
            state.requests += 1;
            state.phase = ServicePhase::Idle;
            state.error_message = None;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatterConfig;
    use crate::format::Orthography;
    use crate::pipeline::state::new_shared_state;

    fn t(english: &str) -> Translation {
        Translation::from_steno(&["S"], Some(english))
    }

    fn spawn_service() -> (
        ServiceHandle,
        mpsc::Receiver<Vec<Instruction>>,
        SharedState,
        tokio::task::JoinHandle<()>,
    ) {
        let formatter = Formatter::new(FormatterConfig::default(), Orthography::english());
        let state = new_shared_state();
        let (handle, command_rx) = service_channel(8);
        let (output_tx, output_rx) = mpsc::channel(8);
        let service = FormatterService::new(formatter, state.clone());
        let task = tokio::spawn(service.run(command_rx, output_tx));
        (handle, output_rx, state, task)
    }

    #[tokio::test]
    async fn formats_requests_in_order() {
        let (handle, mut output_rx, state, task) = spawn_service();

        handle.submit(FormatRequest::push(t("test"))).await.unwrap();
        handle.submit(FormatRequest::push(t("{^ing}"))).await.unwrap();
        handle.submit(FormatRequest::undo(t("{^ing}"))).await.unwrap();

        assert_eq!(
            output_rx.recv().await,
            Some(vec![Instruction::String(" test".into())])
        );
        assert_eq!(
            output_rx.recv().await,
            Some(vec![Instruction::String("ing".into())])
        );
        assert_eq!(output_rx.recv().await, Some(vec![Instruction::Backspaces(3)]));

        drop(handle);
        task.await.unwrap();
        let state = state.lock().unwrap();
        assert_eq!(state.phase, ServicePhase::Stopped);
        assert_eq!(state.rendered_text, " test");
        assert_eq!(state.requests, 3);
    }

    #[tokio::test]
    async fn reset_clears_formatter() {
        let (handle, mut output_rx, state, task) = spawn_service();

        handle.submit(FormatRequest::push(t("hello"))).await.unwrap();
        output_rx.recv().await;
        handle.reset().await.unwrap();
        handle.submit(FormatRequest::push(t("again"))).await.unwrap();
        assert_eq!(
            output_rx.recv().await,
            Some(vec![Instruction::String(" again".into())])
        );

        drop(handle);
        task.await.unwrap();
        assert_eq!(state.lock().unwrap().history_len, 1);
    }

    #[tokio::test]
    async fn dropped_output_stops_service() {
        let (handle, output_rx, state, task) = spawn_service();
        drop(output_rx);

        handle.submit(FormatRequest::push(t("hello"))).await.unwrap();
        task.await.unwrap();

        let state = state.lock().unwrap();
        assert_eq!(state.phase, ServicePhase::Stopped);
        assert_eq!(state.error_message.as_deref(), Some("output receiver dropped"));
    }

    #[tokio::test]
    async fn submit_after_stop_is_closed() {
        let (handle, command_rx) = service_channel(1);
        drop(command_rx);
        assert_eq!(
            handle.submit(FormatRequest::default()).await,
            Err(ServiceError::Closed)
        );
    }
}
