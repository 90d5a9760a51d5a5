use std::process::{ExitStatus, Stdio};

use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use unitdeck_core::completion::{CompletionEvent, ExternalToolError};
use unitdeck_core::parser::parse_unit_listing;
use unitdeck_core::policy::ArgumentList;
use unitdeck_core::reducer::SessionEvent;
use unitdeck_core::unit::UnitRecord;

/// Side-effect backend for the session: runs invocations and fetches units.
///
/// Both calls return immediately; results come back as [`SessionEvent`]s.
pub trait Backend {
    /// Run the tool once with `args`. Exactly one `Completed` event follows.
    fn execute(&self, args: ArgumentList);

    /// Fetch the unit listing. Exactly one `CatalogLoaded` event follows.
    fn fetch_units(&self);
}

/// Runs the service manager as a child process on the tokio runtime
pub struct CommandRunner {
    program: String,
    list_args: Vec<String>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl CommandRunner {
    pub fn new(
        program: impl Into<String>,
        list_args: Vec<String>,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            program: program.into(),
            list_args,
            event_tx,
        }
    }
}

impl Backend for CommandRunner {
    fn execute(&self, args: ArgumentList) {
        let run_id = Uuid::new_v4();
        let program = self.program.clone();
        let tx = self.event_tx.clone();
        info!(%run_id, %program, %args, "starting command");

        tokio::spawn(async move {
            let done = run_capture(&program, args.as_slice()).await;
            match &done.err {
                Some(err) => warn!(%run_id, %err, "command failed"),
                None => debug!(%run_id, bytes = done.text.len(), "command finished"),
            }
            if tx.send(SessionEvent::Completed(done)).is_err() {
                warn!(%run_id, "session closed before completion was delivered");
            }
        });
    }

    fn fetch_units(&self) {
        let program = self.program.clone();
        let list_args = self.list_args.clone();
        let tx = self.event_tx.clone();
        debug!(%program, ?list_args, "fetching units");

        tokio::spawn(async move {
            let result = fetch_units(&program, &list_args).await;
            match &result {
                Ok(units) => info!(units = units.len(), "unit catalog loaded"),
                Err(err) => warn!(%err, "unit listing failed"),
            }
            if tx.send(SessionEvent::CatalogLoaded(result)).is_err() {
                warn!("session closed before the unit listing was delivered");
            }
        });
    }
}

/// Run `program args...` to completion and capture both streams.
///
/// Start failures are reported in the event's `err` field, never raised.
pub async fn run_capture(program: &str, args: &[String]) -> CompletionEvent {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await;

    match output {
        Ok(out) => CompletionEvent::from_streams(
            &String::from_utf8_lossy(&out.stdout),
            &String::from_utf8_lossy(&out.stderr),
            exit_error(program, out.status),
        ),
        Err(e) => CompletionEvent::new(
            "",
            Some(ExternalToolError::Spawn {
                program: program.to_string(),
                message: e.to_string(),
            }),
        ),
    }
}

/// Run the listing command and parse its stdout.
pub async fn fetch_units(
    program: &str,
    list_args: &[String],
) -> Result<Vec<UnitRecord>, ExternalToolError> {
    let out = Command::new(program)
        .args(list_args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| ExternalToolError::Spawn {
            program: program.to_string(),
            message: e.to_string(),
        })?;

    if let Some(err) = exit_error(program, out.status) {
        return Err(err);
    }

    Ok(parse_unit_listing(&String::from_utf8_lossy(&out.stdout)))
}

fn exit_error(program: &str, status: ExitStatus) -> Option<ExternalToolError> {
    if status.success() {
        return None;
    }
    Some(match status.code() {
        Some(code) => ExternalToolError::ExitStatus {
            program: program.to_string(),
            code,
        },
        None => ExternalToolError::Terminated {
            program: program.to_string(),
        },
    })
}
