//! Side effects of an accepted batch: console echo, then a best-effort
//! append to the JSON Lines file.

use crate::server::LogState;
use moblog_core::event::LogEvent;
use std::sync::Arc;
use tracing::{error, info};

/// What happened to a stamped batch.
///
/// `accepted` is what the caller is told; `persisted` is what actually
/// reached the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOutcome {
    pub accepted: usize,
    pub persisted: usize,
}

impl IngestOutcome {
    pub fn is_durable(&self) -> bool {
        self.accepted == self.persisted
    }
}

/// Echo each event and append the batch. Append failures are logged and
/// swallowed.
pub async fn ingest(state: &Arc<LogState>, events: Vec<LogEvent>) -> IngestOutcome {
    let accepted = events.len();
    for event in &events {
        info!("{}", event.summary(state.config.echo_chars));
    }
    if events.is_empty() {
        return IngestOutcome { accepted, persisted: 0 };
    }

    let writer_state = Arc::clone(state);
    let result =
        tokio::task::spawn_blocking(move || writer_state.writer.append_events(&events)).await;

    let persisted = match result {
        Ok(Ok(lines)) => lines,
        Ok(Err(e)) => {
            error!(error = %e, path = %state.writer.path().display(), "append error");
            0
        }
        Err(e) => {
            error!(error = %e, "append task failed");
            0
        }
    };

    IngestOutcome { accepted, persisted }
}
