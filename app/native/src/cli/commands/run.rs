//! `shade run`: a live coordinator fed from stdin.

use tokio::io::{AsyncBufReadExt, BufReader};

use super::replay::parse_line;
use crate::actor::CoordinatorActor;
use crate::bar::{BarSurfaces, LoggedTransitions};
use crate::config;
use crate::coordinator::{Event, StatusBarCoordinator};
use crate::error::ShadeError;
use crate::host::StdoutHost;
use crate::notification::NotificationList;

/// Runs until stdin closes.
///
/// # Errors
///
/// Returns an error if the runtime cannot start, stdin cannot be read, or
/// the coordinator actor stops early.
pub fn execute() -> Result<(), ShadeError> {
    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    runtime.block_on(serve())
}

fn headless_surfaces() -> BarSurfaces<LoggedTransitions> {
    BarSurfaces {
        status: LoggedTransitions::new("status"),
        navigation: Some(LoggedTransitions::new("navigation")),
        blocker: LoggedTransitions::new("blocker"),
    }
}

async fn serve() -> Result<(), ShadeError> {
    let mut coordinator =
        StatusBarCoordinator::new(config::init(), StdoutHost, headless_surfaces(), NotificationList::new());
    coordinator.start();
    let (handle, task) = CoordinatorActor::spawn(coordinator);

    let reload_handle = handle.clone();
    let watching = config::watch_config_file(move |new_config| {
        let changed = config::replace_config(new_config.clone());
        tracing::info!(?changed, "configuration reloaded");
        if let Err(err) = reload_handle.send(Event::SettingsChanged { config: Box::new(new_config) }) {
            tracing::warn!(error = %err, "could not deliver reloaded configuration");
        }
    });
    if watching {
        tracing::debug!(path = ?config::get_config_path(), "watching configuration file");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut line_no = 0_usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        match parse_line(&line) {
            Ok(Some(event)) => handle.send_async(event).await?,
            Ok(None) => {}
            Err(err) => tracing::warn!(line = line_no, error = %err, "skipping malformed event"),
        }
    }

    tracing::debug!(lines = line_no, "stdin closed, stopping");
    handle.shutdown()?;
    task.await.map_err(|err| ShadeError::RuntimeError(err.to_string()))?;
    Ok(())
}
