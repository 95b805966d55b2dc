//! `shade replay`: scripted scenarios on the virtual clock.
//!
//! A scenario is one JSON event per line, the same format `shade run` reads.
//! Blank lines and lines starting with `//` or `#` are skipped. A file whose
//! first character is `[` is read as a single JSONC array instead.

use std::io::Read;
use std::path::Path;

use colored::Colorize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::{self, ShadeConfig};
use crate::coordinator::{Event, Snapshot};
use crate::error::ShadeError;
use crate::host::HostRequest;
use crate::sim::Harness;

/// Width of a host request in the timeline before it is cut.
const REQUEST_COLUMN_WIDTH: usize = 72;

/// What the host was asked to do in response to one event.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayStep {
    /// Virtual time after the event was handled.
    pub at_ms: u64,
    pub event: &'static str,
    pub requests: Vec<HostRequest>,
}

/// Parses one scenario line. Comments and blank lines yield `None`.
///
/// # Errors
///
/// Returns the parse error for a line that is not a valid event.
pub fn parse_line(line: &str) -> Result<Option<Event>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Parses a whole scenario.
///
/// # Errors
///
/// Returns [`ShadeError::ScenarioError`] naming the first line that fails.
pub fn parse_scenario(text: &str) -> Result<Vec<Event>, ShadeError> {
    if text.trim_start().starts_with('[') {
        let stripped = json_comments::StripComments::new(text.as_bytes());
        return serde_json::from_reader(stripped)
            .map_err(|err| ShadeError::ScenarioError(err.to_string()));
    }

    let mut events = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {}
            Err(err) => return Err(ShadeError::ScenarioError(format!("line {}: {err}", i + 1))),
        }
    }
    Ok(events)
}

/// Runs `events` against a fresh coordinator with recording collaborators.
///
/// The first step, named `start`, holds what the coordinator sends when it
/// attaches.
#[must_use]
pub fn replay(config: ShadeConfig, events: Vec<Event>) -> (Snapshot, Vec<ReplayStep>) {
    let mut harness = Harness::from_config(config);
    let coordinator = &mut harness.coordinator;

    coordinator.start();
    let mut steps = vec![ReplayStep {
        at_ms: coordinator.now_ms(),
        event: "start",
        requests: coordinator.host_mut().take(),
    }];

    for event in events {
        let name = event.name();
        coordinator.handle(event);
        steps.push(ReplayStep {
            at_ms: coordinator.now_ms(),
            event: name,
            requests: coordinator.host_mut().take(),
        });
    }

    (coordinator.snapshot(), steps)
}

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the scenario cannot be read or parsed.
pub fn execute(file: &Path, json: bool) -> Result<(), ShadeError> {
    let text = read_scenario(file)?;
    let events = parse_scenario(&text)?;
    tracing::debug!(events = events.len(), file = %file.display(), "replaying scenario");

    let (snapshot, steps) = replay(config::init(), events);
    let value = serde_json::to_value(&snapshot)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_timeline(&steps);
    println!();
    println!("{}", "Final state".bold());
    output::print_highlighted_json(&value);
    Ok(())
}

fn read_scenario(file: &Path) -> Result<String, ShadeError> {
    if file.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(file).map_err(|err| {
        ShadeError::ScenarioError(format!("cannot read {}: {err}", file.display()))
    })
}

fn request_label(request: &HostRequest) -> String {
    let text = serde_json::to_string(request).unwrap_or_else(|_| format!("{request:?}"));
    output::truncate(&text, REQUEST_COLUMN_WIDTH)
}

fn print_timeline(steps: &[ReplayStep]) {
    #[derive(Tabled)]
    struct StepRow {
        #[tabled(rename = "Time")]
        time: String,
        #[tabled(rename = "Event")]
        event: String,
        #[tabled(rename = "Host requests")]
        requests: String,
    }

    let rows: Vec<StepRow> = steps
        .iter()
        .map(|step| StepRow {
            time: format!("{} ms", step.at_ms),
            event: step.event.to_string(),
            requests: if step.requests.is_empty() {
                "-".dimmed().to_string()
            } else {
                step.requests.iter().map(request_label).collect::<Vec<_>>().join("\n")
            },
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::right()))
        .to_string();

    println!("{}", format!("Timeline ({} events)", steps.len().saturating_sub(1)).bold());
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::BarMode;
    use crate::flags::VisibilityFlags;
    use crate::panel::PanelState;

    const SCENARIO: &str = r#"
// open the shade, then wait for the collapse to settle
{"event":"expandNotifications"}
# comments with a hash work too
{"event":"advance","ms":400}
{"event":"collapse"}
{"event":"advance","ms":100}
"#;

    #[test]
    fn test_parse_line_skips_comments() {
        assert!(parse_line("   ").unwrap().is_none());
        assert!(parse_line("// note").unwrap().is_none());
        assert_eq!(parse_line(r#"{"event":"screenOn"}"#).unwrap(), Some(Event::ScreenOn));
    }

    #[test]
    fn test_parse_scenario_reports_line() {
        let err = parse_scenario("{\"event\":\"screenOn\"}\n{\"event\":\"nope\"}").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn test_parse_scenario_accepts_jsonc_array() {
        let events = parse_scenario("[\n  // lights\n  {\"event\":\"screenOff\"},\n  {\"event\":\"screenOn\"}\n]")
            .unwrap();
        assert_eq!(events, vec![Event::ScreenOff, Event::ScreenOn]);
    }

    #[test]
    fn test_replay_records_steps() {
        let events = parse_scenario(SCENARIO).unwrap();
        let (snapshot, steps) = replay(ShadeConfig::default(), events);

        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].event, "start");
        assert!(steps[0].requests.contains(&HostRequest::AddHeadsUpView));
        assert_eq!(steps[2].at_ms, 400);
        assert_eq!(snapshot.panel, PanelState::Collapsed);
        assert!(!snapshot.expanded_window);
    }

    #[test]
    fn test_replay_transient_reveal() {
        let reveal = Event::SetSystemUiVisibility {
            vis: VisibilityFlags::FULLSCREEN | VisibilityFlags::STATUS_BAR_TRANSIENT,
            mask: VisibilityFlags::FULLSCREEN | VisibilityFlags::STATUS_BAR_TRANSIENT,
        };
        let (snapshot, _) = replay(ShadeConfig::default(), vec![reveal]);
        assert_eq!(snapshot.bars.status_mode, BarMode::SemiTransparent);
        assert!(snapshot.timers.iter().any(|t| t.deadline_ms == 3000));
    }
}
