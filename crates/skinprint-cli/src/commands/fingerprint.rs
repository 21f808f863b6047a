use super::AppContext;
use crate::cli::{FingerprintArgs, FingerprintCommands};
use crate::error::{CliError, Result};
use crate::output;
use skinprint::core::catalog::Catalog;
use skinprint::workflows::fingerprint::{self, Fingerprint, FingerprintEvent, FingerprintSnapshot};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run(args: FingerprintArgs, ctx: &AppContext) -> Result<()> {
    match args.command {
        FingerprintCommands::Show => {
            let fingerprint = Fingerprint::from_preferences(&ctx.preferences());
            output::emit(ctx.format, &fingerprint, |fp| render_fingerprint(&ctx.catalog, fp))
        }
        FingerprintCommands::Events { history } => {
            let snapshots = read_history(&history)?;
            let events = fingerprint::fingerprint_events(&snapshots);
            info!(
                "{} event(s) from {} snapshot(s).",
                events.len(),
                snapshots.len()
            );
            output::emit(ctx.format, &events, |events| render_events(events))
        }
    }
}

fn read_history(path: &Path) -> Result<Vec<FingerprintSnapshot>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn render_fingerprint(catalog: &Catalog, fingerprint: &Fingerprint) -> String {
    let list = |set: &std::collections::BTreeSet<String>| {
        output::names(catalog, &set.iter().cloned().collect::<Vec<_>>())
    };
    format!(
        "Works for you:     {}\nAvoid:             {}\nPossible triggers: {}",
        list(&fingerprint.liked),
        list(&fingerprint.disliked),
        list(&fingerprint.suspects)
    )
}

fn render_events(events: &[FingerprintEvent]) -> String {
    if events.is_empty() {
        return "No fingerprint events.".to_string();
    }
    events
        .iter()
        .map(|e| format!("{}  {:.0}%  {}", e.date, e.confidence * 100.0, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}
