use super::AppContext;
use crate::cli::{RoutineArgs, RoutineCommands};
use crate::error::{CliError, Result};
use crate::output::{self, PushLine};
use serde::Serialize;
use skinprint::core::models::routine::{Routine, RoutineEntry, RoutineSlot, TimeOfDay};
use skinprint::workflows::routine::{self as routine_workflow, RoutineReport};
use tracing::info;

const TIMES: [TimeOfDay; 2] = [TimeOfDay::Am, TimeOfDay::Pm];

pub fn run(args: RoutineArgs, ctx: &mut AppContext) -> Result<()> {
    match args.command {
        RoutineCommands::Add {
            product_id,
            time,
            function,
        } => {
            let slot = time.unwrap_or(ctx.default_time);
            handle_add(ctx, &product_id, slot, function.as_deref())?;
            show(ctx)
        }
        RoutineCommands::Remove { time, position } => {
            handle_remove(ctx, time, position as usize)?;
            show(ctx)
        }
        RoutineCommands::Show => show(ctx),
        RoutineCommands::Analyze => {
            let report = routine_workflow::analyze(&ctx.catalog, &ctx.routine(), &ctx.preferences());
            output::emit(ctx.format, &report, render_report)
        }
        RoutineCommands::Clear { time } => {
            handle_clear(ctx, time)?;
            show(ctx)
        }
    }
}

fn handle_add(
    ctx: &mut AppContext,
    product_id: &str,
    slot: RoutineSlot,
    function: Option<&str>,
) -> Result<()> {
    let entry = RoutineEntry::new(ctx.product(product_id)?.clone(), function);
    info!(
        "Adding '{}' as {} to the {} routine.",
        entry.product.name, entry.function, slot
    );
    let mut routine = ctx.routine();
    routine.add(slot, entry);
    ctx.save_routine(&routine)
}

fn handle_remove(ctx: &mut AppContext, time: TimeOfDay, position: usize) -> Result<()> {
    let mut routine = ctx.routine();
    let removed = position
        .checked_sub(1)
        .and_then(|index| routine.remove(time, index))
        .ok_or_else(|| {
            CliError::Argument(format!(
                "The {} routine has no entry at position {} (it has {}).",
                time,
                position,
                routine.entries(time).len()
            ))
        })?;
    info!("Removed '{}' from the {} routine.", removed.product.name, time);
    ctx.save_routine(&routine)
}

fn handle_clear(ctx: &mut AppContext, time: Option<TimeOfDay>) -> Result<()> {
    let mut routine = ctx.routine();
    match time {
        Some(time) => routine.clear(time),
        None => TIMES.iter().for_each(|&t| routine.clear(t)),
    }
    info!("Cleared routine ({}).", time.map_or("AM and PM".to_string(), |t| t.to_string()));
    ctx.save_routine(&routine)
}

/// One time of day as shown to the user: entries in insertion order, which is what
/// `routine remove` positions refer to, plus the application order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct RoutineView<'a> {
    time: TimeOfDay,
    entries: &'a [RoutineEntry],
    application_order: Vec<&'a str>,
}

fn views(routine: &Routine) -> Vec<RoutineView<'_>> {
    TIMES
        .iter()
        .map(|&time| RoutineView {
            time,
            entries: routine.entries(time),
            application_order: routine
                .sorted_steps(time)
                .into_iter()
                .map(|entry| entry.product.name.as_str())
                .collect(),
        })
        .collect()
}

fn show(ctx: &AppContext) -> Result<()> {
    let routine = ctx.routine();
    output::emit(ctx.format, &views(&routine), |views| render_views(views))
}

fn render_views(views: &[RoutineView]) -> String {
    let mut out = String::new();
    for view in views {
        out.push_line(format!("{} routine", view.time));
        if view.entries.is_empty() {
            out.push_line("  (empty)");
            continue;
        }
        for (i, entry) in view.entries.iter().enumerate() {
            out.push_line(format!(
                "  {}. {:<12} {} ({})",
                i + 1, entry.function, entry.product.name, entry.product.id
            ));
        }
        out.push_line(format!("  Apply: {}", view.application_order.join(" → ")));
    }
    out
}

fn render_report(report: &RoutineReport) -> String {
    let mut out = String::new();
    for time in TIMES {
        match report.get(time) {
            Some(analysis) => {
                out.push_line(format!("{} routine ({} products)", time, analysis.products.len()));
                out.push_str(&output::routine_analysis_text(analysis));
            }
            None => {
                out.push_line(format!("{} routine: no products", time));
            }
        }
    }
    out
}
