use super::AppContext;
use crate::cli::{CheckinArgs, CheckinCommands};
use crate::error::Result;
use crate::output::{self, PushLine};
use chrono::{DateTime, Utc};
use serde::Serialize;
use skinprint::core::models::checkin::{Checkin, Concern};
use skinprint::workflows::progress::{self, ProgressSummary, Trends};
use tracing::info;

pub fn run(args: CheckinArgs, ctx: &mut AppContext) -> Result<()> {
    match args.command {
        CheckinCommands::Add {
            breakout,
            irritation,
            dryness,
            redness,
            tried_something_new,
            date,
        } => {
            let mut checkin = Checkin::new(date.unwrap_or_else(Utc::now))
                .with_score(Concern::Breakout, breakout)
                .with_score(Concern::Irritation, irritation)
                .with_score(Concern::Dryness, dryness)
                .with_score(Concern::Redness, redness);
            checkin.tried_something_new = tried_something_new;
            record(ctx, &checkin)?;
            output::emit(ctx.format, std::slice::from_ref(&checkin), render_history)
        }
        CheckinCommands::History => {
            let checkins = ctx.checkins();
            output::emit(ctx.format, &checkins, |c| render_history(c))
        }
        CheckinCommands::Summary => {
            let report = SummaryReport::new(&ctx.checkins(), Utc::now());
            output::emit(ctx.format, &report, render_summary)
        }
    }
}

/// Stores a check-in, returning how many are now recorded.
fn record(ctx: &mut AppContext, checkin: &Checkin) -> Result<usize> {
    let mut checkins = ctx.checkins();
    if checkin.is_reaction() {
        info!("Check-in on {} records a reaction.", checkin.date.date_naive());
    }
    checkins.push(checkin.clone());
    ctx.save_checkins(&checkins)?;
    info!("Recorded check-in #{}.", checkins.len());
    Ok(checkins.len())
}

fn render_history(checkins: &[Checkin]) -> String {
    if checkins.is_empty() {
        return "No check-ins recorded yet.".to_string();
    }
    let mut out = String::new();
    for c in checkins {
        out.push_line(format!(
            "{}  breakout {}  irritation {}  dryness {}  redness {}{}",
            c.date.format("%Y-%m-%d %H:%M"),
            c.breakout,
            c.irritation,
            c.dryness,
            c.redness,
            if c.tried_something_new { "  (new product)" } else { "" }
        ));
    }
    out
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct SummaryReport {
    trends: Trends,
    #[serde(flatten)]
    summary: ProgressSummary,
}

impl SummaryReport {
    fn new(checkins: &[Checkin], now: DateTime<Utc>) -> Self {
        Self {
            trends: progress::calculate_trends(checkins),
            summary: progress::progress_summary(checkins, now),
        }
    }
}

fn render_summary(report: &SummaryReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();
    out.push_line(format!("Check-ins:      {}", summary.total_checkins));
    out.push_line(format!("Overall trend:  {}", summary.overall_trend));
    for concern in Concern::ALL {
        out.push_line(format!("  {:<11} {}", concern.to_string(), report.trends.get(concern)));
    }
    if let Some(concern) = summary.most_improved {
        out.push_line(format!("Most improved:  {}", concern));
    }
    match summary.days_since_last_reaction {
        Some(days) => out.push_line(format!("Days since last reaction: {}", days)),
        None => out.push_line("No reactions recorded."),
    }
    out
}
