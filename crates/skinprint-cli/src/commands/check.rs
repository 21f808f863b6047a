use super::AppContext;
use crate::cli::CheckArgs;
use crate::error::Result;
use crate::output;
use serde::Serialize;
use skinprint::engine::compatibility::{Compatibility, Verdict, check_compatibility};
use tracing::{info, warn};

#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct CheckReport {
    ingredient1: String,
    ingredient2: String,
    compatible: bool,
    #[serde(flatten)]
    result: Compatibility,
}

pub fn run(args: CheckArgs, ctx: &AppContext) -> Result<()> {
    let result = check_compatibility(&ctx.catalog, &args.first, &args.second);
    if result.verdict == Verdict::Unknown {
        warn!(
            "'{}' or '{}' is not in the catalog; no conflict data is available.",
            args.first, args.second
        );
    }
    info!(verdict = %result.verdict, "Compatibility checked.");

    let report = CheckReport {
        ingredient1: ctx.catalog.display_name(&args.first).to_string(),
        ingredient2: ctx.catalog.display_name(&args.second).to_string(),
        compatible: result.is_compatible(),
        result,
    };
    output::emit(ctx.format, &report, render)
}

fn render(report: &CheckReport) -> String {
    let mark = match report.result.verdict {
        Verdict::Compatible => "✓",
        Verdict::Incompatible => "✗",
        Verdict::Unknown => "?",
    };
    format!(
        "{} {} + {}: {}\n  {}",
        mark, report.ingredient1, report.ingredient2, report.result.verdict, report.result.reason
    )
}
