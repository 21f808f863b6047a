use super::AppContext;
use crate::cli::ScanArgs;
use crate::error::Result;
use crate::output;
use skinprint::core::catalog::Catalog;
use skinprint::core::io::store::keys;
use skinprint::workflows::scan::{self, ScanAnalysis};
use std::fs;
use tracing::info;

pub fn run(args: ScanArgs, ctx: &mut AppContext) -> Result<()> {
    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => {
            info!("Reading label text from {:?}", path);
            Some(fs::read_to_string(path)?)
        }
        (None, None) => None,
    };

    let result = scan::scan_and_analyze(
        &ctx.catalog,
        args.file_name.as_deref(),
        text.as_deref(),
        &ctx.preferences(),
    )?;

    if args.save {
        ctx.save_value(keys::SCANNED_PRODUCT, &result.scan.product)?;
        info!("Saved scanned product '{}'.", result.scan.product.name);
    }

    output::emit(ctx.format, &result, |result| render(&ctx.catalog, result))
}

fn render(catalog: &Catalog, result: &ScanAnalysis) -> String {
    format!(
        "Scan: {} ({:.0}% confidence)\n{}",
        result.scan.method,
        result.scan.confidence * 100.0,
        output::product_analysis_text(catalog, &result.analysis)
    )
}
