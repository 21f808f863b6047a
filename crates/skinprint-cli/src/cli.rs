use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args, Parser, Subcommand};
use skinprint::core::models::routine::{RoutineSlot, TimeOfDay};
use skinprint::core::models::skin::SkinType;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Skinprint CLI - ingredient-level skincare analysis: check ingredient compatibility, build AM/PM routines, scan labels and track your skin's progress.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub options: GlobalOptions,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    /// Defaults to `config.toml` in the user configuration directory, if present.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the JSON store holding preferences, routine and check-ins.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Path to a TOML catalog replacing the built-in ingredients and products.
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S output.format=json
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether two ingredients can be used together.
    Check(CheckArgs),
    /// Search and inspect catalog ingredients.
    Ingredients(IngredientsArgs),
    /// Search and inspect catalog products.
    Products(ProductsArgs),
    /// Analyze a product or an ad-hoc ingredient list against your preferences.
    Analyze(AnalyzeArgs),
    /// Build and analyze your AM/PM routine.
    Routine(RoutineArgs),
    /// Manage liked, disliked and sensitive ingredients and your skin type.
    Prefs(PrefsArgs),
    /// Record daily skin check-ins and review progress.
    Checkin(CheckinArgs),
    /// Identify a product from a label photo's file name or label text.
    Scan(ScanArgs),
    /// Show the pairwise compatibility matrix for a set of products.
    Matrix(MatrixArgs),
    /// Browse community circles and compare them with your fingerprint.
    Circles(CirclesArgs),
    /// Show your ingredient fingerprint and its timeline.
    Fingerprint(FingerprintArgs),
    /// Generate a starter routine from onboarding survey answers.
    Onboard(OnboardArgs),
    /// Manage the local data directory.
    Data(DataArgs),
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// First ingredient (id or name).
    pub first: String,
    /// Second ingredient (id or name).
    pub second: String,
}

#[derive(Args, Debug)]
pub struct IngredientsArgs {
    #[command(subcommand)]
    pub command: IngredientCommands,
}

#[derive(Subcommand, Debug)]
pub enum IngredientCommands {
    /// Search ingredients by name, id or description. Lists all without a query.
    Search { query: Option<String> },
    /// Show one ingredient in detail.
    Show {
        /// Ingredient id or name.
        ingredient: String,
    },
}

#[derive(Args, Debug)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// Search products by name, brand or description. Lists all without a query.
    Search { query: Option<String> },
    /// Show one product with its analysis.
    Show { product_id: String },
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["product", "ingredients"])))]
pub struct AnalyzeArgs {
    /// Catalog product id to analyze.
    #[arg(short, long, value_name = "ID")]
    pub product: Option<String>,

    /// Comma-separated ingredient ids or names to analyze as one product.
    #[arg(short, long, value_name = "ID,...", value_delimiter = ',')]
    pub ingredients: Option<Vec<String>>,
}

#[derive(Args, Debug)]
pub struct RoutineArgs {
    #[command(subcommand)]
    pub command: RoutineCommands,
}

#[derive(Subcommand, Debug)]
pub enum RoutineCommands {
    /// Add a catalog product to the routine.
    Add {
        product_id: String,
        /// When to use it: am, pm or both. Defaults to `routine.default-time`.
        #[arg(short, long, value_name = "TIME")]
        time: Option<RoutineSlot>,
        /// Routine step to assign (e.g. treatment). Defaults to the product's function.
        #[arg(short, long, value_name = "STEP")]
        function: Option<String>,
    },
    /// Remove the entry at a 1-based position from one time of day.
    Remove {
        time: TimeOfDay,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        position: u32,
    },
    /// Show the routine in application order.
    Show,
    /// Analyze the AM and PM routines for conflicts and sensitivities.
    Analyze,
    /// Remove every entry, or only those of one time of day.
    Clear { time: Option<TimeOfDay> },
}

#[derive(Args, Debug)]
pub struct PrefsArgs {
    #[command(subcommand)]
    pub command: PrefsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommands {
    /// Show current preferences.
    Show,
    /// Mark an ingredient as liked.
    Like { ingredient: String },
    /// Remove an ingredient from the liked set.
    Unlike { ingredient: String },
    /// Mark an ingredient as disliked.
    Dislike { ingredient: String },
    /// Remove an ingredient from the disliked set.
    Undislike { ingredient: String },
    /// Mark an ingredient as causing sensitivity or allergies.
    Sensitive { ingredient: String },
    /// Remove an ingredient from the sensitivity set.
    Unsensitive { ingredient: String },
    /// Set the skin type, or clear it when omitted.
    SkinType { skin_type: Option<SkinType> },
}

#[derive(Args, Debug)]
pub struct CheckinArgs {
    #[command(subcommand)]
    pub command: CheckinCommands,
}

#[derive(Subcommand, Debug)]
pub enum CheckinCommands {
    /// Record a check-in. Severities range from 0 (none) to 3 (severe).
    Add {
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
        breakout: u8,
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
        irritation: u8,
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
        dryness: u8,
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
        redness: u8,
        /// Mark that a new product was tried since the last check-in.
        #[arg(long)]
        tried_something_new: bool,
        /// RFC 3339 timestamp of the check-in. Defaults to now.
        #[arg(long, value_name = "DATETIME")]
        date: Option<DateTime<Utc>>,
    },
    /// List recorded check-ins, oldest first.
    History,
    /// Show per-concern trends and the overall progress summary.
    Summary,
}

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).multiple(true).args(["file_name", "text", "text_file"])))]
pub struct ScanArgs {
    /// File name of the label photo (e.g. cerave_cleanser.jpg).
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// Ingredient text read from the label.
    #[arg(long, value_name = "TEXT", conflicts_with = "text_file")]
    pub text: Option<String>,

    /// File containing the label text.
    #[arg(long, value_name = "PATH")]
    pub text_file: Option<PathBuf>,

    /// Remember the scanned product in the store.
    #[arg(long)]
    pub save: bool,
}

/// Arguments for the `matrix` subcommand.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("products").required(true).args(["product_ids", "routine"])))]
pub struct MatrixArgs {
    /// Catalog product ids to compare.
    pub product_ids: Vec<String>,

    /// Use the products of the stored routine for one time of day instead.
    #[arg(long, value_name = "TIME")]
    pub routine: Option<TimeOfDay>,
}

#[derive(Args, Debug)]
pub struct CirclesArgs {
    #[command(subcommand)]
    pub command: CirclesCommands,
}

#[derive(Subcommand, Debug)]
pub enum CirclesCommands {
    /// List circles, best match first.
    List,
    /// Show a circle and its recommended products.
    Show { circle_id: String },
    /// Compare your ingredient fingerprint with a circle.
    Overlap { circle_id: String },
}

#[derive(Args, Debug)]
pub struct FingerprintArgs {
    #[command(subcommand)]
    pub command: FingerprintCommands,
}

#[derive(Subcommand, Debug)]
pub enum FingerprintCommands {
    /// Show your liked, disliked and suspect ingredients.
    Show,
    /// List discovery and confidence events from a fingerprint history file (JSON).
    Events {
        #[arg(value_name = "PATH")]
        history: PathBuf,
    },
}

/// Arguments for the `onboard` subcommand.
#[derive(Args, Debug)]
pub struct OnboardArgs {
    /// Survey answers in JSON. Defaults to the answers saved in the store.
    #[arg(long, value_name = "PATH")]
    pub survey: Option<PathBuf>,

    /// Show the starter routine without saving it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing user data.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "skinprint", "check", "retinol", "aha", "--json", "-vv", "-S", "output.format=text",
        ])
        .unwrap();
        assert!(cli.options.json);
        assert_eq!(cli.options.verbose, 2);
        assert_eq!(cli.options.set_values, vec!["output.format=text"]);
        assert!(matches!(cli.command, Commands::Check(CheckArgs { ref first, .. }) if first == "retinol"));
    }

    #[test]
    fn analyze_requires_a_target() {
        assert!(Cli::try_parse_from(["skinprint", "analyze"]).is_err());
        let cli =
            Cli::try_parse_from(["skinprint", "analyze", "--ingredients", "retinol,aha"]).unwrap();
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.ingredients.unwrap(), vec!["retinol", "aha"]);
    }

    #[test]
    fn routine_add_parses_time_slot() {
        let cli =
            Cli::try_parse_from(["skinprint", "routine", "add", "product-2", "--time", "both"])
                .unwrap();
        let Commands::Routine(RoutineArgs {
            command: RoutineCommands::Add { time, .. },
        }) = cli.command
        else {
            panic!("expected routine add");
        };
        assert_eq!(time, Some(RoutineSlot::Both));
    }

    #[test]
    fn checkin_severity_is_bounded() {
        assert!(Cli::try_parse_from(["skinprint", "checkin", "add", "--dryness", "4"]).is_err());
        assert!(Cli::try_parse_from(["skinprint", "checkin", "add", "--dryness", "3"]).is_ok());
    }
}
