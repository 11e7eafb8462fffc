mod commands;
mod output;
mod settings;

use clap::{Args, Parser, Subcommand};
use settings::{defaults, Settings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "wastewatch",
    version,
    about = "Crowd-sourced waste reporting: submit, review and resolve waste reports"
)]
struct Cli {
    /// Report table file (JSON Lines)
    #[arg(long, global = true, env = "WASTEWATCH_STORE", default_value = defaults::STORE_FILE)]
    store: PathBuf,

    /// Directory for uploaded photos
    #[arg(long, global = true, env = "WASTEWATCH_IMAGES", default_value = defaults::IMAGE_DIR)]
    images: PathBuf,

    /// Custom JSON policy file (overrides --preset)
    #[arg(long, global = true, env = "WASTEWATCH_POLICY", value_name = "FILE")]
    policy: Option<PathBuf>,

    /// Predefined policy: default, text-only
    #[arg(long, global = true, default_value = defaults::POLICY_PRESET)]
    preset: String,

    #[command(subcommand)]
    command: Commands,
}

/// Classifier backends, tried in the order given.
#[derive(Args, Debug, Clone, Default)]
pub struct ClassifierArgs {
    /// Inference program printing JSON scores for an image (repeat for fallbacks)
    #[arg(long = "classifier-cmd", value_name = "PROGRAM", requires = "labels")]
    pub classifier_cmd: Vec<PathBuf>,

    /// Labels file for --classifier-cmd, one label per line
    #[arg(long, value_name = "FILE")]
    pub labels: Option<PathBuf>,

    /// Use this label as the prediction (manual pick, tried last)
    #[arg(long, value_name = "LABEL")]
    pub label: Option<String>,

    /// JSON map of classifier label to waste type (default: builtin map)
    #[arg(long = "label-map", value_name = "FILE")]
    pub label_map: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Report a new waste issue
    Submit {
        /// Street address or landmark
        #[arg(short, long)]
        location: String,

        /// Detailed description (what, how much)
        #[arg(short, long)]
        description: String,

        /// General Trash, Recyclables, Construction Debris, Hazardous or Other
        #[arg(short, long = "waste-type")]
        waste_type: Option<String>,

        /// Your name or contact (optional)
        #[arg(long = "reported-by")]
        reported_by: Option<String>,

        /// Photo of the waste (PNG or JPEG)
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        #[command(flatten)]
        classifier: ClassifierArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// List reports with counters (the dashboard)
    List {
        /// Only show these statuses (repeatable), e.g. new, assigned_local_crew, resolved
        #[arg(short, long = "status", value_name = "STATUS")]
        status: Vec<String>,

        /// Only show reports with a stored photo
        #[arg(long)]
        with_images: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show one report in detail, including its photo location
    Show {
        /// Full report id or its 8-character prefix
        id: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Mark a routed report as resolved (without an id, list candidates)
    Resolve {
        /// Full report id or its 8-character prefix
        id: Option<String>,
    },
    /// Classify a photo and suggest a waste type
    Classify {
        /// Path to PNG or JPEG image
        image: PathBuf,

        #[command(flatten)]
        classifier: ClassifierArgs,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect intake policies
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Subcommand)]
enum PolicyAction {
    /// List predefined policies
    List,
    /// Explain the active policy (or a preset) in plain language
    Explain {
        /// Preset name (default: the active policy)
        preset: Option<String>,
    },
    /// Validate a custom policy file
    Validate {
        /// Path to JSON policy file
        file: PathBuf,
    },
}

fn main() {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings {
        store: cli.store,
        images: cli.images,
        policy_file: cli.policy,
        preset: cli.preset,
    };

    let result = match cli.command {
        Commands::Submit {
            location,
            description,
            waste_type,
            reported_by,
            image,
            classifier,
            output,
        } => commands::submit::run(
            &settings,
            commands::submit::Form {
                location,
                description,
                waste_type,
                reported_by,
                image,
            },
            &classifier,
            &output,
        ),
        Commands::List {
            status,
            with_images,
            output,
        } => commands::list::run(&settings, &status, with_images, &output),
        Commands::Show { id, output } => commands::show::run(&settings, &id, &output),
        Commands::Resolve { id } => commands::resolve::run(&settings, id.as_deref()),
        Commands::Classify {
            image,
            classifier,
            output,
        } => commands::classify::run(&image, &classifier, &output),
        Commands::Policy { action } => match action {
            PolicyAction::List => commands::policy::list(),
            PolicyAction::Explain { preset } => commands::policy::explain(&settings, preset.as_deref()),
            PolicyAction::Validate { file } => commands::policy::validate(&file),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
