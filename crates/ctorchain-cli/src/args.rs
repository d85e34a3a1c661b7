use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ctorchain binary.
#[derive(Parser, Debug)]
#[command(
    name = "ctorchain",
    version,
    about = "Find constructors whose chain reaches a given ancestor constructor"
)]
pub struct CliArgs {
    /// Path to ctorchain.json. Defaults to ./ctorchain.json when present.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // ==================== Target ====================
    /// Qualified name of the class declaring the target constructor.
    #[arg(long = "target-class", value_name = "CLASS")]
    pub target_class: Option<String>,

    /// Parameter type of the target constructor, in order. Repeatable.
    #[arg(long = "target-param", value_name = "TYPE")]
    pub target_params: Vec<String>,

    // ==================== Candidates ====================
    /// Only classes inheriting from this class are checked.
    #[arg(long = "base-class", value_name = "CLASS")]
    pub base_class: Option<String>,

    /// Only classes registered under this kind are checked.
    #[arg(long, value_name = "KIND")]
    pub registration: Option<String>,

    /// Check every class, ignoring base class and registration.
    #[arg(long = "all-classes")]
    pub all_classes: bool,

    /// Only check classes whose qualified name matches. Repeatable.
    #[arg(long, value_name = "GLOB")]
    pub include: Vec<String>,

    // ==================== Output ====================
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the visited chain of every checked entry point.
    #[arg(long)]
    pub explain: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    // ==================== Performance ====================
    /// Number of worker threads. 1 checks classes sequentially.
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Upper bound on steps per constructor chain.
    #[arg(long = "max-chain-steps", value_name = "N")]
    pub max_chain_steps: Option<u32>,

    /// Do not share resolved chains between classes.
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Snapshot files or directories containing them.
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
