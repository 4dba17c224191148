use std::path::PathBuf;

/// Point-set deduplication CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "geodedup", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Merge coincident points and write the canonical set (forbids stdout)
    Dedup(DedupArgs),

    /// Look up a single point after deduplication
    Query(QueryArgs),
}

/// Settings shared by every command that builds a point set.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Input point-set file (JSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// JSON file with point-set settings (name, point_type, rel_eps)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Tolerance relative to the bounding-box diagonal
    #[arg(long)]
    pub rel_eps: Option<f64>,

    /// Name of the point set, defaults to the name stored in the input file
    #[arg(long)]
    pub name: Option<String>,

    /// Treat the points as stations
    #[arg(long)]
    pub station: bool,
}

#[derive(clap::Args, Debug)]
pub struct DedupArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Output file, defaults to "./points.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
#[command(group(clap::ArgGroup::new("key").required(true).args(["id", "point_name"])))]
pub struct QueryArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Canonical point id
    #[arg(long)]
    pub id: Option<usize>,

    /// Point name
    #[arg(long)]
    pub point_name: Option<String>,
}
