use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about = "Computes deduplicated subtree weights over a single-source DAG.", long_about = None)]
pub struct Cli {
    /// Edge-list file (`name[(weight)] -> child ...` per line). Uses the built-in reference graph when omitted.
    pub graph_file: Option<PathBuf>,

    /// Name of the source vertex.
    #[clap(short, long, default_value = "A")]
    pub source: String,

    /// Which algorithm to run.
    #[clap(short, long, value_enum, default_value_t = Algorithm::Both)]
    pub algorithm: Algorithm,

    /// Walk with an explicit stack instead of native recursion.
    #[clap(long)]
    pub iterative: bool,

    /// Compare every FCP sum against a brute-force reachable-set walk.
    #[clap(long)]
    pub verify: bool,

    /// Write the report to this file instead of stdout.
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose log destination.
    #[clap(long, default_value = "subtree_sums.log")]
    pub log_file: PathBuf,

    /// Suppress verbose output, only printing results and errors.
    #[clap(short, long)]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// First-common-predecessor correction (per-vertex sums).
    Fcp,
    /// Path-count-multiple subtraction (source only).
    Spcm,
    /// Run both and cross-check the source result.
    Both,
}

impl Algorithm {
    pub fn runs_fcp(self) -> bool {
        matches!(self, Algorithm::Fcp | Algorithm::Both)
    }

    pub fn runs_spcm(self) -> bool {
        matches!(self, Algorithm::Spcm | Algorithm::Both)
    }
}
