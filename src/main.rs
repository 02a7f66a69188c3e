use clap::Parser;
use subtree_sums::app::{run_app, AppError, Cli};

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    run_app(cli)
}
