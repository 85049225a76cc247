use clap::Parser;
use mortgage::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
