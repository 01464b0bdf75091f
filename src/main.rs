mod api;
mod app;
mod cli;
mod format;
mod transcript;
mod ui;
mod utils;

use clap::Parser;

use crate::cli::Args;

fn main() {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .try_init()
        .ok();

    if let Err(e) = crate::app::run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
