//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

const AFTER_HELP: &str = "\
EXAMPLES:
  banking-chat                                  Interactive chat, type /bye to leave
  banking-chat -p \"¿Cuál es mi presupuesto?\"    Send one message and print the reply
  banking-chat -e 127.0.0.1:5000/chat/user/7    Use a single endpoint
  banking-chat --write-config -t 5              Save the effective settings
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Chat with the banking assistant server",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Endpoint to try, in order; repeat to build a fallback list (replaces the configured list)
    #[arg(short, long = "endpoint", value_name = "URL")]
    pub endpoints: Vec<String>,

    /// Per-endpoint timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Send one message, print the reply and exit
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Write the effective configuration to the config file
    #[arg(long)]
    pub write_config: bool,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
