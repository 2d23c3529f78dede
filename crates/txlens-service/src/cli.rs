//! Command-line interface definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "txlens")]
#[command(about = "Classify and summarise blockchain transaction history", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
	/// Path to configuration file
	#[arg(short, long, env = "TXLENS_CONFIG")]
	pub config: Option<PathBuf>,

	/// Log level override (trace, debug, info, warn, error)
	#[arg(short, long, env = "TXLENS_LOG_LEVEL")]
	pub log_level: Option<String>,

	/// Emit logs as JSON lines
	#[arg(long)]
	pub json_logs: bool,

	/// Subcommand to execute
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Classify saved history pages and print their view models
	#[command(about = "Classify FCD history pages and print the resulting view models")]
	Classify {
		/// Page files, in paging order
		#[arg(required = true)]
		pages: Vec<PathBuf>,

		/// Use this chain's rules for every transaction
		#[arg(long)]
		chain: Option<String>,

		/// Output format
		#[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},

	/// List the compiled rule order for a chain
	#[command(about = "Show the rules tried for each message type, in order")]
	Rules {
		/// Chain to inspect; defaults to the configured default chain
		#[arg(long)]
		chain: Option<String>,
	},

	/// Validate configuration and rule sets
	#[command(about = "Validate the configuration and every configured chain's rule set")]
	Validate,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	Text,
	Json,
}
