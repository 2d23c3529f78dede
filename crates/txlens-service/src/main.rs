use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txlens_config::{load_config, AppConfig};
use txlens_core::MatcherCache;
use txlens_render::{CatalogTranslator, Formatters};
use txlens_rules::validate;
use txlens_service::cli::{Args, Command, OutputFormat};
use txlens_service::{FilePageSource, HistoryUi, TxHistory, TxListAdapter};

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	let config = load_config(args.config.as_deref())
		.await
		.context("Failed to load configuration")?;

	let log_level = args
		.log_level
		.clone()
		.unwrap_or_else(|| config.logging.level.clone());
	setup_tracing(&log_level, args.json_logs || config.logging.json)?;

	match args.command {
		Command::Classify {
			pages,
			chain,
			format,
		} => classify(&config, pages, chain, format).await,
		Command::Rules { chain } => list_rules(&config, chain),
		Command::Validate => validate_rule_sets(&config),
	}
}

fn build_cache(config: &AppConfig) -> Result<Arc<MatcherCache>> {
	let registry = config
		.engine
		.chain_registry()
		.context("Invalid chain configuration")?;
	Ok(Arc::new(MatcherCache::new(registry)))
}

async fn classify(
	config: &AppConfig,
	pages: Vec<PathBuf>,
	chain: Option<String>,
	format: OutputFormat,
) -> Result<()> {
	let translator = CatalogTranslator::new(config.translations.clone());
	let formatters = Formatters::new(config.render.clone(), Arc::new(translator));

	let mut adapter = TxListAdapter::new(build_cache(config)?, formatters, config.view.clone())
		.with_default_chain(&config.engine.default_chain);
	if let Some(chain) = chain {
		info!("Classifying every transaction with rules for {}", chain);
		adapter = adapter.with_chain_override(chain);
	}

	let source = FilePageSource::open(&pages)
		.await
		.context("Failed to read history pages")?;
	let mut history = TxHistory::new(adapter);
	history
		.load_all(&source)
		.await
		.context("Failed to classify history")?;

	let ui = history.ui();
	match format {
		OutputFormat::Json => {
			let json = serde_json::to_string_pretty(&ui).context("Failed to serialize output")?;
			println!("{}", json);
		}
		OutputFormat::Text => print_text(&ui),
	}

	Ok(())
}

fn print_text(ui: &HistoryUi<'_>) {
	match ui {
		HistoryUi::Card(card) => {
			println!("{}", card.title);
			println!("{}", card.content);
		}
		HistoryUi::List { list, more } => {
			for view in list.iter() {
				println!("{}  {}", view.date, view.hash);
				println!("  {}", view.link);
				for group in &view.messages {
					for line in &group.summary {
						println!("  [{}] {}", group.tag, line);
					}
				}
				for detail in &view.details {
					println!("  {}: {}", detail.title, detail.content);
				}
				println!();
			}
			if let Some(next) = more {
				println!("More transactions available from offset {}", next);
			}
		}
	}
}

fn list_rules(config: &AppConfig, chain: Option<String>) -> Result<()> {
	let chain = chain.unwrap_or_else(|| config.engine.default_chain.clone());
	let cache = build_cache(config)?;
	let matcher = cache
		.get(&chain)
		.with_context(|| format!("No rule set for chain {}", chain))?;

	println!("Rules for {} ({} total)", chain, matcher.len());
	for tag in matcher.tags() {
		println!("{}", tag);
		for (position, rule) in matcher.candidates(tag).enumerate() {
			let requirement = if rule.matcher.requires_log() {
				"log"
			} else if rule.matcher.is_unconditional() {
				"any"
			} else {
				"message"
			};
			println!(
				"  {}. {} [{}] {} param(s)",
				position + 1,
				rule.canonical_type,
				requirement,
				rule.params.len()
			);
		}
	}
	Ok(())
}

fn validate_rule_sets(config: &AppConfig) -> Result<()> {
	info!("Configuration is valid");
	let registry = config
		.engine
		.chain_registry()
		.context("Invalid chain configuration")?;

	let mut failures = 0;
	for chain in registry.supported_chains() {
		let result = registry.rule_set(&chain).and_then(|rules| validate(&rules).map(|_| rules.len()));
		match result {
			Ok(count) => info!(chain = %chain, rules = count, "Rule set is valid"),
			Err(e) => {
				warn!(chain = %chain, error = %e, "Rule set is invalid");
				failures += 1;
			}
		}
	}

	if failures > 0 {
		anyhow::bail!("{} chain(s) have invalid rule sets", failures);
	}

	println!("Configuration and rule sets are valid");
	Ok(())
}

fn setup_tracing(log_level: &str, json: bool) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	let registry = tracing_subscriber::registry().with(env_filter);
	if json {
		registry
			.with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
			.try_init()
			.context("Failed to initialize tracing")?;
	} else {
		registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.try_init()
			.context("Failed to initialize tracing")?;
	}

	Ok(())
}
