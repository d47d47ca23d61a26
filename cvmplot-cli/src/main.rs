#![forbid(unsafe_code)]

//! `cvmplot`: charts CVM benchmark logs as SVG.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cvmplot_chart::{render_svg, ChartSpec, THRESHOLD_CANVAS};
use cvmplot_core::config::CONFIG_FILE_NAME;
use cvmplot_core::{parser, Family, Manifest, PlotConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cvmplot", version, about = "Chart CVM benchmark runtimes on log-log axes")]
struct Cli {
	/// Config file (default: $CVMPLOT_CONFIG, ./cvmplot.toml, then the user config dir)
	#[arg(long, global = true)]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Plot every ε-δ combination found in a naive benchmark log
	Naive {
		file: PathBuf,
		/// SVG destination (default: <FILE>.svg)
		#[arg(short, long)]
		output: Option<PathBuf>,
	},
	/// Plot every buffer size found in a Knuth benchmark log
	Knuth {
		file: PathBuf,
		/// SVG destination (default: <FILE>.svg)
		#[arg(short, long)]
		output: Option<PathBuf>,
	},
	/// Plot Knuth logs against the configured naive ε-δ pair for one bit size
	All {
		/// Bit-size token matched against log file names, e.g. 32
		bits: String,
		/// Directory scanned for logs
		#[arg(long, default_value = ".", conflicts_with = "manifest")]
		dir: PathBuf,
		/// TOML manifest listing the logs instead of scanning
		#[arg(long)]
		manifest: Option<PathBuf>,
		/// SVG destination (default: knuth_vs_naive_<BITS>.svg)
		#[arg(short, long)]
		output: Option<PathBuf>,
	},
	/// Plot the CVM threshold (12/ε²)·ln(8x/δ)
	Thresh {
		#[arg(long)]
		epsilon: Option<f64>,
		#[arg(long)]
		delta: Option<f64>,
		/// Number of log-spaced samples
		#[arg(long)]
		points: Option<usize>,
		#[arg(long)]
		x_max: Option<f64>,
		/// SVG destination (default: thresh.svg)
		#[arg(short, long)]
		output: Option<PathBuf>,
	},
	/// Print the grouped series of one log as JSON
	Parse {
		file: PathBuf,
		#[arg(long, value_parser = parse_family)]
		family: Family,
		/// Keep only the configured naive ε-δ pair
		#[arg(long)]
		filtered: bool,
	},
	/// Print the manifest `all` would build from a directory scan, as TOML
	Manifest {
		bits: String,
		#[arg(long, default_value = ".")]
		dir: PathBuf,
	},
	/// Config helpers
	Config {
		#[command(subcommand)]
		action: ConfigCmd,
	},
}

#[derive(Debug, Subcommand)]
enum ConfigCmd {
	/// Print the effective configuration (file + env overrides) as JSON
	Show,
	/// Write a commented cvmplot.toml template
	WriteTemplate {
		#[arg(long)]
		path: Option<PathBuf>,
		/// Overwrite an existing file
		#[arg(long)]
		force: bool,
	},
}

const TEMPLATE_CVMPLOT_TOML: &str = r#"# cvmplot configuration

# trace | debug | info | warn | error (RUST_LOG wins when set)
log_level = "info"

# Runtime chart canvas in pixels
width = 1400
height = 800

# Charts go here when no --output is given
# output_dir = "plots"

# Naive ε-δ pair kept in the combined chart, in raw log units
# (epsilon / 10, delta * 0.0001)
[naive_filter]
epsilon = 5
delta = 100

# Directory scan of `cvmplot all`
[scan]
exclude_suffixes = ["pdf", "svg"]

# Defaults of `cvmplot thresh`
[threshold]
epsilon = 0.5
delta = 0.01
points = 1000
x_max = 10000000.0
"#;

fn parse_family(s: &str) -> std::result::Result<Family, String> {
	s.parse()
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	let (cfg, source) = load_config(cli.config.as_deref())?;
	init_tracing(&cfg.log_level);
	debug!(source = ?source, "configuration resolved");

	match cli.command {
		Commands::Naive { file, output } => {
			let data = parser::read_naive_file(&file, None)
				.with_context(|| format!("failed to read naive log {}", file.display()))?;
			info!(groups = data.len(), samples = data.total_samples(), "naive log parsed");
			let out = resolve_output(&cfg, output, file.with_extension("svg"));
			write_chart(&ChartSpec::naive(&data), &out, (cfg.width, cfg.height))
		}
		Commands::Knuth { file, output } => {
			let data = parser::read_knuth_file(&file)
				.with_context(|| format!("failed to read knuth log {}", file.display()))?;
			info!(groups = data.len(), samples = data.total_samples(), "knuth log parsed");
			let out = resolve_output(&cfg, output, file.with_extension("svg"));
			write_chart(&ChartSpec::knuth(&data), &out, (cfg.width, cfg.height))
		}
		Commands::All { bits, dir, manifest, output } => {
			let manifest = match manifest {
				Some(path) => {
					let listed = Manifest::load_from_file(&path)
						.with_context(|| format!("failed to load manifest {}", path.display()))?
						.for_size(&bits);
					if listed.is_empty() {
						bail!("manifest {} has no entries for size {bits}", path.display());
					}
					listed
				}
				None => Manifest::discover(&dir, &bits, &cfg.scan)?,
			};
			info!(entries = manifest.len(), bits = %bits, "loading benchmark logs");
			let data = manifest.load(cfg.naive_filter)?;
			let out = resolve_output(&cfg, output, PathBuf::from(format!("knuth_vs_naive_{}.svg", bits.trim())));
			write_chart(&ChartSpec::combined(&data), &out, (cfg.width, cfg.height))
		}
		Commands::Thresh { epsilon, delta, points, x_max, output } => {
			let mut curve = cfg.threshold;
			if let Some(v) = epsilon { curve.epsilon = v; }
			if let Some(v) = delta { curve.delta = v; }
			if let Some(v) = points { curve.points = v; }
			if let Some(v) = x_max { curve.x_max = v; }
			let spec = ChartSpec::threshold(&curve)?;
			let out = resolve_output(&cfg, output, PathBuf::from("thresh.svg"));
			write_chart(&spec, &out, THRESHOLD_CANVAS)
		}
		Commands::Parse { file, family, filtered } => {
			let filter = filtered.then_some(cfg.naive_filter);
			let data = parser::read_file(&file, family, filter)
				.with_context(|| format!("failed to read {family} log {}", file.display()))?;
			println!("{}", serde_json::to_string_pretty(&data)?);
			Ok(())
		}
		Commands::Manifest { bits, dir } => {
			let manifest = Manifest::discover(&dir, &bits, &cfg.scan)?;
			print!("{}", manifest.to_toml_string()?);
			Ok(())
		}
		Commands::Config { action } => match action {
			ConfigCmd::Show => {
				let out = serde_json::json!({
					"source": source.as_ref().map(|p| p.display().to_string()),
					"config": serde_json::to_value(&cfg)?,
				});
				println!("{}", serde_json::to_string_pretty(&out)?);
				Ok(())
			}
			ConfigCmd::WriteTemplate { path, force } => {
				let path = path.unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
				if path.exists() && !force {
					bail!("refusing to overwrite existing file: {} (use --force)", path.display());
				}
				std::fs::write(&path, TEMPLATE_CVMPLOT_TOML)
					.with_context(|| format!("failed to write {}", path.display()))?;
				eprintln!("wrote {}", path.display());
				Ok(())
			}
		},
	}
}

/// An explicit `--config` must exist; otherwise the usual search order applies.
fn load_config(explicit: Option<&Path>) -> Result<(PlotConfig, Option<PathBuf>)> {
	match explicit {
		Some(path) => {
			let mut cfg = PlotConfig::load_from_file(path)
				.with_context(|| format!("failed to load config {}", path.display()))?;
			cfg.apply_env()?;
			Ok((cfg, Some(path.to_path_buf())))
		}
		None => Ok(PlotConfig::discover()?),
	}
}

fn init_tracing(level: &str) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	if let Err(e) = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init()
	{
		eprintln!("cvmplot: logging disabled: {e}");
	}
}

fn resolve_output(cfg: &PlotConfig, explicit: Option<PathBuf>, fallback: PathBuf) -> PathBuf {
	if let Some(path) = explicit {
		return path;
	}
	match (&cfg.output_dir, fallback.file_name()) {
		(Some(dir), Some(name)) => dir.join(name),
		_ => fallback,
	}
}

fn write_chart(spec: &ChartSpec, path: &Path, size: (u32, u32)) -> Result<()> {
	render_svg(spec, path, size).with_context(|| format!("failed to render {}", path.display()))?;
	eprintln!("wrote {}", path.display());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn template_matches_defaults() {
		let cfg = PlotConfig::from_toml_str(TEMPLATE_CVMPLOT_TOML).unwrap();
		assert_eq!(cfg, PlotConfig::default());
	}

	#[test]
	fn output_dir_keeps_only_file_name() {
		let cfg = PlotConfig::builder().output_dir("plots").build().unwrap();
		assert_eq!(resolve_output(&cfg, None, PathBuf::from("logs/knuth_32.svg")), PathBuf::from("plots/knuth_32.svg"));
		assert_eq!(resolve_output(&cfg, Some("x.svg".into()), PathBuf::from("thresh.svg")), PathBuf::from("x.svg"));
		let plain = PlotConfig::default();
		assert_eq!(resolve_output(&plain, None, PathBuf::from("logs/knuth_32.svg")), PathBuf::from("logs/knuth_32.svg"));
	}

	#[test]
	fn second_tracing_init_reports_instead_of_panicking() {
		init_tracing("info");
		init_tracing("debug");
		tracing::info!("still logging");
	}

	#[test]
	fn cli_definition_is_consistent() {
		use clap::CommandFactory;
		Cli::command().debug_assert();
	}
}
