//! # SBC HAL Binary
//!
//! Detects the board, prints what was found and optionally exercises the
//! configured digital lines on the simulation provider.
//!
//! # Usage
//!
//! ```bash
//! # Detect the board with the default sources
//! sbc_hal
//!
//! # JSON report including live readings
//! sbc_hal --json --readings
//!
//! # Fixture sources, name channel first
//! sbc_hal --cpu-info tests/cpuinfo --device-model tests/model --name-first
//!
//! # Create the configured lines on the simulation provider and toggle each
//! sbc_hal --config config/runtime.toml --simulate -v
//! ```

use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

use sbc_boardinfo::reading::BoardReading;
use sbc_boardinfo::{BoardResolver, RuntimeContext, RuntimeFacts};
use sbc_common::board::catalog::validate_catalog;
use sbc_common::config::{ConfigError, ConfigLoader, DetectionPrecedence, RuntimeConfig};
use sbc_common::consts::DEFAULT_CONFIG_PATH;
use sbc_common::io::state::DigitalStateChangeEvent;
use sbc_hal::providers::SIMULATION_PROVIDER_ID;
use sbc_hal::{DigitalStateChangeListener, IoRegistry, ProviderRegistry};

/// SBC HAL - board detection and digital I/O
#[derive(Parser, Debug)]
#[command(name = "sbc_hal")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Board detection and digital I/O registry for single-board computers")]
#[command(long_about = None)]
struct Args {
    /// Runtime configuration file. Defaults apply when absent.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the CPU information file
    #[arg(long, value_name = "PATH")]
    cpu_info: Option<PathBuf>,

    /// Override the device-tree model file
    #[arg(long, value_name = "PATH")]
    device_model: Option<PathBuf>,

    /// Override the memory information file
    #[arg(long, value_name = "PATH")]
    mem_info: Option<PathBuf>,

    /// Consult the device-tree model before the revision code
    #[arg(long)]
    name_first: bool,

    /// Include live readings (temperature, voltage, uptime)
    #[arg(short, long)]
    readings: bool,

    /// Verify catalog integrity
    #[arg(long)]
    check: bool,

    /// Create the configured lines on the simulation provider
    #[arg(short = 's', long)]
    simulate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs and the report in JSON format
    #[arg(long)]
    json: bool,
}

/// Everything the binary prints.
#[derive(Serialize)]
struct Report<'a> {
    facts: &'a RuntimeFacts,
    capabilities: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    readings: Option<BoardReading>,
}

/// Logs every transition it sees.
struct LogListener;

impl DigitalStateChangeListener for LogListener {
    fn on_digital_state_change(&self, event: &DigitalStateChangeEvent) {
        info!("Transition {}", event);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("SBC HAL failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let loaded = load_config(&args);
    setup_tracing(&args, loaded.as_ref().ok());
    let mut config = loaded?;
    config.validate()?;

    info!("SBC HAL v{} starting...", env!("CARGO_PKG_VERSION"));

    if args.check {
        validate_catalog()?;
        info!("Catalog integrity check passed");
    }

    if let Some(path) = args.cpu_info.clone() {
        config.sources.cpu_info = path;
    }
    if let Some(path) = args.device_model.clone() {
        config.sources.device_model = path;
    }
    if let Some(path) = args.mem_info.clone() {
        config.sources.mem_info = path;
    }
    if args.name_first {
        config.detection.precedence = DetectionPrecedence::NameFirst;
    }

    let context = RuntimeContext::new(BoardResolver::new(
        config.sources.clone(),
        config.detection.precedence,
    ));
    let facts = context.current();

    let report = Report {
        facts: &facts,
        capabilities: facts.capabilities().iter_names().map(|(name, _)| name).collect(),
        readings: args.readings.then(|| BoardReading::collect(&config.sources)),
    };
    print_report(&report, args.json)?;

    if args.simulate {
        simulate(&config, &facts)?;
    }

    info!("SBC HAL shutdown complete");
    Ok(())
}

/// Explicit `--config` must exist; the default path is optional.
fn load_config(args: &Args) -> Result<RuntimeConfig, ConfigError> {
    match &args.config {
        Some(path) => RuntimeConfig::load(path),
        None => match RuntimeConfig::load(Path::new(DEFAULT_CONFIG_PATH)) {
            Err(ConfigError::FileNotFound) => Ok(RuntimeConfig::default()),
            other => other,
        },
    }
}

fn print_report(report: &Report<'_>, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let facts = report.facts;
    let board = facts.descriptor();
    println!("Board:        {} [{}]", board.label, board.id);
    println!("Detected by:  {}", facts.board.channel);
    println!(
        "Revision:     {}",
        facts.board.cpu_revision.as_deref().unwrap_or("-")
    );
    println!(
        "Model:        {}",
        facts.board.device_model.as_deref().unwrap_or("-")
    );
    if !board.is_unknown() {
        println!("SoC / CPU:    {} / {} x{}", board.soc, board.cpu.label(), board.cores);
        println!("Header:       {}", board.header_version.label());
    }
    println!(
        "OS:           {} {} ({})",
        facts.os.name, facts.os.version, facts.os.architecture
    );
    println!(
        "Runtime:      v{} {}-bit{}",
        facts.runtime.version,
        facts.runtime.pointer_width,
        if facts.runtime.debug_build { " (debug)" } else { "" }
    );
    if let Some(kb) = facts.mem_total_kb {
        println!("Memory:       {} MiB", kb / 1024);
    }
    println!("Capabilities: {}", report.capabilities.join(", "));

    if let Some(reading) = &report.readings {
        println!(
            "Temperature:  {:.1} °C / {:.1} °F",
            reading.temperature_celsius(),
            reading.temperature_fahrenheit()
        );
        println!("Core voltage: {:.4} V", reading.volt_value());
        println!("Uptime:       {}", reading.uptime);
    }
    Ok(())
}

/// Create every configured line, toggle each once, then shut down.
fn simulate(config: &RuntimeConfig, facts: &RuntimeFacts) -> Result<(), Box<dyn std::error::Error>> {
    let providers = ProviderRegistry::with_builtin();
    let provider = providers.create_provider(SIMULATION_PROVIDER_ID, facts.descriptor())?;
    let registry = IoRegistry::new();
    let listener: Arc<dyn DigitalStateChangeListener> = Arc::new(LogListener);

    if config.lines.is_empty() {
        warn!("No [[lines]] configured, nothing to simulate");
    }

    for line in &config.lines {
        match registry.create(&provider, line.clone()) {
            Ok(io) => {
                io.add_listener(std::slice::from_ref(&listener));
                if let Err(e) = io.toggle() {
                    warn!("Line '{}': toggle failed: {}", io.id(), e);
                }
            }
            Err(e) => error!("Line '{}' not created: {}", line.id, e),
        }
    }

    let count = registry.shutdown_provider(provider.id());
    info!("Simulation finished, {} line(s) released", count);
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and config.
fn setup_tracing(args: &Args, config: Option<&RuntimeConfig>) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        config.map(|c| c.shared.log_level).unwrap_or_default().into()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
