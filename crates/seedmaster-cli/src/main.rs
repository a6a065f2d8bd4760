#![forbid(unsafe_code)]
//! Demonstration binary: loads a `services.NuRandomService` configuration,
//! drives a simulated host job through its phases, registers a handful of
//! engines, and prints the end-of-job summary.

mod output;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use output::{resolve_output_mode, write_summary, OutputMode};
use seedmaster_core::{EventData, PolicyRegistry};
use seedmaster_service::{load_nu_random_service_config, ServiceAdapter, Verbosity};

/// Drive a demonstration job through the seed master.
#[derive(Parser, Debug)]
#[command(author, version, about = "Deterministic seed-allocation demonstration job", long_about = None)]
struct Cli {
    /// Path to a TOML file with a `[services.NuRandomService]` table. If
    /// omitted, a small built-in autoIncrement configuration is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulated events to process.
    #[arg(long, default_value_t = 3)]
    events: u32,

    /// Output format for the end-of-job summary.
    #[arg(long, value_enum)]
    format: Option<OutputMode>,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

const DEMO_CONFIG: &str = r#"
policy = "autoIncrement"
baseSeed = 1000
checkRange = false
verbosity = 0
endOfJobSummary = true
"#;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tree = match &cli.config {
        Some(path) => load_nu_random_service_config(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => DEMO_CONFIG.parse::<toml::Value>().expect("built-in demo config is valid TOML"),
    };

    let verbosity = Verbosity::new(tree.get("verbosity").and_then(toml::Value::as_integer).unwrap_or(0) as i32);
    let end_of_job_summary = tree.get("endOfJobSummary").and_then(toml::Value::as_bool).unwrap_or(false);

    let policy = PolicyRegistry::new().build(&tree)?;
    let mut adapter = ServiceAdapter::with_summary_config(policy, verbosity, end_of_job_summary);

    run_demo_job(&mut adapter, cli.events)?;

    let format = resolve_output_mode(cli.format);
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_summary(adapter.master(), format, &mut lock)?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt().with_env_filter(filter).with_target(false).init();
}

/// Simulate a host job: construct two global engines and two module-scoped
/// engines, then drive `events` simulated events through the reseeding
/// driver.
fn run_demo_job(adapter: &mut ServiceAdapter, events: u32) -> Result<()> {
    use seedmaster_service::Phase;

    adapter.state_transition(Phase::InServiceConstructor)?;
    info!("constructing global engines");
    adapter.register("pileup", true, None, None)?;
    adapter.register("cosmicRay", true, None, None)?;

    adapter.state_transition(Phase::InModuleConstructor)?;
    adapter.enter_module("geant4");
    adapter.register("physics", false, None, None)?;
    adapter.leave_module();

    adapter.enter_module("recon");
    adapter.register("tracker", false, None, None)?;
    adapter.leave_module();

    adapter.state_transition(Phase::InModuleBeginRun)?;

    for event_number in 1..=events {
        let data = EventData::new(1, 1, event_number, u64::from(event_number) * 1000, true, "DemoJob", String::new());
        adapter.on_pre_event(data)?;

        adapter.on_pre_module("geant4")?;
        adapter.on_post_module()?;

        adapter.on_pre_module("recon")?;
        adapter.on_post_module()?;

        adapter.on_post_event()?;
    }

    adapter.on_pre_end_job()?;
    let mut devnull = io::sink();
    adapter.on_post_end_job(&mut devnull)?;
    Ok(())
}
