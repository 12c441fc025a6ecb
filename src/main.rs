use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use doodle_assist::draw::ShapeOrigin;
use doodle_assist::eventlog::EventLog;
use doodle_assist::replay::{self, ReplayReport};
use doodle_assist::util::color_to_name;
use doodle_assist::{Config, EditorSession};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "doodle-assist")]
#[command(version, about = "Drawing editor core with a shape-completion assistant")]
struct Cli {
    /// Gesture script to replay through the editor
    #[arg(long, short = 's', value_name = "FILE", required_unless_present = "print_config")]
    script: Option<PathBuf>,

    /// Event log destination (overrides the config file)
    #[arg(long, short = 'l', value_name = "FILE", conflicts_with = "no_log")]
    log: Option<PathBuf>,

    /// Do not write the event log
    #[arg(long, action = ArgAction::SetTrue)]
    no_log: bool,

    /// Config file to use instead of ~/.config/doodle-assist/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Experimental condition stamped on every record
    #[arg(long, value_name = "NAME")]
    condition: Option<String>,

    /// Task identifier stamped on every record
    #[arg(long, value_name = "ID")]
    task: Option<String>,

    /// Trial index stamped on every record
    #[arg(long, value_name = "N")]
    trial: Option<u32>,

    /// Print the effective configuration as TOML and exit
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    apply_overrides(&mut config, &cli);

    if cli.print_config {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let Some(script_path) = cli.script.as_ref() else {
        return Err(anyhow::anyhow!("--script is required"));
    };
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let commands = replay::parse_script(&source)
        .with_context(|| format!("Failed to parse script {}", script_path.display()))?;
    log::info!("Replaying {} commands from {}", commands.len(), script_path.display());

    let mut session = EditorSession::from_config(&config);
    let experiment = &config.experiment;
    session.set_experiment_context(
        experiment.condition.as_deref(),
        experiment.task_id.as_deref(),
        experiment.trial_index,
    );
    if config.logging.enabled {
        if let Err(err) = session.open_log(EventLog::new(&config.logging.events_path)) {
            log::warn!("{err}");
        }
    } else {
        log::info!("Event logging disabled");
    }

    let report = replay::run_script(&mut session, &commands);
    print_summary(&session, &report);
    Ok(())
}

/// Command-line values win over the config file.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(path) = &cli.log {
        config.logging.enabled = true;
        config.logging.events_path = path.clone();
    }
    if cli.no_log {
        config.logging.enabled = false;
    }
    if let Some(condition) = &cli.condition {
        config.experiment.condition = Some(condition.clone());
    }
    if let Some(task) = &cli.task {
        config.experiment.task_id = Some(task.clone());
    }
    if let Some(trial) = cli.trial {
        config.experiment.trial_index = Some(trial);
    }
}

fn print_summary(session: &EditorSession, report: &ReplayReport) {
    println!("Replayed {} commands", report.commands);
    println!("Active tool: {}", session.current_tool());
    println!("Shapes: {}", session.shapes().len());
    for item in session.shapes().iter() {
        let bounds = item.shape.bounding_box();
        let origin = match item.origin {
            ShapeOrigin::User => String::from("user"),
            ShapeOrigin::Template(template) => format!("template {template}"),
        };
        println!(
            "  #{} {} ({}, {}) at {:.1},{:.1} size {:.1}x{:.1}",
            item.id.0,
            item.shape.kind(),
            origin,
            color_to_name(&item.shape.style().stroke),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height
        );
    }
    match session.current_suggestion() {
        Some(suggestion) => println!(
            "Pending suggestion: {} (uncertainty {})",
            suggestion.id, suggestion.uncertainty
        ),
        None => println!("Pending suggestion: none"),
    }
    if let Some(log) = session.event_log() {
        println!("Event log: {}", log.path().display());
    }
    if report.log_failures > 0 {
        println!("Event log failures: {}", report.log_failures);
    }
}
