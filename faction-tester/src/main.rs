mod audit;
mod reports;
mod scenarios;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use reports::{RunSummary, ScenarioResult};
use scenarios::{all_scenario_keys, find_scenario, list_scenarios};

#[derive(Debug, Parser)]
#[command(name = "faction-tester", version = "0.1.0")]
#[command(about = "QA harness for faction save export and load reconciliation")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Player save JSON to audit (requires --factions-save)
    #[arg(long, requires = "factions_save")]
    player_save: Option<PathBuf>,

    /// Faction save JSON to audit (requires --player-save)
    #[arg(long, requires = "player_save")]
    factions_save: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let mut summary = RunSummary {
        scenarios: run_logic_scenarios(&scenarios, args.verbose)?,
        audit: None,
    };

    if let (Some(player), Some(factions)) = (&args.player_save, &args.factions_save) {
        log::info!(
            "Auditing {} against {}",
            factions.display(),
            player.display()
        );
        summary.audit = Some(audit::audit_save_files(player, factions)?);
    }

    write_reports(&args, &summary, start_time)?;

    if !summary.all_passed() {
        bail!("one or more faction scenarios failed");
    }
    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in all_scenario_keys() {
            if !scenarios.contains(&key) {
                scenarios.push(key);
            }
        }
    }
    scenarios
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn run_logic_scenarios(keys: &[String], verbose: bool) -> Result<Vec<ScenarioResult>> {
    let mut results = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(scenario) = find_scenario(key) else {
            bail!("unknown scenario '{key}' (use --list-scenarios)");
        };
        if verbose {
            println!("🧪 Running scenario: {}", scenario.key.bright_white());
        }
        let started = Instant::now();
        let failures = scenario.run();
        results.push(ScenarioResult::new(
            scenario.key,
            scenario.description,
            failures,
            started.elapsed(),
        ));
    }
    Ok(results)
}

fn write_reports(args: &Args, summary: &RunSummary, start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, summary)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, summary)?,
        _ => reports::generate_console_report(
            &mut output_target,
            summary,
            start_time.elapsed(),
        )?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
