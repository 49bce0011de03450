use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use crate::audit::AuditReport;

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub description: String,
    pub passed: bool,
    pub failures: Vec<String>,
    pub duration_micros: u64,
}

impl ScenarioResult {
    pub fn new(
        scenario_name: &str,
        description: &str,
        failures: Vec<String>,
        duration: Duration,
    ) -> Self {
        Self {
            scenario_name: scenario_name.to_string(),
            description: description.to_string(),
            passed: failures.is_empty(),
            failures,
            duration_micros: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        }
    }
}

/// Everything a single tester invocation produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub scenarios: Vec<ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditReport>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.scenarios.iter().all(|r| r.passed)
    }
}

pub fn generate_console_report(
    out: &mut dyn Write,
    summary: &RunSummary,
    total_duration: Duration,
) -> Result<()> {
    let results = &summary.scenarios;
    writeln!(out)?;
    writeln!(out, "{}", "📊 Faction Logic Results".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        writeln!(out, "   {}", result.description)?;
        for failure in &result.failures {
            writeln!(out, "     • {}", failure.red())?;
        }
    }

    if let Some(audit) = &summary.audit {
        writeln!(out)?;
        writeln!(out, "{}", "🔎 Save Audit".bright_yellow().bold())?;
        writeln!(out, "{}", "=============".yellow())?;
        writeln!(out, "Accepted records: {}", audit.load.accepted_records.len())?;
        writeln!(out, "Ignored keys: {}", join_or_dash(&audit.load.ignored_keys))?;
        writeln!(out, "Members: {}", join_names(&audit.members))?;
        writeln!(out, "Banned: {}", join_names(&audit.banned))?;
        writeln!(out, "Invited: {}", join_names(&audit.invited))?;
        for diagnostic in &audit.load.diagnostics {
            writeln!(out, "   ⚠️  {}", diagnostic.to_string().yellow())?;
        }
        writeln!(out, "Re-exported save: {}", audit.export)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    let json_output = serde_json::to_string_pretty(summary)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, summary: &RunSummary) -> Result<()> {
    writeln!(out, "# Faction Logic Results\n")?;

    let results = &summary.scenarios;
    if results.is_empty() {
        writeln!(out, "_No scenarios executed._\n")?;
    } else {
        let passed = results.iter().filter(|r| r.passed).count();
        writeln!(out, "- **Total scenarios**: {}", results.len())?;
        writeln!(out, "- **Passed**: {passed}")?;
        writeln!(out, "- **Failed**: {}\n", results.len() - passed)?;
        for result in results {
            let status = if result.passed { "✅" } else { "❌" };
            writeln!(out, "### {} {}\n", status, result.scenario_name)?;
            writeln!(out, "{}\n", result.description)?;
            for failure in &result.failures {
                writeln!(out, "- {failure}")?;
            }
        }
    }

    if let Some(audit) = &summary.audit {
        writeln!(out, "## Save Audit\n")?;
        writeln!(
            out,
            "- **Accepted records**: {}",
            audit.load.accepted_records.len()
        )?;
        writeln!(
            out,
            "- **Ignored keys**: {}",
            join_or_dash(&audit.load.ignored_keys)
        )?;
        writeln!(out, "- **Members**: {}", join_names(&audit.members))?;
        writeln!(out, "- **Banned**: {}", join_names(&audit.banned))?;
        for diagnostic in &audit.load.diagnostics {
            writeln!(out, "- ⚠️ {diagnostic}")?;
        }
    }
    Ok(())
}

fn join_names(names: &[faction_game::FactionName]) -> String {
    if names.is_empty() {
        return "-".to_string();
    }
    names
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
