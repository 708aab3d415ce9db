use anyhow::Context;
use chrono::Weekday;
use clap::Parser;
use plan_schedule::report::{render_assignee_summaries, write_report_with_layout};
use plan_schedule::{Plan, PlanError, ReportFormat, TableLayout, WorkCalendarConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Turn a work-breakdown plan into a dated schedule.
#[derive(Debug, Parser)]
#[command(name = "cli", version)]
struct Args {
    /// Only report tasks owned by this assignee
    #[arg(short = 'm', long = "man", value_name = "ASSIGNEE")]
    man: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
    format: ReportFormat,

    /// Append per-assignee totals (table format only)
    #[arg(long)]
    summary: bool,

    /// Comma-separated working weekdays, e.g. `mon,tue,wed,thu,fri,sat`
    #[arg(long, value_delimiter = ',', value_name = "DAYS")]
    working_days: Vec<Weekday>,

    /// Path to the work-breakdown file
    plan_file: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = if args.working_days.is_empty() {
        WorkCalendarConfig::default()
    } else {
        WorkCalendarConfig::new(args.working_days.iter().copied())?
    };

    let plan = match Plan::load_with_config(&args.plan_file, &config) {
        Ok(plan) => plan,
        Err(err @ PlanError::MissingStartDate) => return Err(err.into()),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("cannot schedule {}", args.plan_file.display()));
        }
    };

    let mut schedule = plan.schedule();
    let layout = TableLayout::for_schedule(&schedule);
    if let Some(man) = args.man.as_deref().map(str::trim) {
        schedule = schedule.filtered(man);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report_with_layout(&schedule, args.format, &layout, &mut out)?;

    if args.summary && args.format == ReportFormat::Table {
        let summaries = schedule.assignee_summaries()?;
        writeln!(out)?;
        out.write_all(render_assignee_summaries(&summaries).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
