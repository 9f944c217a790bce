use crate::engine::WorkflowEngine;
use crate::model::{RunReport, SequencerConfig, WorkflowEvent, WorkflowStep};
use crate::sample::{AnalysisSource, StaticAnalysisSource};
use crate::view::ViewState;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "swot-agent",
    version,
    about = "Self-correcting multi-agent SWOT analysis demo with optional TUI"
)]
pub struct Cli {
    /// Company name to analyze (pre-filled in the TUI)
    #[arg(long, default_value = "Tesla")]
    pub company: String,

    /// Print JSON report and exit (no TUI)
    #[arg(long, conflicts_with = "text")]
    pub json: bool,

    /// Print text report and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Delay between workflow steps
    #[arg(long, default_value = "600ms")]
    pub step_interval: humantime::Duration,

    /// Delay after the last step before results are shown
    #[arg(long, default_value = "400ms")]
    pub settle_delay: humantime::Duration,

    /// Start an analysis as soon as the TUI opens
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    pub generate_on_launch: bool,

    /// Write logs to this file (TUI default: <cache dir>/swot-agent/swot-agent.log)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,
}

impl Cli {
    pub fn is_tui(&self) -> bool {
        cfg!(feature = "tui") && !self.json && !self.text
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if !args.json && !args.text {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(args).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            return run_text(args).await;
        }
    }

    if args.json {
        return run_json(args).await;
    }

    run_text(args).await
}

/// Build a `SequencerConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> Result<SequencerConfig> {
    let cfg = SequencerConfig {
        step_interval: Duration::from(args.step_interval),
        settle_delay: Duration::from(args.settle_delay),
    };
    if cfg.total_duration().is_none() {
        anyhow::bail!(
            "--step-interval {} with --settle-delay {} is too long for a run",
            args.step_interval,
            args.settle_delay
        );
    }
    Ok(cfg)
}

pub fn default_source() -> Arc<dyn AnalysisSource> {
    Arc::new(StaticAnalysisSource)
}

/// Validate the company input the same way the TUI gates its trigger.
fn company_from_args(args: &Cli) -> Result<String> {
    let mut view = ViewState::new(args.company.clone());
    view.begin()
        .context("company name must not be empty or whitespace")
}

async fn run_json(args: Cli) -> Result<()> {
    let cfg = build_config(&args)?;
    let company = company_from_args(&args)?;
    let (out_tx, out_handle) = spawn_output_writer();

    // Events are not rendered in JSON mode.
    let (evt_tx, _) = mpsc::unbounded_channel::<WorkflowEvent>();
    let engine = WorkflowEngine::new(cfg.clone(), default_source());
    let result = engine
        .run(company.clone(), evt_tx)
        .await
        .context("analysis failed")?;

    let report = RunReport {
        timestamp_utc: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
        company_input: company,
        config: cfg,
        result,
    };
    let out = serde_json::to_string_pretty(&report).context("serialize report")?;
    let _ = out_tx.send(OutputLine::Stdout(out));

    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

async fn run_text(args: Cli) -> Result<()> {
    let cfg = build_config(&args)?;
    let mut view = ViewState::new(args.company.clone());
    let company = view
        .begin()
        .context("company name must not be empty or whitespace")?;

    let (out_tx, out_handle) = spawn_output_writer();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<WorkflowEvent>();

    let engine = WorkflowEngine::new(cfg, default_source());
    let handle = tokio::spawn(async move { engine.run(company, evt_tx).await });

    while let Some(ev) = evt_rx.recv().await {
        match &ev {
            WorkflowEvent::Started { company } => {
                let _ = out_tx.send(OutputLine::Stderr(format!("Analyzing {company}")));
            }
            WorkflowEvent::StepAdvanced { index, step } => {
                let _ = out_tx.send(OutputLine::Stderr(format!(
                    "[{}/{}] {}",
                    index,
                    WorkflowStep::ALL.len(),
                    step.label()
                )));
            }
            _ => {}
        }
        view.apply_event(ev);
    }

    let result = handle
        .await
        .context("workflow task failed")?
        .context("analysis failed")?;
    view.apply_event(WorkflowEvent::Completed {
        result: Box::new(result),
    });

    if let Some(r) = view.visible_result() {
        for line in crate::presenter::text_report(r) {
            let _ = out_tx.send(OutputLine::Stdout(line));
        }
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_timing() {
        let args = Cli::parse_from(["swot-agent"]);
        assert_eq!(args.company, "Tesla");
        assert!(!args.generate_on_launch);
        assert_eq!(build_config(&args).unwrap(), SequencerConfig::default());
    }

    #[test]
    fn humantime_flags_parse() {
        let args = Cli::parse_from([
            "swot-agent",
            "--step-interval",
            "50ms",
            "--settle-delay",
            "1s",
            "--text",
        ]);
        let cfg = build_config(&args).unwrap();
        assert_eq!(cfg.step_interval, Duration::from_millis(50));
        assert_eq!(cfg.settle_delay, Duration::from_secs(1));
        assert!(!args.is_tui());
    }

    #[test]
    fn oversized_intervals_are_rejected() {
        let args = Cli::parse_from([
            "swot-agent",
            "--text",
            "--step-interval",
            "5000000000000000000s",
        ]);
        assert_eq!(
            args.step_interval,
            humantime::Duration::from(Duration::from_secs(5_000_000_000_000_000_000))
        );
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("too long"));

        let args = Cli::parse_from([
            "swot-agent",
            "--json",
            "--step-interval",
            "1000000000000000000s",
            "--settle-delay",
            "15000000000000000000s",
        ]);
        assert!(build_config(&args).is_err());
    }

    #[test]
    fn json_and_text_conflict() {
        assert!(Cli::try_parse_from(["swot-agent", "--json", "--text"]).is_err());
    }

    #[test]
    fn blank_company_rejected_in_batch_modes() {
        let args = Cli::parse_from(["swot-agent", "--text", "--company", "  "]);
        let err = company_from_args(&args).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));

        let args = Cli::parse_from(["swot-agent", "--json", "--company", " Acme "]);
        assert_eq!(company_from_args(&args).unwrap(), "Acme");
    }
}
