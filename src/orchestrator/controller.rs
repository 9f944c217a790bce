//! Run lifecycle controller.
//!
//! Starts workflow runs on request, keeps at most one in flight, and forwards
//! the outcome to presentation layers as events.

use crate::engine::WorkflowEngine;
use crate::model::{AnalysisResult, SequencerConfig, WorkflowEvent};
use crate::sample::AnalysisSource;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI layers.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    Generate { company: String },
    Quit,
}

/// Internal handle for a running workflow task.
struct RunCtx {
    handle: Option<tokio::task::JoinHandle<Result<AnalysisResult>>>,
}

fn start_run(
    cfg: &SequencerConfig,
    source: &Arc<dyn AnalysisSource>,
    company: String,
    event_tx: UnboundedSender<WorkflowEvent>,
) -> RunCtx {
    let engine = WorkflowEngine::new(cfg.clone(), source.clone());
    let handle = tokio::spawn(async move { engine.run(company, event_tx).await });
    RunCtx {
        handle: Some(handle),
    }
}

/// Serve UI commands until `Quit` or until the command channel closes.
pub(crate) async fn run_controller(
    cfg: SequencerConfig,
    source: Arc<dyn AnalysisSource>,
    event_tx: UnboundedSender<WorkflowEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut run_ctx: Option<RunCtx> = None;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Generate { company }) => {
                        let company = company.trim().to_string();
                        if run_ctx.is_some() {
                            tracing::debug!(company = %company, "trigger ignored, run in flight");
                        } else if company.is_empty() {
                            tracing::debug!("trigger ignored, empty company name");
                        } else {
                            tracing::info!(company = %company, "trigger accepted");
                            run_ctx = Some(start_run(&cfg, &source, company, event_tx.clone()));
                        }
                    }
                    Some(UiCommand::Quit) | None => {
                        // The view is going away; an unfinished run has nobody to report to.
                        if let Some(mut ctx) = run_ctx.take() {
                            if let Some(h) = ctx.handle.take() {
                                h.abort();
                            }
                        }
                        break;
                    }
                }
            }
            // Do not take the JoinHandle before this branch wins; otherwise it can be dropped
            // if another select branch is chosen, and we'll never observe completion.
            maybe_done = async {
                if let Some(ctx) = &mut run_ctx {
                    if let Some(h) = ctx.handle.as_mut() {
                        return Some(h.await);
                    }
                }
                futures::future::pending().await
            } => {
                if let Some(join_res) = maybe_done {
                    run_ctx = None;
                    match join_res {
                        Ok(Ok(r)) => {
                            let _ = event_tx.send(WorkflowEvent::Completed { result: Box::new(r) });
                        }
                        Ok(Err(e)) => {
                            let message = format!("{e:#}");
                            tracing::warn!(error = %message, "workflow run failed");
                            let _ = event_tx.send(WorkflowEvent::Failed { message });
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "workflow task join failed");
                            let _ = event_tx.send(WorkflowEvent::Failed {
                                message: format!("run join failed: {e}"),
                            });
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::StaticAnalysisSource;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Harness {
        cmd_tx: UnboundedSender<UiCommand>,
        event_rx: UnboundedReceiver<WorkflowEvent>,
        handle: tokio::task::JoinHandle<Result<()>>,
    }

    fn spawn_controller(source: Arc<dyn AnalysisSource>) -> Harness {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_controller(
            SequencerConfig::default(),
            source,
            event_tx,
            cmd_rx,
        ));
        Harness {
            cmd_tx,
            event_rx,
            handle,
        }
    }

    fn generate(company: &str) -> UiCommand {
        UiCommand::Generate {
            company: company.into(),
        }
    }

    async fn collect_until_done(rx: &mut UnboundedReceiver<WorkflowEvent>) -> Vec<WorkflowEvent> {
        let mut out = Vec::new();
        while let Some(ev) = rx.recv().await {
            let done = matches!(
                ev,
                WorkflowEvent::Completed { .. } | WorkflowEvent::Failed { .. }
            );
            out.push(ev);
            if done {
                break;
            }
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn second_trigger_during_a_run_is_ignored() {
        let mut h = spawn_controller(Arc::new(StaticAnalysisSource));
        h.cmd_tx.send(generate("Tesla")).unwrap();
        tokio::time::sleep(Duration::from_millis(1300)).await;
        h.cmd_tx.send(generate("Tesla")).unwrap();
        h.cmd_tx.send(generate("Other")).unwrap();

        let events = collect_until_done(&mut h.event_rx).await;
        let started = events
            .iter()
            .filter(|e| matches!(e, WorkflowEvent::Started { .. }))
            .count();
        let steps: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                WorkflowEvent::StepAdvanced { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(started, 1);
        assert_eq!(steps, vec![1, 2, 3, 4, 5, 6]);
        assert!(matches!(events.last(), Some(WorkflowEvent::Completed { .. })));

        // Nothing else was queued behind the ignored triggers.
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(h.event_rx.try_recv().is_err());

        h.cmd_tx.send(UiCommand::Quit).unwrap();
        h.handle.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn blank_company_does_not_start_a_run() {
        let mut h = spawn_controller(Arc::new(StaticAnalysisSource));
        h.cmd_tx.send(generate("   ")).unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(h.event_rx.try_recv().is_err());

        h.cmd_tx.send(UiCommand::Quit).unwrap();
        h.handle.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn can_run_again_after_completion() {
        let mut h = spawn_controller(Arc::new(StaticAnalysisSource));
        h.cmd_tx.send(generate("Tesla")).unwrap();
        collect_until_done(&mut h.event_rx).await;

        h.cmd_tx.send(generate("Tesla")).unwrap();
        let events = collect_until_done(&mut h.event_rx).await;
        assert!(matches!(events.first(), Some(WorkflowEvent::Started { .. })));
        let Some(WorkflowEvent::Completed { result }) = events.last() else {
            panic!("expected completion");
        };
        assert_eq!(result.company, "Tesla");

        drop(h.cmd_tx);
        h.handle.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn source_failure_becomes_failed_event() {
        struct Broken;
        impl AnalysisSource for Broken {
            fn analyze(&self, _company: &str) -> Result<AnalysisResult> {
                anyhow::bail!("no data")
            }
        }

        let mut h = spawn_controller(Arc::new(Broken));
        h.cmd_tx.send(generate("Tesla")).unwrap();
        let events = collect_until_done(&mut h.event_rx).await;
        let Some(WorkflowEvent::Failed { message }) = events.last() else {
            panic!("expected failure");
        };
        assert!(message.contains("no data"));

        h.cmd_tx.send(UiCommand::Quit).unwrap();
        h.handle.await.unwrap().unwrap();
    }
}
