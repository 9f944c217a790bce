//! Workflow sequencer.
//!
//! Walks the fixed phase list on a timer and hands back the analysis from the
//! configured source. There is no cancel path: once started, a run always
//! finishes.

use crate::model::{AnalysisResult, SequencerConfig, WorkflowEvent, WorkflowStep};
use crate::sample::AnalysisSource;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct WorkflowEngine {
    cfg: SequencerConfig,
    source: Arc<dyn AnalysisSource>,
}

impl WorkflowEngine {
    pub fn new(cfg: SequencerConfig, source: Arc<dyn AnalysisSource>) -> Self {
        Self { cfg, source }
    }

    pub async fn run(
        self,
        company: String,
        event_tx: mpsc::UnboundedSender<WorkflowEvent>,
    ) -> Result<AnalysisResult> {
        tracing::info!(
            company = %company,
            expected_ms = ?self.cfg.total_duration().map(|d| d.as_millis()),
            "workflow started"
        );
        let _ = event_tx.send(WorkflowEvent::Started {
            company: company.clone(),
        });

        for (i, step) in WorkflowStep::ALL.iter().copied().enumerate() {
            // Phase 1 starts immediately; each later phase waits one interval.
            if i > 0 {
                tokio::time::sleep(self.cfg.step_interval).await;
            }
            let index = i + 1;
            tracing::debug!(index, step = step.label(), "workflow step");
            let _ = event_tx.send(WorkflowEvent::StepAdvanced { index, step });
        }

        let _ = event_tx.send(WorkflowEvent::Settling);
        tokio::time::sleep(self.cfg.settle_delay).await;

        let result = self.source.analyze(&company)?;
        tracing::info!(
            company = %company,
            subject = %result.company,
            score = result.score,
            "workflow completed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::StaticAnalysisSource;
    use std::time::Duration;

    struct FailingSource;

    impl AnalysisSource for FailingSource {
        fn analyze(&self, _company: &str) -> Result<AnalysisResult> {
            anyhow::bail!("backend unavailable")
        }
    }

    fn engine() -> WorkflowEngine {
        WorkflowEngine::new(SequencerConfig::default(), Arc::new(StaticAnalysisSource))
    }

    #[tokio::test(start_paused = true)]
    async fn run_takes_intervals_plus_settle() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let start = tokio::time::Instant::now();
        let result = engine().run("Tesla".into(), tx).await.unwrap();
        assert_eq!(start.elapsed(), Duration::from_millis(600 * 5 + 400));
        assert_eq!(result.company, "Tesla");
    }

    #[tokio::test(start_paused = true)]
    async fn emits_every_phase_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        engine().run("Tesla".into(), tx).await.unwrap();

        let mut steps = Vec::new();
        let mut saw_started = false;
        let mut saw_settling = false;
        while let Ok(ev) = rx.try_recv() {
            match ev {
                WorkflowEvent::Started { company } => {
                    assert_eq!(company, "Tesla");
                    assert!(steps.is_empty());
                    saw_started = true;
                }
                WorkflowEvent::StepAdvanced { index, step } => {
                    assert_eq!(WorkflowStep::at(index), Some(step));
                    steps.push(index);
                }
                WorkflowEvent::Settling => {
                    assert_eq!(steps.len(), WorkflowStep::ALL.len());
                    saw_settling = true;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert!(saw_started && saw_settling);
        assert_eq!(steps, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test(start_paused = true)]
    async fn first_step_is_published_at_trigger_time() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(engine().run("Tesla".into(), tx));

        tokio::time::sleep(Duration::from_millis(599)).await;
        let mut last = 0;
        while let Ok(ev) = rx.try_recv() {
            if let WorkflowEvent::StepAdvanced { index, .. } = ev {
                last = index;
            }
        }
        assert_eq!(last, 1);

        handle.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn source_errors_propagate_after_the_animation() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let engine = WorkflowEngine::new(SequencerConfig::default(), Arc::new(FailingSource));
        let start = tokio::time::Instant::now();
        let err = engine.run("Tesla".into(), tx).await.unwrap_err();
        assert!(format!("{err:#}").contains("backend unavailable"));
        assert_eq!(start.elapsed(), Duration::from_millis(3400));
    }
}
