//! View-state controller shared by the TUI and text mode.
//!
//! Holds the company input and the busy flag, tracks which workflow phase is
//! in progress, and reveals the result once the sequence completes.

use crate::model::{AnalysisResult, WorkflowEvent, WorkflowStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Analysis,
    Quality,
    Details,
}

impl ResultTab {
    pub const ALL: [ResultTab; 3] = [ResultTab::Analysis, ResultTab::Quality, ResultTab::Details];

    pub fn title(self) -> &'static str {
        match self {
            ResultTab::Analysis => "SWOT Analysis",
            ResultTab::Quality => "Quality Evaluation",
            ResultTab::Details => "Process Details",
        }
    }

    pub fn index(self) -> usize {
        match self {
            ResultTab::Analysis => 0,
            ResultTab::Quality => 1,
            ResultTab::Details => 2,
        }
    }

    pub fn next(self) -> Self {
        ResultTab::ALL[(self.index() + 1) % ResultTab::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let n = ResultTab::ALL.len();
        ResultTab::ALL[(self.index() + n - 1) % n]
    }
}

/// Display status of one phase in the workflow list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Current,
    Complete,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub input: String,
    pub busy: bool,
    /// 1-based index of the phase in progress; 0 before the first run.
    pub step_index: usize,
    pub results_visible: bool,
    pub tab: ResultTab,
    pub result: Option<AnalysisResult>,
    pub info: String,
}

impl ViewState {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    pub fn can_trigger(&self) -> bool {
        !self.busy && !self.input.trim().is_empty()
    }

    /// Enter the running state. Returns the company to analyze, or `None` when
    /// the trigger is disabled.
    pub fn begin(&mut self) -> Option<String> {
        if !self.can_trigger() {
            return None;
        }
        self.busy = true;
        self.results_visible = false;
        self.step_index = 1;
        self.info.clear();
        Some(self.input.trim().to_string())
    }

    pub fn apply_event(&mut self, ev: WorkflowEvent) {
        match ev {
            WorkflowEvent::Started { .. } => {
                self.busy = true;
                self.results_visible = false;
                self.step_index = 1;
            }
            WorkflowEvent::StepAdvanced { index, .. } => {
                if self.busy {
                    self.step_index = index.min(WorkflowStep::ALL.len());
                }
            }
            WorkflowEvent::Settling => {}
            WorkflowEvent::Completed { result } => {
                self.step_index = WorkflowStep::ALL.len();
                self.result = Some(*result);
                self.busy = false;
                self.results_visible = true;
            }
            WorkflowEvent::Failed { message } => {
                self.busy = false;
                self.results_visible = false;
                self.info = format!("Analysis failed: {message}");
            }
        }
    }

    pub fn select_tab(&mut self, tab: ResultTab) {
        self.tab = tab;
    }

    /// Phase currently shown as in progress, if a run is active.
    pub fn current_step(&self) -> Option<WorkflowStep> {
        if self.busy {
            WorkflowStep::at(self.step_index)
        } else {
            None
        }
    }

    /// Status of the phase at 0-based `position` in [`WorkflowStep::ALL`].
    pub fn step_status(&self, position: usize) -> StepStatus {
        let index = position + 1;
        if self.results_visible || index < self.step_index {
            StepStatus::Complete
        } else if self.busy && index == self.step_index {
            StepStatus::Current
        } else {
            StepStatus::Pending
        }
    }

    /// Fraction of phases reached, for the progress bar.
    pub fn progress(&self) -> f64 {
        let n = WorkflowStep::ALL.len();
        (self.step_index.min(n) as f64) / (n as f64)
    }

    /// The result, only once it is visible.
    pub fn visible_result(&self) -> Option<&AnalysisResult> {
        if self.results_visible {
            self.result.as_ref()
        } else {
            None
        }
    }
}
