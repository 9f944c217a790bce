use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerConfig {
    #[serde(with = "humantime_serde")]
    pub step_interval: Duration,
    #[serde(with = "humantime_serde")]
    pub settle_delay: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            step_interval: Duration::from_millis(600),
            settle_delay: Duration::from_millis(400),
        }
    }
}

impl SequencerConfig {
    /// Time from trigger until results become visible, or `None` if it
    /// does not fit in a `Duration`.
    pub fn total_duration(&self) -> Option<Duration> {
        let advances = WorkflowStep::ALL.len().saturating_sub(1) as u32;
        self.step_interval
            .checked_mul(advances)?
            .checked_add(self.settle_delay)
    }
}

/// Symbolic icon attached to each workflow phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepIcon {
    Database,
    FileText,
    BarChart,
    Brain,
    Target,
    Refresh,
}

impl StepIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            StepIcon::Database => "≡",
            StepIcon::FileText => "▤",
            StepIcon::BarChart => "▥",
            StepIcon::Brain => "◉",
            StepIcon::Target => "◎",
            StepIcon::Refresh => "↻",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStep {
    InitializingResearch,
    GatheringData,
    AnalyzingMarket,
    GeneratingDraft,
    EvaluatingQuality,
    RefiningAnalysis,
}

impl WorkflowStep {
    /// Animation order.
    pub const ALL: [WorkflowStep; 6] = [
        WorkflowStep::InitializingResearch,
        WorkflowStep::GatheringData,
        WorkflowStep::AnalyzingMarket,
        WorkflowStep::GeneratingDraft,
        WorkflowStep::EvaluatingQuality,
        WorkflowStep::RefiningAnalysis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkflowStep::InitializingResearch => "Initializing research agent",
            WorkflowStep::GatheringData => "Gathering company data",
            WorkflowStep::AnalyzingMarket => "Analyzing market position",
            WorkflowStep::GeneratingDraft => "Generating SWOT draft",
            WorkflowStep::EvaluatingQuality => "Evaluating quality",
            WorkflowStep::RefiningAnalysis => "Refining analysis",
        }
    }

    pub fn icon(self) -> StepIcon {
        match self {
            WorkflowStep::InitializingResearch => StepIcon::Database,
            WorkflowStep::GatheringData => StepIcon::FileText,
            WorkflowStep::AnalyzingMarket => StepIcon::BarChart,
            WorkflowStep::GeneratingDraft => StepIcon::Brain,
            WorkflowStep::EvaluatingQuality => StepIcon::Target,
            WorkflowStep::RefiningAnalysis => StepIcon::Refresh,
        }
    }

    /// Look up a phase by its 1-based position in the sequence.
    pub fn at(index: usize) -> Option<WorkflowStep> {
        index
            .checked_sub(1)
            .and_then(|i| WorkflowStep::ALL.get(i).copied())
    }
}

/// Roles of the self-correcting pipeline the UI describes (never executed here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineRole {
    Researcher,
    Analyst,
    Critic,
    Editor,
}

impl PipelineRole {
    pub const ALL: [PipelineRole; 4] = [
        PipelineRole::Researcher,
        PipelineRole::Analyst,
        PipelineRole::Critic,
        PipelineRole::Editor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PipelineRole::Researcher => "Researcher",
            PipelineRole::Analyst => "Analyst",
            PipelineRole::Critic => "Critic",
            PipelineRole::Editor => "Editor",
        }
    }

    /// Short form used in the sidebar.
    pub fn summary(self) -> &'static str {
        match self {
            PipelineRole::Researcher => "Researcher gathers data",
            PipelineRole::Analyst => "Analyst creates SWOT draft",
            PipelineRole::Critic => "Critic evaluates quality (1-10)",
            PipelineRole::Editor => "Editor improves if score < 7",
        }
    }

    /// Long form used in the process details view.
    pub fn detail(self) -> &'static str {
        match self {
            PipelineRole::Researcher => "Researcher gathers company data",
            PipelineRole::Analyst => "Analyst creates initial SWOT draft",
            PipelineRole::Critic => "Critic evaluates quality (1-10 scale)",
            PipelineRole::Editor => "If score < 7, Editor improves draft",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub company: String,
    /// Overall quality score on a 0-10 scale.
    pub score: f64,
    pub revision_count: u32,
    /// Report length in characters.
    pub report_length: u64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    pub critique: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorkflowEvent {
    Started {
        company: String,
    },
    /// `index` is 1-based and names the phase now in progress.
    StepAdvanced {
        index: usize,
        step: WorkflowStep,
    },
    /// Last phase reached; waiting out the settle delay.
    Settling,
    Completed {
        result: Box<AnalysisResult>,
    },
    Failed {
        message: String,
    },
}

/// JSON-mode output envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub timestamp_utc: String,
    pub company_input: String,
    pub config: SequencerConfig,
    pub result: AnalysisResult,
}
