//! Result projections.
//!
//! Turns an [`AnalysisResult`] plus the selected tab into plain data that the
//! TUI draws and text mode prints. Nothing here mutates the result.

use crate::model::{AnalysisResult, PipelineRole};
use crate::quality::{format_score, format_thousands, QualityBadge};
use crate::view::ResultTab;

/// The four SWOT quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Strengths,
        Quadrant::Weaknesses,
        Quadrant::Opportunities,
        Quadrant::Threats,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Quadrant::Strengths => "Strengths",
            Quadrant::Weaknesses => "Weaknesses",
            Quadrant::Opportunities => "Opportunities",
            Quadrant::Threats => "Threats",
        }
    }

    /// Bullet shown in front of each finding.
    pub fn bullet(self) -> &'static str {
        match self {
            Quadrant::Strengths => "✓",
            Quadrant::Weaknesses => "✗",
            Quadrant::Opportunities => "⚡",
            Quadrant::Threats => "⚠",
        }
    }

    pub fn items(self, r: &AnalysisResult) -> &[String] {
        match self {
            Quadrant::Strengths => &r.strengths,
            Quadrant::Weaknesses => &r.weaknesses,
            Quadrant::Opportunities => &r.opportunities,
            Quadrant::Threats => &r.threats,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindingsList<'a> {
    pub quadrant: Quadrant,
    pub items: &'a [String],
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityMetrics<'a> {
    pub score: f64,
    pub score_text: String,
    pub badge: QualityBadge,
    pub revisions: u32,
    pub characters: String,
    pub critique: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSummary {
    pub rows: Vec<(&'static str, String)>,
    pub steps: Vec<String>,
    pub workflow: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection<'a> {
    Findings(Vec<FindingsList<'a>>),
    Metrics(QualityMetrics<'a>),
    Process(ProcessSummary),
}

pub const STRATEGY_FOCUS: &str = "Cost Leadership";
pub const LOOP_RULE: &str = "Loop until quality ≥ 7 or max 3 revisions";

pub fn project(r: &AnalysisResult, tab: ResultTab) -> Projection<'_> {
    match tab {
        ResultTab::Analysis => Projection::Findings(
            Quadrant::ALL
                .iter()
                .map(|q| FindingsList {
                    quadrant: *q,
                    items: q.items(r),
                })
                .collect(),
        ),
        ResultTab::Quality => Projection::Metrics(QualityMetrics {
            score: r.score,
            score_text: format_score(r.score),
            badge: QualityBadge::for_score(r.score),
            revisions: r.revision_count,
            characters: format_thousands(r.report_length),
            critique: &r.critique,
        }),
        ResultTab::Details => Projection::Process(process_summary(r)),
    }
}

fn process_summary(r: &AnalysisResult) -> ProcessSummary {
    let mut steps: Vec<String> = PipelineRole::ALL
        .iter()
        .map(|role| role.detail().to_string())
        .collect();
    steps.push(LOOP_RULE.to_string());

    ProcessSummary {
        rows: vec![
            ("Company", r.company.clone()),
            ("Strategy Focus", STRATEGY_FOCUS.to_string()),
            (
                "Report Length",
                format!("{} chars", format_thousands(r.report_length)),
            ),
        ],
        steps,
        workflow: workflow_line(),
    }
}

/// "Workflow: Researcher → Analyst → Critic → Editor (loop)"
pub fn workflow_line() -> String {
    let chain: Vec<&str> = PipelineRole::ALL.iter().map(|r| r.name()).collect();
    format!("Workflow: {} (loop)", chain.join(" → "))
}

/// Sidebar "How It Works" lines.
pub fn how_it_works() -> Vec<String> {
    let mut lines = vec![
        "The system uses a multi-agent architecture with automatic quality control:".to_string(),
    ];
    for (i, role) in PipelineRole::ALL.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, role.summary()));
    }
    lines.push("Loop continues until quality ≥ 7 or max 3 revisions.".to_string());
    lines
}

/// Plain-text rendering of all three projections.
pub fn text_report(r: &AnalysisResult) -> Vec<String> {
    let mut lines = Vec::new();
    let badge = QualityBadge::for_score(r.score);
    lines.push(format!("{} Analysis", r.company));
    lines.push(format!(
        "Quality Score: {} ({})",
        format_score(r.score),
        badge.label()
    ));

    for tab in ResultTab::ALL {
        lines.push(String::new());
        lines.push(format!("== {} ==", tab.title()));
        match project(r, tab) {
            Projection::Findings(lists) => {
                for list in lists {
                    lines.push(format!("{}:", list.quadrant.title()));
                    for item in list.items {
                        lines.push(format!("  {} {}", list.quadrant.bullet(), item));
                    }
                }
            }
            Projection::Metrics(m) => {
                lines.push(format!("Overall Score: {}", m.score_text));
                lines.push(format!("Revisions Made: {}", m.revisions));
                lines.push(format!("Characters: {}", m.characters));
                lines.push(format!("Critic Evaluation: {}", m.critique));
            }
            Projection::Process(p) => {
                for (k, v) in &p.rows {
                    lines.push(format!("{k}: {v}"));
                }
                lines.push("Self-Correcting Process:".to_string());
                for (i, step) in p.steps.iter().enumerate() {
                    lines.push(format!("  {}. {}", i + 1, step));
                }
                lines.push(p.workflow);
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_analysis;

    #[test]
    fn analysis_tab_lists_quadrants_in_order() {
        let r = sample_analysis();
        let Projection::Findings(lists) = project(&r, ResultTab::Analysis) else {
            panic!("expected findings");
        };
        let titles: Vec<_> = lists.iter().map(|l| l.quadrant.title()).collect();
        assert_eq!(titles, vec!["Strengths", "Weaknesses", "Opportunities", "Threats"]);
        assert!(lists.iter().all(|l| l.items.len() == 4));
        assert_eq!(lists[3].items[2], "Regulatory changes and subsidy reductions");
    }

    #[test]
    fn quality_tab_formats_metrics() {
        let r = sample_analysis();
        let Projection::Metrics(m) = project(&r, ResultTab::Quality) else {
            panic!("expected metrics");
        };
        assert_eq!(m.score_text, "8.2/10");
        assert_eq!(m.badge, QualityBadge::HighQuality);
        assert_eq!(m.revisions, 1);
        assert_eq!(m.characters, "2,847");
        assert_eq!(m.critique, r.critique);
    }

    #[test]
    fn details_tab_describes_the_loop() {
        let r = sample_analysis();
        let Projection::Process(p) = project(&r, ResultTab::Details) else {
            panic!("expected process summary");
        };
        assert_eq!(
            p.rows,
            vec![
                ("Company", "Tesla".to_string()),
                ("Strategy Focus", "Cost Leadership".to_string()),
                ("Report Length", "2,847 chars".to_string()),
            ]
        );
        assert_eq!(p.steps.len(), 5);
        assert_eq!(p.steps[3], "If score < 7, Editor improves draft");
        assert_eq!(p.steps[4], LOOP_RULE);
        assert_eq!(
            p.workflow,
            "Workflow: Researcher → Analyst → Critic → Editor (loop)"
        );
    }

    #[test]
    fn projecting_leaves_the_result_untouched() {
        let r = sample_analysis();
        let copy = r.clone();
        for tab in ResultTab::ALL {
            let _ = project(&r, tab);
        }
        assert_eq!(r, copy);
    }

    #[test]
    fn text_report_covers_every_tab() {
        let lines = text_report(&sample_analysis());
        assert_eq!(lines[0], "Tesla Analysis");
        assert_eq!(lines[1], "Quality Score: 8.2/10 (High Quality)");
        for tab in ResultTab::ALL {
            assert!(lines.contains(&format!("== {} ==", tab.title())));
        }
        assert!(lines.contains(&"Characters: 2,847".to_string()));
    }

    #[test]
    fn sidebar_copy() {
        let lines = how_it_works();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "4. Editor improves if score < 7");
    }
}
