use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::model::AnalysisResult;
use crate::presenter::{self, FindingsList, ProcessSummary, Projection, Quadrant, QualityMetrics};
use crate::quality::{format_score, score_ratio, QualityBadge, Tone};
use crate::view::ResultTab;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::Green,
        Tone::Neutral => Color::Yellow,
        Tone::Negative => Color::Red,
    }
}

fn quadrant_color(q: Quadrant) -> Color {
    match q {
        Quadrant::Strengths => Color::Green,
        Quadrant::Weaknesses => Color::Red,
        Quadrant::Opportunities => Color::Blue,
        Quadrant::Threats => Color::Yellow,
    }
}

pub fn draw_results(area: Rect, f: &mut Frame, r: &AnalysisResult, tab: ResultTab) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Title + score
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    draw_results_header(rows[0], f, r);

    let tabs = Tabs::new(
        ResultTab::ALL
            .iter()
            .map(|t| Line::from(t.title()))
            .collect::<Vec<_>>(),
    )
    .select(tab.index())
    .block(Block::default().borders(Borders::ALL))
    .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, rows[1]);

    match presenter::project(r, tab) {
        Projection::Findings(lists) => draw_findings(rows[2], f, &lists),
        Projection::Metrics(m) => draw_metrics(rows[2], f, &m),
        Projection::Process(p) => draw_process(rows[2], f, &p),
    }
}

fn draw_results_header(area: Rect, f: &mut Frame, r: &AnalysisResult) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(42)].as_ref())
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} Analysis", r.company),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Strategic assessment completed",
            Style::default().fg(Color::Gray),
        )),
    ]);
    f.render_widget(title, cols[0]);

    let badge = QualityBadge::for_score(r.score);
    let color = tone_color(badge.tone());
    let score = Paragraph::new(vec![
        Line::from(Span::styled("Quality Score", Style::default().fg(Color::Gray))),
        Line::from(vec![
            Span::styled(
                format_score(r.score),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" {} {} ", badge.glyph(), badge.label()),
                Style::default().fg(Color::Black).bg(color),
            ),
        ]),
    ])
    .alignment(Alignment::Right);
    f.render_widget(score, cols[1]);
}

fn draw_findings(area: Rect, f: &mut Frame, lists: &[FindingsList<'_>]) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);
    let mut cells = Vec::with_capacity(4);
    for half in halves.iter() {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(*half);
        cells.extend(row.iter().copied());
    }

    for (list, cell) in lists.iter().zip(cells) {
        let color = quadrant_color(list.quadrant);
        let lines: Vec<Line> = list
            .items
            .iter()
            .map(|item| {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", list.quadrant.bullet()),
                        Style::default().fg(color),
                    ),
                    Span::raw(item.as_str()),
                ])
            })
            .collect();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                list.quadrant.title(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            cell,
        );
    }
}

fn draw_metrics(area: Rect, f: &mut Frame, m: &QualityMetrics<'_>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let block = Block::default().borders(Borders::ALL).title("Quality Metrics");
    let inner = block.inner(cols[0]);
    f.render_widget(block, cols[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(inner);

    let color = tone_color(m.badge.tone());
    let score_line = Line::from(vec![
        Span::styled("Overall Score ", Style::default().fg(Color::Gray)),
        Span::styled(m.score_text.clone(), Style::default().fg(color)),
    ]);
    f.render_widget(Paragraph::new(score_line), rows[0]);
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(score_ratio(m.score))
            .label(""),
        rows[1],
    );

    let counts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(rows[3]);
    let stat = |value: String, label: &'static str| {
        Paragraph::new(vec![
            Line::from(Span::styled(
                value,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    };
    f.render_widget(stat(m.revisions.to_string(), "Revisions Made"), counts[0]);
    f.render_widget(stat(m.characters.clone(), "Characters"), counts[1]);

    let critique = Paragraph::new(m.critique)
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Critic Evaluation"));
    f.render_widget(critique, cols[1]);
}

fn draw_process(area: Rect, f: &mut Frame, p: &ProcessSummary) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Process Information");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(rows[0]);

    let mut kv_lines = Vec::new();
    for (k, v) in &p.rows {
        kv_lines.push(Line::from(vec![
            Span::styled(format!("{k}: "), Style::default().fg(Color::Gray)),
            Span::styled(v.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]));
        kv_lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(kv_lines), cols[0]);

    let steps: Vec<Line> = p
        .steps
        .iter()
        .enumerate()
        .map(|(i, s)| {
            Line::from(vec![
                Span::styled(
                    format!("{}. ", i + 1),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(s.clone(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(steps).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .title("↻ Self-Correcting Process"),
        ),
        cols[1],
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("⎇ {}", p.workflow),
            Style::default().fg(Color::Gray),
        )))
        .block(Block::default().borders(Borders::TOP)),
        rows[1],
    );
}
