mod clipboard;
mod help;
mod results;
mod state;

use crate::cli::{build_config, default_source, Cli};
use crate::model::{WorkflowEvent, WorkflowStep};
use crate::orchestrator::{self, UiCommand};
use crate::presenter;
use crate::view::StepStatus;
use anyhow::{Context, Result};
use clipboard::copy_to_clipboard;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use help::draw_help;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Terminal,
};
use state::UiState;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels avoid backpressure between the UI thread and the controller.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<WorkflowEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let cfg = build_config(&args)?;
    let ui_args = args.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, event_rx, cmd_tx));

    let res = orchestrator::run_controller(cfg, default_source(), event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Lock the input and ask the controller for a run, if the trigger is enabled.
fn trigger(state: &mut UiState, cmd_tx: &UnboundedSender<UiCommand>) {
    if let Some(company) = state.view.begin() {
        let _ = cmd_tx.send(UiCommand::Generate { company });
    }
}

fn copy_report(state: &mut UiState) {
    let Some(text) = state.report_to_copy() else {
        return;
    };
    state.view.info = match copy_to_clipboard(&text) {
        Ok(()) => "✓ Copied report to clipboard".into(),
        Err(e) => format!("Clipboard copy failed: {e:#}"),
    };
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    args: Cli,
    mut event_rx: UnboundedReceiver<WorkflowEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; no cross-thread mutation.
    let mut state = UiState::new(&args.company);
    if args.generate_on_launch {
        trigger(&mut state, &cmd_tx);
    }

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking to keep UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            state.view.apply_event(ev);
        }

        if last_tick.elapsed() >= tick_rate {
            state.tick();
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (_, KeyCode::F(1)) => {
                        state.show_help = !state.show_help;
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('y')) => copy_report(&mut state),
                    (_, KeyCode::Enter) => trigger(&mut state, &cmd_tx),
                    (_, KeyCode::Tab) => {
                        let next = state.view.tab.next();
                        state.view.select_tab(next);
                    }
                    (_, KeyCode::BackTab) => {
                        let prev = state.view.tab.prev();
                        state.view.select_tab(prev);
                    }
                    (_, KeyCode::Left) => state.move_left(),
                    (_, KeyCode::Right) => state.move_right(),
                    (_, KeyCode::Home) => state.move_home(),
                    (_, KeyCode::End) => state.move_end(),
                    (_, KeyCode::Backspace) => state.backspace(),
                    (_, KeyCode::Delete) => state.delete(),
                    (m, KeyCode::Char(c))
                        if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                    {
                        state.insert_char(c);
                    }
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(4),
            ]
            .as_ref(),
        )
        .split(area);

    draw_header(chunks[0], f);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(0)].as_ref())
        .split(chunks[1]);
    draw_sidebar(body[0], f, state);
    draw_main(body[1], f, state);

    draw_footer(chunks[2], f, state);

    if state.show_help {
        draw_help(centered_rect(60, 20, chunks[1]), f);
    }
}

fn draw_header(area: Rect, f: &mut ratatui::Frame) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(28)].as_ref())
        .split(inner);

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("◉ ", Style::default().fg(Color::Magenta)),
            Span::styled(
                "A2A Strategy Agent",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  Strategic SWOT Analysis with Self-Correcting AI",
                Style::default().fg(Color::Gray),
            ),
        ])),
        cols[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "⚡ Agentic Automation Demo",
            Style::default().fg(Color::Cyan),
        ))
        .alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_sidebar(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(7), // Configuration
                Constraint::Length(8), // Agent workflow
                Constraint::Min(0),    // How it works
            ]
            .as_ref(),
        )
        .split(area);

    draw_configuration(rows[0], f, state);
    draw_workflow(rows[1], f, state);

    let how = Paragraph::new(
        presenter::how_it_works()
            .into_iter()
            .map(Line::from)
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(Color::Gray))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("How It Works"));
    f.render_widget(how, rows[2]);
}

fn draw_configuration(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("⚙ Configuration");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(inner);

    f.render_widget(
        Paragraph::new(Span::styled(
            "Company Name",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        rows[0],
    );

    let view = &state.view;
    let input_style = if view.busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let input_block = Block::default().borders(Borders::ALL);
    let input_inner = input_block.inner(rows[1]);
    // Scroll horizontally so the cursor stays visible.
    let (scroll, cursor_x) = state.input_viewport(input_inner.width as usize);
    let input = if view.input.is_empty() {
        Paragraph::new(Span::styled(
            "Enter company name",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(view.input.as_str())
            .style(input_style)
            .scroll((0, scroll as u16))
    };
    f.render_widget(input.block(input_block), rows[1]);
    if !view.busy && !state.show_help {
        f.set_cursor_position((
            input_inner.x + cursor_x as u16,
            input_inner.y,
        ));
    }

    let button = if view.busy {
        Span::styled(
            format!(" {} Processing... ", state.spinner()),
            Style::default().fg(Color::DarkGray),
        )
    } else if view.can_trigger() {
        Span::styled(
            " ▶ Generate SWOT ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " ▶ Generate SWOT ",
            Style::default().fg(Color::DarkGray),
        )
    };
    f.render_widget(
        Paragraph::new(Line::from(button)).alignment(Alignment::Center),
        rows[2],
    );
}

fn draw_workflow(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let lines: Vec<Line> = WorkflowStep::ALL
        .iter()
        .enumerate()
        .map(|(i, step)| {
            let (glyph, glyph_style, label_style) = match state.view.step_status(i) {
                StepStatus::Complete => (
                    "✓",
                    Style::default().fg(Color::Green),
                    Style::default(),
                ),
                StepStatus::Current => (
                    state.spinner(),
                    Style::default().fg(Color::Cyan),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                StepStatus::Pending => (
                    step.icon().glyph(),
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            Line::from(vec![
                Span::raw(" "),
                Span::styled(glyph, glyph_style),
                Span::raw("  "),
                Span::styled(step.label(), label_style),
            ])
        })
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("⎇ Agent Workflow"),
        ),
        area,
    );
}

fn draw_main(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let view = &state.view;
    if let Some(r) = view.visible_result() {
        results::draw_results(area, f, r, view.tab);
    } else if view.busy {
        draw_analyzing(area, f, state);
    } else {
        draw_ready(area, f, state);
    }
}

fn draw_ready(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled("◉", Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            "Ready to Analyze",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Enter a company name and press Enter to see the self-correcting AI agent in action.",
            Style::default().fg(Color::Gray),
        )),
    ];
    if !state.view.info.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            state.view.info.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    let height = lines.len() as u16 + 2;
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        centered_rect(inner.width.saturating_sub(4), height, inner),
    );
}

fn draw_analyzing(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let center = centered_rect(48.min(inner.width), 6, inner);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(center);

    let view = &state.view;
    f.render_widget(
        Paragraph::new(Span::styled(
            state.spinner(),
            Style::default().fg(Color::Cyan),
        ))
        .alignment(Alignment::Center),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            format!("Analyzing {}", view.input.trim()),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        rows[1],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            view.current_step()
                .map(|s| s.label())
                .unwrap_or("Initializing..."),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        rows[2],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(view.progress()),
        rows[4],
    );
}

fn draw_footer(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)].as_ref())
        .split(inner);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)].as_ref())
        .split(rows[0]);

    let gray = Style::default().fg(Color::Gray);
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("◉ AI-powered strategic analysis   ", gray),
            Span::styled("↻ Automatic quality improvement   ", gray),
            Span::styled("◎ Data-driven insights", gray),
        ])),
        top[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled("A2A Strategy Agent Demo", gray)).alignment(Alignment::Right),
        top[1],
    );

    let status = match state.status_message() {
        Some(info) => Line::from(vec![
            Span::styled("Info: ", gray),
            Span::raw(info.to_string()),
        ]),
        None => Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw(" generate  "),
            Span::styled("Tab", Style::default().fg(Color::Magenta)),
            Span::raw(" switch view  "),
            Span::styled("Ctrl-Y", Style::default().fg(Color::Magenta)),
            Span::raw(" copy report  "),
            Span::styled("F1", Style::default().fg(Color::Magenta)),
            Span::raw(" help  "),
            Span::styled("Esc", Style::default().fg(Color::Magenta)),
            Span::raw(" quit"),
        ]),
    };
    f.render_widget(Paragraph::new(status), rows[1]);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
