use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(what),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Keybinds:"),
        key_line("Esc", 9, "Quit"),
        key_line("Ctrl-C", 6, "Quit"),
        key_line("Enter", 7, "Generate SWOT"),
        key_line("Tab", 9, "Next result view"),
        key_line("Shift-Tab", 3, "Previous result view"),
        key_line("Ctrl-Y", 6, "Copy report to clipboard"),
        key_line("F1", 10, "Toggle this help"),
        Line::from(""),
        Line::from("Company input:"),
        key_line("←/→", 9, "Move cursor"),
        key_line("Home/End", 4, "Jump to start/end"),
        key_line("Backspace", 3, "Delete before cursor"),
        key_line("Delete", 6, "Delete at cursor"),
        Line::from(""),
        Line::from(Span::styled(
            "The input is locked while the agent workflow is running.",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}
