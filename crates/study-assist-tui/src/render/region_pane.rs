use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use study_assist::RenderPolicy;

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let spec = app.selected_spec();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", spec.region));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let entries = app.selected_region();
    if entries.is_empty() {
        let hint = Paragraph::new("Fill in the form and press Enter")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    }

    let lines: Vec<Line> = entries
        .iter()
        .flat_map(|entry| entry.lines())
        .map(|line| Line::from(line.to_owned()))
        .collect();

    // Transcripts follow their newest entry; panels start at the top.
    let total = lines.len() as u16;
    let offset = match spec.policy {
        RenderPolicy::Append => total
            .saturating_sub(inner.height)
            .saturating_sub(app.region_scroll),
        RenderPolicy::Replace => app.region_scroll.min(total.saturating_sub(1)),
    };

    let paragraph = Paragraph::new(lines)
        .scroll((offset, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
