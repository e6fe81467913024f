use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, Focus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Operations {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Tools ");

    let lines: Vec<Line> = app
        .forms
        .iter()
        .enumerate()
        .map(|(index, form)| {
            if index == app.selected {
                Line::from(Span::styled(
                    format!("> {}", form.spec.name),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", form.spec.name))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
