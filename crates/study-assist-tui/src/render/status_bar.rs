use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Focus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!(" \u{23f3} working ({} in flight) ", app.in_flight),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(msg) = &app.status_message {
        let style = if msg.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        spans.push(Span::styled(format!(" {}", msg.text), style));
    } else {
        let hint_style = Style::default().fg(Color::DarkGray);
        let hints = match app.focus {
            Focus::Operations => " \u{2191}\u{2193} select  \u{23ce} edit  PgUp/PgDn scroll  q quit",
            Focus::Form => {
                " \u{2191}\u{2193} field  \u{2190}\u{2192} option  \u{23ce} send  esc back  PgUp/PgDn scroll"
            }
        };
        spans.push(Span::styled(hints, hint_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
