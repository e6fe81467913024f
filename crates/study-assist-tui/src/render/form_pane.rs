use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{App, Focus};
use crate::form::label;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let form = app.selected_form();
    let editing = app.focus == Focus::Form;

    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", form.spec.name));

    let label_width = form
        .spec
        .fields
        .iter()
        .map(|f| label(f.key).chars().count())
        .max()
        .unwrap_or(0);

    let label_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let focused_style = Style::default().add_modifier(Modifier::REVERSED);
    let hint_style = Style::default().fg(Color::DarkGray);

    let lines: Vec<Line> = form
        .fields()
        .enumerate()
        .map(|(index, (field, value))| {
            let marker = if field.required { "*" } else { " " };
            let mut spans = vec![Span::styled(
                format!("{:<width$}{marker} ", label(field.key), width = label_width),
                label_style,
            )];

            let value_style = if editing && index == form.focused {
                focused_style
            } else {
                Style::default()
            };

            if form.is_choice(index) {
                spans.push(Span::styled(format!("\u{2039} {value} \u{203a}"), value_style));
            } else {
                spans.push(Span::styled(value.to_owned(), value_style));
                if editing && index == form.focused {
                    spans.push(Span::styled("_", hint_style));
                }
            }

            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
