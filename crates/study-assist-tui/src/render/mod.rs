mod form_pane;
mod operation_list;
mod region_pane;
mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Width of the operation list, including borders.
const LIST_WIDTH: u16 = 24;

pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Outer layout: title bar (1), main content, bottom bar (1).
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    render_title_bar(frame, outer[0], app);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LIST_WIDTH), Constraint::Min(20)])
        .split(outer[1]);

    operation_list::render(frame, panes[0], app);

    // Right side: the selected form above its result region.
    let form_height = app.selected_spec().fields.len() as u16 + 2;
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(3)])
        .split(panes[1]);

    form_pane::render(frame, right[0], app);
    region_pane::render(frame, right[1], app);

    status_bar::render(frame, outer[2], app);
}

fn render_title_bar(frame: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(Color::DarkGray);

    let line = Line::from(vec![
        Span::styled(" Study Assistant", title_style),
        Span::raw("  "),
        Span::styled(format!("[{}]", app.endpoint_label), label_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
