use std::collections::HashMap;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use study_assist::{OperationSpec, RegionId, operation};

use crate::action::{Action, AppCommand, RegionUpdate};
use crate::form::Form;

/// Ticks a status message stays on screen (250ms each).
const STATUS_TICKS: u8 = 16;

/// Which pane receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Operations,
    Form,
}

/// Transient status message shown in the status bar.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// Remaining ticks before the message expires.
    pub ticks_remaining: u8,
}

/// The TUI application state. This is a pure state machine:
/// inputs produce commands (side effects), actions update state.
pub struct App {
    /// One form per operation, in catalog order.
    pub forms: Vec<Form>,
    /// Index of the selected operation.
    pub selected: usize,
    pub focus: Focus,
    /// Rendered fragments per region, oldest first.
    pub regions: HashMap<RegionId, Vec<String>>,
    /// Lines scrolled back from the natural position of the result pane.
    pub region_scroll: u16,
    /// Requests currently in flight, mirrored from the busy indicator.
    pub in_flight: usize,
    /// Backend label for the title bar.
    pub endpoint_label: String,
    pub status_message: Option<StatusMessage>,
}

impl App {
    pub fn new(endpoint_label: String, defaults: &HashMap<String, String>) -> Self {
        let forms = operation::catalog()
            .iter()
            .map(|spec| Form::new(spec, defaults))
            .collect();

        Self {
            forms,
            selected: 0,
            focus: Focus::Operations,
            regions: HashMap::new(),
            region_scroll: 0,
            in_flight: 0,
            endpoint_label,
            status_message: None,
        }
    }

    pub fn selected_spec(&self) -> &'static OperationSpec {
        self.forms[self.selected].spec
    }

    pub fn selected_form(&self) -> &Form {
        &self.forms[self.selected]
    }

    /// Fragments currently shown in the selected operation's region.
    pub fn selected_region(&self) -> &[String] {
        self.regions
            .get(&self.selected_spec().region_id())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Handle a terminal event, returning a command for the event loop.
    pub fn handle_event(&mut self, event: Event) -> AppCommand {
        match event {
            Event::Key(key) => self.handle_key(key),
            _ => AppCommand::None,
        }
    }

    /// Handle an async action (result from a background task).
    pub fn handle_action(&mut self, action: Action) -> AppCommand {
        match action {
            Action::RegionUpdated { region, update } => {
                let entries = self.regions.entry(region).or_default();
                match update {
                    RegionUpdate::Replace(content) => {
                        entries.clear();
                        entries.push(content);
                    }
                    RegionUpdate::Append(content) => entries.push(content),
                }
            }
            Action::Completed { operation, result } => match result {
                Ok(()) => self.set_status(format!("{operation}: done"), false),
                Err(msg) => self.set_status(format!("{operation}: {msg}"), true),
            },
        }
        AppCommand::None
    }

    /// Tick the app forward (called on interval). Used for expiring status messages.
    pub fn tick(&mut self) {
        if let Some(msg) = &mut self.status_message {
            if msg.ticks_remaining == 0 {
                self.status_message = None;
            } else {
                msg.ticks_remaining -= 1;
            }
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text,
            is_error,
            ticks_remaining: STATUS_TICKS,
        });
    }

    fn handle_key(&mut self, key: KeyEvent) -> AppCommand {
        // Ctrl+C always quits.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppCommand::Quit;
        }

        match key.code {
            KeyCode::PageUp => {
                self.region_scroll = self.region_scroll.saturating_add(5);
                return AppCommand::None;
            }
            KeyCode::PageDown => {
                self.region_scroll = self.region_scroll.saturating_sub(5);
                return AppCommand::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Operations => self.handle_operations_key(key),
            Focus::Form => self.handle_form_key(key),
        }
    }

    fn handle_operations_key(&mut self, key: KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
            KeyCode::Char('j') | KeyCode::Down => {
                self.select((self.selected + 1) % self.forms.len());
                AppCommand::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select((self.selected + self.forms.len() - 1) % self.forms.len());
                AppCommand::None
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Right => {
                self.focus = Focus::Form;
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> AppCommand {
        let form = &mut self.forms[self.selected];

        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Operations;
                AppCommand::None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                form.focus_next();
                AppCommand::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.focus_prev();
                AppCommand::None
            }
            KeyCode::Left => {
                form.cycle_choice(false);
                AppCommand::None
            }
            KeyCode::Right => {
                form.cycle_choice(true);
                AppCommand::None
            }
            KeyCode::Backspace => {
                form.pop_char();
                AppCommand::None
            }
            KeyCode::Char(c) => {
                form.push_char(c);
                AppCommand::None
            }
            _ => AppCommand::None,
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.region_scroll = 0;
        }
    }

    /// Snapshot the form and hand it to the event loop.
    fn submit(&mut self) -> AppCommand {
        let form = &mut self.forms[self.selected];
        let inputs = form.inputs();

        if form.spec.clears_input {
            form.clear_required();
        }
        self.region_scroll = 0;

        AppCommand::Submit {
            spec: form.spec,
            inputs,
        }
    }
}
