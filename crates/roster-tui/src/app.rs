//! Application state for the Roster TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use roster_core::{
    Country, EncodeError, FieldId, FieldUpdate, ImageRef, PendingSubmission, Registry,
    RegistrationForm, SubmitError, UserRecord,
};
use std::cmp::min;
use std::path::{Path, PathBuf};

/// Control that currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldId),
    Submit,
}

impl Focus {
    const ORDER: [Focus; 10] = [
        Focus::Field(FieldId::FirstName),
        Focus::Field(FieldId::LastName),
        Focus::Field(FieldId::Email),
        Focus::Field(FieldId::Company),
        Focus::Field(FieldId::Country),
        Focus::Field(FieldId::Phone),
        Focus::Field(FieldId::Message),
        Focus::Field(FieldId::Image),
        Focus::Field(FieldId::AgreeToPolicy),
        Focus::Submit,
    ];

    fn step(self, forward: bool) -> Focus {
        let len = Self::ORDER.len();
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ORDER[next]
    }
}

/// What the event loop should do after a key press.
#[derive(Debug)]
pub enum KeyAction {
    /// Nothing beyond the state change already applied.
    None,
    /// Leave the application.
    Quit,
    /// Hand the accepted draft to the background encoder.
    Encode(PendingSubmission),
}

/// Top-level application state for the TUI.
pub struct App {
    /// Draft form and its validation message.
    pub form: RegistrationForm,
    /// Accepted records shown below the form.
    pub registry: Registry,
    /// Focused control.
    pub focus: Focus,
    /// Path typed into the image picker, not yet committed.
    pub image_input: String,
    /// Directory relative image paths are resolved against.
    pub image_dir: PathBuf,
    /// Extensions the image picker accepts.
    pub accepted_extensions: Vec<String>,
    /// Status line text.
    pub status: String,
    /// Current scroll offset of the user list.
    pub scroll: u16,
    /// Whether to keep the user list pinned to the bottom.
    pub auto_scroll: bool,
    /// Maximum scroll offset for the user list.
    pub list_max_scroll: u16,
    /// Animation frame for the encoding indicator.
    pub spinner: usize,
}

impl App {
    /// Create an application state with an empty form and registry.
    pub fn new(image_dir: PathBuf, accepted_extensions: Vec<String>) -> Self {
        Self {
            form: RegistrationForm::new(),
            registry: Registry::new(),
            focus: Focus::Field(FieldId::FirstName),
            image_input: String::new(),
            image_dir,
            accepted_extensions,
            status: "idle".to_string(),
            scroll: 0,
            auto_scroll: true,
            list_max_scroll: 0,
            spinner: 0,
        }
    }

    /// Set the status line.
    pub fn push_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Advance the encoding indicator.
    pub fn on_tick(&mut self) {
        if self.form.is_in_flight() {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }

    /// Route a key press into the focused control.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return KeyAction::Quit,
            KeyCode::Esc => return KeyAction::Quit,
            KeyCode::Char('s') if ctrl => return self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(true);
                return KeyAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(false);
                return KeyAction::None;
            }
            KeyCode::PageUp => {
                self.scroll_up(5);
                return KeyAction::None;
            }
            KeyCode::PageDown => {
                self.scroll_down(5);
                return KeyAction::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Submit => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return self.submit();
                }
            }
            Focus::Field(FieldId::Country) => match key.code {
                KeyCode::Right | KeyCode::Char(' ') => self.cycle_country(true),
                KeyCode::Left => self.cycle_country(false),
                KeyCode::Backspace | KeyCode::Delete => {
                    self.form.update(FieldUpdate::Country(None));
                }
                _ => {}
            },
            Focus::Field(FieldId::AgreeToPolicy) => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    let agreed = !self.form.draft().agree_to_policy;
                    self.form.update(FieldUpdate::AgreeToPolicy(agreed));
                }
            }
            Focus::Field(FieldId::Image) => match key.code {
                KeyCode::Enter => self.commit_image(),
                KeyCode::Backspace => {
                    self.image_input.pop();
                }
                KeyCode::Char(ch) if !ctrl => self.image_input.push(ch),
                _ => {}
            },
            Focus::Field(field) => self.edit_text(field, key),
        }
        KeyAction::None
    }

    /// Apply a key press to a text field.
    fn edit_text(&mut self, field: FieldId, key: KeyEvent) {
        let Some(current) = self.form.draft().text(field) else {
            return;
        };
        let mut value = current.to_string();
        match key.code {
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => value.push(ch),
            KeyCode::Enter if field == FieldId::Message => value.push('\n'),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => return,
        }
        if let Some(update) = FieldUpdate::text(field, value) {
            self.form.update(update);
        }
    }

    /// Move focus, committing a typed image path when leaving the picker.
    pub fn move_focus(&mut self, forward: bool) {
        if self.focus == Focus::Field(FieldId::Image) && self.image_input_is_dirty() {
            self.commit_image();
        }
        self.focus = self.focus.step(forward);
    }

    fn cycle_country(&mut self, forward: bool) {
        let next = Country::cycle(self.form.draft().country, forward);
        self.form.update(FieldUpdate::Country(next));
    }

    /// Whether the typed path differs from the selected image.
    fn image_input_is_dirty(&self) -> bool {
        let typed = self.image_input.trim();
        match self.form.draft().image_path() {
            Some(path) => self.resolve_image_path(typed) != path,
            None => !typed.is_empty(),
        }
    }

    fn resolve_image_path(&self, typed: &str) -> PathBuf {
        let path = Path::new(typed);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.image_dir.join(path)
        }
    }

    /// Turn the typed path into the image selection.
    ///
    /// An empty path selects nothing. A path the picker refuses leaves the
    /// image unset and explains why on the status line.
    pub fn commit_image(&mut self) {
        let typed = self.image_input.trim().to_string();
        if typed.is_empty() {
            self.form.update(FieldUpdate::Image(None));
            self.push_status("no image selected");
            return;
        }
        let path = self.resolve_image_path(&typed);
        match ImageRef::from_path(&path, &self.accepted_extensions) {
            Ok(image) => {
                self.push_status(format!("image selected: {}", image.display_name()));
                self.form.update(FieldUpdate::image_from_selection(Some(image)));
            }
            Err(err) => {
                debug!("image rejected: {err}");
                self.form.update(FieldUpdate::Image(None));
                self.push_status(err.to_string());
            }
        }
    }

    /// Validate and start a submission.
    pub fn submit(&mut self) -> KeyAction {
        if self.focus == Focus::Field(FieldId::Image) && self.image_input_is_dirty() {
            self.commit_image();
        }
        match self.form.begin_submit() {
            Ok(pending) => {
                self.push_status("encoding");
                KeyAction::Encode(pending)
            }
            Err(SubmitError::InFlight) => {
                self.push_status(SubmitError::InFlight.to_string());
                KeyAction::None
            }
            Err(SubmitError::Validation(_)) => {
                self.push_status("idle");
                KeyAction::None
            }
        }
    }

    /// Apply the outcome of a background encoding.
    pub fn finish_submission(&mut self, result: Result<UserRecord, EncodeError>) {
        match self.form.complete_submit(&mut self.registry, result) {
            Ok(position) => {
                info!("registration accepted (position={})", position);
                self.image_input.clear();
                self.focus = Focus::Field(FieldId::FirstName);
                self.push_status(format!("registered #{position}"));
                self.enable_auto_scroll();
            }
            Err(_) => {
                self.push_status("encoding failed");
            }
        }
    }

    /// Build the user list, one card per record in registration order.
    pub fn render_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        if self.registry.is_empty() {
            lines.push(Line::from(Span::styled(
                " No users registered yet.",
                Style::default().fg(Color::Rgb(128, 128, 128)),
            )));
            return lines;
        }

        let label_style = Style::default().fg(Color::Rgb(128, 128, 128));
        let value_style = Style::default().fg(Color::Rgb(238, 238, 238));

        for (idx, record) in self.registry.list().iter().enumerate() {
            let kind = record
                .image_media_type()
                .and_then(|mime| mime.strip_prefix("image/"))
                .unwrap_or("image")
                .to_string();
            let size = format_size(data_uri_size(&record.image));

            // Image badge and name
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" ◉ {kind} "),
                    Style::default()
                        .fg(Color::Rgb(10, 10, 10))
                        .bg(Color::Rgb(238, 121, 72))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {size}  "), label_style),
                Span::styled(
                    record.full_name(),
                    Style::default()
                        .fg(Color::Rgb(238, 238, 238))
                        .add_modifier(Modifier::BOLD),
                ),
            ]));

            let details = [
                ("Email", record.email.clone()),
                ("Company", record.company.clone()),
                ("Country", record.country.label().to_string()),
                ("Phone", record.phone.clone()),
            ];
            for (label, value) in details {
                lines.push(Line::from(vec![
                    Span::styled(format!("   {label}: "), label_style),
                    Span::styled(value, value_style),
                ]));
            }

            let mut message = record.message.lines();
            let first = message.next().unwrap_or_default().to_string();
            lines.push(Line::from(vec![
                Span::styled("   Message: ", label_style),
                Span::styled(first, value_style),
            ]));
            for rest in message {
                lines.push(Line::from(Span::styled(
                    format!("            {rest}"),
                    value_style,
                )));
            }

            if idx + 1 < self.registry.len() {
                lines.push(Line::from(""));
            }
        }

        lines
    }

    /// Scroll the user list upward by a number of lines.
    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Scroll the user list downward by a number of lines.
    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = min(self.scroll.saturating_add(lines), self.list_max_scroll);
        if self.scroll >= self.list_max_scroll {
            self.auto_scroll = true;
        }
    }

    /// Enable auto-scrolling to the newest record.
    pub fn enable_auto_scroll(&mut self) {
        self.auto_scroll = true;
        self.scroll = self.list_max_scroll;
    }

    /// Update scroll bounds after layout changes.
    ///
    /// Snaps to the new bottom only when `auto_scroll` is on or the list was
    /// already pinned to the bottom before the update.
    pub fn update_scroll_bounds(&mut self, max_scroll: u16) {
        let was_at_bottom = self.scroll >= self.list_max_scroll;
        self.list_max_scroll = max_scroll;
        if self.auto_scroll || was_at_bottom {
            self.scroll = max_scroll;
            self.auto_scroll = true;
        } else {
            self.scroll = self.scroll.min(max_scroll);
        }
    }
}

/// Decoded byte size of a base64 data URI payload.
pub fn data_uri_size(uri: &str) -> usize {
    let Some((_, payload)) = uri.split_once(',') else {
        return 0;
    };
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    (payload.len() / 4 * 3).saturating_sub(padding)
}

/// Human-readable byte count.
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let value = bytes as f64;
    if value < KB {
        format!("{bytes} B")
    } else if value < KB * KB {
        format!("{:.1} KB", value / KB)
    } else {
        format!("{:.1} MB", value / (KB * KB))
    }
}
