//! Rendering routines for the Roster TUI.

use crate::app::{App, Focus};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};
use roster_core::FieldId;

const PRIMARY: Color = Color::Rgb(236, 91, 43); // #EC5B2B
const SECONDARY: Color = Color::Rgb(238, 121, 72); // #EE7948
const TEXT: Color = Color::Rgb(238, 238, 238); // #eeeeee
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128); // #808080
const BORDER: Color = Color::Rgb(60, 60, 60); // #3c3c3c
const BORDER_ACTIVE: Color = Color::Rgb(238, 121, 72); // #EE7948
const YELLOW: Color = Color::Rgb(229, 192, 123); // #e5c07b
const ERROR: Color = Color::Rgb(255, 110, 110);

const HEADER_HEIGHT: u16 = 3;
const FORM_HEIGHT: u16 = 18; // 16 form rows + 2 border lines
const LABEL_WIDTH: u16 = 13;
const MESSAGE_ROWS: usize = 3;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Draw the entire TUI frame.
pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // header bar
            Constraint::Length(FORM_HEIGHT),   // form
            Constraint::Min(0),                // user list
            Constraint::Length(1),             // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);
    draw_form(frame, app, root[1]);
    draw_users(frame, app, root[2]);
    draw_status_bar(frame, app, root[3]);
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            " User Registration Form",
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  v{VERSION}"), Style::default().fg(TEXT_MUTED)),
        Span::styled("  users ", Style::default().fg(TEXT_MUTED)),
        Span::styled(app.registry.len().to_string(), Style::default().fg(TEXT)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Draw the form controls, the validation message and the submit button.
///
/// Rows never wrap: input values scroll horizontally so the one being edited
/// keeps its end, and the cursor, in view.
fn draw_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_ACTIVE))
        .title(Span::styled(" Register ", Style::default().fg(SECONDARY)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let draft = app.form.draft();
    let value_width = inner.width.saturating_sub(LABEL_WIDTH + 1) as usize;
    let mut lines: Vec<Line<'_>> = Vec::new();
    let mut cursor: Option<(u16, u16)> = None;

    for field in FieldId::ALL {
        let focused = app.focus == Focus::Field(field);
        let label_style = if focused {
            Style::default().fg(SECONDARY).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_MUTED)
        };
        let marker = if focused { "›" } else { " " };
        let label = Span::styled(
            format!("{marker}{:<width$}", label_for(field), width = LABEL_WIDTH as usize - 1),
            label_style,
        );

        match field {
            FieldId::Country => {
                let value = match draft.country {
                    Some(country) => Span::styled(
                        format!("‹ {} ›", country.label()),
                        Style::default().fg(TEXT),
                    ),
                    None => Span::styled(
                        format!("‹ {} ›", field.placeholder()),
                        Style::default().fg(TEXT_MUTED),
                    ),
                };
                lines.push(Line::from(vec![label, value]));
            }
            FieldId::AgreeToPolicy => {
                let mark = if draft.agree_to_policy { "[x]" } else { "[ ]" };
                lines.push(Line::from(vec![
                    Span::styled(format!("{marker}{mark} "), label_style),
                    Span::styled(field.placeholder(), Style::default().fg(TEXT)),
                ]));
            }
            FieldId::Image => {
                let shown = tail(&app.image_input, value_width);
                let value = if app.image_input.is_empty() {
                    Span::styled(field.placeholder(), Style::default().fg(TEXT_MUTED))
                } else {
                    Span::styled(shown, Style::default().fg(TEXT))
                };
                if focused {
                    cursor = Some((
                        LABEL_WIDTH + shown.chars().count() as u16,
                        lines.len() as u16,
                    ));
                }
                lines.push(Line::from(vec![label, value]));
                let selected = match &draft.image {
                    Some(image) => Span::styled(
                        format!("{}✓ {}", pad(), image.display_name()),
                        Style::default().fg(Color::Rgb(120, 220, 140)),
                    ),
                    None => Span::styled(
                        format!("{}no file selected", pad()),
                        Style::default().fg(TEXT_MUTED),
                    ),
                };
                lines.push(Line::from(selected));
            }
            FieldId::Message => {
                let text = draft.message.as_str();
                let all: Vec<&str> = text.split('\n').collect();
                let start = all.len().saturating_sub(MESSAGE_ROWS);
                let shown = &all[start..];
                let first_row = lines.len();
                for (idx, row) in shown.iter().enumerate() {
                    let prefix = if idx == 0 {
                        label.clone()
                    } else {
                        Span::raw(pad())
                    };
                    let value = if text.is_empty() {
                        Span::styled(field.placeholder(), Style::default().fg(TEXT_MUTED))
                    } else {
                        Span::styled(tail(row, value_width), Style::default().fg(TEXT))
                    };
                    lines.push(Line::from(vec![prefix, value]));
                }
                for _ in shown.len()..MESSAGE_ROWS {
                    lines.push(Line::from(""));
                }
                if focused {
                    let last = tail(shown.last().copied().unwrap_or_default(), value_width);
                    cursor = Some((
                        LABEL_WIDTH + last.chars().count() as u16,
                        (first_row + shown.len().saturating_sub(1)) as u16,
                    ));
                }
            }
            _ => {
                let text = tail(draft.text(field).unwrap_or_default(), value_width);
                let value = if text.is_empty() {
                    Span::styled(field.placeholder(), Style::default().fg(TEXT_MUTED))
                } else {
                    Span::styled(text, Style::default().fg(TEXT))
                };
                if focused {
                    cursor = Some((
                        LABEL_WIDTH + text.chars().count() as u16,
                        lines.len() as u16,
                    ));
                }
                lines.push(Line::from(vec![label, value]));
            }
        }
    }

    lines.push(Line::from(""));
    if let Some(error) = app.form.error() {
        lines.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(ERROR),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));

    let button_style = if app.form.is_in_flight() {
        Style::default().fg(TEXT_MUTED).bg(BORDER)
    } else if app.focus == Focus::Submit {
        Style::default()
            .fg(Color::Rgb(10, 10, 10))
            .bg(PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
    };
    let button_label = if app.form.is_in_flight() {
        format!(" {} Submitting ", SPINNER[app.spinner % SPINNER.len()])
    } else {
        " [ Submit ] ".to_string()
    };
    lines.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(button_label, button_style),
    ]));

    let form = Paragraph::new(lines);
    frame.render_widget(form, inner);

    if let Some((x, y)) = cursor
        && y < inner.height
    {
        frame.set_cursor_position((inner.x + x.min(inner.width.saturating_sub(1)), inner.y + y));
    }
}

/// Draw the registered users with border and scrollbar.
fn draw_users(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let lines = app.render_lines();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(" User List ", Style::default().fg(TEXT_MUTED)));

    let inner = block.inner(area);
    let content_width = inner.width.saturating_sub(1); // -1 for scrollbar
    let content_height = inner.height as usize;

    let total_lines = Paragraph::new(lines.clone())
        .wrap(Wrap { trim: false })
        .line_count(content_width)
        .max(1);

    let max_scroll = total_lines.saturating_sub(content_height) as u16;
    app.update_scroll_bounds(max_scroll);
    let scroll = app.scroll;

    let list_inner = Rect {
        width: inner.width.saturating_sub(1),
        ..inner
    };

    let list = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(block, area);
    frame.render_widget(list, list_inner);

    if total_lines > content_height {
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(total_lines)
            .position(scroll as usize)
            .viewport_content_length(content_height);
        let scrollbar_area = Rect {
            x: inner.x + inner.width.saturating_sub(1),
            y: inner.y,
            width: 1,
            height: inner.height,
        };
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .style(Style::default().fg(BORDER))
                .thumb_style(Style::default().fg(TEXT_MUTED)),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }
}

/// Draw the status bar at the bottom.
fn draw_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_color = match app.status.as_str() {
        "encoding" => PRIMARY,
        "idle" => TEXT_MUTED,
        _ => YELLOW,
    };

    let shortcuts = vec![
        Span::styled(" Ctrl+C", Style::default().fg(TEXT_MUTED)),
        Span::styled(" quit", Style::default().fg(BORDER)),
        Span::styled("  Tab", Style::default().fg(TEXT_MUTED)),
        Span::styled(" next", Style::default().fg(BORDER)),
        Span::styled("  Ctrl+S", Style::default().fg(TEXT_MUTED)),
        Span::styled(" submit", Style::default().fg(BORDER)),
        Span::styled("  PgUp/PgDn", Style::default().fg(TEXT_MUTED)),
        Span::styled(" scroll", Style::default().fg(BORDER)),
    ];

    let right_text = format!(" {} ", app.status);

    let right_len = right_text.chars().count() as u16;
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len.min(area.width),
        ..area
    };

    let left = Paragraph::new(Line::from(shortcuts));
    let right = Paragraph::new(Line::from(Span::styled(
        right_text,
        Style::default().fg(status_color),
    )));

    frame.render_widget(left, left_area);
    frame.render_widget(right, right_area);
}

fn label_for(field: FieldId) -> &'static str {
    match field {
        FieldId::FirstName => "First name",
        FieldId::LastName => "Last name",
        FieldId::Email => "Email",
        FieldId::Company => "Company",
        FieldId::Country => "Country",
        FieldId::Phone => "Phone",
        FieldId::Message => "Message",
        FieldId::Image => "Image",
        FieldId::AgreeToPolicy => "Policy",
    }
}

/// Last `width` characters of `text`.
fn tail(text: &str, width: usize) -> &str {
    let len = text.chars().count();
    if len <= width {
        return text;
    }
    match text.char_indices().nth(len - width) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}

fn pad() -> String {
    " ".repeat(LABEL_WIDTH as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;
    use roster_core::FieldUpdate;
    use std::path::PathBuf;

    fn render(app: &mut App) -> Terminal<TestBackend> {
        let backend = TestBackend::new(110, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|f| draw(f, app)).expect("draw");
        terminal
    }

    fn screen(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    fn app() -> App {
        App::new(PathBuf::from("."), vec!["png".to_string()])
    }

    #[test]
    fn empty_form_shows_placeholders() {
        let mut app = app();
        let text = screen(&render(&mut app)).join("\n");
        assert!(text.contains("User Registration Form"));
        assert!(text.contains("Select Country"));
        assert!(text.contains("[ Submit ]"));
        assert!(text.contains("No users registered yet."));
    }

    #[test]
    fn user_list_sits_below_the_form() {
        let mut app = app();
        let rows = screen(&render(&mut app));
        let row_of = |needle: &str| rows.iter().position(|row| row.contains(needle));
        let submit = row_of("[ Submit ]").expect("submit row");
        let list = row_of("User List").expect("list title");
        assert!(list > submit, "list at row {list}, submit at row {submit}");
    }

    #[test]
    fn validation_message_is_rendered() {
        let mut app = app();
        app.submit();
        let text = screen(&render(&mut app)).join("\n");
        assert!(text.contains("Please fill in all fields"));
    }

    #[test]
    fn long_values_scroll_without_shifting_later_rows() {
        let mut app = app();
        let email = format!("{}@example.com", "a".repeat(150));
        app.form.update(FieldUpdate::Email(email));

        // Form inner area starts at column 1, row 4; Company is the fourth row.
        app.focus = Focus::Field(FieldId::Company);
        let mut terminal = render(&mut app);
        assert_eq!(
            terminal.get_cursor_position().expect("cursor"),
            Position::new(1 + LABEL_WIDTH, 7)
        );

        app.focus = Focus::Field(FieldId::Email);
        let mut terminal = render(&mut app);
        let rows = screen(&terminal);
        assert!(rows[6].contains("@example.com"), "{}", rows[6]);
        assert!(rows[7].contains("Company"));
        let cursor = terminal.get_cursor_position().expect("cursor");
        assert_eq!(cursor.y, 6);
        assert!(cursor.x < 109);
    }

    #[test]
    fn tail_keeps_the_end_of_the_value() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("abc", 5), "abc");
        assert_eq!(tail("äöü", 2), "öü");
        assert_eq!(tail("abc", 0), "");
    }
}
