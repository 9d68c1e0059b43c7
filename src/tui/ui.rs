use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

use super::app::{App, InputField, InputMode};
use crate::due::due_instant;
use crate::models::{Frequency, Priority, Theme};
use crate::settings::{parse_hex_color, Settings};
use crate::tasks::TaskFilter;

/// Colors derived from the user's settings.
struct Palette {
    accent: Color,
    text: Color,
    muted: Color,
    highlight: Color,
}

impl Palette {
    fn from_settings(s: &Settings) -> Palette {
        let hex = |v: &str| parse_hex_color(v).map(|(r, g, b)| Color::Rgb(r, g, b));
        let (text, muted, highlight) = match s.theme {
            Theme::Light => (Color::Black, Color::DarkGray, Color::Gray),
            Theme::Dark => (Color::White, Color::Gray, Color::DarkGray),
        };
        Palette {
            accent: hex(s.accent()).unwrap_or(Color::Cyan),
            text: hex(&s.custom_colors.text).unwrap_or(text),
            muted,
            highlight: hex(&s.custom_colors.card).unwrap_or(highlight),
        }
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let palette = Palette::from_settings(app.org.settings());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(1), // Status
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    let now = app.org.now().naive_local();
    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|t| {
            let overdue = !t.completed && due_instant(t).is_some_and(|due| due < now);
            let style = if t.completed {
                Style::default().fg(palette.muted).add_modifier(Modifier::CROSSED_OUT)
            } else if overdue {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(palette.text)
            };
            let priority = match t.priority {
                Priority::Low => Cell::from("low").style(Style::default().fg(Color::Green)),
                Priority::Medium => Cell::from("medium").style(Style::default().fg(Color::Yellow)),
                Priority::High => Cell::from("high").style(Style::default().fg(Color::Red)),
            };
            let status = match (t.completed, t.is_on_time) {
                (false, _) if overdue => "Overdue",
                (false, _) => "Pending",
                (true, true) => "On time",
                (true, false) => "Late",
            };

            Row::new(vec![
                Cell::from(t.id.to_string()),
                Cell::from(t.title.clone()),
                Cell::from(t.date.clone()),
                Cell::from(t.time.clone()),
                priority,
                Cell::from(if t.frequency == Frequency::Daily { "daily" } else { "" }),
                Cell::from(status),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(9),
    ];

    let filter = match app.filter {
        TaskFilter::All => "All",
        TaskFilter::Active => "Active",
        TaskFilter::Completed => "Completed",
    };
    let title = format!(
        "lifeorg - Tasks ({filter}) | {} on time",
        app.org.tasks().on_time_count()
    );

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["ID", "Title", "Date", "Time", "Priority", "Repeat", "Status"])
                .style(Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title).border_style(Style::default().fg(palette.accent)))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(palette.highlight))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    if let Some(status) = &app.status {
        let style = if status.starts_with("Not saved") {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(palette.accent)
        };
        f.render_widget(Paragraph::new(status.as_str()).style(style), chunks[1]);
    }

    let help_text = match app.input_mode {
        InputMode::Normal => {
            "q: Quit | a: Add | Space: Done/Undo | d: Del | n: Title | t: Date | m: Time | p: Priority | r: Repeat | c: Filter"
        }
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(palette.muted))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[2]);

    if app.input_mode != InputMode::Normal {
        let area = centered_rect(60, 3, f.area());
        f.render_widget(Clear, area);

        let title = match app.input_mode {
            InputMode::Adding => match app.add_state.step {
                0 => "Add Task: Enter Title",
                1 => "Add Task: Enter Date (YYYY-MM-DD, empty for today)",
                2 => "Add Task: Enter Time (HH:MM, empty for 12:00)",
                3 => "Add Task: Priority (l/m/h)",
                _ => "Add Task: Repeat daily? (d for daily)",
            },
            _ => match app.input_field {
                InputField::Title => "Edit Title",
                InputField::Date => "Edit Date (YYYY-MM-DD)",
                InputField::Time => "Edit Time (HH:MM)",
                InputField::None => "Edit",
            },
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(input, area);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
