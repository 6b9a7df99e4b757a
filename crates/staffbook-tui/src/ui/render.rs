use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use staffbook_core::utils::{age_display, truncate};

use crate::app::{App, AppState, NotificationLevel, ViewState};

use super::styles;
use super::views::{form, list};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_main_content(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);

    if app.notification.is_some() {
        render_notification(frame, app);
    }

    // Overlays
    match &app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingDelete(id) => {
            let name = app
                .employees
                .iter()
                .find(|e| e.id.as_ref() == Some(id))
                .map(|e| e.name.clone())
                .unwrap_or_else(|| format!("#{}", id));
            render_delete_overlay(frame, &name);
        }
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }

    // Blocks everything else while requests are in flight
    if app.is_loading() {
        render_loading_overlay(frame);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Staffbook";
    let help_hint = "[?] Help ";

    let last_action = app
        .last_action
        .as_ref()
        .map(|action| {
            format!(
                "Last: {} ({})",
                truncate(&action.describe(), 40),
                age_display(action.timestamp(), Utc::now())
            )
        })
        .unwrap_or_default();

    let used = title.chars().count() + last_action.chars().count() + help_hint.len();
    let gap = (area.width as usize).saturating_sub(used) / 2;

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(gap)),
        Span::styled(last_action, styles::muted_style()),
        Span::raw(" ".repeat(gap)),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match &app.view {
        ViewState::Listing => list::render(frame, app, area),
        ViewState::Editing(mode) => form::render(frame, app, mode, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let left_text = match app.employees_cached_at {
        Some(at) => format!(" {} employees | Updated {} ", app.employees.len(), age_display(at, Utc::now())),
        None => " Not loaded yet ".to_string(),
    };

    let shortcuts = match app.view {
        ViewState::Listing => "[a]dd [e]dit [d]elete [n]ame sort [u]pdate [q]uit",
        ViewState::Editing(_) => "Tab next field | Enter save | Esc cancel",
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    frame.render_widget(Paragraph::new(status_line).style(styles::status_bar_style()), area);
}

fn render_notification(frame: &mut Frame, app: &App) {
    let Some(notification) = app.notification.as_ref() else {
        return;
    };

    let screen = frame.area();
    let text = format!(" {} ", truncate(&notification.message, screen.width.saturating_sub(6) as usize));
    let width = (text.chars().count() as u16 + 2).min(screen.width);
    let area = Rect::new(screen.x + screen.width.saturating_sub(width), screen.y, width, 3u16.min(screen.height));

    frame.render_widget(Clear, area);

    let success = notification.level == NotificationLevel::Success;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::notification_style(success));
    let paragraph = Paragraph::new(Line::from(Span::styled(text, styles::notification_style(success)))).block(block);
    frame.render_widget(paragraph, area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), styles::help_key_style()),
        Span::styled(desc, styles::help_desc_style()),
    ])
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 26, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_text = vec![
        Line::from(Span::styled("  Staffbook", styles::title_style())),
        Line::from(Span::styled(format!("  version {}", version), styles::muted_style())),
        Line::from(""),
        Line::from(Span::styled(" Employee list", styles::highlight_style())),
        help_line("↑/↓ j/k", "Move selection"),
        help_line("PgUp/PgDn", "Previous/next page"),
        help_line("Home/End", "First/last employee"),
        help_line("a", "Add employee"),
        help_line("e Enter", "Edit selected employee"),
        help_line("d", "Delete selected employee"),
        help_line("n", "Sort by name"),
        help_line("u", "Update list from server"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(" Employee form", styles::highlight_style())),
        help_line("Tab ↓", "Next field"),
        help_line("S-Tab ↑", "Previous field"),
        help_line("←/→ Space", "Change choice / toggle"),
        help_line("Enter", "Submit or update"),
        help_line("Ctrl+D", "Delete this employee"),
        help_line("Esc", "Cancel"),
        Line::from(""),
        Line::from(vec![
            Span::styled("       Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_confirm_overlay(frame: &mut Frame, question: String, action: &'static str) {
    let area = centered_rect_fixed(52, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("   {}", question), styles::highlight_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(format!(" to {}, ", action), styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_delete_overlay(frame: &mut Frame, name: &str) {
    render_confirm_overlay(frame, format!("Delete {}?", truncate(name, 36)), "delete");
}

fn render_quit_overlay(frame: &mut Frame) {
    render_confirm_overlay(frame, "Are you sure you want to quit?".to_string(), "quit");
}

fn render_loading_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(24, 3, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));
    let paragraph = Paragraph::new(Line::from(Span::styled("     Loading...", styles::highlight_style()))).block(block);
    frame.render_widget(paragraph, area);
}

/// Create a centered rectangle with fixed dimensions
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
