use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use staffbook_core::form::FieldKind;
use staffbook_core::{Field, FormState};

use crate::app::{App, EditMode};
use crate::ui::styles;

const LABEL_WIDTH: usize = 22;

fn form_title(mode: &EditMode) -> String {
    match mode {
        EditMode::Creating => " Add New Employee ".to_string(),
        EditMode::Updating(id) => format!(" Edit Employee #{} ", id),
    }
}

/// Render the add/edit form
pub fn render(frame: &mut Frame, app: &App, mode: &EditMode, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let title = form_title(mode);

    let (lines, focus_line) = field_lines(&app.form, app.form_focus);

    // Keep the focused field in view
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = (focus_line + 2).saturating_sub(visible) as u16;

    let block = Block::default()
        .title(title)
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), chunks[0]);
    render_buttons(frame, mode, chunks[1]);
}

/// One line per field, plus one under each field that has an error.
/// Also returns the index of the focused field's line.
fn field_lines(form: &FormState, focus: Field) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::with_capacity(Field::ALL.len() * 2);
    let mut focus_line = 0;

    for field in Field::ALL {
        let focused = field == focus;
        if focused {
            focus_line = lines.len();
        }

        let marker = if field.is_required() { "*" } else { " " };
        let label = format!(" {}{:<width$}", marker, field.label(), width = LABEL_WIDTH);

        let value = match form.display_value(field) {
            Some(v) => Span::styled(v, styles::list_item_style()),
            None => Span::styled(field.placeholder().to_string(), styles::muted_style()),
        };
        let value = if focused { value.patch_style(styles::selected_style()) } else { value };

        let mut spans = vec![
            Span::styled(label, if focused { styles::highlight_style() } else { styles::muted_style() }),
            Span::styled("[ ", styles::muted_style()),
        ];
        match field.kind() {
            FieldKind::Choice => {
                spans.push(Span::styled("◀ ", styles::muted_style()));
                spans.push(value);
                spans.push(Span::styled(" ▶", styles::muted_style()));
            }
            FieldKind::Toggle => {
                let check = if form.active { "[x] " } else { "[ ] " };
                spans.push(Span::styled(check, styles::highlight_style()));
                spans.push(value);
            }
            FieldKind::Text | FieldKind::Date | FieldKind::Number => {
                spans.push(value);
                if focused {
                    spans.push(Span::styled("▌", styles::highlight_style()));
                }
            }
        }
        spans.push(Span::styled(" ]", styles::muted_style()));
        lines.push(Line::from(spans));

        if let Some(error) = form.error(field) {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(LABEL_WIDTH + 4)),
                Span::styled(error.to_string(), styles::error_style()),
            ]));
        }
    }

    (lines, focus_line)
}

fn render_buttons(frame: &mut Frame, mode: &EditMode, area: Rect) {
    let mut spans = vec![Span::raw(" ")];

    let submit = match mode {
        EditMode::Creating => "Submit",
        EditMode::Updating(_) => "Update",
    };
    spans.push(Span::styled(format!("[Enter] {}", submit), styles::success_style()));
    spans.push(Span::styled("   ", styles::muted_style()));
    spans.push(Span::styled("[Esc] Cancel", styles::muted_style()));

    if matches!(mode, EditMode::Updating(_)) {
        spans.push(Span::styled("   ", styles::muted_style()));
        spans.push(Span::styled("[Ctrl+D] Delete", styles::error_style()));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_one_line_per_field_without_errors() {
        let form = FormState::new();
        let (lines, focus_line) = field_lines(&form, Field::Name);
        assert_eq!(lines.len(), Field::ALL.len());
        assert_eq!(focus_line, 0);
        assert!(text_of(&lines[0]).contains("First Name"));
    }

    #[test]
    fn test_errors_add_lines_below_fields() {
        let mut form = FormState::new();
        let _ = form.submit();
        let errors = form.errors().len();

        let (lines, focus_line) = field_lines(&form, Field::Email);
        assert_eq!(lines.len(), Field::ALL.len() + errors);
        // Name and its error come first
        assert_eq!(focus_line, 2);
        assert!(text_of(&lines[1]).contains("Please enter name"));
    }

    #[test]
    fn test_form_titles() {
        assert_eq!(form_title(&EditMode::Creating), " Add New Employee ");
        let id = staffbook_core::EmployeeId::from("7");
        assert_eq!(form_title(&EditMode::Updating(id)), " Edit Employee #7 ");
    }

    #[test]
    fn test_toggle_shows_checkbox() {
        let mut form = FormState::new();
        form.toggle(Field::Active);
        let (lines, _) = field_lines(&form, Field::Name);
        let active_idx = Field::ALL.iter().position(|f| *f == Field::Active).expect("present");
        assert!(text_of(&lines[active_idx]).contains("[ ] Off"));
    }
}
