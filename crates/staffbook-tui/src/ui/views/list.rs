use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use staffbook_core::models::rating_label;
use staffbook_core::utils::{format_date, format_phone};
use staffbook_core::Employee;

use crate::app::{App, PAGE_SIZE};
use crate::ui::styles;

/// Render the employee list: one page of the table plus the selected record
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let sorted = app.sorted_employees();
    render_table(frame, app, &sorted, chunks[0]);
    render_detail(frame, sorted.get(app.selection).copied(), chunks[1]);
}

fn render_table(frame: &mut Frame, app: &App, sorted: &[&Employee], area: Rect) {
    let header = Row::new([
        Cell::from(""),
        Cell::from(format!("Name{}", app.name_sort.indicator())),
        Cell::from("Email"),
        Cell::from("Department"),
        Cell::from("Type"),
        Cell::from("Status"),
    ])
    .style(styles::header_style())
    .height(1);

    let page_start = app.current_page() * PAGE_SIZE;

    let rows: Vec<Row> = sorted
        .iter()
        .skip(page_start)
        .take(PAGE_SIZE)
        .map(|employee| {
            let initial = employee.avatar_initial();
            Row::new(vec![
                Cell::from(Span::styled(format!(" {} ", initial), styles::avatar_style(initial))),
                Cell::from(employee.name.as_str()),
                Cell::from(employee.email.as_str()),
                Cell::from(employee.department_label()),
                Cell::from(employee.type_label()),
                Cell::from(Span::styled(employee.status_label(), styles::status_style(employee.active))),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Fill(3),
        Constraint::Fill(4),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Length(8),
    ];

    let title = format!(
        " Employees ({}) - page {}/{} ",
        app.employees.len(),
        app.current_page() + 1,
        app.page_count()
    );

    let empty = rows.is_empty();
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !empty {
        state.select(Some(app.selection - page_start));
    }

    frame.render_stateful_widget(table, area, &mut state);

    if empty {
        let inner = Rect::new(area.x + 2, area.y + 2, area.width.saturating_sub(4), 1);
        let hint = Paragraph::new(Span::styled("No employees. Press [a] to add one.", styles::muted_style()));
        frame.render_widget(hint, inner);
    }
}

fn detail_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), styles::muted_style()),
        Span::raw(value),
    ])
}

fn render_detail(frame: &mut Frame, selected: Option<&Employee>, area: Rect) {
    let placeholder = "-".to_string();

    let lines = match selected {
        Some(employee) => {
            let mut lines = vec![
                Line::from(Span::styled(employee.name.clone(), styles::title_style())),
                Line::from(Span::styled(
                    employee.status_label(),
                    styles::status_style(employee.active),
                )),
                Line::from(""),
                Line::from(Span::styled("Contact", styles::highlight_style())),
                detail_line("Email:", employee.email.clone()),
                detail_line("Phone:", format_phone(&employee.phone)),
                Line::from(""),
                Line::from(Span::styled("Employment", styles::highlight_style())),
                detail_line("Department:", employee.department_label().to_string()),
                detail_line("Type:", employee.type_label().to_string()),
                detail_line("Hired:", format_date(employee.hire_date)),
                detail_line(
                    "Experience:",
                    employee
                        .experience
                        .map(|years| format!("{} years", years))
                        .unwrap_or_else(|| placeholder.clone()),
                ),
                detail_line(
                    "Rating:",
                    employee
                        .performance_rating
                        .map(|r| rating_label(r).to_string())
                        .unwrap_or_else(|| placeholder.clone()),
                ),
                Line::from(""),
                Line::from(Span::styled("Personal", styles::highlight_style())),
                detail_line("Born:", format_date(employee.birth_date)),
            ];

            if let Some(ref notes) = employee.notes {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled("Notes", styles::highlight_style())));
                lines.push(Line::from(notes.clone()));
            }

            if let Some(ref id) = employee.id {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(format!("#{}", id), styles::muted_style())));
            }
            lines
        }
        None => vec![Line::from(Span::styled("Nothing selected", styles::muted_style()))],
    };

    let block = Block::default()
        .title(" Details ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}
