use ratatui::style::{Color, Modifier, Style};

// Color palette
pub const PRIMARY: Color = Color::Rgb(64, 128, 192);
pub const SECONDARY: Color = Color::Rgb(96, 160, 96);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const HIGHLIGHT: Color = Color::Rgb(48, 48, 64);

pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn list_item_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn header_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn success_style() -> Style {
    Style::default().fg(SECONDARY)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(PRIMARY)
    } else {
        Style::default().fg(MUTED)
    }
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn help_desc_style() -> Style {
    Style::default().fg(Color::White)
}

/// Active / Inactive badge in the table
pub fn status_style(active: bool) -> Style {
    if active {
        success_style()
    } else {
        error_style()
    }
}

/// Colored avatar initial, stable per letter
pub fn avatar_style(initial: char) -> Style {
    const PALETTE: [Color; 5] = [PRIMARY, SECONDARY, ACCENT, ERROR, Color::Rgb(144, 96, 176)];
    let idx = initial.to_ascii_uppercase() as usize % PALETTE.len();
    Style::default()
        .fg(Color::Black)
        .bg(PALETTE[idx])
        .add_modifier(Modifier::BOLD)
}

pub fn notification_style(success: bool) -> Style {
    let bg = if success { SECONDARY } else { ERROR };
    Style::default().fg(Color::Black).bg(bg).add_modifier(Modifier::BOLD)
}
