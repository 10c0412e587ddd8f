//! UI module: View components for the TUI.

pub mod current;
pub mod form;
pub mod waiting_list;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Severity of a blocking notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A modal message that must be dismissed before anything else happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    fn style(&self) -> Style {
        match self.level {
            NoticeLevel::Info => MedicalTheme::info(),
            NoticeLevel::Warning => MedicalTheme::warning(),
            NoticeLevel::Error => MedicalTheme::danger(),
        }
    }
}

pub fn render_header(f: &mut Frame, area: Rect, waiting: usize, urgent: usize) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", MedicalTheme::text()),
        Span::styled("Waitline", MedicalTheme::title()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled("Patient Queue", MedicalTheme::text_secondary()),
        Span::styled(" │ ", MedicalTheme::text_muted()),
        Span::styled(format!("{waiting} waiting"), MedicalTheme::text()),
        Span::styled(", ", MedicalTheme::text_muted()),
        Span::styled(format!("{urgent} urgent"), MedicalTheme::danger()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(header, area);
}

pub fn render_footer(f: &mut Frame, area: Rect) {
    let hints = [
        ("[Enter] ", "Add "),
        ("[Ctrl+U] ", "Add Urgent "),
        ("[Ctrl+A] ", "Attend Next "),
        ("[Ctrl+X] ", "Clear Service "),
        ("[Tab] ", "Switch Field "),
        ("[Esc] ", "Clear Form "),
        ("[Ctrl+Q] ", "Quit"),
    ];

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, MedicalTheme::key_hint()),
                Span::styled(*desc, MedicalTheme::key_desc()),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(MedicalTheme::border()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}

/// Draw a notification centred over `area`.
pub fn render_notification(f: &mut Frame, area: Rect, notice: &Notification) {
    let popup = centered_rect(60, 7, area);

    let block = Block::default()
        .title(Span::styled(format!(" {} ", notice.title), notice.style()))
        .borders(Borders::ALL)
        .border_style(notice.style());

    let text = vec![
        Line::from(Span::styled(notice.message.clone(), MedicalTheme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("OK", MedicalTheme::key_desc()),
        ]),
    ];

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

/// A rectangle `percent_x` wide and `height` rows tall, centred in `area`.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|cell| cell.symbol()).collect()
}
