//! In-service panel.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::waiting_list::photo_badge;
use crate::domain::CurrentPatient;
use crate::tui::styles::MedicalTheme;

/// Placeholder shown while nobody is being attended.
pub const NO_CURRENT_TEXT: &str = "No patient in service.";

/// Render the patient currently being attended, or the placeholder.
pub fn render_current_patient(f: &mut Frame, area: Rect, current: Option<&CurrentPatient>) {
    let (border_style, lines) = match current {
        Some(patient) => {
            let mut lines = vec![
                Line::from(Span::styled("Now attending", MedicalTheme::text_secondary())),
                Line::from(vec![
                    Span::styled("▶ ", MedicalTheme::success()),
                    Span::styled(patient.name.clone(), MedicalTheme::active_name()),
                ]),
            ];
            if let Some(data_url) = patient.image_base64.as_deref() {
                lines.push(Line::from(Span::styled(
                    photo_badge(data_url),
                    MedicalTheme::badge(),
                )));
            }
            (MedicalTheme::border_active(), lines)
        }
        None => (
            MedicalTheme::border(),
            vec![Line::from(Span::styled(
                NO_CURRENT_TEXT,
                MedicalTheme::text_muted(),
            ))],
        ),
    };

    let block = Block::default()
        .title(Span::styled(" In Service ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(border_style);

    f.render_widget(Paragraph::new(lines).block(block), area);
}
