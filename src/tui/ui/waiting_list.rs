//! Waiting list view.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::domain::{Patient, PhotoInfo, WaitingQueue};
use crate::tui::styles::MedicalTheme;

/// Placeholder row for an empty queue.
pub const EMPTY_QUEUE_TEXT: &str = "No patients waiting.";

/// Render the waiting list in service order.
pub fn render_waiting_list(f: &mut Frame, area: Rect, queue: &WaitingQueue) {
    let title = format!(
        " Waiting ({}) · urgent {} ",
        queue.len(),
        queue.urgent_len()
    );
    let block = Block::default()
        .title(Span::styled(title, MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());

    let items: Vec<ListItem> = if queue.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            EMPTY_QUEUE_TEXT,
            MedicalTheme::text_muted(),
        )))]
    } else {
        queue
            .iter()
            .enumerate()
            .map(|(i, patient)| patient_item(i + 1, patient))
            .collect()
    };

    f.render_widget(List::new(items).block(block), area);
}

fn patient_item(position: usize, patient: &Patient) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        format!("{position:>3}. "),
        MedicalTheme::text_muted(),
    )];

    if patient.urgent {
        spans.push(Span::styled(" URGENT ", MedicalTheme::urgent_marker()));
        spans.push(Span::raw(" "));
    }

    let name_style = if patient.urgent {
        MedicalTheme::urgent_row()
    } else {
        MedicalTheme::text()
    };
    spans.push(Span::styled(patient.name.clone(), name_style));
    spans.push(Span::styled(
        format!(" ({})", patient.time_of_day()),
        MedicalTheme::text_secondary(),
    ));

    if let Some(badge) = patient.image_base64.as_deref().map(photo_badge) {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(badge, MedicalTheme::badge()));
    }

    ListItem::new(Line::from(spans))
}

/// Short label standing in for a photo the terminal cannot draw.
pub(crate) fn photo_badge(data_url: &str) -> String {
    match PhotoInfo::from_data_url(data_url) {
        Ok(info) => format!("[photo {} {}]", info.mime, info.size_label()),
        Err(_) => "[photo]".to_string(),
    }
}
