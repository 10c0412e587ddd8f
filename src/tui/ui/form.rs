//! Patient intake form: name and optional photo path.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::tui::styles::MedicalTheme;

/// Which input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    PhotoPath,
}

/// Intake form state
#[derive(Debug, Clone, Default)]
pub struct PatientFormState {
    pub name: String,
    pub photo_path: String,
    pub focus: FormField,
}

impl PatientFormState {
    /// Switch focus between the two inputs
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Name => FormField::PhotoPath,
            FormField::PhotoPath => FormField::Name,
        };
    }

    fn focused_value(&mut self) -> &mut String {
        match self.focus {
            FormField::Name => &mut self.name,
            FormField::PhotoPath => &mut self.photo_path,
        }
    }

    pub fn input_char(&mut self, c: char) {
        if !c.is_control() {
            self.focused_value().push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.focused_value().pop();
    }

    /// Empty both inputs and return focus to the name.
    pub fn clear(&mut self) {
        self.name.clear();
        self.photo_path.clear();
        self.focus = FormField::Name;
    }

    /// Photo path, if one was entered.
    #[must_use]
    pub fn photo(&self) -> Option<&str> {
        let path = self.photo_path.trim();
        (!path.is_empty()).then_some(path)
    }
}

/// Render the intake form
pub fn render_patient_form(f: &mut Frame, area: Rect, state: &PatientFormState, pending: usize) {
    let block = Block::default()
        .title(Span::styled(" New Patient ", MedicalTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(MedicalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Photo
            Constraint::Min(0),    // Status
        ])
        .split(inner);

    render_input(
        f,
        chunks[0],
        "Name",
        &state.name,
        "required",
        state.focus == FormField::Name,
    );
    render_input(
        f,
        chunks[1],
        "Photo",
        &state.photo_path,
        "optional file path",
        state.focus == FormField::PhotoPath,
    );

    if pending > 0 {
        let status = Paragraph::new(Line::from(vec![
            Span::styled(" ⧗ ", MedicalTheme::warning()),
            Span::styled(
                format!("Encoding {pending} photo(s)..."),
                MedicalTheme::text_secondary(),
            ),
        ]));
        f.render_widget(status, chunks[2]);
    }
}

fn render_input(
    f: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    hint: &'static str,
    focused: bool,
) {
    let (border_style, title_style) = if focused {
        (MedicalTheme::border_focused(), MedicalTheme::focused())
    } else {
        (MedicalTheme::border(), MedicalTheme::text_secondary())
    };

    let block = Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let value_span = if value.is_empty() {
        Span::styled(hint, MedicalTheme::text_muted())
    } else {
        Span::styled(value.to_string(), MedicalTheme::text())
    };

    let mut spans = vec![Span::raw(" "), value_span];
    if focused {
        spans.push(Span::styled("▌", MedicalTheme::cursor()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
