//! Medical-themed color palette and styles.
//!
//! Urgent entries and the active in-service panel each get a color that is
//! never reused for plain text, so they stay recognisable at a glance.

use ratatui::style::{Color, Modifier, Style};

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Primary Colors ===

    /// Deep teal (#0D9488)
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136);

    /// Lighter teal for highlights (#2DD4BF)
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191);

    /// Light slate for borders (#94A3B8)
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184);

    // === Semantic Colors ===

    /// Emerald, used for the active in-service panel (#10B981)
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129);

    /// Amber (#FBBF24)
    pub const WARNING: Color = Color::Rgb(251, 191, 36);

    /// Rose, used for urgent entries and errors (#F43F5E)
    pub const DANGER: Color = Color::Rgb(244, 63, 94);

    /// Blue (#3B82F6)
    pub const INFO: Color = Color::Rgb(59, 130, 246);

    // === Background Colors ===

    /// Near-black with blue tint (#0F172A)
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42);

    /// Tinted background behind an urgent row (#4C0519)
    pub const BG_URGENT: Color = Color::Rgb(76, 5, 25);

    // === Text Colors ===

    /// Primary text (#F8FAFC)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252);

    /// Secondary text (#94A3B8)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

    /// Muted text (#64748B)
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }

    /// Row style for a patient in the urgent lane
    #[must_use]
    pub fn urgent_row() -> Style {
        Style::default()
            .fg(Self::DANGER)
            .bg(Self::BG_URGENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Marker shown before urgent names
    #[must_use]
    pub fn urgent_marker() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::DANGER)
            .add_modifier(Modifier::BOLD)
    }

    /// Photo badge next to a name
    #[must_use]
    pub fn badge() -> Style {
        Style::default().fg(Self::INFO).add_modifier(Modifier::ITALIC)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    /// Border of the in-service panel while a patient is being attended
    #[must_use]
    pub fn border_active() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Name shown in the in-service panel
    #[must_use]
    pub fn active_name() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn cursor() -> Style {
        Style::default().fg(Self::PRIMARY_LIGHT)
    }
}
