//! Colors: category palette, highlight precedence, chart theme

use hubble_core::{Event, HighlightDirective};
use serde::Serialize;

/// Muted tones assigned to categories in first-seen order
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#6b9bd1", // muted blue
    "#7cb89d", // muted teal
    "#b08968", // muted brown
    "#d4a574", // muted tan
    "#9b8aad", // muted purple
    "#a8c5d1", // blue-gray
    "#c9ada7", // mauve
    "#8fa998", // sage
    "#b5aa7d", // olive
    "#98a8b8", // slate
];

/// Color for bars whose category has no palette entry
pub const FALLBACK_COLOR: &str = "#3b82f6";

/// Swatch color of the single flagged-item legend entry
pub const FLAGGED_COLOR: &str = "#ef4444";

/// Label of the single flagged-item legend entry
pub const FLAGGED_LABEL: &str = "⚠ Suspicious Appointment";

/// Category → color assignment, kept in first-seen order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryColors {
    entries: Vec<(String, String)>,
}

impl CategoryColors {
    /// Assign `palette[i % len]` to the i-th distinct category.
    pub fn from_events<'a, I>(events: I) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut entries: Vec<(String, String)> = Vec::new();
        for event in events {
            if entries.iter().any(|(c, _)| *c == event.category) {
                continue;
            }
            let color = CATEGORY_PALETTE[entries.len() % CATEGORY_PALETTE.len()];
            entries.push((event.category.clone(), color.to_string()));
        }
        Self { entries }
    }

    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, color)| color.as_str())
    }

    /// Palette color for a category, or [`FALLBACK_COLOR`]
    pub fn color_for(&self, category: &str) -> &str {
        self.get(category).unwrap_or(FALLBACK_COLOR)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, color)| (c.as_str(), color.as_str()))
    }
}

/// Display color for one bar, plus the legal note when highlighted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub color: String,
    pub annotation: Option<String>,
}

impl ResolvedStyle {
    pub fn is_highlighted(&self) -> bool {
        self.annotation.is_some()
    }
}

/// Highlight directive (first match on exact actor) beats category color.
pub fn resolve_color(
    event: &Event,
    highlights: &[HighlightDirective],
    colors: &CategoryColors,
) -> ResolvedStyle {
    match highlights.iter().find(|h| h.subject == event.actor) {
        Some(highlight) => ResolvedStyle {
            color: highlight.color.clone(),
            annotation: Some(highlight.reason.clone()),
        },
        None => ResolvedStyle {
            color: colors.color_for(&event.category).to_string(),
            annotation: None,
        },
    }
}

/// Color theme for the timeline chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartTheme {
    /// Page background around the plot
    pub paper_color: String,
    /// Plot area background
    pub background_color: String,
    /// Title and unflagged row labels
    pub text_color: String,
    /// Subtitle, legend, axis ticks, footer
    pub muted_text_color: String,
    pub grid_color: String,
    pub separator_color: String,
    pub milestone_color: String,
    pub milestone_label_color: String,
    pub bar_stroke_color: String,
    pub duration_label_color: String,
    pub font_family: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl ChartTheme {
    pub fn light() -> Self {
        Self {
            paper_color: "#f9fafb".into(),
            background_color: "#ffffff".into(),
            text_color: "#1f2937".into(),
            muted_text_color: "#6b7280".into(),
            grid_color: "#e5e7eb".into(),
            separator_color: "#d1d5db".into(),
            milestone_color: "#9ca3af".into(),
            milestone_label_color: "#4b5563".into(),
            bar_stroke_color: "#ffffff".into(),
            duration_label_color: "#ffffff".into(),
            font_family: "Inter, system-ui, -apple-system, sans-serif".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            paper_color: "#16213e".into(),
            background_color: "#1a1a2e".into(),
            text_color: "#eaeaea".into(),
            muted_text_color: "#95a5a6".into(),
            grid_color: "#2d2d44".into(),
            separator_color: "#3d3d5c".into(),
            milestone_color: "#7f8c8d".into(),
            milestone_label_color: "#bdc3c7".into(),
            bar_stroke_color: "#1a1a2e".into(),
            duration_label_color: "#ffffff".into(),
            font_family: "Inter, system-ui, -apple-system, sans-serif".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(categories: &[&str]) -> Vec<Event> {
        categories
            .iter()
            .enumerate()
            .map(|(i, c)| Event::interval(format!("actor{i}"), *c, "2020", "2021"))
            .collect()
    }

    #[test]
    fn categories_take_palette_in_first_seen_order() {
        let colors = CategoryColors::from_events(&events(&["Exec", "Legal", "Exec", "Board"]));
        assert_eq!(colors.len(), 3);
        assert_eq!(colors.get("Exec"), Some(CATEGORY_PALETTE[0]));
        assert_eq!(colors.get("Legal"), Some(CATEGORY_PALETTE[1]));
        assert_eq!(colors.get("Board"), Some(CATEGORY_PALETTE[2]));
    }

    #[test]
    fn palette_cycles_past_ten_categories() {
        let names: Vec<String> = (0..12).map(|i| format!("cat{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let colors = CategoryColors::from_events(&events(&refs));
        assert_eq!(colors.get("cat10"), Some(CATEGORY_PALETTE[0]));
        assert_eq!(colors.get("cat11"), Some(CATEGORY_PALETTE[1]));
    }

    #[test]
    fn identical_input_gives_identical_assignment() {
        let a = CategoryColors::from_events(&events(&["B", "A", "C"]));
        let b = CategoryColors::from_events(&events(&["B", "A", "C"]));
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_category_falls_back() {
        let colors = CategoryColors::from_events(&events(&["Exec"]));
        assert_eq!(colors.color_for("Nope"), FALLBACK_COLOR);
    }

    #[test]
    fn highlight_overrides_category() {
        let evts = events(&["Exec"]);
        let colors = CategoryColors::from_events(&evts);
        let highlights = vec![
            HighlightDirective::new("actor0", "#ff0000", "Unqualified replacement"),
            HighlightDirective::new("actor0", "#00ff00", "shadowed"),
        ];

        let style = resolve_color(&evts[0], &highlights, &colors);
        assert_eq!(style.color, "#ff0000");
        assert_eq!(style.annotation.as_deref(), Some("Unqualified replacement"));
        assert!(style.is_highlighted());
    }

    #[test]
    fn unmatched_highlight_is_inert() {
        let evts = events(&["Exec"]);
        let colors = CategoryColors::from_events(&evts);
        let highlights = vec![HighlightDirective::new("Somebody Else", "#ff0000", "x")];

        let style = resolve_color(&evts[0], &highlights, &colors);
        assert_eq!(style.color, CATEGORY_PALETTE[0]);
        assert_eq!(style.annotation, None);
    }

    #[test]
    fn malformed_highlight_color_passes_through() {
        let evts = events(&["Exec"]);
        let colors = CategoryColors::from_events(&evts);
        let highlights = vec![HighlightDirective::new("actor0", "not-a-color", "x")];
        assert_eq!(resolve_color(&evts[0], &highlights, &colors).color, "not-a-color");
    }
}
