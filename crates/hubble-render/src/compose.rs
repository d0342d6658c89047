//! Chart text: header, legend, footer and hover tooltips

use crate::classify::Classified;
use crate::layout::round2;
use crate::scene::{Anchor, Header, LegendEntry, Rect, TextItem};
use crate::style::{CategoryColors, FLAGGED_COLOR, FLAGGED_LABEL};
use hubble_core::{CaseMetadata, DatedEvent, VisualizationDirective};

/// Joins clauses in the subtitle, stats line and footer
pub const SEPARATOR: &str = " • ";

const TITLE_Y: f64 = 40.0;
const SUBTITLE_Y: f64 = 64.0;
const STATS_Y: f64 = 86.0;
const LEGEND_Y: f64 = 112.0;
const SWATCH: f64 = 10.0;
/// Rough advance of one legend character at 9px
const LEGEND_CHAR_WIDTH: f64 = 5.5;
const LEGEND_GAP: f64 = 20.0;

pub fn title(case: &CaseMetadata, directive: &VisualizationDirective) -> String {
    directive
        .title_override
        .clone()
        .unwrap_or_else(|| case.name.clone())
}

/// `"{type} • CASE NO. {id}"`, omitting absent parts
pub fn subtitle(case: &CaseMetadata) -> Option<String> {
    let parts: Vec<String> = [
        case.case_type.clone(),
        case.id.as_ref().map(|id| format!("CASE NO. {}", id)),
    ]
    .into_iter()
    .flatten()
    .collect();

    (!parts.is_empty()).then(|| parts.join(SEPARATOR))
}

/// Date range, subject count, milestone count; empty clauses omitted
pub fn stats(case: &CaseMetadata, subjects: usize, milestones: usize) -> Option<String> {
    let mut parts = Vec::new();
    if let (Some(start), Some(end)) = (&case.start, &case.end) {
        parts.push(format!("{} to {}", start, end));
    }
    if subjects > 0 {
        parts.push(format!("{} stakeholders", subjects));
    }
    if milestones > 0 {
        parts.push(format!("{} key milestones", milestones));
    }

    (!parts.is_empty()).then(|| parts.join(SEPARATOR))
}

pub fn header(
    width: f64,
    case: &CaseMetadata,
    directive: &VisualizationDirective,
    subjects: usize,
    milestones: usize,
) -> Header {
    let center = round2(width / 2.0);
    Header {
        title: TextItem::new(title(case, directive), center, TITLE_Y, Anchor::Middle),
        subtitle: subtitle(case).map(|s| TextItem::new(s, center, SUBTITLE_Y, Anchor::Middle)),
        stats: stats(case, subjects, milestones)
            .map(|s| TextItem::new(s, center, STATS_Y, Anchor::Middle)),
    }
}

/// Legend labels and colors: one per rendered category sorted by label,
/// then one flagged entry if the directive carries any highlight.
pub fn legend_items(
    intervals: &[DatedEvent<'_>],
    colors: &CategoryColors,
    directive: &VisualizationDirective,
) -> Vec<(String, String, bool)> {
    let mut items: Vec<(String, String, bool)> = Vec::new();
    for event in intervals {
        let category = &event.event.category;
        if items.iter().any(|(label, _, _)| label == category) {
            continue;
        }
        items.push((category.clone(), colors.color_for(category).to_string(), false));
    }
    items.sort_by(|a, b| a.0.cmp(&b.0));

    if !directive.highlights.is_empty() {
        items.push((FLAGGED_LABEL.to_string(), FLAGGED_COLOR.to_string(), true));
    }
    items
}

/// Lay legend items out in one centered row under the stats line
pub fn legend(width: f64, items: Vec<(String, String, bool)>) -> Vec<LegendEntry> {
    let entry_width = |label: &str| {
        SWATCH + 5.0 + label.chars().count() as f64 * LEGEND_CHAR_WIDTH + LEGEND_GAP
    };
    let total: f64 = items.iter().map(|(label, _, _)| entry_width(label)).sum();
    let mut x = round2(width / 2.0 - total / 2.0);

    items
        .into_iter()
        .map(|(label, color, flagged)| {
            let advance = entry_width(&label);
            let entry = LegendEntry {
                swatch: Rect {
                    x,
                    y: LEGEND_Y - SWATCH / 2.0,
                    width: SWATCH,
                    height: SWATCH,
                },
                text: TextItem::new(label.clone(), round2(x + SWATCH + 5.0), LEGEND_Y + 3.0, Anchor::Start),
                label,
                color,
                flagged,
            };
            x = round2(x + advance);
            entry
        })
        .collect()
}

/// Footer text: explicit analysis if given, else a computed summary.
///
/// The summary counts bars whose context mentions a termination or
/// resignation, bars whose action mentions a replacement or interim role,
/// and lists up to three milestone actions.
pub fn footer_text(directive: &VisualizationDirective, classified: &Classified<'_>) -> Option<String> {
    if let Some(text) = directive.footer_text.as_deref().filter(|t| !t.is_empty()) {
        return Some(text.to_string());
    }

    let departures = classified
        .intervals
        .iter()
        .filter(|e| contains_any(&e.event.context, &["terminated", "resigned"]))
        .count();
    let replacements = classified
        .intervals
        .iter()
        .filter(|e| contains_any(&e.event.action, &["replacement", "interim"]))
        .count();

    let mut notes = Vec::new();
    if departures > 0 {
        notes.push(format!("⚠ {} leadership changes during investigation period", departures));
    }
    if replacements > 0 {
        notes.push(format!("Note: {} interim/replacement appointments", replacements));
    }
    if !classified.points.is_empty() {
        let first: Vec<&str> = classified
            .points
            .iter()
            .take(3)
            .map(|e| e.event.action.as_str())
            .collect();
        notes.push(format!("Key milestones: {}", first.join(", ")));
    }

    (!notes.is_empty()).then(|| notes.join(SEPARATOR))
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    let lower = haystack.to_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

/// Hover lines for a bar
pub fn bar_tooltip(event: &DatedEvent<'_>, duration: &str, annotation: Option<&str>) -> Vec<String> {
    let e = event.event;
    let mut lines = vec![
        e.actor.clone(),
        format!("Role: {}", e.category),
        format!("Action: {}", e.action),
    ];
    if let Some(target) = &e.target {
        lines.push(format!("Target: {}", target));
    }
    lines.push(format!(
        "Period: {} to {}",
        e.start,
        e.end.as_deref().unwrap_or_default()
    ));
    lines.push(format!("Duration: {}", duration));
    if !e.context.is_empty() {
        lines.push(format!("Context: {}", e.context));
    }
    if let Some(note) = annotation {
        lines.push(format!("Legal Note: {}", note));
    }
    lines
}

/// Hover lines for a milestone marker
pub fn milestone_tooltip(event: &DatedEvent<'_>) -> Vec<String> {
    let e = event.event;
    let mut lines = vec![e.action.clone(), format!("Actor: {}", e.actor)];
    if let Some(target) = &e.target {
        lines.push(format!("Target: {}", target));
    }
    lines.push(format!("Date: {}", e.start));
    if !e.context.is_empty() {
        lines.push(format!("Context: {}", e.context));
    }
    lines
}
