//! # hubble-core
//!
//! Core domain model and traits for the Hubble legal timeline renderer.
//!
//! This crate provides:
//! - Domain types: `Event`, `CaseMetadata`, `HighlightDirective`,
//!   `VisualizationDirective`, `TimelineDataset`
//! - Flexible date normalization (see [`date`])
//! - The `Renderer` trait implemented by every output backend
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use hubble_core::{CaseMetadata, Event, HighlightDirective, TimelineDataset, VisualizationDirective};
//!
//! let dataset = TimelineDataset::new(CaseMetadata::new("NovExa Leadership"))
//!     .event(
//!         Event::interval("Marcus Hale", "Financial Leadership", "2019", "2023-04-03")
//!             .action("served as CFO"),
//!     )
//!     .event(Event::point("FDA", "informal inquiry", "2023-03-15"))
//!     .visualization(
//!         VisualizationDirective::default()
//!             .highlight(HighlightDirective::new("Marcus Hale", "#ef4444", "Resigned mid-inquiry")),
//!     );
//!
//! assert_eq!(dataset.events.len(), 2);
//! ```

pub mod date;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

pub use date::{duration_label, normalize, DateError, DateGranularity};

// ============================================================================
// Events
// ============================================================================

/// A dated fact extracted from a document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Row label: person, department, entity or phase
    pub actor: String,
    /// What happened
    #[serde(default)]
    pub action: String,
    /// Object of the action, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Classification tag used for default coloring
    #[serde(alias = "roleType")]
    pub category: String,
    /// Start date spec (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`)
    pub start: String,
    /// End date spec; absent for point events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Free-text explanation shown on hover
    #[serde(default)]
    pub context: String,
    /// Explicit point-event flag
    #[serde(default)]
    pub milestone: bool,
}

impl Event {
    /// Create an interval event (rendered as a bar)
    pub fn interval(
        actor: impl Into<String>,
        category: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action: String::new(),
            target: None,
            category: category.into(),
            start: start.into(),
            end: Some(end.into()),
            context: String::new(),
            milestone: false,
        }
    }

    /// Create a milestone (rendered as a vertical marker)
    pub fn point(
        actor: impl Into<String>,
        action: impl Into<String>,
        start: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            target: None,
            category: String::new(),
            start: start.into(),
            end: None,
            context: String::new(),
            milestone: true,
        }
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Whether this event has an end date
    pub fn is_interval(&self) -> bool {
        self.end.is_some()
    }
}

/// Which date field of an event an error refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Start => write!(f, "start"),
            DateField::End => write!(f, "end"),
        }
    }
}

/// An event whose dates have been normalized and contract-checked
#[derive(Clone, Copy, Debug)]
pub struct DatedEvent<'a> {
    /// Position in `TimelineDataset::events`
    pub index: usize,
    pub event: &'a Event,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DatedEvent<'_> {
    pub fn actor(&self) -> &str {
        &self.event.actor
    }

    pub fn is_interval(&self) -> bool {
        self.end.is_some()
    }
}

// ============================================================================
// Case & Visualization Directives
// ============================================================================

/// Descriptive header for the case; fields are display strings only
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl CaseMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn case_type(mut self, case_type: impl Into<String>) -> Self {
        self.case_type = Some(case_type.into());
        self
    }

    pub fn period(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }
}

/// Render a subject's bars in a distinguishing color with a note
///
/// `subject` matches `Event::actor` by exact string equality.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightDirective {
    #[serde(alias = "name")]
    pub subject: String,
    pub color: String,
    #[serde(default)]
    pub reason: String,
}

impl HighlightDirective {
    pub fn new(
        subject: impl Into<String>,
        color: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            color: color.into(),
            reason: reason.into(),
        }
    }
}

/// Row ordering strategy requested by the extraction step
///
/// Only `Chronological` has its own semantics; the other strategies are
/// accepted and ordered the same way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortStrategy {
    #[default]
    Chronological,
    #[serde(alias = "by_role", alias = "by_category")]
    ByCategory,
    #[serde(alias = "by_legal_significance")]
    ByLegalSignificance,
}

/// Styling and filtering policy for a render
///
/// Every field is optional. Absent (or empty) filters keep everything,
/// no highlights means category coloring only.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationDirective {
    /// Keep only interval events for these actors
    #[serde(default, alias = "focus_actors", skip_serializing_if = "Option::is_none")]
    pub focus_subjects: Option<BTreeSet<String>>,
    /// Keep only point events whose action is listed
    #[serde(
        default,
        alias = "key_milestone_events",
        skip_serializing_if = "Option::is_none"
    )]
    pub key_milestone_actions: Option<BTreeSet<String>>,
    /// Ordered; the first directive naming an actor wins
    #[serde(default, alias = "actor_highlights")]
    pub highlights: Vec<HighlightDirective>,
    #[serde(default, alias = "sort_strategy")]
    pub sort_strategy: SortStrategy,
    #[serde(default, alias = "title_override", skip_serializing_if = "Option::is_none")]
    pub title_override: Option<String>,
    #[serde(default, alias = "footer_analysis", skip_serializing_if = "Option::is_none")]
    pub footer_text: Option<String>,
    /// Upstream document classification, e.g. `employment_dispute`
    #[serde(default, alias = "document_type", skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// Upstream explanation of the chosen visualization
    #[serde(
        default,
        alias = "visualization_rationale",
        skip_serializing_if = "Option::is_none"
    )]
    pub rationale: Option<String>,
}

impl VisualizationDirective {
    pub fn focus<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.focus_subjects = Some(subjects.into_iter().map(Into::into).collect());
        self
    }

    pub fn key_milestones<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_milestone_actions = Some(actions.into_iter().map(Into::into).collect());
        self
    }

    pub fn highlight(mut self, highlight: HighlightDirective) -> Self {
        self.highlights.push(highlight);
        self
    }

    pub fn sort(mut self, strategy: SortStrategy) -> Self {
        self.sort_strategy = strategy;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title_override = Some(title.into());
        self
    }

    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer_text = Some(footer.into());
        self
    }

    /// Focus set, treating an empty set as no filter
    pub fn active_focus(&self) -> Option<&BTreeSet<String>> {
        self.focus_subjects.as_ref().filter(|s| !s.is_empty())
    }

    /// Milestone action filter, treating an empty set as no filter
    pub fn active_key_milestones(&self) -> Option<&BTreeSet<String>> {
        self.key_milestone_actions.as_ref().filter(|s| !s.is_empty())
    }

    /// First highlight naming `subject`, if any
    pub fn highlight_for(&self, subject: &str) -> Option<&HighlightDirective> {
        self.highlights.iter().find(|h| h.subject == subject)
    }

    pub fn is_highlighted(&self, subject: &str) -> bool {
        self.highlight_for(subject).is_some()
    }
}

// ============================================================================
// Dataset
// ============================================================================

/// The sole input to a render: case header, events, optional directive
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineDataset {
    pub case: CaseMetadata,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(
        default,
        alias = "visualization_config",
        skip_serializing_if = "Option::is_none"
    )]
    pub visualization: Option<VisualizationDirective>,
}

impl TimelineDataset {
    pub fn new(case: CaseMetadata) -> Self {
        Self {
            case,
            events: Vec::new(),
            visualization: None,
        }
    }

    pub fn event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn visualization(mut self, directive: VisualizationDirective) -> Self {
        self.visualization = Some(directive);
        self
    }

    /// Same events and case, replacement directive
    pub fn with_visualization(&self, directive: Option<VisualizationDirective>) -> Self {
        Self {
            case: self.case.clone(),
            events: self.events.clone(),
            visualization: directive,
        }
    }

    /// Normalize every event's dates and check the extraction contract.
    ///
    /// Fails on the first offending event: empty actor, a milestone that
    /// carries an end date, an unparseable date, or an end before its start.
    pub fn dated_events(&self) -> Result<Vec<DatedEvent<'_>>, RenderError> {
        self.events
            .iter()
            .enumerate()
            .map(|(index, event)| date_event(index, event))
            .collect()
    }
}

fn date_event(index: usize, event: &Event) -> Result<DatedEvent<'_>, RenderError> {
    if event.actor.trim().is_empty() {
        return Err(RenderError::InvalidEvent {
            event: index,
            reason: "actor is empty".into(),
        });
    }
    if event.milestone && event.end.is_some() {
        return Err(RenderError::InvalidEvent {
            event: index,
            reason: format!("milestone '{}' has an end date", event.actor),
        });
    }

    let start = normalize(&event.start).map_err(|e| RenderError::MalformedDate {
        event: index,
        field: DateField::Start,
        value: e.value,
    })?;

    let end = match &event.end {
        Some(spec) => Some(normalize(spec).map_err(|e| RenderError::MalformedDate {
            event: index,
            field: DateField::End,
            value: e.value,
        })?),
        None => None,
    };

    if let Some(end) = end {
        if end < start {
            return Err(RenderError::InvalidEvent {
                event: index,
                reason: format!("'{}' ends ({}) before it starts ({})", event.actor, end, start),
            });
        }
    }

    Ok(DatedEvent {
        index,
        event,
        start,
        end,
    })
}

// ============================================================================
// Traits
// ============================================================================

/// Renders a timeline dataset to an output format
pub trait Renderer {
    type Output;

    /// Render a dataset to the output format
    fn render(&self, dataset: &TimelineDataset) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("event {event}: malformed {field} date '{value}' (expected YYYY, YYYY-MM or YYYY-MM-DD)")]
    MalformedDate {
        event: usize,
        field: DateField,
        value: String,
    },

    #[error("event {event}: {reason}")]
    InvalidEvent { event: usize, reason: String },

    #[error("No events with both start and end dates to draw as bars")]
    NoIntervalEvents,

    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_dataset() -> TimelineDataset {
        TimelineDataset::new(CaseMetadata::new("Sample"))
            .event(Event::interval("Alice", "Exec", "2019", "2021-06"))
            .event(Event::point("Regulator", "inquiry opened", "2020-03-15"))
    }

    #[test]
    fn dated_events_normalize_all_granularities() {
        let dataset = sample_dataset();
        let dated = dataset.dated_events().unwrap();

        assert_eq!(dated.len(), 2);
        assert_eq!(dated[0].start, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert_eq!(dated[0].end, NaiveDate::from_ymd_opt(2021, 6, 1));
        assert!(dated[0].is_interval());
        assert!(!dated[1].is_interval());
        assert_eq!(dated[1].index, 1);
    }

    #[test]
    fn malformed_start_names_the_event() {
        let dataset = sample_dataset().event(Event::interval("Bob", "Exec", "2020-13-40", "2021"));
        match dataset.dated_events() {
            Err(RenderError::MalformedDate {
                event,
                field,
                value,
            }) => {
                assert_eq!(event, 2);
                assert_eq!(field, DateField::Start);
                assert_eq!(value, "2020-13-40");
            }
            other => panic!("expected MalformedDate, got {:?}", other),
        }
    }

    #[test]
    fn malformed_end_is_reported_as_end() {
        let dataset = TimelineDataset::new(CaseMetadata::new("x"))
            .event(Event::interval("Bob", "Exec", "2020", "soon"));
        let err = dataset.dated_events().unwrap_err();
        assert!(matches!(
            err,
            RenderError::MalformedDate {
                field: DateField::End,
                ..
            }
        ));
        assert!(err.to_string().contains("end date 'soon'"));
    }

    #[test]
    fn milestone_with_end_violates_contract() {
        let mut event = Event::point("FDA", "inquiry", "2020");
        event.end = Some("2021".into());
        let dataset = TimelineDataset::new(CaseMetadata::new("x")).event(event);
        assert!(matches!(
            dataset.dated_events(),
            Err(RenderError::InvalidEvent { event: 0, .. })
        ));
    }

    #[test]
    fn empty_actor_violates_contract() {
        let dataset = TimelineDataset::new(CaseMetadata::new("x"))
            .event(Event::interval("  ", "Exec", "2020", "2021"));
        assert!(matches!(
            dataset.dated_events(),
            Err(RenderError::InvalidEvent { event: 0, .. })
        ));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let dataset = TimelineDataset::new(CaseMetadata::new("x"))
            .event(Event::interval("Carol", "Exec", "2022", "2020"));
        assert!(matches!(
            dataset.dated_events(),
            Err(RenderError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn first_matching_highlight_wins() {
        let directive = VisualizationDirective::default()
            .highlight(HighlightDirective::new("Alice", "#ef4444", "first"))
            .highlight(HighlightDirective::new("Alice", "#f59e0b", "second"));
        assert_eq!(directive.highlight_for("Alice").unwrap().reason, "first");
        assert!(directive.highlight_for("alice").is_none());
    }

    #[test]
    fn empty_filters_are_inactive() {
        let directive = VisualizationDirective::default()
            .focus(Vec::<String>::new())
            .key_milestones(Vec::<String>::new());
        assert!(directive.active_focus().is_none());
        assert!(directive.active_key_milestones().is_none());

        let directive = directive.focus(["Alice"]);
        assert!(directive.active_focus().unwrap().contains("Alice"));
    }

    #[test]
    fn with_visualization_keeps_events() {
        let dataset = sample_dataset().visualization(VisualizationDirective::default().title("Old"));
        let restyled = dataset.with_visualization(Some(VisualizationDirective::default().title("New")));
        assert_eq!(restyled.events, dataset.events);
        assert_eq!(
            restyled.visualization.unwrap().title_override.as_deref(),
            Some("New")
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        assert_eq!(
            RenderError::NoIntervalEvents.to_string(),
            "No events with both start and end dates to draw as bars"
        );
        assert_eq!(DateField::Start.to_string(), "start");
    }
}
