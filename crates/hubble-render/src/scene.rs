//! Backend-agnostic chart description
//!
//! A [`ChartArtifact`] holds every positioned shape and string of a timeline
//! chart. Output adapters translate it 1:1 and never recompute row order,
//! colors or coordinates. All coordinates are canvas pixels with the origin
//! at the top-left corner.

use crate::style::ChartTheme;
use chrono::NaiveDate;
use serde::Serialize;

/// A fully laid-out timeline chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartArtifact {
    pub width: f64,
    pub height: f64,
    pub plot: Rect,
    pub header: Header,
    pub legend: Vec<LegendEntry>,
    pub axis: TimeAxis,
    /// Vertical lines at each axis tick
    pub gridlines: Vec<Segment>,
    /// Horizontal lane boundaries, `rows + 1` of them
    pub separators: Vec<Segment>,
    /// Subject labels, top row first
    pub rows: Vec<RowLabel>,
    pub bars: Vec<Bar>,
    pub milestones: Vec<MilestoneMarker>,
    pub footer: Option<TextItem>,
    pub theme: ChartTheme,
    pub meta: ChartMeta,
}

impl ChartArtifact {
    /// Subjects as they read on the chart, top row first
    pub fn subjects(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.subject.as_str()).collect()
    }

    /// Number of flagged-item legend entries (0 or 1)
    pub fn flagged_legend_entries(&self) -> usize {
        self.legend.iter().filter(|e| e.flagged).count()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Horizontal text anchoring, mirrors SVG `text-anchor`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// A positioned string
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub anchor: Anchor,
    /// Rotation in degrees around (x, y); negative is counter-clockwise
    pub rotate: f64,
}

impl TextItem {
    pub fn new(text: impl Into<String>, x: f64, y: f64, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            anchor,
            rotate: 0.0,
        }
    }

    pub fn rotated(mut self, degrees: f64) -> Self {
        self.rotate = degrees;
        self
    }
}

/// Title block above the plot
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Header {
    pub title: TextItem,
    pub subtitle: Option<TextItem>,
    pub stats: Option<TextItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
    /// True for the synthetic flagged-item entry
    pub flagged: bool,
    pub swatch: Rect,
    pub text: TextItem,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimeAxis {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub ticks: Vec<AxisTick>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AxisTick {
    pub date: NaiveDate,
    pub x: f64,
    pub label: TextItem,
}

/// Subject label on the row axis
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowLabel {
    pub subject: String,
    /// Row index, 0 = bottom
    pub row: usize,
    pub label: TextItem,
    pub color: String,
    pub bold: bool,
}

/// One interval event drawn as a horizontal bar
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bar {
    /// Index into the dataset's events
    pub event: usize,
    pub subject: String,
    pub row: usize,
    pub category: String,
    pub action: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub rect: Rect,
    pub color: String,
    /// Duration text centered on the bar
    pub duration: TextItem,
    /// Legal note attached by a highlight directive
    pub annotation: Option<String>,
    /// Hover lines, first line is the subject
    pub tooltip: Vec<String>,
}

/// One point event drawn as a vertical marker
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MilestoneMarker {
    pub event: usize,
    pub actor: String,
    pub action: String,
    pub date: NaiveDate,
    pub line: Segment,
    pub label: TextItem,
    pub tooltip: Vec<String>,
}

/// Summary facts carried alongside the drawing
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartMeta {
    pub case_name: String,
    pub subject_count: usize,
    pub milestone_count: usize,
    pub highlighted: Vec<String>,
    pub document_type: Option<String>,
    pub rationale: Option<String>,
}
