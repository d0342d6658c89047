//! # hubble-render
//!
//! Turns a [`TimelineDataset`] into a laid-out chart and serializes it.
//!
//! The pipeline is pure: date normalization, bar/milestone classification,
//! directive filters, row assignment, color resolution and layout all run in
//! [`TimelineChart::compose`], which returns a [`ChartArtifact`]. Output
//! backends translate the artifact without recomputing anything:
//!
//! - [`SvgRenderer`]: static SVG document
//! - [`HtmlRenderer`]: standalone page with hover tooltips
//! - [`JsonRenderer`]: the artifact itself as JSON
//! - [`MermaidRenderer`]: MermaidJS gantt text for Markdown
//!
//! ## Example
//!
//! ```rust
//! use hubble_core::{CaseMetadata, Event, Renderer, TimelineDataset};
//! use hubble_render::{SvgRenderer, TimelineChart};
//!
//! let dataset = TimelineDataset::new(CaseMetadata::new("NovExa Leadership"))
//!     .event(Event::interval("Marcus Hale", "Financial Leadership", "2019", "2023-04-03"))
//!     .event(Event::interval("Dana Ortiz", "Legal", "2020-02", "2024"));
//!
//! let chart = TimelineChart::new().compose(&dataset).unwrap();
//! assert_eq!(chart.subjects(), ["Marcus Hale", "Dana Ortiz"]);
//!
//! let svg = SvgRenderer::new().render(&dataset).unwrap();
//! assert!(svg.contains("Marcus Hale"));
//! ```

pub mod classify;
pub mod compose;
pub mod html;
pub mod layout;
pub mod mermaid;
pub mod rows;
pub mod scene;
pub mod style;
pub mod svg_render;

pub use classify::{classify, Classified};
pub use html::HtmlRenderer;
pub use layout::{Frame, LayoutConfig, TimeScale};
pub use mermaid::MermaidRenderer;
pub use rows::RowOrder;
pub use scene::ChartArtifact;
pub use style::{resolve_color, CategoryColors, ChartTheme, ResolvedStyle};
pub use svg_render::SvgRenderer;

use hubble_core::{duration_label, RenderError, Renderer, TimelineDataset, VisualizationDirective};
use scene::{Anchor, Bar, ChartMeta, MilestoneMarker, RowLabel, TextItem, TimeAxis};

/// Layout plus theme: everything needed to compose a chart
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineChart {
    pub layout: LayoutConfig,
    pub theme: ChartTheme,
}

impl TimelineChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.theme = ChartTheme::dark();
        self
    }

    /// Configure canvas width
    pub fn width(mut self, width: f64) -> Self {
        self.layout = self.layout.width(width);
        self
    }

    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Run the whole pipeline and describe the resulting chart.
    pub fn compose(&self, dataset: &TimelineDataset) -> Result<ChartArtifact, RenderError> {
        let directive = dataset.visualization.clone().unwrap_or_default();

        let dated = dataset.dated_events()?;
        let classified = classify(&dated).filter(&directive)?;
        let rows = RowOrder::build(&classified.intervals, Some(&directive));
        let colors = CategoryColors::from_events(&dataset.events);
        let frame = self.layout.frame(&classified, &rows);

        for highlight in &directive.highlights {
            if rows.index_of(&highlight.subject).is_none() {
                tracing::debug!(subject = %highlight.subject, "highlight matches no rendered subject");
            }
        }

        tracing::debug!(
            case = %dataset.case.name,
            bars = classified.intervals.len(),
            milestones = classified.points.len(),
            rows = rows.len(),
            "composing timeline chart"
        );

        let mut bars = Vec::with_capacity(classified.intervals.len());
        for event in &classified.intervals {
            let (Some(row), Some(end)) = (rows.index_of(event.actor()), event.end) else {
                continue;
            };
            let style = resolve_color(event.event, &directive.highlights, &colors);
            let geometry = frame.bar(row, event.start, end);
            let duration = duration_label(event.start, end);

            bars.push(Bar {
                event: event.index,
                subject: event.actor().to_string(),
                row,
                category: event.event.category.clone(),
                action: event.event.action.clone(),
                start: event.start,
                end,
                rect: geometry.rect,
                color: style.color,
                tooltip: compose::bar_tooltip(event, &duration, style.annotation.as_deref()),
                duration: TextItem::new(duration, geometry.label_x, geometry.label_y, Anchor::Middle),
                annotation: style.annotation,
            });
        }

        let milestones: Vec<MilestoneMarker> = classified
            .points
            .iter()
            .map(|event| {
                let (line, label) = frame.milestone(event.start, &event.event.action);
                MilestoneMarker {
                    event: event.index,
                    actor: event.actor().to_string(),
                    action: event.event.action.clone(),
                    date: event.start,
                    line,
                    label,
                    tooltip: compose::milestone_tooltip(event),
                }
            })
            .collect();

        let row_labels = row_labels(&frame, &rows, &directive, &self.theme);

        let ticks = frame.ticks();
        let gridlines = frame.gridlines(&ticks);

        let header = compose::header(
            frame.width,
            &dataset.case,
            &directive,
            rows.len(),
            milestones.len(),
        );
        let legend = compose::legend(
            frame.width,
            compose::legend_items(&classified.intervals, &colors, &directive),
        );
        let footer = compose::footer_text(&directive, &classified).map(|text| {
            TextItem::new(
                text,
                layout::round2(frame.width / 2.0),
                layout::round2(frame.height - 30.0),
                Anchor::Middle,
            )
        });

        let meta = ChartMeta {
            case_name: dataset.case.name.clone(),
            subject_count: rows.len(),
            milestone_count: milestones.len(),
            highlighted: row_labels
                .iter()
                .filter(|r| r.bold)
                .map(|r| r.subject.clone())
                .collect(),
            document_type: directive.document_type.clone(),
            rationale: directive.rationale.clone(),
        };

        Ok(ChartArtifact {
            width: frame.width,
            height: frame.height,
            plot: frame.plot,
            header,
            legend,
            axis: TimeAxis {
                start: frame.scale.start,
                end: frame.scale.end,
                ticks,
            },
            gridlines,
            separators: frame.separators(),
            rows: row_labels,
            bars,
            milestones,
            footer,
            theme: self.theme.clone(),
            meta,
        })
    }
}

/// Row labels top-down; highlighted subjects take their highlight color in bold
fn row_labels(
    frame: &Frame,
    rows: &RowOrder,
    directive: &VisualizationDirective,
    theme: &ChartTheme,
) -> Vec<RowLabel> {
    rows.top_down()
        .map(|(row, subject)| {
            let highlight = directive.highlight_for(subject);
            RowLabel {
                subject: subject.to_string(),
                row,
                label: frame.row_label(row, subject),
                color: highlight
                    .map(|h| h.color.clone())
                    .unwrap_or_else(|| theme.text_color.clone()),
                bold: highlight.is_some(),
            }
        })
        .collect()
}

impl Renderer for TimelineChart {
    type Output = ChartArtifact;

    fn render(&self, dataset: &TimelineDataset) -> Result<ChartArtifact, RenderError> {
        self.compose(dataset)
    }
}

/// Compose a chart with default layout and light theme
pub fn render(dataset: &TimelineDataset) -> Result<ChartArtifact, RenderError> {
    TimelineChart::default().compose(dataset)
}

/// Serializes the chart artifact as JSON
#[derive(Clone, Debug)]
pub struct JsonRenderer {
    pub chart: TimelineChart,
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self {
            chart: TimelineChart::default(),
            pretty: true,
        }
    }
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(mut self, chart: TimelineChart) -> Self {
        self.chart = chart;
        self
    }

    /// Single-line output
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn draw(&self, artifact: &ChartArtifact) -> Result<String, RenderError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(artifact)
        } else {
            serde_json::to_string(artifact)
        };
        result.map_err(|e| RenderError::Format(format!("Failed to serialize chart: {}", e)))
    }
}

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, dataset: &TimelineDataset) -> Result<String, RenderError> {
        self.draw(&self.chart.compose(dataset)?)
    }
}

/// HTML-escape a string
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
