//! Static SVG backend
//!
//! Draws a [`ChartArtifact`] element by element. Every position comes from
//! the artifact; this module only decides paint order and styling.

use crate::scene::{ChartArtifact, Segment, TextItem};
use crate::TimelineChart;
use hubble_core::{RenderError, Renderer, TimelineDataset};
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::Document;

/// SVG timeline renderer
#[derive(Clone, Debug, Default)]
pub struct SvgRenderer {
    pub chart: TimelineChart,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(mut self, chart: TimelineChart) -> Self {
        self.chart = chart;
        self
    }

    /// Serialize an already composed chart
    pub fn draw(&self, artifact: &ChartArtifact) -> Result<String, RenderError> {
        let mut output = Vec::new();
        svg::write(&mut output, &document(artifact))
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;

        String::from_utf8(output).map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, dataset: &TimelineDataset) -> Result<String, RenderError> {
        self.draw(&self.chart.compose(dataset)?)
    }
}

/// Build the SVG document tree for a chart
pub fn document(chart: &ChartArtifact) -> Document {
    let theme = &chart.theme;

    Document::new()
        .set("width", chart.width)
        .set("height", chart.height)
        .set("viewBox", (0.0, 0.0, chart.width, chart.height))
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("font-family", theme.font_family.as_str())
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", theme.paper_color.as_str()),
        )
        .add(
            Rectangle::new()
                .set("x", chart.plot.x)
                .set("y", chart.plot.y)
                .set("width", chart.plot.width)
                .set("height", chart.plot.height)
                .set("fill", theme.background_color.as_str()),
        )
        .add(render_grid(chart))
        .add(render_rows(chart))
        .add(render_bars(chart))
        .add(render_milestones(chart))
        .add(render_axis(chart))
        .add(render_header(chart))
        .add(render_legend(chart))
        .add(render_footer(chart))
}

fn line(segment: &Segment, stroke: &str) -> Line {
    Line::new()
        .set("x1", segment.x1)
        .set("y1", segment.y1)
        .set("x2", segment.x2)
        .set("y2", segment.y2)
        .set("stroke", stroke)
        .set("stroke-width", 1)
}

fn text(item: &TextItem, size: u32, fill: &str) -> Text {
    let mut node = Text::new(item.text.as_str())
        .set("x", item.x)
        .set("y", item.y)
        .set("font-size", size)
        .set("fill", fill)
        .set("text-anchor", item.anchor.as_str());
    if item.rotate != 0.0 {
        node = node.set(
            "transform",
            format!("rotate({} {} {})", item.rotate, item.x, item.y),
        );
    }
    node
}

fn render_grid(chart: &ChartArtifact) -> Group {
    let theme = &chart.theme;
    let mut group = Group::new().set("class", "grid");

    for segment in &chart.gridlines {
        group = group.add(line(segment, &theme.grid_color));
    }
    for segment in &chart.separators {
        group = group.add(line(segment, &theme.separator_color));
    }
    group
}

fn render_rows(chart: &ChartArtifact) -> Group {
    let mut group = Group::new().set("class", "row-labels");
    for row in &chart.rows {
        let weight = if row.bold { "bold" } else { "normal" };
        group = group.add(
            text(&row.label, 12, &row.color)
                .set("font-weight", weight)
                .set("dominant-baseline", "middle"),
        );
    }
    group
}

fn render_bars(chart: &ChartArtifact) -> Group {
    let theme = &chart.theme;
    let mut group = Group::new().set("class", "bars");

    for (i, bar) in chart.bars.iter().enumerate() {
        let rect = Rectangle::new()
            .set("class", "bar")
            .set("data-bar", i.to_string())
            .set("x", bar.rect.x)
            .set("y", bar.rect.y)
            .set("width", bar.rect.width)
            .set("height", bar.rect.height)
            .set("rx", 3)
            .set("ry", 3)
            .set("fill", bar.color.as_str())
            .set("fill-opacity", 0.85)
            .set("stroke", theme.bar_stroke_color.as_str())
            .set("stroke-width", 1.5);

        let label = text(&bar.duration, 10, &theme.duration_label_color)
            .set("font-weight", "600")
            .set("dominant-baseline", "middle")
            .set("pointer-events", "none");

        group = group.add(rect).add(label);
    }
    group
}

fn render_milestones(chart: &ChartArtifact) -> Group {
    let theme = &chart.theme;
    let mut group = Group::new().set("class", "milestones");

    for (i, milestone) in chart.milestones.iter().enumerate() {
        let marker = line(&milestone.line, &theme.milestone_color)
            .set("class", "milestone")
            .set("data-milestone", i.to_string())
            .set("stroke-width", 1.5)
            .set("stroke-dasharray", "4,4");
        let label = text(&milestone.label, 10, &theme.milestone_label_color);
        group = group.add(marker).add(label);
    }
    group
}

fn render_axis(chart: &ChartArtifact) -> Group {
    let mut group = Group::new().set("class", "axis");
    for tick in &chart.axis.ticks {
        group = group.add(text(&tick.label, 10, &chart.theme.muted_text_color));
    }
    group
}

fn render_header(chart: &ChartArtifact) -> Group {
    let theme = &chart.theme;
    let header = &chart.header;
    let mut group = Group::new()
        .set("class", "header")
        .add(text(&header.title, 20, &theme.text_color).set("font-weight", "bold"));

    if let Some(subtitle) = &header.subtitle {
        group = group.add(text(subtitle, 13, &theme.muted_text_color));
    }
    if let Some(stats) = &header.stats {
        group = group.add(text(stats, 11, &theme.muted_text_color));
    }
    group
}

fn render_legend(chart: &ChartArtifact) -> Group {
    let mut group = Group::new().set("class", "legend");
    for entry in &chart.legend {
        let swatch = Rectangle::new()
            .set("x", entry.swatch.x)
            .set("y", entry.swatch.y)
            .set("width", entry.swatch.width)
            .set("height", entry.swatch.height)
            .set("rx", 2)
            .set("fill", entry.color.as_str());
        group = group
            .add(swatch)
            .add(text(&entry.text, 9, &chart.theme.muted_text_color));
    }
    group
}

fn render_footer(chart: &ChartArtifact) -> Group {
    let mut group = Group::new().set("class", "footer");
    if let Some(footer) = &chart.footer {
        group = group.add(text(footer, 10, &chart.theme.muted_text_color).set("font-style", "italic"));
    }
    group
}
