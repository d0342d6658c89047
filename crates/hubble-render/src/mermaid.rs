//! MermaidJS gantt output
//!
//! Text charts for embedding in Markdown briefs and wikis. One section per
//! subject in chart order, highlighted bars marked `crit`, and a trailing
//! section for milestones.
//!
//! ## Example Output
//!
//! ```text
//! gantt
//!     title NovExa Leadership
//!     dateFormat YYYY-MM-DD
//!
//!     section Marcus Hale
//!     served as CFO :crit, e0, 2019-01-01, 2023-04-03
//!
//!     section Milestones
//!     informal inquiry :milestone, e3, 2023-03-15, 0d
//! ```

use crate::scene::ChartArtifact;
use crate::TimelineChart;
use hubble_core::{RenderError, Renderer, TimelineDataset};

/// MermaidJS gantt renderer
#[derive(Clone, Debug)]
pub struct MermaidRenderer {
    pub chart: TimelineChart,
    /// Mark highlighted bars with `crit`
    pub show_highlights: bool,
    /// Emit the milestones section
    pub show_milestones: bool,
}

impl Default for MermaidRenderer {
    fn default() -> Self {
        Self {
            chart: TimelineChart::default(),
            show_highlights: true,
            show_milestones: true,
        }
    }
}

impl MermaidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable `crit` marking of highlighted bars
    pub fn no_highlights(mut self) -> Self {
        self.show_highlights = false;
        self
    }

    /// Leave milestones out
    pub fn no_milestones(mut self) -> Self {
        self.show_milestones = false;
        self
    }

    /// Sanitize a label for Mermaid (colons and hashes break task lines)
    fn sanitize_name(name: &str) -> String {
        name.replace(':', "-")
            .replace(';', "-")
            .replace('#', "")
            .replace('\n', " ")
            .replace('\r', "")
    }

    pub fn draw(&self, artifact: &ChartArtifact) -> String {
        let mut output = String::new();

        output.push_str("gantt\n");
        output.push_str(&format!(
            "    title {}\n",
            Self::sanitize_name(&artifact.header.title.text)
        ));
        output.push_str("    dateFormat YYYY-MM-DD\n");
        output.push('\n');

        for row in &artifact.rows {
            output.push_str(&format!("    section {}\n", Self::sanitize_name(&row.subject)));
            for bar in artifact.bars.iter().filter(|b| b.row == row.row) {
                let label = if bar.action.is_empty() {
                    &bar.category
                } else {
                    &bar.action
                };

                let mut parts = Vec::new();
                if self.show_highlights && bar.annotation.is_some() {
                    parts.push("crit".to_string());
                }
                parts.push(format!("e{}", bar.event));
                parts.push(bar.start.format("%Y-%m-%d").to_string());
                parts.push(bar.end.format("%Y-%m-%d").to_string());

                output.push_str(&format!(
                    "    {} :{}\n",
                    Self::sanitize_name(label),
                    parts.join(", ")
                ));
            }
            output.push('\n');
        }

        if self.show_milestones && !artifact.milestones.is_empty() {
            output.push_str("    section Milestones\n");
            for milestone in &artifact.milestones {
                output.push_str(&format!(
                    "    {} :milestone, e{}, {}, 0d\n",
                    Self::sanitize_name(&milestone.action),
                    milestone.event,
                    milestone.date.format("%Y-%m-%d")
                ));
            }
            output.push('\n');
        }

        output
    }
}

impl Renderer for MermaidRenderer {
    type Output = String;

    fn render(&self, dataset: &TimelineDataset) -> Result<String, RenderError> {
        Ok(self.draw(&self.chart.compose(dataset)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubble_core::{CaseMetadata, Event, HighlightDirective, VisualizationDirective};
    use pretty_assertions::assert_eq;

    fn dataset() -> TimelineDataset {
        TimelineDataset::new(CaseMetadata::new("NovExa: Leadership"))
            .event(
                Event::interval("Marcus Hale", "Financial Leadership", "2019", "2023-04-03")
                    .action("served as CFO"),
            )
            .event(Event::interval("Dana Ortiz", "Legal", "2020-02", "2024"))
            .event(Event::point("FDA", "informal inquiry", "2023-03-15"))
            .visualization(
                VisualizationDirective::default()
                    .highlight(HighlightDirective::new("Marcus Hale", "#ef4444", "x")),
            )
    }

    #[test]
    fn mermaid_output_matches_chart_order() {
        let output = MermaidRenderer::new().render(&dataset()).unwrap();
        assert_eq!(
            output,
            "gantt\n\
             \x20   title NovExa- Leadership\n\
             \x20   dateFormat YYYY-MM-DD\n\
             \n\
             \x20   section Dana Ortiz\n\
             \x20   Legal :e1, 2020-02-01, 2024-01-01\n\
             \n\
             \x20   section Marcus Hale\n\
             \x20   served as CFO :crit, e0, 2019-01-01, 2023-04-03\n\
             \n\
             \x20   section Milestones\n\
             \x20   informal inquiry :milestone, e2, 2023-03-15, 0d\n\
             \n"
        );
    }

    #[test]
    fn switches_drop_crit_and_milestones() {
        let output = MermaidRenderer::new()
            .no_highlights()
            .no_milestones()
            .render(&dataset())
            .unwrap();
        assert!(!output.contains("crit"));
        assert!(!output.contains("Milestones"));
    }

    #[test]
    fn sanitize_strips_mermaid_syntax() {
        assert_eq!(MermaidRenderer::sanitize_name("a:b;c#d\ne"), "a-b-cd e");
    }
}
