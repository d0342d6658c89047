//! Standalone HTML page with hover tooltips
//!
//! The page embeds the same SVG drawing as [`SvgRenderer`](crate::SvgRenderer)
//! and attaches tooltip text from a JSON table keyed by bar and milestone
//! index. Tooltip lines are inserted as text nodes, never as markup.

use crate::scene::ChartArtifact;
use crate::{html_escape, svg_render, TimelineChart};
use hubble_core::{RenderError, Renderer, TimelineDataset};

/// Interactive HTML timeline renderer
#[derive(Clone, Debug, Default)]
pub struct HtmlRenderer {
    pub chart: TimelineChart,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chart(mut self, chart: TimelineChart) -> Self {
        self.chart = chart;
        self
    }

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.chart = self.chart.dark_theme();
        self
    }

    pub fn draw(&self, artifact: &ChartArtifact) -> Result<String, RenderError> {
        let mut svg_bytes = Vec::new();
        svg::write(&mut svg_bytes, &svg_render::document(artifact))
            .map_err(|e| RenderError::Format(format!("Failed to write SVG: {}", e)))?;
        let svg_content = String::from_utf8(svg_bytes)
            .map_err(|e| RenderError::Format(format!("Invalid UTF-8: {}", e)))?;

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Timeline</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="timeline-container">
{svg_content}
    </div>
    <div id="tooltip" class="tooltip"></div>
    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(&artifact.header.title.text),
            css = generate_css(artifact),
            svg_content = svg_content,
            js = generate_js(artifact)?,
        ))
    }
}

impl Renderer for HtmlRenderer {
    type Output = String;

    fn render(&self, dataset: &TimelineDataset) -> Result<String, RenderError> {
        self.draw(&self.chart.compose(dataset)?)
    }
}

fn generate_css(artifact: &ChartArtifact) -> String {
    let theme = &artifact.theme;
    format!(
        r#"        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: {font};
            background: {paper};
            color: {text};
            padding: 20px;
        }}
        .timeline-container {{
            max-width: 100%;
            overflow-x: auto;
        }}
        .bar {{
            cursor: pointer;
            transition: fill-opacity 0.2s;
        }}
        .bar:hover {{
            fill-opacity: 1;
        }}
        .milestone {{
            cursor: pointer;
        }}
        .tooltip {{
            position: fixed;
            background: rgba(0,0,0,0.9);
            color: white;
            padding: 12px;
            border-radius: 6px;
            font-size: 13px;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.2s;
            z-index: 1000;
            max-width: 360px;
        }}
        .tooltip.visible {{
            opacity: 1;
        }}
        .tooltip .tooltip-title {{
            font-weight: 600;
            margin-bottom: 6px;
        }}"#,
        font = theme.font_family,
        paper = theme.paper_color,
        text = theme.text_color,
    )
}

/// Tooltip table as a JS literal, safe to inline in a `<script>` block
fn tooltip_data(artifact: &ChartArtifact) -> Result<String, RenderError> {
    let bars: Vec<&Vec<String>> = artifact.bars.iter().map(|b| &b.tooltip).collect();
    let milestones: Vec<&Vec<String>> = artifact.milestones.iter().map(|m| &m.tooltip).collect();

    let json = serde_json::to_string(&serde_json::json!({
        "bar": bars,
        "milestone": milestones,
    }))
    .map_err(|e| RenderError::Format(format!("Failed to serialize tooltips: {}", e)))?;

    Ok(json.replace("</", "<\\/"))
}

fn generate_js(artifact: &ChartArtifact) -> Result<String, RenderError> {
    Ok(format!(
        r#"        const tooltipData = {data};
        const tooltip = document.getElementById('tooltip');

        function showTooltip(lines) {{
            tooltip.replaceChildren();
            lines.forEach((line, i) => {{
                const row = document.createElement('div');
                if (i === 0) row.className = 'tooltip-title';
                row.textContent = line;
                tooltip.appendChild(row);
            }});
            tooltip.classList.add('visible');
        }}

        ['bar', 'milestone'].forEach(kind => {{
            document.querySelectorAll(`[data-${{kind}}]`).forEach(el => {{
                el.addEventListener('mouseenter', () => {{
                    const lines = tooltipData[kind][Number(el.getAttribute(`data-${{kind}}`))];
                    if (lines) showTooltip(lines);
                }});

                el.addEventListener('mousemove', (e) => {{
                    tooltip.style.left = (e.clientX + 15) + 'px';
                    tooltip.style.top = (e.clientY + 15) + 'px';
                }});

                el.addEventListener('mouseleave', () => {{
                    tooltip.classList.remove('visible');
                }});
            }});
        }});"#,
        data = tooltip_data(artifact)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubble_core::{CaseMetadata, Event};

    fn dataset() -> TimelineDataset {
        TimelineDataset::new(CaseMetadata::new("Board Turnover"))
            .event(
                Event::interval("Alice", "Exec", "2019-01", "2021-06")
                    .context("Left before </script> hearing"),
            )
            .event(Event::point("Regulator", "subpoena", "2020-09-01"))
    }

    #[test]
    fn html_renderer_produces_valid_html() {
        let html = HtmlRenderer::new().render(&dataset()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Board Turnover - Timeline</title>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("id=\"tooltip\""));
    }

    #[test]
    fn tooltips_are_embedded_as_data() {
        let html = HtmlRenderer::new().render(&dataset()).unwrap();
        assert!(html.contains("const tooltipData"));
        assert!(html.contains("Role: Exec"));
        assert!(html.contains("Date: 2020-09-01"));
    }

    #[test]
    fn script_close_tag_in_data_is_neutralized() {
        let html = HtmlRenderer::new().render(&dataset()).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains("<\\/script>"));
    }

    #[test]
    fn hover_only_no_toolbar() {
        let html = HtmlRenderer::new().render(&dataset()).unwrap();
        assert!(!html.contains("<button"));
        assert!(html.contains("mouseenter"));
    }

    #[test]
    fn dark_theme_changes_page_colors() {
        let html = HtmlRenderer::new().dark_theme().render(&dataset()).unwrap();
        assert!(html.contains("#16213e"));
    }
}
