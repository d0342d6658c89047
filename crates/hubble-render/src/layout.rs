//! Layout engine: time scale, row bands, and the drawing frame
//!
//! The plot area sits right of a label column and below the header block.
//! Time maps linearly onto the plot width; each subject owns a horizontal
//! band and its bars fill the central part of that band.

use crate::classify::Classified;
use crate::rows::RowOrder;
use crate::scene::{Anchor, AxisTick, Rect, Segment, TextItem};
use chrono::{Datelike, Duration, NaiveDate};

/// Canvas geometry configuration
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Total canvas width in pixels
    pub width: f64,
    /// Width of the subject label column left of the plot
    pub label_width: f64,
    pub margin_right: f64,
    /// Space above the plot for header, legend and milestone labels
    pub margin_top: f64,
    /// Space below the plot for axis labels and footer
    pub margin_bottom: f64,
    /// Preferred height of one row band
    pub row_height: f64,
    /// Fraction of a band covered by its bars
    pub bar_ratio: f64,
    /// Canvas never gets shorter than this
    pub min_height: f64,
    /// Axis span used when every date collapses to one day
    pub min_span_days: i64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            label_width: 350.0,
            margin_right: 100.0,
            margin_top: 240.0,
            margin_bottom: 130.0,
            row_height: 60.0,
            bar_ratio: 0.5,
            min_height: 600.0,
            min_span_days: 30,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure total canvas width
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Configure row band height
    pub fn row_height(mut self, height: f64) -> Self {
        self.row_height = height;
        self
    }

    /// Configure the bar share of a band, clamped to 40-60 %
    pub fn bar_ratio(mut self, ratio: f64) -> Self {
        self.bar_ratio = ratio.clamp(0.4, 0.6);
        self
    }

    /// Width available to the time axis
    pub fn plot_width(&self) -> f64 {
        (self.width - self.label_width - self.margin_right).max(1.0)
    }

    /// Lay out the plot for the given events and row order.
    pub fn frame(&self, classified: &Classified<'_>, rows: &RowOrder) -> Frame {
        let row_count = rows.len().max(1);
        let min_plot_height = self.min_height - self.margin_top - self.margin_bottom;
        let plot_height = (row_count as f64 * self.row_height).max(min_plot_height);

        let plot = Rect {
            x: self.label_width,
            y: self.margin_top,
            width: self.plot_width(),
            height: plot_height,
        };

        let (start, end) = axis_domain(classified, self.min_span_days);
        let scale = TimeScale::new(start, end, plot.x, plot.right());

        let bands = RowBands {
            top: plot.y,
            band: plot_height / row_count as f64,
            rows: row_count,
            bar_ratio: self.bar_ratio,
        };

        Frame {
            width: self.width,
            height: self.margin_top + plot_height + self.margin_bottom,
            plot,
            scale,
            bands,
        }
    }
}

/// Axis extent: bars set the range, milestones may extend it.
///
/// A single-instant range is widened symmetrically to `min_span_days`.
fn axis_domain(classified: &Classified<'_>, min_span_days: i64) -> (NaiveDate, NaiveDate) {
    let starts = classified.intervals.iter().map(|e| e.start);
    let ends = classified.intervals.iter().filter_map(|e| e.end);
    let points = classified.points.iter().map(|e| e.start);

    let all: Vec<NaiveDate> = starts.chain(ends).chain(points).collect();
    let (mut start, mut end) = match (all.iter().min(), all.iter().max()) {
        (Some(min), Some(max)) => (*min, *max),
        _ => {
            let epoch = NaiveDate::default();
            (epoch, epoch)
        }
    };

    if start == end {
        let half = (min_span_days.max(2) / 2).max(1);
        tracing::debug!(%start, half, "degenerate time axis; widening");
        start -= Duration::days(half);
        end += Duration::days(half);
    }

    (start, end)
}

/// Linear mapping from calendar dates to x pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub start: NaiveDate,
    pub end: NaiveDate,
    x0: f64,
    x1: f64,
}

impl TimeScale {
    pub fn new(start: NaiveDate, end: NaiveDate, x0: f64, x1: f64) -> Self {
        Self { start, end, x0, x1 }
    }

    /// Length of the domain in days, at least 1
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }

    /// Convert a date to an x position
    pub fn x(&self, date: NaiveDate) -> f64 {
        let days = (date - self.start).num_days() as f64;
        round2(self.x0 + days / self.span_days() as f64 * (self.x1 - self.x0))
    }

    /// Month step between ticks, picked from the span
    pub fn tick_months(&self) -> i32 {
        let days = self.span_days();
        if days <= 3 * 365 {
            3
        } else if days <= 8 * 365 {
            6
        } else if days <= 20 * 365 {
            12
        } else {
            60
        }
    }

    /// Calendar-aligned tick dates inside the domain.
    ///
    /// Ticks fall on the first of a month whose absolute month number is a
    /// multiple of the step, so quarterly ticks land on Jan/Apr/Jul/Oct.
    pub fn ticks(&self) -> Vec<NaiveDate> {
        let step = self.tick_months();
        let mut index = month_index(self.start);
        if self.start.day() != 1 {
            index += 1;
        }
        let rem = index.rem_euclid(step);
        if rem != 0 {
            index += step - rem;
        }

        let mut ticks = Vec::new();
        while let Some(date) = month_start(index) {
            if date > self.end {
                break;
            }
            ticks.push(date);
            index += step;
        }
        ticks
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn month_start(index: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

/// Vertical bands, one per row; index 0 is the bottom band
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowBands {
    pub top: f64,
    pub band: f64,
    pub rows: usize,
    pub bar_ratio: f64,
}

impl RowBands {
    /// Top edge of a row's band
    pub fn band_top(&self, row: usize) -> f64 {
        let from_top = self.rows.saturating_sub(row + 1);
        round2(self.top + from_top as f64 * self.band)
    }

    pub fn center(&self, row: usize) -> f64 {
        round2(self.band_top(row) + self.band / 2.0)
    }

    /// (y, height) of the bar lane inside a band
    pub fn bar_lane(&self, row: usize) -> (f64, f64) {
        let height = self.band * self.bar_ratio;
        (round2(self.center(row) - height / 2.0), round2(height))
    }

    pub fn bottom(&self) -> f64 {
        round2(self.top + self.rows as f64 * self.band)
    }

    /// y of every band boundary, top to bottom (`rows + 1` values)
    pub fn boundaries(&self) -> Vec<f64> {
        (0..=self.rows)
            .map(|k| round2(self.top + k as f64 * self.band))
            .collect()
    }
}

/// Resolved canvas: plot rectangle, time scale, and row bands
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub plot: Rect,
    pub scale: TimeScale,
    pub bands: RowBands,
}

/// Bar rectangle plus the anchor of its duration label
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
    pub rect: Rect,
    pub label_x: f64,
    pub label_y: f64,
}

impl Frame {
    pub fn bar(&self, row: usize, start: NaiveDate, end: NaiveDate) -> BarGeometry {
        let x0 = self.scale.x(start);
        let x1 = self.scale.x(end);
        let (y, height) = self.bands.bar_lane(row);

        // The scale is linear, so the time midpoint is the pixel midpoint
        let label_x = round2((x0 + x1) / 2.0);

        BarGeometry {
            rect: Rect {
                x: x0,
                y,
                width: round2(x1 - x0),
                height,
            },
            label_x,
            label_y: self.bands.center(row),
        }
    }

    /// Full-height marker line and its rotated label above the top row
    pub fn milestone(&self, date: NaiveDate, action: &str) -> (Segment, TextItem) {
        let x = self.scale.x(date);
        let line = Segment {
            x1: x,
            y1: round2(self.plot.y - 20.0),
            x2: x,
            y2: self.bands.bottom(),
        };
        let label = TextItem::new(action, round2(x + 5.0), round2(self.plot.y - 25.0), Anchor::Start)
            .rotated(-45.0);
        (line, label)
    }

    /// Subject label position for a row, right-aligned against the plot
    pub fn row_label(&self, row: usize, subject: &str) -> TextItem {
        TextItem::new(subject, round2(self.plot.x - 10.0), self.bands.center(row), Anchor::End)
    }

    /// Lane boundaries spanning the label column and plot
    pub fn separators(&self) -> Vec<Segment> {
        self.bands
            .boundaries()
            .into_iter()
            .map(|y| Segment {
                x1: 0.0,
                y1: y,
                x2: self.plot.right(),
                y2: y,
            })
            .collect()
    }

    pub fn ticks(&self) -> Vec<AxisTick> {
        let label_y = round2(self.bands.bottom() + 16.0);
        self.scale
            .ticks()
            .into_iter()
            .map(|date| {
                let x = self.scale.x(date);
                AxisTick {
                    date,
                    x,
                    label: TextItem::new(date.format("%b %Y").to_string(), x, label_y, Anchor::End)
                        .rotated(-45.0),
                }
            })
            .collect()
    }

    pub fn gridlines(&self, ticks: &[AxisTick]) -> Vec<Segment> {
        ticks
            .iter()
            .map(|t| Segment {
                x1: t.x,
                y1: self.plot.y,
                x2: t.x,
                y2: self.bands.bottom(),
            })
            .collect()
    }
}

/// Round to hundredths so output stays compact and stable
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
