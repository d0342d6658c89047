//! Row assignment: which subject occupies which lane
//!
//! Row indices count from the bottom of the plot. The first subject in
//! logical order therefore gets the highest index so it is drawn at the top.
//! Subjects named by a highlight directive are clustered after the
//! unflagged ones, which puts them together at the bottom of the chart.

use hubble_core::{DatedEvent, SortStrategy, VisualizationDirective};
use std::collections::{HashMap, HashSet};

/// Distinct subjects in final row-index order (index 0 = bottom row)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowOrder {
    subjects: Vec<String>,
    index: HashMap<String, usize>,
}

impl RowOrder {
    /// Build the row order for a set of interval events.
    ///
    /// The focus filter is applied to the events before distinct subjects
    /// are collected, so an unfocused actor never claims a row.
    pub fn build(intervals: &[DatedEvent<'_>], directive: Option<&VisualizationDirective>) -> Self {
        let focus = directive.and_then(VisualizationDirective::active_focus);

        let mut seen: HashSet<&str> = HashSet::new();
        let mut distinct: Vec<&str> = Vec::new();
        for event in intervals {
            let actor = event.actor();
            if focus.is_some_and(|f| !f.contains(actor)) {
                continue;
            }
            if seen.insert(actor) {
                distinct.push(actor);
            }
        }

        let strategy = directive.map(|d| d.sort_strategy).unwrap_or_default();
        if strategy != SortStrategy::Chronological {
            tracing::debug!(?strategy, "sort strategy has no distinct ordering; using chronological");
        }

        let logical: Vec<&str> = match directive {
            Some(d) if !d.highlights.is_empty() => {
                let (flagged, unflagged): (Vec<&str>, Vec<&str>) =
                    distinct.into_iter().partition(|s| d.is_highlighted(s));
                unflagged.into_iter().chain(flagged).collect()
            }
            _ => distinct,
        };

        let subjects: Vec<String> = logical.into_iter().rev().map(str::to_string).collect();
        let index = subjects
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();

        Self { subjects, index }
    }

    /// Row index of a subject (0 = bottom)
    pub fn index_of(&self, subject: &str) -> Option<usize> {
        self.index.get(subject).copied()
    }

    /// Subjects by row index, bottom row first
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    /// Subjects as they read on the chart, top row first
    pub fn top_down(&self) -> impl Iterator<Item = (usize, &str)> {
        self.subjects
            .iter()
            .enumerate()
            .rev()
            .map(|(i, s)| (i, s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
