//! Split events into bars and milestones, then apply directive filters

use hubble_core::{DatedEvent, RenderError, VisualizationDirective};

/// Events partitioned by shape, input order preserved in each half
#[derive(Clone, Debug, Default)]
pub struct Classified<'a> {
    /// Events with an end date (bars)
    pub intervals: Vec<DatedEvent<'a>>,
    /// Events without an end date (milestone markers)
    pub points: Vec<DatedEvent<'a>>,
}

/// Partition purely on presence of an end date.
///
/// The `milestone` flag is not consulted: an event with no end is a point
/// even when unflagged.
pub fn classify<'a>(events: &[DatedEvent<'a>]) -> Classified<'a> {
    let (intervals, points): (Vec<_>, Vec<_>) =
        events.iter().copied().partition(|e| e.is_interval());
    Classified { intervals, points }
}

impl<'a> Classified<'a> {
    /// Apply the directive's focus and key-milestone filters.
    ///
    /// Fails with `NoIntervalEvents` when no bar survives, since a chart
    /// without rows cannot be laid out.
    pub fn filter(self, directive: &VisualizationDirective) -> Result<Self, RenderError> {
        let Self {
            mut intervals,
            mut points,
        } = self;

        if let Some(focus) = directive.active_focus() {
            intervals.retain(|e| focus.contains(e.actor()));
            tracing::debug!(
                focus = focus.len(),
                kept = intervals.len(),
                "applied focus filter"
            );
        }

        if let Some(keys) = directive.active_key_milestones() {
            points.retain(|e| keys.contains(&e.event.action));
        }

        if intervals.is_empty() {
            return Err(RenderError::NoIntervalEvents);
        }

        Ok(Self { intervals, points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubble_core::{CaseMetadata, Event, TimelineDataset};

    fn dataset() -> TimelineDataset {
        let mut unflagged_point = Event::point("Board", "vote", "2021-02");
        unflagged_point.milestone = false;

        TimelineDataset::new(CaseMetadata::new("t"))
            .event(Event::interval("Alice", "Exec", "2019", "2021"))
            .event(Event::point("FDA", "inquiry", "2020-03"))
            .event(Event::interval("Bob", "Exec", "2020", "2022"))
            .event(unflagged_point)
    }

    #[test]
    fn partitions_by_end_presence() {
        let ds = dataset();
        let dated = ds.dated_events().unwrap();
        let classified = classify(&dated);

        let bars: Vec<&str> = classified.intervals.iter().map(|e| e.actor()).collect();
        let points: Vec<&str> = classified.points.iter().map(|e| e.actor()).collect();
        assert_eq!(bars, ["Alice", "Bob"]);
        assert_eq!(points, ["FDA", "Board"]);
    }

    #[test]
    fn focus_filter_keeps_named_actors() {
        let ds = dataset();
        let dated = ds.dated_events().unwrap();
        let directive = VisualizationDirective::default().focus(["Bob"]);

        let filtered = classify(&dated).filter(&directive).unwrap();
        assert_eq!(filtered.intervals.len(), 1);
        assert_eq!(filtered.intervals[0].actor(), "Bob");
        // points are not subject to focus
        assert_eq!(filtered.points.len(), 2);
    }

    #[test]
    fn key_milestones_filter_points_by_action() {
        let ds = dataset();
        let dated = ds.dated_events().unwrap();
        let directive = VisualizationDirective::default().key_milestones(["vote"]);

        let filtered = classify(&dated).filter(&directive).unwrap();
        assert_eq!(filtered.points.len(), 1);
        assert_eq!(filtered.points[0].event.action, "vote");
    }

    #[test]
    fn focus_excluding_everything_is_an_error() {
        let ds = dataset();
        let dated = ds.dated_events().unwrap();
        let directive = VisualizationDirective::default().focus(["Nobody"]);

        assert!(matches!(
            classify(&dated).filter(&directive),
            Err(RenderError::NoIntervalEvents)
        ));
    }

    #[test]
    fn only_points_is_an_error() {
        let ds = TimelineDataset::new(CaseMetadata::new("t"))
            .event(Event::point("FDA", "inquiry", "2020"));
        let dated = ds.dated_events().unwrap();
        assert!(matches!(
            classify(&dated).filter(&VisualizationDirective::default()),
            Err(RenderError::NoIntervalEvents)
        ));
    }
}
