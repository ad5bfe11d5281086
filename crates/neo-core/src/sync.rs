//! Render-pass orchestration: one fetched dataset and one threshold
//! drive every view, and a newer pass always wins over a slower older
//! one.

use tracing::{debug, error};

use crate::error::PassError;
use crate::record::{validate_batch, RawRecord};
use crate::view::{build_bar_chart, build_scatter, build_table, RenderContext};

/// How a completed pass was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// Views now show the fetched dataset.
    Applied,
    /// Zero records survived validation; views show the empty state.
    AppliedEmpty,
    /// An earlier fetch finished after a newer pass; discarded.
    Stale,
    /// The fetch failed; the previous render stays visible.
    Failed,
}

/// Hands out monotonically increasing render generations and applies
/// completed passes in request order. Generation 0 means nothing has
/// completed yet.
#[derive(Debug, Default)]
pub struct ViewSynchronizer {
    next_generation: u64,
    last_completed: u64,
}

impl ViewSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render pass and get its generation token. Overlapping
    /// passes are allowed; completion decides who wins.
    pub fn begin_pass(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Apply a completed fetch to the render context. A pass whose
    /// token is not newer than the last completed one is discarded, so
    /// a slow stale response can never overwrite a faster later one.
    pub fn complete_pass(
        &mut self,
        generation: u64,
        fetched: Result<Vec<RawRecord>, PassError>,
        threshold: f64,
        ctx: &mut impl RenderContext,
    ) -> PassOutcome {
        if generation <= self.last_completed {
            debug!(generation, latest = self.last_completed, "discarding stale render pass");
            return PassOutcome::Stale;
        }
        self.last_completed = generation;

        let raw = match fetched {
            Ok(raw) => raw,
            Err(err) => {
                error!(generation, "render pass failed: {err}");
                return PassOutcome::Failed;
            }
        };

        apply_dataset(raw, threshold, ctx)
    }

    /// Re-apply an already-fetched dataset, typically after a
    /// threshold change. No generation is consumed and the completion
    /// bookkeeping is untouched, so a fetch still in flight can land
    /// afterwards.
    pub fn rerender(
        &self,
        raw: Vec<RawRecord>,
        threshold: f64,
        ctx: &mut impl RenderContext,
    ) -> PassOutcome {
        apply_dataset(raw, threshold, ctx)
    }
}

fn apply_dataset(
    raw: Vec<RawRecord>,
    threshold: f64,
    ctx: &mut impl RenderContext,
) -> PassOutcome {
    let records = validate_batch(raw);
    if records.is_empty() {
        ctx.clear_all();
        return PassOutcome::AppliedEmpty;
    }

    ctx.replace_table(build_table(&records, threshold));
    ctx.replace_bar_chart(build_bar_chart(&records));
    ctx.replace_scatter(build_scatter(&records));
    PassOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PairComponents;
    use crate::risk::{HIGH_TIER_COLOR, ROW_ABOVE_THRESHOLD};
    use crate::view::{BarChartModel, ScatterPlotModel, TableModel};

    #[derive(Default)]
    struct RecordingContext {
        table: Option<TableModel>,
        bars: Option<BarChartModel>,
        scatter: Option<ScatterPlotModel>,
        clears: usize,
        replaces: usize,
    }

    impl RenderContext for RecordingContext {
        fn replace_table(&mut self, table: TableModel) {
            self.table = Some(table);
            self.replaces += 1;
        }
        fn replace_bar_chart(&mut self, chart: BarChartModel) {
            self.bars = Some(chart);
            self.replaces += 1;
        }
        fn replace_scatter(&mut self, plot: ScatterPlotModel) {
            self.scatter = Some(plot);
            self.replaces += 1;
        }
        fn clear_all(&mut self) {
            self.table = None;
            self.bars = None;
            self.scatter = None;
            self.clears += 1;
        }
    }

    fn raw(name: &str, score: f64, miss_distance_km: f64) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            date: None,
            hazardous: false,
            pair_risk_score: score,
            pair_components: PairComponents {
                impact_probability: 0.1,
                impact_severity: 0.9,
            },
            miss_distance_km: Some(miss_distance_km),
            diameter_m: Some(50.0),
            velocity_kph: None,
        }
    }

    #[test]
    fn high_score_record_highlights_and_colors_consistently() {
        // Scenario A: score 75 at threshold 70.
        let mut sync = ViewSynchronizer::new();
        let mut ctx = RecordingContext::default();
        let generation = sync.begin_pass();
        let outcome =
            sync.complete_pass(generation, Ok(vec![raw("X", 75.0, 1_000.0)]), 70.0, &mut ctx);
        assert_eq!(outcome, PassOutcome::Applied);

        let table = ctx.table.unwrap();
        assert!(table.rows[0].highlighted);
        assert_eq!(table.rows[0].fill, ROW_ABOVE_THRESHOLD);
        assert_eq!(ctx.bars.unwrap().bars[0].fill, HIGH_TIER_COLOR);
    }

    #[test]
    fn malformed_only_dataset_clears_all_views() {
        // Scenario B: the lone record is dropped, views go empty.
        let mut sync = ViewSynchronizer::new();
        let mut ctx = RecordingContext::default();
        let generation = sync.begin_pass();
        let outcome =
            sync.complete_pass(generation, Ok(vec![raw("bad", 10.0, -5.0)]), 50.0, &mut ctx);
        assert_eq!(outcome, PassOutcome::AppliedEmpty);
        assert_eq!(ctx.clears, 1);
        assert!(ctx.table.is_none());
    }

    #[test]
    fn fetch_failure_leaves_previous_render_untouched() {
        // Scenario C.
        let mut sync = ViewSynchronizer::new();
        let mut ctx = RecordingContext::default();
        let first = sync.begin_pass();
        sync.complete_pass(first, Ok(vec![raw("X", 75.0, 1_000.0)]), 70.0, &mut ctx);
        let replaces_before = ctx.replaces;

        let second = sync.begin_pass();
        let outcome = sync.complete_pass(
            second,
            Err(PassError::Fetch("connection refused".into())),
            70.0,
            &mut ctx,
        );
        assert_eq!(outcome, PassOutcome::Failed);
        assert_eq!(ctx.replaces, replaces_before);
        assert_eq!(ctx.clears, 0);
        assert!(ctx.table.is_some());
    }

    #[test]
    fn slow_stale_fetch_cannot_overwrite_a_newer_pass() {
        // Scenario D: pass 1 resolves after pass 2 already applied.
        let mut sync = ViewSynchronizer::new();
        let mut ctx = RecordingContext::default();
        let slow = sync.begin_pass();
        let fast = sync.begin_pass();

        sync.complete_pass(fast, Ok(vec![raw("new", 80.0, 2_000.0)]), 50.0, &mut ctx);
        let outcome =
            sync.complete_pass(slow, Ok(vec![raw("old", 10.0, 1_000.0)]), 50.0, &mut ctx);

        assert_eq!(outcome, PassOutcome::Stale);
        assert_eq!(ctx.table.unwrap().rows[0].name, "new");
    }

    #[test]
    fn out_of_order_requests_completing_in_order_both_apply() {
        let mut sync = ViewSynchronizer::new();
        let mut ctx = RecordingContext::default();
        let first = sync.begin_pass();
        let second = sync.begin_pass();

        assert_eq!(
            sync.complete_pass(first, Ok(vec![raw("a", 10.0, 500.0)]), 50.0, &mut ctx),
            PassOutcome::Applied
        );
        assert_eq!(
            sync.complete_pass(second, Ok(vec![raw("b", 20.0, 500.0)]), 50.0, &mut ctx),
            PassOutcome::Applied
        );
        assert_eq!(ctx.table.unwrap().rows[0].name, "b");
    }

    #[test]
    fn threshold_rerender_does_not_block_an_in_flight_fetch() {
        let mut sync = ViewSynchronizer::new();
        let mut ctx = RecordingContext::default();
        let first = sync.begin_pass();
        sync.complete_pass(first, Ok(vec![raw("old-range", 75.0, 1_000.0)]), 70.0, &mut ctx);

        // A fetch for a new range is requested, then the user moves
        // the threshold slider before it resolves.
        let in_flight = sync.begin_pass();
        sync.rerender(vec![raw("old-range", 75.0, 1_000.0)], 80.0, &mut ctx);
        assert!(!ctx.table.as_ref().unwrap().rows[0].highlighted);

        let outcome = sync.complete_pass(
            in_flight,
            Ok(vec![raw("new-range", 30.0, 500.0)]),
            80.0,
            &mut ctx,
        );
        assert_eq!(outcome, PassOutcome::Applied);
        assert_eq!(ctx.table.unwrap().rows[0].name, "new-range");
    }

    #[test]
    fn rerender_of_an_empty_dataset_clears_the_views() {
        let sync = ViewSynchronizer::new();
        let mut ctx = RecordingContext::default();
        assert_eq!(
            sync.rerender(Vec::new(), 50.0, &mut ctx),
            PassOutcome::AppliedEmpty
        );
        assert_eq!(ctx.clears, 1);
    }

    #[test]
    fn identical_passes_render_identical_content() {
        let dataset = vec![raw("a", 75.0, 1_000.0), raw("b", 42.0, 2_000.0)];
        let mut sync = ViewSynchronizer::new();
        let mut first_ctx = RecordingContext::default();
        let mut second_ctx = RecordingContext::default();

        let g1 = sync.begin_pass();
        sync.complete_pass(g1, Ok(dataset.clone()), 60.0, &mut first_ctx);
        let g2 = sync.begin_pass();
        sync.complete_pass(g2, Ok(dataset), 60.0, &mut second_ctx);

        assert_eq!(first_ctx.table, second_ctx.table);
        assert_eq!(first_ctx.bars, second_ctx.bars);
        assert_eq!(first_ctx.scatter, second_ctx.scatter);
    }
}
