//! Dashboard state: feed worker wiring, render-pass bookkeeping, and
//! the render context that owns the current view models.

use anyhow::{Context as _, Result};
use tracing::warn;

use neo_core::{
    BarChartModel, PassError, PassOutcome, RawRecord, RenderContext, ScatterPlotModel, TableModel,
    ViewSynchronizer,
};
use neo_feed::{spawn_feed_worker, DateRange, FeedConfig, FeedWorker, FetchRequest};

use crate::cli::DashboardOptions;

/// The current chart and table handles. Storing a new model drops the
/// previous one, which is the destroy-before-replace lifecycle in an
/// immediate-mode UI; `empty` marks the explicit zero-records state.
#[derive(Default)]
pub(crate) struct ViewState {
    pub(crate) table: TableModel,
    pub(crate) bars: BarChartModel,
    pub(crate) scatter: ScatterPlotModel,
    pub(crate) empty: bool,
}

impl RenderContext for ViewState {
    fn replace_table(&mut self, table: TableModel) {
        self.table = table;
        self.empty = false;
    }

    fn replace_bar_chart(&mut self, chart: BarChartModel) {
        self.bars = chart;
    }

    fn replace_scatter(&mut self, plot: ScatterPlotModel) {
        self.scatter = plot;
    }

    fn clear_all(&mut self) {
        self.table = TableModel::default();
        self.bars = BarChartModel::default();
        self.scatter = ScatterPlotModel::default();
        self.empty = true;
    }
}

pub(crate) struct DashboardApp {
    feed: FeedWorker,
    synchronizer: ViewSynchronizer,
    pub(crate) views: ViewState,
    pub(crate) threshold: f64,
    pub(crate) start_date: String,
    pub(crate) end_date: String,
    /// Raw dataset backing the current render, kept so a threshold
    /// change can re-render without another fetch.
    current_raw: Vec<RawRecord>,
    pub(crate) loaded_range: Option<DateRange>,
    pub(crate) status: Option<String>,
}

impl DashboardApp {
    pub(crate) fn new(options: DashboardOptions) -> Result<Self> {
        let feed = spawn_feed_worker(FeedConfig::default()).context("starting feed worker")?;
        let mut app = Self {
            feed,
            synchronizer: ViewSynchronizer::new(),
            views: ViewState::default(),
            threshold: options.threshold,
            start_date: options.range.start.clone(),
            end_date: options.range.end.clone(),
            current_raw: Vec::new(),
            loaded_range: None,
            status: None,
        };
        app.request_load();
        Ok(app)
    }

    /// Kick off a fetch for the entered date range. The dates go out
    /// verbatim; the service owns their validation.
    pub(crate) fn request_load(&mut self) {
        let generation = self.synchronizer.begin_pass();
        let request = FetchRequest {
            generation,
            range: DateRange::new(self.start_date.clone(), self.end_date.clone()),
        };
        if self.feed.requests.send(request).is_err() {
            self.status = Some("feed worker is not running".to_string());
        }
    }

    /// A threshold change re-renders every view from the dataset that
    /// is already loaded. No generation is consumed, so a fetch that
    /// is still in flight lands normally when it resolves.
    pub(crate) fn rerender_current(&mut self) {
        let dataset = self.current_raw.clone();
        let _ = self
            .synchronizer
            .rerender(dataset, self.threshold, &mut self.views);
    }

    /// Drain completed fetches. The synchronizer applies the newest
    /// pass and discards stale ones, so overlapping loads are safe.
    pub(crate) fn drain_feed_results(&mut self) {
        while let Ok(result) = self.feed.results.try_recv() {
            let outcome = result
                .outcome
                .map_err(|err| PassError::Fetch(err.to_string()));
            let raw = outcome.as_ref().ok().cloned();
            match self.synchronizer.complete_pass(
                result.generation,
                outcome,
                self.threshold,
                &mut self.views,
            ) {
                PassOutcome::Applied | PassOutcome::AppliedEmpty => {
                    self.current_raw = raw.unwrap_or_default();
                    self.loaded_range = Some(result.range);
                    self.status = None;
                }
                PassOutcome::Failed => {
                    self.status = Some(format!(
                        "fetch failed for {} → {}; showing previous data",
                        result.range.start, result.range.end
                    ));
                }
                PassOutcome::Stale => {}
            }
        }
    }

    /// Hand the selected date range to the 3D scene view, verbatim.
    pub(crate) fn open_scene_view(&mut self) {
        let result = std::env::current_exe()
            .map_err(anyhow::Error::from)
            .and_then(|exe| {
                std::process::Command::new(exe)
                    .arg("scene")
                    .args(["--start-date", &self.start_date])
                    .args(["--end-date", &self.end_date])
                    .spawn()
                    .map_err(anyhow::Error::from)
            });
        if let Err(err) = result {
            warn!("failed to launch scene view: {err:?}");
            self.status = Some("could not launch the 3D scene view".to_string());
        }
    }
}
