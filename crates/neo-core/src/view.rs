//! Per-view models and the render context that owns the
//! replace-previous-render lifecycle.
//!
//! The builders are pure so the whole pipeline short of the final
//! apply step is testable without a live drawing surface.

use rand::Rng;

use crate::record::ValidatedRecord;
use crate::risk::{
    is_above_threshold, Rgb8, RiskTier, BENIGN_COLOR, HAZARDOUS_COLOR, ROW_ABOVE_THRESHOLD,
    ROW_BELOW_THRESHOLD,
};
use crate::spatial::{visual_radius, SpatialMapper, SpatialPosition};

/// One table row, in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub risk_score: f64,
    pub hazardous: bool,
    pub highlighted: bool,
    pub fill: Rgb8,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableModel {
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub fill: Rgb8,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BarChartModel {
    pub bars: Vec<Bar>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScatterPoint {
    pub probability: f64,
    pub severity: f64,
    pub fill: Rgb8,
}

/// Scatter plot of impact probability against impact severity. The
/// severity axis is drawn log-scaled by the frontend.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterPlotModel {
    pub points: Vec<ScatterPoint>,
}

/// One mesh to place in the 3D scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneEntry {
    pub name: String,
    pub position: SpatialPosition,
    pub radius: f64,
    pub color: Rgb8,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneModel {
    pub entries: Vec<SceneEntry>,
}

/// Drawing-surface seam. Implementations hold the current chart
/// handles; each `replace_*` call tears down whatever was rendered
/// before, and `clear_all` is the explicit empty state shown when a
/// fetch validates down to zero records.
pub trait RenderContext {
    fn replace_table(&mut self, table: TableModel);
    fn replace_bar_chart(&mut self, chart: BarChartModel);
    fn replace_scatter(&mut self, plot: ScatterPlotModel);
    fn clear_all(&mut self);
}

pub fn build_table(records: &[ValidatedRecord], threshold: f64) -> TableModel {
    let rows = records
        .iter()
        .map(|record| {
            let highlighted = is_above_threshold(record.pair_risk_score, threshold);
            TableRow {
                name: record.name.clone(),
                risk_score: record.pair_risk_score,
                hazardous: record.hazardous,
                highlighted,
                fill: if highlighted {
                    ROW_ABOVE_THRESHOLD
                } else {
                    ROW_BELOW_THRESHOLD
                },
            }
        })
        .collect();
    TableModel { rows }
}

pub fn build_bar_chart(records: &[ValidatedRecord]) -> BarChartModel {
    let bars = records
        .iter()
        .map(|record| Bar {
            label: record.name.clone(),
            value: record.pair_risk_score,
            fill: RiskTier::classify(record.pair_risk_score).color(),
        })
        .collect();
    BarChartModel { bars }
}

pub fn build_scatter(records: &[ValidatedRecord]) -> ScatterPlotModel {
    let points = records
        .iter()
        .map(|record| ScatterPoint {
            probability: record.components.impact_probability,
            severity: record.components.impact_severity,
            fill: RiskTier::classify(record.pair_risk_score).color(),
        })
        .collect();
    ScatterPlotModel { points }
}

/// Scene entries use the binary hazard color, not the tier color.
pub fn build_scene<R: Rng>(
    records: &[ValidatedRecord],
    mapper: &mut SpatialMapper<R>,
) -> SceneModel {
    let entries = records
        .iter()
        .map(|record| SceneEntry {
            name: record.name.clone(),
            position: mapper.compute_position(record),
            radius: visual_radius(record.diameter_km),
            color: if record.hazardous {
                HAZARDOUS_COLOR
            } else {
                BENIGN_COLOR
            },
        })
        .collect();
    SceneModel { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PairComponents;
    use crate::risk::{HIGH_TIER_COLOR, LOW_TIER_COLOR, MEDIUM_TIER_COLOR};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(name: &str, score: f64, hazardous: bool) -> ValidatedRecord {
        ValidatedRecord {
            name: name.to_string(),
            date: None,
            hazardous,
            pair_risk_score: score,
            components: PairComponents {
                impact_probability: 0.2,
                impact_severity: 1.5,
            },
            miss_distance_km: 100_000.0,
            diameter_m: 120.0,
            diameter_km: 0.12,
            velocity_kph: Some(30_000.0),
        }
    }

    #[test]
    fn table_highlights_follow_the_threshold() {
        let records = vec![record("hot", 75.0, true), record("cold", 20.0, false)];
        let table = build_table(&records, 70.0);
        assert!(table.rows[0].highlighted);
        assert_eq!(table.rows[0].fill, ROW_ABOVE_THRESHOLD);
        assert!(!table.rows[1].highlighted);
        assert_eq!(table.rows[1].fill, ROW_BELOW_THRESHOLD);
    }

    #[test]
    fn bars_and_points_share_the_tier_color() {
        let records = vec![
            record("high", 82.0, true),
            record("medium", 55.0, false),
            record("low", 12.0, false),
        ];
        let bars = build_bar_chart(&records);
        let scatter = build_scatter(&records);
        assert_eq!(bars.bars[0].fill, HIGH_TIER_COLOR);
        assert_eq!(bars.bars[1].fill, MEDIUM_TIER_COLOR);
        assert_eq!(bars.bars[2].fill, LOW_TIER_COLOR);
        for (bar, point) in bars.bars.iter().zip(&scatter.points) {
            assert_eq!(bar.fill, point.fill);
        }
    }

    #[test]
    fn scene_uses_the_binary_hazard_color() {
        let records = vec![record("bad", 90.0, true), record("fine", 90.0, false)];
        let mut mapper = SpatialMapper::new(StdRng::seed_from_u64(3));
        let scene = build_scene(&records, &mut mapper);
        assert_eq!(scene.entries[0].color, HAZARDOUS_COLOR);
        assert_eq!(scene.entries[1].color, BENIGN_COLOR);
    }

    #[test]
    fn builders_are_idempotent_for_identical_input() {
        let records = vec![record("a", 75.0, true), record("b", 42.0, false)];
        assert_eq!(build_table(&records, 50.0), build_table(&records, 50.0));
        assert_eq!(build_bar_chart(&records), build_bar_chart(&records));
        assert_eq!(build_scatter(&records), build_scatter(&records));
    }
}
