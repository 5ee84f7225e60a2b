//! Chart renderers over aggregated results.
//!
//! Each chart type is a [`ResultsRenderer`]; callers pick one with
//! [`renderer_for`] and never branch on the chart type themselves. Renderers
//! only read an [`AggregatedPoll`] and add geometry, so adding a chart type
//! needs no change to aggregation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ballotbox_domain::{AggregatedPoll, RankedOption};

/// Available chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
    Area,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Bar, ChartKind::Pie, ChartKind::Area];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Area => "area",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown chart kind '{0}' (expected bar, pie or area)")]
pub struct UnknownChartKind(pub String);

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "pie" => Ok(Self::Pie),
            "area" => Ok(Self::Area),
            _ => Err(UnknownChartKind(s.to_string())),
        }
    }
}

/// Geometry for one data point, specific to the chart type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ChartMark {
    /// Horizontal bar filled to `fill` in [0, 1].
    Bar { fill: f64 },
    /// Pie slice in degrees, clockwise from twelve o'clock.
    Slice { start_degrees: f64, sweep_degrees: f64 },
    /// Area vertex: the option's own share and the running share so far.
    Area { value: f64, cumulative_percentage: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub option_id: Uuid,
    pub label: String,
    pub votes: u32,
    pub percentage: f64,
    pub is_winner: bool,
    pub is_viewer_vote: bool,
    pub mark: ChartMark,
}

impl ChartPoint {
    fn new(option: &RankedOption, mark: ChartMark) -> Self {
        Self {
            option_id: option.option_id.to_uuid(),
            label: option.text.clone(),
            votes: option.vote_count,
            percentage: option.percentage,
            is_winner: option.is_winner,
            is_viewer_vote: option.is_viewer_vote,
            mark,
        }
    }
}

/// A rendered chart, ready to be drawn by any client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub kind: ChartKind,
    pub poll_id: Uuid,
    pub total_votes: u64,
    /// Points in ranked order.
    pub points: Vec<ChartPoint>,
}

/// Something that can turn aggregated results into chart data.
pub trait ResultsRenderer: Send + Sync {
    fn kind(&self) -> ChartKind;

    fn points(&self, results: &AggregatedPoll) -> Vec<ChartPoint>;

    fn render(&self, results: &AggregatedPoll) -> ChartData {
        ChartData {
            kind: self.kind(),
            poll_id: results.poll_id.to_uuid(),
            total_votes: results.total_votes,
            points: self.points(results),
        }
    }
}

pub struct BarChartRenderer;

impl ResultsRenderer for BarChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn points(&self, results: &AggregatedPoll) -> Vec<ChartPoint> {
        results
            .ranked_options
            .iter()
            .map(|o| ChartPoint::new(o, ChartMark::Bar { fill: o.percentage / 100.0 }))
            .collect()
    }
}

pub struct PieChartRenderer;

impl ResultsRenderer for PieChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn points(&self, results: &AggregatedPoll) -> Vec<ChartPoint> {
        let mut start = 0.0;
        results
            .ranked_options
            .iter()
            .map(|o| {
                let sweep = o.percentage * 3.6;
                let point = ChartPoint::new(
                    o,
                    ChartMark::Slice {
                        start_degrees: start,
                        sweep_degrees: sweep,
                    },
                );
                start += sweep;
                point
            })
            .collect()
    }
}

pub struct AreaChartRenderer;

impl ResultsRenderer for AreaChartRenderer {
    fn kind(&self) -> ChartKind {
        ChartKind::Area
    }

    fn points(&self, results: &AggregatedPoll) -> Vec<ChartPoint> {
        let mut cumulative = 0.0;
        results
            .ranked_options
            .iter()
            .map(|o| {
                cumulative += o.percentage;
                ChartPoint::new(
                    o,
                    ChartMark::Area {
                        value: f64::from(o.vote_count),
                        cumulative_percentage: cumulative,
                    },
                )
            })
            .collect()
    }
}

/// Returns the renderer for a chart kind.
pub fn renderer_for(kind: ChartKind) -> &'static dyn ResultsRenderer {
    match kind {
        ChartKind::Bar => &BarChartRenderer,
        ChartKind::Pie => &PieChartRenderer,
        ChartKind::Area => &AreaChartRenderer,
    }
}
