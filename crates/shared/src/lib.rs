//! Ballotbox Shared - wire types for the engine and its clients
//!
//! - Request bodies accepted by the HTTP API
//! - Response bodies built from domain snapshots and aggregates
//! - Chart renderers over aggregated results
//!
//! DTOs use raw `uuid::Uuid`; only the `From` conversions touch domain types.

pub mod charts;
pub mod requests;
pub mod responses;

pub use charts::{
    renderer_for, AreaChartRenderer, BarChartRenderer, ChartData, ChartKind, ChartMark,
    ChartPoint, PieChartRenderer, ResultsRenderer, UnknownChartKind,
};
pub use requests::{CastVoteRequest, CreatePollRequest};
pub use responses::{
    format_percentage, ErrorCode, ErrorResponse, PollData, PollDetailResponse, PollOptionData,
    PollResultsData, RankedOptionData,
};
