//! Contribution data pipeline for profile dashboard heatmaps.
//!
//! The library acquires a year of daily contribution counts from the GitHub
//! GraphQL API, degrades to a deterministic synthetic generator when
//! credentials are absent or the fetch fails, normalizes both sources into
//! one canonical dataset shape, and compiles that shape into a
//! renderer-agnostic calendar-heatmap specification. All public APIs are
//! documented with invariants, error semantics, and minimal examples.

mod calendar;
pub mod echarts;
mod error;
pub mod heatmap;
pub mod mock;
mod range;
mod source;

pub use calendar::{
    ContributionDataset, ContributionDay, MOCK_SOURCE_LABEL, REMOTE_SOURCE_LABEL,
};
pub use error::{Error, io_error};
pub use heatmap::{COLOR_RAMP, ColorStop, HeatmapSpec, TOOLTIP_TEMPLATE, tooltip_text};
pub use range::CalendarRange;
pub use source::{
    ContributionSource, FetchCalendar, Generation, NO_CREDENTIALS_STATUS, REMOTE_FAILED_STATUS,
    REMOTE_LOADED_STATUS, RemoteCalendar, RemoteDay, RemoteGraphQlSource, RemoteWeek, Resolution,
};
