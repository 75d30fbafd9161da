// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Calendar-heatmap compilation.
///
/// Converts a canonical dataset into a renderer-agnostic heatmap
/// specification: color buckets, date bounds, per-cell values, and tooltip
/// text. Compilation is pure and the resulting spec is rebuilt wholesale on
/// every dataset change, never mutated.
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{calendar::ContributionDataset, range::CalendarRange};

/// Fixed five-color ramp from lightest (inactive) to darkest (most active).
pub const COLOR_RAMP: [&str; 5] = ["#ebedf0", "#c6e48b", "#7bc96f", "#239a3b", "#196127"];

/// Placeholder template describing how tooltips are rendered.
pub const TOOLTIP_TEMPLATE: &str = "{date}: {count} contribution{plural}";

/// One stop of the heatmap color scale.
#[derive(Debug, Clone, PartialEq, Serialize,)]
pub struct ColorStop
{
    /// Count at which the color applies, interpolated linearly up to the
    /// scale ceiling.
    pub threshold: f64,
    /// Hex color applied at the threshold.
    pub color:     &'static str,
}

/// Renderer-agnostic description of a calendar heatmap.
///
/// Consumers map each date to a color bucket using `color_scale` and render
/// tooltips through [`HeatmapSpec::tooltip_for`]. Dates absent from
/// `cell_values` read as zero.
#[derive(Debug, Clone, PartialEq, Serialize,)]
pub struct HeatmapSpec
{
    /// Calendar window covered by the heatmap.
    pub range:            CalendarRange,
    /// Ordered color stops from lightest to darkest.
    pub color_scale:      Vec<ColorStop,>,
    /// Contribution count per calendar date.
    pub cell_values:      BTreeMap<NaiveDate, u32,>,
    /// Template describing the tooltip rendering.
    pub tooltip_template: String,
    /// Scale ceiling, floored at 1 to avoid a degenerate all-zero scale.
    pub max_count:        u32,
}

impl HeatmapSpec
{
    /// Returns the count recorded for a date, defaulting to zero.
    pub fn cell_count(&self, date: NaiveDate,) -> u32
    {
        self.cell_values.get(&date,).copied().unwrap_or(0,)
    }

    /// Renders the tooltip text for a date.
    pub fn tooltip_for(&self, date: NaiveDate,) -> String
    {
        tooltip_text(date, self.cell_count(date,),)
    }
}

/// Compiles a dataset and its window into a heatmap specification.
///
/// Pure function with no I/O; it may be called freely from the rendering
/// layer. An empty dataset still yields a valid spec with `max_count == 1`
/// and no cell values.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use contribcal::{CalendarRange, heatmap, mock};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let today = NaiveDate::from_ymd_opt(2025, 8, 29,).unwrap();
/// let range = CalendarRange::trailing_year(today,);
/// let dataset = mock::generate(&range, &mut StdRng::seed_from_u64(7,),);
///
/// let spec = heatmap::compile(&dataset, &range,);
/// assert_eq!(spec.cell_values.len() as u64, range.day_count());
/// assert_eq!(spec.color_scale.len(), 5);
/// ```
pub fn compile(dataset: &ContributionDataset, range: &CalendarRange,) -> HeatmapSpec
{
    let max_count = dataset.days.iter().map(|day| day.count,).max().unwrap_or(0,).max(1,);

    let cell_values = dataset.days.iter().map(|day| (day.date, day.count,),).collect();

    HeatmapSpec {
        range: *range,
        color_scale: color_scale_for(max_count,),
        cell_values,
        tooltip_template: TOOLTIP_TEMPLATE.to_string(),
        max_count,
    }
}

/// Renders tooltip text with correct pluralization.
pub fn tooltip_text(date: NaiveDate, count: u32,) -> String
{
    let suffix = if count == 1 { "" } else { "s" };
    format!("{date}: {count} contribution{suffix}")
}

/// Interpolates ramp thresholds linearly between 0 and the scale ceiling.
fn color_scale_for(max_count: u32,) -> Vec<ColorStop,>
{
    let steps = (COLOR_RAMP.len() - 1) as f64;

    COLOR_RAMP
        .into_iter()
        .enumerate()
        .map(|(index, color,)| ColorStop {
            threshold: f64::from(max_count,) * index as f64 / steps,
            color,
        },)
        .collect()
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;

    use super::*;
    use crate::calendar::{ContributionDay, MOCK_SOURCE_LABEL};

    fn date(year: i32, month: u32, day: u32,) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(year, month, day,).expect("valid test date",)
    }

    fn dataset_of(counts: &[(NaiveDate, u32,)],) -> ContributionDataset
    {
        ContributionDataset::from_days(
            counts
                .iter()
                .map(|(date, count,)| ContributionDay {
                    date:  *date,
                    count: *count,
                },)
                .collect(),
            MOCK_SOURCE_LABEL,
        )
    }

    fn january_range() -> CalendarRange
    {
        CalendarRange::new(date(2025, 1, 1,), date(2025, 1, 3,),).expect("valid range",)
    }

    #[test]
    fn all_zero_dataset_floors_scale_at_one()
    {
        let dataset = dataset_of(&[
            (date(2025, 1, 1,), 0,),
            (date(2025, 1, 2,), 0,),
            (date(2025, 1, 3,), 0,),
        ],);

        let spec = compile(&dataset, &january_range(),);

        assert_eq!(spec.max_count, 1);
        assert_eq!(spec.color_scale.len(), COLOR_RAMP.len());
    }

    #[test]
    fn empty_dataset_compiles_to_valid_spec()
    {
        let dataset = dataset_of(&[],);

        let spec = compile(&dataset, &january_range(),);

        assert_eq!(spec.max_count, 1);
        assert!(spec.cell_values.is_empty());
        assert_eq!(spec.range, january_range());
    }

    #[test]
    fn thresholds_span_zero_to_ceiling_in_order()
    {
        let dataset = dataset_of(&[(date(2025, 1, 1,), 8,), (date(2025, 1, 2,), 2,)],);

        let spec = compile(&dataset, &january_range(),);

        assert_eq!(spec.max_count, 8);
        assert_eq!(spec.color_scale.first().map(|stop| stop.threshold,), Some(0.0));
        assert_eq!(spec.color_scale.last().map(|stop| stop.threshold,), Some(8.0));
        for pair in spec.color_scale.windows(2,) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }

    #[test]
    fn absent_dates_read_as_zero()
    {
        let dataset = dataset_of(&[(date(2025, 1, 1,), 4,)],);

        let spec = compile(&dataset, &january_range(),);

        assert_eq!(spec.cell_count(date(2025, 1, 1,),), 4);
        assert_eq!(spec.cell_count(date(2025, 1, 2,),), 0);
    }

    #[test]
    fn tooltip_uses_singular_for_exactly_one()
    {
        assert_eq!(tooltip_text(date(2025, 1, 1,), 1,), "2025-01-01: 1 contribution");
    }

    #[test]
    fn tooltip_uses_plural_for_zero_and_many()
    {
        assert_eq!(tooltip_text(date(2025, 1, 1,), 0,), "2025-01-01: 0 contributions");
        assert_eq!(tooltip_text(date(2025, 1, 1,), 2,), "2025-01-01: 2 contributions");
    }

    #[test]
    fn spec_tooltip_reads_cell_values()
    {
        let dataset = dataset_of(&[(date(2025, 1, 1,), 1,)],);

        let spec = compile(&dataset, &january_range(),);

        assert_eq!(spec.tooltip_for(date(2025, 1, 1,),), "2025-01-01: 1 contribution");
        assert_eq!(spec.tooltip_for(date(2025, 1, 2,),), "2025-01-02: 0 contributions");
    }

    #[test]
    fn spec_serializes_dates_as_map_keys()
    {
        let dataset = dataset_of(&[(date(2025, 1, 1,), 4,)],);

        let spec = compile(&dataset, &january_range(),);
        let json = serde_json::to_string(&spec,).expect("serialization failed",);

        assert!(json.contains("\"2025-01-01\":4"));
        assert!(json.contains("#ebedf0"));
    }
}
