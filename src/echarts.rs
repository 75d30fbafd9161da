// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// ECharts option emission for calendar heatmaps.
///
/// Translates a renderer-agnostic [`HeatmapSpec`] into the concrete option
/// object consumed by an ECharts calendar-heatmap component. The core
/// pipeline never depends on this schema; it lives here so renderer quirks
/// stay at the edge.
use serde_json::{Value, json};

use crate::heatmap::HeatmapSpec;

/// Builds the full ECharts option for a compiled heatmap.
///
/// The visual map is hidden and interpolates the five-color ramp linearly
/// between zero and the scale ceiling, mirroring the contribution graph on
/// github.com. Tooltip text is left to the host component, which renders it
/// per cell through [`HeatmapSpec::tooltip_for`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use contribcal::{CalendarRange, echarts, heatmap, mock};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let today = NaiveDate::from_ymd_opt(2025, 8, 29,).unwrap();
/// let range = CalendarRange::trailing_year(today,);
/// let dataset = mock::generate(&range, &mut StdRng::seed_from_u64(7,),);
/// let spec = heatmap::compile(&dataset, &range,);
///
/// let option = echarts::heatmap_option(&spec,);
/// assert!(option["series"][0]["data"].is_array());
/// ```
pub fn heatmap_option(spec: &HeatmapSpec,) -> Value
{
    let colors: Vec<&str,> = spec.color_scale.iter().map(|stop| stop.color,).collect();

    let data: Vec<Value,> = spec
        .cell_values
        .iter()
        .map(|(date, count,)| json!([date.to_string(), count]),)
        .collect();

    json!({
        "tooltip": {},
        "grid": { "top": 0, "bottom": 0, "left": 0, "right": 0 },
        "visualMap": {
            "show": false,
            "min": 0,
            "max": spec.max_count,
            "inRange": { "color": colors },
        },
        "calendar": {
            "range": [spec.range.start.to_string(), spec.range.end.to_string()],
            "cellSize": ["auto", 13],
            "splitLine": { "show": false },
            "yearLabel": { "show": false },
            "itemStyle": { "borderWidth": 1, "borderColor": "#fff" },
            "dayLabel": {
                "firstDay": 1,
                "nameMap": ["", "Mon", "", "Wed", "", "Fri", ""],
            },
            "monthLabel": { "nameMap": "en", "margin": 10 },
        },
        "series": [{
            "type": "heatmap",
            "coordinateSystem": "calendar",
            "data": data,
        }],
    })
}
