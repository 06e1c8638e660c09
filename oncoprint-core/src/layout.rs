//! Axis layout handed to the rendering surface alongside the traces.

use serde::Serialize;

use crate::viewport::ViewportState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub showgrid: bool,
    pub showticklabels: bool,
    pub zeroline: bool,
    pub autorange: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub showgrid: bool,
    pub zeroline: bool,
    pub fixedrange: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub barmode: &'static str,
    pub hovermode: &'static str,
    pub showlegend: bool,
    pub xaxis: XAxis,
    pub yaxis: YAxis,
}

/// Titles and toggles that do not depend on interaction state
#[derive(Debug, Clone, Default)]
pub struct AxisTitles {
    pub x: Option<String>,
    pub y: Option<String>,
}

/// Compute the layout for the current viewport.
///
/// Autorange while no zoom is pinned; otherwise the x range is fixed to the
/// pinned bounds. Sample tick labels are never shown.
pub fn axis_layout(titles: &AxisTitles, show_legend: bool, viewport: &ViewportState) -> Layout {
    Layout {
        barmode: "stack",
        hovermode: "closest",
        showlegend: show_legend,
        xaxis: XAxis {
            title: titles.x.clone(),
            showgrid: false,
            showticklabels: false,
            zeroline: false,
            autorange: viewport.is_autorange(),
            range: viewport.range(),
        },
        yaxis: YAxis {
            title: titles.y.clone(),
            showgrid: false,
            zeroline: false,
            fixedrange: true,
        },
    }
}
