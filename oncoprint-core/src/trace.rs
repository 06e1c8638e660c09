//! Stacked-bar trace objects handed to the rendering surface.
//!
//! Field names follow the plotly.js bar trace so a layer serializes straight
//! into a figure's `data` array.

use serde::Serialize;

use crate::types::Color;

/// Bars run along the sample axis, one row per gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    #[serde(rename = "h")]
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub color: Color,
}

/// Matrix position of one bar segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

/// One stacked-bar layer: the background grid or one alteration group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarLayer {
    pub base: Vec<f64>,
    pub hoverinfo: &'static str,
    pub marker: Marker,
    pub name: String,
    pub text: Vec<String>,
    pub orientation: Orientation,
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub width: f64,
    pub x: Vec<f64>,
    pub y: Vec<String>,
    /// Gene row / sample column of every segment, parallel to `base`
    #[serde(skip)]
    pub cells: Vec<Cell>,
}

impl BarLayer {
    pub fn new(name: impl Into<String>, color: Color, width: f64) -> Self {
        Self {
            base: Vec::new(),
            hoverinfo: "text",
            marker: Marker { color },
            name: name.into(),
            text: Vec::new(),
            orientation: Orientation::Horizontal,
            trace_type: "bar",
            width,
            x: Vec::new(),
            y: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Append one segment. `base` and `length` are in column units.
    pub fn push_segment(&mut self, cell: Cell, base: f64, length: f64, label: String, text: String) {
        self.base.push(base);
        self.x.push(length);
        self.y.push(label);
        self.text.push(text);
        self.cells.push(cell);
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    pub fn color(&self) -> &Color {
        &self.marker.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_serializes_as_horizontal_bar() {
        let mut layer = BarLayer::new("Fusion", Color::new("#8B00C9"), 0.4);
        layer.push_segment(Cell { row: 0, column: 2 }, 2.05, 0.9, "ALK (50%)".into(), "S3<br>EML4-ALK".into());

        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["type"], "bar");
        assert_eq!(json["orientation"], "h");
        assert_eq!(json["hoverinfo"], "text");
        assert_eq!(json["marker"]["color"], "#8B00C9");
        assert_eq!(json["y"][0], "ALK (50%)");
        assert!(json.get("cells").is_none());
    }
}
