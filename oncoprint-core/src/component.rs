//! The OncoPrint component: configuration, viewport and event handling in one
//! place, producing plotly-shaped figures for each render pass.

use serde::Serialize;

use crate::config::OncoPrintConfig;
use crate::error::Result;
use crate::interaction::{EventSink, InteractionNormalizer, NormalizedEvent, RawEvent};
use crate::layout::{axis_layout, Layout};
use crate::matrix::{Matrix, MatrixBuilder};
use crate::trace::BarLayer;
use crate::types::AlterationRecord;
use crate::viewport::ViewportState;

/// Traces plus layout, serialized as `{"data": [...], "layout": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<BarLayer>,
    pub layout: Layout,
}

impl Figure {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug)]
pub struct OncoPrint {
    config: OncoPrintConfig,
    builder: MatrixBuilder,
    viewport: ViewportState,
    normalizer: InteractionNormalizer,
}

impl OncoPrint {
    pub fn new(config: OncoPrintConfig) -> Result<Self> {
        config.validate()?;
        let builder = MatrixBuilder::new(config.matrix_config())?;
        Ok(Self {
            config,
            builder,
            viewport: ViewportState::new(),
            normalizer: InteractionNormalizer::new(),
        })
    }

    pub fn with_sink<S: EventSink + 'static>(mut self, sink: S) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn set_sink<S: EventSink + 'static>(&mut self, sink: S) {
        self.normalizer.set_sink(sink);
    }

    pub fn clear_sink(&mut self) {
        self.normalizer.clear_sink();
    }

    pub fn config(&self) -> &OncoPrintConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn matrix(&self, records: &[AlterationRecord]) -> Matrix {
        self.builder.build(records)
    }

    pub fn layout(&self) -> Layout {
        axis_layout(&self.config.axis_titles(), self.config.plot.show_legend, &self.viewport)
    }

    /// Run one render pass over `records`.
    pub fn figure(&self, records: &[AlterationRecord]) -> Figure {
        Figure {
            data: self.matrix(records).into_layers(),
            layout: self.layout(),
        }
    }

    /// Normalize one raw event from the rendering surface.
    pub fn handle_event(&mut self, raw: &RawEvent) -> NormalizedEvent {
        self.normalizer.handle(&mut self.viewport, raw)
    }
}
