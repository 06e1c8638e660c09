//! OncoPrint Core Library
//!
//! Alteration data model, matrix builder, axis layout and interaction
//! normalizer for OncoPrint plots. Output is shaped for plotly-compatible
//! rendering surfaces.

pub mod types;
pub mod error;
pub mod palette;
pub mod labels;
pub mod trace;
pub mod matrix;
pub mod viewport;
pub mod layout;
pub mod interaction;
pub mod config;
pub mod component;

// Re-export commonly used types and functions
pub use types::{AlterationRecord, AlterationType, Color};
pub use error::{OncoPrintError, Result};
pub use palette::{AlterationClass, Palette};
pub use trace::{BarLayer, Cell};
pub use matrix::{build_matrix, Matrix, MatrixBuilder, MatrixConfig, SampleOrder};
pub use viewport::ViewportState;
pub use layout::{axis_layout, AxisTitles, Layout};
pub use interaction::{EventSink, EventType, InteractionNormalizer, NormalizedEvent, RawEvent};
pub use config::OncoPrintConfig;
pub use component::{Figure, OncoPrint};

/// Version information for the OncoPrint core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
