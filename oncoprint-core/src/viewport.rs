/// Pinned x-axis zoom range. Both bounds `None` means autorange.
///
/// Only the interaction normalizer writes to it; the layout computation reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportState {
    x_start: Option<f64>,
    x_end: Option<f64>,
}

impl ViewportState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn x_start(&self) -> Option<f64> {
        self.x_start
    }

    pub fn x_end(&self) -> Option<f64> {
        self.x_end
    }

    pub fn is_autorange(&self) -> bool {
        self.x_start.is_none() && self.x_end.is_none()
    }

    /// Explicit `[start, end]` range when pinned
    pub fn range(&self) -> Option<[f64; 2]> {
        match (self.x_start, self.x_end) {
            (Some(start), Some(end)) => Some([start, end]),
            _ => None,
        }
    }

    pub(crate) fn pin(&mut self, x_start: f64, x_end: f64) {
        log::debug!("Viewport pinned to [{}, {}]", x_start, x_end);
        self.x_start = Some(x_start);
        self.x_end = Some(x_end);
    }

    pub(crate) fn reset(&mut self) {
        log::debug!("Viewport reset to autorange");
        self.x_start = None;
        self.x_end = None;
    }
}
