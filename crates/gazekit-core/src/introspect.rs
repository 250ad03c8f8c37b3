//! Read-only debug view of gaze evaluation

/// Last evaluated values of a detector or aggregate.
///
/// Angle and threshold are in degrees and stay at zero when the
/// `introspection` feature is disabled or nothing has been evaluated yet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GazeSnapshot {
    pub angle: f32,
    pub threshold: f32,
    pub gazed_at: bool,
}

/// Implemented by anything that can report a [`GazeSnapshot`]
pub trait GazeIntrospect {
    fn snapshot(&self) -> GazeSnapshot;
}

/// Storage for the last angle/threshold pair; zero-sized without the
/// `introspection` feature.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DebugProbe {
    #[cfg(feature = "introspection")]
    angle: f32,
    #[cfg(feature = "introspection")]
    threshold: f32,
}

impl DebugProbe {
    #[cfg(feature = "introspection")]
    pub(crate) fn record(&mut self, angle: f32, threshold: f32) {
        self.angle = angle;
        self.threshold = threshold;
    }

    #[cfg(not(feature = "introspection"))]
    pub(crate) fn record(&mut self, _angle: f32, _threshold: f32) {}

    #[cfg(feature = "introspection")]
    pub(crate) fn values(&self) -> (f32, f32) {
        (self.angle, self.threshold)
    }

    #[cfg(not(feature = "introspection"))]
    pub(crate) fn values(&self) -> (f32, f32) {
        (0.0, 0.0)
    }
}
