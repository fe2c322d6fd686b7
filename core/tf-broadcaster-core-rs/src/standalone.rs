//! Non-interactive smoke test mode: sweeps roll while publishing continuously.

use crate::publisher::{TransformPublisher, TransformSink};

pub const STANDALONE_FRAME_ID: &str = "root";
pub const STANDALONE_CHILD_FRAME_ID: &str = "oculus";
pub const STANDALONE_RATE_HZ: u64 = 100;

/// Sawtooth over `[-180, 180)` degrees, one degree per step
#[derive(Debug, Default, Clone)]
pub struct RollSweep {
    roll: f64,
}

impl Iterator for RollSweep {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        self.roll += 1.0;
        Some(self.roll % 360.0 - 180.0)
    }
}

pub fn standalone_publisher<S: TransformSink>(sink: S) -> TransformPublisher<S> {
    let mut publisher =
        TransformPublisher::new(STANDALONE_FRAME_ID, STANDALONE_CHILD_FRAME_ID, sink);
    publisher.set_continuous_status();
    publisher
}
