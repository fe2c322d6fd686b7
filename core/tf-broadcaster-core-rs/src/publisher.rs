use log::{debug, error, info};
use nalgebra::{Translation3, UnitQuaternion};

use crate::error::PanelError;
use crate::types::{now_ns, AngleUnit, TransformRecord, TransformType};

/// What the publisher does on each tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PublicationStatus {
    Stopped,
    PublishOnceStatic,
    PublishContinuous,
}

impl PublicationStatus {
    /// Position in the status handler table
    pub fn index(self) -> usize {
        match self {
            PublicationStatus::Stopped => 0,
            PublicationStatus::PublishOnceStatic => 1,
            PublicationStatus::PublishContinuous => 2,
        }
    }
}

/// Output side of the publisher. Sends are fire-and-forget.
pub trait TransformSink {
    fn send(
        &mut self,
        channel: TransformType,
        transforms: &[TransformRecord],
    ) -> Result<(), PanelError>;
}

/// Sink that only logs, for dry runs
#[derive(Debug, Default)]
pub struct LogSink;

impl TransformSink for LogSink {
    fn send(
        &mut self,
        channel: TransformType,
        transforms: &[TransformRecord],
    ) -> Result<(), PanelError> {
        for transform in transforms {
            info!("[{}] {}", channel, transform);
        }
        Ok(())
    }
}

/// Owns the broadcast transform and decides per tick whether to emit it.
pub struct TransformPublisher<S: TransformSink> {
    record: TransformRecord,
    status: PublicationStatus,
    static_published: bool,
    sink: S,
}

impl<S: TransformSink> TransformPublisher<S> {
    pub fn new(frame_id: &str, child_frame_id: &str, sink: S) -> Self {
        TransformPublisher {
            record: TransformRecord::new(frame_id, child_frame_id),
            status: PublicationStatus::Stopped,
            static_published: false,
            sink,
        }
    }

    pub fn record(&self) -> &TransformRecord {
        &self.record
    }

    pub fn status(&self) -> PublicationStatus {
        self.status
    }

    pub fn static_published(&self) -> bool {
        self.static_published
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn set_frames(&mut self, frame_id: &str, child_frame_id: &str) {
        self.set_frame_id(frame_id);
        self.set_child_frame_id(child_frame_id);
    }

    pub fn set_frame_id(&mut self, frame_id: &str) {
        self.record.frame_id = frame_id.to_string();
    }

    pub fn set_child_frame_id(&mut self, child_frame_id: &str) {
        self.record.child_frame_id = child_frame_id.to_string();
    }

    pub fn set_pose(&mut self, x: f64, y: f64, z: f64) {
        self.record.translation = Translation3::new(x, y, z);
    }

    pub fn set_orientation(&mut self, roll: f64, pitch: f64, yaw: f64, unit: AngleUnit) {
        self.record.rotation = UnitQuaternion::from_euler_angles(
            unit.to_radians(roll),
            unit.to_radians(pitch),
            unit.to_radians(yaw),
        );
    }

    pub fn set_stop_status(&mut self) {
        self.set_status(PublicationStatus::Stopped);
    }

    pub fn set_static_status(&mut self) {
        self.set_status(PublicationStatus::PublishOnceStatic);
    }

    pub fn set_continuous_status(&mut self) {
        self.set_status(PublicationStatus::PublishContinuous);
    }

    fn set_status(&mut self, status: PublicationStatus) {
        if status != self.status {
            info!("Publication status {:?} -> {:?}", self.status, status);
            self.status = status;
            self.static_published = false;
        }
    }

    /// Returns the channel something was emitted on, if any
    pub fn publish_tick(&mut self) -> Option<TransformType> {
        // Stamps never go backwards, even if the wall clock does
        self.record.stamp = now_ns().max(self.record.stamp);

        match self.status {
            PublicationStatus::Stopped => {
                self.static_published = false;
                None
            }
            PublicationStatus::PublishContinuous => {
                self.static_published = false;
                self.emit(TransformType::Dynamic);
                Some(TransformType::Dynamic)
            }
            PublicationStatus::PublishOnceStatic => {
                if self.static_published {
                    return None;
                }
                self.static_published = true;
                self.emit(TransformType::Static);
                Some(TransformType::Static)
            }
        }
    }

    fn emit(&mut self, channel: TransformType) {
        debug!("Publishing {} transform: {}", channel, self.record);
        if let Err(e) = self
            .sink
            .send(channel, std::slice::from_ref(&self.record))
        {
            error!("Failed to publish transform: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[derive(Default)]
    struct RecordingSink {
        sent: Vec<(TransformType, Vec<TransformRecord>)>,
        fail: bool,
    }

    impl RecordingSink {
        fn count(&self, channel: TransformType) -> usize {
            self.sent.iter().filter(|(c, _)| *c == channel).count()
        }
    }

    impl TransformSink for RecordingSink {
        fn send(
            &mut self,
            channel: TransformType,
            transforms: &[TransformRecord],
        ) -> Result<(), PanelError> {
            self.sent.push((channel, transforms.to_vec()));
            if self.fail {
                return Err(PanelError::Send {
                    channel,
                    reason: "unreachable".to_string(),
                });
            }
            Ok(())
        }
    }

    fn publisher() -> TransformPublisher<RecordingSink> {
        TransformPublisher::new("parent_frame_id", "child_frame_id", RecordingSink::default())
    }

    #[test]
    fn test_stopped_emits_nothing() {
        let mut publisher = publisher();
        publisher.set_continuous_status();
        publisher.set_stop_status();
        for _ in 0..5 {
            assert_eq!(publisher.publish_tick(), None);
        }
        assert!(publisher.sink().sent.is_empty());
    }

    #[test]
    fn test_static_published_once() {
        let mut publisher = publisher();
        publisher.set_static_status();
        assert_eq!(publisher.publish_tick(), Some(TransformType::Static));
        for _ in 0..10 {
            assert_eq!(publisher.publish_tick(), None);
        }
        assert_eq!(publisher.sink().count(TransformType::Static), 1);
        assert_eq!(publisher.sink().count(TransformType::Dynamic), 0);
        assert!(publisher.static_published());
    }

    #[test]
    fn test_static_rearms_after_leaving() {
        let mut publisher = publisher();
        publisher.set_static_status();
        publisher.publish_tick();
        publisher.publish_tick();

        publisher.set_stop_status();
        publisher.set_static_status();
        assert_eq!(publisher.publish_tick(), Some(TransformType::Static));
        assert_eq!(publisher.sink().count(TransformType::Static), 2);
    }

    #[test]
    fn test_static_rearms_through_continuous() {
        let mut publisher = publisher();
        publisher.set_static_status();
        publisher.publish_tick();
        publisher.set_continuous_status();
        publisher.publish_tick();
        publisher.set_static_status();
        publisher.publish_tick();
        assert_eq!(publisher.sink().count(TransformType::Static), 2);
        assert_eq!(publisher.sink().count(TransformType::Dynamic), 1);
    }

    #[test]
    fn test_same_status_does_not_rearm() {
        let mut publisher = publisher();
        publisher.set_static_status();
        publisher.publish_tick();
        publisher.set_static_status();
        assert_eq!(publisher.publish_tick(), None);
        assert_eq!(publisher.sink().count(TransformType::Static), 1);
    }

    #[test]
    fn test_continuous_every_tick_with_monotonic_stamps() {
        let mut publisher = publisher();
        publisher.set_continuous_status();
        let n = 20;
        for _ in 0..n {
            assert_eq!(publisher.publish_tick(), Some(TransformType::Dynamic));
        }
        let sent = &publisher.sink().sent;
        assert_eq!(sent.len(), n);
        assert!(sent.iter().all(|(c, t)| *c == TransformType::Dynamic && t.len() == 1));
        for pair in sent.windows(2) {
            assert!(pair[0].1[0].stamp <= pair[1].1[0].stamp);
        }
    }

    #[test]
    fn test_failed_send_does_not_change_state() {
        let mut publisher = publisher();
        publisher.sink_mut().fail = true;
        publisher.set_static_status();
        assert_eq!(publisher.publish_tick(), Some(TransformType::Static));
        assert_eq!(publisher.publish_tick(), None);
        assert_eq!(publisher.status(), PublicationStatus::PublishOnceStatic);
        assert_eq!(publisher.sink().count(TransformType::Static), 1);
    }

    #[test]
    fn test_orientation_degrees_matches_radians() {
        let mut degrees = publisher();
        degrees.set_orientation(180.0, 0.0, 0.0, AngleUnit::Degrees);
        let mut radians = publisher();
        radians.set_orientation(PI, 0.0, 0.0, AngleUnit::Radians);

        let a = degrees.record().rotation();
        let b = radians.record().rotation();
        for i in 0..4 {
            assert_relative_eq!(a[i], b[i], epsilon = 1e-12);
        }
        assert_relative_eq!(a[0].abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_orientation_is_fixed_axis_xyz() {
        let mut publisher = publisher();
        publisher.set_orientation(0.0, 0.0, 90.0, AngleUnit::Degrees);
        let q = publisher.record().rotation();
        let half = (PI / 4.0).sin();
        assert_relative_eq!(q[2], half, epsilon = 1e-12);
        assert_relative_eq!(q[3], half, epsilon = 1e-12);

        publisher.set_orientation(0.1, -0.2, 0.3, AngleUnit::Radians);
        let [roll, pitch, yaw] = publisher.record().euler_angles();
        assert_relative_eq!(roll, 0.1, epsilon = 1e-12);
        assert_relative_eq!(pitch, -0.2, epsilon = 1e-12);
        assert_relative_eq!(yaw, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_setters_apply_on_next_tick() {
        let mut publisher = publisher();
        publisher.set_continuous_status();
        publisher.set_pose(1.0, 2.0, 3.0);
        publisher.set_frames("map", "odom");
        publisher.publish_tick();
        let (_, transforms) = &publisher.sink().sent[0];
        assert_eq!(transforms[0].translation(), [1.0, 2.0, 3.0]);
        assert_eq!(transforms[0].frame_id, "map");
        assert_eq!(transforms[0].child_frame_id, "odom");
    }
}
