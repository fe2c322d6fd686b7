use nalgebra::{Translation3, UnitQuaternion};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Output channel a transform is published on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformType {
    /// Not latched, has to be re-sent every tick to stay alive
    Dynamic,
    /// Latched, late subscribers still observe the last message
    Static,
}

impl fmt::Display for TransformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformType::Static => write!(f, "static"),
            TransformType::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Unit tag carried by every angle that crosses an API boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AngleUnit {
    Radians,
    Degrees,
}

impl AngleUnit {
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleUnit::Radians => angle,
            AngleUnit::Degrees => angle.to_radians(),
        }
    }
}

/// Nanoseconds since the Unix epoch
pub fn now_ns() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => i64::try_from(d.as_nanos()).unwrap_or(i64::MAX),
        Err(e) => -i64::try_from(e.duration().as_nanos()).unwrap_or(i64::MAX),
    }
}

/// The single transform the panel broadcasts
#[derive(Clone, Debug, PartialEq)]
pub struct TransformRecord {
    pub frame_id: String,
    pub child_frame_id: String,
    pub translation: Translation3<f64>,
    pub rotation: UnitQuaternion<f64>,
    /// Timestamp in nanoseconds since Unix epoch
    pub stamp: i64,
}

impl TransformRecord {
    /// Zero translation, identity rotation, stamped now
    pub fn new(frame_id: impl Into<String>, child_frame_id: impl Into<String>) -> Self {
        TransformRecord {
            frame_id: frame_id.into(),
            child_frame_id: child_frame_id.into(),
            translation: Translation3::identity(),
            rotation: UnitQuaternion::identity(),
            stamp: now_ns(),
        }
    }

    /// Build a record from raw wire values. The rotation is renormalized.
    pub fn from_parts(
        frame_id: impl Into<String>,
        child_frame_id: impl Into<String>,
        translation: [f64; 3],
        rotation: [f64; 4],
        stamp_ns: i64,
    ) -> Self {
        TransformRecord {
            frame_id: frame_id.into(),
            child_frame_id: child_frame_id.into(),
            translation: Translation3::new(translation[0], translation[1], translation[2]),
            rotation: UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
                rotation[3], // w
                rotation[0], // x
                rotation[1], // y
                rotation[2], // z
            )),
            stamp: stamp_ns,
        }
    }

    /// Get the translation as [x, y, z]
    pub fn translation(&self) -> [f64; 3] {
        let t = self.translation.vector;
        [t.x, t.y, t.z]
    }

    /// Get the rotation as [x, y, z, w] quaternion
    pub fn rotation(&self) -> [f64; 4] {
        let q = self.rotation.into_inner();
        [q.i, q.j, q.k, q.w]
    }

    /// Get Euler angles (roll, pitch, yaw) in radians
    pub fn euler_angles(&self) -> [f64; 3] {
        let (roll, pitch, yaw) = self.rotation.euler_angles();
        [roll, pitch, yaw]
    }

    /// Get the timestamp in seconds as f64
    pub fn stamp_secs(&self) -> f64 {
        self.stamp as f64 / 1_000_000_000.0
    }
}

impl fmt::Display for TransformRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.translation();
        let r = self.rotation();
        write!(
            f,
            "{} -> {} (translation=[{:.3}, {:.3}, {:.3}], rotation=[{:.3}, {:.3}, {:.3}, {:.3}], stamp={:.6}s)",
            self.frame_id,
            self.child_frame_id,
            t[0],
            t[1],
            t[2],
            r[0],
            r[1],
            r[2],
            r[3],
            self.stamp_secs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_record_is_identity() {
        let record = TransformRecord::new("base", "tool");
        assert_eq!(record.translation(), [0.0, 0.0, 0.0]);
        assert_eq!(record.rotation(), [0.0, 0.0, 0.0, 1.0]);
        assert!(record.stamp > 0);
    }

    #[test]
    fn test_from_parts_normalizes_rotation() {
        let record = TransformRecord::from_parts("a", "b", [1.0, 2.0, 3.0], [0.0, 0.0, 0.0, 2.0], 7);
        assert_relative_eq!(record.rotation()[3], 1.0);
        assert_eq!(record.translation(), [1.0, 2.0, 3.0]);
        assert_eq!(record.stamp, 7);
    }

    #[test]
    fn test_degrees_to_radians() {
        assert_relative_eq!(AngleUnit::Degrees.to_radians(180.0), std::f64::consts::PI);
        assert_relative_eq!(AngleUnit::Radians.to_radians(1.5), 1.5);
    }

    #[test]
    fn test_transform_type_display() {
        assert_eq!(TransformType::Static.to_string(), "static");
        assert_eq!(TransformType::Dynamic.to_string(), "dynamic");
    }
}
