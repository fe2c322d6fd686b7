//! `tf2_msgs/TFMessage` in little-endian CDR, as carried by ROS 2 over zenoh.

use cdr::{CdrLe, Infinite};
use log::warn;
use serde::{Deserialize, Serialize};
use tf_broadcaster::TransformRecord;

use crate::error::CommsError;

const NANOS_PER_SEC: i64 = 1_000_000_000;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

impl Time {
    /// Stamps outside the `i32` seconds range saturate to the nearest end
    pub fn from_nanos(stamp: i64) -> Self {
        match i32::try_from(stamp.div_euclid(NANOS_PER_SEC)) {
            Ok(sec) => Time {
                sec,
                nanosec: stamp.rem_euclid(NANOS_PER_SEC) as u32,
            },
            Err(_) => {
                warn!("Stamp {} ns does not fit a 32 bit time, saturating", stamp);
                if stamp < 0 {
                    Time {
                        sec: i32::MIN,
                        nanosec: 0,
                    }
                } else {
                    Time {
                        sec: i32::MAX,
                        nanosec: (NANOS_PER_SEC - 1) as u32,
                    }
                }
            }
        }
    }

    pub fn as_nanos(&self) -> i64 {
        self.sec as i64 * NANOS_PER_SEC + self.nanosec as i64
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Quaternion,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransformStamped {
    pub header: Header,
    pub child_frame_id: String,
    pub transform: Transform,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TFMessage {
    pub transforms: Vec<TransformStamped>,
}

impl From<&TransformRecord> for TransformStamped {
    fn from(record: &TransformRecord) -> Self {
        let [x, y, z] = record.translation();
        let [qx, qy, qz, qw] = record.rotation();
        TransformStamped {
            header: Header {
                stamp: Time::from_nanos(record.stamp),
                frame_id: record.frame_id.clone(),
            },
            child_frame_id: record.child_frame_id.clone(),
            transform: Transform {
                translation: Vector3 { x, y, z },
                rotation: Quaternion {
                    x: qx,
                    y: qy,
                    z: qz,
                    w: qw,
                },
            },
        }
    }
}

impl From<&TransformStamped> for TransformRecord {
    fn from(msg: &TransformStamped) -> Self {
        let t = msg.transform.translation;
        let r = msg.transform.rotation;
        TransformRecord::from_parts(
            msg.header.frame_id.as_str(),
            msg.child_frame_id.as_str(),
            [t.x, t.y, t.z],
            [r.x, r.y, r.z, r.w],
            msg.header.stamp.as_nanos(),
        )
    }
}

/// Serialize transforms into a TFMessage payload
pub fn serialize_tf_message(transforms: &[TransformRecord]) -> Result<Vec<u8>, CommsError> {
    let msg = TFMessage {
        transforms: transforms.iter().map(TransformStamped::from).collect(),
    };
    Ok(cdr::serialize::<_, _, CdrLe>(&msg, Infinite)?)
}

/// Deserialize a TFMessage payload into transforms
pub fn deserialize_tf_message(data: &[u8]) -> Result<Vec<TransformRecord>, CommsError> {
    let msg: TFMessage = cdr::deserialize(data)?;
    Ok(msg.transforms.iter().map(TransformRecord::from).collect())
}
