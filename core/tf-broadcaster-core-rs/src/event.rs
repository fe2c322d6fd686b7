use std::fmt;
use std::str::FromStr;

use crate::error::PanelError;
use crate::publisher::PublicationStatus;

/// Slider backed inputs of the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
    Roll,
    Pitch,
    Yaw,
}

impl Axis {
    pub const ALL: [Axis; 6] = [Axis::X, Axis::Y, Axis::Z, Axis::Roll, Axis::Pitch, Axis::Yaw];

    pub fn is_angular(self) -> bool {
        matches!(self, Axis::Roll | Axis::Pitch | Axis::Yaw)
    }
}

impl FromStr for Axis {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            "roll" => Ok(Axis::Roll),
            "pitch" => Ok(Axis::Pitch),
            "yaw" => Ok(Axis::Yaw),
            other => Err(PanelError::Command(format!("unknown axis '{}'", other))),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::Roll => "roll",
            Axis::Pitch => "pitch",
            Axis::Yaw => "yaw",
        };
        f.write_str(name)
    }
}

/// Text backed inputs of the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameField {
    FrameId,
    ChildFrameId,
}

impl FromStr for FrameField {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frame_id" => Ok(FrameField::FrameId),
            "child_frame_id" => Ok(FrameField::ChildFrameId),
            other => Err(PanelError::Command(format!("unknown field '{}'", other))),
        }
    }
}

impl FromStr for PublicationStatus {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stop" => Ok(PublicationStatus::Stopped),
            "static" => Ok(PublicationStatus::PublishOnceStatic),
            "continuous" => Ok(PublicationStatus::PublishContinuous),
            other => Err(PanelError::Command(format!("unknown status '{}'", other))),
        }
    }
}

/// Widget event delivered by the host
#[derive(Clone, Debug, PartialEq)]
pub enum PanelEvent {
    SliderMoved { axis: Axis, position: i32 },
    NumericEntered { axis: Axis, value: f64 },
    Reset { axis: Axis },
    TextChanged { field: FrameField, text: String },
    Commit { field: FrameField },
    StatusToggled(PublicationStatus),
}

fn parse_number<T: FromStr>(s: &str) -> Result<T, PanelError> {
    s.parse()
        .map_err(|_| PanelError::Command(format!("'{}' is not a number", s)))
}

impl FromStr for PanelEvent {
    type Err = PanelError;

    /// Parses one command line, e.g. `roll 45`, `slide x 50000`, `reset z`,
    /// `edit frame_id base_link`, `commit frame_id`, `status continuous`
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            ["slide", axis, position] => Ok(PanelEvent::SliderMoved {
                axis: axis.parse()?,
                position: parse_number(position)?,
            }),
            ["reset", axis] => Ok(PanelEvent::Reset { axis: axis.parse()? }),
            ["edit", field, text] => Ok(PanelEvent::TextChanged {
                field: field.parse()?,
                text: text.to_string(),
            }),
            ["edit", field] => Ok(PanelEvent::TextChanged {
                field: field.parse()?,
                text: String::new(),
            }),
            ["commit", field] => Ok(PanelEvent::Commit {
                field: field.parse()?,
            }),
            ["status", status] => Ok(PanelEvent::StatusToggled(status.parse()?)),
            [axis, value] => Ok(PanelEvent::NumericEntered {
                axis: axis.parse()?,
                value: parse_number(value)?,
            }),
            _ => Err(PanelError::Command(format!("cannot parse '{}'", line.trim()))),
        }
    }
}
