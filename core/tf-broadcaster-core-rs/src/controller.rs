use log::{info, warn};

use crate::config::{PanelConfig, CHILD_FRAME_ID, FRAME_ID};
use crate::error::PanelError;
use crate::event::{Axis, FrameField, PanelEvent};
use crate::publisher::{PublicationStatus, TransformPublisher, TransformSink};
use crate::settings::PanelState;
use crate::types::{AngleUnit, TransformType};
use crate::widgets::{BoundedAdapter, StatusAdapter, TextAdapter};

/// Lifecycle hooks a hosting framework drives
pub trait PanelPlugin {
    fn start(&mut self);
    fn stop(&mut self);
    fn save_state(&self) -> PanelState;
    fn restore_state(&mut self, state: PanelState);
}

/// Wires the widget adapters to a [`TransformPublisher`].
///
/// Widget values are pulled into the publisher on every [`tick`](Self::tick)
/// while the controller is started.
pub struct PanelController<S: TransformSink> {
    config: PanelConfig,
    axes: [BoundedAdapter; 6],
    frame_id: TextAdapter<TransformPublisher<S>>,
    child_frame_id: TextAdapter<TransformPublisher<S>>,
    status: StatusAdapter<TransformPublisher<S>>,
    publisher: TransformPublisher<S>,
    armed: bool,
}

impl<S: TransformSink> PanelController<S> {
    pub fn new(config: PanelConfig, sink: S) -> Result<Self, PanelError> {
        let adapter = |axis: Axis| {
            let range = config.range(axis);
            BoundedAdapter::new(range.initial, range.min, range.max)
        };
        let axes = [
            adapter(Axis::X)?,
            adapter(Axis::Y)?,
            adapter(Axis::Z)?,
            adapter(Axis::Roll)?,
            adapter(Axis::Pitch)?,
            adapter(Axis::Yaw)?,
        ];

        let publisher = TransformPublisher::new(&config.frame_id, &config.child_frame_id, sink);
        let frame_id = TextAdapter::new(config.frame_id.as_str(), TransformPublisher::set_frame_id);
        let child_frame_id = TextAdapter::new(
            config.child_frame_id.as_str(),
            TransformPublisher::set_child_frame_id,
        );
        let status = StatusAdapter::new(
            TransformPublisher::set_stop_status,
            TransformPublisher::set_static_status,
            TransformPublisher::set_continuous_status,
        );

        Ok(PanelController {
            config,
            axes,
            frame_id,
            child_frame_id,
            status,
            publisher,
            armed: false,
        })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn axis(&self, axis: Axis) -> &BoundedAdapter {
        &self.axes[axis_index(axis)]
    }

    pub fn frame_field(&self, field: FrameField) -> &TextAdapter<TransformPublisher<S>> {
        match field {
            FrameField::FrameId => &self.frame_id,
            FrameField::ChildFrameId => &self.child_frame_id,
        }
    }

    pub fn status(&self) -> PublicationStatus {
        self.status.status()
    }

    pub fn publisher(&self) -> &TransformPublisher<S> {
        &self.publisher
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn handle(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::SliderMoved { axis, position } => {
                self.axes[axis_index(axis)].on_slider_moved(position)
            }
            PanelEvent::NumericEntered { axis, value } => {
                self.axes[axis_index(axis)].on_numeric_entered(value)
            }
            PanelEvent::Reset { axis } => self.axes[axis_index(axis)].on_reset(),
            PanelEvent::TextChanged { field, text } => match field {
                FrameField::FrameId => self.frame_id.on_text_changed(&text),
                FrameField::ChildFrameId => self.child_frame_id.on_text_changed(&text),
            },
            PanelEvent::Commit { field } => match field {
                FrameField::FrameId => self.frame_id.on_commit(&mut self.publisher),
                FrameField::ChildFrameId => self.child_frame_id.on_commit(&mut self.publisher),
            },
            PanelEvent::StatusToggled(target) => {
                self.status.on_toggle(target, &mut self.publisher);
            }
        }
    }

    /// Pull the widget values into the publisher and publish.
    /// Does nothing while the controller is stopped.
    pub fn tick(&mut self) -> Option<TransformType> {
        if !self.armed {
            return None;
        }
        let value = |axis| self.axes[axis_index(axis)].value();
        let (x, y, z) = (value(Axis::X), value(Axis::Y), value(Axis::Z));
        let (roll, pitch, yaw) = (value(Axis::Roll), value(Axis::Pitch), value(Axis::Yaw));

        self.publisher.set_pose(x, y, z);
        self.publisher
            .set_orientation(roll, pitch, yaw, AngleUnit::Degrees);
        self.publisher.publish_tick()
    }
}

fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::X => 0,
        Axis::Y => 1,
        Axis::Z => 2,
        Axis::Roll => 3,
        Axis::Pitch => 4,
        Axis::Yaw => 5,
    }
}

impl<S: TransformSink> PanelPlugin for PanelController<S> {
    fn start(&mut self) {
        let (frame_id, child_frame_id) = (self.frame_id.current(), self.child_frame_id.current());
        self.publisher.set_frames(frame_id, child_frame_id);
        self.armed = true;
        info!(
            "Panel started, ticking every {} ms ({} -> {})",
            self.config.tick_interval_ms, frame_id, child_frame_id
        );
    }

    fn stop(&mut self) {
        self.armed = false;
        info!("Panel stopped");
    }

    fn save_state(&self) -> PanelState {
        PanelState::new(self.frame_id.pending(), self.child_frame_id.pending())
    }

    fn restore_state(&mut self, state: PanelState) {
        let (frame_id, child_frame_id) = match state.frame_pair() {
            Some((frame_id, child_frame_id)) => (frame_id.to_string(), child_frame_id.to_string()),
            None => {
                warn!(
                    "Malformed frame ids {:?} in settings, using defaults",
                    state.frame_ids
                );
                (FRAME_ID.to_string(), CHILD_FRAME_ID.to_string())
            }
        };
        self.frame_id.force_update(&frame_id, &mut self.publisher);
        self.child_frame_id
            .force_update(&child_frame_id, &mut self.publisher);
    }
}
