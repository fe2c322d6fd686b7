//! Adapters between host widgets and the broadcaster.
//!
//! Each adapter keeps a local mirror of what its widgets display. Slider
//! adapters are polled by the controller; text and status adapters invoke a
//! plain function with the context the caller hands in.

use log::warn;

use crate::error::PanelError;
use crate::mapper::{ValueMapper, SLIDER_MAX};
use crate::publisher::PublicationStatus;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedValue {
    pub current: f64,
    pub min: f64,
    pub max: f64,
    pub initial: f64,
}

impl BoundedValue {
    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Slider + spinbox + reset button bound to one value
#[derive(Clone, Debug)]
pub struct BoundedAdapter {
    value: BoundedValue,
    mapper: ValueMapper,
    slider_position: i32,
    numeric_display: f64,
}

impl BoundedAdapter {
    pub fn new(initial: f64, min: f64, max: f64) -> Result<Self, PanelError> {
        let mapper = ValueMapper::new(min, max)?;
        if !(min..=max).contains(&initial) {
            return Err(PanelError::InitialOutOfRange { initial, min, max });
        }
        Ok(BoundedAdapter {
            value: BoundedValue {
                current: initial,
                min,
                max,
                initial,
            },
            mapper,
            slider_position: mapper.to_slider(initial),
            numeric_display: initial,
        })
    }

    pub fn value(&self) -> f64 {
        self.value.current
    }

    pub fn bounds(&self) -> BoundedValue {
        self.value
    }

    pub fn slider_position(&self) -> i32 {
        self.slider_position
    }

    pub fn numeric_display(&self) -> f64 {
        self.numeric_display
    }

    pub fn on_slider_moved(&mut self, position: i32) {
        let position = position.clamp(0, SLIDER_MAX);
        self.slider_position = position;
        self.value.current = self.value.clamp(self.mapper.to_value(position));
        self.numeric_display = self.value.current;
    }

    pub fn on_numeric_entered(&mut self, value: f64) {
        if !value.is_finite() {
            warn!("Ignoring non-finite numeric entry {}", value);
            self.numeric_display = self.value.current;
            return;
        }
        let clamped = self.value.clamp(value);
        if clamped != value {
            warn!(
                "Numeric entry {} clamped to {} (range [{}, {}])",
                value, clamped, self.value.min, self.value.max
            );
        }
        self.set_current(clamped);
    }

    pub fn on_reset(&mut self) {
        self.set_current(self.value.initial);
    }

    fn set_current(&mut self, value: f64) {
        self.value.current = value;
        self.numeric_display = value;
        self.slider_position = self.mapper.to_slider(value);
    }
}

pub type CommitHandler<T> = fn(&mut T, &str);

/// Line edit + update button
pub struct TextAdapter<T> {
    current: String,
    pending: String,
    on_commit: CommitHandler<T>,
}

impl<T> TextAdapter<T> {
    pub fn new(initial: impl Into<String>, on_commit: CommitHandler<T>) -> Self {
        let initial = initial.into();
        TextAdapter {
            pending: initial.clone(),
            current: initial,
            on_commit,
        }
    }

    /// Last committed value
    pub fn current(&self) -> &str {
        &self.current
    }

    /// What the line edit currently shows
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn on_text_changed(&mut self, text: &str) {
        self.pending = text.to_string();
    }

    pub fn on_commit(&mut self, ctx: &mut T) {
        self.current = self.pending.clone();
        (self.on_commit)(ctx, &self.current);
    }

    /// Used when restoring persisted settings
    pub fn force_update(&mut self, text: &str, ctx: &mut T) {
        self.pending = text.to_string();
        self.on_commit(ctx);
    }
}

pub type StatusHandler<T> = fn(&mut T);

/// Three mutually exclusive radio buttons
pub struct StatusAdapter<T> {
    status: PublicationStatus,
    handlers: [StatusHandler<T>; 3],
}

impl<T> StatusAdapter<T> {
    /// Handlers are given in the order stopped, publish once static, publish continuous
    pub fn new(
        on_stopped: StatusHandler<T>,
        on_static: StatusHandler<T>,
        on_continuous: StatusHandler<T>,
    ) -> Self {
        StatusAdapter {
            status: PublicationStatus::Stopped,
            handlers: [on_stopped, on_static, on_continuous],
        }
    }

    pub fn status(&self) -> PublicationStatus {
        self.status
    }

    /// Returns whether a transition happened
    pub fn on_toggle(&mut self, target: PublicationStatus, ctx: &mut T) -> bool {
        if target == self.status {
            return false;
        }
        self.status = target;
        (self.handlers[target.index()])(ctx);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_rejects_initial_out_of_range() {
        assert!(BoundedAdapter::new(11.0, -10.0, 10.0).is_err());
        assert!(BoundedAdapter::new(0.0, 10.0, -10.0).is_err());
    }

    #[test]
    fn test_slider_moves_value_and_numeric_display() {
        let mut adapter = BoundedAdapter::new(0.0, -10.0, 10.0).unwrap();
        adapter.on_slider_moved(75_000);
        assert_relative_eq!(adapter.value(), 5.0);
        assert_relative_eq!(adapter.numeric_display(), 5.0);
        assert_eq!(adapter.slider_position(), 75_000);

        adapter.on_slider_moved(SLIDER_MAX + 10);
        assert_relative_eq!(adapter.value(), 10.0);
        assert_eq!(adapter.slider_position(), SLIDER_MAX);
    }

    #[test]
    fn test_numeric_entry_updates_slider() {
        let mut adapter = BoundedAdapter::new(0.0, -180.0, 180.0).unwrap();
        adapter.on_numeric_entered(90.0);
        assert_relative_eq!(adapter.value(), 90.0);
        assert_eq!(adapter.slider_position(), 75_000);
    }

    #[test]
    fn test_numeric_entry_is_clamped() {
        let mut adapter = BoundedAdapter::new(0.0, -10.0, 10.0).unwrap();
        adapter.on_numeric_entered(25.0);
        assert_relative_eq!(adapter.value(), 10.0);
        assert_relative_eq!(adapter.numeric_display(), 10.0);
        assert_eq!(adapter.slider_position(), SLIDER_MAX);

        adapter.on_numeric_entered(-25.0);
        assert_relative_eq!(adapter.value(), -10.0);
        assert_eq!(adapter.slider_position(), 0);
    }

    #[test]
    fn test_numeric_entry_ignores_nan() {
        let mut adapter = BoundedAdapter::new(1.0, -10.0, 10.0).unwrap();
        adapter.on_numeric_entered(f64::NAN);
        assert_relative_eq!(adapter.value(), 1.0);
        assert_relative_eq!(adapter.numeric_display(), 1.0);
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut adapter = BoundedAdapter::new(0.0, -10.0, 10.0).unwrap();
        adapter.on_numeric_entered(7.5);
        assert_relative_eq!(adapter.value(), 7.5);

        adapter.on_reset();
        assert_relative_eq!(adapter.value(), 0.0);
        assert_relative_eq!(adapter.numeric_display(), 0.0);
        let mapper = ValueMapper::new(-10.0, 10.0).unwrap();
        assert_eq!(adapter.slider_position(), mapper.to_slider(0.0));
    }

    fn record(log: &mut Vec<String>, text: &str) {
        log.push(text.to_string());
    }

    #[test]
    fn test_text_changes_stay_pending_until_commit() {
        let mut log = Vec::new();
        let mut adapter = TextAdapter::new("base", record);
        adapter.on_text_changed("bas");
        adapter.on_text_changed("base_link");
        assert_eq!(adapter.current(), "base");
        assert_eq!(adapter.pending(), "base_link");
        assert!(log.is_empty());

        adapter.on_commit(&mut log);
        assert_eq!(adapter.current(), "base_link");
        assert_eq!(log, vec!["base_link".to_string()]);
    }

    #[test]
    fn test_force_update_commits() {
        let mut log = Vec::new();
        let mut adapter = TextAdapter::new("base", record);
        adapter.on_text_changed("typing");
        adapter.force_update("robot_base", &mut log);
        assert_eq!(adapter.current(), "robot_base");
        assert_eq!(adapter.pending(), "robot_base");
        assert_eq!(log, vec!["robot_base".to_string()]);
    }

    #[derive(Default)]
    struct Calls {
        stopped: usize,
        once: usize,
        continuous: usize,
    }

    #[test]
    fn test_status_toggle_invokes_one_handler() {
        let mut calls = Calls::default();
        let mut adapter: StatusAdapter<Calls> = StatusAdapter::new(
            |c: &mut Calls| c.stopped += 1,
            |c: &mut Calls| c.once += 1,
            |c: &mut Calls| c.continuous += 1,
        );
        assert_eq!(adapter.status(), PublicationStatus::Stopped);

        assert!(!adapter.on_toggle(PublicationStatus::Stopped, &mut calls));
        assert_eq!(calls.stopped, 0);

        assert!(adapter.on_toggle(PublicationStatus::PublishOnceStatic, &mut calls));
        assert!(!adapter.on_toggle(PublicationStatus::PublishOnceStatic, &mut calls));
        assert!(adapter.on_toggle(PublicationStatus::PublishContinuous, &mut calls));
        assert!(adapter.on_toggle(PublicationStatus::Stopped, &mut calls));

        assert_eq!(calls.stopped, 1);
        assert_eq!(calls.once, 1);
        assert_eq!(calls.continuous, 1);
        assert_eq!(adapter.status(), PublicationStatus::Stopped);
    }
}
