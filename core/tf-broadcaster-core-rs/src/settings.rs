use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::APP_NAME;
use crate::error::PanelError;

/// Panel state persisted between sessions
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PanelState {
    /// `[frame_id, child_frame_id]`
    pub frame_ids: Vec<String>,
}

impl PanelState {
    pub fn new(frame_id: &str, child_frame_id: &str) -> Self {
        PanelState {
            frame_ids: vec![frame_id.to_string(), child_frame_id.to_string()],
        }
    }

    /// `None` unless exactly two ids are stored
    pub fn frame_pair(&self) -> Option<(&str, &str)> {
        match self.frame_ids.as_slice() {
            [frame_id, child_frame_id] => Some((frame_id.as_str(), child_frame_id.as_str())),
            _ => None,
        }
    }
}

/// confy backed storage for [`PanelState`]
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Store in the platform configuration directory
    pub fn new() -> Result<Self, PanelError> {
        let path = confy::get_configuration_file_path(APP_NAME, "settings")?;
        Ok(SettingsStore { path })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        SettingsStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unreadable settings yield an empty state, which restores defaults
    pub fn load(&self) -> PanelState {
        match confy::load_path(&self.path) {
            Ok(state) => state,
            Err(e) => {
                warn!("Could not read settings from {:?}: {}", self.path, e);
                PanelState::default()
            }
        }
    }

    pub fn save(&self, state: &PanelState) -> Result<(), PanelError> {
        confy::store_path(&self.path, state)?;
        Ok(())
    }
}
