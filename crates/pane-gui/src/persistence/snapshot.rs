//! Snapshot serialization for window layout

use serde::{Deserialize, Serialize};

use crate::math::{Rect, Size};
use crate::window::{Anchor, WindowState};

/// Persisted geometry and state of one window
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedWindow {
    pub name: String,
    /// Parent window name, absent for top-level windows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub rect: Rect,
    pub layer: i32,
    /// Anchor within the parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Anchor>,
    #[serde(default)]
    pub state: WindowState,
}

/// Snapshot of every window for persistence
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Version for migration support
    pub version: u32,
    /// Host surface size when captured
    pub surface: Size,
    /// Windows in ascending layer order
    pub windows: Vec<PersistedWindow>,
}

impl LayoutSnapshot {
    /// Current snapshot version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(surface: Size, windows: Vec<PersistedWindow>) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            surface,
            windows,
        }
    }

    /// Check if snapshot needs migration
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    /// Migrate snapshot to current version
    pub fn migrate(&mut self) {
        self.version = Self::CURRENT_VERSION;
    }

    pub fn window(&self, name: &str) -> Option<&PersistedWindow> {
        self.windows.iter().find(|w| w.name == name)
    }
}
