//! Layout capture and restore

use tracing::{debug, warn};

use super::Gui;
use crate::persistence::{LayoutSnapshot, PersistedWindow};
use crate::window::{Placement, WindowState};

impl Gui {
    /// Capture the geometry and state of every window
    ///
    /// Maximized windows record the rectangle they return to on split.
    pub fn snapshot(&self) -> LayoutSnapshot {
        let mut windows: Vec<PersistedWindow> = self
            .windows
            .ids()
            .into_iter()
            .filter_map(|id| {
                let object = self.registry.get(id)?;
                let window = object.as_window()?;
                let parent = window.parent().and_then(|p| self.registry.get(p));
                let rect = match (&window.restore, window.state()) {
                    (Some(restore), WindowState::Maximized) => restore.rect,
                    _ => object.visual.rect(),
                };
                Some(PersistedWindow {
                    name: object.visual.name().to_string(),
                    parent: parent.map(|p| p.visual.name().to_string()),
                    rect,
                    layer: object.visual.layer(),
                    anchor: parent.and_then(|p| p.as_window()).and_then(|p| p.anchor_of(id)),
                    state: window.state(),
                })
            })
            .collect();
        windows.sort_by_key(|w| w.layer);
        LayoutSnapshot::new(self.surface(), windows)
    }

    /// Restore windows present by name from a snapshot
    ///
    /// Unknown names are skipped with a warning. Top-level windows are
    /// raised in snapshot order so their stacking matches. Returns the
    /// number of windows restored.
    pub fn apply_snapshot(&mut self, snapshot: &LayoutSnapshot) -> usize {
        let mut snapshot = snapshot.clone();
        if snapshot.needs_migration() {
            snapshot.migrate();
        }

        let mut applied = Vec::new();
        for persisted in &snapshot.windows {
            let Some(id) = self.windows.id_of(&persisted.name) else {
                warn!("snapshot window {:?} does not exist, skipping", persisted.name);
                continue;
            };
            if let Err(e) = self.split(id).and_then(|_| self.restore_window(id)) {
                warn!("could not reset window {:?}: {}", persisted.name, e);
                continue;
            }

            let parent = self.parent_of(id);
            if let (Some(anchor), Some(_)) = (persisted.anchor, parent) {
                if let Err(e) = self.set_anchor(id, anchor) {
                    warn!("snapshot anchor for {:?} rejected: {}", persisted.name, e);
                }
            }
            if let Some(visual) = self.registry.visual_mut(id) {
                visual.set_size(persisted.rect.size());
            }
            self.windows.relayout(&mut self.registry, id);

            let free = match parent.and_then(|p| self.registry.window(p)) {
                Some(p) => p
                    .anchor_of(id)
                    .is_some_and(|a| matches!(a.placement(), Placement::Propagate)),
                None => true,
            };
            if free {
                self.registry.set_position(id, persisted.rect.position());
                self.windows.constrain_children(&mut self.registry, id);
            }

            let result = match persisted.state {
                WindowState::Normal => Ok(()),
                WindowState::Maximized => self.maximize(id),
                WindowState::Minimized => self.minimize(id),
            };
            if let Err(e) = result {
                warn!("snapshot state for {:?} not applied: {}", persisted.name, e);
            }
            applied.push((id, persisted.state));
        }

        for &(id, state) in &applied {
            if state != WindowState::Minimized {
                self.windows.focus(&mut self.registry, id);
            }
        }
        debug!("restored {} windows from snapshot", applied.len());
        applied.len()
    }
}
