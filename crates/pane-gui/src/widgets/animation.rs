//! Multi-frame objects

use crate::object::ObjectId;

/// Ordered frames that share one position, size and layer
///
/// Frames are separate registry objects; only the current frame is shown
/// while the animation is shown.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    frames: Vec<ObjectId>,
    current: usize,
    shown: bool,
}

impl Animation {
    pub fn new(frames: Vec<ObjectId>) -> Self {
        Self {
            frames,
            current: 0,
            shown: false,
        }
    }

    #[inline]
    pub fn frames(&self) -> &[ObjectId] {
        &self.frames
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_frame(&self) -> Option<ObjectId> {
        self.frames.get(self.current).copied()
    }

    /// Whether the animation as a whole is shown
    #[inline]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub(crate) fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
    }

    /// Switch frames; out-of-range indices are rejected
    pub(crate) fn select(&mut self, frame: usize) -> bool {
        if frame >= self.frames.len() {
            return false;
        }
        self.current = frame;
        true
    }

    /// Desired visibility of every frame
    pub(crate) fn frame_visibility(&self) -> Vec<(ObjectId, bool)> {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, &f)| (f, self.shown && i == self.current))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_current_frame_visible() {
        let mut anim = Animation::new(vec![10, 11, 12]);
        anim.set_shown(true);
        assert!(anim.select(2));
        assert_eq!(
            anim.frame_visibility(),
            vec![(10, false), (11, false), (12, true)]
        );
    }

    #[test]
    fn test_hidden_animation_hides_all_frames() {
        let mut anim = Animation::new(vec![1, 2]);
        anim.set_shown(false);
        assert!(anim.frame_visibility().iter().all(|&(_, v)| !v));
    }

    #[test]
    fn test_invalid_frame_rejected() {
        let mut anim = Animation::new(vec![1, 2]);
        assert!(anim.select(1));
        assert!(!anim.select(2));
        assert_eq!(anim.current(), 1);
        assert_eq!(anim.current_frame(), Some(2));
    }

    #[test]
    fn test_empty_animation() {
        let mut anim = Animation::default();
        assert!(!anim.select(0));
        assert_eq!(anim.current_frame(), None);
    }
}
