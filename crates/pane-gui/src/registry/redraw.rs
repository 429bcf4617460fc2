//! Redraw-needed bookkeeping

use tracing::trace;

/// Tracks whether the next frame must be drawn
///
/// A request keeps the flag set; after `quiet_frames` consecutive frames
/// without a new request it clears itself. In continuous mode every frame
/// draws.
#[derive(Clone, Debug)]
pub struct RedrawState {
    needed: bool,
    requested: bool,
    idle_frames: u32,
    quiet_frames: u32,
    continuous: bool,
}

impl RedrawState {
    /// Default number of quiet frames before the flag clears
    pub const DEFAULT_QUIET_FRAMES: u32 = 2;

    pub fn new(quiet_frames: u32, continuous: bool) -> Self {
        Self {
            needed: true,
            requested: true,
            idle_frames: 0,
            quiet_frames,
            continuous,
        }
    }

    /// Mark that something visible changed
    #[inline]
    pub fn request(&mut self) {
        self.needed = true;
        self.requested = true;
    }

    /// Whether the next render pass draws
    #[inline]
    pub fn needed(&self) -> bool {
        self.needed || self.continuous
    }

    #[inline]
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Close out a frame
    pub fn end_frame(&mut self) {
        if self.continuous {
            return;
        }
        if self.requested {
            self.requested = false;
            self.idle_frames = 0;
            return;
        }
        if self.needed {
            self.idle_frames += 1;
            if self.idle_frames >= self.quiet_frames {
                trace!("redraw flag cleared after {} quiet frames", self.idle_frames);
                self.needed = false;
                self.idle_frames = 0;
            }
        }
    }
}

impl Default for RedrawState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUIET_FRAMES, false)
    }
}
