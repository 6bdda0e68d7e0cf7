use std::fmt;

use crate::surface::RenderCell;

/// Identifies one step activation. Tokens only ever increase within a session,
/// so a frame carrying an older token than the active one is stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepToken(u64);

impl StepToken {
    /// Token for the activation after this one.
    #[inline] pub fn next(self) -> Self { Self(self.0 + 1) }
}

impl fmt::Display for StepToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

/// A full extrusion collection to hand to the render surface.
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthFrame {
    pub token: StepToken,
    /// 0 for the zeroed frame, then `1..=total`.
    pub frame: u32,
    pub progress: f64,
    pub cells: Vec<RenderCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum GrowthState {
    #[default]
    Idle,
    Animating {
        target: Vec<RenderCell>,
        frame: u32,
        token: StepToken,
    },
}

/// Linear growth of extrusion heights from zero to target over a fixed
/// number of frames, advanced one frame per external tick.
#[derive(Debug, Clone)]
pub struct GrowthAnimator {
    total_frames: u32,
    state: GrowthState,
}

impl GrowthAnimator {
    pub fn new(total_frames: u32) -> Self {
        Self { total_frames: total_frames.max(1), state: GrowthState::Idle }
    }

    #[inline] pub fn total_frames(&self) -> u32 { self.total_frames }

    #[inline] pub fn state(&self) -> &GrowthState { &self.state }

    #[inline] pub fn is_animating(&self) -> bool { matches!(self.state, GrowthState::Animating { .. }) }

    /// Token of the run in flight, if any.
    pub fn token(&self) -> Option<StepToken> {
        match self.state {
            GrowthState::Animating { token, .. } => Some(token),
            GrowthState::Idle => None,
        }
    }

    /// Drop any run in flight.
    pub fn cancel(&mut self) {
        if let GrowthState::Animating { token, frame, .. } = self.state {
            tracing::trace!(%token, frame, "growth cancelled");
        }
        self.state = GrowthState::Idle;
    }

    /// Replace any run in flight with a new one towards `target` and return
    /// the zeroed first frame. An empty target leaves the animator idle.
    pub fn start(&mut self, target: Vec<RenderCell>, token: StepToken) -> GrowthFrame {
        self.cancel();
        let cells = target.iter().map(|c| c.scaled(0.0)).collect();
        if !target.is_empty() {
            self.state = GrowthState::Animating { target, frame: 0, token };
        }
        GrowthFrame { token, frame: 0, progress: 0.0, cells }
    }

    /// Advance one frame of the run started under `active`.
    ///
    /// Returns `None` when idle, or when the run in flight belongs to an
    /// older activation (it is dropped). The final frame carries exactly the
    /// target heights and leaves the animator idle.
    pub fn tick(&mut self, active: StepToken) -> Option<GrowthFrame> {
        let GrowthState::Animating { target, frame, token } = &mut self.state else { return None };
        if *token != active {
            tracing::trace!(stale = %token, %active, "dropping stale growth run");
            self.state = GrowthState::Idle;
            return None;
        }

        *frame += 1;
        let progress = (*frame as f64 / self.total_frames as f64).min(1.0);
        let out = GrowthFrame {
            token: *token,
            frame: *frame,
            progress,
            cells: target.iter().map(|c| c.scaled(progress)).collect(),
        };
        if progress >= 1.0 {
            self.state = GrowthState::Idle;
        }
        Some(out)
    }
}
