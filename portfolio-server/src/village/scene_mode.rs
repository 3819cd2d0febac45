//! Scene Mode
//!
//! Decides whether the village shows the loading screen, the live 3D scene
//! or the 2D fallback cards.
//!
//! ```text
//!            load_succeeded
//!   Loading ───────────────▶ SceneActive
//!      │  ▲                      │
//!      │  │ toggle_view          │ runtime_error / toggle_view
//!      ▼  │                      ▼
//!   FallbackActive ◀─────────────┘
//!   (load_failed, tick past timeout)
//! ```

use serde::Serialize;
use tracing::{info, warn};

use super::events::VillageEvent;

/// Default time allowed for the 3D scene to come up.
pub const DEFAULT_LOAD_TIMEOUT_SECS: f32 = 15.0;

/// Simulated progress step.
pub const PROGRESS_STEP: u8 = 2;

/// Seconds between progress steps.
pub const PROGRESS_INTERVAL_SECS: f32 = 0.1;

/// Minimum time the loading screen stays up on the first visit.
pub const INITIAL_SETTLE_SECS: f32 = 3.0;

/// Minimum time the loading screen stays up when returning from 2D.
pub const RELOAD_SETTLE_SECS: f32 = 2.0;

/// Why the 2D view is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FallbackReason {
    /// Renderer could not be created
    LoadFailed,
    /// Loading took longer than the timeout
    Timeout,
    /// Renderer failed after starting
    RuntimeError,
    /// Visitor switched to 2D
    UserSelected,
}

/// What the village is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SceneMode {
    /// Loading screen with progress bar
    Loading,
    /// Live 3D scene
    SceneActive,
    /// 2D location cards
    FallbackActive(FallbackReason),
}

/// Scene mode state machine.
#[derive(Clone, Debug)]
pub struct SceneGate {
    mode: SceneMode,
    timeout: f32,
    loading_since: f32,
    /// Minimum loading time for the current attempt
    settle: f32,
}

impl Default for SceneGate {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_TIMEOUT_SECS)
    }
}

impl SceneGate {
    /// Start in `Loading` at time zero.
    pub fn new(timeout_secs: f32) -> Self {
        Self {
            mode: SceneMode::Loading,
            timeout: timeout_secs,
            loading_since: 0.0,
            settle: INITIAL_SETTLE_SECS,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> SceneMode {
        self.mode
    }

    /// Check if the 3D scene should be rendered.
    pub fn is_scene_active(&self) -> bool {
        self.mode == SceneMode::SceneActive
    }

    /// Loading bar percentage at `now`: +2 every 100 ms, capped at 100.
    /// Reads 100 outside `Loading`.
    pub fn progress(&self, now: f32) -> u8 {
        if self.mode != SceneMode::Loading {
            return 100;
        }
        let steps = ((now - self.loading_since).max(0.0) / PROGRESS_INTERVAL_SECS).floor();
        (steps * PROGRESS_STEP as f32).min(100.0) as u8
    }

    /// Check if the current loading attempt has run its minimum time.
    pub fn is_settled(&self, now: f32) -> bool {
        self.mode == SceneMode::Loading && now - self.loading_since >= self.settle
    }

    /// The scene is built. Loading finishes once it has settled; until
    /// then the loading screen (and its 2D button) stays up.
    pub fn scene_ready(&mut self, now: f32) -> Option<VillageEvent> {
        if !self.is_settled(now) {
            return None;
        }
        self.load_succeeded(now)
    }

    /// Renderer reported ready.
    pub fn load_succeeded(&mut self, now: f32) -> Option<VillageEvent> {
        match self.mode {
            SceneMode::Loading => self.transition(now, SceneMode::SceneActive),
            _ => None,
        }
    }

    /// Renderer could not start.
    pub fn load_failed(&mut self, now: f32) -> Option<VillageEvent> {
        match self.mode {
            SceneMode::Loading => {
                warn!("3D scene failed to load");
                self.transition(now, SceneMode::FallbackActive(FallbackReason::LoadFailed))
            }
            _ => None,
        }
    }

    /// Renderer failed while loading or running.
    pub fn runtime_error(&mut self, now: f32) -> Option<VillageEvent> {
        match self.mode {
            SceneMode::Loading | SceneMode::SceneActive => {
                warn!("3D scene runtime error");
                self.transition(now, SceneMode::FallbackActive(FallbackReason::RuntimeError))
            }
            SceneMode::FallbackActive(_) => None,
        }
    }

    /// Advance the clock. Forces the fallback once loading outlasts the
    /// timeout.
    pub fn tick(&mut self, now: f32) -> Option<VillageEvent> {
        if self.mode == SceneMode::Loading && now - self.loading_since > self.timeout {
            warn!(timeout = self.timeout, "3D scene load timed out");
            return self.transition(now, SceneMode::FallbackActive(FallbackReason::Timeout));
        }
        None
    }

    /// 2D/3D switch. Switching back to 3D restarts loading, whatever sent
    /// the village to 2D.
    pub fn toggle_view(&mut self, now: f32) -> Option<VillageEvent> {
        let next = match self.mode {
            SceneMode::Loading | SceneMode::SceneActive => {
                SceneMode::FallbackActive(FallbackReason::UserSelected)
            }
            SceneMode::FallbackActive(_) => {
                self.loading_since = now;
                self.settle = RELOAD_SETTLE_SECS;
                SceneMode::Loading
            }
        };
        self.transition(now, next)
    }

    fn transition(&mut self, now: f32, to: SceneMode) -> Option<VillageEvent> {
        let from = self.mode;
        if from == to {
            return None;
        }
        info!(?from, ?to, "Scene mode changed");
        self.mode = to;
        Some(VillageEvent::scene_mode_changed(now, from, to))
    }
}
