//! Follow-suppression coordinator.
//!
//! DESIGN
//! ======
//! The map starts out following the user's live location. The first manual
//! camera interaction (a pitch drag or a press on the map surface) switches to
//! `Manual` and it stays there for the life of the screen. The coordinator is
//! owned by [`crate::screen::MapScreen`] and handed to the slider by `&mut`
//! on grant, so there is exactly one writer and no ambient global flag.

#[cfg(test)]
#[path = "follow_test.rs"]
mod follow_test;

/// Whether the camera recenters on the user automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowMode {
    /// Camera tracks the user's location.
    #[default]
    Following,
    /// User has taken manual control of the camera.
    Manual,
}

/// What kind of manual interaction ended follow mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualSource {
    /// Drag grant on the pitch slider.
    SliderDrag,
    /// Press or pan directly on the map surface.
    MapInteraction,
}

/// One-way `Following -> Manual` state cell.
#[derive(Debug, Clone, Default)]
pub struct FollowCoordinator {
    mode: FollowMode,
}

impl FollowCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> FollowMode {
        self.mode
    }

    /// Read by the renderer before every camera-follow decision.
    #[must_use]
    pub fn is_following(&self) -> bool {
        self.mode == FollowMode::Following
    }

    /// Switch to `Manual`. Returns `true` only on the call that actually
    /// transitioned; later calls are no-ops.
    pub fn suppress(&mut self, source: ManualSource) -> bool {
        if self.mode == FollowMode::Manual {
            return false;
        }
        self.mode = FollowMode::Manual;
        tracing::debug!(?source, "follow mode suppressed");
        true
    }

    /// Signal from the map collaborator that the user touched the map.
    pub fn on_manual_map_interaction(&mut self) -> bool {
        self.suppress(ManualSource::MapInteraction)
    }

    /// Restore automatic follow. Nothing in the map screen calls this on its
    /// own; it exists for a host that decides when auto-follow should return.
    pub fn resume(&mut self) -> bool {
        if self.mode == FollowMode::Following {
            return false;
        }
        self.mode = FollowMode::Following;
        tracing::debug!("follow mode resumed");
        true
    }
}
