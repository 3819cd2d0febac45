//! Info panel visibility.
//!
//! The panel for a location slides in half a second after the location is
//! selected. Switching to another location while the panel is up swaps the
//! content without hiding it.

use super::layout::{location_info, LocationInfo};

/// Delay between selecting a location and showing its panel.
pub const SHOW_DELAY_SECS: f32 = 0.5;

/// Panel state.
#[derive(Clone, Debug, Default)]
pub struct InfoPanel {
    active: Option<&'static str>,
    show_at: Option<f32>,
    visible: bool,
}

impl InfoPanel {
    /// Hidden panel with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a location (zone entry or a fallback card click).
    pub fn select(&mut self, id: &'static str, now: f32) {
        self.active = Some(id);
        if !self.visible {
            self.show_at = Some(now + SHOW_DELAY_SECS);
        }
    }

    /// Close button.
    pub fn close(&mut self) {
        self.active = None;
        self.show_at = None;
        self.visible = false;
    }

    /// Advance the clock; returns true when the panel just became visible.
    pub fn tick(&mut self, now: f32) -> bool {
        match self.show_at {
            Some(at) if now >= at && self.active.is_some() => {
                self.show_at = None;
                self.visible = true;
                true
            }
            _ => false,
        }
    }

    /// Selected location id.
    pub fn active(&self) -> Option<&'static str> {
        self.active
    }

    /// Content to draw, if the panel is up.
    pub fn content(&self) -> Option<&'static LocationInfo> {
        if !self.visible {
            return None;
        }
        self.active.and_then(location_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_appears_after_delay() {
        let mut panel = InfoPanel::new();
        panel.select("skills", 1.0);

        assert!(!panel.tick(1.4));
        assert!(panel.content().is_none());

        assert!(panel.tick(1.5));
        assert_eq!(panel.content().map(|info| info.id), Some("skills"));
        assert!(!panel.tick(2.0));
    }

    #[test]
    fn test_switching_location_keeps_panel_up() {
        let mut panel = InfoPanel::new();
        panel.select("skills", 0.0);
        panel.tick(1.0);

        panel.select("projects", 2.0);
        assert_eq!(panel.content().map(|info| info.id), Some("projects"));
    }

    #[test]
    fn test_close_before_delay_cancels() {
        let mut panel = InfoPanel::new();
        panel.select("education", 0.0);
        panel.close();
        assert!(!panel.tick(5.0));
        assert!(panel.active().is_none());
    }
}
