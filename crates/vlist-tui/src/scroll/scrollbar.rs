//! L4 Atomic Layer: Scrollbar thumb geometry and visibility
//!
//! The thumb is shown while scrolling and hidden a fixed delay after the
//! scroll stops. Hiding is driven by host timestamps through [`ScrollbarThumb::tick`].

/// Thumb state for one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarThumb {
    /// Thumb length as a fraction of the track
    pub size_ratio: f64,
    /// Thumb offset as a fraction of the free track
    pub position_ratio: f64,
    visible: bool,
    hide_at: Option<f64>,
    min_ratio: f64,
}

impl ScrollbarThumb {
    pub fn new(min_ratio: f64) -> Self {
        Self {
            size_ratio: 1.0,
            position_ratio: 0.0,
            visible: false,
            hide_at: None,
            min_ratio: min_ratio.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Deadline of a pending hide, if any
    pub fn hide_at(&self) -> Option<f64> {
        self.hide_at
    }

    /// Recompute thumb geometry
    ///
    /// # Arguments
    /// * `client` - Visible extent along the axis
    /// * `content` - Total scrollable extent along the axis
    /// * `position` - Current scroll offset
    pub fn update(&mut self, client: f64, content: f64, position: f64) {
        self.size_ratio = if content > 0.0 && client < content {
            (client / content).clamp(self.min_ratio, 1.0)
        } else {
            1.0
        };
        let max = content - client;
        self.position_ratio = if max > 0.0 {
            (position / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Show the thumb and cancel any pending hide
    pub fn show(&mut self) {
        self.visible = true;
        self.hide_at = None;
    }

    /// Hide the thumb once `delay` milliseconds have passed after `now`
    pub fn start_hiding(&mut self, now: f64, delay: f64) {
        if self.visible {
            self.hide_at = Some(now + delay.max(0.0));
        }
    }

    /// Advance the hide timer; returns true if the thumb just disappeared
    pub fn tick(&mut self, now: f64) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.visible = false;
                self.hide_at = None;
                true
            }
            _ => false,
        }
    }

    /// Cell span of the thumb on a track `track_len` cells long
    pub fn span(&self, track_len: u16) -> (u16, u16) {
        if track_len == 0 {
            return (0, 0);
        }
        let track = track_len as f64;
        let len = (track * self.size_ratio).round().clamp(1.0, track);
        let offset = ((track - len) * self.position_ratio).round();
        (offset as u16, len as u16)
    }
}

impl Default for ScrollbarThumb {
    fn default() -> Self {
        Self::new(0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_geometry() {
        let mut thumb = ScrollbarThumb::new(0.05);
        thumb.update(500.0, 2000.0, 750.0);
        assert_eq!(thumb.size_ratio, 0.25);
        assert_eq!(thumb.position_ratio, 0.5);

        // content fits
        thumb.update(500.0, 300.0, 0.0);
        assert_eq!(thumb.size_ratio, 1.0);
        assert_eq!(thumb.position_ratio, 0.0);
    }

    #[test]
    fn test_min_ratio() {
        let mut thumb = ScrollbarThumb::new(0.05);
        thumb.update(500.0, 1_000_000.0, 0.0);
        assert_eq!(thumb.size_ratio, 0.05);
    }

    #[test]
    fn test_hide_after_delay() {
        let mut thumb = ScrollbarThumb::default();
        thumb.show();
        thumb.start_hiding(1000.0, 400.0);
        assert!(!thumb.tick(1399.0));
        assert!(thumb.is_visible());
        assert!(thumb.tick(1400.0));
        assert!(!thumb.is_visible());
    }

    #[test]
    fn test_show_cancels_hide() {
        let mut thumb = ScrollbarThumb::default();
        thumb.show();
        thumb.start_hiding(0.0, 400.0);
        thumb.show();
        assert!(!thumb.tick(1000.0));
        assert!(thumb.is_visible());
    }

    #[test]
    fn test_span() {
        let mut thumb = ScrollbarThumb::default();
        thumb.update(500.0, 2000.0, 1500.0);
        assert_eq!(thumb.span(20), (15, 5));
        assert_eq!(thumb.span(0), (0, 0));
    }
}
