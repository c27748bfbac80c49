//! Scroll cosmetics: hide the header while scrolling down, reveal sections
//! as they come into view.

/// Class toggled on the `<header>` element.
pub const HEADER_HIDDEN_CLASS: &str = "header-hidden";
/// Class added to reveal targets once they are on screen.
pub const REVEALED_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Shown,
    Hidden,
}

/// Remembers the previous scroll offset so each scroll event can tell
/// direction. Lives as long as the page.
#[derive(Debug, Clone)]
pub struct HeaderTracker {
    last_scroll: f64,
    hide_after: f64,
    state: HeaderState,
}

impl HeaderTracker {
    pub fn new(hide_after: f64) -> Self {
        HeaderTracker {
            last_scroll: 0.0,
            hide_after,
            state: HeaderState::Shown,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> HeaderState {
        self.state
    }

    /// Feed the current vertical offset; returns the header state to apply.
    pub fn update(&mut self, scroll_y: f64) -> HeaderState {
        // Overscroll bounce on some browsers reports negative offsets.
        let y = scroll_y.max(0.0);
        if y <= 0.0 {
            self.state = HeaderState::Shown;
        } else if y > self.last_scroll && y > self.hide_after {
            self.state = HeaderState::Hidden;
        } else if y < self.last_scroll {
            self.state = HeaderState::Shown;
        }
        self.last_scroll = y;
        self.state
    }
}

/// Whether an element whose top edge sits at `top` (relative to the
/// viewport) should be revealed.
pub fn is_revealed(top: f64, viewport_height: f64, offset: f64) -> bool {
    top < viewport_height - offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_hides_on_scroll_down_past_threshold() {
        let mut t = HeaderTracker::new(100.0);
        assert_eq!(t.update(50.0), HeaderState::Shown);
        assert_eq!(t.update(150.0), HeaderState::Hidden);
        assert_eq!(t.update(300.0), HeaderState::Hidden);
        assert_eq!(t.update(280.0), HeaderState::Shown);
    }

    #[test]
    fn test_header_holds_state_when_still() {
        let mut t = HeaderTracker::new(100.0);
        t.update(400.0);
        assert_eq!(t.update(400.0), HeaderState::Hidden);
    }

    #[test]
    fn test_header_shown_at_top() {
        let mut t = HeaderTracker::new(100.0);
        t.update(500.0);
        assert_eq!(t.update(-20.0), HeaderState::Shown);
        assert_eq!(t.state(), HeaderState::Shown);
    }

    #[test]
    fn test_reveal_threshold() {
        assert!(is_revealed(500.0, 800.0, 150.0));
        assert!(!is_revealed(700.0, 800.0, 150.0));
        assert!(!is_revealed(650.0, 800.0, 150.0));
    }
}
