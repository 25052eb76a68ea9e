//! Page chrome that lives next to the booking flow but shares no state with it.

/// Distance (px) an element must be inside the viewport before it is revealed.
pub const REVEAL_OFFSET: f64 = 100.0;

/// Mobile navigation menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool { self.open }

    pub fn toggle(&mut self) { self.open = !self.open; }

    /// Following a menu link closes the menu.
    pub fn link_clicked(&mut self) { self.open = false; }

    /// A click anywhere outside both the menu and its button closes it.
    pub fn document_clicked(&mut self, inside_menu: bool, inside_button: bool) {
        if !inside_menu && !inside_button {
            self.open = false;
        }
    }
}

/// Scroll-triggered reveal for a fixed set of marked elements. Once revealed, stays revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self { Self { revealed: vec![false; count] } }

    pub fn is_revealed(&self, i: usize) -> bool { self.revealed.get(i).copied().unwrap_or(false) }

    pub fn revealed_count(&self) -> usize { self.revealed.iter().filter(|r| **r).count() }

    /// `tops[i]` is element i's top relative to the viewport. Returns the indices revealed by
    /// this scan. Extra elements beyond the tracked count are ignored.
    pub fn scan(&mut self, viewport_height: f64, tops: &[f64]) -> Vec<usize> {
        let line = viewport_height - REVEAL_OFFSET;
        let mut newly = Vec::new();
        for (i, (seen, top)) in self.revealed.iter_mut().zip(tops).enumerate() {
            if !*seen && *top < line {
                *seen = true;
                newly.push(i);
            }
        }
        newly
    }
}
