//! Image Gallery
//!
//! Index over a fixed image list with wrap-around navigation and a fullscreen
//! flag. Used by the product page and by each review's mini gallery.

/// What a key press did to the fullscreen view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Closed,
    Moved,
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gallery {
    images: Vec<String>,
    current: usize,
    fullscreen: bool,
}

impl Gallery {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            current: 0,
            fullscreen: false,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Step by `direction` (usually ±1), wrapping at both ends.
    pub fn step(&mut self, direction: isize) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.current = (self.current as isize + direction).rem_euclid(len) as usize;
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn prev(&mut self) {
        self.step(-1);
    }

    /// Select an image without opening fullscreen; out-of-range is ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.images.len() {
            self.current = index;
        }
    }

    /// Select `index` and open the fullscreen view.
    pub fn open(&mut self, index: usize) {
        if self.images.is_empty() {
            return;
        }
        self.select(index);
        self.fullscreen = true;
    }

    pub fn close(&mut self) {
        self.fullscreen = false;
    }

    /// "i / n" label of the fullscreen overlay
    pub fn counter(&self) -> String {
        if self.images.is_empty() {
            return String::new();
        }
        format!("{} / {}", self.current + 1, self.images.len())
    }

    /// Keyboard handling while fullscreen: Escape closes, arrows navigate.
    pub fn handle_key(&mut self, key: &str) -> KeyAction {
        if !self.fullscreen {
            return KeyAction::Ignored;
        }
        match key {
            "Escape" => {
                self.close();
                KeyAction::Closed
            }
            "ArrowRight" => {
                self.next();
                KeyAction::Moved
            }
            "ArrowLeft" => {
                self.prev();
                KeyAction::Moved
            }
            _ => KeyAction::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery(n: usize) -> Gallery {
        Gallery::new((0..n).map(|i| format!("/img/{}.jpg", i)).collect())
    }

    #[test]
    fn test_next_cycles_back_to_start() {
        let mut g = gallery(4);
        g.select(2);
        for _ in 0..4 {
            g.next();
        }
        assert_eq!(g.index(), 2);
    }

    #[test]
    fn test_prev_from_first_wraps_to_last() {
        let mut g = gallery(3);
        g.prev();
        assert_eq!(g.index(), 2);
        assert_eq!(g.current(), Some("/img/2.jpg"));
    }

    #[test]
    fn test_empty_gallery_is_inert() {
        let mut g = Gallery::default();
        g.next();
        g.open(0);
        assert!(!g.is_fullscreen());
        assert_eq!(g.current(), None);
        assert_eq!(g.counter(), "");
    }

    #[test]
    fn test_open_and_counter() {
        let mut g = gallery(5);
        g.open(3);
        assert!(g.is_fullscreen());
        assert_eq!(g.counter(), "4 / 5");
    }

    #[test]
    fn test_keys_only_when_fullscreen() {
        let mut g = gallery(2);
        assert_eq!(g.handle_key("Escape"), KeyAction::Ignored);
        g.open(0);
        assert_eq!(g.handle_key("ArrowLeft"), KeyAction::Moved);
        assert_eq!(g.index(), 1);
        assert_eq!(g.handle_key("Enter"), KeyAction::Ignored);
        assert_eq!(g.handle_key("Escape"), KeyAction::Closed);
        assert!(!g.is_fullscreen());
    }
}
