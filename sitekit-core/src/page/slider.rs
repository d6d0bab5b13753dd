//! Hero image rotation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideChange {
    pub hidden: usize,
    pub shown: usize,
}

/// Index of the visible slide in a fixed ordered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideRotation {
    current: usize,
    count: usize,
}

impl SlideRotation {
    /// `None` when there is nothing to rotate.
    #[must_use]
    pub const fn new(count: usize) -> Option<Self> {
        if count == 0 {
            None
        } else {
            Some(Self { current: 0, count })
        }
    }

    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    pub const fn advance(&mut self) -> SlideChange {
        let hidden = self.current;
        self.current = (self.current + 1) % self.count;
        SlideChange {
            hidden,
            shown: self.current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slider_does_not_rotate() {
        assert!(SlideRotation::new(0).is_none());
    }

    #[test]
    fn wraps_modulo_count() {
        let mut rotation = SlideRotation::new(3).unwrap();
        let shown: Vec<_> = (0..5).map(|_| rotation.advance().shown).collect();
        assert_eq!(shown, vec![1, 2, 0, 1, 2]);
        assert_eq!(rotation.current(), 2);
    }

    #[test]
    fn single_slide_hides_and_shows_itself() {
        let mut rotation = SlideRotation::new(1).unwrap();
        assert_eq!(rotation.advance(), SlideChange { hidden: 0, shown: 0 });
    }
}
