use std::time::{Duration, Instant};

/// Auto-advancing, looping slide position over `len` images.
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    index: usize,
    interval: Duration,
    last_advance: Instant,
}

impl Carousel {
    pub fn new(len: usize, interval: Duration, now: Instant) -> Self {
        Self {
            len,
            index: 0,
            interval,
            last_advance: now,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current slide, or `None` when there are no slides.
    pub fn index(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.index)
    }

    /// Advance one slide if the interval has elapsed. Returns true on change.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.len < 2 || now.duration_since(self.last_advance) < self.interval {
            return false;
        }
        self.index = (self.index + 1) % self.len;
        self.last_advance = now;
        true
    }

    pub fn next(&mut self, now: Instant) {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len;
        }
        self.last_advance = now;
    }

    pub fn prev(&mut self, now: Instant) {
        if !self.is_empty() {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.last_advance = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: Duration = Duration::from_secs(2);

    #[test]
    fn empty_carousel_has_no_slides() {
        let start = Instant::now();
        let mut carousel = Carousel::new(0, SLIDE, start);
        assert!(carousel.is_empty());
        assert_eq!(carousel.index(), None);

        assert!(!carousel.tick(start + SLIDE * 3));
        carousel.next(start);
        carousel.prev(start);
        assert_eq!(carousel.index(), None);
    }

    #[test]
    fn advances_after_interval_and_loops() {
        let start = Instant::now();
        let mut carousel = Carousel::new(2, SLIDE, start);
        assert_eq!(carousel.index(), Some(0));

        assert!(!carousel.tick(start + Duration::from_millis(1999)));
        assert!(carousel.tick(start + SLIDE));
        assert_eq!(carousel.index(), Some(1));

        assert!(carousel.tick(start + SLIDE * 2));
        assert_eq!(carousel.index(), Some(0));
    }

    #[test]
    fn single_slide_never_moves() {
        let start = Instant::now();
        let mut carousel = Carousel::new(1, SLIDE, start);
        assert!(!carousel.tick(start + SLIDE * 10));
        assert_eq!(carousel.index(), Some(0));
    }

    #[test]
    fn manual_step_restarts_the_timer() {
        let start = Instant::now();
        let mut carousel = Carousel::new(3, SLIDE, start);

        carousel.prev(start + Duration::from_millis(1500));
        assert_eq!(carousel.index(), Some(2));

        assert!(!carousel.tick(start + SLIDE));
        assert!(carousel.tick(start + Duration::from_millis(3500)));
        assert_eq!(carousel.index(), Some(0));
    }
}
