//! Landing-page text effects driven by elapsed time.

use std::time::Duration;

pub const DEFAULT_ROTATION_PERIOD: Duration = Duration::from_secs(5);
pub const DEFAULT_TYPING_SPEED: Duration = Duration::from_millis(50);

/// Cycles through a fixed list of lines, one per period.
#[derive(Debug, Clone)]
pub struct Rotator<T> {
    items: Vec<T>,
    period: Duration,
}

impl<T> Rotator<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            period: DEFAULT_ROTATION_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn index_at(&self, elapsed: Duration) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        let period = self.period.as_millis().max(1);
        Some(((elapsed.as_millis() / period) % self.items.len() as u128) as usize)
    }

    pub fn current(&self, elapsed: Duration) -> Option<&T> {
        self.index_at(elapsed).and_then(|i| self.items.get(i))
    }
}

/// Reveals text one character at a time.
#[derive(Debug, Clone, Copy)]
pub struct Typewriter {
    speed: Duration,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self {
            speed: DEFAULT_TYPING_SPEED,
        }
    }
}

impl Typewriter {
    pub fn new(speed: Duration) -> Self {
        Self { speed }
    }

    /// The prefix of `text` shown after `elapsed`. Counts characters, so
    /// multi-byte glyphs are never split.
    pub fn visible<'a>(&self, text: &'a str, elapsed: Duration) -> &'a str {
        let shown = (elapsed.as_millis() / self.speed.as_millis().max(1)) as usize;
        match text.char_indices().nth(shown) {
            Some((byte, _)) => &text[..byte],
            None => text,
        }
    }

    pub fn is_done(&self, text: &str, elapsed: Duration) -> bool {
        self.visible(text, elapsed).len() == text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotator_wraps_around() {
        let r = Rotator::new(vec!["a", "b", "c"]);
        assert_eq!(r.current(Duration::ZERO), Some(&"a"));
        assert_eq!(r.current(Duration::from_millis(4_999)), Some(&"a"));
        assert_eq!(r.current(Duration::from_secs(5)), Some(&"b"));
        assert_eq!(r.current(Duration::from_secs(15)), Some(&"a"));
    }

    #[test]
    fn empty_rotator_has_no_current() {
        let r: Rotator<&str> = Rotator::new(vec![]);
        assert_eq!(r.index_at(Duration::from_secs(3)), None);
    }

    #[test]
    fn typewriter_reveals_per_char() {
        let t = Typewriter::default();
        assert_eq!(t.visible("hello", Duration::ZERO), "");
        assert_eq!(t.visible("hello", Duration::from_millis(120)), "he");
        assert_eq!(t.visible("hello", Duration::from_secs(1)), "hello");
        assert!(t.is_done("hello", Duration::from_millis(250)));
    }

    #[test]
    fn typewriter_respects_char_boundaries() {
        let t = Typewriter::new(Duration::from_millis(10));
        assert_eq!(t.visible("❤️ you", Duration::from_millis(10)), "❤");
    }
}
