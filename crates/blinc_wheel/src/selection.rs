//! Selection resolver
//!
//! Maps a scroll position to a working list index and tracks the last
//! emitted value so each settled transition is reported once.

use crate::options::{normalize, WheelOption};

/// Settled index for `scroll`, if one exists
///
/// Looping wheels normalize into `[0, len)`. Bounded wheels return `None`
/// while `scroll` lies outside `[0, len - 1]`: the wheel is still
/// overscrolled and has not settled. Empty lists never resolve.
pub fn resolve_index(scroll: f32, len: usize, infinite: bool) -> Option<usize> {
    if len == 0 || !scroll.is_finite() {
        return None;
    }

    let position = if infinite {
        normalize(scroll, len)
    } else {
        let max = (len - 1) as f32;
        if scroll < 0.0 || scroll > max {
            return None;
        }
        scroll
    };

    let index = position.round() as usize;
    Some(if index >= len { 0 } else { index })
}

/// First working list index holding `value`
pub fn find_index<V: PartialEq>(options: &[WheelOption<V>], value: &V) -> Option<usize> {
    options.iter().position(|option| option.value == *value)
}

/// Last value reported to the caller
#[derive(Clone, Debug, PartialEq)]
pub struct Selection<V> {
    current: Option<V>,
}

impl<V> Default for Selection<V> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<V: Clone + PartialEq> Selection<V> {
    pub fn new(current: Option<V>) -> Self {
        Self { current }
    }

    pub fn current(&self) -> Option<&V> {
        self.current.as_ref()
    }

    /// Track `value`, returning true if it differs from the current value
    pub fn update(&mut self, value: &V) -> bool {
        if self.current.as_ref() == Some(value) {
            return false;
        }
        self.current = Some(value.clone());
        true
    }

    /// Replace the tracked value without reporting a change
    pub fn set(&mut self, value: Option<V>) {
        self.current = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_bounded() {
        assert_eq!(resolve_index(0.0, 3, false), Some(0));
        assert_eq!(resolve_index(1.4, 3, false), Some(1));
        assert_eq!(resolve_index(2.0, 3, false), Some(2));
        assert_eq!(resolve_index(-0.2, 3, false), None);
        assert_eq!(resolve_index(2.1, 3, false), None);
    }

    #[test]
    fn test_resolve_infinite() {
        assert_eq!(resolve_index(-1.0, 4, true), Some(3));
        assert_eq!(resolve_index(9.0, 4, true), Some(1));
        // Rounds up across the seam
        assert_eq!(resolve_index(3.7, 4, true), Some(0));
    }

    #[test]
    fn test_resolve_empty() {
        assert_eq!(resolve_index(0.0, 0, false), None);
        assert_eq!(resolve_index(0.0, 0, true), None);
    }

    #[test]
    fn test_find_index() {
        let options: Vec<WheelOption<&str>> =
            ["a", "b", "c", "b"].into_iter().map(WheelOption::from).collect();
        assert_eq!(find_index(&options, &"b"), Some(1));
        assert_eq!(find_index(&options, &"z"), None);
    }

    #[test]
    fn test_selection_dedup() {
        let mut selection = Selection::new(Some(1));
        assert!(!selection.update(&1));
        assert!(selection.update(&2));
        assert!(!selection.update(&2));
        assert_eq!(selection.current(), Some(&2));
    }
}
