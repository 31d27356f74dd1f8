//! Option lists
//!
//! The caller's options become a *working list* used for all index math.
//! Looping wheels repeat short lists so a full quarter turn of items always
//! exists on both sides of center, and add wrap-around ghost slots at each
//! end of the ring so the seam is never visible.

use crate::geometry::Geometry;

/// A selectable entry: a comparable value and its display label
#[derive(Debug, Clone, PartialEq)]
pub struct WheelOption<V> {
    pub value: V,
    pub label: String,
}

impl<V> WheelOption<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

impl<V: ToString> From<V> for WheelOption<V> {
    fn from(value: V) -> Self {
        let label = value.to_string();
        Self { value, label }
    }
}

/// A rendered slot on the ring
///
/// `ring_index` may be negative or past the end of the working list for
/// wrap-around ghosts; `index` is always a valid working list index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingItem {
    /// Signed slot position around the ring
    pub ring_index: i32,
    /// Index into the working list
    pub index: usize,
}

/// Build the working list for `options`
///
/// Bounded wheels and empty lists pass through unchanged. Looping wheels
/// repeat the options end-to-end until there are at least
/// `ceil(visible_count / 2)` entries.
pub fn build_working_list<V: Clone>(
    options: &[WheelOption<V>],
    infinite: bool,
    visible_count: u32,
) -> Vec<WheelOption<V>> {
    if !infinite || options.is_empty() {
        return options.to_vec();
    }

    let min_len = visible_count.div_ceil(2) as usize;
    let copies = min_len.div_ceil(options.len()).max(1);
    let mut working = Vec::with_capacity(copies * options.len());
    for _ in 0..copies {
        working.extend_from_slice(options);
    }
    working
}

/// Build the ring slots for a working list
///
/// Looping wheels get `quarter_count` ghosts before index 0 and after the
/// last index, each mapped back into the list by modulo.
pub fn build_ring_items<V>(
    working: &[WheelOption<V>],
    geometry: &Geometry,
    infinite: bool,
) -> Vec<RingItem> {
    let len = working.len();
    if len == 0 {
        return Vec::new();
    }

    let ghosts = if infinite {
        geometry.quarter_count.max(0)
    } else {
        0
    };
    let last = len as i32 + ghosts;

    (-ghosts..last)
        .map(|ring_index| RingItem {
            ring_index,
            index: wrap_index(ring_index as i64, len),
        })
        .collect()
}

/// Map a scroll position into `[0, len)`
///
/// Every `scroll + k * len` maps to the same value. An empty list maps to 0.
pub fn normalize(scroll: f32, len: usize) -> f32 {
    if len == 0 {
        return 0.0;
    }
    let n = len as f32;
    let wrapped = scroll.rem_euclid(n);
    // rem_euclid can round up to `n` for tiny negative inputs
    if wrapped >= n {
        0.0
    } else {
        wrapped
    }
}

/// Map a signed index into `[0, len)`
pub fn wrap_index(index: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as i64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(labels: &[&str]) -> Vec<WheelOption<String>> {
        labels.iter().map(|l| WheelOption::from(l.to_string())).collect()
    }

    #[test]
    fn test_bounded_list_unchanged() {
        let options = letters(&["A", "B", "C"]);
        assert_eq!(build_working_list(&options, false, 20), options);
    }

    #[test]
    fn test_infinite_list_padded() {
        let options = letters(&["X", "Y"]);
        let working = build_working_list(&options, true, 20);

        assert!(working.len() >= 10);
        assert_eq!(working.len(), 10);
        assert!(working
            .iter()
            .enumerate()
            .all(|(i, o)| o.value == options[i % 2].value));
    }

    #[test]
    fn test_infinite_long_list_not_padded() {
        let options = letters(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"]);
        assert_eq!(build_working_list(&options, true, 20).len(), 12);
    }

    #[test]
    fn test_single_option_padded() {
        let options = letters(&["only"]);
        assert_eq!(build_working_list(&options, true, 12).len(), 6);
    }

    #[test]
    fn test_empty_list() {
        let options: Vec<WheelOption<String>> = Vec::new();
        assert!(build_working_list(&options, true, 20).is_empty());
        assert!(build_ring_items(&options, &Geometry::new(20, 30.0), true).is_empty());
    }

    #[test]
    fn test_ring_items_bounded() {
        let working = letters(&["A", "B", "C"]);
        let ring = build_ring_items(&working, &Geometry::new(20, 30.0), false);

        assert_eq!(ring.len(), 3);
        assert_eq!(ring[0], RingItem { ring_index: 0, index: 0 });
        assert_eq!(ring[2], RingItem { ring_index: 2, index: 2 });
    }

    #[test]
    fn test_ring_items_infinite_ghosts() {
        let working = letters(&["A", "B", "C", "D", "E", "F"]);
        let geometry = Geometry::new(12, 30.0);
        let ring = build_ring_items(&working, &geometry, true);

        // 3 ghosts on each side
        assert_eq!(ring.len(), 12);
        assert_eq!(ring[0], RingItem { ring_index: -3, index: 3 });
        assert_eq!(ring[2], RingItem { ring_index: -1, index: 5 });
        assert_eq!(ring[3], RingItem { ring_index: 0, index: 0 });
        assert_eq!(ring[9], RingItem { ring_index: 6, index: 0 });
        assert_eq!(ring[11], RingItem { ring_index: 8, index: 2 });
    }

    #[test]
    fn test_normalize_wraps() {
        assert_eq!(normalize(-1.0, 10), 9.0);
        assert_eq!(normalize(10.0, 10), 0.0);
        assert!((normalize(12.5, 10) - 2.5).abs() < 1e-5);
        assert_eq!(normalize(3.0, 0), 0.0);
        assert!(normalize(-1e-9, 10) < 10.0);
    }

    #[test]
    fn test_normalize_periodic() {
        let n = 7;
        for k in -5..=5 {
            for s in [0.0_f32, 0.25, 1.5, 3.75, 6.5] {
                let shifted = s + (k * n) as f32;
                assert!(
                    (normalize(s, n as usize) - normalize(shifted, n as usize)).abs() < 1e-4,
                    "normalize({}) != normalize({})",
                    s,
                    shifted
                );
            }
        }
    }

    #[test]
    fn test_wrap_index() {
        assert_eq!(wrap_index(-1, 4), 3);
        assert_eq!(wrap_index(9, 4), 1);
        assert_eq!(wrap_index(5, 0), 0);
    }
}
