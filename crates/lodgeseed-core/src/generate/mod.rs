//! # Row Generators
//!
//! One generator per table. Generators are pure: they take the seed
//! configuration, an RNG and the parent ids the loader resolved, and return
//! rows. They never touch the database.

pub mod accounts;
pub mod billing;
pub mod listings;
pub mod social;

use chrono::{Duration, NaiveDateTime};
use rand::Rng;

use crate::config::TimeWindow;
use crate::error::{Result, SeedError};

/// Uniform timestamp in the window, inclusive on both ends, whole seconds.
pub fn random_timestamp(window: &TimeWindow, rng: &mut impl Rng) -> NaiveDateTime {
    random_between(window.start, window.stop, rng)
}

/// Uniform timestamp no earlier than `earliest`, clamped to the window.
pub fn random_timestamp_after(
    window: &TimeWindow,
    earliest: NaiveDateTime,
    rng: &mut impl Rng,
) -> NaiveDateTime {
    let from = earliest.clamp(window.start, window.stop);
    random_between(from, window.stop, rng)
}

/// Uniform timestamp in `[from, to]`; collapses to `from` if the range is empty.
pub fn random_between(
    from: NaiveDateTime,
    to: NaiveDateTime,
    rng: &mut impl Rng,
) -> NaiveDateTime {
    let span = (to - from).num_seconds();
    if span <= 0 {
        return from;
    }
    from + Duration::seconds(rng.random_range(0..=span))
}

/// Pick one element. Callers guarantee `items` is non-empty, either because
/// it is a catalogue constant or because `require_parents` checked it.
pub(crate) fn pick<'a, T>(items: &'a [T], rng: &mut impl Rng) -> &'a T {
    &items[rng.random_range(0..items.len())]
}

/// Fail with `MissingParentRows` when a parent set is empty.
pub(crate) fn require_parents<T>(items: &[T], table: &str, parent: &str) -> Result<()> {
    if items.is_empty() {
        return Err(SeedError::MissingParentRows {
            table: table.to_string(),
            parent: parent.to_string(),
        });
    }
    Ok(())
}

/// Random string over a byte charset.
pub(crate) fn random_string(charset: &[u8], len: usize, rng: &mut impl Rng) -> String {
    (0..len)
        .map(|_| charset[rng.random_range(0..charset.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_timestamp_in_window() {
        let window = TimeWindow::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            assert!(window.contains(random_timestamp(&window, &mut rng)));
        }
    }

    #[test]
    fn test_random_timestamp_after_respects_floor() {
        let window = TimeWindow::default();
        let floor = window.start + Duration::days(700);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let ts = random_timestamp_after(&window, floor, &mut rng);
            assert!(ts >= floor);
            assert!(window.contains(ts));
        }
    }

    #[test]
    fn test_random_between_empty_range() {
        let window = TimeWindow::default();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            random_between(window.stop, window.start, &mut rng),
            window.stop
        );
    }

    #[test]
    fn test_require_parents() {
        assert!(require_parents(&[1_i64], "credentials", "accounts").is_ok());
        let err = require_parents::<i64>(&[], "credentials", "accounts").unwrap_err();
        assert!(matches!(err, SeedError::MissingParentRows { .. }));
    }

    #[test]
    fn test_random_string_uses_charset() {
        let mut rng = StdRng::seed_from_u64(4);
        let s = random_string(b"ab", 64, &mut rng);
        assert_eq!(s.len(), 64);
        assert!(s.chars().all(|c| c == 'a' || c == 'b'));
    }
}
