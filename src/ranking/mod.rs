//! Position reconciliation over a ranked collection.
//!
//! These functions are pure: they take the collection (or its sorted positions)
//! and return or apply the new ranking, with no storage or transport involved.
//! `RankedStore` composes them inside its load → mutate → save cycle.

use crate::film::{Film, MIN_POSITION};

/// Resolve a caller's desired position against the occupied ones.
///
/// `sorted_positions` must be ascending. The first adjacent pair that strictly
/// brackets `desired` with a gap wider than one slot clamps it to the slot just
/// above the lower neighbour. The result is then capped at one past the highest
/// occupied position, so a rank far beyond the tail lands on the tail. Values
/// below the first rank resolve to the first rank.
pub fn resolve_position(sorted_positions: &[i64], desired: i64) -> i64 {
    let mut resolved = desired.max(MIN_POSITION);

    for pair in sorted_positions.windows(2) {
        let (lower, upper) = (pair[0], pair[1]);
        if lower < resolved && resolved < upper {
            if resolved > lower + 1 {
                resolved = lower + 1;
            }
            break;
        }
    }

    let tail = sorted_positions
        .last()
        .map_or(MIN_POSITION, |last| last + 1);
    resolved.min(tail)
}

/// Shift every film at or after `at` down one rank.
pub fn make_room(films: &mut [Film], at: i64) {
    for film in films.iter_mut().filter(|f| f.position >= at) {
        film.position += 1;
    }
}

/// Pull every film after `removed` up one rank.
pub fn close_gap(films: &mut [Film], removed: i64) {
    for film in films.iter_mut().filter(|f| f.position > removed) {
        film.position -= 1;
    }
}

pub fn sort_by_position(films: &mut [Film]) {
    films.sort_by_key(|f| f.position);
}

/// Positions in ascending order.
pub fn sorted_positions(films: &[Film]) -> Vec<i64> {
    let mut positions: Vec<i64> = films.iter().map(|f| f.position).collect();
    positions.sort_unstable();
    positions
}

/// True when the positions are exactly `1..=films.len()`.
pub fn is_contiguous(films: &[Film]) -> bool {
    sorted_positions(films)
        .into_iter()
        .zip(MIN_POSITION..)
        .all(|(actual, expected)| actual == expected)
}
