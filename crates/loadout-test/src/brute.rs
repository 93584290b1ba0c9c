//! Exhaustive assignment search.
//!
//! Only usable on tiny matrices; the search is factorial in the smaller side.

/// Best total over every complete one-to-one assignment of the smaller side.
///
/// Returns 0 for a degenerate matrix.
///
/// # Example
///
/// ```
/// use loadout_test::brute::best_total;
///
/// let cells = vec![vec![1, 9], vec![8, 2]];
/// assert_eq!(best_total(&cells), 17);
/// ```
pub fn best_total(cells: &[Vec<i64>]) -> i64 {
    let rows = cells.len();
    let columns = cells.first().map_or(0, Vec::len);
    if rows == 0 || columns == 0 {
        return 0;
    }
    if rows <= columns {
        let mut used = vec![false; columns];
        search(0, rows, &mut used, &|r, c| cells[r][c]).unwrap_or(0)
    } else {
        let mut used = vec![false; rows];
        search(0, columns, &mut used, &|c, r| cells[r][c]).unwrap_or(0)
    }
}

fn search(
    depth: usize,
    limit: usize,
    used: &mut [bool],
    at: &dyn Fn(usize, usize) -> i64,
) -> Option<i64> {
    if depth == limit {
        return Some(0);
    }
    let mut best = None;
    for other in 0..used.len() {
        if used[other] {
            continue;
        }
        used[other] = true;
        if let Some(rest) = search(depth + 1, limit, used, at) {
            let total = at(depth, other) + rest;
            best = Some(best.map_or(total, |b: i64| b.max(total)));
        }
        used[other] = false;
    }
    best
}
