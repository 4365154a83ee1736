// ── vi-style search ──
//
// `/` searches forward, `n` repeats forward, `N` repeats backward. Matching
// is a literal, case-sensitive substring test. Neither direction wraps.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Status-line prefix echoed on a hit.
    pub fn marker(self) -> char {
        match self {
            Self::Forward => '/',
            Self::Backward => '?',
        }
    }
}

/// Status-line text for a search result.
pub fn status_message(query: &str, direction: Direction, found: bool) -> String {
    if found {
        format!("{}{query}", direction.marker())
    } else {
        format!("Pattern not found \"{query}\"")
    }
}

/// Indices of list items containing `query`. An empty query matches nothing.
fn list_matches<S: AsRef<str>>(items: &[S], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return Vec::new();
    }
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.as_ref().contains(query))
        .map(|(index, _)| index)
        .collect()
}

/// Search an ordered list from `current`; returns the index to select.
///
/// Forward picks the first match strictly after `current`. Backward walks
/// the matches in order and, at the first match at or after `current` that
/// has a predecessor, picks that predecessor. So backward finds nothing
/// when every match lies before `current`, and can land after `current`
/// when the first match does.
pub fn find_in_list<S: AsRef<str>>(
    items: &[S],
    current: usize,
    query: &str,
    direction: Direction,
) -> Option<usize> {
    let matches = list_matches(items, query);
    match direction {
        Direction::Forward => matches.into_iter().find(|&index| index > current),
        Direction::Backward => matches
            .windows(2)
            .find(|pair| pair[1] >= current)
            .map(|pair| pair[0])
            .filter(|&index| index != current),
    }
}

/// Search a grid of rows from the `selected` row; returns the row to select.
///
/// Forward scans the rows below the selection (all rows when nothing is
/// selected); backward scans the rows above it, nearest first. A row
/// matches when any of its cells contains `query`.
pub fn find_in_grid<R, C>(
    rows: &[R],
    selected: Option<usize>,
    query: &str,
    direction: Direction,
) -> Option<usize>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let row_matches = |index: &usize| {
        rows.get(*index)
            .is_some_and(|row| row.as_ref().iter().any(|cell| cell.as_ref().contains(query)))
    };
    match direction {
        Direction::Forward => {
            let start = selected.map_or(0, |row| row + 1);
            (start..rows.len()).find(row_matches)
        }
        Direction::Backward => {
            let end = selected.unwrap_or_default().min(rows.len());
            (0..end).rev().find(row_matches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SUBNETS: [&str; 3] = ["10.0.0.0/24", "10.0.1.0/24", "10.0.2.0/24"];

    #[test]
    fn list_forward_walks_matches_without_wrapping() {
        let mut current = 0;
        let mut visited = Vec::new();
        while let Some(next) = find_in_list(&SUBNETS, current, "10.0", Direction::Forward) {
            visited.push(next);
            current = next;
        }
        assert_eq!(visited, vec![1, 2]);
        assert_eq!(find_in_list(&SUBNETS, 2, "10.0", Direction::Forward), None);
    }

    #[test]
    fn list_forward_does_not_wrap_to_earlier_match() {
        assert_eq!(find_in_list(&SUBNETS, 1, "0.0/", Direction::Forward), None);
    }

    #[test]
    fn list_backward_selects_preceding_match() {
        assert_eq!(find_in_list(&SUBNETS, 2, "10.0", Direction::Backward), Some(1));
        assert_eq!(find_in_list(&SUBNETS, 1, "10.0", Direction::Backward), Some(0));
        assert_eq!(find_in_list(&SUBNETS, 0, "10.0", Direction::Backward), None);
    }

    #[test]
    fn list_backward_misses_when_all_matches_precede_current() {
        let items = ["a1", "a2", "b", "c"];
        assert_eq!(find_in_list(&items, 3, "a", Direction::Backward), None);
    }

    #[test]
    fn list_backward_can_land_after_current() {
        let items = ["x", "a1", "a2"];
        assert_eq!(find_in_list(&items, 0, "a", Direction::Backward), Some(1));
    }

    #[test]
    fn list_is_case_sensitive_and_literal() {
        let items = ["lab", "LAB", "l.b"];
        assert_eq!(find_in_list(&items, 0, "LAB", Direction::Forward), Some(1));
        assert_eq!(find_in_list(&items, 0, "l.b", Direction::Forward), Some(2));
        assert_eq!(find_in_list(&items, 0, "", Direction::Forward), None);
    }

    fn grid() -> Vec<Vec<&'static str>> {
        vec![
            vec!["alpha", "10.0.0.1"],
            vec!["beta", "10.0.0.2"],
            vec!["gamma", "10.0.0.3"],
            vec!["alphabet", "10.0.0.4"],
        ]
    }

    #[test]
    fn grid_forward_scans_rows_below_selection() {
        let rows = grid();
        assert_eq!(find_in_grid(&rows, None, "alpha", Direction::Forward), Some(0));
        assert_eq!(find_in_grid(&rows, Some(0), "alpha", Direction::Forward), Some(3));
        assert_eq!(find_in_grid(&rows, Some(3), "alpha", Direction::Forward), None);
        assert_eq!(find_in_grid(&rows, Some(0), "0.0.3", Direction::Forward), Some(2));
    }

    #[test]
    fn grid_backward_scans_rows_above_selection() {
        let rows = grid();
        assert_eq!(find_in_grid(&rows, Some(3), "alpha", Direction::Backward), Some(0));
        assert_eq!(find_in_grid(&rows, Some(3), "10.0", Direction::Backward), Some(2));
        assert_eq!(find_in_grid(&rows, Some(0), "alpha", Direction::Backward), None);
        assert_eq!(find_in_grid(&rows, None, "alpha", Direction::Backward), None);
    }

    #[test]
    fn grid_search_stays_within_scan_boundary() {
        let rows = grid();
        for selected in 0..rows.len() {
            if let Some(row) = find_in_grid(&rows, Some(selected), "a", Direction::Forward) {
                assert!(row > selected);
            }
            if let Some(row) = find_in_grid(&rows, Some(selected), "a", Direction::Backward) {
                assert!(row < selected);
            }
        }
    }

    #[test]
    fn status_messages() {
        assert_eq!(status_message("lab", Direction::Forward, true), "/lab");
        assert_eq!(status_message("lab", Direction::Backward, true), "?lab");
        assert_eq!(
            status_message("lab", Direction::Backward, false),
            "Pattern not found \"lab\""
        );
    }
}
