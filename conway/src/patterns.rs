// patterns.rs - Built-in patterns that can be stamped onto a generation

use crate::grid::Generation;

/// Live cells as `(x, y)` offsets from the pattern's top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i64, i64)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 4), (1, 4), (0, 5), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (35, 2), (34, 3), (35, 3),
        ],
    },
];

/// Writes the pattern's live cells with its corner at `(x, y)`, wrapping at the edges.
/// Cells outside the pattern are left as they were. Returns the touched indices.
pub fn stamp(generation: &mut Generation, pattern: &Pattern, x: i64, y: i64) -> Vec<usize> {
    pattern
        .cells
        .iter()
        .map(|&(dx, dy)| generation.set_wrapped(x + dx, y + dy, true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_places_every_cell() {
        let mut board = Generation::dead(40, 40);
        for pattern in PATTERNS {
            board.clear();
            let touched = stamp(&mut board, pattern, 2, 2);
            assert_eq!(touched.len(), pattern.cells.len());
            assert_eq!(board.population(), pattern.cells.len(), "{}", pattern.name);
        }
    }

    #[test]
    fn stamp_wraps_across_edges() {
        let mut board = Generation::dead(5, 5);
        let blinker = &PATTERNS[1];
        stamp(&mut board, blinker, 4, 4);
        assert!(board.get(4, 4));
        assert!(board.get(0, 4));
        assert!(board.get(1, 4));
        assert_eq!(board.population(), 3);
    }

    #[test]
    fn stamp_keeps_existing_cells() {
        let mut board = Generation::with_live(10, 10, &[(9, 9)]);
        stamp(&mut board, &PATTERNS[0], 0, 0);
        assert!(board.get(9, 9));
        assert_eq!(board.population(), 6);
    }
}
