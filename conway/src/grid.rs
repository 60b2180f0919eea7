// grid.rs - One generation of cells on a toroidal board

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::Rng;

/// Relative positions of the eight neighbors, row by row.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// A full board snapshot. Cells are row-major: `index = y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Generation {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Generation {
    /// Every cell dead.
    pub fn dead(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height] }
    }

    /// Each cell independently alive with probability `density`, one draw per cell in index order.
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, density: f64, rng: &mut R) -> Self {
        let cells = (0..width * height).map(|_| rng.r#gen::<f64>() < density).collect();
        Self { width, height, cells }
    }

    /// A dead board with the listed cells alive. Coordinates wrap.
    pub fn with_live(width: usize, height: usize, live: &[(i64, i64)]) -> Self {
        let mut generation = Self::dead(width, height);
        for &(x, y) in live {
            generation.set_wrapped(x, y, true);
        }
        generation
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Maps any signed coordinate onto the board.
    pub fn wrap(&self, x: i64, y: i64) -> (usize, usize) {
        (
            x.rem_euclid(self.width as i64) as usize,
            y.rem_euclid(self.height as i64) as usize,
        )
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y)
    }

    /// Cell state with toroidal wrap for out-of-range coordinates.
    pub fn get(&self, x: i64, y: i64) -> bool {
        let (x, y) = self.wrap(x, y);
        self.cells[self.index(x, y)]
    }

    pub fn is_alive(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Sets an in-range cell. Returns `false` and leaves the board alone otherwise.
    pub fn set(&mut self, x: i64, y: i64, alive: bool) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let index = self.index(x as usize, y as usize);
        self.cells[index] = alive;
        true
    }

    /// Sets a cell after wrapping the coordinate, returning its index.
    pub fn set_wrapped(&mut self, x: i64, y: i64, alive: bool) -> usize {
        let (x, y) = self.wrap(x, y);
        let index = self.index(x, y);
        self.cells[index] = alive;
        index
    }

    /// The eight wrapped neighbor coordinates of `(x, y)`.
    pub fn neighbors(&self, x: usize, y: usize) -> [(usize, usize); 8] {
        NEIGHBOR_OFFSETS.map(|(dx, dy)| {
            (
                (x as i64 + dx + self.width as i64).rem_euclid(self.width as i64) as usize,
                (y as i64 + dy + self.height as i64).rem_euclid(self.height as i64) as usize,
            )
        })
    }

    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        self.neighbors(x, y)
            .iter()
            .filter(|&&(nx, ny)| self.cells[self.index(nx, ny)])
            .count() as u8
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Stable hash of the board, used to spot repeating generations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn edge_and_corner_neighbors_are_distinct_and_in_range() {
        let board = Generation::dead(5, 4);
        let probes = [(0, 0), (4, 0), (0, 3), (4, 3), (2, 0), (0, 2), (4, 1), (3, 3)];
        for (x, y) in probes {
            let neighbors = board.neighbors(x, y);
            let distinct: HashSet<_> = neighbors.iter().copied().collect();
            assert_eq!(distinct.len(), 8, "duplicates around ({x}, {y})");
            assert!(!distinct.contains(&(x, y)), "({x}, {y}) counted itself");
            for (nx, ny) in neighbors {
                assert!(nx < 5 && ny < 4);
            }
        }
    }

    #[test]
    fn corner_wraps_to_opposite_edges() {
        let board = Generation::dead(3, 3);
        let neighbors: HashSet<_> = board.neighbors(0, 0).into_iter().collect();
        assert!(neighbors.contains(&(2, 2)));
        assert!(neighbors.contains(&(2, 0)));
        assert!(neighbors.contains(&(0, 2)));
    }

    #[test]
    fn get_wraps_signed_coordinates() {
        let board = Generation::with_live(4, 3, &[(3, 2)]);
        assert!(board.get(-1, -1));
        assert!(board.get(7, 5));
        assert!(board.get(3 - 400, 2 + 300));
        assert!(!board.get(0, 0));
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut board = Generation::dead(4, 4);
        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i64::MAX, 1), (i64::MIN, 1)] {
            assert!(!board.set(x, y, true));
        }
        assert_eq!(board.population(), 0);
        assert!(board.set(3, 3, true));
        assert_eq!(board.population(), 1);
    }

    #[test]
    fn random_fill_is_reproducible_from_seed() {
        let a = Generation::random(16, 9, 0.4, &mut StdRng::seed_from_u64(7));
        let b = Generation::random(16, 9, 0.4, &mut StdRng::seed_from_u64(7));
        let c = Generation::random(16, 9, 0.4, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn density_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Generation::random(10, 10, 0.0, &mut rng).population(), 0);
        assert_eq!(Generation::random(10, 10, 1.0, &mut rng).population(), 100);
    }

    #[test]
    fn fingerprint_tracks_contents() {
        let mut board = Generation::with_live(6, 6, &[(1, 1)]);
        let before = board.fingerprint();
        assert_eq!(before, board.clone().fingerprint());
        board.set(2, 2, true);
        assert_ne!(before, board.fingerprint());
    }
}
