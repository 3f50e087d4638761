//! Cube Cover Solver Library
//!
//! Decides whether a cube of edge `N` can be exactly filled by a selection of
//! polycube pieces, each used once in any orientation, and produces the first
//! arrangement found.
//!
//! The pipeline is: catalog pieces ([`pieces`]) → distinct orientations
//! ([`geometry`]) → exact-cover rows ([`matrix`]) → dancing-links search
//! ([`dlx`]).

pub mod dlx;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod matrix;
pub mod persistence;
pub mod pieces;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub use error::{Error, Result};
pub use pieces::{Coord, Piece, Placement};

use dlx::Solver;
use matrix::PlacementMatrix;

/// A validated request: an ordered piece selection and a cube edge length.
#[derive(Debug, Clone)]
pub struct Puzzle {
    pieces: Vec<Piece>,
    dim: usize,
}

impl Puzzle {
    /// Validates the selection and cube size.
    pub fn new(pieces: Vec<Piece>, dim: usize) -> Result<Self> {
        if pieces.is_empty() {
            return Err(Error::NoPieces);
        }
        if dim == 0 || dim > grid::MAX_DIM {
            return Err(Error::InvalidCubeSize);
        }
        for piece in &pieces {
            piece.validate()?;
        }
        Ok(Self { pieces, dim })
    }

    /// The selected pieces, in selection order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Edge length of the target cube.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Sum of the selected pieces' volumes.
    pub fn total_volume(&self) -> usize {
        self.pieces.iter().map(|piece| piece.volume).sum()
    }

    /// Finds the first arrangement of the pieces that fills the cube.
    ///
    /// Returns `Ok(None)` when no arrangement exists.
    pub fn solve(&self) -> Result<Option<Vec<Placement>>> {
        self.run(None)
    }

    /// Like [`Puzzle::solve`], but stops with [`Error::Cancelled`] once
    /// `cancel` is set.
    pub fn solve_with_cancel(&self, cancel: Arc<AtomicBool>) -> Result<Option<Vec<Placement>>> {
        self.run(Some(cancel))
    }

    fn run(&self, cancel: Option<Arc<AtomicBool>>) -> Result<Option<Vec<Placement>>> {
        let cells = self.dim * self.dim * self.dim;
        if self.total_volume() != cells {
            // left to the search to prove
            log::warn!(
                "pieces cover {} cells but the cube has {}",
                self.total_volume(),
                cells
            );
        }

        let matrix = PlacementMatrix::build(&self.pieces, self.dim);
        let mut solver = Solver::new(matrix.num_columns(), matrix.column_sets());
        if let Some(cancel) = cancel {
            solver = solver.with_cancel(cancel);
        }

        let outcome = solver.solve()?;
        let placements = outcome.solution.map(|rows| {
            rows.into_iter()
                .map(|row| {
                    let row = &matrix.rows[row];
                    Placement {
                        piece_index: row.piece_index,
                        coords: row.coords.clone(),
                    }
                })
                .collect()
        });

        match &placements {
            Some(_) => log::info!("solved {} pieces in a {}-cube", self.pieces.len(), self.dim),
            None => log::info!("no arrangement exists for a {}-cube", self.dim),
        }
        Ok(placements)
    }
}

/// Validates the input and solves it in one call.
pub fn solve(pieces: &[Piece], dim: usize) -> Result<Option<Vec<Placement>>> {
    Puzzle::new(pieces.to_vec(), dim)?.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{format_solution, verify_solution};
    use crate::pieces::{select_by_name, select_by_number, soma_pieces, SOMA_DIM};

    #[test]
    fn test_soma_solution() {
        let pieces = soma_pieces();
        let solution = solve(&pieces, SOMA_DIM).unwrap().expect("soma set is solvable");

        assert_eq!(solution.len(), 7);
        assert!(verify_solution(SOMA_DIM, &pieces, &solution));

        let mut indices: Vec<usize> = solution.iter().map(|placed| placed.piece_index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_soma_solution_snapshot() {
        let solution = solve(&soma_pieces(), SOMA_DIM).unwrap().unwrap();

        insta::assert_snapshot!(format_solution(SOMA_DIM, &solution), @r"
        z=0  z=1  z=2
        442  644  663
        512  553  673
        112  752  773
        ");
    }

    #[test]
    fn test_solve_is_deterministic() {
        let pieces = soma_pieces();
        let first = solve(&pieces, SOMA_DIM).unwrap();
        let second = solve(&pieces, SOMA_DIM).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_solves_agree() {
        let puzzle = Puzzle::new(soma_pieces(), SOMA_DIM).unwrap();
        let expected = puzzle.solve().unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| puzzle.solve())).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_single_voxel_in_unit_cube() {
        let solution = solve(&[Piece::new("dot", vec![(0, 0, 0)])], 1).unwrap();
        assert_eq!(
            solution,
            Some(vec![Placement {
                piece_index: 0,
                coords: vec![(0, 0, 0)]
            }])
        );
    }

    #[test]
    fn test_selector_combinations() {
        // A plus six long L pieces
        let pieces = select_by_number(&[1, 1, 1, 1, 1, 1]).unwrap();
        let solution = solve(&pieces, SOMA_DIM).unwrap().expect("A and six L fill the cube");
        assert!(verify_solution(SOMA_DIM, &pieces, &solution));
        insta::assert_snapshot!(format_solution(SOMA_DIM, &solution), @r"
        z=0  z=1  z=2
        222  657  657
        214  444  657
        113  333  657
        ");

        // the Soma set in selector order
        let pieces = select_by_number(&[1, 3, 4, 2, 5, 6]).unwrap();
        let solution = solve(&pieces, SOMA_DIM).unwrap().expect("soma set is solvable");
        assert!(verify_solution(SOMA_DIM, &pieces, &solution));
    }

    #[test]
    fn test_too_little_volume_has_no_solution() {
        // seven pieces, 26 cells
        let pieces = select_by_name(&["A", "A", "L", "T", "Z", "S", "B"]).unwrap();
        let puzzle = Puzzle::new(pieces, 3).unwrap();
        assert_eq!(puzzle.total_volume(), 26);
        assert_eq!(puzzle.solve(), Ok(None));
    }

    #[test]
    fn test_too_much_volume_has_no_solution() {
        // three corners need 9 cells, the 2-cube has 8
        let pieces = select_by_name(&["A", "A", "A"]).unwrap();
        assert_eq!(solve(&pieces, 2), Ok(None));
    }

    #[test]
    fn test_oversized_piece_has_no_solution() {
        let mut pieces = vec![Piece::new(
            "bar",
            vec![(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)],
        )];
        pieces.extend(select_by_name(&["A", "L", "T", "Z", "S", "B"]).unwrap());
        assert_eq!(solve(&pieces, 3), Ok(None));
    }

    #[test]
    fn test_piece_larger_than_cube() {
        let pieces = select_by_name(&["L"]).unwrap();
        assert_eq!(solve(&pieces, 2), Ok(None));
    }

    #[test]
    fn test_two_by_two_cube() {
        let pieces = vec![
            Piece::new("corner", vec![(0, 0, 0), (1, 0, 0), (0, 1, 0)]),
            Piece::new("corner", vec![(0, 0, 0), (1, 0, 0), (0, 1, 0)]),
            Piece::new("domino", vec![(0, 0, 0), (0, 0, 1)]),
        ];
        let solution = solve(&pieces, 2).unwrap().expect("2-cube is fillable");
        assert!(verify_solution(2, &pieces, &solution));
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert_eq!(solve(&[], 3).unwrap_err(), Error::NoPieces);
        assert_eq!(
            solve(&soma_pieces(), 0).unwrap_err(),
            Error::InvalidCubeSize
        );
        assert_eq!(
            solve(&[Piece::new("void", vec![])], 1).unwrap_err(),
            Error::EmptyShape("void".to_string())
        );
    }

    #[test]
    fn test_huge_cube_is_rejected() {
        let dot = Piece::new("dot", vec![(0, 0, 0)]);
        assert_eq!(
            Puzzle::new(vec![dot.clone()], 3_000_000).unwrap_err(),
            Error::InvalidCubeSize
        );
        assert_eq!(
            solve(&[dot.clone()], usize::MAX).unwrap_err(),
            Error::InvalidCubeSize
        );
        assert!(Puzzle::new(vec![dot], grid::MAX_DIM).is_ok());
    }

    #[test]
    fn test_cancelled_solve() {
        let puzzle = Puzzle::new(soma_pieces(), SOMA_DIM).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        assert_eq!(puzzle.solve_with_cancel(cancel), Err(Error::Cancelled));
    }

    #[test]
    fn test_soma_matrix_size() {
        let matrix = PlacementMatrix::build(&soma_pieces(), SOMA_DIM);
        assert_eq!(matrix.num_columns(), 34);
        assert_eq!(matrix.rows.len(), 688);
    }
}
