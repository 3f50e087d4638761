//! Grid representation and operations for a cube of edge `dim`.
//!
//! The grid is a flat array where each cell contains a piece number (1-based)
//! or 0 for empty. Cells are linearized z-major: `idx = z * dim * dim + y * dim + x`,
//! which is also the id of the cell's voxel column in the exact-cover matrix.

use std::fmt::Write as _;

use rustc_hash::FxHashSet;

use crate::pieces::{Coord, Piece, Placement};

/// Converts (x, y, z) coordinates to a linear cell index.
#[inline(always)]
pub fn coord_to_idx(dim: usize, (x, y, z): Coord) -> usize {
    (z as usize) * dim * dim + (y as usize) * dim + (x as usize)
}

/// Converts a linear cell index to (x, y, z) coordinates.
#[inline(always)]
pub const fn idx_to_coord(dim: usize, cell_index: usize) -> Coord {
    (
        (cell_index % dim) as i32,
        ((cell_index / dim) % dim) as i32,
        (cell_index / (dim * dim)) as i32,
    )
}

/// Converts a solution to a flat grid of `dim^3` cells.
///
/// Each cell contains a 1-based piece number, or 0 for empty. Cells outside
/// the cube are ignored.
pub fn solution_to_grid(dim: usize, solution: &[Placement]) -> Vec<usize> {
    let mut grid = vec![0; dim * dim * dim];

    for placed in solution {
        for &coord in &placed.coords {
            if in_bounds(dim, coord) {
                grid[coord_to_idx(dim, coord)] = placed.piece_index + 1;
            }
        }
    }

    grid
}

/// Checks that a solution is an exact cover of the cube.
///
/// Every cell must be covered exactly once, every piece used exactly once,
/// and each placement must cover as many cells as its piece's volume.
pub fn verify_solution(dim: usize, pieces: &[Piece], solution: &[Placement]) -> bool {
    if solution.len() != pieces.len() {
        return false;
    }

    let mut used_pieces: FxHashSet<usize> = FxHashSet::default();
    let mut covered: FxHashSet<Coord> = FxHashSet::default();

    for placed in solution {
        let Some(piece) = pieces.get(placed.piece_index) else {
            return false;
        };
        if !used_pieces.insert(placed.piece_index) || placed.coords.len() != piece.volume {
            return false;
        }
        for &coord in &placed.coords {
            if !in_bounds(dim, coord) || !covered.insert(coord) {
                return false;
            }
        }
    }

    covered.len() == dim * dim * dim
}

#[inline]
fn in_bounds(dim: usize, (x, y, z): Coord) -> bool {
    let range = 0..dim as i32;
    range.contains(&x) && range.contains(&y) && range.contains(&z)
}

/// Display character for a 1-based piece number.
fn piece_char(piece_number: usize) -> char {
    match piece_number {
        0 => '.',
        1..=9 => char::from(b'0' + piece_number as u8),
        // letters for piece numbers >= 10
        10..=35 => char::from(b'A' + (piece_number - 10) as u8),
        _ => '#',
    }
}

/// Largest cube edge accepted by a solve.
///
/// Keeps `dim^3` well inside `usize` and every coordinate inside one byte of
/// `solution.bin`.
pub const MAX_DIM: usize = 256;

/// Formats a solution as a human-readable string.
///
/// Displays `dim` z-slices side by side, with piece numbers.
/// Empty cells show as '.'.
pub fn format_solution(dim: usize, solution: &[Placement]) -> String {
    let grid = solution_to_grid(dim, solution);
    // every slice column is as wide as its widest label or row
    let width = dim.max(format!("z={}", dim.saturating_sub(1)).len());

    let mut output = String::new();
    let mut push_line = |cells: Vec<String>| {
        let last = cells.len().saturating_sub(1);
        for (z, cell) in cells.iter().enumerate() {
            if z < last {
                let _ = write!(output, "{:<width$}  ", cell, width = width);
            } else {
                output.push_str(cell);
            }
        }
        output.push('\n');
    };

    // header: z=0, z=1, ..., z=dim-1
    push_line((0..dim).map(|z| format!("z={}", z)).collect());

    // rows from top (y=dim-1) to bottom (y=0)
    for y in (0..dim).rev() {
        push_line(
            (0..dim)
                .map(|z| {
                    (0..dim)
                        .map(|x| piece_char(grid[z * dim * dim + y * dim + x]))
                        .collect::<String>()
                })
                .collect(),
        );
    }

    output
}
