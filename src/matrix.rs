//! Exact-cover matrix construction.
//!
//! Column ids `0..dim^3` are voxel columns (see [`coord_to_idx`]); ids
//! `dim^3..dim^3 + pieces.len()` are piece-usage columns in selection order.

use crate::geometry::{bounding_box, rotations};
use crate::grid::coord_to_idx;
use crate::pieces::{Coord, Piece};

/// One candidate placement of a piece: a row of the exact-cover matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Index of the piece in the selection.
    pub piece_index: usize,
    /// Index into the piece's distinct orientations.
    pub rotation: usize,
    /// Offset added to the orientation's voxels.
    pub translation: Coord,
    /// Covered columns: the piece-usage column first, then one voxel column
    /// per voxel in canonical orientation order.
    pub columns: Vec<usize>,
    /// Absolute cells covered by this placement.
    pub coords: Vec<Coord>,
}

/// The exact-cover matrix for a piece selection and cube size.
#[derive(Debug, Clone)]
pub struct PlacementMatrix {
    pub dim: usize,
    pub num_pieces: usize,
    pub rows: Vec<Row>,
}

impl PlacementMatrix {
    /// Enumerates every (piece, orientation, translation) that fits in the cube.
    ///
    /// A piece that fits in no orientation simply contributes no rows; the
    /// solver then finds its usage column uncoverable. `dim` is expected to be
    /// at most [`MAX_DIM`](crate::grid::MAX_DIM), as [`crate::Puzzle`] enforces.
    pub fn build(pieces: &[Piece], dim: usize) -> Self {
        let num_voxels = dim * dim * dim;
        let mut rows = Vec::new();

        for (piece_index, piece) in pieces.iter().enumerate() {
            let first_row = rows.len();

            for (rotation, orientation) in rotations(&piece.shape).iter().enumerate() {
                let (max_x, max_y, max_z) = bounding_box(orientation);
                let limit = dim as i32;

                for x in 0..limit - max_x {
                    for y in 0..limit - max_y {
                        for z in 0..limit - max_z {
                            let coords: Vec<Coord> = orientation
                                .iter()
                                .map(|&(vx, vy, vz)| (vx + x, vy + y, vz + z))
                                .collect();

                            let mut columns = Vec::with_capacity(coords.len() + 1);
                            columns.push(num_voxels + piece_index);
                            columns.extend(coords.iter().map(|&coord| coord_to_idx(dim, coord)));

                            rows.push(Row {
                                piece_index,
                                rotation,
                                translation: (x, y, z),
                                columns,
                                coords,
                            });
                        }
                    }
                }
            }

            log::debug!(
                "piece {} ({}): {} placements",
                piece_index,
                piece.name,
                rows.len() - first_row
            );
        }

        let matrix = Self {
            dim,
            num_pieces: pieces.len(),
            rows,
        };
        log::debug!(
            "matrix: {} columns, {} rows",
            matrix.num_columns(),
            matrix.rows.len()
        );
        matrix
    }

    /// Number of voxel columns.
    pub fn num_voxels(&self) -> usize {
        self.dim * self.dim * self.dim
    }

    /// Total number of columns, voxel and piece-usage.
    pub fn num_columns(&self) -> usize {
        self.num_voxels() + self.num_pieces
    }

    /// Column that enforces a single use of the given piece.
    pub fn piece_column(&self, piece_index: usize) -> usize {
        self.num_voxels() + piece_index
    }

    /// Row column lists, in the form the exact-cover solver consumes.
    pub fn column_sets(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.rows.iter().map(|row| row.columns.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::catalog_piece;

    #[test]
    fn test_single_voxel_rows() {
        let matrix = PlacementMatrix::build(&[Piece::new("dot", vec![(0, 0, 0)])], 2);
        assert_eq!(matrix.num_columns(), 9);
        assert_eq!(matrix.rows.len(), 8);

        // x outermost, z innermost
        let translations: Vec<Coord> = matrix.rows.iter().map(|row| row.translation).collect();
        assert_eq!(
            translations,
            [
                (0, 0, 0),
                (0, 0, 1),
                (0, 1, 0),
                (0, 1, 1),
                (1, 0, 0),
                (1, 0, 1),
                (1, 1, 0),
                (1, 1, 1)
            ]
        );
        assert_eq!(matrix.rows[1].columns, [8, 4]);
        assert_eq!(matrix.rows[4].columns, [8, 1]);
    }

    #[test]
    fn test_row_counts_match_orientation_fits() {
        // 12 orientations of the small corner, each a 2x2x1 box: 2*2*3 offsets in a 3-cube
        let corner = catalog_piece("A").unwrap();
        let matrix = PlacementMatrix::build(&[corner], 3);
        assert_eq!(matrix.rows.len(), 12 * 12);

        // the long L spans 3x2x1 in all 24 orientations: 1*2*3 offsets each
        let long_l = catalog_piece("L").unwrap();
        let matrix = PlacementMatrix::build(&[long_l], 3);
        assert_eq!(matrix.rows.len(), 24 * 6);
    }

    #[test]
    fn test_rows_cover_piece_column_and_volume() {
        let pieces = vec![catalog_piece("T").unwrap(), catalog_piece("A").unwrap()];
        let matrix = PlacementMatrix::build(&pieces, 3);

        for row in &matrix.rows {
            let piece = &pieces[row.piece_index];
            assert_eq!(row.columns[0], matrix.piece_column(row.piece_index));
            assert_eq!(row.columns.len(), piece.volume + 1);
            assert_eq!(row.coords.len(), piece.volume);
            for (&column, &coord) in row.columns[1..].iter().zip(&row.coords) {
                assert!(column < matrix.num_voxels());
                assert_eq!(column, coord_to_idx(3, coord));
            }
        }

        // rows stay grouped by piece in selection order
        assert!(matrix
            .rows
            .windows(2)
            .all(|pair| pair[0].piece_index <= pair[1].piece_index));
    }

    #[test]
    fn test_oversized_piece_has_no_rows() {
        let bar = Piece::new("bar", vec![(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)]);
        let matrix = PlacementMatrix::build(&[bar], 3);
        assert!(matrix.rows.is_empty());
        assert_eq!(matrix.num_columns(), 28);
    }
}
