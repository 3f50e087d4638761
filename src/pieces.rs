//! Piece catalog and coordinate types.
//!
//! Each piece is defined as a set of unit cube positions in 3D space,
//! normalized to start at the origin.

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// A 3D coordinate representing a unit cube position.
pub type Coord = (i32, i32, i32);

/// A static catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct PieceDef {
    pub name: &'static str,
    pub shape: &'static [Coord],
}

/// The Soma cube pieces, keyed by the names the selector UI uses.
pub const CATALOG: &[PieceDef] = &[
    // long L (4 cubes)
    PieceDef {
        name: "L",
        shape: &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 1, 0)],
    },
    // T (4 cubes)
    PieceDef {
        name: "T",
        shape: &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0)],
    },
    // flat zig-zag (4 cubes)
    PieceDef {
        name: "Z",
        shape: &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0)],
    },
    // screw, one hand (4 cubes)
    PieceDef {
        name: "S",
        shape: &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (0, 0, 1)],
    },
    // small corner (3 cubes)
    PieceDef {
        name: "A",
        shape: &[(0, 0, 0), (1, 0, 0), (0, 1, 0)],
    },
    // tripod (4 cubes)
    PieceDef {
        name: "B",
        shape: &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 0, 1)],
    },
    // screw, other hand (4 cubes)
    PieceDef {
        name: "P",
        shape: &[(0, 0, 0), (0, 1, 0), (1, 1, 0), (0, 0, 1)],
    },
];

/// Name of the piece that is always part of a selector-based puzzle.
pub const FIXED_PIECE: &str = "A";

/// Numbered selector choices mapped to catalog names.
pub const SELECTOR_MAPPING: &[(u8, &str)] = &[
    (1, "L"),
    (2, "Z"),
    (3, "T"),
    (4, "S"),
    (5, "P"),
    (6, "B"),
];

/// The seven Soma pieces in selection order (A, L, T, Z, S, B, P), as
/// indices into [`CATALOG`]; fills a 3x3x3 cube.
pub const SOMA_SELECTION: [usize; 7] = [4, 0, 1, 2, 3, 5, 6];

/// Edge length of the cube the catalog pieces are meant to fill.
pub const SOMA_DIM: usize = 3;

/// A piece selected for a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub name: String,
    pub volume: usize,
    pub shape: Vec<Coord>,
}

impl Piece {
    /// Creates a piece whose volume is the number of voxels in `shape`.
    pub fn new(name: impl Into<String>, shape: Vec<Coord>) -> Self {
        Self {
            name: name.into(),
            volume: shape.len(),
            shape,
        }
    }

    /// Creates a piece with an explicitly declared volume.
    ///
    /// The declaration is checked against the shape by [`Piece::validate`].
    pub fn with_volume(name: impl Into<String>, volume: usize, shape: Vec<Coord>) -> Self {
        Self {
            name: name.into(),
            volume,
            shape,
        }
    }

    /// Rejects empty shapes, repeated voxels and a volume that does not
    /// match the shape.
    pub fn validate(&self) -> Result<()> {
        if self.shape.is_empty() {
            return Err(Error::EmptyShape(self.name.clone()));
        }

        let mut seen: FxHashSet<Coord> = FxHashSet::default();
        for &voxel in &self.shape {
            if !seen.insert(voxel) {
                return Err(Error::DuplicateVoxel {
                    name: self.name.clone(),
                    voxel,
                });
            }
        }

        if self.volume != self.shape.len() {
            return Err(Error::VolumeMismatch {
                name: self.name.clone(),
                declared: self.volume,
                actual: self.shape.len(),
            });
        }

        Ok(())
    }
}

impl From<&PieceDef> for Piece {
    fn from(def: &PieceDef) -> Self {
        Piece::new(def.name, def.shape.to_vec())
    }
}

/// Looks up a catalog piece by name (case-insensitive).
pub fn catalog_piece(name: &str) -> Result<Piece> {
    CATALOG
        .iter()
        .find(|def| def.name.eq_ignore_ascii_case(name.trim()))
        .map(Piece::from)
        .ok_or_else(|| Error::UnknownPiece(name.to_string()))
}

/// Builds a piece list from catalog names, keeping their order.
pub fn select_by_name<S: AsRef<str>>(names: &[S]) -> Result<Vec<Piece>> {
    names.iter().map(|name| catalog_piece(name.as_ref())).collect()
}

/// Builds a piece list from numbered selector choices.
///
/// The fixed three-cube piece always comes first, followed by one piece per
/// selector in the given order.
pub fn select_by_number(selectors: &[u8]) -> Result<Vec<Piece>> {
    let mut pieces = vec![catalog_piece(FIXED_PIECE)?];
    for &number in selectors {
        let name = SELECTOR_MAPPING
            .iter()
            .find(|(key, _)| *key == number)
            .map(|(_, name)| *name)
            .ok_or_else(|| Error::UnknownPiece(format!("selector {number}")))?;
        pieces.push(catalog_piece(name)?);
    }
    Ok(pieces)
}

/// The Soma set as owned pieces.
pub fn soma_pieces() -> Vec<Piece> {
    SOMA_SELECTION
        .iter()
        .map(|&index| Piece::from(&CATALOG[index]))
        .collect()
}

/// One selected piece at its final position in the cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Index into the piece list that was solved.
    pub piece_index: usize,
    /// Absolute cells covered by the piece.
    pub coords: Vec<Coord>,
}
