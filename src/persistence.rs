//! File I/O for saving and loading a solution, and export for external renderers.
//!
//! Binary format for `solution.bin` (little endian):
//! - u32: cube edge length
//! - u32: placement count
//! - repeat per placement:
//!   - u32: piece index (0-based)
//!   - u32: cube count
//!   - repeat per cube: 3 bytes (x, y, z) in the range 0..dim

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use crate::grid::format_solution;
use crate::pieces::{Piece, Placement};

pub const SOLUTION_BIN: &str = "solution.bin";
pub const SOLUTION_TXT: &str = "solution.txt";

/// A solution together with the cube it fills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSolution {
    pub dim: usize,
    pub placements: Vec<Placement>,
}

/// Saves a solution to both binary and text files in `dir`.
pub fn save(dir: &Path, pieces: &[Piece], saved: &SavedSolution) -> std::io::Result<()> {
    save_binary(dir, saved)?;
    save_text(dir, pieces, saved)?;
    Ok(())
}

/// Saves the solution in human-readable text format.
fn save_text(dir: &Path, pieces: &[Piece], saved: &SavedSolution) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(dir.join(SOLUTION_TXT))?);
    writeln!(file, "Solution for a {0}x{0}x{0} cube:\n", saved.dim)?;
    write!(file, "{}", format_solution(saved.dim, &saved.placements))?;
    writeln!(file)?;
    for (number, piece) in pieces.iter().enumerate() {
        writeln!(file, "{}: {}", number + 1, piece.name)?;
    }
    file.flush()
}

/// Saves the solution in compact binary format for fast loading.
///
/// Fails with [`ErrorKind::InvalidInput`] when a value does not fit its field,
/// before the file is created.
fn save_binary(dir: &Path, saved: &SavedSolution) -> std::io::Result<()> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&to_u32(saved.dim)?.to_le_bytes());
    bytes.extend_from_slice(&to_u32(saved.placements.len())?.to_le_bytes());

    for placed in &saved.placements {
        bytes.extend_from_slice(&to_u32(placed.piece_index)?.to_le_bytes());
        bytes.extend_from_slice(&to_u32(placed.coords.len())?.to_le_bytes());
        for &(x, y, z) in &placed.coords {
            bytes.extend_from_slice(&[to_u8(x)?, to_u8(y)?, to_u8(z)?]);
        }
    }

    let mut file = BufWriter::new(File::create(dir.join(SOLUTION_BIN))?);
    file.write_all(&bytes)?;
    file.flush()
}

fn to_u32(value: usize) -> std::io::Result<u32> {
    u32::try_from(value).map_err(|_| out_of_range(value))
}

fn to_u8(value: i32) -> std::io::Result<u8> {
    u8::try_from(value).map_err(|_| out_of_range(value))
}

fn out_of_range(value: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(
        ErrorKind::InvalidInput,
        format!("{} does not fit in {}", value, SOLUTION_BIN),
    )
}

/// Loads a solution from the binary file in `dir`.
///
/// Returns `None` if the file is missing or truncated. Counts in the file are
/// not trusted for allocation.
pub fn load(dir: &Path) -> Option<SavedSolution> {
    let mut file = BufReader::new(File::open(dir.join(SOLUTION_BIN)).ok()?);
    let mut u32_buffer = [0u8; 4];

    file.read_exact(&mut u32_buffer).ok()?;
    let dim = u32::from_le_bytes(u32_buffer) as usize;

    file.read_exact(&mut u32_buffer).ok()?;
    let placement_count = u32::from_le_bytes(u32_buffer) as usize;

    let mut placements = Vec::new();
    for _ in 0..placement_count {
        file.read_exact(&mut u32_buffer).ok()?;
        let piece_index = u32::from_le_bytes(u32_buffer) as usize;

        file.read_exact(&mut u32_buffer).ok()?;
        let cube_count = u32::from_le_bytes(u32_buffer) as usize;

        let mut coords = Vec::new();
        for _ in 0..cube_count {
            let mut coord_buffer = [0u8; 3];
            file.read_exact(&mut coord_buffer).ok()?;
            coords.push((
                coord_buffer[0] as i32,
                coord_buffer[1] as i32,
                coord_buffer[2] as i32,
            ));
        }
        placements.push(Placement {
            piece_index,
            coords,
        });
    }

    Some(SavedSolution { dim, placements })
}

/// Formats a solution as a JavaScript array for a web renderer.
///
/// Each entry is `[pieceIndex, [[x,y,z], ...]]`.
pub fn format_js(solution: &[Placement]) -> String {
    let mut output = String::from("const SOLUTION = [\n");
    for (i, placed) in solution.iter().enumerate() {
        let _ = write!(output, "  [{}, [", placed.piece_index);
        for (k, &(x, y, z)) in placed.coords.iter().enumerate() {
            let _ = write!(output, "[{},{},{}]", x, y, z);
            if k + 1 < placed.coords.len() {
                output.push(',');
            }
        }
        output.push_str("]]");
        if i + 1 < solution.len() {
            output.push(',');
        }
        output.push('\n');
    }
    output.push_str("];\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::soma_pieces;

    fn sample() -> SavedSolution {
        SavedSolution {
            dim: 2,
            placements: vec![
                Placement {
                    piece_index: 1,
                    coords: vec![(0, 0, 0), (1, 0, 0), (0, 1, 0)],
                },
                Placement {
                    piece_index: 0,
                    coords: vec![(1, 1, 1)],
                },
            ],
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let saved = sample();

        save(dir.path(), &soma_pieces(), &saved).unwrap();

        assert_eq!(load(dir.path()), Some(saved));
        let text = std::fs::read_to_string(dir.path().join(SOLUTION_TXT)).unwrap();
        assert!(text.starts_with("Solution for a 2x2x2 cube:"));
        assert!(text.contains("1: A"));
    }

    #[test]
    fn test_load_missing_or_truncated() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(dir.path()), None);

        save(dir.path(), &[], &sample()).unwrap();
        let path = dir.path().join(SOLUTION_BIN);
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() - 1]).unwrap();
        assert_eq!(load(dir.path()), None);
    }

    #[test]
    fn test_load_ignores_huge_counts() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = Vec::new();
        for value in [3u32, 1, 0, u32::MAX] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(&[0, 0, 0]);
        std::fs::write(dir.path().join(SOLUTION_BIN), &bytes).unwrap();

        assert_eq!(load(dir.path()), None);

        let mut bytes = Vec::new();
        for value in [3u32, u32::MAX] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        std::fs::write(dir.path().join(SOLUTION_BIN), &bytes).unwrap();

        assert_eq!(load(dir.path()), None);
    }

    #[test]
    fn test_save_rejects_wide_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let saved = SavedSolution {
            dim: 300,
            placements: vec![Placement {
                piece_index: 0,
                coords: vec![(299, 256, 0)],
            }],
        };

        let err = save(dir.path(), &[], &saved).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(!dir.path().join(SOLUTION_BIN).exists());
        assert!(!dir.path().join(SOLUTION_TXT).exists());

        let mut negative = sample();
        negative.placements[0].coords[0] = (-1, 0, 0);
        let err = save(dir.path(), &[], &negative).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_format_js() {
        insta::assert_snapshot!(format_js(&sample().placements), @r"
        const SOLUTION = [
          [1, [[0,0,0],[1,0,0],[0,1,0]]],
          [0, [[1,1,1]]]
        ];
        ");
    }
}
