//! 3D rotation and transformation utilities.
//!
//! A cube has 24 possible orientations in 3D space (the rotation group of a cube).
//! These are the 6 ways to choose which face points up, times 4 rotations around
//! the vertical axis.

use rustc_hash::FxHashSet;

use crate::pieces::Coord;

/// All 24 rotation functions for a cube.
///
/// Organized as 6 face-up choices x 4 rotations around vertical:
/// - Rotations 0-3: +Z face up
/// - Rotations 4-7: +Y face up
/// - Rotations 8-11: -Z face up
/// - Rotations 12-15: -Y face up
/// - Rotations 16-19: +X face up
/// - Rotations 20-23: -X face up
pub const ROTATIONS: [fn(Coord) -> Coord; 24] = [
    // +Z face up, quarter turns about Z
    |(x, y, z)| (x, y, z),
    |(x, y, z)| (-y, x, z),
    |(x, y, z)| (-x, -y, z),
    |(x, y, z)| (y, -x, z),
    // +Y face up
    |(x, y, z)| (x, -z, y),
    |(x, y, z)| (z, x, y),
    |(x, y, z)| (-x, z, y),
    |(x, y, z)| (-z, -x, y),
    // -Z face up
    |(x, y, z)| (x, -y, -z),
    |(x, y, z)| (y, x, -z),
    |(x, y, z)| (-x, y, -z),
    |(x, y, z)| (-y, -x, -z),
    // -Y face up
    |(x, y, z)| (x, z, -y),
    |(x, y, z)| (-z, x, -y),
    |(x, y, z)| (-x, -z, -y),
    |(x, y, z)| (z, -x, -y),
    // +X face up
    |(x, y, z)| (z, y, -x),
    |(x, y, z)| (-y, z, -x),
    |(x, y, z)| (-z, -y, -x),
    |(x, y, z)| (y, -z, -x),
    // -X face up
    |(x, y, z)| (-z, y, x),
    |(x, y, z)| (-y, -z, x),
    |(x, y, z)| (z, -y, x),
    |(x, y, z)| (y, z, x),
];

/// Generates the distinct orientations of a shape in canonical form.
///
/// Each of the 24 rotations is applied, the result is shifted to the origin and
/// sorted, and repeats are dropped. Symmetric shapes produce fewer than 24
/// orientations. The result keeps the order in which orientations were first
/// generated, which only depends on the shape's geometry.
pub fn rotations(shape: &[Coord]) -> Vec<Vec<Coord>> {
    let mut seen: FxHashSet<Vec<Coord>> = FxHashSet::default();
    let mut orientations = Vec::new();

    for rotate in &ROTATIONS {
        let rotated: Vec<Coord> = shape.iter().map(|&coord| rotate(coord)).collect();
        let canonical = canonical_form(rotated);
        if seen.insert(canonical.clone()) {
            orientations.push(canonical);
        }
    }

    orientations
}

/// Shifts a shape to the origin and sorts its voxels by x, then y, then z.
pub fn canonical_form(coords: Vec<Coord>) -> Vec<Coord> {
    let mut normalized = normalize_to_origin(coords);
    normalized.sort_unstable();
    normalized
}

/// Returns the largest coordinate on each axis.
///
/// For a normalized shape this is its bounding-box extent minus one.
pub fn bounding_box(shape: &[Coord]) -> Coord {
    shape.iter().fold((0, 0, 0), |(mx, my, mz), &(x, y, z)| {
        (mx.max(x), my.max(y), mz.max(z))
    })
}

/// Translates coordinates so the minimum x, y, z values are all zero.
fn normalize_to_origin(mut coords: Vec<Coord>) -> Vec<Coord> {
    let Some(&first) = coords.first() else {
        return coords;
    };
    let (min_x, min_y, min_z) = coords.iter().fold(first, |(mx, my, mz), &(x, y, z)| {
        (mx.min(x), my.min(y), mz.min(z))
    });

    for (x, y, z) in &mut coords {
        *x -= min_x;
        *y -= min_y;
        *z -= min_z;
    }

    coords
}
