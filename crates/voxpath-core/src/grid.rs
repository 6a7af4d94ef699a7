//! Dense voxel storage.
//!
//! [`VoxelGrid`] stores one `u16` material per voxel inside a [`Bounds`].
//! Material `0` ([`EMPTY`]) is air; every other value is solid.

use std::fmt;

use crate::geom::{Bounds, Voxel};

/// Material value of an empty voxel.
pub const EMPTY: u16 = 0;

/// A dense 3-D grid of voxel materials.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VoxelGrid {
    bounds: Bounds,
    cells: Vec<u16>,
}

impl VoxelGrid {
    /// Create a grid covering `bounds`, filled with [`EMPTY`].
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cells: vec![EMPTY; bounds.len()],
        }
    }

    /// Create an origin-anchored grid of the given extents.
    pub fn with_size(width: i32, height: i32, depth: i32) -> Self {
        Self::new(Bounds::from_size(width, height, depth))
    }

    /// Wrap existing cell data, laid out X fastest, then Z, then Y.
    ///
    /// Fails unless `cells` holds exactly one entry per voxel of `bounds`.
    pub fn from_cells(bounds: Bounds, cells: Vec<u16>) -> Result<Self, GridError> {
        let extents = [
            bounds.max.x.abs_diff(bounds.min.x),
            bounds.max.y.abs_diff(bounds.min.y),
            bounds.max.z.abs_diff(bounds.min.z),
        ];
        if !bounds.is_empty() && extents.iter().any(|&e| e > i32::MAX as u32) {
            return Err(GridError::BoundsTooLarge { bounds });
        }
        let expected = bounds.len();
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                got: cells.len(),
            });
        }
        Ok(Self { bounds, cells })
    }

    /// Build a grid from a height map.
    ///
    /// `heights` holds `width * depth` column heights in row-major order
    /// (X fastest). Column `(x, z)` is filled with `material` from `y = 0`
    /// up to and including `y = heights[z * width + x]`; a negative height
    /// leaves the column empty. The grid is `max_height + 1` voxels tall.
    pub fn from_heightmap(
        width: i32,
        depth: i32,
        heights: &[i32],
        max_height: i32,
        material: u16,
    ) -> Result<Self, GridError> {
        let expected = (width.max(0) as usize) * (depth.max(0) as usize);
        if heights.len() != expected {
            return Err(GridError::HeightmapSize {
                expected,
                got: heights.len(),
            });
        }
        let mut grid = Self::with_size(width, max_height + 1, depth);
        for z in 0..depth {
            for x in 0..width {
                let h = heights[(z * width + x) as usize];
                if h > max_height {
                    return Err(GridError::HeightOutOfRange {
                        column: (x, z),
                        height: h,
                        max: max_height,
                    });
                }
                for y in 0..=h {
                    grid.set(Voxel::new(x, y, z), material);
                }
            }
        }
        Ok(grid)
    }

    /// Parse a grid from ASCII layers.
    ///
    /// Layers are separated by blank lines, bottom layer (`y = 0`) first.
    /// Within a layer each line is one Z row and each character one X
    /// column: `#` is solid (material 1), `.` is empty.
    pub fn from_layers(text: &str) -> Result<Self, GridError> {
        let layers: Vec<Vec<&str>> = text
            .trim_matches('\n')
            .split("\n\n")
            .map(|layer| layer.lines().map(str::trim_end).collect())
            .collect();

        let depth = layers.first().map_or(0, Vec::len);
        let width = layers
            .first()
            .and_then(|l| l.first())
            .map_or(0, |row| row.chars().count());

        for (y, layer) in layers.iter().enumerate() {
            if layer.len() != depth || layer.iter().any(|row| row.chars().count() != width) {
                return Err(GridError::InconsistentLayer { layer: y });
            }
        }

        let mut grid = Self::with_size(width as i32, layers.len() as i32, depth as i32);
        for (y, layer) in layers.iter().enumerate() {
            for (z, row) in layer.iter().enumerate() {
                for (x, ch) in row.chars().enumerate() {
                    let v = Voxel::new(x as i32, y as i32, z as i32);
                    match ch {
                        '#' => {
                            grid.set(v, 1);
                        }
                        '.' => {}
                        _ => return Err(GridError::InvalidRune { ch, pos: v }),
                    }
                }
            }
        }
        Ok(grid)
    }

    /// The box covered by this grid.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether the grid covers `v`.
    pub fn contains(&self, v: Voxel) -> bool {
        self.bounds.contains(v)
    }

    #[inline]
    fn index(&self, v: Voxel) -> usize {
        let d = v - self.bounds.min;
        let w = self.bounds.width() as usize;
        let layer = w * self.bounds.depth() as usize;
        d.y as usize * layer + d.z as usize * w + d.x as usize
    }

    /// Material at `v`, or `None` if out of bounds.
    pub fn at(&self, v: Voxel) -> Option<u16> {
        if !self.bounds.contains(v) {
            return None;
        }
        Some(self.cells[self.index(v)])
    }

    /// Material at `v`; voxels outside the grid read as [`EMPTY`].
    pub fn get(&self, v: Voxel) -> u16 {
        self.at(v).unwrap_or(EMPTY)
    }

    /// Whether `v` holds a non-empty material.
    pub fn is_solid(&self, v: Voxel) -> bool {
        self.get(v) != EMPTY
    }

    /// Set the material at `v`. Returns `false` if `v` is out of bounds.
    pub fn set(&mut self, v: Voxel, material: u16) -> bool {
        if !self.bounds.contains(v) {
            return false;
        }
        let idx = self.index(v);
        self.cells[idx] = material;
        true
    }

    /// Fill the whole grid with `material`.
    pub fn fill(&mut self, material: u16) {
        self.cells.fill(material);
    }

    /// Fill every voxel inside `region` (clipped to the grid).
    pub fn fill_region(&mut self, region: Bounds, material: u16) {
        for v in self.bounds.intersect(region).iter() {
            let idx = self.index(v);
            self.cells[idx] = material;
        }
    }

    /// Fill the grid using a function of each voxel.
    pub fn fill_fn(&mut self, mut f: impl FnMut(Voxel) -> u16) {
        for v in self.bounds.iter() {
            let idx = self.index(v);
            self.cells[idx] = f(v);
        }
    }

    /// Highest solid voxel in column `(x, z)`.
    pub fn top(&self, x: i32, z: i32) -> Option<Voxel> {
        (self.bounds.min.y..self.bounds.max.y)
            .rev()
            .map(|y| Voxel::new(x, y, z))
            .find(|&v| self.is_solid(v))
    }

    /// Count voxels holding `material`.
    pub fn count(&self, material: u16) -> usize {
        self.cells.iter().filter(|&&m| m == material).count()
    }

    /// Iterate over `(Voxel, material)` pairs in layer-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Voxel, u16)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

/// Errors that can occur when building a [`VoxelGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The height map does not hold `width * depth` entries.
    HeightmapSize { expected: usize, got: usize },
    /// A column is taller than the grid.
    HeightOutOfRange {
        column: (i32, i32),
        height: i32,
        max: i32,
    },
    /// A layer's rows differ in count or width from the first layer.
    InconsistentLayer { layer: usize },
    /// A character other than `#` or `.` was found.
    InvalidRune { ch: char, pos: Voxel },
    /// Cell data does not match the size of the bounds.
    CellCount { expected: usize, got: usize },
    /// The bounds span more than `i32::MAX` voxels along an axis.
    BoundsTooLarge { bounds: Bounds },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeightmapSize { expected, got } => {
                write!(f, "height map: expected {expected} columns, got {got}")
            }
            Self::HeightOutOfRange {
                column,
                height,
                max,
            } => write!(
                f,
                "height map: column ({}, {}) has height {height}, max is {max}",
                column.0, column.1
            ),
            Self::InconsistentLayer { layer } => {
                write!(f, "voxel layers: layer {layer} has inconsistent size")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "voxel layers: invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::CellCount { expected, got } => {
                write!(f, "voxel grid: expected {expected} cells, got {got}")
            }
            Self::BoundsTooLarge { bounds } => {
                write!(f, "voxel grid: bounds {bounds} are too large")
            }
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for VoxelGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct RawGrid {
            bounds: Bounds,
            cells: Vec<u16>,
        }
        let raw = RawGrid::deserialize(deserializer)?;
        VoxelGrid::from_cells(raw.bounds, raw.cells).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = VoxelGrid::with_size(2, 2, 2);
        g.set(Voxel::new(1, 1, 0), 4);
        let json = serde_json::to_string(&g).unwrap();
        let back: VoxelGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
    }

    #[test]
    fn grid_rejects_mismatched_cells() {
        let json = r#"{"bounds":{"min":{"x":0,"y":0,"z":0},"max":{"x":2,"y":2,"z":2}},"cells":[0,1,0]}"#;
        let err = serde_json::from_str::<VoxelGrid>(json).unwrap_err();
        assert!(err.to_string().contains("expected 8 cells, got 3"));
    }
}
