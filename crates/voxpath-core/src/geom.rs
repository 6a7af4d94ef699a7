//! Geometry primitives: [`Voxel`] and [`Bounds`].
//!
//! Coordinates are integers. Y is the vertical axis; X and Z span the
//! horizontal plane.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Voxel
// ---------------------------------------------------------------------------

/// An integer voxel coordinate.
///
/// Voxels are plain values: two voxels are equal iff all three coordinates
/// match, and the same rule drives hashing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voxel {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Voxel {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new voxel coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a voxel shifted by (dx, dy, dz).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Like [`shift`](Self::shift), but `None` if any axis leaves the `i32`
    /// range.
    #[inline]
    pub const fn checked_shift(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        let (Some(x), Some(y), Some(z)) = (
            self.x.checked_add(dx),
            self.y.checked_add(dy),
            self.z.checked_add(dz),
        ) else {
            return None;
        };
        Some(Self { x, y, z })
    }

    /// The voxel directly above.
    #[inline]
    pub const fn up(self) -> Self {
        self.shift(0, 1, 0)
    }

    /// The voxel directly below.
    #[inline]
    pub const fn down(self) -> Self {
        self.shift(0, -1, 0)
    }

    /// Whether the voxel is inside the half-open bounds.
    #[inline]
    pub fn in_bounds(self, b: &Bounds) -> bool {
        b.contains(self)
    }

    /// The voxel containing a floating-point position (each axis floored).
    #[inline]
    pub fn from_position(x: f32, y: f32, z: f32) -> Self {
        Self::new(x.floor() as i32, y.floor() as i32, z.floor() as i32)
    }

    /// Component-wise absolute value.
    #[inline]
    pub const fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }
}

impl PartialOrd for Voxel {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Voxel {
    /// Layer-major order: by `y`, then `z`, then `x`.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y
            .cmp(&other.y)
            .then(self.z.cmp(&other.z))
            .then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Voxel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Add for Voxel {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Voxel {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for Voxel {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Voxel {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for Voxel {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Voxel> for (i32, i32, i32) {
    fn from(v: Voxel) -> Self {
        (v.x, v.y, v.z)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// A half-open box \[min, max). `min` is inclusive, `max` is exclusive.
///
/// All empty boxes compare equal.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min: Voxel,
    pub max: Voxel,
}

impl PartialEq for Bounds {
    fn eq(&self, other: &Self) -> bool {
        (self.min == other.min && self.max == other.max) || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Bounds {}

impl Bounds {
    /// Create a new box from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(a: Voxel, b: Voxel) -> Self {
        Self {
            min: Voxel::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Voxel::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Box anchored at the origin with the given extents.
    #[inline]
    pub fn from_size(width: i32, height: i32, depth: i32) -> Self {
        Self::new(Voxel::ZERO, Voxel::new(width, height, depth))
    }

    /// Extents along each axis.
    #[inline]
    pub fn size(self) -> Voxel {
        self.max - self.min
    }

    /// Extent along X.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Extent along Z.
    #[inline]
    pub fn depth(self) -> i32 {
        self.max.z - self.min.z
    }

    /// Total number of voxels in the box.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize) * (self.depth() as usize)
    }

    /// Whether the box has zero or negative volume.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y || self.min.z >= self.max.z
    }

    /// Whether `v` is inside the half-open box.
    #[inline]
    pub fn contains(self, v: Voxel) -> bool {
        v.x >= self.min.x
            && v.x < self.max.x
            && v.y >= self.min.y
            && v.y < self.max.y
            && v.z >= self.min.z
            && v.z < self.max.z
    }

    /// Intersection of two boxes. Returns the zero box when they do not
    /// overlap.
    #[inline]
    pub fn intersect(self, other: Bounds) -> Self {
        let b = Self {
            min: Voxel::new(
                self.min.x.max(other.min.x),
                self.min.y.max(other.min.y),
                self.min.z.max(other.min.z),
            ),
            max: Voxel::new(
                self.max.x.min(other.max.x),
                self.max.y.min(other.max.y),
                self.max.z.min(other.max.z),
            ),
        };
        if b.is_empty() { Self::default() } else { b }
    }

    /// Layer-major iterator over every voxel in the box (X fastest, then Z,
    /// then Y).
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Voxel;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// BoundsIter
// ---------------------------------------------------------------------------

/// Layer-major iterator over the voxels of a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    cur: Voxel,
}

impl Iterator for BoundsIter {
    type Item = Voxel;

    #[inline]
    fn next(&mut self) -> Option<Voxel> {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return None;
        }
        let v = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.bounds.max.x {
            self.cur.x = self.bounds.min.x;
            self.cur.z += 1;
            if self.cur.z >= self.bounds.max.z {
                self.cur.z = self.bounds.min.z;
                self.cur.y += 1;
            }
        }
        Some(v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.cur.y >= self.bounds.max.y {
            return (0, Some(0));
        }
        let w = self.bounds.width() as usize;
        let layer = w * self.bounds.depth() as usize;
        let in_row = (self.bounds.max.x - self.cur.x) as usize;
        let rows_in_layer = (self.bounds.max.z - self.cur.z - 1) as usize;
        let layers = (self.bounds.max.y - self.cur.y - 1) as usize;
        let total = in_row + rows_in_layer * w + layers * layer;
        (total, Some(total))
    }
}

impl ExactSizeIterator for BoundsIter {}
