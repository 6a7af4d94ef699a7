use voxpath_core::Voxel;

/// Manhattan (L1) distance between two voxels.
///
/// Exact for any pair of `i32` coordinates.
#[inline]
pub fn manhattan(a: Voxel, b: Voxel) -> u64 {
    u64::from(a.y.abs_diff(b.y)) + manhattan_xz(a, b)
}

/// Horizontal Manhattan distance, ignoring Y.
#[inline]
pub fn manhattan_xz(a: Voxel, b: Voxel) -> u64 {
    u64::from(a.x.abs_diff(b.x)) + u64::from(a.z.abs_diff(b.z))
}
