use std::collections::HashMap;

use voxpath_core::{EMPTY, Voxel, VoxelGrid};

/// Read access to a voxel world.
///
/// `0` ([`EMPTY`]) is air; any other material is solid ground.
pub trait VoxelWorld {
    /// Material at `v`.
    fn voxel(&self, v: Voxel) -> u16;

    /// Whether `v` holds a non-empty material.
    fn is_solid(&self, v: Voxel) -> bool {
        self.voxel(v) != EMPTY
    }
}

impl VoxelWorld for VoxelGrid {
    #[inline]
    fn voxel(&self, v: Voxel) -> u16 {
        self.get(v)
    }
}

/// Sparse worlds: missing keys are empty.
impl VoxelWorld for HashMap<Voxel, u16> {
    #[inline]
    fn voxel(&self, v: Voxel) -> u16 {
        self.get(&v).copied().unwrap_or(EMPTY)
    }
}

impl<T: VoxelWorld + ?Sized> VoxelWorld for &T {
    #[inline]
    fn voxel(&self, v: Voxel) -> u16 {
        (**self).voxel(v)
    }
}
