//! Core abstraction traits for feeding positions into the engine.

use crate::point::Point3;

/// A collaborator-owned set of positions copied into the engine each step.
///
/// Entity storage, lifecycle, and kinematics live outside the engine; the
/// engine only asks for the current positions, once per step, into a
/// buffer it allocated at construction.
pub trait PositionSource {
    /// Number of positions this source will write.
    fn len(&self) -> usize;

    /// Whether the source has no positions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the current positions into `out`.
    ///
    /// The engine only calls this with `out.len() == self.len()`.
    fn fill(&self, out: &mut [Point3]);
}

impl PositionSource for [Point3] {
    fn len(&self) -> usize {
        <[Point3]>::len(self)
    }

    fn fill(&self, out: &mut [Point3]) {
        out.copy_from_slice(self);
    }
}

impl PositionSource for Vec<Point3> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn fill(&self, out: &mut [Point3]) {
        out.copy_from_slice(self);
    }
}
