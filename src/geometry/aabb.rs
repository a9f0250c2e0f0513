use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Axis-aligned bounding box.
///
/// An empty box is `min = +inf, max = -inf` on every axis. That sentinel
/// makes `size` negative, and it is the identity of `union`, so freshly
/// allocated nodes fold new content in without a separate empty flag.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Signed volume. Negative for the empty sentinel.
    ///
    /// A box flattened on any axis has volume 0 however large its other
    /// extents are, so volume-driven placement heuristics see nothing to
    /// compare on planar content.
    pub fn size(&self) -> f32 {
        let d = self.max - self.min;
        d.x * d.y * d.z
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Volume of `self.union(other)` without building the box.
    pub fn union_size(&self, other: &Self) -> f32 {
        let d = self.max.max(other.max) - self.min.min(other.min);
        d.x * d.y * d.z
    }

    pub fn union_point(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Boundary-inclusive on every axis.
    pub fn fully_contains(&self, other: &Self) -> bool {
        other.min.cmpge(self.min).all() && other.max.cmple(self.max).all()
    }

    /// True unless the boxes are separated on at least one axis; boxes
    /// that only touch still overlap.
    pub fn overlap(&self, other: &Self) -> bool {
        !(other.min.cmpgt(self.max).any() || other.max.cmplt(self.min).any())
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_unit_cubes() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(10.0), Vec3::splat(11.0));
        assert!(!a.overlap(&b));
        assert!(!b.overlap(&a));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(11.0));
        assert_eq!(u.size(), 1331.0);
        assert_eq!(a.union_size(&b), 1331.0);
    }

    #[test]
    fn overlapping_cubes() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        let b = Aabb::new(Vec3::ONE, Vec3::splat(3.0));
        assert!(a.overlap(&b));
        assert!(b.overlap(&a));
        assert!(!a.fully_contains(&b));
        assert_eq!(a.union_size(&b), 27.0);
    }

    #[test]
    fn containment_implies_overlap() {
        let outer = Aabb::new(Vec3::ZERO, Vec3::splat(4.0));
        let inner = Aabb::new(Vec3::ONE, Vec3::splat(2.0));
        assert!(outer.fully_contains(&inner));
        assert!(outer.overlap(&inner));
        assert!(inner.overlap(&outer));
        // boundaries are inclusive, so a box contains itself
        assert!(outer.fully_contains(&outer));
    }

    #[test]
    fn point_box_is_degenerate() {
        let point = Aabb::from_point(Vec3::ONE);
        assert_eq!(point.size(), 0.0);
        let around = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        assert!(around.overlap(&point));
        assert!(point.overlap(&around));
    }

    #[test]
    fn touching_faces_overlap() {
        let left = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let right = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(left.overlap(&right));
        assert!(right.overlap(&left));
    }

    #[test]
    fn empty_sentinel() {
        let empty = Aabb::EMPTY;
        assert!(empty.size() < 0.0);
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(empty.union(&b), b);
        assert_eq!(empty.union_size(&b), b.size());
        assert!(!empty.overlap(&b));
        assert!(!empty.fully_contains(&b));
    }

    #[test]
    fn flat_box_has_zero_volume() {
        let flat = Aabb::new(Vec3::ZERO, Vec3::new(5.0, 0.0, 5.0));
        assert_eq!(flat.size(), 0.0);
        assert_eq!(flat.union_point(Vec3::new(0.0, 1.0, 0.0)).size(), 25.0);
    }
}
