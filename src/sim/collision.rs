//! Box collision
//!
//! Every vehicle and obstacle is an axis-aligned box. Touching edges do not
//! count as contact; any positive overlap does.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (y grows in the scroll direction)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box whose top edge is at `top`, horizontally centered on `center_x`
    pub fn from_top_center(center_x: f32, top: f32, width: f32, height: f32) -> Self {
        let half = width / 2.0;
        Self {
            min: Vec2::new(center_x - half, top),
            max: Vec2::new(center_x + half, top + height),
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.max.y),
            self.max,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::from_top_center(100.0, 0.0, 40.0, 70.0);
        // a spans x 80..120
        let b = Aabb::new(Vec2::new(120.0, 10.0), Vec2::new(150.0, 40.0));
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));

        let below = Aabb::new(Vec2::new(90.0, 70.0), Vec2::new(110.0, 90.0));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_one_unit_overlap_collides() {
        let a = Aabb::from_top_center(100.0, 0.0, 40.0, 70.0);
        let b = Aabb::new(Vec2::new(119.0, 10.0), Vec2::new(150.0, 40.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_disjoint_and_contained() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let far = Aabb::new(Vec2::new(50.0, 50.0), Vec2::new(60.0, 60.0));
        let inner = Aabb::new(Vec2::new(2.0, 2.0), Vec2::new(4.0, 4.0));
        assert!(!a.intersects(&far));
        assert!(a.intersects(&inner));
        assert!(inner.intersects(&a));
    }

    #[test]
    fn test_corners_and_size() {
        let a = Aabb::from_top_center(0.0, 10.0, 20.0, 30.0);
        assert_eq!(a.size(), Vec2::new(20.0, 30.0));
        assert_eq!(
            a.corners(),
            [
                Vec2::new(-10.0, 10.0),
                Vec2::new(10.0, 10.0),
                Vec2::new(-10.0, 40.0),
                Vec2::new(10.0, 40.0),
            ]
        );
    }
}
