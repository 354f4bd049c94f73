//! Lane indices and steering directions
//!
//! The road always has three lanes. Keeping the index in an enum makes an
//! out-of-range lane unrepresentable; steering off the edge yields `None`.

use serde::{Deserialize, Serialize};

/// Number of lanes on the road
pub const LANE_COUNT: usize = 3;

/// One of the three longitudinal corridors, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left = 0,
    #[default]
    Middle = 1,
    Right = 2,
}

/// A single-lane step, -1 (left) or +1 (right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Steer {
    Left,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Middle, Lane::Right];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The adjacent lane in the given direction, if there is one
    pub fn offset(self, steer: Steer) -> Option<Self> {
        let index = self.index() as i32 + steer.delta();
        usize::try_from(index).ok().and_then(Self::from_index)
    }

    /// Number of lanes between `self` and `other`
    pub fn distance(self, other: Lane) -> usize {
        self.index().abs_diff(other.index())
    }

    /// Direction of `other` relative to `self` (`None` if they are the same lane)
    pub fn steer_toward(self, other: Lane) -> Option<Steer> {
        match other.index().cmp(&self.index()) {
            std::cmp::Ordering::Less => Some(Steer::Left),
            std::cmp::Ordering::Greater => Some(Steer::Right),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Steer {
    #[inline]
    pub fn delta(self) -> i32 {
        match self {
            Steer::Left => -1,
            Steer::Right => 1,
        }
    }

    /// Map a raw -1/0/+1 request; anything else is no request
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta {
            -1 => Some(Steer::Left),
            1 => Some(Steer::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_in_range() {
        assert_eq!(Lane::Middle.offset(Steer::Left), Some(Lane::Left));
        assert_eq!(Lane::Middle.offset(Steer::Right), Some(Lane::Right));
        assert_eq!(Lane::Left.offset(Steer::Left), None);
        assert_eq!(Lane::Right.offset(Steer::Right), None);
    }

    #[test]
    fn test_steer_toward() {
        assert_eq!(Lane::Left.steer_toward(Lane::Middle), Some(Steer::Right));
        assert_eq!(Lane::Right.steer_toward(Lane::Left), Some(Steer::Left));
        assert_eq!(Lane::Middle.steer_toward(Lane::Middle), None);
    }

    #[test]
    fn test_from_delta() {
        assert_eq!(Steer::from_delta(-1), Some(Steer::Left));
        assert_eq!(Steer::from_delta(0), None);
        assert_eq!(Steer::from_delta(1), Some(Steer::Right));
        assert_eq!(Steer::from_delta(2), None);
    }

    #[test]
    fn test_index_round_trip() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_index(lane.index()), Some(lane));
        }
        assert_eq!(Lane::from_index(3), None);
        assert_eq!(Lane::Left.distance(Lane::Right), 2);
    }
}
