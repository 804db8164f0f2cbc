// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The face of a node's bounding box an edge endpoint attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Enumeration order; nearest-side ties resolve to the earliest entry.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSideError {
    value: String,
}

impl fmt::Display for ParseSideError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown side '{}' (expected top/right/bottom/left)", self.value)
    }
}

impl std::error::Error for ParseSideError {}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "right" => Ok(Self::Right),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            _ => Err(ParseSideError { value: s.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Axis-aligned bounding box. `y` grows downwards, as on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    /// Center point of the given face.
    pub fn anchor(&self, side: Side) -> Point {
        let center = self.center();
        match side {
            Side::Top => Point::new(center.x, self.min_y),
            Side::Right => Point::new(self.max_x, center.y),
            Side::Bottom => Point::new(center.x, self.max_y),
            Side::Left => Point::new(self.min_x, center.y),
        }
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }
}

/// Picks the pair of faces whose center points are closest to each other.
///
/// All 16 combinations are evaluated; on equal distance the first pair in `Side::ALL` order
/// (outer loop over `from`, inner loop over `to`) wins.
pub fn nearest_sides(from: &BoundingBox, to: &BoundingBox) -> (Side, Side) {
    let mut best = (Side::Top, Side::Top);
    let mut best_distance = f64::INFINITY;

    for side_from in Side::ALL {
        let point_from = from.anchor(side_from);
        for side_to in Side::ALL {
            let distance = point_from.distance_squared(to.anchor(side_to));
            if distance < best_distance {
                best_distance = distance;
                best = (side_from, side_to);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{nearest_sides, BoundingBox, Point, Side};

    #[test]
    fn anchors_sit_on_face_centers() {
        let bbox = BoundingBox::from_rect(0.0, 0.0, 10.0, 20.0);
        assert_eq!(bbox.anchor(Side::Top), Point::new(5.0, 0.0));
        assert_eq!(bbox.anchor(Side::Right), Point::new(10.0, 10.0));
        assert_eq!(bbox.anchor(Side::Bottom), Point::new(5.0, 20.0));
        assert_eq!(bbox.anchor(Side::Left), Point::new(0.0, 10.0));
    }

    #[rstest]
    #[case::left_of(BoundingBox::new(100.0, 0.0, 110.0, 10.0), (Side::Right, Side::Left))]
    #[case::right_of(BoundingBox::new(-110.0, 0.0, -100.0, 10.0), (Side::Left, Side::Right))]
    #[case::above(BoundingBox::new(0.0, 100.0, 10.0, 110.0), (Side::Bottom, Side::Top))]
    #[case::below(BoundingBox::new(0.0, -110.0, 10.0, -100.0), (Side::Top, Side::Bottom))]
    fn nearest_sides_follow_relative_position(
        #[case] other: BoundingBox,
        #[case] expected: (Side, Side),
    ) {
        let origin = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(nearest_sides(&origin, &other), expected);
    }

    #[test]
    fn nearest_sides_ties_resolve_in_enumeration_order() {
        // Identical boxes: every face touches itself at distance zero, `top` comes first.
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(nearest_sides(&bbox, &bbox), (Side::Top, Side::Top));
    }

    #[test]
    fn nearest_sides_on_diagonal_prefers_first_candidate() {
        // B is diagonally below-right: right->top and bottom->left are equally close.
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
        assert_eq!(nearest_sides(&a, &b), (Side::Right, Side::Top));
    }

    #[test]
    fn side_parses_and_formats() {
        for side in Side::ALL {
            assert_eq!(side.as_str().parse::<Side>(), Ok(side));
        }
        assert!("middle".parse::<Side>().is_err());
    }
}
