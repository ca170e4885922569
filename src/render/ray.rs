use crate::math::{
    point::Point,
    vector::{GeometryError, Vector},
};

/// The direction is normalized at construction, so a ray with a degenerate
/// direction cannot be built; scene intersection never has to re-check it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    origin: Point,
    direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Result<Self, GeometryError> {
        Ok(Self {
            origin,
            direction: direction.normalize()?,
        })
    }

    pub fn position(&self, distance: f64) -> Point {
        self.origin + self.direction * distance
    }

    pub fn origin(&self) -> &Point {
        &self.origin
    }

    pub fn direction(&self) -> &Vector {
        &self.direction
    }
}
