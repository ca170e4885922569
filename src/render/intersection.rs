use crate::math::{point::Point, vector::Vector};

use super::{object::Object, ray::Ray};

/// A resolved hit. The hit point and surface normal are computed eagerly at
/// construction so shading never re-derives them.
#[derive(Clone, Debug)]
pub struct Intersection<'a> {
    distance: f64,
    object: &'a Object,
    point: Point,
    normal: Vector,
}

impl<'a> Intersection<'a> {
    pub fn new(ray: &Ray, distance: f64, object: &'a Object) -> Self {
        let point = ray.position(distance);
        let normal = object.shape().normal_at(point);
        Self {
            distance,
            object,
            point,
            normal,
        }
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn object(&self) -> &'a Object {
        self.object
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }
}
