use crate::math::{
    point::Point,
    vector::{GeometryError, Vector},
};

use super::ray::Ray;

/// Hits closer than this along the ray are rejected, both to discard the
/// degenerate roots of the quadratic/barycentric forms and to keep secondary
/// rays from re-hitting the surface they start on.
const HIT_EPSILON: f64 = 1.0e-6;

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let center_to_origin = *ray.origin() - self.center;

        let a = ray.direction().dot(*ray.direction());
        let b = 2. * center_to_origin.dot(*ray.direction());
        let c = center_to_origin.dot(center_to_origin) - self.radius * self.radius;

        let discriminant = b * b - 4. * a * c;
        if discriminant < 0. {
            return None;
        }

        let delta_sqrt = discriminant.sqrt();
        let near = (-b - delta_sqrt) / (2. * a);
        let far = (-b + delta_sqrt) / (2. * a);

        // A non-positive near root means the origin is inside (or past) the
        // sphere; the far root is then the exit point.
        if near > HIT_EPSILON {
            Some(near)
        } else if far > HIT_EPSILON {
            Some(far)
        } else {
            None
        }
    }

    fn normal_at(&self, point: Point) -> Vector {
        (point - self.center) / self.radius
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    point: Point,
    normal: Vector,
}

impl Plane {
    /// The normal is normalized here once so every later query works with a
    /// unit vector.
    pub fn new(point: Point, normal: Vector) -> Result<Self, GeometryError> {
        Ok(Self {
            point,
            normal: normal.normalize()?,
        })
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = self.normal.dot(*ray.direction());
        if denom.abs() <= HIT_EPSILON {
            // ray runs parallel to the plane
            return None;
        }

        let t = (self.point - *ray.origin()).dot(self.normal) / denom;
        (t > HIT_EPSILON).then_some(t)
    }
}

/// Stored in edge form; the intersection and the flat-shading normal only
/// ever need the first vertex and the two edges leaving it.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    p1: Point,
    e1: Vector,
    e2: Vector,
    normal: Vector,
}

impl Triangle {
    /// Fails on collinear vertices, which have no well-defined normal.
    pub fn new(p1: Point, p2: Point, p3: Point) -> Result<Self, GeometryError> {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        let normal = e1.cross(e2).normalize()?;

        Ok(Self { p1, e1, e2, normal })
    }

    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// Moller-Trumbore barycentric intersection. The normal does not flip
    /// for back-face hits; the triangle is flat shaded from either side.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let pvec = ray.direction().cross(self.e2);
        let det = self.e1.dot(pvec);
        if det.abs() <= HIT_EPSILON {
            // ray parallel to the triangle plane
            return None;
        }

        let inv_det = 1. / det;
        let tvec = *ray.origin() - self.p1;
        let beta = inv_det * tvec.dot(pvec);
        if !(0. ..=1.).contains(&beta) {
            return None;
        }

        let qvec = tvec.cross(self.e1);
        let gamma = inv_det * ray.direction().dot(qvec);
        if gamma < 0. || beta + gamma > 1. {
            return None;
        }

        let t = inv_det * self.e2.dot(qvec);
        (t > HIT_EPSILON).then_some(t)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Shape {
    /// Nearest hit distance strictly past the epsilon, or `None`.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        match self {
            Shape::Sphere(sphere) => sphere.intersect(ray),
            Shape::Plane(plane) => plane.intersect(ray),
            Shape::Triangle(triangle) => triangle.intersect(ray),
        }
    }

    /// Unit surface normal at a point assumed to lie on the shape.
    pub fn normal_at(&self, point: Point) -> Vector {
        match self {
            Shape::Sphere(sphere) => sphere.normal_at(point),
            Shape::Plane(plane) => plane.normal,
            Shape::Triangle(triangle) => triangle.normal,
        }
    }
}
