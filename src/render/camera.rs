use crate::math::{
    point::Point,
    vector::{GeometryError, Vector},
};

use super::ray::Ray;

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    look_from: Point,
    look_at: Point,
    up: Vector,
    /// field of view, degrees
    fov: f64,
}

impl Camera {
    pub fn new(
        look_from: Point,
        look_at: Point,
        up: Vector,
        fov: f64,
    ) -> Result<Self, GeometryError> {
        Ok(Self {
            look_from,
            look_at,
            up: up.normalize()?,
            fov,
        })
    }

    pub fn look_from(&self) -> Point {
        self.look_from
    }

    pub fn look_at(&self) -> Point {
        self.look_at
    }

    pub fn up(&self) -> Vector {
        self.up
    }

    pub fn fov_radians(&self) -> f64 {
        self.fov.to_radians()
    }
}

/// Right-handed camera frame; `w` faces away from the view direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthonormalBasis {
    u: Vector,
    v: Vector,
    w: Vector,
}

impl OrthonormalBasis {
    /// Fails when the up direction is parallel to the view direction, which
    /// leaves no well-defined horizontal axis.
    pub fn from_camera(camera: &Camera) -> Result<Self, GeometryError> {
        let w = (camera.look_from() - camera.look_at()).normalize()?;
        let u = camera.up().cross(w).normalize()?;
        let v = w.cross(u);
        Ok(Self { u, v, w })
    }

    pub fn u(&self) -> Vector {
        self.u
    }

    pub fn v(&self) -> Vector {
        self.v
    }

    pub fn w(&self) -> Vector {
        self.w
    }
}

/// Maps pixel coordinates to world-space primary rays. The view-plane
/// half-extents come from the field of view and aspect ratio; the half-pixel
/// offset centers each sample within its pixel cell.
#[derive(Clone, Debug)]
pub struct Viewport {
    origin: Point,
    basis: OrthonormalBasis,
    half_extent_x: f64,
    half_extent_y: f64,
    width: usize,
    height: usize,
}

impl Viewport {
    pub fn new(camera: &Camera, width: usize, height: usize) -> Result<Self, GeometryError> {
        let basis = OrthonormalBasis::from_camera(camera)?;
        let aspect_ratio = width as f64 / height as f64;
        let half_extent_y = (camera.fov_radians() / 2.).tan();
        let half_extent_x = half_extent_y * aspect_ratio;

        Ok(Self {
            origin: camera.look_from(),
            basis,
            half_extent_x,
            half_extent_y,
            width,
            height,
        })
    }

    pub fn ray_for_pixel(&self, i: usize, j: usize) -> Result<Ray, GeometryError> {
        let half_width = self.width as f64 / 2.;
        let half_height = self.height as f64 / 2.;

        let a = self.half_extent_x * (i as f64 - half_width + 0.5) / half_width;
        let b = self.half_extent_y * (j as f64 - half_height + 0.5) / half_height;

        let direction = self.basis.u() * a + self.basis.v() * b - self.basis.w();
        Ray::new(self.origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{approx_eq::ApproxEq, assert_approx_eq, math::tuple::Tuple};

    fn camera_at_z5() -> Camera {
        Camera::new(
            Point::new(0., 0., 5.),
            Point::zero(),
            Vector::new(0., 1., 0.),
            90.,
        )
        .unwrap()
    }

    #[test]
    fn basis_is_right_handed_and_unit() {
        let basis = OrthonormalBasis::from_camera(&camera_at_z5()).unwrap();

        assert_approx_eq!(basis.w(), Vector::new(0., 0., 1.));
        assert_approx_eq!(basis.u(), Vector::new(1., 0., 0.));
        assert_approx_eq!(basis.v(), Vector::new(0., 1., 0.));
    }

    #[test]
    fn basis_vectors_are_mutually_orthogonal() {
        let camera = Camera::new(
            Point::new(3., -2., 7.),
            Point::new(0., 1., 0.),
            Vector::new(0., 1., 0.),
            60.,
        )
        .unwrap();
        let basis = OrthonormalBasis::from_camera(&camera).unwrap();

        assert_approx_eq!(basis.u().dot(basis.v()), 0.);
        assert_approx_eq!(basis.u().dot(basis.w()), 0.);
        assert_approx_eq!(basis.v().dot(basis.w()), 0.);
        assert_approx_eq!(basis.u().magnitude(), 1.);
        assert_approx_eq!(basis.v().magnitude(), 1.);
        assert_approx_eq!(basis.w().magnitude(), 1.);
    }

    #[test]
    fn up_parallel_to_view_direction_fails() {
        let camera = Camera::new(
            Point::new(0., 5., 0.),
            Point::zero(),
            Vector::new(0., 1., 0.),
            45.,
        )
        .unwrap();

        assert!(OrthonormalBasis::from_camera(&camera).is_err());
    }

    #[test]
    fn center_pixel_ray_goes_through_look_at() {
        let viewport = Viewport::new(&camera_at_z5(), 101, 101).unwrap();

        // odd dimensions put the middle pixel's sample exactly on the axis
        let ray = viewport.ray_for_pixel(50, 50).unwrap();
        assert_approx_eq!(*ray.origin(), Point::new(0., 0., 5.));
        assert!(ray.direction().z() < 0.);
        assert!(ray.direction().x().abs() < 0.01);
        assert!(ray.direction().y().abs() < 0.01);
    }

    #[test]
    fn corner_pixels_are_symmetric() {
        let viewport = Viewport::new(&camera_at_z5(), 100, 100).unwrap();

        let top_left = viewport.ray_for_pixel(0, 0).unwrap();
        let bottom_right = viewport.ray_for_pixel(99, 99).unwrap();

        assert_approx_eq!(top_left.direction().x(), -bottom_right.direction().x());
        assert_approx_eq!(top_left.direction().y(), -bottom_right.direction().y());
        assert_approx_eq!(top_left.direction().z(), bottom_right.direction().z());
    }

    #[test]
    fn wider_image_widens_the_horizontal_extent() {
        let square = Viewport::new(&camera_at_z5(), 100, 100).unwrap();
        let wide = Viewport::new(&camera_at_z5(), 200, 100).unwrap();

        let square_corner = square.ray_for_pixel(0, 50).unwrap();
        let wide_corner = wide.ray_for_pixel(0, 50).unwrap();

        assert!(wide_corner.direction().x().abs() > square_corner.direction().x().abs());
    }
}
