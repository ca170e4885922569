use crate::{
    math::{
        color::Color,
        point::Point,
        vector::{GeometryError, Vector},
    },
    render::{camera::Viewport, intersection::Intersection, light::Light, ray::Ray},
    scene::Scene,
};

/// Turns a resolved hit into a final color: ambient plus per-light
/// Lambert/Phong, with hard shadows and bounded mirror recursion.
#[derive(Clone, Debug, PartialEq)]
pub struct Integrator {
    scene: Scene,
}

impl Integrator {
    pub fn new(scene: Scene) -> Self {
        Self { scene }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Color for pixel (x, y), or the background when the primary ray
    /// escapes the scene.
    pub fn color_at_pixel(
        &self,
        viewport: &Viewport,
        x: usize,
        y: usize,
    ) -> Result<Color, GeometryError> {
        let ray = viewport.ray_for_pixel(x, y)?;
        match self.scene.intersect(&ray) {
            None => Ok(Color::black()),
            Some(hit) => self.color_at(&hit, -*ray.direction(), self.scene.max_depth()),
        }
    }

    /// Direct illumination plus the mirror bounce, recursing while `depth`
    /// allows and the surface can reflect. `depth` strictly decreases, so
    /// the recursion is bounded by the scene's configured maximum.
    pub fn color_at(
        &self,
        hit: &Intersection,
        eye_dir: Vector,
        depth: usize,
    ) -> Result<Color, GeometryError> {
        let direct = self.local_illumination(hit, eye_dir)?;

        let specular = hit.object().material().specular;
        if depth <= 1 || specular.is_black() {
            return Ok(direct);
        }

        let reflect_dir = eye_dir.reflect(hit.normal());
        let reflected_ray = Ray::new(hit.point(), -reflect_dir)?;
        match self.scene.intersect(&reflected_ray) {
            None => Ok(direct),
            Some(bounce_hit) => {
                let reflected = self.color_at(&bounce_hit, reflect_dir, depth - 1)?;
                Ok(direct + reflected * specular)
            }
        }
    }

    /// Ambient plus the contribution of every unoccluded light.
    fn local_illumination(
        &self,
        hit: &Intersection,
        eye_dir: Vector,
    ) -> Result<Color, GeometryError> {
        let mut color = self.scene.ambient();
        for light in self.scene.lights() {
            if self.is_shadowed(hit.point(), light)? {
                continue;
            }
            color = color + light.color_at(hit, eye_dir)?;
        }
        Ok(color)
    }

    /// Occlusion is binary: any shape on the shadow ray blocks the light
    /// completely.
    fn is_shadowed(&self, point: Point, light: &Light) -> Result<bool, GeometryError> {
        let shadow_ray = Ray::new(point, light.direction_from(point)?)?;
        Ok(self.scene.intersect(&shadow_ray).is_some())
    }
}
