use crate::math::{
    color::Color,
    point::Point,
    vector::{GeometryError, Vector},
};

use super::intersection::Intersection;

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    position: Point,
    color: Color,
}

impl PointLight {
    pub fn new(position: Point, color: Color) -> Self {
        Self { position, color }
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the scene toward the light source.
    direction: Vector,
    color: Color,
}

impl DirectionalLight {
    pub fn new(direction: Vector, color: Color) -> Result<Self, GeometryError> {
        Ok(Self {
            direction: direction.normalize()?,
            color,
        })
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    Point(PointLight),
    Directional(DirectionalLight),
}

impl Light {
    pub fn color(&self) -> Color {
        match self {
            Light::Point(light) => light.color,
            Light::Directional(light) => light.color,
        }
    }

    /// Unit vector from the surface point toward the light source.
    pub fn direction_from(&self, point: Point) -> Result<Vector, GeometryError> {
        match self {
            Light::Point(light) => (light.position - point).normalize(),
            Light::Directional(light) => Ok(light.direction),
        }
    }

    /// Lambert + Phong contribution of this light, assuming it is
    /// unoccluded; the occlusion test belongs to the integrator.
    pub fn color_at(
        &self,
        hit: &Intersection,
        eye_dir: Vector,
    ) -> Result<Color, GeometryError> {
        let light_dir = self.direction_from(hit.point())?;
        let diffuse = self.lambert_diffuse(hit, light_dir);
        let specular = self.phong_specular(hit, light_dir, eye_dir)?;
        Ok(diffuse + specular)
    }

    fn lambert_diffuse(&self, hit: &Intersection, light_dir: Vector) -> Color {
        let intensity = hit.normal().dot(light_dir).max(0.);
        self.color() * intensity * hit.object().material().diffuse
    }

    fn phong_specular(
        &self,
        hit: &Intersection,
        light_dir: Vector,
        eye_dir: Vector,
    ) -> Result<Color, GeometryError> {
        let reflect_dir = (light_dir + eye_dir).normalize()?;
        let spec_angle = reflect_dir.dot(hit.normal()).max(0.);
        let coefficient = spec_angle.powi(hit.object().material().shininess as i32);
        Ok(self.color() * coefficient * hit.object().material().specular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        approx_eq::ApproxEq,
        assert_approx_eq,
        math::tuple::Tuple,
        render::{
            material::Material,
            object::Object,
            ray::Ray,
            shape::{Shape, Sphere},
        },
    };

    // Sphere arranged so the ray hits the origin with normal (0, 0, 1).
    fn hit_at_origin(material: Material) -> (Object, Ray) {
        let obj = Object::new(
            Shape::Sphere(Sphere::new(Point::new(0., 0., -1.), 1.)),
            material,
        );
        let ray = Ray::new(Point::new(0., 0., 5.), Vector::new(0., 0., -1.)).unwrap();
        (obj, ray)
    }

    #[test]
    fn point_light_direction_points_toward_source() {
        let light = Light::Point(PointLight::new(Point::new(0., 10., 0.), Color::white()));

        assert_approx_eq!(
            light.direction_from(Point::zero()).unwrap(),
            Vector::new(0., 1., 0.)
        );
    }

    #[test]
    fn directional_light_direction_is_constant() {
        let light = Light::Directional(
            DirectionalLight::new(Vector::new(0., 0., 3.), Color::white()).unwrap(),
        );

        assert_approx_eq!(
            light.direction_from(Point::new(5., -2., 1.)).unwrap(),
            Vector::new(0., 0., 1.)
        );
        assert_approx_eq!(
            light.direction_from(Point::zero()).unwrap(),
            Vector::new(0., 0., 1.)
        );
    }

    #[test]
    fn directional_light_with_zero_direction_is_rejected() {
        assert!(DirectionalLight::new(Vector::zero(), Color::white()).is_err());
    }

    #[test]
    fn head_on_light_gives_full_lambert_term() {
        let (obj, ray) = hit_at_origin(Material::matte(Color::white()));
        let hit = Intersection::new(&ray, 5., &obj);
        let light = Light::Point(PointLight::new(Point::new(0., 0., 10.), Color::white()));

        let color = light.color_at(&hit, Vector::new(0., 0., 1.)).unwrap();
        assert_approx_eq!(color, Color::white());
    }

    #[test]
    fn oblique_light_scales_by_cosine() {
        let (obj, ray) = hit_at_origin(Material::matte(Color::white()));
        let hit = Intersection::new(&ray, 5., &obj);
        // 45 degrees off the normal
        let light = Light::Directional(
            DirectionalLight::new(Vector::new(0., 1., 1.), Color::white()).unwrap(),
        );

        let color = light.color_at(&hit, Vector::new(0., 1., 0.)).unwrap();
        let cos45 = std::f64::consts::FRAC_1_SQRT_2;
        assert_approx_eq!(color, Color::new(cos45, cos45, cos45));
    }

    #[test]
    fn light_behind_surface_contributes_nothing() {
        let (obj, ray) = hit_at_origin(Material::new(Color::white(), Color::white(), 50));
        let hit = Intersection::new(&ray, 5., &obj);
        let light = Light::Directional(
            DirectionalLight::new(Vector::new(0., 0., -1.), Color::white()).unwrap(),
        );

        let color = light.color_at(&hit, Vector::new(0., 1., 0.)).unwrap();
        assert_approx_eq!(color, Color::black());
    }

    #[test]
    fn specular_highlight_in_mirror_position() {
        let (obj, ray) = hit_at_origin(Material::new(Color::black(), Color::white(), 1));
        let hit = Intersection::new(&ray, 5., &obj);
        let light = Light::Point(PointLight::new(Point::new(0., 0., 10.), Color::white()));

        // eye on the reflection axis sees the full highlight
        let color = light.color_at(&hit, Vector::new(0., 0., 1.)).unwrap();
        assert_approx_eq!(color, Color::white());
    }

    #[test]
    fn shininess_narrows_the_highlight() {
        let low = Material::new(Color::black(), Color::white(), 1);
        let high = Material::new(Color::black(), Color::white(), 64);
        let light = Light::Point(PointLight::new(Point::new(0., 10., 10.), Color::white()));

        let (obj_low, ray) = hit_at_origin(low);
        let hit_low = Intersection::new(&ray, 5., &obj_low);
        let (obj_high, ray) = hit_at_origin(high);
        let hit_high = Intersection::new(&ray, 5., &obj_high);

        let eye = Vector::new(0., 0., 1.);
        let wide = light.color_at(&hit_low, eye).unwrap();
        let narrow = light.color_at(&hit_high, eye).unwrap();

        assert!(narrow.r() < wide.r());
    }
}
