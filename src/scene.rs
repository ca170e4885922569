use crate::{
    math::color::Color,
    render::{
        camera::Camera, intersection::Intersection, light::Light, object::Object, ray::Ray,
    },
};

/// The aggregate the parser produces and rendering consumes. Built once,
/// immutable while a render is in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    width: usize,
    height: usize,
    output: String,
    camera: Camera,
    ambient: Color,
    objects: Vec<Object>,
    lights: Vec<Light>,
    max_depth: usize,
}

impl Scene {
    pub const DEFAULT_OUTPUT: &'static str = "output.png";
    /// 1 means local illumination only, no reflection bounces.
    pub const DEFAULT_MAX_DEPTH: usize = 1;

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: usize,
        height: usize,
        output: String,
        camera: Camera,
        ambient: Color,
        objects: Vec<Object>,
        lights: Vec<Light>,
        max_depth: usize,
    ) -> Self {
        Self {
            width,
            height,
            output,
            camera,
            ambient,
            objects,
            lights,
            max_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Globally nearest positive hit across every shape, or `None` when the
    /// ray escapes the scene.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        self.objects
            .iter()
            .filter_map(|obj| obj.shape().intersect(ray).map(|distance| (distance, obj)))
            .min_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap())
            .map(|(distance, obj)| Intersection::new(ray, distance, obj))
    }
}
