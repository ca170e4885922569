use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::{
    math::{
        color::Color,
        point::Point,
        tuple::Tuple,
        vector::{GeometryError, Vector},
    },
    render::{
        camera::Camera,
        light::{DirectionalLight, Light, PointLight},
        material::Material,
        object::Object,
        shape::{Plane, Shape, Sphere, Triangle},
    },
    scene::Scene,
};

#[derive(Debug, Error, PartialEq)]
pub enum SceneParseError {
    #[error("failed to read scene file: {0}")]
    FileRead(String),
    #[error("line {line}: `{keyword}` expects {expected}")]
    WrongParameterCount {
        line: usize,
        keyword: &'static str,
        expected: &'static str,
    },
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: width and height must be positive integers")]
    NonPositiveSize { line: usize },
    #[error("line {line}: sphere radius must be positive")]
    NonPositiveRadius { line: usize },
    #[error("line {line}: maxverts must be at least 1")]
    InvalidMaxVerts { line: usize },
    #[error("line {line}: vertex declared before maxverts")]
    VertexBeforeMaxVerts { line: usize },
    #[error("line {line}: maxdepth must be at least 1")]
    InvalidMaxDepth { line: usize },
    #[error("line {line}: diffuse plus ambient exceeds 1 in some channel")]
    DiffuseAmbientOverflow { line: usize },
    #[error("line {line}: degenerate geometry: {source}")]
    DegenerateGeometry { line: usize, source: GeometryError },
    #[error("combined light intensity exceeds 1 in some channel")]
    LightsTooBright,
    #[error("scene file does not declare a size")]
    MissingSize,
    #[error("scene file does not declare a camera")]
    MissingCamera,
}

/// Everything accumulated while walking the file, including the pending
/// material that applies to shapes declared after it.
#[derive(Debug, Default)]
struct ParserState {
    size: Option<(usize, usize)>,
    output: Option<String>,
    camera: Option<Camera>,
    ambient: Color,
    material: Material,
    max_verts: Option<usize>,
    vertices: Vec<Point>,
    objects: Vec<Object>,
    lights: Vec<Light>,
    max_depth: Option<usize>,
}

pub fn parse_file(path: &Path) -> Result<Scene, SceneParseError> {
    let source =
        std::fs::read_to_string(path).map_err(|e| SceneParseError::FileRead(e.to_string()))?;
    parse_str(&source)
}

pub fn parse_str(source: &str) -> Result<Scene, SceneParseError> {
    let mut state = ParserState::default();

    for (id, raw_line) in source.lines().enumerate() {
        let line = id + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let keyword = tokens[0].to_lowercase();
        let params = &tokens[1..];

        match keyword.as_str() {
            "size" => parse_size(params, line, &mut state)?,
            "output" => parse_output(params, line, &mut state)?,
            "camera" => parse_camera(params, line, &mut state)?,
            "ambient" => state.ambient = parse_color(params, line, "ambient")?,
            "diffuse" => parse_diffuse(params, line, &mut state)?,
            "specular" => state.material.specular = parse_color(params, line, "specular")?,
            "shininess" => parse_shininess(params, line, &mut state)?,
            "sphere" => parse_sphere(params, line, &mut state)?,
            "plane" => parse_plane(params, line, &mut state)?,
            "maxverts" => parse_max_verts(params, line, &mut state)?,
            "vertex" => parse_vertex(params, line, &mut state)?,
            "tri" => parse_tri(params, line, &mut state)?,
            "directional" => parse_directional(params, line, &mut state)?,
            "point" => parse_point_light(params, line, &mut state)?,
            "maxdepth" => parse_max_depth(params, line, &mut state)?,
            _ => warn!("line {line}: unknown keyword `{keyword}`, skipping"),
        }
    }

    finalize(state)
}

fn finalize(state: ParserState) -> Result<Scene, SceneParseError> {
    let (width, height) = state.size.ok_or(SceneParseError::MissingSize)?;
    let camera = state.camera.ok_or(SceneParseError::MissingCamera)?;

    if !lights_within_budget(&state.lights) {
        return Err(SceneParseError::LightsTooBright);
    }
    if state.lights.is_empty() {
        warn!("scene file declares no lights");
    }
    if state.objects.is_empty() {
        warn!("scene file declares no shapes");
    }

    Ok(Scene::new(
        width,
        height,
        state
            .output
            .unwrap_or_else(|| Scene::DEFAULT_OUTPUT.to_string()),
        camera,
        state.ambient,
        state.objects,
        state.lights,
        state.max_depth.unwrap_or(Scene::DEFAULT_MAX_DEPTH),
    ))
}

/// The lights may not add up to more than full intensity in any channel.
fn lights_within_budget(lights: &[Light]) -> bool {
    let (mut r, mut g, mut b) = (0., 0., 0.);
    for light in lights {
        let color = light.color();
        r += color.r();
        g += color.g();
        b += color.b();
    }
    r <= 1. && g <= 1. && b <= 1.
}

fn float_params(
    params: &[&str],
    keyword: &'static str,
    expected: &'static str,
    count: usize,
    line: usize,
) -> Result<Vec<f64>, SceneParseError> {
    if params.len() != count {
        return Err(SceneParseError::WrongParameterCount {
            line,
            keyword,
            expected,
        });
    }
    params
        .iter()
        .map(|token| {
            token.parse::<f64>().map_err(|_| SceneParseError::InvalidNumber {
                line,
                token: token.to_string(),
            })
        })
        .collect()
}

fn int_params(
    params: &[&str],
    keyword: &'static str,
    expected: &'static str,
    count: usize,
    line: usize,
) -> Result<Vec<usize>, SceneParseError> {
    if params.len() != count {
        return Err(SceneParseError::WrongParameterCount {
            line,
            keyword,
            expected,
        });
    }
    params
        .iter()
        .map(|token| {
            token
                .parse::<usize>()
                .map_err(|_| SceneParseError::InvalidNumber {
                    line,
                    token: token.to_string(),
                })
        })
        .collect()
}

fn parse_color(
    params: &[&str],
    line: usize,
    keyword: &'static str,
) -> Result<Color, SceneParseError> {
    let values = float_params(params, keyword, "r g b", 3, line)?;
    Ok(Color::new(values[0], values[1], values[2]))
}

fn parse_size(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let values = int_params(params, "size", "width height", 2, line)?;
    if values[0] == 0 || values[1] == 0 {
        return Err(SceneParseError::NonPositiveSize { line });
    }
    state.size = Some((values[0], values[1]));
    Ok(())
}

fn parse_output(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    if params.len() != 1 {
        return Err(SceneParseError::WrongParameterCount {
            line,
            keyword: "output",
            expected: "a single file name",
        });
    }
    state.output = Some(params[0].to_string());
    Ok(())
}

fn parse_camera(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let v = float_params(
        params,
        "camera",
        "fx fy fz ax ay az ux uy uz fov",
        10,
        line,
    )?;
    let look_from = Point::new(v[0], v[1], v[2]);
    let look_at = Point::new(v[3], v[4], v[5]);
    let up = Vector::new(v[6], v[7], v[8]);
    let camera = Camera::new(look_from, look_at, up, v[9])
        .map_err(|source| SceneParseError::DegenerateGeometry { line, source })?;
    state.camera = Some(camera);
    Ok(())
}

fn parse_diffuse(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let diffuse = parse_color(params, line, "diffuse")?;
    let ambient = state.ambient;
    if diffuse.r() + ambient.r() > 1.
        || diffuse.g() + ambient.g() > 1.
        || diffuse.b() + ambient.b() > 1.
    {
        return Err(SceneParseError::DiffuseAmbientOverflow { line });
    }
    state.material.diffuse = diffuse;
    Ok(())
}

fn parse_shininess(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let values = int_params(params, "shininess", "a non-negative integer", 1, line)?;
    state.material.shininess = values[0] as u32;
    Ok(())
}

fn parse_sphere(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let v = float_params(params, "sphere", "x y z radius", 4, line)?;
    if v[3] <= 0. {
        return Err(SceneParseError::NonPositiveRadius { line });
    }
    let sphere = Sphere::new(Point::new(v[0], v[1], v[2]), v[3]);
    state
        .objects
        .push(Object::new(Shape::Sphere(sphere), state.material));
    Ok(())
}

fn parse_plane(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let v = float_params(params, "plane", "px py pz nx ny nz", 6, line)?;
    let plane = Plane::new(
        Point::new(v[0], v[1], v[2]),
        Vector::new(v[3], v[4], v[5]),
    )
    .map_err(|source| SceneParseError::DegenerateGeometry { line, source })?;
    state
        .objects
        .push(Object::new(Shape::Plane(plane), state.material));
    Ok(())
}

fn parse_max_verts(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let values = int_params(params, "maxverts", "a positive integer", 1, line)?;
    if values[0] == 0 {
        return Err(SceneParseError::InvalidMaxVerts { line });
    }
    state.max_verts = Some(values[0]);
    Ok(())
}

fn parse_vertex(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let max_verts = state
        .max_verts
        .ok_or(SceneParseError::VertexBeforeMaxVerts { line })?;
    let v = float_params(params, "vertex", "x y z", 3, line)?;
    if state.vertices.len() == max_verts {
        warn!("line {line}: vertex list already holds maxverts ({max_verts}) entries, skipping");
        return Ok(());
    }
    state.vertices.push(Point::new(v[0], v[1], v[2]));
    Ok(())
}

fn parse_tri(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let ids = int_params(params, "tri", "three vertex indices", 3, line)?;
    if let Some(&bad) = ids.iter().find(|&&id| id >= state.vertices.len()) {
        warn!("line {line}: vertex index {bad} is out of range, skipping triangle");
        return Ok(());
    }
    let triangle = Triangle::new(
        state.vertices[ids[0]],
        state.vertices[ids[1]],
        state.vertices[ids[2]],
    )
    .map_err(|source| SceneParseError::DegenerateGeometry { line, source })?;
    state
        .objects
        .push(Object::new(Shape::Triangle(triangle), state.material));
    Ok(())
}

fn parse_directional(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let v = float_params(params, "directional", "x y z r g b", 6, line)?;
    let light = DirectionalLight::new(
        Vector::new(v[0], v[1], v[2]),
        Color::new(v[3], v[4], v[5]),
    )
    .map_err(|source| SceneParseError::DegenerateGeometry { line, source })?;
    state.lights.push(Light::Directional(light));
    Ok(())
}

fn parse_point_light(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let v = float_params(params, "point", "x y z r g b", 6, line)?;
    let light = PointLight::new(
        Point::new(v[0], v[1], v[2]),
        Color::new(v[3], v[4], v[5]),
    );
    state.lights.push(Light::Point(light));
    Ok(())
}

fn parse_max_depth(
    params: &[&str],
    line: usize,
    state: &mut ParserState,
) -> Result<(), SceneParseError> {
    let values = int_params(params, "maxdepth", "a positive integer", 1, line)?;
    if values[0] == 0 {
        return Err(SceneParseError::InvalidMaxDepth { line });
    }
    state.max_depth = Some(values[0]);
    Ok(())
}
