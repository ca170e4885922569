use std::path::PathBuf;

use clap::Parser;
use lumen::{
    render::{canvas::ImageFormat, renderer::RendererBuilder},
    scenefile,
    shading::integrator::Integrator,
};

/// Renders still images from textual scene description files.
/// Supports spheres, planes and triangles lit by point and directional
/// lights, with hard shadows and mirror reflections.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Args {
    /// The scene file to render
    scene_file: PathBuf,

    /// The format of the output image
    #[clap(short = 'f', long, default_value = "png")]
    image_format: ImageFormat,

    /// The output path of the rendered image.
    /// By default the scene file's `output` entry is used
    #[clap(short, long)]
    output_path: Option<PathBuf>,

    /// Width (in pixels) of the output image.
    /// Overrides the one in the scene file
    #[clap(long)]
    width: Option<usize>,

    /// Height (in pixels) of the output image.
    /// Overrides the one in the scene file
    #[clap(long)]
    height: Option<usize>,

    /// Maximum number of times a ray can bounce off a reflective surface.
    /// Overrides the one in the scene file
    #[clap(short, long)]
    max_depth: Option<usize>,

    /// Hide the progress bar
    #[clap(long)]
    quiet: bool,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let mut scene = scenefile::parse_file(&args.scene_file)
        .map_err(|e| format!("Failed to parse scene: {}", e))?;

    let width = args.width.unwrap_or(scene.width());
    let height = args.height.unwrap_or(scene.height());
    scene.set_size(width, height);
    if let Some(max_depth) = args.max_depth {
        scene.set_max_depth(max_depth);
    }

    let output_path = args
        .output_path
        .unwrap_or_else(|| PathBuf::from(scene.output()));

    let renderer = RendererBuilder::default()
        .integrator(Integrator::new(scene))
        .use_progress_bar(!args.quiet)
        .build()
        .map_err(|e| format!("Failed to configure renderer: {}", e))?;

    let canvas = renderer
        .render()
        .map_err(|e| format!("Failed to render scene: {}", e))?;

    canvas
        .save_to_file(&output_path, args.image_format)
        .map_err(|e| format!("Failed to save image: {}", e))?;
    println!("Image saved to {:?}", output_path);
    Ok(())
}
