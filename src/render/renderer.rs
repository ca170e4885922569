use derive_builder::Builder;
use thiserror::Error;

use crate::{math::vector::GeometryError, shading::integrator::Integrator};

use super::{camera::Viewport, canvas::Canvas};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Degenerate scene geometry surfaced mid-render (zero-length light
    /// direction, up parallel to the view direction, ...).
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Drives the per-pixel loop: one primary ray per pixel, shaded by the
/// integrator, written into a canvas.
#[derive(Debug, Clone, Builder)]
pub struct Renderer {
    integrator: Integrator,
    #[builder(default = "false")]
    use_progress_bar: bool,
}

impl Renderer {
    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    fn progress_bar(&self, pixel_count: u64) -> Option<indicatif::ProgressBar> {
        if !self.use_progress_bar {
            return None;
        }
        let style = indicatif::ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {wide_bar:.cyan/blue} pixels shaded: {human_pos}/{human_len} {percent}% ({eta})",
        )
        .expect("progress bar template is valid");
        Some(indicatif::ProgressBar::new(pixel_count).with_style(style))
    }

    pub fn render(&self) -> Result<Canvas, RenderError> {
        let scene = self.integrator.scene();
        let viewport = Viewport::new(scene.camera(), scene.width(), scene.height())?;

        let mut canvas = Canvas::new(scene.width(), scene.height());
        let pb = self.progress_bar(canvas.width() as u64 * canvas.height() as u64);

        canvas.try_set_each_pixel(
            |x, y| {
                self.integrator
                    .color_at_pixel(&viewport, x, y)
                    .map_err(RenderError::from)
            },
            pb,
        )?;
        Ok(canvas)
    }
}
