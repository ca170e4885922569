use std::{fmt::Display, fs::File, io::Write, path::Path};

use clap::ValueEnum;
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;

use crate::math::color::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Ppm,
    Png,
}

impl Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Ppm => write!(f, "ppm"),
            ImageFormat::Png => write!(f, "png"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn with_color(width: usize, height: usize, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; height * width],
        }
    }

    /// Black is the background; pixels whose ray misses everything keep it.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_color(width, height, Color::black())
    }

    fn index(&self, x: usize, y: usize) -> usize {
        self.width * y + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_at(&self, x: usize, y: usize) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn write_pixel(&mut self, x: usize, y: usize, new_color: Color) {
        let id = self.index(x, y);
        self.pixels[id] = new_color;
    }

    /// Fills every pixel in parallel. Pixels are independent, so the only
    /// coordination needed is the early exit when `fun` fails.
    pub fn try_set_each_pixel<F, E>(
        &mut self,
        fun: F,
        progressbar: Option<ProgressBar>,
    ) -> Result<(), E>
    where
        F: Fn(usize, usize) -> Result<Color, E> + Sync,
        E: Send,
    {
        let width = self.width;
        let fill = |(id, pixel_color): (usize, &mut Color)| -> Result<(), E> {
            *pixel_color = fun(id % width, id / width)?;
            Ok(())
        };

        let pixels = self.pixels.par_iter_mut().enumerate();
        match progressbar {
            Some(pb) => pixels.progress_with(pb).try_for_each(fill),
            None => pixels.try_for_each(fill),
        }
    }

    fn as_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|color| color.to_rgb()).collect()
    }

    pub fn save_to_file(&self, path: &Path, format: ImageFormat) -> std::io::Result<()> {
        let file = File::create(path)?;
        match format {
            ImageFormat::Ppm => self.save_to_ppm(file),
            ImageFormat::Png => self.save_to_png(file),
        }
    }
}

/// saving image in ppm format
impl Canvas {
    const MAX_LINE_LEN: usize = 70;

    fn ppm_header(&self) -> String {
        format!("P3\n{} {}\n255\n", self.width, self.height)
    }

    fn ppm_data(&self) -> String {
        let mut data = String::new();
        let mut line_len = 0;

        for (id, color) in self.pixels.iter().enumerate() {
            for (channel, val) in color.to_rgb().into_iter().enumerate() {
                let val_str = val.to_string();
                let first = id == 0 && channel == 0;
                let row_start = id % self.width == 0 && channel == 0;

                if first {
                    line_len = 0;
                } else if row_start || line_len + 1 + val_str.len() > Self::MAX_LINE_LEN {
                    data.push('\n');
                    line_len = 0;
                } else {
                    data.push(' ');
                    line_len += 1;
                }

                line_len += val_str.len();
                data.push_str(&val_str);
            }
        }
        data.push('\n');
        data
    }

    pub fn save_to_ppm(&self, mut file: File) -> std::io::Result<()> {
        file.write_all(self.ppm_header().as_bytes())?;
        file.write_all(self.ppm_data().as_bytes())?;
        Ok(())
    }
}

/// saving image in png format
impl Canvas {
    pub fn save_to_png(&self, file: File) -> std::io::Result<()> {
        let mut encoder = png::Encoder::new(file, self.width as u32, self.height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;

        writer
            .write_image_data(&self.as_rgb_bytes())
            .map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{approx_eq::ApproxEq, assert_approx_eq};

    #[test]
    fn index() {
        let width = 5;
        let height = 3;
        let canvas = Canvas::new(width, height);
        assert_eq!(canvas.index(0, 1), width);
        assert_eq!(canvas.index(1, 0), 1);
        assert_eq!(canvas.index(width - 1, height - 1), width * height - 1);
        assert_eq!(canvas.index(1, 2), width * 2 + 1);
    }

    #[test]
    fn new_canvas_is_black() {
        let canvas = Canvas::new(10, 20);
        canvas
            .pixels
            .iter()
            .for_each(|pixel| assert_approx_eq!(*pixel, Color::black()))
    }

    #[test]
    fn write_pixel() {
        let mut canvas = Canvas::new(10, 10);
        let red = Color::new(1., 0., 0.);

        canvas.write_pixel(2, 3, red);
        assert_approx_eq!(canvas.pixel_at(2, 3), red);
    }

    #[test]
    fn try_set_each_pixel_fills_from_coordinates() {
        let mut canvas = Canvas::new(4, 2);
        canvas
            .try_set_each_pixel::<_, ()>(
                |x, y| Ok(Color::new(x as f64 / 4., y as f64 / 2., 0.)),
                None,
            )
            .unwrap();

        assert_approx_eq!(canvas.pixel_at(2, 1), Color::new(0.5, 0.5, 0.));
        assert_approx_eq!(canvas.pixel_at(0, 0), Color::black());
    }

    #[test]
    fn try_set_each_pixel_propagates_failure() {
        let mut canvas = Canvas::new(4, 4);
        let result = canvas.try_set_each_pixel(
            |x, _| if x == 3 { Err("boom") } else { Ok(Color::black()) },
            None,
        );

        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn ppm_header() {
        let canvas = Canvas::new(5, 3);

        assert_eq!(canvas.ppm_header(), "P3\n5 3\n255\n");
    }

    #[test]
    fn ppm_pixel_data() {
        let mut canvas = Canvas::new(5, 3);

        canvas.write_pixel(0, 0, Color::new(1.5, 0., 0.));
        canvas.write_pixel(2, 1, Color::new(0., 0.5, 0.));
        canvas.write_pixel(4, 2, Color::new(-1.5, 0., 1.));

        assert_eq!(
            canvas.ppm_data(),
            r#"255 0 0 0 0 0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 128 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0 0 0 0 0 255
"#
        )
    }

    #[test]
    fn split_long_lines_ppm_data() {
        let canvas = Canvas::with_color(10, 2, Color::new(1., 0.8, 0.6));

        assert_eq!(
            canvas.ppm_data(),
            r#"255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204
153 255 204 153 255 204 153 255 204 153 255 204 153
255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204
153 255 204 153 255 204 153 255 204 153 255 204 153
"#
        )
    }

    #[test]
    fn ppm_data_ends_with_newline() {
        assert!(Canvas::new(5, 3).ppm_data().ends_with('\n'))
    }
}
