/// Half-block line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wire3d_core::{Line, Rgb};

/// Upper half block: the foreground paints the top pixel, the background the bottom one
const HALF_BLOCK: char = '▀';

/// Canvas color behind the wireframe
pub const BACKGROUND: Rgb = Rgb::WHITE;

/// Rasterizes pixel-space lines into terminal cells.
///
/// Each cell holds two pixels stacked vertically, so a `cols` x `rows`
/// terminal is a `cols` x `2 * rows` pixel grid.
pub struct LineRasterizer {
    width: usize,
    height: usize,
    pixels: Vec<Option<Rgb>>,
}

impl LineRasterizer {
    pub fn new(cols: usize, rows: usize) -> Self {
        let (width, height) = (cols, rows * 2);
        Self {
            width,
            height,
            pixels: vec![None; width * height],
        }
    }

    /// Pixel dimensions of the grid
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        *self = Self::new(cols, rows);
    }

    pub fn clear(&mut self) {
        self.pixels.fill(None);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            None
        }
    }

    /// Draw lines in order; later lines cover earlier ones
    pub fn render_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a Line>) {
        for line in lines {
            self.render_line(line);
        }
    }

    fn render_line(&mut self, line: &Line) {
        let bounds = (self.width as f64, self.height as f64);
        let Some((from, to)) = clip_segment(line.from, line.to, bounds) else {
            return;
        };

        let (mut x0, mut y0) = (from[0].floor() as i64, from[1].floor() as i64);
        let (x1, y1) = (to[0].floor() as i64, to[1].floor() as i64);

        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, line.color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = Some(color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height / 2 {
            for x in 0..self.width {
                let top = self.pixel(x, row * 2).unwrap_or(BACKGROUND);
                let bottom = self.pixel(x, row * 2 + 1).unwrap_or(BACKGROUND);
                writer.queue(SetForegroundColor(to_color(top)))?;
                writer.queue(SetBackgroundColor(to_color(bottom)))?;
                writer.queue(Print(HALF_BLOCK))?;
            }
            if row + 1 < self.height / 2 {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Liang-Barsky clip of a segment against `[0, width) x [0, height)`
fn clip_segment(
    from: [f64; 2],
    to: [f64; 2],
    (width, height): (f64, f64),
) -> Option<([f64; 2], [f64; 2])> {
    if !from.iter().chain(&to).all(|v| v.is_finite()) {
        return None;
    }

    // Keep the far edges just inside the last pixel.
    let (max_x, max_y) = (width - 1e-6, height - 1e-6);
    let (dx, dy) = (to[0] - from[0], to[1] - from[1]);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, from[0]),
        (dx, max_x - from[0]),
        (-dy, from[1]),
        (dy, max_y - from[1]),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        [from[0] + t0 * dx, from[1] + t0 * dy],
        [from[0] + t1 * dx, from[1] + t1 * dy],
    ))
}
