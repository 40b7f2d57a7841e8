/// ASCII wireframe rasterizer for terminal rendering
use bucky_core::{Plane, Viewport, Wireframe};
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix3, Point3};
use std::io::Write;

/// Character luminosity ramp for depth shading (farthest to nearest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%'];

/// Marker drawn on top of lines at every vertex
const VERTEX_MARKER: char = '@';

/// ASCII renderer that converts wireframes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f64>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f64::NEG_INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f64::NEG_INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn cell(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    /// Rotate the wireframe by `rotation`, project it onto `plane` and
    /// rasterize edges and vertices.
    pub fn render_wireframe(&mut self, wireframe: &Wireframe, rotation: &Matrix3<f64>, plane: Plane) {
        let rotated: Vec<Point3<f64>> = bucky_core::rotate_points(&wireframe.vertices, rotation);
        let projected = bucky_core::project(&rotated, plane);
        let viewport = Viewport::fit(&projected, self.width, self.height);

        // Depth normalised to [0, 1] so shading does not depend on model size
        let depths: Vec<f64> = rotated.iter().map(|p| plane.depth(p)).collect();
        let near = depths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let far = depths.iter().copied().fold(f64::INFINITY, f64::min);
        let range = (near - far).max(1e-9);
        let shade = |d: f64| (d - far) / range;

        let screen: Vec<(f64, f64)> = projected.iter().map(|p| viewport.to_screen(p)).collect();

        for &(i, j) in &wireframe.edges {
            self.draw_line(screen[i], screen[j], shade(depths[i]), shade(depths[j]));
        }
        for (i, &(x, y)) in screen.iter().enumerate() {
            self.plot(x.floor() as i64, y.floor() as i64, shade(depths[i]) + 1.0, VERTEX_MARKER);
        }
    }

    /// DDA line between two screen points, interpolating depth.
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), depth_from: f64, depth_to: f64) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;

        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let x = from.0 + dx * t;
            let y = from.1 + dy * t;
            let depth = depth_from + (depth_to - depth_from) * t;
            self.plot(x.floor() as i64, y.floor() as i64, depth, shade_char(depth));
        }
    }

    /// Write `character` if the cell is on screen and nothing nearer is there.
    fn plot(&mut self, x: i64, y: i64, depth: f64, character: char) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth > self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
        }
    }

    /// Frame as plain text, one line per row.
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for row in self.char_buffer.chunks(self.width.max(1)) {
            text.extend(row.iter());
            text.push('\n');
        }
        text
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.cell(x, y);

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' => Color::Cyan,
                    VERTEX_MARKER => Color::Red,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            // A newline after the last row would scroll the screen
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a depth in [0, 1] to a ramp character
fn shade_char(depth: f64) -> char {
    let idx = (depth.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f64).round() as usize;
    LUMINOSITY_RAMP[idx.min(LUMINOSITY_RAMP.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_char_bounds() {
        assert_eq!(shade_char(-1.0), '.');
        assert_eq!(shade_char(0.0), '.');
        assert_eq!(shade_char(1.0), '%');
        assert_eq!(shade_char(2.0), '%');
    }

    #[test]
    fn test_render_single_edge() {
        let wireframe = Wireframe::new(
            vec![Point3::new(-1.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![(0, 1)],
        );
        let mut renderer = AsciiRenderer::new(21, 5);
        renderer.render_wireframe(&wireframe, &Matrix3::identity(), Plane::XY);

        let text = renderer.to_text();
        assert_eq!(text.matches(VERTEX_MARKER).count(), 2);
        // The middle row carries the whole line
        let middle: String = text.lines().nth(2).unwrap().to_string();
        assert_eq!(middle.trim().len(), 20);
        assert!(middle.trim().starts_with(VERTEX_MARKER));
        assert!(middle.trim().ends_with(VERTEX_MARKER));
    }

    #[test]
    fn test_render_bucky() {
        let bucky = bucky_core::generate().unwrap();
        let mut renderer = AsciiRenderer::new(80, 40);
        renderer.render_wireframe(&bucky, &bucky_core::rotation(0.3, 0.2, 0.1), Plane::XY);
        let text = renderer.to_text();
        assert!(text.contains(VERTEX_MARKER));
        assert!(text.chars().any(|c| LUMINOSITY_RAMP.contains(&c)));

        renderer.clear();
        assert!(renderer.to_text().chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn test_draw_has_no_trailing_newline() {
        let renderer = AsciiRenderer::new(3, 4);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("\r\n").count(), 3);
    }

    #[test]
    fn test_plot_ignores_off_screen() {
        let mut renderer = AsciiRenderer::new(4, 4);
        renderer.plot(-1, 0, 1.0, '#');
        renderer.plot(0, 4, 1.0, '#');
        assert!(renderer.to_text().chars().all(|c| c == ' ' || c == '\n'));
        renderer.plot(1, 1, 0.2, '.');
        renderer.plot(1, 1, 0.1, '#');
        assert_eq!(renderer.cell(1, 1), '.');
    }
}
