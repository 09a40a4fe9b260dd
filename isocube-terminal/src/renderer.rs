/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use isocube_core::scene::{EdgeFrame, EdgeStyle, Frame};
use isocube_core::{Palette, Point2D, Rgb};
use std::io::Write;

/// Elements fainter than this are not drawn at all
const MIN_VISIBLE_OPACITY: f64 = 0.05;
/// Faces are translucent in the illustration; keep them dim behind the strokes
const FACE_DIM: f64 = 0.45;
const FACE_GLYPH: char = '.';
const INNER_EDGE_GLYPH: char = ':';
const DOT_GLYPH: char = 'o';
const VERTEX_GLYPH: char = '@';
const VERTEX_SEED_GLYPH: char = '+';
const BRACKET_CORNER_GLYPH: char = '+';
/// Brackets are drawn at 60% strength in the illustration
const BRACKET_OPACITY: f64 = 0.6;

/// Maps scene coordinates onto terminal cells, centered, preserving aspect.
/// Cells are assumed to be twice as tall as they are wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Viewport {
    pub fn fit(canvas_width: f64, canvas_height: f64, columns: usize, rows: usize) -> Self {
        let columns = columns as f64;
        let rows = rows as f64;
        let scale = (columns / canvas_width).min(2.0 * rows / canvas_height);
        Self {
            scale,
            offset_x: (columns - canvas_width * scale) / 2.0,
            offset_y: (rows - canvas_height * scale / 2.0) / 2.0,
        }
    }

    /// Fractional cell coordinates of a scene point
    pub fn to_cell(&self, p: &Point2D) -> (f64, f64) {
        (p.x * self.scale + self.offset_x, p.y * self.scale / 2.0 + self.offset_y)
    }
}

/// Pick a stroke character from the on-screen direction of a segment
fn glyph_for_slope(dx: f64, dy: f64) -> char {
    if dx.abs() < 1e-9 && dy.abs() < 1e-9 {
        return '.';
    }
    let angle = dy.atan2(dx).to_degrees().rem_euclid(180.0);
    match angle {
        a if !(22.5..157.5).contains(&a) => '-',
        a if a < 67.5 => '\\',
        a if a < 112.5 => '|',
        _ => '/',
    }
}

/// ASCII renderer that converts hero cube frames to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    viewport: Viewport,
    char_buffer: Vec<char>,
    color_buffer: Vec<Option<Rgb>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, canvas_width: f64, canvas_height: f64) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            viewport: Viewport::fit(canvas_width, canvas_height, width, height),
            char_buffer: vec![' '; size],
            color_buffer: vec![None; size],
        }
    }

    pub fn clear(&mut self) {
        for i in 0..self.char_buffer.len() {
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = None;
        }
    }

    fn plot(&mut self, x: i32, y: i32, character: char, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.char_buffer[idx] = character;
        self.color_buffer[idx] = Some(color);
    }

    fn plot_point(&mut self, p: &Point2D, character: char, color: Rgb) {
        let (x, y) = self.viewport.to_cell(p);
        self.plot(x.floor() as i32, y.floor() as i32, character, color);
    }

    /// Paint a frame back to front: faces, edges, inner edges, dots, vertices, brackets
    pub fn render_frame(&mut self, frame: &Frame, palette: &Palette) {
        for face in &frame.faces {
            if face.opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let color = palette.face_gradient(face.key).primary().dimmed(face.opacity * FACE_DIM);
            let cells = face.corners.map(|c| self.viewport.to_cell(&c));
            self.rasterize_triangle(&[cells[0], cells[1], cells[2]], FACE_GLYPH, color);
            self.rasterize_triangle(&[cells[0], cells[2], cells[3]], FACE_GLYPH, color);
        }

        for edge in frame.edges.iter().chain(frame.inner_edges.iter()) {
            self.render_edge(edge, palette);
        }

        for dot in &frame.dots {
            if dot.opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let color = palette.accent(dot.accent).dimmed(dot.opacity);
            self.plot_point(&dot.position, DOT_GLYPH, color);
        }

        for vertex in &frame.vertices {
            if vertex.core_opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let glyph = if vertex.core_scale >= 0.5 {
                VERTEX_GLYPH
            } else {
                VERTEX_SEED_GLYPH
            };
            let color = palette.accent(vertex.accent).dimmed(vertex.core_opacity.min(1.0));
            self.plot_point(&vertex.position, glyph, color);
        }

        for bracket in &frame.brackets {
            if bracket.opacity < MIN_VISIBLE_OPACITY {
                continue;
            }
            let color = palette.bracket.dimmed(bracket.opacity * BRACKET_OPACITY);
            let [vertical, corner, horizontal] = bracket.outline.map(|p| self.viewport.to_cell(&p));
            self.draw_line(vertical, corner, '|', color);
            self.draw_line(corner, horizontal, '-', color);
            self.plot(corner.0.floor() as i32, corner.1.floor() as i32, BRACKET_CORNER_GLYPH, color);
        }
    }

    fn render_edge(&mut self, edge: &EdgeFrame, palette: &Palette) {
        if edge.opacity < MIN_VISIBLE_OPACITY || edge.drawn <= 0.0 {
            return;
        }
        let (gradient, glyph) = match edge.style {
            EdgeStyle::Outer(band) => (palette.edge_gradient(band), None),
            EdgeStyle::Inner => (palette.inner_gradient(), Some(INNER_EDGE_GLYPH)),
        };
        let color = gradient.primary().dimmed(edge.opacity);
        let (x0, y0) = self.viewport.to_cell(&edge.from);
        let (x1, y1) = self.viewport.to_cell(&edge.drawn_to());
        let glyph = glyph.unwrap_or_else(|| {
            // slope in square units; cells are twice as tall as wide
            glyph_for_slope(x1 - x0, (y1 - y0) * 2.0)
        });
        self.draw_line((x0, y0), (x1, y1), glyph, color);
    }

    /// Walk a segment cell by cell (DDA), clipped to the buffer first
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), character: char, color: Rgb) {
        let bounds = (self.width as f64, self.height as f64);
        let Some((from, to)) = clip_segment(from, to, bounds) else {
            return;
        };
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = from.0 + dx * t;
            let y = from.1 + dy * t;
            self.plot(x.floor() as i32, y.floor() as i32, character, color);
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f64, f64); 3], character: char, color: Rgb) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f64 + 0.5;
                let py = y as f64 + 0.5;

                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, (px, py)) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, character, color);
                    }
                }
            }
        }
    }

    /// Buffer contents without color, one line per row
    pub fn to_plain_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.char_buffer.chunks(self.width.max(1)) {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Rgb> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                if let Some(rgb) = self.color_buffer[idx] {
                    if current != Some(rgb) {
                        writer.queue(SetForegroundColor(Color::Rgb {
                            r: rgb.r,
                            g: rgb.g,
                            b: rgb.b,
                        }))?;
                        current = Some(rgb);
                    }
                }
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Clip a segment to `[0, width] x [0, height]` (Liang-Barsky).
/// Returns `None` when no part of it lies inside.
fn clip_segment(from: (f64, f64), to: (f64, f64), bounds: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    let checks = [
        (-dx, from.0),
        (dx, bounds.0 - from.0),
        (-dy, from.1),
        (dy, bounds.1 - from.1),
    ];
    for (p, q) in checks {
        if !q.is_finite() || !p.is_finite() {
            return None;
        }
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }
    Some((
        (from.0 + dx * t0, from.1 + dy * t0),
        (from.0 + dx * t1, from.1 + dy * t1),
    ))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
