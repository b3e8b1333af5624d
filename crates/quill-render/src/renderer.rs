//! Software renderer for headless output.
//!
//! Executes a `DisplayList` into a tiny-skia pixmap.
//!
//! Arcs become cubic Béziers. A contour whose segments are all inked with
//! one pen is stroked as a single closed path, so its joins match the
//! rectangle fast path exactly; anything else is stroked run by run, each
//! run of consecutive segments sharing a pen being one open path.

use std::path::Path;

use anyhow::{Result, anyhow};
use image::{Rgba, RgbaImage};
use quill_common::warning::warn_once;
use quill_layout::{ClosedPath, ColorValue, DisplayCommand, DisplayList, Edge, PathSegment, Pen, Point};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

/// Control-point distance for a quarter circle drawn as one cubic Bézier.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Software renderer that executes a display list to a pixel buffer.
pub struct Renderer {
    pixmap: Pixmap,
}

impl Renderer {
    /// Create a renderer with a white canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the canvas is too large.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or_else(|| anyhow!("cannot allocate a {width}x{height} canvas"))?;
        pixmap.fill(Color::WHITE);
        Ok(Self { pixmap })
    }

    /// The rendered pixels.
    #[must_use]
    pub const fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Execute a display list, drawing all commands to the pixel buffer.
    ///
    /// Commands are executed in order (back to front), which is the painting
    /// order established by the painter.
    pub fn render(&mut self, display_list: &DisplayList) {
        for command in display_list.commands() {
            self.execute_command(command);
        }
    }

    /// Execute a single display command.
    fn execute_command(&mut self, command: &DisplayCommand) {
        match command {
            DisplayCommand::FillRect { rect, color } => {
                self.fill_path(&ClosedPath::from_rect(*rect), *color);
            }
            DisplayCommand::FillPath { path, color } => self.fill_path(path, *color),
            DisplayCommand::StrokeRect { rect, pen } => {
                self.stroke_contour(&ClosedPath::from_rect(*rect), pen);
            }
            DisplayCommand::StrokePath { path, pens } => self.stroke_path(path, pens),
        }
    }

    fn fill_path(&mut self, path: &ClosedPath, color: ColorValue) {
        let Some(contour) = build_contour(path) else {
            return;
        };
        let paint = paint_for(color);
        self.pixmap
            .fill_path(&contour, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke_path(&mut self, path: &ClosedPath, pens: &[Pen; 4]) {
        let first = &pens[edge_slot(path.segments.first())];
        let uniform = path.is_fully_stroked()
            && path
                .segments
                .iter()
                .all(|segment| &pens[edge_slot(Some(segment))] == first);
        if uniform {
            self.stroke_contour(path, first);
            return;
        }

        // Runs of consecutive inked segments sharing a pen.
        let mut current = path.start;
        let mut run: Option<(PathBuilder, &Pen)> = None;
        for segment in &path.segments {
            let pen = &pens[edge_slot(Some(segment))];
            if !segment.is_stroked() || pen.width <= 0.0 {
                if let Some((builder, pen)) = run.take() {
                    self.finish_run(builder, pen);
                }
                current = segment.end();
                continue;
            }
            let continues = run.as_ref().is_some_and(|(_, run_pen)| *run_pen == pen);
            if !continues {
                if let Some((builder, pen)) = run.take() {
                    self.finish_run(builder, pen);
                }
                let mut builder = PathBuilder::new();
                builder.move_to(to_f32(current.x), to_f32(current.y));
                run = Some((builder, pen));
            }
            if let Some((builder, _)) = run.as_mut() {
                push_segment(builder, current, segment);
            }
            current = segment.end();
        }
        if let Some((builder, pen)) = run {
            self.finish_run(builder, pen);
        }
    }

    fn finish_run(&mut self, builder: PathBuilder, pen: &Pen) {
        if let Some(path) = builder.finish() {
            self.stroke(&path, pen);
        }
    }

    fn stroke_contour(&mut self, path: &ClosedPath, pen: &Pen) {
        if pen.width <= 0.0 {
            return;
        }
        if let Some(contour) = build_contour(path) {
            self.stroke(&contour, pen);
        }
    }

    fn stroke(&mut self, path: &tiny_skia::Path, pen: &Pen) {
        let mut stroke = Stroke {
            width: to_f32(pen.width),
            ..Stroke::default()
        };
        if let Some(dash) = &pen.dash {
            let intervals = dash.iter().map(|length| to_f32(*length)).collect();
            stroke.dash = StrokeDash::new(intervals, 0.0);
            if stroke.dash.is_none() {
                warn_once("Renderer", "invalid dash pattern; drawing a solid line");
            }
        }
        let paint = paint_for(pen.color);
        self.pixmap
            .stroke_path(path, &paint, &stroke, Transform::identity(), None);
    }

    /// Save the rendered image to a file. The format follows the extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved to the given path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut buffer = RgbaImage::new(self.pixmap.width(), self.pixmap.height());
        for (pixel, source) in buffer.pixels_mut().zip(self.pixmap.pixels()) {
            let color = source.demultiply();
            *pixel = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }
        buffer
            .save(path)
            .map_err(|e| anyhow!("failed to save render to '{}': {e}", path.display()))?;
        Ok(())
    }
}

fn paint_for(color: ColorValue) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Slot of a segment's pen in `Edge::ALL` order.
fn edge_slot(segment: Option<&PathSegment>) -> usize {
    match segment.map(PathSegment::edge) {
        Some(Edge::Top) | None => 0,
        Some(Edge::Right) => 1,
        Some(Edge::Bottom) => 2,
        Some(Edge::Left) => 3,
    }
}

/// The whole contour as one closed tiny-skia path.
fn build_contour(path: &ClosedPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    builder.move_to(to_f32(path.start.x), to_f32(path.start.y));
    let mut current = path.start;
    let last = path.segments.len().saturating_sub(1);
    for (position, segment) in path.segments.iter().enumerate() {
        // A final line back to the start is the close itself.
        let closes = position == last && matches!(segment, PathSegment::Line { .. }) && segment.end() == path.start;
        if !closes {
            push_segment(&mut builder, current, segment);
        }
        current = segment.end();
    }
    builder.close();
    builder.finish()
}

fn push_segment(builder: &mut PathBuilder, from: Point, segment: &PathSegment) {
    match *segment {
        PathSegment::Line { to, .. } => builder.line_to(to_f32(to.x), to_f32(to.y)),
        PathSegment::Arc { corner, to, .. } => {
            let c1x = from.x + (corner.x - from.x) * KAPPA;
            let c1y = from.y + (corner.y - from.y) * KAPPA;
            let c2x = to.x + (corner.x - to.x) * KAPPA;
            let c2y = to.y + (corner.y - to.y) * KAPPA;
            builder.cubic_to(
                to_f32(c1x),
                to_f32(c1y),
                to_f32(c2x),
                to_f32(c2y),
                to_f32(to.x),
                to_f32(to.y),
            );
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn to_f32(value: f64) -> f32 {
    value as f32
}
