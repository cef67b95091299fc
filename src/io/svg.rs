//! SVG preview of page rectangles over the covered features.

use std::{io::Write, path::Path};

use anyhow::{anyhow, Result};
use geo::{BoundingRect, Coord, Geometry, LineString, Polygon, Rect};

use crate::{cover::CoverReport, io::fs::write_atomic};

/// Canvas width in pixels; height follows the data aspect ratio.
const CANVAS_WIDTH: f64 = 1200.0;
const MARGIN: f64 = 16.0;

/// Maps working CRS coordinates onto the canvas, flipping the y axis.
struct Canvas {
    bounds: Rect<f64>,
    scale: f64,
}

impl Canvas {
    fn new(bounds: Rect<f64>) -> Self {
        let extent = bounds.width().max(bounds.height());
        let scale = if extent > 0.0 { (CANVAS_WIDTH - 2.0 * MARGIN) / extent } else { 1.0 };
        Self { bounds, scale }
    }

    #[inline]
    fn project(&self, coord: Coord<f64>) -> (f64, f64) {
        (
            MARGIN + (coord.x - self.bounds.min().x) * self.scale,
            MARGIN + (self.bounds.max().y - coord.y) * self.scale,
        )
    }

    fn width(&self) -> f64 { 2.0 * MARGIN + self.bounds.width() * self.scale }
    fn height(&self) -> f64 { 2.0 * MARGIN + self.bounds.height() * self.scale }
}

fn union(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}

/// Append a ring or line as an SVG subpath: "M x,y L x,y ..."; rings are closed with "Z".
fn push_path(line: &LineString<f64>, canvas: &Canvas, close: bool, out: &mut String) {
    let mut coords = line.coords().map(|coord| canvas.project(*coord));
    let Some((x, y)) = coords.next() else { return };
    out.push_str(&format!(" M{x:.3},{y:.3}"));
    for (x, y) in coords {
        out.push_str(&format!(" L{x:.3},{y:.3}"));
    }
    if close { out.push('Z') }
}

fn push_polygon(polygon: &Polygon<f64>, canvas: &Canvas, out: &mut String) {
    push_path(polygon.exterior(), canvas, true, out);
    for hole in polygon.interiors() { push_path(hole, canvas, true, out) }
}

fn draw_geometry(writer: &mut dyn Write, geometry: &Geometry<f64>, canvas: &Canvas) -> Result<()> {
    let mut path = String::new();
    let class = match geometry {
        Geometry::Point(point) => {
            let (x, y) = canvas.project(point.0);
            writeln!(writer, r#"<circle class="pt" cx="{x:.3}" cy="{y:.3}" r="2.5"/>"#)?;
            return Ok(())
        }
        Geometry::MultiPoint(points) => {
            for point in points { draw_geometry(writer, &Geometry::Point(*point), canvas)? }
            return Ok(())
        }
        Geometry::Line(line) => { push_path(&LineString::from(*line), canvas, false, &mut path); "ln" }
        Geometry::LineString(line) => { push_path(line, canvas, false, &mut path); "ln" }
        Geometry::MultiLineString(lines) => {
            for line in lines { push_path(line, canvas, false, &mut path) }
            "ln"
        }
        Geometry::Polygon(polygon) => { push_polygon(polygon, canvas, &mut path); "area" }
        Geometry::MultiPolygon(polygons) => {
            for polygon in polygons { push_polygon(polygon, canvas, &mut path) }
            "area"
        }
        Geometry::Rect(rect) => { push_polygon(&rect.to_polygon(), canvas, &mut path); "area" }
        Geometry::Triangle(triangle) => { push_polygon(&triangle.to_polygon(), canvas, &mut path); "area" }
        Geometry::GeometryCollection(collection) => {
            for geometry in collection { draw_geometry(writer, geometry, canvas)? }
            return Ok(())
        }
    };
    writeln!(writer, r#"<path class="{class}" d="{}"/>"#, path.trim_start())?;
    Ok(())
}

fn write_svg_styles(writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .page {{ fill: #2563eb; fill-opacity: 0.08; stroke: #2563eb; stroke-width: 1.2; }}
    .label {{ font: 12px sans-serif; fill: #1e3a8a; }}
    .area {{ fill: #e5e7eb; stroke: #111827; stroke-width: 0.6; fill-opacity: 0.85; }}
    .ln {{ fill: none; stroke: #b91c1c; stroke-width: 1.2; }}
    .pt {{ fill: #b91c1c; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Render features and pages as an SVG document.
pub fn render_preview_svg(writer: &mut dyn Write, geometries: &[Geometry<f64>], report: &CoverReport) -> Result<()> {
    let bounds = geometries.iter().filter_map(|geometry| geometry.bounding_rect())
        .chain(report.rectangles.iter().copied())
        .reduce(union)
        .ok_or_else(|| anyhow!("[io::svg] Could not determine bounds; nothing to draw."))?;
    let canvas = Canvas::new(bounds);

    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
    writeln!(writer, r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.3} {h:.3}">"#,
        w = canvas.width(), h = canvas.height())?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    write_svg_styles(writer)?;

    for geometry in geometries { draw_geometry(writer, geometry, &canvas)? }

    for (page, rect) in report.pages() {
        let (x, y) = canvas.project(Coord { x: rect.min().x, y: rect.max().y });
        let (w, h) = (rect.width() * canvas.scale, rect.height() * canvas.scale);
        writeln!(writer, r#"<rect class="page" x="{x:.3}" y="{y:.3}" width="{w:.3}" height="{h:.3}"/>"#)?;
        writeln!(writer, r#"<text class="label" x="{:.3}" y="{:.3}">{page}</text>"#, x + 4.0, y + 14.0)?;
    }

    writeln!(writer, "</svg>")?;
    Ok(())
}

/// Write an SVG preview to `path`.
pub fn write_preview_svg(path: &Path, geometries: &[Geometry<f64>], report: &CoverReport, force: bool) -> Result<()> {
    write_atomic(path, force, |writer| render_preview_svg(writer, geometries, report))
}
