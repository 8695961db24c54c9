//! Renders visibility polygons to an SVG file.
//!
//! Run with: cargo run --example visibility_svg
//!
//! Set `RUST_LOG=sightline=debug` to see scene preparation and sweep logs.

use sightline::visibility::{Scene, VisibilityOptions};
use sightline::{Point2, Polygon, Segment2};

use std::error::Error;
use std::fs::{self, File};
use std::io::Write;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;

/// SVG helper to create an SVG document
struct Svg {
    content: String,
    width: f64,
    height: f64,
}

impl Svg {
    fn new(width: f64, height: f64) -> Self {
        Self {
            content: String::new(),
            width,
            height,
        }
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.content.push_str(&format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
        self.content.push('\n');
    }

    fn line(&mut self, a: Point2<f64>, b: Point2<f64>, stroke: &str, stroke_width: f64) {
        self.content.push_str(&format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{}" stroke-linecap="round"/>"#,
            a.x, a.y, b.x, b.y, stroke, stroke_width
        ));
        self.content.push('\n');
    }

    fn polygon(&mut self, points: &[Point2<f64>], fill: &str, stroke: &str) {
        let pts: String = points
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.content.push_str(&format!(
            r#"<polygon points="{}" fill="{}" fill-opacity="0.35" stroke="{}" stroke-width="1"/>"#,
            pts, fill, stroke
        ));
        self.content.push('\n');
    }

    fn text(&mut self, x: f64, y: f64, text: &str, font_size: f64, fill: &str) {
        self.content.push_str(&format!(
            r#"<text x="{}" y="{}" font-family="system-ui, sans-serif" font-size="{}" fill="{}">{}</text>"#,
            x, y, font_size, fill, text
        ));
        self.content.push('\n');
    }

    fn save(&self, path: &str) -> std::io::Result<()> {
        let svg = format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">
<rect width="100%" height="100%" fill="#1a1a2e"/>
{}
</svg>"##,
            self.width, self.height, self.width, self.height, self.content
        );
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())
    }
}

/// Maps scene coordinates (y up) into one panel of the image (y down).
struct Panel {
    left: f64,
    scale: f64,
}

impl Panel {
    fn map(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(self.left + 200.0 + p.x * self.scale, HEIGHT / 2.0 - p.y * self.scale)
    }
}

fn draw(svg: &mut Svg, panel: &Panel, scene: &Scene<f64>, viewpoint: Point2<f64>, color: &str) -> Result<usize, Box<dyn Error>> {
    let region = scene.polygon_from(viewpoint)?;
    let mapped: Vec<_> = region.vertices.iter().map(|&p| panel.map(p)).collect();
    svg.polygon(&mapped, color, color);

    for wall in scene.segments() {
        svg.line(panel.map(wall.start), panel.map(wall.end), "#e0e0e0", 2.0);
    }
    let eye = panel.map(viewpoint);
    svg.circle(eye.x, eye.y, 4.0, "#ffd166");

    Ok(region.len())
}

/// A walled room with a few square pillars.
fn pillared_room() -> Result<Scene<f64>, Box<dyn Error>> {
    let boundary = Polygon::new(vec![
        Point2::new(-9.0, -9.0),
        Point2::new(9.0, -9.0),
        Point2::new(9.0, 9.0),
        Point2::new(-9.0, 9.0),
    ]);
    let mut scene = Scene::from_polygons(&[boundary], VisibilityOptions::default())?;

    for &(x, y) in &[(-5.0, 3.0), (2.0, 5.0), (4.0, -4.0), (-3.0, -5.0), (6.0, 1.0)] {
        let pillar = Polygon::new(vec![
            Point2::new(x, y),
            Point2::new(x + 1.5, y),
            Point2::new(x + 1.5, y + 1.5),
            Point2::new(x, y + 1.5),
        ]);
        scene.add_polygon(&pillar)?;
    }

    Ok(scene)
}

/// Loose walls in the open, some of them crossing.
fn open_field() -> Result<Scene<f64>, Box<dyn Error>> {
    let walls = [
        Segment2::from_coords(2.0, -3.0, 3.0, 3.0),
        Segment2::from_coords(1.5, 2.0, 5.0, 1.0),
        Segment2::from_coords(-4.0, 2.0, -1.0, 4.0),
        Segment2::from_coords(-5.0, -1.0, -3.0, -4.0),
        Segment2::from_coords(0.0, -6.0, 4.0, -6.5),
    ];
    Ok(Scene::new(&walls, VisibilityOptions::with_bounding_radius(9.0))?)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let mut svg = Svg::new(WIDTH, HEIGHT);

    let left = Panel { left: 0.0, scale: 19.0 };
    let room = pillared_room()?;
    let n = draw(&mut svg, &left, &room, Point2::new(0.5, 0.5), "#00d4ff")?;
    svg.text(130.0, 30.0, "Room with pillars", 16.0, "#e0e0e0");
    svg.text(150.0, 390.0, &format!("{} vertices", n), 12.0, "#808080");

    let right = Panel { left: 400.0, scale: 19.0 };
    let field = open_field()?;
    let n = draw(&mut svg, &right, &field, Point2::new(0.0, 0.0), "#ff6b6b")?;
    svg.text(550.0, 30.0, "Open field", 16.0, "#e0e0e0");
    svg.text(550.0, 390.0, &format!("{} vertices", n), 12.0, "#808080");

    fs::create_dir_all("screenshots")?;
    svg.save("screenshots/visibility.svg")?;
    println!("Generated screenshots/visibility.svg");
    Ok(())
}
