//! Uniform cubic B-spline path through a polyline, matching d3's `curveBasis`.

use crate::core::geo::Point;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
}

/// Open basis curve through `points`. Fewer than two points yields nothing.
pub fn curve_basis(points: &[Point]) -> Vec<PathCommand> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(points.len() + 2);
    let bezier = |out: &mut Vec<PathCommand>, p0: Point, p1: Point, p: Point| {
        out.push(PathCommand::CubicTo(
            Point::new((2.0 * p0.x + p1.x) / 3.0, (2.0 * p0.y + p1.y) / 3.0),
            Point::new((p0.x + 2.0 * p1.x) / 3.0, (p0.y + 2.0 * p1.y) / 3.0),
            Point::new((p0.x + 4.0 * p1.x + p.x) / 6.0, (p0.y + 4.0 * p1.y + p.y) / 6.0),
        ));
    };

    out.push(PathCommand::MoveTo(points[0]));
    if points.len() == 2 {
        out.push(PathCommand::LineTo(points[1]));
        return out;
    }

    let (p0, p1) = (points[0], points[1]);
    out.push(PathCommand::LineTo(Point::new(
        (5.0 * p0.x + p1.x) / 6.0,
        (5.0 * p0.y + p1.y) / 6.0,
    )));
    for window in points.windows(3) {
        bezier(&mut out, window[0], window[1], window[2]);
    }

    let n = points.len();
    let (last0, last1) = (points[n - 2], points[n - 1]);
    bezier(&mut out, last0, last1, last1);
    out.push(PathCommand::LineTo(last1));
    out
}

/// SVG path data for a command list
pub fn to_svg_path(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        // writing to a String cannot fail
        let _ = match command {
            PathCommand::MoveTo(p) => write!(d, "M{},{}", p.x, p.y),
            PathCommand::LineTo(p) => write!(d, "L{},{}", p.x, p.y),
            PathCommand::CubicTo(c1, c2, p) => {
                write!(d, "C{},{},{},{},{},{}", c1.x, c1.y, c2.x, c2.y, p.x, p.y)
            }
        };
    }
    d
}

/// Approximates the path with line segments, `steps` per cubic
pub fn flatten(commands: &[PathCommand], steps: usize) -> Vec<Point> {
    let steps = steps.max(1);
    let mut out = Vec::new();
    let mut cursor = Point::default();
    for command in commands {
        match *command {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                out.push(p);
                cursor = p;
            }
            PathCommand::CubicTo(c1, c2, p) => {
                for i in 1..=steps {
                    let t = i as f64 / steps as f64;
                    let u = 1.0 - t;
                    let x = u * u * u * cursor.x + 3.0 * u * u * t * c1.x + 3.0 * u * t * t * c2.x + t * t * t * p.x;
                    let y = u * u * u * cursor.y + 3.0 * u * u * t * c1.y + 3.0 * u * t * t * c2.y + t * t * t * p.y;
                    out.push(Point::new(x, y));
                }
                cursor = p;
            }
        }
    }
    out
}
