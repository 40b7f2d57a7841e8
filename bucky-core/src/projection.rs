/// Orthographic projection and viewport mapping
use nalgebra::{Point2, Point3};

/// Which pair of coordinates survives an axis-drop projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Plane {
    #[default]
    XY,
    XZ,
    YZ,
}

impl Plane {
    /// Project one point, keeping this plane's two coordinates.
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        match self {
            Plane::XY => Point2::new(point.x, point.y),
            Plane::XZ => Point2::new(point.x, point.z),
            Plane::YZ => Point2::new(point.y, point.z),
        }
    }

    /// The dropped coordinate, used as depth (larger is closer to the viewer).
    pub fn depth(&self, point: &Point3<f64>) -> f64 {
        match self {
            Plane::XY => point.z,
            Plane::XZ => -point.y,
            Plane::YZ => point.x,
        }
    }
}

pub fn project(points: &[Point3<f64>], plane: Plane) -> Vec<Point2<f64>> {
    points.iter().map(|p| plane.project(p)).collect()
}

/// Maps projected coordinates onto a character grid.
///
/// The scale is uniform on both axes, corrected for terminal cells being
/// roughly twice as tall as they are wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    center: Point2<f64>,
    scale: f64,
}

/// Width-to-height ratio of a terminal character cell.
const CELL_ASPECT: f64 = 0.5;

impl Viewport {
    /// Fit all `points` into a `width` x `height` grid with a one cell margin.
    pub fn fit(points: &[Point2<f64>], width: usize, height: usize) -> Self {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        if points.is_empty() {
            min = Point2::origin();
            max = Point2::origin();
        }

        let center = nalgebra::center(&min, &max);
        let span_x = (max.x - min.x).max(1e-9);
        let span_y = (max.y - min.y).max(1e-9) * CELL_ASPECT;
        let usable_x = width.saturating_sub(2).max(1) as f64;
        let usable_y = height.saturating_sub(2).max(1) as f64;
        let scale = (usable_x / span_x).min(usable_y / span_y);

        Self {
            width,
            height,
            center,
            scale,
        }
    }

    /// Screen position (column, row) of a projected point; rows grow downwards.
    pub fn to_screen(&self, point: &Point2<f64>) -> (f64, f64) {
        let col = (point.x - self.center.x) * self.scale + self.width as f64 / 2.0;
        let row =
            (self.center.y - point.y) * self.scale * CELL_ASPECT + self.height as f64 / 2.0;
        (col, row)
    }
}
