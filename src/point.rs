use serde::{Deserialize, Serialize};

/// Point represents a single node the fitted curves must pass through.
/// It is never mutated after creation, edits replace the whole point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn get_x(&self) -> f64 {
        self.x
    }

    pub fn get_y(&self) -> f64 {
        self.y
    }
}

impl From<(f64, f64)> for Point {
    fn from(value: (f64, f64)) -> Self {
        Point::new(value.0, value.1)
    }
}

/// Collection of [Point]s which is always kept sorted by ascending x.
///
/// Points with equal x keep their insertion order. Repeated x values are accepted,
/// both fitters reject them later with a dedicated error.
/// # Example
/// ```
/// use point_interpolation::{Point, PointSet};
///
/// let mut points = PointSet::new();
/// points.insert(Point::new(2.0, 4.0));
/// points.insert(Point::new(0.0, 0.0));
/// points.insert(Point::new(1.0, 1.0));
///
/// assert_eq!(vec![0.0, 1.0, 2.0], points.xs());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        PointSet { points: Vec::new() }
    }

    /// Creates set by inserting every point in iteration order.
    pub fn from_points<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        let mut set = PointSet::new();
        for point in points {
            set.insert(point.into());
        }
        set
    }

    /// Appends `point` and re-sorts the whole collection by x.
    pub fn insert(&mut self, point: Point) {
        self.points.push(point);
        self.sort_points();
    }

    /// Replaces point at `index` with `point`. Returns the replaced point,
    /// or `None` (and leaves the set untouched) when `index` is out of range.
    pub fn replace(&mut self, index: usize, point: Point) -> Option<Point> {
        if index >= self.points.len() {
            return None;
        }
        let old = self.points.remove(index);
        self.insert(point);
        Some(old)
    }

    pub fn remove(&mut self, index: usize) -> Option<Point> {
        if index >= self.points.len() {
            return None;
        }
        Some(self.points.remove(index))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// True when at least two points share the same x coordinate.
    pub fn has_duplicate_x(&self) -> bool {
        self.points.windows(2).any(|w| w[0].x == w[1].x)
    }

    fn sort_points(&mut self) {
        // stable, so equal x keeps insertion order
        self.points.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
}
