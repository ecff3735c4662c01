use std::io::Write;

use crate::point::Point;

/// Knots, polynomial samples and spline samples side by side, aligned by row index.
///
/// The columns usually differ in length, missing cells of the shorter ones are left empty.
/// # Example
/// ```
/// use point_interpolation::{Point, SampleTable};
///
/// let knots = vec![Point::new(0.0, 0.0), Point::new(1.0, 5.0)];
/// let polynomial = vec![Point::new(0.0, 0.0), Point::new(0.5, 2.5), Point::new(1.0, 5.0)];
/// let table = SampleTable::new(knots, polynomial, Vec::new());
///
/// let mut out = Vec::new();
/// table.write_delimited(&mut out, ',').unwrap();
///
/// assert_eq!(
///     "knot_x,knot_y,poly_x,poly_y,spline_x,spline_y\n\
///      0,0,0,0,,\n\
///      1,5,0.5,2.5,,\n\
///      ,,1,5,,\n",
///     String::from_utf8(out).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    knots: Vec<Point>,
    polynomial: Vec<Point>,
    spline: Vec<Point>,
}

impl SampleTable {
    pub const HEADER: [&'static str; 6] = ["knot_x", "knot_y", "poly_x", "poly_y", "spline_x", "spline_y"];

    pub fn new(knots: Vec<Point>, polynomial: Vec<Point>, spline: Vec<Point>) -> Self {
        SampleTable { knots, polynomial, spline }
    }

    pub fn row_count(&self) -> usize {
        self.knots.len().max(self.polynomial.len()).max(self.spline.len())
    }

    pub fn rows(&self) -> impl Iterator<Item = [Option<Point>; 3]> + '_ {
        (0..self.row_count()).map(move |i| {
            [
                self.knots.get(i).copied(),
                self.polynomial.get(i).copied(),
                self.spline.get(i).copied(),
            ]
        })
    }

    pub fn write_delimited<W: Write>(&self, writer: &mut W, delimiter: char) -> std::io::Result<()> {
        let separator = delimiter.to_string();
        writeln!(writer, "{}", Self::HEADER.join(separator.as_str()))?;

        for row in self.rows() {
            let cells: Vec<String> = row
                .iter()
                .flat_map(|cell| match cell {
                    Some(point) => [point.get_x().to_string(), point.get_y().to_string()],
                    None => [String::new(), String::new()],
                })
                .collect();
            writeln!(writer, "{}", cells.join(separator.as_str()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InterpolationEngine;

    #[test]
    fn rows_are_padded() {
        let table = SampleTable::new(
            vec![Point::new(0.0, 0.0)],
            vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0)],
            vec![Point::new(0.0, 3.0), Point::new(0.5, 4.0), Point::new(1.0, 5.0)],
        );

        let rows: Vec<_> = table.rows().collect();

        assert_eq!(3, table.row_count());
        assert_eq!(Some(Point::new(0.0, 0.0)), rows[0][0]);
        assert_eq!(None, rows[1][0]);
        assert_eq!(Some(Point::new(1.0, 2.0)), rows[1][1]);
        assert_eq!(None, rows[2][1]);
        assert_eq!(Some(Point::new(1.0, 5.0)), rows[2][2]);
    }

    #[test]
    fn semicolon_delimiter() {
        let table = SampleTable::new(vec![Point::new(1.5, -2.0)], Vec::new(), Vec::new());
        let mut out = Vec::new();

        table.write_delimited(&mut out, ';').unwrap();

        assert_eq!(
            "knot_x;knot_y;poly_x;poly_y;spline_x;spline_y\n1.5;-2;;;;\n",
            String::from_utf8(out).unwrap()
        );
    }

    #[test]
    fn export_from_engine_without_polynomial() {
        let mut engine = InterpolationEngine::default();
        for (x, y) in [(0.0, 0.0), (1.0, 1.0), (1.0, 2.0)] {
            engine.insert(Point::new(x, y));
        }
        let curves = engine.curves().unwrap();

        let table = SampleTable::new(
            engine.points().points().to_vec(),
            curves.polynomial.unwrap_or_default(),
            curves.spline.unwrap_or_default(),
        );

        assert_eq!(3, table.row_count());
        assert!(table.rows().all(|row| row[1].is_none() && row[2].is_none()));
    }

    #[test]
    fn empty_table_writes_header_only() {
        let mut out = Vec::new();

        SampleTable::default().write_delimited(&mut out, ',').unwrap();

        assert_eq!("knot_x,knot_y,poly_x,poly_y,spline_x,spline_y\n", String::from_utf8(out).unwrap());
    }
}
