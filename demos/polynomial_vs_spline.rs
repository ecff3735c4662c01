extern crate point_interpolation;

use point_interpolation::{CurveSampler, NaturalSplineFitter, PointSet, PolynomialFitter};

fn main() {

    let points = PointSet::from_points([
        (0.0, 1.0),
        (1.0, -1.0),
        (2.0, 0.0),
        (4.0, 3.0),
        (5.0, 1.0),
        (6.0, 1.0)
    ]);

    let polynomial = PolynomialFitter::default().fit(&points).unwrap();
    let spline = NaturalSplineFitter::fit(&points).unwrap();
    println!("{}", polynomial);

    let number_of_steps = 60;
    let step = 6.0 / number_of_steps as f64;

    println!("x;polynomial;spline");
    for i in 0..=number_of_steps {
        let x = step * i as f64;
        println!("{:.2};{:.2};{:.2}", x, polynomial.evaluate(x), spline.interpolate(x).unwrap());
    }

    let samples = CurveSampler::default().sample_spline(&spline).unwrap();
    println!("spline polyline has {} vertices", samples.len());
}
