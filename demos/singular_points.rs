extern crate point_interpolation;

use point_interpolation::{InterpolationEngine, Point};

fn main() {

    let mut engine = InterpolationEngine::default();
    engine.insert(Point::new(0.0, 0.0));
    engine.insert(Point::new(1.0, 1.0));
    engine.insert(Point::new(1.0, 3.0));
    engine.insert(Point::new(2.0, 4.0));

    let curves = engine.curves().unwrap();

    match curves.polynomial {
        Ok(samples) => println!("polynomial: {} samples", samples.len()),
        Err(error) => println!("polynomial skipped: {}", error),
    }
    match curves.spline {
        Ok(samples) => println!("spline: {} samples", samples.len()),
        Err(error) => println!("spline skipped: {}", error),
    }

    // moving the duplicated point makes both curves available again
    engine.replace(2, Point::new(1.5, 3.0));
    let curves = engine.curves().unwrap();
    println!("polynomial ok: {}, spline ok: {}", curves.polynomial.is_ok(), curves.spline.is_ok());
}
