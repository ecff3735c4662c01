extern crate point_interpolation;

use point_interpolation::{InterpolationEngine, EngineConfig, Point, Resolution, SampleTable, SamplingConfig};

fn main() {

    // pixel coordinates of canvas clicks, one sample per pixel like a drawn polyline
    let config = EngineConfig {
        sampling: SamplingConfig {
            polynomial: Resolution::Step(1.0),
            spline_segment: Resolution::Step(1.0),
        },
        ..EngineConfig::default()
    };
    let mut engine = InterpolationEngine::new(config);

    for (x, y) in [(40.0, 120.0), (12.0, 80.0), (25.0, 60.0), (55.0, 95.0)] {
        engine.insert(Point::new(x, y));
    }

    let curves = engine.curves().unwrap();
    let table = SampleTable::new(
        engine.points().points().to_vec(),
        curves.polynomial.unwrap_or_default(),
        curves.spline.unwrap_or_default(),
    );

    table.write_delimited(&mut std::io::stdout(), ';').unwrap();
}
