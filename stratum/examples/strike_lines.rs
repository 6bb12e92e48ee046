//! Reads strike points from a csv file, connects them into strike lines, fills the gaps between the lines and prints
//! the estimated orientations.
//!
//! ```shell
//! cargo run --example strike_lines -- [path/to/points.csv] [increment]
//! ```

use anyhow::Context;
use stratum::io::read_csv;
use stratum::model::{Extent, GeoModelData};
use stratum::orientation::calculate_orientations_by_formation;
use stratum::strike::{create_linestrings, interpolate_strike_lines_by_formation};
use stratum::{CsvOptions, InterpolationOptions, DEFAULT_INCREMENT};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| {
        concat!(env!("CARGO_MANIFEST_DIR"), "/examples/data/strike_points.csv").to_string()
    });
    let increment = match args.next() {
        Some(value) => value.parse::<f64>().context("increment must be a number")?,
        None => DEFAULT_INCREMENT,
    };
    let options = InterpolationOptions::new(increment)?;

    let points = read_csv(&path, &CsvOptions::default())
        .with_context(|| format!("failed to load strike points from {path}"))?;
    log::info!("Loaded {} strike points", points.len());

    let lines = create_linestrings(&points)?;
    let dense = interpolate_strike_lines_by_formation(&lines, &options)?;
    log::info!(
        "{} strike lines after interpolation (from {})",
        dense.len(),
        lines.len()
    );

    for line in &dense {
        println!(
            "{:>10} id={:<3} z={:>8.2} vertices={}",
            line.formation,
            line.id.unwrap_or_default(),
            line.z,
            line.vertices().len()
        );
    }

    let orientations = calculate_orientations_by_formation(&dense)?;
    println!();
    for o in &orientations {
        println!(
            "{:>10} ({:.2}, {:.2}, {:.2}) dip={:.2} azimuth={:.2}",
            o.formation, o.x, o.y, o.z, o.dip, o.azimuth
        );
    }

    let mut model = GeoModelData::new("strike_lines", None);
    model.set_extent(Extent::from_features(&points)?);
    model.set_interfaces(&points)?;
    model.set_orientations(orientations)?;
    log::info!(
        "Model '{}': {} interface points, {} orientations",
        model.model_name(),
        model.interfaces().len(),
        model.orientations().len()
    );

    Ok(())
}
