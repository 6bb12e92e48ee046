//! Stratum reconstructs strike lines of geological layers and estimates the orientation of the layers from them.
//!
//! # Quick start
//!
//! ```no_run
//! use stratum::io::read_csv;
//! use stratum::orientation::calculate_orientations_by_formation;
//! use stratum::strike::{create_linestrings, interpolate_strike_lines_by_formation};
//! use stratum::{CsvOptions, InterpolationOptions};
//!
//! # fn main() -> stratum::Result<()> {
//! let points = read_csv("strike_points.csv", &CsvOptions::default())?;
//! let lines = create_linestrings(&points)?;
//! let dense = interpolate_strike_lines_by_formation(&lines, &InterpolationOptions::default())?;
//! let orientations = calculate_orientations_by_formation(&dense)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Main components
//!
//! * [`Feature`] is a row of survey data: a point or a strike line of a formation with its elevation and the id of
//!   the elevation slice it belongs to.
//! * [`strike`] connects points of the same elevation into lines and fills the elevation gaps between strike lines
//!   with interpolated lines.
//! * [`orientation`] fits planes to neighbouring strike lines and converts them into dip and azimuth.
//! * [`model`] collects the results into the input data of a geological model.
//! * [`io`] loads survey points from delimited text.
//!
//! Geometry primitives are defined in the [`stratum_types`] crate, which is re-exported.

pub mod error;
mod feature;
pub mod io;
pub mod model;
mod options;
pub mod orientation;
pub mod strike;

pub use error::{Result, StratumError};
pub use feature::{extract_xy, group_by_formation, Feature, VertexRow};
pub use options::{CsvOptions, InterpolationOptions, DEFAULT_INCREMENT};
pub use orientation::Orientation;
pub use stratum_types;
