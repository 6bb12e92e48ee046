//! Options of the processing operations.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StratumError};

/// Default vertical spacing between strike lines.
pub const DEFAULT_INCREMENT: f64 = 10.0;

/// Options for [`interpolate_strike_lines`](crate::strike::interpolate_strike_lines).
///
/// ```
/// use stratum::InterpolationOptions;
///
/// let options = InterpolationOptions::new(25.0).unwrap();
/// assert_eq!(options.increment(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInterpolationOptions")]
pub struct InterpolationOptions {
    increment: f64,
}

#[derive(Deserialize)]
struct RawInterpolationOptions {
    increment: f64,
}

impl TryFrom<RawInterpolationOptions> for InterpolationOptions {
    type Error = StratumError;

    fn try_from(value: RawInterpolationOptions) -> Result<Self> {
        Self::new(value.increment)
    }
}

impl InterpolationOptions {
    /// Creates options with the given vertical `increment` between strike lines. The increment must be a positive
    /// finite number.
    pub fn new(increment: f64) -> Result<Self> {
        validate_increment(increment)?;
        Ok(Self { increment })
    }

    /// Parses options from a JSON string, e.g. `{"increment": 10.0}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Vertical spacing between strike lines.
    pub fn increment(&self) -> f64 {
        self.increment
    }
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            increment: DEFAULT_INCREMENT,
        }
    }
}

pub(crate) fn validate_increment(increment: f64) -> Result<()> {
    if increment.is_finite() && increment > 0.0 {
        Ok(())
    } else {
        Err(StratumError::invalid_input(format!(
            "increment must be a positive number, got {increment}"
        )))
    }
}

/// Column layout of delimited text files read by [`read_csv`](crate::io::read_csv).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Name of the column with x coordinates.
    pub x_column: String,
    /// Name of the column with y coordinates.
    pub y_column: String,
    /// Name of the column with elevations. If the column is absent, elevation is set to 0.
    pub z_column: String,
    /// Name of the column with formation names.
    pub formation_column: String,
    /// Name of the column with feature ids. If the column is absent or a value is empty, the id is not set.
    pub id_column: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            x_column: "X".into(),
            y_column: "Y".into(),
            z_column: "Z".into(),
            formation_column: "formation".into(),
            id_column: "id".into(),
        }
    }
}

impl CsvOptions {
    /// Sets the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets names of the coordinate columns.
    pub fn with_coordinate_columns(
        mut self,
        x: impl Into<String>,
        y: impl Into<String>,
        z: impl Into<String>,
    ) -> Self {
        self.x_column = x.into();
        self.y_column = y.into();
        self.z_column = z.into();
        self
    }

    /// Sets the name of the formation column.
    pub fn with_formation_column(mut self, column: impl Into<String>) -> Self {
        self.formation_column = column.into();
        self
    }

    /// Sets the name of the id column.
    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = column.into();
        self
    }
}
