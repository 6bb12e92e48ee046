use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StratumError};
use crate::feature::Feature;
use crate::model::extent::{Extent, Resolution};
use crate::model::section::{to_section_dict, SectionDict, SectionTrace};
use crate::model::tables::{to_interfaces, validate_orientations, InterfaceRow};
use crate::orientation::Orientation;

/// Name the lowest surface of a model gets in the surface color map.
pub const BASEMENT: &str = "basement";

/// Input data of a geological model.
///
/// The container only stores validated data. The coordinate reference system is carried as given and is never
/// interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoModelData {
    model_name: String,
    crs: Option<String>,
    extent: Option<Extent>,
    resolution: Option<Resolution>,
    interfaces: Vec<InterfaceRow>,
    orientations: Vec<Orientation>,
    section_dict: SectionDict,
    surface_colors: BTreeMap<String, String>,
    stack: BTreeMap<String, Vec<String>>,
    is_fault: Vec<String>,
}

impl GeoModelData {
    /// Creates an empty model.
    pub fn new(model_name: impl Into<String>, crs: Option<String>) -> Self {
        Self {
            model_name: model_name.into(),
            crs,
            ..Default::default()
        }
    }

    /// Name of the model.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Coordinate reference system of the model data.
    pub fn crs(&self) -> Option<&str> {
        self.crs.as_deref()
    }

    /// Model extent.
    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    /// Model resolution.
    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Interface points.
    pub fn interfaces(&self) -> &[InterfaceRow] {
        &self.interfaces
    }

    /// Orientations.
    pub fn orientations(&self) -> &[Orientation] {
        &self.orientations
    }

    /// Custom sections.
    pub fn section_dict(&self) -> &SectionDict {
        &self.section_dict
    }

    /// Surface colors by surface name.
    pub fn surface_colors(&self) -> &BTreeMap<String, String> {
        &self.surface_colors
    }

    /// Layer stack: surface names by series.
    pub fn stack(&self) -> &BTreeMap<String, Vec<String>> {
        &self.stack
    }

    /// Names of the surfaces that are faults.
    pub fn is_fault(&self) -> &[String] {
        &self.is_fault
    }

    /// Sets the model extent.
    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = Some(extent);
    }

    /// Sets the model resolution.
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = Some(resolution);
    }

    /// Sets interface points from point or line features.
    pub fn set_interfaces(&mut self, features: &[Feature]) -> Result<()> {
        self.interfaces = to_interfaces(features)?;
        debug!("Model '{}': {} interface points", self.model_name, self.interfaces.len());
        Ok(())
    }

    /// Sets orientations. Fails without changing the model if any of them is out of range.
    pub fn set_orientations(&mut self, orientations: Vec<Orientation>) -> Result<()> {
        validate_orientations(&orientations)?;
        debug!("Model '{}': {} orientations", self.model_name, orientations.len());
        self.orientations = orientations;
        Ok(())
    }

    /// Sets custom sections from their traces.
    pub fn set_section_dict(&mut self, traces: &[SectionTrace], resolution: [u32; 2]) -> Result<()> {
        self.section_dict = to_section_dict(traces, resolution)?;
        Ok(())
    }

    /// Sets the layer stack. Series and surface names must not be empty.
    pub fn set_stack(&mut self, stack: BTreeMap<String, Vec<String>>) -> Result<()> {
        for (series, surfaces) in &stack {
            if series.is_empty() {
                return Err(StratumError::invalid_input("stack series name is empty"));
            }
            check_names(surfaces)?;
        }

        self.stack = stack;
        Ok(())
    }

    /// Sets the names of the fault surfaces. Names must not be empty.
    pub fn set_is_fault(&mut self, faults: Vec<String>) -> Result<()> {
        check_names(&faults)?;
        self.is_fault = faults;
        Ok(())
    }

    /// Sets the surface color map.
    ///
    /// If `basement` is given, the color of that surface is stored under [`BASEMENT`] instead.
    pub fn set_surface_colors(
        &mut self,
        mut colors: BTreeMap<String, String>,
        basement: Option<&str>,
    ) -> Result<()> {
        if let Some(surface) = basement {
            let color = colors.remove(surface).ok_or_else(|| {
                StratumError::invalid_input(format!("surface '{surface}' has no color"))
            })?;
            colors.insert(BASEMENT.to_string(), color);
        }

        self.surface_colors = colors;
        Ok(())
    }
}

fn check_names(names: &[String]) -> Result<()> {
    if names.iter().any(String::is_empty) {
        return Err(StratumError::invalid_input("surface name is empty"));
    }

    Ok(())
}
