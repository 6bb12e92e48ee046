//! Input data of a geological model: extent, resolution, interface points, orientations, custom sections and
//! surface colors.

mod data;
mod extent;
mod section;
mod tables;

pub use data::{GeoModelData, BASEMENT};
pub use extent::{Extent, Resolution};
pub use section::{to_section_dict, Section, SectionDict, SectionTrace, DEFAULT_SECTION_RESOLUTION};
pub use tables::{to_interfaces, validate_orientations, InterfaceRow};
