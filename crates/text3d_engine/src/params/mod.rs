//! Parameter service: raw submissions in, normalized descriptors out
//!
//! A pure transform with no side effects. Field types and formats are
//! checked; numeric ranges are not, since the UI's slider bounds are only a
//! client-side convention.

pub mod color;
pub mod request;
pub mod descriptor;

pub use color::{format_hex, parse_color};
pub use request::{GenerateRequest, LooseValue};
pub use descriptor::{DescriptorDefaults, ModelDescriptor, ParameterError, ParameterService};
