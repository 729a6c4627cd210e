//! Core domain types for strata.
//!
//! - `Region` / `FilterMode` - tagged rectangles and the region matcher
//! - `GreyImage` - single-channel pixel buffers
//! - `Preset` - named builtin region layouts

mod grey;
mod preset;
mod region;

pub use grey::{GreyImage, BLACK, WHITE};
pub use preset::{BuiltinPresets, Preset};
pub use region::{contains, Clipped, FilterMode, Region};
