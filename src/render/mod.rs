//! Rendering module for strata.
//!
//! This module owns the codec boundary (decoding sources, encoding layers)
//! and the compositor that stacks layers into the final output.

mod composite;
mod png;

pub use composite::{compose, flatten, Composed, Strategy};
pub use png::{decode_grey, to_gray_image, write_layer};
