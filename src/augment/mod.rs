//! Image augmentation: single operations and the fixed pipeline.
//!
//! An operation samples its parameters once at construction and applies an
//! identical transform every time it fires; the pipeline chains the five
//! operations in a fixed order.

pub mod operation;
pub mod pipeline;

pub use operation::{AugmentationOp, FlipDirection, OpKind};
pub use pipeline::Pipeline;
