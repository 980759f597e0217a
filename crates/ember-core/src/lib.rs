//! Ember Core - Foundational types for the Ember framework
//!
//! This crate provides the types all other Ember crates depend on:
//! - `Vec3`, `Mat4` helpers - Spatial math
//! - `Transform` - Local position/rotation/scale
//! - Error types and Result alias

mod error;
mod types;

pub use error::{EmberError, Result};
pub use types::{mat4_mul, mat4_transform_point, Mat4, Transform, Vec3, MAT4_IDENTITY};
