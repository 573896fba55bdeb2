//! Wallrun Core - Core types and utilities for the movement controller
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Horizontal/vertical vector helpers used by the movement integrator
//! - Transform and bounding-box types for teleport destinations and trigger volumes
//! - Game time with a fixed-step accumulator

pub mod math;
pub mod time;
pub mod types;

pub use glam::{Quat, Vec2, Vec3};
pub use time::{GameTime, TimeConfig};
pub use types::{Aabb, Transform};
