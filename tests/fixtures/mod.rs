//! Test fixtures for route-overlay.
//!
//! Provides real, routable locations and a recording map surface.

#![allow(dead_code)]

pub mod locations;
pub mod surface;

pub use locations::*;
pub use surface::RecordingSurface;
