//! Procedural curve generation.
//!
//! Generators are pure: they return plain data ([`branch::BranchTree`],
//! [`filament::Filament`], dots) which the scene turns into drawing elements.

use crate::core::geometry::site::Site;

pub mod branch;
pub mod filament;
pub mod scatter;

/// A round mark in canvas space; `size` is in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub at: Site,
    pub size: f64,
    pub opacity: f64,
}
