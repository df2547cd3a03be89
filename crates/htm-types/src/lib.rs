#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
//! Spherical geometry primitives and Hierarchical Triangular Mesh (HTM) trixel
//! arithmetic.
//!
//! This crate plays the role of the "external" support library that a full HTM
//! indexer consumes: Cartesian points on S², spherical halfspaces, convex regions
//! built from them, and the trixel ID encoding used by the HTM paper (level-0
//! faces numbered `8..=15`, children numbered `id*4 + {0,1,2,3}`).
//!
//! # Types
//!
//! - **[`CartesianPoint`]**: a unit vector on the sphere, with RA/Dec views.
//! - **[`Halfspace`]**: an oriented spherical cap.
//! - **[`Convex`]**: an intersection of halfspaces, built from a hull or a cap.
//! - **[`HtmId`]**: a trixel identifier, with level/parent/children/triangle
//!   accessors.
//! - **[`Cover`]**: iterative trixel-set refinement against a [`Convex`].

mod convex;
mod error;
mod halfspace;
mod point;
mod trixel;

pub use convex::{triangle_contains_point, Convex, PointOrdering};
pub use error::SphericalError;
pub use halfspace::Halfspace;
pub use point::CartesianPoint;
pub use trixel::{Cover, HtmId, TrixelState};
