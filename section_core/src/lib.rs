//! # section_core - Cross-Section Analysis Engine
//!
//! `section_core` computes the stress response of arbitrary structural
//! cross-sections under linear strain planes. Sections are composed of
//! material polygons and discrete reinforcement bars; the engine partitions
//! them into polynomial stress zones and integrates the zone moments in
//! closed form, with a fiber-grid strategy available for cross-checks.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Integrators are pure functions of geometry and strain
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Closed-Form**: Exact polygon moment integration, no meshing needed
//!
//! ## Quick Start
//!
//! ```rust
//! use section_core::geometry::{CompoundGeometry, SurfaceGeometry};
//! use section_core::materials::{ElasticPlastic, ParabolaRectangle};
//! use section_core::results::StrainPlane;
//! use section_core::integrate_strain_response;
//!
//! // 200 x 400 concrete rectangle, origin at the centroid, with two
//! // layers of 16 mm bars
//! let concrete = SurfaceGeometry::from_vertices(
//!     &[(-100.0, -200.0), (100.0, -200.0), (100.0, 200.0), (-100.0, 200.0)],
//!     ParabolaRectangle::new(30.0).into(),
//! ).unwrap();
//! let steel = ElasticPlastic::new(210_000.0, 450.0).with_rupture_strain(0.0675);
//! let section = CompoundGeometry::new(vec![concrete])
//!     .with_bar_line((-60.0, -160.0), (60.0, -160.0), 4, 16.0, steel.clone().into())
//!     .unwrap()
//!     .with_bar_line((-60.0, 160.0), (60.0, 160.0), 4, 16.0, steel.into())
//!     .unwrap();
//!
//! // Bending about the y axis
//! let plane = StrainPlane::new(-0.0005, 7.5e-6, 0.0);
//! let result = integrate_strain_response(&section, &plane).unwrap();
//! assert!(result.n < 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Material polygons, reinforcement bars, compound sections
//! - [`materials`] - Constitutive laws and their polynomial stress zones
//! - [`integration`] - Integration strategies and the strategy registry
//! - [`results`] - Strain planes, stress resultants, gross properties
//! - [`errors`] - Structured error types

pub mod errors;
pub mod geometry;
pub mod integration;
pub mod materials;
pub mod results;

// Re-export commonly used types at crate root for convenience
pub use errors::{SectionError, SectionResult};
pub use geometry::{CompoundGeometry, PointGeometry, SurfaceGeometry};
pub use integration::{
    default_registry, gross_properties, integrate_strain_response, FiberIntegrator,
    IntegratorRegistry, MarinIntegrator, SectionIntegrator,
};
pub use materials::ConstitutiveLaw;
pub use results::{GrossProperties, StrainPlane, StressResultant};
