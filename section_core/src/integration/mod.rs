//! # Section Integration
//!
//! Integrates the stress response of a cross-section under an assumed
//! linear strain plane, producing the three stress resultants (N, Mx, My).
//!
//! ## Strategies
//!
//! - [`marin::MarinIntegrator`]: closed-form Marin polygon-moment
//!   integration over polynomial stress zones (default)
//! - [`fiber::FiberIntegrator`]: pointwise summation over a fiber grid
//!
//! Strategies share the [`SectionIntegrator`] contract and are resolved by
//! name through the [`registry::IntegratorRegistry`].
//!
//! ## Example
//!
//! ```rust
//! use section_core::geometry::{CompoundGeometry, SurfaceGeometry};
//! use section_core::materials::Elastic;
//! use section_core::results::StrainPlane;
//! use section_core::integration::integrate_strain_response;
//!
//! let surface = SurfaceGeometry::from_vertices(
//!     &[(-5.0, -10.0), (5.0, -10.0), (5.0, 10.0), (-5.0, 10.0)],
//!     Elastic::new(200_000.0).into(),
//! ).unwrap();
//! let section = CompoundGeometry::new(vec![surface]);
//!
//! // Uniform compressive strain: N = sigma * A, no moments
//! let plane = StrainPlane::uniform(-0.001);
//! let result = integrate_strain_response(&section, &plane).unwrap();
//! assert!((result.n - (-0.001 * 200_000.0 * 200.0)).abs() < 1e-6);
//! ```

pub mod fiber;
pub mod marin;
pub mod partition;
pub mod registry;

pub use fiber::FiberIntegrator;
pub use marin::{marin_moment, MarinIntegrator};
pub use registry::{default_registry, IntegratorRegistry};

use crate::errors::SectionResult;
use crate::geometry::CompoundGeometry;
use crate::results::{GrossProperties, StrainPlane, StressResultant};

/// Name of the strategy used by [`integrate_strain_response`].
pub const DEFAULT_INTEGRATOR: &str = "marin";

/// Contract every integration strategy implements.
///
/// An integrator is a pure function of its inputs: the geometry is
/// read-only and no state survives the call.
pub trait SectionIntegrator: std::fmt::Debug + Send + Sync {
    /// Registry name of the strategy.
    fn name(&self) -> &'static str;

    /// Integrate the stress response of `geometry` under `plane`.
    fn integrate_strain_response(
        &self,
        geometry: &CompoundGeometry,
        plane: &StrainPlane,
    ) -> SectionResult<StressResultant>;
}

/// Integrate the stress response of a section with the default (Marin)
/// strategy.
///
/// This is the single public entry point consumed by moment-curvature and
/// capacity-check loops built on top of this crate.
pub fn integrate_strain_response(
    geometry: &CompoundGeometry,
    plane: &StrainPlane,
) -> SectionResult<StressResultant> {
    default_registry()
        .get(DEFAULT_INTEGRATOR)?
        .integrate_strain_response(geometry, plane)
}

/// Gross (uncracked) geometric properties of a section, about the origin.
///
/// Surface rings integrate in closed form (holes subtract through their
/// clockwise winding); reinforcement points contribute their area at
/// their location.
pub fn gross_properties(geometry: &CompoundGeometry) -> GrossProperties {
    let mut props = GrossProperties::default();

    for surface in &geometry.geometries {
        let polygon = surface.polygon();
        let rings =
            std::iter::once(polygon.exterior()).chain(polygon.interiors().iter());
        for ring in rings {
            let ring = &ring.0;
            props.area += marin_moment(ring, 0, 0);
            props.s_y += marin_moment(ring, 0, 1);
            props.s_z += marin_moment(ring, 1, 0);
            props.i_yy += marin_moment(ring, 0, 2);
            props.i_zz += marin_moment(ring, 2, 0);
            props.i_yz += marin_moment(ring, 1, 1);
        }
    }

    for point in &geometry.point_geometries {
        props.area += point.area;
        props.s_y += point.area * point.z;
        props.s_z += point.area * point.y;
        props.i_yy += point.area * point.z * point.z;
        props.i_zz += point.area * point.y * point.y;
        props.i_yz += point.area * point.y * point.z;
    }

    if props.area != 0.0 {
        props.centroid_y = props.s_z / props.area;
        props.centroid_z = props.s_y / props.area;
    }
    props
}
