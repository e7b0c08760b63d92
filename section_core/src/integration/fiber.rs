//! # Fiber Integration
//!
//! A deliberately simple integration strategy: rasterize each material
//! polygon into a grid of fibers and sum pointwise stress contributions.
//!
//! Fiber integration needs no rotation, no partitioning and no polynomial
//! stress zones, only pointwise `stress(eps)`, which makes it a useful
//! cross-check for the closed-form Marin strategy and the natural fallback
//! for constitutive laws Marin cannot express polynomially.

use geo::{BoundingRect, Contains, Point};

use crate::errors::{SectionError, SectionResult};
use crate::geometry::CompoundGeometry;
use crate::results::{StrainPlane, StressResultant};

use super::SectionIntegrator;

/// Section integrator summing over a fiber grid.
///
/// Each surface polygon's bounding rectangle is divided into
/// `divisions x divisions` cells; cells whose center lies inside the
/// polygon (and outside its holes) contribute `stress * cell area` at the
/// center. Accuracy and cost both scale with `divisions` squared.
#[derive(Debug, Clone, Copy)]
pub struct FiberIntegrator {
    divisions: usize,
}

impl FiberIntegrator {
    /// Default grid divisions per bounding-box side.
    pub const DEFAULT_DIVISIONS: usize = 100;

    /// Create a fiber integrator with the default grid.
    pub fn new() -> Self {
        FiberIntegrator {
            divisions: Self::DEFAULT_DIVISIONS,
        }
    }

    /// Create a fiber integrator with a custom number of grid divisions
    /// per bounding-box side.
    pub fn with_divisions(divisions: usize) -> SectionResult<Self> {
        if divisions == 0 {
            return Err(SectionError::invalid_input(
                "divisions",
                "0",
                "Fiber grid needs at least one division",
            ));
        }
        Ok(FiberIntegrator { divisions })
    }
}

impl Default for FiberIntegrator {
    fn default() -> Self {
        FiberIntegrator::new()
    }
}

impl SectionIntegrator for FiberIntegrator {
    fn name(&self) -> &'static str {
        "fiber"
    }

    fn integrate_strain_response(
        &self,
        geometry: &CompoundGeometry,
        plane: &StrainPlane,
    ) -> SectionResult<StressResultant> {
        let mut n = 0.0;
        let mut m_x = 0.0;
        let mut m_y = 0.0;

        for surface in &geometry.geometries {
            let polygon = surface.polygon();
            let bbox = polygon.bounding_rect().ok_or_else(|| {
                SectionError::malformed_geometry("surface polygon has no bounding rectangle")
            })?;
            let dy = bbox.width() / self.divisions as f64;
            let dz = bbox.height() / self.divisions as f64;
            let cell_area = dy * dz;

            for i in 0..self.divisions {
                let y = bbox.min().x + (i as f64 + 0.5) * dy;
                for j in 0..self.divisions {
                    let z = bbox.min().y + (j as f64 + 0.5) * dz;
                    if !polygon.contains(&Point::new(y, z)) {
                        continue;
                    }
                    let sigma = surface.material.stress(plane.strain_at(y, z));
                    if sigma == 0.0 {
                        continue;
                    }
                    n += sigma * cell_area;
                    m_x += sigma * cell_area * z;
                    m_y += sigma * cell_area * y;
                }
            }
        }

        for point in &geometry.point_geometries {
            let force = point.material.stress(plane.strain_at(point.y, point.z)) * point.area;
            n += force;
            m_x += force * point.z;
            m_y += force * point.y;
        }

        Ok(StressResultant::new(n, m_x, m_y))
    }
}
