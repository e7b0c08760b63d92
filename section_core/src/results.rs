//! # Strain Planes and Section Results
//!
//! The input strain description and the output resultants of a section
//! integration, plus gross (uncracked) section properties.
//!
//! ## Axes and Sign Convention
//!
//! Section-local axes are y (horizontal) and z (vertical). A strain plane
//! is the triple `(eps_a, kappa_y, kappa_z)`: strain at the origin and the
//! curvatures about the two local axes. The strain at a point is
//!
//! ```text
//! eps(y, z) = eps_a - kappa_y * z + kappa_z * y
//! ```
//!
//! Compression is negative, matching the constitutive laws in
//! [`crate::materials`].
//!
//! ## Example
//!
//! ```rust
//! use section_core::results::StrainPlane;
//!
//! // Pure bending about the y axis: strain varies linearly with z
//! let plane = StrainPlane::new(0.0, 1.0e-5, 0.0);
//! assert_eq!(plane.strain_at(0.0, 100.0), -1.0e-3);
//! ```

use serde::{Deserialize, Serialize};

/// Linear strain field over a cross-section.
///
/// ## JSON Example
///
/// ```json
/// { "eps_a": -0.001, "kappa_y": 1.0e-5, "kappa_z": 0.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainPlane {
    /// Strain at the section origin (0, 0)
    pub eps_a: f64,

    /// Curvature about the y axis (1/length)
    pub kappa_y: f64,

    /// Curvature about the z axis (1/length)
    pub kappa_z: f64,
}

impl StrainPlane {
    /// Create a strain plane from origin strain and the two curvatures.
    pub fn new(eps_a: f64, kappa_y: f64, kappa_z: f64) -> Self {
        StrainPlane {
            eps_a,
            kappa_y,
            kappa_z,
        }
    }

    /// Create a uniform (curvature-free) strain plane.
    pub fn uniform(eps_a: f64) -> Self {
        StrainPlane::new(eps_a, 0.0, 0.0)
    }

    /// Strain at a point in section-local coordinates.
    pub fn strain_at(&self, y: f64, z: f64) -> f64 {
        self.eps_a - self.kappa_y * z + self.kappa_z * y
    }

    /// True when both curvatures vanish and the strain field is constant.
    ///
    /// This is the degenerate case where the neutral axis is undefined;
    /// integrators must not derive a rotation angle from it.
    pub fn is_uniform(&self) -> bool {
        self.kappa_y == 0.0 && self.kappa_z == 0.0
    }

    /// Magnitude of the curvature vector.
    pub fn curvature(&self) -> f64 {
        self.kappa_y.hypot(self.kappa_z)
    }
}

/// Stress resultants in the section's original (unrotated) axes.
///
/// Axial force plus the two bending moments statically equivalent to the
/// integrated stress field.
///
/// ## JSON Example
///
/// ```json
/// { "n": -1250.0, "m_x": 88000.0, "m_y": 0.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StressResultant {
    /// Axial force N (negative = compression)
    pub n: f64,

    /// Bending moment about the local x axis
    pub m_x: f64,

    /// Bending moment about the local y axis
    pub m_y: f64,
}

impl StressResultant {
    /// Create a resultant from its three components.
    pub fn new(n: f64, m_x: f64, m_y: f64) -> Self {
        StressResultant { n, m_x, m_y }
    }
}

/// Gross (uncracked) geometric properties of a compound section.
///
/// All moments are taken about the section origin, not the centroid.
/// Discrete reinforcement points contribute their area at their location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GrossProperties {
    /// Total area
    pub area: f64,

    /// First moment of area about the y axis: integral of z dA
    pub s_y: f64,

    /// First moment of area about the z axis: integral of y dA
    pub s_z: f64,

    /// Centroid y coordinate
    pub centroid_y: f64,

    /// Centroid z coordinate
    pub centroid_z: f64,

    /// Second moment of area: integral of z^2 dA
    pub i_yy: f64,

    /// Second moment of area: integral of y^2 dA
    pub i_zz: f64,

    /// Product moment of area: integral of y*z dA
    pub i_yz: f64,
}
