//! # Materials
//!
//! Constitutive laws attached to section geometries, and the capability
//! contract the integrators consume from them.
//!
//! ## Capability Contract
//!
//! A law attached to a surface must describe its stress field as a set of
//! **polynomial stress zones**: strain intervals over which stress is a
//! low-order polynomial. Because the rotated-frame strain is linear in z
//! (`eps = eps_a - kappa * z`), each strain-polynomial piece becomes a
//! z-polynomial with coefficients depending on `(eps_a, kappa)`. A law
//! attached to a reinforcement point only needs pointwise `stress(eps)`.
//!
//! ## Law Types
//!
//! - **Elastic**: linear, unbounded
//! - **ElasticPlastic**: bilinear with optional hardening and rupture
//! - **ParabolaRectangle**: EC2-style concrete compression curve
//! - **PiecewiseLinear**: user-defined point list, mirrored if one-sided
//!
//! ## Example
//!
//! ```rust
//! use section_core::materials::{ConstitutiveLaw, Elastic, ParabolaRectangle};
//!
//! let steel: ConstitutiveLaw = Elastic::new(210_000.0).into();
//! let concrete: ConstitutiveLaw = ParabolaRectangle::new(30.0).into();
//!
//! assert!((steel.stress(0.001) - 210.0).abs() < 1e-9);
//! assert!(concrete.stress(-0.002) < 0.0);
//! ```

pub mod constitutive_laws;

pub use constitutive_laws::{Elastic, ElasticPlastic, ParabolaRectangle, PiecewiseLinear};

use serde::{Deserialize, Serialize};

use crate::errors::SectionResult;

/// One polynomial stress zone returned by a constitutive law.
///
/// `coeffs[k]` is the coefficient of the z^k stress term in the rotated
/// frame, valid for strains in the half-open interval
/// `[eps_low, eps_high)`. Interval bounds may be infinite; the partitioner
/// clamps them to the polygon extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressLawSegment {
    /// Lower strain bound of the zone
    pub eps_low: f64,

    /// Upper strain bound of the zone
    pub eps_high: f64,

    /// Stress polynomial coefficients in z (index k = coefficient of z^k)
    pub coeffs: Vec<f64>,
}

impl StressLawSegment {
    /// Create a stress zone from bounds and z-polynomial coefficients.
    pub fn new(eps_low: f64, eps_high: f64, coeffs: Vec<f64>) -> Self {
        StressLawSegment {
            eps_low,
            eps_high,
            coeffs,
        }
    }

    /// True if every coefficient vanishes (zone contributes nothing).
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0.0)
    }
}

/// Rewrite a stress polynomial in strain as a polynomial in the rotated z
/// coordinate, substituting `eps = eps_a - kappa * z`.
///
/// `coeffs_eps[i]` is the coefficient of eps^i; the result index k is the
/// coefficient of z^k. Expansion:
///
/// ```text
/// (eps_a - kappa z)^i = sum_k C(i,k) eps_a^(i-k) (-kappa)^k z^k
/// ```
pub(crate) fn strain_poly_to_z(coeffs_eps: &[f64], eps_a: f64, kappa: f64) -> Vec<f64> {
    let deg = coeffs_eps.len();
    let mut out = vec![0.0; deg];
    for (i, &a) in coeffs_eps.iter().enumerate() {
        if a == 0.0 {
            continue;
        }
        for k in 0..=i {
            out[k] += a
                * binomial(i as u32, k as u32)
                * eps_a.powi((i - k) as i32)
                * (-kappa).powi(k as i32);
        }
    }
    out
}

/// Standard binomial coefficient C(n, k) as f64.
fn binomial(n: u32, k: u32) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// Unified constitutive law for all section materials.
///
/// This enum lets geometries and integrators work with any supported law
/// through a common interface, and serializes with a "type" discriminator
/// the same way section geometries do.
///
/// ## JSON Serialization
///
/// ```json
/// // Elastic
/// { "type": "Elastic", "e": 210000.0 }
///
/// // Elastic-plastic
/// { "type": "ElasticPlastic", "e": 200000.0, "fy": 450.0, "eh": 0.0, "eps_su": null }
///
/// // Parabola-rectangle
/// { "type": "ParabolaRectangle", "fc": -30.0, "eps_0": -0.002, "eps_u": -0.0035, "n": 2.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConstitutiveLaw {
    /// Linear elastic
    Elastic(Elastic),
    /// Bilinear elastic-plastic
    ElasticPlastic(ElasticPlastic),
    /// Parabola-rectangle concrete curve
    ParabolaRectangle(ParabolaRectangle),
    /// User-defined piecewise-linear curve
    PiecewiseLinear(PiecewiseLinear),
}

impl ConstitutiveLaw {
    /// Stress at strain level `eps`.
    pub fn stress(&self, eps: f64) -> f64 {
        match self {
            ConstitutiveLaw::Elastic(law) => law.stress(eps),
            ConstitutiveLaw::ElasticPlastic(law) => law.stress(eps),
            ConstitutiveLaw::ParabolaRectangle(law) => law.stress(eps),
            ConstitutiveLaw::PiecewiseLinear(law) => law.stress(eps),
        }
    }

    /// Tangent modulus at strain level `eps`.
    pub fn tangent(&self, eps: f64) -> f64 {
        match self {
            ConstitutiveLaw::Elastic(law) => law.tangent(eps),
            ConstitutiveLaw::ElasticPlastic(law) => law.tangent(eps),
            ConstitutiveLaw::ParabolaRectangle(law) => law.tangent(eps),
            ConstitutiveLaw::PiecewiseLinear(law) => law.tangent(eps),
        }
    }

    /// Secant modulus stress(eps) / eps.
    pub fn secant(&self, eps: f64) -> f64 {
        if eps == 0.0 {
            self.tangent(0.0)
        } else {
            self.stress(eps) / eps
        }
    }

    /// Polynomial stress zones for the rotated strain state
    /// `(eps_a, kappa)`, ordered by strain interval.
    ///
    /// Zones whose coefficients all vanish are dropped; they cannot
    /// contribute to the resultants.
    pub fn polynomial_zones(
        &self,
        eps_a: f64,
        kappa: f64,
    ) -> SectionResult<Vec<StressLawSegment>> {
        let mut zones = match self {
            ConstitutiveLaw::Elastic(law) => law.polynomial_zones(eps_a, kappa)?,
            ConstitutiveLaw::ElasticPlastic(law) => law.polynomial_zones(eps_a, kappa)?,
            ConstitutiveLaw::ParabolaRectangle(law) => law.polynomial_zones(eps_a, kappa)?,
            ConstitutiveLaw::PiecewiseLinear(law) => law.polynomial_zones(eps_a, kappa)?,
        };
        zones.retain(|zone| !zone.is_zero());
        Ok(zones)
    }

    /// Law type as a string
    pub fn law_type(&self) -> &'static str {
        match self {
            ConstitutiveLaw::Elastic(_) => "Elastic",
            ConstitutiveLaw::ElasticPlastic(_) => "ElasticPlastic",
            ConstitutiveLaw::ParabolaRectangle(_) => "ParabolaRectangle",
            ConstitutiveLaw::PiecewiseLinear(_) => "PiecewiseLinear",
        }
    }
}

// Convenience conversions
impl From<Elastic> for ConstitutiveLaw {
    fn from(law: Elastic) -> Self {
        ConstitutiveLaw::Elastic(law)
    }
}

impl From<ElasticPlastic> for ConstitutiveLaw {
    fn from(law: ElasticPlastic) -> Self {
        ConstitutiveLaw::ElasticPlastic(law)
    }
}

impl From<ParabolaRectangle> for ConstitutiveLaw {
    fn from(law: ParabolaRectangle) -> Self {
        ConstitutiveLaw::ParabolaRectangle(law)
    }
}

impl From<PiecewiseLinear> for ConstitutiveLaw {
    fn from(law: PiecewiseLinear) -> Self {
        ConstitutiveLaw::PiecewiseLinear(law)
    }
}
