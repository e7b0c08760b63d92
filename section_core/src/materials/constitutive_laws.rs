//! # Constitutive Laws
//!
//! Uniaxial stress-strain laws for section materials. Strains are
//! dimensionless, compression negative; stresses come back in whatever
//! stress unit the law parameters were given in.
//!
//! Each law answers three questions:
//!
//! - `stress(eps)`: stress at a strain level
//! - `tangent(eps)`: tangent modulus at a strain level
//! - `polynomial_zones(eps_a, kappa)`: the strain intervals over which
//!   stress is a low-order polynomial, with coefficients rewritten in the
//!   rotated-frame z coordinate (see [`crate::materials`])
//!
//! ## Example
//!
//! ```rust
//! use section_core::materials::{ElasticPlastic, ParabolaRectangle};
//!
//! let steel = ElasticPlastic::new(210_000.0, 410.0);
//! assert!((steel.stress(0.003) - 410.0).abs() < 1e-9);
//!
//! let concrete = ParabolaRectangle::new(30.0);
//! assert!((concrete.stress(-0.002) - (-30.0)).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SectionError, SectionResult};

use super::{strain_poly_to_z, StressLawSegment};

// ============================================================================
// Elastic
// ============================================================================

/// Linear elastic law, unbounded in both directions.
///
/// ## JSON Example
///
/// ```json
/// { "e": 210000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Elastic {
    /// Elastic modulus E
    pub e: f64,
}

impl Elastic {
    /// Create an elastic law with modulus `e`.
    pub fn new(e: f64) -> Self {
        Elastic { e }
    }

    /// Stress at strain level `eps`.
    pub fn stress(&self, eps: f64) -> f64 {
        self.e * eps
    }

    /// Tangent modulus at strain level `eps`.
    pub fn tangent(&self, _eps: f64) -> f64 {
        self.e
    }

    /// Polynomial stress zones in the rotated frame.
    pub fn polynomial_zones(
        &self,
        eps_a: f64,
        kappa: f64,
    ) -> SectionResult<Vec<StressLawSegment>> {
        Ok(vec![StressLawSegment::new(
            f64::NEG_INFINITY,
            f64::INFINITY,
            strain_poly_to_z(&[0.0, self.e], eps_a, kappa),
        )])
    }
}

// ============================================================================
// ElasticPlastic
// ============================================================================

/// Bilinear elastic-plastic law with optional hardening and rupture strain.
///
/// Symmetric in tension and compression. Beyond the rupture strain (when
/// set) the stress drops to zero.
///
/// ## JSON Example
///
/// ```json
/// { "e": 200000.0, "fy": 450.0, "eh": 0.0, "eps_su": 0.0675 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElasticPlastic {
    /// Elastic modulus E
    pub e: f64,

    /// Yield stress fy (positive)
    pub fy: f64,

    /// Hardening modulus Eh (0 = perfectly plastic plateau)
    pub eh: f64,

    /// Ultimate (rupture) strain; `None` = no rupture cutoff
    pub eps_su: Option<f64>,
}

impl ElasticPlastic {
    /// Create a perfectly plastic law (no hardening, no rupture strain).
    pub fn new(e: f64, fy: f64) -> Self {
        ElasticPlastic {
            e,
            fy: fy.abs(),
            eh: 0.0,
            eps_su: None,
        }
    }

    /// Set the hardening modulus.
    pub fn with_hardening(mut self, eh: f64) -> Self {
        self.eh = eh;
        self
    }

    /// Set the symmetric rupture strain.
    pub fn with_rupture_strain(mut self, eps_su: f64) -> Self {
        self.eps_su = Some(eps_su.abs());
        self
    }

    /// Yield strain fy / E.
    pub fn eps_sy(&self) -> f64 {
        self.fy / self.e
    }

    /// Stress jump between the elastic line and the hardening line.
    fn delta_sig(&self) -> f64 {
        self.fy * (1.0 - self.eh / self.e)
    }

    /// Stress at strain level `eps`.
    pub fn stress(&self, eps: f64) -> f64 {
        if let Some(eps_su) = self.eps_su {
            if eps.abs() > eps_su {
                return 0.0;
            }
        }
        let sig = self.e * eps;
        if sig > self.fy {
            self.eh * eps + self.delta_sig()
        } else if sig < -self.fy {
            self.eh * eps - self.delta_sig()
        } else {
            sig
        }
    }

    /// Tangent modulus at strain level `eps`.
    pub fn tangent(&self, eps: f64) -> f64 {
        if let Some(eps_su) = self.eps_su {
            if eps.abs() > eps_su {
                return 0.0;
            }
        }
        if eps.abs() > self.eps_sy() {
            self.eh
        } else {
            self.e
        }
    }

    /// Polynomial stress zones in the rotated frame.
    ///
    /// Three linear branches: hardening in compression, elastic, hardening
    /// in tension. Past rupture the stress is zero, so no zone is emitted.
    pub fn polynomial_zones(
        &self,
        eps_a: f64,
        kappa: f64,
    ) -> SectionResult<Vec<StressLawSegment>> {
        let eps_sy = self.eps_sy();
        let eps_su = self.eps_su.unwrap_or(f64::INFINITY);
        let delta = self.delta_sig();

        let mut zones = Vec::with_capacity(3);
        zones.push(StressLawSegment::new(
            -eps_su,
            -eps_sy,
            strain_poly_to_z(&[-delta, self.eh], eps_a, kappa),
        ));
        zones.push(StressLawSegment::new(
            -eps_sy,
            eps_sy,
            strain_poly_to_z(&[0.0, self.e], eps_a, kappa),
        ));
        zones.push(StressLawSegment::new(
            eps_sy,
            eps_su,
            strain_poly_to_z(&[delta, self.eh], eps_a, kappa),
        ));
        Ok(zones)
    }
}

// ============================================================================
// ParabolaRectangle
// ============================================================================

/// Parabola-rectangle law for concrete in compression (EC2 / MC2010 shape).
///
/// Zero in tension; parabolic up to `eps_0`, constant at `fc` until
/// `eps_u`, zero beyond (crushed). All three parameters are normalized to
/// negative (compression) regardless of the sign they are passed with.
///
/// ## JSON Example
///
/// ```json
/// { "fc": -30.0, "eps_0": -0.002, "eps_u": -0.0035, "n": 2.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParabolaRectangle {
    /// Peak compressive stress (negative)
    pub fc: f64,

    /// Strain at peak stress (negative)
    pub eps_0: f64,

    /// Ultimate strain (negative)
    pub eps_u: f64,

    /// Exponent of the ascending branch (2.0 for the classic parabola)
    pub n: f64,
}

impl ParabolaRectangle {
    /// Create a parabola-rectangle law with the standard strain limits
    /// (`eps_0 = -0.002`, `eps_u = -0.0035`, `n = 2`).
    pub fn new(fc: f64) -> Self {
        ParabolaRectangle {
            fc: -fc.abs(),
            eps_0: -0.002,
            eps_u: -0.0035,
            n: 2.0,
        }
    }

    /// Set the peak and ultimate strain limits.
    pub fn with_limits(mut self, eps_0: f64, eps_u: f64) -> Self {
        self.eps_0 = -eps_0.abs();
        self.eps_u = -eps_u.abs();
        self
    }

    /// Set the ascending-branch exponent.
    ///
    /// Exponents other than 2 still evaluate pointwise but cannot be
    /// expressed as polynomial stress zones.
    pub fn with_exponent(mut self, n: f64) -> Self {
        self.n = n;
        self
    }

    /// Stress at strain level `eps`.
    pub fn stress(&self, eps: f64) -> f64 {
        if eps >= 0.0 || eps < self.eps_u {
            0.0
        } else if eps >= self.eps_0 {
            self.fc * (1.0 - (1.0 - eps / self.eps_0).powf(self.n))
        } else {
            self.fc
        }
    }

    /// Tangent modulus at strain level `eps`.
    pub fn tangent(&self, eps: f64) -> f64 {
        if eps >= 0.0 || eps < self.eps_0 {
            0.0
        } else {
            self.fc * self.n / self.eps_0 * (1.0 - eps / self.eps_0).powf(self.n - 1.0)
        }
    }

    /// Polynomial stress zones in the rotated frame.
    ///
    /// Requires `n = 2`: the ascending branch is then the exact quadratic
    /// `fc * (2u - u^2)` with `u = eps / eps_0`.
    pub fn polynomial_zones(
        &self,
        eps_a: f64,
        kappa: f64,
    ) -> SectionResult<Vec<StressLawSegment>> {
        if (self.n - 2.0).abs() > 1e-12 {
            return Err(SectionError::unsupported_law(
                "ParabolaRectangle",
                format!(
                    "polynomial stress zones require exponent n = 2, got n = {}",
                    self.n
                ),
            ));
        }
        Ok(vec![
            // Rectangle branch: constant fc
            StressLawSegment::new(
                self.eps_u,
                self.eps_0,
                strain_poly_to_z(&[self.fc], eps_a, kappa),
            ),
            // Parabolic branch: fc * (2 eps/eps_0 - (eps/eps_0)^2)
            StressLawSegment::new(
                self.eps_0,
                0.0,
                strain_poly_to_z(
                    &[
                        0.0,
                        2.0 * self.fc / self.eps_0,
                        -self.fc / (self.eps_0 * self.eps_0),
                    ],
                    eps_a,
                    kappa,
                ),
            ),
        ])
    }
}

// ============================================================================
// PiecewiseLinear
// ============================================================================

/// User-defined piecewise-linear law from a list of (strain, stress) points.
///
/// If only non-negative strains are given the curve is mirrored into
/// compression. Outside the defined strain range the stress is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseLinear {
    /// Strain breakpoints, strictly increasing
    pub strain: Vec<f64>,

    /// Stress at each breakpoint
    pub stress: Vec<f64>,
}

impl PiecewiseLinear {
    /// Create a piecewise-linear law from matched strain/stress lists.
    ///
    /// Lists given with only non-negative strains are reflected through the
    /// origin to form the compression branch.
    pub fn new(strain: Vec<f64>, stress: Vec<f64>) -> SectionResult<Self> {
        if strain.len() != stress.len() {
            return Err(SectionError::invalid_input(
                "strain/stress",
                format!("{} vs {}", strain.len(), stress.len()),
                "The two lists must have the same length",
            ));
        }
        if strain.len() < 2 {
            return Err(SectionError::invalid_input(
                "strain",
                strain.len().to_string(),
                "At least two points are required",
            ));
        }

        let (strain, stress) = if strain.iter().all(|&x| x >= 0.0) {
            // Only the tension branch was given; mirror it
            let mut sx: Vec<f64> = strain
                .iter()
                .rev()
                .filter(|&&x| x != 0.0)
                .map(|&x| -x)
                .collect();
            let mut sy: Vec<f64> = strain
                .iter()
                .zip(stress.iter())
                .rev()
                .filter(|&(&x, _)| x != 0.0)
                .map(|(_, &y)| -y)
                .collect();
            sx.extend_from_slice(&strain);
            sy.extend_from_slice(&stress);
            (sx, sy)
        } else {
            (strain, stress)
        };

        for pair in strain.windows(2) {
            if pair[1] <= pair[0] {
                return Err(SectionError::invalid_input(
                    "strain",
                    format!("{} after {}", pair[1], pair[0]),
                    "Strain breakpoints must be strictly increasing",
                ));
            }
        }

        Ok(PiecewiseLinear { strain, stress })
    }

    /// Stress at strain level `eps` by linear interpolation; zero outside
    /// the defined range.
    pub fn stress(&self, eps: f64) -> f64 {
        let first = self.strain[0];
        let last = self.strain[self.strain.len() - 1];
        if eps < first || eps > last {
            return 0.0;
        }
        for i in 0..self.strain.len() - 1 {
            if eps <= self.strain[i + 1] {
                let slope = (self.stress[i + 1] - self.stress[i])
                    / (self.strain[i + 1] - self.strain[i]);
                return self.stress[i] + slope * (eps - self.strain[i]);
            }
        }
        self.stress[self.stress.len() - 1]
    }

    /// Tangent modulus at strain level `eps` (segment slope; zero outside).
    pub fn tangent(&self, eps: f64) -> f64 {
        let first = self.strain[0];
        let last = self.strain[self.strain.len() - 1];
        if eps < first || eps > last {
            return 0.0;
        }
        for i in 0..self.strain.len() - 1 {
            if eps <= self.strain[i + 1] {
                return (self.stress[i + 1] - self.stress[i])
                    / (self.strain[i + 1] - self.strain[i]);
            }
        }
        0.0
    }

    /// Polynomial stress zones in the rotated frame, one linear zone per
    /// segment of the curve.
    pub fn polynomial_zones(
        &self,
        eps_a: f64,
        kappa: f64,
    ) -> SectionResult<Vec<StressLawSegment>> {
        let mut zones = Vec::with_capacity(self.strain.len() - 1);
        for i in 0..self.strain.len() - 1 {
            let slope = (self.stress[i + 1] - self.stress[i])
                / (self.strain[i + 1] - self.strain[i]);
            let intercept = self.stress[i] - slope * self.strain[i];
            zones.push(StressLawSegment::new(
                self.strain[i],
                self.strain[i + 1],
                strain_poly_to_z(&[intercept, slope], eps_a, kappa),
            ));
        }
        Ok(zones)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elastic_stress() {
        let law = Elastic::new(210_000.0);
        assert!((law.stress(0.003) - 630.0).abs() < 1e-9);
        assert!((law.stress(-0.002) + 420.0).abs() < 1e-9);
        assert_eq!(law.tangent(0.1), 210_000.0);
    }

    #[test]
    fn test_elastic_plastic_plateau() {
        let law = ElasticPlastic::new(210_000.0, 410.0);
        assert!((law.stress(0.001) - 210.0).abs() < 1e-9);
        assert!((law.stress(0.003) - 410.0).abs() < 1e-9);
        assert!((law.stress(0.010) - 410.0).abs() < 1e-9);
        assert!((law.stress(-0.003) + 410.0).abs() < 1e-9);

        let law = ElasticPlastic::new(200_000.0, 450.0);
        assert!((law.stress(0.002) - 400.0).abs() < 1e-9);
        assert!((law.stress(0.004) - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_elastic_plastic_hardening_and_rupture() {
        let law = ElasticPlastic::new(200_000.0, 400.0)
            .with_hardening(2_000.0)
            .with_rupture_strain(0.05);
        let eps_sy = law.eps_sy();
        assert!((eps_sy - 0.002).abs() < 1e-12);

        // Continuity at yield
        let at_yield = law.stress(eps_sy);
        assert!((at_yield - 400.0).abs() < 1e-9);
        // Hardening beyond yield
        let hardened = law.stress(0.01);
        assert!((hardened - (2_000.0 * 0.01 + 400.0 * (1.0 - 0.01))).abs() < 1e-9);
        assert!(hardened > 400.0);
        // Past rupture
        assert_eq!(law.stress(0.06), 0.0);
        assert_eq!(law.stress(-0.06), 0.0);
    }

    #[test]
    fn test_parabola_rectangle_stress() {
        let cases = [
            (-30.0, -0.002, -0.0035, 0.001, 0.0),
            (-30.0, -0.002, -0.0035, -0.002, -30.0),
            (-30.0, -0.002, -0.0035, -0.003, -30.0),
            (-30.0, -0.002, -0.0035, -0.004, 0.0),
            (-30.0, -0.002, -0.0035, -0.001, -22.5),
            (-45.0, -0.002, -0.004, -0.0035, -45.0),
            (-45.0, -0.002, -0.004, -0.001, -33.75),
        ];
        for (fc, eps_0, eps_u, eps, expected) in cases {
            let law = ParabolaRectangle::new(fc).with_limits(eps_0, eps_u);
            assert!(
                (law.stress(eps) - expected).abs() < 1e-9,
                "fc={fc} eps={eps}"
            );
        }
    }

    #[test]
    fn test_parabola_rectangle_sign_normalization() {
        // Positive inputs are normalized to compression-negative
        let law = ParabolaRectangle::new(30.0).with_limits(0.002, 0.0035);
        assert_eq!(law.fc, -30.0);
        assert_eq!(law.eps_0, -0.002);
        assert!((law.stress(-0.002) + 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_parabola_zones_reject_general_exponent() {
        let law = ParabolaRectangle::new(30.0).with_exponent(1.8);
        let err = law.polynomial_zones(-0.001, 1e-5).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_LAW");
        // Pointwise evaluation still works
        assert!(law.stress(-0.001) < 0.0);
    }

    #[test]
    fn test_parabola_zones_match_stress() {
        // The quadratic zone coefficients must reproduce stress(eps) at the
        // z corresponding to each strain level.
        let law = ParabolaRectangle::new(30.0);
        let (eps_a, kappa) = (-0.001, 1.0e-5);
        let zones = law.polynomial_zones(eps_a, kappa).unwrap();
        for zone in &zones {
            let samples = [zone.eps_low.max(-0.0035), zone.eps_high.min(0.0)];
            for eps in samples {
                let z = (eps_a - eps) / kappa;
                let sig: f64 = zone
                    .coeffs
                    .iter()
                    .enumerate()
                    .map(|(k, c)| c * z.powi(k as i32))
                    .sum();
                assert!(
                    (sig - law.stress(eps)).abs() < 1e-9,
                    "eps={eps} sig={sig}"
                );
            }
        }
    }

    #[test]
    fn test_piecewise_linear_mirrored() {
        let law =
            PiecewiseLinear::new(vec![0.0, 0.002, 0.005], vec![0.0, 20.0, 23.0]).unwrap();
        let cases = [
            (0.001, 10.0),
            (0.002, 20.0),
            (0.003, 21.0),
            (0.005, 23.0),
            (0.006, 0.0),
            (-0.001, -10.0),
            (-0.004, -22.0),
            (-0.006, 0.0),
        ];
        for (eps, expected) in cases {
            assert!(
                (law.stress(eps) - expected).abs() < 1e-9,
                "eps={eps} expected={expected}"
            );
        }
    }

    #[test]
    fn test_piecewise_linear_validation() {
        assert!(PiecewiseLinear::new(vec![0.0, 0.002], vec![0.0]).is_err());
        assert!(PiecewiseLinear::new(vec![0.0], vec![0.0]).is_err());
        assert!(PiecewiseLinear::new(vec![-0.001, 0.002, 0.001], vec![0.0, 1.0, 2.0]).is_err());
    }

    #[test]
    fn test_serialization() {
        let law = ElasticPlastic::new(200_000.0, 450.0).with_rupture_strain(0.0675);
        let json = serde_json::to_string(&law).unwrap();
        let roundtrip: ElasticPlastic = serde_json::from_str(&json).unwrap();
        assert_eq!(law, roundtrip);
    }
}
