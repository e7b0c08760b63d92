//! # Section Geometry
//!
//! Geometric building blocks of a cross-section: material polygons,
//! discrete reinforcement bars, and the compound section composing them.
//!
//! ## Coordinates
//!
//! Section-local axes are y (horizontal) and z (vertical). In the
//! underlying `geo` types, `Coord.x` carries the section y coordinate and
//! `Coord.y` carries the section z coordinate.
//!
//! ## Orientation Invariant
//!
//! Every surface polygon is normalized on construction so that the
//! exterior ring winds counter-clockwise and every hole ring winds
//! clockwise. Moment integration relies on this sign convention to make
//! holes subtract automatically.
//!
//! ## Example
//!
//! ```rust
//! use section_core::geometry::{CompoundGeometry, SurfaceGeometry};
//! use section_core::materials::{Elastic, ElasticPlastic, ParabolaRectangle};
//!
//! // 200 x 400 concrete rectangle with two layers of 4 bars
//! let concrete = SurfaceGeometry::from_vertices(
//!     &[(0.0, 0.0), (200.0, 0.0), (200.0, 400.0), (0.0, 400.0)],
//!     ParabolaRectangle::new(30.0).into(),
//! ).unwrap();
//!
//! let steel = ElasticPlastic::new(210_000.0, 450.0).with_rupture_strain(0.0675);
//! let section = CompoundGeometry::new(vec![concrete])
//!     .with_bar_line((40.0, 40.0), (160.0, 40.0), 4, 16.0, steel.clone().into())
//!     .unwrap()
//!     .with_bar_line((40.0, 360.0), (160.0, 360.0), 4, 16.0, steel.into())
//!     .unwrap()
//!     .translate(-100.0, -200.0);
//!
//! assert!((section.area() - 200.0 * 400.0).abs() < 1e-6);
//! ```

use geo::orient::{Direction, Orient};
use geo::{Area, Centroid, Coord, LineString, MapCoords, Polygon};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::errors::{SectionError, SectionResult};
use crate::materials::ConstitutiveLaw;

// ============================================================================
// SurfaceGeometry
// ============================================================================

/// A simple polygon (possibly with holes) made of one material.
///
/// The polygon is validated and orientation-normalized at construction and
/// is read-only afterwards; transformations return new geometries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    polygon: Polygon<f64>,

    /// Constitutive law of the polygon's material
    pub material: ConstitutiveLaw,
}

impl SurfaceGeometry {
    /// Create a surface geometry from a polygon and a material law.
    ///
    /// Normalizes ring orientation (exterior CCW, holes CW). Rejects
    /// polygons with fewer than 3 vertices or zero enclosed area.
    pub fn new(polygon: Polygon<f64>, material: ConstitutiveLaw) -> SectionResult<Self> {
        if polygon.exterior().0.len() < 3 {
            return Err(SectionError::invalid_input(
                "polygon",
                format!("{} vertices", polygon.exterior().0.len()),
                "A surface polygon needs at least 3 vertices",
            ));
        }
        if polygon.unsigned_area() == 0.0 {
            return Err(SectionError::invalid_input(
                "polygon",
                "degenerate ring".to_string(),
                "A surface polygon must enclose a non-zero area",
            ));
        }
        Ok(SurfaceGeometry {
            polygon: polygon.orient(Direction::Default),
            material,
        })
    }

    /// Create a hole-free surface geometry from a vertex list in section
    /// (y, z) coordinates. Vertex order may be either winding; it is
    /// normalized to CCW.
    pub fn from_vertices(
        vertices: &[(f64, f64)],
        material: ConstitutiveLaw,
    ) -> SectionResult<Self> {
        let ring: Vec<Coord<f64>> = vertices.iter().map(|&(y, z)| Coord { x: y, y: z }).collect();
        SurfaceGeometry::new(Polygon::new(LineString::from(ring), vec![]), material)
    }

    /// The underlying polygon (exterior CCW, holes CW).
    pub fn polygon(&self) -> &Polygon<f64> {
        &self.polygon
    }

    /// Enclosed area (holes subtracted).
    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    /// Centroid in section (y, z) coordinates.
    pub fn centroid(&self) -> (f64, f64) {
        self.polygon
            .centroid()
            .map(|p| (p.x(), p.y()))
            .unwrap_or((0.0, 0.0))
    }

    /// Rotate about the origin by `angle` radians (counter-clockwise).
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        SurfaceGeometry {
            polygon: self.polygon.map_coords(|c| Coord {
                x: c.x * cos - c.y * sin,
                y: c.x * sin + c.y * cos,
            }),
            material: self.material.clone(),
        }
    }

    /// Translate by (dy, dz).
    pub fn translate(&self, dy: f64, dz: f64) -> Self {
        SurfaceGeometry {
            polygon: self.polygon.map_coords(|c| Coord {
                x: c.x + dy,
                y: c.y + dz,
            }),
            material: self.material.clone(),
        }
    }
}

// ============================================================================
// PointGeometry
// ============================================================================

/// A discrete reinforcement bar: a point with an area and a material.
///
/// ## JSON Example
///
/// ```json
/// { "y": 40.0, "z": 360.0, "area": 201.06, "material": { "type": "Elastic", "e": 210000.0 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGeometry {
    /// Section y coordinate
    pub y: f64,

    /// Section z coordinate
    pub z: f64,

    /// Bar area
    pub area: f64,

    /// Constitutive law of the bar material
    pub material: ConstitutiveLaw,
}

impl PointGeometry {
    /// Create a point geometry from an explicit area.
    pub fn new(y: f64, z: f64, area: f64, material: ConstitutiveLaw) -> SectionResult<Self> {
        if area <= 0.0 {
            return Err(SectionError::invalid_input(
                "area",
                area.to_string(),
                "Bar area must be positive",
            ));
        }
        Ok(PointGeometry {
            y,
            z,
            area,
            material,
        })
    }

    /// Create a circular bar from its diameter.
    pub fn bar(y: f64, z: f64, diameter: f64, material: ConstitutiveLaw) -> SectionResult<Self> {
        if diameter <= 0.0 {
            return Err(SectionError::invalid_input(
                "diameter",
                diameter.to_string(),
                "Bar diameter must be positive",
            ));
        }
        PointGeometry::new(y, z, PI * diameter * diameter / 4.0, material)
    }

    /// Rotate about the origin by `angle` radians (counter-clockwise).
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        PointGeometry {
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
            area: self.area,
            material: self.material.clone(),
        }
    }

    /// Translate by (dy, dz).
    pub fn translate(&self, dy: f64, dz: f64) -> Self {
        PointGeometry {
            y: self.y + dy,
            z: self.z + dz,
            area: self.area,
            material: self.material.clone(),
        }
    }
}

// ============================================================================
// CompoundGeometry
// ============================================================================

/// A full cross-section: material polygons plus reinforcement points.
///
/// Geometries are read-only during integration; transformation methods
/// return new compounds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompoundGeometry {
    /// Material polygons, in insertion order
    pub geometries: Vec<SurfaceGeometry>,

    /// Reinforcement bars, in insertion order
    pub point_geometries: Vec<PointGeometry>,
}

impl CompoundGeometry {
    /// Create a compound from a list of surface geometries.
    pub fn new(geometries: Vec<SurfaceGeometry>) -> Self {
        CompoundGeometry {
            geometries,
            point_geometries: Vec::new(),
        }
    }

    /// Add a surface geometry.
    pub fn with_surface(mut self, surface: SurfaceGeometry) -> Self {
        self.geometries.push(surface);
        self
    }

    /// Add a single circular bar by diameter.
    pub fn with_bar(
        mut self,
        at: (f64, f64),
        diameter: f64,
        material: ConstitutiveLaw,
    ) -> SectionResult<Self> {
        self.point_geometries
            .push(PointGeometry::bar(at.0, at.1, diameter, material)?);
        Ok(self)
    }

    /// Add `n` equally spaced circular bars along the segment from `start`
    /// to `end` (both included). A single bar lands on `start`.
    pub fn with_bar_line(
        mut self,
        start: (f64, f64),
        end: (f64, f64),
        n: usize,
        diameter: f64,
        material: ConstitutiveLaw,
    ) -> SectionResult<Self> {
        if n == 0 {
            return Err(SectionError::invalid_input(
                "n",
                "0",
                "A bar line needs at least one bar",
            ));
        }
        for i in 0..n {
            let t = if n == 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            let y = start.0 + t * (end.0 - start.0);
            let z = start.1 + t * (end.1 - start.1);
            self.point_geometries
                .push(PointGeometry::bar(y, z, diameter, material.clone())?);
        }
        Ok(self)
    }

    /// Total surface area (holes subtracted; bar areas not included).
    pub fn area(&self) -> f64 {
        self.geometries.iter().map(|g| g.area()).sum()
    }

    /// Rotate the whole section about the origin by `angle` radians.
    pub fn rotate(&self, angle: f64) -> Self {
        CompoundGeometry {
            geometries: self.geometries.iter().map(|g| g.rotate(angle)).collect(),
            point_geometries: self
                .point_geometries
                .iter()
                .map(|p| p.rotate(angle))
                .collect(),
        }
    }

    /// Translate the whole section by (dy, dz).
    pub fn translate(&self, dy: f64, dz: f64) -> Self {
        CompoundGeometry {
            geometries: self
                .geometries
                .iter()
                .map(|g| g.translate(dy, dz))
                .collect(),
            point_geometries: self
                .point_geometries
                .iter()
                .map(|p| p.translate(dy, dz))
                .collect(),
        }
    }
}
