//! Cross-section properties for frame elements

use serde::{Deserialize, Serialize};

/// Cross-section properties for frame elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area in m²
    pub a: f64,
    /// Moment of inertia about local y-axis in m⁴
    pub iy: f64,
    /// Moment of inertia about local z-axis in m⁴
    pub iz: f64,
    /// Torsional constant in m⁴
    pub j: f64,
    /// Elastic section modulus about y-axis in m³
    pub sy: f64,
    /// Elastic section modulus about z-axis in m³
    pub sz: f64,
    /// Depth of section (optional) in m
    pub depth: Option<f64>,
    /// Width of section (optional) in m
    pub width: Option<f64>,
}

impl Section {
    /// Create a section from explicit properties
    pub fn new(a: f64, iy: f64, iz: f64, j: f64, sy: f64, sz: f64) -> Self {
        Self {
            a,
            iy,
            iz,
            j,
            sy,
            sz,
            depth: None,
            width: None,
        }
    }

    /// Create a rectangular section
    pub fn rectangular(width: f64, depth: f64) -> Self {
        let a = width * depth;
        let iy = width * depth.powi(3) / 12.0;
        let iz = depth * width.powi(3) / 12.0;

        // Torsional constant for a rectangle (approximate)
        let (a_dim, b_dim) = if width > depth {
            (width, depth)
        } else {
            (depth, width)
        };
        let j = a_dim * b_dim.powi(3) / 3.0 * (1.0 - 0.63 * b_dim / a_dim);

        Self {
            a,
            iy,
            iz,
            j,
            sy: width * depth.powi(2) / 6.0,
            sz: depth * width.powi(2) / 6.0,
            depth: Some(depth),
            width: Some(width),
        }
    }

    /// Create a solid circular section
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        let a = std::f64::consts::PI * r.powi(2);
        let i = std::f64::consts::PI * r.powi(4) / 4.0;
        let j = std::f64::consts::PI * r.powi(4) / 2.0;
        let s = i / r;

        Self {
            a,
            iy: i,
            iz: i,
            j,
            sy: s,
            sz: s,
            depth: Some(diameter),
            width: Some(diameter),
        }
    }

    /// Create a hollow circular (pipe) section
    pub fn pipe(outer_diameter: f64, wall_thickness: f64) -> Self {
        let r_o = outer_diameter / 2.0;
        let r_i = r_o - wall_thickness;

        let a = std::f64::consts::PI * (r_o.powi(2) - r_i.powi(2));
        let i = std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 4.0;
        let j = std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 2.0;
        let s = i / r_o;

        Self {
            a,
            iy: i,
            iz: i,
            j,
            sy: s,
            sz: s,
            depth: Some(outer_diameter),
            width: Some(outer_diameter),
        }
    }

    /// Create a wide-flange (I-beam) section
    ///
    /// # Arguments
    /// * `depth` - Total depth of section
    /// * `flange_width` - Width of flange
    /// * `flange_thickness` - Thickness of flange
    /// * `web_thickness` - Thickness of web
    pub fn wide_flange(
        depth: f64,
        flange_width: f64,
        flange_thickness: f64,
        web_thickness: f64,
    ) -> Self {
        let bf = flange_width;
        let tf = flange_thickness;
        let tw = web_thickness;
        let d = depth;
        let hw = d - 2.0 * tf;

        let a = 2.0 * bf * tf + hw * tw;

        // Strong axis (y), weak axis (z)
        let iy = (bf * d.powi(3) - (bf - tw) * hw.powi(3)) / 12.0;
        let iz = (2.0 * tf * bf.powi(3) + hw * tw.powi(3)) / 12.0;

        // Torsional constant (approximate, open thin-walled)
        let j = (2.0 * bf * tf.powi(3) + hw * tw.powi(3)) / 3.0;

        Self {
            a,
            iy,
            iz,
            j,
            sy: iy / (d / 2.0),
            sz: iz / (bf / 2.0),
            depth: Some(d),
            width: Some(bf),
        }
    }

    /// Create a rectangular hollow (box/tube) section
    pub fn box_section(width: f64, depth: f64, wall_thickness: f64) -> Self {
        let t = wall_thickness;
        let b = width;
        let d = depth;
        let bi = b - 2.0 * t;
        let di = d - 2.0 * t;

        let a = b * d - bi * di;
        let iy = (b * d.powi(3) - bi * di.powi(3)) / 12.0;
        let iz = (d * b.powi(3) - di * bi.powi(3)) / 12.0;

        // Torsional constant for a closed thin-walled section
        let am = (b - t) * (d - t);
        let s = 2.0 * (b + d) - 4.0 * t;
        let j = 4.0 * am.powi(2) * t / s;

        Self {
            a,
            iy,
            iz,
            j,
            sy: iy / (d / 2.0),
            sz: iz / (b / 2.0),
            depth: Some(d),
            width: Some(b),
        }
    }

    /// Radius of gyration about the y-axis
    pub fn ry(&self) -> f64 {
        (self.iy / self.a).sqrt()
    }

    /// Radius of gyration about the z-axis
    pub fn rz(&self) -> f64 {
        (self.iz / self.a).sqrt()
    }

    /// Polar moment of inertia
    pub fn ip(&self) -> f64 {
        self.iy + self.iz
    }
}

impl Default for Section {
    fn default() -> Self {
        // 200mm x 200mm solid rectangle
        Self::rectangular(0.2, 0.2)
    }
}
