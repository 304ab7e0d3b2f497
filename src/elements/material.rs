//! Material properties

use serde::{Deserialize, Serialize};

/// Broad material classification carried through to results consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialClass {
    Steel,
    Concrete,
    Timber,
    Aluminum,
    Other,
}

/// Material properties for structural analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Shear modulus in Pa
    pub g: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Density in kg/m³
    pub rho: f64,
    /// Yield strength (optional) in Pa
    pub fy: Option<f64>,
    /// Ultimate strength (optional) in Pa
    pub fu: Option<f64>,
    /// Coefficient of thermal expansion in 1/K
    pub alpha: f64,
    /// Material classification
    pub class: MaterialClass,
}

impl Material {
    /// Create a new material with given elastic properties
    pub fn new(e: f64, g: f64, nu: f64, rho: f64) -> Self {
        Self {
            e,
            g,
            nu,
            rho,
            fy: None,
            fu: None,
            alpha: 0.0,
            class: MaterialClass::Other,
        }
    }

    /// Create an isotropic material from E and nu; G = E / (2 * (1 + nu))
    pub fn isotropic(e: f64, nu: f64, rho: f64) -> Self {
        let g = e / (2.0 * (1.0 + nu));
        Self::new(e, g, nu, rho)
    }

    /// Set the yield strength
    pub fn with_yield_strength(mut self, fy: f64) -> Self {
        self.fy = Some(fy);
        self
    }

    /// Set the ultimate strength
    pub fn with_ultimate_strength(mut self, fu: f64) -> Self {
        self.fu = Some(fu);
        self
    }

    /// Set the thermal expansion coefficient
    pub fn with_thermal_coefficient(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Standard structural steel (A36)
    pub fn steel() -> Self {
        Self {
            e: 200e9,
            g: 77e9,
            nu: 0.3,
            rho: 7850.0,
            fy: Some(250e6),
            fu: Some(400e6),
            alpha: 1.2e-5,
            class: MaterialClass::Steel,
        }
    }

    /// Normal-weight concrete from compressive strength f'c (Pa)
    ///
    /// E estimated with the ACI formula E = 4700 * sqrt(f'c in MPa) MPa.
    pub fn concrete(fc: f64) -> Self {
        let fc_mpa = fc / 1e6;
        let e = 4700.0 * fc_mpa.sqrt() * 1e6;

        Self {
            e,
            g: e / (2.0 * (1.0 + 0.2)),
            nu: 0.2,
            rho: 2400.0,
            fy: None,
            fu: Some(fc),
            alpha: 1.0e-5,
            class: MaterialClass::Concrete,
        }
    }

    /// Aluminum 6061-T6
    pub fn aluminum() -> Self {
        Self {
            e: 68.9e9,
            g: 26e9,
            nu: 0.33,
            rho: 2700.0,
            fy: Some(276e6),
            fu: Some(310e6),
            alpha: 2.3e-5,
            class: MaterialClass::Aluminum,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
