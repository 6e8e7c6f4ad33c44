//! The matrix functions used to aggregate paths of every length.

use std::{fmt, str::FromStr};

use nalgebra::DMatrix;

use crate::{
    error::{Error, Result},
    expm::MatrixExponential,
};

/// Selects the matrix function applied to the transposed adjacency matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Transform {
    /// `e^(k(Aᵗ - I))`, a diffusion that decays with path length.
    #[default]
    HeatKernel,
    /// `(e^(kAᵗ) - I) / (e^k - 1)`, power weighted paths normalised against the identity baseline.
    Pwp,
}

impl Transform {
    /// Returns the canonical name of the transform.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HeatKernel => "heat-kernel",
            Self::Pwp => "pwp",
        }
    }

    /// Checks that the formula is defined for `k` before any matrix work starts.
    ///
    /// `k` must be finite and non-negative. The heat kernel accepts `k = 0` (the transform is the
    /// identity) whereas PWP doesn't, as its normalisation constant `e^0 - 1` vanishes.
    pub fn check(&self, k: f64) -> Result<()> {
        let defined = match self {
            Self::HeatKernel => k.is_finite() && k >= 0.0,
            Self::Pwp => k.is_finite() && k > 0.0,
        };

        if defined {
            Ok(())
        } else {
            Err(Error::DegenerateParameter {
                transform: *self,
                k,
            })
        }
    }

    /// Computes the transform of `matrix` (already transposed) with scale `k`.
    ///
    /// Call [`check`](Transform::check) first, this doesn't validate `k`.
    pub fn apply(
        &self,
        matrix: &DMatrix<f64>,
        k: f64,
        expm: &dyn MatrixExponential,
    ) -> DMatrix<f64> {
        let n = matrix.nrows();
        let identity = DMatrix::<f64>::identity(n, n);

        match self {
            Self::HeatKernel => expm.exp(&(matrix - &identity).scale(k)),
            // `exp_m1` keeps the denominator accurate for small k.
            Self::Pwp => (expm.exp(&matrix.scale(k)) - identity).unscale(k.exp_m1()),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transform {
    type Err = Error;

    /// Parses a transform name, case insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use indirect::transform::Transform;
    ///
    /// assert_eq!("heat-kernel".parse::<Transform>(), Ok(Transform::HeatKernel));
    /// assert_eq!("PWP".parse::<Transform>(), Ok(Transform::Pwp));
    /// assert!("pagerank".parse::<Transform>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "heat-kernel" | "heatkernel" | "heat_kernel" => Ok(Self::HeatKernel),
            "pwp" => Ok(Self::Pwp),
            _ => Err(Error::UnknownTransform(s.to_owned())),
        }
    }
}

/// Parameters for a single scoring run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Params {
    /// The scale of the matrix function. Default: `1.0`.
    pub k: f64,
    /// The matrix function to apply. Default: [`Transform::HeatKernel`].
    pub transform: Transform,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            k: 1.0,
            transform: Transform::default(),
        }
    }
}

impl Params {
    /// Parameters for the heat kernel transform with scale `k`.
    pub fn heat_kernel(k: f64) -> Self {
        Self {
            k,
            transform: Transform::HeatKernel,
        }
    }

    /// Parameters for the PWP transform with scale `k`.
    pub fn pwp(k: f64) -> Self {
        Self {
            k,
            transform: Transform::Pwp,
        }
    }
}
