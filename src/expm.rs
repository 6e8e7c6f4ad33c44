//! The dense matrix exponential the transforms are built on.

use std::sync::Arc;

use nalgebra::DMatrix;

/// Computes `e^M` for a square matrix `M`.
///
/// The scorer treats this as an external primitive: implementations are assumed correct and
/// numerically stable for the sizes they're handed.
pub trait MatrixExponential: Send + Sync {
    /// A short human readable name for the backend, used in logs.
    fn name(&self) -> &'static str;

    /// Returns the matrix exponential of `matrix`, which is always square.
    fn exp(&self, matrix: &DMatrix<f64>) -> DMatrix<f64>;
}

/// Scaling and squaring with a Padé approximant, as implemented by `nalgebra`.
#[cfg(feature = "pade")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Pade;

#[cfg(feature = "pade")]
impl MatrixExponential for Pade {
    fn name(&self) -> &'static str {
        "pade"
    }

    fn exp(&self, matrix: &DMatrix<f64>) -> DMatrix<f64> {
        matrix.exp()
    }
}

/// Resolves the backend compiled into this build, if any.
///
/// This is `None` when the crate is built without the `pade` feature, in which case a backend has
/// to be injected with [`Scorer::with_backend`](crate::influence::Scorer::with_backend).
pub fn default_backend() -> Option<Arc<dyn MatrixExponential>> {
    #[cfg(feature = "pade")]
    return Some(Arc::new(Pade));

    #[cfg(not(feature = "pade"))]
    None
}
