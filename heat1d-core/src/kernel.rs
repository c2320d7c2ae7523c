/// Explicit central-difference update of one sample.
///
/// `factor` is `alpha * dt / h^2`. The scheme is only stable for
/// `factor <= 0.5`; that is the caller's responsibility.
#[inline]
pub fn stencil(left: f64, center: f64, right: f64, factor: f64) -> f64 {
    center + factor * (right - 2.0 * center + left)
}
