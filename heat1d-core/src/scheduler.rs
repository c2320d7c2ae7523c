//! Fork-join range scheduler.
//!
//! A [`WorkRange`] is halved recursively until it is no longer than the
//! [`Granularity`] threshold; each leaf then runs sequentially. The output
//! slice is split alongside the range with `split_at_mut`, so concurrently
//! running leaves always own disjoint output indices and need no locking.

use std::num::NonZeroUsize;

use crate::kernel::stencil;

/// Closed index interval `[start, end]`. Empty when `start > end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkRange {
    pub start: usize,
    pub end: usize,
}

impl WorkRange {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// Halves the range at `mid = (start + end) / 2` into `[start, mid]`
    /// and `[mid + 1, end]`.
    pub fn split(&self) -> (WorkRange, WorkRange) {
        let mid = self.start + (self.end - self.start) / 2;
        (
            WorkRange::new(self.start, mid),
            WorkRange::new(mid + 1, self.end),
        )
    }
}

/// Ranges whose `end - start` falls below this threshold run as one
/// sequential leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Granularity(NonZeroUsize);

impl Granularity {
    pub const DEFAULT_THRESHOLD: usize = 1024;

    /// Splits all the way down to single-index leaves.
    pub const FINEST: Granularity = Granularity(NonZeroUsize::MIN);

    /// Never splits.
    pub const SEQUENTIAL: Granularity = Granularity(NonZeroUsize::MAX);

    /// `None` for a zero threshold, which would never reach a leaf.
    pub fn new(threshold: usize) -> Option<Self> {
        NonZeroUsize::new(threshold).map(Granularity)
    }

    pub fn threshold(&self) -> usize {
        self.0.get()
    }

    pub fn is_leaf(&self, range: WorkRange) -> bool {
        range.is_empty() || range.end - range.start < self.threshold()
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity::new(Self::DEFAULT_THRESHOLD).unwrap_or(Self::FINEST)
    }
}

/// Runs `leaf` over `range`, splitting in two and joining on the current
/// rayon pool while the range is above the threshold.
///
/// `out` holds exactly the elements addressed by `range`: `out[0]` belongs
/// to index `range.start`. Every index is handed to exactly one leaf call.
/// An empty range is a no-op. A panic inside a leaf propagates to the
/// caller once both halves of the enclosing join have finished.
///
/// # Panics
///
/// If `out.len()` differs from `range.len()`.
pub fn divide_and_conquer<T, F>(range: WorkRange, out: &mut [T], grain: Granularity, leaf: &F)
where
    T: Send,
    F: Fn(WorkRange, &mut [T]) + Sync,
{
    if range.is_empty() {
        return;
    }
    assert_eq!(
        out.len(),
        range.len(),
        "output slice length must match work range {range:?}"
    );

    if grain.is_leaf(range) {
        leaf(range, out);
        return;
    }

    let (lo, hi) = range.split();
    let (out_lo, out_hi) = out.split_at_mut(lo.len());
    rayon::join(
        || divide_and_conquer(lo, out_lo, grain, leaf),
        || divide_and_conquer(hi, out_hi, grain, leaf),
    );
}

/// Writes `next[i] = stencil(previous[i-1], previous[i], previous[i+1])`
/// for every `i` in `range`.
///
/// # Panics
///
/// If a non-empty `range` touches index 0 or `previous.len() - 1`, or runs
/// past the end of `next`.
pub fn sweep(
    range: WorkRange,
    previous: &[f64],
    next: &mut [f64],
    factor: f64,
    grain: Granularity,
) {
    if range.is_empty() {
        return;
    }
    assert!(
        range.start >= 1 && range.end + 1 < previous.len(),
        "work range {range:?} must lie inside the interior of a {}-point field",
        previous.len()
    );

    let out = &mut next[range.start..=range.end];
    divide_and_conquer(range, out, grain, &|r: WorkRange, chunk: &mut [f64]| {
        let window = &previous[r.start - 1..=r.end + 1];
        for (slot, w) in chunk.iter_mut().zip(window.windows(3)) {
            *slot = stencil(w[0], w[1], w[2], factor);
        }
    });
}
