use serde::{Deserialize, Serialize};

/// Dirichlet values pinned at both ends of the field every step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Boundary {
    pub left: f64,
    pub right: f64,
}

impl Boundary {
    pub const fn dirichlet(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Overwrites the first and last sample. Empty fields are left alone.
    pub fn apply(&self, field: &mut [f64]) {
        if let Some(first) = field.first_mut() {
            *first = self.left;
        }
        if let Some(last) = field.last_mut() {
            *last = self.right;
        }
    }
}
