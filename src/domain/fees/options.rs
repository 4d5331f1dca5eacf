//! Options recognised by the fee computation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComputeOptions {
    /// Double a paid committee meeting's fee when both seats attended.
    #[serde(rename = "chargePerAR", default)]
    pub charge_per_ar: bool,
}

impl ComputeOptions {
    pub fn charge_per_ar() -> Self {
        Self {
            charge_per_ar: true,
        }
    }
}
