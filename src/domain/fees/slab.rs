//! Creditor bands and per-meeting slab tables.
//!
//! # Default CIRP Table
//!
//! | Band | Committee meeting | Class meeting |
//! |------|-------------------|---------------|
//! | 10-100 | ₹30,000 | ₹10,000 |
//! | 101-1000 | ₹40,000 | ₹12,000 |
//! | 1000+ | ₹50,000 | ₹15,000 |

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::{FeeError, LawType, SlabLaw};
use crate::domain::foundation::Money;

/// Band of creditor counts in a class, selecting the applicable rates.
///
/// Serialized as its label ("10-100", "101-1000", "1000+"). Parsing, from
/// text or from serialized input, also accepts an en or em dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CreditorBand {
    UpTo100,
    UpTo1000,
    Above1000,
}

impl CreditorBand {
    pub const ALL: [CreditorBand; 3] = [
        CreditorBand::UpTo100,
        CreditorBand::UpTo1000,
        CreditorBand::Above1000,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CreditorBand::UpTo100 => "10-100",
            CreditorBand::UpTo1000 => "101-1000",
            CreditorBand::Above1000 => "1000+",
        }
    }
}

impl fmt::Display for CreditorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CreditorBand {
    type Err = FeeError;

    /// Accepts the canonical labels with either a hyphen or an en/em dash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '–' || c == '—' { '-' } else { c })
            .collect();

        CreditorBand::ALL
            .into_iter()
            .find(|band| band.label() == normalized)
            .ok_or_else(|| FeeError::UnknownCreditorBand(s.to_string()))
    }
}

impl TryFrom<String> for CreditorBand {
    type Error = FeeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CreditorBand> for String {
    fn from(band: CreditorBand) -> Self {
        band.label().to_string()
    }
}

/// Per-meeting rates resolved for one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabRates {
    pub committee: Money,
    pub class: Money,
}

/// Rate tables for a slab-based fee structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabConfig {
    pub committee_rates: BTreeMap<CreditorBand, Money>,
    pub class_rates: BTreeMap<CreditorBand, Money>,
    #[serde(default)]
    pub selected_band: Option<CreditorBand>,
}

impl SlabConfig {
    /// Builds a config from `(band, committee rate, class rate)` rows.
    pub fn from_rows(rows: &[(CreditorBand, Money, Money)]) -> Self {
        Self {
            committee_rates: rows.iter().map(|(band, coc, _)| (*band, *coc)).collect(),
            class_rates: rows.iter().map(|(band, _, class)| (*band, *class)).collect(),
            selected_band: None,
        }
    }

    pub fn with_selected_band(mut self, band: CreditorBand) -> Self {
        self.selected_band = Some(band);
        self
    }

    /// Looks up both rates for `band`.
    ///
    /// # Errors
    ///
    /// - `MissingSlabTable` if either table is empty
    /// - `UnknownCreditorBand` if the band has no row in either table
    pub fn rates_for(&self, law: LawType, band: CreditorBand) -> Result<SlabRates, FeeError> {
        if self.committee_rates.is_empty() || self.class_rates.is_empty() {
            return Err(FeeError::MissingSlabTable { law });
        }

        let committee = self.committee_rates.get(&band);
        let class = self.class_rates.get(&band);
        match (committee, class) {
            (Some(committee), Some(class)) => Ok(SlabRates {
                committee: *committee,
                class: *class,
            }),
            _ => Err(FeeError::UnknownCreditorBand(band.label().to_string())),
        }
    }
}

static CIRP_DEFAULT_TABLE: Lazy<SlabConfig> = Lazy::new(|| {
    SlabConfig::from_rows(&[
        (CreditorBand::UpTo100, Money::rupees(30_000), Money::rupees(10_000)),
        (CreditorBand::UpTo1000, Money::rupees(40_000), Money::rupees(12_000)),
        (CreditorBand::Above1000, Money::rupees(50_000), Money::rupees(15_000)),
    ])
});

/// The statutory table used when a structure carries no slab config.
pub fn default_slab_table(law: SlabLaw) -> &'static SlabConfig {
    match law {
        SlabLaw::Cirp => &CIRP_DEFAULT_TABLE,
    }
}
