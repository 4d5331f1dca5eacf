//! Law regimes under which an authorized representative is paid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every law type a fee structure can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LawType {
    /// Corporate Insolvency Resolution Process - fixed slab tables.
    Cirp,
    Liquidation,
    /// Securities regulator proceedings.
    Sebi,
    /// Generic insolvency proceedings.
    Insolvency,
}

impl LawType {
    pub const ALL: [LawType; 4] = [
        LawType::Cirp,
        LawType::Liquidation,
        LawType::Sebi,
        LawType::Insolvency,
    ];

    /// Returns true when fees come from per-band meeting tables.
    pub fn is_slab_based(&self) -> bool {
        matches!(self, LawType::Cirp)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LawType::Cirp => "CIRP",
            LawType::Liquidation => "Liquidation",
            LawType::Sebi => "SEBI",
            LawType::Insolvency => "Insolvency",
        }
    }
}

impl fmt::Display for LawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Law types whose AR fees are fixed per-meeting slab tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlabLaw {
    Cirp,
}

/// Law types whose AR fees are event, periodic, or fixed amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduledLaw {
    Liquidation,
    Sebi,
    Insolvency,
}

impl From<SlabLaw> for LawType {
    fn from(law: SlabLaw) -> Self {
        match law {
            SlabLaw::Cirp => LawType::Cirp,
        }
    }
}

impl From<ScheduledLaw> for LawType {
    fn from(law: ScheduledLaw) -> Self {
        match law {
            ScheduledLaw::Liquidation => LawType::Liquidation,
            ScheduledLaw::Sebi => LawType::Sebi,
            ScheduledLaw::Insolvency => LawType::Insolvency,
        }
    }
}

impl TryFrom<LawType> for SlabLaw {
    type Error = LawType;

    fn try_from(law: LawType) -> Result<Self, Self::Error> {
        match law {
            LawType::Cirp => Ok(SlabLaw::Cirp),
            other => Err(other),
        }
    }
}

impl TryFrom<LawType> for ScheduledLaw {
    type Error = LawType;

    fn try_from(law: LawType) -> Result<Self, Self::Error> {
        match law {
            LawType::Cirp => Err(law),
            LawType::Liquidation => Ok(ScheduledLaw::Liquidation),
            LawType::Sebi => Ok(ScheduledLaw::Sebi),
            LawType::Insolvency => Ok(ScheduledLaw::Insolvency),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_cirp_is_slab_based() {
        let slab: Vec<_> = LawType::ALL.iter().filter(|l| l.is_slab_based()).collect();
        assert_eq!(slab, vec![&LawType::Cirp]);
    }

    #[test]
    fn every_law_converts_to_exactly_one_regime_law() {
        for law in LawType::ALL {
            let slab = SlabLaw::try_from(law).is_ok();
            let scheduled = ScheduledLaw::try_from(law).is_ok();
            assert!(slab ^ scheduled, "{} must belong to exactly one regime", law);
            assert_eq!(slab, law.is_slab_based());
        }
    }

    #[test]
    fn regime_laws_round_trip() {
        assert_eq!(LawType::from(SlabLaw::Cirp), LawType::Cirp);
        assert_eq!(
            ScheduledLaw::try_from(LawType::from(ScheduledLaw::Sebi)),
            Ok(ScheduledLaw::Sebi)
        );
    }

    #[test]
    fn serializes_screaming_case() {
        assert_eq!(serde_json::to_string(&LawType::Cirp).unwrap(), "\"CIRP\"");
        let law: LawType = serde_json::from_str("\"LIQUIDATION\"").unwrap();
        assert_eq!(law, LawType::Liquidation);
    }

    #[test]
    fn display_names() {
        assert_eq!(LawType::Sebi.to_string(), "SEBI");
        assert_eq!(LawType::Insolvency.to_string(), "Insolvency");
    }
}
