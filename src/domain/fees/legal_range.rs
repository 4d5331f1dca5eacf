//! Legally permitted ranges for event-based AR fees.
//!
//! # Statutory Ranges (inclusive)
//!
//! | Law | Meeting Created | Attendance Marked | Approval Granted | Resolution Passed |
//! |-----|-----------------|-------------------|------------------|-------------------|
//! | Liquidation | 10,000-25,000 | 5,000-30,000 | 10,000-50,000 | 15,000-75,000 |
//! | SEBI | 15,000-40,000 | 10,000-35,000 | 20,000-60,000 | - |
//! | Insolvency | 5,000-20,000 | 5,000-25,000 | - | 10,000-50,000 |
//!
//! CIRP has fixed slab tables instead, so it never produces a range warning.
//! A pair with no entry is unconstrained.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::{EventTrigger, LawType, ScheduledLaw};
use crate::domain::foundation::{Money, ValidationError};

/// Inclusive minimum/maximum for an entered amount.
///
/// Deserialization goes through `LegalRange::new`, so `min <= max` holds
/// for ranges read from snapshots and commands too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct LegalRange {
    pub min: Money,
    pub max: Money,
}

#[derive(Deserialize)]
struct RangeBounds {
    min: Money,
    max: Money,
}

impl TryFrom<RangeBounds> for LegalRange {
    type Error = ValidationError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.min, bounds.max)
    }
}

impl LegalRange {
    pub fn new(min: Money, max: Money) -> Result<Self, ValidationError> {
        if min > max {
            return Err(ValidationError::invalid_format(
                "legal_range",
                format!("minimum {} exceeds maximum {}", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, amount: Money) -> bool {
        self.min <= amount && amount <= self.max
    }
}

impl fmt::Display for LegalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.min, self.max)
    }
}

/// An entered amount that falls outside its legal range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeWarning {
    pub trigger: EventTrigger,
    pub amount: Money,
    pub range: LegalRange,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = if self.amount < self.range.min {
            "below"
        } else {
            "above"
        };
        write!(
            f,
            "{} fee of {} is {} the permitted range {}",
            self.trigger, self.amount, side, self.range
        )
    }
}

/// Outcome of checking one amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeCheck {
    Valid,
    OutOfRange(RangeWarning),
}

impl RangeCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, RangeCheck::Valid)
    }

    pub fn warning(&self) -> Option<&RangeWarning> {
        match self {
            RangeCheck::Valid => None,
            RangeCheck::OutOfRange(warning) => Some(warning),
        }
    }

    pub fn into_warning(self) -> Option<RangeWarning> {
        match self {
            RangeCheck::Valid => None,
            RangeCheck::OutOfRange(warning) => Some(warning),
        }
    }
}

fn range(min: u64, max: u64) -> LegalRange {
    LegalRange {
        min: Money::rupees(min),
        max: Money::rupees(max),
    }
}

static STATUTORY_RANGES: Lazy<HashMap<(ScheduledLaw, EventTrigger), LegalRange>> = Lazy::new(|| {
    use EventTrigger::*;
    use ScheduledLaw::*;

    HashMap::from([
        ((Liquidation, MeetingCreated), range(10_000, 25_000)),
        ((Liquidation, AttendanceMarked), range(5_000, 30_000)),
        ((Liquidation, ApprovalGranted), range(10_000, 50_000)),
        ((Liquidation, ResolutionPassed), range(15_000, 75_000)),
        ((Sebi, MeetingCreated), range(15_000, 40_000)),
        ((Sebi, AttendanceMarked), range(10_000, 35_000)),
        ((Sebi, ApprovalGranted), range(20_000, 60_000)),
        ((Insolvency, MeetingCreated), range(5_000, 20_000)),
        ((Insolvency, AttendanceMarked), range(5_000, 25_000)),
        ((Insolvency, ResolutionPassed), range(10_000, 50_000)),
    ])
});

/// Returns the statutory range for a law and trigger, if one is configured.
pub fn statutory_range(law: LawType, trigger: EventTrigger) -> Option<LegalRange> {
    let law = ScheduledLaw::try_from(law).ok()?;
    STATUTORY_RANGES.get(&(law, trigger)).copied()
}

/// Checks `amount` against an explicit range; `None` means unconstrained.
pub fn check_amount(range: Option<LegalRange>, trigger: EventTrigger, amount: Money) -> RangeCheck {
    match range {
        Some(range) if !range.contains(amount) => RangeCheck::OutOfRange(RangeWarning {
            trigger,
            amount,
            range,
        }),
        _ => RangeCheck::Valid,
    }
}

/// Checks `amount` against the statutory range for `law` and `trigger`.
pub fn validate_amount(law: LawType, trigger: EventTrigger, amount: Money) -> RangeCheck {
    if law.is_slab_based() {
        return RangeCheck::Valid;
    }
    check_amount(statutory_range(law, trigger), trigger, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cirp_always_validates() {
        for trigger in EventTrigger::ALL {
            assert!(validate_amount(LawType::Cirp, trigger, Money::rupees(1)).is_valid());
            assert!(statutory_range(LawType::Cirp, trigger).is_none());
        }
    }

    #[test]
    fn missing_range_is_unconstrained() {
        assert!(statutory_range(LawType::Sebi, EventTrigger::ResolutionPassed).is_none());
        assert!(
            validate_amount(LawType::Sebi, EventTrigger::ResolutionPassed, Money::rupees(1))
                .is_valid()
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let law = LawType::Liquidation;
        let trigger = EventTrigger::AttendanceMarked;
        assert!(validate_amount(law, trigger, Money::rupees(5_000)).is_valid());
        assert!(validate_amount(law, trigger, Money::rupees(30_000)).is_valid());
        assert!(!validate_amount(law, trigger, Money::rupees(4_999)).is_valid());
        assert!(!validate_amount(law, trigger, Money::rupees(30_001)).is_valid());
    }

    #[test]
    fn below_minimum_warning_names_trigger_amount_and_bounds() {
        let check = validate_amount(
            LawType::Liquidation,
            EventTrigger::AttendanceMarked,
            Money::rupees(2_000),
        );
        let warning = check.warning().expect("expected a warning").to_string();
        assert_eq!(
            warning,
            "Attendance Marked fee of ₹2,000 is below the permitted range ₹5,000–₹30,000"
        );
    }

    #[test]
    fn above_maximum_warning_says_above() {
        let check = check_amount(
            Some(range(1_000, 2_000)),
            EventTrigger::ApprovalGranted,
            Money::rupees(2_500),
        );
        assert!(check.warning().unwrap().to_string().contains("above"));
    }

    #[test]
    fn legal_range_new_rejects_inverted_bounds() {
        assert!(LegalRange::new(Money::rupees(10), Money::rupees(5)).is_err());
        assert!(LegalRange::new(Money::rupees(5), Money::rupees(5)).is_ok());
    }

    #[test]
    fn deserialization_rejects_inverted_bounds() {
        let inverted = serde_json::json!({ "min": 25_000, "max": 5_000 });
        let err = serde_json::from_value::<LegalRange>(inverted).unwrap_err();
        assert!(err.to_string().contains("exceeds maximum"));

        let range: LegalRange =
            serde_json::from_value(serde_json::json!({ "min": 5_000, "max": 25_000 })).unwrap();
        assert_eq!(range, LegalRange::new(Money::rupees(5_000), Money::rupees(25_000)).unwrap());
    }
}
