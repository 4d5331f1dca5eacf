//! Computation output. Derived fresh on every call and never persisted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::LawType;
use crate::domain::foundation::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBasis {
    SlabBased,
    Scheduled,
}

/// Paid/unpaid counts and totals for one committee or class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MeetingFeeSummary {
    pub paid: u32,
    pub unpaid: u32,
    pub fee_per_meeting: Money,
    pub total: Money,
}

/// Subtotals for event, periodic, and fixed fees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduledFeeSummary {
    pub attendance_marks: u64,
    pub event_total: Money,
    pub periodic_total: Money,
    pub fixed_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub basis: FeeBasis,
    pub law: LawType,
    pub committee: MeetingFeeSummary,
    /// Keyed by class name.
    pub classes: BTreeMap<String, MeetingFeeSummary>,
    pub class_total: Money,
    pub scheduled: ScheduledFeeSummary,
    pub total: Money,
    pub facilitator_fee: Money,
    pub warnings: Vec<String>,
}

impl FeeBreakdown {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn paid_meetings(&self) -> u32 {
        self.committee.paid + self.classes.values().map(|c| c.paid).sum::<u32>()
    }
}
