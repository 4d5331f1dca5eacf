//! Fees Module - Authorized-representative fee computation.
//!
//! # Components
//!
//! - `law` / `slab` / `legal_range` - Static law tables (slab rates, legal ranges)
//! - `structure` - Fee structure per (representative, class)
//! - `attendance` - Committee and class meeting attendance
//! - `evaluator` - Paid-meeting cap and per-meeting assessment
//! - `calculator` - Full breakdown computation
//!
//! # Design Philosophy
//!
//! Everything here is pure and synchronous. Persistence, logging, and
//! concurrency control live in the ports, adapters, and application layer.

mod attendance;
mod breakdown;
mod calculator;
mod errors;
mod evaluator;
mod law;
mod legal_range;
mod options;
mod slab;
mod structure;

pub use attendance::{
    AttendanceRecord, AttendanceStatus, ClassMeeting, ClassMeetingGroup, CommitteeMeeting, Seat,
};
pub use breakdown::{FeeBasis, FeeBreakdown, MeetingFeeSummary, ScheduledFeeSummary};
pub use calculator::FeeCalculator;
pub use errors::FeeError;
pub use evaluator::{
    annotate, assess_class_meeting, assess_class_meetings, assess_committee_meeting,
    assess_committee_meetings, committee_meeting_fee, MeetingAssessment, MeetingCap,
    PAID_MEETING_CAP,
};
pub use law::{LawType, ScheduledLaw, SlabLaw};
pub use legal_range::{
    check_amount, statutory_range, validate_amount, LegalRange, RangeCheck, RangeWarning,
};
pub use options::ComputeOptions;
pub use slab::{default_slab_table, CreditorBand, SlabConfig, SlabRates};
pub use structure::{
    EventFeeLine, EventTrigger, FeeRegime, FeeStructure, FixedFee, PeriodicFee, Recurrence,
    ScheduledFees, StructureMode,
};
