//! Meeting eligibility and the paid-meeting cap.
//!
//! `MeetingCap` is the only implementation of the "first two eligible
//! meetings are paid" rule. The batch calculator and the per-row
//! evaluators used for live annotations both walk meetings through it,
//! so a single row is always assessed exactly as the full computation
//! would assess it.

use serde::{Deserialize, Serialize};

use super::{AttendanceRecord, ClassMeeting, CommitteeMeeting, ComputeOptions, SlabRates};
use crate::domain::foundation::Money;

/// Maximum number of paid meetings per committee and per class.
pub const PAID_MEETING_CAP: u32 = 2;

/// Tracks paid slots for one committee or one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeetingCap {
    paid: u32,
}

impl MeetingCap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a paid slot for an eligible meeting.
    ///
    /// Returns whether the meeting is payable.
    pub fn admit(&mut self, eligible: bool) -> bool {
        if eligible && self.paid < PAID_MEETING_CAP {
            self.paid += 1;
            true
        } else {
            false
        }
    }

    pub fn paid(&self) -> u32 {
        self.paid
    }

    pub fn is_exhausted(&self) -> bool {
        self.paid >= PAID_MEETING_CAP
    }
}

/// Result of evaluating one meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingAssessment {
    pub eligible: bool,
    pub payable: bool,
    pub fee: Money,
}

impl MeetingAssessment {
    fn unpaid(eligible: bool) -> Self {
        Self {
            eligible,
            payable: false,
            fee: Money::ZERO,
        }
    }
}

/// Fee a payable committee meeting earns.
///
/// `FeeCalculator` rejects a rate too large to double before this runs.
pub fn committee_meeting_fee(meeting: &CommitteeMeeting, rate: Money, options: ComputeOptions) -> Money {
    if options.charge_per_ar && meeting.both_present() {
        rate.saturating_times(2)
    } else {
        rate
    }
}

/// Assesses committee meetings in list order.
pub fn assess_committee_meetings(
    meetings: &[CommitteeMeeting],
    rate: Money,
    options: ComputeOptions,
) -> Vec<MeetingAssessment> {
    let mut cap = MeetingCap::new();
    meetings
        .iter()
        .map(|meeting| {
            let eligible = meeting.is_present();
            if cap.admit(eligible) {
                MeetingAssessment {
                    eligible,
                    payable: true,
                    fee: committee_meeting_fee(meeting, rate, options),
                }
            } else {
                MeetingAssessment::unpaid(eligible)
            }
        })
        .collect()
}

/// Assesses the committee meeting at `position`, honouring the meetings before it.
pub fn assess_committee_meeting(
    meetings: &[CommitteeMeeting],
    position: usize,
    rate: Money,
    options: ComputeOptions,
) -> Option<MeetingAssessment> {
    if position >= meetings.len() {
        return None;
    }
    assess_committee_meetings(&meetings[..=position], rate, options)
        .last()
        .copied()
}

/// Assesses the meetings of a single class in order.
pub fn assess_class_meetings<'a>(
    meetings: impl IntoIterator<Item = &'a ClassMeeting>,
    rate: Money,
) -> Vec<MeetingAssessment> {
    let mut cap = MeetingCap::new();
    meetings
        .into_iter()
        .map(|meeting| {
            let eligible = meeting.is_present();
            if cap.admit(eligible) {
                MeetingAssessment {
                    eligible,
                    payable: true,
                    fee: rate,
                }
            } else {
                MeetingAssessment::unpaid(eligible)
            }
        })
        .collect()
}

/// Assesses one class meeting, addressed by group index and position in
/// that group.
///
/// Earlier groups carrying the same class name share its cap.
pub fn assess_class_meeting(
    record: &AttendanceRecord,
    group: usize,
    position: usize,
    rate: Money,
) -> Option<MeetingAssessment> {
    let target = record.class_meetings.get(group)?;
    if position >= target.meetings.len() {
        return None;
    }

    let preceding = record
        .class_meetings
        .iter()
        .take(group)
        .filter(|g| g.class_key() == target.class_key())
        .flat_map(|g| g.meetings.iter());
    let upto = target.meetings.iter().take(position + 1);

    assess_class_meetings(preceding.chain(upto), rate).last().copied()
}

/// Writes `payable`/`fee` onto every meeting of `record`, replacing
/// whatever was stored.
pub fn annotate(record: &mut AttendanceRecord, rates: SlabRates, options: ComputeOptions) {
    let committee = assess_committee_meetings(&record.committee_meetings, rates.committee, options);
    for (meeting, assessment) in record.committee_meetings.iter_mut().zip(committee) {
        meeting.payable = Some(assessment.payable);
        meeting.fee = Some(assessment.fee);
    }

    let class_names: Vec<String> = record.class_names().into_iter().map(str::to_string).collect();
    for class_name in class_names {
        let assessments = assess_class_meetings(record.meetings_for_class(&class_name), rates.class);
        let meetings = record
            .class_meetings
            .iter_mut()
            .filter(|g| g.is_class(&class_name))
            .flat_map(|g| g.meetings.iter_mut());
        for (meeting, assessment) in meetings.zip(assessments) {
            meeting.payable = Some(assessment.payable);
            meeting.fee = Some(assessment.fee);
        }
    }
}
