//! Meeting attendance kept per (representative, class).
//!
//! Entries come from a flexible external editor, so every status is
//! optional and anything that is not an explicit `Present` counts as
//! absent. The `payable`/`fee` annotations are derived output; nothing
//! in this crate reads them back as input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FeeError;
use crate::domain::foundation::{
    class_key, ClassName, ErrorCode, Keyed, Money, RecordKey, RepresentativeId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "N/A")]
    NotApplicable,
    /// Any other label the editor produced, including "". Never present.
    #[serde(other)]
    Unknown,
}

fn is_present(status: Option<AttendanceStatus>) -> bool {
    status == Some(AttendanceStatus::Present)
}

/// One of the two committee seats a representative class may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    First,
    Second,
}

/// A Committee of Creditors meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeMeeting {
    pub sequence: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub first_seat: Option<AttendanceStatus>,
    #[serde(default)]
    pub second_seat: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Money>,
}

impl CommitteeMeeting {
    pub fn new(sequence: u32, date: Option<NaiveDate>) -> Self {
        Self {
            sequence,
            date,
            first_seat: None,
            second_seat: None,
            payable: None,
            fee: None,
        }
    }

    pub fn with_seats(
        mut self,
        first: Option<AttendanceStatus>,
        second: Option<AttendanceStatus>,
    ) -> Self {
        self.first_seat = first;
        self.second_seat = second;
        self
    }

    /// Eligible for payment: at least one seat present.
    pub fn is_present(&self) -> bool {
        is_present(self.first_seat) || is_present(self.second_seat)
    }

    pub fn both_present(&self) -> bool {
        is_present(self.first_seat) && is_present(self.second_seat)
    }

    /// Number of seats marked present (0..=2).
    pub fn present_marks(&self) -> u64 {
        u64::from(is_present(self.first_seat)) + u64::from(is_present(self.second_seat))
    }

    fn seat_mut(&mut self, seat: Seat) -> &mut Option<AttendanceStatus> {
        match seat {
            Seat::First => &mut self.first_seat,
            Seat::Second => &mut self.second_seat,
        }
    }
}

/// A meeting of one creditor class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMeeting {
    pub sequence: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<AttendanceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Money>,
}

impl ClassMeeting {
    pub fn new(sequence: u32, date: Option<NaiveDate>) -> Self {
        Self {
            sequence,
            date,
            status: None,
            payable: None,
            fee: None,
        }
    }

    pub fn with_status(mut self, status: Option<AttendanceStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn is_present(&self) -> bool {
        is_present(self.status)
    }
}

/// Class meetings attended under one (representative name, class) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMeetingGroup {
    pub representative_name: String,
    pub class_name: String,
    #[serde(default)]
    pub meetings: Vec<ClassMeeting>,
}

impl ClassMeetingGroup {
    pub fn new(representative_name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            representative_name: representative_name.into(),
            class_name: class_name.into(),
            meetings: Vec::new(),
        }
    }

    /// Case-folded class name used for grouping and per-class caps.
    pub fn class_key(&self) -> String {
        class_key(&self.class_name)
    }

    pub fn is_class(&self, class_name: &str) -> bool {
        self.class_key() == class_key(class_name)
    }

    fn matches(&self, representative_name: &str, class_name: &str) -> bool {
        self.representative_name.trim() == representative_name.trim() && self.is_class(class_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub representative_id: RepresentativeId,
    pub class_name: ClassName,
    #[serde(default)]
    pub committee_meetings: Vec<CommitteeMeeting>,
    #[serde(default)]
    pub class_meetings: Vec<ClassMeetingGroup>,
}

impl AttendanceRecord {
    pub fn new(representative_id: RepresentativeId, class_name: ClassName) -> Self {
        Self {
            representative_id,
            class_name,
            committee_meetings: Vec::new(),
            class_meetings: Vec::new(),
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.representative_id, self.class_name.clone())
    }

    /// Present marks across every committee seat and class meeting.
    pub fn present_marks(&self) -> u64 {
        let committee: u64 = self.committee_meetings.iter().map(|m| m.present_marks()).sum();
        let class = self
            .class_meetings
            .iter()
            .flat_map(|g| g.meetings.iter())
            .filter(|m| m.is_present())
            .count() as u64;
        committee + class
    }

    /// Distinct classes in first-appearance order, spelled as first seen.
    ///
    /// Names differing only in case or surrounding space are one class.
    pub fn class_names(&self) -> Vec<&str> {
        let mut keys: Vec<String> = Vec::new();
        let mut names: Vec<&str> = Vec::new();
        for group in &self.class_meetings {
            let key = group.class_key();
            if !keys.contains(&key) {
                keys.push(key);
                names.push(group.class_name.trim());
            }
        }
        names
    }

    /// Every meeting held by `class_name`, in group order then list order.
    pub fn meetings_for_class<'a>(&'a self, class_name: &str) -> impl Iterator<Item = &'a ClassMeeting> + 'a {
        let key = class_key(class_name);
        self.class_meetings
            .iter()
            .filter(move |g| g.class_key() == key)
            .flat_map(|g| g.meetings.iter())
    }

    /// Appends a committee meeting and returns its sequence number.
    pub fn add_committee_meeting(&mut self, date: Option<NaiveDate>) -> u32 {
        let sequence = next_sequence(self.committee_meetings.iter().map(|m| m.sequence));
        self.committee_meetings.push(CommitteeMeeting::new(sequence, date));
        sequence
    }

    /// Removes a committee meeting and re-sequences the rest from 1.
    pub fn remove_committee_meeting(&mut self, sequence: u32) -> Result<CommitteeMeeting, FeeError> {
        let position = self
            .committee_meetings
            .iter()
            .position(|m| m.sequence == sequence)
            .ok_or(FeeError::CommitteeMeetingNotFound(sequence))?;
        let removed = self.committee_meetings.remove(position);
        for (i, meeting) in self.committee_meetings.iter_mut().enumerate() {
            meeting.sequence = i as u32 + 1;
        }
        Ok(removed)
    }

    pub fn mark_committee_seat(
        &mut self,
        sequence: u32,
        seat: Seat,
        status: Option<AttendanceStatus>,
    ) -> Result<(), FeeError> {
        let meeting = self
            .committee_meetings
            .iter_mut()
            .find(|m| m.sequence == sequence)
            .ok_or(FeeError::CommitteeMeetingNotFound(sequence))?;
        *meeting.seat_mut(seat) = status;
        Ok(())
    }

    /// Appends a class meeting, creating the group on first use.
    pub fn add_class_meeting(
        &mut self,
        representative_name: &str,
        class_name: &str,
        date: Option<NaiveDate>,
    ) -> u32 {
        let index = match self
            .class_meetings
            .iter()
            .position(|g| g.matches(representative_name, class_name))
        {
            Some(index) => index,
            None => {
                self.class_meetings.push(ClassMeetingGroup::new(
                    representative_name.trim(),
                    class_name.trim(),
                ));
                self.class_meetings.len() - 1
            }
        };

        let group = &mut self.class_meetings[index];
        let sequence = next_sequence(group.meetings.iter().map(|m| m.sequence));
        group.meetings.push(ClassMeeting::new(sequence, date));
        sequence
    }

    pub fn mark_class_meeting(
        &mut self,
        representative_name: &str,
        class_name: &str,
        sequence: u32,
        status: Option<AttendanceStatus>,
    ) -> Result<(), FeeError> {
        let meeting = self
            .class_group_mut(representative_name, class_name)
            .and_then(|g| g.meetings.iter_mut().find(|m| m.sequence == sequence))
            .ok_or_else(|| class_meeting_not_found(representative_name, class_name, sequence))?;
        meeting.status = status;
        Ok(())
    }

    /// Removes a class meeting and re-sequences the rest of its group.
    pub fn remove_class_meeting(
        &mut self,
        representative_name: &str,
        class_name: &str,
        sequence: u32,
    ) -> Result<ClassMeeting, FeeError> {
        let group = self
            .class_group_mut(representative_name, class_name)
            .ok_or_else(|| class_meeting_not_found(representative_name, class_name, sequence))?;
        let position = group
            .meetings
            .iter()
            .position(|m| m.sequence == sequence)
            .ok_or_else(|| class_meeting_not_found(representative_name, class_name, sequence))?;
        let removed = group.meetings.remove(position);
        for (i, meeting) in group.meetings.iter_mut().enumerate() {
            meeting.sequence = i as u32 + 1;
        }
        Ok(removed)
    }

    fn class_group_mut(
        &mut self,
        representative_name: &str,
        class_name: &str,
    ) -> Option<&mut ClassMeetingGroup> {
        self.class_meetings
            .iter_mut()
            .find(|g| g.matches(representative_name, class_name))
    }
}

impl Keyed for AttendanceRecord {
    const KIND: &'static str = "attendance";
    const NOT_FOUND: ErrorCode = ErrorCode::AttendanceRecordNotFound;

    fn record_key(&self) -> RecordKey {
        self.key()
    }
}

fn next_sequence(existing: impl Iterator<Item = u32>) -> u32 {
    existing.max().unwrap_or(0) + 1
}

fn class_meeting_not_found(representative_name: &str, class_name: &str, sequence: u32) -> FeeError {
    FeeError::ClassMeetingNotFound {
        representative_name: representative_name.trim().to_string(),
        class_name: class_name.trim().to_string(),
        sequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttendanceStatus::*;

    fn record() -> AttendanceRecord {
        AttendanceRecord::new(RepresentativeId::new(), ClassName::new("Home Buyers").unwrap())
    }

    #[test]
    fn committee_presence_needs_one_present_seat() {
        let m = CommitteeMeeting::new(1, None);
        assert!(!m.clone().with_seats(None, None).is_present());
        assert!(!m.clone().with_seats(Some(Absent), Some(NotApplicable)).is_present());
        assert!(m.clone().with_seats(Some(Absent), Some(Present)).is_present());
        assert!(m.clone().with_seats(Some(Present), None).is_present());
        assert!(m.with_seats(Some(Present), Some(Present)).both_present());
    }

    #[test]
    fn present_marks_count_both_seats_and_class_meetings() {
        let mut rec = record();
        rec.committee_meetings = vec![
            CommitteeMeeting::new(1, None).with_seats(Some(Present), Some(Present)),
            CommitteeMeeting::new(2, None).with_seats(Some(Absent), Some(Present)),
        ];
        rec.add_class_meeting("A. Rao", "Home Buyers", None);
        rec.mark_class_meeting("A. Rao", "Home Buyers", 1, Some(Present)).unwrap();
        rec.add_class_meeting("A. Rao", "Home Buyers", None);

        assert_eq!(rec.present_marks(), 4);
    }

    #[test]
    fn add_and_remove_committee_meetings_resequence() {
        let mut rec = record();
        assert_eq!(rec.add_committee_meeting(None), 1);
        assert_eq!(rec.add_committee_meeting(None), 2);
        assert_eq!(rec.add_committee_meeting(None), 3);

        rec.remove_committee_meeting(2).unwrap();

        let sequences: Vec<u32> = rec.committee_meetings.iter().map(|m| m.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert_eq!(rec.add_committee_meeting(None), 3);
    }

    #[test]
    fn marking_unknown_committee_meeting_fails() {
        let mut rec = record();
        assert!(matches!(
            rec.mark_committee_seat(4, Seat::First, Some(Present)),
            Err(FeeError::CommitteeMeetingNotFound(4))
        ));
    }

    #[test]
    fn mark_committee_seat_updates_only_that_seat() {
        let mut rec = record();
        let seq = rec.add_committee_meeting(NaiveDate::from_ymd_opt(2024, 3, 1));
        rec.mark_committee_seat(seq, Seat::Second, Some(Present)).unwrap();

        let meeting = &rec.committee_meetings[0];
        assert_eq!(meeting.first_seat, None);
        assert_eq!(meeting.second_seat, Some(Present));
    }

    #[test]
    fn class_groups_are_created_per_representative_and_class() {
        let mut rec = record();
        rec.add_class_meeting("A. Rao", "Home Buyers", None);
        rec.add_class_meeting("A. Rao", " Home Buyers ", None);
        rec.add_class_meeting("B. Shah", "Home Buyers", None);
        rec.add_class_meeting("A. Rao", "Workmen", None);

        assert_eq!(rec.class_meetings.len(), 3);
        assert_eq!(rec.class_meetings[0].meetings.len(), 2);
        assert_eq!(rec.class_names(), vec!["Home Buyers", "Workmen"]);
        assert_eq!(rec.meetings_for_class("Home Buyers").count(), 3);
    }

    #[test]
    fn class_groups_differing_in_case_form_one_class() {
        let mut rec = record();
        rec.add_class_meeting("A. Rao", "Home Buyers", None);
        rec.add_class_meeting("A. Rao", "home buyers", None);
        rec.add_class_meeting("B. Shah", "HOME BUYERS ", None);

        assert_eq!(rec.class_meetings.len(), 2);
        assert_eq!(rec.class_meetings[0].meetings.len(), 2);
        assert_eq!(rec.class_names(), vec!["Home Buyers"]);
        assert_eq!(rec.meetings_for_class("home BUYERS").count(), 3);
        rec.mark_class_meeting("A. Rao", "HOME buyers", 2, Some(Present)).unwrap();
        assert!(rec.class_meetings[0].meetings[1].is_present());
    }

    #[test]
    fn remove_class_meeting_resequences_group() {
        let mut rec = record();
        for _ in 0..3 {
            rec.add_class_meeting("A. Rao", "Workmen", None);
        }
        rec.remove_class_meeting("A. Rao", "Workmen", 1).unwrap();

        let sequences: Vec<u32> = rec.class_meetings[0].meetings.iter().map(|m| m.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert!(matches!(
            rec.remove_class_meeting("Nobody", "Workmen", 1),
            Err(FeeError::ClassMeetingNotFound { .. })
        ));
    }

    #[test]
    fn deserializes_sparse_editor_output() {
        let json = serde_json::json!({
            "representative_id": RepresentativeId::new(),
            "class_name": "Home Buyers",
            "committee_meetings": [
                { "sequence": 1, "date": "2024-01-15", "first_seat": "Present", "second_seat": "N/A" },
                { "sequence": 2 }
            ],
            "class_meetings": [
                { "representative_name": "A. Rao", "class_name": "Home Buyers",
                  "meetings": [{ "sequence": 1, "status": "Absent" }] }
            ]
        });

        let rec: AttendanceRecord = serde_json::from_value(json).unwrap();
        assert!(rec.committee_meetings[0].is_present());
        assert_eq!(rec.committee_meetings[0].second_seat, Some(NotApplicable));
        assert!(!rec.committee_meetings[1].is_present());
        assert!(!rec.class_meetings[0].meetings[0].is_present());
    }

    #[test]
    fn unrecognized_statuses_read_as_not_present() {
        let json = serde_json::json!({
            "representative_id": RepresentativeId::new(),
            "class_name": "Home Buyers",
            "committee_meetings": [
                { "sequence": 1, "first_seat": "Late", "second_seat": "" },
                { "sequence": 2, "first_seat": "present", "second_seat": "Present" }
            ],
            "class_meetings": [
                { "representative_name": "A. Rao", "class_name": "Home Buyers",
                  "meetings": [{ "sequence": 1, "status": "Excused" }] }
            ]
        });

        let rec: AttendanceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(rec.committee_meetings[0].first_seat, Some(Unknown));
        assert_eq!(rec.committee_meetings[0].second_seat, Some(Unknown));
        assert!(!rec.committee_meetings[0].is_present());
        assert_eq!(rec.committee_meetings[1].present_marks(), 1);
        assert!(!rec.class_meetings[0].meetings[0].is_present());
        assert_eq!(rec.present_marks(), 1);
    }
}
