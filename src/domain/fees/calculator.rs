//! Fee Calculator - derives a fee breakdown from a structure and attendance.
//!
//! Pure and stateless: identical inputs always give identical output, and
//! callers may run it concurrently without coordination. The caller is
//! responsible for passing a structure and attendance record taken from
//! the same consistent snapshot.

use std::collections::BTreeMap;

use super::{
    assess_class_meetings, assess_committee_meetings, default_slab_table, AttendanceRecord,
    ComputeOptions, CreditorBand, EventTrigger, FeeBasis, FeeBreakdown, FeeError, FeeRegime,
    FeeStructure, MeetingAssessment, MeetingFeeSummary, ScheduledFeeSummary, ScheduledFees,
    ScheduledLaw, SlabConfig, SlabLaw, SlabRates,
};
use crate::domain::foundation::{Money, Percentage};

pub struct FeeCalculator;

impl FeeCalculator {
    /// Computes the fee breakdown.
    ///
    /// `band` overrides the band selected in the structure's slab config.
    /// It is ignored for non-slab laws.
    ///
    /// # Errors
    ///
    /// Only configuration errors: no band, a band missing from the table,
    /// an empty table, or amounts whose total overflows. Out-of-range
    /// amounts become warnings instead.
    pub fn compute(
        structure: &FeeStructure,
        attendance: &AttendanceRecord,
        band: Option<CreditorBand>,
        options: ComputeOptions,
    ) -> Result<FeeBreakdown, FeeError> {
        match &structure.regime {
            FeeRegime::SlabBased { law, slab } => {
                let rates = Self::slab_rates(*law, slab.as_ref(), band)?;
                Self::compute_slab_based(*law, rates, attendance, options)
            }
            FeeRegime::Scheduled { law, fees } => Self::compute_scheduled(*law, fees, attendance),
        }
    }

    /// Resolves the per-meeting rates a slab-based structure uses.
    pub fn resolve_rates(
        structure: &FeeStructure,
        band: Option<CreditorBand>,
    ) -> Result<SlabRates, FeeError> {
        match &structure.regime {
            FeeRegime::SlabBased { law, slab } => Self::slab_rates(*law, slab.as_ref(), band),
            FeeRegime::Scheduled { .. } => Err(FeeError::RegimeMismatch {
                law: structure.law_type(),
                operation: "resolving slab rates",
            }),
        }
    }

    /// 20% of the total, rounded to the nearest rupee.
    pub fn facilitator_fee(total: Money) -> Money {
        Percentage::FACILITATOR.of(total)
    }

    fn slab_rates(
        law: SlabLaw,
        slab: Option<&SlabConfig>,
        band: Option<CreditorBand>,
    ) -> Result<SlabRates, FeeError> {
        let table = slab.unwrap_or_else(|| default_slab_table(law));
        let band = band
            .or(table.selected_band)
            .ok_or(FeeError::MissingCreditorBand { law: law.into() })?;
        table.rates_for(law.into(), band)
    }

    fn compute_slab_based(
        law: SlabLaw,
        rates: SlabRates,
        attendance: &AttendanceRecord,
        options: ComputeOptions,
    ) -> Result<FeeBreakdown, FeeError> {
        if options.charge_per_ar {
            rates
                .committee
                .checked_times(2)
                .ok_or(FeeError::AmountOverflow { what: "doubled committee rate" })?;
        }

        let committee_assessments =
            assess_committee_meetings(&attendance.committee_meetings, rates.committee, options);
        let committee = summarize(&committee_assessments, rates.committee, "committee total")?;

        let mut classes: BTreeMap<String, MeetingFeeSummary> = BTreeMap::new();
        for class_name in attendance.class_names() {
            let assessments =
                assess_class_meetings(attendance.meetings_for_class(class_name), rates.class);
            classes.insert(
                class_name.to_string(),
                summarize(&assessments, rates.class, "class total")?,
            );
        }
        let class_total = Money::checked_sum(classes.values().map(|c| c.total))
            .ok_or(FeeError::AmountOverflow { what: "class total" })?;

        let total = committee
            .total
            .checked_add(class_total)
            .ok_or(FeeError::AmountOverflow { what: "fee total" })?;
        Ok(FeeBreakdown {
            basis: FeeBasis::SlabBased,
            law: law.into(),
            committee,
            classes,
            class_total,
            scheduled: ScheduledFeeSummary::default(),
            total,
            facilitator_fee: Self::facilitator_fee(total),
            warnings: Vec::new(),
        })
    }

    fn compute_scheduled(
        law: ScheduledLaw,
        fees: &ScheduledFees,
        attendance: &AttendanceRecord,
    ) -> Result<FeeBreakdown, FeeError> {
        let overflow = |what| FeeError::AmountOverflow { what };
        let attendance_marks = attendance.present_marks();
        let mut warnings = Vec::new();
        let mut event_amounts = Vec::with_capacity(fees.events.len());

        for line in &fees.events {
            if let Some(warning) = line.check(law.into()).into_warning() {
                warnings.push(warning.to_string());
            }

            event_amounts.push(match line.trigger {
                EventTrigger::AttendanceMarked => line
                    .amount
                    .checked_times(attendance_marks)
                    .ok_or(overflow("attendance fee"))?,
                _ => line.amount,
            });
        }

        let event_total = Money::checked_sum(event_amounts).ok_or(overflow("event total"))?;
        let periodic_total = Money::checked_sum(fees.periodic.iter().map(|p| p.amount))
            .ok_or(overflow("periodic total"))?;
        let fixed_total = fees.fixed.as_ref().map(|f| f.amount).unwrap_or(Money::ZERO);
        let total = Money::checked_sum([event_total, periodic_total, fixed_total])
            .ok_or(overflow("fee total"))?;

        Ok(FeeBreakdown {
            basis: FeeBasis::Scheduled,
            law: law.into(),
            committee: MeetingFeeSummary::default(),
            classes: BTreeMap::new(),
            class_total: Money::ZERO,
            scheduled: ScheduledFeeSummary {
                attendance_marks,
                event_total,
                periodic_total,
                fixed_total,
            },
            total,
            facilitator_fee: Self::facilitator_fee(total),
            warnings,
        })
    }
}

fn summarize(
    assessments: &[MeetingAssessment],
    fee_per_meeting: Money,
    what: &'static str,
) -> Result<MeetingFeeSummary, FeeError> {
    let paid = assessments.iter().filter(|a| a.payable).count() as u32;
    Ok(MeetingFeeSummary {
        paid,
        unpaid: assessments.len() as u32 - paid,
        fee_per_meeting,
        total: Money::checked_sum(assessments.iter().map(|a| a.fee))
            .ok_or(FeeError::AmountOverflow { what })?,
    })
}
