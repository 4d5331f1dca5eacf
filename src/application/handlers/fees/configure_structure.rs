//! ConfigureStructureHandler - Command handler for fee structure edits.
//!
//! Out-of-range event amounts are saved as entered; the handler returns
//! them as warnings so the editor can flag them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::fees::{
    CreditorBand, EventFeeLine, FeeError, FeeStructure, FixedFee, PeriodicFee, RangeWarning,
};
use crate::domain::foundation::{DomainError, ErrorCode, Money, RecordKey, RecordVersion};
use crate::ports::FeeStructureRepository;

/// One structure edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum StructureChange {
    /// Store a whole structure; the only change allowed on create.
    Replace { structure: FeeStructure },
    SelectBand { band: CreditorBand },
    AddEventLine { line: EventFeeLine },
    SetEventAmount { index: usize, amount: Money },
    RemoveEventLine { index: usize },
    AddPeriodicFee { fee: PeriodicFee },
    SetFixedFee { fee: Option<FixedFee> },
}

impl StructureChange {
    fn apply(&self, structure: &mut FeeStructure) -> Result<(), FeeError> {
        match self {
            StructureChange::Replace { structure: replacement } => {
                *structure = replacement.clone();
            }
            StructureChange::SelectBand { band } => structure.select_band(*band)?,
            StructureChange::AddEventLine { line } => {
                structure.add_event_line(line.clone())?;
            }
            StructureChange::SetEventAmount { index, amount } => {
                structure.set_event_amount(*index, *amount)?
            }
            StructureChange::RemoveEventLine { index } => {
                structure.remove_event_line(*index)?;
            }
            StructureChange::AddPeriodicFee { fee } => structure.add_periodic_fee(fee.clone())?,
            StructureChange::SetFixedFee { fee } => structure.set_fixed_fee(fee.clone())?,
        }
        Ok(())
    }
}

/// Command to configure the fee structure of one (representative, class).
#[derive(Debug, Clone)]
pub struct ConfigureStructureCommand {
    pub key: RecordKey,
    /// `None` creates the structure; otherwise the version last read.
    pub expected_version: Option<RecordVersion>,
    pub change: StructureChange,
}

#[derive(Debug, Clone)]
pub struct ConfigureStructureResult {
    pub structure: FeeStructure,
    pub version: RecordVersion,
    pub warnings: Vec<RangeWarning>,
}

/// Handler for fee structure edits.
pub struct ConfigureStructureHandler {
    repository: Arc<dyn FeeStructureRepository>,
}

impl ConfigureStructureHandler {
    pub fn new(repository: Arc<dyn FeeStructureRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: ConfigureStructureCommand,
    ) -> Result<ConfigureStructureResult, DomainError> {
        let structure = match (&cmd.change, cmd.expected_version) {
            (StructureChange::Replace { structure }, _) => structure.clone(),
            (_, None) => {
                return Err(DomainError::validation(
                    "change",
                    "A new fee structure must be created with a full structure",
                ))
            }
            (change, Some(_)) => {
                let stored = self.repository.find(&cmd.key).await?.ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::FeeStructureNotFound,
                        format!("No fee structure configured for {}", cmd.key),
                    )
                })?;
                let mut structure = stored.value;
                change.apply(&mut structure)?;
                structure
            }
        };

        if structure.key() != cmd.key {
            return Err(DomainError::validation(
                "structure",
                format!("Structure for {} submitted under {}", structure.key(), cmd.key),
            ));
        }

        let version = self.repository.save(&structure, cmd.expected_version).await?;
        let warnings = structure.range_warnings();

        for warning in &warnings {
            warn!(key = %cmd.key, trigger = %warning.trigger, amount = %warning.amount, "{}", warning);
        }
        info!(
            key = %cmd.key,
            law = %structure.law_type(),
            version = %version,
            "Fee structure saved"
        );

        Ok(ConfigureStructureResult {
            structure,
            version,
            warnings,
        })
    }
}
