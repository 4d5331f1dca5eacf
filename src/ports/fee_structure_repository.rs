//! Fee structure repository port.
//!
//! One structure per (representative, class). Writes follow the versioned
//! write rules in `domain::foundation::repository`.

use crate::domain::fees::FeeStructure;
use crate::domain::foundation::VersionedRepository;

/// Repository port for fee structures.
///
/// Any `VersionedRepository<FeeStructure>` is a `FeeStructureRepository`,
/// so handlers can hold an `Arc<dyn FeeStructureRepository>` without each
/// adapter repeating the impl.
pub trait FeeStructureRepository: VersionedRepository<FeeStructure> {}

impl<R> FeeStructureRepository for R where R: VersionedRepository<FeeStructure> + ?Sized {}
