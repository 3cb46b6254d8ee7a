//! Component H: the record ingestion shim.
//!
//! Decoding the game's binary entity-record format is an external
//! collaborator's job (see SPEC_FULL.md); this crate only owns reading a
//! directory (or a pre-read set of byte buffers), handing each file's
//! bytes to a `RecordDecoder`, and enforcing the cohort-size boundary
//! before the core ever sees the records.

use seed_core::EntityRecord;
use std::path::Path;

/// The seam between this crate and whatever decodes the game's binary
/// entity-record format. The core never implements this itself.
pub trait RecordDecoder {
    /// Decode one file's (or buffer's) bytes into an entity record, or
    /// `None` if the bytes aren't a valid record. A `None` is not an
    /// error: the caller silently skips it.
    fn decode(&self, bytes: &[u8]) -> Option<EntityRecord>;
}

#[derive(Debug)]
pub enum IngestError {
    Io(std::io::Error),
    InsufficientInput { found: usize },
    ExcessInput { found: usize },
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            IngestError::Io(err) => write!(f, "i/o error reading records: {err}"),
            IngestError::InsufficientInput { found } => {
                write!(f, "cohort too small: found {found} record(s), need at least 2")
            }
            IngestError::ExcessInput { found } => {
                write!(f, "cohort too large: found {found} record(s), at most 4 supported")
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// Minimum cohort size the core can reverse against.
pub const MIN_COHORT_SIZE: usize = 2;
/// Maximum cohort size the core can reverse against.
pub const MAX_COHORT_SIZE: usize = 4;

/// Read every regular file in `directory`, decode each with `decoder`,
/// keep the ones that decode successfully, and enforce the cohort-size
/// boundary.
pub fn read_cohort(
    directory: &Path,
    decoder: &dyn RecordDecoder,
) -> Result<Vec<EntityRecord>, IngestError> {
    let mut records = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(IngestError::Io)? {
        let entry = entry.map_err(IngestError::Io)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let bytes = std::fs::read(&path).map_err(IngestError::Io)?;
        match decoder.decode(&bytes) {
            Some(record) => records.push(record),
            None => tracing::debug!(path = %path.display(), "not a valid entity record; skipping"),
        }
    }
    enforce_cohort_size(records)
}

/// Decode a pre-read set of byte buffers instead of a directory, for
/// callers that have already gathered the bytes themselves.
pub fn cohort_from_buffers(
    buffers: &[Vec<u8>],
    decoder: &dyn RecordDecoder,
) -> Result<Vec<EntityRecord>, IngestError> {
    let records = buffers
        .iter()
        .filter_map(|bytes| decoder.decode(bytes))
        .collect();
    enforce_cohort_size(records)
}

/// A minimal reference decoder for the field layout in SPEC_FULL.md's
/// entity-record section. The game's actual binary format is an
/// external collaborator's concern; this fixed little-endian layout
/// exists only so the CLI surface has a working decoder to plug in.
///
/// Layout (26 bytes): `encryption_constant: u32`, `personality: u32`,
/// `trainer_id: u16`, `secret_id: u16`, `ivs: [u8; 6]`,
/// `flawless_iv_count: u8`, `ability_number: u8`, `gender: u8`,
/// `gender_ratio: u8`, `nature: u8`, `is_alpha: u8` (0/1),
/// `height_scalar: u8`, `weight_scalar: u8` (the last two are ignored
/// when `is_alpha` is set).
pub struct FixedLayoutDecoder;

const RECORD_LEN: usize = 26;

impl RecordDecoder for FixedLayoutDecoder {
    fn decode(&self, bytes: &[u8]) -> Option<EntityRecord> {
        if bytes.len() != RECORD_LEN {
            return None;
        }
        let encryption_constant = u32::from_le_bytes(bytes[0..4].try_into().ok()?);
        let personality = u32::from_le_bytes(bytes[4..8].try_into().ok()?);
        let trainer_id = u16::from_le_bytes(bytes[8..10].try_into().ok()?);
        let secret_id = u16::from_le_bytes(bytes[10..12].try_into().ok()?);
        let ivs: [u8; 6] = bytes[12..18].try_into().ok()?;
        let flawless_iv_count = bytes[18];
        let ability_number = bytes[19];
        let gender = bytes[20];
        let gender_ratio = bytes[21];
        let nature = bytes[22];
        let is_alpha = bytes[23] != 0;
        let (height_scalar, weight_scalar) = if is_alpha {
            (None, None)
        } else {
            (Some(bytes[24]), Some(bytes[25]))
        };

        Some(EntityRecord {
            encryption_constant,
            personality,
            trainer_id,
            secret_id,
            ivs,
            flawless_iv_count,
            ability_number,
            gender,
            gender_ratio,
            nature,
            is_alpha,
            height_scalar,
            weight_scalar,
        })
    }
}

fn enforce_cohort_size(records: Vec<EntityRecord>) -> Result<Vec<EntityRecord>, IngestError> {
    if records.len() < MIN_COHORT_SIZE {
        return Err(IngestError::InsufficientInput {
            found: records.len(),
        });
    }
    if records.len() > MAX_COHORT_SIZE {
        return Err(IngestError::ExcessInput {
            found: records.len(),
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::GENDER_RATIO_FIXED_MALE;

    fn sample_record() -> EntityRecord {
        EntityRecord {
            encryption_constant: 0,
            personality: 0,
            trainer_id: 0,
            secret_id: 0,
            ivs: [0, 0, 0, 0, 0, 0],
            flawless_iv_count: 0,
            ability_number: 1,
            gender: 0,
            gender_ratio: GENDER_RATIO_FIXED_MALE,
            nature: 0,
            is_alpha: true,
            height_scalar: None,
            weight_scalar: None,
        }
    }

    struct AlwaysDecodes;
    impl RecordDecoder for AlwaysDecodes {
        fn decode(&self, _bytes: &[u8]) -> Option<EntityRecord> {
            Some(sample_record())
        }
    }

    struct EvenLengthOnly;
    impl RecordDecoder for EvenLengthOnly {
        fn decode(&self, bytes: &[u8]) -> Option<EntityRecord> {
            (bytes.len() % 2 == 0).then(sample_record)
        }
    }

    #[test]
    fn rejects_cohorts_below_minimum() {
        let buffers = vec![vec![0u8; 4]];
        let err = cohort_from_buffers(&buffers, &AlwaysDecodes).unwrap_err();
        assert!(matches!(err, IngestError::InsufficientInput { found: 1 }));
    }

    #[test]
    fn rejects_cohorts_above_maximum() {
        let buffers = vec![vec![0u8; 4]; 5];
        let err = cohort_from_buffers(&buffers, &AlwaysDecodes).unwrap_err();
        assert!(matches!(err, IngestError::ExcessInput { found: 5 }));
    }

    #[test]
    fn accepts_cohorts_within_bounds() {
        let buffers = vec![vec![0u8; 4]; 3];
        let records = cohort_from_buffers(&buffers, &AlwaysDecodes).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn skips_buffers_that_fail_to_decode() {
        let buffers = vec![vec![0u8; 1], vec![0u8; 2], vec![0u8; 4], vec![0u8; 3]];
        let records = cohort_from_buffers(&buffers, &EvenLengthOnly).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn read_cohort_reads_every_regular_file_in_a_directory() {
        let dir = std::env::temp_dir().join(format!("seedcrack-ingest-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.bin"), [0u8; 4]).unwrap();
        std::fs::write(dir.join("b.bin"), [0u8; 4]).unwrap();

        let records = read_cohort(&dir, &AlwaysDecodes).unwrap();
        assert_eq!(records.len(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
