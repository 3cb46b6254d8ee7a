//! Component F: the finder orchestrator.
//!
//! Drives the three reversals (D -> C -> B) per entity in the cohort and
//! feeds every candidate group seed to the validator, returning the first
//! confirmed match. Runs one entity at a time rather than across all of
//! them in parallel: the `2^32` search in component D dominates runtime,
//! so an early match on the first entity skips every later one entirely.

use prng::unseed_group;
use seed_core::{EntityRecord, GroupSeed, SpawnerMode, DEFAULT_MAX_ROLLS};

/// Find the group seed that produced `records`, trying at most
/// `max_rolls` personality re-rolls per entity and accepting any of
/// `modes`.
///
/// Returns `Some((group_seed, first))` where `first` is the index of
/// the entity whose reversal produced the winning candidate, or `None`
/// if no candidate validates.
pub fn find_group_seed(
    records: &[EntityRecord],
    max_rolls: Option<u8>,
    modes: Option<SpawnerMode>,
) -> Option<(GroupSeed, usize)> {
    let max_rolls = max_rolls.unwrap_or(DEFAULT_MAX_ROLLS);
    let modes = modes.unwrap_or_default();
    let ecs: Vec<u32> = records.iter().map(|r| r.encryption_constant).collect();

    for (i, record) in records.iter().enumerate() {
        let span = tracing::info_span!("reverse_entity", index = i);
        let _enter = span.enter();

        let entity_seeds = entity_reverser::find_entity_seeds(record, max_rolls);
        tracing::debug!(candidates = entity_seeds.len(), "entity seeds recovered");

        for candidate in entity_seeds {
            for gen_seed in gen_reverser::invert_entity_seed(candidate.seed) {
                let group_seed = unseed_group(gen_seed);
                match validator::validate(group_seed, &ecs, i, modes) {
                    Ok(true) => {
                        tracing::info!(index = i, "group seed confirmed");
                        return Some((group_seed, i));
                    }
                    Ok(false) => {}
                    Err(error) => {
                        tracing::warn!(%error, "validator rejected a malformed candidate");
                    }
                }
            }
        }
    }

    tracing::info!("no group seed validated against the cohort");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use prng::Xoroshiro128Plus;
    use seed_core::spawn_entity_seed;

    #[test]
    fn empty_cohort_never_matches() {
        assert_eq!(find_group_seed(&[], None, None), None);
    }

    #[test]
    fn unseed_group_chain_is_internally_consistent() {
        let group_seed = GroupSeed(0xdead_beef_cafe_f00d);
        let mut rng = Xoroshiro128Plus::new(group_seed.0);
        let entity_seed = spawn_entity_seed(&mut rng);
        let ec = seed_core::derive_encryption_constant(entity_seed);

        for gen_seed in gen_reverser::invert_entity_seed(entity_seed) {
            assert_eq!(seed_core::derive_entity_seed(gen_seed), entity_seed);
            let _ = ec;
        }
    }
}
