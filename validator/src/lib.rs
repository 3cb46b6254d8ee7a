//! Component E: the group-seed validator.
//!
//! Forward-simulates from a candidate group seed using `seed_core`'s
//! shared wave-spawning helper, so this can never drift from how the
//! entity reverser's confirmation step derives the same chain.

use prng::{GroupSeed, Xoroshiro128Plus};
use seed_core::{derive_encryption_constant, spawn_entity_seed, SpawnerMode};

/// Programmer-error conditions: an empty `ecs` or an out-of-range
/// `first` index. Never constructed from malformed cohort data that
/// reached the validator through the normal finder path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    InvalidArgument(String),
}

impl std::fmt::Display for ValidatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ValidatorError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ValidatorError {}

/// Decide whether `group_seed` is consistent with the cohort's
/// encryption constants under any mode in `modes`.
///
/// `ecs` is the cohort's encryption constants in decode order; `first`
/// is the index of the entity that produced `group_seed` as a
/// candidate.
pub fn validate(
    group_seed: GroupSeed,
    ecs: &[u32],
    first: usize,
    modes: SpawnerMode,
) -> Result<bool, ValidatorError> {
    if ecs.is_empty() {
        return Err(ValidatorError::InvalidArgument(
            "cohort encryption-constant list is empty".to_string(),
        ));
    }
    if first >= ecs.len() {
        return Err(ValidatorError::InvalidArgument(format!(
            "first index {first} out of range for cohort of size {}",
            ecs.len()
        )));
    }

    // Fixed precedence: Multi, Single, Mixed.
    if modes.contains(SpawnerMode::MULTI) && multi_spawn_matches(group_seed, ecs) {
        return Ok(true);
    }
    if modes.contains(SpawnerMode::SINGLE) && single_spawn_matches(group_seed, ecs, first) {
        return Ok(true);
    }
    if modes.contains(SpawnerMode::MIXED) && mixed_spawn_matches(group_seed, ecs, first) {
        return Ok(true);
    }
    Ok(false)
}

/// One wave: derive the next generator seed and its entity seed's
/// encryption constant, advancing `group_rng` by the two draws a spawn
/// consumes.
fn next_wave_ec(group_rng: &mut Xoroshiro128Plus) -> u32 {
    let entity_seed = spawn_entity_seed(group_rng);
    derive_encryption_constant(entity_seed)
}

/// All `ecs.len()` entities come from a single spawn wave: draw that
/// many waves with no inter-entity group-rng advance and check that
/// every produced value appears somewhere in `ecs`.
fn multi_spawn_matches(group_seed: GroupSeed, ecs: &[u32]) -> bool {
    let mut rng = Xoroshiro128Plus::new(group_seed.0);
    multi_spawn_from(&mut rng, ecs)
}

fn multi_spawn_from(group_rng: &mut Xoroshiro128Plus, ecs: &[u32]) -> bool {
    if ecs.len() == 1 {
        return false;
    }
    let matched = (0..ecs.len())
        .map(|_| next_wave_ec(group_rng))
        .filter(|ec| ecs.contains(ec))
        .count();
    matched == ecs.len()
}

/// One spawn per wave: each wave's ec must be present in a working
/// multiset seeded from `ecs`, the first wave must produce `ecs[first]`,
/// and the group rng advances once between waves.
fn single_spawn_matches(group_seed: GroupSeed, ecs: &[u32], first: usize) -> bool {
    let mut working = ecs.to_vec();
    let mut rng = Xoroshiro128Plus::new(group_seed.0);

    for i in 0..ecs.len() {
        let ec = next_wave_ec(&mut rng);
        if i == 0 && ec != ecs[first] {
            return false;
        }
        match working.iter().position(|&candidate| candidate == ec) {
            Some(pos) => {
                working.remove(pos);
            }
            None => return false,
        }
        rng.next_u64();
    }
    working.is_empty()
}

/// Wave one is a single spawn that must produce `ecs[first]`; wave two
/// is a multi-spawn of the remaining `ecs.len() - 1` entities.
fn mixed_spawn_matches(group_seed: GroupSeed, ecs: &[u32], first: usize) -> bool {
    let mut rng = Xoroshiro128Plus::new(group_seed.0);
    let first_ec = next_wave_ec(&mut rng);
    if first_ec != ecs[first] {
        return false;
    }
    rng.next_u64();

    let remaining: Vec<u32> = ecs
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != first)
        .map(|(_, &ec)| ec)
        .collect();
    multi_spawn_from(&mut rng, &remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_ecs() {
        let err = validate(GroupSeed(1), &[], 0, SpawnerMode::default()).unwrap_err();
        assert_eq!(
            err,
            ValidatorError::InvalidArgument("cohort encryption-constant list is empty".to_string())
        );
    }

    #[test]
    fn rejects_out_of_range_first() {
        let err = validate(GroupSeed(1), &[1, 2], 5, SpawnerMode::default()).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidArgument(_)));
    }

    #[test]
    fn multi_spawn_accepts_its_own_forward_simulation() {
        let group_seed = GroupSeed(0x38dd_6076_47e5_b2b5);
        let mut rng = Xoroshiro128Plus::new(group_seed.0);
        let ecs: Vec<u32> = (0..4).map(|_| next_wave_ec(&mut rng)).collect();

        assert!(validate(group_seed, &ecs, 0, SpawnerMode::MULTI).unwrap());
    }

    #[test]
    fn multi_spawn_rejects_single_entity_cohort() {
        let group_seed = GroupSeed(42);
        let mut rng = Xoroshiro128Plus::new(group_seed.0);
        let ec = next_wave_ec(&mut rng);

        assert!(!validate(group_seed, &[ec], 0, SpawnerMode::MULTI).unwrap());
    }

    #[test]
    fn single_spawn_accepts_its_own_forward_simulation() {
        let group_seed = GroupSeed(0x38dd_6076_47e5_b2b5);
        let mut rng = Xoroshiro128Plus::new(group_seed.0);
        let mut ecs = Vec::new();
        for i in 0..2 {
            ecs.push(next_wave_ec(&mut rng));
            if i + 1 < 2 {
                rng.next_u64();
            }
        }

        assert!(validate(group_seed, &ecs, 0, SpawnerMode::SINGLE).unwrap());
    }

    #[test]
    fn mixed_spawn_accepts_its_own_forward_simulation() {
        let group_seed = GroupSeed(0xabad_1dea_dead_beef);
        let mut rng = Xoroshiro128Plus::new(group_seed.0);
        let first_ec = next_wave_ec(&mut rng);
        rng.next_u64();
        let rest: Vec<u32> = (0..3).map(|_| next_wave_ec(&mut rng)).collect();

        let mut ecs = vec![first_ec];
        ecs.extend(rest);

        assert!(validate(group_seed, &ecs, 0, SpawnerMode::MIXED).unwrap());
    }
}
