//! Component D: recover every entity seed that produces a given decoded
//! entity record.
//!
//! The low 32 bits of the entity seed are fixed algebraically by the
//! encryption constant (a fresh generator's first output is `S + C1`, so
//! its low 32 bits equal `ec`). Only the upper 32 bits are unknown. The
//! search splits that `2^32` space into `2^16` independent chunks so it
//! can run as a data-parallel map, the same shape the teacher's fast
//! parallel deal search uses for its own independent per-seed work units.

use prng::{Xoroshiro128Plus, C1};
use rayon::prelude::*;
use seed_core::{
    generate_traits, is_potential_anti_shiny, EntityRecord, EntitySeed, SeedCandidate,
};
use std::collections::HashSet;

/// Flawless IV counts the confirmation pass tries when the record's own
/// decoded `flawless_iv_count` isn't trusted as the search key (per
/// component D's confirmation product).
const FLAWLESS_CANDIDATES: [u8; 3] = [0, 3, 4];

/// Recover every `(entity seed, rolls)` pair consistent with `record`,
/// trying up to `max_rolls` personality re-rolls.
///
/// Runs the `2^32` upper-half search in parallel; the returned order is
/// unspecified.
pub fn find_entity_seeds(record: &EntityRecord, max_rolls: u8) -> Vec<SeedCandidate> {
    let s_low = record.encryption_constant.wrapping_sub(C1 as u32);
    let anti_shiny_eligible = !record.is_shiny()
        && is_potential_anti_shiny(record.trainer_id, record.secret_id, record.personality);

    let candidates: Vec<EntitySeed> = (0u32..=u16::MAX as u32)
        .into_par_iter()
        .flat_map(|outer| search_chunk(outer, s_low, record, max_rolls, anti_shiny_eligible))
        .collect();

    let mut found: HashSet<SeedCandidate> = HashSet::new();
    for seed in candidates {
        for &flawless in &FLAWLESS_CANDIDATES {
            for rolls in 1..=max_rolls {
                if generate_traits(seed, rolls, flawless, record) {
                    found.insert(SeedCandidate { seed, rolls });
                }
            }
        }
    }
    found.into_iter().collect()
}

/// One outer-loop chunk of the upper-half search: `2^16` candidate
/// seeds sharing the same `outer` 16 bits.
fn search_chunk(
    outer: u32,
    s_low: u32,
    record: &EntityRecord,
    max_rolls: u8,
    anti_shiny_eligible: bool,
) -> Vec<EntitySeed> {
    let mut matches = Vec::new();
    for inner in 0u32..=u16::MAX as u32 {
        let upper = (outer << 16) | inner;
        let seed = EntitySeed(((upper as u64) << 32) | s_low as u64);
        if quick_scan_matches(seed, record, max_rolls, anti_shiny_eligible) {
            matches.push(seed);
        }
    }
    matches
}

/// Cheap pre-filter: does any of up to `max_rolls` personality draws
/// satisfy the record's personality condition? Consumes the encryption
/// constant and fake-trainer-id draws without checking them, since the
/// encryption constant is already guaranteed to match by the caller's
/// algebraic construction of `seed`.
fn quick_scan_matches(
    seed: EntitySeed,
    record: &EntityRecord,
    max_rolls: u8,
    anti_shiny_eligible: bool,
) -> bool {
    let mut rng = Xoroshiro128Plus::new(seed.0);
    rng.next_u32_bounded(); // encryption constant
    rng.next_u32_bounded(); // fake trainer id

    for _ in 0..max_rolls {
        let personality = rng.next_u32_bounded();
        if record.is_shiny() {
            if (personality & 0xFFFF) == (record.personality & 0xFFFF) {
                return true;
            }
        } else if personality == record.personality {
            return true;
        } else if anti_shiny_eligible && personality == (record.personality ^ 0x1000_0000) {
            return true;
        }
    }
    false
}
