//! The entity-record data model, the seed-chain helpers shared by every
//! reversal stage, and the anti-shiny predicate (component G).
//!
//! `generate_traits` is written once here so that the entity reverser's
//! confirmation step and the group-seed validator's forward simulation
//! consume the exact same draw sequence, so the two can never be allowed
//! to drift apart.

pub use prng::{EntitySeed, GenSeed, GroupSeed, Xoroshiro128Plus};

use bitflags::bitflags;

/// Default personality re-roll ceiling when a caller doesn't specify one.
pub const DEFAULT_MAX_ROLLS: u8 = 32;

/// `gender_ratio` sentinel: the species has no gender.
pub const GENDER_RATIO_GENDERLESS: u8 = 255;
/// `gender_ratio` sentinel: the species is always female.
pub const GENDER_RATIO_FIXED_FEMALE: u8 = 254;
/// `gender_ratio` sentinel: the species is always male.
pub const GENDER_RATIO_FIXED_MALE: u8 = 0;

/// A decoded entity record, as produced by an external record decoder.
///
/// The core never parses the binary format this comes from; it only
/// consumes these fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRecord {
    pub encryption_constant: u32,
    pub personality: u32,
    pub trainer_id: u16,
    pub secret_id: u16,
    /// Canonical slot order: HP, Atk, Def, SpA, SpD, Spe.
    pub ivs: [u8; 6],
    pub flawless_iv_count: u8,
    pub ability_number: u8,
    pub gender: u8,
    pub gender_ratio: u8,
    pub nature: u8,
    pub is_alpha: bool,
    /// `None` only when `is_alpha` (alpha entities skip the scale rolls).
    pub height_scalar: Option<u8>,
    pub weight_scalar: Option<u8>,
}

impl EntityRecord {
    /// Whether the decoded personality/trainer-id pair is shiny.
    pub fn is_shiny(&self) -> bool {
        shiny_xor(self.personality, combine(self.secret_id, self.trainer_id)) < 16
    }

    /// IVs with Speed in the last slot. The canonical slot order already
    /// ends with Speed, so this is the identity, kept as a named method
    /// because the draw sequence in `generate_traits` indexes by this
    /// order explicitly and should not assume it silently.
    pub fn ivs_speed_last(&self) -> [u8; 6] {
        self.ivs
    }

    fn gender_roll_is_skipped(&self) -> bool {
        matches!(
            self.gender_ratio,
            GENDER_RATIO_GENDERLESS | GENDER_RATIO_FIXED_FEMALE | GENDER_RATIO_FIXED_MALE
        )
    }
}

bitflags! {
    /// The spawner patterns a candidate group seed may be validated
    /// against. Combine with `|` to accept any member mode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SpawnerMode: u8 {
        const MULTI = 0b001;
        const SINGLE = 0b010;
        const MIXED = 0b100;
    }
}

impl Default for SpawnerMode {
    fn default() -> Self {
        SpawnerMode::MULTI | SpawnerMode::SINGLE
    }
}

/// An intermediate result from the entity-seed reverser: a candidate
/// entity seed together with the roll count that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedCandidate {
    pub seed: EntitySeed,
    pub rolls: u8,
}

/// Component G: `(pid1 ^ pid2) ^ ((pid1 ^ pid2) >> 16), masked to 16 bits.
#[inline]
pub fn shiny_xor(a: u32, b: u32) -> u32 {
    let x = a ^ b;
    (x ^ (x >> 16)) & 0xFFFF
}

/// Pack a secret id and trainer id into the 32-bit value the shiny check
/// xors personality against.
#[inline]
pub fn combine(secret_id: u16, trainer_id: u16) -> u32 {
    ((secret_id as u32) << 16) | (trainer_id as u32)
}

/// Whether a non-shiny entity could be a shiny suppressed by the
/// anti-shiny xor (`personality XOR 0x1000_0000`).
#[inline]
pub fn is_potential_anti_shiny(trainer_id: u16, secret_id: u16, personality: u32) -> bool {
    shiny_xor(personality ^ 0x1000_0000, combine(secret_id, trainer_id)) < 16
}

/// Derive the entity seed that a generator seed's local sub-generator
/// produces: seed a fresh generator from `gen_seed`, discard its first
/// output (the "slot"), and take the second as the entity seed.
#[inline]
pub fn derive_entity_seed(gen_seed: GenSeed) -> EntitySeed {
    let mut rng = Xoroshiro128Plus::new(gen_seed.0);
    rng.next_u64();
    EntitySeed(rng.next_u64())
}

/// Derive the encryption constant an entity seed produces: the low 32
/// bits of a fresh generator's first output.
#[inline]
pub fn derive_encryption_constant(seed: EntitySeed) -> u32 {
    let mut rng = Xoroshiro128Plus::new(seed.0);
    rng.next_u32_bounded()
}

/// Advance a group-level generator by one spawn wave, returning the
/// entity seed it produced.
///
/// Reads two draws from `group_rng`: the generator seed, then one
/// discarded "alpha move" draw whose semantics are opaque to this
/// pipeline (see SPEC_FULL.md's open-question note). Never binds or
/// inspects that value.
pub fn spawn_entity_seed(group_rng: &mut Xoroshiro128Plus) -> EntitySeed {
    let gen_seed = GenSeed(group_rng.next_u64());
    group_rng.next_u64();
    derive_entity_seed(gen_seed)
}

/// Whether a drawn personality value matches the entity record's
/// personality condition (component D step 3/5, shared by the cheap
/// scan and the full confirmation below).
pub fn personality_matches(record: &EntityRecord, personality: u32) -> bool {
    if record.is_shiny() {
        (personality & 0xFFFF) == (record.personality & 0xFFFF)
    } else {
        personality == record.personality || personality == (record.personality ^ 0x1000_0000)
    }
}

/// Component D's "trait confirmation (forward)": reset a generator from
/// `seed`, draw the full trait sequence assuming `rolls` personality
/// rolls and `flawless` flawless IV slots, and check every drawn trait
/// against `record`.
///
/// Both the entity reverser's confirmation pass and the validator's
/// forward simulation call this, so there is exactly one place the draw
/// sequence is written down.
pub fn generate_traits(seed: EntitySeed, rolls: u8, flawless: u8, record: &EntityRecord) -> bool {
    let mut rng = Xoroshiro128Plus::new(seed.0);

    // 1. Encryption constant, already matched by construction.
    rng.next_u32_bounded();

    // 2. Fake trainer id.
    let fake_tid = rng.next_u32_bounded();

    // 3. Personality, re-rolled `rolls` times; the final draw counts.
    let mut personality = 0u32;
    for _ in 0..rolls {
        personality = rng.next_u32_bounded();
    }

    // 4-5. Shiny check.
    if record.is_shiny() {
        if (personality & 0xFFFF) != (record.personality & 0xFFFF) {
            return false;
        }
        if shiny_xor(personality, fake_tid) >= 16 {
            return false;
        }
    } else if !personality_matches(record, personality) {
        return false;
    }

    // 6. Flawless IVs.
    let ivs = record.ivs_speed_last();
    let mut marked = [false; 6];
    for _ in 0..flawless {
        let slot = loop {
            let candidate = rng.next_bounded(6) as usize;
            if !marked[candidate] {
                break candidate;
            }
        };
        marked[slot] = true;
        if ivs[slot] != 31 {
            return false;
        }
    }
    for (idx, is_marked) in marked.iter().enumerate() {
        if *is_marked {
            continue;
        }
        let draw = rng.next_bounded(32) as u8;
        if draw != ivs[idx] {
            return false;
        }
    }

    // 7. Ability.
    let ability = (rng.next_bounded(2) as u8) + 1;
    if ability != record.ability_number {
        return false;
    }

    // 8. Gender.
    if !record.gender_roll_is_skipped() {
        let draw = rng.next_bounded(252) as u8 + 1;
        let gender = if draw < record.gender_ratio { 1 } else { 0 };
        if gender != record.gender {
            return false;
        }
    }

    // 9. Nature.
    let nature = rng.next_bounded(25) as u8;
    if nature != record.nature {
        return false;
    }

    // 10. Alpha entities have no scale rolls.
    if record.is_alpha {
        return true;
    }

    // 11-12. Height and weight.
    let height = (rng.next_bounded(0x81) + rng.next_bounded(0x80)) as u8;
    if Some(height) != record.height_scalar {
        return false;
    }
    let weight = (rng.next_bounded(0x81) + rng.next_bounded(0x80)) as u8;
    if Some(weight) != record.weight_scalar {
        return false;
    }

    true
}
