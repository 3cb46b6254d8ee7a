//! Replays the worked scenarios from spec.md's concrete-scenario table
//! against the live `prng`/`gen-reverser` crates and prints a pass/fail
//! line per scenario, for manual spot-checking without a test harness.

use gen_reverser::invert_entity_seed;
use prng::{unseed_group, EntitySeed, GenSeed, GroupSeed, Xoroshiro128Plus};
use seed_core::is_potential_anti_shiny;
use std::collections::HashSet;

fn check(name: &str, passed: bool) {
    println!("[{}] {name}", if passed { " ok " } else { "FAIL" });
}

fn main() {
    // Scenario 1: group -> gen step.
    let group = GroupSeed(0xce66_2cc3_0520_1801);
    let mut rng = Xoroshiro128Plus::new(group.0);
    let gen = GenSeed(rng.next_u64());
    check(
        "scenario 1: group -> gen",
        gen.0 == 0x5108_de38_27bd_825c && unseed_group(gen) == group,
    );

    // Scenario 2: gen->entity, unique.
    let result: HashSet<u64> = invert_entity_seed(EntitySeed(0xfcca_2321_c7d6_55ed))
        .into_iter()
        .map(|g| g.0)
        .collect();
    check(
        "scenario 2: gen->entity unique",
        result == HashSet::from([0xad81_9080_a1ef_fcf6]),
    );

    // Scenario 3: gen->entity, two solutions.
    let result: HashSet<u64> = invert_entity_seed(EntitySeed(0x366a_1a7e_d65e_146c))
        .into_iter()
        .map(|g| g.0)
        .collect();
    check(
        "scenario 3: gen->entity two solutions",
        result == HashSet::from([0x041b_4ef9_172f_53f3, 0xd9d1_e54d_f500_36ec]),
    );

    // Scenario 4: gen->entity, three solutions.
    let result: HashSet<u64> = invert_entity_seed(EntitySeed(0xa69d_3c25_666a_8c6a))
        .into_iter()
        .map(|g| g.0)
        .collect();
    check(
        "scenario 4: gen->entity three solutions",
        result
            == HashSet::from([
                0x323f_f4f7_1fb9_898c,
                0x3d8d_7e99_5f75_69fe,
                0x0eec_4cff_d259_5d1b,
            ]),
    );

    // Scenario 5: no solutions.
    check(
        "scenario 5: no solutions",
        invert_entity_seed(EntitySeed(5)).is_empty(),
    );

    // Scenario 6: anti-shiny predicate.
    check(
        "scenario 6: anti-shiny predicate",
        is_potential_anti_shiny(15156, 10217, 0xD9EC_D53B),
    );

    println!();
    println!("scenarios 7-8 (end-to-end group-seed recovery) are exercised by");
    println!("finder's #[ignore]d integration tests; run with `cargo test -p finder -- --ignored`.");
}
