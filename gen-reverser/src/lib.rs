//! Component C: symbolic inversion of one xoroshiro128+ advance.
//!
//! A gen-seed advance consumes a fresh state `(s0 = G, s1 = C1)`, emits a
//! discarded "slot" output, mutates state, then emits the entity seed as
//! its second output. Given an entity seed, this recovers every `G` for
//! which that composition holds, by encoding the transition as a single
//! bit-vector equation over one unknown 64-bit word and handing it to an
//! SMT solver, enumerating all satisfying assignments.
//!
//! The solver context is created fresh per call and never shared across
//! threads: a process-wide solver is a footgun under parallelism.

use prng::{EntitySeed, GenSeed, C1};
use z3::ast::{Ast, BV};
use z3::{Config, Context, SatResult, Solver};

/// Recover every generator seed whose gen-seed advance produces
/// `entity_seed`. Empty if none exist. Never panics.
pub fn invert_entity_seed(entity_seed: EntitySeed) -> Vec<GenSeed> {
    let cfg = Config::new();
    let ctx = Context::new(&cfg);
    let (solver, g) = encode(&ctx, entity_seed.0);

    let mut results = Vec::new();
    loop {
        match solver.check() {
            SatResult::Sat => {
                let Some(model) = solver.get_model() else {
                    break;
                };
                let Some(value) = model.eval(&g, true).and_then(|v| v.as_u64()) else {
                    break;
                };
                results.push(GenSeed(value));
                let excluded = BV::from_u64(&ctx, value, 64);
                solver.assert(&g._eq(&excluded).not());
            }
            // Treat "unknown" identically to "no more solutions": no
            // partial answers are ever surfaced (see §7 SolverFailure).
            SatResult::Unsat | SatResult::Unknown => break,
        }
    }
    results
}

/// Build the bit-vector equation `next(next((g, C1))) == entity_seed`
/// over a single free variable `g`, matching the xoroshiro128+ advance
/// in `prng::Xoroshiro128Plus::next_u64` exactly (including that the
/// second mutation's rotation operates on the already-XORed `s1`, not
/// the original one).
fn encode<'ctx>(ctx: &'ctx Context, entity_seed: u64) -> (Solver<'ctx>, BV<'ctx>) {
    let g = BV::new_const(ctx, "g", 64);
    let c1 = BV::from_u64(ctx, C1, 64);
    let sixteen = BV::from_u64(ctx, 16, 64);

    // First advance: discard the `slot` output, keep the mutated state.
    let s1_a = g.bvxor(&c1);
    let s0_next = g.bvrotl(24).bvxor(&s1_a).bvxor(&s1_a.bvshl(&sixteen));
    let s1_next = s1_a.bvrotl(37);

    // Second advance's output is the entity seed.
    let produced = s0_next.bvadd(&s1_next);
    let target = BV::from_u64(ctx, entity_seed, 64);

    let solver = Solver::new(ctx);
    solver.assert(&produced._eq(&target));
    (solver, g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn gen_seeds(values: &[u64]) -> HashSet<GenSeed> {
        values.iter().map(|v| GenSeed(*v)).collect()
    }

    #[test]
    fn unique_solution() {
        let result = invert_entity_seed(EntitySeed(0xfcca_2321_c7d6_55ed));
        let expected = gen_seeds(&[0xad81_9080_a1ef_fcf6]);
        assert_eq!(result.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn two_solutions() {
        let result = invert_entity_seed(EntitySeed(0x366a_1a7e_d65e_146c));
        let expected = gen_seeds(&[0x041b_4ef9_172f_53f3, 0xd9d1_e54d_f500_36ec]);
        assert_eq!(result.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn three_solutions() {
        let result = invert_entity_seed(EntitySeed(0xa69d_3c25_666a_8c6a));
        let expected = gen_seeds(&[
            0x323f_f4f7_1fb9_898c,
            0x3d8d_7e99_5f75_69fe,
            0x0eec_4cff_d259_5d1b,
        ]);
        assert_eq!(result.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn no_solutions() {
        let result = invert_entity_seed(EntitySeed(5));
        assert!(result.is_empty());
    }

    #[test]
    fn every_solution_round_trips_forward() {
        let entity_seed = EntitySeed(0xa69d_3c25_666a_8c6a);
        for candidate in invert_entity_seed(entity_seed) {
            assert_eq!(seed_core::derive_entity_seed(candidate), entity_seed);
        }
    }
}
