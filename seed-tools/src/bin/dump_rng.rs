use prng::Xoroshiro128Plus;
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
    let count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20);

    let mut rng = Xoroshiro128Plus::new(seed);

    println!("xoroshiro128+ outputs for seed {seed:#018x}:");
    for i in 0..count {
        let val = rng.next_u64();
        println!("  [{i:3}] = {val:#018x}");
    }
}
