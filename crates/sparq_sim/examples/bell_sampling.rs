//! Bell-pair sampling demo
//!
//! Prepares a Bell pair, samples shots from the final state, and prints
//! the counts next to the exact amplitudes as CSV.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sparq_core::CircuitBuilder;
use sparq_sim::{amplitudes_csv, counts_map, probabilities, sample_shots, Simulator};

fn main() {
    let circuit = CircuitBuilder::new(2)
        .h(0)
        .cnot(0, 1)
        .build()
        .expect("valid circuit");

    let state = Simulator::new().with_seed(42).run(&circuit).expect("run succeeds");

    let shots = 4096;
    let mut rng = StdRng::seed_from_u64(42);
    let counts = sample_shots(&probabilities(&state), shots, &mut rng);

    println!("Bell pair, {} shots:", shots);
    let mut labeled: Vec<_> = counts_map(&counts, 2).into_iter().collect();
    labeled.sort();
    for (label, count) in labeled {
        println!("  |{}>: {:>5}  ({:.1}%)", label, count, 100.0 * count as f64 / shots as f64);
    }

    println!();
    println!("Amplitudes:");
    print!("{}", amplitudes_csv(&state));
}
