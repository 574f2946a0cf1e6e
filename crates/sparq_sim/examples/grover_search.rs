//! Grover search demo
//!
//! Runs Grover's algorithm over a 3-qubit register and reports how the
//! probability of the marked state grows with each iteration.

use sparq_core::CircuitBuilder;
use sparq_sim::{probabilities, Simulator};

fn main() {
    let num_qubits = 3;
    let qubits: Vec<usize> = (0..num_qubits).collect();
    let mark = 5;

    println!("Grover search: {} qubits, marked state |{}>", num_qubits, mark);
    println!();
    println!("{:<11} {:>10}", "iterations", "P(mark)");

    for iterations in 0..=4 {
        let mut builder = CircuitBuilder::new(num_qubits);
        for &q in &qubits {
            builder = builder.h(q);
        }
        for _ in 0..iterations {
            builder = builder.oracle(&qubits, mark).diffusion(&qubits);
        }
        let circuit = builder.build().expect("valid circuit");

        let state = Simulator::new().run(&circuit).expect("run succeeds");
        let probs = probabilities(&state);

        println!("{:<11} {:>10.6}", iterations, probs[mark]);
    }

    println!();
    println!("The optimum for 8 states is ~2 iterations (pi/4 * sqrt(8)).");
}
