//! Entangles two qutrits and samples the joint outcome under a few seeds.

use qudim::{CircuitConfig, QuantumCircuit, QuditError};

fn main() -> Result<(), QuditError> {
    println!("Building qutrit entangler on two qutrits...");

    let mut circuit = QuantumCircuit::with_config((2, 3), CircuitConfig::new().with_name("qutrit_entangle"))?;

    // 1. Spread the control over |0>, |1> and |2>.
    circuit.h(0, None)?;
    println!("  Step 1: Fourier transform on q0.");

    // 2. Shift the target by one whenever the control sits in |2>.
    circuit.cx((0, 1), 1, None)?;
    println!("  Step 2: Controlled shift q0 -> q1.");

    println!("\nOperator flow before measurement:");
    circuit.print_opflow_list();

    let result = circuit.run()?;
    println!("Joint probabilities:");
    for (index, p) in result.probabilities().iter().enumerate() {
        if *p > 1e-12 {
            println!("  |{}{}>: {:.4}", index / 3, index % 3, p);
        }
    }

    circuit.measure_all();
    for seed in 0..4 {
        let mut seeded = QuantumCircuit::with_config((2, 3), CircuitConfig::new().with_seed(seed))?;
        seeded.h(0, None)?.cx((0, 1), 1, None)?;
        seeded.measure_all();
        let result = seeded.run()?;
        println!("\nseed {}:\n{}", seed, result);
    }

    println!("{}", circuit);
    Ok(())
}
