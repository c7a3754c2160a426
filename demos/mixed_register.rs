//! A register of two qubits and two qutrits, with gates narrower than their
//! registers and a prepared initial state.

use qudim::{CircuitConfig, QuantumCircuit, QuditError};

fn main() -> Result<(), QuditError> {
    let config = CircuitConfig::new()
        .with_name("mixed")
        .with_cregs(4)
        .with_init_states([0, 1, 2])
        .with_seed(2024);
    let mut circuit = QuantumCircuit::with_config(vec![2, 2, 3, 3], config)?;

    println!(
        "Registers: {} qudits with dims {:?}, initial states {:?}",
        circuit.reg_length(),
        circuit.reg_dims(),
        circuit.init_states()
    );

    // A qubit flip acting on the lower two levels of a qutrit.
    circuit.x(3, Some(2))?;
    // Clock phases on the second qutrit do not change its populations.
    circuit.z(2, None)?;
    // q1 is |1>, its top level, so q2 is shifted from |2> to |0>.
    circuit.cx((1, 2), 1, None)?;
    circuit.h(0, None)?;

    match circuit.measure(0) {
        Err(e) => println!("Single-register measurement: {}", e),
        Ok(_) => println!("Single-register measurement appended"),
    }
    circuit.measure_all();

    println!("\n{}", circuit);
    let result = circuit.run()?;
    println!("{}", result);
    Ok(())
}
