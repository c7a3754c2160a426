// tests/execution_tests.rs

use qudim::circuits::placement::assemble_moment;
use qudim::gates::XGate;
use qudim::{CircuitConfig, OperatorFlow, QuantumCircuit, QuditError, RegisterModel, ExecutionResult};

const TEST_TOLERANCE: f64 = 1e-9;

fn assert_probabilities(result: &ExecutionResult, expected: &[f64], context: &str) {
    let actual = result.probabilities();
    assert_eq!(actual.len(), expected.len(), "Length mismatch - {}", context);
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - e).abs() < TEST_TOLERANCE,
            "Probability mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
            i, a, e, context
        );
    }
}

fn check_outcomes(result: &ExecutionResult, expected: &[usize]) {
    for (qreg, level) in expected.iter().enumerate() {
        assert_eq!(result.get_outcome(qreg), Some(*level), "Mismatch for register {}", qreg);
    }
}

#[test]
fn test_fresh_circuit_runs_to_ground_state() -> Result<(), QuditError> {
    let circuit = QuantumCircuit::new((2, 2))?;
    let result = circuit.run()?;

    assert_probabilities(&result, &[1.0, 0.0, 0.0, 0.0], "|00>");
    assert!(result.all_outcomes().is_empty(), "Nothing was measured");
    Ok(())
}

#[test]
fn test_initial_states_are_prepared() -> Result<(), QuditError> {
    let config = CircuitConfig::new().with_init_states([1, 2]);
    let mut circuit = QuantumCircuit::with_config(vec![2, 3], config)?;
    circuit.measure_all();

    let result = circuit.run()?;
    check_outcomes(&result, &[1, 2]);
    Ok(())
}

#[test]
fn test_shift_cycles_through_all_levels() -> Result<(), QuditError> {
    let mut circuit = QuantumCircuit::new((1, 3))?;
    circuit.x(0, None)?;
    assert_probabilities(&circuit.run()?, &[0.0, 1.0, 0.0], "X|0>");
    circuit.x(0, None)?;
    assert_probabilities(&circuit.run()?, &[0.0, 0.0, 1.0], "X^2|0>");
    circuit.x(0, None)?;
    assert_probabilities(&circuit.run()?, &[1.0, 0.0, 0.0], "X^3|0>");
    Ok(())
}

#[test]
fn test_hadamard_gives_uniform_superposition() -> Result<(), QuditError> {
    for d in 2..=6 {
        let mut circuit = QuantumCircuit::new((1, d))?;
        circuit.h(0, None)?;
        let expected = vec![1.0 / d as f64; d];
        assert_probabilities(&circuit.run()?, &expected, &format!("H on d={}", d));
    }
    Ok(())
}

#[test]
fn test_hzh_is_a_flip_on_a_qubit() -> Result<(), QuditError> {
    let mut circuit = QuantumCircuit::new((1, 2))?;
    circuit.h(0, None)?.z(0, None)?.h(0, None)?;
    assert_probabilities(&circuit.run()?, &[0.0, 1.0], "HZH|0>");
    Ok(())
}

#[test]
fn test_bell_pair_outcomes_agree() -> Result<(), QuditError> {
    let mut circuit = QuantumCircuit::new((2, 2))?;
    circuit.h(0, None)?.cx((0, 1), 1, None)?;
    assert_probabilities(&circuit.run()?, &[0.5, 0.0, 0.0, 0.5], "Bell state");

    for seed in 0..8 {
        let mut circuit = QuantumCircuit::with_config((2, 2), CircuitConfig::new().with_seed(seed))?;
        circuit.h(0, None)?.cx((0, 1), 1, None)?;
        circuit.measure_all();
        let result = circuit.run()?;
        assert_eq!(result.get_outcome(0), result.get_outcome(1), "Bell outcomes must agree");
    }
    Ok(())
}

#[test]
fn test_seeded_runs_repeat() -> Result<(), QuditError> {
    let config = CircuitConfig::new().with_seed(42);
    let mut circuit = QuantumCircuit::with_config((2, 3), config)?;
    circuit.h(0, None)?.h(1, None)?;
    circuit.measure_all();

    let first = circuit.run()?;
    let second = circuit.run()?;
    assert_eq!(first.all_outcomes(), second.all_outcomes());
    assert!(first.all_outcomes().values().all(|level| *level < 3));
    Ok(())
}

#[test]
fn test_smaller_gate_leaves_upper_levels_alone() -> Result<(), QuditError> {
    // A qubit flip on a qutrit swaps |0> and |1> only.
    let mut circuit = QuantumCircuit::new((1, 3))?;
    circuit.x(0, Some(2))?;
    assert_probabilities(&circuit.run()?, &[0.0, 1.0, 0.0], "X(2)|0>");

    let config = CircuitConfig::new().with_init_states([2]);
    let mut circuit = QuantumCircuit::with_config((1, 3), config)?;
    circuit.x(0, Some(2))?;
    assert_probabilities(&circuit.run()?, &[0.0, 0.0, 1.0], "X(2)|2>");
    Ok(())
}

#[test]
fn test_cx_fires_only_on_top_control_level() -> Result<(), QuditError> {
    // Control below its top level: nothing happens.
    let config = CircuitConfig::new().with_init_states([1, 0]);
    let mut circuit = QuantumCircuit::with_config(vec![3, 3], config)?;
    circuit.cx((0, 1), 1, None)?;
    circuit.measure_all();
    check_outcomes(&circuit.run()?, &[1, 0]);

    // Control at |2>: the target is shifted by two.
    let config = CircuitConfig::new().with_init_states([2, 0]);
    let mut circuit = QuantumCircuit::with_config(vec![3, 3], config)?;
    circuit.cx((0, 1), 2, None)?;
    circuit.measure_all();
    check_outcomes(&circuit.run()?, &[2, 2]);
    Ok(())
}

#[test]
fn test_cx_shift_wraps_modulo_target() -> Result<(), QuditError> {
    let shifts = [usize::MAX, usize::MAX - 1, 4];
    for plus in shifts {
        let config = CircuitConfig::new().with_init_states([2, 0]);
        let mut circuit = QuantumCircuit::with_config(vec![3, 3], config)?;
        circuit.cx((0, 1), plus, None)?;
        circuit.measure_all();
        check_outcomes(&circuit.run()?, &[2, plus % 3]);
    }
    Ok(())
}

#[test]
fn test_cx_leaves_spectators_alone() -> Result<(), QuditError> {
    let config = CircuitConfig::new().with_init_states([2, 1, 0]);
    let mut circuit = QuantumCircuit::with_config(vec![3, 2, 3], config)?;
    circuit.cx((0, 2), 2, None)?;
    circuit.measure_all();
    check_outcomes(&circuit.run()?, &[2, 1, 2]);
    Ok(())
}

#[test]
fn test_mixed_register_entanglement() -> Result<(), QuditError> {
    // Qutrit superposition controlling a qubit: only the |2> branch flips it.
    let mut circuit = QuantumCircuit::new(vec![3, 2])?;
    circuit.h(0, None)?.cx((0, 1), 1, None)?;
    let third = 1.0 / 3.0;
    assert_probabilities(&circuit.run()?, &[third, 0.0, third, 0.0, 0.0, third], "H(3) then CX");
    Ok(())
}

#[test]
fn test_measurement_collapses_final_state() -> Result<(), QuditError> {
    let config = CircuitConfig::new().with_seed(3);
    let mut circuit = QuantumCircuit::with_config((1, 4), config)?;
    circuit.h(0, None)?;
    circuit.measure_all();

    let result = circuit.run()?;
    let level = result.get_outcome(0).expect("register 0 was measured");
    assert!(level < 4);
    assert!((result.final_state().probability(level) - 1.0).abs() < TEST_TOLERANCE);
    assert!(result.to_string().contains(&format!("q0: |{}>", level)));
    Ok(())
}

#[test]
fn test_flow_rejects_foreign_moment() -> Result<(), QuditError> {
    let narrow = RegisterModel::resolve(&(2, 2).into())?;
    let wide = RegisterModel::resolve(&(3, 2).into())?;

    let mut flow = OperatorFlow::new(narrow.clone());
    assert!(flow.populate_opflow(assemble_moment(&narrow, XGate::new(1, 2)?.into()))?);
    assert!(matches!(
        flow.populate_opflow(assemble_moment(&wide, XGate::new(2, 2)?.into())),
        Err(QuditError::MalformedMoment { expected: 2, got: 3 })
    ));
    assert_eq!(flow.len(), 1);

    let result = flow.exec()?;
    assert_probabilities(&result, &[0.0, 1.0, 0.0, 0.0], "X on q1");
    Ok(())
}

#[test]
fn test_oversized_register_cannot_run() -> Result<(), QuditError> {
    let circuit = QuantumCircuit::new((200, 7))?;
    assert!(matches!(circuit.run(), Err(QuditError::StateSpaceOverflow { .. })));
    Ok(())
}
