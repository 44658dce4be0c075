use tapeadd::{
    binary_adder, input_tape, Action, Definition, Direction, MachineError, Status, Tape,
    TuringMachine, BLANK_SYMBOL,
};

fn action(
    state: &str,
    read: char,
    write: char,
    direction: Direction,
    next: &str,
) -> Action<String> {
    Action {
        state: state.to_string(),
        read,
        write,
        direction,
        next_state: next.to_string(),
    }
}

/// Records `(state, tape)` after every step until the run ends.
fn trace<S: tapeadd::State>(machine: &mut TuringMachine<S>) -> Vec<(S, Vec<char>)> {
    let mut snapshots = Vec::new();
    loop {
        let status = machine.step().unwrap();
        snapshots.push((
            machine.state().clone(),
            machine.tape().unwrap().to_sequence(),
        ));
        if status.is_final() {
            return snapshots;
        }
    }
}

#[test]
fn test_undefined_transition_halts_cleanly() {
    let definition = Definition::new(
        "start".to_string(),
        ["halt".to_string()],
        vec![action("start", '0', '0', Direction::Right, "halt")],
    )
    .unwrap();
    let mut machine = TuringMachine::new(definition);
    machine.initialize(vec!['x']).unwrap();

    let status = machine.step().unwrap();

    assert_eq!(status, Status::Error);
    assert_eq!(machine.status(), Status::Error);
    assert_eq!(machine.state(), "start");
    assert_eq!(machine.step_count(), 0);
    assert_eq!(machine.tape().unwrap().to_sequence(), vec!['x']);
    assert_eq!(machine.tape().unwrap().position(), 0);
}

#[test]
fn test_empty_definition_errors_on_first_step() {
    let definition =
        Definition::new("start".to_string(), Vec::<String>::new(), Vec::new()).unwrap();
    let mut machine = TuringMachine::new(definition);
    machine.initialize(Vec::new()).unwrap();

    assert_eq!(machine.run().unwrap(), Status::Error);
}

#[test]
fn test_illegal_operations() {
    let mut machine = TuringMachine::new(binary_adder(2).unwrap());

    assert!(matches!(
        machine.step(),
        Err(MachineError::IllegalOperation {
            expected: Status::Running,
            actual: Status::Ready,
            ..
        })
    ));

    machine.initialize(input_tape(2, 1, 1).unwrap()).unwrap();
    assert!(matches!(
        machine.initialize(Vec::new()),
        Err(MachineError::IllegalOperation {
            expected: Status::Ready,
            actual: Status::Running,
            ..
        })
    ));

    machine.run().unwrap();
    assert!(machine.step().is_err());
    assert!(machine.initialize(Vec::new()).is_err());
}

#[test]
fn test_determinism_across_fresh_engines_and_reset() {
    let definition = binary_adder(3).unwrap();
    let input = input_tape(3, 6, 3).unwrap();

    let mut first = TuringMachine::new(definition.clone());
    first.initialize(input.clone()).unwrap();
    let first_trace = trace(&mut first);

    let mut second = TuringMachine::new(definition);
    second.initialize(input.clone()).unwrap();
    assert_eq!(trace(&mut second), first_trace);

    first.reset();
    first.initialize(input).unwrap();
    assert_eq!(trace(&mut first), first_trace);
}

#[test]
fn test_reset_reuse_matches_fresh_engine() {
    let definition = binary_adder(4).unwrap();

    let mut reused = TuringMachine::new(definition.clone());
    reused.initialize(input_tape(4, 15, 15).unwrap()).unwrap();
    assert_eq!(reused.run().unwrap(), Status::Accepted);

    reused.reset();
    assert_eq!(reused.status(), Status::Ready);
    assert_eq!(reused.state(), definition.initial_state());
    assert!(reused.tape().is_none());

    let input = input_tape(4, 9, 4).unwrap();
    reused.initialize(input.clone()).unwrap();
    let mut fresh = TuringMachine::new(definition);
    fresh.initialize(input).unwrap();

    assert_eq!(trace(&mut reused), trace(&mut fresh));
    assert_eq!(reused.step_count(), fresh.step_count());
}

#[test]
fn test_tape_boundary_extension_keeps_cells() {
    let mut tape = Tape::new("10".chars());

    tape.move_head(Direction::Left);
    assert_eq!(tape.read(), BLANK_SYMBOL);
    tape.write('1');
    tape.move_head(Direction::Left);
    assert_eq!(tape.read(), BLANK_SYMBOL);

    for _ in 0..5 {
        tape.move_head(Direction::Right);
    }
    assert_eq!(tape.read(), BLANK_SYMBOL);
    assert_eq!(tape.position(), 3);
    assert_eq!(tape.leftmost(), -2);
    assert_eq!(
        tape.to_sequence(),
        vec![BLANK_SYMBOL, '1', '1', '0', BLANK_SYMBOL, BLANK_SYMBOL]
    );
}

#[test]
fn test_tape_round_trip_at_negative_position() {
    let mut tape = Tape::new(Vec::new());
    for _ in 0..4 {
        tape.move_head(Direction::Left);
    }
    tape.write('z');
    let position = tape.position();

    for _ in 0..7 {
        tape.move_head(Direction::Right);
    }
    for _ in 0..7 {
        tape.move_head(Direction::Left);
    }

    assert_eq!(tape.position(), position);
    assert_eq!(tape.read(), 'z');
}
