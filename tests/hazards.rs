use mipspipe_rs::{analyze, HazardScheduler, Instruction, LineDecoder, Reg};

fn inst(line: &str) -> Instruction {
    LineDecoder::new()
        .decode(line)
        .unwrap_or_else(|| panic!("line {line:?} should decode"))
}

#[test]
fn forwarding_hides_single_cycle_latency() {
    let mut sched = HazardScheduler::new();
    let first = sched.issue(&inst("ADD R1, R2, R3"));
    let second = sched.issue(&inst("SUB R4, R1, R5"));
    assert_eq!(first.cycle, 1);
    assert_eq!(first.stalls, 0);
    // R1 is ready at cycle 2, exactly when SUB wants to read it.
    assert_eq!(second.cycle, 2);
    assert_eq!(second.stalls, 0);
    assert_eq!(sched.total_stalls(), 0);
    assert_eq!(sched.elapsed_cycles(), 2);
}

#[test]
fn load_use_inserts_one_bubble() {
    let mut sched = HazardScheduler::new();
    sched.issue(&inst("L.D F0, 0(R1)"));
    let add = sched.issue(&inst("ADD.D F4, F0, F2"));
    // F0 is ready at cycle 3; the consumer wanted cycle 2.
    assert_eq!(add.cycle, 3);
    assert_eq!(add.stalls, 1);
    assert_eq!(add.stalled_on, Some(Reg::from("F0")));
    assert_eq!(sched.elapsed_cycles(), 3);
    assert_eq!(sched.total_stalls(), 1);
}

#[test]
fn divide_makes_consumer_wait_nine_cycles() {
    let mut sched = HazardScheduler::new();
    sched.issue(&inst("DIV.D F0, F2, F4"));
    let add = sched.issue(&inst("ADD.D F10, F0, F8"));
    assert_eq!(add.cycle, 11);
    assert_eq!(add.stalls, 9);
    assert_eq!(add.stalled_on, Some(Reg::from("F0")));
    assert_eq!(sched.elapsed_cycles(), 11);
    assert_eq!(sched.total_stalls(), 9);
}

#[test]
fn store_stalls_on_its_sources_without_writing() {
    let mut sched = HazardScheduler::new();
    sched.issue(&inst("DIV.D F0, F2, F4"));
    let st = sched.issue(&inst("S.D F0, 0(R1)"));
    assert_eq!(st.cycle, 11);
    assert_eq!(st.stalls, 9);
    // The store issued late but left the readiness table untouched.
    assert_eq!(sched.ready_cycle(&Reg::from("F0")), Some(11));
    assert_eq!(sched.ready_cycle(&Reg::from("R1")), None);
}

#[test]
fn first_source_wins_a_tied_wait() {
    // F0 (multiply, issued at 1) and F6 (load, issued at 3) both become
    // ready at cycle 5, forcing equal waits on a consumer at cycle 4.
    let mut sched = HazardScheduler::new();
    sched.issue(&inst("MUL.D F0, F2, F4"));
    sched.issue(&inst("ADD R9, R8, R7"));
    sched.issue(&inst("L.D F6, 0(R1)"));
    let add = sched.issue(&inst("ADD.D F10, F0, F6"));
    assert_eq!(add.stalls, 1);
    assert_eq!(add.stalled_on, Some(Reg::from("F0")));

    sched.reset();
    sched.issue(&inst("MUL.D F0, F2, F4"));
    sched.issue(&inst("ADD R9, R8, R7"));
    sched.issue(&inst("L.D F6, 0(R1)"));
    let add = sched.issue(&inst("ADD.D F10, F6, F0"));
    assert_eq!(add.stalls, 1);
    assert_eq!(add.stalled_on, Some(Reg::from("F6")));
}

#[test]
fn newer_producer_overwrites_ready_cycle() {
    let mut sched = HazardScheduler::new();
    sched.issue(&inst("DIV.D F0, F2, F4"));
    assert_eq!(sched.ready_cycle(&Reg::from("F0")), Some(11));
    // A faster producer of F0 replaces the slow one outright.
    sched.issue(&inst("ADD F0, R1, R2"));
    assert_eq!(sched.ready_cycle(&Reg::from("F0")), Some(3));
    let add = sched.issue(&inst("ADD.D F4, F0, F2"));
    assert_eq!(add.cycle, 3);
    assert_eq!(add.stalls, 0);
}

#[test]
fn unknown_mnemonic_defaults_to_write_latency_one() {
    let mut sched = HazardScheduler::new();
    sched.issue(&inst("FROB R1, R2"));
    let sub = sched.issue(&inst("SUB R3, R1, R4"));
    assert_eq!(sub.cycle, 2);
    assert_eq!(sub.stalls, 0);
}

#[test]
fn label_consumes_no_cycle() {
    let mut sched = HazardScheduler::new();
    sched.issue(&inst("ADD R1, R2, R3"));
    let label = sched.issue(&inst("Loop:"));
    // The label is tagged with the cycle the next operation will use.
    assert_eq!(label.cycle, 2);
    assert_eq!(label.stalls, 0);
    let sub = sched.issue(&inst("SUB R4, R5, R6"));
    assert_eq!(sub.cycle, 2);
    assert_eq!(sched.elapsed_cycles(), 2);
    assert_eq!(sched.total_stalls(), 0);
}

#[test]
fn issue_cycles_follow_the_stall_formula() {
    let source = "
        Loop:
        L.D F0, 0(R1)
        ADD.D F4, F0, F2
        S.D F4, 0(R1)
        DADDUI R1, R1, #-8
        BNE R1, R2, Loop
    ";
    let dec = LineDecoder::new();
    let mut sched = HazardScheduler::new();
    let analysis = analyze(&dec, &mut sched, source);

    let ops: Vec<_> = analysis
        .lines
        .iter()
        .filter(|l| !matches!(l.action, mipspipe_rs::Action::Label))
        .collect();
    for pair in ops.windows(2) {
        assert!(pair[1].issue_cycle > pair[0].issue_cycle);
        assert_eq!(
            pair[1].issue_cycle,
            1 + pair[0].issue_cycle + pair[1].stalls
        );
    }
}

#[test]
fn independent_sequence_runs_stall_free() {
    let source = "
        ADD R1, R2, R3
        SUB R4, R5, R6
        AND R7, R8, R9
        OR R10, R11, R12
    ";
    let dec = LineDecoder::new();
    let mut sched = HazardScheduler::new();
    let analysis = analyze(&dec, &mut sched, source);
    assert_eq!(analysis.total_stalls, 0);
    assert_eq!(analysis.elapsed_cycles, analysis.instructions as u64);
}

#[test]
fn reset_prevents_readiness_leaks() {
    let mut sched = HazardScheduler::new();
    sched.issue(&inst("DIV.D F0, F2, F4"));

    // Without a reset the stale F0 entry forces a nine-cycle wait.
    let mut leaky = sched.clone();
    let stale = leaky.issue(&inst("ADD.D F6, F0, F8"));
    assert_eq!(stale.stalls, 9);

    sched.reset();
    let fresh = sched.issue(&inst("ADD.D F6, F0, F8"));
    assert_eq!(fresh.cycle, 1);
    assert_eq!(fresh.stalls, 0);
    assert_eq!(sched.total_stalls(), 0);
}

#[test]
fn analysis_is_idempotent() {
    let source = "
        DIV.D F0, F2, F4
        ADD.D F10, F0, F8
        SUB.D F12, F8, F14
    ";
    let dec = LineDecoder::new();
    let mut sched = HazardScheduler::new();
    let first = analyze(&dec, &mut sched, source);
    let second = analyze(&dec, &mut sched, source);
    assert_eq!(first, second);
}

#[test]
fn empty_input_yields_empty_schedule() {
    let dec = LineDecoder::new();
    let mut sched = HazardScheduler::new();
    let analysis = analyze(&dec, &mut sched, "\n   \n# only comments\n");
    assert!(analysis.lines.is_empty());
    assert_eq!(analysis.instructions, 0);
    assert_eq!(analysis.total_stalls, 0);
    assert_eq!(analysis.elapsed_cycles, 0);
}
