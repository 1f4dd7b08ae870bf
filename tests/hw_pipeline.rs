//! Exercises the cycle-accurate hardware pipeline model directly against the concrete scenarios
//! from the component design (§8), independent of the solver driver.
use vericdcl::hw::pipeline::{run_round, ClauseRecord, HwMemories};
use vericdcl::hw::protocol::{AssignVal, Response, ResponseDecoder, K_MAX};

fn clause(lits: &[u16]) -> ClauseRecord {
    let mut record = ClauseRecord {
        sat: false,
        size: lits.len() as u8,
        lits: [0; K_MAX],
    };
    record.lits[..lits.len()].copy_from_slice(lits);
    record
}

fn install(mems: &mut HwMemories, cid: u16, lits: &[u16]) {
    mems.write_clause(cid, clause(lits));
    mems.add_watch(lits[0], cid);
    mems.add_watch(lits[1], cid);
}

fn responses(bytes: &[u8]) -> Vec<Response> {
    let mut decoder = ResponseDecoder::default();
    decoder.feed(bytes);
    let mut out = vec![];
    while let Some(response) = decoder.poll().unwrap() {
        out.push(response);
    }
    out
}

#[test]
fn scenario_a_implication_chain() {
    let mut mems = HwMemories::default();
    mems.set_var_count(4);
    install(&mut mems, 0, &[3, 4]);
    install(&mut mems, 1, &[5, 6]);
    install(&mut mems, 2, &[7, 8]);

    mems.write_assign(1, AssignVal::True);
    let bytes = run_round(&mems, 3, 5000).unwrap();
    assert_eq!(
        responses(&bytes),
        vec![
            Response::Implication { var: 2, val: AssignVal::True, reason: 0 },
            Response::DoneOk { cid: 0 },
        ]
    );

    mems.write_assign(2, AssignVal::True);
    let bytes = run_round(&mems, 5, 5000).unwrap();
    assert_eq!(
        responses(&bytes),
        vec![
            Response::Implication { var: 3, val: AssignVal::True, reason: 1 },
            Response::DoneOk { cid: 0 },
        ]
    );

    mems.write_assign(3, AssignVal::True);
    let bytes = run_round(&mems, 7, 5000).unwrap();
    assert_eq!(
        responses(&bytes),
        vec![
            Response::Implication { var: 4, val: AssignVal::True, reason: 2 },
            Response::DoneOk { cid: 0 },
        ]
    );
}

#[test]
fn scenario_b_conflict() {
    let mut mems = HwMemories::default();
    mems.set_var_count(7);
    install(&mut mems, 0, &[11, 12]);
    install(&mut mems, 1, &[13, 15]);

    mems.write_assign(5, AssignVal::True);
    mems.write_assign(7, AssignVal::True);

    let bytes = run_round(&mems, 11, 5000).unwrap();
    assert_eq!(
        responses(&bytes),
        vec![
            Response::Implication { var: 6, val: AssignVal::True, reason: 0 },
            Response::DoneOk { cid: 0 },
        ]
    );

    mems.write_assign(6, AssignVal::True);
    let bytes = run_round(&mems, 13, 5000).unwrap();
    assert_eq!(responses(&bytes), vec![Response::DoneConflict { cid: 1 }]);
}

#[test]
fn scenario_c_empty_watch_list() {
    let mut mems = HwMemories::default();
    mems.set_var_count(1);
    let bytes = run_round(&mems, 0, 5000).unwrap();
    assert_eq!(responses(&bytes), vec![Response::DoneOk { cid: 0 }]);
}

#[test]
fn scenario_d_unit_in_a_three_literal_clause() {
    let mut mems = HwMemories::default();
    mems.set_var_count(10);
    install(&mut mems, 5, &[17, 19]);
    mems.clauses[5].as_mut().unwrap().lits[2] = 20;
    mems.clauses[5].as_mut().unwrap().size = 3;

    mems.write_assign(8, AssignVal::True);
    mems.write_assign(9, AssignVal::True);

    let bytes = run_round(&mems, 17, 5000).unwrap();
    assert_eq!(
        responses(&bytes),
        vec![
            Response::Implication { var: 10, val: AssignVal::True, reason: 5 },
            Response::DoneOk { cid: 0 },
        ]
    );
}

#[test]
fn satisfied_hint_short_circuits_without_reading_assignments() {
    let mut mems = HwMemories::default();
    mems.set_var_count(2);
    let mut record = clause(&[2, 4]);
    record.sat = true;
    mems.write_clause(0, record);
    mems.add_watch(2, 0);
    mems.add_watch(4, 0);

    let bytes = run_round(&mems, 2, 5000).unwrap();
    assert_eq!(responses(&bytes), vec![Response::DoneOk { cid: 0 }]);
}
