//! The two-watched-literal software BCP engine.
use partial_ref::{partial, PartialRef};

use crate::context::{AssignmentP, ClauseDbP, Context, HwP, ImplGraphP, TrailP, WatchlistsP};
use crate::lit::Lit;

use super::assignment::enqueue_assignment;
use super::graph::{Conflict, Reason};

/// Propagates the trail to a fixed point.
///
/// Processes pending trail literals one at a time, scanning the watch list of each literal's
/// negation for clauses that may have become unit or false. Returns the first conflict found, if
/// any; on success every literal up to the trail's end has been processed.
pub fn propagate(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut HwP,
        mut ImplGraphP,
        mut TrailP,
        mut WatchlistsP,
    ),
) -> Result<(), Conflict> {
    loop {
        let lit = match ctx.part_mut(TrailP).pop_prop_head() {
            Some(lit) => lit,
            None => return Ok(()),
        };

        propagate_watches(ctx.borrow(), !lit)?;
    }
}

/// Scans the watch list of `false_lit` (the literal that just became false), rewriting it in
/// place per the two-finger scheme described in the component design: clauses that keep watching
/// `false_lit` are written back at the read position (`watches[read]`); clauses whose watch moved
/// elsewhere are simply skipped.
fn propagate_watches(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut HwP,
        mut ImplGraphP,
        mut TrailP,
        mut WatchlistsP,
    ),
    false_lit: Lit,
) -> Result<(), Conflict> {
    let mut watches = std::mem::take(ctx.part_mut(WatchlistsP).watched_by_mut(false_lit));

    let mut read = 0;
    let mut write = 0;
    let mut conflict = None;

    while read < watches.len() {
        let cid = watches[read];
        read += 1;

        // Canonicalize so the literal that just became false sits at position 1.
        let clause = ctx.part_mut(ClauseDbP).clause_mut(cid);
        if clause.lits()[0] == false_lit {
            clause.lits_mut().swap(0, 1);
        }
        let lits: Vec<Lit> = clause.lits().to_vec();
        let lit0 = lits[0];
        debug_assert_eq!(lits[1], false_lit);

        if ctx.part(AssignmentP).lit_is_true(lit0) {
            // Already satisfied through the other watch; keep watching `false_lit`.
            watches[write] = cid;
            write += 1;
            continue;
        }

        let mut moved = false;
        for i in 2..lits.len() {
            if !ctx.part(AssignmentP).lit_is_false(lits[i]) {
                // Found a replacement watch: swap it into position 1 (sending `false_lit` to
                // position `i`) and start watching it instead.
                ctx.part_mut(ClauseDbP).clause_mut(cid).lits_mut().swap(1, i);
                ctx.part_mut(WatchlistsP).add_watch(lits[i], cid);
                moved = true;
                break;
            }
        }
        if moved {
            continue;
        }

        // No replacement found: `lit0` is the only remaining candidate. Keep watching
        // `false_lit`.
        watches[write] = cid;
        write += 1;

        if ctx.part(AssignmentP).lit_is_false(lit0) {
            conflict = Some(Conflict(cid));
            break;
        } else if ctx.part(AssignmentP).lit_is_unassigned(lit0) {
            enqueue_assignment(ctx.borrow(), lit0, Reason::Clause(cid));
        }
        // else `lit0` is already true: nothing to do.
    }

    // `watches[write..read]` holds stale entries for clauses whose watch moved elsewhere; drop
    // them. On conflict this also correctly leaves any not-yet-scanned tail (`watches[read..]`)
    // spliced back unchanged, since `read` stopped short of `watches.len()`.
    watches.drain(write..read);

    let remaining = ctx.part_mut(WatchlistsP).watched_by_mut(false_lit);
    debug_assert!(remaining.is_empty());
    *remaining = watches;

    match conflict {
        Some(c) => Err(c),
        None => Ok(()),
    }
}
