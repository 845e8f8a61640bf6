use super::pattern_selection::Pattern;
use crate::event_log::{action::Action, trace_store_struct::TraceStore};

///
/// Replace both actions of `pattern` by `abstraction` in every trace of the store
///
/// Runs of consecutive `abstraction` actions created by this replacement are collapsed to a single
/// occurrence. Returns the number of removed events, weighted by trace frequency.
///
/// Traces are rewritten in place: they are neither re-sorted nor merged afterwards.
///
pub fn abstract_pattern(store: &mut TraceStore, pattern: Pattern, abstraction: Action) -> u64 {
    let mut removed: u64 = 0;
    for trace in store.traces_mut() {
        for a in trace.actions.iter_mut() {
            if *a == pattern.a || *a == pattern.b {
                *a = abstraction;
            }
        }
        let len_before = trace.actions.len();
        trace
            .actions
            .dedup_by(|cur, prev| *cur == abstraction && *prev == abstraction);
        removed += (len_before - trace.actions.len()) as u64 * trace.frequency;
    }
    removed
}
