use crate::{
    discover, discover_with_step_fn,
    discovery::{
        full::{AbstractionStep, DiscoveryPhase},
        model::Node,
    },
    event_log::trace_store_struct::Trace,
    import_text_log_file,
    utils::test_utils::{act, get_test_data_path, store_from_lines},
    DiscoveryConfig, Pattern, PostAbstractionOrder, RelationKind, TextImportOptions,
};


const ABC_ACB: &str = "a,b,c\na,b,c\na,b,c\na,c,b\n";

#[test]
fn discover_abc_acb() {
    let result = discover(store_from_lines(ABC_ACB), DiscoveryConfig::default());
    assert_eq!(result.initial.distinct_actions, 3);
    assert_eq!(result.initial.total_events, 12);
    assert_eq!(result.initial.total_traces, 4);

    let patterns: Vec<(DiscoveryPhase, u32, Pattern, u64)> = result
        .steps
        .iter()
        .map(|s| (s.phase, s.abstraction, s.pattern, s.events_removed))
        .collect();
    assert_eq!(
        patterns,
        vec![
            (
                DiscoveryPhase::Sequential,
                256,
                Pattern::new(act('a'), act('b'), RelationKind::Sequence),
                3
            ),
            (
                DiscoveryPhase::General,
                257,
                Pattern::new(act('c'), 256, RelationKind::Concurrency),
                5
            ),
        ]
    );
    assert_eq!(result.events_removed_total(), 8);
    assert_eq!(result.final_log.total_events(), 4);
    // The rewritten traces became identical but stay separate entries
    assert_eq!(
        result.final_log.traces(),
        &[Trace::new(vec![257], 3), Trace::new(vec![257], 1)]
    );
    assert_eq!(
        result
            .final_trees()
            .iter()
            .map(Node::to_string)
            .collect::<Vec<_>>(),
        vec!["CON(c,SEQ(a,b))".to_string()]
    );
}

#[test]
fn resort_and_merge_after_abstraction() {
    let config = DiscoveryConfig {
        post_abstraction_order: PostAbstractionOrder::ResortAndMerge,
        ..DiscoveryConfig::default()
    };
    let preserved = discover(store_from_lines(ABC_ACB), DiscoveryConfig::default());
    let merged = discover(store_from_lines(ABC_ACB), config);
    assert_eq!(merged.final_log.traces(), &[Trace::new(vec![257], 4)]);
    assert!(merged.final_log.is_strictly_ordered());
    assert_eq!(merged.steps, preserved.steps);
}

#[test]
fn step_fn_sees_every_step() {
    let mut seen: Vec<u32> = Vec::new();
    let result = discover_with_step_fn(
        store_from_lines(ABC_ACB),
        DiscoveryConfig::default(),
        &mut |step: &AbstractionStep| seen.push(step.abstraction),
    );
    assert_eq!(seen, vec![256, 257]);
    assert_eq!(result.steps.len(), 2);
}

#[test]
fn single_trace_collapses_to_one_action() {
    let result = discover(store_from_lines("a,b,c,d\n"), DiscoveryConfig::default());
    // SEQ(a,b) and SEQ(c,d) in stage 1, their sequence in stage 2
    assert_eq!(result.steps_in(DiscoveryPhase::Sequential).count(), 2);
    assert_eq!(result.steps_in(DiscoveryPhase::General).count(), 1);
    assert_eq!(result.final_log.distinct_actions().len(), 1);
    assert_eq!(result.final_log.total_events(), 1);
    let trees = result.final_trees();
    assert_eq!(trees.len(), 1);
    assert_eq!(trees[0].to_string(), "SEQ(SEQ(a,b),SEQ(c,d))");
    assert_eq!(trees[0].leaves(), vec![act('a'), act('b'), act('c'), act('d')]);
}

#[test]
fn synthetic_ids_are_shared_across_phases() {
    let result = discover(store_from_lines("a,b\nb,a\nc\n"), DiscoveryConfig::default());
    let ids: Vec<u32> = result.steps.iter().map(|s| s.abstraction).collect();
    let expected: Vec<u32> = (256..256 + ids.len() as u32).collect();
    assert_eq!(ids, expected);
    assert!(result.steps_in(DiscoveryPhase::Sequential).next().is_none());
}

#[test]
fn stricter_threshold_changes_stage_one() {
    // a -> b dominates b -> a with pd 75
    let log = "a,b\na,b\na,b\na,b\nb,a\n";
    let default = discover(store_from_lines(log), DiscoveryConfig::default());
    assert_eq!(default.steps_in(DiscoveryPhase::Sequential).count(), 1);
    let strict = DiscoveryConfig {
        seq_threshold: 80,
        ..DiscoveryConfig::default()
    };
    let strict = discover(store_from_lines(log), strict);
    assert_eq!(strict.steps_in(DiscoveryPhase::Sequential).count(), 0);
}

#[test]
fn json_export_of_result() {
    let result = discover(store_from_lines(ABC_ACB), DiscoveryConfig::default());
    let json = result.to_json().unwrap();
    assert!(json.contains("\"SEQ\""));
    assert!(json.contains("\"CON\""));
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["steps"].as_array().map(Vec::len), Some(2));
}

#[test]
fn discover_test_data_log() {
    let path = get_test_data_path().join("order-handling.txt");
    let store = import_text_log_file(path, TextImportOptions::default()).unwrap();
    let originals = store.distinct_actions();
    let initial_events = store.total_events();
    let result = discover(store, DiscoveryConfig::default());

    assert_eq!(
        initial_events,
        result.events_removed_total() + result.final_log.total_events()
    );
    let mut leaves: Vec<u32> = result
        .final_trees()
        .iter()
        .flat_map(|t| t.leaves())
        .collect();
    leaves.sort_unstable();
    assert_eq!(leaves, originals);
}
