use chart_histogram::scene::{NodeArena, Selection, positional_key};

#[derive(Debug, Clone, PartialEq)]
struct Node {
    label: &'static str,
    updates: usize,
}

fn create(datum: &&'static str, _index: usize) -> Node {
    Node {
        label: *datum,
        updates: 0,
    }
}

#[test]
fn positional_join_enters_only_the_new_tail() {
    let mut selection: Selection<Node> = Selection::new();
    selection
        .join(&["A", "B"], positional_key, create, drop)
        .expect("first join");

    let data = ["A", "B", "C"];
    let plan = selection.plan(&data, positional_key);
    assert_eq!(plan.enter_indices(), vec![2]);
    assert_eq!(plan.update_indices(), vec![0, 1]);
    assert!(plan.exit().is_empty());

    let summary = selection
        .apply(plan, &data, create, drop)
        .expect("second join");
    assert_eq!(summary.entered, 1);
    assert_eq!(summary.updated, 2);
    assert_eq!(summary.exited, 0);
    assert_eq!(selection.len(), 3);
}

#[test]
fn shrinking_data_destroys_surplus_nodes() {
    let mut selection: Selection<Node> = Selection::new();
    selection
        .join(&["A", "B", "C"], positional_key, create, drop)
        .expect("first join");

    let mut destroyed = Vec::new();
    let summary = selection
        .join(&["A"], positional_key, create, |node| destroyed.push(node.label))
        .expect("second join");

    assert_eq!(summary.exited, 2);
    destroyed.sort_unstable();
    assert_eq!(destroyed, vec!["B", "C"]);
    assert_eq!(selection.len(), 1);
}

#[test]
fn each_visits_live_nodes_in_data_order() {
    let mut selection: Selection<Node> = Selection::new();
    let data = ["A", "B", "C"];
    selection
        .join(&data, positional_key, create, drop)
        .expect("join");

    let mut seen = Vec::new();
    selection.each(&data, |node, datum, index| {
        node.updates += 1;
        seen.push((index, *datum));
    });

    assert_eq!(seen, vec![(0, "A"), (1, "B"), (2, "C")]);
    assert!(selection.nodes().all(|node| node.updates == 1));
}

#[test]
fn second_identical_join_is_a_pure_update() {
    let mut selection: Selection<Node, &'static str> = Selection::new();
    let data = ["A", "B", "C"];
    selection
        .join(&data, |_, datum| *datum, create, drop)
        .expect("first join");
    let handles = selection.handles();

    let summary = selection
        .join(&data, |_, datum| *datum, create, drop)
        .expect("second join");

    assert!(summary.is_pure_update());
    assert_eq!(selection.handles(), handles);
}

#[test]
fn keyed_join_follows_keys_not_positions() {
    let mut selection: Selection<Node, &'static str> = Selection::new();
    selection
        .join(&["A", "B", "C"], |_, datum| *datum, create, drop)
        .expect("first join");
    let before = selection.handles();

    let plan = selection.plan(&["C", "A", "D"], |_, datum| *datum);
    assert_eq!(plan.enter_indices(), vec![2]);
    assert_eq!(plan.update_indices(), vec![0, 1]);
    assert_eq!(plan.exit(), &[before[1]]);

    selection
        .apply(plan, &["C", "A", "D"], create, drop)
        .expect("apply");
    let labels: Vec<&str> = selection.nodes().map(|node| node.label).collect();
    assert_eq!(labels, vec!["C", "A", "D"]);
    assert_eq!(selection.keys().copied().collect::<Vec<_>>(), vec!["C", "A", "D"]);
}

#[test]
fn clear_destroys_everything() {
    let mut selection: Selection<Node> = Selection::new();
    selection
        .join(&["A", "B"], positional_key, create, drop)
        .expect("join");

    assert_eq!(selection.clear(drop), 2);
    assert!(selection.is_empty());
}

#[test]
fn arena_handles_go_stale_after_removal() {
    let mut arena = NodeArena::new();
    let first = arena.insert("a").expect("insert");
    assert_eq!(arena.remove(first), Some("a"));

    let second = arena.insert("b").expect("insert");
    assert_eq!(second.index(), first.index());
    assert_ne!(second.generation(), first.generation());
    assert_eq!(arena.get(first), None);
    assert_eq!(arena.get(second), Some(&"b"));
    assert_eq!(arena.len(), 1);
}
