use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: &'static str,
    at: Option<Millis>,
}

fn entry(id: &'static str, at: Option<Millis>) -> Entry {
    Entry { id, at }
}

fn ids(entries: &[Entry]) -> Vec<&'static str> {
    entries.iter().map(|e| e.id).collect()
}

#[test]
fn entries_without_a_timestamp_stay_queueing() {
    let list = QueuedList::from_snapshot(vec![entry("a", None), entry("b", Some(5))], |e| e.at);
    assert_eq!(ids(list.queueing()), vec!["a"]);
    assert_eq!(ids(list.active()), vec!["b"]);
}

#[test]
fn active_sorts_ascending_by_timestamp() {
    let list = QueuedList::from_snapshot(
        vec![
            entry("late", Some(30)),
            entry("early", Some(10)),
            entry("mid", Some(20)),
        ],
        |e| e.at,
    );
    assert_eq!(ids(list.active()), vec!["early", "mid", "late"]);
}

#[test]
fn timestamp_ties_keep_snapshot_order() {
    let list = QueuedList::from_snapshot(
        vec![entry("a", Some(5)), entry("b", Some(5)), entry("c", Some(5))],
        |e| e.at,
    );
    assert_eq!(ids(list.active()), vec!["a", "b", "c"]);
}

#[test]
fn promotion_happens_when_a_snapshot_backfills_the_timestamp() {
    let first = QueuedList::from_snapshot(vec![entry("a", Some(10)), entry("b", None)], |e| e.at);
    assert_eq!(ids(first.queueing()), vec!["b"]);

    let second =
        QueuedList::from_snapshot(vec![entry("a", Some(10)), entry("b", Some(5))], |e| e.at);
    assert_eq!(ids(second.active()), vec!["b", "a"]);
    assert!(second.queueing().is_empty());
}

#[test]
fn map_and_filter_map_apply_to_both_partitions() {
    let list = QueuedList::from_snapshot(vec![entry("a", Some(1)), entry("b", None)], |e| e.at);

    let mapped = list.map(|e| e.id);
    assert_eq!(mapped.active(), ["a"]);
    assert_eq!(mapped.queueing(), ["b"]);

    let only_b = list.filter_map(|e| (e.id == "b").then_some(e.id));
    assert!(only_b.active().is_empty());
    assert_eq!(only_b.queueing(), ["b"]);
    assert!(!only_b.is_empty());
}

#[test]
fn all_to_vec_lists_active_then_queueing() {
    let list = QueuedList::from_snapshot(
        vec![entry("pending", None), entry("confirmed", Some(7))],
        |e| e.at,
    );
    assert_eq!(ids(&list.all_to_vec()), vec!["confirmed", "pending"]);
    assert_eq!(list.len(), 2);
}
