use super::*;

fn ascending(a: &i32, b: &i32) -> Ordering {
    a.cmp(b)
}

#[test]
fn from_stable_sorts_with_the_comparator() {
    let list = SortedList::from(ascending, vec![4, 1, 3]);
    assert_eq!(list.to_vec(), vec![1, 3, 4]);
}

#[test]
fn update_keeps_survivor_order_and_appends_sorted_newcomers() {
    let previous = SortedList::from_presorted(vec![4, 1, 3]);
    let merged = previous.update(ascending, |n| *n, vec![6, 2, 4, 1, 3]);
    assert_eq!(merged.to_vec(), vec![4, 1, 3, 2, 6]);
}

#[test]
fn update_drops_entries_missing_from_the_snapshot() {
    let previous = SortedList::from_presorted(vec![4, 1, 3]);
    let merged = previous.update(ascending, |n| *n, vec![2, 1]);
    assert_eq!(merged.to_vec(), vec![1, 2]);
}

#[test]
fn update_after_from_matches_the_documented_merge() {
    let previous = SortedList::from(ascending, vec![4, 1, 3]);
    let merged = previous.update(ascending, |n| *n, vec![2, 4, 3, 1]);
    assert_eq!(merged.to_vec(), vec![1, 3, 4, 2]);
}

#[test]
fn update_refreshes_surviving_payloads() {
    let by_score = |a: &(char, i32), b: &(char, i32)| a.1.cmp(&b.1);
    let previous = SortedList::from_presorted(vec![('a', 1), ('b', 2)]);
    let merged = previous.update(by_score, |item| item.0, vec![('b', 9), ('a', 5)]);
    assert_eq!(merged.to_vec(), vec![('a', 5), ('b', 9)]);
}

#[test]
fn update_does_not_reshuffle_when_a_sort_key_moves() {
    let by_score = |a: &(char, i32), b: &(char, i32)| a.1.cmp(&b.1);
    let previous = SortedList::from_presorted(vec![('a', 1), ('b', 2)]);
    let merged = previous.update(by_score, |item| item.0, vec![('a', 9), ('b', 2)]);
    assert_eq!(merged.to_vec(), vec![('a', 9), ('b', 2)]);
    assert!(!merged.is_sorted_by(by_score));
}

#[test]
fn sort_commits_a_fresh_ranking() {
    let list = SortedList::from_presorted(vec![4, 1, 3]);
    assert!(!list.is_sorted_by(ascending));
    let sorted = list.sort(ascending);
    assert_eq!(sorted.to_vec(), vec![1, 3, 4]);
    assert!(sorted.is_sorted_by(ascending));
}

#[test]
fn empty_list_is_sorted() {
    let list: SortedList<i32> = SortedList::new();
    assert!(list.is_sorted_by(ascending));
    assert!(list.is_empty());
}
