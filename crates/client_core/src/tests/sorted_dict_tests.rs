use super::*;

fn dict_from(pairs: &[(&str, i32)]) -> SortedDict<String, i32> {
    let mut dict = SortedDict::new();
    for (key, value) in pairs {
        dict.insert((*key).to_string(), *value);
    }
    dict
}

#[test]
fn to_vec_returns_entries_in_insertion_order() {
    let dict = dict_from(&[("c", 1), ("a", 2), ("b", 3)]);
    assert_eq!(
        dict.to_vec(),
        vec![("c".into(), 1), ("a".into(), 2), ("b".into(), 3)]
    );
}

#[test]
fn insert_on_existing_key_updates_value_without_moving_it() {
    let mut dict = dict_from(&[("a", 1), ("b", 2), ("c", 3)]);
    dict.insert("b".to_string(), 20);
    assert_eq!(
        dict.to_vec(),
        vec![("a".into(), 1), ("b".into(), 20), ("c".into(), 3)]
    );
}

#[test]
fn remove_then_reinsert_appends_at_the_end() {
    let mut dict = dict_from(&[("a", 1), ("b", 2), ("c", 3)]);
    assert_eq!(dict.remove(&"a".to_string()), Some(1));
    assert!(!dict.contains_key(&"a".to_string()));
    dict.insert("a".to_string(), 10);
    assert_eq!(
        dict.to_vec(),
        vec![("b".into(), 2), ("c".into(), 3), ("a".into(), 10)]
    );
}

#[test]
fn remove_of_unknown_key_is_none() {
    let mut dict = dict_from(&[("a", 1)]);
    assert_eq!(dict.remove(&"zz".to_string()), None);
    assert_eq!(dict.len(), 1);
}

#[test]
fn stable_sort_keeps_tied_entries_in_prior_relative_order() {
    let mut dict = dict_from(&[("d", 2), ("a", 1), ("c", 2), ("b", 1)]);
    dict.stable_sort_with(|(_, x), (_, y)| x.cmp(y));
    assert_eq!(
        dict.to_vec(),
        vec![("a".into(), 1), ("b".into(), 1), ("d".into(), 2), ("c".into(), 2)]
    );
}

#[test]
fn sort_does_not_survive_later_inserts() {
    let mut dict = dict_from(&[("b", 2), ("a", 1)]);
    dict.stable_sort_with(|(_, x), (_, y)| x.cmp(y));
    dict.insert("aa".to_string(), 0);
    assert_eq!(
        dict.to_vec(),
        vec![("a".into(), 1), ("b".into(), 2), ("aa".into(), 0)]
    );
}
