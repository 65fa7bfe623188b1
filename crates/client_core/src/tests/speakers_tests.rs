use super::*;

use shared::domain::Millis;

fn entry(id: &str, user: &str, at: Option<Millis>) -> Contribution {
    Contribution {
        id: ContributionId::new(id),
        user_id: UserId::new(user),
        created_at: at,
    }
}

fn directory(pairs: &[(&str, &str)]) -> Remote<UserNames> {
    Remote::Got(UserNames::from_snapshot(
        pairs
            .iter()
            .map(|(id, name)| (UserId::new(*id), (*name).to_string()))
            .collect(),
    ))
}

#[test]
fn active_speaker_is_the_earliest_confirmed_entry() {
    let mut queues = SpeakerQueues::new();
    queues.apply_speakers(vec![
        entry("s2", "u2", Some(20)),
        entry("s1", "u1", Some(10)),
        entry("s3", "u3", None),
    ]);
    queues.apply_questions(Vec::new());

    let rotation = queues.rotation(&directory(&[("u1", "Ada"), ("u2", "Grace"), ("u3", "Mary")]));
    let rotation = rotation.got().expect("rotation ready");
    assert_eq!(
        rotation.active.as_ref().map(|speaker| speaker.name.as_str()),
        Some("Ada")
    );
    assert_eq!(rotation.following.len(), 1);
    assert_eq!(rotation.following[0].name, "Grace");
}

#[test]
fn unconfirmed_enqueue_is_never_promoted_to_active() {
    let mut queues = SpeakerQueues::new();
    queues.apply_speakers(vec![entry("s1", "u1", None)]);
    queues.apply_questions(Vec::new());

    let rotation = queues.rotation(&directory(&[("u1", "Ada")]));
    let rotation = rotation.got().expect("rotation ready");
    assert!(rotation.active.is_none());
    assert!(rotation.following.is_empty());
}

#[test]
fn rotation_waits_for_speakers_questions_and_names() {
    let mut queues = SpeakerQueues::new();
    queues.apply_speakers(vec![entry("s1", "u1", Some(10))]);
    assert!(queues.rotation(&directory(&[("u1", "Ada")])).is_loading());

    queues.apply_questions(Vec::new());
    assert!(queues.rotation(&Remote::Loading).is_loading());
    assert!(!queues.rotation(&directory(&[("u1", "Ada")])).is_loading());
}

#[test]
fn questions_list_confirmed_entries_in_queue_order() {
    let mut queues = SpeakerQueues::new();
    queues.apply_speakers(Vec::new());
    queues.apply_questions(vec![
        entry("q2", "u2", Some(8)),
        entry("q1", "u1", Some(3)),
        entry("q3", "u3", None),
    ]);

    let rotation = queues.rotation(&directory(&[("u1", "Ada"), ("u2", "Grace")]));
    let rotation = rotation.got().expect("rotation ready");
    let askers: Vec<&str> = rotation
        .questions
        .iter()
        .map(|question| question.user_id.as_str())
        .collect();
    assert_eq!(askers, vec!["u1", "u2"]);
}

#[test]
fn missing_names_fall_back_to_a_stable_pseudonym() {
    let mut queues = SpeakerQueues::new();
    queues.apply_speakers(vec![entry("s1", "u-anon", Some(10))]);
    queues.apply_questions(Vec::new());

    let rotation = queues.rotation(&directory(&[]));
    let rotation = rotation.got().expect("rotation ready");
    let active = rotation.active.as_ref().expect("confirmed speaker");
    assert_eq!(active.name, fallback_pseudonym(&UserId::new("u-anon")));
    assert!(!active.name.is_empty());
    assert!(!active.name_collides);
}

#[test]
fn pseudonyms_are_deterministic() {
    let first = fallback_pseudonym(&UserId::new("user-42"));
    let second = fallback_pseudonym(&UserId::new("user-42"));
    assert_eq!(first, second);
    assert!(first.contains(' '));
}

#[test]
fn colliding_names_are_flagged_on_the_entry() {
    let mut queues = SpeakerQueues::new();
    queues.apply_speakers(vec![entry("s1", "u1", Some(10)), entry("s2", "u2", Some(20))]);
    queues.apply_questions(Vec::new());

    let rotation = queues.rotation(&directory(&[("u1", "Alex"), ("u2", "Alex")]));
    let rotation = rotation.got().expect("rotation ready");
    assert!(rotation.active.as_ref().expect("speaker").name_collides);
    assert!(rotation.following[0].name_collides);
}

#[test]
fn clear_targets_cover_both_lanes_including_pending() {
    let mut queues = SpeakerQueues::new();
    queues.apply_speakers(vec![entry("s1", "u1", Some(10)), entry("s2", "u2", None)]);
    queues.apply_questions(vec![entry("q1", "u3", Some(5))]);

    let targets = queues.clear_all_targets().expect("both lanes known");
    assert_eq!(
        targets,
        vec![
            (Collection::Speakers, ContributionId::new("s1")),
            (Collection::Speakers, ContributionId::new("s2")),
            (Collection::Questions, ContributionId::new("q1")),
        ]
    );
}

#[test]
fn clear_targets_absent_while_a_lane_is_loading() {
    let mut queues = SpeakerQueues::new();
    queues.apply_speakers(vec![entry("s1", "u1", Some(10))]);
    assert!(queues.clear_all_targets().is_none());
}
