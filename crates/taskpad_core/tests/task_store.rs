use taskpad_core::{filter_tasks, Category, FilterCriterion, TaskStats, TaskStore};

const NOW: i64 = 1_792_411_200_000;

fn seeded_store() -> TaskStore {
    let mut store = TaskStore::new();
    store.add("write report", Category::Work, None, NOW);
    store.add("water plants", Category::Personal, None, NOW + 1);
    store.add("server down", Category::Urgent, Some(NOW + 60_000), NOW + 2);
    store.add("book dentist", Category::Personal, None, NOW + 3);
    store.add("review PR", Category::Work, None, NOW + 4);
    store
}

#[test]
fn add_inserts_open_task_at_front() {
    let mut store = seeded_store();
    let before = store.len();

    let id = store
        .add("  buy milk  ", Category::Personal, None, NOW + 10)
        .unwrap()
        .id
        .clone();

    assert_eq!(store.len(), before + 1);
    let first = &store.tasks()[0];
    assert_eq!(first.id, id);
    assert_eq!(first.content, "buy milk");
    assert!(!first.completed);
    assert_eq!(first.completed_at, None);
    assert_eq!(first.created_at, NOW + 10);
    assert!(!first.reminder_shown);
}

#[test]
fn add_blank_content_is_a_no_op() {
    let mut store = seeded_store();
    let snapshot = store.clone();

    assert!(store.add("", Category::Work, None, NOW).is_none());
    assert!(store.add(" \t\n ", Category::Work, None, NOW).is_none());
    assert_eq!(store, snapshot);
}

#[test]
fn toggle_twice_restores_completion_fields() {
    let mut store = seeded_store();
    let id = store.tasks()[2].id.clone();
    let original = store.get(&id).unwrap().clone();

    assert_eq!(store.toggle_complete(&id, NOW + 100), Some(true));
    let completed = store.get(&id).unwrap();
    assert!(completed.completed);
    assert_eq!(completed.completed_at, Some(NOW + 100));

    assert_eq!(store.toggle_complete(&id, NOW + 200), Some(false));
    let reverted = store.get(&id).unwrap();
    assert_eq!(reverted.completed, original.completed);
    assert_eq!(reverted.completed_at, original.completed_at);
}

#[test]
fn toggle_and_delete_unknown_ids_change_nothing() {
    let mut store = seeded_store();
    let snapshot = store.clone();

    assert_eq!(store.toggle_complete("nope", NOW), None);
    assert!(store.delete("nope").is_none());
    assert_eq!(store, snapshot);
}

#[test]
fn delete_removes_only_the_matching_task() {
    let mut store = seeded_store();
    let victim = store.tasks()[1].id.clone();
    let survivors: Vec<_> = store
        .ids()
        .into_iter()
        .filter(|id| *id != victim)
        .collect();

    let removed = store.delete(&victim).unwrap();
    assert_eq!(removed.id, victim);
    assert_eq!(store.ids(), survivors);
}

#[test]
fn filter_all_returns_input_unchanged() {
    let store = seeded_store();
    let all: Vec<_> = filter_tasks(store.tasks(), FilterCriterion::All)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(all, store.tasks());
}

#[test]
fn filter_completed_is_ordered_completed_subset() {
    let mut store = seeded_store();
    let ids = store.ids();
    store.toggle_complete(&ids[3], NOW);
    store.toggle_complete(&ids[0], NOW);

    let completed: Vec<_> = filter_tasks(store.tasks(), FilterCriterion::Completed)
        .into_iter()
        .map(|task| task.id.clone())
        .collect();
    assert_eq!(completed, vec![ids[0].clone(), ids[3].clone()]);
}

#[test]
fn category_filters_ignore_completion() {
    let mut store = seeded_store();
    let work_ids: Vec<_> = store
        .tasks()
        .iter()
        .filter(|task| task.category == Category::Work)
        .map(|task| task.id.clone())
        .collect();
    store.toggle_complete(&work_ids[0], NOW);

    let work: Vec<_> = filter_tasks(store.tasks(), FilterCriterion::Work)
        .into_iter()
        .map(|task| task.id.clone())
        .collect();
    assert_eq!(work, work_ids);

    for criterion in [FilterCriterion::Personal, FilterCriterion::Urgent] {
        assert!(filter_tasks(store.tasks(), criterion)
            .iter()
            .all(|task| task.category != Category::Work));
    }
}

#[test]
fn stats_count_pending_and_completed() {
    let mut store = seeded_store();
    let ids = store.ids();
    store.toggle_complete(&ids[1], NOW);
    store.toggle_complete(&ids[4], NOW);

    let stats = TaskStats::from_tasks(store.tasks());
    assert_eq!((stats.total, stats.pending, stats.completed), (5, 3, 2));
    assert_eq!(stats.summary(), "5 tasks (3 pending, 2 completed)");

    let empty = TaskStats::from_tasks(&[]);
    assert_eq!((empty.total, empty.pending, empty.completed), (0, 0, 0));
}
