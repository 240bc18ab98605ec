use std::cell::RefCell;
use taskpad_core::controller::notice::{
    MSG_SAVE_TASKS_FAILED, MSG_SAVE_THEME_FAILED, MSG_TASK_ADDED, MSG_TASK_COMPLETED,
    MSG_TASK_DELETED, MSG_TASK_EMPTY, MSG_TASK_REOPENED,
};
use taskpad_core::{
    ActionBinding, Category, DismissReason, FilterCriterion, HostCapabilities, KeyValueStore,
    MemoryKeyValueStore, NoopNotifier, NoticeLevel, Notifier, NotifyError, TaskAction,
    TaskpadConfig, Theme, TodoController, UiEvent,
};

const NOW: i64 = 1_792_411_200_000;
const MINUTE: i64 = 60_000;

#[derive(Default)]
struct RecordingNotifier {
    sent: RefCell<Vec<(String, String)>>,
    fail: bool,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        self.sent
            .borrow_mut()
            .push((title.to_string(), body.to_string()));
        if self.fail {
            return Err(NotifyError("host refused".to_string()));
        }
        Ok(())
    }
}

fn controller<'a>(
    kv: &'a MemoryKeyValueStore,
    notifier: &'a RecordingNotifier,
    capabilities: HostCapabilities,
) -> TodoController<&'a MemoryKeyValueStore, &'a RecordingNotifier> {
    TodoController::new(TaskpadConfig::default(), kv, notifier, capabilities)
}

#[test]
fn due_soon_task_reminds_exactly_once() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::new(true, false));

    let id = app
        .add_task("Buy milk", Some(Category::Personal), Some(NOW + 10 * MINUTE), NOW)
        .unwrap();
    for (criterion, visible) in [
        (FilterCriterion::All, true),
        (FilterCriterion::Personal, true),
        (FilterCriterion::Work, false),
        (FilterCriterion::Urgent, false),
        (FilterCriterion::Completed, false),
    ] {
        app.set_filter(criterion);
        let listed = app.filtered_tasks().iter().any(|task| task.id == id);
        assert_eq!(listed, visible, "filter {criterion}");
    }
    app.start(NOW);

    let fired = app.poll(NOW);
    assert_eq!(fired.len(), 1);
    assert_eq!(
        app.modal().message(),
        Some("📅 Task \"Buy milk\" is due soon!")
    );
    assert!(app.task(&id).unwrap().reminder_shown);
    assert_eq!(
        notifier.sent.borrow().as_slice(),
        &[(
            "Task Reminder".to_string(),
            "📅 Task \"Buy milk\" is due soon!".to_string()
        )]
    );

    assert!(app.dismiss_reminder(DismissReason::CloseButton));
    assert!(!app.modal().is_visible());

    assert!(app.poll(NOW + MINUTE).is_empty());
    assert!(!app.modal().is_visible());
    assert_eq!(notifier.sent.borrow().len(), 1);

    // The shown flag is persisted, so a restart does not remind again.
    let mut restarted = controller(&kv, &notifier, HostCapabilities::new(true, false));
    restarted.start(NOW + 2 * MINUTE);
    assert!(restarted.poll(NOW + 2 * MINUTE).is_empty());
}

#[test]
fn schedule_only_scans_when_due() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let config = TaskpadConfig {
        tick_interval_ms: 20 * MINUTE,
        ..TaskpadConfig::default()
    };
    let mut app = TodoController::new(config, &kv, &notifier, HostCapabilities::default());
    let id = app
        .add_task("stand-up", Some(Category::Work), Some(NOW + 45 * MINUTE), NOW)
        .unwrap();

    // Not started: no scan at all.
    assert!(app.poll(NOW + 20 * MINUTE).is_empty());
    assert!(!app.task(&id).unwrap().reminder_shown);

    app.start(NOW);
    assert!(app.poll(NOW).is_empty());
    // Inside the lead window, but the next tick is not due yet.
    assert!(app.poll(NOW + 20 * MINUTE - 1).is_empty());
    assert_eq!(app.poll(NOW + 20 * MINUTE).len(), 1);
    assert_eq!(app.schedule().next_due_ms(), Some(NOW + 40 * MINUTE));

    app.stop();
    assert!(!app.schedule().is_running());
    assert!(app.poll(NOW + 60 * MINUTE).is_empty());
}

#[test]
fn notifications_require_granted_capability() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::new(false, false));
    app.add_task("late report", Some(Category::Work), Some(NOW - 5 * MINUTE), NOW - MINUTE);

    let fired = app.run_reminder_scan(NOW);
    assert_eq!(fired.len(), 1);
    assert_eq!(
        app.modal().message(),
        Some("⚠️ Task \"late report\" is overdue!")
    );
    assert!(notifier.sent.borrow().is_empty());
}

#[test]
fn failing_notifier_does_not_block_modal() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier {
        fail: true,
        ..RecordingNotifier::default()
    };
    let mut app = controller(&kv, &notifier, HostCapabilities::new(true, false));
    let id = app
        .add_task("pick up kids", None, Some(NOW + 5 * MINUTE), NOW)
        .unwrap();

    assert_eq!(app.run_reminder_scan(NOW).len(), 1);
    assert!(app.modal().is_visible());
    assert!(app.task(&id).unwrap().reminder_shown);
    assert_eq!(notifier.sent.borrow().len(), 1);
}

#[test]
fn modal_shows_latest_of_several_reminders() {
    let kv = MemoryKeyValueStore::new();
    let mut app = TodoController::new(
        TaskpadConfig::default(),
        &kv,
        NoopNotifier,
        HostCapabilities::default(),
    );
    app.add_task("first", None, Some(NOW + MINUTE), NOW);
    app.add_task("second", None, Some(NOW + 2 * MINUTE), NOW);

    let fired = app.run_reminder_scan(NOW);
    assert_eq!(fired.len(), 2);
    assert_eq!(
        app.modal().message(),
        Some(fired[1].message.as_str())
    );
}

#[test]
fn state_survives_restart() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::default());
    app.add_task("water plants", Some(Category::Personal), None, NOW);
    let id = app
        .add_task("deploy", Some(Category::Urgent), Some(NOW + 86_400_000), NOW + 1)
        .unwrap();
    app.toggle_complete(&id, NOW + 2);
    assert!(app.toggle_dark_mode());
    let tasks = app.tasks().to_vec();
    drop(app);

    let restarted = controller(&kv, &notifier, HostCapabilities::default());
    assert_eq!(restarted.tasks(), tasks.as_slice());
    assert!(restarted.dark_mode());
    assert_eq!(restarted.theme(), Theme::Dark);
}

#[test]
fn unset_theme_follows_system_and_saved_value_wins() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();

    let app = controller(&kv, &notifier, HostCapabilities::new(false, true));
    assert!(app.dark_mode());
    assert_eq!(kv.get("todoAppDarkMode").unwrap(), None);

    kv.set("todoAppDarkMode", "false").unwrap();
    let app = controller(&kv, &notifier, HostCapabilities::new(false, true));
    assert!(!app.dark_mode());
}

#[test]
fn dark_mode_toggle_persists_each_flip() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::default());

    assert!(app.toggle_dark_mode());
    assert_eq!(kv.get("todoAppDarkMode").unwrap().as_deref(), Some("true"));
    assert!(!app.toggle_dark_mode());
    assert_eq!(kv.get("todoAppDarkMode").unwrap().as_deref(), Some("false"));
}

#[test]
fn storage_fault_keeps_memory_state_and_reports() {
    let kv = MemoryKeyValueStore::with_quota(16);
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::default());

    let id = app.add_task("too big to store", None, None, NOW).unwrap();
    assert!(app.task(&id).is_some());
    assert_eq!(kv.get("todoTasks").unwrap(), None);

    let notices = app.drain_notices();
    assert!(notices
        .iter()
        .any(|notice| notice.level == NoticeLevel::Error
            && notice.message == MSG_SAVE_TASKS_FAILED));
    assert!(notices.iter().any(|notice| notice.message == MSG_TASK_ADDED));
}

#[test]
fn theme_save_fault_is_reported() {
    let kv = MemoryKeyValueStore::with_quota(4);
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::default());

    // "true" fits, "false" does not.
    assert!(app.toggle_dark_mode());
    assert!(app.drain_notices().is_empty());
    assert!(!app.toggle_dark_mode());
    let notices = app.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, MSG_SAVE_THEME_FAILED);
    assert!(!app.dark_mode());
}

#[test]
fn blank_submission_reports_and_changes_nothing() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::default());

    assert!(!app.dispatch(
        UiEvent::SubmitTask {
            content: "   ".to_string(),
            category: Some(Category::Work),
            due_date: None,
        },
        NOW,
    ));
    assert!(app.tasks().is_empty());
    assert_eq!(kv.get("todoTasks").unwrap(), None);
    let notices = app.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, MSG_TASK_EMPTY);
}

#[test]
fn default_category_comes_from_config() {
    let kv = MemoryKeyValueStore::new();
    let config = TaskpadConfig::from_json_str(r#"{"default_category":"urgent"}"#).unwrap();
    let mut app = TodoController::new(config, &kv, NoopNotifier, HostCapabilities::default());

    let id = app.add_task("triage", None, None, NOW).unwrap();
    assert_eq!(app.task(&id).unwrap().category, Category::Urgent);
}

#[test]
fn row_events_toggle_and_delete_in_two_phases() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::default());
    let keep = app.add_task("keep", None, None, NOW).unwrap();
    let drop_id = app.add_task("drop", None, None, NOW + 1).unwrap();
    app.drain_notices();

    let complete = ActionBinding::new(TaskAction::Complete, keep.clone()).encode();
    assert!(app.dispatch(UiEvent::Row(ActionBinding::decode(&complete).unwrap()), NOW + 2));
    assert!(app.task(&keep).unwrap().completed);
    assert!(app.dispatch(UiEvent::Row(ActionBinding::decode(&complete).unwrap()), NOW + 3));
    assert!(!app.task(&keep).unwrap().completed);
    let messages: Vec<_> = app
        .drain_notices()
        .into_iter()
        .map(|notice| notice.message)
        .collect();
    assert_eq!(messages, vec![MSG_TASK_COMPLETED, MSG_TASK_REOPENED]);

    let delete = UiEvent::Row(ActionBinding::new(TaskAction::Delete, drop_id.clone()));
    assert!(app.dispatch(delete.clone(), NOW + 10));
    assert!(!app.dispatch(delete, NOW + 11));

    let view = app.render(NOW + 20);
    let row = view.items.iter().find(|item| item.id == drop_id).unwrap();
    assert!(row.removing);

    app.poll(NOW + 10 + 299);
    assert!(app.task(&drop_id).is_some());
    app.poll(NOW + 10 + 300);
    assert!(app.task(&drop_id).is_none());
    assert!(app.task(&keep).is_some());
    assert_eq!(app.drain_notices()[0].message, MSG_TASK_DELETED);

    let reloaded = controller(&kv, &notifier, HostCapabilities::default());
    assert_eq!(reloaded.tasks().len(), 1);
}

#[test]
fn unknown_row_ids_are_ignored() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::default());
    app.add_task("only", None, None, NOW);
    app.drain_notices();
    let before = app.tasks().to_vec();

    assert!(!app.toggle_complete("ghost", NOW));
    assert!(!app.begin_delete("ghost", NOW));
    assert!(!app.delete_task("ghost"));
    assert_eq!(app.tasks(), before.as_slice());
    assert!(app.drain_notices().is_empty());
}

#[test]
fn render_reflects_filter_stats_and_empty_state() {
    let kv = MemoryKeyValueStore::new();
    let notifier = RecordingNotifier::default();
    let mut app = controller(&kv, &notifier, HostCapabilities::default());
    let view = app.render(NOW);
    assert!(view.is_empty);
    assert_eq!(view.stats_text, "0 tasks");

    app.add_task("email boss", Some(Category::Work), Some(NOW + 3 * 86_400_000), NOW);
    let errand = app
        .add_task("post office", Some(Category::Personal), Some(NOW - 86_400_000), NOW)
        .unwrap();
    app.toggle_complete(&errand, NOW);

    assert!(app.dispatch(UiEvent::SetFilter(FilterCriterion::Work), NOW));
    assert!(!app.set_filter(FilterCriterion::Work));
    let view = app.render(NOW);
    assert_eq!(view.filter, FilterCriterion::Work);
    assert_eq!(view.items.len(), 1);
    let row = &view.items[0];
    assert_eq!(row.category_icon, "💼");
    assert_eq!(row.toggle_title, "Mark as complete");
    assert_eq!(row.due.as_ref().unwrap().text, "Due in 3 days");
    assert_eq!(view.stats_text, "2 tasks (1 pending, 1 completed)");

    app.set_filter(FilterCriterion::Completed);
    let view = app.render(NOW);
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].due.as_ref().unwrap().text, "Overdue (1 days ago)");
    assert_eq!(view.items[0].toggle_title, "Mark as incomplete");

    app.set_filter(FilterCriterion::Urgent);
    assert!(app.render(NOW).is_empty);
}
