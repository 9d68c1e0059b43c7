use chrono::NaiveDate;
use lifeorg::clock::FixedClock;
use lifeorg::commands::{cmd_finance_add, cmd_shop_edit};
use lifeorg::models::{
    AssignmentStatus, Currency, Frequency, HabitFrequency, ItemDraft, ItemFrequency, ItemPatch,
    Priority, TaskDraft, TransactionKind,
};
use lifeorg::storage::{FileStorage, MemoryStorage, Slot, Storage};
use lifeorg::tasks::Toggle;
use lifeorg::{AppError, Organizer, StorageError};

fn clock(at: &str) -> Box<FixedClock> {
    Box::new(FixedClock::at(at).unwrap())
}

fn organizer_at(at: &str) -> Organizer {
    Organizer::load(Box::new(MemoryStorage::new()), clock(at)).unwrap()
}

fn meditate() -> TaskDraft {
    TaskDraft {
        title: "Meditate".into(),
        date: "2024-03-01".into(),
        time: "07:00".into(),
        priority: Priority::Low,
        frequency: Frequency::Daily,
    }
}

#[test]
fn test_every_task_change_is_committed() {
    let mut org = organizer_at("2024-03-01T06:00:00+00:00");
    assert!(org.storage().read(Slot::Tasks).unwrap().is_none());

    let id = org.add_task(meditate()).unwrap();
    let stored = org.storage().read(Slot::Tasks).unwrap().unwrap();
    assert!(stored.contains("Meditate"));

    let toggled = org.toggle_task_completion(id).unwrap();
    assert!(matches!(toggled, Some(Toggle::Completed { on_time: true, successor: Some(_) })));

    let reloaded = Organizer::load(org.into_storage(), clock("2024-03-01T06:00:00+00:00")).unwrap();
    assert_eq!(reloaded.tasks().len(), 2);
    assert!(reloaded.tasks().get(id).unwrap().completed);
    assert!(reloaded.tasks().all().iter().any(|t| t.date == "2024-03-02" && !t.completed));
}

#[test]
fn test_no_op_delete_leaves_slot_bytes_unchanged() {
    let mut org = organizer_at("2024-03-01T06:00:00+00:00");
    org.add_task(meditate()).unwrap();
    let before = org.storage().read(Slot::Tasks).unwrap();

    assert!(!org.delete_task(999).unwrap());
    assert_eq!(org.toggle_task_completion(999).unwrap(), None);
    assert_eq!(org.storage().read(Slot::Tasks).unwrap(), before);
}

#[test]
fn test_add_then_delete_restores_stored_slot() {
    let mut org = organizer_at("2024-03-01T06:00:00+00:00");
    org.add_task(meditate()).unwrap();
    let before = org.storage().read(Slot::Tasks).unwrap();

    let id = org.add_task(TaskDraft { title: "Temp".into(), ..meditate() }).unwrap();
    assert!(org.delete_task(id).unwrap());
    assert_eq!(org.storage().read(Slot::Tasks).unwrap(), before);
}

#[test]
fn test_quota_failure_propagates_and_keeps_state() {
    let storage = MemoryStorage::with_quota(400);
    let mut org = Organizer::load(Box::new(storage), clock("2024-03-01T06:00:00+00:00")).unwrap();

    org.add_task(meditate()).unwrap();
    let stored = org.storage().read(Slot::Tasks).unwrap();
    let in_memory = org.tasks().clone();

    // Completing spawns a successor, which doubles the document past the quota
    let err = org.toggle_task_completion(1).unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { slot: Slot::Tasks, .. }));

    assert_eq!(org.tasks(), &in_memory);
    assert!(!org.tasks().get(1).unwrap().completed);
    assert_eq!(org.storage().read(Slot::Tasks).unwrap(), stored);
}

#[test]
fn test_file_storage_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let now = "2024-03-01T06:00:00+00:00";

    {
        let mut org = Organizer::load(Box::new(FileStorage::new(dir.path())), clock(now)).unwrap();
        org.add_task(meditate()).unwrap();
        org.add_habit("Drink water".into(), HabitFrequency::Daily).unwrap();
        org.add_transaction(5000.0, "Salary".into(), TransactionKind::Income).unwrap();
    }

    assert!(dir.path().join("tasks.json").exists());
    assert!(dir.path().join("habits.json").exists());
    assert!(!dir.path().join("notes.json").exists());

    let org = Organizer::load(Box::new(FileStorage::new(dir.path())), clock(now)).unwrap();
    assert_eq!(org.tasks().len(), 1);
    assert_eq!(org.habits().all().len(), 1);
    assert_eq!(org.finance().balance(), 5000.0);
}

#[test]
fn test_corrupt_slot_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tasks.json"), "{ not json").unwrap();

    let mut org =
        Organizer::load(Box::new(FileStorage::new(dir.path())), clock("2024-03-01T06:00:00+00:00")).unwrap();
    assert!(org.tasks().is_empty());

    org.add_task(meditate()).unwrap();
    let raw = std::fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(raw.contains("Meditate"));
}

#[test]
fn test_reset_clears_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut org =
        Organizer::load(Box::new(FileStorage::new(dir.path())), clock("2024-03-01T06:00:00+00:00")).unwrap();
    org.add_task(meditate()).unwrap();
    org.add_goal("Run a 10k".into(), "October".into()).unwrap();

    org.reset().unwrap();
    assert!(org.tasks().is_empty());
    assert!(org.goals().all().is_empty());
    assert!(!dir.path().join("tasks.json").exists());
    assert!(!dir.path().join("goals.json").exists());
}

#[test]
fn test_habit_streak_follows_checks() {
    let mut org = organizer_at("2024-03-01T20:00:00+00:00");
    let id = org.add_habit("Read".into(), HabitFrequency::Daily).unwrap();

    assert_eq!(org.toggle_habit(id).unwrap(), Some(true));
    assert_eq!(org.habits().get(id).unwrap().streak, 1);
    assert_eq!(org.toggle_habit(id).unwrap(), Some(false));
    assert_eq!(org.habits().get(id).unwrap().streak, 0);
    assert_eq!(org.habits().done_count(org.today()), 0);
    assert_eq!(org.toggle_habit(42).unwrap(), None);
}

#[test]
fn test_frequent_purchase_becomes_recommendation() {
    let mut org = organizer_at("2024-03-01T10:00:00+00:00");
    org.set_shopping_budget(1000.0, Currency::Naira).unwrap();
    let bread = org
        .add_shopping_item(ItemDraft {
            name: "Bread".into(),
            cost: 800.0,
            currency: Currency::Naira,
            note: String::new(),
            frequency: ItemFrequency::Frequent,
        })
        .unwrap();
    org.add_shopping_item(ItemDraft { name: "Candles".into(), cost: 300.0, ..ItemDraft::default() })
        .unwrap();
    assert!(org.shopping().is_over_budget());

    assert!(org.mark_item_purchased(bread).unwrap());
    assert_eq!(org.shopping().items().len(), 1);
    assert!(!org.shopping().is_over_budget());

    let recs: Vec<u64> = org.shopping().visible_recommendations().iter().map(|r| r.id).collect();
    assert_eq!(recs.len(), 1);

    let again = org.restore_recommendation(recs[0]).unwrap().unwrap();
    assert_eq!(org.shopping().items().iter().find(|i| i.id == again).unwrap().name, "Bread");
    // hidden while the item is on the list
    assert!(org.shopping().visible_recommendations().is_empty());
}

#[test]
fn test_notes_journal_and_student_records() {
    let mut org = organizer_at("2024-03-01T10:00:00+00:00");
    assert_eq!(org.add_note("  ".into(), String::new()).unwrap(), None);
    org.add_note("Groceries".into(), "eggs, rice".into()).unwrap();
    org.add_journal_entry("Grateful for sunshine".into()).unwrap();

    assert_eq!(org.notes().search("RICE").len(), 1);
    assert_eq!(org.notes().search("sunshine").len(), 0);
    assert_eq!(org.notes().journal().len(), 1);

    let hw = org.add_assignment("Maths".into(), "Problem set 3".into(), "2024-03-04T23:59".into()).unwrap();
    org.add_exam("Physics".into(), "2024-03-04T09:00".into(), "Chapters 1-4".into()).unwrap();
    assert_eq!(org.toggle_assignment(hw).unwrap(), Some(AssignmentStatus::Done));

    let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
    assert_eq!(org.student().assignments_due(day).len(), 1);
    assert_eq!(org.student().exams_on(day).len(), 1);
}

#[test]
fn test_edit_rejects_non_finite_cost_and_keeps_list() {
    let dir = tempfile::tempdir().unwrap();
    let now = "2024-03-01T10:00:00+00:00";
    let mut org = Organizer::load(Box::new(FileStorage::new(dir.path())), clock(now)).unwrap();
    let milk = org
        .add_shopping_item(ItemDraft { name: "Milk".into(), cost: 2.5, ..ItemDraft::default() })
        .unwrap();
    org.add_shopping_item(ItemDraft { name: "Eggs".into(), cost: 4.0, ..ItemDraft::default() })
        .unwrap();
    let before = std::fs::read_to_string(dir.path().join("shopping.json")).unwrap();

    for cost in [f64::NAN, f64::INFINITY, -1.0] {
        let err = cmd_shop_edit(&mut org, milk, ItemPatch { cost: Some(cost), ..ItemPatch::default() })
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "cost {cost}: {err:?}");
    }
    assert_eq!(std::fs::read_to_string(dir.path().join("shopping.json")).unwrap(), before);

    cmd_shop_edit(&mut org, milk, ItemPatch { cost: Some(3.0), ..ItemPatch::default() }).unwrap();
    let org = Organizer::load(Box::new(FileStorage::new(dir.path())), clock(now)).unwrap();
    assert_eq!(org.shopping().items().len(), 2);
    assert_eq!(org.shopping().items().iter().find(|i| i.id == milk).unwrap().cost, 3.0);
}

#[test]
fn test_negative_transaction_is_refused() {
    let mut org = organizer_at("2024-03-01T10:00:00+00:00");

    let err = cmd_finance_add(&mut org, -50.0, "Refund".into(), TransactionKind::Income).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
    let err = cmd_finance_add(&mut org, f64::NAN, "Refund".into(), TransactionKind::Income).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    assert!(org.finance().transactions().is_empty());
    assert!(org.storage().read(Slot::Finance).unwrap().is_none());

    cmd_finance_add(&mut org, 50.0, "Refund".into(), TransactionKind::Income).unwrap();
    assert_eq!(org.finance().balance(), 50.0);
}
