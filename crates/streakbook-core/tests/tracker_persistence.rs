//! End-to-end tracker scenarios against the SQLite store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use streakbook_core::finance::{parse_amount, MAX_WHOLE_AMOUNT};
use streakbook_core::storage::keys;
use streakbook_core::{
    BudgetStatus, EntryKind, FixedClock, KeyValueStore, KvDatabase, Snapshot, Tracker,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("streakbook.db");
    let clock = FixedClock::new(day(2025, 12, 1));

    let before = {
        let mut tracker = Tracker::open(KvDatabase::open_at(&path).unwrap(), &clock);
        let gym = tracker.add_habit("Gym").unwrap();
        let pray = tracker.add_habit("Pray").unwrap();
        tracker.mark_done(gym.id());
        clock.advance(1);
        tracker.mark_done(gym.id());
        tracker.mark_done(pray.id());
        tracker.toggle_on_date("Pray", day(2025, 11, 28));
        tracker
            .add_entry(EntryKind::Income, "Salary", Decimal::from(1000))
            .unwrap();
        tracker
            .add_entry(EntryKind::Expense, "Groceries", Decimal::new(2505, 1))
            .unwrap();
        tracker.set_budget(Decimal::from(400)).unwrap();
        tracker.snapshot()
    };

    let tracker = Tracker::open(KvDatabase::open_at(&path).unwrap(), &clock);
    assert_eq!(tracker.snapshot(), before);
    assert_eq!(tracker.habits().find_by_name("Gym").unwrap().streak(), 2);
    assert_eq!(tracker.finance().entries().len(), 2);
    assert_eq!(tracker.budget().unwrap().limit(), Decimal::from(400));
}

#[test]
fn snapshot_roundtrips_through_any_store() {
    let clock = FixedClock::new(day(2025, 12, 5));
    let mut tracker = Tracker::open(KvDatabase::open_memory().unwrap(), &clock);
    let read = tracker.add_habit("Read").unwrap();
    tracker.mark_done(read.id());
    tracker
        .add_entry(EntryKind::Expense, "Tea", Decimal::from(5))
        .unwrap();
    let snapshot = tracker.snapshot();

    let mut copy = KvDatabase::open_memory().unwrap();
    assert!(snapshot.save(&mut copy));
    assert_eq!(Snapshot::load(&copy), snapshot);
}

#[test]
fn precise_amounts_reload_unchanged() {
    let clock = FixedClock::new(day(2025, 12, 5));
    let mut tracker = Tracker::open(KvDatabase::open_memory().unwrap(), &clock);
    for (desc, raw) in [("Tea", "0.12345678901234567891"), ("Rent", "999999999999.99")] {
        let amount = parse_amount(raw).unwrap();
        tracker.add_entry(EntryKind::Expense, desc, amount).unwrap();
    }
    tracker
        .add_entry(EntryKind::Income, "Salary", Decimal::from(MAX_WHOLE_AMOUNT))
        .unwrap();
    tracker.set_budget(Decimal::new(12345678, 4)).unwrap();
    let snapshot = tracker.snapshot();

    let reloaded = Snapshot::load(tracker.store());
    assert_eq!(reloaded, snapshot);
    assert_eq!(reloaded.finances.len(), 3);
    assert_eq!(reloaded.finances[0].amount, Decimal::new(12, 2));
}

#[test]
fn rejected_amounts_leave_the_ledger_intact() {
    let clock = FixedClock::new(day(2025, 12, 5));
    let mut tracker = Tracker::open(KvDatabase::open_memory().unwrap(), &clock);
    tracker
        .add_entry(EntryKind::Expense, "Tea", Decimal::from(5))
        .unwrap();
    assert!(tracker
        .add_entry(EntryKind::Expense, "Big", Decimal::MAX)
        .is_err());

    let reloaded = Snapshot::load(tracker.store());
    assert_eq!(reloaded.finances.len(), 1);
    assert_eq!(reloaded.finances[0].description, "Tea");
}

#[test]
fn records_use_documented_layout() {
    let clock = FixedClock::new(day(2025, 12, 1));
    let mut tracker = Tracker::open(KvDatabase::open_memory().unwrap(), &clock);
    let gym = tracker.add_habit("Gym").unwrap();
    tracker.mark_done(gym.id());
    tracker
        .add_entry(EntryKind::Expense, "Tea", Decimal::from(5))
        .unwrap();

    let store = tracker.into_store();
    let activities: serde_json::Value =
        serde_json::from_str(&store.get(keys::ACTIVITIES).unwrap().unwrap()).unwrap();
    assert_eq!(activities[0]["name"], "Gym");
    assert_eq!(activities[0]["streak"], 1);
    assert_eq!(activities[0]["lastDone"], "2025-12-01");

    let logs: serde_json::Value =
        serde_json::from_str(&store.get(keys::HABIT_LOGS).unwrap().unwrap()).unwrap();
    assert_eq!(logs["2025-12-01"][0], "Gym");

    let finances: serde_json::Value =
        serde_json::from_str(&store.get(keys::FINANCES).unwrap().unwrap()).unwrap();
    assert_eq!(finances[0]["type"], "expense");
    assert_eq!(finances[0]["desc"], "Tea");
    assert_eq!(finances[0]["amount"], 5.0);
    assert_eq!(finances[0]["dateISO"], "2025-12-01");
}

#[test]
fn loads_records_written_by_older_clients() {
    let mut store = KvDatabase::open_memory().unwrap();
    store
        .set(
            keys::ACTIVITIES,
            r#"[{"id":"4821","name":"Gym","streak":3,"lastDone":"2025-11-30"},
                {"id":"9912","name":"Pray","streak":0,"lastDone":null}]"#,
        )
        .unwrap();
    store
        .set(
            keys::FINANCES,
            r#"[{"id":"a","type":"income","desc":"Salary","amount":1000,"dateISO":"2025-12-01"},
                {"id":"b","type":"expense","desc":"Rent","amount":200,"dateISO":"2025-12-01"},
                {"id":"c","type":"expense","desc":"Food","amount":300,"dateISO":"2025-12-02"}]"#,
        )
        .unwrap();
    store
        .set(keys::HABIT_LOGS, r#"{"2025-11-30":["Gym"]}"#)
        .unwrap();
    store.set(keys::MONTHLY_BUDGET, "400").unwrap();

    let clock = FixedClock::new(day(2025, 12, 1));
    let mut tracker = Tracker::open(store, &clock);

    let totals = tracker.finance_summary().month;
    assert_eq!(totals.income, Decimal::from(1000));
    assert_eq!(totals.expense, Decimal::from(500));
    assert_eq!(totals.net, Decimal::from(500));
    assert_eq!(
        tracker.budget_status(),
        BudgetStatus::Exceeded { over_by: Decimal::from(100) }
    );

    // Yesterday's completion continues the streak.
    assert!(tracker.mark_done("4821"));
    assert_eq!(tracker.habits().habit("4821").unwrap().streak(), 4);
}

#[test]
fn corrupt_records_fall_back_to_empty() {
    let mut store = KvDatabase::open_memory().unwrap();
    store.set(keys::ACTIVITIES, "not json at all").unwrap();
    store.set(keys::HABIT_LOGS, r#"{"yesterday":["Gym"]}"#).unwrap();
    store.set(keys::MONTHLY_BUDGET, r#""lots""#).unwrap();

    let tracker = Tracker::open(store, FixedClock::new(day(2025, 12, 1)));
    assert_eq!(tracker.snapshot(), Snapshot::default());
}

#[test]
fn deleting_a_habit_rewrites_the_log() {
    let clock = FixedClock::new(day(2025, 12, 1));
    let mut tracker = Tracker::open(KvDatabase::open_memory().unwrap(), &clock);
    let gym = tracker.add_habit("Gym").unwrap();
    let read = tracker.add_habit("Read").unwrap();
    tracker.mark_done(gym.id());
    tracker.mark_done(read.id());
    clock.advance(1);
    tracker.mark_done(gym.id());

    tracker.delete_habit(gym.id()).unwrap();
    let stored = Snapshot::load(tracker.store());
    assert_eq!(stored.activities.len(), 1);
    assert_eq!(stored.habit_logs.names_on(day(2025, 12, 1)), vec!["Read".to_string()]);
    assert!(stored.habit_logs.names_on(day(2025, 12, 2)).is_empty());
    assert_eq!(stored.habit_logs.days().count(), 1);
}

#[test]
fn calendar_views_reflect_current_state() {
    let clock = FixedClock::new(day(2025, 12, 2));
    let mut tracker = Tracker::open(KvDatabase::open_memory().unwrap(), &clock);
    let walk = tracker.add_habit("Walk").unwrap();
    tracker.mark_done(walk.id());
    tracker
        .add_entry(EntryKind::Expense, "Tea", Decimal::from(20))
        .unwrap();

    let detail = tracker.day_detail(day(2025, 12, 2));
    assert_eq!(detail.habits_done, vec!["Walk".to_string()]);
    assert_eq!(detail.expense_total, Decimal::from(20));

    tracker.toggle_on_date("Walk", day(2025, 12, 2));
    let detail = tracker.day_detail(day(2025, 12, 2));
    assert!(detail.habits_done.is_empty());
    assert_eq!(tracker.habits().habit(walk.id()).unwrap().streak(), 0);

    let view = tracker.month_view("2025-12".parse().unwrap());
    assert_eq!(view.days[1].expense_total, Decimal::from(20));
    assert_eq!(view.days[1].habits_done, 0);
}
