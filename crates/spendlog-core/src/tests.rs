use std::{cell::RefCell, rc::Rc};

use chrono::NaiveDate;

use crate::{
    aggregate_service::{AggregateService, DEFAULT_PALETTE},
    date_range::resolve_date_range,
    storage::{MemoryStore, StorageAdapter, EXPENSES_KEY, SETTINGS_KEY},
    store::{ExpenseStore, PersistenceHook},
    time::FixedClock,
    CoreError, KeyValueStore,
};
use spendlog_domain::{
    Currency, CustomCategory, DateRange, Expense, NewExpense, Period, Settings,
};

const TOLERANCE: f64 = 1e-9;

fn expense(amount: f64, category: &str, date: &str) -> Expense {
    Expense::from_draft(NewExpense::new(amount, category, date))
}

fn march() -> DateRange {
    DateRange::new("2024-03-01", "2024-03-31")
}

fn scenario() -> Vec<Expense> {
    vec![
        expense(50.0, "Food", "2024-03-05"),
        expense(20.0, "Food", "2024-03-06"),
        expense(30.0, "Transport", "2024-03-06"),
    ]
}

fn mixed_expenses() -> Vec<Expense> {
    vec![
        expense(12.34, "Food & Dining", "2024-03-02"),
        expense(0.1, "Shopping", "2024-03-15"),
        expense(0.2, "Shopping", "2024-03-15"),
        expense(99.99, "Travel", "2024-02-28"),
        expense(7.5, "Food & Dining", "2024-03-31"),
        expense(3.0, "Other", "bad-date"),
        expense(41.0, "Healthcare", "2024-03-01"),
        expense(5.55, "Travel", "2024-04-01"),
    ]
}

fn store_with_memory() -> (ExpenseStore, MemoryStore) {
    let backend = MemoryStore::new();
    let store = ExpenseStore::new(Box::new(StorageAdapter::new(backend.clone())));
    (store, backend)
}

#[test]
fn worked_example_produces_expected_views() {
    let filtered = AggregateService::filter_by_range(&scenario(), &march());

    assert_eq!(AggregateService::total(&filtered), 100.0);

    let by_category = AggregateService::by_category(&filtered, &[]);
    let categories: Vec<(&str, f64)> = by_category
        .iter()
        .map(|c| (c.name.as_str(), c.value))
        .collect();
    assert_eq!(categories, vec![("Food", 70.0), ("Transport", 30.0)]);

    let by_day = AggregateService::by_day(&filtered);
    let days: Vec<(&str, f64)> = by_day.iter().map(|d| (d.date.as_str(), d.total)).collect();
    assert_eq!(days, vec![("2024-03-05", 50.0), ("2024-03-06", 50.0)]);
}

#[test]
fn category_day_and_total_sums_agree() {
    let filtered = AggregateService::filter_by_range(&mixed_expenses(), &march());
    let total = AggregateService::total(&filtered);
    let category_sum: f64 = AggregateService::by_category(&filtered, &[])
        .iter()
        .map(|c| c.value)
        .sum();
    let day_sum: f64 = AggregateService::by_day(&filtered)
        .iter()
        .map(|d| d.total)
        .sum();

    assert!((total - category_sum).abs() < TOLERANCE);
    assert!((total - day_sum).abs() < TOLERANCE);
    assert!((total - 61.14).abs() < TOLERANCE);
}

#[test]
fn filtering_is_idempotent() {
    let once = AggregateService::filter_by_range(&mixed_expenses(), &march());
    let twice = AggregateService::filter_by_range(&once, &march());
    assert_eq!(once, twice);
}

#[test]
fn daily_output_is_sorted_and_unique() {
    let days = AggregateService::by_day(&AggregateService::filter_by_range(
        &mixed_expenses(),
        &march(),
    ));
    let dates: Vec<&str> = days.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(
        dates,
        vec!["2024-03-01", "2024-03-02", "2024-03-15", "2024-03-31"]
    );
    let shopping = days.iter().find(|d| d.date == "2024-03-15").unwrap();
    assert!((shopping.total - 0.3).abs() < TOLERANCE);
}

#[test]
fn non_canonical_dates_never_split_a_day() {
    let expenses = vec![
        expense(5.0, "Food", "2024-03-05"),
        expense(7.0, "Food", "2024-3-5"),
        expense(1.0, "Food", " 2024-03-05"),
    ];
    let filtered = AggregateService::filter_by_range(&expenses, &march());
    assert_eq!(filtered.len(), 1);

    let days = AggregateService::by_day(&filtered);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date, "2024-03-05");
    assert!((days[0].total - 5.0).abs() < TOLERANCE);
}

#[test]
fn category_output_has_unique_names_with_matching_sums() {
    let filtered = AggregateService::filter_by_range(&mixed_expenses(), &march());
    let data = AggregateService::by_category(&filtered, &[]);

    let mut names: Vec<&str> = data.iter().map(|c| c.name.as_str()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), data.len());

    for entry in &data {
        let expected: f64 = filtered
            .iter()
            .filter(|e| e.category == entry.name)
            .map(|e| e.amount)
            .sum();
        assert!((entry.value - expected).abs() < TOLERANCE, "{}", entry.name);
    }
}

#[test]
fn color_assignment_is_deterministic() {
    let custom = vec![CustomCategory::new("Healthcare", "#ABCDEF")];
    let filtered = AggregateService::filter_by_range(&mixed_expenses(), &march());

    let first = AggregateService::by_category(&filtered, &custom);
    let second = AggregateService::by_category(&filtered, &custom);

    assert_eq!(first, second);
    assert_eq!(first[0].name, "Food & Dining");
    assert_eq!(first[0].color, DEFAULT_PALETTE[0]);
    let healthcare = first.iter().find(|c| c.name == "Healthcare").unwrap();
    assert_eq!(healthcare.color, "#ABCDEF");
}

#[test]
fn month_period_ignores_from_and_to() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 18).unwrap();
    let a = resolve_date_range(Period::Month, "", "", today);
    let b = resolve_date_range(Period::Month, "1999-01-01", "1999-01-31", today);
    assert_eq!(a, b);
    assert_eq!(a, march());
}

#[test]
fn add_then_delete_returns_to_empty_and_writes_twice() {
    let (mut store, backend) = store_with_memory();

    let id = store
        .add_expense(NewExpense::new(25.0, "Food", "2024-03-05"))
        .expect("valid expense");
    assert_eq!(store.expenses().len(), 1);
    assert!(store.delete_expense(&id));

    assert!(store.expenses().is_empty());
    assert_eq!(backend.write_count(EXPENSES_KEY), 2);
    assert_eq!(backend.write_count(SETTINGS_KEY), 0);
    assert_eq!(backend.raw(EXPENSES_KEY).as_deref(), Some("[]"));
}

#[test]
fn add_expense_prepends_most_recent_first() {
    let (mut store, _) = store_with_memory();
    let first = store
        .add_expense(NewExpense::new(1.0, "Food", "2024-03-01"))
        .unwrap();
    let second = store
        .add_expense(NewExpense::new(2.0, "Food", "2024-03-02"))
        .unwrap();

    let ids: Vec<&str> = store.expenses().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
}

#[test]
fn invalid_drafts_are_refused_without_mutation() {
    let (mut store, backend) = store_with_memory();

    let missing_category = store.add_expense(NewExpense::new(10.0, "  ", "2024-03-01"));
    assert!(matches!(missing_category, Err(CoreError::Validation(_))));

    let missing_amount = store.add_expense(NewExpense::new(f64::NAN, "Food", "2024-03-01"));
    assert!(matches!(missing_amount, Err(CoreError::Validation(_))));

    assert!(store.expenses().is_empty());
    assert!(backend.write_log().is_empty());
}

#[test]
fn unmatched_update_and_delete_are_silent_no_ops() {
    let (mut store, backend) = store_with_memory();
    store
        .add_expense(NewExpense::new(1.0, "Food", "2024-03-01"))
        .unwrap();
    let before = store.expenses().to_vec();

    let mut ghost = before[0].clone();
    ghost.id = "missing".into();
    assert!(!store.update_expense(ghost));
    assert!(!store.delete_expense("missing"));
    assert!(!store.update_custom_category(CustomCategory::new("Ghost", "#000")));
    assert!(!store.delete_custom_category("missing"));

    assert_eq!(store.expenses(), before.as_slice());
    assert_eq!(backend.write_log(), vec![EXPENSES_KEY.to_string()]);
}

#[test]
fn update_expense_replaces_whole_entry() {
    let (mut store, _) = store_with_memory();
    let id = store
        .add_expense(NewExpense::new(1.0, "Food", "2024-03-01").with_note("bread"))
        .unwrap();

    let replacement = Expense {
        id: id.clone(),
        amount: 9.0,
        category: "Shopping".into(),
        date: "2024-03-02".into(),
        note: None,
    };
    assert!(store.update_expense(replacement.clone()));
    assert_eq!(store.expense(&id), Some(&replacement));
}

#[test]
fn settings_mutations_persist_whole_settings() {
    let (mut store, backend) = store_with_memory();

    let pets = CustomCategory::new("Pets", "#AA00AA");
    store.add_custom_category(pets.clone());
    let mut renamed = pets.clone();
    renamed.name = "Animals".into();
    assert!(store.update_custom_category(renamed));
    store.update_currency(Currency::RUB);

    let stored: Settings = serde_json::from_str(&backend.raw(SETTINGS_KEY).unwrap()).unwrap();
    assert_eq!(stored.currency, Currency::RUB);
    assert_eq!(stored.custom_categories[0].name, "Animals");
    assert_eq!(stored.categories.len(), 9);

    assert!(store.delete_custom_category(&pets.id));
    store.reset_settings();
    assert_eq!(store.settings(), &Settings::default());
    assert_eq!(backend.write_count(SETTINGS_KEY), 5);
    assert_eq!(backend.write_count(EXPENSES_KEY), 0);
}

#[test]
fn filters_are_never_persisted() {
    let (mut store, backend) = store_with_memory();
    store.set_period(Period::Range);
    store.set_from_date("2024-03-10");
    store.set_to_date("2024-03-20");

    let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(
        store.date_range(&clock),
        DateRange::new("2024-03-10", "2024-03-20")
    );
    store.reset_filters();
    assert_eq!(store.filters().period, Period::Month);
    assert!(backend.write_log().is_empty());
}

#[test]
fn snapshot_uses_clock_for_current_month() {
    let (mut store, _) = store_with_memory();
    store.load_expenses(scenario());
    let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());

    let snapshot = store.snapshot(&clock);
    assert_eq!(snapshot.range, march());
    assert_eq!(snapshot.transaction_count(), 3);
    assert_eq!(snapshot.category_count(), 2);
    assert_eq!(snapshot.total, 100.0);
    assert!((snapshot.share_of_total(70.0) - 70.0).abs() < TOLERANCE);

    let april = FixedClock::new(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
    assert!(store.snapshot(&april).is_empty());
}

#[test]
fn open_recovers_from_corrupt_storage() {
    let backend = MemoryStore::new();
    backend.insert_raw(EXPENSES_KEY, "[{\"id\": 1,");
    backend.insert_raw(SETTINGS_KEY, "not json");

    let store = ExpenseStore::open(StorageAdapter::new(backend.clone()));

    assert!(store.expenses().is_empty());
    assert_eq!(store.settings(), &Settings::default());
}

#[test]
fn open_restores_persisted_state() {
    let backend = MemoryStore::new();
    {
        let mut store = ExpenseStore::new(Box::new(StorageAdapter::new(backend.clone())));
        store
            .add_expense(NewExpense::new(4.5, "Food", "2024-03-01"))
            .unwrap();
        store.update_currency(Currency::EUR);
    }

    let reopened = ExpenseStore::open(StorageAdapter::new(backend));
    assert_eq!(reopened.expenses().len(), 1);
    assert_eq!(reopened.settings().currency, Currency::EUR);
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn read(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Err(CoreError::Storage("unavailable".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("quota exceeded".into()))
    }
}

#[test]
fn failed_writes_keep_in_memory_state() {
    let mut store = ExpenseStore::open(StorageAdapter::new(FailingStore));
    let id = store
        .add_expense(NewExpense::new(3.0, "Food", "2024-03-01"))
        .expect("write failures are not surfaced");
    assert!(store.expense(&id).is_some());
}

#[derive(Default)]
struct RecordingHook {
    events: Rc<RefCell<Vec<String>>>,
}

impl PersistenceHook for RecordingHook {
    fn expenses_changed(&self, expenses: &[Expense]) {
        self.events
            .borrow_mut()
            .push(format!("expenses:{}", expenses.len()));
    }

    fn settings_changed(&self, settings: &Settings) {
        self.events
            .borrow_mut()
            .push(format!("settings:{}", settings.custom_categories.len()));
    }
}

#[test]
fn hook_receives_whole_slices_in_mutation_order() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut store = ExpenseStore::new(Box::new(RecordingHook {
        events: Rc::clone(&events),
    }));

    store.load_expenses(scenario());
    store
        .add_expense(NewExpense::new(1.0, "Food", "2024-03-07"))
        .unwrap();
    store.add_custom_category(CustomCategory::new("Pets", "#123"));
    store.clear_expenses();

    assert_eq!(
        *events.borrow(),
        vec!["expenses:3", "expenses:4", "settings:1", "expenses:0"]
    );
}
