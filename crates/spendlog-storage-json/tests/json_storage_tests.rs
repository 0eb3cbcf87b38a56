use std::fs;

use spendlog_core::{
    ExpenseStore, KeyValueStore, StorageAdapter, EXPENSES_KEY, SETTINGS_KEY,
};
use spendlog_domain::{Currency, CustomCategory, NewExpense, Settings};
use spendlog_storage_json::{load_expenses_from_path, save_expenses_to_path, JsonFileStore};
use tempfile::tempdir;

#[test]
fn json_store_reads_back_written_values() {
    let dir = tempdir().expect("tempdir");
    let store = JsonFileStore::new(dir.path().join("store")).expect("create store");

    assert_eq!(store.read(EXPENSES_KEY).expect("read"), None);
    store.write(EXPENSES_KEY, "[]").expect("write");

    assert_eq!(store.read(EXPENSES_KEY).expect("read").as_deref(), Some("[]"));
    let path = store.key_path(EXPENSES_KEY);
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
    assert_eq!(store.list_keys().expect("list"), vec![EXPENSES_KEY.to_string()]);
}

#[test]
fn expense_store_survives_reopen_on_disk() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("store");

    let id = {
        let backend = JsonFileStore::new(root.clone()).expect("create store");
        let mut store = ExpenseStore::open(backend.into_adapter());
        store.update_currency(Currency::EUR);
        store.add_custom_category(CustomCategory::new("Pets", "#AA00AA"));
        store
            .add_expense(NewExpense::new(19.99, "Pets", "2024-03-05").with_note("kibble"))
            .expect("add expense")
    };

    let backend = JsonFileStore::new(root).expect("reopen store");
    let store = ExpenseStore::open(backend.into_adapter());
    let expense = store.expense(&id).expect("expense persisted");
    assert_eq!(expense.amount, 19.99);
    assert_eq!(expense.note.as_deref(), Some("kibble"));
    assert_eq!(store.settings().currency, Currency::EUR);
    assert_eq!(store.settings().custom_categories[0].name, "Pets");
}

#[test]
fn corrupted_settings_file_falls_back_to_defaults() {
    let dir = tempdir().expect("tempdir");
    let backend = JsonFileStore::new(dir.path().to_path_buf()).expect("create store");
    fs::write(backend.key_path(SETTINGS_KEY), "{ not json").expect("write garbage");

    let adapter = StorageAdapter::new(backend);
    let settings = adapter.load(SETTINGS_KEY, Settings::default());
    assert_eq!(settings, Settings::default());
}

#[test]
fn expenses_export_round_trips_through_a_file() {
    let dir = tempdir().expect("tempdir");
    let backend = JsonFileStore::new(dir.path().join("store")).expect("create store");
    let mut store = ExpenseStore::open(backend.into_adapter());
    store
        .add_expense(NewExpense::new(5.0, "Food & Dining", "2024-03-01"))
        .expect("add");
    store
        .add_expense(NewExpense::new(7.0, "Travel", "2024-03-02"))
        .expect("add");

    let export = dir.path().join("export.json");
    save_expenses_to_path(store.expenses(), &export).expect("export");
    let loaded = load_expenses_from_path(&export).expect("import");

    assert_eq!(loaded, store.expenses());
}
