//! The single owned state container and its persistence hook.

use spendlog_domain::{
    AnalyticsSnapshot, Currency, CustomCategory, DateRange, Expense, Filter, Identifiable,
    NewExpense, Period, Settings,
};

use crate::{
    aggregate_service::AggregateService,
    date_range::resolve_filter,
    storage::{KeyValueStore, StorageAdapter, EXPENSES_KEY, SETTINGS_KEY},
    time::Clock,
    CoreError,
};

/// Observer invoked synchronously after each mutation with the whole
/// affected slice, never a diff.
pub trait PersistenceHook {
    fn expenses_changed(&self, expenses: &[Expense]);
    fn settings_changed(&self, settings: &Settings);
}

impl<S: KeyValueStore> PersistenceHook for StorageAdapter<S> {
    fn expenses_changed(&self, expenses: &[Expense]) {
        self.save(EXPENSES_KEY, expenses);
    }

    fn settings_changed(&self, settings: &Settings) {
        self.save(SETTINGS_KEY, settings);
    }
}

/// Snapshot of everything the store owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub expenses: Vec<Expense>,
    pub settings: Settings,
    pub filters: Filter,
}

/// Owns expenses, settings and filters. All changes go through the named
/// mutators; `&mut self` keeps a single writer.
pub struct ExpenseStore {
    state: AppState,
    hook: Box<dyn PersistenceHook>,
}

impl ExpenseStore {
    /// Empty store with default settings.
    pub fn new(hook: Box<dyn PersistenceHook>) -> Self {
        Self {
            state: AppState::default(),
            hook,
        }
    }

    /// Builds a store from whatever the adapter holds, falling back to an
    /// empty list and default settings for missing or corrupt entries.
    pub fn open<S>(adapter: StorageAdapter<S>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let expenses = adapter.load(EXPENSES_KEY, Vec::<Expense>::new());
        let settings = adapter.load(SETTINGS_KEY, Settings::default());
        let mut store = Self::new(Box::new(adapter));
        store.load_expenses(expenses);
        store.load_settings(settings);
        tracing::info!(
            expenses = store.state.expenses.len(),
            currency = %store.state.settings.currency,
            "expense store opened"
        );
        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.state.expenses
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn filters(&self) -> &Filter {
        &self.state.filters
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.state.expenses.iter().find(|expense| expense.id() == id)
    }

    pub fn load_expenses(&mut self, expenses: Vec<Expense>) {
        self.state.expenses = expenses;
        self.expenses_changed();
    }

    pub fn load_settings(&mut self, settings: Settings) {
        self.state.settings = settings;
        self.settings_changed();
    }

    /// Validates the draft, assigns an id and prepends the expense so the list
    /// stays most-recent-first. Returns the new id.
    pub fn add_expense(&mut self, draft: NewExpense) -> Result<String, CoreError> {
        validate_draft(&draft)?;
        let expense = Expense::from_draft(draft);
        let id = expense.id.clone();
        tracing::debug!(%id, category = %expense.category, "adding expense");
        self.state.expenses.insert(0, expense);
        self.expenses_changed();
        Ok(id)
    }

    /// Replaces the expense with the same id. Returns `false` (and writes
    /// nothing) when no entry matches.
    pub fn update_expense(&mut self, expense: Expense) -> bool {
        let Some(slot) = find_by_id_mut(&mut self.state.expenses, expense.id()) else {
            tracing::debug!(id = %expense.id, "update ignored, expense not found");
            return false;
        };
        *slot = expense;
        self.expenses_changed();
        true
    }

    pub fn delete_expense(&mut self, id: &str) -> bool {
        let before = self.state.expenses.len();
        self.state.expenses.retain(|expense| expense.id != id);
        if self.state.expenses.len() == before {
            tracing::debug!(id, "delete ignored, expense not found");
            return false;
        }
        self.expenses_changed();
        true
    }

    pub fn clear_expenses(&mut self) {
        self.state.expenses.clear();
        self.expenses_changed();
    }

    pub fn add_custom_category(&mut self, category: CustomCategory) {
        tracing::debug!(id = %category.id, name = %category.name, "adding custom category");
        self.state.settings.custom_categories.push(category);
        self.settings_changed();
    }

    pub fn update_custom_category(&mut self, category: CustomCategory) -> bool {
        let Some(slot) = find_by_id_mut(&mut self.state.settings.custom_categories, category.id())
        else {
            return false;
        };
        *slot = category;
        self.settings_changed();
        true
    }

    pub fn delete_custom_category(&mut self, id: &str) -> bool {
        let categories = &mut self.state.settings.custom_categories;
        let before = categories.len();
        categories.retain(|category| category.id != id);
        if categories.len() == before {
            return false;
        }
        self.settings_changed();
        true
    }

    pub fn update_currency(&mut self, currency: Currency) {
        self.state.settings.currency = currency;
        self.settings_changed();
    }

    pub fn reset_settings(&mut self) {
        self.state.settings = Settings::default();
        self.settings_changed();
    }

    pub fn set_period(&mut self, period: Period) {
        self.state.filters.period = period;
    }

    pub fn set_from_date(&mut self, from: impl Into<String>) {
        self.state.filters.from = from.into();
    }

    pub fn set_to_date(&mut self, to: impl Into<String>) {
        self.state.filters.to = to.into();
    }

    pub fn reset_filters(&mut self) {
        self.state.filters = Filter::default();
    }

    /// Bounds for the active filter, evaluated against `clock` now.
    pub fn date_range(&self, clock: &dyn Clock) -> DateRange {
        resolve_filter(&self.state.filters, clock)
    }

    /// Derived views for the active filter.
    pub fn snapshot(&self, clock: &dyn Clock) -> AnalyticsSnapshot {
        AggregateService::summarize(
            &self.state.expenses,
            &self.state.settings.custom_categories,
            self.date_range(clock),
        )
    }

    fn expenses_changed(&self) {
        self.hook.expenses_changed(&self.state.expenses);
    }

    fn settings_changed(&self) {
        self.hook.settings_changed(&self.state.settings);
    }
}

fn find_by_id_mut<'a, T: Identifiable>(items: &'a mut [T], id: &str) -> Option<&'a mut T> {
    items.iter_mut().find(|item| item.id() == id)
}

fn validate_draft(draft: &NewExpense) -> Result<(), CoreError> {
    if !draft.amount.is_finite() {
        return Err(CoreError::Validation("amount is required".into()));
    }
    if draft.category.trim().is_empty() {
        return Err(CoreError::Validation("category is required".into()));
    }
    Ok(())
}
