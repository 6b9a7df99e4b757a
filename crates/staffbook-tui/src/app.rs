//! Application state management for Staffbook.
//!
//! This module contains the core `App` struct: the list/form view state, the
//! explicit form, the last-known employee list, and the channel that carries
//! results of remote calls back from spawned tasks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use staffbook_core::utils::cmp_ignore_case;
use staffbook_core::{
    ApiClient, CacheManager, Config, Employee, EmployeeId, EmployeeStore, Field, FormState,
    LastAction,
};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Rows per table page.
pub const PAGE_SIZE: usize = 10;

/// How long a notification stays on screen.
const NOTIFICATION_TTL: Duration = Duration::from_millis(4500);

// ============================================================================
// UI State Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Creating,
    Updating(EmployeeId),
}

/// Which of the two screens is showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Listing,
    Editing(EditMode),
}

/// Overlay state on top of the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ConfirmingDelete(EmployeeId),
    ConfirmingQuit,
    Quitting,
}

/// Name column sort, cycled by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Unsorted,
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn next(&self) -> Self {
        match self {
            SortOrder::Unsorted => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Unsorted,
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            SortOrder::Unsorted => "",
            SortOrder::Ascending => " ▲",
            SortOrder::Descending => " ▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    shown_at: Instant,
}

impl Notification {
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            shown_at: Instant::now(),
        }
    }

    fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= NOTIFICATION_TTL
    }
}

// ============================================================================
// Background Task Results
// ============================================================================

/// Outcome of one remote call, sent back from its spawned task.
/// Every dispatched request produces exactly one of these.
#[derive(Debug)]
pub enum TaskResult {
    Listed(Vec<Employee>),
    /// A record requested for editing (requested id, record)
    Loaded(EmployeeId, Employee),
    LoadFailed(EmployeeId, String),
    Created(Employee),
    Updated(Employee),
    Removed(EmployeeId),
    /// A failed list or mutation, with the message to show
    Failed(String),
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    store: Arc<dyn EmployeeStore>,
    pub cache: CacheManager,

    // UI state
    pub state: AppState,
    pub view: ViewState,
    pub form: FormState,
    pub form_focus: Field,
    pub selection: usize,
    pub name_sort: SortOrder,
    pub notification: Option<Notification>,

    // Data
    pub employees: Vec<Employee>,
    pub last_action: Option<LastAction>,
    pub employees_cached_at: Option<DateTime<Utc>>,

    /// Requests dispatched but not yet answered
    pub pending_requests: usize,

    // Background task channel
    task_tx: mpsc::Sender<TaskResult>,
    task_rx: mpsc::Receiver<TaskResult>,
}

impl App {
    /// Create the application against the configured remote store.
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = config.base_url();
        info!(%base_url, "Using employee collection");
        let api = ApiClient::new(base_url)?;

        let cache_dir = config.cache_dir();
        debug!(?cache_dir, "Cache directory configured");
        let cache = CacheManager::new(cache_dir)?;

        Ok(Self::with_store(Arc::new(api), cache))
    }

    /// Create the application over any store implementation.
    pub fn with_store(store: Arc<dyn EmployeeStore>, cache: CacheManager) -> Self {
        let (task_tx, task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        Self {
            store,
            cache,

            state: AppState::Normal,
            view: ViewState::Listing,
            form: FormState::new(),
            form_focus: Field::Name,
            selection: 0,
            name_sort: SortOrder::Unsorted,
            notification: None,

            employees: Vec::new(),
            last_action: None,
            employees_cached_at: None,

            pending_requests: 0,

            task_tx,
            task_rx,
        }
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Seed the list and the last action from the local cache.
    pub fn load_from_cache(&mut self) {
        match self.cache.load_employees() {
            Ok(Some(cached)) => {
                debug!(count = cached.data.len(), "Loaded employees from cache");
                self.employees = cached.data;
                self.employees_cached_at = Some(cached.cached_at);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring unreadable employee cache"),
        }

        match self.cache.load_last_action() {
            Ok(Some(cached)) => self.last_action = Some(cached.data),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring unreadable last action cache"),
        }

        self.clamp_selection();
    }

    fn record_last_action(&mut self, action: LastAction) {
        if let Err(e) = self.cache.save_last_action(&action) {
            warn!(error = %e, "Failed to cache last action");
        }
        self.last_action = Some(action);
    }

    // =========================================================================
    // Remote Calls
    // =========================================================================

    /// Spawn one remote call. Its result comes back through the task channel.
    fn dispatch<F, Fut>(&mut self, call: F)
    where
        F: FnOnce(Arc<dyn EmployeeStore>) -> Fut,
        Fut: std::future::Future<Output = TaskResult> + Send + 'static,
    {
        self.pending_requests += 1;
        let tx = self.task_tx.clone();
        let fut = call(Arc::clone(&self.store));
        tokio::spawn(async move {
            let result = fut.await;
            if tx.send(result).await.is_err() {
                debug!("App dropped before task result arrived");
            }
        });
    }

    /// Re-fetch the full list.
    pub fn fetch_employees(&mut self) {
        self.dispatch(|store| async move {
            match store.list_all().await {
                Ok(employees) => TaskResult::Listed(employees),
                Err(e) => TaskResult::Failed(format!("Failed to fetch employees: {}", e)),
            }
        });
    }

    /// Switch to an empty form for a new record.
    pub fn start_create(&mut self) {
        self.form.clear();
        self.form_focus = Field::Name;
        self.view = ViewState::Editing(EditMode::Creating);
    }

    /// Switch to the form for an existing record and load it.
    pub fn start_edit(&mut self, id: EmployeeId) {
        self.form.clear();
        self.form_focus = Field::Name;
        self.view = ViewState::Editing(EditMode::Updating(id.clone()));
        self.dispatch(|store| async move {
            match store.get_by_id(&id).await {
                Ok(employee) => TaskResult::Loaded(id, employee),
                Err(e) => TaskResult::LoadFailed(id, format!("Failed to load employee: {}", e)),
            }
        });
    }

    pub fn edit_selected(&mut self) {
        if let Some(id) = self.selected_employee().and_then(|e| e.id.clone()) {
            self.start_edit(id);
        }
    }

    /// Validate the form and, if it passes, send it.
    pub fn submit(&mut self) {
        let ViewState::Editing(mode) = self.view.clone() else {
            return;
        };

        let employee = match self.form.submit() {
            Ok(employee) => employee,
            Err(errors) => {
                debug!(count = errors.len(), "Form has validation errors");
                if let Some(field) = errors.keys().next() {
                    self.form_focus = *field;
                }
                return;
            }
        };

        match mode {
            EditMode::Creating => self.dispatch(|store| async move {
                match store.create(&employee).await {
                    Ok(created) => TaskResult::Created(created),
                    Err(e) => TaskResult::Failed(format!("Failed to add employee: {}", e)),
                }
            }),
            EditMode::Updating(id) => self.dispatch(|store| async move {
                match store.update(&id, &employee).await {
                    Ok(updated) => TaskResult::Updated(updated),
                    Err(e) => TaskResult::Failed(format!("Failed to update employee: {}", e)),
                }
            }),
        }
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self, id: EmployeeId) {
        self.state = AppState::ConfirmingDelete(id);
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_employee().and_then(|e| e.id.clone()) {
            self.request_delete(id);
        }
    }

    pub fn confirm_delete(&mut self) {
        if let AppState::ConfirmingDelete(id) = std::mem::replace(&mut self.state, AppState::Normal) {
            self.delete(id);
        }
    }

    pub fn delete(&mut self, id: EmployeeId) {
        self.dispatch(|store| async move {
            match store.remove(&id).await {
                Ok(()) => TaskResult::Removed(id),
                Err(e) => TaskResult::Failed(format!("Failed to delete employee: {}", e)),
            }
        });
    }

    /// Leave the form without sending anything.
    pub fn cancel(&mut self) {
        self.form.clear();
        self.view = ViewState::Listing;
    }

    // =========================================================================
    // Background Task Handling
    // =========================================================================

    /// Apply every result that has arrived since the last call.
    pub fn check_background_tasks(&mut self) {
        let mut results = Vec::new();
        while let Ok(result) = self.task_rx.try_recv() {
            results.push(result);
        }

        for result in results {
            self.process_task_result(result);
        }

        if self.notification.as_ref().is_some_and(Notification::is_expired) {
            self.notification = None;
        }
    }

    fn process_task_result(&mut self, result: TaskResult) {
        self.pending_requests = self.pending_requests.saturating_sub(1);

        match result {
            TaskResult::Listed(data) => {
                if let Err(e) = self.cache.save_employees(&data) {
                    warn!(error = %e, "Failed to cache employee list");
                }
                self.employees = data;
                self.employees_cached_at = Some(Utc::now());
                self.clamp_selection();
            }
            TaskResult::Loaded(id, employee) => {
                if self.is_editing(&id) {
                    self.form.populate(&employee);
                } else {
                    debug!(%id, "Dropping response for a record no longer being edited");
                }
            }
            TaskResult::LoadFailed(id, message) => {
                if self.is_editing(&id) {
                    error!(%id, %message, "Could not load employee for editing");
                    self.form.clear();
                    self.view = ViewState::Listing;
                    self.notify(NotificationLevel::Error, message);
                } else {
                    debug!(%id, "Dropping failure for a record no longer being edited");
                }
            }
            TaskResult::Created(employee) => {
                info!(id = ?employee.id, "Employee created");
                self.notify(NotificationLevel::Success, "Employee added successfully");
                self.record_last_action(LastAction::created(employee));
                self.finish_mutation();
            }
            TaskResult::Updated(employee) => {
                info!(id = ?employee.id, "Employee updated");
                self.notify(NotificationLevel::Success, "Employee updated successfully!");
                self.record_last_action(LastAction::updated(employee));
                self.finish_mutation();
            }
            TaskResult::Removed(id) => {
                info!(%id, "Employee deleted");
                self.notify(NotificationLevel::Success, "Employee deleted successfully");
                self.record_last_action(LastAction::deleted(id));
                self.finish_mutation();
            }
            TaskResult::Failed(message) => {
                error!(%message, "Request failed");
                self.notify(NotificationLevel::Error, message);
            }
        }
    }

    fn finish_mutation(&mut self) {
        self.form.clear();
        self.view = ViewState::Listing;
        self.fetch_employees();
    }

    fn is_editing(&self, id: &EmployeeId) -> bool {
        matches!(&self.view, ViewState::Editing(EditMode::Updating(current)) if current == id)
    }

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notification = Some(Notification::new(level, message));
    }

    pub fn is_loading(&self) -> bool {
        self.pending_requests > 0
    }

    // =========================================================================
    // List Navigation
    // =========================================================================

    /// The list in display order.
    pub fn sorted_employees(&self) -> Vec<&Employee> {
        let mut sorted: Vec<&Employee> = self.employees.iter().collect();
        match self.name_sort {
            SortOrder::Unsorted => {}
            SortOrder::Ascending => sorted.sort_by(|a, b| cmp_ignore_case(&a.name, &b.name)),
            SortOrder::Descending => sorted.sort_by(|a, b| cmp_ignore_case(&b.name, &a.name)),
        }
        sorted
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.sorted_employees().get(self.selection).copied()
    }

    pub fn cycle_sort(&mut self) {
        self.name_sort = self.name_sort.next();
        self.selection = 0;
    }

    pub fn current_page(&self) -> usize {
        self.selection / PAGE_SIZE
    }

    pub fn page_count(&self) -> usize {
        self.employees.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn select_next(&mut self) {
        if self.selection + 1 < self.employees.len() {
            self.selection += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        let last = self.employees.len().saturating_sub(1);
        self.selection = ((self.current_page() + 1) * PAGE_SIZE).min(last);
    }

    pub fn prev_page(&mut self) {
        self.selection = self.current_page().saturating_sub(1) * PAGE_SIZE;
    }

    pub fn select_first(&mut self) {
        self.selection = 0;
    }

    pub fn select_last(&mut self) {
        self.selection = self.employees.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selection = self.selection.min(self.employees.len().saturating_sub(1));
    }
}
