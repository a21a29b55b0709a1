//! Task list controller.
//!
//! Owns the latest task snapshot, the active filter and sort, and the set of
//! selected ids. Every mutation goes to the backend first and is followed by
//! a full reload; the snapshot is never patched locally.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::backend::Backend;
use crate::constants::{
    CONFIRM_DELETE_TASK, ERROR_BULK_DELETE_FAILED, ERROR_LOAD_TASKS_FAILED, ERROR_REORDER_FAILED,
    ERROR_TASK_CREATE_FAILED, ERROR_TASK_DELETE_FAILED, ERROR_TASK_UPDATE_FAILED, SUCCESS_TASKS_DELETED,
    SUCCESS_TASK_CREATED, SUCCESS_TASK_DELETED, SUCCESS_TASK_UPDATED,
};
use crate::controller::stats::TaskStats;
use crate::controller::task_form::{FormMode, TaskForm};
use crate::controller::task_view::{self, SortMode, TaskFilter, TaskListView, Toolbar};
use crate::controller::Notice;
use crate::entities::{Task, TaskId};
use crate::utils::datetime;

/// Result of submitting the task form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No form is open
    NoForm,
    /// Validation failed; nothing was sent
    Invalid,
    /// Saved; the form is closed and the list reloaded
    Saved,
    /// The request failed; the form stays open with its values
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingDelete {
    Single(TaskId),
    Bulk,
}

/// A delete waiting for the user to confirm
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Confirmation {
    prompt: String,
    action: PendingDelete,
}

impl Confirmation {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_bulk(&self) -> bool {
        self.action == PendingDelete::Bulk
    }
}

pub struct TaskListController {
    backend: Arc<dyn Backend>,
    tasks: Vec<Task>,
    filter: TaskFilter,
    sort: SortMode,
    selected: BTreeSet<TaskId>,
    load_error: Option<String>,
    form: Option<TaskForm>,
    confirmation: Option<Confirmation>,
    notice: Option<Notice>,
}

impl TaskListController {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self::with_view(backend, TaskFilter::All, SortMode::Manual)
    }

    pub fn with_view(backend: Arc<dyn Backend>, filter: TaskFilter, sort: SortMode) -> Self {
        Self {
            backend,
            tasks: Vec::new(),
            filter,
            sort,
            selected: BTreeSet::new(),
            load_error: None,
            form: None,
            confirmation: None,
            notice: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn selected(&self) -> &BTreeSet<TaskId> {
        &self.selected
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        self.form.as_mut()
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Replace the snapshot with the server's current task collection.
    ///
    /// On failure the list shows an inline error instead of rows. Returns
    /// whether the load succeeded.
    pub async fn load(&mut self) -> bool {
        match self.backend.fetch_tasks().await {
            Ok(tasks) => {
                log::info!("Loaded {} tasks", tasks.len());
                let present: HashSet<TaskId> = tasks.iter().map(|task| task.id).collect();
                self.selected.retain(|id| present.contains(id));
                self.tasks = tasks;
                self.load_error = None;
                true
            }
            Err(e) => {
                log::error!("{}: {}", ERROR_LOAD_TASKS_FAILED, e);
                self.load_error = Some(format!("{}: {}", ERROR_LOAD_TASKS_FAILED, e));
                false
            }
        }
    }

    pub fn view(&self) -> TaskListView {
        self.view_at(datetime::today())
    }

    /// View model with overdue flags computed against `today`
    pub fn view_at(&self, today: NaiveDate) -> TaskListView {
        task_view::build_view(
            &self.tasks,
            self.filter,
            self.sort,
            &self.selected,
            self.load_error.as_deref(),
            today,
        )
    }

    /// Ids in display order under the current filter and sort
    pub fn display_ids(&self) -> Vec<TaskId> {
        task_view::display_sequence(&self.tasks, self.filter, self.sort)
            .into_iter()
            .map(|task| task.id)
            .collect()
    }

    pub fn stats(&self) -> TaskStats {
        self.stats_at(datetime::today())
    }

    pub fn stats_at(&self, today: NaiveDate) -> TaskStats {
        TaskStats::compute(&self.tasks, today)
    }

    pub fn toolbar(&self) -> Toolbar {
        Toolbar::for_selection(self.selected.len())
    }

    /// Change the status filter. Re-renders from the snapshot and keeps the selection.
    pub fn on_filter_change(&mut self, filter: TaskFilter) {
        log::debug!("Filter: {:?} -> {:?}", self.filter, filter);
        self.filter = filter;
    }

    /// Change the sort order. No request is made.
    pub fn on_sort_change(&mut self, sort: SortMode) {
        log::debug!("Sort: {:?} -> {:?}", self.sort, sort);
        self.sort = sort;
    }

    pub fn reorder_enabled(&self) -> bool {
        self.sort.allows_reorder()
    }

    /// Persist a new manual order for the displayed rows.
    ///
    /// `new_order` is the displayed ids, top to bottom, after the user moved a
    /// row. Tasks hidden by the filter keep their slots; the displayed ones
    /// are written back into the visible slots in their new order and the
    /// whole sequence is sent. Positions are assigned by the server.
    ///
    /// Ignored unless the sort is manual. Returns whether a request was sent.
    pub async fn on_reorder(&mut self, new_order: &[TaskId]) -> bool {
        if !self.reorder_enabled() {
            log::debug!("Reorder ignored under {:?} sort", self.sort);
            return false;
        }

        let Some(full_order) = self.merge_visible_order(new_order) else {
            log::warn!("Reorder ignored: {:?} does not match the displayed rows", new_order);
            return false;
        };

        let current: Vec<TaskId> = task_view::display_sequence(&self.tasks, TaskFilter::All, SortMode::Manual)
            .into_iter()
            .map(|task| task.id)
            .collect();
        if full_order == current {
            return false;
        }

        match self.backend.reorder_tasks(&full_order).await {
            Ok(()) => log::info!("Saved manual order of {} tasks", full_order.len()),
            Err(e) => self.notice = Some(Notice::failure(ERROR_REORDER_FAILED, &e)),
        }
        self.load().await;
        true
    }

    /// Full manual order with the displayed slots refilled from `new_visible`.
    /// `None` when `new_visible` is not a permutation of the displayed ids.
    fn merge_visible_order(&self, new_visible: &[TaskId]) -> Option<Vec<TaskId>> {
        let visible = self.display_ids();
        let mut expected = visible.clone();
        expected.sort_unstable();
        let mut given = new_visible.to_vec();
        given.sort_unstable();
        if expected != given {
            return None;
        }

        let visible: HashSet<TaskId> = visible.into_iter().collect();
        let mut replacements = new_visible.iter().copied();
        let mut merged = Vec::with_capacity(self.tasks.len());
        for task in task_view::display_sequence(&self.tasks, TaskFilter::All, SortMode::Manual) {
            if visible.contains(&task.id) {
                merged.push(replacements.next()?);
            } else {
                merged.push(task.id);
            }
        }
        Some(merged)
    }

    /// Open a blank form
    pub fn on_create(&mut self) {
        self.confirmation = None;
        self.form = Some(TaskForm::for_create(self.filter));
    }

    /// Open the form pre-filled from the snapshot. Returns false for an unknown id.
    pub fn on_edit(&mut self, id: TaskId) -> bool {
        match self.task(id) {
            Some(task) => {
                let form = TaskForm::for_edit(task);
                self.confirmation = None;
                self.form = Some(form);
                true
            }
            None => {
                log::warn!("Edit requested for unknown task {}", id);
                false
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Validate and send the open form (POST for create, PUT for edit)
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let Some(form) = self.form.as_mut() else {
            return SubmitOutcome::NoForm;
        };

        let Some(payload) = form.validate() else {
            log::debug!("Task form rejected: title={:?} due={:?}", form.title_error, form.due_error);
            return SubmitOutcome::Invalid;
        };
        let mode = form.mode;

        let result = match mode {
            FormMode::Create => self.backend.create_task(&payload).await,
            FormMode::Edit(id) => self.backend.update_task(id, &payload).await,
        };

        match result {
            Ok(task) => {
                log::info!("Saved task {} ({:?})", task.id, mode);
                self.form = None;
                self.notice = Some(Notice::success(match mode {
                    FormMode::Create => SUCCESS_TASK_CREATED,
                    FormMode::Edit(_) => SUCCESS_TASK_UPDATED,
                }));
                self.load().await;
                SubmitOutcome::Saved
            }
            Err(e) => {
                let context = match mode {
                    FormMode::Create => ERROR_TASK_CREATE_FAILED,
                    FormMode::Edit(_) => ERROR_TASK_UPDATE_FAILED,
                };
                let notice = Notice::failure(context, &e);
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(notice.message.clone());
                }
                SubmitOutcome::Failed
            }
        }
    }

    /// Ask to delete one task. Returns false for an unknown id.
    pub fn on_delete(&mut self, id: TaskId) -> bool {
        if self.task(id).is_none() {
            return false;
        }
        self.confirmation = Some(Confirmation {
            prompt: CONFIRM_DELETE_TASK.to_string(),
            action: PendingDelete::Single(id),
        });
        true
    }

    /// Ask to delete every selected task. Returns false when nothing is selected.
    pub fn on_bulk_delete(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.confirmation = Some(Confirmation {
            prompt: format!("Move {} tasks to bin?", self.selected.len()),
            action: PendingDelete::Bulk,
        });
        true
    }

    pub fn cancel_confirmation(&mut self) {
        self.confirmation = None;
    }

    /// Carry out the pending delete. Returns whether it succeeded.
    pub async fn confirm(&mut self) -> bool {
        let Some(confirmation) = self.confirmation.take() else {
            return false;
        };

        match confirmation.action {
            PendingDelete::Single(id) => match self.backend.delete_task(id).await {
                Ok(()) => {
                    log::info!("Deleted task {}", id);
                    self.selected.remove(&id);
                    self.notice = Some(Notice::success(SUCCESS_TASK_DELETED));
                    self.load().await;
                    true
                }
                Err(e) => {
                    self.notice = Some(Notice::failure(ERROR_TASK_DELETE_FAILED, &e));
                    false
                }
            },
            PendingDelete::Bulk => {
                let ids: Vec<TaskId> = self.selected.iter().copied().collect();
                match self.backend.bulk_delete_tasks(&ids).await {
                    Ok(()) => {
                        log::info!("Bulk deleted {} tasks", ids.len());
                        self.selected.clear();
                        self.notice = Some(Notice::success(SUCCESS_TASKS_DELETED));
                        self.load().await;
                        true
                    }
                    Err(e) => {
                        self.notice = Some(Notice::failure(ERROR_BULK_DELETE_FAILED, &e));
                        false
                    }
                }
            }
        }
    }

    /// Flip membership of `id` in the selection. Returns whether it is now selected.
    pub fn toggle_selected(&mut self, id: TaskId) -> bool {
        if self.selected.remove(&id) {
            return false;
        }
        if self.task(id).is_none() {
            return false;
        }
        self.selected.insert(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }
}
