mod common;

use std::sync::Arc;

use common::{date, due, task, Call, FakeBackend};
use taskdesk::controller::{
    FormField, ListBody, Notice, SortMode, SubmitOutcome, TaskFilter, TaskListController, Toolbar,
};
use taskdesk::entities::{TaskPayload, TaskStatus};

fn sample_tasks() -> Vec<taskdesk::entities::Task> {
    vec![
        due(task(1, "Write report", TaskStatus::Done, 0), "2024-01-01"),
        task(2, "Buy milk", TaskStatus::Todo, 1),
        due(task(3, "Call bank", TaskStatus::Todo, 2), "2024-06-01"),
    ]
}

async fn loaded(backend: &Arc<FakeBackend>) -> TaskListController {
    let mut controller = TaskListController::new(backend.clone());
    assert!(controller.load().await);
    backend.clear_calls();
    controller
}

#[tokio::test]
async fn test_todo_filter_with_due_sort() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    controller.on_filter_change(TaskFilter::Todo);
    controller.on_sort_change(SortMode::DueAsc);

    assert_eq!(controller.display_ids(), vec![3, 2]);
    assert_eq!(controller.view().row_ids(), vec![3, 2]);
    // Filter and sort are local; nothing is fetched
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_double_toggle_restores_selection() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    assert!(controller.toggle_selected(2));
    let before = controller.selected().clone();
    assert!(controller.toggle_selected(3));
    assert!(!controller.toggle_selected(3));
    assert_eq!(controller.selected(), &before);

    // Unknown ids never enter the selection
    assert!(!controller.toggle_selected(99));
    assert_eq!(controller.selected().len(), 1);
}

#[tokio::test]
async fn test_clear_selection_restores_default_toolbar() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    controller.toggle_selected(2);
    controller.toggle_selected(3);
    assert_eq!(controller.toolbar(), Toolbar::Selection { count: 2 });

    controller.clear_selection();
    assert!(controller.selected().is_empty());
    assert_eq!(controller.toolbar(), Toolbar::Default);
    assert_eq!(controller.view().toolbar, Toolbar::Default);
}

#[tokio::test]
async fn test_filter_and_sort_changes_keep_selection() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    controller.toggle_selected(1);
    controller.toggle_selected(2);

    // Task 1 is done and drops out of the Todo view but stays selected
    controller.on_filter_change(TaskFilter::Todo);
    controller.on_sort_change(SortMode::Alpha);

    assert_eq!(controller.display_ids(), vec![2, 3]);
    assert_eq!(controller.selected().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(controller.toolbar(), Toolbar::Selection { count: 2 });
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_bulk_delete_clears_selection_and_removes_tasks() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    controller.toggle_selected(2);
    controller.toggle_selected(3);
    assert!(controller.on_bulk_delete());
    let confirmation = controller.confirmation().unwrap();
    assert!(confirmation.is_bulk());
    assert_eq!(confirmation.prompt(), "Move 2 tasks to bin?");
    // Nothing is sent before the user confirms
    assert!(backend.mutations().is_empty());

    assert!(controller.confirm().await);

    assert!(controller.selected().is_empty());
    assert_eq!(backend.mutations(), vec![Call::BulkDeleteTasks(vec![2, 3])]);
    assert_eq!(backend.calls().last(), Some(&Call::FetchTasks));
    let remaining: Vec<i64> = controller.tasks().iter().map(|t| t.id).collect();
    assert_eq!(remaining, vec![1]);
}

#[tokio::test]
async fn test_bulk_delete_requires_selection() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    assert!(!controller.on_bulk_delete());
    assert!(controller.confirmation().is_none());
}

#[tokio::test]
async fn test_cancelled_delete_sends_nothing() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    assert!(controller.on_delete(2));
    assert_eq!(controller.confirmation().unwrap().prompt(), "Delete this task?");
    controller.cancel_confirmation();
    assert!(!controller.confirm().await);

    assert!(backend.calls().is_empty());
    assert_eq!(controller.tasks().len(), 3);
}

#[tokio::test]
async fn test_single_delete_reloads() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    controller.toggle_selected(2);

    controller.on_delete(2);
    assert!(controller.confirm().await);

    assert_eq!(backend.calls(), vec![Call::DeleteTask(2), Call::FetchTasks]);
    assert!(controller.task(2).is_none());
    assert!(controller.selected().is_empty());
    assert!(!controller.take_notice().unwrap().is_error());
}

#[tokio::test]
async fn test_failed_delete_keeps_state() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    controller.toggle_selected(2);
    backend.fail("delete_task");

    controller.on_delete(2);
    assert!(!controller.confirm().await);

    assert_eq!(controller.tasks().len(), 3);
    assert!(controller.selected().contains(&2));
    let notice: Notice = controller.take_notice().unwrap();
    assert!(notice.is_error());
    assert!(notice.message.contains("Failed to delete task"));
    assert!(notice.message.contains("delete_task failed"));
    // No reload after a failure
    assert_eq!(backend.calls(), vec![Call::DeleteTask(2)]);
}

#[tokio::test]
async fn test_failed_bulk_delete_keeps_tasks_and_selection() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    controller.toggle_selected(1);
    controller.toggle_selected(2);
    controller.on_filter_change(TaskFilter::Todo);
    controller.on_sort_change(SortMode::Alpha);
    backend.fail("bulk_delete_tasks");

    assert!(controller.on_bulk_delete());
    assert!(!controller.confirm().await);

    assert_eq!(controller.tasks().len(), 3);
    assert_eq!(controller.selected().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(controller.toolbar(), Toolbar::Selection { count: 2 });
    let notice = controller.take_notice().unwrap();
    assert!(notice.is_error());
    assert!(notice.message.contains("Failed to delete selected tasks"));
    // All or nothing: one request, no reload
    assert_eq!(backend.calls(), vec![Call::BulkDeleteTasks(vec![1, 2])]);
    assert_eq!(backend.task_ids(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_empty_title_blocks_submit() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    controller.on_create();
    {
        let form = controller.form_mut().unwrap();
        form.title = "   ".to_string();
        form.focus = FormField::Description;
    }

    assert_eq!(controller.submit_form().await, SubmitOutcome::Invalid);

    assert!(backend.calls().is_empty());
    let form = controller.form().unwrap();
    assert_eq!(form.title_error.as_deref(), Some("Title is required"));
    assert_eq!(form.focus, FormField::Title);
}

#[tokio::test]
async fn test_bad_due_date_blocks_submit() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    controller.on_create();
    {
        let form = controller.form_mut().unwrap();
        form.title = "Plan trip".to_string();
        form.due_date = "next week".to_string();
    }

    assert_eq!(controller.submit_form().await, SubmitOutcome::Invalid);
    assert!(backend.calls().is_empty());
    assert!(controller.form().unwrap().due_error.is_some());
    assert_eq!(controller.form().unwrap().focus, FormField::DueDate);
}

#[tokio::test]
async fn test_create_posts_trimmed_payload_and_reloads() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    controller.on_filter_change(TaskFilter::InProgress);
    controller.on_create();
    {
        let form = controller.form_mut().unwrap();
        assert_eq!(form.status, TaskStatus::InProgress);
        form.title = "  Plan trip ".to_string();
        form.description = "Flights and hotel".to_string();
        form.due_date = "2024-07-01".to_string();
    }

    assert_eq!(controller.submit_form().await, SubmitOutcome::Saved);

    assert!(controller.form().is_none());
    assert_eq!(
        backend.mutations(),
        vec![Call::CreateTask(TaskPayload {
            title: "Plan trip".to_string(),
            description: "Flights and hotel".to_string(),
            due_date: Some("2024-07-01".to_string()),
            status: TaskStatus::InProgress,
        })]
    );
    assert_eq!(controller.tasks().len(), 4);
    assert_eq!(controller.display_ids(), vec![4]);
}

#[tokio::test]
async fn test_create_defaults_to_todo_without_status_filter() {
    let backend = FakeBackend::with_tasks(Vec::new());
    let mut controller = loaded(&backend).await;

    controller.on_create();
    assert_eq!(controller.form().unwrap().status, TaskStatus::Todo);
    assert_eq!(controller.form().unwrap().heading(), "New Task");
}

#[tokio::test]
async fn test_edit_prefills_and_updates() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    assert!(controller.on_edit(3));
    {
        let form = controller.form_mut().unwrap();
        assert_eq!(form.title, "Call bank");
        assert_eq!(form.due_date, "2024-06-01");
        assert_eq!(form.status, TaskStatus::Todo);
        assert_eq!(form.task_id(), Some(3));
        form.cycle_status();
    }

    assert_eq!(controller.submit_form().await, SubmitOutcome::Saved);

    assert!(matches!(backend.mutations().as_slice(), [Call::UpdateTask(3, _)]));
    assert_eq!(controller.task(3).unwrap().status, TaskStatus::InProgress);
}

#[tokio::test]
async fn test_edit_unknown_task_is_ignored() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    assert!(!controller.on_edit(42));
    assert!(controller.form().is_none());
}

#[tokio::test]
async fn test_edited_task_leaves_active_filter() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    controller.on_filter_change(TaskFilter::Todo);

    controller.on_edit(2);
    controller.form_mut().unwrap().status = TaskStatus::Done;
    assert_eq!(controller.submit_form().await, SubmitOutcome::Saved);

    assert_eq!(controller.filter(), TaskFilter::Todo);
    assert_eq!(controller.display_ids(), vec![3]);
}

#[tokio::test]
async fn test_failed_submit_keeps_form_values() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    backend.fail("create_task");

    controller.on_create();
    controller.form_mut().unwrap().title = "Plan trip".to_string();

    assert_eq!(controller.submit_form().await, SubmitOutcome::Failed);

    let form = controller.form().unwrap();
    assert_eq!(form.title, "Plan trip");
    assert!(form.error.as_deref().unwrap().contains("Failed to create task"));
    assert_eq!(controller.tasks().len(), 3);
}

#[tokio::test]
async fn test_failed_edit_keeps_form_values() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    backend.fail("update_task");

    assert!(controller.on_edit(2));
    controller.form_mut().unwrap().title = "Buy oat milk".to_string();

    assert_eq!(controller.submit_form().await, SubmitOutcome::Failed);

    let form = controller.form().unwrap();
    assert_eq!(form.task_id(), Some(2));
    assert_eq!(form.title, "Buy oat milk");
    assert!(form.error.as_deref().unwrap().contains("Failed to update task"));
    assert_eq!(controller.task(2).unwrap().title, "Buy milk");
    assert!(matches!(backend.calls().as_slice(), [Call::UpdateTask(2, _)]));
}

#[tokio::test]
async fn test_submit_without_form() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    assert_eq!(controller.submit_form().await, SubmitOutcome::NoForm);
}

#[tokio::test]
async fn test_reorder_ignored_outside_manual_sort() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    for sort in [SortMode::DueAsc, SortMode::Newest, SortMode::Alpha] {
        controller.on_sort_change(sort);
        assert!(!controller.reorder_enabled());
        let mut order = controller.display_ids();
        order.reverse();
        assert!(!controller.on_reorder(&order).await);
    }

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_reorder_posts_full_order_and_reloads() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    assert!(controller.on_reorder(&[3, 1, 2]).await);

    assert_eq!(backend.calls(), vec![Call::ReorderTasks(vec![3, 1, 2]), Call::FetchTasks]);
    assert_eq!(controller.display_ids(), vec![3, 1, 2]);
}

#[tokio::test]
async fn test_reorder_under_filter_keeps_hidden_slots() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    controller.on_filter_change(TaskFilter::Todo);
    assert_eq!(controller.display_ids(), vec![2, 3]);

    assert!(controller.on_reorder(&[3, 2]).await);

    // Task 1 is hidden and keeps the first slot
    assert_eq!(backend.mutations(), vec![Call::ReorderTasks(vec![1, 3, 2])]);
    assert_eq!(controller.display_ids(), vec![3, 2]);
}

#[tokio::test]
async fn test_reorder_rejects_unchanged_or_foreign_order() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;

    assert!(!controller.on_reorder(&[1, 2, 3]).await);
    assert!(!controller.on_reorder(&[1, 2]).await);
    assert!(!controller.on_reorder(&[1, 2, 9]).await);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_failed_reorder_reloads_server_order() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    backend.fail("reorder_tasks");

    assert!(controller.on_reorder(&[2, 1, 3]).await);

    assert!(controller.take_notice().unwrap().is_error());
    assert_eq!(controller.display_ids(), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_load_failure_shows_inline_error() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    backend.fail("fetch_tasks");
    let mut controller = TaskListController::new(backend.clone());

    assert!(!controller.load().await);

    let view = controller.view();
    match view.body {
        ListBody::Error(message) => assert!(message.contains("Failed to load tasks")),
        other => panic!("expected error body, got {:?}", other),
    }

    backend.recover("fetch_tasks");
    assert!(controller.load().await);
    assert!(controller.load_error().is_none());
}

#[tokio::test]
async fn test_reload_prunes_vanished_selection() {
    let backend = FakeBackend::with_tasks(sample_tasks());
    let mut controller = loaded(&backend).await;
    controller.toggle_selected(1);
    controller.toggle_selected(2);

    backend.set_tasks(vec![task(2, "Buy milk", TaskStatus::Todo, 1)]);
    controller.load().await;

    assert_eq!(controller.selected().iter().copied().collect::<Vec<_>>(), vec![2]);
}

#[tokio::test]
async fn test_stats_count_open_and_done_tasks() {
    let backend = FakeBackend::with_tasks(vec![
        due(task(1, "late", TaskStatus::Todo, 0), "2024-06-01"),
        due(task(2, "today", TaskStatus::InProgress, 1), "2024-06-05"),
        due(task(3, "done late", TaskStatus::Done, 2), "2024-06-01"),
        task(4, "someday", TaskStatus::Todo, 3),
    ]);
    let controller = loaded(&backend).await;

    let stats = controller.stats_at(date("2024-06-05"));
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.due_today, 1);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.pending, 3);
}
