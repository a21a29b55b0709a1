mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::{note, Call, FakeBackend};
use taskdesk::controller::{AutosaveSchedule, NotesEditor, SaveOutcome, SaveState};
use taskdesk::entities::NotePayload;

const WS: i64 = 7;

fn editor(backend: &Arc<FakeBackend>, now: Instant) -> NotesEditor {
    let schedule = AutosaveSchedule::new(Duration::from_secs(60), Duration::from_millis(1500), now);
    NotesEditor::with_schedule(backend.clone(), WS, schedule)
}

#[test]
fn test_schedule_debounce_and_interval() {
    let start = Instant::now();
    let mut schedule = AutosaveSchedule::new(Duration::from_secs(60), Duration::from_millis(1500), start);

    assert!(!schedule.is_due(start + Duration::from_secs(1)));

    schedule.touch(start + Duration::from_secs(1));
    assert!(!schedule.is_due(start + Duration::from_millis(2000)));
    assert!(schedule.fire(start + Duration::from_millis(2600)));
    // The debounce deadline is consumed
    assert!(!schedule.fire(start + Duration::from_millis(2700)));

    assert!(schedule.fire(start + Duration::from_secs(61)));
    assert!(!schedule.is_due(start + Duration::from_secs(62)));
}

#[tokio::test]
async fn test_load_opens_first_note() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a"), note(2, "", "b")]);
    let mut editor = editor(&backend, Instant::now());

    assert!(editor.load().await);

    assert_eq!(editor.current(), Some(1));
    assert_eq!(editor.title(), "Plans");
    assert_eq!(editor.body(), "a");
    assert_eq!(editor.state(), SaveState::Loaded);
    assert_eq!(editor.rows()[1].title, "Untitled");
    assert!(editor.rows()[0].active);
    assert_eq!(backend.calls(), vec![Call::FetchNotes(WS)]);
}

#[tokio::test]
async fn test_save_only_when_dirty() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a")]);
    let now = Instant::now();
    let mut editor = editor(&backend, now);
    editor.load().await;

    assert_eq!(editor.save_now().await, SaveOutcome::Skipped);

    editor.set_body("a and b", now);
    assert!(editor.is_dirty());
    assert_eq!(editor.state(), SaveState::Unsaved);
    assert_eq!(editor.save_now().await, SaveOutcome::Saved);

    assert!(!editor.is_dirty());
    assert_eq!(editor.state(), SaveState::Saved);
    assert_eq!(backend.stored_note(1).unwrap().content, "a and b");
    assert_eq!(editor.notes()[0].content, "a and b");
}

#[tokio::test]
async fn test_blank_title_saved_as_untitled() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a")]);
    let now = Instant::now();
    let mut editor = editor(&backend, now);
    editor.load().await;

    editor.set_title("   ", now);
    editor.save_now().await;

    assert_eq!(
        backend.mutations(),
        vec![Call::UpdateNote(
            WS,
            1,
            NotePayload {
                title: "Untitled".to_string(),
                content: "a".to_string(),
            }
        )]
    );
}

#[tokio::test]
async fn test_tick_saves_after_debounce() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a")]);
    let start = Instant::now();
    let mut editor = editor(&backend, start);
    editor.load().await;

    editor.set_body("typing", start);
    assert_eq!(editor.tick(start + Duration::from_millis(500)).await, SaveOutcome::Skipped);
    assert!(backend.mutations().is_empty());

    assert_eq!(editor.tick(start + Duration::from_millis(1600)).await, SaveOutcome::Saved);
    assert_eq!(backend.mutations().len(), 1);
}

#[tokio::test]
async fn test_periodic_autosave_skips_clean_note() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a")]);
    let start = Instant::now();
    let mut editor = editor(&backend, start);
    editor.load().await;

    assert_eq!(editor.tick(start + Duration::from_secs(61)).await, SaveOutcome::Skipped);
    assert!(backend.mutations().is_empty());
}

#[tokio::test]
async fn test_failed_save_stays_dirty() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a")]);
    let now = Instant::now();
    let mut editor = editor(&backend, now);
    editor.load().await;
    backend.fail("update_note");

    editor.set_body("lost?", now);
    assert_eq!(editor.save_now().await, SaveOutcome::Failed);
    assert!(editor.is_dirty());
    assert_eq!(editor.state(), SaveState::Failed);

    backend.recover("update_note");
    assert_eq!(editor.save_now().await, SaveOutcome::Saved);
    assert_eq!(backend.stored_note(1).unwrap().content, "lost?");
}

#[tokio::test]
async fn test_edits_without_open_note_are_ignored() {
    let backend = FakeBackend::with_notes(Vec::new());
    let now = Instant::now();
    let mut editor = editor(&backend, now);
    editor.load().await;

    editor.set_title("lost", now);
    editor.set_body("nowhere", now);
    assert_eq!(editor.title(), "");
    assert_eq!(editor.body(), "");
    assert!(!editor.is_dirty());
    assert_eq!(editor.save_now().await, SaveOutcome::Skipped);
}

#[tokio::test]
async fn test_create_saves_pending_edits_first() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a")]);
    let now = Instant::now();
    let mut editor = editor(&backend, now);
    editor.load().await;

    editor.set_body("draft", now);
    assert!(editor.create().await);

    let mutations = backend.mutations();
    assert_eq!(mutations.len(), 2);
    assert!(matches!(mutations[0], Call::UpdateNote(WS, 1, _)));
    assert!(matches!(mutations[1], Call::CreateNote(WS, _)));

    assert_eq!(editor.notes()[0].title, "Untitled");
    assert_eq!(editor.current(), Some(editor.notes()[0].id));
    assert_eq!(editor.body(), "");
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn test_delete_needs_confirmation() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a"), note(2, "Ideas", "b")]);
    let mut editor = editor(&backend, Instant::now());
    editor.load().await;

    assert!(!editor.confirm_delete().await);
    assert!(editor.request_delete());
    assert_eq!(editor.delete_prompt(), Some("Delete this note?"));
    editor.cancel_delete();
    assert!(editor.delete_prompt().is_none());
    assert!(backend.mutations().is_empty());

    editor.request_delete();
    assert!(editor.confirm_delete().await);

    assert_eq!(backend.mutations(), vec![Call::DeleteNote(WS, 1)]);
    assert_eq!(editor.current(), Some(2));
    assert_eq!(editor.title(), "Ideas");
}

#[tokio::test]
async fn test_failed_load_reports_error() {
    let backend = FakeBackend::with_notes(vec![note(1, "Plans", "a")]);
    backend.fail("fetch_notes");
    let mut editor = editor(&backend, Instant::now());

    assert!(!editor.load().await);
    assert!(editor.load_error().unwrap().contains("Failed to load notes"));
    assert!(editor.current().is_none());
}
