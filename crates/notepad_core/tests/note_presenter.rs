use notepad_core::{
    open_presenter, AddNoteForm, EditSurfaceState, FlatFileNoteRepository, NoteAction,
    NotePresenter, NoteStore, NotepadConfig, PresenterError, ViewChange, NOTE_LIST_HEADING,
};
use std::fs;
use std::path::{Path, PathBuf};

fn presenter_at(path: &Path) -> NotePresenter<FlatFileNoteRepository> {
    NotePresenter::new(NoteStore::open(FlatFileNoteRepository::new(path)))
}

fn file_fields(path: &Path) -> Vec<(String, String)> {
    presenter_at(path)
        .render()
        .blocks
        .into_iter()
        .map(|block| (block.title, block.content))
        .collect()
}

#[test]
fn render_projects_one_block_per_note_with_actions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Overview.txt");
    fs::write(&path, "A: 1\nB: 2\n").unwrap();
    let presenter = presenter_at(&path);

    let view = presenter.render();

    assert_eq!(view.heading, NOTE_LIST_HEADING);
    assert_eq!(view.blocks.len(), 2);
    assert_eq!(view.blocks[0].title, "A");
    assert_eq!(view.blocks[1].content, "2");
    assert_eq!(
        view.blocks[0].actions,
        vec![NoteAction::Edit, NoteAction::Delete]
    );
    assert_eq!(presenter.render(), view);
}

#[test]
fn add_returns_only_the_new_block_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Overview.txt");
    fs::write(&path, "A: 1\n").unwrap();
    let mut presenter = presenter_at(&path);

    let change = presenter.on_add_requested("B", "2").unwrap();

    let block = match change {
        ViewChange::Appended(block) => block,
        other => panic!("expected Appended, got {other:?}"),
    };
    assert_eq!((block.title.as_str(), block.content.as_str()), ("B", "2"));
    assert_eq!(presenter.render().blocks.last(), Some(&block));
    assert_eq!(
        file_fields(&path),
        vec![
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "2".to_string())
        ]
    );
}

#[test]
fn edit_surface_opens_prefilled_and_saves_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Overview.txt");
    fs::write(&path, "A: 1\nB: 2\n").unwrap();
    let mut presenter = presenter_at(&path);
    let target = presenter.render().blocks[1].note_id;

    let mut draft = presenter.on_edit_requested(target).unwrap();
    assert_eq!(presenter.edit_state(target), EditSurfaceState::Open);
    assert_eq!((draft.title.as_str(), draft.content.as_str()), ("B", "2"));

    draft.title = "B2".to_string();
    draft.content = "two".to_string();
    let change = presenter.on_edit_confirmed(draft).unwrap();

    let block = match change {
        ViewChange::Updated(block) => block,
        other => panic!("expected Updated, got {other:?}"),
    };
    assert_eq!(block.note_id, target);
    assert_eq!(block.title, "B2");
    assert_eq!(presenter.edit_state(target), EditSurfaceState::Closed);
    assert_eq!(presenter.render().blocks[1], block);
    assert_eq!(
        file_fields(&path),
        vec![
            ("A".to_string(), "1".to_string()),
            ("B2".to_string(), "two".to_string())
        ]
    );
}

#[test]
fn cancelled_edit_discards_changes_and_does_not_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Overview.txt");
    fs::write(&path, "A: 1\n").unwrap();
    let mut presenter = presenter_at(&path);
    let target = presenter.render().blocks[0].note_id;

    let mut draft = presenter.on_edit_requested(target).unwrap();
    draft.title = "changed".to_string();
    assert!(presenter.on_edit_cancelled(target));

    assert_eq!(presenter.edit_state(target), EditSurfaceState::Closed);
    assert_eq!(presenter.render().blocks[0].title, "A");
    assert_eq!(fs::read_to_string(&path).unwrap(), "A: 1\n");

    let err = presenter.on_edit_confirmed(draft).unwrap_err();
    assert!(matches!(err, PresenterError::EditorNotOpen(id) if id == target));
    assert!(!presenter.on_edit_cancelled(target));
}

#[test]
fn several_edit_surfaces_may_be_open_at_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Overview.txt");
    fs::write(&path, "A: 1\nB: 2\n").unwrap();
    let mut presenter = presenter_at(&path);
    let ids: Vec<_> = presenter
        .render()
        .blocks
        .iter()
        .map(|block| block.note_id)
        .collect();

    let first = presenter.on_edit_requested(ids[0]).unwrap();
    let second = presenter.on_edit_requested(ids[1]).unwrap();

    assert_eq!(presenter.edit_state(ids[0]), EditSurfaceState::Open);
    assert_eq!(presenter.edit_state(ids[1]), EditSurfaceState::Open);
    presenter.on_edit_confirmed(second).unwrap();
    presenter.on_edit_confirmed(first).unwrap();
}

#[test]
fn delete_removes_block_and_closes_its_editor() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Overview.txt");
    fs::write(&path, "A: 1\nB: 2\nA: 1\n").unwrap();
    let mut presenter = presenter_at(&path);
    let first = presenter.render().blocks[0].note_id;
    presenter.on_edit_requested(first).unwrap();

    let change = presenter.on_delete_requested(first).unwrap();

    assert_eq!(change, ViewChange::Removed(first));
    assert_eq!(presenter.edit_state(first), EditSurfaceState::Closed);
    assert_eq!(
        file_fields(&path),
        vec![
            ("B".to_string(), "2".to_string()),
            ("A".to_string(), "1".to_string())
        ]
    );

    let err = presenter.on_delete_requested(first).unwrap_err();
    assert!(matches!(err, PresenterError::NoteNotFound(_)));
    let err = presenter.on_edit_requested(first).unwrap_err();
    assert!(matches!(err, PresenterError::NoteNotFound(_)));
}

#[test]
fn form_validation_gates_the_add_intent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Overview.txt");
    let mut presenter = presenter_at(&path);
    let mut form = AddNoteForm::new("Title", "");

    assert!(form.submit().is_err());
    form.content = "body".to_string();
    let (title, content) = form.submit().unwrap();
    presenter.on_add_requested(title, content).unwrap();
    form.clear();

    assert_eq!(form, AddNoteForm::default());
    assert_eq!(presenter.render().blocks.len(), 1);
}

#[test]
fn open_presenter_uses_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path: PathBuf = dir.path().join("configured.txt");
    fs::write(&path, "Configured: yes\n").unwrap();
    let config = NotepadConfig::resolve(Some(path.clone()), |_| None).unwrap();

    let presenter = open_presenter(&config);

    assert_eq!(presenter.store().repository().path(), path.as_path());
    assert_eq!(presenter.render().blocks[0].title, "Configured");
}

#[test]
fn block_serializes_with_snake_case_actions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Overview.txt");
    fs::write(&path, "A: 1\n").unwrap();
    let view = presenter_at(&path).render();

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["heading"], "Your notes");
    assert_eq!(json["blocks"][0]["title"], "A");
    assert_eq!(json["blocks"][0]["actions"][1], "delete");
    assert_eq!(
        json["blocks"][0]["note_id"],
        view.blocks[0].note_id.to_string()
    );
}
