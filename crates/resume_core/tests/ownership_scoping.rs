use chrono::NaiveDate;
use resume_core::db::open_db_in_memory;
use resume_core::{
    NotFoundTarget, ResumeError, ResumeItemDraft, ResumeItemService, ResumeService,
    SqliteResumeItemRepository, SqliteResumeRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

struct Fixture {
    conn: Connection,
}

impl Fixture {
    fn new() -> Self {
        Self {
            conn: open_db_in_memory().unwrap(),
        }
    }

    fn resumes(&self) -> ResumeService<SqliteResumeRepository<'_>> {
        ResumeService::new(SqliteResumeRepository::try_new(&self.conn).unwrap())
    }

    fn items(&self) -> ResumeItemService<SqliteResumeItemRepository<'_>> {
        ResumeItemService::new(SqliteResumeItemRepository::try_new(&self.conn).unwrap())
    }
}

fn draft(title: &str) -> ResumeItemDraft {
    ResumeItemDraft::new(title, "Acme", NaiveDate::from_ymd_opt(2021, 3, 1).unwrap())
}

#[test]
fn users_only_list_their_own_resumes() {
    let fx = Fixture::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    fx.resumes().create_resume(alice, "Alice CV").unwrap();
    fx.resumes().create_resume(alice, "Alice Academic").unwrap();
    let bobs = fx.resumes().create_resume(bob, "Bob CV").unwrap();

    let bob_list = fx.resumes().list_resumes(bob).unwrap();
    assert_eq!(bob_list.len(), 1);
    assert_eq!(bob_list[0].resume.id, bobs.id);

    let alice_list = fx.resumes().list_resumes(alice).unwrap();
    assert_eq!(alice_list.len(), 2);
    assert!(alice_list.iter().all(|s| s.resume.owner == alice));
}

#[test]
fn other_users_resume_behaves_as_missing() {
    let fx = Fixture::new();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let resume = fx.resumes().create_resume(owner, "Private").unwrap();

    let expected = NotFoundTarget::Resume(resume.id);
    for err in [
        fx.resumes().get_resume(intruder, resume.id).unwrap_err(),
        fx.resumes()
            .rename_resume(intruder, resume.id, "Hijacked")
            .unwrap_err(),
        fx.resumes().delete_resume(intruder, resume.id).unwrap_err(),
    ] {
        assert!(matches!(err, ResumeError::NotFound(target) if target == expected));
    }

    assert_eq!(
        fx.resumes().get_resume(owner, resume.id).unwrap().title,
        "Private"
    );
}

#[test]
fn other_users_resume_items_are_unreachable() {
    let fx = Fixture::new();
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let resume = fx.resumes().create_resume(owner, "Private").unwrap();
    let item = fx
        .items()
        .create_item_draft(owner, resume.id, &draft("Dev"))
        .unwrap();

    let items = fx.items();
    assert!(items.list_items(intruder, resume.id).unwrap_err().is_not_found());
    assert!(items
        .get_item(intruder, resume.id, item.id)
        .unwrap_err()
        .is_not_found());
    assert!(items
        .create_item_draft(intruder, resume.id, &draft("Sneaky"))
        .unwrap_err()
        .is_not_found());
    assert!(items
        .edit_item_draft(intruder, resume.id, item.id, &draft("Sneaky"))
        .unwrap_err()
        .is_not_found());
    assert!(items
        .delete_item(intruder, resume.id, item.id)
        .unwrap_err()
        .is_not_found());

    assert_eq!(items.list_items(owner, resume.id).unwrap(), vec![item]);
}

#[test]
fn get_scoped_rejects_item_from_another_resume() {
    let fx = Fixture::new();
    let user = Uuid::new_v4();
    let resume_a = fx.resumes().create_resume(user, "A").unwrap();
    let resume_b = fx.resumes().create_resume(user, "B").unwrap();
    let item_of_b = fx
        .items()
        .create_item_draft(user, resume_b.id, &draft("Dev"))
        .unwrap();

    let err = fx
        .items()
        .get_item(user, resume_a.id, item_of_b.id)
        .unwrap_err();
    assert!(matches!(
        err,
        ResumeError::NotFound(NotFoundTarget::ResumeItem { resume_id, item_id })
            if resume_id == resume_a.id && item_id == item_of_b.id
    ));
}

#[test]
fn edit_and_delete_through_wrong_resume_leave_item_untouched() {
    let fx = Fixture::new();
    let user = Uuid::new_v4();
    let resume_a = fx.resumes().create_resume(user, "A").unwrap();
    let resume_b = fx.resumes().create_resume(user, "B").unwrap();
    let item_of_b = fx
        .items()
        .create_item_draft(user, resume_b.id, &draft("Dev"))
        .unwrap();

    let items = fx.items();
    assert!(items
        .edit_item_draft(user, resume_a.id, item_of_b.id, &draft("Moved"))
        .unwrap_err()
        .is_not_found());
    assert!(items
        .delete_item(user, resume_a.id, item_of_b.id)
        .unwrap_err()
        .is_not_found());

    assert_eq!(
        items.get_item(user, resume_b.id, item_of_b.id).unwrap(),
        item_of_b
    );
    assert!(items.list_items(user, resume_a.id).unwrap().is_empty());
}

#[test]
fn deleting_one_resume_keeps_sibling_items() {
    let fx = Fixture::new();
    let user = Uuid::new_v4();
    let doomed = fx.resumes().create_resume(user, "Old").unwrap();
    let kept = fx.resumes().create_resume(user, "New").unwrap();
    fx.items()
        .create_item_draft(user, doomed.id, &draft("Dev"))
        .unwrap();
    let survivor = fx
        .items()
        .create_item_draft(user, kept.id, &draft("Lead"))
        .unwrap();

    fx.resumes().delete_resume(user, doomed.id).unwrap();

    assert_eq!(fx.items().list_items(user, kept.id).unwrap(), vec![survivor]);
    let listed = fx.resumes().list_resumes(user).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].item_count, 1);
}
