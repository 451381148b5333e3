//! Behaviour every `UserRepository` adapter must share.
//!
//! Each check provisions its own emails so the same assertions run against a
//! fresh in-memory store or a shared PostgreSQL database.

use std::collections::HashSet;
use std::sync::Arc;

use users_backend::domain::ports::{UserPersistenceError, UserRepository};
use users_backend::domain::{NewUser, User, UserId};
use uuid::Uuid;

/// Email that no other test run will have used.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}.{}@example.com", Uuid::new_v4().simple())
}

pub fn new_user(name: &str, email: &str, role: Option<&str>) -> NewUser {
    NewUser::try_from_strings(name, email, role.map(str::to_owned)).expect("valid new user")
}

pub async fn create_assigns_distinct_ids<R: UserRepository>(repo: &R) {
    let mut ids = HashSet::new();
    for idx in 0..5 {
        let email = unique_email(&format!("distinct{idx}"));
        let user = repo
            .create(&new_user("Test User", &email, Some("tester")))
            .await
            .expect("create succeeds");
        assert_eq!(user.name().as_ref(), "Test User");
        assert_eq!(user.email().as_ref(), email);
        assert_eq!(user.role().as_ref(), "tester");
        assert!(ids.insert(user.id().clone()), "id {} reused", user.id());
    }
}

pub async fn duplicate_email_leaves_store_unchanged<R: UserRepository>(repo: &R) {
    let email = unique_email("dup");
    let first = repo
        .create(&new_user("First Holder", &email, None))
        .await
        .expect("first create succeeds");

    let err = repo
        .create(&new_user("Second Holder", &email, Some("admin")))
        .await
        .expect_err("duplicate rejected");
    assert_eq!(err, UserPersistenceError::duplicate_email(email.clone()));

    let holders = holders_of(repo, &email).await;
    assert_eq!(holders, vec![first]);
}

pub async fn find_returns_created_user<R: UserRepository>(repo: &R) {
    let created = repo
        .create(&new_user("Ada Lovelace", &unique_email("ada"), None))
        .await
        .expect("create succeeds");
    let fetched = repo.find_by_id(created.id()).await.expect("user present");
    assert_eq!(fetched, created);
    assert_eq!(fetched.role().as_ref(), "user");
}

pub async fn find_unknown_id_is_not_found<R: UserRepository>(repo: &R) {
    let id = UserId::random();
    let err = repo.find_by_id(&id).await.expect_err("no such user");
    assert_eq!(err, UserPersistenceError::not_found(id.to_string()));
}

pub async fn list_grows_with_each_create<R: UserRepository>(repo: &R) {
    let tag = Uuid::new_v4().simple().to_string();
    let emails: Vec<_> = (0..3).map(|idx| format!("list{idx}.{tag}@example.com")).collect();
    assert!(tagged(repo, &tag).await.is_empty());

    let mut created = Vec::new();
    for email in &emails {
        let user = repo
            .create(&new_user("Listed User", email, None))
            .await
            .expect("create succeeds");
        created.push(user);
    }

    let listed = tagged(repo, &tag).await;
    assert_eq!(listed.len(), created.len());
    for user in &created {
        assert!(listed.contains(user), "{} missing from list", user.id());
    }
}

pub async fn find_accepts_any_uuid_spelling<R: UserRepository>(repo: &R) {
    let created = repo
        .create(&new_user("Grace Hopper", &unique_email("grace"), None))
        .await
        .expect("create succeeds");
    let canonical = created.id().as_ref().to_owned();
    for spelling in [
        canonical.to_uppercase(),
        format!("{{{canonical}}}"),
        format!("urn:uuid:{canonical}"),
    ] {
        let id = UserId::new(&spelling).expect("alternate UUID form");
        let fetched = repo
            .find_by_id(&id)
            .await
            .unwrap_or_else(|err| panic!("{spelling} should resolve: {err}"));
        assert_eq!(fetched.id().as_uuid(), created.id().as_uuid());
        assert_eq!(fetched.email(), created.email());
    }
}

/// Users in the store whose email carries `tag`. Other tests may share the
/// store, so assertions only look at rows this test created.
async fn tagged<R: UserRepository>(repo: &R, tag: &str) -> Vec<User> {
    repo.list()
        .await
        .expect("list succeeds")
        .into_iter()
        .filter(|user| user.email().as_ref().contains(tag))
        .collect()
}

async fn holders_of<R: UserRepository>(repo: &R, email: &str) -> Vec<User> {
    repo.list()
        .await
        .expect("list succeeds")
        .into_iter()
        .filter(|user| user.email().as_ref() == email)
        .collect()
}

/// Race `attempts` creates for one email; exactly one may win.
pub async fn concurrent_duplicates_admit_one<R>(repo: Arc<R>, attempts: usize)
where
    R: UserRepository + 'static,
{
    let email = unique_email("race");
    let handles: Vec<_> = (0..attempts)
        .map(|idx| {
            let repo = Arc::clone(&repo);
            let candidate = new_user(&format!("Racer {idx}"), &email, None);
            tokio::spawn(async move { repo.create(&candidate).await })
        })
        .collect();

    let mut winners = 0;
    let mut losers = 0;
    for handle in handles {
        match handle.await.expect("task joins") {
            Ok(_) => winners += 1,
            Err(UserPersistenceError::DuplicateEmail { .. }) => losers += 1,
            Err(other) => panic!("unexpected store error: {other}"),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(losers, attempts - 1);

    assert_eq!(holders_of(repo.as_ref(), &email).await.len(), 1);
}
