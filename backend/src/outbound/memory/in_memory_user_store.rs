//! Arena-backed user store.
//!
//! Records live in a slot vector where the record with id `n` always occupies
//! slot `n - 1`. Deletion leaves an empty slot behind, so the next id is
//! simply the slot count plus one and identifiers are never reused. A single
//! mutex serialises assignment, insertion, and removal.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{NewUser, User, UserId};

/// Process-local [`UserStore`].
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    slots: Mutex<Vec<Option<User>>>,
}

impl InMemoryUserStore {
    /// Create an empty store; the first record receives id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, Vec<Option<User>>> {
        // A panic mid-operation cannot leave the vector half-written, so the
        // data behind a poisoned lock is still consistent.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn slot_index(id: UserId) -> Option<usize> {
    id.get()
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
}

fn next_id(slot_count: usize) -> UserId {
    // usize always fits in u64 on supported targets.
    UserId::new(slot_count as u64 + 1)
}

impl UserStore for InMemoryUserStore {
    fn create(&self, candidate: NewUser) -> User {
        let mut slots = self.slots();
        let user = User::new(next_id(slots.len()), candidate);
        slots.push(Some(user.clone()));
        user
    }

    fn list(&self) -> Vec<User> {
        self.slots().iter().flatten().cloned().collect()
    }

    fn get(&self, id: UserId) -> Result<User, UserStoreError> {
        slot_index(id)
            .and_then(|index| self.slots().get(index).cloned().flatten())
            .ok_or_else(|| UserStoreError::not_found(id))
    }

    fn delete(&self, id: UserId) -> Result<User, UserStoreError> {
        let not_found = || UserStoreError::not_found(id);
        let index = slot_index(id).ok_or_else(not_found)?;
        let mut slots = self.slots();
        slots
            .get_mut(index)
            .and_then(Option::take)
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::thread;

    use rstest::{fixture, rstest};

    use super::*;

    fn candidate(name: &str) -> NewUser {
        NewUser::try_from_parts(name, format!("{name}@x.com"), 30).expect("valid candidate")
    }

    #[fixture]
    fn store() -> InMemoryUserStore {
        InMemoryUserStore::new()
    }

    #[rstest]
    fn ids_start_at_one_and_increase(store: InMemoryUserStore) {
        let first = store.create(candidate("ana"));
        let second = store.create(candidate("bob"));
        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
    }

    #[rstest]
    fn deleted_ids_are_never_reused(store: InMemoryUserStore) {
        store.create(candidate("ana"));
        let bob = store.create(candidate("bob"));
        store.delete(bob.id()).expect("bob exists");

        let cai = store.create(candidate("cai"));
        assert_eq!(cai.id(), UserId::new(3));
    }

    #[rstest]
    fn list_keeps_insertion_order_and_skips_deleted(store: InMemoryUserStore) {
        for name in ["ana", "bob", "cai"] {
            store.create(candidate(name));
        }
        store.delete(UserId::new(2)).expect("bob exists");

        let names: Vec<String> = store
            .list()
            .iter()
            .map(|user| user.name().to_string())
            .collect();
        assert_eq!(names, ["ana", "cai"]);
    }

    #[rstest]
    #[case::nothing_deleted(None)]
    #[case::first_deleted(Some(0))]
    #[case::middle_deleted(Some(1))]
    fn get_after_create_returns_an_equal_record(
        store: InMemoryUserStore,
        #[case] deleted: Option<usize>,
    ) {
        let created: Vec<User> = ["ana", "bob", "cai"]
            .into_iter()
            .map(|name| store.create(candidate(name)))
            .collect();
        let removed = deleted.and_then(|index| created.get(index)).map(User::id);
        if let Some(id) = removed {
            store.delete(id).expect("record exists");
        }

        for user in created.iter().filter(|user| Some(user.id()) != removed) {
            assert_eq!(store.get(user.id()), Ok(user.clone()));
        }

        let dan = store.create(candidate("dan"));
        assert_eq!(store.get(dan.id()), Ok(dan));
    }

    #[rstest]
    fn delete_returns_the_removed_record(store: InMemoryUserStore) {
        let ana = store.create(candidate("ana"));
        assert_eq!(store.delete(ana.id()), Ok(ana.clone()));
        assert_eq!(
            store.get(ana.id()),
            Err(UserStoreError::not_found(ana.id()))
        );
        assert_eq!(
            store.delete(ana.id()),
            Err(UserStoreError::not_found(ana.id()))
        );
    }

    #[rstest]
    #[case::zero(0)]
    #[case::beyond_end(7)]
    #[case::huge(u64::MAX)]
    fn unknown_ids_are_not_found(store: InMemoryUserStore, #[case] raw: u64) {
        store.create(candidate("ana"));
        let id = UserId::new(raw);
        assert_eq!(store.get(id), Err(UserStoreError::not_found(id)));
        assert_eq!(store.delete(id), Err(UserStoreError::not_found(id)));
    }

    #[test]
    fn concurrent_creates_receive_distinct_ids() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let store = Arc::new(InMemoryUserStore::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|thread_index| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|n| store.create(candidate(&format!("u{thread_index}-{n}"))).id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: BTreeSet<UserId> = handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("worker finished"))
            .collect();

        let total = THREADS * PER_THREAD;
        assert_eq!(ids.len(), total);
        assert_eq!(ids.first(), Some(&UserId::new(1)));
        assert_eq!(ids.last(), Some(&UserId::new(total as u64)));
    }
}
