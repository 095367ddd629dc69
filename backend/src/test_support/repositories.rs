//! In-memory implementations of the persistence ports.
//!
//! They follow the same contracts as the Diesel adapters: ids are assigned in
//! increasing order, listing is ordered by id, and email/username
//! uniqueness is exact-match.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use pagination::PageParams;

use crate::domain::ports::{
    CalculationRepository, CalculationRepositoryError, UserPersistenceError, UserRepository,
};
use crate::domain::{Calculation, CalculationId, ComputedCalculation, NewUser, User, UserAccount, UserId};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[derive(Default)]
struct CalculationTable {
    next_id: i64,
    rows: BTreeMap<i64, Calculation>,
}

/// Calculation store backed by an ordered map.
#[derive(Default)]
pub struct InMemoryCalculationRepository {
    table: Mutex<CalculationTable>,
}

impl InMemoryCalculationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored calculations.
    pub fn len(&self) -> usize {
        lock(&self.table).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CalculationRepository for InMemoryCalculationRepository {
    async fn insert(
        &self,
        calculation: &ComputedCalculation,
        owner: Option<UserId>,
    ) -> Result<Calculation, CalculationRepositoryError> {
        let mut table = lock(&self.table);
        table.next_id += 1;
        let id = table.next_id;
        let now = Utc::now();
        let record = Calculation {
            id: CalculationId::new(id),
            a: calculation.a(),
            b: calculation.b(),
            operation: calculation.operation(),
            result: calculation.result(),
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(
        &self,
        id: CalculationId,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        Ok(lock(&self.table).rows.get(&id.get()).cloned())
    }

    async fn list(&self, page: PageParams) -> Result<Vec<Calculation>, CalculationRepositoryError> {
        let table = lock(&self.table);
        let ordered: Vec<Calculation> = table.rows.values().cloned().collect();
        Ok(page.window(&ordered))
    }

    async fn update(
        &self,
        id: CalculationId,
        calculation: &ComputedCalculation,
    ) -> Result<Option<Calculation>, CalculationRepositoryError> {
        let mut table = lock(&self.table);
        let Some(record) = table.rows.get_mut(&id.get()) else {
            return Ok(None);
        };
        record.a = calculation.a();
        record.b = calculation.b();
        record.operation = calculation.operation();
        record.result = calculation.result();
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: CalculationId) -> Result<bool, CalculationRepositoryError> {
        Ok(lock(&self.table).rows.remove(&id.get()).is_some())
    }
}

/// Account store keyed by insertion order.
#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Vec<UserAccount>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the `is_active` flag of a stored account. Returns `false` when no
    /// account has that id.
    pub fn set_active(&self, id: &UserId, active: bool) -> bool {
        let mut accounts = lock(&self.accounts);
        let Some(account) = accounts.iter_mut().find(|account| account.user.id() == id) else {
            return false;
        };
        let user = &account.user;
        account.user = User::new(
            user.id().clone(),
            user.email().clone(),
            user.username().clone(),
            active,
            user.created_at(),
        );
        true
    }

    /// Stored hash for `username`, for asserting that plaintext is never kept.
    pub fn password_hash_of(&self, username: &str) -> Option<String> {
        lock(&self.accounts)
            .iter()
            .find(|account| account.user.username().as_ref() == username)
            .map(|account| account.password_hash.as_str().to_owned())
    }

    fn find(&self, matches: impl Fn(&User) -> bool) -> Option<UserAccount> {
        lock(&self.accounts)
            .iter()
            .find(|account| matches(&account.user))
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut accounts = lock(&self.accounts);
        if accounts.iter().any(|a| a.user.email() == &user.email) {
            return Err(UserPersistenceError::duplicate_email());
        }
        if accounts.iter().any(|a| a.user.username() == &user.username) {
            return Err(UserPersistenceError::duplicate_username());
        }
        let stored = User::new(
            user.id.clone(),
            user.email.clone(),
            user.username.clone(),
            true,
            Utc::now(),
        );
        accounts.push(UserAccount {
            user: stored.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.find(|user| user.email().as_ref() == email))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self.find(|user| user.username().as_ref() == username))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.find(|user| user.id() == id).map(|account| account.user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CalculationInputs;
    use rstest::rstest;

    fn computed(a: f64, b: f64, tag: &str) -> ComputedCalculation {
        ComputedCalculation::compute(&CalculationInputs::new(a, b, tag)).expect("valid inputs")
    }

    #[rstest]
    #[tokio::test]
    async fn ids_increase_and_are_not_reused() {
        let repo = InMemoryCalculationRepository::new();
        let first = repo.insert(&computed(1.0, 2.0, "Add"), None).await.expect("insert");
        assert!(repo.delete(first.id).await.expect("delete"));
        let second = repo.insert(&computed(3.0, 4.0, "Add"), None).await.expect("insert");

        assert!(second.id > first.id);
        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_row_reports_none() {
        let repo = InMemoryCalculationRepository::new();
        let updated = repo
            .update(CalculationId::new(9), &computed(1.0, 1.0, "Sub"))
            .await
            .expect("update");
        assert!(updated.is_none());
    }
}
