// src/store/user_repo.rs

use crate::common::error::AppError;
use crate::models::user::User;
use crate::store::kv::Store;

const COLLECTION: &str = "users";

// O repositório de usuários, responsável por todas as interações com a
// coleção 'users'.
#[derive(Clone)]
pub struct UserRepository {
    store: Store,
}

impl UserRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self.store.load(COLLECTION).await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Insere ou substitui o registro do usuário (chave: id).
    pub async fn upsert(&self, user: User) -> Result<(), AppError> {
        let _guard = self.store.lock(COLLECTION).await;

        let mut users: Vec<User> = self.store.load(COLLECTION).await?;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
        self.store.save(COLLECTION, &users).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;

    #[tokio::test]
    async fn upsert_then_find() {
        let repo = UserRepository::new(Store::in_memory());
        repo.upsert(User {
            id: "u1".into(),
            role: UserRole::Technician,
            school_id: Some("s1".into()),
            permissions: vec![],
        })
        .await
        .unwrap();

        let found = repo.find_by_id("u1").await.unwrap().unwrap();
        assert_eq!(found.role, UserRole::Technician);
        assert!(repo.find_by_id("u2").await.unwrap().is_none());
    }
}
