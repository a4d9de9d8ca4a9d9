// ==================== USER RECORDS ====================
// Leitura, atualização e remoção de usuários + varredura de fotos http://

use crate::{
    database::Store,
    models::{UpdateUserRequest, UserProfile},
    utils::{
        crypto::hash_password,
        secure_url::{is_insecure_url, secure_photo_url},
        AppError,
    },
};

fn user_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}

/// Partial update. A `photo` on plain http is upgraded to https and a
/// `password` is hashed before anything is written.
pub async fn update_user(
    store: &dyn Store,
    id: &str,
    mut changes: UpdateUserRequest,
) -> Result<UserProfile, AppError> {
    if let Some(photo) = changes.photo.as_mut() {
        *photo = secure_photo_url(photo);
    }

    if let Some(plain) = changes.password.take() {
        let hashed = tokio::task::spawn_blocking(move || hash_password(&plain))
            .await
            .map_err(|e| AppError::StorageError(format!("Password hashing task failed: {}", e)))??;
        changes.password = Some(hashed);
    }

    let updated = store
        .update_user(id, &changes)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(UserProfile::from(updated))
}

/// Removes the user if present; deleting a missing id is not an error
pub async fn delete_user(store: &dyn Store, id: &str) -> Result<(), AppError> {
    store.delete_user(id).await
}

pub async fn get_user(store: &dyn Store, id: &str) -> Result<UserProfile, AppError> {
    store
        .find_user(id)
        .await?
        .map(UserProfile::from)
        .ok_or_else(|| user_not_found(id))
}

pub async fn get_all_users(store: &dyn Store) -> Result<Vec<UserProfile>, AppError> {
    let users = store.list_users().await?;
    Ok(users.into_iter().map(UserProfile::from).collect())
}

/// Profile of the authenticated caller
pub async fn get_profile(store: &dyn Store, user_id: &str) -> Result<UserProfile, AppError> {
    get_user(store, user_id).await
}

/// One-off migration: rewrites every stored `http` photo URL to `https`.
///
/// Records are written one at a time; the first failed write aborts the
/// sweep and the records already written stay written.
pub async fn repair_insecure_photo_urls(store: &dyn Store) -> Result<u64, AppError> {
    let users = store.list_users().await?;
    let mut count = 0;

    for user in users {
        let Some(photo) = user.photo.as_deref() else {
            continue;
        };

        if !is_insecure_url(photo) {
            continue;
        }

        let secured = secure_photo_url(photo);
        store.set_user_photo(&user.id, &secured).await?;
        log::debug!("🔒 Photo secured for user {}", user.id);
        count += 1;
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::{sample_user, InMemoryStore};
    use crate::models::Gender;

    #[tokio::test]
    async fn test_update_upgrades_photo_and_keeps_other_fields() {
        let store = InMemoryStore::new();
        let user = sample_user("ana@example.com", Some("https://old/photo.png"));
        let id = user.id;
        store.add_user(user.clone());

        let changes = UpdateUserRequest {
            photo: Some("http://x/y.png".to_string()),
            ..Default::default()
        };
        let profile = update_user(&store, &id.to_hex(), changes).await.unwrap();

        assert_eq!(profile.photo.as_deref(), Some("https://x/y.png"));
        assert_eq!(profile.email, user.email);
        assert_eq!(profile.name, user.name);
        assert_eq!(profile.phone, user.phone);
        assert_eq!(profile.blood_type, user.blood_type);

        let stored = store.stored_user(&id).unwrap();
        assert_eq!(stored.photo.as_deref(), Some("https://x/y.png"));
        assert_eq!(stored.password, user.password);
    }

    #[tokio::test]
    async fn test_update_hashes_password() {
        let store = InMemoryStore::new();
        let user = sample_user("ana@example.com", None);
        let id = user.id;
        store.add_user(user);

        let changes = UpdateUserRequest {
            password: Some("new-password".to_string()),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        update_user(&store, &id.to_hex(), changes).await.unwrap();

        let stored = store.stored_user(&id).unwrap();
        let hash = stored.password.unwrap();
        assert_ne!(hash, "new-password");
        assert!(bcrypt::verify("new-password", &hash).unwrap());
        assert_eq!(stored.gender, Some(Gender::Female));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let store = InMemoryStore::new();
        let changes = UpdateUserRequest {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };

        let missing = mongodb::bson::oid::ObjectId::new().to_hex();
        assert!(matches!(
            update_user(&store, &missing, changes.clone()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            update_user(&store, "not-an-id", changes).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = InMemoryStore::new();
        let user = sample_user("ana@example.com", None);
        let id = user.id.to_hex();
        store.add_user(user);

        assert!(get_user(&store, &id).await.is_ok());
        delete_user(&store, &id).await.unwrap();
        assert!(matches!(get_user(&store, &id).await, Err(AppError::NotFound(_))));

        // Idempotent: a second delete still succeeds
        assert!(delete_user(&store, &id).await.is_ok());
        assert!(delete_user(&store, "not-an-id").await.is_ok());
    }

    #[tokio::test]
    async fn test_reads_never_include_password() {
        let store = InMemoryStore::new();
        let user = sample_user("ana@example.com", None);
        let id = user.id.to_hex();
        store.add_user(user);
        store.add_user(sample_user("bruno@example.com", None));

        let single = serde_json::to_value(get_user(&store, &id).await.unwrap()).unwrap();
        let profile = serde_json::to_value(get_profile(&store, &id).await.unwrap()).unwrap();
        let all = serde_json::to_value(get_all_users(&store).await.unwrap()).unwrap();

        assert!(single.get("password").is_none());
        assert!(profile.get("password").is_none());
        let all = all.as_array().unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|u| u.get("password").is_none()));
    }

    #[tokio::test]
    async fn test_profile_of_deleted_user_is_not_found() {
        let store = InMemoryStore::new();
        let id = mongodb::bson::oid::ObjectId::new().to_hex();
        assert!(matches!(get_profile(&store, &id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_repair_counts_only_insecure_photos() {
        let store = InMemoryStore::new();
        let insecure = [
            sample_user("a@example.com", Some("http://cdn.test/a.png")),
            sample_user("b@example.com", Some("http://cdn.test/b.png?size=large")),
            sample_user("c@example.com", Some("http://cdn.test/c.png")),
        ];
        let secure = [
            sample_user("d@example.com", Some("https://cdn.test/d.png")),
            sample_user("e@example.com", Some("https://cdn.test/proxy?u=http://x/e.png")),
        ];
        for user in insecure.iter().chain(secure.iter()) {
            store.add_user(user.clone());
        }
        store.add_user(sample_user("f@example.com", None));

        let count = repair_insecure_photo_urls(&store).await.unwrap();
        assert_eq!(count, 3);

        for user in &insecure {
            let stored = store.stored_user(&user.id).unwrap();
            let before = user.photo.as_deref().unwrap();
            assert_eq!(stored.photo.unwrap(), format!("https{}", &before["http".len()..]));
        }
        for user in &secure {
            assert_eq!(store.stored_user(&user.id).unwrap().photo, user.photo);
        }

        // A second run finds nothing left to fix
        assert_eq!(repair_insecure_photo_urls(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repair_secures_unparseable_http_values() {
        let store = InMemoryStore::new();
        let spaced = sample_user("a@example.com", Some("http://cdn example.com/a.png"));
        let bare = sample_user("b@example.com", Some("http://"));
        store.add_user(spaced.clone());
        store.add_user(bare.clone());

        assert_eq!(repair_insecure_photo_urls(&store).await.unwrap(), 2);
        assert_eq!(
            store.stored_user(&spaced.id).unwrap().photo.as_deref(),
            Some("https://cdn example.com/a.png")
        );
        assert_eq!(store.stored_user(&bare.id).unwrap().photo.as_deref(), Some("https://"));
    }

    #[tokio::test]
    async fn test_update_secures_unparseable_http_photo() {
        let store = InMemoryStore::new();
        let user = sample_user("ana@example.com", None);
        let id = user.id;
        store.add_user(user);

        let changes = UpdateUserRequest {
            photo: Some("http://a%zz.com/x.png".to_string()),
            ..Default::default()
        };
        let profile = update_user(&store, &id.to_hex(), changes).await.unwrap();
        assert_eq!(profile.photo.as_deref(), Some("https://a%zz.com/x.png"));
    }

    #[tokio::test]
    async fn test_repair_aborts_on_first_failed_write() {
        let store = InMemoryStore::new();
        let first = sample_user("a@example.com", Some("http://cdn.test/a.png"));
        let second = sample_user("b@example.com", Some("http://cdn.test/b.png"));
        let third = sample_user("c@example.com", Some("http://cdn.test/c.png"));
        store.add_user(first.clone());
        store.add_user(second.clone());
        store.add_user(third.clone());
        store.fail_photo_write_for(second.id);

        let result = repair_insecure_photo_urls(&store).await;
        assert!(matches!(result, Err(AppError::StorageError(_))));

        assert_eq!(
            store.stored_user(&first.id).unwrap().photo.as_deref(),
            Some("https://cdn.test/a.png")
        );
        assert_eq!(store.stored_user(&third.id).unwrap().photo, third.photo);
    }
}
