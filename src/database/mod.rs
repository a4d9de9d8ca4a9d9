use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database, IndexModel};

use crate::models::{Booking, ContactMessage, Doctor, UpdateUserRequest, User};
use crate::utils::AppError;

#[cfg(test)]
pub mod memory;

pub const USERS: &str = "users";
pub const DOCTORS: &str = "doctors";
pub const BOOKINGS: &str = "bookings";
pub const CONTACT_MESSAGES: &str = "contact_messages";

/// Every persistence operation the handlers rely on.
///
/// Ids arrive as the hex strings clients send; an id that is not a valid
/// ObjectId simply matches nothing.
#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError>;

    async fn list_users(&self) -> Result<Vec<User>, AppError>;

    /// Applies `$set` with the given fields and returns the record after the write
    async fn update_user(
        &self,
        id: &str,
        changes: &UpdateUserRequest,
    ) -> Result<Option<User>, AppError>;

    async fn delete_user(&self, id: &str) -> Result<(), AppError>;

    async fn set_user_photo(&self, id: &ObjectId, photo: &str) -> Result<(), AppError>;

    async fn find_bookings_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError>;

    async fn find_doctors_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Doctor>, AppError>;

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

fn without_password() -> Document {
    doc! { "password": 0 }
}

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));
        client_options.app_name = Some("doctor-booking-service".to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let mongodb = Self { client, db };
        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Creates the indexes used by the read paths; failures are logged, not fatal
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let indexes = [
            (BOOKINGS, doc! { "user": 1 }),
            (BOOKINGS, doc! { "doctor": 1 }),
            (USERS, doc! { "email": 1 }),
        ];

        for (collection, keys) in indexes {
            let fields = keys.keys().cloned().collect::<Vec<_>>().join(", ");
            let label = format!("{}({})", collection, fields);
            let index = IndexModel::builder().keys(keys).build();

            match self.collection::<Document>(collection).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}", label),
                Err(e) => log::debug!("   ℹ️  Index not created {}: {}", label, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Closes pooled connections; call once the HTTP server has stopped
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl Store for MongoDB {
    async fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let user = self
            .collection::<User>(USERS)
            .find_one(doc! { "_id": oid })
            .projection(without_password())
            .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let cursor = self
            .collection::<User>(USERS)
            .find(doc! {})
            .projection(without_password())
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn update_user(
        &self,
        id: &str,
        changes: &UpdateUserRequest,
    ) -> Result<Option<User>, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        if changes.is_empty() {
            return self.find_user(id).await;
        }

        let updated = self
            .collection::<User>(USERS)
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": changes.to_set_document() })
            .return_document(ReturnDocument::After)
            .projection(without_password())
            .await?;

        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(());
        };

        let result = self.collection::<User>(USERS).delete_one(doc! { "_id": oid }).await?;
        log::debug!("delete_user {}: {} document(s) removed", id, result.deleted_count);

        Ok(())
    }

    async fn set_user_photo(&self, id: &ObjectId, photo: &str) -> Result<(), AppError> {
        self.collection::<User>(USERS)
            .update_one(doc! { "_id": *id }, doc! { "$set": { "photo": photo } })
            .await?;

        Ok(())
    }

    async fn find_bookings_by_user(&self, user_id: &str) -> Result<Vec<Booking>, AppError> {
        let Some(oid) = parse_id(user_id) else {
            return Ok(vec![]);
        };

        let cursor = self.collection::<Booking>(BOOKINGS).find(doc! { "user": oid }).await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_doctors_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<Doctor>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let cursor = self
            .collection::<Doctor>(DOCTORS)
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .projection(without_password())
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn insert_contact_message(&self, message: &ContactMessage) -> Result<(), AppError> {
        self.collection::<ContactMessage>(CONTACT_MESSAGES)
            .insert_one(message)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGO_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let db = MongoDB::new(&uri, "doctor_booking_test").await;
        assert!(db.is_ok());

        let db = db.unwrap();
        assert!(db.ping().await.is_ok());
        assert!(db.find_user("not-an-object-id").await.unwrap().is_none());
        db.shutdown().await;
    }
}
