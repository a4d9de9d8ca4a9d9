use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Patient,
    Doctor,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Documento da collection "users"
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    /// bcrypt hash; absent when the read projection drops it
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        deserialize_with = "deserialize_phone"
    )]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub appointments: Vec<ObjectId>,
}

/// Phone numbers were stored as numbers by older clients and as strings by newer ones
#[derive(Deserialize)]
#[serde(untagged)]
enum PhoneRepr {
    Int(i64),
    Float(f64),
    Text(String),
}

pub(crate) fn deserialize_phone<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let phone = Option::<PhoneRepr>::deserialize(deserializer)?;
    Ok(phone.map(|p| match p {
        PhoneRepr::Int(n) => n.to_string(),
        PhoneRepr::Float(n) => format!("{}", n as i64),
        PhoneRepr::Text(s) => s,
    }))
}

/// User as returned to clients (never carries the password)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub role: Role,
    pub gender: Option<Gender>,
    pub blood_type: Option<String>,
    pub appointments: Vec<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            name: user.name,
            phone: user.phone,
            photo: user.photo,
            role: user.role,
            gender: user.gender,
            blood_type: user.blood_type,
            appointments: user.appointments.iter().map(|id| id.to_hex()).collect(),
        }
    }
}

/// Partial update accepted by PUT /users/{id}
///
/// Only the fields present in the request are written. `role` and
/// `appointments` are owned by other workflows and are not accepted here.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default, deserialize_with = "deserialize_phone")]
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub gender: Option<Gender>,
    pub blood_type: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.phone.is_none()
            && self.photo.is_none()
            && self.gender.is_none()
            && self.blood_type.is_none()
    }

    /// Body of the `$set` operator
    pub fn to_set_document(&self) -> Document {
        let mut set = doc! {};

        if let Some(name) = &self.name {
            set.insert("name", name);
        }
        if let Some(email) = &self.email {
            set.insert("email", email);
        }
        if let Some(password) = &self.password {
            set.insert("password", password);
        }
        if let Some(phone) = &self.phone {
            set.insert("phone", phone);
        }
        if let Some(photo) = &self.photo {
            set.insert("photo", photo);
        }
        if let Some(gender) = &self.gender {
            let value = match gender {
                Gender::Male => "male",
                Gender::Female => "female",
                Gender::Other => "other",
            };
            set.insert("gender", value);
        }
        if let Some(blood_type) = &self.blood_type {
            set.insert("bloodType", blood_type);
        }

        set
    }

    /// Same merge as `to_set_document`, applied to an in-memory record
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = Some(name.clone());
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(password) = &self.password {
            user.password = Some(password.clone());
        }
        if let Some(phone) = &self.phone {
            user.phone = Some(phone.clone());
        }
        if let Some(photo) = &self.photo {
            user.photo = Some(photo.clone());
        }
        if let Some(gender) = self.gender {
            user.gender = Some(gender);
        }
        if let Some(blood_type) = &self.blood_type {
            user.blood_type = Some(blood_type.clone());
        }
    }
}
