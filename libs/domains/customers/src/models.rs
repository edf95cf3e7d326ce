use mongodb::bson::{oid::ObjectId, DateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

/// Vietnamese phone number: country prefix 84 or a leading 0 followed by a
/// mobile carrier digit, then 8 digits.
static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(84|0[35789])[0-9]{8}$").unwrap());

fn validate_phone_number(phone: &str) -> Result<(), validator::ValidationError> {
    if !PHONE_NUMBER.is_match(phone) {
        return Err(validator::ValidationError::new("invalid_phone_number"));
    }
    Ok(())
}

/// Customer entity as stored in the `customers` collection.
///
/// The password is stored only as an argon2 hash and never serialized into
/// API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub birthday: Option<DateTime>,
    pub password_hash: String,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Customer {
    /// Create a new customer from the create DTO and a precomputed hash.
    pub fn new(input: CreateCustomer, password_hash: String) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone_number: input.phone_number.unwrap_or_default(),
            address: input.address.unwrap_or_default(),
            birthday: input
                .birthday
                .map(|d| DateTime::from_chrono(d.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc())),
            password_hash,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates; a new password hash replaces the old one when given.
    pub fn apply_update(&mut self, update: UpdateCustomer, new_password_hash: Option<String>) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(birthday) = update.birthday {
            self.birthday = Some(DateTime::from_chrono(
                birthday.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc(),
            ));
        }
        if let Some(hash) = new_password_hash {
            self.password_hash = hash;
        }
        self.updated_at = DateTime::now();
    }

    /// Display name used in token claims.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// API representation of a customer. No credential material.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    /// Hex-encoded id
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub birthday: Option<chrono::NaiveDate>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_hex(),
            first_name: customer.first_name,
            last_name: customer.last_name,
            email: customer.email,
            phone_number: customer.phone_number,
            address: customer.address,
            birthday: customer.birthday.map(|d| d.to_chrono().date_naive()),
            is_deleted: customer.is_deleted,
            created_at: customer.created_at.to_chrono(),
            updated_at: customer.updated_at.to_chrono(),
        }
    }
}

/// DTO for registering a new customer
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomer {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email, length(max = 50))]
    pub email: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
    #[validate(length(min = 3, max = 255))]
    pub password: String,
}

/// DTO for updating an existing customer
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 50))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    pub birthday: Option<chrono::NaiveDate>,
    #[validate(length(min = 3, max = 255))]
    pub password: Option<String>,
}

/// Login request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Issued session tokens
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub refresh_token: String,
}

/// Refresh request body
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}
