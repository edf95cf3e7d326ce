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

/// Supplier entity as stored in the `suppliers` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Supplier {
    pub fn new(input: CreateSupplier) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            name: input.name,
            email: input.email.unwrap_or_default(),
            phone_number: input.phone_number.unwrap_or_default(),
            address: input.address.unwrap_or_default(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateSupplier) {
        if let Some(name) = update.name {
            self.name = name;
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
        self.updated_at = DateTime::now();
    }
}

/// API representation of a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierResponse {
    /// Hex-encoded id
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id.to_hex(),
            name: supplier.name,
            email: supplier.email,
            phone_number: supplier.phone_number,
            address: supplier.address,
            is_deleted: supplier.is_deleted,
            created_at: supplier.created_at.to_chrono(),
            updated_at: supplier.updated_at.to_chrono(),
        }
    }
}

/// DTO for creating a new supplier
///
/// Contact fields are optional; when present they are validated.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplier {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email, length(max = 50))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

/// DTO for updating an existing supplier
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplier {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email, length(max = 50))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateSupplier {
        CreateSupplier {
            name: "FPT Trading".to_string(),
            email: Some("contact@fpt.example.com".to_string()),
            phone_number: Some("0912345678".to_string()),
            address: Some("Hanoi".to_string()),
        }
    }

    #[test]
    fn test_phone_number_pattern() {
        for valid in ["0912345678", "0387654321", "8412345678", "0598765432"] {
            assert!(validate_phone_number(valid).is_ok(), "{valid} should pass");
        }
        for invalid in ["0112345678", "12345", "091234567890", "abc", ""] {
            assert!(
                validate_phone_number(invalid).is_err(),
                "{invalid} should fail"
            );
        }
    }

    #[test]
    fn test_create_supplier_validation() {
        assert!(create().validate().is_ok());

        let mut bad_email = create();
        bad_email.email = Some("not-an-email".to_string());
        assert!(bad_email.validate().is_err());

        let mut bad_phone = create();
        bad_phone.phone_number = Some("12345".to_string());
        assert!(bad_phone.validate().is_err());

        // Contact fields may be omitted entirely
        let minimal = CreateSupplier {
            name: "Bare".to_string(),
            email: None,
            phone_number: None,
            address: None,
        };
        assert!(minimal.validate().is_ok());
    }

    #[test]
    fn test_apply_update_touches_only_fields_given() {
        let mut supplier = Supplier::new(create());
        let original_email = supplier.email.clone();

        supplier.apply_update(UpdateSupplier {
            name: Some("FPT Retail".to_string()),
            ..Default::default()
        });

        assert_eq!(supplier.name, "FPT Retail");
        assert_eq!(supplier.email, original_email);
    }

    #[test]
    fn test_create_supplier_accepts_camel_case_json() {
        let input: CreateSupplier = serde_json::from_value(serde_json::json!({
            "name": "FPT Trading",
            "phoneNumber": "0912345678"
        }))
        .unwrap();
        assert_eq!(input.phone_number.as_deref(), Some("0912345678"));
        assert!(input.email.is_none());
    }
}
