use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Category entity as stored in the `categories` collection.
///
/// Field names match the wire/storage format (camelCase, `_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Category {
    /// Create a new category from the create DTO.
    pub fn new(input: CreateCategory) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            name: input.name,
            description: input.description,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from the update DTO.
    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        self.updated_at = DateTime::now();
    }
}

/// API representation of a category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// Hex-encoded id
    pub id: String,
    pub name: String,
    pub description: String,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.to_hex(),
            name: category.name,
            description: category.description,
            is_deleted: category.is_deleted,
            created_at: category.created_at.to_chrono(),
            updated_at: category.updated_at.to_chrono(),
        }
    }
}

/// DTO for creating a new category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
}

/// DTO for updating an existing category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category_defaults() {
        let category = Category::new(CreateCategory {
            name: "Phones".to_string(),
            description: String::new(),
        });

        assert_eq!(category.name, "Phones");
        assert!(!category.is_deleted);
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_apply_update_changes_only_given_fields() {
        let mut category = Category::new(CreateCategory {
            name: "Phones".to_string(),
            description: "Mobile phones".to_string(),
        });

        category.apply_update(UpdateCategory {
            name: None,
            description: Some("Smartphones".to_string()),
        });

        assert_eq!(category.name, "Phones");
        assert_eq!(category.description, "Smartphones");
    }

    #[test]
    fn test_create_category_validation() {
        use validator::Validate;

        let too_long = CreateCategory {
            name: "x".repeat(51),
            description: String::new(),
        };
        assert!(too_long.validate().is_err());

        let empty = CreateCategory {
            name: String::new(),
            description: String::new(),
        };
        assert!(empty.validate().is_err());

        let ok = CreateCategory {
            name: "Phones".to_string(),
            description: String::new(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let category = Category::new(CreateCategory {
            name: "Phones".to_string(),
            description: String::new(),
        });
        let response: CategoryResponse = category.into();
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("isDeleted").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("is_deleted").is_none());
    }
}
