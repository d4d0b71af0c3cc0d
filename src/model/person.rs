use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": "6f9f9c5e-3a4b-4c6d-9a3f-0b1f6a2d8e11",
        "display_name": "Ama Mensah",
        "cohort": "nursery",
        "guardian_contact": "+233201234567",
        "enrolled_on": "2024-01-08",
        "status": "active"
    })
)]
pub struct Person {
    #[schema(example = "6f9f9c5e-3a4b-4c6d-9a3f-0b1f6a2d8e11")]
    pub id: String,

    #[schema(example = "Ama Mensah")]
    pub display_name: String,

    #[schema(example = "nursery")]
    pub cohort: String,

    #[schema(example = "+233201234567", nullable = true)]
    pub guardian_contact: Option<String>,

    #[schema(
        example = "2024-01-08",
        value_type = String,
        format = "date"
    )]
    pub enrolled_on: NaiveDate,

    #[schema(example = "active")]
    pub status: String,
}

/// The slice of a person the attendance ledger consumes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonRef {
    pub id: String,
    pub display_name: String,
}
