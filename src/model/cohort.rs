use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// The person population a ledger instance tracks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Cohort {
    /// Enrolled children (pickup cutoff applies at check-out).
    Nursery,
    /// Staff members (grace deadline applies at check-in).
    Staff,
}

impl Cohort {
    /// Storage key of the live per-person record document.
    pub fn statuses_key(&self) -> String {
        format!("{self}_statuses")
    }

    /// Storage key of the archived-days document.
    pub fn archive_key(&self) -> String {
        format!("{self}_archived_days")
    }
}
