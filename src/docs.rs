use crate::api::attendance::{ArchiveRequest, ToggleRequest};
use crate::api::person::{CreatePerson, PersonListResponse};
use crate::model::attendance::{
    ArchivedDay, ArchivedEntry, AttendanceRecord, AttendanceStatus, OvertimeFilter,
};
use crate::model::cohort::Cohort;
use crate::model::person::{Person, PersonRef};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Creche Attendance API",
        version = "1.0.0",
        description = r#"
## Daycare Attendance Service

This API powers the back office of a daycare/preschool: who is on site right
now, who dropped off and picked up whom, and what the historical record says.

### 🔹 Key Features
- **Person Directory**
  - Enroll, update, list, and view children and staff members
- **Live Attendance Board**
  - One-tap check-in/check-out per person, for the nursery and staff cohorts
  - Overtime minutes computed at pickup, lateness flagged at staff clock-in
- **End-of-Day Archival**
  - Move the day's closed records into history and reset the board
- **History**
  - Query archived days by date range, person, and overtime

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for the person roster

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::person::create_person,
        crate::api::person::list_persons,
        crate::api::person::get_person,
        crate::api::person::update_person,
        crate::api::person::delete_person,

        crate::api::attendance::board,
        crate::api::attendance::toggle,
        crate::api::attendance::archive_day,
        crate::api::attendance::history
    ),
    components(
        schemas(
            Person,
            PersonRef,
            CreatePerson,
            PersonListResponse,
            Cohort,
            AttendanceStatus,
            AttendanceRecord,
            ArchivedDay,
            ArchivedEntry,
            OvertimeFilter,
            ToggleRequest,
            ArchiveRequest
        )
    ),
    tags(
        (name = "Persons", description = "Person directory APIs"),
        (name = "Attendance", description = "Attendance ledger APIs"),
    )
)]
pub struct ApiDoc;
