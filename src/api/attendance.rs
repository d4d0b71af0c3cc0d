use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::ledger::ArchiveOutcome;
use crate::model::attendance::{HistoryFilter, TransitionEvent};
use crate::model::cohort::Cohort;
use crate::state::AppState;
use crate::utils::person_filter;

#[derive(Deserialize, ToSchema)]
pub struct ToggleRequest {
    #[schema(example = "6f9f9c5e-3a4b-4c6d-9a3f-0b1f6a2d8e11")]
    pub person_id: String,
    /// Operator performing the transition; recorded for audit
    #[schema(example = "teacher1", nullable = true)]
    pub acting_user: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ArchiveRequest {
    /// Day to archive under; defaults to today
    #[schema(example = "2024-06-01", value_type = String, format = "date", nullable = true)]
    pub date: Option<NaiveDate>,
}

fn parse_cohort(raw: &str) -> actix_web::Result<Cohort> {
    raw.parse()
        .map_err(|_| actix_web::error::ErrorNotFound("Unknown cohort"))
}

/// Live board endpoint
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{cohort}/board",
    params(
        ("cohort" = String, Path, description = "Cohort to read: nursery or staff")
    ),
    responses(
        (status = 200, description = "Live board, open/untouched vs departed", body = Object, example = json!({
            "open": [{
                "person_id": "s1",
                "display_name": "Ama Mensah",
                "record": { "status": "checked-in", "check_in_time": "2024-06-01T08:00:00", "check_in_actor": "teacher1", "check_out_time": null, "check_out_actor": null }
            }],
            "departed": []
        })),
        (status = 404, description = "Unknown cohort"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn board(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let cohort = parse_cohort(&path)?;

    let board = state.ledger(cohort).board().await.map_err(|e| {
        tracing::error!(error = %e, %cohort, "Failed to load board");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(board))
}

/// Check-in/check-out toggle endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/{cohort}/toggle",
    params(
        ("cohort" = String, Path, description = "Cohort to toggle in: nursery or staff")
    ),
    request_body = ToggleRequest,
    responses(
        (status = 200, description = "Transition applied", body = Object, example = json!({
            "record": { "status": "checked-out", "check_in_time": "2024-06-01T08:00:00", "check_in_actor": "teacher1", "check_out_time": "2024-06-01T18:12:00", "check_out_actor": "teacher1", "overtime_minutes": 12 },
            "event": { "kind": "checked-out", "person_id": "s1", "display_name": "Ama Mensah", "at": "2024-06-01T18:12:00", "overtime_minutes": 12 }
        })),
        (status = 404, description = "Unknown cohort"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn toggle(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ToggleRequest>,
) -> actix_web::Result<impl Responder> {
    let cohort = parse_cohort(&path)?;

    // Directory and ledger can be transiently out of sync; the transition
    // still lands, under the fallback display name.
    if !person_filter::might_exist(&payload.person_id) {
        tracing::warn!(person_id = %payload.person_id, %cohort, "Toggle for person missing from the directory");
    }

    let now = Local::now().naive_local();
    let (record, event) = state
        .ledger(cohort)
        .toggle(&payload.person_id, payload.acting_user.as_deref(), now)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, person_id = %payload.person_id, %cohort, "Toggle failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match &event {
        TransitionEvent::CheckedIn {
            display_name,
            is_late,
            ..
        } => {
            tracing::info!(%cohort, person = %display_name, is_late = ?is_late, "Checked in");
        }
        TransitionEvent::CheckedOut {
            display_name,
            overtime_minutes,
            ..
        } => {
            tracing::info!(%cohort, person = %display_name, overtime = ?overtime_minutes, "Checked out");
        }
    }

    Ok(HttpResponse::Ok().json(json!({
        "record": record,
        "event": event
    })))
}

/// End-of-day archival endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/{cohort}/archive",
    params(
        ("cohort" = String, Path, description = "Cohort to archive: nursery or staff")
    ),
    request_body = ArchiveRequest,
    responses(
        (status = 200, description = "Closed records archived, or nothing to do", body = Object, example = json!({
            "message": "Day archived",
            "date": "2024-06-01",
            "archived": 4
        })),
        (status = 404, description = "Unknown cohort"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn archive_day(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<ArchiveRequest>,
) -> actix_web::Result<impl Responder> {
    let cohort = parse_cohort(&path)?;
    let date = payload.date.unwrap_or_else(|| Local::now().date_naive());

    let outcome = state
        .ledger(cohort)
        .archive_closed_records(date)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %cohort, %date, "Archival failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    match outcome {
        ArchiveOutcome::NothingToArchive => Ok(HttpResponse::Ok().json(json!({
            "message": "No closed records to archive",
            "archived": 0
        }))),
        ArchiveOutcome::Archived { date, archived } => {
            tracing::info!(%cohort, %date, archived, "Day archived");
            Ok(HttpResponse::Ok().json(json!({
                "message": "Day archived",
                "date": date,
                "archived": archived
            })))
        }
    }
}

/// Archived-history query endpoint
#[utoipa::path(
    get,
    path = "/api/v1/attendance/{cohort}/history",
    params(
        ("cohort" = String, Path, description = "Cohort to query: nursery or staff"),
        HistoryFilter
    ),
    responses(
        (status = 200, description = "Archived days matching the filter, newest first", body = Object, example = json!([{
            "date": "2024-06-01",
            "records": [{
                "person_id": "s1",
                "display_name": "Ama Mensah",
                "record": { "status": "checked-out", "check_in_time": "2024-06-01T08:00:00", "check_in_actor": "teacher1", "check_out_time": "2024-06-01T18:12:00", "check_out_actor": "teacher1", "overtime_minutes": 12 }
            }]
        }])),
        (status = 404, description = "Unknown cohort"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn history(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HistoryFilter>,
) -> actix_web::Result<impl Responder> {
    let cohort = parse_cohort(&path)?;

    let days = state
        .ledger(cohort)
        .query_history(&query)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %cohort, "History query failed");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(days))
}
