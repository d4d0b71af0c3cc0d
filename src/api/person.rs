use actix_web::{HttpResponse, Responder, error::ErrorInternalServerError, web};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::cohort::Cohort;
use crate::model::person::Person;
use crate::utils::db_utils::{build_update_sql, execute_update};
use crate::utils::{name_cache, person_filter};

/// Columns a partial update may touch.
const PERSON_UPDATE_COLUMNS: &[&str] = &[
    "display_name",
    "guardian_contact",
    "enrolled_on",
    "status",
];

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreatePerson {
    #[schema(example = "Ama Mensah")]
    pub display_name: String,
    #[schema(example = "nursery")]
    pub cohort: Cohort,
    #[schema(example = "+233201234567", nullable = true)]
    pub guardian_contact: Option<String>,
    #[schema(example = "2024-01-08", format = "date", value_type = String, nullable = true)]
    pub enrolled_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PersonQuery {
    /// Filter by cohort
    pub cohort: Option<Cohort>,
    /// Filter by enrollment status
    pub status: Option<String>,
    /// Search by name or guardian contact
    pub search: Option<String>,
    /// Pagination page number (start with 1)
    pub page: Option<u32>,
    /// Pagination per page number
    pub per_page: Option<u32>,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    Str(&'a str),
}

#[derive(Serialize, ToSchema)]
pub struct PersonListResponse {
    pub data: Vec<Person>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

/// Enroll a person
#[utoipa::path(
    post,
    path = "/api/v1/persons",
    request_body = CreatePerson,
    responses(
        (status = 200, description = "Person enrolled successfully", body = Object, example = json!({
            "message": "Person enrolled successfully",
            "id": "6f9f9c5e-3a4b-4c6d-9a3f-0b1f6a2d8e11"
        })),
        (status = 500, description = "Internal server error", body = Object, example = json!({
            "message": "Something went wrong, Contact with system admin"
        }))
    ),
    tag = "Persons"
)]
pub async fn create_person(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreatePerson>,
) -> impl Responder {
    let id = Uuid::new_v4().to_string();
    let enrolled_on = payload
        .enrolled_on
        .unwrap_or_else(|| Local::now().date_naive());

    let result = sqlx::query(
        r#"
        INSERT INTO persons
        (id, display_name, cohort, guardian_contact, enrolled_on, status)
        VALUES (?, ?, ?, ?, ?, 'active')
        "#,
    )
    .bind(&id)
    .bind(&payload.display_name)
    .bind(payload.cohort.to_string())
    .bind(&payload.guardian_contact)
    .bind(enrolled_on)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => {
            person_filter::insert(&id);
            name_cache::remember(&id, &payload.display_name).await;
            HttpResponse::Ok().json(json!({
                "message": "Person enrolled successfully",
                "id": id
            }))
        }
        Err(e) => {
            error!(error = %e, "Failed to enroll person");
            HttpResponse::InternalServerError().json(json!({
                "message": "Something went wrong, Contact with system admin"
            }))
        }
    }
}

/// Paginated person roster
#[utoipa::path(
    get,
    path = "/api/v1/persons",
    params(PersonQuery),
    responses(
        (status = 200, description = "Paginated person list", body = PersonListResponse)
    ),
    tag = "Persons"
)]
pub async fn list_persons(
    pool: web::Data<MySqlPool>,
    query: web::Query<PersonQuery>,
) -> actix_web::Result<impl Responder> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    let cohort_str;
    if let Some(cohort) = query.cohort {
        cohort_str = cohort.to_string();
        where_sql.push_str(" AND cohort = ?");
        args.push(FilterValue::Str(&cohort_str));
    }

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    let like;
    if let Some(search) = query.search.as_deref() {
        like = format!("%{}%", search);
        where_sql.push_str(" AND (display_name LIKE ? OR guardian_contact LIKE ?)");
        args.push(FilterValue::Str(&like));
        args.push(FilterValue::Str(&like));
    }

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM persons{}", where_sql);
    debug!(sql = %count_sql, "Counting persons");

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count persons");
        ErrorInternalServerError("Database error")
    })?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT * FROM persons{} ORDER BY display_name LIMIT ? OFFSET ?",
        where_sql
    );
    debug!(sql = %data_sql, page, per_page, offset, "Fetching persons");

    let mut data_q = sqlx::query_as::<_, Person>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let persons = data_q
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch person list");
            ErrorInternalServerError("Database error")
        })?;

    Ok(HttpResponse::Ok().json(PersonListResponse {
        data: persons,
        page,
        per_page,
        total,
    }))
}

/// Get a person by id
#[utoipa::path(
    get,
    path = "/api/v1/persons/{person_id}",
    params(
        ("person_id" = String, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person found", body = Person),
        (status = 404, description = "Person not found", body = Object, example = json!({
            "message": "Person not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Persons"
)]
pub async fn get_person(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let person_id = path.into_inner();

    let person = sqlx::query_as::<_, Person>("SELECT * FROM persons WHERE id = ?")
        .bind(&person_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, person_id, "Failed to fetch person");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match person {
        Some(p) => Ok(HttpResponse::Ok().json(p)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Person not found"
        }))),
    }
}

/// Update a person
#[utoipa::path(
    put,
    path = "/api/v1/persons/{person_id}",
    params(
        ("person_id" = String, Path, description = "Person ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Person updated successfully", body = Object, example = json!({
            "message": "Person updated successfully"
        })),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Person not found", body = Object, example = json!({
            "message": "Person not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Persons"
)]
pub async fn update_person(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    let person_id = path.into_inner();

    let update = build_update_sql("persons", &body, PERSON_UPDATE_COLUMNS, "id", &person_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Person not found"
        })));
    }

    // a rename may have landed; re-resolve lazily
    name_cache::forget(&person_id).await;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Person updated successfully"
    })))
}

/// Unenroll a person
#[utoipa::path(
    delete,
    path = "/api/v1/persons/{person_id}",
    params(
        ("person_id" = String, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Person not found", body = Object, example = json!({
            "message": "Person not found"
        })),
        (status = 500, description = "Internal server error", body = Object)
    ),
    tag = "Persons"
)]
pub async fn delete_person(
    pool: web::Data<MySqlPool>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let person_id = path.into_inner();

    let result = sqlx::query("DELETE FROM persons WHERE id = ?")
        .bind(&person_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": "Person not found"
                })));
            }

            person_filter::remove(&person_id);
            name_cache::forget(&person_id).await;

            Ok(HttpResponse::Ok().json(json!({
                "message": "Successfully deleted"
            })))
        }

        Err(e) => {
            error!(error = %e, person_id, "Failed to delete person");

            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}
