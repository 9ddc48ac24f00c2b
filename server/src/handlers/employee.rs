use axum::{Json, extract::State, http::StatusCode};
use platform_api::Envelope;
use products_hr::Employee;
use tracing::info;

use crate::http::AppState;

pub const ADDED_MESSAGE: &str = "Employee added successfully";
pub const SAVED_REPLY: &str = "Saved Successfully";

/// `GET /employee`: appends the submitted record, then returns every record
/// stored so far.
pub async fn append_and_list(
    State(state): State<AppState>,
    Json(employee): Json<Employee>,
) -> Envelope<Vec<Employee>> {
    let records = state.employees.append_and_snapshot(employee);
    info!(count = records.len(), "employee added");
    Envelope::with_data(records, ADDED_MESSAGE)
}

/// `POST /employee`: appends and answers with a fixed line of text.
pub async fn post_employee(
    State(state): State<AppState>,
    Json(employee): Json<Employee>,
) -> &'static str {
    info!(%employee, "employee received");
    let count = state.employees.append(employee);
    let envelope = Envelope::message(ADDED_MESSAGE).with_status(StatusCode::OK);
    info!(count, ?envelope, "employee added");
    SAVED_REPLY
}

pub async fn list_employees(State(state): State<AppState>) -> Json<Vec<Employee>> {
    Json(state.employees.snapshot())
}
