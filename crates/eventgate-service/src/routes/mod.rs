pub mod events;
pub mod favorites;

use axum::extract::rejection::JsonRejection;
use eventgate_service_shared::ProblemDetails;

/// Turn a rejected JSON body into a 400 problem.
fn json_problem(rejection: JsonRejection, request_id: &str) -> ProblemDetails {
    tracing::debug!(request_id, error = %rejection, "rejected request body");
    ProblemDetails::bad_request(rejection.body_text(), request_id)
}
