use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{PageService, see_other};
use crate::models::submissions::requests::CreateSubmissionRequest;

pub async fn submit(
    service: &PageService,
    request: &HttpRequest,
    form: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.create_submission(form).await {
        Ok(submission) => {
            info!(
                "Submission {} stored ({} steps, type {})",
                submission.id, submission.steps, submission.submission_type
            );
            Ok(see_other("/leaderboard"))
        }
        Err(e) => {
            error!("Failed to store submission: {}", e);
            service.error_page(request, &e)
        }
    }
}
