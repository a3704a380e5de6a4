//! The seam between the console and the grading backend.

use std::future::Future;

use grader_client::{ClientError, GradingClient};
use grader_core::{GradeAnswerRequest, GradeAnswerResponse, UploadTextRequest, UploadTextResponse};

/// Anything that can embed a rubric and grade an answer.
///
/// [`GradingClient`] is the production implementation; tests substitute
/// in-memory fakes.
pub trait GradingBackend: Send + Sync + 'static {
    fn submit_rubric(
        &self,
        request: UploadTextRequest,
    ) -> impl Future<Output = Result<UploadTextResponse, ClientError>> + Send;

    fn submit_answer(
        &self,
        request: GradeAnswerRequest,
    ) -> impl Future<Output = Result<GradeAnswerResponse, ClientError>> + Send;
}

impl GradingBackend for GradingClient {
    async fn submit_rubric(
        &self,
        request: UploadTextRequest,
    ) -> Result<UploadTextResponse, ClientError> {
        self.upload_text(&request).await
    }

    async fn submit_answer(
        &self,
        request: GradeAnswerRequest,
    ) -> Result<GradeAnswerResponse, ClientError> {
        self.grade_answer(&request).await
    }
}
