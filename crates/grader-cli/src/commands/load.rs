use grader_core::GradeAnswerRequest;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::LoadArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `autograder load`.
pub async fn handle(args: &LoadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if args.n == 0 {
        anyhow::bail!("--n must be at least 1");
    }

    let request = GradeAnswerRequest {
        user_id: args.user.clone(),
        question: args.question.clone(),
        student_response: args.answer.clone(),
    };

    let spinner = Progress::spinner(&format!("Sending {} concurrent grading requests…", args.n));
    let report = ctx.client.load_test(&request, args.n).await;
    spinner.finish_clear();

    if report.failures > 0 {
        tracing::warn!(failures = report.failures, requests = report.requests, "some load test requests failed");
    }
    output(&report, flags.format)
}
