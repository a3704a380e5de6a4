use anyhow::Context;
use grader_core::messages;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UploadPdfArgs;
use crate::commands::shared::file_name;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct UploadPdfResponse {
    user_id: String,
    file: String,
    bytes: usize,
    message: String,
}

/// Handle `autograder upload-pdf`.
pub async fn handle(
    args: &UploadPdfArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("failed to read {}", args.path))?;
    let file = file_name(&args.path).unwrap_or_else(|| String::from("rubric.pdf"));
    let user_id = ctx.namespace(args.user.as_deref());
    let size = bytes.len();

    let spinner = Progress::spinner("Uploading rubric PDF…");
    let body = match ctx.client.upload_rubric_pdf(&user_id, &file, bytes).await {
        Ok(body) => body,
        Err(error) => {
            spinner.finish_err(messages::UPLOAD_FAILED);
            return Err(error).context(messages::UPLOAD_FAILED);
        }
    };
    spinner.finish_clear();

    output(
        &UploadPdfResponse {
            user_id,
            file,
            bytes: size,
            message: body.toast_text(),
        },
        flags.format,
    )
}
