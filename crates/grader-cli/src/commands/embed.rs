use grader_client::{ClientError, GradingClient};
use grader_console::{GradingBackend, GradingConsole};
use grader_core::{
    FieldId, GradeAnswerRequest, GradeAnswerResponse, UploadTextRequest, UploadTextResponse,
};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EmbedArgs;
use crate::commands::shared::{file_name, finish_action, read_text};
use crate::context::AppContext;
use crate::progress::Progress;

/// Client that tags every rubric upload with a source file name.
struct NamedUpload {
    client: GradingClient,
    filename: Option<String>,
}

impl GradingBackend for NamedUpload {
    async fn submit_rubric(
        &self,
        request: UploadTextRequest,
    ) -> Result<UploadTextResponse, ClientError> {
        let request = match &self.filename {
            Some(name) => request.with_filename(name),
            None => request,
        };
        self.client.upload_text(&request).await
    }

    async fn submit_answer(
        &self,
        request: GradeAnswerRequest,
    ) -> Result<GradeAnswerResponse, ClientError> {
        self.client.grade_answer(&request).await
    }
}

/// Handle `autograder embed`.
pub async fn handle(args: &EmbedArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_text(path).await?,
        (None, None) => anyhow::bail!("either --text or --file is required"),
    };
    let filename = args
        .filename
        .clone()
        .or_else(|| args.file.as_deref().and_then(file_name));

    let backend = NamedUpload {
        client: ctx.client.clone(),
        filename,
    };
    let console = GradingConsole::new(backend, &ctx.config);
    console.edit(FieldId::NamespaceId, ctx.namespace(args.user.as_deref()))?;
    console.edit(FieldId::RubricText, text)?;

    let spinner = Progress::spinner("Uploading rubric…");
    let outcome = console.embed_rubric().await?;
    finish_action(&outcome, &spinner, flags)
}
