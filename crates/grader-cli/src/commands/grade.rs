use grader_core::FieldId;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::GradeArgs;
use crate::commands::shared::{finish_action, read_text};
use crate::context::AppContext;
use crate::progress::Progress;

/// Handle `autograder grade`.
pub async fn handle(args: &GradeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let answer = match (&args.answer, &args.answer_file) {
        (Some(answer), _) => answer.clone(),
        (None, Some(path)) => read_text(path).await?,
        (None, None) => anyhow::bail!("either --answer or --answer-file is required"),
    };

    let console = ctx.console();
    console.edit(FieldId::NamespaceId, ctx.namespace(args.user.as_deref()))?;
    if let Some(question) = &args.question {
        console.edit(FieldId::QuestionPrompt, question.as_str())?;
    }
    console.edit(FieldId::StudentAnswer, answer)?;

    let spinner = Progress::spinner("Grading…");
    let outcome = console.grade_answer().await?;
    finish_action(&outcome, &spinner, flags)
}
