use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Embed rubric text for a user or course.
    Embed(EmbedArgs),
    /// Grade a student answer against the embedded rubric.
    Grade(GradeArgs),
    /// Embed a rubric PDF for a user or course.
    #[command(name = "upload-pdf")]
    UploadPdf(UploadPdfArgs),
    /// Check that the grading backend is reachable.
    Health,
    /// Time sequential grading calls over a dataset.
    Latency(LatencyArgs),
    /// Fire concurrent grading calls and report latency.
    Load(LoadArgs),
    /// Interactive grading console.
    Console,
}

/// Arguments for `autograder embed`.
#[derive(Clone, Debug, Args)]
pub struct EmbedArgs {
    /// Namespace to store the rubric under.
    #[arg(long, short = 'u')]
    pub user: Option<String>,
    /// Rubric text.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub text: Option<String>,
    /// Read rubric text from a file.
    #[arg(long)]
    pub file: Option<String>,
    /// Source file name recorded by the backend.
    #[arg(long)]
    pub filename: Option<String>,
}

/// Arguments for `autograder grade`.
#[derive(Clone, Debug, Args)]
pub struct GradeArgs {
    /// Namespace the rubric was embedded under.
    #[arg(long, short = 'u')]
    pub user: Option<String>,
    /// Question the student answered.
    #[arg(long)]
    pub question: Option<String>,
    /// Student answer.
    #[arg(long, conflicts_with = "answer_file", required_unless_present = "answer_file")]
    pub answer: Option<String>,
    /// Read the student answer from a file.
    #[arg(long)]
    pub answer_file: Option<String>,
}

/// Arguments for `autograder upload-pdf`.
#[derive(Clone, Debug, Args)]
pub struct UploadPdfArgs {
    /// Path to the rubric PDF.
    pub path: String,
    /// Namespace to store the rubric under.
    #[arg(long, short = 'u')]
    pub user: Option<String>,
}

/// Arguments for `autograder latency`.
#[derive(Clone, Debug, Args)]
pub struct LatencyArgs {
    /// JSON dataset: `{ user_id, question, cases: [{ name, student_response }] }`.
    pub dataset: String,
}

/// Arguments for `autograder load`.
#[derive(Clone, Debug, Args)]
pub struct LoadArgs {
    /// Number of concurrent requests.
    #[arg(long, short = 'n', default_value_t = 20)]
    pub n: usize,
    #[arg(long, short = 'u', default_value = "load_user")]
    pub user: String,
    #[arg(long, default_value = "Explain what a binary search tree is.")]
    pub question: String,
    #[arg(
        long,
        default_value = "A BST is a binary tree where left subtree values are smaller and right subtree values are larger."
    )]
    pub answer: String,
}
