use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Embed(args) => commands::embed::handle(&args, ctx, flags).await,
        Commands::Grade(args) => commands::grade::handle(&args, ctx, flags).await,
        Commands::UploadPdf(args) => commands::upload_pdf::handle(&args, ctx, flags).await,
        Commands::Health => commands::health::handle(ctx, flags).await,
        Commands::Latency(args) => commands::latency::handle(&args, ctx, flags).await,
        Commands::Load(args) => commands::load::handle(&args, ctx, flags).await,
        Commands::Console => commands::console::handle(ctx).await,
    }
}
