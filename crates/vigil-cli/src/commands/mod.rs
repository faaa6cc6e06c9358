pub mod run;
pub mod schema;
pub mod shared;
pub mod topics;
pub mod trends;

use vigil_config::VigilConfig;

use crate::cli::{Commands, GlobalFlags};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    config: &VigilConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => run::handle(&args, config, flags).await,
        Commands::Topics(args) => topics::handle(&args, config, flags),
        Commands::Trends(args) => trends::handle(&args, config, flags),
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
