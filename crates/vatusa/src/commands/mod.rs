//! Command dispatch: bridges CLI args -> resource clients -> output formatting.

pub mod config_cmd;
pub mod controller;
pub mod facility;
pub mod news;
pub mod reference;
pub mod util;

use vatusa_api::VatusaClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &VatusaClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Reference => reference::handle(client, global).await,
        Command::Controller(args) => controller::handle(client, args, global).await,
        Command::Facility(args) => facility::handle(client, args, global).await,
        Command::News(args) => news::handle(client, args, global).await,
        // Config and completions are handled before a client is built
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
