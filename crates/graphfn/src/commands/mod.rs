mod extract;
mod input;
mod inspect;
mod signatures;


use crate::Cli;
use crate::CommandResult;
use extract::ExtractCmd;
use inspect::InspectCmd;
use signatures::SignaturesCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphfn")]
pub(crate) enum CommandEnum {
    /// Print the annotated operations as JSON, keyed by function id.
    Extract(Box<ExtractCmd>),

    /// Print the dependency-ordered operation and fragment list.
    Inspect(Box<InspectCmd>),

    /// Print the client function signature of every operation.
    Signatures(Box<SignaturesCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Extract(cmd) => cmd.run(cli).await,
            Self::Inspect(cmd) => cmd.run(cli).await,
            Self::Signatures(cmd) => cmd.run(cli).await,
        }
    }
}
