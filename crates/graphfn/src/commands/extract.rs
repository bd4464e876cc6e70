use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input::OperationsInput;
use crate::output_utils;
use libgraphfn::extract::DEFAULT_DIRECTIVE_NAME;
use libgraphfn::extract::DirectiveMetadataExtractor;

#[derive(Debug, clap::Args)]
pub(crate) struct ExtractCmd {
    #[arg(
        default_value=DEFAULT_DIRECTIVE_NAME,
        help="Name of the directive that marks an operation for extraction.",
        long,
    )]
    directive_name: String,

    #[command(flatten)]
    input: OperationsInput,
}
impl ExtractCmd {
    fn extract(&self) -> anyhow::Result<String> {
        let extractor = DirectiveMetadataExtractor::new()
            .directive_name(self.directive_name.as_str());

        // Ids are unique across all files; a later file's function replaces
        // an earlier one with the same id.
        let mut functions = serde_json::Map::new();
        for (file_path, content) in self.input.read_files()? {
            let extracted = extractor.extract_str(content.as_str())
                .map_err(|err| anyhow::anyhow!("{file_path:#?}: {err}"))?;
            log::debug!("Extracted {} functions from {file_path:#?}.", extracted.len());
            for (id, function) in extracted {
                functions.insert(id, serde_json::to_value(&function)?);
            }
        }
        Ok(serde_json::to_string_pretty(&functions)?)
    }
}

#[inherent::inherent]
impl RunnableCommand for ExtractCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        match self.extract() {
            Ok(output) => CommandResult::stdout(format_args!("{output}")),
            Err(err) => CommandResult::stderr(format_args!(
                "{} Failed to extract functions: {err:#}",
                output_utils::RED_X,
            )),
        }
    }
}
