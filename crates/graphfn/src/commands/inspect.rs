use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::input;
use crate::commands::input::DiagnosticsArgs;
use crate::commands::input::OperationsInput;
use crate::output_utils;
use libgraphfn::CollectingSink;
use libgraphfn::DiagnosticSink;
use libgraphfn::LogSink;
use libgraphfn::TeeSink;
use libgraphfn::operation::OperationGraphBuilder;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct InspectCmd {
    #[command(flatten)]
    diagnostics: DiagnosticsArgs,

    #[command(flatten)]
    input: OperationsInput,

    #[arg(
        help="Print the resolved operations as JSON.",
        long,
    )]
    json: bool,

    #[arg(
        help="Path to a JSON object of variable values to attach to the \
             operations that declare them.",
        long,
    )]
    variables: Option<PathBuf>,
}
impl InspectCmd {
    fn inspect(&self, sink: &dyn DiagnosticSink) -> anyhow::Result<String> {
        let variable_values = input::read_variables(self.variables.as_deref())?;

        let mut json_files = serde_json::Map::new();
        let mut lines = vec![];
        for (file_path, content) in self.input.read_files()? {
            let graph = OperationGraphBuilder::new()
                .diagnostics(sink)
                .file_path(file_path.as_path())
                .build_from_str(content.as_str(), &variable_values)?;

            if self.json {
                json_files.insert(
                    file_path.display().to_string(),
                    serde_json::to_value(graph.operation_data_list())?,
                );
                continue;
            }

            lines.push(format!("{}:", file_path.display()));
            for (idx, data) in graph.operation_data_list().iter().enumerate() {
                let mut line = format!(
                    "  {}. {} {} ({})",
                    idx + 1,
                    data.kind(),
                    data.display_name(),
                    data.variable_name(),
                );
                if !data.fragment_dependencies().is_empty() {
                    line.push_str(
                        format!(" <- [{}]", data.fragment_dependencies().join(", ")).as_str(),
                    );
                }
                lines.push(line);
            }
        }

        if self.json {
            Ok(serde_json::to_string_pretty(&json_files)?)
        } else {
            Ok(lines.join("\n"))
        }
    }
}

#[inherent::inherent]
impl RunnableCommand for InspectCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let collected = CollectingSink::new();
        let sink = TeeSink::new(&LogSink, &collected);

        let result = match self.inspect(&sink) {
            Ok(output) => CommandResult::stdout(format_args!("{output}")),
            Err(err) => CommandResult::stderr(format_args!(
                "{} Failed to inspect operations: {err:#}",
                output_utils::RED_X,
            )),
        };
        self.diagnostics.finish(result, &collected)
    }
}
