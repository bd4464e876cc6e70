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
use libgraphfn::operation::OperationKind;
use libgraphfn::projection::FragmentSignature;
use libgraphfn::projection::FunctionSignature;
use libgraphfn::projection::SelectionProjector;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct SignaturesCmd {
    #[command(flatten)]
    diagnostics: DiagnosticsArgs,

    #[command(flatten)]
    input: OperationsInput,

    #[arg(
        help="Print the signatures as JSON.",
        long,
    )]
    json: bool,

    #[arg(
        help="Path to the schema: SDL, or an introspection result if the \
             file ends in `.json`.",
        long,
        short='s',
    )]
    schema: PathBuf,
}
impl SignaturesCmd {
    /// The rendered signatures, plus one message per operation that has no
    /// function signature (e.g. an anonymous query).
    fn signatures(
        &self,
        sink: &dyn DiagnosticSink,
    ) -> anyhow::Result<(String, Vec<String>)> {
        let schema = input::load_schema(self.schema.as_path())?;

        let mut json_signatures = vec![];
        let mut blocks = vec![];
        let mut skipped = vec![];
        for (file_path, content) in self.input.read_files()? {
            let graph = OperationGraphBuilder::new()
                .diagnostics(sink)
                .file_path(file_path.as_path())
                .build_from_str(content.as_str(), &serde_json::Map::new())?;
            let projector = SelectionProjector::new(&schema, graph.fragment_definitions())
                .diagnostics(sink);

            for data in graph.operation_data_list() {
                if data.kind() == OperationKind::Fragment {
                    let signature = FragmentSignature::for_fragment_with(&projector, data)?;
                    blocks.push(format!(
                        "// fragment {} on {}\ntype {} = {};",
                        signature.name,
                        signature.type_condition,
                        signature.name,
                        signature.selection_signature,
                    ));
                    json_signatures.push(serde_json::to_value(&signature)?);
                    continue;
                }

                match FunctionSignature::for_operation_with(&projector, data) {
                    Ok(signature) => {
                        blocks.push(format!(
                            "// {} {} ({})\nfunction {}(variables: {}): Promise<{}>;",
                            signature.kind,
                            signature.operation_name,
                            data.def_location(),
                            signature.function_name,
                            signature.variable_signature,
                            signature.return_signature,
                        ));
                        json_signatures.push(serde_json::to_value(&signature)?);
                    },
                    Err(err) => {
                        log::warn!("Skipping {}: {err}", data.def_location());
                        skipped.push(format!("{}: {err}", data.def_location()));
                    },
                }
            }
        }

        let output =
            if self.json {
                serde_json::to_string_pretty(&json_signatures)?
            } else {
                blocks.join("\n\n")
            };
        Ok((output, skipped))
    }
}

#[inherent::inherent]
impl RunnableCommand for SignaturesCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let collected = CollectingSink::new();
        let sink = TeeSink::new(&LogSink, &collected);

        let result = match self.signatures(&sink) {
            Ok((output, skipped)) if skipped.is_empty() =>
                CommandResult::stdout(format_args!("{output}")),
            Ok((output, skipped)) => CommandResult::stdout(format_args!("{output}"))
                .with_failure(format_args!(
                    "{} {} operations have no function signature:\n{}",
                    output_utils::RED_X,
                    skipped.len(),
                    skipped.iter()
                        .map(|message| format!("  * {message}"))
                        .collect::<Vec<_>>()
                        .join("\n"),
                )),
            Err(err) => CommandResult::stderr(format_args!(
                "{} Failed to generate signatures: {err:#}",
                output_utils::RED_X,
            )),
        };
        self.diagnostics.finish(result, &collected)
    }
}
