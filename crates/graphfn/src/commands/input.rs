use crate::CommandResult;
use crate::output_utils;
use anyhow::Context;
use libgraphfn::CollectingSink;
use libgraphfn::Schema;
use libgraphfn::file_reader;
use libgraphfn::schema::SchemaBuilder;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// The operations documents a command works on.
#[derive(Debug, clap::Args)]
pub(crate) struct OperationsInput {
    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more GraphQL operations files or directories \
             containing them.",
        name="OPERATIONS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}
impl OperationsInput {
    /// Every operations file at or under the given paths, sorted.
    pub(crate) fn find_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let graphql_file_exts: HashSet<String> =
            self.graphql_file_exts.iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect();

        log::debug!(
            "Scanning {} input paths...",
            self.file_or_dir_paths.len(),
        );
        let mut file_paths = vec![];
        for path in &self.file_or_dir_paths {
            for entry in WalkDir::new(path.as_path()).follow_links(true) {
                let entry = entry.with_context(|| format!(
                    "Failed to scan files at/under {path:#?}",
                ))?;
                let entry_path = entry.path();
                if !entry.file_type().is_file() {
                    log::trace!("Skipping non-file: {entry_path:#?}.");
                    continue;
                }
                if let Some(ext) = entry_path.extension().map(|s| s.to_string_lossy())
                    && graphql_file_exts.contains(&*ext) {
                    log::trace!("Found operations file at {entry_path:#?}.");
                    file_paths.push(std::fs::canonicalize(entry_path)?);
                }
            }
        }

        // A single file path given explicitly is loaded whatever its
        // extension.
        if file_paths.is_empty()
            && self.file_or_dir_paths.len() == 1
            && let Some(first_arg_path) = self.file_or_dir_paths.first()
            && first_arg_path.is_file() {
            let canonicalized_first_arg_path = std::fs::canonicalize(first_arg_path)?;
            log::warn!(
                "Proceeding to load {canonicalized_first_arg_path:#?} even \
                though it doesn't match any of the --graphql-file-exts \
                ({}).",
                graphql_file_exts.iter()
                    .map(|ext| format!("`.{ext}`"))
                    .collect::<Vec<_>>()
                    .join(", "),
            );
            file_paths.push(canonicalized_first_arg_path);
        }

        file_paths.sort();
        file_paths.dedup();
        log::debug!("Found {} operations files.", file_paths.len());
        Ok(file_paths)
    }

    /// The path and content of every operations file.
    pub(crate) fn read_files(&self) -> anyhow::Result<Vec<(PathBuf, String)>> {
        self.find_files()?
            .into_iter()
            .map(|file_path| {
                let content = file_reader::read_content(file_path.as_path())?;
                Ok::<_, anyhow::Error>((file_path, content))
            })
            .collect()
    }
}

#[derive(Debug, clap::Args)]
pub(crate) struct DiagnosticsArgs {
    #[arg(
        help="Fail if any diagnostic is reported while resolving the \
             operations.",
        long,
    )]
    strict: bool,
}
impl DiagnosticsArgs {
    /// Turn `result` into a failure when running `--strict` and anything
    /// was reported.
    pub(crate) fn finish(
        &self,
        result: CommandResult,
        collected: &CollectingSink,
    ) -> CommandResult {
        if !self.strict || collected.is_empty() {
            return result;
        }
        let diagnostics = collected.diagnostics();
        result.with_failure(format_args!(
            "{} {} diagnostics reported in --strict mode:\n{}",
            output_utils::RED_X,
            diagnostics.len(),
            diagnostics.iter()
                .map(|diagnostic| format!("  * {diagnostic}"))
                .collect::<Vec<_>>()
                .join("\n"),
        ))
    }
}

/// Load a schema from SDL, or from an introspection result when the file
/// has a `.json` extension.
pub(crate) fn load_schema(schema_path: &Path) -> anyhow::Result<Schema> {
    let builder =
        if schema_path.extension().is_some_and(|ext| ext == "json") {
            let json = file_reader::read_content(schema_path)?;
            SchemaBuilder::from_introspection_json(json.as_str())?
        } else {
            SchemaBuilder::from_file(schema_path)?
        };
    builder.build().with_context(|| format!("Invalid schema at {schema_path:#?}"))
}

/// Read the caller-supplied variable values (a JSON object), if any.
pub(crate) fn read_variables(
    variables_path: Option<&Path>,
) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    let Some(variables_path) = variables_path else {
        return Ok(serde_json::Map::new());
    };
    let json = file_reader::read_content(variables_path)?;
    match serde_json::from_str(json.as_str())? {
        serde_json::Value::Object(values) => Ok(values),
        other => anyhow::bail!(
            "Expected a JSON object of variable values in {variables_path:#?}, \
            found: {other}",
        ),
    }
}
