use std::future::Future;

use log::{error, info};

use crate::config::OnError;
use crate::error::{PipelineError, TransformError};
use crate::ir::ApiIr;
use crate::{CodeGenerator, GeneratedFile, parse, transform};

/// Where the Swagger document text comes from.
pub trait DocumentSource {
    type Error: std::error::Error;

    /// Human-readable location, used in logs.
    fn location(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<String, Self::Error>>;
}

/// Where generated files go.
pub trait OutputSink {
    type Error: std::error::Error;

    /// Remove everything previously written.
    fn clear(&self) -> impl Future<Output = Result<(), Self::Error>>;

    fn write(&self, file: &GeneratedFile) -> impl Future<Output = Result<(), Self::Error>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub clear_output: bool,
    pub on_error: OnError,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            clear_output: true,
            on_error: OnError::Report,
        }
    }
}

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub types: usize,
    pub services: usize,
    pub files: usize,
}

/// Terminal status of a run under [`OnError::Report`].
#[derive(Debug)]
pub enum RunStatus {
    Completed(RunSummary),
    /// Stages that finished before the failure keep their output.
    Failed(PipelineError),
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Completed(_))
    }
}

/// Parse and load a document without generating anything.
pub fn load(text: &str) -> Result<ApiIr, TransformError> {
    let spec = parse::from_str(text)?;
    Ok(transform::transform(&spec))
}

/// Run every stage in order: clear, fetch, parse, load, generate, write.
///
/// Under [`OnError::Abort`] the first failure is returned as `Err`; under
/// [`OnError::Report`] it is logged and returned as [`RunStatus::Failed`].
pub async fn run<S, O, G>(
    source: &S,
    sink: &O,
    generator: &G,
    config: &G::Config,
    options: PipelineOptions,
) -> Result<RunStatus, PipelineError>
where
    S: DocumentSource,
    O: OutputSink,
    G: CodeGenerator,
{
    match execute(source, sink, generator, config, options).await {
        Ok(summary) => Ok(RunStatus::Completed(summary)),
        Err(err) => match options.on_error {
            OnError::Abort => Err(err),
            OnError::Report => {
                error!("{err}");
                Ok(RunStatus::Failed(err))
            }
        },
    }
}

async fn execute<S, O, G>(
    source: &S,
    sink: &O,
    generator: &G,
    config: &G::Config,
    options: PipelineOptions,
) -> Result<RunSummary, PipelineError>
where
    S: DocumentSource,
    O: OutputSink,
    G: CodeGenerator,
{
    if options.clear_output {
        info!("clearing output");
        sink.clear()
            .await
            .map_err(|e| PipelineError::Output(e.to_string()))?;
    }

    info!("fetching {}", source.location());
    let text = source
        .fetch()
        .await
        .map_err(|e| PipelineError::Fetch(e.to_string()))?;

    info!("loading definitions");
    let ir = load(&text)?;
    info!(
        "loaded {} types and {} services",
        ir.types.len(),
        ir.services.len()
    );

    info!("generating files");
    let files = generator
        .generate(&ir, config)
        .map_err(|e| PipelineError::Generate(e.to_string()))?;

    for file in &files {
        sink.write(file)
            .await
            .map_err(|e| PipelineError::Output(format!("{}: {e}", file.path)))?;
    }
    info!("wrote {} files", files.len());

    Ok(RunSummary {
        types: ir.types.len(),
        services: ir.services.len(),
        files: files.len(),
    })
}
