use std::path::PathBuf;

use nuncio_command::{InterruptFlag, ProcessGateway};
use nuncio_operations::operations::{ReleaseOperation, prepare_release};
use nuncio_operations::providers::{CliGitProvider, FileSystemManifestIO, NpmPublisher};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::{interrupt, output};

pub(crate) fn run(cli: Cli) -> Result<()> {
    let project_root = resolve_project_root(cli.path.clone())?;
    let input = cli.into_input(project_root);

    let manifest_io = FileSystemManifestIO::new();
    let prepared = prepare_release(&manifest_io, &input)?;
    let config = &prepared.config;
    debug!(?config, "resolved release configuration");

    let interrupt = InterruptFlag::new();
    if !config.dry_run {
        interrupt::install(&interrupt)?;
    }

    let gateway = ProcessGateway::new(&config.project_root)
        .with_timeout(config.timeout)
        .with_interrupt(interrupt.clone());
    let operation = ReleaseOperation::new(
        CliGitProvider::new(gateway.clone()),
        manifest_io,
        NpmPublisher::new(gateway),
    )
    .with_interrupt(interrupt);

    let outcome = operation.execute(&prepared)?;
    output::print_outcome(&prepared, &outcome);

    Ok(())
}

fn resolve_project_root(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}
