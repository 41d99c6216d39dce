use solution_pruner::adapters::outbound::console::LogFacadeLogger;
use solution_pruner::adapters::outbound::snapshot::{InMemoryComponentStore, SnapshotFile};
use solution_pruner::application::dto::OutputFormat;
use solution_pruner::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use solution_pruner::application::use_cases::ComponentCleanupService;
use solution_pruner::cli::{Args, Command, WalkArgs};
use solution_pruner::component_cleanup::domain::ComponentRef;
use solution_pruner::component_cleanup::services::DeleteOptions;
use solution_pruner::config::{self, ConfigFile};
use solution_pruner::ports::inbound::{
    ComponentCleanupPort, DeleteRequest, DependencyRequest, RemoveFromSolutionRequest,
};
use solution_pruner::ports::outbound::ResultFormatter;
use solution_pruner::shared::error::{ExitCode, PrunerError};
use solution_pruner::shared::Result;
use std::io::IsTerminal;
use std::path::Path;
use std::process;

fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        let code = e
            .downcast_ref::<PrunerError>()
            .map(PrunerError::exit_code)
            .unwrap_or(ExitCode::ApplicationError);
        process::exit(code.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    init_logging(args.verbose, config.log_level.as_deref());
    config.warn_unknown_fields();

    let snapshot_path = args
        .snapshot
        .clone()
        .or_else(|| config.snapshot.clone())
        .ok_or_else(|| PrunerError::Validation {
            message: "No snapshot file given.\n\n💡 Hint: Pass --snapshot <FILE> or set 'snapshot' in solution-pruner.config.yml".to_string(),
        })?;

    let store = InMemoryComponentStore::new(SnapshotFile::load(&snapshot_path)?);
    let service = ComponentCleanupService::new(&store, LogFacadeLogger::new());

    let format = args
        .format
        .or_else(|| config.output_format())
        .unwrap_or_default();
    let colored = args.output.is_none() && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create(format, colored);
    let presenter = PresenterFactory::create(PresenterType::from(args.output.clone()));

    let walk_request = |component: ComponentRef, walk: &WalkArgs| {
        DependencyRequest::new(
            component,
            walk.recursive,
            walk.max_depth.or(config.max_depth),
        )
    };

    let output = match args.command {
        Command::ForDelete {
            component,
            solution,
        } => {
            let plan = match solution {
                Some(solution) => {
                    service.solution_component_for_delete(component.component(), &solution)?
                }
                None => service.components_for_delete(component.component())?,
            };
            formatter.format_plan(&plan)?
        }
        Command::Dependents { component, walk } => {
            let edges = service.dependents(walk_request(component.component(), &walk))?;
            formatter.format_edges(&edges)?
        }
        Command::Requirements { component, walk } => {
            let edges = service.requirements(walk_request(component.component(), &walk))?;
            formatter.format_edges(&edges)?
        }
        Command::Delete {
            component,
            unmanaged_only,
            what_if,
            write_back,
        } => {
            let options = DeleteOptions {
                unmanaged_only: unmanaged_only || config.unmanaged_only.unwrap_or(false),
                what_if,
            };
            let result =
                service.delete_with_dependencies(DeleteRequest::new(component.component(), options));
            if write_back {
                save_snapshot(&store, &snapshot_path)?;
            }
            match result {
                Ok(report) => formatter.format_report(&report)?,
                Err(e) => {
                    present_partial_report(&e, formatter.as_ref(), format);
                    return Err(e);
                }
            }
        }
        Command::AddToSolution {
            component,
            solution,
            write_back,
        } => {
            let added = service.add_to_solution(component.component(), &solution)?;
            if write_back && added {
                save_snapshot(&store, &snapshot_path)?;
            }
            let listing = service.solution_components(&solution)?;
            formatter.format_components(&listing.solution, &listing.components)?
        }
        Command::RemoveFromSolution {
            kind,
            id,
            solution,
            write_back,
        } => {
            let component = kind.zip(id).map(|(kind, id)| ComponentRef::new(kind, id));
            let removed = service.remove_from_solution(RemoveFromSolutionRequest {
                solution_unique_name: solution.clone(),
                component,
            })?;
            if write_back && !removed.is_empty() {
                save_snapshot(&store, &snapshot_path)?;
            }
            let listing = service.solution_components(&solution)?;
            formatter.format_components(&listing.solution, &listing.components)?
        }
        Command::Components { solution } => {
            let listing = service.solution_components(&solution)?;
            formatter.format_components(&listing.solution, &listing.components)?
        }
    };

    presenter.present(&output)?;

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => config::load_config_from_path(path),
        None => {
            let cwd = std::env::current_dir()?;
            Ok(config::discover_config(&cwd)?.unwrap_or_default())
        }
    }
}

fn init_logging(verbose: u8, configured: Option<&str>) {
    let level = match verbose {
        0 => configured.unwrap_or("warn"),
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn save_snapshot(store: &InMemoryComponentStore, path: &Path) -> Result<()> {
    SnapshotFile::save(path, &store.snapshot())?;
    log::info!("Snapshot written back to {}", path.display());
    Ok(())
}

/// Shows what a failed cascading delete already removed, on stderr.
fn present_partial_report(
    error: &anyhow::Error,
    formatter: &dyn ResultFormatter,
    format: OutputFormat,
) {
    if let Some(PrunerError::PartialDeletion { report, .. }) = error.downcast_ref::<PrunerError>()
    {
        if report.is_empty() {
            return;
        }
        if let Ok(rendered) = formatter.format_report(report) {
            if format == OutputFormat::Text {
                eprintln!("Processed before the failure:");
            }
            eprint!("{}", rendered);
        }
    }
}
