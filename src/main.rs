//! Solar sizer entry point: load a design, size it, print the derivation.

use std::io::{self, Write};
use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solar_sizer::catalog::PanelCatalog;
use solar_sizer::cli::Args;
use solar_sizer::io::export::{export_csv, write_json};
use solar_sizer::report::{build_labels_table, build_log_table};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .without_time()
        .compact()
        .init();

    let args = Args::parse();
    let design = args.load_design()?;
    let catalog = PanelCatalog::builtin();

    let errors = design.validate(&catalog);
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    info!(system = %design.system, loads = design.loads.len(), "sizing design");
    let result = design.size(&catalog)?;

    let mut stdout = io::stdout().lock();
    if args.json {
        write_json(&result, &mut stdout)?;
    } else {
        writeln!(stdout, "{}", build_log_table(result.log()))?;
        writeln!(stdout, "{}", build_labels_table(&result.diagram_labels()))?;
        writeln!(stdout, "\n{result}")?;
    }
    drop(stdout);

    if let Some(path) = &args.csv {
        export_csv(result.log(), path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), steps = result.log().len(), "derivation log written");
    }

    #[cfg(feature = "api")]
    if args.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        use solar_sizer::api::AppState;

        let state = Arc::new(AppState {
            catalog,
            heuristics: design.heuristics,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(solar_sizer::api::serve(state, addr))?;
    }

    Ok(())
}
