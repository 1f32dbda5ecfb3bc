use clap::{Parser, Subcommand};
use lu_core::IntegrationOrder;
use lu_grid::SurfaceDims;
use lu_pack::VectorLayout;
use lu_project::SolverSettings;
use lu_sim::StepConfig;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lu-cli")]
#[command(about = "Linear UVLM step solver tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a solver settings file and resolve its velocity generator
    Validate {
        /// Path to the settings file (.yaml, .yml or .json)
        settings_path: PathBuf,
    },
    /// Print the packed vector layout for identical rectangular surfaces
    Layout {
        /// Number of surfaces
        #[arg(long, default_value_t = 1)]
        surfaces: usize,
        /// Chordwise panels per surface
        #[arg(long)]
        rows: usize,
        /// Spanwise panels per surface
        #[arg(long)]
        cols: usize,
        /// Wake panel rows per surface
        #[arg(long)]
        wake_rows: usize,
        /// Finite-difference order of the circulation rate (1 or 2)
        #[arg(long, default_value_t = 2)]
        order: u8,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Settings error: {0}")]
    Project(#[from] lu_project::ProjectError),

    #[error("Solver error: {0}")]
    Sim(#[from] lu_sim::SimError),

    #[error("Layout error: {0}")]
    Pack(#[from] lu_pack::PackError),

    #[error("Invalid argument: {0}")]
    Arg(#[from] lu_core::LuError),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { settings_path } => cmd_validate(&settings_path),
        Commands::Layout {
            surfaces,
            rows,
            cols,
            wake_rows,
            order,
        } => cmd_layout(surfaces, rows, cols, wake_rows, order),
    }
}

fn load_settings(path: &Path) -> CliResult<SolverSettings> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let settings = if is_json {
        lu_project::load_json(path)?
    } else {
        lu_project::load_yaml(path)?
    };
    info!(path = %path.display(), json = is_json, "settings loaded");
    Ok(settings)
}

fn cmd_validate(settings_path: &Path) -> CliResult<()> {
    println!("Validating settings: {}", settings_path.display());
    let settings = load_settings(settings_path)?;
    let config = StepConfig::from_settings(&settings)?;
    let generator = config.build_generator()?;

    println!("✓ Settings are valid");
    println!("  dt:               {} s", config.dt_s());
    println!("  integr_order:     {}", config.order);
    println!("  density:          {} kg/m^3", config.density.value);
    println!(
        "  scaling:          length {} m, speed {} m/s, density {} kg/m^3",
        config.scaling.length.value, config.scaling.speed.value, config.scaling.density.value
    );
    println!("  remove_predictor: {}", config.remove_predictor);
    println!("  use_sparse:       {}", config.use_sparse);
    println!("  generator:        {}", generator.name());
    Ok(())
}

fn cmd_layout(
    surfaces: usize,
    rows: usize,
    cols: usize,
    wake_rows: usize,
    order: u8,
) -> CliResult<()> {
    let order = IntegrationOrder::try_from(order)?;
    let dims = SurfaceDims::new((rows + 1, cols + 1), (rows, cols), (wake_rows, cols));
    let layout = VectorLayout::new(vec![dims; surfaces], order)?;

    println!(
        "{} surface(s), {}x{} bound panels, {} wake rows, order {}",
        layout.n_surf(),
        rows,
        cols,
        wake_rows,
        order
    );
    println!("  input  u: {}", layout.input_len());
    println!("  state  x: {}", layout.state_len());
    println!("  output y: {}", layout.output_len());
    println!("  surface   vertex    bound     wake");
    for (i, offsets) in layout.offsets().iter().enumerate() {
        println!(
            "  {:>7} {:>8} {:>8} {:>8}",
            i, offsets.vertex, offsets.bound, offsets.wake
        );
    }
    Ok(())
}
