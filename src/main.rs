//! Standalone viewer for the pulsating sphere scene.
//!
//! ```text
//! pulsing-spheres                      # defaults, animation view
//! pulsing-spheres --preset overview    # orbit camera with helper
//! pulsing-spheres --options my.toml
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use pulsing_spheres::options::PRESET_DIR;
use pulsing_spheres::{Options, SceneError, Viewer};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Load options from a TOML file.
    #[arg(long, conflicts_with = "preset")]
    options: Option<PathBuf>,

    /// Load a named preset from the presets directory.
    #[arg(long)]
    preset: Option<String>,

    /// Directory holding presets.
    #[arg(long, default_value = PRESET_DIR)]
    preset_dir: PathBuf,

    /// Seed the sphere sampler for a reproducible layout.
    #[arg(long)]
    seed: Option<u64>,

    /// Equirectangular image used for the sphere reflections.
    #[arg(long)]
    environment: Option<PathBuf>,

    /// Print the available presets and exit.
    #[arg(long)]
    list_presets: bool,

    /// Print the options JSON schema and exit.
    #[arg(long)]
    print_schema: bool,

    /// Write the resolved options (defaults plus any overrides) to a TOML
    /// file and exit.
    #[arg(long, value_name = "PATH")]
    write_defaults: Option<PathBuf>,
}

fn resolve_options(args: &Args) -> Result<Options, SceneError> {
    let mut options = if let Some(path) = &args.options {
        Options::load(path)?
    } else if let Some(name) = &args.preset {
        Options::load(&Options::preset_path(&args.preset_dir, name))?
    } else {
        Options::default()
    };

    if args.seed.is_some() {
        options.scene.seed = args.seed;
    }
    if let Some(path) = &args.environment {
        options.scene.environment_map = Some(path.display().to_string());
    }
    Ok(options)
}

fn print_lines(lines: &[String]) -> Result<(), SceneError> {
    let mut out = std::io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), SceneError> {
    if args.list_presets {
        return print_lines(&Options::list_presets(&args.preset_dir));
    }
    if args.print_schema {
        let schema = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| SceneError::OptionsParse(e.to_string()))?;
        return print_lines(&[schema]);
    }

    let options = resolve_options(args)?;
    if let Some(path) = &args.write_defaults {
        options.save(path)?;
        log::info!("options written to {}", path.display());
        return Ok(());
    }

    log::info!(
        "starting with {} spheres{}",
        options.scene.sampler_count,
        options
            .scene
            .environment_map
            .as_deref()
            .map(|p| format!(", environment {}", Path::new(p).display()))
            .unwrap_or_default()
    );
    Viewer::builder().with_options(options).build().run()
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
