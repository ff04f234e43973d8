//! Normalize a URDF file and print it as JSON.
//!
//! ```text
//! urdf2json robot.urdf --pretty
//! cat robot.urdf | urdf2json - --validate
//! ```
//!
//! Set `RUST_LOG=cf_urdf=warn` (the default) to see dropped links and joints.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use cf_urdf::{Geometry, Material, ParserOptions, Robot, UrdfParser, validate};
use clap::Parser;
use tracing::info;

/// Convert a URDF robot description into normalized JSON
#[derive(Parser)]
#[command(name = "urdf2json")]
#[command(about = "Convert a URDF robot description into normalized JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// URDF file to read, or `-` for stdin
    #[arg(name = "FILE")]
    input: PathBuf,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Fail unless links and joints form a single kinematic tree
    #[arg(long)]
    validate: bool,

    /// Rewrite relative mesh and texture filenames against the base path
    #[arg(long)]
    resolve_paths: bool,

    /// Base path for relative mesh and texture references (defaults to the file's directory)
    #[arg(long)]
    base_path: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let from_stdin = cli.input.as_os_str() == "-";
    let xml = if from_stdin {
        let mut xml = String::new();
        std::io::stdin()
            .read_to_string(&mut xml)
            .context("reading URDF from stdin")?;
        xml
    } else {
        std::fs::read_to_string(&cli.input)
            .with_context(|| format!("reading {}", cli.input.display()))?
    };

    let base_path = cli.base_path.clone().or_else(|| {
        (!from_stdin)
            .then(|| cli.input.parent().map(PathBuf::from))
            .flatten()
    });
    let mut options = ParserOptions::new();
    if let Some(base_path) = base_path {
        options = options.with_base_path(base_path);
    }

    let parser = UrdfParser::new(options);
    let mut robot = parser
        .parse_str(&xml)
        .with_context(|| format!("parsing {}", cli.input.display()))?;
    info!(
        robot = %robot.name,
        links = robot.links.len(),
        joints = robot.joints.len(),
        "parsed"
    );

    if cli.validate {
        let tree = validate(&robot).context("validating kinematic tree")?;
        info!(root = %tree.root_link, "kinematic tree is valid");
    }

    if cli.resolve_paths {
        resolve_asset_paths(&mut robot, parser.options());
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&robot)?
    } else {
        serde_json::to_string(&robot)?
    };
    println!("{json}");

    Ok(())
}

fn resolve_asset_paths(robot: &mut Robot, options: &ParserOptions) {
    let resolve = |filename: &mut String| {
        *filename = options.resolve_path(filename.as_str()).display().to_string();
    };
    let resolve_geometry = |geometry: Option<&mut Geometry>| {
        if let Some(mesh) = geometry.and_then(|g| g.mesh.as_mut()) {
            resolve(&mut mesh.filename);
        }
    };
    let resolve_material = |material: Option<&mut Material>| {
        if let Some(texture) = material.and_then(|m| m.texture.as_mut()) {
            resolve(&mut texture.filename);
        }
    };

    for link in &mut robot.links {
        for visual in &mut link.visuals {
            resolve_geometry(visual.geometry.as_mut());
            resolve_material(visual.material.as_mut());
        }
        for collision in &mut link.collisions {
            resolve_geometry(collision.geometry.as_mut());
        }
    }
    for material in &mut robot.materials {
        resolve_material(Some(material));
    }
}
