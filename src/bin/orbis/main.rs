//! Orbis CLI - globe mesh texturing command-line tool.
//!
//! Usage: orbis <COMMAND> [OPTIONS]
//!
//! Run `orbis --help` for available commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

use orbis::algo::texcoord::{generate_sphere_texcoords, TexcoordOptions, TexturedMesh};
use orbis::globe::{
    geo_to_cartesian, geo_to_texcoord, globe_orientation, GeoPoint, Globe, GlobeOptions, MARKER_RADIUS,
};
use orbis::io::{self, obj, Format};
use orbis::mesh::SphereOptions;

#[derive(Parser)]
#[command(name = "orbis")]
#[command(author, version, about = "Globe mesh texturing CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a textured globe mesh
    Sphere {
        /// Output mesh file (.obj or .ply)
        output: PathBuf,

        /// Number of latitude bands
        #[arg(long, default_value = "128")]
        rows: usize,

        /// Number of vertices per latitude ring
        #[arg(long, default_value = "128")]
        cols: usize,

        /// Sphere radius
        #[arg(short, long, default_value = "1.0")]
        radius: f64,

        /// Do not offset alternate rings by half a column
        #[arg(long)]
        no_offset: bool,

        /// Texture image referenced from a generated MTL file (OBJ only)
        #[arg(short, long)]
        texture: Option<String>,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Compute seam-free texture coordinates for an existing sphere mesh
    Texcoords {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file (.obj or .ply)
        output: PathBuf,

        /// Move the mesh centroid to the origin before projecting
        #[arg(long)]
        center: bool,

        /// Faces with a wider u spread cross the seam
        #[arg(long, default_value = "0.5")]
        seam_threshold: f64,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },

    /// Show where a location marker lands on the globe
    Marker {
        /// Latitude in degrees (positive north)
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in degrees (positive east)
        #[arg(allow_negative_numbers = true)]
        longitude: f64,

        /// Globe radius
        #[arg(short, long, default_value = "1.0")]
        radius: f64,
    },

    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Sphere {
            output,
            rows,
            cols,
            radius,
            no_offset,
            texture,
            sequential,
        } => {
            let sphere = SphereOptions::new(rows, cols)
                .with_radius(radius)
                .with_offset(!no_offset);
            let texcoords = TexcoordOptions::default().with_parallel(!sequential);
            cmd_sphere(&output, sphere, texcoords, texture.as_deref())?;
        }

        Commands::Texcoords {
            input,
            output,
            center,
            seam_threshold,
            sequential,
        } => {
            let options = TexcoordOptions::default()
                .with_seam_threshold(seam_threshold)
                .with_parallel(!sequential);
            cmd_texcoords(&input, &output, center, &options)?;
        }

        Commands::Marker {
            latitude,
            longitude,
            radius,
        } => {
            cmd_marker(latitude, longitude, radius)?;
        }

        Commands::Info { input } => {
            cmd_info(&input)?;
        }
    }

    Ok(())
}

fn cmd_sphere(
    output: &Path,
    sphere: SphereOptions,
    texcoords: TexcoordOptions,
    texture: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "Tessellating sphere ({} rows, {} cols, radius {})...",
        sphere.rows,
        sphere.cols,
        sphere.radius
    );

    let start = Instant::now();
    let globe = Globe::build(&GlobeOptions::default().with_sphere(sphere).with_texcoords(texcoords))?;
    let elapsed = start.elapsed();

    report(globe.textured());
    save(globe.textured(), output, texture)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_texcoords(
    input: &Path,
    output: &Path,
    center: bool,
    options: &TexcoordOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = io::load(input)?;
    println!("Loaded: {} vertices, {} faces", mesh.num_vertices(), mesh.num_faces());

    if center {
        let offset = mesh.center();
        log::info!("Centered mesh (offset {:.4}, {:.4}, {:.4})", offset.x, offset.y, offset.z);
    }

    let start = Instant::now();
    let textured = generate_sphere_texcoords(&mesh, options)?;
    let elapsed = start.elapsed();

    report(&textured);
    io::save_textured(&textured, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}

fn cmd_marker(latitude: f64, longitude: f64, radius: f64) -> Result<(), Box<dyn std::error::Error>> {
    let point = GeoPoint::new(latitude, longitude)?;
    let model = geo_to_cartesian(&point, MARKER_RADIUS * radius);
    let world = globe_orientation() * model;
    let uv = geo_to_texcoord(&point);

    println!("Location: {:.6}, {:.6}", point.latitude, point.longitude);
    println!("Marker radius: {:.4}", MARKER_RADIUS * radius);
    println!("Model position: ({:.6}, {:.6}, {:.6})", model.x, model.y, model.z);
    println!("World position: ({:.6}, {:.6}, {:.6})", world.x, world.y, world.z);
    println!("Texcoord: ({:.6}, {:.6})", uv.x, uv.y);

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Faces: {}", mesh.num_faces());

    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }
    if let Some(c) = mesh.centroid() {
        println!("Centroid: ({:.4}, {:.4}, {:.4})", c.x, c.y, c.z);
    }

    let textured = generate_sphere_texcoords(&mesh, &TexcoordOptions::default())?;
    println!("Seam faces: {}", textured.seam_faces().len());
    println!("Seam duplicates needed: {}", textured.duplicated_from().len());

    Ok(())
}

fn report(textured: &TexturedMesh) {
    println!(
        "Result: {} vertices ({} seam duplicates), {} faces ({} on the seam)",
        textured.mesh().num_vertices(),
        textured.duplicated_from().len(),
        textured.mesh().num_faces(),
        textured.seam_faces().len()
    );
}

/// Save a textured mesh, writing an MTL next to OBJ output when a texture is given.
fn save(textured: &TexturedMesh, output: &Path, texture: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match (texture, Format::from_path(output)) {
        (Some(texture), Some(Format::Obj)) => {
            let mtl_path = output.with_extension("mtl");
            let mtl_name = mtl_path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or("output path has no file name")?;
            obj::save_with_uvs(textured, output, Some(mtl_name))?;
            obj::write_mtl(&mtl_path, texture)?;
            log::info!("Wrote material: {}", mtl_path.display());
        }
        (Some(_), _) => {
            log::warn!("--texture is only used for OBJ output; ignoring");
            io::save_textured(textured, output)?;
        }
        (None, _) => io::save_textured(textured, output)?,
    }
    Ok(())
}
