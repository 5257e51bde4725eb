//! Camera Model Demo
//!
//! Builds a camera from a model name (or id), its parameters and the image
//! size, then projects a normalized coordinate, prints the projection Jacobian
//! and unprojects the pixel again.
//!
//! Usage:
//! ```bash
//! cargo run --example camera_demo -- \
//!   --model OPENCV_FISHEYE \
//!   --params 400,405,320,240,0.05,-0.01,0.002,-0.0005 \
//!   --width 640 --height 480 -x 0.3 -y -0.2
//! ```
//!
//! A YAML camera description can be given instead of the model flags:
//! ```bash
//! cargo run --example camera_demo -- --config camera.yaml -x 0.3 -y -0.2
//! ```

use clap::Parser;
use colmap_cameras::camera::ModelKind;
use colmap_cameras::Camera;
use flexi_logger::{colored_detailed_format, Logger};
use log::{info, warn};
use nalgebra::Vector2;
use std::path::PathBuf;

/// Project and unproject a point with any supported camera model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model name (e.g. OPENCV) or numeric id
    #[arg(short = 'm', long, default_value = "PINHOLE")]
    model: String,

    /// Comma-separated model parameters
    #[arg(
        short = 'p',
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_value = "500,500,320,240"
    )]
    params: Vec<f64>,

    /// Image width in pixels
    #[arg(long, default_value_t = 640)]
    width: i64,

    /// Image height in pixels
    #[arg(long, default_value_t = 480)]
    height: i64,

    /// YAML camera description; overrides the model flags
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Normalized x coordinate
    #[arg(short = 'x', long, default_value_t = 0.1, allow_hyphen_values = true)]
    x: f64,

    /// Normalized y coordinate
    #[arg(short = 'y', long, default_value_t = -0.05, allow_hyphen_values = true)]
    y: f64,

    /// List the registered models and exit
    #[arg(long)]
    list: bool,
}

fn build_camera(cli: &Cli) -> Result<Camera, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.config {
        let yaml = std::fs::read_to_string(path)?;
        info!("Loading camera from {}", path.display());
        return Ok(Camera::from_yaml_str(&yaml)?);
    }

    let camera = match cli.model.trim().parse::<i32>() {
        Ok(id) => Camera::new(id, &cli.params, cli.width, cli.height)?,
        Err(_) => Camera::new(cli.model.as_str(), &cli.params, cli.width, cli.height)?,
    };
    Ok(camera)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Logger::try_with_str("info")?
        .format_for_stdout(colored_detailed_format)
        .log_to_stdout()
        .set_palette("196;208;76;39;178".to_string())
        .start()?;

    let cli = Cli::parse();

    if cli.list {
        println!("{:>3}  {:<22} parameters", "id", "name");
        for kind in ModelKind::ALL {
            println!(
                "{:>3}  {:<22} {}",
                kind.id(),
                kind.name(),
                kind.param_names().join(", ")
            );
        }
        return Ok(());
    }

    let camera = build_camera(&cli)?;
    info!("Camera: {}", camera);
    println!("Model:       {} (id {})", camera.model_name(), camera.model_id());
    println!("Image size:  {} x {}", camera.width(), camera.height());
    println!("Parameters:  {}", camera.params_info());
    println!("Values:      {:?}", camera.params());
    println!("Focal:       {:.6}", camera.focal());

    let point = Vector2::new(cli.x, cli.y);
    let (pixel, jacobian) = camera.project_with_jac(&point);
    println!("\nNormalized:  ({:.6}, {:.6})", point.x, point.y);
    println!("Pixel:       ({:.6}, {:.6})", pixel.x, pixel.y);
    println!("Jacobian:");
    println!("  [{:>14.6} {:>14.6}]", jacobian[(0, 0)], jacobian[(0, 1)]);
    println!("  [{:>14.6} {:>14.6}]", jacobian[(1, 0)], jacobian[(1, 1)]);

    let status = camera.unproject_with_status(&pixel);
    if !status.converged {
        warn!(
            "Unprojection did not converge after {} iterations (residual {:e})",
            status.iterations, status.residual
        );
    }
    println!(
        "\nUnprojected: ({:.6}, {:.6}) after {} iterations",
        status.point.x, status.point.y, status.iterations
    );
    println!("Round trip error: {:e}", (status.point - point).norm());

    Ok(())
}
