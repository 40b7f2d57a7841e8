/// Bucky Terminal - Wireframe viewer for the C60 cage and other models
///
/// Prints the model summary, rotation matrix and one projected frame, or
/// opens an interactive rotating viewer with `--interactive`.
/// Controls:
///   - WASD / Arrow Keys: Rotate the model
///   - E/R: Roll rotation
///   - P: Cycle projection plane
///   - Space: Toggle spin
///   - Q/ESC: Quit
use anyhow::{bail, Context, Result};
use bucky_core::{stl, Plane, RotationState, Wireframe};
use bucky_terminal::{render_frame, TerminalApp};
use clap::{Parser, ValueEnum};
use log::info;
use std::f64::consts::PI;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Model {
    /// Truncated icosahedron (C60)
    Bucky,
    /// Cube with corners at (±1, ±1, ±1)
    Cube,
    /// Triangle mesh read from an STL file
    Stl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlaneArg {
    Xy,
    Xz,
    Yz,
}

impl From<PlaneArg> for Plane {
    fn from(plane: PlaneArg) -> Self {
        match plane {
            PlaneArg::Xy => Plane::XY,
            PlaneArg::Xz => Plane::XZ,
            PlaneArg::Yz => Plane::YZ,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "bucky-terminal")]
#[command(about = "Render the C60 buckyball and other wireframes in the terminal")]
#[command(version)]
struct ViewConfig {
    /// Model to render.
    #[arg(short, long, value_enum, default_value_t = Model::Bucky)]
    model: Model,

    /// STL file, required with `--model stl`.
    #[arg(long)]
    stl: Option<PathBuf>,

    /// Rotation angles about X, Y and Z in radians.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    angles: Option<Vec<f64>>,

    /// Projection plane.
    #[arg(short, long, value_enum, default_value_t = PlaneArg::Xy)]
    plane: PlaneArg,

    /// Open the interactive viewer instead of printing one frame.
    #[arg(short, long)]
    interactive: bool,

    /// Frame width for printed output.
    #[arg(long, default_value_t = 80)]
    width: usize,

    /// Frame height for printed output.
    #[arg(long, default_value_t = 40)]
    height: usize,
}

impl ViewConfig {
    fn rotation(&self) -> RotationState {
        match self.angles.as_deref() {
            Some(&[x, y, z]) => RotationState::new(x, y, z),
            _ => RotationState::new(PI / 3.0, PI / 4.0, PI / 6.0),
        }
    }

    fn load_model(&self) -> Result<Wireframe> {
        match self.model {
            Model::Bucky => Ok(bucky_core::generate()?),
            Model::Cube => Ok(Wireframe::cube()),
            Model::Stl => {
                let Some(path) = &self.stl else {
                    bail!("--model stl requires --stl <PATH>");
                };
                let data = fs::read(path)
                    .with_context(|| format!("failed to read STL file {}", path.display()))?;
                let mesh = stl::parse_stl(&data)
                    .with_context(|| format!("failed to parse STL file {}", path.display()))?;
                info!(
                    "loaded {}: {} vertices, {} faces",
                    path.display(),
                    mesh.vertices.len(),
                    mesh.faces.len()
                );
                Ok(mesh.to_wireframe())
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let config = ViewConfig::parse();

    let wireframe = config.load_model()?;
    let rotation = config.rotation();
    let plane = Plane::from(config.plane);

    if config.interactive {
        let mut app = TerminalApp::new(wireframe, rotation, plane)?;
        app.run()?;
        return Ok(());
    }

    println!("Model: {:?}", config.model);
    println!("Number of vertices: {}", wireframe.vertices.len());
    println!("Number of edges: {}", wireframe.edges.len());
    println!("Rotation matrix:{}", rotation.matrix());
    println!("Projection plane: {:?}", plane);
    print!(
        "{}",
        render_frame(&wireframe, &rotation, plane, config.width, config.height)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = ViewConfig::try_parse_from(["bucky-terminal"]).unwrap();
        assert_eq!(config.model, Model::Bucky);
        assert_eq!(config.plane, PlaneArg::Xy);
        assert!(!config.interactive);
        assert_eq!(config.rotation(), RotationState::new(PI / 3.0, PI / 4.0, PI / 6.0));
    }

    #[test]
    fn test_cli_angles() {
        let config =
            ViewConfig::try_parse_from(["bucky-terminal", "--angles", "-1.0", "0", "0.5"]).unwrap();
        assert_eq!(config.rotation(), RotationState::new(-1.0, 0.0, 0.5));
    }

    #[test]
    fn test_stl_requires_path() {
        let config = ViewConfig::try_parse_from(["bucky-terminal", "--model", "stl"]).unwrap();
        assert!(config.load_model().is_err());
    }

    #[test]
    fn test_load_bucky() {
        let config = ViewConfig::try_parse_from(["bucky-terminal", "-m", "bucky", "-p", "xz"]).unwrap();
        let wireframe = config.load_model().unwrap();
        assert_eq!(wireframe.vertices.len(), 60);
        assert_eq!(Plane::from(config.plane), Plane::XZ);
    }
}
