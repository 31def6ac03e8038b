//! # emboss
//!
//! Turns a grayscale image into a binary STL heightfield plate.
//!
//! ```text
//! emboss logo.png --width-mm 120 --depth-mm 3 --no-circular
//! ```
//!
//! The process exits non-zero if any stage fails. A failed write may leave
//! a truncated STL behind.

mod args;
mod export;
mod loader;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use emboss_mesh::{load_stl, Converter};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let params = args.conversion_params()?;
    let grid = loader::load_grid(&args.input, args.bit_depth())?;
    let output = args.output_path();

    let converter = Converter::new(grid, params)
        .with_context(|| format!("cannot convert '{}'", args.input.display()))?;

    let triangles = if args.parallel {
        let mesh = converter.to_mesh_parallel()?;
        emboss_mesh::save_stl(&mesh, &output)
            .with_context(|| format!("failed to write '{}'", output.display()))?;
        mesh.triangle_count()
    } else {
        converter
            .save_stl(&output)
            .with_context(|| format!("failed to write '{}'", output.display()))?
    };

    if args.verify {
        let contents = load_stl(&output)
            .with_context(|| format!("failed to read back '{}'", output.display()))?;
        ensure!(
            contents.records.len() == triangles,
            "'{}' holds {} triangles, expected {}",
            output.display(),
            contents.records.len(),
            triangles
        );
        info!(triangles, "Verified STL");
    }

    if let Some(path) = &args.boundary {
        let trace = converter.boundary()?;
        export::save_boundary_csv(&trace, path)?;
        info!(points = trace.len(), path = %path.display(), "Saved boundary trace");
    }

    info!(output = %output.display(), triangles, "Done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma};

    fn write_disc_image(path: &std::path::Path) {
        let img: GrayImage = ImageBuffer::from_fn(24, 24, |x, y| {
            let dx = x as i32 - 12;
            let dy = y as i32 - 12;
            if dx * dx + dy * dy < 64 {
                Luma([255u8])
            } else {
                Luma([40u8])
            }
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("disc.png");
        let boundary = dir.path().join("disc.csv");
        write_disc_image(&input);

        let args = Args::try_parse_from([
            "emboss",
            input.to_str().unwrap(),
            "--verify",
            "--boundary",
            boundary.to_str().unwrap(),
        ])
        .unwrap();
        run(&args).unwrap();

        let stl = load_stl(dir.path().join("disc.stl")).unwrap();
        assert!(!stl.records.is_empty());
        assert!(std::fs::read_to_string(&boundary).unwrap().starts_with("x,y,z"));
    }

    #[test]
    fn test_run_parallel_matches_count() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("disc.png");
        write_disc_image(&input);

        let args = Args::try_parse_from([
            "emboss",
            input.to_str().unwrap(),
            "--no-circular",
            "--parallel",
            "--verify",
        ])
        .unwrap();
        run(&args).unwrap();

        let stl = load_stl(dir.path().join("disc.stl")).unwrap();
        assert_eq!(stl.records.len(), 2 * 23 * 23);
    }

    #[test]
    fn test_run_flat_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("black.png");
        let img: GrayImage = ImageBuffer::from_pixel(8, 8, Luma([0u8]));
        img.save(&input).unwrap();

        let args = Args::try_parse_from(["emboss", input.to_str().unwrap()]).unwrap();
        assert!(run(&args).is_err());
        assert!(!dir.path().join("black.stl").exists());
    }
}
