//! Command line arguments and their mapping onto conversion parameters.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use emboss_mesh::{ConversionParams, DepthScalePolicy, ScaleMode};

use crate::loader::BitDepth;

/// Convert a grayscale image into an embossed binary STL plate.
///
/// Brighter pixels are raised higher. Parameters can come from a JSON file
/// (`--params`); flags given on the command line override it.
#[derive(Parser, Debug)]
#[command(name = "emboss")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Input image (PNG, JPEG, GIF or BMP)
    pub input: PathBuf,

    /// Output STL path [default: input path with an .stl extension]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file with conversion parameters
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// Output width in millimetres
    #[arg(long)]
    pub width_mm: Option<f64>,

    /// Emboss depth in millimetres
    #[arg(long)]
    pub depth_mm: Option<f64>,

    /// Restrict the plate to a disk
    #[arg(long, conflicts_with = "no_circular")]
    pub circular: bool,

    /// Mesh the whole rectangle
    #[arg(long)]
    pub no_circular: bool,

    /// Cells trimmed inside the disk radius
    #[arg(long)]
    pub edge_buffer: Option<f64>,

    /// In-plane Y scale
    #[arg(long, value_enum)]
    pub scale_mode: Option<ScaleModeArg>,

    /// Maximum elevation used for the depth scale when cropping
    #[arg(long, value_enum)]
    pub depth_policy: Option<DepthPolicyArg>,

    /// Read 16-bit luma instead of 8-bit
    #[arg(long)]
    pub sixteen_bit: bool,

    /// Write the boundary trace as x,y,z CSV
    #[arg(long)]
    pub boundary: Option<PathBuf>,

    /// Triangulate on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Re-read the written STL and check its triangle count
    #[arg(long)]
    pub verify: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScaleModeArg {
    /// Square pixels
    Uniform,
    /// Y scaled by the image aspect ratio
    Aspect,
}

impl From<ScaleModeArg> for ScaleMode {
    fn from(arg: ScaleModeArg) -> Self {
        match arg {
            ScaleModeArg::Uniform => ScaleMode::Uniform,
            ScaleModeArg::Aspect => ScaleMode::AspectCorrected,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DepthPolicyArg {
    /// Brightest pixel left after cropping
    Retained,
    /// Brightest pixel of the whole image
    Source,
}

impl From<DepthPolicyArg> for DepthScalePolicy {
    fn from(arg: DepthPolicyArg) -> Self {
        match arg {
            DepthPolicyArg::Retained => DepthScalePolicy::RetainedSamples,
            DepthPolicyArg::Source => DepthScalePolicy::SourceImage,
        }
    }
}

impl Args {
    /// Parameters from `--params` (or defaults) with flag overrides applied.
    pub fn conversion_params(&self) -> Result<ConversionParams> {
        let mut params = match &self.params {
            Some(path) => read_params(path)?,
            None => ConversionParams::default(),
        };

        if let Some(width) = self.width_mm {
            params.target_width_mm = width;
        }
        if let Some(depth) = self.depth_mm {
            params.target_depth_mm = depth;
        }
        if self.circular {
            params.circular_crop = true;
        }
        if self.no_circular {
            params.circular_crop = false;
        }
        if let Some(buffer) = self.edge_buffer {
            params.edge_buffer = buffer;
        }
        if let Some(mode) = self.scale_mode {
            params.scale_mode = mode.into();
        }
        if let Some(policy) = self.depth_policy {
            params.depth_policy = policy.into();
        }

        Ok(params)
    }

    /// Explicit `--output`, or the input path with an `.stl` extension.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("stl"))
    }

    pub fn bit_depth(&self) -> BitDepth {
        if self.sixteen_bit {
            BitDepth::Sixteen
        } else {
            BitDepth::Eight
        }
    }
}

fn read_params(path: &Path) -> Result<ConversionParams> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read parameters '{}'", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid parameters in '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("emboss").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["logo.png"]);
        assert_eq!(args.conversion_params().unwrap(), ConversionParams::default());
        assert_eq!(args.output_path(), PathBuf::from("logo.stl"));
        assert_eq!(args.bit_depth(), BitDepth::Eight);
    }

    #[test]
    fn test_output_path_keeps_directory() {
        let args = parse(&["pics/goomba.gif"]);
        assert_eq!(args.output_path(), PathBuf::from("pics/goomba.stl"));
    }

    #[test]
    fn test_explicit_output() {
        let args = parse(&["a.png", "-o", "b.stl"]);
        assert_eq!(args.output_path(), PathBuf::from("b.stl"));
    }

    #[test]
    fn test_flag_overrides() {
        let args = parse(&[
            "a.png",
            "--width-mm",
            "120",
            "--depth-mm",
            "3.5",
            "--no-circular",
            "--scale-mode",
            "aspect",
            "--depth-policy",
            "source",
        ]);
        let params = args.conversion_params().unwrap();
        assert_eq!(params.target_width_mm, 120.0);
        assert_eq!(params.target_depth_mm, 3.5);
        assert!(!params.circular_crop);
        assert_eq!(params.scale_mode, ScaleMode::AspectCorrected);
        assert_eq!(params.depth_policy, DepthScalePolicy::SourceImage);
    }

    #[test]
    fn test_circular_flags_conflict() {
        let result = Args::try_parse_from(["emboss", "a.png", "--circular", "--no-circular"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_params_file_with_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, r#"{ "target_width_mm": 90.0, "edge_buffer": 4.0 }"#).unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let args = parse(&["a.png", "--params", &path_arg, "--edge-buffer", "1.5"]);
        let params = args.conversion_params().unwrap();
        assert_eq!(params.target_width_mm, 90.0);
        assert_eq!(params.edge_buffer, 1.5);
    }

    #[test]
    fn test_bad_params_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        fs::write(&path, "not json").unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let args = parse(&["a.png", "--params", &path_arg]);
        assert!(args.conversion_params().is_err());
    }
}
