//! Boundary trace dump.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use emboss_mesh::BoundaryTrace;

/// Writes `x,y,z` rows in trace order, after a header row.
pub fn write_boundary_csv<W: Write>(trace: &BoundaryTrace, mut writer: W) -> std::io::Result<()> {
    writeln!(writer, "x,y,z")?;
    for p in trace.positions() {
        writeln!(writer, "{},{},{}", p.x, p.y, p.z)?;
    }
    writer.flush()
}

/// Writes the trace to a CSV file at `path`.
pub fn save_boundary_csv(trace: &BoundaryTrace, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create '{}'", path.display()))?;
    write_boundary_csv(trace, BufWriter::new(file))
        .with_context(|| format!("failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use emboss_mesh::{ConversionParams, Converter, ElevationGrid};

    #[test]
    fn test_csv_rows() {
        let grid = ElevationGrid::new(3, 3, vec![1; 9]).unwrap();
        let params = ConversionParams {
            circular_crop: false,
            ..Default::default()
        };
        let trace = Converter::new(grid, params).unwrap().boundary().unwrap();

        let mut out = Vec::new();
        write_boundary_csv(&trace, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "x,y,z");
        assert_eq!(lines.len(), 1 + trace.len());
        assert!(lines[1..].iter().all(|line| line.split(',').count() == 3));
    }
}
