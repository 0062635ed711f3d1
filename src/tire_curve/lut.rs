// ==============================================================================
// lut.rs — NORMALIZATION + LUT TEXT CODEC
// ==============================================================================
// The sim reads lateral force curves as plain text:
//
//   ; comment
//   ;
//   0.0|0.0000
//   0.1|0.0159
//
// - header lines start with ';'
// - data lines are "<angle, 1 decimal>|<force, 4 decimals>"
// - every line ends in '\n', comments run straight into data
// - forces are normalized so the peak prints as 1.0000
//
// Output is byte-reproducible: same curve, same file.
// ==============================================================================

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::tire_curve::error::{CurveError, Result};
use crate::tire_curve::types::{ForceSeries, SlipAngleSeries};

pub const FIELD_SEP: char = '|';
pub const COMMENT: char = ';';

/// Divides every sample by the series peak.
pub fn normalize(forces: &ForceSeries) -> Result<ForceSeries> {
    let peak = forces.max();
    if !(peak.is_finite() && peak > 0.0) {
        return Err(CurveError::DegenerateCurve { peak });
    }
    Ok(forces.iter().map(|f| f / peak).collect::<Vec<_>>().into())
}

#[derive(Debug, Clone, PartialEq)]
pub struct LutDocument {
    pub header: Vec<String>,
    pub rows: Vec<(f64, f64)>,
}

impl LutDocument {
    /// Pairs angles with already-normalized forces.
    pub fn new(angles: &SlipAngleSeries, normalized: &ForceSeries, header: Vec<String>) -> Result<Self> {
        angles.check_parallel(normalized)?;
        Ok(Self {
            header,
            rows: angles.iter().zip(normalized.iter()).collect(),
        })
    }

    /// Normalizes `forces` and builds the document in one go.
    pub fn from_curve(angles: &SlipAngleSeries, forces: &ForceSeries, header: Vec<String>) -> Result<Self> {
        angles.check_parallel(forces)?;
        let normalized = normalize(forces)?;
        Self::new(angles, &normalized, header)
    }

    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|(a, _)| *a)
    }

    pub fn forces(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|(_, f)| *f)
    }

    /// Reads LUT text back. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self> {
        let mut header = Vec::new();
        let mut rows = Vec::new();

        for (i, raw) in text.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();

            if line.is_empty() {
                continue;
            }

            if let Some(comment) = line.strip_prefix(COMMENT) {
                header.push(comment.strip_prefix(' ').unwrap_or(comment).to_string());
                continue;
            }

            let malformed = |reason: String| CurveError::MalformedLut { line: line_no, reason };

            let Some((angle, force)) = line.split_once(FIELD_SEP) else {
                return Err(malformed(format!("missing '{FIELD_SEP}' in {line:?}")));
            };
            let angle: f64 = angle
                .trim()
                .parse()
                .map_err(|e| malformed(format!("bad angle {angle:?}: {e}")))?;
            let force: f64 = force
                .trim()
                .parse()
                .map_err(|e| malformed(format!("bad force {force:?}: {e}")))?;

            rows.push((angle, force));
        }

        Ok(Self { header, rows })
    }
}

impl fmt::Display for LutDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.header {
            if line.is_empty() {
                writeln!(f, "{COMMENT}")?;
            } else if line.starts_with(COMMENT) {
                writeln!(f, "{line}")?;
            } else {
                writeln!(f, "{COMMENT} {line}")?;
            }
        }
        for (angle, force) in &self.rows {
            writeln!(f, "{angle:.1}{FIELD_SEP}{force:.4}")?;
        }
        Ok(())
    }
}

/// Writes `doc` to `path`, replacing any existing file.
pub fn write_lut(path: &Path, doc: &LutDocument) -> Result<()> {
    let wrap = |source: std::io::Error| CurveError::Write { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(wrap)?;
    let mut out = BufWriter::new(file);
    write!(out, "{doc}").map_err(wrap)?;
    out.flush().map_err(wrap)?;

    log::info!("wrote LUT {} ({} rows)", path.display(), doc.rows.len());
    Ok(())
}

pub fn read_lut(path: &Path) -> Result<LutDocument> {
    let text = std::fs::read_to_string(path)?;
    LutDocument::parse(&text)
}

/// "High-Freq Buzz" -> "high_freq_buzz"
pub fn safe_name(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_exact_text() {
        let angles = SlipAngleSeries::new(vec![0.0, 0.5, 1.0]).unwrap();
        let forces = ForceSeries::new(vec![0.0, 0.25, 0.5]);
        let doc = LutDocument::from_curve(&angles, &forces, vec!["test curve".into(), String::new()]).unwrap();
        assert_eq!(doc.to_string(), "; test curve\n;\n0.0|0.0000\n0.5|0.5000\n1.0|1.0000\n");
    }

    #[test]
    fn parse_reads_header_and_rows() {
        let doc = LutDocument::parse("; a\n;\n0.0|0.0000\n\n1.5|1.0000\n").unwrap();
        assert_eq!(doc.header, vec!["a".to_string(), String::new()]);
        assert_eq!(doc.rows, vec![(0.0, 0.0), (1.5, 1.0)]);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = LutDocument::parse("; ok\n0.0|0.0\n1.0 0.5\n").unwrap_err();
        assert!(matches!(err, CurveError::MalformedLut { line: 3, .. }));
        let err = LutDocument::parse("x|0.5\n").unwrap_err();
        assert!(matches!(err, CurveError::MalformedLut { line: 1, .. }));
    }

    #[test]
    fn negative_peak_is_degenerate() {
        let err = normalize(&ForceSeries::new(vec![-1.0, -0.5])).unwrap_err();
        assert!(matches!(err, CurveError::DegenerateCurve { .. }));
        assert!(normalize(&ForceSeries::new(vec![])).is_err());
    }

    #[test]
    fn safe_name_matches_file_naming() {
        assert_eq!(safe_name("High-Freq Buzz"), "high_freq_buzz");
        assert_eq!(safe_name("Subtle Chatter"), "subtle_chatter");
    }
}
