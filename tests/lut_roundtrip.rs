// LUT text contract: exact formatting, parse-back, and files written by the runners.

use std::fs;

use tempfile::tempdir;

use tire_lut::config::RunConfig;
use tire_lut::generate;
use tire_lut::tire_curve::{
    ChatterConfig, CurveError, CurveParameters, LutDocument, SlipAngleSeries, chatter, lut, normalize, piecewise,
};

const GT86: CurveParameters = CurveParameters { dy_ref: 1.26, fz0: 2494.0, ls_exp: 0.8119, vertical_load: 2494.0 };

#[test]
fn data_lines_use_fixed_precision() {
    let angles = SlipAngleSeries::linspace(0.0, 15.0, 151).unwrap();
    let forces = piecewise::build(&angles, &GT86).unwrap();
    let doc = LutDocument::from_curve(&angles, &forces, vec!["GT86".into()]).unwrap();
    let text = doc.to_string();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("; GT86"));
    assert_eq!(lines.next(), Some("0.0|0.0000"));

    let data: Vec<&str> = text.lines().filter(|l| !l.starts_with(';')).collect();
    assert_eq!(data.len(), 151);
    assert_eq!(data[150].split('|').next(), Some("15.0"));
    assert!(data.contains(&"5.5|1.0000"));
    for line in &data {
        let (a, f) = line.split_once('|').unwrap();
        assert_eq!(a.split('.').nth(1).map(str::len), Some(1), "{line}");
        assert_eq!(f.split('.').nth(1).map(str::len), Some(4), "{line}");
    }
    assert!(text.ends_with('\n'));
    assert!(!text.contains("\n\n"));
}

#[test]
fn round_trip_reproduces_printed_precision() {
    let angles = SlipAngleSeries::linspace(0.0, 20.0, 201).unwrap();
    let cfg = ChatterConfig { start_angle: 10.0, intensity: 0.15, frequency: 2.0 };
    let (_, forces) = chatter::chattered_curve(&angles, &GT86, &cfg).unwrap();
    let norm = normalize(&forces).unwrap();

    let doc = LutDocument::new(&angles, &norm, vec!["chatter".into(), String::new()]).unwrap();
    let parsed = LutDocument::parse(&doc.to_string()).unwrap();

    assert_eq!(parsed.header, doc.header);
    assert_eq!(parsed.rows.len(), doc.rows.len());
    for ((a0, f0), (a1, f1)) in doc.rows.iter().zip(parsed.rows.iter()) {
        assert!((a0 - a1).abs() <= 0.05 + 1e-12);
        assert!((f0 - f1).abs() <= 0.00005 + 1e-12);
    }
}

#[test]
fn mismatched_document_is_rejected() {
    let angles = SlipAngleSeries::linspace(0.0, 10.0, 11).unwrap();
    let short = normalize(&vec![1.0, 2.0].into()).unwrap();
    let err = LutDocument::new(&angles, &short, Vec::new()).unwrap_err();
    assert!(err.is_malformed_input());
}

#[test]
fn write_then_read_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("curve.lut");

    let angles = SlipAngleSeries::linspace(0.0, 15.0, 31).unwrap();
    let forces = piecewise::build(&angles, &GT86).unwrap();
    let doc = LutDocument::from_curve(&angles, &forces, vec!["file test".into()]).unwrap();

    lut::write_lut(&path, &doc).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), doc.to_string());

    let back = lut::read_lut(&path).unwrap();
    assert_eq!(back.header, vec!["file test".to_string()]);
    assert_eq!(back.rows.len(), 31);
}

#[test]
fn write_into_missing_directory_surfaces_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("nested").join("x.lut");
    let angles = SlipAngleSeries::linspace(0.0, 1.0, 2).unwrap();
    let doc = LutDocument::from_curve(&angles, &vec![0.5, 1.0].into(), Vec::new()).unwrap();
    assert!(matches!(lut::write_lut(&path, &doc), Err(CurveError::Write { .. })));
}

#[test]
fn runners_write_expected_files() {
    let dir = tempdir().unwrap();
    let mut cfg = RunConfig::default();
    cfg.output.dir = dir.path().to_path_buf();

    let custom = generate::run_custom(&cfg, true).unwrap();
    let custom_path = custom.lut.unwrap();
    assert_eq!(custom_path, dir.path().join("dy_curve_custom.lut"));

    let text = fs::read_to_string(&custom_path).unwrap();
    assert!(text.starts_with("; Custom DY_CURVE for realistic slip angle behavior\n"));
    assert!(text.contains(";\n; Format: slip_angle_degrees|normalized_lateral_force\n;\n0.0|0.0000\n"));
    assert!((custom.summary.peak_force - 1.26).abs() < 1e-9);

    let chatter = generate::run_chatter(&cfg, true).unwrap();
    assert_eq!(chatter.len(), 4);
    for (report, file) in chatter.iter().zip([
        "dy_curve_chatter_subtle_chatter.lut",
        "dy_curve_chatter_moderate_chatter.lut",
        "dy_curve_chatter_aggressive_chatter.lut",
        "dy_curve_chatter_high_freq_buzz.lut",
    ]) {
        let path = report.lut.clone().unwrap();
        assert_eq!(path, dir.path().join(file));
        let doc = lut::read_lut(&path).unwrap();
        assert_eq!(doc.rows.len(), 201);
        let peak = doc.forces().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(peak, 1.0);
        assert!(report.excursion.range > 0.0);
    }
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut cfg = RunConfig::default();
    cfg.output.dir = dir.path().to_path_buf();

    assert!(generate::run_custom(&cfg, false).unwrap().lut.is_none());
    assert!(generate::run_chatter(&cfg, false).unwrap().iter().all(|r| r.lut.is_none()));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

    let brush = generate::run_brush(&cfg).unwrap();
    assert_eq!(brush.falloff_sweep.len(), 6);
    assert_eq!(brush.comparison.len(), 3);
    // faster falloff keeps less grip at 10°
    let r10 = |i: usize| brush.falloff_sweep[i].retention.retention[0].percent;
    assert!(r10(0) > r10(5));

    // research preset peaks lower in slip radians, so only limit angle and falloff level are suggested
    let suggested: Vec<&str> = brush.recommendations.iter().map(|r| r.parameter).collect();
    assert_eq!(suggested, ["FRICTION_LIMIT_ANGLE", "FALLOFF_LEVEL"]);
}
