//! Export tests: JSON camera table and both CSV schemas.
//!
//! The CSV tables are built from JSON entries only, so these tests check that
//! the two stay consistent row for row.

use nalgebra::Vector3;
use spherecam_rs::core::{PosePolicy, Resolution};
use spherecam_rs::io::csv::{interop_heading, INTEROP_HEADER, SIMPLE_HEADER};
use spherecam_rs::io::{
    export_csv, export_json, load_camera_json, save_camera_csv, save_camera_json, CsvSchema,
    RenderError,
};
use spherecam_rs::sweep::{generate_sweep, ImageFormat, RenderRequest, SweepConfig};
use spherecam_rs::CameraRecord;
use std::fs;
use std::path::PathBuf;

fn sweep_records() -> Vec<CameraRecord> {
    let config = SweepConfig {
        center: Vector3::new(0.0, 0.0, 1.0),
        radius: 3.0,
        focal_lengths: vec![24.0, 50.0],
        tilt_degs: vec![0.0, 45.0, 90.0, 135.0, 180.0],
        pan_degs: (0..8).map(|i| i as f64 * 45.0).collect(),
        sensor_width_mm: 36.0,
        resolution: Resolution {
            width: 1920,
            height: 1080,
        },
        policy: PosePolicy::default(),
        image_format: ImageFormat::Jpg,
        image_dir: PathBuf::from("generated_images"),
    };
    let mut renderer = |_: &RenderRequest<'_>| -> Result<(), RenderError> { Ok(()) };
    generate_sweep(&config, &mut renderer).expect("sweep should succeed")
}

#[test]
fn test_interop_rows_match_json_records() {
    let records = sweep_records();
    let entries = export_json(&records);
    assert_eq!(entries.len(), 80);

    let csv = export_csv(&entries, CsvSchema::Interop);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], INTEROP_HEADER);
    assert_eq!(lines.len() - 1, entries.len());

    for (line, entry) in lines[1..].iter().zip(&entries) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 16);
        assert_eq!(fields[0], entry.label());

        let x: f64 = fields[1].parse().unwrap();
        let y: f64 = fields[2].parse().unwrap();
        let alt: f64 = fields[3].parse().unwrap();
        let heading: f64 = fields[4].parse().unwrap();
        let f: f64 = fields[7].parse().unwrap();

        assert_eq!(x, entry.camera_location.x);
        assert_eq!(y, entry.camera_location.y);
        assert_eq!(alt, entry.camera_location.z);
        assert_eq!(heading, -1.0 * entry.camera_rotation_deg.z);
        assert_eq!(heading, interop_heading(entry));
        assert_eq!(f, entry.focal_length.focal_length_35mm);
        assert!(fields[8..].iter().all(|v| *v == "0"));
    }
}

#[test]
fn test_simple_rows_map_rotation_axes() {
    let entries = export_json(&sweep_records());
    let csv = export_csv(&entries, CsvSchema::Simple);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], SIMPLE_HEADER);

    for (line, entry) in lines[1..].iter().zip(&entries) {
        let fields: Vec<f64> = line.split(',').skip(1).map(|v| v.parse().unwrap()).collect();
        assert_eq!(fields[3], entry.camera_rotation_deg.z); // yaw
        assert_eq!(fields[4], entry.camera_rotation_deg.x); // pitch
        assert_eq!(fields[5], entry.camera_rotation_deg.y); // roll
    }
}

#[test]
fn test_json_values_are_rounded_to_six_places() {
    for entry in export_json(&sweep_records()) {
        for v in [
            entry.camera_location.x,
            entry.camera_location.y,
            entry.camera_location.z,
            entry.camera_rotation.x,
            entry.camera_rotation.z,
            entry.camera_rotation_deg.x,
            entry.camera_rotation_deg.z,
        ] {
            let scaled = v * 1e6;
            assert!((scaled - scaled.round()).abs() < 1e-6, "{v} not rounded");
        }
    }
}

#[test]
fn test_saved_json_reproduces_csv() {
    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("camera_data.json");
    let csv_path = dir.path().join("camera_data.csv");

    let entries = export_json(&sweep_records());
    save_camera_json(&entries, &json_path).unwrap();
    save_camera_csv(&entries, CsvSchema::Interop, &csv_path).unwrap();

    let loaded = load_camera_json(&json_path).unwrap();
    assert_eq!(loaded, entries);

    let csv_on_disk = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_on_disk, export_csv(&loaded, CsvSchema::Interop));
}

#[test]
fn test_json_ids_follow_generation_order() {
    let entries = export_json(&sweep_records());
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.id, i);
    }
    assert_eq!(entries[0].label(), "0000_tilt_000_pan_000_f24.jpg");
    assert_eq!(entries[79].label(), "0079_tilt_180_pan_315_f50.jpg");
    assert_eq!(entries[0].sensor.height_mm, 20.25);
    assert_eq!(entries[0].focal_length.focal_length_px, 24.0 * 1920.0 / 36.0);
}

#[test]
fn test_save_reports_path_on_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no_such_dir").join("camera_data.json");
    let err = save_camera_json(&export_json(&sweep_records()), &missing).unwrap_err();
    assert!(err.to_string().contains("no_such_dir"));
}
