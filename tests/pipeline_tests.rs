mod common;

use common::{
    create_mixed_directory, create_temp_directory, photo_like_image, write_corrupt_png,
    write_test_png,
};
use png_squeeze::{
    compress_one, discover_images, run, validate_input, CompressionError, Job, MemorySink,
    Outcome, StatusLevel,
};
use std::collections::HashSet;
use std::fs;

#[test]
fn test_discovery_scenario_mixed_extensions() {
    let temp_dir = create_temp_directory();
    let expected = create_mixed_directory(temp_dir.path());

    let images = discover_images(temp_dir.path()).unwrap();
    assert_eq!(images, expected);
}

#[test]
fn test_validate_input_accepts_directory_without_pngs() {
    let temp_dir = create_temp_directory();
    fs::write(temp_dir.path().join("c.jpg"), b"jpeg-ish").unwrap();
    assert!(validate_input(temp_dir.path()).is_ok());
}

#[test]
fn test_run_creates_output_and_one_result_per_file() {
    let input = create_temp_directory();
    for i in 0..5 {
        write_test_png(&input.path().join(format!("img_{}.png", i)), 24, 24);
    }
    let output = create_temp_directory();
    let out_dir = output.path().join("fresh");
    assert!(!out_dir.exists());

    let job = Job::new(input.path(), &out_dir, 85).unwrap();
    let mut sink = MemorySink::new();
    let report = run(&job, &mut sink).unwrap();

    assert!(out_dir.is_dir());
    assert_eq!(report.len(), 5);
    assert!(report.all_succeeded());
    assert_eq!(sink.lines().len(), 5);
    for result in report.results() {
        assert_eq!(result.destination.parent().unwrap(), out_dir.as_path());
        assert_eq!(result.destination.file_name(), result.source.file_name());
        assert!(result.destination.is_file());
    }
}

#[test]
fn test_single_corrupt_file_does_not_abort() {
    let input = create_temp_directory();
    for i in 0..4 {
        write_test_png(&input.path().join(format!("ok_{}.png", i)), 20, 20);
    }
    write_corrupt_png(&input.path().join("broken.png"));
    let output = create_temp_directory();

    let job = Job::new(input.path(), output.path(), 85).unwrap();
    let mut sink = MemorySink::new();
    let report = run(&job, &mut sink).unwrap();

    assert_eq!(report.len(), 5);
    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.failed(), 1);
    assert_eq!(sink.count(StatusLevel::Error), 1);

    let codec_failures = report
        .results()
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Failed(CompressionError::Codec { .. })))
        .count();
    assert_eq!(codec_failures, 1);
    assert!(!output.path().join("broken.png").exists());
}

#[test]
fn test_output_directory_survives_run() {
    let input = create_temp_directory();
    write_corrupt_png(&input.path().join("only.png"));
    let output = create_temp_directory();
    let out_dir = output.path().join("kept");

    let job = Job::new(input.path(), &out_dir, 85).unwrap();
    let report = run(&job, &mut MemorySink::new()).unwrap();

    assert_eq!(report.failed(), 1);
    assert!(out_dir.is_dir());
}

#[test]
fn test_compress_one_same_input_same_size() {
    let temp_dir = create_temp_directory();
    let source = write_test_png(&temp_dir.path().join("source.png"), 128, 96);

    let first = compress_one(&source, &temp_dir.path().join("first.png"), 85).unwrap();
    let second = compress_one(&source, &temp_dir.path().join("second.png"), 85).unwrap();

    assert_eq!(first.compressed_size, second.compressed_size);
    assert_eq!(
        fs::read(temp_dir.path().join("first.png")).unwrap().len(),
        fs::read(temp_dir.path().join("second.png")).unwrap().len()
    );
}

#[test]
fn test_large_photo_like_image_shrinks() {
    let temp_dir = create_temp_directory();
    let source = temp_dir.path().join("photo.png");
    photo_like_image(1000, 1000, 42).save(&source).unwrap();
    let destination = temp_dir.path().join("photo_small.png");

    let stats = compress_one(&source, &destination, 85).unwrap();

    assert!(stats.palette_len <= 256);
    assert!(stats.compressed_size <= stats.original_size);

    let decoded = image::open(&destination).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (1000, 1000));
    let distinct: HashSet<[u8; 4]> = decoded.pixels().map(|p| p.0).collect();
    assert!(distinct.len() <= 256);
}

#[test]
fn test_quality_does_not_change_pixels() {
    let temp_dir = create_temp_directory();
    let source = write_test_png(&temp_dir.path().join("q.png"), 48, 48);

    compress_one(&source, &temp_dir.path().join("low.png"), 10).unwrap();
    compress_one(&source, &temp_dir.path().join("high.png"), 80).unwrap();

    let low = image::open(temp_dir.path().join("low.png")).unwrap().to_rgba8();
    let high = image::open(temp_dir.path().join("high.png")).unwrap().to_rgba8();
    assert_eq!(low, high);
}
