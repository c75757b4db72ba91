#![cfg(feature = "wav")]

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::process::Command;
use tempfile::TempDir;
use waveedit::editor::{EditorSettings, WaveformEditor};
use waveedit::media::{load_wav, write_wav_pcm16};

fn write_float_wav(path: &std::path::Path, samples: &[f32]) {
    write_float_wav_at(path, samples, 44_100);
}

fn write_float_wav_at(path: &std::path::Path, samples: &[f32], sample_rate: u32) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    for &s in samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_trim_file_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("take.wav");
    let output = temp_dir.path().join("take-trimmed.wav");

    let samples: Vec<f32> = (0..20_000).map(|i| if i < 5_000 { 0.5 } else { -0.25 }).collect();
    write_float_wav(&input, &samples);

    let mut editor = WaveformEditor::new(EditorSettings::default(), 200).unwrap();
    let info = load_wav(&input, &mut editor, |_| {}).unwrap();
    assert_eq!(info.frames, 20_000);
    assert_eq!(editor.view().samples_per_pixel(), 100.0);

    editor.set_selection(0, 5_000);
    editor.trim().unwrap();
    write_wav_pcm16(&output, editor.samples(), 44_100).unwrap();

    let mut reloaded = WaveformEditor::new(EditorSettings::default(), 200).unwrap();
    let info = load_wav(&output, &mut reloaded, |_| {}).unwrap();
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.frames, 15_000);
    assert!(reloaded.samples().iter().all(|&s| (s + 0.25).abs() < 1e-3));
}

#[test]
fn test_normalize_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("quiet.wav");
    let output = temp_dir.path().join("loud.wav");

    let samples: Vec<f32> = (0..4_410).map(|i| (i as f32 * 0.05).sin() * 0.1).collect();
    write_float_wav(&input, &samples);

    let mut editor = WaveformEditor::new(EditorSettings::default(), 100).unwrap();
    load_wav(&input, &mut editor, |_| {}).unwrap();
    let outcome = editor.normalize().unwrap();
    assert!(outcome.gain_db() > 19.0);
    write_wav_pcm16(&output, editor.samples(), 44_100).unwrap();

    let reader = hound::WavReader::open(&output).unwrap();
    let peak = reader
        .into_samples::<i16>()
        .map(|s| s.unwrap().unsigned_abs())
        .max()
        .unwrap();
    assert_eq!(peak, 32767);
}

fn waveedit(temp_dir: &TempDir, args: &[&str]) {
    let status = Command::new(env!("CARGO_BIN_EXE_waveedit"))
        .args(args)
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .status()
        .unwrap();
    assert!(status.success(), "waveedit {args:?} failed");
}

#[test]
fn test_cli_trim_keeps_source_sample_rate() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.wav");
    let output = temp_dir.path().join("out.wav");

    // One second at 22.05 kHz; cut the first half second
    write_float_wav_at(&input, &vec![0.5; 22_050], 22_050);
    waveedit(
        &temp_dir,
        &[
            "trim",
            input.to_str().unwrap(),
            "--start",
            "0",
            "--end",
            "11025",
            "-o",
            output.to_str().unwrap(),
        ],
    );

    let reader = WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().sample_rate, 22_050);
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.duration(), 11_025);
}

#[test]
fn test_cli_normalize_keeps_source_sample_rate() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.wav");
    let output = temp_dir.path().join("out.wav");

    write_float_wav_at(&input, &vec![0.25; 4_800], 48_000);
    waveedit(
        &temp_dir,
        &[
            "normalize",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ],
    );

    let reader = WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().sample_rate, 48_000);
    assert_eq!(reader.duration(), 4_800);
}
