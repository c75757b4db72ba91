//! Terminal rendering of a render frame.
//!
//! Each column becomes a bar of full blocks mirrored about the centre row,
//! with a marker row underneath for the selection and playhead. An overview
//! line of eighth-block glyphs summarises the visible peaks.
#![cfg_attr(not(feature = "wav"), allow(dead_code))]

use owo_colors::OwoColorize;
use std::error::Error;
use std::path::Path;
use waveedit::config::Config;
use waveedit::editor::RenderFrame;

pub struct ShowOptions {
    pub width: usize,
    pub height: usize,
    /// Zoom steps about the playhead; positive zooms in
    pub zoom: i32,
    pub scroll: Option<i64>,
    pub selection: Option<(usize, usize)>,
    pub json: bool,
}

pub fn handle_show(path: &Path, options: &ShowOptions, config: &Config) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "wav")]
    {
        show_file(path, options, config)
    }

    #[cfg(not(feature = "wav"))]
    {
        let _ = (path, options, config);
        super::print_wav_feature_hint();
        Ok(())
    }
}

#[cfg(feature = "wav")]
fn show_file(path: &Path, options: &ShowOptions, config: &Config) -> Result<(), Box<dyn Error>> {
    use serde::Serialize;
    use waveedit::utils::timecode::format_timecode;

    #[derive(Serialize)]
    struct ShowReport<'a> {
        file: String,
        sample_rate: u32,
        samples: usize,
        duration: String,
        selection: Option<(usize, usize)>,
        frame: RenderFrame<'a>,
    }

    let (mut editor, info) = super::open_session(path, options.width, config)?;
    if let Some((start, end)) = options.selection {
        editor.set_selection(start, end);
    }
    for _ in 0..options.zoom.unsigned_abs() {
        if options.zoom > 0 {
            editor.zoom_in();
        } else {
            editor.zoom_out();
        }
    }
    if let Some(scroll) = options.scroll {
        editor.scroll_to(scroll);
    }

    let rate = info.sample_rate;
    let samples = editor.len();
    let selection = editor.selection().bounds();
    let frame = editor.render_frame();

    if options.json {
        let report = ShowReport {
            file: path.display().to_string(),
            sample_rate: rate,
            samples,
            duration: format_timecode(samples, rate),
            selection,
            frame,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "♪".cyan(),
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
            .bold()
    );
    println!(
        "  {} samples @ {} Hz ({})  zoom {}  {:.1} samples/px  scroll {}",
        samples,
        rate,
        format_timecode(samples, rate),
        frame.zoom_label,
        frame.samples_per_pixel,
        frame.scroll_offset
    );
    if let Some((start, end)) = selection {
        if start == end {
            println!("  cursor {}", format_timecode(start, rate).yellow());
        } else {
            println!(
                "  selection {} - {}",
                format_timecode(start, rate).cyan(),
                format_timecode(end, rate).cyan()
            );
        }
    }
    println!();
    for row in waveform_rows(&frame, options.height, true) {
        println!("{row}");
    }
    println!("{}", marker_row(&frame, true));
    println!("{}", overview_line(frame.peaks).dimmed());

    Ok(())
}

fn selected(frame: &RenderFrame, x: usize) -> bool {
    frame
        .selection_pixels
        .is_some_and(|(start, end)| (start..end).contains(&(x as i64)))
}

/// Waveform bars, one string per row, top row first
pub fn waveform_rows(frame: &RenderFrame, height: usize, colorize: bool) -> Vec<String> {
    let mid = height / 2;
    (0..height)
        .map(|row| {
            let mut line = String::new();
            for x in 0..frame.peaks.len() {
                let half = frame.bar_half_height(x, height);
                let filled = if row < mid {
                    mid - row <= half
                } else {
                    row - mid < half
                };
                let glyph = if filled { "█" } else { " " };
                if colorize && filled && selected(frame, x) {
                    line.push_str(&glyph.cyan().to_string());
                } else {
                    line.push_str(glyph);
                }
            }
            line
        })
        .collect()
}

/// Marker row: `▲` at the playhead, `─` under the selection
pub fn marker_row(frame: &RenderFrame, colorize: bool) -> String {
    let mut line = String::new();
    for x in 0..frame.peaks.len() {
        if frame.playhead_pixel == x as i64 {
            if colorize {
                line.push_str(&"▲".yellow().to_string());
            } else {
                line.push('▲');
            }
        } else if selected(frame, x) {
            if colorize {
                line.push_str(&"─".cyan().to_string());
            } else {
                line.push('─');
            }
        } else {
            line.push(' ');
        }
    }
    line
}

/// One glyph per column, height proportional to the peak
pub fn overview_line(peaks: &[f32]) -> String {
    peaks.iter().map(|&p| amplitude_to_blocks(p)).collect()
}

/// Convert amplitude to Unicode block characters for visualization
pub fn amplitude_to_blocks(amplitude: f32) -> &'static str {
    let normalized = amplitude.abs().min(1.0);
    let index = (normalized * 8.0) as usize;

    match index {
        0 => " ",
        1 => "▁",
        2 => "▂",
        3 => "▃",
        4 => "▄",
        5 => "▅",
        6 => "▆",
        7 => "▇",
        _ => "█",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waveedit::editor::{EditorSettings, WaveformEditor};

    fn editor_with(samples: Vec<f32>, width: usize) -> WaveformEditor {
        let mut editor = WaveformEditor::new(EditorSettings::default(), width).unwrap();
        editor.load(samples);
        editor
    }

    #[test]
    fn test_amplitude_to_blocks() {
        assert_eq!(amplitude_to_blocks(0.0), " ");
        assert_eq!(amplitude_to_blocks(0.5), "▄");
        assert_eq!(amplitude_to_blocks(-1.0), "█");
        assert_eq!(amplitude_to_blocks(3.0), "█");
    }

    #[test]
    fn test_waveform_rows_mirror_about_centre() {
        let mut editor = editor_with(vec![1.0, 0.5, 0.0, 0.01], 4);
        let frame = editor.render_frame();
        let rows = waveform_rows(&frame, 4, false);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], "█   ");
        assert_eq!(rows[1], "██ █");
        assert_eq!(rows[2], "██ █");
        assert_eq!(rows[3], "█   ");
    }

    #[test]
    fn test_marker_row() {
        let mut editor = editor_with(vec![0.3; 100], 10);
        editor.set_selection(20, 60);
        let frame = editor.render_frame();

        assert_eq!(marker_row(&frame, false), "  ▲───    ");
    }

    #[test]
    fn test_overview_line_width() {
        let mut editor = editor_with(vec![0.5; 1_000], 20);
        let frame = editor.render_frame();
        assert_eq!(overview_line(frame.peaks).chars().count(), 20);
    }
}
