use std::error::Error;
use std::path::Path;
use waveedit::config::Config;

pub fn handle_trim(
    path: &Path,
    start: usize,
    end: usize,
    output: &Path,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "wav")]
    {
        use owo_colors::OwoColorize;
        use waveedit::utils::timecode::format_timecode;

        if start >= end {
            return Err(format!("Trim range is empty: {start}..{end}").into());
        }

        let (mut editor, info) = super::open_session(path, config.display_width, config)?;
        editor.set_selection(start, end);
        let outcome = editor.trim().ok_or_else(|| {
            format!(
                "Nothing to trim: {start}..{end} lies outside the {}-sample file",
                editor.len()
            )
        })?;

        save(&editor, output, info.sample_rate)?;

        let rate = info.sample_rate;
        println!(
            "{} Removed {} samples ({}) at {}",
            "✓".green(),
            outcome.removed.len(),
            format_timecode(outcome.removed.len(), rate),
            format_timecode(outcome.removed.start, rate)
        );
        println!(
            "  {} samples remain, written to {}",
            outcome.new_len,
            output.display().to_string().bold()
        );
        Ok(())
    }

    #[cfg(not(feature = "wav"))]
    {
        let _ = (path, start, end, output, config);
        super::print_wav_feature_hint();
        Ok(())
    }
}

pub fn handle_normalize(
    path: &Path,
    range: Option<(usize, usize)>,
    output: &Path,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "wav")]
    {
        use owo_colors::OwoColorize;

        let (mut editor, info) = super::open_session(path, config.display_width, config)?;
        if let Some((start, end)) = range {
            if start >= end {
                return Err(format!("Normalize range is empty: {start}..{end}").into());
            }
            editor.set_selection(start, end);
        }

        match editor.normalize() {
            Some(outcome) => {
                save(&editor, output, info.sample_rate)?;
                println!(
                    "{} Normalized {}..{}: peak {:.4}, gain {:+.2} dB",
                    "✓".green(),
                    outcome.range.start,
                    outcome.range.end,
                    outcome.peak,
                    outcome.gain_db()
                );
                println!("  Written to {}", output.display().to_string().bold());
            }
            None => {
                println!(
                    "{} Nothing to normalize (silent or already at full scale); no file written",
                    "Note:".yellow()
                );
            }
        }
        Ok(())
    }

    #[cfg(not(feature = "wav"))]
    {
        let _ = (path, range, output, config);
        super::print_wav_feature_hint();
        Ok(())
    }
}

#[cfg(feature = "wav")]
fn save(
    editor: &waveedit::editor::WaveformEditor,
    output: &Path,
    sample_rate: u32,
) -> Result<(), Box<dyn Error>> {
    use waveedit::utils::progress::busy_spinner;

    let spinner = busy_spinner(&format!("Writing {}...", output.display()));
    let result = waveedit::media::write_wav_pcm16(output, editor.samples(), sample_rate);
    spinner.finish_and_clear();
    result
}
