pub mod config;
pub mod edit;
pub mod init;
pub mod show;

#[cfg(feature = "wav")]
use std::error::Error;
#[cfg(feature = "wav")]
use std::path::Path;
#[cfg(feature = "wav")]
use waveedit::{config::Config, editor::WaveformEditor, media::WavInfo};

/// Decode `path` into a fresh editing session `width` columns wide
#[cfg(feature = "wav")]
pub fn open_session(
    path: &Path,
    width: usize,
    config: &Config,
) -> Result<(WaveformEditor, WavInfo), Box<dyn Error>> {
    use waveedit::utils::{progress::busy_spinner, validation::validate_audio_file};

    validate_audio_file(path)?;

    let mut editor = WaveformEditor::new(config.editor.clone(), width)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let spinner = busy_spinner(&format!("Loading {name}..."));
    let result = waveedit::media::load_wav(path, &mut editor, |count| {
        spinner.set_message(format!("Loading {name}... {count} samples"));
    });
    spinner.finish_and_clear();
    let info = result?;

    Ok((editor, info))
}

#[cfg(not(feature = "wav"))]
pub fn print_wav_feature_hint() {
    use owo_colors::OwoColorize;
    println!(
        "{} Reading and writing audio files requires the 'wav' feature to be enabled.",
        "Note:".yellow()
    );
    println!();
    println!("To enable it, install with:");
    println!("  {}", "cargo install waveedit --features wav".cyan());
    println!();
    println!("Or if building from source:");
    println!("  {}", "cargo build --release --features wav".cyan());
}
