//! WAV decoding into an editing session, and 16-bit export.
//!
//! Decoding streams: frames are mixed down to mono and handed to the editor in
//! fixed-size chunks, so the waveform can be drawn while a long file is still
//! loading. If the buffer cannot grow, decoding stops and the editor keeps
//! everything delivered so far.

use crate::constants::DECODE_CHUNK_SAMPLES;
use crate::editor::{WaveformEditor, sample_to_pcm16};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info, warn};
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Format details of a decoded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    /// Mono samples delivered to the editor
    pub frames: usize,
}

/// Decode `path` into `editor`, replacing its contents.
///
/// `on_chunk` is called with the running sample count after each chunk.
pub fn load_wav<F>(
    path: &Path,
    editor: &mut WaveformEditor,
    mut on_chunk: F,
) -> Result<WavInfo, Box<dyn Error>>
where
    F: FnMut(usize),
{
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(format!("{} declares zero channels", path.display()).into());
    }
    debug!(
        "Decoding {}: {} Hz, {} channel(s), {}-bit {:?}",
        path.display(),
        spec.sample_rate,
        spec.channels,
        spec.bits_per_sample,
        spec.sample_format
    );

    editor.begin_load();
    let result = stream_frames(reader, spec, editor, &mut on_chunk);
    let frames = editor.finish_load();
    result?;

    info!("Loaded {} samples from {}", frames, path.display());
    Ok(WavInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        frames,
    })
}

fn stream_frames(
    mut reader: WavReader<BufReader<File>>,
    spec: WavSpec,
    editor: &mut WaveformEditor,
    on_chunk: &mut dyn FnMut(usize),
) -> Result<(), Box<dyn Error>> {
    editor.reserve(reader.duration() as usize)?;

    let channels = usize::from(spec.channels);
    let samples: Box<dyn Iterator<Item = Result<f32, hound::Error>> + '_> =
        match spec.sample_format {
            SampleFormat::Int => {
                let max_value = (1_i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                Box::new(reader.samples::<i32>().map(move |s| s.map(|s| s as f32 / max_value)))
            }
            SampleFormat::Float => Box::new(reader.samples::<f32>()),
        };

    let mut chunk = Vec::with_capacity(DECODE_CHUNK_SAMPLES);
    let mut frame_sum = 0.0_f32;
    let mut in_frame = 0;
    for sample in samples {
        frame_sum += sample?;
        in_frame += 1;
        if in_frame == channels {
            chunk.push(frame_sum / channels as f32);
            frame_sum = 0.0;
            in_frame = 0;
        }
        if chunk.len() == DECODE_CHUNK_SAMPLES {
            on_chunk(editor.append_samples(&chunk)?);
            chunk.clear();
        }
    }
    if in_frame != 0 {
        warn!("Dropping {in_frame} sample(s) of a trailing partial frame");
    }
    if !chunk.is_empty() {
        on_chunk(editor.append_samples(&chunk)?);
    }
    Ok(())
}

/// Write `samples` as a mono 16-bit PCM WAV file
pub fn write_wav_pcm16(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), Box<dyn Error>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample_to_pcm16(sample))?;
    }
    writer.finalize()?;
    info!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
