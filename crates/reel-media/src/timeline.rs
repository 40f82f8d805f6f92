//! Timeline assembly: concatenation, music mixing, final render.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use reel_models::EncodingConfig;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::compose::loops_needed;
use crate::error::{MediaError, MediaResult};
use crate::probe::media_duration;

/// Background music amplitude relative to the narration track.
pub const MUSIC_GAIN: f64 = 0.18;

/// Filter complex mixing looped music under the narration.
///
/// The narration stays unattenuated; `normalize=0` keeps amix from scaling
/// the inputs down, so the music can never exceed the narration peak.
fn music_mix_filter(gain: f64) -> String {
    format!(
        "[1:a]volume={gain}[bg];[0:a][bg]amix=inputs=2:duration=first:dropout_transition=0:normalize=0[aout]",
        gain = gain
    )
}

/// Write the concat demuxer list for the scene composites.
fn concat_list(scenes: &[PathBuf]) -> String {
    let mut list = String::new();
    for path in scenes {
        // Single quotes inside paths must be closed, escaped, reopened
        let escaped = path.to_string_lossy().replace('\'', "'\\''");
        list.push_str(&format!("file '{}'\n", escaped));
    }
    list
}

/// Concatenate scene composites and render the final video.
///
/// Scene clips share one encoding, so the concat itself is a stream copy;
/// the final pass re-encodes once with the output settings. If `music` is
/// present it is looped to cover the timeline, trimmed to the exact total
/// duration and mixed at [`MUSIC_GAIN`]; if not, the narration-only mix is
/// kept.
pub async fn assemble_timeline(
    runner: &FfmpegRunner,
    encoding: &EncodingConfig,
    scenes: &[PathBuf],
    music: Option<&Path>,
    workdir: &Path,
    output: &Path,
) -> MediaResult<()> {
    if scenes.is_empty() {
        return Err(MediaError::InvalidMedia(
            "No scene composites to assemble".to_string(),
        ));
    }

    // Stream-copy concat of the per-scene composites
    let list_path = workdir.join("timeline.txt");
    tokio::fs::write(&list_path, concat_list(scenes)).await?;

    let joined = workdir.join("timeline.mp4");
    let concat_cmd = FfmpegCommand::new(&joined)
        .input_with_args(&list_path, ["-f", "concat", "-safe", "0"])
        .output_args(["-c", "copy"]);
    runner.run(&concat_cmd).await?;

    let total = media_duration(&joined).await?;
    debug!("Timeline duration: {:.2}s over {} scenes", total, scenes.len());

    let final_cmd = match music {
        Some(music) => {
            let music_len = media_duration(music).await?;
            let loops = loops_needed(total, music_len);
            info!(
                "Mixing background music {} at {:.0}% volume",
                music.display(),
                MUSIC_GAIN * 100.0
            );

            let mut cmd = FfmpegCommand::new(output).input(&joined);
            cmd = if loops > 1 {
                cmd.input_with_args(
                    music,
                    ["-stream_loop".to_string(), (loops - 1).to_string()],
                )
            } else {
                cmd.input(music)
            };
            cmd.filter_complex(music_mix_filter(MUSIC_GAIN))
                .map("0:v")
                .map("[aout]")
                .duration(total)
        }
        None => {
            info!("No background music resolved, keeping narration-only mix");
            FfmpegCommand::new(output).input(&joined)
        }
    };

    let final_cmd = final_cmd
        .video_codec(&encoding.codec)
        .preset(&encoding.preset)
        .video_bitrate(&encoding.video_bitrate)
        .fps(encoding.fps)
        .pix_fmt(&encoding.pix_fmt)
        .audio_codec(&encoding.audio_codec);

    runner.run(&final_cmd).await
}
