//! Per-scene composition: visual + subtitle overlay + narration audio.

use std::path::Path;

use tracing::debug;

use reel_models::{EncodingConfig, MediaAsset, OUTPUT_HEIGHT, OUTPUT_WIDTH};

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;
use crate::probe::probe_media;

/// Inputs for one scene composite.
#[derive(Debug)]
pub struct SceneComposition<'a> {
    /// The visual: one user-supplied image or video
    pub asset: &'a MediaAsset,
    /// Synthesized narration audio for this scene
    pub narration_audio: &'a Path,
    /// Target duration, equal to the narration duration
    pub duration: f64,
    /// ASS subtitle file for this scene
    pub subtitle_file: &'a Path,
    /// Output composite path
    pub output: &'a Path,
}

/// Repetitions needed so `reps * clip_duration >= target`.
pub fn loops_needed(target: f64, clip_duration: f64) -> u32 {
    if clip_duration <= 0.0 {
        return 1;
    }
    (target / clip_duration).ceil().max(1.0) as u32
}

/// Escape a path for use inside an FFmpeg filter argument.
fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', "\\:")
        .replace('\'', "\\'")
}

/// Scale to the output width, letterbox with black, burn in subtitles.
fn visual_filter(subtitle_file: &Path) -> String {
    format!(
        "scale={w}:-2,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:black,ass='{ass}'",
        w = OUTPUT_WIDTH,
        h = OUTPUT_HEIGHT,
        ass = escape_filter_path(subtitle_file),
    )
}

/// Build one scene composite.
///
/// The output is a fixed-resolution clip whose duration equals the
/// narration duration exactly. Images are held for the full duration;
/// videos are looped (ceil) and trimmed, or trimmed from the start when
/// longer. The asset's own audio, if any, is replaced by the narration.
pub async fn compose_scene(
    runner: &FfmpegRunner,
    encoding: &EncodingConfig,
    comp: &SceneComposition<'_>,
) -> MediaResult<()> {
    let cmd = if comp.asset.is_video() {
        let info = probe_media(&comp.asset.path).await?;
        let loops = loops_needed(comp.duration, info.duration);
        debug!(
            "Scene video {} ({:.2}s) x{} loops for {:.2}s target",
            comp.asset.path.display(),
            info.duration,
            loops,
            comp.duration
        );

        let mut cmd = FfmpegCommand::new(comp.output);
        cmd = if loops > 1 {
            // -stream_loop counts extra repetitions beyond the first
            cmd.input_with_args(
                &comp.asset.path,
                ["-stream_loop".to_string(), (loops - 1).to_string()],
            )
        } else {
            cmd.input(&comp.asset.path)
        };
        cmd.input(comp.narration_audio)
            .map("0:v")
            .map("1:a")
            .video_filter(visual_filter(comp.subtitle_file))
            .duration(comp.duration)
    } else {
        FfmpegCommand::new(comp.output)
            .input_with_args(
                &comp.asset.path,
                [
                    "-loop".to_string(),
                    "1".to_string(),
                    "-t".to_string(),
                    format!("{:.3}", comp.duration),
                ],
            )
            .input(comp.narration_audio)
            .map("0:v")
            .map("1:a")
            .video_filter(visual_filter(comp.subtitle_file))
            .duration(comp.duration)
    };

    let cmd = cmd
        .video_codec(&encoding.codec)
        .preset(&encoding.preset)
        .fps(encoding.fps)
        .pix_fmt(&encoding.pix_fmt)
        .audio_codec(&encoding.audio_codec);

    runner.run(&cmd).await
}
