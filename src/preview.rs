use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use image::DynamicImage;
use log::{info, warn};
use minifb::{Key, Window, WindowOptions};

use crate::error::PreviewError;

pub const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(200);
const WINDOW_NAME: &str = "bom";
// How often the window is repainted and polled for input while a frame is held.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PreviewSummary {
    pub shown: usize,
    pub skipped: usize,
    /// The viewer was closed (or ESC pressed) before the last frame.
    pub stopped: bool,
}

/// Somewhere decoded frames can be shown.
pub trait FrameDisplay {
    /// Shows `frame` and holds it on screen for `delay`. Returns `false` once
    /// the viewer wants playback to stop.
    fn show(
        &mut self,
        name: &str,
        frame: &DynamicImage,
        delay: Duration,
    ) -> Result<bool, PreviewError>;
}

/// A native window sized to the current frame. ESC or closing the window
/// stops playback.
#[derive(Default)]
pub struct WindowDisplay {
    window: Option<Window>,
    size: (usize, usize),
    buffer: Vec<u32>,
}

impl FrameDisplay for WindowDisplay {
    fn show(
        &mut self,
        name: &str,
        frame: &DynamicImage,
        delay: Duration,
    ) -> Result<bool, PreviewError> {
        let rgba = frame.to_rgba8();
        let (width, height) = (rgba.width() as usize, rgba.height() as usize);
        // minifb wants 0RGB packed into a u32 per pixel.
        self.buffer.clear();
        self.buffer.extend(rgba.pixels().map(|pixel| {
            let [r, g, b, _] = pixel.0;
            (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        }));

        if self.window.is_none() || self.size != (width, height) {
            let window = Window::new(WINDOW_NAME, width, height, WindowOptions::default())
                .map_err(PreviewError::Window)?;
            self.window = Some(window);
            self.size = (width, height);
        }
        let Some(window) = self.window.as_mut() else {
            return Ok(false);
        };
        window.set_title(&format!("{WINDOW_NAME} - {name}"));

        let deadline = Instant::now() + delay;
        loop {
            window
                .update_with_buffer(&self.buffer, width, height)
                .map_err(PreviewError::Window)?;
            if !window.is_open() || window.is_key_down(Key::Escape) {
                return Ok(false);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(true);
            }
            std::thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}

/// `*.png` files directly inside `dir`, sorted by name. Radar frame names
/// embed their timestamp, so this is also playback order.
pub fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, PreviewError> {
    let read_dir_err = |source| PreviewError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut frames = vec![];
    for entry in std::fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "png") {
            frames.push(path);
        }
    }
    frames.sort();
    Ok(frames)
}

/// Plays the frames in `dir` on `display` as a slideshow, one every
/// `frame_delay`. Files that fail to decode are skipped. Blocks the calling
/// thread for the whole slideshow.
pub fn preview_frames<D: FrameDisplay>(
    dir: &Path,
    frame_delay: Duration,
    display: &mut D,
) -> Result<PreviewSummary, PreviewError> {
    let frames = list_frames(dir)?;
    let mut summary = PreviewSummary::default();
    if frames.is_empty() {
        println!("No PNG files found to preview.");
        return Ok(summary);
    }

    for (index, frame_path) in frames.iter().enumerate() {
        let name = frame_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let frame = match image::open(frame_path) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Could not decode {name}: {e}");
                println!("Skipping unreadable file: {name}");
                summary.skipped += 1;
                continue;
            }
        };

        info!(
            "[{}/{}] {} ({}x{})",
            index + 1,
            frames.len(),
            name,
            frame.width(),
            frame.height()
        );
        summary.shown += 1;
        if !display.show(&name, &frame, frame_delay)? {
            summary.stopped = true;
            break;
        }
    }

    Ok(summary)
}
