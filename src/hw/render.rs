//! Framebuffer renderer.
//!
//! Serves logical render requests against `/dev/fb0`: resolves the request
//! to an image file under the screens directory, decodes and aspect-fit
//! scales it (Lanczos3), centers it on black, and crossfades it in.
//!
//! The crossfade is advanced one alpha step per [`FbRenderer::step`] call,
//! paced to the configured frame rate, so the poll loop keeps sampling
//! inputs between steps and a newer request simply replaces the transition
//! target mid-fade. Failures (missing directory, empty category, decode
//! error) are logged no-ops - the last successfully rendered frame persists.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use framebuffer::Framebuffer;
use image::imageops::FilterType;
use image::RgbImage;
use log::{debug, warn};

use knobkiosk::config::{CROSSFADE_ALPHA_STEP, CROSSFADE_FPS};
use knobkiosk::dispatch::{RenderRequest, Renderer};
use knobkiosk::error::Error;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

struct Transition {
    request: RenderRequest,
    /// Fullscreen composited target (image centered on black).
    target: RgbImage,
    /// Current opacity, 0-255. Monotonically increasing.
    alpha: u16,
}

pub struct FbRenderer {
    fb: Framebuffer,
    width: u32,
    height: u32,
    line_length: u32,
    bytes_per_pixel: u32,
    screens_directory: PathBuf,
    /// Category index to on-disk folder name (the LED pin number).
    led_pins: Vec<u32>,
    /// Request whose frame is currently fully displayed.
    shown: Option<RenderRequest>,
    transition: Option<Transition>,
    last_step: Instant,
    frame_interval: Duration,
}

impl FbRenderer {
    pub fn new(device: &str, screens_directory: &Path, led_pins: &[u32]) -> Result<Self> {
        let fb = Framebuffer::new(device)
            .map_err(|e| anyhow::anyhow!("{e:?}"))
            .with_context(|| format!("opening framebuffer {device}"))?;

        let width = fb.var_screen_info.xres;
        let height = fb.var_screen_info.yres;
        let bits = fb.var_screen_info.bits_per_pixel;
        anyhow::ensure!(
            bits == 16 || bits == 32,
            "unsupported framebuffer depth: {bits} bpp"
        );

        Ok(Self {
            width,
            height,
            line_length: fb.fix_screen_info.line_length,
            bytes_per_pixel: bits / 8,
            fb,
            screens_directory: screens_directory.to_path_buf(),
            led_pins: led_pins.to_vec(),
            shown: None,
            transition: None,
            last_step: Instant::now(),
            frame_interval: Duration::from_secs(1) / CROSSFADE_FPS,
        })
    }

    pub fn screen_width(&self) -> u32 {
        self.width
    }

    /// Advance a transition in progress by at most one alpha step. Call once
    /// per poll loop iteration; returns immediately when there is nothing to
    /// do or the frame interval has not elapsed yet.
    pub fn step(&mut self) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        if self.last_step.elapsed() < self.frame_interval {
            return;
        }
        self.last_step = Instant::now();

        transition.alpha = (transition.alpha + u16::from(CROSSFADE_ALPHA_STEP)).min(255);
        let alpha = transition.alpha;

        let frame = pack_frame(
            &transition.target,
            alpha as u32,
            self.width,
            self.height,
            self.line_length,
            self.bytes_per_pixel,
        );
        self.fb.write_frame(&frame);

        if alpha >= 255 {
            let finished = self.transition.take();
            self.shown = finished.map(|t| t.request);
        }
    }

    fn resolve(&self, request: RenderRequest) -> Result<PathBuf, Error> {
        match request {
            RenderRequest::ShowIdle => first_image(&self.screens_directory.join("idle")),
            RenderRequest::ShowImage { category, index } => {
                let pin = *self.led_pins.get(category).ok_or(Error::Render)?;
                let dir = self.screens_directory.join(pin.to_string());
                let files = list_images(&dir);
                if files.is_empty() {
                    warn!("no images in {}", dir.display());
                    return Err(Error::Render);
                }
                // The stored offset is unbounded and signed; the live file
                // count is only known here.
                let wrapped = index.rem_euclid(files.len() as i32) as usize;
                Ok(files[wrapped].clone())
            }
        }
    }

    fn load_target(&self, path: &Path) -> Result<RgbImage, Error> {
        let decoded = image::open(path).map_err(|e| {
            warn!("decoding {} failed: {e}", path.display());
            Error::Render
        })?;

        // Aspect-preserving fit, centered on black.
        let scaled = decoded
            .resize(self.width, self.height, FilterType::Lanczos3)
            .to_rgb8();
        let mut canvas = RgbImage::new(self.width, self.height);
        let x = (self.width - scaled.width()) / 2;
        let y = (self.height - scaled.height()) / 2;
        image::imageops::overlay(&mut canvas, &scaled, i64::from(x), i64::from(y));
        Ok(canvas)
    }
}

impl Renderer for FbRenderer {
    fn show(&mut self, request: RenderRequest) {
        // Idempotent re-requests (idle re-render every tick) cost a compare.
        if self.shown == Some(request) && self.transition.is_none() {
            return;
        }
        if let Some(t) = &self.transition {
            if t.request == request {
                return;
            }
        }

        // Either failure leaves the previous frame on screen.
        let Ok(path) = self.resolve(request) else {
            return;
        };
        let Ok(target) = self.load_target(&path) else {
            return;
        };

        debug!("fading in {}", path.display());
        // A newer request interrupts any fade in progress.
        self.transition = Some(Transition {
            request,
            target,
            alpha: 0,
        });
    }
}

/// Files with a known image extension, in directory listing order.
fn list_images(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("listing {} failed: {e}", dir.display());
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| {
                    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                })
        })
        .collect()
}

fn first_image(dir: &Path) -> Result<PathBuf, Error> {
    let files = list_images(dir);
    if files.is_empty() {
        warn!("no idle image in {}", dir.display());
        return Err(Error::Render);
    }
    Ok(files[0].clone())
}

/// Pack the target scaled by `alpha / 255` into the framebuffer's pixel
/// format (RGB565 or 32-bit XRGB).
fn pack_frame(
    target: &RgbImage,
    alpha: u32,
    width: u32,
    height: u32,
    line_length: u32,
    bytes_per_pixel: u32,
) -> Vec<u8> {
    let mut frame = vec![0u8; (line_length * height) as usize];

    for y in 0..height {
        for x in 0..width {
            let pixel = target.get_pixel(x, y);
            let r = u32::from(pixel[0]) * alpha / 255;
            let g = u32::from(pixel[1]) * alpha / 255;
            let b = u32::from(pixel[2]) * alpha / 255;

            let offset = (y * line_length + x * bytes_per_pixel) as usize;
            match bytes_per_pixel {
                2 => {
                    let rgb565 =
                        (((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3)) as u16;
                    frame[offset..offset + 2].copy_from_slice(&rgb565.to_le_bytes());
                }
                _ => {
                    frame[offset] = b as u8;
                    frame[offset + 1] = g as u8;
                    frame[offset + 2] = r as u8;
                }
            }
        }
    }
    frame
}
