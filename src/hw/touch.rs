//! Touchscreen input via evdev.
//!
//! Picks the first input device that reports absolute X/Y axes plus
//! `BTN_TOUCH`, switches it to non-blocking reads, and converts its events
//! into normalized down/up pairs for the swipe recognizer. A kiosk without
//! a touchscreen simply runs knob-only.

use std::os::unix::io::AsRawFd;

use evdev::{AbsoluteAxisType, Device, InputEventKind, Key};
use heapless::Vec;
use log::{debug, info, warn};

use knobkiosk::input::TouchEvent;

/// Touch events one tick can buffer.
pub const MAX_TOUCH_EVENTS_PER_TICK: usize = 8;

pub struct TouchInput {
    device: Device,
    x_min: f32,
    x_range: f32,
    y_min: f32,
    y_range: f32,
    // Latest absolute position; BTN_TOUCH transitions snapshot it.
    cur_x: f32,
    cur_y: f32,
}

impl TouchInput {
    /// Scan `/dev/input` for a touchscreen. `None` when there is none.
    pub fn open_first() -> Option<Self> {
        for (path, device) in evdev::enumerate() {
            if !is_touchscreen(&device) {
                continue;
            }
            match Self::from_device(device) {
                Ok(touch) => {
                    info!("touchscreen: {}", path.display());
                    return Some(touch);
                }
                Err(e) => warn!("skipping touch device {}: {e}", path.display()),
            }
        }
        warn!("no touchscreen found; running knob-only");
        None
    }

    fn from_device(device: Device) -> std::io::Result<Self> {
        // Non-blocking reads: a quiet touchscreen must not stall the loop.
        let fd = device.as_raw_fd();
        unsafe {
            let flags = libc::fcntl(fd, libc::F_GETFL);
            libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK);
        }

        let abs = device.get_abs_state()?;
        let x = abs[AbsoluteAxisType::ABS_X.0 as usize];
        let y = abs[AbsoluteAxisType::ABS_Y.0 as usize];

        Ok(Self {
            device,
            x_min: x.minimum as f32,
            x_range: (x.maximum - x.minimum).max(1) as f32,
            y_min: y.minimum as f32,
            y_range: (y.maximum - y.minimum).max(1) as f32,
            cur_x: 0.0,
            cur_y: 0.0,
        })
    }

    /// Drain pending events into `out`, normalized to `[0, 1]`. Events past
    /// the per-tick bound wait for the next tick in the kernel queue.
    pub fn poll(&mut self, out: &mut Vec<TouchEvent, MAX_TOUCH_EVENTS_PER_TICK>) {
        let events = match self.device.fetch_events() {
            Ok(events) => events,
            Err(e) if e.raw_os_error() == Some(libc::EAGAIN) => return,
            Err(e) => {
                debug!("touch read failed: {e}");
                return;
            }
        };

        for event in events {
            match event.kind() {
                InputEventKind::AbsAxis(AbsoluteAxisType::ABS_X) => {
                    self.cur_x = (event.value() as f32 - self.x_min) / self.x_range;
                }
                InputEventKind::AbsAxis(AbsoluteAxisType::ABS_Y) => {
                    self.cur_y = (event.value() as f32 - self.y_min) / self.y_range;
                }
                InputEventKind::Key(Key::BTN_TOUCH) => {
                    let touch = if event.value() != 0 {
                        TouchEvent::Down {
                            x: self.cur_x,
                            y: self.cur_y,
                        }
                    } else {
                        TouchEvent::Up {
                            x: self.cur_x,
                            y: self.cur_y,
                        }
                    };
                    if out.push(touch).is_err() {
                        return;
                    }
                }
                _ => {}
            }
        }
    }
}

fn is_touchscreen(device: &Device) -> bool {
    let has_axes = device
        .supported_absolute_axes()
        .map_or(false, |axes| {
            axes.contains(AbsoluteAxisType::ABS_X) && axes.contains(AbsoluteAxisType::ABS_Y)
        });
    let has_touch = device
        .supported_keys()
        .map_or(false, |keys| keys.contains(Key::BTN_TOUCH));
    has_axes && has_touch
}
