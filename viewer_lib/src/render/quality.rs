use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

use nalgebra::{vector, Vector2};

/// Frame pacing constants, per render target
#[derive(Debug, Clone, Copy)]
pub struct QualityConfig {
    /// Frame rate the controller aims for
    pub target_fps: f32,
    /// Idle time before pausing
    pub debounce: Duration,
    /// Resolution floor as a fraction of the maximum
    pub min_resolution_fraction: f32,
    /// Frames averaged for the smoothed fps
    pub window_size: usize,
    /// Clamp on the per-frame shrink factor
    pub shrink_clamp: (f32, f32),
}

impl Default for QualityConfig {
    fn default() -> Self {
        QualityConfig {
            target_fps: 30.0,
            debounce: Duration::from_millis(750),
            min_resolution_fraction: 0.2,
            window_size: 5,
            shrink_clamp: (0.8, 1.0),
        }
    }
}

/// Reactive resolution/pause controller for one render target.
///
/// Trades a short resolution dip for responsiveness: resolution only
/// shrinks under load, and grows back by rendering one crisp frame at
/// maximum resolution when input goes idle, then skipping frames
/// entirely until something changes again.
pub struct AdaptiveQuality {
    max_resolution: Vector2<u32>,
    resolution: Vector2<u32>,
    /// Restored when leaving the paused state
    pre_pause_resolution: Vector2<u32>,
    fps_window: VecDeque<f32>,
    last_frame: Option<Instant>,
    since_change: Duration,
    paused: bool,
    config: QualityConfig,
}

impl std::fmt::Debug for AdaptiveQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdaptiveQuality")
            .field("resolution", &self.resolution)
            .field("paused", &self.paused)
            .finish()
    }
}

impl AdaptiveQuality {
    pub fn new(max_resolution: Vector2<u32>) -> AdaptiveQuality {
        AdaptiveQuality::with_config(max_resolution, QualityConfig::default())
    }

    pub fn with_config(max_resolution: Vector2<u32>, config: QualityConfig) -> AdaptiveQuality {
        AdaptiveQuality {
            max_resolution,
            resolution: max_resolution,
            pre_pause_resolution: max_resolution,
            fps_window: VecDeque::with_capacity(config.window_size + 1),
            last_frame: None,
            since_change: Duration::ZERO,
            paused: false,
            config,
        }
    }

    /// Current render-target resolution decided by the controller
    pub fn resolution(&self) -> Vector2<u32> {
        self.resolution
    }

    pub fn max_resolution(&self) -> Vector2<u32> {
        self.max_resolution
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reset for a new maximum (window resize policy)
    pub fn set_max_resolution(&mut self, max_resolution: Vector2<u32>) {
        self.max_resolution = max_resolution;
        self.resolution = max_resolution;
        self.pre_pause_resolution = max_resolution;
        self.fps_window.clear();
        self.last_frame = None;
        self.since_change = Duration::ZERO;
        self.paused = false;
    }

    /// Per-frame render decision, measuring wall time since the
    /// previous call. The flags must be drained exactly once per
    /// frame by the caller and passed in here.
    pub fn should_render_frame(&mut self, camera_updated: bool, settings_updated: bool) -> bool {
        let now = Instant::now();
        let dt = match self.last_frame {
            Some(prev) => now - prev,
            None => {
                // first call establishes the time baseline
                self.last_frame = Some(now);
                return true;
            }
        };
        self.last_frame = Some(now);
        self.step(dt, camera_updated, settings_updated)
    }

    /// The decision core, fed one measured frame duration.
    /// Separated from [`should_render_frame`](Self::should_render_frame)
    /// so the policy can be driven with synthetic durations.
    pub fn step(&mut self, dt: Duration, camera_updated: bool, settings_updated: bool) -> bool {
        let dt_ms = (dt.as_secs_f32() * 1000.0).max(1.0);
        let fps = 1000.0 / dt_ms;

        self.fps_window.push_back(fps);
        if self.fps_window.len() > self.config.window_size {
            self.fps_window.pop_front();
        }
        let avg_fps = self.fps_window.iter().sum::<f32>() / self.fps_window.len() as f32;

        let changed = camera_updated || settings_updated;
        if changed {
            self.since_change = Duration::ZERO;
        } else {
            self.since_change += dt;
        }

        if self.paused {
            if changed {
                self.paused = false;
                self.resolution = self.pre_pause_resolution;
                return true;
            }
            return false;
        }

        if !changed && self.since_change > self.config.debounce {
            // going idle: one last frame at full resolution, then skip
            self.paused = true;
            self.pre_pause_resolution = self.resolution;
            self.resolution = self.max_resolution;
            log::debug!("render target paused at {:?}", self.resolution);
            return true;
        }

        if avg_fps < self.config.target_fps {
            let factor = (fps / self.config.target_fps * 10.0).round() / 10.0;
            let (lo, hi) = self.config.shrink_clamp;
            let factor = factor.clamp(lo, hi);
            if factor < 1.0 {
                self.resolution = self.shrunk(factor);
            }
        }

        true
    }

    fn shrunk(&self, factor: f32) -> Vector2<u32> {
        let floor = self
            .max_resolution
            .map(|v| (v as f32 * self.config.min_resolution_fraction).round() as u32);
        let w = ((self.resolution.x as f32 * factor).round() as u32).max(floor.x);
        let h = ((self.resolution.y as f32 * factor).round() as u32).max(floor.y);
        vector![w, h]
    }
}
