use std::path::PathBuf;

pub const DEFAULT_STEPS_PER_FRAME: u32 = 9;
pub const DEFAULT_FRAME_RATE: f64 = 60.0;
pub const DEFAULT_KEY_HOLD_FRAMES: u32 = 6;

/// Everything the environment needs to know to run a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rom_path: PathBuf,
    /// instructions run per displayed frame; 9 at 60Hz is roughly 540Hz
    pub steps_per_frame: u32,
    /// frames (and timer ticks) per second
    pub frame_rate: f64,
    /// fixes the random number sequence when set
    pub seed: Option<u64>,
    /// use the PC speaker rather than staying silent
    pub beep: bool,
    /// how long a terminal key press counts as held
    pub key_hold_frames: u32,
    /// where F11 screenshots are written
    pub screenshot_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("steps per frame must be at least 1")]
    NoSteps,

    #[error("frame rate must be positive, got {0}")]
    BadFrameRate(f64),
}

impl Config {
    pub fn new(rom_path: impl Into<PathBuf>) -> Self {
        Config {
            rom_path: rom_path.into(),
            ..Config::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steps_per_frame == 0 {
            return Err(ConfigError::NoSteps);
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(ConfigError::BadFrameRate(self.frame_rate));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rom_path: PathBuf::new(),
            steps_per_frame: DEFAULT_STEPS_PER_FRAME,
            frame_rate: DEFAULT_FRAME_RATE,
            seed: None,
            beep: false,
            key_hold_frames: DEFAULT_KEY_HOLD_FRAMES,
            screenshot_dir: PathBuf::from("."),
        }
    }
}
