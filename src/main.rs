use clap::Parser;
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use chip8vm::config::{Config, DEFAULT_FRAME_RATE, DEFAULT_KEY_HOLD_FRAMES, DEFAULT_STEPS_PER_FRAME};
use chip8vm::display::MonoTermDisplay;
use chip8vm::environment::Environment;
use chip8vm::input::TermInput;
use chip8vm::sound::{Mute, SimpleBeep, Sound};

/// Run a CHIP-8 program in the terminal.
///
/// Keys: 1234/QWER/ASDF/ZXCV are the keypad, space pauses, F11 saves a
/// screenshot, escape quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// program image to load at 0x200
    rom: PathBuf,

    #[arg(short, long, default_value_t = DEFAULT_STEPS_PER_FRAME, help = "Instructions per frame")]
    steps: u32,

    #[arg(short, long, default_value_t = DEFAULT_FRAME_RATE, help = "Frames (and timer ticks) per second")]
    frame_rate: f64,

    #[arg(long, help = "Seed for the random number generator")]
    seed: Option<u64>,

    #[arg(long, help = "Sound the PC speaker while the sound timer runs")]
    beep: bool,

    #[arg(long, default_value_t = DEFAULT_KEY_HOLD_FRAMES, help = "Frames a key stays down after a press")]
    key_hold: u32,

    #[arg(long, default_value = ".", help = "Directory for F11 screenshots")]
    screenshot_dir: PathBuf,

    #[arg(long, default_value_t = log::LevelFilter::Warn, help = "Log level, written to stderr")]
    log_level: log::LevelFilter,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            rom_path: self.rom.clone(),
            steps_per_frame: self.steps,
            frame_rate: self.frame_rate,
            seed: self.seed,
            beep: self.beep,
            key_hold_frames: self.key_hold,
            screenshot_dir: self.screenshot_dir.clone(),
        }
    }
}

fn run<S: Sound>(config: &Config, sound: S) -> Result<(), Box<dyn Error>> {
    // open the program before touching the terminal, so a missing file reports cleanly
    let mut f = File::open(&config.rom_path)?;
    let display = MonoTermDisplay::new()?;
    let input = TermInput::new(config.key_hold_frames)?;
    let mut environment = Environment::new(config, display, input, sound);
    environment.load_program(&mut f)?;
    environment.run()
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    simple_logger::SimpleLogger::new().with_level(args.log_level).init()?;

    let config = args.config();
    config.validate()?;
    log::info!("loading {}", config.rom_path.display());

    if config.beep {
        run(&config, SimpleBeep::new())?;
    } else {
        run(&config, Mute::new())?;
    }

    // shove a newline on stdout to stop the cli messing up the last frame
    println!();
    Ok(())
}
