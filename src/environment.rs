//! # environment
//!
//! Sets everything up and runs the main loop. Each frame:
//!  1. poll input into the interpreter's keypad
//!  2. run a fixed number of instructions
//!  3. hand the framebuffer to the display if it changed
//!  4. tick the timers once, and start/stop the tone to match
//!  5. sleep off whatever is left of the frame
//!
//! The tone never outlives the sound timer: a program that zeroes it early,
//! pausing, quitting and faulting all silence the sink.
//!
//! The interpreter only ever sees the keypad between frames, never while it
//! is part-way through a batch of instructions.
use crate::config::Config;
use crate::display::Display;
use crate::error::Chip8Error;
use crate::input::{Control, Input};
use crate::interpreter::{Chip8Interpreter, ToneEvent};
use crate::sound::Sound;
use spin_sleep::LoopHelper;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct Environment<D: Display, I: Input, S: Sound> {
    interpreter: Chip8Interpreter,
    display: D,
    input: I,
    sound: S,
    steps_per_frame: u32,
    frame_rate: f64,
    screenshot_dir: PathBuf,
    paused: bool,
    frames: u64,
}

impl<D: Display, I: Input, S: Sound> Environment<D, I, S> {
    pub fn new(config: &Config, display: D, input: I, sound: S) -> Self {
        let interpreter = match config.seed {
            Some(seed) => Chip8Interpreter::with_seed(seed),
            None => Chip8Interpreter::new(),
        };
        Environment {
            interpreter,
            display,
            input,
            sound,
            steps_per_frame: config.steps_per_frame,
            frame_rate: config.frame_rate,
            screenshot_dir: config.screenshot_dir.clone(),
            paused: false,
            frames: 0,
        }
    }

    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<(), Chip8Error> {
        self.interpreter.load_program(reader)
    }

    /// run at the configured frame rate until the user quits or the program
    /// faults
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let mut loop_helper = LoopHelper::builder().build_with_target_rate(self.frame_rate);
        log::info!(
            "running at {} frames/s, {} instructions a frame",
            self.frame_rate,
            self.steps_per_frame
        );
        let result = loop {
            loop_helper.loop_start();
            match self.run_frame() {
                Ok(Control::Quit) => break Ok(()),
                Ok(_) => {}
                Err(e) => break Err(e),
            }
            loop_helper.loop_sleep();
        };
        self.silence()?;
        log::info!("stopped after {} frames", self.frames);
        result
    }

    /// run up to `frames` frames as fast as possible; stops early on quit
    pub fn run_frames(&mut self, frames: u64) -> Result<Control, Box<dyn Error>> {
        for _ in 0..frames {
            if self.run_frame()? == Control::Quit {
                return Ok(Control::Quit);
            }
        }
        Ok(Control::Continue)
    }

    /// one display frame's worth of work
    pub fn run_frame(&mut self) -> Result<Control, Box<dyn Error>> {
        let control = self.input.poll(self.interpreter.keypad_mut())?;
        match control {
            Control::Quit => return Ok(control),
            Control::TogglePause => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "paused" } else { "resumed" });
                if self.paused {
                    self.silence()?;
                }
                self.display.set_paused(self.paused);
                // redraw so the new title shows up straight away
                self.display.draw(self.interpreter.framebuffer())?;
            }
            Control::Screenshot => {
                if let Err(e) = self.screenshot() {
                    log::warn!("couldn't save screenshot: {}", e);
                }
            }
            Control::Continue => {}
        }

        if !self.paused {
            for _ in 0..self.steps_per_frame {
                if let Err(e) = self.interpreter.step() {
                    log::error!("halting: {}", e);
                    self.silence()?;
                    return Err(e.into());
                }
            }
            // FX18 with 0 cuts a tone short
            if !self.interpreter.sound_active() {
                self.silence()?;
            }
        }

        if self.interpreter.needs_redraw() {
            self.display.draw(self.interpreter.framebuffer())?;
            self.interpreter.clear_redraw();
        }

        // pausing freezes the timers as well as the cpu
        if !self.paused {
            if self.interpreter.sound_active() && !self.sound.is_beeping() {
                self.sound.beep()?;
            }
            if let Some(ToneEvent::Stop) = self.interpreter.advance_timers() {
                self.sound.stop()?;
            }
        }

        self.frames += 1;
        Ok(control)
    }

    fn silence(&mut self) -> Result<(), Box<dyn Error>> {
        if self.sound.is_beeping() {
            self.sound.stop()?;
        }
        Ok(())
    }

    /// write the current frame to `screenshot-<unix seconds>.png` in the
    /// screenshot directory; a second one in the same second overwrites it
    pub fn screenshot(&self) -> Result<PathBuf, Box<dyn Error>> {
        let secs = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let path = self.screenshot_dir.join(format!("screenshot-{}.png", secs));
        let mut f = BufWriter::new(File::create(&path)?);
        self.interpreter.framebuffer().write_png(&mut f)?;
        f.flush()?;
        log::info!("saved {}", path.display());
        Ok(path)
    }

    pub fn interpreter(&self) -> &Chip8Interpreter {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Chip8Interpreter {
        &mut self.interpreter
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
