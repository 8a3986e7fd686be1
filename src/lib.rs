//! # chip8vm
//!
//! ## Design
//!
//! * the interpreter is a pure state machine: `step()` runs one instruction,
//!   `advance_timers()` is one 60Hz tick, neither blocks nor does I/O
//! * faithful numeric behaviour: 8-bit wrapping arithmetic, VF flag rules,
//!   sprite XOR with collision detection
//! * abstract display so can plug alternatives; starting with TUI in-console
//! * CHIP-8 instructions run in batches of n per frame then sleep, to match
//!   timings; so not quite authentic
//!
//! Modules:
//!
//! * memory map
//!    - 4K, font at the bottom, program at 0x200
//!    - addresses wrap at the top of memory rather than faulting
//! * instruction set
//!    - opcode -> `Instruction` decode, independent of machine state
//! * the interpreter itself
//!    - pub .step() -- fetch/decode/execute one instruction
//!    - pub .advance_timers() -- one timer tick, may report the tone stopping
//!    - waiting for a key (FX0A) rewinds PC, so .step() just tries again
//!    - random numbers come from an injected generator
//! * some config (steps per frame, frame rate, seed)
//! * the environment
//!    - sets everything up; runs the main loop
//!    - keypad in, frames and tones out, once a frame
//! * display, with trait for rendering
//!    - provide an interface such that the interpreter doesn't need to know
//!      how the display works
//! * input device, with trait for reading key-presses
//! * audio device, with trait for making beeps
//!
//! Model
//!
//! ```text
//! Environment
//!  |-- display, input, audio, config
//!  |-- interpreter(memory, framebuffer, keypad, rng)
//!  |    `-- instruction set
//!  `-- main loop
//!       |-- input.poll(keypad)
//!       |-- n x interpreter.step()
//!       |-- if interpreter.needs_redraw() { display.draw(framebuffer) }
//!       |-- interpreter.advance_timers() -> sound
//!       `-- sleep to the end of the frame
//! ```
pub mod config;
pub mod display;
pub mod environment;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod sound;

pub use error::Chip8Error;
pub use interpreter::{Chip8Interpreter, ToneEvent};
