//! # interpreter
//!
//! Machine state, as a CHIP-8 program sees it:
//!  V0-VF    16 8-bit registers; VF doubles as the carry/borrow/collision flag
//!  I        16-bit index register, mostly used as a memory pointer
//!  PC       16-bit program counter                -- 0x200 at power-on
//!  SP       depth of the call stack               -- 0-16
//!  DT       8-bit delay timer, counts down at 60Hz
//!  ST       8-bit sound timer, counts down at 60Hz; tone plays while nonzero
//! plus 4K of memory, a 16-entry call stack, the 64x32 display and a
//! snapshot of the keypad.
//!
//! Nothing in here blocks or does I/O: `step()` runs exactly one instruction
//! and `advance_timers()` is one 60Hz tick. Pacing belongs to the caller.
use crate::display::{Framebuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::error::Chip8Error;
use crate::input::Keypad;
use crate::instruction::Instruction;
use crate::memory::{self, MemoryMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;

const REGISTER_COUNT: usize = 16;
const STACK_DEPTH: usize = 16;
const FLAG: usize = 0xF;

/// Emitted by `advance_timers()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneEvent {
    /// the sound timer just ran down to zero
    Stop,
}

pub struct Chip8Interpreter<R = StdRng> {
    memory: memory::Chip8MemoryMap,
    v: [u8; REGISTER_COUNT],
    i: u16,
    program_counter: u16,
    stack: [u16; STACK_DEPTH],
    stack_pointer: usize,
    delay_timer: u8,
    sound_timer: u8,
    display: Framebuffer,
    redraw: bool,
    keypad: Keypad,
    rng: R,
}

impl Chip8Interpreter<StdRng> {
    /// power-on state, with random numbers seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// power-on state with a reproducible random number sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Chip8Interpreter<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Chip8Interpreter<R> {
    pub fn with_rng(rng: R) -> Self {
        let memory = memory::Chip8MemoryMap::new();
        let program_counter = memory.program_addr;
        Chip8Interpreter {
            memory,
            v: [0; REGISTER_COUNT],
            i: 0,
            program_counter,
            stack: [0; STACK_DEPTH],
            stack_pointer: 0,
            delay_timer: 0,
            sound_timer: 0,
            display: Framebuffer::new(),
            redraw: false,
            keypad: Keypad::new(),
            rng,
        }
    }

    /// load a chip8 program image
    pub fn load(&mut self, image: &[u8]) -> Result<(), Chip8Error> {
        self.memory.load_program(image)?;
        log::debug!("loaded {} byte program at {:#05x}", image.len(), self.memory.program_addr);
        Ok(())
    }

    /// load a chip8 program from a file or similar
    pub fn load_program(&mut self, reader: &mut impl io::Read) -> Result<(), Chip8Error> {
        let len = self.memory.load_program_from(reader)?;
        log::debug!("loaded {} byte program at {:#05x}", len, self.memory.program_addr);
        Ok(())
    }

    /// fetch, decode and execute one instruction
    ///
    /// on error the program counter is left pointing at the faulting
    /// instruction and nothing else has changed
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        let pc = self.program_counter;
        let opcode = self.memory.get_word(pc);
        let instruction = Instruction::decode(opcode).ok_or(Chip8Error::UnknownOpcode { opcode, pc })?;
        log::trace!("{:#05x}: {:04x} {}", pc, opcode, instruction);

        self.program_counter = pc.wrapping_add(2);
        self.execute(instruction).map_err(|e| {
            self.program_counter = pc;
            e
        })
    }

    /// one 60Hz tick of both timers
    pub fn advance_timers(&mut self) -> Option<ToneEvent> {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            if self.sound_timer == 0 {
                return Some(ToneEvent::Stop);
            }
        }
        None
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        use Instruction::*;
        match instruction {
            ClearScreen => {
                self.display.clear();
                self.redraw = true;
            }
            Return => {
                if self.stack_pointer == 0 {
                    return Err(Chip8Error::StackUnderflow { pc: self.current_instruction() });
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer];
            }
            Jump { addr } => self.program_counter = addr,
            Call { addr } => {
                if self.stack_pointer == STACK_DEPTH {
                    return Err(Chip8Error::StackOverflow { pc: self.current_instruction() });
                }
                self.stack[self.stack_pointer] = self.program_counter;
                self.stack_pointer += 1;
                self.program_counter = addr;
            }
            SkipIfEqImm { x, nn } => self.skip_if(self.v[x] == nn),
            SkipIfNeImm { x, nn } => self.skip_if(self.v[x] != nn),
            SkipIfEqReg { x, y } => self.skip_if(self.v[x] == self.v[y]),
            LoadImm { x, nn } => self.v[x] = nn,
            AddImm { x, nn } => self.v[x] = self.v[x].wrapping_add(nn),
            Move { x, y } => self.v[x] = self.v[y],
            Or { x, y } => self.v[x] |= self.v[y],
            And { x, y } => self.v[x] &= self.v[y],
            Xor { x, y } => self.v[x] ^= self.v[y],
            AddReg { x, y } => {
                let (sum, carry) = self.v[x].overflowing_add(self.v[y]);
                self.v[FLAG] = carry as u8;
                self.v[x] = sum;
            }
            SubReg { x, y } => {
                let (vx, vy) = (self.v[x], self.v[y]);
                self.v[FLAG] = (vx > vy) as u8;
                self.v[x] = vx.wrapping_sub(vy);
            }
            ShiftRight { x } => {
                let vx = self.v[x];
                self.v[FLAG] = vx & 0x01;
                self.v[x] = vx >> 1;
            }
            ShiftLeft { x } => {
                // NB. the flag gets the raw top bit (0x80), not 1
                let vx = self.v[x];
                self.v[FLAG] = vx & 0x80;
                self.v[x] = vx << 1;
            }
            SkipIfNeReg { x, y } => self.skip_if(self.v[x] != self.v[y]),
            LoadIndex { addr } => self.i = addr,
            Random { x, nn } => self.v[x] = self.rng.gen::<u8>() & nn,
            Draw { x, y, n } => self.draw_sprite(x, y, n),
            SkipIfKey { x } => self.skip_if(self.keypad.is_pressed(self.v[x])),
            SkipIfNotKey { x } => self.skip_if(!self.keypad.is_pressed(self.v[x])),
            LoadDelay { x } => self.v[x] = self.delay_timer,
            WaitKey { x } => match self.keypad.first_pressed() {
                Some(key) => self.v[x] = key,
                // come back here next step until something is pressed
                None => self.program_counter = self.current_instruction(),
            },
            SetDelay { x } => self.delay_timer = self.v[x],
            SetSound { x } => self.sound_timer = self.v[x],
            AddIndex { x } => self.i = self.i.wrapping_add(self.v[x] as u16),
            LoadGlyph { x } => {
                self.i = memory::CHIP8_FONT_ADDR + self.v[x] as u16 * memory::CHIP8_FONT_GLYPH_BYTES
            }
            StoreBcd { x } => {
                let vx = self.v[x];
                self.memory.write(self.i, vx / 100);
                self.memory.write(self.i.wrapping_add(1), vx / 10 % 10);
                self.memory.write(self.i.wrapping_add(2), vx % 10);
            }
            StoreRegisters { x } => {
                for r in 0..=x {
                    self.memory.write(self.i.wrapping_add(r as u16), self.v[r]);
                }
                self.i = self.i.wrapping_add(x as u16 + 1);
            }
            LoadRegisters { x } => {
                for r in 0..=x {
                    self.v[r] = self.memory.read(self.i.wrapping_add(r as u16));
                }
                self.i = self.i.wrapping_add(x as u16 + 1);
            }
        }
        Ok(())
    }

    /// address of the instruction being executed (PC has already moved on)
    fn current_instruction(&self) -> u16 {
        self.program_counter.wrapping_sub(2)
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    /// XOR an 8-pixel-wide, n-row sprite from I onto the display. The origin
    /// wraps onto the screen; anything that then runs off the right or bottom
    /// edge is clipped.
    fn draw_sprite(&mut self, x: usize, y: usize, n: u8) {
        let origin_x = self.v[x] as usize % DISPLAY_WIDTH;
        let origin_y = self.v[y] as usize % DISPLAY_HEIGHT;
        self.v[FLAG] = 0;

        for row in 0..n as usize {
            let bits = self.memory.read(self.i.wrapping_add(row as u16));
            for col in 0..8 {
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                if let Some(true) = self.display.flip(origin_x + col, origin_y + row) {
                    self.v[FLAG] = 1;
                }
            }
        }
        self.redraw = true;
    }

    // presenter side

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.display
    }

    /// has the display changed since the presenter last cleared the flag?
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    // input side

    pub fn press_key(&mut self, key: u8) {
        self.keypad.press(key);
    }

    pub fn release_key(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    /// is a tone due to be playing right now?
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    // inspection

    /// only the low nibble of `register` counts, the same as an opcode's X/Y
    pub fn v(&self, register: usize) -> u8 {
        self.v[register & 0xf]
    }

    pub fn set_v(&mut self, register: usize, value: u8) {
        self.v[register & 0xf] = value;
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn pc(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_depth(&self) -> usize {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// interpreter with the given program loaded and a fixed seed
    fn with_program(prog: &[u8]) -> Chip8Interpreter {
        let mut i = Chip8Interpreter::with_seed(0x5eed);
        i.load(prog).unwrap();
        i
    }

    fn run(i: &mut Chip8Interpreter, steps: usize) {
        for _ in 0..steps {
            i.step().unwrap();
        }
    }

    #[test]
    fn test_power_on_state() {
        let i = Chip8Interpreter::with_seed(1);
        assert_eq!(i.pc(), 0x200);
        assert_eq!(i.i(), 0);
        assert_eq!(i.stack_depth(), 0);
        assert!((0..16).all(|r| i.v(r) == 0));
        assert_eq!(i.framebuffer().lit_count(), 0);
        assert!(!i.needs_redraw());
        assert_eq!(i.memory()[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
    }

    #[test]
    fn test_program_load_ok() -> Result<(), Chip8Error> {
        let mut i = Chip8Interpreter::with_seed(1);
        let mut prog: &[u8] = &[0x00, 0xe0]; // clear screen
        i.load_program(&mut prog)?;
        assert_eq!(i.memory()[0x200..0x202], [0x00, 0xe0]);
        Ok(())
    }

    #[test]
    fn test_add_with_carry() {
        for (a, b) in [(0u8, 0u8), (1, 2), (200, 55), (200, 56), (255, 255), (128, 128)] {
            let mut i = with_program(&[0x81, 0x24]);
            i.set_v(1, a);
            i.set_v(2, b);
            i.step().unwrap();
            assert_eq!(i.v(1), a.wrapping_add(b), "{} + {}", a, b);
            assert_eq!(i.v(0xF), ((a as u16 + b as u16) > 255) as u8, "{} + {}", a, b);
        }
    }

    #[test]
    fn test_sub_with_borrow() {
        for (a, b) in [(5u8, 3u8), (3, 5), (7, 7), (0, 255), (255, 0)] {
            let mut i = with_program(&[0x81, 0x25]);
            i.set_v(1, a);
            i.set_v(2, b);
            i.step().unwrap();
            assert_eq!(i.v(1), a.wrapping_sub(b), "{} - {}", a, b);
            assert_eq!(i.v(0xF), (a > b) as u8, "{} - {}", a, b);
        }
    }

    #[test]
    fn test_flag_register_as_operand_loses_flag() {
        // 8FE4: VF = VF + VE, result overwrites the carry
        let mut i = with_program(&[0x8F, 0xE4]);
        i.set_v(0xF, 0xff);
        i.set_v(0xE, 0x02);
        i.step().unwrap();
        assert_eq!(i.v(0xF), 0x01);
    }

    #[test]
    fn test_shifts() {
        let mut i = with_program(&[0x83, 0x06, 0x84, 0x0e, 0x85, 0x0e]);
        i.set_v(3, 0b1000_0011);
        i.set_v(4, 0b1100_0000);
        i.set_v(5, 0b0100_0000);
        i.step().unwrap();
        assert_eq!(i.v(3), 0b0100_0001);
        assert_eq!(i.v(0xF), 1);
        i.step().unwrap();
        assert_eq!(i.v(4), 0b1000_0000);
        assert_eq!(i.v(0xF), 0x80);
        i.step().unwrap();
        assert_eq!(i.v(5), 0b1000_0000);
        assert_eq!(i.v(0xF), 0);
    }

    #[test]
    fn test_logic_and_immediates() {
        // V1 = 0x0f; V2 = 0x3c; V1 |= V2; V3 = V1; V3 &= V2; V1 ^= V2; V4 += 0xff
        let mut i = with_program(&[
            0x61, 0x0f, 0x62, 0x3c, 0x81, 0x21, 0x83, 0x10, 0x83, 0x22, 0x81, 0x23, 0x74, 0xff,
        ]);
        i.set_v(4, 2);
        run(&mut i, 7);
        assert_eq!(i.v(1), 0x3f ^ 0x3c);
        assert_eq!(i.v(3), 0x3f & 0x3c);
        assert_eq!(i.v(4), 1);
        // 7XNN leaves the flag alone
        assert_eq!(i.v(0xF), 0);
    }

    #[test]
    fn test_skips() {
        // 3XNN taken, 4XNN not taken, 5XY0 taken, 9XY0 not taken
        let mut i = with_program(&[
            0x31, 0x07, 0x00, 0x00, // skip over junk
            0x41, 0x07, // no skip
            0x51, 0x20, 0x00, 0x00, // skip over junk
            0x91, 0x20, // no skip
        ]);
        i.set_v(1, 7);
        i.set_v(2, 7);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x204);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x206);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x20a);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x20c);
    }

    #[test]
    fn test_jump() {
        let mut i = with_program(&[0x1a, 0xbc]);
        i.step().unwrap();
        assert_eq!(i.pc(), 0xabc);
    }

    #[test]
    fn test_call_and_return() {
        // 0x200: CALL 0x300; 0x300: RET
        let mut prog = vec![0u8; 0x102];
        prog[0] = 0x23;
        prog[1] = 0x00;
        prog[0x100] = 0x00;
        prog[0x101] = 0xee;
        let mut i = with_program(&prog);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x300);
        assert_eq!(i.stack_depth(), 1);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x202);
        assert_eq!(i.stack_depth(), 0);
    }

    #[test]
    fn test_stack_overflow_is_fatal() {
        // 0x200: CALL 0x200, forever
        let mut i = with_program(&[0x22, 0x00]);
        run(&mut i, 16);
        assert_eq!(i.stack_depth(), 16);
        match i.step() {
            Err(Chip8Error::StackOverflow { pc }) => assert_eq!(pc, 0x200),
            other => panic!("expected StackOverflow, got {:?}", other),
        }
        assert_eq!(i.pc(), 0x200);
        assert_eq!(i.stack_depth(), 16);
    }

    #[test]
    fn test_stack_underflow_is_fatal() {
        let mut i = with_program(&[0x00, 0xee]);
        match i.step() {
            Err(Chip8Error::StackUnderflow { pc }) => assert_eq!(pc, 0x200),
            other => panic!("expected StackUnderflow, got {:?}", other),
        }
        assert_eq!(i.pc(), 0x200);
    }

    #[test]
    fn test_unknown_opcode_reports_pc() {
        let mut i = with_program(&[0x60, 0x01, 0xb1, 0x23]);
        i.step().unwrap();
        match i.step() {
            Err(Chip8Error::UnknownOpcode { opcode, pc }) => {
                assert_eq!(opcode, 0xb123);
                assert_eq!(pc, 0x202);
            }
            other => panic!("expected UnknownOpcode, got {:?}", other),
        }
        // nothing executed, and it stays stuck there
        assert_eq!(i.pc(), 0x202);
        assert!(i.step().is_err());
    }

    #[test]
    fn test_clear_screen_sets_redraw() {
        let mut i = with_program(&[0x00, 0xe0]);
        i.display.flip(10, 10);
        i.step().unwrap();
        assert_eq!(i.framebuffer().lit_count(), 0);
        assert!(i.needs_redraw());
        i.clear_redraw();
        assert!(!i.needs_redraw());
    }

    #[test]
    fn test_blank_sprite_still_redraws() {
        // I = 0x300 (zeroed); DRW V0, V0, 5
        let mut i = with_program(&[0xa3, 0x00, 0xd0, 0x05]);
        run(&mut i, 2);
        assert_eq!(i.framebuffer().lit_count(), 0);
        assert!(i.needs_redraw());
        assert_eq!(i.v(0xF), 0);
    }

    #[test]
    fn test_draw_twice_collides() {
        // I = glyph "0"; draw it twice at (V1, V2)
        let mut i = with_program(&[0xa0, 0x00, 0xd1, 0x25, 0xd1, 0x25]);
        i.set_v(1, 10);
        i.set_v(2, 4);
        run(&mut i, 2);
        // "0" glyph has 14 lit pixels
        assert_eq!(i.framebuffer().lit_count(), 14);
        assert!(i.framebuffer().get(10, 4));
        assert!(i.framebuffer().get(13, 8));
        assert_eq!(i.v(0xF), 0);
        i.step().unwrap();
        assert_eq!(i.framebuffer().lit_count(), 0);
        assert_eq!(i.v(0xF), 1);
    }

    #[test]
    fn test_draw_origin_wraps() {
        let mut i = with_program(&[0xa0, 0x00, 0xd1, 0x21]);
        i.set_v(1, 70);
        i.set_v(2, 40);
        run(&mut i, 2);
        // top row of "0" is 0xF0
        for x in 6..10 {
            assert!(i.framebuffer().get(x, 8), "pixel ({}, 8)", x);
        }
        assert_eq!(i.framebuffer().lit_count(), 4);
    }

    #[test]
    fn test_draw_clips_at_edges() {
        // I = 0x300 holding 0xff 0xff; DRW V1, V2, 2 at (60, 31)
        let mut i = with_program(&[0xa3, 0x00, 0xd1, 0x22]);
        i.memory.write_all(&[0xff, 0xff], 0x300);
        i.set_v(1, 60);
        i.set_v(2, 31);
        run(&mut i, 2);
        // only columns 60-63 of row 31 land on screen
        assert_eq!(i.framebuffer().lit_count(), 4);
        assert!(i.framebuffer().get(63, 31));
        assert!(!i.framebuffer().get(0, 31));
        assert!(!i.framebuffer().get(60, 0));
    }

    #[test]
    fn test_keys_skip() {
        let mut i = with_program(&[0xe1, 0x9e, 0x00, 0x00, 0xe1, 0xa1, 0xe1, 0xa1]);
        i.set_v(1, 0xb);
        i.press_key(0xb);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x204);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x206);
        i.release_key(0xb);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x20a);
    }

    #[test]
    fn test_wait_key_blocks_until_pressed() {
        let mut i = with_program(&[0xf5, 0x0a]);
        for _ in 0..5 {
            i.step().unwrap();
            assert_eq!(i.pc(), 0x200);
        }
        i.press_key(0x9);
        i.press_key(0x4);
        i.step().unwrap();
        assert_eq!(i.pc(), 0x202);
        // lowest key wins
        assert_eq!(i.v(5), 0x4);
    }

    #[test]
    fn test_timers() {
        // V1 = 3; DT = V1; ST = V1; V2 = DT
        let mut i = with_program(&[0x61, 0x03, 0xf1, 0x15, 0xf1, 0x18, 0xf2, 0x07]);
        run(&mut i, 4);
        assert_eq!(i.v(2), 3);
        assert!(i.sound_active());
        assert_eq!(i.advance_timers(), None);
        assert_eq!(i.advance_timers(), None);
        assert_eq!((i.delay_timer(), i.sound_timer()), (1, 1));
        assert_eq!(i.advance_timers(), Some(ToneEvent::Stop));
        assert!(!i.sound_active());
        for _ in 0..3 {
            assert_eq!(i.advance_timers(), None);
            assert_eq!((i.delay_timer(), i.sound_timer()), (0, 0));
        }
    }

    #[test]
    fn test_index_ops() {
        // I = 0xffe; I += V1 (wraps); LD F, V2
        let mut i = with_program(&[0xaf, 0xfe, 0xf1, 0x1e, 0xf2, 0x29]);
        i.set_v(1, 0x03);
        i.set_v(2, 0x0c);
        run(&mut i, 2);
        assert_eq!(i.i(), 0x1001);
        assert_eq!(i.v(0xF), 0);
        i.step().unwrap();
        assert_eq!(i.i(), 60);
    }

    #[test]
    fn test_bcd() {
        let mut i = with_program(&[0xa4, 0x00, 0xf3, 0x33]);
        i.set_v(3, 255);
        run(&mut i, 2);
        assert_eq!(i.memory()[0x400..0x403], [2, 5, 5]);
        assert_eq!(i.i(), 0x400);
    }

    #[test]
    fn test_store_load_registers_round_trip() {
        // I = 0x400; store V0-V5; I = 0x400; load V0-V5
        let mut i = with_program(&[0xa4, 0x00, 0xf5, 0x55, 0xa4, 0x00, 0xf5, 0x65]);
        let values = [9, 8, 7, 6, 5, 4];
        for (r, v) in values.iter().enumerate() {
            i.set_v(r, *v);
        }
        i.set_v(6, 0xaa);
        run(&mut i, 2);
        assert_eq!(i.i(), 0x406);
        assert_eq!(i.memory()[0x400..0x406], values);
        assert_eq!(i.memory()[0x406], 0);
        for r in 0..6 {
            i.set_v(r, 0);
        }
        run(&mut i, 2);
        assert_eq!(i.i(), 0x406);
        for (r, v) in values.iter().enumerate() {
            assert_eq!(i.v(r), *v);
        }
        assert_eq!(i.v(6), 0xaa);
    }

    #[test]
    fn test_random_is_masked_and_seeded() {
        let prog = [0xc1, 0x0f, 0xc2, 0xff, 0xc3, 0x00];
        let mut a = with_program(&prog);
        let mut b = with_program(&prog);
        run(&mut a, 3);
        run(&mut b, 3);
        assert!(a.v(1) <= 0x0f);
        assert_eq!(a.v(3), 0);
        assert_eq!((a.v(1), a.v(2)), (b.v(1), b.v(2)));
    }

    #[test]
    fn test_register_index_uses_low_nibble() {
        let mut i = Chip8Interpreter::with_seed(1);
        i.set_v(0x13, 0x42);
        assert_eq!(i.v(3), 0x42);
        assert_eq!(i.v(0x13), 0x42);
        assert_eq!(i.v(usize::MAX), i.v(0xf));
    }
}
