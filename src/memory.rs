use crate::error::Chip8Error;
use std::io::{self, Read};

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// Represents the addressable memory of the machine. Addresses that run off
/// the end wrap back round to the start; there is no such thing as a bus fault.
pub trait MemoryMap {
    /// read one byte
    fn read(&self, addr: u16) -> u8;

    /// write one byte
    fn write(&mut self, addr: u16, value: u8);

    /// get a big-endian two-byte word (instructions)
    fn get_word(&self, addr: u16) -> u16 {
        ((self.read(addr) as u16) << 8) | (self.read(addr.wrapping_add(1)) as u16)
    }

    /// write a chunk of bytes, wrapping at the top of memory
    fn write_all(&mut self, data: &[u8], addr: u16) {
        for (offset, byte) in data.iter().enumerate() {
            self.write(addr.wrapping_add(offset as u16), *byte);
        }
    }
}

/// Defines the CHIP-8 memory map used here:
///   0x0000-0x004f  font
///   0x0050-0x01ff  reserved for the interpreter (zeroed)
///   0x0200-0x0fff  program and general RAM
///
/// the stack and display live outside addressable memory, so programs can
/// use the whole of 0x200 upwards
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
    pub program_addr: u16,
}

impl MemoryMap for Chip8MemoryMap {
    fn read(&self, addr: u16) -> u8 {
        self.bytes[Self::wrap(addr)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.bytes[Self::wrap(addr)] = value;
    }
}

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// where the program is loaded
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// largest program image that fits between the load address and the top of RAM
pub const CHIP8_MAX_PROGRAM_BYTES: usize = CHIP8_RAM_SIZE_BYTES - CHIP8_PROGRAM_ADDR as usize;

impl Chip8MemoryMap {
    /// initialises memory with the font baked in and everything else zeroed
    pub fn new() -> Self {
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice(),
            program_addr: CHIP8_PROGRAM_ADDR,
        };
        mm.write_all(&CHIP8_FONT, CHIP8_FONT_ADDR);
        mm
    }

    fn wrap(addr: u16) -> usize {
        addr as usize % CHIP8_RAM_SIZE_BYTES
    }

    /// load a CHIP-8 program at 0x200; oversize images are refused before
    /// anything is written
    pub fn load_program(&mut self, image: &[u8]) -> Result<(), Chip8Error> {
        if image.len() > CHIP8_MAX_PROGRAM_BYTES {
            return Err(Chip8Error::RomTooLarge {
                size: image.len(),
                max_size: CHIP8_MAX_PROGRAM_BYTES,
            });
        }
        self.write_all(image, self.program_addr);
        Ok(())
    }

    /// load unknown len of program from a reader; reads at most one byte past
    /// the limit, enough to tell that the program won't fit
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize, Chip8Error> {
        let mut buf = Vec::new();
        let len = reader
            .take(CHIP8_MAX_PROGRAM_BYTES as u64 + 1)
            .read_to_end(&mut buf)?;
        self.load_program(&buf)?;
        Ok(len)
    }

    /// r/o view of the whole of memory
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

/// each glyph is 5 bytes, so the glyph for digit n lives at n * 5
pub const CHIP8_FONT_ADDR: u16 = 0x000;
pub const CHIP8_FONT_GLYPH_BYTES: u16 = 5;
pub const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
