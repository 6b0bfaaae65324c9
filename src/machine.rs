use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{KEY_COUNT, MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::display::DisplayBuffer;
use crate::error::LoadError;
use crate::instruction::from_op;
use crate::opcode::Opcode;
use crate::state::State;

/// # Machine
/// The virtual machine and the only thing allowed to change its state.
///
/// Tracks:
///  - current `state`
///  - the random source behind `Cxkk`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing by a single instruction
/// - inspecting its frame buffer for rendering by some display
/// - telling whether a tone should be playing
pub struct Machine<R: RngCore = StdRng> {
    state: State,
    rng: R,
}

impl Machine {
    pub fn new() -> Self {
        Machine::with_rng(StdRng::from_entropy())
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Machine<R> {
    /// Builds a machine around a specific random source, e.g. a deterministic one in tests
    pub(crate) fn with_rng(rng: R) -> Self {
        Machine {
            state: State::new(),
            rng,
        }
    }

    /// Copies a program into memory starting at 0x200
    ///
    /// Leaves memory untouched if the program doesn't fit.
    ///
    /// # Arguments
    /// * `program` the raw bytes of a ROM
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::too_large(program.len()));
        }
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        debug!("copied {} bytes to {:#05X}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// The whole source is read before anything is written, so a failed read leaves the
    /// machine as it was. Returns the number of bytes loaded.
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader.read_to_end(&mut program)?;
        self.load_program(&program)?;
        Ok(program.len())
    }

    /// Opens `path` and loads it as a ROM
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let size = self.load_rom(&mut reader)?;
        info!("loaded {} byte ROM from {}", size, path.display());
        Ok(size)
    }

    /// Advances the machine by a single instruction
    /// - fetches the opcode at the pc and moves the pc past it
    /// - executes the opcode
    /// - decrements both timers if they're running
    pub fn step(&mut self) {
        let op = self.fetch();
        trace!(
            "{} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        self.state.opcode = op;
        self.state.pc = self.state.pc.wrapping_add(2);

        from_op(op)(op, &mut self.state, &mut self.rng);

        self.advance_timers();
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn fetch(&self) -> Opcode {
        let pc = self.state.pc;
        Opcode::from_bytes(self.state.read(pc), self.state.read(pc.wrapping_add(1)))
    }

    fn advance_timers(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }

    /// A read-only view of everything inside the machine
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn frame(&self) -> &DisplayBuffer {
        &self.state.display
    }

    /// Returns the frame if the display changed since the last call
    pub fn take_frame(&mut self) -> Option<&DisplayBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.display)
        } else {
            None
        }
    }

    /// The keypad, for input collaborators that track every key themselves
    pub fn keypad_mut(&mut self) -> &mut [bool; KEY_COUNT] {
        &mut self.state.keypad
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    pub fn release_all_keys(&mut self) {
        self.state.keypad = [false; KEY_COUNT];
    }

    fn set_key(&mut self, key: u8, pressed: bool) {
        match self.state.keypad.get_mut(key as usize) {
            Some(state) => *state = pressed,
            None => warn!("ignoring key {:#X}, the keypad only has keys 0..F", key),
        }
    }

    /// Whether a tone should be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }
}
