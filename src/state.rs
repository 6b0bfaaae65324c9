use crate::constants::{
    FLAG_REGISTER, FONT, FONT_START, KEY_COUNT, MEMORY_SIZE, PROGRAM_START, REGISTER_COUNT,
    STACK_SIZE,
};
use crate::display::DisplayBuffer;
use crate::opcode::Opcode;

/// A snapshot of the machine's internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is written by arithmetic, shifts and sprite drawing as a flag
/// - (i) a 16-bit memory address register, never range checked
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Pointer
/// - (sp) an 8-bit stack pointer
///
/// Timers
/// - 2 8-bit timers (delay & sound), each decremented once per step while nonzero
///
/// ## Memory
/// - 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the hexadecimal font
///     - 0x200.. holds the loaded program
/// - 64x32 display buffer
///
/// ## Input
/// - 16 key states for keys 0..F, written by whoever drives the machine between steps
///
/// Out of range accesses never fault: memory addresses wrap at 4096, stack slots at 16 and
/// key lookups use the low nibble of the requested key.
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_SIZE],
    pub memory: [u8; MEMORY_SIZE],
    pub keypad: [bool; KEY_COUNT],
    pub display: DisplayBuffer,
    /// The instruction fetched by the most recent step
    pub opcode: Opcode,
    /// Set whenever the display changes
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font_start = FONT_START as usize;
        memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            memory,
            keypad: [false; KEY_COUNT],
            display: DisplayBuffer::new(),
            opcode: Opcode(0),
            draw_flag: false,
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.memory[addr as usize % MEMORY_SIZE]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize % MEMORY_SIZE] = value;
    }

    /// Reads `len` consecutive bytes starting at `addr`, wrapping past the end of memory.
    pub fn read_range(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.read(addr.wrapping_add(offset as u16)))
            .collect()
    }

    pub fn register(&self, x: u8) -> u8 {
        self.v[x as usize % REGISTER_COUNT]
    }

    pub fn set_register(&mut self, x: u8, value: u8) {
        self.v[x as usize % REGISTER_COUNT] = value;
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.set_register(FLAG_REGISTER, flag as u8);
    }

    /// Stores a return address and bumps the stack pointer
    pub fn push(&mut self, addr: u16) {
        self.stack[self.sp as usize % STACK_SIZE] = addr;
        self.sp = self.sp.wrapping_add(1);
    }

    /// Drops the stack pointer and returns the address it now points at
    pub fn pop(&mut self) -> u16 {
        self.sp = self.sp.wrapping_sub(1);
        self.stack[self.sp as usize % STACK_SIZE]
    }

    pub fn key_down(&self, key: u8) -> bool {
        self.keypad[key as usize % KEY_COUNT]
    }

    /// Skips the next instruction
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_loads_font_at_0x50() {
        let state = State::new();
        assert_eq!(state.memory[0x50..0x50 + FONT.len()], FONT);
        assert!(state.memory[..0x50].iter().all(|&b| b == 0));
        assert!(state.memory[0x50 + FONT.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_starts_at_0x200() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.i, 0);
        assert_eq!(state.v, [0; 16]);
        assert_eq!(state.delay_timer, 0);
        assert_eq!(state.sound_timer, 0);
        assert!(!state.draw_flag);
    }

    #[test]
    fn test_memory_wraps() {
        let mut state = State::new();
        state.write(0x1000, 0xAB);
        assert_eq!(state.memory[0x000], 0xAB);
        assert_eq!(state.read(0x1000), 0xAB);
    }

    #[test]
    fn test_read_range_wraps() {
        let mut state = State::new();
        state.memory[0xFFF] = 0x1;
        state.memory[0x000] = 0x2;
        assert_eq!(state.read_range(0xFFF, 2), vec![0x1, 0x2]);
    }

    #[test]
    fn test_push_pop() {
        let mut state = State::new();
        state.push(0x123);
        state.push(0x456);
        assert_eq!(state.sp, 2);
        assert_eq!(state.pop(), 0x456);
        assert_eq!(state.pop(), 0x123);
        assert_eq!(state.sp, 0);
    }

    #[test]
    fn test_stack_overflow_wraps() {
        let mut state = State::new();
        for addr in 0..17 {
            state.push(addr);
        }
        assert_eq!(state.sp, 17);
        // the 17th push landed on slot 0
        assert_eq!(state.stack[0], 16);
    }

    #[test]
    fn test_stack_underflow_wraps() {
        let mut state = State::new();
        state.stack[15] = 0xABC;
        assert_eq!(state.pop(), 0xABC);
        assert_eq!(state.sp, 0xFF);
    }

    #[test]
    fn test_set_flag() {
        let mut state = State::new();
        state.set_flag(true);
        assert_eq!(state.v[0xF], 1);
        state.set_flag(false);
        assert_eq!(state.v[0xF], 0);
    }

    #[test]
    fn test_key_down_uses_low_nibble() {
        let mut state = State::new();
        state.keypad[0x3] = true;
        assert!(state.key_down(0x3));
        assert!(state.key_down(0x13));
        assert!(!state.key_down(0x4));
    }
}
