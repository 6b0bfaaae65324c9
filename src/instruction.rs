use log::debug;

use crate::opcode::Opcode;
use crate::operations::*;
use crate::random::RandomSource;
use crate::state::State;

/// A handler for a single instruction
pub type Operation = fn(op: Opcode, state: &mut State, rng: &mut dyn RandomSource);

/// Selects the correct Operation for a given Opcode
///
/// Families 0, 8 and E share their first nibble between several instructions and are told apart
/// by their last nibble; family F is told apart by its last byte. Anything unassigned is a `nop`.
pub fn from_op(op: Opcode) -> Operation {
    match op.family() {
        0x0 => match op.n() {
            0x0 => cls,
            0xE => ret,
            _ => unassigned(op),
        },
        0x1 => jp,
        0x2 => call,
        0x3 => se,
        0x4 => sne,
        0x5 => se_reg,
        0x6 => ld,
        0x7 => add,
        0x8 => match op.n() {
            0x0 => ld_reg,
            0x1 => or,
            0x2 => and,
            0x3 => xor,
            0x4 => add_reg,
            0x5 => sub,
            0x6 => shr,
            0x7 => subn,
            0xE => shl,
            _ => unassigned(op),
        },
        0x9 => sne_reg,
        0xA => ld_i,
        0xB => jp_v0,
        0xC => rnd,
        0xD => drw,
        0xE => match op.n() {
            0xE => skp,
            0x1 => sknp,
            _ => unassigned(op),
        },
        0xF => match op.kk() {
            0x07 => ld_dt_to_reg,
            0x0A => ld_key,
            0x15 => ld_reg_to_dt,
            0x18 => ld_reg_to_st,
            0x1E => add_i,
            0x29 => ld_font,
            0x33 => bcd,
            0x55 => store,
            0x65 => load,
            _ => unassigned(op),
        },
        _ => unreachable!("an opcode's family is a single nibble"),
    }
}

fn unassigned(op: Opcode) -> Operation {
    debug!("opcode {} is unassigned, treating it as a no-op", op);
    nop
}
