use crate::constants::{FLAG_REGISTER, FONT_GLYPH_SIZE, FONT_START, KEY_COUNT};
use crate::opcode::Opcode;
use crate::random::RandomSource;
use crate::state::State;

// The program counter already points past the current instruction when these run.

/// unassigned opcode; does nothing
pub fn nop(_op: Opcode, _state: &mut State, _rng: &mut dyn RandomSource) {}

/// clear
pub fn cls(_op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.display.clear();
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn ret(_op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.pc = state.pop();
}

/// PC = addr
pub fn jp(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.pc = op.nnn();
}

/// STACK.push(PC); PC = addr
pub fn call(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.push(state.pc);
    state.pc = op.nnn();
}

/// if Vx == kk then pc += 2
pub fn se(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    if state.register(op.x()) == op.kk() {
        state.skip();
    }
}

/// if Vx != kk then pc += 2
pub fn sne(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    if state.register(op.x()) != op.kk() {
        state.skip();
    }
}

/// if Vx == Vy then pc += 2
pub fn se_reg(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    if state.register(op.x()) == state.register(op.y()) {
        state.skip();
    }
}

/// Vx = kk
pub fn ld(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.set_register(op.x(), op.kk());
}

/// Vx += kk
/// Overflow wraps and leaves VF alone
pub fn add(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    let res = state.register(op.x()).wrapping_add(op.kk());
    state.set_register(op.x(), res);
}

/// Vx = Vy
pub fn ld_reg(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.set_register(op.x(), state.register(op.y()));
}

/// Vx |= Vy
pub fn or(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.set_register(op.x(), state.register(op.x()) | state.register(op.y()));
}

/// Vx &= Vy
pub fn and(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.set_register(op.x(), state.register(op.x()) & state.register(op.y()));
}

/// Vx ^= Vy
pub fn xor(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.set_register(op.x(), state.register(op.x()) ^ state.register(op.y()));
}

/// Vx += Vy; VF = overflow
pub fn add_reg(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    let (res, over) = state.register(op.x()).overflowing_add(state.register(op.y()));
    state.set_flag(over);
    state.set_register(op.x(), res);
}

/// Vx -= Vy; VF = Vx > Vy
/// Equal operands clear VF
pub fn sub(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    let (vx, vy) = (state.register(op.x()), state.register(op.y()));
    state.set_flag(vx > vy);
    state.set_register(op.x(), vx.wrapping_sub(vy));
}

/// Vx >>= 1; VF = lsb
/// Shifts Vx in place, Vy is ignored
pub fn shr(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    let vx = state.register(op.x());
    state.set_register(FLAG_REGISTER, vx & 0x1);
    state.set_register(op.x(), vx >> 1);
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    let (vx, vy) = (state.register(op.x()), state.register(op.y()));
    state.set_flag(vy > vx);
    state.set_register(op.x(), vy.wrapping_sub(vx));
}

/// Vx <<= 1; VF = msb
/// Shifts Vx in place, Vy is ignored
pub fn shl(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    let vx = state.register(op.x());
    state.set_register(FLAG_REGISTER, (vx & 0x80) >> 7);
    state.set_register(op.x(), vx << 1);
}

/// if Vx != Vy then pc +=2
pub fn sne_reg(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    if state.register(op.x()) != state.register(op.y()) {
        state.skip();
    }
}

/// I = addr
pub fn ld_i(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.i = op.nnn();
}

/// PC = V0 + addr
pub fn jp_v0(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.pc = u16::from(state.register(0x0)) + op.nnn();
}

/// Vx = rand_byte & kk
pub fn rnd(op: Opcode, state: &mut State, rng: &mut dyn RandomSource) {
    state.set_register(op.x(), rng.next_byte() & op.kk());
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the display at (Vx, Vy) with wrapping.
/// VF = any pixel was erased
pub fn drw(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    let (x, y) = (state.register(op.x()), state.register(op.y()));
    let sprite = state.read_range(state.i, op.n() as usize);
    let collided = state.display.draw_sprite(x, y, &sprite);
    state.set_flag(collided);
    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skp(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    if state.key_down(state.register(op.x())) {
        state.skip();
    }
}

/// if !Vx.pressed then pc += 2
pub fn sknp(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    if !state.key_down(state.register(op.x())) {
        state.skip();
    }
}

/// Vx = DT
pub fn ld_dt_to_reg(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.set_register(op.x(), state.delay_timer);
}

/// Vx = lowest pressed key, or rewind the pc to run this again next step
pub fn ld_key(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    match (0..KEY_COUNT as u8).find(|&key| state.key_down(key)) {
        Some(key) => state.set_register(op.x(), key),
        None => state.pc = state.pc.wrapping_sub(2),
    }
}

/// DT = Vx
pub fn ld_reg_to_dt(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.delay_timer = state.register(op.x());
}

/// ST = Vx
pub fn ld_reg_to_st(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.sound_timer = state.register(op.x());
}

/// I += Vx
/// No flag and no masking
pub fn add_i(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.i = state.i.wrapping_add(u16::from(state.register(op.x())));
}

/// I = 0x50 + Vx * 5
/// Point I at the font glyph for digit Vx
pub fn ld_font(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    state.i = FONT_START + FONT_GLYPH_SIZE * u16::from(state.register(op.x()));
}

/// mem[I..I+3] = bcd(Vx)
/// Hundreds, tens and ones of Vx in that order
pub fn bcd(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    let value = state.register(op.x());
    let i = state.i;
    state.write(i, value / 100);
    state.write(i.wrapping_add(1), value / 10 % 10);
    state.write(i.wrapping_add(2), value % 10);
}

/// mem[I..=I+x] = V0..=Vx
pub fn store(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    for reg in 0..=op.x() {
        state.write(state.i.wrapping_add(u16::from(reg)), state.register(reg));
    }
}

/// V0..=Vx = mem[I..=I+x]
pub fn load(op: Opcode, state: &mut State, _rng: &mut dyn RandomSource) {
    for reg in 0..=op.x() {
        let value = state.read(state.i.wrapping_add(u16::from(reg)));
        state.set_register(reg, value);
    }
}
