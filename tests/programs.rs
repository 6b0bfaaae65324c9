//! Whole programs driven through the public interface, one `step` at a time.

use octet::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, PIXEL_OFF, PIXEL_ON};
use octet::Machine;

fn boot(program: &[u8]) -> Machine {
    let mut machine = Machine::new();
    machine.load_program(program).unwrap();
    machine
}

fn run(machine: &mut Machine, steps: usize) {
    for _ in 0..steps {
        machine.step();
    }
}

#[test]
fn test_counts_down_a_loop() {
    let program = [
        0x60, 0x05, // 200: V0 = 5
        0x61, 0x00, // 202: V1 = 0
        0x71, 0x03, // 204: V1 += 3
        0x70, 0xFF, // 206: V0 -= 1
        0x30, 0x00, // 208: skip if V0 == 0
        0x12, 0x04, // 20A: jump 204
        0x12, 0x0C, // 20C: jump 20C
    ];
    let mut machine = boot(&program);
    // two setup steps, then 5 passes of four instructions, the last pass skipping its jump
    run(&mut machine, 2 + 5 * 4 - 1);
    assert_eq!(machine.state().v[0x0], 0);
    assert_eq!(machine.state().v[0x1], 15);
    assert_eq!(machine.state().pc, 0x20C);
    run(&mut machine, 10);
    assert_eq!(machine.state().pc, 0x20C);
}

#[test]
fn test_subroutine_round_trip() {
    let program = [
        0x22, 0x06, // 200: call 206
        0x62, 0x01, // 202: V2 = 1
        0x12, 0x04, // 204: jump 204
        0x63, 0x07, // 206: V3 = 7
        0x00, 0xEE, // 208: return
    ];
    let mut machine = boot(&program);
    machine.step();
    assert_eq!(machine.state().pc, 0x206);
    assert_eq!(machine.state().sp, 1);
    run(&mut machine, 2);
    assert_eq!(machine.state().pc, 0x202);
    assert_eq!(machine.state().sp, 0);
    machine.step();
    assert_eq!(machine.state().v[0x2], 1);
    assert_eq!(machine.state().v[0x3], 7);
}

#[test]
fn test_draws_and_erases_wrapping_sprite() {
    let program = [
        0x60, 0x3F, // 200: V0 = 63
        0x61, 0x1F, // 202: V1 = 31
        0xA2, 0x0C, // 204: I = 20C
        0xD0, 0x12, // 206: draw 2 rows at (V0, V1)
        0xD0, 0x12, // 208: draw them again
        0x12, 0x0A, // 20A: jump 20A
        0xFF, 0xFF, // 20C: sprite
    ];
    let mut machine = boot(&program);
    run(&mut machine, 4);
    assert_eq!(machine.state().v[0xF], 0);

    let frame = machine.take_frame().unwrap();
    for y in 0..DISPLAY_HEIGHT {
        for x in 0..DISPLAY_WIDTH {
            let expected = (y == 31 || y == 0) && (x == 63 || x <= 6);
            let cell = frame.cells()[y * DISPLAY_WIDTH + x];
            assert_eq!(cell == PIXEL_ON, expected, "pixel ({}, {})", x, y);
        }
    }

    machine.step();
    assert_eq!(machine.state().v[0xF], 1);
    assert!(machine.frame().cells().iter().all(|&c| c == PIXEL_OFF));
}

#[test]
fn test_prints_bcd_digits_with_font() {
    let program = [
        0x6A, 0x7B, // 200: VA = 123
        0xA3, 0x00, // 202: I = 300
        0xFA, 0x33, // 204: bcd VA
        0xF2, 0x65, // 206: V0..=V2 = mem[I..]
        0xF1, 0x29, // 208: I = glyph for V1
        0x63, 0x00, // 20A: V3 = 0
        0xD3, 0x35, // 20C: draw glyph at (V3, V3)
    ];
    let mut machine = boot(&program);
    run(&mut machine, 7);
    assert_eq!(machine.state().v[0x0..0x3], [1, 2, 3]);
    assert_eq!(machine.state().i, 0x50 + 2 * 5);

    // the "2" glyph: F0 10 F0 80 F0
    let frame = machine.frame();
    let rows: Vec<Vec<bool>> = (0..5)
        .map(|y| (0..4).map(|x| frame.is_on(x, y)).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec![true, true, true, true],
            vec![false, false, false, true],
            vec![true, true, true, true],
            vec![true, false, false, false],
            vec![true, true, true, true],
        ]
    );
}

#[test]
fn test_blocks_until_key_pressed() {
    let program = [
        0xF4, 0x0A, // 200: V4 = key
        0xE4, 0x9E, // 202: skip if key V4 pressed
        0x12, 0x02, // 204: jump 202
        0x65, 0x01, // 206: V5 = 1
    ];
    let mut machine = boot(&program);
    run(&mut machine, 25);
    assert_eq!(machine.state().pc, 0x200);

    machine.key_press(0xB);
    machine.key_press(0x6);
    machine.step();
    assert_eq!(machine.state().v[0x4], 0x6);

    machine.key_release(0xB);
    run(&mut machine, 2);
    assert_eq!(machine.state().v[0x5], 1);
}

#[test]
fn test_timers_drain_one_per_step() {
    let program = [
        0x60, 0x0A, // 200: V0 = 10
        0xF0, 0x18, // 202: ST = V0
        0x12, 0x04, // 204: jump 204
    ];
    let mut machine = boot(&program);
    run(&mut machine, 2);
    assert!(machine.sound_active());
    assert_eq!(machine.state().sound_timer, 9);
    run(&mut machine, 8);
    assert!(machine.sound_active());
    machine.step();
    assert!(!machine.sound_active());
    run(&mut machine, 3);
    assert_eq!(machine.state().sound_timer, 0);
}

#[test]
fn test_unassigned_opcodes_are_inert() {
    let program = [
        0x60, 0x2A, // 200: V0 = 42
        0x80, 0x19, // 202: unassigned 8xy9
        0xE0, 0x00, // 204: unassigned Ex00
        0xF0, 0xFF, // 206: unassigned FxFF
    ];
    let mut machine = boot(&program);
    run(&mut machine, 4);
    assert_eq!(machine.state().pc, 0x208);
    assert_eq!(machine.state().v[0x0], 42);
    assert_eq!(machine.state().v[0x1], 0);
}
