mod common;

use common::Harness;
use trapgate::syscall::number;
use trapgate::KernelConfig;

fn read_num(input: &str) -> i32 {
    let mut h = Harness::new(input.as_bytes());
    h.call(number::READ_NUM, &[])
}

#[test]
fn read_num_matches_console_contract() {
    assert_eq!(read_num("0\n"), 0);
    assert_eq!(read_num("-5\n"), -5);
    assert_eq!(read_num("-00000010\n"), -10);
    assert_eq!(read_num("-\n"), 0);
    assert_eq!(read_num("23ab\n"), 0);
    assert_eq!(read_num("2147483647\n"), 2147483647);
    assert_eq!(read_num("2147483648\n"), 0);
    assert_eq!(read_num("-2147483648\n"), i32::MIN);
    assert_eq!(read_num("-2147483649\n"), 0);
    assert_eq!(read_num("+55\n"), 55);
    assert_eq!(read_num(""), 0);
    assert_eq!(read_num("   12 34"), 12);
}

#[test]
fn consecutive_read_nums_share_the_stream() {
    let mut h = Harness::new(b"3 -4\n7");
    assert_eq!(h.call(number::READ_NUM, &[]), 3);
    assert_eq!(h.call(number::READ_NUM, &[]), -4);
    assert_eq!(h.call(number::READ_NUM, &[]), 7);
}

#[test]
fn print_num_writes_minimal_decimal() {
    let mut h = Harness::new(b"");
    for v in [0, -5, 42, i32::MIN, i32::MAX] {
        h.call(number::PRINT_NUM, &[v]);
        h.call(number::PRINT_CHAR, &[b' ' as i32]);
    }
    assert_eq!(h.output(), b"0 -5 42 -2147483648 2147483647 ");
}

#[test]
fn add_sums_registers() {
    let mut h = Harness::new(b"");
    assert_eq!(h.call(number::ADD, &[40, 2]), 42);
    assert_eq!(h.call(number::ADD, &[-7, 3]), -4);
}

#[test]
fn read_char_echoes_through_print_char() {
    let mut h = Harness::new(b"c \n");
    for _ in 0..3 {
        let c = h.call(number::READ_CHAR, &[]);
        h.call(number::PRINT_CHAR, &[c]);
    }
    assert_eq!(h.output(), b"c \n");
    assert_eq!(h.call(number::READ_CHAR, &[]), -1);
}

#[test]
fn read_string_then_print_string() {
    let mut h = Harness::new(b"  d\n");
    h.call(number::READ_STRING, &[100, 10]);
    assert_eq!(h.machine.c_str(100), b"  d");
    h.call(number::PRINT_STRING, &[100]);
    assert_eq!(h.output(), b"  d");
}

#[test]
fn read_string_truncates_at_max() {
    let mut h = Harness::new(b"01234567890\n");
    h.call(number::READ_STRING, &[200, 10]);
    assert_eq!(h.machine.memory(200, 11), b"0123456789\0");
}

#[test]
fn read_string_non_positive_max_stores_empty() {
    let mut h = Harness::new(b"abc\n");
    h.machine.load(300, b"zz");
    h.call(number::READ_STRING, &[300, 0]);
    assert_eq!(h.machine.c_str(300), b"");
    h.call(number::READ_STRING, &[300, -4]);
    assert_eq!(h.machine.c_str(300), b"");
}

#[test]
fn read_string_to_bad_address_fails() {
    let mut h = Harness::new(b"abc\n");
    assert_eq!(h.call(number::READ_STRING, &[1_000_000, 10]), -1);
}

#[test]
fn print_string_from_bad_address_fails() {
    let mut h = Harness::new(b"");
    assert_eq!(h.call(number::PRINT_STRING, &[-8]), -1);
    assert!(h.output().is_empty());
}

#[test]
fn random_num_is_seeded_and_non_negative() {
    let config = KernelConfig::default().with_random_seed(1234);
    let mut a = Harness::with_config(b"", config);
    let mut b = Harness::with_config(b"", config);
    for _ in 0..32 {
        let x = a.call(number::RANDOM_NUM, &[]);
        assert!(x >= 0);
        assert_eq!(x, b.call(number::RANDOM_NUM, &[]));
    }
}
