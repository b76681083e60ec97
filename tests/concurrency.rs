mod common;

use std::collections::BTreeSet;
use std::thread;

use trapgate::drivers::BufferConsole;
use trapgate::fs::{RamDisk, MAX_OPEN_FILES};
use trapgate::machine::FlatMachine;
use trapgate::syscall::number;
use trapgate::{Kernel, KernelConfig, TrapKind};

fn call(kernel: &Kernel<BufferConsole, RamDisk>, m: &mut FlatMachine, op: i32, args: &[i32]) -> i32 {
    m.set_syscall(op, args);
    kernel.dispatch(m, TrapKind::Syscall);
    m.result()
}

#[test]
fn parallel_opens_get_distinct_ids() {
    common::init_logging();
    let kernel = Kernel::new(BufferConsole::new(), RamDisk::new(), KernelConfig::default());
    let threads = MAX_OPEN_FILES + 4;

    let ids: Vec<i32> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let kernel = &kernel;
                s.spawn(move || {
                    let mut m = FlatMachine::new(64);
                    m.load(0, format!("t{}\0", i).as_bytes());
                    assert_eq!(call(kernel, &mut m, number::CREATE, &[0]), 0);
                    call(kernel, &mut m, number::OPEN, &[0])
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let granted: BTreeSet<i32> = ids.iter().copied().filter(|&id| id != -1).collect();
    assert_eq!(granted.len(), MAX_OPEN_FILES - 2);
    assert_eq!(granted, (2..MAX_OPEN_FILES as i32).collect());
    assert_eq!(ids.iter().filter(|&&id| id == -1).count(), threads - granted.len());
}

#[test]
fn racing_creates_of_one_name_admit_one_winner() {
    common::init_logging();
    let kernel = Kernel::new(BufferConsole::new(), RamDisk::new(), KernelConfig::default());

    let results: Vec<i32> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let kernel = &kernel;
                s.spawn(move || {
                    let mut m = FlatMachine::new(16);
                    m.load(0, b"same\0");
                    call(kernel, &mut m, number::CREATE, &[0])
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|&&r| r == 0).count(), 1);
    assert_eq!(results.iter().filter(|&&r| r == -1).count(), 7);
}
