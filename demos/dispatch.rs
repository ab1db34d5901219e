use std::thread;

use bitscan_deque::{BitScanSet, GuardedBitScanSet, bucket_count};

const CHANNELS: usize = 52;

fn sequential() {
    let mut ready = BitScanSet::<CHANNELS, { bucket_count(CHANNELS) }>::new();
    ready.push_back(2).unwrap();
    ready.push_front(3).unwrap();
    ready.push_front(49).unwrap();

    while let Some(channel) = ready.front() {
        ready.pop_front().unwrap();
        println!("serviced channel {channel}, {} left", ready.size());
    }
}

fn concurrent() {
    let ready = GuardedBitScanSet::<CHANNELS, { bucket_count(CHANNELS) }>::new();
    for channel in (0..CHANNELS).step_by(5) {
        ready.push_back(channel).unwrap();
    }

    thread::scope(|s| {
        for worker in 0..2 {
            let ready = &ready;
            s.spawn(move || {
                // `front` is only a hint here, the other worker may take the
                // slot before our `pop_front` runs
                while let Some(channel) = ready.front() {
                    if ready.pop_front().is_ok() {
                        println!("worker {worker} serviced around channel {channel}");
                    }
                }
            });
        }
    });
    assert!(ready.empty());
}

fn main() {
    sequential();
    concurrent();
}
