#![no_main]

use libfuzzer_sys::fuzz_target;

use parsort::Tuning;
use parsort_fuzz::util::u8_as_keys;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // The first byte picks the tuning, the rest become keys.
    let tuning = Tuning {
        radix_bits: (data[0] % 16) as u32 + 1,
        partitions: (data[0] >> 4) as usize,
        parallel_min_len: 0,
    };

    let mut keys = u8_as_keys::<u32>(&data[1..]);
    let mut expected = keys.clone();
    expected.sort_unstable();

    parsort::sort_with_tuning(&mut keys, tuning).unwrap();
    assert_eq!(keys, expected);
});
