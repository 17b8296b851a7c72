#![no_main]

use libfuzzer_sys::fuzz_target;

use parsort_fuzz::util::u8_as_keys;

fuzz_target!(|data: &[u8]| {
    let mut keys = u8_as_keys::<u16>(data);
    let mut values: Vec<u32> = (0..keys.len() as u32).collect();

    let mut expected: Vec<(u16, u32)> = keys.iter().copied().zip(values.iter().copied()).collect();
    expected.sort_by_key(|&(key, _)| key);

    parsort::sort_pairs(&mut keys, &mut values).unwrap();

    let result: Vec<(u16, u32)> = keys.into_iter().zip(values).collect();
    assert_eq!(result, expected);
});
