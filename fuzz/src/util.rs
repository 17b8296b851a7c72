use std::mem;
use std::ptr;

/// Reinterprets the fuzzer byte soup as keys, dropping the unaligned tail.
pub fn u8_as_keys<K: parsort::Key>(data: &[u8]) -> Vec<K> {
    let data_aligned = &data[..(data.len() - (data.len() % mem::size_of::<K>()))];
    if data_aligned.is_empty() {
        return Vec::new();
    }

    let len = data_aligned.len() / mem::size_of::<K>();
    let mut v: Vec<K> = Vec::with_capacity(len);

    // SAFETY: K is a plain integer type, the allocation holds exactly `len`
    // elements and the copy initializes every byte of them.
    unsafe {
        ptr::copy_nonoverlapping(
            data_aligned.as_ptr(),
            v.as_mut_ptr() as *mut u8,
            data_aligned.len(),
        );
        v.set_len(len);
    }

    v
}
