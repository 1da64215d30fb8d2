//! The legacy MARS wire id (`marskitID_`, §3 "Request task", §9 "Legacy wire id").
//!
//! Preserved bit-for-bit for wire compatibility: `pid<<48 | tid<<32 |
//! (time & 0xffffffff)`. This is a correlation nonce, not a uniqueness
//! guarantee — two tasks started in the same wall-clock second by two
//! threads that happen to collide on the low 16 bits of their ids would
//! collide too, same as the source.

use std::time::{SystemTime, UNIX_EPOCH};

/// Pack `(pid, tid, unix_seconds)` into a `marskitID_`-compatible nonce.
///
/// `tid` only needs to vary across threads within one process; the source
/// uses `pthread_self()`, an opaque pointer-sized value, for exactly this
/// purpose. Only the low 16 bits of `pid` and `tid` survive the packing, so
/// truncate rather than panic on larger inputs.
pub const fn pack(pid: u64, tid: u64, unix_seconds: u64) -> u64 {
    ((pid & 0xffff) << 48) | ((tid & 0xffff) << 32) | (unix_seconds & 0xffff_ffff)
}

/// Compose a nonce for a newly-constructed `ClientTask`, the way the source
/// does it at construction time when no explicit id is supplied.
pub fn generate() -> u64 {
    let pid = std::process::id() as u64;
    let tid = thread_id();
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    pack(pid, tid, secs)
}

/// A process-unique, thread-local stand-in for `pthread_self()`: std gives no
/// portable numeric thread id, so hash the debug form of [`std::thread::ThreadId`]
/// down to 16 bits, which is all `pack` keeps anyway.
fn thread_id() -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_into_the_documented_layout() {
        let nonce = pack(0x1234, 0x5678, 0x9abc_def0);
        assert_eq!(nonce, (0x1234_u64 << 48) | (0x5678_u64 << 32) | 0x9abc_def0);
    }

    #[test]
    fn time_component_is_truncated_to_32_bits() {
        let nonce = pack(0, 0, 0x1_0000_0001);
        assert_eq!(nonce, 1);
    }

    #[test]
    fn generate_is_nonzero_and_deterministic_in_shape() {
        let a = generate();
        assert_ne!(a, 0);
    }
}
