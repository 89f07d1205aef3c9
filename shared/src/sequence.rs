use crate::SyncIndex;

/// Whether `s1` comes after `s2` on the wrapping sync sequence.
/// sequence_greater_than(2, 1) == true
/// sequence_greater_than(0, 65535) == true
/// sequence_greater_than(1, 1) == false
pub fn sequence_greater_than(s1: SyncIndex, s2: SyncIndex) -> bool {
    wrapping_diff(s2, s1) > 0
}

/// Whether `s1` comes before `s2` on the wrapping sync sequence.
pub fn sequence_less_than(s1: SyncIndex, s2: SyncIndex) -> bool {
    sequence_greater_than(s2, s1)
}

/// Signed distance travelled from `a` to reach `b`.
///
/// ```
/// # use spatial_storage_shared::wrapping_diff;
/// assert_eq!(wrapping_diff(1, 2), 1);
/// assert_eq!(wrapping_diff(2, 1), -1);
/// assert_eq!(wrapping_diff(65535, 0), 1);
/// assert_eq!(wrapping_diff(0, 65535), -1);
/// ```
pub fn wrapping_diff(a: SyncIndex, b: SyncIndex) -> i16 {
    b.wrapping_sub(a) as i16
}
