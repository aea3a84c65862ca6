//! Byte-order reversal applied to request payloads.

/// Reverses `bytes` in place.
///
/// Element `i` of the result is element `n - 1 - i` of the input. Empty and
/// single-byte slices are left untouched, and applying the transform twice
/// restores the original order.
pub fn reverse_in_place(bytes: &mut [u8]) {
    bytes.reverse();
}

/// Returns `bytes` with its order reversed.
///
/// # Example
///
/// ```
/// use tac_guest::transform::reversed;
///
/// assert_eq!(reversed(b"hello".to_vec()), b"olleh");
/// ```
#[must_use]
pub fn reversed(mut bytes: Vec<u8>) -> Vec<u8> {
    reverse_in_place(&mut bytes);
    bytes
}
