//! 32-bit FNV-1a string hashing.
//!
//! Seeds are derived from short identity strings (URL fragment, slide id,
//! path). The hash only needs good avalanche on small inputs and must give
//! the same value on every platform, so it is computed with explicit 32-bit
//! wrapping arithmetic. It is not suitable for any security purpose.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;

/// FNV 32-bit prime.
pub const FNV_PRIME: u32 = 16_777_619;

/// Hashes a string with the 32-bit FNV-1a variant used for seeds.
///
/// Each UTF-16 code unit of the input is XORed into the accumulator, which is
/// then multiplied by [`FNV_PRIME`] with wraparound. For text in the Basic
/// Multilingual Plane a code unit is exactly the character's code point.
///
/// # Examples
///
/// ```
/// use backdrop_core::hash::fnv1a_32;
///
/// assert_eq!(fnv1a_32(""), 2_166_136_261);
/// assert_eq!(fnv1a_32("a"), 0xe40c_292c);
/// ```
pub fn fnv1a_32(input: &str) -> u32 {
    input.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}
