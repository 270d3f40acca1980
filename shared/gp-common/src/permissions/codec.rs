//! Conversions between permission integers, flag names and [`Permissions`].

use serde::Serialize;

use super::flags::{lookup, Permissions};
use crate::error::{Error, Result};

/// Parse a decimal permission integer as typed by a user.
///
/// Accepts anything that fits in 128 bits so that masks with bits above the
/// known table still parse; those bits are dropped later by [`decode`].
pub fn parse_mask(input: &str) -> Result<u128> {
    input.trim().parse::<u128>().map_err(|source| Error::Parse {
        input: input.to_owned(),
        source,
    })
}

/// Decode a permission integer.
///
/// Never fails. Bits that no known flag occupies are silently ignored.
///
/// # Examples
///
/// ```
/// use gp_common::permissions::{decode, Permissions};
///
/// assert_eq!(decode(2048), Permissions::SEND_MESSAGES);
/// assert!(decode(0).is_empty());
/// ```
#[must_use]
pub const fn decode(mask: u128) -> Permissions {
    // Nothing above bit 63 can be a known flag.
    Permissions::from_bits_truncate((mask & u64::MAX as u128) as u64)
}

/// Result of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoded {
    /// Union of every recognized flag.
    pub permissions: Permissions,
    /// Names that matched no flag, in input order.
    pub skipped: Vec<String>,
}

impl Encoded {
    /// The permission integer.
    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.permissions.bits()
    }

    /// Fail when names were given but none of them were recognized.
    pub fn require_any(self) -> Result<Self> {
        if self.permissions.is_empty() && !self.skipped.is_empty() {
            return Err(Error::NoRecognizedPermissions {
                names: self.skipped,
            });
        }
        Ok(self)
    }
}

/// Encode flag names into a permission set.
///
/// Unknown names are skipped with a warning rather than failing the whole
/// call. Bits are OR-ed, so repeating a name is harmless.
///
/// # Examples
///
/// ```
/// use gp_common::permissions::encode;
///
/// let encoded = encode(["send_messages", "not_a_real_flag"]);
/// assert_eq!(encoded.bits(), 2048);
/// assert_eq!(encoded.skipped, vec!["not_a_real_flag".to_string()]);
/// ```
pub fn encode<I, S>(names: I) -> Encoded
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut permissions = Permissions::empty();
    let mut skipped = Vec::new();

    for name in names {
        let name = name.as_ref();
        match lookup(name) {
            Some(flag) => permissions |= flag.permission,
            None => {
                tracing::warn!(permission = %name, "Unknown permission, skipping");
                skipped.push(name.to_owned());
            }
        }
    }

    Encoded {
        permissions,
        skipped,
    }
}

/// Outcome of comparing two permission sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionDiff {
    /// Set in the first set only.
    pub only_a: Permissions,
    /// Set in the second set only.
    pub only_b: Permissions,
    /// Set in both.
    pub common: Permissions,
}

impl PermissionDiff {
    /// True when both sides decode to the same flags.
    #[must_use]
    pub const fn is_identical(&self) -> bool {
        self.only_a.is_empty() && self.only_b.is_empty()
    }
}

/// Compare two permission sets.
#[must_use]
pub const fn compare(a: Permissions, b: Permissions) -> PermissionDiff {
    PermissionDiff {
        only_a: a.difference(b),
        only_b: b.difference(a),
        common: a.intersection(b),
    }
}

/// Decode two raw masks and compare them.
#[must_use]
pub const fn compare_masks(a: u128, b: u128) -> PermissionDiff {
    compare(decode(a), decode(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_zero_is_empty() {
        assert!(decode(0).is_empty());
        assert!(decode(0).names().is_empty());
    }

    #[test]
    fn test_decode_single_flag() {
        assert_eq!(decode(2048).names(), vec!["send_messages"]);
    }

    #[test]
    fn test_decode_two_flags() {
        assert_eq!(
            decode(2048 + 8192).names(),
            vec!["send_messages", "manage_messages"]
        );
    }

    #[test]
    fn test_decode_drops_unknown_bits() {
        // bit 47 is unassigned, bit 63 and bit 100 are far past the table
        let mask = 2048 | (1u128 << 47) | (1u128 << 63) | (1u128 << 100);
        assert_eq!(decode(mask), Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_decode_all_ones() {
        assert_eq!(decode(u128::MAX), Permissions::all());
    }

    #[test]
    fn test_round_trip_over_known_bits() {
        let known = u128::from(Permissions::all().bits());
        for mask in [0u128, 1, 8, 2048, 10240, 3_971_431_638_498_551, u128::from(u64::MAX), u128::MAX] {
            let once = decode(mask);
            let again = decode(u128::from(encode(once.names()).bits()));
            assert_eq!(u128::from(again.bits()), mask & known, "mask {mask}");
        }
    }

    #[test]
    fn test_round_trip_every_single_bit() {
        let known = u128::from(Permissions::all().bits());
        for bit in 0..128 {
            let mask = 1u128 << bit;
            let decoded = decode(mask);
            if known & mask == 0 {
                assert!(decoded.is_empty(), "bit {bit} should be dropped");
                continue;
            }
            assert_eq!(decoded.names().len(), 1, "bit {bit}");
            let again = encode(decoded.names());
            assert_eq!(u128::from(again.bits()), mask, "bit {bit}");
            assert!(again.skipped.is_empty());
        }
    }

    #[test]
    fn test_round_trip_wide_masks() {
        let known = u128::from(Permissions::all().bits());
        // xorshift128+ with a fixed seed, enough spread to hit high and low bits
        let (mut s0, mut s1) = (0x9E37_79B9_7F4A_7C15_u64, 0xD1B5_4A32_D192_ED03_u64);
        let mut next = || {
            let mut x = s0;
            let y = s1;
            s0 = y;
            x ^= x << 23;
            s1 = x ^ y ^ (x >> 17) ^ (y >> 26);
            s1.wrapping_add(y)
        };

        for _ in 0..256 {
            let mask = (u128::from(next()) << 64) | u128::from(next());
            let again = decode(u128::from(encode(decode(mask).names()).bits()));
            assert_eq!(u128::from(again.bits()), mask & known, "mask {mask}");
        }
    }

    #[test]
    fn test_encode_sums_bits() {
        let encoded = encode(["send_messages", "manage_messages"]);
        assert_eq!(encoded.bits(), 10240);
        assert!(encoded.skipped.is_empty());
    }

    #[test]
    fn test_encode_skips_unknown_names() {
        let encoded = encode(["send_messages", "not_a_real_flag"]);
        assert_eq!(encoded.bits(), 2048);
        assert_eq!(encoded.skipped, vec!["not_a_real_flag"]);
    }

    #[test]
    fn test_encode_duplicates_do_not_double_count() {
        let encoded = encode(["send_messages", "send_messages"]);
        assert_eq!(encoded.bits(), 2048);
    }

    #[test]
    fn test_encode_empty_input() {
        let encoded = encode(Vec::<String>::new());
        assert_eq!(encoded.bits(), 0);
        assert!(encoded.skipped.is_empty());
        assert!(encoded.require_any().is_ok());
    }

    #[test]
    fn test_require_any_rejects_all_unknown() {
        let err = encode(["bogus", "nope"]).require_any().unwrap_err();
        match err {
            Error::NoRecognizedPermissions { names } => assert_eq!(names, vec!["bogus", "nope"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_require_any_accepts_partial_match() {
        let encoded = encode(["bogus", "speak"]).require_any().unwrap();
        assert_eq!(encoded.permissions, Permissions::SPEAK);
        assert_eq!(encoded.skipped, vec!["bogus"]);
    }

    #[test]
    fn test_parse_mask() {
        assert_eq!(parse_mask("2048").unwrap(), 2048);
        assert_eq!(parse_mask(" 10240 ").unwrap(), 10240);
        assert_eq!(
            parse_mask("340282366920938463463374607431768211455").unwrap(),
            u128::MAX
        );
    }

    #[test]
    fn test_parse_mask_rejects_garbage() {
        for input in ["abc", "-1", "", "0x800", "1.5", "340282366920938463463374607431768211456"] {
            let err = parse_mask(input).unwrap_err();
            assert!(matches!(err, Error::Parse { .. }), "{input} should fail");
        }
    }

    #[test]
    fn test_compare() {
        let diff = compare(decode(2048), decode(2048 + 8192));
        assert_eq!(diff.common.names(), vec!["send_messages"]);
        assert!(diff.only_a.is_empty());
        assert_eq!(diff.only_b.names(), vec!["manage_messages"]);
        assert!(!diff.is_identical());
    }

    #[test]
    fn test_compare_identical_masks() {
        // unknown bits do not make two masks differ
        let diff = compare_masks(2048, 2048 | (1u128 << 47));
        assert!(diff.is_identical());
        assert_eq!(diff.common, Permissions::SEND_MESSAGES);
    }

    #[test]
    fn test_compare_disjoint() {
        let diff = compare_masks(8, 2048);
        assert!(diff.common.is_empty());
        assert_eq!(diff.only_a, Permissions::ADMINISTRATOR);
        assert_eq!(diff.only_b, Permissions::SEND_MESSAGES);
    }
}
