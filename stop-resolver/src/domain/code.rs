//! Bracketed stop codes.

use std::fmt;

use super::Direction;

/// Codes whose platform faces outbound traffic.
const OUTBOUND_CODES: [&str; 6] = ["IK", "IA", "IC", "IE", "IG", "II"];

/// Codes whose platform faces inbound traffic.
const INBOUND_CODES: [&str; 5] = ["IF", "IB", "ID", "IH", "IJ"];

/// Error returned when parsing an invalid stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop code: {reason}")]
pub struct InvalidStopCode {
    reason: &'static str,
}

/// A short alphabetic platform/bay token, e.g. `IK` in `Princes St (Stop IK)`.
///
/// Stop codes are 1 to 4 uppercase ASCII letters. This type guarantees that
/// any `StopCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use stop_resolver::domain::{Direction, StopCode};
///
/// let ik = StopCode::parse("IK").unwrap();
/// assert_eq!(ik.as_str(), "IK");
/// assert_eq!(ik.direction(), Some(Direction::Outbound));
///
/// // Codes outside the table carry no direction
/// assert_eq!(StopCode::parse("ZZ").unwrap().direction(), None);
///
/// assert!(StopCode::parse("ik").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StopCode {
    bytes: [u8; 4],
    len: u8,
}

impl StopCode {
    /// Parse a stop code. The input must be 1 to 4 uppercase ASCII letters.
    pub fn parse(s: &str) -> Result<Self, InvalidStopCode> {
        let raw = s.as_bytes();

        if raw.is_empty() || raw.len() > 4 {
            return Err(InvalidStopCode {
                reason: "must be 1 to 4 characters",
            });
        }

        if !raw.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidStopCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        let mut bytes = [0u8; 4];
        bytes[..raw.len()].copy_from_slice(raw);

        Ok(Self {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }

    /// Look the code up in the fixed platform table.
    ///
    /// Returns `None` for codes the table does not know.
    pub fn direction(&self) -> Option<Direction> {
        let code = self.as_str();
        if OUTBOUND_CODES.contains(&code) {
            Some(Direction::Outbound)
        } else if INBOUND_CODES.contains(&code) {
            Some(Direction::Inbound)
        } else {
            None
        }
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.as_str())
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn roundtrip(s in "[A-Z]{1,4}") {
            let code = StopCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        #[test]
        fn lowercase_rejected(s in "[a-z]{1,4}") {
            prop_assert!(StopCode::parse(&s).is_err());
        }

        #[test]
        fn too_long_rejected(s in "[A-Z]{5,10}") {
            prop_assert!(StopCode::parse(&s).is_err());
        }
    }
}
