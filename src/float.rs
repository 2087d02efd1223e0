//! Bit-exact solver literals for IEEE-754 doubles.
//!
//! A double is encoded as an SMT-LIB floating-point literal built from its three raw bit fields:
//!
//! ```text
//! (fp #b<sign> #b<exponent: 11 bits> #x<significand: 13 nibbles>)
//! ```
//!
//! The encoding is a pure reinterpretation of the bit pattern, so signed zeros, infinities,
//! subnormals and NaN payloads all survive without special cases.
//!
//! # Examples
//!
//! ```
//! use absint_testkit::float::{encode, FloatLiteral};
//!
//! assert_eq!(encode(1.0), "(fp #b0 #b01111111111 #x0000000000000)");
//!
//! let lit: FloatLiteral = "(fp #b1 #b00000000000 #x0000000000000)".parse().unwrap();
//! assert_eq!(lit.to_bits(), (-0.0f64).to_bits());
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

const EXPONENT_BITS: u32 = 11;
const SIGNIFICAND_BITS: u32 = 52;
const EXPONENT_MASK: u64 = (1 << EXPONENT_BITS) - 1;
const SIGNIFICAND_MASK: u64 = (1 << SIGNIFICAND_BITS) - 1;

/// Test doubles used by the fixture generator when none are given.
#[allow(clippy::excessive_precision)]
pub const DEFAULT_VALUES: [f64; 10] = [
    1.0,
    -1.0,
    2.0,
    -2.0,
    0.0,
    -0.0,
    f64::INFINITY,
    f64::NEG_INFINITY,
    4.9406564584124654e-324,
    -4.9406564584124654e-324,
];

/// Identifiers paired with the test doubles, in order.
pub const ALPHABET: std::ops::RangeInclusive<char> = 'a'..='z';

/// Default prefix of a verification directive.
pub const DEFAULT_DIRECTIVE: &str = "; VERIFY:";

/// A binary64 value split into its raw fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FloatLiteral {
    sign: bool,
    exponent: u16,
    significand: u64,
}

impl FloatLiteral {
    pub fn from_f64(x: f64) -> Self {
        Self::from_bits(x.to_bits())
    }

    pub fn from_bits(bits: u64) -> Self {
        Self {
            sign: bits >> 63 == 1,
            exponent: ((bits >> SIGNIFICAND_BITS) & EXPONENT_MASK) as u16,
            significand: bits & SIGNIFICAND_MASK,
        }
    }

    pub fn to_bits(self) -> u64 {
        ((self.sign as u64) << 63) | ((self.exponent as u64) << SIGNIFICAND_BITS) | self.significand
    }

    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.to_bits())
    }

    /// Sign bit (`true` for negative).
    pub fn sign(&self) -> bool {
        self.sign
    }

    /// Biased exponent (11 bits).
    pub fn exponent(&self) -> u16 {
        self.exponent
    }

    /// Trailing significand (52 bits).
    pub fn significand(&self) -> u64 {
        self.significand
    }
}

impl From<f64> for FloatLiteral {
    fn from(x: f64) -> Self {
        Self::from_f64(x)
    }
}

impl fmt::Display for FloatLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(fp #b{} #b{:011b} #x{:013x})",
            self.sign as u8, self.exponent, self.significand
        )
    }
}

impl FromStr for FloatLiteral {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidLiteral(s.to_string());

        let body = s
            .trim()
            .strip_prefix("(fp")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let fields: Vec<&str> = body.split_whitespace().collect();
        let &[sign, exponent, significand] = fields.as_slice() else {
            return Err(invalid());
        };

        let field = |text: &str, tag: &str, radix: u32, width: usize| -> Result<u64> {
            let digits = text.strip_prefix(tag).ok_or_else(invalid)?;
            if digits.len() != width || !digits.chars().all(|c| c.is_digit(radix)) {
                return Err(invalid());
            }
            u64::from_str_radix(digits, radix).map_err(|_| invalid())
        };

        let sign = field(sign, "#b", 2, 1)?;
        let exponent = field(exponent, "#b", 2, EXPONENT_BITS as usize)?;
        let significand = field(significand, "#x", 16, (SIGNIFICAND_BITS / 4) as usize)?;

        Ok(Self {
            sign: sign == 1,
            exponent: exponent as u16,
            significand,
        })
    }
}

/// Encodes `x` as a solver literal.
pub fn encode(x: f64) -> String {
    FloatLiteral::from_f64(x).to_string()
}

/// Matched verification directives and the instructions that materialize the checked values.
///
/// The i-th directive and the i-th instruction refer to the same identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixture {
    pub checks: Vec<String>,
    pub instructions: Vec<String>,
}

impl Fixture {
    /// Pairs `names` with `values` (stopping at the shorter of the two).
    ///
    /// Each instruction adds the value to zero using a hexadecimal double literal, which spells
    /// out the exact bit pattern and forces the code generator to materialize it.
    pub fn new(directive: &str, names: impl IntoIterator<Item = char>, values: &[f64]) -> Self {
        let mut fixture = Fixture::default();
        for (name, &x) in names.into_iter().zip(values) {
            fixture.checks.push(format!("{} %{} -> {}", directive, name, encode(x)));
            fixture
                .instructions
                .push(format!("%{} = fadd double 0.0, 0x{:016X}", name, x.to_bits()));
        }
        fixture
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.checks {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        for line in &self.instructions {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_encode_one() {
        assert_eq!(encode(1.0), "(fp #b0 #b01111111111 #x0000000000000)");
        assert_eq!(encode(-2.0), "(fp #b1 #b10000000000 #x0000000000000)");
    }

    #[test]
    fn test_encode_special() {
        assert_eq!(encode(f64::INFINITY), "(fp #b0 #b11111111111 #x0000000000000)");
        assert_eq!(encode(f64::NEG_INFINITY), "(fp #b1 #b11111111111 #x0000000000000)");
        assert_eq!(encode(4.9406564584124654e-324), "(fp #b0 #b00000000000 #x0000000000001)");
        assert_eq!(encode(-4.9406564584124654e-324), "(fp #b1 #b00000000000 #x0000000000001)");
        assert_eq!(encode(0.1), "(fp #b0 #b01111111011 #x999999999999a)");
    }

    #[test]
    fn test_signed_zero() {
        let pos = FloatLiteral::from_f64(0.0);
        let neg = FloatLiteral::from_f64(-0.0);
        assert_ne!(pos, neg);
        assert_eq!(pos.exponent(), neg.exponent());
        assert_eq!(pos.significand(), neg.significand());
        assert!(!pos.sign());
        assert!(neg.sign());
        assert_eq!(encode(0.0), "(fp #b0 #b00000000000 #x0000000000000)");
        assert_eq!(encode(-0.0), "(fp #b1 #b00000000000 #x0000000000000)");
    }

    #[test]
    fn test_roundtrip_default_values() {
        for &x in DEFAULT_VALUES.iter() {
            let lit: FloatLiteral = encode(x).parse().unwrap();
            assert_eq!(lit.to_bits(), x.to_bits(), "x = {:e}", x);
        }
    }

    #[test]
    fn test_nan_keeps_payload() {
        let nan = f64::from_bits(0x7ff8_0000_0000_0001);
        let lit: FloatLiteral = encode(nan).parse().unwrap();
        assert_eq!(lit.to_bits(), nan.to_bits());
        assert!(lit.to_f64().is_nan());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for s in [
            "",
            "(fp #b0 #b01111111111)",
            "(fp #b2 #b01111111111 #x0000000000000)",
            "(fp #b0 #b0111111111 #x0000000000000)",
            "(fp #b0 #b01111111111 #x000000000000)",
            "(fp #b0 #x01111111111 #x0000000000000)",
            "(fp #b0 #b01111111111 #x000000000000g)",
            "fp #b0 #b01111111111 #x0000000000000",
        ] {
            assert!(matches!(s.parse::<FloatLiteral>(), Err(Error::InvalidLiteral(_))), "{:?}", s);
        }
    }

    #[test]
    fn test_fixture_pairs_in_order() {
        let fixture = Fixture::new(DEFAULT_DIRECTIVE, ALPHABET, &[1.0, -0.0]);
        assert_eq!(
            fixture.checks,
            vec![
                "; VERIFY: %a -> (fp #b0 #b01111111111 #x0000000000000)",
                "; VERIFY: %b -> (fp #b1 #b00000000000 #x0000000000000)",
            ]
        );
        assert_eq!(
            fixture.instructions,
            vec![
                "%a = fadd double 0.0, 0x3FF0000000000000",
                "%b = fadd double 0.0, 0x8000000000000000",
            ]
        );
    }

    #[test]
    fn test_fixture_display() {
        let fixture = Fixture::new("CHECK:", ALPHABET, &DEFAULT_VALUES);
        assert_eq!(fixture.len(), DEFAULT_VALUES.len());

        let text = fixture.to_string();
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].lines().all(|l| l.starts_with("CHECK: %")));
        assert!(blocks[1].lines().all(|l| l.contains(" = fadd double 0.0, 0x")));
        assert!(blocks[1].starts_with("%a = "));
        assert!(blocks[1].trim_end().ends_with("%j = fadd double 0.0, 0x8000000000000001"));
    }

    #[test]
    fn test_fixture_stops_at_shorter() {
        let fixture = Fixture::new(DEFAULT_DIRECTIVE, ['x'], &DEFAULT_VALUES);
        assert_eq!(fixture.len(), 1);
        assert!(Fixture::new(DEFAULT_DIRECTIVE, ALPHABET, &[]).is_empty());
    }
}
