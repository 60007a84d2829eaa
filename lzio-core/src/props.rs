//! Typed coder properties.
//!
//! Coders are configured through a closed set of property tags, each tag
//! carrying a value of the type that tag requires. Pairing tag and value in
//! one enum ([`CoderProperty`]) makes a mispaired or ill-typed
//! configuration unrepresentable, so validation reduces to range checks at
//! configuration time.
//!
//! [`CoderSettings`] is the validated LZMA-family settings block those
//! checks feed. It owns the invariants encoder and decoder must agree on,
//! including the five-byte property header (packed `lc`/`lp`/`pb` byte
//! followed by the little-endian dictionary size) that travels with every
//! LZMA-family stream.

use std::fmt;
use std::io::Write;

use crate::error::{LzioError, Result};

/// Smallest accepted dictionary size (4 KiB).
pub const DICT_SIZE_MIN: u32 = 1 << 12;

/// Largest accepted dictionary size (1 GiB).
pub const DICT_SIZE_MAX: u32 = 1 << 30;

/// Serialized property header length in bytes.
pub const PROPS_LEN: usize = 5;

/// Property tags a coder may understand.
///
/// The set is closed: it covers the LZMA family plus the tags of sibling
/// algorithm families that share the configuration surface. Any given
/// coder accepts a subset and rejects the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    /// Dictionary (history window) size in bytes.
    DictionarySize,
    /// Memory ceiling for the coder, in bytes.
    UsedMemorySize,
    /// Model order (PPM-family coders).
    Order,
    /// Block size (block-oriented coders).
    BlockSize,
    /// Number of position state bits (`pb`).
    PosStateBits,
    /// Number of literal context bits (`lc`).
    LitContextBits,
    /// Number of literal position bits (`lp`).
    LitPosBits,
    /// Fast-byte threshold for match finding.
    NumFastBytes,
    /// Match finder implementation.
    MatchFinder,
    /// Match finder search depth cap.
    MatchFinderCycles,
    /// Number of passes over the input.
    NumPasses,
    /// Algorithm variant selector.
    Algorithm,
    /// Worker thread count.
    NumThreads,
    /// Whether to emit an end-of-stream marker.
    EndMarker,
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DictionarySize => "dictionary-size",
            Self::UsedMemorySize => "used-memory-size",
            Self::Order => "order",
            Self::BlockSize => "block-size",
            Self::PosStateBits => "pos-state-bits",
            Self::LitContextBits => "lit-context-bits",
            Self::LitPosBits => "lit-pos-bits",
            Self::NumFastBytes => "num-fast-bytes",
            Self::MatchFinder => "match-finder",
            Self::MatchFinderCycles => "match-finder-cycles",
            Self::NumPasses => "num-passes",
            Self::Algorithm => "algorithm",
            Self::NumThreads => "num-threads",
            Self::EndMarker => "end-marker",
        };
        f.write_str(name)
    }
}

/// Match finder implementations an encoder may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchFinder {
    /// Binary tree, 2-byte hash.
    Bt2,
    /// Binary tree, 4-byte hash.
    #[default]
    Bt4,
    /// Hash chain, 4-byte hash.
    Hc4,
}

impl MatchFinder {
    /// Parse a match finder from its conventional name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("bt2") {
            Some(Self::Bt2)
        } else if name.eq_ignore_ascii_case("bt4") {
            Some(Self::Bt4)
        } else if name.eq_ignore_ascii_case("hc4") {
            Some(Self::Hc4)
        } else {
            None
        }
    }

    /// The conventional name of this match finder.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bt2 => "bt2",
            Self::Bt4 => "bt4",
            Self::Hc4 => "hc4",
        }
    }
}

impl fmt::Display for MatchFinder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A property tag paired with the value type that tag requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoderProperty {
    /// Dictionary size in bytes.
    DictionarySize(u32),
    /// Memory ceiling in bytes.
    UsedMemorySize(u64),
    /// Model order.
    Order(u32),
    /// Block size in bytes.
    BlockSize(u32),
    /// Position state bits (`pb`).
    PosStateBits(u32),
    /// Literal context bits (`lc`).
    LitContextBits(u32),
    /// Literal position bits (`lp`).
    LitPosBits(u32),
    /// Fast-byte threshold.
    NumFastBytes(u32),
    /// Match finder selection.
    MatchFinder(MatchFinder),
    /// Match finder search depth cap.
    MatchFinderCycles(u32),
    /// Number of passes over the input.
    NumPasses(u32),
    /// Algorithm variant selector.
    Algorithm(u32),
    /// Worker thread count.
    NumThreads(u32),
    /// Whether to emit an end-of-stream marker.
    EndMarker(bool),
}

impl CoderProperty {
    /// The tag this property sets.
    pub fn id(&self) -> PropertyId {
        match self {
            Self::DictionarySize(_) => PropertyId::DictionarySize,
            Self::UsedMemorySize(_) => PropertyId::UsedMemorySize,
            Self::Order(_) => PropertyId::Order,
            Self::BlockSize(_) => PropertyId::BlockSize,
            Self::PosStateBits(_) => PropertyId::PosStateBits,
            Self::LitContextBits(_) => PropertyId::LitContextBits,
            Self::LitPosBits(_) => PropertyId::LitPosBits,
            Self::NumFastBytes(_) => PropertyId::NumFastBytes,
            Self::MatchFinder(_) => PropertyId::MatchFinder,
            Self::MatchFinderCycles(_) => PropertyId::MatchFinderCycles,
            Self::NumPasses(_) => PropertyId::NumPasses,
            Self::Algorithm(_) => PropertyId::Algorithm,
            Self::NumThreads(_) => PropertyId::NumThreads,
            Self::EndMarker(_) => PropertyId::EndMarker,
        }
    }
}

/// Validated LZMA-family coder settings.
///
/// This is the configuration block the property capability traits operate
/// on. It runs no algorithm; it carries the settings an LZMA-family
/// encoder consumes and a matching decoder reconstructs, and it enforces
/// their ranges whenever it is mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoderSettings {
    /// Dictionary size in bytes.
    pub dict_size: u32,
    /// Literal context bits (`lc`, 0-8).
    pub lit_context_bits: u32,
    /// Literal position bits (`lp`, 0-4).
    pub lit_pos_bits: u32,
    /// Position state bits (`pb`, 0-4).
    pub pos_state_bits: u32,
    /// Fast-byte threshold (5-273).
    pub num_fast_bytes: u32,
    /// Match finder selection.
    pub match_finder: MatchFinder,
    /// Match finder search depth cap.
    pub match_finder_cycles: u32,
    /// Algorithm variant (0 = fast, 2 = max).
    pub algorithm: u32,
    /// Emit an end-of-stream marker instead of relying on a known size.
    pub end_marker: bool,
}

impl Default for CoderSettings {
    fn default() -> Self {
        Self {
            dict_size: 1 << 22,
            lit_context_bits: 3,
            lit_pos_bits: 0,
            pos_state_bits: 2,
            num_fast_bytes: 32,
            match_finder: MatchFinder::Bt4,
            match_finder_cycles: 32,
            algorithm: 2,
            end_marker: false,
        }
    }
}

impl CoderSettings {
    /// Apply a batch of properties atomically.
    ///
    /// Either every property validates and all are committed, or the first
    /// failure is returned and the settings are left exactly as they were.
    pub fn apply(&mut self, props: &[CoderProperty]) -> Result<()> {
        let mut staged = self.clone();
        for prop in props {
            staged.apply_one(prop)?;
        }
        *self = staged;
        Ok(())
    }

    fn apply_one(&mut self, prop: &CoderProperty) -> Result<()> {
        match *prop {
            CoderProperty::DictionarySize(size) => {
                if !(DICT_SIZE_MIN..=DICT_SIZE_MAX).contains(&size) {
                    return Err(LzioError::invalid_property(
                        PropertyId::DictionarySize,
                        format!("{size} is outside {DICT_SIZE_MIN}..={DICT_SIZE_MAX}"),
                    ));
                }
                self.dict_size = size;
            }
            CoderProperty::PosStateBits(bits) => {
                if bits > 4 {
                    return Err(LzioError::invalid_property(
                        PropertyId::PosStateBits,
                        format!("{bits} exceeds maximum of 4"),
                    ));
                }
                self.pos_state_bits = bits;
            }
            CoderProperty::LitContextBits(bits) => {
                if bits > 8 {
                    return Err(LzioError::invalid_property(
                        PropertyId::LitContextBits,
                        format!("{bits} exceeds maximum of 8"),
                    ));
                }
                self.lit_context_bits = bits;
            }
            CoderProperty::LitPosBits(bits) => {
                if bits > 4 {
                    return Err(LzioError::invalid_property(
                        PropertyId::LitPosBits,
                        format!("{bits} exceeds maximum of 4"),
                    ));
                }
                self.lit_pos_bits = bits;
            }
            CoderProperty::NumFastBytes(count) => {
                if !(5..=273).contains(&count) {
                    return Err(LzioError::invalid_property(
                        PropertyId::NumFastBytes,
                        format!("{count} is outside 5..=273"),
                    ));
                }
                self.num_fast_bytes = count;
            }
            CoderProperty::MatchFinder(finder) => {
                self.match_finder = finder;
            }
            CoderProperty::MatchFinderCycles(cycles) => {
                if cycles == 0 {
                    return Err(LzioError::invalid_property(
                        PropertyId::MatchFinderCycles,
                        "must be at least 1",
                    ));
                }
                self.match_finder_cycles = cycles;
            }
            CoderProperty::Algorithm(variant) => {
                if variant > 2 {
                    return Err(LzioError::invalid_property(
                        PropertyId::Algorithm,
                        format!("{variant} exceeds maximum of 2"),
                    ));
                }
                self.algorithm = variant;
            }
            CoderProperty::EndMarker(flag) => {
                self.end_marker = flag;
            }
            // Tags of other algorithm families, and threading, which this
            // single-threaded settings block does not model.
            CoderProperty::UsedMemorySize(_)
            | CoderProperty::Order(_)
            | CoderProperty::BlockSize(_)
            | CoderProperty::NumPasses(_)
            | CoderProperty::NumThreads(_) => {
                return Err(LzioError::unsupported_property(prop.id()));
            }
        }
        Ok(())
    }

    /// Pack `lc`/`lp`/`pb` into the single header byte.
    pub fn props_byte(&self) -> u8 {
        ((self.pos_state_bits * 5 + self.lit_pos_bits) * 9 + self.lit_context_bits) as u8
    }

    /// Serialize the five-byte property header.
    ///
    /// Layout: packed `lc`/`lp`/`pb` byte, then the dictionary size as a
    /// little-endian `u32`.
    pub fn write_props(&self, output: &mut dyn Write) -> Result<()> {
        let mut header = [0u8; PROPS_LEN];
        header[0] = self.props_byte();
        header[1..].copy_from_slice(&self.dict_size.to_le_bytes());
        output.write_all(&header)?;
        Ok(())
    }

    /// Parse a five-byte property header as written by
    /// [`write_props`](CoderSettings::write_props).
    ///
    /// Fields the header does not carry keep their defaults. A dictionary
    /// size below [`DICT_SIZE_MIN`] is rounded up, matching what decoders
    /// of the format do; anything else malformed is rejected.
    pub fn parse_props(props: &[u8]) -> Result<Self> {
        if props.len() != PROPS_LEN {
            return Err(LzioError::invalid_argument(format!(
                "property header must be {PROPS_LEN} bytes, got {}",
                props.len()
            )));
        }

        let packed = props[0] as u32;
        let pos_state_bits = packed / 45;
        let lit_pos_bits = (packed % 45) / 9;
        let lit_context_bits = packed % 9;
        if pos_state_bits > 4 {
            return Err(LzioError::invalid_argument(format!(
                "property byte {:#04x} is out of range",
                props[0]
            )));
        }

        let dict_size = u32::from_le_bytes([props[1], props[2], props[3], props[4]]);
        if dict_size > DICT_SIZE_MAX {
            return Err(LzioError::invalid_argument(format!(
                "dictionary size {dict_size} exceeds maximum {DICT_SIZE_MAX}"
            )));
        }

        Ok(Self {
            dict_size: dict_size.max(DICT_SIZE_MIN),
            lit_context_bits,
            lit_pos_bits,
            pos_state_bits,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_property_pairs_with_id() {
        assert_eq!(
            CoderProperty::DictionarySize(1 << 16).id(),
            PropertyId::DictionarySize
        );
        assert_eq!(
            CoderProperty::MatchFinder(MatchFinder::Hc4).id(),
            PropertyId::MatchFinder
        );
        assert_eq!(CoderProperty::EndMarker(true).id(), PropertyId::EndMarker);
    }

    #[test]
    fn test_match_finder_names() {
        assert_eq!(MatchFinder::from_name("BT4"), Some(MatchFinder::Bt4));
        assert_eq!(MatchFinder::from_name("hc4"), Some(MatchFinder::Hc4));
        assert_eq!(MatchFinder::from_name("bt3"), None);
        assert_eq!(MatchFinder::Bt2.name(), "bt2");
    }

    #[test]
    fn test_apply_commits_all() {
        let mut settings = CoderSettings::default();
        settings
            .apply(&[
                CoderProperty::DictionarySize(1 << 16),
                CoderProperty::PosStateBits(0),
                CoderProperty::LitContextBits(0),
                CoderProperty::LitPosBits(2),
                CoderProperty::NumFastBytes(64),
                CoderProperty::MatchFinder(MatchFinder::Bt2),
                CoderProperty::MatchFinderCycles(16),
                CoderProperty::Algorithm(0),
                CoderProperty::EndMarker(true),
            ])
            .unwrap();

        assert_eq!(settings.dict_size, 1 << 16);
        assert_eq!(settings.pos_state_bits, 0);
        assert_eq!(settings.lit_context_bits, 0);
        assert_eq!(settings.lit_pos_bits, 2);
        assert_eq!(settings.num_fast_bytes, 64);
        assert_eq!(settings.match_finder, MatchFinder::Bt2);
        assert_eq!(settings.match_finder_cycles, 16);
        assert_eq!(settings.algorithm, 0);
        assert!(settings.end_marker);
    }

    #[test]
    fn test_apply_is_atomic_on_invalid_value() {
        let mut settings = CoderSettings::default();
        let before = settings.clone();

        let err = settings
            .apply(&[
                CoderProperty::DictionarySize(1 << 16),
                CoderProperty::NumFastBytes(999),
            ])
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(settings, before, "failed apply must not change settings");
    }

    #[test]
    fn test_apply_rejects_unsupported_tags() {
        let mut settings = CoderSettings::default();
        let before = settings.clone();

        for prop in [
            CoderProperty::UsedMemorySize(1 << 20),
            CoderProperty::Order(8),
            CoderProperty::BlockSize(1 << 20),
            CoderProperty::NumPasses(2),
            CoderProperty::NumThreads(4),
        ] {
            let err = settings.apply(&[prop]).unwrap_err();
            assert!(
                matches!(err, LzioError::UnsupportedProperty { id } if id == prop.id()),
                "expected unsupported-property for {}",
                prop.id()
            );
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert_eq!(settings, before);
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let mut settings = CoderSettings::default();
        for prop in [
            CoderProperty::DictionarySize(DICT_SIZE_MIN - 1),
            CoderProperty::DictionarySize(DICT_SIZE_MAX + 1),
            CoderProperty::PosStateBits(5),
            CoderProperty::LitContextBits(9),
            CoderProperty::LitPosBits(5),
            CoderProperty::NumFastBytes(4),
            CoderProperty::NumFastBytes(274),
            CoderProperty::MatchFinderCycles(0),
            CoderProperty::Algorithm(3),
        ] {
            let err = settings.apply(&[prop]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{}", prop.id());
        }
        assert_eq!(settings, CoderSettings::default());
    }

    #[test]
    fn test_props_byte_default() {
        // lc=3, lp=0, pb=2 packs to (2*5 + 0)*9 + 3 = 93.
        assert_eq!(CoderSettings::default().props_byte(), 93);
    }

    #[test]
    fn test_props_round_trip() {
        let mut settings = CoderSettings::default();
        settings
            .apply(&[
                CoderProperty::DictionarySize(1 << 20),
                CoderProperty::LitContextBits(0),
                CoderProperty::LitPosBits(2),
                CoderProperty::PosStateBits(1),
            ])
            .unwrap();

        let mut header = Vec::new();
        settings.write_props(&mut header).unwrap();
        assert_eq!(header.len(), PROPS_LEN);

        let parsed = CoderSettings::parse_props(&header).unwrap();
        assert_eq!(parsed.dict_size, 1 << 20);
        assert_eq!(parsed.lit_context_bits, 0);
        assert_eq!(parsed.lit_pos_bits, 2);
        assert_eq!(parsed.pos_state_bits, 1);
    }

    #[test]
    fn test_parse_props_rejects_wrong_length() {
        let err = CoderSettings::parse_props(&[93, 0, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_parse_props_rejects_bad_packed_byte() {
        // 225 = (5*5 + 0)*9 + 0, i.e. pb = 5.
        let err = CoderSettings::parse_props(&[225, 0, 0, 16, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_parse_props_rounds_tiny_dictionary_up() {
        let mut header = vec![93u8];
        header.extend_from_slice(&1024u32.to_le_bytes());
        let parsed = CoderSettings::parse_props(&header).unwrap();
        assert_eq!(parsed.dict_size, DICT_SIZE_MIN);
    }

    #[test]
    fn test_parse_props_rejects_oversized_dictionary() {
        let mut header = vec![93u8];
        header.extend_from_slice(&(DICT_SIZE_MAX + 1).to_le_bytes());
        let err = CoderSettings::parse_props(&header).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
