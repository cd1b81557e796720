// src/core/units.rs
//! Unit suffixes seen in scraped panel text and how to compare them.
//!
//! Every suffix maps to exactly one multiplier. Decimal (`KB`, `MB`, …) and
//! binary (`KiB`, `MiB`, …) prefixes are distinct units; `K`/`M`/`G`/`Mil`
//! without a `B` are plain counts.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    Percent,
    TiB,
    TB,
    GiB,
    GB,
    MiB,
    MB,
    KiB,
    KB,
    Mil,
    Kilo,
    Mega,
    Giga,
    Millis,
    Seconds,
}

/// Suffix lookup order. Longer suffixes sit ahead of their tails
/// (`GiB` before `G`, `ms` before `s`), so the first match is the right one.
const SUFFIX_ORDER: [Unit; 15] = [
    Unit::Percent,
    Unit::TiB,
    Unit::TB,
    Unit::GiB,
    Unit::GB,
    Unit::MiB,
    Unit::MB,
    Unit::KiB,
    Unit::KB,
    Unit::Mil,
    Unit::Kilo,
    Unit::Mega,
    Unit::Giga,
    Unit::Millis,
    Unit::Seconds,
];

const KIB: f64 = 1024.0;
const KB: f64 = 1000.0;

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::TiB => "TiB",
            Unit::TB => "TB",
            Unit::GiB => "GiB",
            Unit::GB => "GB",
            Unit::MiB => "MiB",
            Unit::MB => "MB",
            Unit::KiB => "KiB",
            Unit::KB => "KB",
            Unit::Mil => "Mil",
            Unit::Kilo => "K",
            Unit::Mega => "M",
            Unit::Giga => "G",
            Unit::Millis => "ms",
            Unit::Seconds => "s",
        }
    }

    /// Factor onto the comparable scale: bytes for sizes, seconds for
    /// durations, plain count otherwise.
    pub fn multiplier(self) -> f64 {
        match self {
            Unit::Percent => 1.0,
            Unit::TiB => KIB * KIB * KIB * KIB,
            Unit::TB => KB * KB * KB * KB,
            Unit::GiB => KIB * KIB * KIB,
            Unit::GB => KB * KB * KB,
            Unit::MiB => KIB * KIB,
            Unit::MB => KB * KB,
            Unit::KiB => KIB,
            Unit::KB => KB,
            Unit::Mil => 1_000_000.0,
            Unit::Kilo => 1_000.0,
            Unit::Mega => 1_000_000.0,
            Unit::Giga => 1_000_000_000.0,
            Unit::Millis => 1.0 / 1000.0,
            Unit::Seconds => 1.0,
        }
    }

    /// Apply the unit to a bare number. Milliseconds divide by 1000.
    pub fn scale(self, v: f64) -> f64 {
        match self {
            Unit::Millis => v / 1000.0,
            other => v * other.multiplier(),
        }
    }

    /// Factor onto megabytes, staying within the unit's own basis
    /// (`GiB` → MiB, `GB` → MB). `None` for anything that is not a size.
    pub fn to_megabytes(self) -> Option<f64> {
        match self {
            Unit::TiB => Some(KIB * KIB),
            Unit::GiB => Some(KIB),
            Unit::MiB => Some(1.0),
            Unit::KiB => Some(1.0 / KIB),
            Unit::TB => Some(KB * KB),
            Unit::GB => Some(KB),
            Unit::MB => Some(1.0),
            Unit::KB => Some(1.0 / KB),
            _ => None,
        }
    }

    /// Split `"1.5 GiB"` into `(Some(GiB), "1.5")`. Tokens without a known
    /// suffix come back whole with `None`.
    pub fn split(token: &str) -> (Option<Unit>, &str) {
        let t = token.trim();
        for unit in SUFFIX_ORDER {
            if let Some(num) = t.strip_suffix(unit.suffix()) {
                return (Some(unit), num.trim_end());
            }
        }
        (None, t)
    }
}

/// Finite float or nothing. `NaN`/`inf` spellings count as unparsable.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalise a unit-tagged token to one number for ordering only.
/// Unparsable tokens compare as `0.0`.
pub fn convert_to_comparable(token: &str) -> f64 {
    let (unit, num) = Unit::split(token);
    let Some(v) = parse_number(num) else {
        logd!("units: unparsable token {:?}, using 0.0", token);
        return 0.0;
    };
    match unit {
        Some(u) => u.scale(v),
        None => v,
    }
}

/// Storage size in megabytes (MiB for binary suffixes, MB for decimal ones).
/// `None` if the token is not a size.
pub fn size_to_megabytes(token: &str) -> Option<f64> {
    let (unit, num) = Unit::split(token);
    let factor = unit?.to_megabytes()?;
    parse_number(num).map(|v| v * factor)
}

pub fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_and_decimal_sizes_differ() {
        let bin = convert_to_comparable("1.5 GiB");
        let dec = convert_to_comparable("1.5 GB");
        assert_eq!(bin, 1.5 * 1024f64.powi(3));
        assert_eq!(dec, 1.5 * 1000f64.powi(3));
        assert_ne!(bin, dec);

        assert_eq!(convert_to_comparable("2KiB"), 2048.0);
        assert_eq!(convert_to_comparable("2KB"), 2000.0);
        assert_eq!(convert_to_comparable("3 MiB"), 3.0 * 1024.0 * 1024.0);
        assert_eq!(convert_to_comparable("1 TiB"), 1024f64.powi(4));
        assert_eq!(convert_to_comparable("1 TB"), 1e12);
    }

    #[test]
    fn durations_land_in_seconds() {
        assert_eq!(convert_to_comparable("200ms"), 0.2);
        assert_eq!(convert_to_comparable("3s"), 3.0);
        assert_eq!(convert_to_comparable("1.5 s"), 1.5);
    }

    #[test]
    fn counts_and_percent() {
        assert_eq!(convert_to_comparable("79.5%"), 79.5);
        assert_eq!(convert_to_comparable("1.2K"), 1200.0);
        assert_eq!(convert_to_comparable("3 M"), 3_000_000.0);
        assert_eq!(convert_to_comparable("2 Mil"), 2_000_000.0);
        assert_eq!(convert_to_comparable("1G"), 1e9);
        assert_eq!(convert_to_comparable("42"), 42.0);
        assert_eq!(convert_to_comparable("-3.5"), -3.5);
    }

    #[test]
    fn unparsable_is_zero() {
        assert_eq!(convert_to_comparable("abc"), 0.0);
        assert_eq!(convert_to_comparable(""), 0.0);
        assert_eq!(convert_to_comparable("%"), 0.0);
        assert_eq!(convert_to_comparable("req/s"), 0.0);
        assert_eq!(convert_to_comparable("NaN"), 0.0);
    }

    #[test]
    fn split_prefers_longest_suffix() {
        assert_eq!(Unit::split("5 GiB"), (Some(Unit::GiB), "5"));
        assert_eq!(Unit::split("5GB"), (Some(Unit::GB), "5"));
        assert_eq!(Unit::split("5 G"), (Some(Unit::Giga), "5"));
        assert_eq!(Unit::split("5ms"), (Some(Unit::Millis), "5"));
        assert_eq!(Unit::split(" 7 "), (None, "7"));
    }

    #[test]
    fn sizes_to_megabytes_keep_basis() {
        assert_eq!(size_to_megabytes("73.4 GiB"), Some(73.4 * 1024.0));
        assert_eq!(size_to_megabytes("512 KiB"), Some(0.5));
        assert_eq!(size_to_megabytes("2 GB"), Some(2000.0));
        assert_eq!(size_to_megabytes("500 KB"), Some(0.5));
        assert_eq!(size_to_megabytes("1 TiB"), Some(1024.0 * 1024.0));
        assert_eq!(size_to_megabytes("12"), None);
        assert_eq!(size_to_megabytes("5 ms"), None);
        assert_eq!(size_to_megabytes("x GiB"), None);
    }

    #[test]
    fn rounding() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(79.5), 79.5);
    }
}
