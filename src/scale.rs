use crate::error::{MatchError, MatchResult};
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::{fmt, str::FromStr};

/// Descriptor of scaling
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Scale {
    Atto,
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    #[default]
    Base,
    Kilo,
    Mega,
    Giga,
}

impl Scale {
    pub const ALL: [Scale; 10] = [
        Scale::Atto,
        Scale::Femto,
        Scale::Pico,
        Scale::Nano,
        Scale::Micro,
        Scale::Milli,
        Scale::Base,
        Scale::Kilo,
        Scale::Mega,
        Scale::Giga,
    ];

    pub fn to_long_string(&self) -> String {
        match self {
            Scale::Giga => "giga".to_string(),
            Scale::Mega => "mega".to_string(),
            Scale::Kilo => "kilo".to_string(),
            Scale::Base => "".to_string(),
            Scale::Milli => "milli".to_string(),
            Scale::Micro => "micro".to_string(),
            Scale::Nano => "nano".to_string(),
            Scale::Pico => "pico".to_string(),
            Scale::Femto => "femto".to_string(),
            Scale::Atto => "atto".to_string(),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Scale::Atto => "a",
            Scale::Femto => "f",
            Scale::Pico => "p",
            Scale::Nano => "n",
            Scale::Micro => "u",
            Scale::Milli => "m",
            Scale::Base => "",
            Scale::Kilo => "k",
            Scale::Mega => "M",
            Scale::Giga => "G",
        }
    }

    /// Power of ten the prefix stands for, Scale::Pico = -12
    pub fn exponent(&self) -> i32 {
        match self {
            Scale::Atto => -18,
            Scale::Femto => -15,
            Scale::Pico => -12,
            Scale::Nano => -9,
            Scale::Micro => -6,
            Scale::Milli => -3,
            Scale::Base => 0,
            Scale::Kilo => 3,
            Scale::Mega => 6,
            Scale::Giga => 9,
        }
    }

    /// Prefix for an exponent. Only multiples of 3 in -18..=9 have one.
    pub fn from_exponent(exponent: i32) -> MatchResult<Scale> {
        Scale::ALL
            .iter()
            .copied()
            .find(|s| s.exponent() == exponent)
            .ok_or(MatchError::ScaleOutOfRange { exponent })
    }

    /// Engineering prefix for `val`: the largest scale whose multiplier does
    /// not exceed |val|. Zero and non-finite values map to Scale::Base.
    pub fn engineering(val: f64) -> MatchResult<Scale> {
        if val == 0.0 || !val.is_finite() {
            return Ok(Scale::Base);
        }
        // nudge so that exact powers of ten don't fall one decade short
        let decade = (val.abs().log10() + 1e-12).floor() as i32;
        Scale::from_exponent(decade.div_euclid(3) * 3)
    }

    /// Provides multiplier for scale
    /// Scale::Pico = 1e-12
    pub fn multiplier(&self) -> f64 {
        match self {
            Scale::Atto => 1e-18,
            Scale::Femto => 1e-15,
            Scale::Pico => 1e-12,
            Scale::Nano => 1e-9,
            Scale::Micro => 1e-6,
            Scale::Milli => 1e-3,
            Scale::Base => 1.0,
            Scale::Kilo => 1e3,
            Scale::Mega => 1e6,
            Scale::Giga => 1e9,
        }
    }

    pub fn scale(&self, val: f64) -> f64 {
        val / self.multiplier()
    }

    pub fn unscale(&self, val: f64) -> f64 {
        val * self.multiplier()
    }
}

impl FromStr for Scale {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Scale::Base),
            "Atto" | "atto" | "a" | "aF" | "aH" => Ok(Scale::Atto),
            "Femto" | "femto" | "f" | "fF" | "fH" => Ok(Scale::Femto),
            "Pico" | "pico" | "p" | "pF" | "pH" => Ok(Scale::Pico),
            "Nano" | "nano" | "n" | "nF" | "nH" => Ok(Scale::Nano),
            "Micro" | "micro" | "u" | "μ" | "µ" | "uF" | "μF" | "uH" | "μH" => {
                Ok(Scale::Micro)
            }
            "Milli" | "milli" | "m" | "mΩ" | "mF" | "mH" => Ok(Scale::Milli),
            "Kilo" | "kilo" | "k" | "kΩ" | "kHz" | "khz" => Ok(Scale::Kilo),
            "Mega" | "mega" | "M" | "MΩ" | "MHz" | "mhz" => Ok(Scale::Mega),
            "Giga" | "giga" | "G" | "GΩ" | "GHz" | "ghz" => Ok(Scale::Giga),
            _ => bail!("unknown scale prefix '{}'", s),
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod scale_tests {
    use super::*;
    use crate::util::comp_f64;
    use float_cmp::F64Margin;

    #[test]
    fn test_scale_from_str() {
        let giga = ["Giga", "giga", "G", "GΩ", "GHz", "ghz"];
        let mega = ["Mega", "mega", "M", "MΩ", "MHz", "mhz"];
        let kilo = ["Kilo", "kilo", "k", "kΩ", "kHz", "khz"];
        let milli = ["Milli", "milli", "m", "mΩ", "mF", "mH"];
        let micro = ["Micro", "micro", "u", "µ", "uF", "μF", "uH", "μH"];
        let nano = ["Nano", "nano", "n", "nF", "nH"];
        let pico = ["Pico", "pico", "p", "pF", "pH"];
        let femto = ["Femto", "femto", "f", "fF", "fH"];
        let atto = ["Atto", "atto", "a", "aF", "aH"];

        for (names, scale) in [
            (&giga[..], Scale::Giga),
            (&mega[..], Scale::Mega),
            (&kilo[..], Scale::Kilo),
            (&milli[..], Scale::Milli),
            (&micro[..], Scale::Micro),
            (&nano[..], Scale::Nano),
            (&pico[..], Scale::Pico),
            (&femto[..], Scale::Femto),
            (&atto[..], Scale::Atto),
        ] {
            for name in names {
                assert_eq!(Scale::from_str(name).unwrap(), scale, "{}", name);
            }
        }

        assert_eq!(Scale::from_str("").unwrap(), Scale::Base);
        assert!(Scale::from_str("google").is_err());
        assert!(Scale::from_str("T").is_err());
    }

    #[test]
    fn test_from_exponent() {
        for scale in Scale::ALL {
            assert_eq!(Scale::from_exponent(scale.exponent()).unwrap(), scale);
        }
        assert_eq!(
            Scale::from_exponent(12),
            Err(MatchError::ScaleOutOfRange { exponent: 12 })
        );
        assert_eq!(
            Scale::from_exponent(-21),
            Err(MatchError::ScaleOutOfRange { exponent: -21 })
        );
        assert!(Scale::from_exponent(-2).is_err());
        assert_eq!(Scale::from_exponent(-9).unwrap().to_long_string(), "nano");
    }

    #[test]
    fn test_engineering() {
        assert_eq!(Scale::engineering(0.5).unwrap(), Scale::Milli);
        assert_eq!(Scale::engineering(1.331e-7).unwrap(), Scale::Nano);
        assert_eq!(Scale::engineering(1332.0).unwrap(), Scale::Kilo);
        assert_eq!(Scale::engineering(123.5).unwrap(), Scale::Base);
        assert_eq!(Scale::engineering(1e-12).unwrap(), Scale::Pico);
        assert_eq!(Scale::engineering(-4.7e-9).unwrap(), Scale::Nano);
        assert_eq!(Scale::engineering(2.44e9).unwrap(), Scale::Giga);
        assert_eq!(Scale::engineering(0.0).unwrap(), Scale::Base);
        assert!(Scale::engineering(1e-21).is_err());
        assert!(Scale::engineering(5e12).is_err());
    }

    #[test]
    fn test_scale_unscale() {
        let val: f64 = 3.24;
        let margin = F64Margin::default();

        comp_f64(&(val * 1e-9), &Scale::Giga.scale(val), margin, "scale()", "Giga");
        comp_f64(&(val * 1e9), &Scale::Giga.unscale(val), margin, "unscale()", "Giga");
        comp_f64(&(val * 1e-3), &Scale::Kilo.scale(val), margin, "scale()", "Kilo");
        comp_f64(&(val * 1e3), &Scale::Kilo.unscale(val), margin, "unscale()", "Kilo");
        comp_f64(&(val * 1e12), &Scale::Pico.scale(val), margin, "scale()", "Pico");
        comp_f64(&(val * 1e-12), &Scale::Pico.unscale(val), margin, "unscale()", "Pico");
        comp_f64(&(val * 1e18), &Scale::Atto.scale(val), margin, "scale()", "Atto");
        comp_f64(&(val * 1e-18), &Scale::Atto.unscale(val), margin, "unscale()", "Atto");
        comp_f64(&val, &Scale::Base.scale(val), margin, "scale()", "Base");
        comp_f64(&val, &Scale::Base.unscale(val), margin, "unscale()", "Base");
    }
}
