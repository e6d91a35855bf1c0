use crate::error::{require_positive, MatchError, MatchResult};
use crate::scale::Scale;
use num_complex::Complex64;
use regex::Regex;
use serde::{Deserialize, Serialize};
use simple_error::{bail, SimpleError};
use std::f64::consts::PI;
use std::str::FromStr;
use std::sync::OnceLock;

const NUMBER: &str = r"(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

fn re_complex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"^\s*(?:(?P<re>[+-]?{n})(?:\s*(?P<im>[+-]\s*{n})\s*[jJ])?|(?P<im_only>[+-]?\s*{n})\s*[jJ])\s*$",
            n = NUMBER
        ))
        .expect("Invalid regex!")
    })
}

fn re_quantity() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^\s*(?P<val>[+-]?{n})\s*(?P<suffix>\S*)\s*$", n = NUMBER))
            .expect("Invalid regex!")
    })
}

/// Parse `"20-10j"`, `"100+75j"`, `"50"`, `"-10j"` into a complex value.
pub fn parse_complex(s: &str) -> Result<Complex64, SimpleError> {
    let caps = match re_complex().captures(s) {
        Some(caps) => caps,
        None => bail!("cannot parse complex value '{}'", s),
    };
    let re = match caps.name("re") {
        Some(m) => m.as_str().parse::<f64>().map_err(SimpleError::from)?,
        None => 0.0,
    };
    let im = match caps.name("im").or_else(|| caps.name("im_only")) {
        Some(m) => m
            .as_str()
            .replace(char::is_whitespace, "")
            .parse::<f64>()
            .map_err(SimpleError::from)?,
        None => 0.0,
    };
    Ok(Complex64::new(re, im))
}

/// Parse a frequency such as `"2.44GHz"`, `"2440 MHz"`, `"2.44e9"` into Hz.
pub fn parse_frequency(s: &str) -> Result<f64, SimpleError> {
    let caps = match re_quantity().captures(s) {
        Some(caps) => caps,
        None => bail!("cannot parse frequency '{}'", s),
    };
    let val = caps["val"].parse::<f64>().map_err(SimpleError::from)?;
    let suffix = &caps["suffix"];
    let scale = match Scale::from_str(suffix) {
        Ok(scale) => scale,
        Err(_) => {
            let prefix = suffix
                .strip_suffix("Hz")
                .or_else(|| suffix.strip_suffix("hz"))
                .or_else(|| suffix.strip_suffix("HZ"));
            match prefix {
                Some(prefix) => Scale::from_str(prefix)?,
                None => bail!("unknown frequency unit '{}'", suffix),
            }
        }
    };
    Ok(scale.unscale(val))
}

/// One matching request: source and target impedance, real reference
/// impedance and operating frequency, all in SI base units.
///
/// Construction validates `Re(zs) > 0`, `Re(zt) > 0`, `z0 > 0`, `freq > 0`.
/// Pairs whose resistance ratio or `X² / (Rs Rt)` leaves the `f64` range
/// are rejected as well.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatchSpecInput")]
pub struct MatchSpec {
    zs: Complex64,
    zt: Complex64,
    z0: f64,
    freq: f64,
}

impl MatchSpec {
    pub fn new(zs: Complex64, zt: Complex64, z0: f64, freq: f64) -> MatchResult<MatchSpec> {
        require_positive("source resistance", zs.re)?;
        require_positive("target resistance", zt.re)?;
        if !zs.im.is_finite() {
            return Err(MatchError::Domain {
                what: "source reactance",
                value: zs.im,
            });
        }
        if !zt.im.is_finite() {
            return Err(MatchError::Domain {
                what: "target reactance",
                value: zt.im,
            });
        }
        require_positive("reference impedance", z0)?;
        require_positive("frequency", freq)?;
        // the closed forms need Rs/Rt, Rt/Rs and X²/(Rs Rt) as finite numbers
        require_positive("resistance ratio", zs.re / zt.re)?;
        require_positive("resistance ratio", zt.re / zs.re)?;
        for x in [zs.im, zt.im] {
            let t = (x / zs.re) * (x / zt.re);
            if !t.is_finite() {
                return Err(MatchError::Domain {
                    what: "reactance to resistance ratio",
                    value: t,
                });
            }
        }
        Ok(MatchSpec { zs, zt, z0, freq })
    }

    pub fn zs(&self) -> Complex64 {
        self.zs
    }

    pub fn zt(&self) -> Complex64 {
        self.zt
    }

    pub fn z0(&self) -> f64 {
        self.z0
    }

    pub fn freq(&self) -> f64 {
        self.freq
    }

    /// Angular frequency 2πf
    pub fn omega(&self) -> f64 {
        2.0 * PI * self.freq
    }

    pub fn rs(&self) -> f64 {
        self.zs.re
    }

    pub fn xs(&self) -> f64 {
        self.zs.im
    }

    pub fn rt(&self) -> f64 {
        self.zt.re
    }

    pub fn xt(&self) -> f64 {
        self.zt.im
    }
}

/// Impedance as written in a batch file: `[re, im]` or `"re+imj"`.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum ImpedanceInput {
    Pair(f64, f64),
    Real(f64),
    Text(String),
}

impl ImpedanceInput {
    fn into_complex(self) -> MatchResult<Complex64> {
        match self {
            ImpedanceInput::Pair(re, im) => Ok(Complex64::new(re, im)),
            ImpedanceInput::Real(re) => Ok(Complex64::new(re, 0.0)),
            ImpedanceInput::Text(s) => Ok(parse_complex(&s)?),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
enum FrequencyInput {
    Hz(f64),
    Text(String),
}

#[derive(Clone, Debug, Deserialize)]
struct MatchSpecInput {
    zs: ImpedanceInput,
    zt: ImpedanceInput,
    z0: f64,
    freq: FrequencyInput,
}

impl TryFrom<MatchSpecInput> for MatchSpec {
    type Error = MatchError;

    fn try_from(input: MatchSpecInput) -> Result<Self, Self::Error> {
        let freq = match input.freq {
            FrequencyInput::Hz(f) => f,
            FrequencyInput::Text(s) => parse_frequency(&s)?,
        };
        MatchSpec::new(
            input.zs.into_complex()?,
            input.zt.into_complex()?,
            input.z0,
            freq,
        )
    }
}

/// Builder design pattern for MatchSpec.
///
/// ## Example
/// ```
/// use num_complex::Complex64;
/// use rfmatch::impedance::MatchSpecBuilder;
/// use rfmatch::scale::Scale;
///
/// let spec = MatchSpecBuilder::new()
///     .zs(Complex64::new(20.0, -10.0))
///     .zt(Complex64::new(60.0, 60.0))
///     .z0(50.0)
///     .freq_scaled(2.44, Scale::Giga)
///     .build()
///     .unwrap();
/// assert_eq!(spec.freq(), 2.44e9);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MatchSpecBuilder {
    zs: Option<Complex64>,
    zt: Option<Complex64>,
    z0: Option<f64>,
    freq: Option<f64>,
}

impl MatchSpecBuilder {
    pub fn new() -> Self {
        MatchSpecBuilder::default()
    }

    pub fn zs(mut self, zs: Complex64) -> Self {
        self.zs = Some(zs);
        self
    }

    pub fn zt(mut self, zt: Complex64) -> Self {
        self.zt = Some(zt);
        self
    }

    pub fn z0(mut self, z0: f64) -> Self {
        self.z0 = Some(z0);
        self
    }

    pub fn freq(mut self, freq: f64) -> Self {
        self.freq = Some(freq);
        self
    }

    pub fn freq_scaled(mut self, freq: f64, scale: Scale) -> Self {
        self.freq = Some(scale.unscale(freq));
        self
    }

    pub fn build(self) -> MatchResult<MatchSpec> {
        let missing = |what| MatchError::Domain {
            what,
            value: f64::NAN,
        };
        MatchSpec::new(
            self.zs.ok_or_else(|| missing("source impedance"))?,
            self.zt.ok_or_else(|| missing("target impedance"))?,
            self.z0.ok_or_else(|| missing("reference impedance"))?,
            self.freq.ok_or_else(|| missing("frequency"))?,
        )
    }
}
