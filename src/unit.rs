use crate::scale::Scale;
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::fmt;
use std::str::FromStr;

/// Descriptor of unit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[default]
    None, // No Unit
    Hz,     // Frequency in Hz
    Farad,  // Capacitance in farads
    Henry,  // Inductance in henries
    Ohm,    // Resistance in ohms
    Sieman, // Conductance in siemans
}

impl Unit {
    pub fn to_long_string(&self) -> String {
        match self {
            Unit::None => "".to_string(),
            Unit::Hz => "hertz".to_string(),
            Unit::Farad => "farad".to_string(),
            Unit::Henry => "henry".to_string(),
            Unit::Ohm => "ohm".to_string(),
            Unit::Sieman => "sieman".to_string(),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Unit::None => "",
            Unit::Hz => "Hz",
            Unit::Farad => "F",
            Unit::Henry => "H",
            Unit::Ohm => "Ω",
            Unit::Sieman => "S",
        }
    }
}

impl FromStr for Unit {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(Unit::None),
            "HZ" | "Hz" | "hz" => Ok(Unit::Hz),
            "Farad" | "farad" | "F" => Ok(Unit::Farad),
            "Henry" | "henry" | "H" => Ok(Unit::Henry),
            "Ohm" | "ohm" | "Ω" => Ok(Unit::Ohm),
            "Sieman" | "sieman" | "S" => Ok(Unit::Sieman),
            _ => bail!("unknown unit '{}'", s),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Encapsulation of a value with scale. Value is stored unscaled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct UnitVal {
    val: f64,
    scale: Scale,
    unit: Unit,
}

impl UnitVal {
    pub fn new(val: f64, scale: Scale, unit: Unit) -> Self {
        UnitVal { val, scale, unit }
    }

    pub fn new_scaled(val: f64, scale: Scale, unit: Unit) -> Self {
        UnitVal {
            val: scale.unscale(val),
            scale,
            unit,
        }
    }

    /// Value with the engineering prefix picked from its magnitude. Values
    /// outside the prefix range keep Scale::Base.
    pub fn engineering(val: f64, unit: Unit) -> Self {
        UnitVal {
            val,
            scale: Scale::engineering(val).unwrap_or_default(),
            unit,
        }
    }

    /// Retrieve value unscaled
    pub fn val(&self) -> f64 {
        self.val
    }

    /// Retrieve value in scaled scale
    pub fn val_scaled(&self) -> f64 {
        self.scale.scale(self.val)
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }
}

impl Default for UnitVal {
    fn default() -> Self {
        UnitVal {
            val: 0.0,
            scale: Scale::Base,
            unit: Unit::None,
        }
    }
}

impl fmt::Display for UnitVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_si(self.val, self.unit.to_str()))
    }
}

/// Round to `digits` significant figures.
fn round_sig(val: f64, digits: i32) -> f64 {
    if val == 0.0 || !val.is_finite() {
        return val;
    }
    let decimals = digits - 1 - val.abs().log10().floor() as i32;
    let factor = 10f64.powi(decimals);
    (val * factor).round() / factor
}

/// Three significant figures without trailing zeros, like `%.3g`.
fn sig3(val: f64) -> String {
    if val == 0.0 {
        return "0".to_string();
    }
    let decimals = (2 - val.abs().log10().floor() as i32).max(0) as usize;
    let out = format!("{:.*}", decimals, val);
    if out.contains('.') {
        out.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        out
    }
}

/// Render a raw SI value with an engineering prefix and `base_unit`,
/// e.g. `format_si(3.45e-9, "H") == "3.45nH"`.
///
/// Values beyond the atto..giga prefixes fall back to exponent notation.
pub fn format_si(val: f64, base_unit: &str) -> String {
    if !val.is_finite() {
        return format!("{}{}", val, base_unit);
    }
    let rounded = round_sig(val, 3);
    match Scale::engineering(rounded) {
        Ok(scale) => format!("{}{}{}", sig3(scale.scale(rounded)), scale, base_unit),
        Err(_) => format!("{:.2e}{}", val, base_unit),
    }
}
