use crate::impedance::MatchSpec;
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::fmt;
use std::str::FromStr;

/// Arrangement of the two elements, seen from the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Topology {
    /// Shunt element at the source, series element toward the target.
    Normal,
    /// Series element at the source, shunt element at the target.
    Reversed,
}

impl Topology {
    pub const ALL: [Topology; 2] = [Topology::Normal, Topology::Reversed];

    pub fn to_str(&self) -> &str {
        match self {
            Topology::Normal => "normal",
            Topology::Reversed => "reversed",
        }
    }
}

impl FromStr for Topology {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Normal" | "normal" => Ok(Topology::Normal),
            "Reversed" | "reversed" => Ok(Topology::Reversed),
            _ => bail!("Topology '{}' not recognized", s),
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Sign of the square root the reactances were taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Branch {
    First,
    Second,
}

impl Branch {
    pub fn to_str(&self) -> &str {
        match self {
            Branch::First => "1",
            Branch::Second => "2",
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Both raw solutions of one arrangement. `x_shunt1` pairs with `x_series1`
/// and `x_shunt2` with `x_series2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReactancePair {
    pub x_shunt1: f64,
    pub x_series1: f64,
    pub x_shunt2: f64,
    pub x_series2: f64,
    pub q: f64,
}

impl ReactancePair {
    /// (shunt, series) reactances of one branch
    pub fn branch(&self, branch: Branch) -> (f64, f64) {
        match branch {
            Branch::First => (self.x_shunt1, self.x_series1),
            Branch::Second => (self.x_shunt2, self.x_series2),
        }
    }
}

/// L-section with the shunt element across side `a` and the series element
/// toward side `b`.
fn lsection(ra: f64, xa: f64, rb: f64, xb: f64) -> ReactancePair {
    let quotient = ra / rb;
    let ratio = quotient - 1.0;
    if ra == rb || ratio == 0.0 {
        let x_series = -(xa + xb);
        return ReactancePair {
            x_shunt1: f64::INFINITY,
            x_series1: x_series,
            x_shunt2: f64::INFINITY,
            x_series2: x_series,
            q: 0.0,
        };
    }

    let t = (xa / ra) * (xa / rb);
    let radicand = ratio + t;
    // on the existence boundary the radicand is a rounding residue of ra/rb and t
    let q = if radicand <= 8.0 * f64::EPSILON * (quotient + t) {
        0.0
    } else {
        radicand.sqrt()
    };
    ReactancePair {
        x_shunt1: (xa + ra * q) / ratio,
        x_series1: -(xb + rb * q),
        x_shunt2: (xa - ra * q) / ratio,
        x_series2: -(xb - rb * q),
        q,
    }
}

/// Reactances of the normal arrangement.
pub fn normal_reactances(rs: f64, xs: f64, rt: f64, xt: f64) -> ReactancePair {
    lsection(rs, xs, rt, xt)
}

/// Reactances of the reversed arrangement: the shunt element sits on the
/// target side, the series element on the source side.
pub fn reversed_reactances(rs: f64, xs: f64, rt: f64, xt: f64) -> ReactancePair {
    lsection(rt, xt, rs, xs)
}

/// Reactances of `topology` for `spec`, whether or not it is feasible.
pub fn reactances(spec: &MatchSpec, topology: Topology) -> ReactancePair {
    match topology {
        Topology::Normal => normal_reactances(spec.rs(), spec.xs(), spec.rt(), spec.xt()),
        Topology::Reversed => reversed_reactances(spec.rs(), spec.xs(), spec.rt(), spec.xt()),
    }
}

/// Topologies that realize a match for `spec`, normal first.
///
/// With `Rs > Rt` the normal arrangement always exists and the reversed one
/// only when `|Xt| >= sqrt(Rt (Rs - Rt))`; `Rs < Rt` mirrors this. Equal
/// resistances admit both.
pub fn feasible_topologies(spec: &MatchSpec) -> Vec<Topology> {
    let (rs, xs, rt, xt) = (spec.rs(), spec.xs(), spec.rt(), spec.xt());
    if rs == rt {
        vec![Topology::Normal, Topology::Reversed]
    } else if rs > rt {
        if xt.abs() >= (rt * (rs - rt)).sqrt() {
            vec![Topology::Normal, Topology::Reversed]
        } else {
            vec![Topology::Normal]
        }
    } else if xs.abs() >= (rs * (rt - rs)).sqrt() {
        vec![Topology::Normal, Topology::Reversed]
    } else {
        vec![Topology::Reversed]
    }
}
