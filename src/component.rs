use crate::error::{require_positive, MatchError, MatchResult};
use crate::unit::{Unit, UnitVal};
use serde::Serialize;
use simple_error::{bail, SimpleError};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Where an element sits relative to the signal path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Placement {
    Series,
    Shunt,
}

impl Placement {
    pub fn to_str(&self) -> &str {
        match self {
            Placement::Series => "series",
            Placement::Shunt => "shunt",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ComponentKind {
    SeriesInductor,
    SeriesCapacitor,
    ShuntInductor,
    ShuntCapacitor,
    /// The element degenerates to a wire (series, X = 0) or is left out
    /// (shunt, X = ∞).
    #[default]
    None,
}

impl ComponentKind {
    pub fn to_str(&self) -> &str {
        match self {
            ComponentKind::SeriesInductor => "Ls",
            ComponentKind::SeriesCapacitor => "Cs",
            ComponentKind::ShuntInductor => "Lp",
            ComponentKind::ShuntCapacitor => "Cp",
            ComponentKind::None => "None",
        }
    }

    pub fn is_inductor(&self) -> bool {
        matches!(
            self,
            ComponentKind::SeriesInductor | ComponentKind::ShuntInductor
        )
    }

    pub fn is_capacitor(&self) -> bool {
        matches!(
            self,
            ComponentKind::SeriesCapacitor | ComponentKind::ShuntCapacitor
        )
    }

    /// SI unit of the element value
    pub fn unit(&self) -> Unit {
        if self.is_inductor() {
            Unit::Henry
        } else if self.is_capacitor() {
            Unit::Farad
        } else {
            Unit::None
        }
    }
}

impl FromStr for ComponentKind {
    type Err = SimpleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ls" | "ls" | "SeriesInductor" => Ok(ComponentKind::SeriesInductor),
            "Cs" | "cs" | "SeriesCapacitor" => Ok(ComponentKind::SeriesCapacitor),
            "Lp" | "lp" | "ShuntInductor" => Ok(ComponentKind::ShuntInductor),
            "Cp" | "cp" | "ShuntCapacitor" => Ok(ComponentKind::ShuntCapacitor),
            "None" | "none" => Ok(ComponentKind::None),
            _ => bail!("ComponentKind '{}' not recognized", s),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// A reactance realized as a lumped element at one frequency.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Component {
    placement: Placement,
    kind: ComponentKind,
    reactance: f64,
    value: f64,
    unit: Unit,
    practical: bool,
}

impl Component {
    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Reactance the component was classified from, in ohms
    pub fn reactance(&self) -> f64 {
        self.reactance
    }

    /// Inductance in henries or capacitance in farads; 0 for ComponentKind::None
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// False once `flag_practical` found the value beyond its limits.
    pub fn is_practical(&self) -> bool {
        self.practical
    }

    /// Copy of the component flagged against `limits`. The value is kept.
    pub fn flag_practical(self, limits: &PracticalLimits) -> Component {
        Component {
            practical: limits.is_practical(&self),
            ..self
        }
    }

    pub fn unitval(&self) -> UnitVal {
        UnitVal::engineering(self.value, self.unit)
    }

    pub fn is_open(&self) -> bool {
        self.kind == ComponentKind::None && self.reactance.is_infinite()
    }

    pub fn is_short(&self) -> bool {
        self.kind == ComponentKind::None && self.reactance == 0.0
    }

    /// Reactance of the element at `freq`. Equals `reactance()` at the
    /// classification frequency.
    pub fn reactance_at(&self, freq: f64) -> f64 {
        let w = 2.0 * PI * freq;
        if self.kind.is_inductor() {
            w * self.value
        } else if self.kind.is_capacitor() {
            -1.0 / (w * self.value)
        } else {
            self.reactance
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_open() {
            write!(f, "{}: open", self.placement)
        } else if self.is_short() {
            write!(f, "{}: short", self.placement)
        } else {
            write!(f, "{}: {}", self.kind, self.unitval())
        }
    }
}

/// Classify reactance `x` (ohms) at `freq` (Hz) as a series or shunt element.
///
/// `x > 0` gives an inductor `L = x / 2πf`, `x < 0` a capacitor
/// `C = 1 / (2πf|x|)`. Zero and infinite reactances give ComponentKind::None.
/// No magnitude clamping is applied.
pub fn classify(x: f64, freq: f64, placement: Placement) -> MatchResult<Component> {
    require_positive("frequency", freq)?;
    if x.is_nan() {
        return Err(MatchError::Domain {
            what: "reactance",
            value: x,
        });
    }

    let w = 2.0 * PI * freq;
    let kind = if x == 0.0 || x.is_infinite() {
        ComponentKind::None
    } else {
        match (placement, x > 0.0) {
            (Placement::Series, true) => ComponentKind::SeriesInductor,
            (Placement::Series, false) => ComponentKind::SeriesCapacitor,
            (Placement::Shunt, true) => ComponentKind::ShuntInductor,
            (Placement::Shunt, false) => ComponentKind::ShuntCapacitor,
        }
    };
    let value = if kind.is_inductor() {
        x / w
    } else if kind.is_capacitor() {
        1.0 / (w * x.abs())
    } else {
        0.0
    };

    Ok(Component {
        placement,
        kind,
        reactance: x,
        value,
        unit: kind.unit(),
        practical: true,
    })
}

/// Thresholds above which an inductor or capacitor is flagged as
/// impractical. Flagging never changes the synthesized values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PracticalLimits {
    pub max_inductance: f64,
    pub max_capacitance: f64,
}

impl PracticalLimits {
    pub fn new(max_inductance: f64, max_capacitance: f64) -> MatchResult<Self> {
        Ok(PracticalLimits {
            max_inductance: require_positive("max inductance", max_inductance)?,
            max_capacitance: require_positive("max capacitance", max_capacitance)?,
        })
    }

    /// No component is ever flagged.
    pub fn unbounded() -> Self {
        PracticalLimits {
            max_inductance: f64::INFINITY,
            max_capacitance: f64::INFINITY,
        }
    }

    pub fn is_practical(&self, component: &Component) -> bool {
        if component.kind().is_inductor() {
            component.value() < self.max_inductance
        } else if component.kind().is_capacitor() {
            component.value() < self.max_capacitance
        } else {
            true
        }
    }
}

impl Default for PracticalLimits {
    // 10 uH and 90 mF
    fn default() -> Self {
        PracticalLimits {
            max_inductance: 1e-5,
            max_capacitance: 0.9e-1,
        }
    }
}

#[cfg(test)]
mod component_tests {
    use super::*;
    use crate::util::comp_rel_f64;

    const F0: f64 = 2.44e9;

    #[test]
    fn test_classify_inductor() {
        let comp = classify(50.0, F0, Placement::Series).unwrap();
        assert_eq!(comp.kind(), ComponentKind::SeriesInductor);
        assert_eq!(comp.unit(), Unit::Henry);
        comp_rel_f64(&(50.0 / (2.0 * PI * F0)), &comp.value(), 1e-12, "L", "");

        let comp = classify(50.0, F0, Placement::Shunt).unwrap();
        assert_eq!(comp.kind(), ComponentKind::ShuntInductor);
        assert_eq!(comp.to_string(), "Lp: 3.26nH");
    }

    #[test]
    fn test_classify_capacitor() {
        let comp = classify(-50.0, F0, Placement::Series).unwrap();
        assert_eq!(comp.kind(), ComponentKind::SeriesCapacitor);
        assert_eq!(comp.unit(), Unit::Farad);
        comp_rel_f64(&(1.0 / (2.0 * PI * F0 * 50.0)), &comp.value(), 1e-12, "C", "");
        assert_eq!(comp.to_string(), "Cs: 1.3pF");

        let comp = classify(-50.0, F0, Placement::Shunt).unwrap();
        assert_eq!(comp.kind(), ComponentKind::ShuntCapacitor);
    }

    #[test]
    fn test_classify_degenerate() {
        let open = classify(f64::INFINITY, F0, Placement::Shunt).unwrap();
        assert_eq!(open.kind(), ComponentKind::None);
        assert!(open.is_open());
        assert!(!open.is_short());
        assert_eq!(open.value(), 0.0);
        assert_eq!(open.unit(), Unit::None);
        assert_eq!(open.to_string(), "shunt: open");

        let short = classify(0.0, F0, Placement::Series).unwrap();
        assert_eq!(short.kind(), ComponentKind::None);
        assert!(short.is_short());
        assert_eq!(short.to_string(), "series: short");
    }

    #[test]
    fn test_classify_invalid() {
        assert!(classify(f64::NAN, F0, Placement::Series).unwrap_err().is_domain());
        assert!(classify(10.0, 0.0, Placement::Series).unwrap_err().is_domain());
        assert!(classify(10.0, -F0, Placement::Shunt).unwrap_err().is_domain());
    }

    #[test]
    fn test_reactance_roundtrip() {
        for x in [1e-3, 0.5, 24.49, 120.06, 5e4, -1e-3, -0.5, -37.08, -5e4] {
            for placement in [Placement::Series, Placement::Shunt] {
                let comp = classify(x, F0, placement).unwrap();
                comp_rel_f64(&x, &comp.reactance_at(F0), 1e-9, "reactance_at()", "");
            }
        }
        let open = classify(f64::INFINITY, F0, Placement::Shunt).unwrap();
        assert_eq!(open.reactance_at(1e6), f64::INFINITY);
    }

    #[test]
    fn test_reactance_scales_with_freq() {
        let ind = classify(100.0, 1e9, Placement::Series).unwrap();
        comp_rel_f64(&200.0, &ind.reactance_at(2e9), 1e-12, "L", "");
        let cap = classify(-100.0, 1e9, Placement::Series).unwrap();
        comp_rel_f64(&-50.0, &cap.reactance_at(2e9), 1e-12, "C", "");
    }

    #[test]
    fn test_practical_limits() {
        let limits = PracticalLimits::default();
        let small_l = classify(50.0, F0, Placement::Series).unwrap();
        let huge_l = classify(1e6, F0, Placement::Series).unwrap();
        let open = classify(f64::INFINITY, F0, Placement::Shunt).unwrap();
        assert!(limits.is_practical(&small_l));
        assert!(!limits.is_practical(&huge_l));
        assert!(limits.is_practical(&open));

        let tight = PracticalLimits::new(1e-9, 1e-12).unwrap();
        assert!(!tight.is_practical(&small_l));
        let small_c = classify(-1e3, F0, Placement::Shunt).unwrap();
        assert!(tight.is_practical(&small_c));

        assert!(PracticalLimits::unbounded().is_practical(&huge_l));

        assert!(huge_l.is_practical());
        let flagged = huge_l.flag_practical(&limits);
        assert!(!flagged.is_practical());
        assert_eq!(flagged.value(), huge_l.value());
        assert!(small_l.flag_practical(&limits).is_practical());
        assert!(PracticalLimits::new(0.0, 1.0).is_err());
    }

    #[test]
    fn test_kind_from_str() {
        for kind in [
            ComponentKind::SeriesInductor,
            ComponentKind::SeriesCapacitor,
            ComponentKind::ShuntInductor,
            ComponentKind::ShuntCapacitor,
            ComponentKind::None,
        ] {
            assert_eq!(ComponentKind::from_str(kind.to_str()).unwrap(), kind);
        }
        assert!(ComponentKind::from_str("Rs").is_err());
    }
}
