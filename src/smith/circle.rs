use crate::error::{MatchError, MatchResult};
use crate::impedance::MatchSpec;
use crate::smith::{normalize, z2gamma};
use crate::synthesis::{NetworkSolution, Topology};
use num_complex::{c64, Complex64};
use serde::Serialize;
use std::f64::consts::{PI, TAU};
use std::fmt;

/// Normalized resistances (and conductances) of the standard chart grid.
pub const STANDARD_RESISTANCES: [f64; 6] = [0.0, 0.2, 0.5, 1.0, 2.0, 5.0];
/// Magnitudes of the normalized reactances (and susceptances) of the
/// standard chart grid. Both signs are drawn.
pub const STANDARD_REACTANCES: [f64; 5] = [0.2, 0.5, 1.0, 2.0, 5.0];

/// Circle in the reflection-coefficient plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Circle {
    center: Complex64,
    radius: f64,
}

impl Circle {
    pub fn new(center: Complex64, radius: f64) -> MatchResult<Self> {
        if center.is_finite() && radius.is_finite() && radius >= 0.0 {
            Ok(Circle { center, radius })
        } else {
            Err(MatchError::Domain {
                what: "circle radius",
                value: radius,
            })
        }
    }

    pub fn center(&self) -> Complex64 {
        self.center
    }

    pub fn center_xy(&self) -> (f64, f64) {
        (self.center.re, self.center.im)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Point at angle `theta` (radians, counter-clockwise from +x).
    pub fn point_at(&self, theta: f64) -> Complex64 {
        self.center + Complex64::from_polar(self.radius, theta)
    }

    /// Angle of `point` seen from the center.
    pub fn angle_of(&self, point: Complex64) -> f64 {
        (point - self.center).arg()
    }

    /// True if `point` lies on the circle within absolute tolerance `tol`.
    pub fn contains(&self, point: Complex64, tol: f64) -> bool {
        ((point - self.center).norm() - self.radius).abs() <= tol
    }

    /// Point reflection through the origin.
    pub fn reflect(&self) -> Circle {
        Circle {
            center: -self.center,
            radius: self.radius,
        }
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "center ({:.4}, {:.4}) radius {:.4}",
            self.center.re, self.center.im, self.radius
        )
    }
}

/// Part of a circle. `sweep` is signed: positive runs counter-clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Arc {
    circle: Circle,
    start: f64,
    sweep: f64,
}

impl Arc {
    pub fn new(circle: Circle, start: f64, sweep: f64) -> Self {
        Arc {
            circle,
            start,
            sweep,
        }
    }

    /// Arc from `from` to `to` along `circle`, taking the direction that
    /// does not pass through `avoid`.
    pub fn between(circle: Circle, from: Complex64, to: Complex64, avoid: Complex64) -> Self {
        let start = circle.angle_of(from);
        let ccw = (circle.angle_of(to) - start).rem_euclid(TAU);
        let blocked = (circle.angle_of(avoid) - start).rem_euclid(TAU);
        let sweep = if ccw > 0.0 && blocked > 0.0 && blocked < ccw {
            ccw - TAU
        } else {
            ccw
        };
        Arc::new(circle, start, sweep)
    }

    pub fn circle(&self) -> Circle {
        self.circle
    }

    /// Start angle in radians
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    pub fn end(&self) -> f64 {
        self.start + self.sweep
    }

    /// Point at fraction `t` of the sweep, `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Complex64 {
        self.circle.point_at(self.start + t * self.sweep)
    }

    pub fn start_point(&self) -> Complex64 {
        self.point_at(0.0)
    }

    pub fn end_point(&self) -> Complex64 {
        self.point_at(1.0)
    }

    pub fn reflect(&self) -> Arc {
        Arc {
            circle: self.circle.reflect(),
            start: self.start + PI,
            sweep: self.sweep,
        }
    }
}

fn require_finite(what: &'static str, value: f64) -> MatchResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MatchError::Domain { what, value })
    }
}

fn require_nonnegative(what: &'static str, value: f64) -> MatchResult<f64> {
    if require_finite(what, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(MatchError::Domain { what, value })
    }
}

/// Constant normalized resistance `r`: center `(r/(r+1), 0)`, radius `1/(r+1)`.
pub fn resistance_circle(r: f64) -> MatchResult<Circle> {
    let r = require_nonnegative("normalized resistance", r)?;
    Circle::new(c64(r / (r + 1.0), 0.0), 1.0 / (r + 1.0))
}

/// Constant normalized reactance `x`: center `(1, 1/x)`, radius `1/|x|`.
///
/// `x = 0` is the real axis and has no circle.
pub fn reactance_circle(x: f64) -> MatchResult<Circle> {
    let x = require_finite("normalized reactance", x)?;
    if x == 0.0 {
        return Err(MatchError::DegenerateCircle {
            what: "zero reactance is the real axis",
        });
    }
    Circle::new(c64(1.0, 1.0 / x), 1.0 / x.abs())
}

/// Part of the constant-reactance circle inside the unit disk, from the
/// rim at `Γ(jx)` to the open-circuit point `(1, 0)`.
pub fn reactance_arc(x: f64) -> MatchResult<Arc> {
    let circle = reactance_circle(x)?;
    let x2 = x * x;
    let rim = c64(x2 - 1.0, 2.0 * x) / (x2 + 1.0);
    let start = circle.angle_of(rim);
    let end = circle.angle_of(c64(1.0, 0.0));
    let sweep = if x > 0.0 {
        (end - start).rem_euclid(TAU)
    } else {
        -(start - end).rem_euclid(TAU)
    };
    Ok(Arc::new(circle, start, sweep))
}

/// Constant normalized conductance `g`, the resistance circle reflected
/// through the origin.
pub fn conductance_circle(g: f64) -> MatchResult<Circle> {
    resistance_circle(g)
        .map(|circle| circle.reflect())
        .map_err(|_| MatchError::Domain {
            what: "normalized conductance",
            value: g,
        })
}

/// Constant normalized susceptance `b`: center `(-1, -1/b)`, radius `1/|b|`.
pub fn susceptance_circle(b: f64) -> MatchResult<Circle> {
    Ok(reactance_circle(b)?.reflect())
}

/// Part of the constant-susceptance circle inside the unit disk, ending at
/// the short-circuit point `(-1, 0)`.
pub fn susceptance_arc(b: f64) -> MatchResult<Arc> {
    Ok(reactance_arc(b)?.reflect())
}

/// Circle a series element moves `z` along: constant resistance.
pub fn series_contour(z: Complex64, z0: f64) -> MatchResult<Circle> {
    resistance_circle(normalize(z, z0)?.re)
}

/// Circle a shunt element moves `z` along: constant conductance.
pub fn shunt_contour(z: Complex64, z0: f64) -> MatchResult<Circle> {
    let zn = normalize(z, z0)?;
    if zn.re == 0.0 && zn.im == 0.0 {
        return Err(MatchError::Domain {
            what: "impedance",
            value: 0.0,
        });
    }
    conductance_circle(zn.inv().re)
}

/// Arcs traced in the reflection plane by each element of `solution`,
/// in order from the source. A missing element gives a zero sweep.
pub fn matching_arcs(solution: &NetworkSolution, spec: &MatchSpec) -> MatchResult<[Arc; 2]> {
    let path = solution.path(spec.zs());
    let z0 = spec.z0();
    let step = |k: usize, series: bool| -> MatchResult<Arc> {
        let from = z2gamma(path[k], z0)?;
        let to = z2gamma(path[k + 1], z0)?;
        if series {
            Ok(Arc::between(series_contour(path[k], z0)?, from, to, c64(1.0, 0.0)))
        } else {
            Ok(Arc::between(shunt_contour(path[k], z0)?, from, to, c64(-1.0, 0.0)))
        }
    };

    let series_first = solution.topology() == Topology::Reversed;
    Ok([step(0, series_first)?, step(1, !series_first)?])
}

/// Which family of gridlines a chart carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ChartDomain {
    Impedance,
    Admittance,
}

impl ChartDomain {
    pub fn to_str(&self) -> &str {
        match self {
            ChartDomain::Impedance => "impedance",
            ChartDomain::Admittance => "admittance",
        }
    }
}

impl fmt::Display for ChartDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Gridlines of a Smith chart in closed form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    domain: ChartDomain,
    circles: Vec<Circle>,
    arcs: Vec<Arc>,
}

impl Grid {
    /// Grid with the given real-part circles and imaginary-part arcs. Each
    /// entry of `imaginary` is drawn with both signs.
    pub fn new(domain: ChartDomain, real: &[f64], imaginary: &[f64]) -> MatchResult<Self> {
        let circles = real
            .iter()
            .map(|&v| match domain {
                ChartDomain::Impedance => resistance_circle(v),
                ChartDomain::Admittance => conductance_circle(v),
            })
            .collect::<MatchResult<Vec<_>>>()?;
        let mut arcs = Vec::with_capacity(2 * imaginary.len());
        for &v in imaginary {
            for signed in [v, -v] {
                arcs.push(match domain {
                    ChartDomain::Impedance => reactance_arc(signed)?,
                    ChartDomain::Admittance => susceptance_arc(signed)?,
                });
            }
        }
        Ok(Grid {
            domain,
            circles,
            arcs,
        })
    }

    pub fn standard(domain: ChartDomain) -> MatchResult<Self> {
        Grid::new(domain, &STANDARD_RESISTANCES, &STANDARD_REACTANCES)
    }

    pub fn domain(&self) -> ChartDomain {
        self.domain
    }

    /// Constant-resistance or constant-conductance circles
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// Constant-reactance or constant-susceptance arcs
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }
}

#[cfg(test)]
mod circle_tests {
    use super::*;
    use crate::smith::y2gamma;
    use crate::synthesis::synthesize;
    use crate::util::{comp_c64, comp_f64, loose_margin};

    const TOL: f64 = 1e-9;

    #[test]
    fn test_resistance_circle() {
        let margin = loose_margin();
        let unit = resistance_circle(0.0).unwrap();
        assert_eq!(unit.center_xy(), (0.0, 0.0));
        assert_eq!(unit.radius(), 1.0);

        let circle = resistance_circle(1.0).unwrap();
        comp_c64(&c64(0.5, 0.0), &circle.center(), margin, "center()", "r=1");
        comp_f64(&0.5, &circle.radius(), margin, "radius()", "r=1");

        for r in STANDARD_RESISTANCES {
            let circle = resistance_circle(r).unwrap();
            for x in [-3.0, -0.4, 0.0, 0.7, 12.0] {
                let gamma = z2gamma(c64(r, x), 1.0).unwrap();
                assert!(circle.contains(gamma, TOL), "r = {} x = {}", r, x);
            }
            // every constant-r circle touches the open point
            assert!(circle.contains(c64(1.0, 0.0), TOL));
        }
        assert!(resistance_circle(-0.5).unwrap_err().is_domain());
        assert!(resistance_circle(f64::NAN).unwrap_err().is_domain());
    }

    #[test]
    fn test_reactance_circle() {
        for x in [-5.0, -1.0, -0.2, 0.2, 1.0, 5.0] {
            let circle = reactance_circle(x).unwrap();
            comp_c64(&c64(1.0, 1.0 / x), &circle.center(), loose_margin(), "center()", "");
            for r in [0.0, 0.3, 1.0, 4.0] {
                let gamma = z2gamma(c64(r, x), 1.0).unwrap();
                assert!(circle.contains(gamma, TOL), "r = {} x = {}", r, x);
            }
        }
        assert_eq!(
            reactance_circle(0.0).unwrap_err(),
            MatchError::DegenerateCircle {
                what: "zero reactance is the real axis"
            }
        );
    }

    #[test]
    fn test_reactance_arc() {
        let margin = loose_margin();
        let arc = reactance_arc(1.0).unwrap();
        comp_c64(&c64(0.0, 1.0), &arc.start_point(), margin, "start_point()", "x=1");
        comp_c64(&c64(1.0, 0.0), &arc.end_point(), margin, "end_point()", "x=1");
        comp_f64(&PI, &arc.start(), margin, "start()", "x=1");
        comp_f64(&(PI / 2.0), &arc.sweep(), margin, "sweep()", "x=1");

        let arc = reactance_arc(-1.0).unwrap();
        comp_c64(&c64(0.0, -1.0), &arc.start_point(), margin, "start_point()", "x=-1");
        comp_f64(&(-PI / 2.0), &arc.sweep(), margin, "sweep()", "x=-1");

        for x in [-5.0, -0.5, 0.2, 2.0] {
            let arc = reactance_arc(x).unwrap();
            for k in 0..=10 {
                let point = arc.point_at(k as f64 / 10.0);
                assert!(point.norm() <= 1.0 + TOL, "x = {} k = {}", x, k);
            }
        }
    }

    #[test]
    fn test_admittance_circles() {
        for g in [0.0, 0.5, 2.0] {
            let circle = conductance_circle(g).unwrap();
            comp_c64(&c64(-g / (g + 1.0), 0.0), &circle.center(), loose_margin(), "center()", "");
            for b in [-1.5, 0.4] {
                let gamma = y2gamma(c64(g, b), 1.0).unwrap();
                assert!(circle.contains(gamma, TOL));
                assert!(susceptance_circle(b).unwrap().contains(gamma, TOL));
            }
        }
        let circle = susceptance_circle(2.0).unwrap();
        comp_c64(&c64(-1.0, -0.5), &circle.center(), loose_margin(), "center()", "b=2");
        assert!(conductance_circle(-1.0).unwrap_err().is_domain());
        assert!(matches!(
            susceptance_circle(0.0),
            Err(MatchError::DegenerateCircle { .. })
        ));

        let arc = susceptance_arc(1.0).unwrap();
        comp_c64(&c64(-1.0, 0.0), &arc.end_point(), loose_margin(), "end_point()", "b=1");
    }

    #[test]
    fn test_contours() {
        let z0 = 50.0;
        let z = c64(20.0, -10.0);
        let gamma = z2gamma(z, z0).unwrap();
        assert!(series_contour(z, z0).unwrap().contains(gamma, TOL));
        assert!(shunt_contour(z, z0).unwrap().contains(gamma, TOL));
        // adding reactance keeps the point on the series contour
        let moved = z2gamma(z + c64(0.0, 35.0), z0).unwrap();
        assert!(series_contour(z, z0).unwrap().contains(moved, TOL));
        assert!(shunt_contour(c64(0.0, 0.0), z0).unwrap_err().is_domain());
    }

    #[test]
    fn test_matching_arcs() {
        let spec = MatchSpec::new(c64(20.0, -10.0), c64(60.0, 60.0), 50.0, 2.44e9).unwrap();
        for solution in synthesize(&spec).unwrap() {
            let arcs = matching_arcs(&solution, &spec).unwrap();
            let path = solution.path(spec.zs());
            let margin = loose_margin();
            comp_c64(&z2gamma(path[0], 50.0).unwrap(), &arcs[0].start_point(), margin, "arcs[0]", "start");
            comp_c64(&z2gamma(path[1], 50.0).unwrap(), &arcs[0].end_point(), margin, "arcs[0]", "end");
            comp_c64(&z2gamma(path[1], 50.0).unwrap(), &arcs[1].start_point(), margin, "arcs[1]", "start");
            comp_c64(&z2gamma(spec.zt().conj(), 50.0).unwrap(), &arcs[1].end_point(), margin, "arcs[1]", "end");
            for arc in arcs {
                assert!(arc.sweep().abs() < TAU);
                for k in 0..=10 {
                    assert!(arc.point_at(k as f64 / 10.0).norm() <= 1.0 + TOL);
                }
            }
        }
    }

    #[test]
    fn test_standard_grid() {
        let grid = Grid::standard(ChartDomain::Impedance).unwrap();
        assert_eq!(grid.domain(), ChartDomain::Impedance);
        assert_eq!(grid.circles().len(), 6);
        assert_eq!(grid.arcs().len(), 10);

        let grid = Grid::standard(ChartDomain::Admittance).unwrap();
        for circle in grid.circles() {
            assert!(circle.center().re <= 0.0);
        }
        for arc in grid.arcs() {
            comp_c64(&c64(-1.0, 0.0), &arc.end_point(), loose_margin(), "end_point()", "");
        }
        assert!(Grid::new(ChartDomain::Impedance, &[1.0], &[0.0]).is_err());
    }
}
