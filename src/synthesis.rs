pub mod reactance;

pub use reactance::{
    feasible_topologies, normal_reactances, reactances, reversed_reactances, Branch,
    ReactancePair, Topology,
};

use crate::component::{classify, Component, Placement, PracticalLimits};
use crate::error::{require_positive, MatchResult};
use crate::impedance::MatchSpec;
use crate::util::rel_eq;
use num_complex::{c64, Complex64};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

/// One realizable two-element matching network.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NetworkSolution {
    topology: Topology,
    branch: Branch,
    shunt: Component,
    series: Component,
    practical: bool,
}

impl NetworkSolution {
    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn shunt(&self) -> Component {
        self.shunt
    }

    pub fn series(&self) -> Component {
        self.series
    }

    /// False when either element exceeds the synthesizer's practical limits.
    pub fn is_practical(&self) -> bool {
        self.practical
    }

    /// Elements in order from the source toward the target.
    pub fn elements(&self) -> [Component; 2] {
        match self.topology {
            Topology::Normal => [self.shunt, self.series],
            Topology::Reversed => [self.series, self.shunt],
        }
    }

    /// Impedance seen looking back toward the source: at the source, after
    /// the first element and after the second. The last point is the
    /// conjugate of the target impedance.
    pub fn path(&self, zs: Complex64) -> [Complex64; 3] {
        let x_shunt = self.shunt.reactance();
        let x_series = self.series.reactance();
        match self.topology {
            Topology::Normal => {
                let mid = parallel_reactance(zs, x_shunt);
                [zs, mid, mid + c64(0.0, x_series)]
            }
            Topology::Reversed => {
                let mid = zs + c64(0.0, x_series);
                [zs, mid, parallel_reactance(mid, x_shunt)]
            }
        }
    }

    /// Impedance presented to the target.
    pub fn output_impedance(&self, zs: Complex64) -> Complex64 {
        self.path(zs)[2]
    }
}

impl fmt::Display for NetworkSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = self.elements();
        write!(f, "[{}] {}, {}", self.topology, first, second)?;
        if !self.practical {
            write!(f, " (impractical)")?;
        }
        Ok(())
    }
}

/// `z` in parallel with reactance `x`; an infinite `x` leaves `z` unchanged.
fn parallel_reactance(z: Complex64, x: f64) -> Complex64 {
    if x.is_infinite() {
        return z;
    }
    let jx = c64(0.0, x);
    z * jx / (z + jx)
}

/// Lumped-element L-section synthesizer.
///
/// # Example
///
/// ```
/// use num_complex::c64;
/// use rfmatch::impedance::MatchSpec;
/// use rfmatch::synthesis::{Synthesizer, Topology};
///
/// let spec = MatchSpec::new(c64(20.0, -10.0), c64(60.0, 60.0), 50.0, 2.44e9).unwrap();
/// let solutions = Synthesizer::default().synthesize(&spec).unwrap();
/// assert_eq!(solutions.len(), 2);
/// assert!(solutions.iter().all(|s| s.topology() == Topology::Reversed));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Synthesizer {
    dedup_tolerance: f64,
    limits: PracticalLimits,
    topologies: Vec<Topology>,
}

impl Synthesizer {
    pub fn builder() -> SynthesizerBuilder {
        SynthesizerBuilder::new()
    }

    pub fn dedup_tolerance(&self) -> f64 {
        self.dedup_tolerance
    }

    pub fn limits(&self) -> PracticalLimits {
        self.limits
    }

    pub fn topologies(&self) -> &[Topology] {
        &self.topologies
    }

    /// All feasible networks for `spec`, normal arrangements first. Within
    /// an arrangement branch 1 precedes branch 2, and a second branch equal
    /// to the first is dropped.
    pub fn synthesize(&self, spec: &MatchSpec) -> MatchResult<Vec<NetworkSolution>> {
        let feasible = feasible_topologies(spec);
        debug!(
            zs = %spec.zs(),
            zt = %spec.zt(),
            freq = spec.freq(),
            ?feasible,
            "feasible topologies"
        );

        let mut solutions = Vec::with_capacity(4);
        for topology in feasible {
            if !self.topologies.contains(&topology) {
                trace!(%topology, "topology disabled");
                continue;
            }
            let pair = reactances(spec, topology);
            trace!(%topology, ?pair, "reactances");

            for branch in self.branches(&pair) {
                let (x_shunt, x_series) = pair.branch(branch);
                let shunt = classify(x_shunt, spec.freq(), Placement::Shunt)?
                    .flag_practical(&self.limits);
                let series = classify(x_series, spec.freq(), Placement::Series)?
                    .flag_practical(&self.limits);
                let practical = shunt.is_practical() && series.is_practical();
                solutions.push(NetworkSolution {
                    topology,
                    branch,
                    shunt,
                    series,
                    practical,
                });
            }
        }
        debug!(count = solutions.len(), "synthesized networks");
        Ok(solutions)
    }

    /// Validate raw source and target impedances, then synthesize.
    pub fn match_impedances(
        &self,
        zs: Complex64,
        zt: Complex64,
        z0: f64,
        freq: f64,
    ) -> MatchResult<Vec<NetworkSolution>> {
        self.synthesize(&MatchSpec::new(zs, zt, z0, freq)?)
    }

    /// Synthesize every spec in parallel. Results keep the input order.
    pub fn synthesize_batch(&self, specs: &[MatchSpec]) -> Vec<MatchResult<Vec<NetworkSolution>>> {
        specs.par_iter().map(|spec| self.synthesize(spec)).collect()
    }

    fn branches(&self, pair: &ReactancePair) -> Vec<Branch> {
        let duplicate = rel_eq(pair.x_shunt1, pair.x_shunt2, self.dedup_tolerance)
            && rel_eq(pair.x_series1, pair.x_series2, self.dedup_tolerance);
        if duplicate {
            vec![Branch::First]
        } else {
            vec![Branch::First, Branch::Second]
        }
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Synthesizer {
            dedup_tolerance: 1e-12,
            limits: PracticalLimits::default(),
            topologies: Topology::ALL.to_vec(),
        }
    }
}

/// Synthesize with the default configuration.
pub fn synthesize(spec: &MatchSpec) -> MatchResult<Vec<NetworkSolution>> {
    Synthesizer::default().synthesize(spec)
}

#[derive(Clone, Debug, Default)]
pub struct SynthesizerBuilder {
    dedup_tolerance: Option<f64>,
    limits: Option<PracticalLimits>,
    topologies: Option<Vec<Topology>>,
}

impl SynthesizerBuilder {
    pub fn new() -> Self {
        SynthesizerBuilder::default()
    }

    /// Relative tolerance below which the two branches count as one.
    pub fn dedup_tolerance(mut self, tolerance: f64) -> Self {
        self.dedup_tolerance = Some(tolerance);
        self
    }

    pub fn limits(mut self, limits: PracticalLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Restrict the arrangements considered. Feasibility still applies.
    pub fn topologies(mut self, topologies: &[Topology]) -> Self {
        self.topologies = Some(topologies.to_vec());
        self
    }

    pub fn build(self) -> MatchResult<Synthesizer> {
        let defaults = Synthesizer::default();
        let dedup_tolerance = match self.dedup_tolerance {
            Some(tolerance) => require_positive("dedup tolerance", tolerance)?,
            None => defaults.dedup_tolerance,
        };
        Ok(Synthesizer {
            dedup_tolerance,
            limits: self.limits.unwrap_or(defaults.limits),
            topologies: self.topologies.unwrap_or(defaults.topologies),
        })
    }
}
