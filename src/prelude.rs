//! rfmatch prelude.
//!
//! This module contains the most used types and functions that you can
//! import easily as a group.
//!
//! ```
//! use rfmatch::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use num_complex::{c64, Complex64};

#[doc(no_inline)]
pub use crate::component::{classify, Component, ComponentKind, Placement, PracticalLimits};

#[doc(no_inline)]
pub use crate::error::{MatchError, MatchResult};

#[doc(no_inline)]
pub use crate::impedance::{parse_complex, parse_frequency, MatchSpec, MatchSpecBuilder};

#[doc(no_inline)]
pub use crate::scale::Scale;

#[doc(no_inline)]
pub use crate::smith::circle::{
    conductance_circle, matching_arcs, reactance_arc, reactance_circle, resistance_circle,
    series_contour, shunt_contour, susceptance_arc, susceptance_circle, Arc, ChartDomain, Circle,
    Grid,
};
#[doc(no_inline)]
pub use crate::smith::{admittance_chart_point, gamma2z, normalize, y2gamma, z2gamma};

#[doc(no_inline)]
pub use crate::synthesis::{
    feasible_topologies, synthesize, Branch, NetworkSolution, ReactancePair, Synthesizer,
    SynthesizerBuilder, Topology,
};

#[doc(no_inline)]
pub use crate::unit::{format_si, Unit, UnitVal};
