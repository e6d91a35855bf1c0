//! Lumped-element L-section impedance matching and Smith chart mapping.
//!
//! [`synthesis::Synthesizer`] computes the two-element networks that match a
//! source impedance to a target impedance at one frequency.
//! [`smith`] maps impedances and admittances to reflection coefficients and
//! supplies the closed-form chart circles a renderer needs.
//!
//! ```
//! use rfmatch::prelude::*;
//!
//! let spec = MatchSpecBuilder::new()
//!     .zs(c64(100.0, 75.0))
//!     .zt(c64(30.0, 0.0))
//!     .z0(50.0)
//!     .freq_scaled(2.44, Scale::Giga)
//!     .build()
//!     .unwrap();
//! for solution in synthesize(&spec).unwrap() {
//!     println!("{}", solution);
//! }
//! ```
pub mod component;
pub mod error;
pub mod impedance;
pub mod prelude;
pub mod scale;
pub mod smith;
pub mod synthesis;
pub mod unit;
pub mod util;
