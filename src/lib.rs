//! Canonical trees for DAIDE diplomacy messages.
//!
//! A message such as `PRP (XDO (FRA FLT LON MTO NTH))` is parsed into a tree,
//! restructured so every keyword owns its arguments, and normalized so that
//! order-insensitive constructs (`AND`, `ORR`, `PCE`, `ALY`, ...) compare
//! equal regardless of argument order. On top of that the crate scores a
//! generated message against a reference:
//!
//! ```
//! assert!(daidetree::equal(
//!     "AND (PCE (FRA GER)) (PCE (FRA RUS))",
//!     "AND (PCE (FRA RUS)) (PCE (FRA GER))",
//! ));
//! assert_eq!(daidetree::accuracy("PCE (FRA GER)", "PCE (GER FRA)"), 1.0);
//! assert_eq!(
//!     daidetree::f_score("XDO (FRA FLT LON MTO NTH)", "XDO (GER FLT LON MTO NTH)", true),
//!     1.0
//! );
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{accuracy, equal, f_score, parse, trees_equal, DaideTree};
