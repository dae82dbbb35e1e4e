//! Command synthesis for flagline targeting configurations.
//!
//! Turns a baseline/draft snapshot pair into either an ordered list of
//! atomic [`Command`]s for immediate application, or a coarse [`Patch`] for
//! scheduled application. Both share the differs in `flagline-diff` and only
//! vary in how they emit. Synthesis is pure: no I/O, no retained state, no
//! errors.
//!
//! # Quick Start
//!
//! ```rust
//! use flagline_synth::{synthesize, Command, SynthesisOptions};
//! use flagline_types::{Strategy, TargetingConfiguration};
//!
//! let baseline = TargetingConfiguration::new(Strategy::fixed("on"), "off");
//! let mut draft = baseline.clone();
//! draft.enabled = true;
//!
//! let commands = synthesize(&baseline, &draft, &SynthesisOptions::all());
//! assert_eq!(commands, vec![Command::EnableFeature]);
//! ```

pub mod command;
pub mod immediate;
pub mod options;
pub mod patch;

// Re-exports for convenience.
pub use command::Command;
pub use immediate::synthesize;
pub use options::{SynthesisOptions, TouchedFields};
pub use patch::{
    synthesize_patch, ChangeType, Patch, PrerequisiteChange, RuleChange, RuleOrder, TargetChange,
};
