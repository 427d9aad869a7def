//! Hand classification and chips-times-mult scoring. Keep this crate free of IO.

pub mod cards;
pub mod config;
pub mod deck;
pub mod effects;
pub mod events;
pub mod hand;
pub mod held;
pub mod rng;
pub mod rules;
pub mod run;
pub mod scoring;

pub use cards::*;
pub use config::*;
pub use deck::*;
pub use effects::*;
pub use events::*;
pub use hand::*;
pub use held::*;
pub use rng::*;
pub use rules::*;
pub use run::*;
pub use scoring::*;
