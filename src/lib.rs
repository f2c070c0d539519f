//! exactsample - exact, bias-controlled random sampling primitives
//!
//! Small building blocks for randomized algorithms that need precisely
//! specified distributions from a plain source of uniform bits.
//!
//! # Architecture
//!
//! - **Bounded integers**: exact Lemire rejection, plus a biased variant with a
//!   published bias profile
//! - **Index pairs and triples**: distinct, sorted, or confined to a window,
//!   each from a constant number of draws
//! - **k-subsets**: reservoir, pool and insertion samplers behind one dispatcher,
//!   with optional caller-owned output buffers
//! - **Binomial variates**: inverse transform and BTPE, with a caller-owned
//!   setup cache
//! - **Bench harness**: timing and statistical checks of all of the above
//!
//! Randomness always comes from a caller-supplied [`distribution::UniformSource`];
//! any `rand::RngCore` qualifies.

pub mod bench;
pub mod config;
pub mod distribution;
pub mod error;
pub mod index;
pub mod output;
pub mod sample;
pub mod stats;
pub mod util;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use distribution::binomial::{next_binomial, BinomialCache};
pub use distribution::bounded::{next_biased_int, next_int};
pub use distribution::UniformSource;
pub use error::{Result, SampleError};
pub use index::{IndexPair, IndexTriple};
pub use sample::{sample, Sample};
