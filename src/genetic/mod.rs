//! The heuristic "genetic" augmentation loop.
//!
//! Not a genetic algorithm in any rigorous sense: no tunable mutation or
//! crossover rates, no convergence criterion. One generation is
//! mutate-score-select-display-crossover over the whole pool, repeated a
//! fixed number of times.

pub mod evolve;
pub mod fitness;

pub use evolve::evolve;
pub use fitness::fitness;
