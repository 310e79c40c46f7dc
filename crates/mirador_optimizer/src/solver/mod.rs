pub mod construction;
pub mod crossover;
pub mod evaluator;
pub mod mutation;
pub mod search;
pub mod selection;
pub mod solution;
pub mod solver;
pub mod solver_params;
