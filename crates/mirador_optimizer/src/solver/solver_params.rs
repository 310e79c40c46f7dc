use jiff::SignedDuration;

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub population_size: usize,
    /// Probability that a bred child undergoes exactly one mutation.
    pub mutation_rate: f64,
    pub tournament_size: usize,
    /// Elitism carries `max(elite_minimum, population_size / 10)` individuals
    /// unchanged into the next generation.
    pub elite_minimum: usize,

    /// Convergence is only checked past this generation.
    pub convergence_after_generation: usize,
    /// Population score standard deviation below which the run converges.
    pub convergence_std_dev: f64,

    pub terminations: Vec<Termination>,
    pub evaluation_threads: Threads,

    /// Seed for the injected random source; `None` draws from OS entropy.
    /// Tests pass a fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug)]
pub enum Termination {
    Iterations(usize),
    Duration(SignedDuration),
}

#[derive(Clone, Debug)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            population_size: 30,
            mutation_rate: 0.15,
            tournament_size: 3,
            elite_minimum: 2,

            convergence_after_generation: 100,
            convergence_std_dev: 0.01,

            terminations: vec![
                Termination::Iterations(500),
                Termination::Duration(SignedDuration::from_secs(30)),
            ],
            evaluation_threads: Threads::Auto,
            seed: None,
        }
    }
}

impl SolverParams {
    pub fn max_iterations(&self) -> Option<usize> {
        self.terminations.iter().find_map(|termination| match termination {
            Termination::Iterations(max_iterations) => Some(*max_iterations),
            _ => None,
        })
    }

    pub fn max_duration(&self) -> Option<SignedDuration> {
        self.terminations.iter().find_map(|termination| match termination {
            Termination::Duration(max_duration) => Some(*max_duration),
            _ => None,
        })
    }

    pub fn elite_count(&self) -> usize {
        self.elite_minimum.max(self.population_size / 10)
    }
}
