use besyft_bench_lib::{
    write_trial_records, Dominance, GoalFamily, Instance, Phase, PhaseTimes, Realizability,
    StartingPlayer, TrialRecord, TIMEOUT,
};
use itertools::iproduct;
use rand::{distributions::WeightedIndex, prelude::*};
use std::env;
use strum::IntoEnumIterator;

const DEFAULT_COUNTER: u32 = 8;
const DEFAULT_REQUESTS: u32 = 10;

/// Runtime of a phase grows with the counter width and the number of requests.
fn phase_seconds(rng: &mut impl Rng, counter_size: u32, requests: u32) -> f64 {
    0.0005 * f64::from(1u32 << counter_size.min(20)) * f64::from(requests) * rng.gen_range(0.5..1.5)
}

fn simulate(
    rng: &mut impl Rng,
    outcomes: &WeightedIndex<usize>,
    implementation: &str,
    reactive: bool,
    instance: Instance,
    counter_size: u32,
) -> Option<TrialRecord> {
    let realizability = Realizability::iter().nth(outcomes.sample(rng))?;
    let realizability = match (reactive, realizability) {
        (true, Realizability::Cooperative) => Realizability::Unrealizable,
        (_, r) => r,
    };

    let mut phases = PhaseTimes::default();
    for phase in Phase::iter() {
        let skipped = reactive
            && matches!(phase, Phase::CooperativeGame | Phase::DominanceTest);
        if !skipped {
            phases.0[phase as usize] = Some(phase_seconds(rng, counter_size, instance.requests));
        }
    }
    let total_runtime = phases.sum();
    // timed out runs leave no row behind
    if total_runtime >= TIMEOUT {
        return None;
    }

    let dominance = match (reactive, realizability) {
        (true, Realizability::Unrealizable) => Dominance::NotApplicable,
        (false, Realizability::Cooperative) if rng.gen() => Dominance::NonDominant,
        _ => Dominance::Dominant,
    };

    Some(TrialRecord {
        implementation: implementation.to_string(),
        goal_file: instance.goal_file(counter_size),
        env_file: instance.env_file(),
        starting_player: if rng.gen() {
            StartingPlayer::Agent
        } else {
            StartingPlayer::Environment
        },
        phases,
        total_runtime,
        realizability,
        dominance,
    })
}

fn main() -> std::io::Result<()> {
    let mut args = env::args().skip(1);
    let implementation = args
        .next()
        .unwrap_or_else(|| "Compositional Best-Effort Synthesizer".to_string());
    let max_counter = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_COUNTER);
    let max_requests = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(DEFAULT_REQUESTS);
    let reactive = implementation.contains("Reactive");

    // Adv, Coop, Unr
    const WEIGHTS: [usize; 3] = [3, 5, 2];
    let outcomes = WeightedIndex::new(WEIGHTS).expect("weights are positive");
    let mut rng = thread_rng();

    let families = [GoalFamily::NonDominance, GoalFamily::Dominance];
    let records = iproduct!(families, 1..=max_counter, 1..=max_requests)
        .filter_map(|(family, counter_size, requests)| {
            simulate(
                &mut rng,
                &outcomes,
                &implementation,
                reactive,
                Instance::new(family, requests),
                counter_size,
            )
        })
        .collect::<Vec<_>>();
    write_trial_records(&records, std::io::stdout())
}
