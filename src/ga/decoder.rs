//! Genotype-to-phenotype decoders.
//!
//! Every decoder resolves the first event the same way: `start_index`
//! picks the task and `start_selector` picks one of its feasible starting
//! speeds. The remaining `n - 1` events walk the catalog cyclically from
//! the task after the first.
//!
//! | Decoder | Genes | Result |
//! |---------|-------|--------|
//! | [`decode_absolute`] | absolute speeds | validated afterwards, may be infeasible |
//! | [`decode_repairing`] | absolute speeds | repaired in place, infeasible only at an unbridgeable gap |
//! | [`decode_relative`] | selectors in `[0, 1]` | feasible by construction |

use rand::Rng;
use tracing::debug;

use super::{Genotype, RepairStrategy};
use crate::feasibility::{is_valid, next_feasible_range, AccelerationBounds};
use crate::models::{Event, EventSequence, TaskCatalog};

/// Resolves the first event of a sequence.
///
/// `start_selector` maps to index `floor(selector * count)`; a selector of
/// `1.0` maps to the last starting speed rather than past the end. A
/// `start_index` past the catalog wraps around, like the following events.
pub fn start_event(catalog: &TaskCatalog, genotype: &Genotype) -> Event {
    let task = catalog.task_cyclic(genotype.start_index);
    let count = task.feasible_starting_speeds().len();
    let index = ((genotype.start_selector * count as f64) as usize).min(count - 1);
    task.event(task.initial_speed(index))
}

/// Decodes absolute speeds without repair.
///
/// The feasibility flag is computed afterwards with [`is_valid`].
pub fn decode_absolute(
    catalog: &TaskCatalog,
    acc: AccelerationBounds,
    genotype: &Genotype,
) -> EventSequence {
    let mut events = Vec::with_capacity(genotype.values.len() + 1);
    events.push(start_event(catalog, genotype));

    for (i, &omega) in genotype.values.iter().enumerate() {
        let task = catalog.task_cyclic(genotype.start_index + 1 + i);
        events.push(task.event(omega));
    }

    let feasible = is_valid(&events, acc);
    EventSequence::new(events, feasible)
}

/// Decodes absolute speeds, repairing out-of-range genes in place.
///
/// Each gene outside its reachable window `(lower, upper]` is replaced by
/// `strategy` and written back into `genotype`, so the search continues
/// from the corrected point. When a window is empty the sequence cannot
/// be repaired; the events decoded so far are returned flagged infeasible.
pub fn decode_repairing<R: Rng>(
    catalog: &TaskCatalog,
    acc: AccelerationBounds,
    genotype: &mut Genotype,
    strategy: RepairStrategy,
    rng: &mut R,
) -> EventSequence {
    let plain = decode_absolute(catalog, acc, genotype);
    if plain.feasible {
        return plain;
    }

    let mut events = Vec::with_capacity(genotype.values.len() + 1);
    events.push(start_event(catalog, genotype));

    for i in 0..genotype.values.len() {
        let task = catalog.task_cyclic(genotype.start_index + 1 + i);
        let curr = &events[events.len() - 1];

        let Some(range) = next_feasible_range(curr, task, acc) else {
            debug!(position = i + 1, task = %task.id, "unrepairable speed discontinuity");
            return EventSequence::infeasible(events);
        };

        let raw = genotype.values[i];
        let omega = if range.contains_open_lower(raw) {
            raw
        } else {
            let repaired = strategy.repair(&range, raw, rng);
            debug!(
                position = i + 1,
                ?strategy,
                raw,
                repaired,
                lower = range.lower(),
                upper = range.upper(),
                "repaired speed gene"
            );
            genotype.values[i] = repaired;
            repaired
        };

        events.push(task.event(omega));
    }

    let feasible = is_valid(&events, acc);
    EventSequence::new(events, feasible)
}

/// Decodes normalized selectors into speeds inside each reachable window.
///
/// `omega_i = lower + (upper - lower) * f_i` with `f_i` clamped to `[0, 1]`,
/// nudged off `lower` unless the window is a single point. Every
/// genotype maps to a feasible sequence as long as each window intersects
/// the next task's domain; a catalog that leaves a window empty yields an
/// infeasible partial sequence instead of out-of-domain speeds.
pub fn decode_relative(
    catalog: &TaskCatalog,
    acc: AccelerationBounds,
    genotype: &Genotype,
) -> EventSequence {
    let mut events = Vec::with_capacity(genotype.values.len() + 1);
    events.push(start_event(catalog, genotype));

    for (i, &fraction) in genotype.values.iter().enumerate() {
        let task = catalog.task_cyclic(genotype.start_index + 1 + i);
        let curr = &events[events.len() - 1];

        let Some(range) = next_feasible_range(curr, task, acc) else {
            debug!(position = i + 1, task = %task.id, "reachable range misses task domain");
            return EventSequence::infeasible(events);
        };

        events.push(task.event(range.interpolate(fraction)));
    }

    EventSequence::new(events, true)
}
