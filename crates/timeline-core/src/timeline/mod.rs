//! Module: timeline
//! Responsibility: the generic cursor-query dispatcher (spec §4.2) — four
//! operation kinds (`Empty | Absolute | Record | Identifier`), assembled
//! per family via `generate_absolute_parameters`/`generate_id_parameters`,
//! and bound under names a route handler looks up after classifying an
//! anchor.
//! Does not own: range-predicate construction, ordering, or how a family
//! turns a resolved anchor record into the next query's sort key — those
//! are `predicate`, `cursor::order`, and each family's `extract` functions.
//! Boundary: a method name and a count in, a page or a not-found outcome
//! out.

mod engine;
mod outcome;

pub use engine::{
    AnchorInput, BoxFut, ExtractFn, LookupCall, RangeCall, Timeline, TimelineEntry,
    generate_absolute_parameters, generate_id_parameters,
};
pub use outcome::TimelineOutcome;
