/// Result of invoking one Timeline entry.
///
/// Deliberately distinct from `Result<Vec<R>, TimelineError>`: a resolved
/// page (even an empty one, e.g. `count == 0` or a sentinel-paired-with-its-
/// own-extreme) and "the anchor does not exist" are both successful
/// outcomes of the engine's own logic — only store failures are
/// `TimelineError`s. The route handler maps `NotFound` to `404` and
/// `Page(_)` to `200`, per spec §4.4.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TimelineOutcome<R> {
    Page(Vec<R>),
    NotFound,
}

impl<R> TimelineOutcome<R> {
    #[must_use]
    pub fn into_page(self) -> Option<Vec<R>> {
        match self {
            Self::Page(rows) => Some(rows),
            Self::NotFound => None,
        }
    }
}
