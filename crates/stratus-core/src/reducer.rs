/// A pure `(state, intent) -> state` transition.
///
/// Reducers are for transitions simple enough to express without side
/// effects: no I/O, no blocking, no async. They must be total over the intent
/// variants they claim to handle and must not retain references to the state
/// they are given.
///
/// Any `Fn(&S, &I) -> S + Send + Sync` closure or fn pointer is a reducer, so
/// screens usually point [`Screen::reducer`](crate::Screen::reducer) at a
/// plain function.
pub trait Reducer<S, I>: Send + Sync {
    /// Compute the next state. Must be pure.
    fn reduce(&self, state: &S, intent: &I) -> S;
}

impl<S, I, F> Reducer<S, I> for F
where
    F: Fn(&S, &I) -> S + Send + Sync,
{
    fn reduce(&self, state: &S, intent: &I) -> S {
        self(state, intent)
    }
}
