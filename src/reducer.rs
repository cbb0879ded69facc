//! Reducer trait for named transition functions.

/// A type whose associated function is a transition function.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, &Action) -> State
///
/// Implementing this trait gives a transition a name that can be lifted
/// into an [`Update`](crate::Update) with [`Update::of`](crate::Update::of).
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer handles.
    type Action;

    /// Process an action and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, action: &Self::Action) -> Self::State;
}
