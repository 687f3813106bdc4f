/// Control actions supported by the backward sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the sweep and return the carry produced so far.
    StopEarly,
}
