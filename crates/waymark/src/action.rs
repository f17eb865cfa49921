/// One side of a migration unit: the up or the down step.
///
/// A capability with a single operation, so tests can substitute counting or
/// failing implementations. Any `FnMut` closure returning `anyhow::Result`
/// is an action.
pub trait Action {
    fn execute(&mut self) -> anyhow::Result<()>;
}

impl<F> Action for F
where
    F: FnMut() -> anyhow::Result<()>,
{
    fn execute(&mut self) -> anyhow::Result<()> {
        self()
    }
}
