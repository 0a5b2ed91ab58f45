/// Snapshot of the held movement and fire keys for one update tick.
///
/// The frontend builds this from the current keyboard state each frame; the
/// simulation never talks to the event queue directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}
