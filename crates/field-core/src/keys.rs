/// Keyboard action on the mode selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeKey {
    /// Select the registry entry at this index.
    Select(usize),
    Next,
    Previous,
}

#[inline]
pub fn mode_key(key: &str) -> Option<ModeKey> {
    match key {
        "1" => Some(ModeKey::Select(0)),
        "2" => Some(ModeKey::Select(1)),
        "3" => Some(ModeKey::Select(2)),
        "ArrowRight" => Some(ModeKey::Next),
        "ArrowLeft" => Some(ModeKey::Previous),
        _ => None,
    }
}
