/// Edge-triggered "changed since last check" flag.
///
/// `drain` clears the flag as it reads it, so a set is observed
/// exactly once. Contract: a single consumer drains once per frame;
/// a second drain in the same frame sees `false`.
#[derive(Debug, Default)]
pub struct ChangeFlag {
    set: bool,
}

impl ChangeFlag {
    pub fn new() -> ChangeFlag {
        ChangeFlag { set: false }
    }

    pub fn set(&mut self) {
        self.set = true;
    }

    /// Read and clear
    pub fn drain(&mut self) -> bool {
        std::mem::take(&mut self.set)
    }

    /// Read without clearing, for non-consuming diagnostics only
    pub fn peek(&self) -> bool {
        self.set
    }
}
