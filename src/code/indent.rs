/// One level of the indentation stack.
///
/// `width` is the column every continuation line starts at. `first`, when
/// set, replaces the padding of the next line only: it is right aligned within
/// `width` so markers of different lengths (`where `, `and `, `or `) line up on
/// their trailing edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) width: usize,
    pub(crate) first: Option<String>,
}

impl Frame {
    pub(crate) fn nested(&self, delta: usize, first: Option<String>) -> Self {
        Self {
            width: self.width + delta,
            first,
        }
    }

    /// Text to emit at the start of the next line, consuming any pending marker.
    pub(crate) fn take_prefix(&mut self) -> String {
        match self.first.take() {
            Some(marker) => {
                let pad = self.width.saturating_sub(marker.chars().count());
                format!("{}{marker}", " ".repeat(pad))
            }
            None => " ".repeat(self.width),
        }
    }
}
