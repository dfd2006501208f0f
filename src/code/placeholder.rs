/// How each parameter occurrence is marked in the rendered text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?`, bound purely by ordinal.
    #[default]
    Question,
    /// `$1`, `$2`, … numbered by occurrence.
    Numbered,
    /// `:name`, the parameter reference itself.
    Named,
}
