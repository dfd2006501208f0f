use crate::code::Frame;
use crate::*;
use indexmap::{IndexMap, map::Entry};
use std::fmt::Display;

/// Mutable SQL text buffer with an indentation stack and parameter registry.
///
/// Indentation is applied lazily: a line's padding is written only when the
/// first text lands on it, so blank lines never carry trailing spaces.
///
/// ```rust
/// use sqlfrag::*;
///
/// let mut b = CodeBuilder::new();
/// b.append_line_with("select *");
/// b.append_line_with("  from t");
/// b.increase_indent_with(6, "where ");
/// b.append("a = ");
/// b.append_parameter(&Parameter::typed("a", DataType::Integer)?)?;
/// b.append_line();
/// b.set_indent("and ");
/// b.append("b = 2");
/// b.pop_indent();
/// assert_eq!(b.build(), "select *\n  from t\nwhere a = ?\n  and b = 2");
/// # Ok::<(), sqlfrag::Error>(())
/// ```
#[derive(Debug)]
pub struct CodeBuilder {
    text: String,
    frames: Vec<Frame>,
    at_line_start: bool,
    placeholder: PlaceholderStyle,
    adapters: TypeAdapters,
    registry: IndexMap<String, Parameter>,
    occurrences: Vec<String>,
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBuilder {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            frames: vec![Frame::default()],
            at_line_start: true,
            placeholder: PlaceholderStyle::default(),
            adapters: TypeAdapters::default(),
            registry: IndexMap::new(),
            occurrences: Vec::new(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: PlaceholderStyle) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn with_adapters(mut self, adapters: TypeAdapters) -> Self {
        self.adapters = adapters;
        self
    }

    pub fn placeholder(&self) -> PlaceholderStyle {
        self.placeholder
    }

    /// Text rendered so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_at_line_start(&self) -> bool {
        self.at_line_start
    }

    // --- Text ---

    /// Append the display form of `value` (text, char, number, name, …).
    ///
    /// The text is written verbatim; embedded newlines are not re-indented,
    /// use [`CodeBuilder::append_wrapped`] for that.
    pub fn append(&mut self, value: impl Display) -> &mut Self {
        let text = value.to_string();
        if text.is_empty() {
            return self;
        }
        self.start_line();
        self.text.push_str(&text);
        self
    }

    /// Terminate the current line.
    pub fn append_line(&mut self) -> &mut Self {
        self.text.push('\n');
        self.at_line_start = true;
        self
    }

    /// Append `value` and terminate the line.
    pub fn append_line_with(&mut self, value: impl Display) -> &mut Self {
        self.append(value).append_line()
    }

    /// Append multi-line text, re-indenting every continuation line at the
    /// current frame's width plus `extra_indent`.
    ///
    /// The input is assumed to be laid out from column zero, as produced by
    /// rendering a sub-statement into its own builder; its relative
    /// indentation is kept. A marker still pending after the first line goes
    /// to the first continuation line that receives text.
    pub fn append_wrapped(&mut self, text: &str, extra_indent: usize) -> &mut Self {
        let mut lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .peekable();
        if let Some(first) = lines.next() {
            self.append(first);
        }
        if lines.peek().is_none() {
            return self;
        }
        let marker = self.top_mut().first.take();
        let frame = self.top().nested(extra_indent, marker);
        self.frames.push(frame);
        for line in lines {
            self.append_line().append(line);
        }
        if let Some(Frame {
            first: Some(marker),
            ..
        }) = self.frames.pop()
        {
            self.top_mut().first = Some(marker);
        }
        self
    }

    pub fn append_ident(&mut self, ident: &Identifier) -> &mut Self {
        self.append(ident)
    }

    pub fn append_name(&mut self, name: &SegmentedName) -> &mut Self {
        self.append(name)
    }

    fn start_line(&mut self) {
        if !self.at_line_start {
            return;
        }
        let prefix = self.top_mut().take_prefix();
        self.text.push_str(&prefix);
        self.at_line_start = false;
    }

    // --- Indentation ---

    fn top(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Number of frames pushed above the base frame.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Column continuation lines currently start at.
    pub fn width(&self) -> usize {
        self.top().width
    }

    /// Use `marker` instead of plain padding at the start of the next line.
    pub fn set_indent(&mut self, marker: impl Into<String>) -> &mut Self {
        self.top_mut().first = Some(marker.into());
        self
    }

    /// Push a frame `delta` columns wider than the current one.
    pub fn increase_indent(&mut self, delta: usize) -> &mut Self {
        let frame = self.top().nested(delta, None);
        self.frames.push(frame);
        self
    }

    /// Push a frame `delta` columns wider whose next line starts with `marker`.
    pub fn increase_indent_with(&mut self, delta: usize, marker: impl Into<String>) -> &mut Self {
        let frame = self.top().nested(delta, Some(marker.into()));
        self.frames.push(frame);
        self
    }

    /// Push a frame of the configured default width.
    pub fn indent(&mut self) -> &mut Self {
        self.increase_indent(config().indent_width)
    }

    /// Restore the frame active before the matching push.
    ///
    /// # Panics
    /// When called without a matching push; an unbalanced stack is a bug in the
    /// caller's rendering code.
    pub fn pop_indent(&mut self) -> &mut Self {
        assert!(
            self.frames.len() > 1,
            "pop_indent called without a matching increase_indent"
        );
        self.frames.pop();
        self
    }

    /// Run `render` inside a frame `delta` columns wider, popping it afterwards.
    pub fn indented<T>(&mut self, delta: usize, render: impl FnOnce(&mut Self) -> T) -> T {
        self.increase_indent(delta);
        let depth = self.depth();
        let out = render(self);
        debug_assert_eq!(depth, self.depth(), "unbalanced indentation inside fragment");
        self.pop_indent();
        out
    }

    // --- Parameters ---

    /// Register one occurrence of `parameter` without writing a placeholder.
    ///
    /// Repeated names are merged with [`Parameter::combine`]; on conflict the
    /// builder is left unchanged.
    pub fn add_parameter(&mut self, parameter: &Parameter) -> Result {
        match self.registry.entry(parameter.name().to_string()) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get().combine(parameter)?;
                if !merged.ptr_eq(entry.get()) {
                    debug!(
                        "Parameter {} refined to {merged:?}",
                        parameter.name()
                    );
                    entry.insert(merged);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(parameter.clone());
            }
        }
        self.occurrences.push(parameter.name().to_string());
        Ok(())
    }

    /// Register one occurrence of `parameter` and write its placeholder.
    pub fn append_parameter(&mut self, parameter: &Parameter) -> Result {
        self.add_parameter(parameter)?;
        match self.placeholder {
            PlaceholderStyle::Question => self.append('?'),
            PlaceholderStyle::Numbered => {
                let ordinal = self.occurrences.len();
                self.append(format_args!("${ordinal}"))
            }
            PlaceholderStyle::Named => self.append(parameter),
        };
        Ok(())
    }

    /// Write the value of `parameter` inline as a literal instead of binding it.
    pub fn append_literal(&mut self, parameter: &Parameter) -> Result {
        let literal = self.adapters.literal(parameter)?;
        self.append(literal);
        Ok(())
    }

    /// Register the parameters of an already rendered fragment.
    ///
    /// Positions are relative to the fragment and must cover `1..=n` exactly
    /// once, where `n` is the total number of positions listed. Occurrences are
    /// appended in position order after those already registered. The builder
    /// is left unchanged on error.
    pub fn add_parameters_with_positions(&mut self, list: &[ParameterWithPositions]) -> Result {
        let total = list.iter().map(|entry| entry.positions.len()).sum();
        let mut slots: Vec<Option<&Parameter>> = vec![None; total];
        for entry in list {
            for &position in &entry.positions {
                let slot = position
                    .checked_sub(1)
                    .and_then(|i| slots.get_mut(i))
                    .ok_or_else(|| Error::InvalidPositions {
                        reason: format!("position {position} outside 1..={total}"),
                    })?;
                if slot.is_some() {
                    return Err(Error::InvalidPositions {
                        reason: format!("position {position} listed twice"),
                    });
                }
                *slot = Some(&entry.parameter);
            }
        }

        self.atomically(|builder| {
            for parameter in slots.into_iter().flatten() {
                builder.add_parameter(parameter)?;
            }
            Ok(())
        })
    }

    /// Run `render` against this builder; if it fails, text, indentation and
    /// parameters are restored to their state before the call.
    pub fn atomically<T>(&mut self, render: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let text = self.text.len();
        let frames = self.frames.clone();
        let at_line_start = self.at_line_start;
        let registry = self.registry.clone();
        let occurrences = self.occurrences.len();

        let out = render(self);
        if out.is_err() {
            self.text.truncate(text);
            self.frames = frames;
            self.at_line_start = at_line_start;
            self.registry = registry;
            self.occurrences.truncate(occurrences);
        }
        out
    }

    /// Distinct parameters registered so far, in first-occurrence order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.registry.values()
    }

    /// Total placeholder occurrences registered so far.
    pub fn occurrence_count(&self) -> usize {
        self.occurrences.len()
    }

    // --- Output ---

    /// The rendered text.
    pub fn build(&self) -> String {
        self.text.clone()
    }

    /// One entry per distinct parameter with the ordinals of its occurrences.
    pub fn parameters_with_positions(&self) -> Vec<ParameterWithPositions> {
        let mut positions = vec![Vec::new(); self.registry.len()];
        for (i, name) in self.occurrences.iter().enumerate() {
            if let Some(index) = self.registry.get_index_of(name) {
                positions[index].push(i + 1);
            }
        }
        self.registry
            .values()
            .cloned()
            .zip(positions)
            .map(|(parameter, positions)| ParameterWithPositions::new(parameter, positions))
            .collect()
    }

    pub fn finish(self) -> Statement {
        let parameters = self.parameters_with_positions();
        Statement {
            sql: self.text,
            parameters,
        }
    }
}
