//! Event sink interface
//!
//! The scanner pushes events into a caller-owned sink, SAX style. All text
//! handed to the sink borrows from the source document.

/// How a tag construct opened or how it was terminated
///
/// As the begin kind: `Opened` for `<name`, `Closed` for `</name`.
/// As the terminator kind: `Opened` for `>`, `Closed` for `/>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Opened,
    Closed,
}

/// Tag shape implied by a (begin, terminator) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagForm {
    /// `<name ...>`
    Start,
    /// `</name>`
    End,
    /// `<name .../>`
    SelfClosing,
}

impl TagForm {
    /// Classify a finished tag. `(Closed, Closed)` is never emitted by the
    /// scanner and yields `None`.
    #[inline]
    pub fn classify(begin: TagKind, end: TagKind) -> Option<Self> {
        match (begin, end) {
            (TagKind::Opened, TagKind::Opened) => Some(TagForm::Start),
            (TagKind::Opened, TagKind::Closed) => Some(TagForm::SelfClosing),
            (TagKind::Closed, TagKind::Opened) => Some(TagForm::End),
            (TagKind::Closed, TagKind::Closed) => None,
        }
    }
}

/// Trait for receiving scan events
///
/// For every tag the scanner calls `begin_tag`, then `attribute` once per
/// attribute, then `finish_tag`. A fatal error may cut this sequence short;
/// events delivered before the error are not retracted.
pub trait EventSink<'a> {
    /// Character data between tag constructs, passed through verbatim
    fn cdata(&mut self, text: &'a str);

    /// Start of a start tag (`Opened`) or end tag (`Closed`)
    fn begin_tag(&mut self, name: &'a str, kind: TagKind);

    /// Attribute of the current tag, value without quotes
    fn attribute(&mut self, key: &'a str, value: &'a str);

    /// End of the current tag
    ///
    /// # Arguments
    /// * `begin` - Kind passed to the matching `begin_tag`
    /// * `end` - `Closed` for `/>`, `Opened` for `>`
    fn finish_tag(&mut self, begin: TagKind, end: TagKind);

    /// Comment or declaration. `<!-- x -->` yields `-- x --`, `<!DOCTYPE x>` yields `DOCTYPE x`.
    fn comment(&mut self, text: &'a str);

    /// Processing instruction body between `<?` and `?>`
    fn instruction(&mut self, text: &'a str);
}
