//! Markup scanner
//!
//! Drives the cursor over the whole document, alternating between runs of
//! character data and single tag constructs, and reports each piece to an
//! [`EventSink`]. The grammar:
//!
//! ```text
//! document    := (cdata | construct)*
//! cdata       := [^<]+
//! construct   := '<' ( '/' tag_body | '!' comment | '?' instruction | tag_body )
//! tag_body    := name ws* attribute* ws* ( '/>' | '>' )
//! attribute   := ws* key '=' ( '"' [^"]* '"' | "'" [^']* "'" )
//! comment     := '--' .*? '-->' | .*? '>'
//! instruction := .*? '?>'
//! ```

use super::attributes::scan_attributes;
use super::cursor::{is_space, Cursor};
use super::error::{Result, ScanError, ScanErrorKind};
use super::sink::{EventSink, TagKind};

/// Scanner bound to one source document and one sink
pub struct Scanner<'a, 's, S: EventSink<'a> + ?Sized> {
    input: &'a str,
    cursor: Cursor<'a>,
    sink: &'s mut S,
}

impl<'a, 's, S: EventSink<'a> + ?Sized> Scanner<'a, 's, S> {
    /// Create a scanner that will report events for `input` to `sink`
    pub fn new(sink: &'s mut S, input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::new(input),
            sink,
        }
    }

    /// Current byte offset into the input
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Scan the entire document, calling sink methods for each token
    ///
    /// Each call starts over from the beginning of the input. On success the
    /// whole input has been consumed.
    pub fn parse(&mut self) -> Result<()> {
        self.cursor = Cursor::new(self.input);
        log::debug!("scanning {} bytes", self.input.len());

        while !self.cursor.is_eof() {
            let start = self.cursor.position();

            self.scan_cdata();
            self.scan_construct()?;

            // Loop invariant guard: every construct either consumes input or fails
            if self.cursor.position() == start {
                return Err(self.error(ScanErrorKind::Stalled));
            }
        }

        log::debug!("scan finished at offset {}", self.cursor.position());
        Ok(())
    }

    fn scan_cdata(&mut self) {
        if let Some(text) = self.cursor.take_until_byte(b'<') {
            self.sink.cdata(text);
        }
    }

    /// Scan markup starting with '<'
    fn scan_construct(&mut self) -> Result<()> {
        if !self.cursor.accept(b'<') {
            return Ok(());
        }

        if self.cursor.accept(b'/') {
            self.scan_tag(TagKind::Closed)
        } else if self.cursor.accept(b'!') {
            self.scan_comment()
        } else if self.cursor.accept(b'?') {
            self.scan_instruction()
        } else {
            self.scan_tag(TagKind::Opened)
        }
    }

    /// Scan a tag name, its attributes and its terminator
    fn scan_tag(&mut self, begin: TagKind) -> Result<()> {
        let name = self
            .cursor
            .take_while(|b| !is_space(b) && b != b'/' && b != b'>')
            .ok_or_else(|| self.error(ScanErrorKind::InvalidTag))?;
        self.sink.begin_tag(name, begin);

        self.cursor.skip_whitespace();
        let sink = &mut *self.sink;
        scan_attributes(&mut self.cursor, |key, value| sink.attribute(key, value));
        self.cursor.skip_whitespace();

        if self.cursor.starts_with("/>") {
            if begin == TagKind::Closed {
                return Err(self.error(ScanErrorKind::DoubleClosed));
            }
            self.cursor.advance(2);
            self.sink.finish_tag(begin, TagKind::Closed);
        } else if self.cursor.accept(b'>') {
            self.sink.finish_tag(begin, TagKind::Opened);
        } else {
            return Err(self.error(ScanErrorKind::InvalidTagBody));
        }
        Ok(())
    }

    /// Scan `<!-- ... -->` or a generic `<! ... >` declaration
    fn scan_comment(&mut self) -> Result<()> {
        let start = self.cursor.position();

        let terminated = if self.cursor.accept_str("--") {
            self.cursor.scan_until("-->").is_some()
        } else {
            self.cursor.scan_until(">").is_some()
        };
        if !terminated {
            return Err(self.error(ScanErrorKind::UnterminatedComment));
        }

        // The body keeps its "--" delimiters, so it runs up to the final '>'.
        let end = self.cursor.position() - 1;
        self.sink.comment(self.cursor.slice(start, end));
        Ok(())
    }

    /// Scan a processing instruction up to the first `?>`
    fn scan_instruction(&mut self) -> Result<()> {
        match self.cursor.scan_until("?>") {
            Some(body) => {
                self.sink.instruction(body);
                Ok(())
            }
            None => Err(self.error(ScanErrorKind::UnterminatedInstruction)),
        }
    }

    fn error(&self, kind: ScanErrorKind) -> ScanError {
        log::trace!("{kind} at offset {}", self.cursor.position());
        ScanError::new(kind, self.cursor.position(), self.cursor.remaining())
    }
}

/// Scan `input`, reporting every event to `sink`
pub fn scan<'a, S: EventSink<'a> + ?Sized>(input: &'a str, sink: &mut S) -> Result<()> {
    Scanner::new(sink, input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test sink that records events as strings
    #[derive(Default)]
    struct TestSink {
        events: Vec<String>,
    }

    impl<'a> EventSink<'a> for TestSink {
        fn cdata(&mut self, text: &'a str) {
            self.events.push(format!("cdata {text:?}"));
        }

        fn begin_tag(&mut self, name: &'a str, kind: TagKind) {
            self.events.push(format!("begin {name} {kind:?}"));
        }

        fn attribute(&mut self, key: &'a str, value: &'a str) {
            self.events.push(format!("attr {key}={value}"));
        }

        fn finish_tag(&mut self, begin: TagKind, end: TagKind) {
            self.events.push(format!("finish {begin:?} {end:?}"));
        }

        fn comment(&mut self, text: &'a str) {
            self.events.push(format!("comment {text:?}"));
        }

        fn instruction(&mut self, text: &'a str) {
            self.events.push(format!("pi {text:?}"));
        }
    }

    fn run(input: &str) -> (Vec<String>, Result<()>) {
        let mut sink = TestSink::default();
        let result = scan(input, &mut sink);
        (sink.events, result)
    }

    fn kind_of(input: &str) -> ScanErrorKind {
        run(input).1.unwrap_err().kind
    }

    #[test]
    fn test_mixed_document() {
        let (events, result) = run("<p class=\"x\">Hi <b>there</b><br/></p>");
        assert!(result.is_ok());
        assert_eq!(
            events,
            vec![
                "begin p Opened",
                "attr class=x",
                "finish Opened Opened",
                "cdata \"Hi \"",
                "begin b Opened",
                "finish Opened Opened",
                "cdata \"there\"",
                "begin b Closed",
                "finish Closed Opened",
                "begin br Opened",
                "finish Opened Closed",
                "begin p Closed",
                "finish Closed Opened",
            ]
        );
    }

    #[test]
    fn test_whitespace_around_attributes() {
        let (events, result) = run("<img\n  src='a.png'\talt=\"\" />");
        assert!(result.is_ok());
        assert_eq!(
            events,
            vec![
                "begin img Opened",
                "attr src=a.png",
                "attr alt=",
                "finish Opened Closed"
            ]
        );
    }

    #[test]
    fn test_end_tag_with_trailing_space() {
        let (events, result) = run("</a >");
        assert!(result.is_ok());
        assert_eq!(events, vec!["begin a Closed", "finish Closed Opened"]);
    }

    #[test]
    fn test_empty_comment() {
        let (events, _) = run("<!---->");
        assert_eq!(events, vec!["comment \"----\""]);
    }

    #[test]
    fn test_comment_is_shortest_match() {
        let (events, _) = run("<!-- a --> b <!-- c -->");
        assert_eq!(
            events,
            vec!["comment \"-- a --\"", "cdata \" b \"", "comment \"-- c --\""]
        );
    }

    #[test]
    fn test_multiline_declaration() {
        let (events, _) = run("<!DOCTYPE\nhtml>");
        assert_eq!(events, vec!["comment \"DOCTYPE\\nhtml\""]);
    }

    #[test]
    fn test_instruction_is_shortest_match() {
        let (events, _) = run("<?a?>x<?b?>");
        assert_eq!(events, vec!["pi \"a\"", "cdata \"x\"", "pi \"b\""]);
    }

    #[test]
    fn test_lone_angle_bracket() {
        assert_eq!(kind_of("<"), ScanErrorKind::InvalidTag);
        assert_eq!(kind_of("a < b"), ScanErrorKind::InvalidTag);
        assert_eq!(kind_of("</>"), ScanErrorKind::InvalidTag);
    }

    #[test]
    fn test_invalid_tag_body() {
        assert_eq!(kind_of("<a b>"), ScanErrorKind::InvalidTagBody);
        assert_eq!(kind_of("<a x=1>"), ScanErrorKind::InvalidTagBody);
        assert_eq!(kind_of("<a"), ScanErrorKind::InvalidTagBody);
        assert_eq!(kind_of("<a / >"), ScanErrorKind::InvalidTagBody);
    }

    #[test]
    fn test_unterminated_declaration() {
        assert_eq!(kind_of("<!DOCTYPE html"), ScanErrorKind::UnterminatedComment);
        assert_eq!(kind_of("<!--->"), ScanErrorKind::UnterminatedComment);
    }

    #[test]
    fn test_unterminated_instruction() {
        let (events, result) = run("ok<?xml version=\"1.0\"");
        let err = result.unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::UnterminatedInstruction);
        assert_eq!(err.position, 4);
        assert_eq!(events, vec!["cdata \"ok\""]);
    }

    #[test]
    fn test_events_before_error_are_kept() {
        let (events, result) = run("<a>text</a/>");
        assert_eq!(result.unwrap_err().kind, ScanErrorKind::DoubleClosed);
        assert_eq!(
            events,
            vec![
                "begin a Opened",
                "finish Opened Opened",
                "cdata \"text\"",
                "begin a Closed",
            ]
        );
    }

    #[test]
    fn test_position_at_end_after_parse() {
        let mut sink = TestSink::default();
        let input = "<a>b</a>";
        let mut scanner = Scanner::new(&mut sink, input);
        scanner.parse().unwrap();
        assert_eq!(scanner.position(), input.len());
    }

    #[test]
    fn test_parse_twice_starts_over() {
        let mut sink = TestSink::default();
        let mut scanner = Scanner::new(&mut sink, "x<y/>");
        scanner.parse().unwrap();
        scanner.parse().unwrap();
        assert_eq!(sink.events.len(), 6);
        assert_eq!(sink.events[0], sink.events[3]);
    }

    #[test]
    fn test_dyn_sink() {
        let mut sink = TestSink::default();
        let dyn_sink: &mut dyn EventSink<'_> = &mut sink;
        scan("<a/>", dyn_sink).unwrap();
        assert_eq!(sink.events, vec!["begin a Opened", "finish Opened Closed"]);
    }
}
