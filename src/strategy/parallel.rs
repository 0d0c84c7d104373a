//! Parallel scanning of independent documents
//!
//! Uses Rayon to scan a batch of inputs concurrently. Each input gets its
//! own scanner and sink, so nothing is shared between workers.

use rayon::prelude::*;

use crate::core::error::Result;
use crate::dom::Document;
use crate::sax::{parse_events, Event};

/// Scan every input in parallel, returning events in input order
pub fn parse_events_parallel<'a, S>(inputs: &'a [S]) -> Vec<Result<Vec<Event<'a>>>>
where
    S: AsRef<str> + Sync,
{
    log::debug!("scanning {} documents in parallel", inputs.len());
    inputs
        .par_iter()
        .map(|input| parse_events(input.as_ref()))
        .collect()
}

/// Build a tree for every input in parallel, in input order
pub fn parse_documents_parallel<'a, S>(inputs: &'a [S]) -> Vec<Result<Document<'a>>>
where
    S: AsRef<str> + Sync,
{
    log::debug!("building {} documents in parallel", inputs.len());
    inputs
        .par_iter()
        .map(|input| Document::parse(input.as_ref()))
        .collect()
}

/// Scan every input in parallel and map each result with `f`
///
/// Lets callers reduce a document to owned data on the worker thread.
pub fn scan_map<S, F, T>(inputs: &[S], f: F) -> Vec<T>
where
    S: AsRef<str> + Sync,
    F: Fn(Result<Vec<Event<'_>>>) -> T + Sync + Send,
    T: Send,
{
    inputs
        .par_iter()
        .map(|input| f(parse_events(input.as_ref())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ScanErrorKind;

    #[test]
    fn test_parallel_matches_sequential() {
        let inputs = ["<a/>", "text", "<b x='1'>y</b>", "<!-- c -->"];

        let results = parse_events_parallel(&inputs);
        assert_eq!(results.len(), inputs.len());
        for (input, result) in inputs.iter().zip(&results) {
            assert_eq!(result.as_ref().unwrap(), &parse_events(input).unwrap());
        }
    }

    #[test]
    fn test_errors_stay_with_their_input() {
        let inputs = vec!["<ok/>".to_string(), "</bad/>".to_string(), "fine".to_string()];

        let results = parse_events_parallel(&inputs);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap_err().kind, ScanErrorKind::DoubleClosed);
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_documents() {
        let inputs = ["<r><a/></r>", "<s/>"];

        let docs = parse_documents_parallel(&inputs);
        let names: Vec<_> = docs
            .iter()
            .map(|d| {
                let d = d.as_ref().unwrap();
                d.node_name(d.root_element_id().unwrap()).unwrap()
            })
            .collect();
        assert_eq!(names, vec!["r", "s"]);
    }

    #[test]
    fn test_scan_map() {
        let inputs = ["<a/><b/>", "x", "<?"];

        let counts = scan_map(&inputs, |events| events.map(|e| e.len()).ok());
        assert_eq!(counts, vec![Some(4), Some(1), None]);
    }
}
