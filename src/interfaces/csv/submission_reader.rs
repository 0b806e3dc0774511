use crate::application::node::AddResultRequest;
use crate::error::{AgreementError, Result};
use std::io::Read;

/// Reads race result submissions from a CSV source.
///
/// The header row uses the `add-result` parameter names:
/// `challengeName,challengeYear,plc,gpic,bib,name,time,gender,partyName`.
/// Whitespace around fields is trimmed and an empty `partyName` reads as missing.
pub struct SubmissionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SubmissionReader<R> {
    /// Creates a new `SubmissionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes submissions.
    pub fn submissions(self) -> impl Iterator<Item = Result<AddResultRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(AgreementError::from))
    }
}
