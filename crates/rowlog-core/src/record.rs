use crate::error::{Result, RowlogError};
use serde::{Deserialize, Serialize};

/// Field separator used by the single-line text encoding
pub const FIELD_SEPARATOR: char = '\t';

/// An immutable unit of log data: who sent what to whom.
///
/// Encodes to a single `sender<TAB>receiver<TAB>body` line. None of the
/// fields may contain the separator or a line terminator; the constructor
/// enforces this so that a record can never corrupt row boundaries on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    sender: String,
    receiver: String,
    body: String,
}

impl Record {
    /// Build a record, validating the encoding invariant.
    ///
    /// Fails with `InvalidField` if any field contains a tab, `\n` or `\r`.
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let sender = sender.into();
        let receiver = receiver.into();
        let body = body.into();

        validate_field("sender", &sender)?;
        validate_field("receiver", &receiver)?;
        validate_field("body", &body)?;

        Ok(Self {
            sender,
            receiver,
            body,
        })
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Encode as a single line, without the trailing line terminator.
    pub fn encode(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.sender,
            self.receiver,
            self.body,
            sep = FIELD_SEPARATOR
        )
    }

    /// Decode a single line produced by [`encode`](Self::encode).
    ///
    /// Only the first two separators delimit fields; everything after the
    /// second separator is the body, so a body that picked up stray tabs on
    /// disk still round-trips as one field. Fails with `Decode` when the
    /// line has fewer than two separators.
    pub fn decode(line: &str) -> Result<Self> {
        let mut parts = line.splitn(3, FIELD_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(sender), Some(receiver), Some(body)) => Ok(Self {
                sender: sender.to_string(),
                receiver: receiver.to_string(),
                body: body.to_string(),
            }),
            _ => Err(RowlogError::Decode(format!(
                "line has fewer than two field separators: {:?}",
                line
            ))),
        }
    }
}

fn validate_field(field: &'static str, value: &str) -> Result<()> {
    if value.contains([FIELD_SEPARATOR, '\n', '\r']) {
        return Err(RowlogError::InvalidField { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_round_trip() {
        let record = Record::new("alice", "bob", "hello, bob!").unwrap();
        assert_eq!(record.encode(), "alice\tbob\thello, bob!");

        let decoded = Record::decode(&record.encode()).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_preserves_tabs_in_body() {
        let decoded = Record::decode("a\tb\tone\ttwo\tthree").unwrap();
        assert_eq!(decoded.sender(), "a");
        assert_eq!(decoded.receiver(), "b");
        assert_eq!(decoded.body(), "one\ttwo\tthree");
    }

    #[test]
    fn test_decode_rejects_short_lines() {
        assert!(matches!(
            Record::decode("only\tone-separator"),
            Err(RowlogError::Decode(_))
        ));
        assert!(matches!(
            Record::decode("no separators at all"),
            Err(RowlogError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_allows_empty_fields() {
        let decoded = Record::decode("\t\t").unwrap();
        assert_eq!(decoded.sender(), "");
        assert_eq!(decoded.receiver(), "");
        assert_eq!(decoded.body(), "");
    }

    #[test]
    fn test_new_rejects_reserved_characters() {
        assert!(matches!(
            Record::new("a\tb", "bob", "hi"),
            Err(RowlogError::InvalidField { field: "sender" })
        ));
        assert!(matches!(
            Record::new("alice", "b\nob", "hi"),
            Err(RowlogError::InvalidField { field: "receiver" })
        ));
        assert!(matches!(
            Record::new("alice", "bob", "hi\r"),
            Err(RowlogError::InvalidField { field: "body" })
        ));
    }
}
