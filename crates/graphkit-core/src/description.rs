use std::io::BufRead;

use crate::node::NodeData;
use crate::{GraphError, GraphResult};

/// Token reader for the graph description text format
///
/// A description is a node count line, one payload line per node, then an
/// edge stream of integer records closed by a record holding a 0 index.
/// Several descriptions may follow each other in one source; use
/// [`DescriptionReader::at_end`] to detect when the source is exhausted.
pub struct DescriptionReader<R> {
    source: R,
    line: String,
    cursor: usize,
    line_number: usize,
    node_limit: Option<usize>,
}

impl<R: BufRead> DescriptionReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            line: String::new(),
            cursor: 0,
            line_number: 0,
            node_limit: None,
        }
    }

    /// Reject node counts above `limit`
    pub fn with_node_limit(mut self, limit: Option<usize>) -> Self {
        self.node_limit = limit;
        self
    }

    /// Line number of the most recently read line (1-based, 0 before any read)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// True when only whitespace remains in the source
    pub fn at_end(&mut self) -> GraphResult<bool> {
        Ok(!self.skip_whitespace()?)
    }

    /// Read the node count
    ///
    /// Discards the rest of the count line so that payload lines can be
    /// read whole afterwards.
    pub fn read_node_count(&mut self) -> GraphResult<usize> {
        let count = self.read_int("node count")?;
        let count = usize::try_from(count).map_err(|_| GraphError::Parse {
            line: self.line_number,
            message: format!("node count must be non-negative, found {}", count),
        })?;

        if let Some(limit) = self.node_limit {
            if count > limit {
                return Err(GraphError::CapacityExceeded {
                    requested: count,
                    limit,
                });
            }
        }

        self.finish_line();
        Ok(count)
    }

    /// Read `count` payload lines, one per node in index order
    pub fn read_payloads(&mut self, count: usize) -> GraphResult<Vec<NodeData>> {
        (0..count).map(|_| self.read_payload()).collect()
    }

    /// Read the next whole line as a node payload
    pub fn read_payload(&mut self) -> GraphResult<NodeData> {
        if !self.next_line()? {
            return Err(GraphError::UnexpectedEof {
                line: self.line_number,
                expected: "node payload",
            });
        }
        let text = self.line.trim_end_matches(['\n', '\r']).to_string();
        self.finish_line();
        Ok(NodeData::new(text))
    }

    /// Read a `<src> <dst>` record; `None` once the edge stream terminates
    pub fn read_pair(&mut self) -> GraphResult<Option<(i64, i64)>> {
        let Some(source) = self.read_leading_index()? else {
            return Ok(None);
        };
        let Some(target) = self.read_trailing_index()? else {
            return Ok(None);
        };
        Ok(Some((source, target)))
    }

    /// Read a `<src> <dst> <weight>` record; `None` once the edge stream terminates
    pub fn read_triple(&mut self) -> GraphResult<Option<(i64, i64, i64)>> {
        let Some((source, target)) = self.read_pair()? else {
            return Ok(None);
        };
        let weight = self.read_int("edge weight")?;
        Ok(Some((source, target, weight)))
    }

    /// First index of an edge record: end of input also ends the stream
    fn read_leading_index(&mut self) -> GraphResult<Option<i64>> {
        match self.try_read_int()? {
            None => {
                tracing::debug!(
                    "Edge stream ended without terminator at line {}",
                    self.line_number
                );
                Ok(None)
            }
            Some(0) => {
                self.finish_line();
                Ok(None)
            }
            Some(index) => Ok(Some(index)),
        }
    }

    fn read_trailing_index(&mut self) -> GraphResult<Option<i64>> {
        match self.read_int("edge destination")? {
            0 => {
                self.finish_line();
                Ok(None)
            }
            index => Ok(Some(index)),
        }
    }

    fn read_int(&mut self, expected: &'static str) -> GraphResult<i64> {
        match self.try_read_int()? {
            Some(value) => Ok(value),
            None => Err(GraphError::UnexpectedEof {
                line: self.line_number,
                expected,
            }),
        }
    }

    fn try_read_int(&mut self) -> GraphResult<Option<i64>> {
        if !self.skip_whitespace()? {
            return Ok(None);
        }

        let rest = &self.line[self.cursor..];
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..end];
        let value = token.parse::<i64>().map_err(|_| GraphError::Parse {
            line: self.line_number,
            message: format!("expected an integer, found {:?}", token),
        })?;

        self.cursor += end;
        Ok(Some(value))
    }

    /// Advance past whitespace, pulling new lines as needed; false at end of input
    fn skip_whitespace(&mut self) -> GraphResult<bool> {
        loop {
            let rest = &self.line[self.cursor..];
            let trimmed = rest.trim_start();
            self.cursor += rest.len() - trimmed.len();

            if self.cursor < self.line.len() {
                return Ok(true);
            }
            if !self.next_line()? {
                return Ok(false);
            }
        }
    }

    fn next_line(&mut self) -> GraphResult<bool> {
        self.line.clear();
        self.cursor = 0;
        if self.source.read_line(&mut self.line)? == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        Ok(true)
    }

    fn finish_line(&mut self) {
        self.cursor = self.line.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(text: &str) -> DescriptionReader<&[u8]> {
        DescriptionReader::new(text.as_bytes())
    }

    #[test]
    fn test_reads_count_and_payloads() {
        let mut input = reader("2   trailing junk\nAurora and 85th\nGreen Lake Starbucks\r\n");
        assert_eq!(input.read_node_count().unwrap(), 2);
        let payloads = input.read_payloads(2).unwrap();
        assert_eq!(payloads[0].as_str(), "Aurora and 85th");
        assert_eq!(payloads[1].as_str(), "Green Lake Starbucks");
        assert!(input.at_end().unwrap());
    }

    #[test]
    fn test_payload_may_be_blank() {
        let mut input = reader("1\n\n0 0\n");
        input.read_node_count().unwrap();
        assert_eq!(input.read_payload().unwrap().as_str(), "");
        assert_eq!(input.read_pair().unwrap(), None);
    }

    #[test]
    fn test_pairs_until_terminator() {
        let mut input = reader("1 2\n1 3\n0 0\n");
        assert_eq!(input.read_pair().unwrap(), Some((1, 2)));
        assert_eq!(input.read_pair().unwrap(), Some((1, 3)));
        assert_eq!(input.read_pair().unwrap(), None);
        assert!(input.at_end().unwrap());
    }

    #[test]
    fn test_zero_in_either_position_terminates() {
        let mut input = reader("3 0\n");
        assert_eq!(input.read_pair().unwrap(), None);

        let mut input = reader("0 5 7\n2\n");
        assert_eq!(input.read_triple().unwrap(), None);
        assert_eq!(input.read_node_count().unwrap(), 2);
    }

    #[test]
    fn test_terminator_line_is_discarded() {
        let mut input = reader("1 2 10\n0 0 0\n3\n");
        assert_eq!(input.read_triple().unwrap(), Some((1, 2, 10)));
        assert_eq!(input.read_triple().unwrap(), None);
        assert_eq!(input.read_node_count().unwrap(), 3);
    }

    #[test]
    fn test_end_of_input_ends_edge_stream() {
        let mut input = reader("1 2\n");
        assert_eq!(input.read_pair().unwrap(), Some((1, 2)));
        assert_eq!(input.read_pair().unwrap(), None);
    }

    #[test]
    fn test_truncated_record_is_an_error() {
        let mut input = reader("1");
        let err = input.read_pair().unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnexpectedEof {
                expected: "edge destination",
                ..
            }
        ));

        let mut input = reader("1 2");
        assert!(matches!(
            input.read_triple().unwrap_err(),
            GraphError::UnexpectedEof {
                expected: "edge weight",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_payload_is_an_error() {
        let mut input = reader("3\nonly one\n");
        input.read_node_count().unwrap();
        let err = input.read_payloads(3).unwrap_err();
        assert!(matches!(
            err,
            GraphError::UnexpectedEof {
                expected: "node payload",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_token_reports_line() {
        let mut input = reader("1\nnode\n1 x\n");
        input.read_node_count().unwrap();
        input.read_payload().unwrap();
        match input.read_pair().unwrap_err() {
            GraphError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("\"x\""));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_count_rejected() {
        let mut input = reader("-4\n");
        assert!(matches!(
            input.read_node_count(),
            Err(GraphError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_node_limit() {
        let mut input = reader("101\n").with_node_limit(Some(100));
        assert!(matches!(
            input.read_node_count(),
            Err(GraphError::CapacityExceeded {
                requested: 101,
                limit: 100
            })
        ));
    }

    #[test]
    fn test_missing_count_is_eof() {
        let mut input = reader("   \n\n");
        assert!(input.at_end().unwrap());
        assert!(matches!(
            input.read_node_count(),
            Err(GraphError::UnexpectedEof {
                expected: "node count",
                ..
            })
        ));
    }
}
