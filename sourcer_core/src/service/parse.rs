use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::reader::Reader;
use std::io::BufRead;
use std::sync::Arc;

use crate::error::SourceError;
use crate::response::{Record, SearchResponse, FIRST_INDEX_KEY, RESULTS_RETURNED_KEY};
use crate::service::ResponseSchema;

/// Parses one response stream into records and metadata in a single
/// forward pass. Element matching is on local names, so namespace prefixes
/// the service may add are irrelevant.
///
/// An I/O failure reported by the reader means the stream died underneath
/// the parser (socket, truncated gzip) and is re-surfaced as a transport
/// error; everything else the reader rejects is malformed data.
pub fn parse_response<R: BufRead>(
    input: R,
    schema: &ResponseSchema,
) -> Result<SearchResponse, SourceError> {
    let mut reader = Reader::from_reader(input);

    let mut response = SearchResponse::default();
    let mut current: Option<Record> = None;
    let mut current_field: Option<String> = None;
    let mut field_text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let local = local_name(e.name());
                if current.is_some() {
                    // Only direct children of a result element open a field;
                    // deeper markup keeps accumulating into the open one.
                    if current_field.is_none() {
                        field_text.clear();
                        current_field = Some(local);
                    }
                } else if local == schema.result_element {
                    current = Some(Record::default());
                } else if local == schema.summary_element {
                    read_summary(e, schema, &mut response);
                }
            }
            Ok(Event::Empty(ref e)) => {
                let local = local_name(e.name());
                if let Some(record) = current.as_mut() {
                    if current_field.is_none() {
                        record.set_field(local, "");
                    }
                } else if local == schema.result_element {
                    response.results.push(Record::default());
                } else if local == schema.summary_element {
                    read_summary(e, schema, &mut response);
                }
            }
            Ok(Event::Text(ref e)) => {
                if current_field.is_some() {
                    let text = e
                        .unescape()
                        .map_err(|err| SourceError::Parse(err.to_string()))?;
                    field_text.push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if current_field.is_some() {
                    field_text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(ref e)) => {
                let local = local_name(e.name());
                if current_field.as_deref() == Some(local.as_str()) {
                    if let Some(record) = current.as_mut() {
                        // Whitespace around the value is document formatting,
                        // not field content.
                        let value = std::mem::take(&mut field_text);
                        record.set_field(local, value.trim());
                    }
                    current_field = None;
                } else if current_field.is_none() && local == schema.result_element {
                    if let Some(record) = current.take() {
                        response.results.push(record);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(quick_xml::Error::Io(err)) => {
                let err = Arc::try_unwrap(err)
                    .unwrap_or_else(|shared| std::io::Error::new(shared.kind(), shared.to_string()));
                return Err(SourceError::Io(err));
            }
            Err(err) => {
                return Err(SourceError::Parse(format!(
                    "{} at byte {}",
                    err,
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    response.metadata.insert(
        RESULTS_RETURNED_KEY.to_string(),
        response.results.len().to_string(),
    );
    Ok(response)
}

fn local_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.local_name().as_ref()).to_string()
}

fn read_summary(e: &BytesStart<'_>, schema: &ResponseSchema, response: &mut SearchResponse) {
    for attr in e.attributes().filter_map(Result::ok) {
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        if key == schema.first_index_attr {
            response.metadata.insert(FIRST_INDEX_KEY.to_string(), value);
        } else if key == schema.total_attr {
            // Error bodies may carry a partial summary; an unparseable
            // total leaves the field unset instead of failing the call.
            response.results_total = value.trim().parse().ok().or(response.results_total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Read};

    const SCHEMA: ResponseSchema = ResponseSchema {
        summary_element: "ResultSet",
        first_index_attr: "firstResultPosition",
        total_attr: "totalResultsAvailable",
        result_element: "Result",
    };

    fn parse(xml: &str) -> Result<SearchResponse, SourceError> {
        parse_response(xml.as_bytes(), &SCHEMA)
    }

    #[test]
    fn records_keep_document_order() {
        let response = parse(
            r#"<?xml version="1.0" encoding="UTF-8"?>
            <ResultSet firstResultPosition="1" totalResultsAvailable="1000">
              <Result><Title>first</Title></Result>
              <Result><Title>second</Title></Result>
              <Result><Title>third</Title></Result>
            </ResultSet>"#,
        )
        .unwrap();

        let titles: Vec<_> = response
            .results
            .iter()
            .map(|r| r.field("Title").unwrap())
            .collect();
        assert_eq!(titles, ["first", "second", "third"]);
        assert_eq!(response.results_total, Some(1000));
        assert_eq!(response.metadata.get(FIRST_INDEX_KEY).unwrap(), "1");
        assert_eq!(response.metadata.get(RESULTS_RETURNED_KEY).unwrap(), "3");
    }

    #[test]
    fn fields_pass_through_whatever_the_service_sends() {
        let response = parse(
            r#"<ResultSet firstResultPosition="1" totalResultsAvailable="2">
              <Result>
                <Title>a &amp; b</Title>
                <Url>http://example.com/a</Url>
                <Summary><![CDATA[text with <markup>]]></Summary>
                <ModificationDate>1187654400</ModificationDate>
              </Result>
            </ResultSet>"#,
        )
        .unwrap();

        let record = &response.results[0];
        assert_eq!(record.field("Title"), Some("a & b"));
        assert_eq!(record.field("Url"), Some("http://example.com/a"));
        assert_eq!(record.field("Summary"), Some("text with <markup>"));
        assert_eq!(record.field("ModificationDate"), Some("1187654400"));
        assert_eq!(record.fields().len(), 4);
    }

    #[test]
    fn nested_markup_accumulates_into_the_open_field() {
        let response = parse(
            r#"<ResultSet firstResultPosition="1" totalResultsAvailable="1">
              <Result><Summary>before <b>bold</b> after</Summary></Result>
            </ResultSet>"#,
        )
        .unwrap();

        assert_eq!(
            response.results[0].field("Summary"),
            Some("before bold after")
        );
    }

    #[test]
    fn empty_result_set_parses_to_zero_records() {
        let response =
            parse(r#"<ResultSet firstResultPosition="1" totalResultsAvailable="0"/>"#).unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.results_total, Some(0));
        assert_eq!(response.metadata.get(RESULTS_RETURNED_KEY).unwrap(), "0");
    }

    #[test]
    fn unparseable_total_is_left_unset() {
        let response =
            parse(r#"<ResultSet firstResultPosition="0" totalResultsAvailable="n/a"/>"#).unwrap();
        assert_eq!(response.results_total, None);
        assert_eq!(response.metadata.get(FIRST_INDEX_KEY).unwrap(), "0");
    }

    #[test]
    fn malformed_xml_is_a_parse_error() {
        let err = parse(r#"<ResultSet><Result></Oops></ResultSet>"#).unwrap_err();
        assert_eq!(err.code_str(), "parse");
        assert!(!err.is_transport());
    }

    /// Serves a valid prefix, then fails like a dropped connection.
    struct DyingReader {
        fed: &'static [u8],
        pos: usize,
    }

    impl Read for DyingReader {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.pos < self.fed.len() {
                let n = out.len().min(self.fed.len() - self.pos);
                out[..n].copy_from_slice(&self.fed[self.pos..self.pos + n]);
                self.pos += n;
                Ok(n)
            } else {
                Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream died"))
            }
        }
    }

    #[test]
    fn io_failure_mid_parse_is_a_transport_error() {
        let reader = BufReader::new(DyingReader {
            fed: br#"<ResultSet firstResultPosition="1" totalResultsAvailable="10"><Result><Title>trunc"#,
            pos: 0,
        });
        let err = parse_response(reader, &SCHEMA).unwrap_err();
        assert_eq!(err.code_str(), "transport");
        assert!(err.is_transport());
    }
}
