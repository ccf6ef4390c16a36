use crate::core::attributes::{AttributeRef, NominalAttribute};
use crate::core::errors::DataError;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::streams::Stream;
use crate::utils::file_parsing::{
    next_token, parse_nominal_domain, split_preserving_quotes, strip_comment,
    strip_surrounding_quotes,
};
use log::warn;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const NON_NOMINAL_TYPES: [&str; 5] = ["numeric", "real", "integer", "string", "date"];

enum Source {
    File(PathBuf),
    Text(Arc<str>),
}

impl Source {
    fn open(&self) -> Result<Box<dyn BufRead>, DataError> {
        match self {
            Source::File(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            Source::Text(text) => Ok(Box::new(Cursor::new(text.as_bytes().to_vec()))),
        }
    }
}

/// Stream over the `@data` rows of an ARFF file whose attributes are all
/// nominal.
///
/// The header is parsed eagerly on construction. Rows are read lazily, one
/// line ahead, so [`has_more_instances`](Stream::has_more_instances) is exact.
pub struct ArffFileStream {
    source: Source,
    header: Arc<InstanceHeader>,
    reader: Box<dyn BufRead>,
    line_number: usize,
    data_start_line: usize,
    pending: Option<Result<DenseInstance, DataError>>,
}

impl ArffFileStream {
    /// Opens `path`. `class_index` defaults to the last attribute.
    pub fn new<P: AsRef<Path>>(path: P, class_index: Option<usize>) -> Result<Self, DataError> {
        Self::from_source(Source::File(path.as_ref().to_path_buf()), class_index)
    }

    /// Parses ARFF text from any reader. The content is buffered so that
    /// [`restart`](Stream::restart) works.
    pub fn from_reader<R: Read>(
        mut reader: R,
        class_index: Option<usize>,
    ) -> Result<Self, DataError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_source(Source::Text(Arc::from(text)), class_index)
    }

    fn from_source(source: Source, class_index: Option<usize>) -> Result<Self, DataError> {
        let mut reader = source.open()?;
        let mut line_number = 0;
        let header = Arc::new(parse_header(reader.as_mut(), &mut line_number, class_index)?);
        header.ensure_binary_class()?;

        let mut stream = Self {
            source,
            header,
            reader,
            line_number,
            data_start_line: line_number,
            pending: None,
        };
        stream.advance();
        Ok(stream)
    }

    /// Reads ahead to the next data row, skipping blanks and comments.
    fn advance(&mut self) {
        self.pending = None;
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return,
                Ok(_) => {}
                Err(e) => {
                    self.pending = Some(Err(e.into()));
                    return;
                }
            }
            self.line_number += 1;
            let content = strip_comment(&line).trim();
            if content.is_empty() {
                continue;
            }
            self.pending = Some(
                parse_row(&self.header, content).map_err(|source| DataError::AtLine {
                    line: self.line_number,
                    source: Box::new(source),
                }),
            );
            return;
        }
    }
}

fn parse_header(
    reader: &mut dyn BufRead,
    line_number: &mut usize,
    class_index: Option<usize>,
) -> Result<InstanceHeader, DataError> {
    let mut relation_name = String::new();
    let mut attributes: Vec<AttributeRef> = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(DataError::Malformed {
                line: *line_number,
                message: "missing @data section".into(),
            });
        }
        *line_number += 1;
        let content = strip_comment(&line).trim();
        let Some((keyword, rest)) = next_token(content) else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "@relation" => {
                relation_name = next_token(rest)
                    .map(|(name, _)| name.to_string())
                    .unwrap_or_default();
            }
            "@attribute" => {
                let (name, domain) = next_token(rest).ok_or_else(|| DataError::Malformed {
                    line: *line_number,
                    message: "attribute declaration without a name".into(),
                })?;
                let Some(values) = parse_nominal_domain(domain) else {
                    let kind = domain.to_ascii_lowercase();
                    if NON_NOMINAL_TYPES.iter().any(|t| kind.starts_with(t)) {
                        return Err(DataError::UnsupportedAttribute(name.to_string()));
                    }
                    return Err(DataError::Malformed {
                        line: *line_number,
                        message: format!("cannot parse domain of attribute '{name}'"),
                    });
                };
                let distinct: HashSet<&str> = values.iter().map(String::as_str).collect();
                if distinct.len() < values.len() {
                    warn!(
                        "line {}: attribute '{name}' repeats a value; the first occurrence wins",
                        *line_number
                    );
                }
                attributes.push(Arc::new(NominalAttribute::with_values(
                    name.to_string(),
                    values,
                )));
            }
            "@data" => break,
            other => {
                return Err(DataError::Malformed {
                    line: *line_number,
                    message: format!("unexpected header keyword '{other}'"),
                });
            }
        }
    }

    if attributes.is_empty() {
        return Err(DataError::Malformed {
            line: *line_number,
            message: "no attributes declared".into(),
        });
    }
    let class_index = class_index.unwrap_or(attributes.len() - 1);
    if class_index >= attributes.len() {
        return Err(DataError::AttributeOutOfRange {
            index: class_index,
            count: attributes.len(),
        });
    }
    Ok(InstanceHeader::new(relation_name, attributes, class_index))
}

fn parse_row(header: &Arc<InstanceHeader>, content: &str) -> Result<DenseInstance, DataError> {
    if content.starts_with('{') {
        return Err(DataError::UnsupportedAttribute(
            "sparse rows are not supported".into(),
        ));
    }
    let fields = split_preserving_quotes(content, ',');
    if fields.len() != header.number_of_attributes() {
        return Err(DataError::SchemaMismatch {
            expected: header.number_of_attributes(),
            got: fields.len(),
        });
    }
    let labels: Vec<&str> = fields.iter().map(|f| strip_surrounding_quotes(f)).collect();
    if let Some(pos) = labels.iter().position(|&l| l == "?") {
        let name = header
            .attribute_at_index(pos)
            .map(|a| a.name().to_string())
            .unwrap_or_default();
        return Err(DataError::MissingValue(name));
    }
    DenseInstance::from_labels(Arc::clone(header), &labels)
}

impl Stream for ArffFileStream {
    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn has_more_instances(&self) -> bool {
        self.pending.is_some()
    }

    fn next_instance(&mut self) -> Option<Result<Box<dyn Instance>, DataError>> {
        let current = self.pending.take()?;
        match current {
            Ok(instance) => {
                self.advance();
                Some(Ok(Box::new(instance)))
            }
            // the row is unusable; report once and end the stream
            Err(e) => Some(Err(e)),
        }
    }

    fn restart(&mut self) -> Result<(), DataError> {
        let mut reader = self.source.open()?;
        let mut skipped = String::new();
        for _ in 0..self.data_start_line {
            skipped.clear();
            reader.read_line(&mut skipped)?;
        }
        self.reader = reader;
        self.line_number = self.data_start_line;
        self.advance();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CANCER: &str = "\
% toy excerpt
@relation 'breast-cancer'

@attribute age {'30-39','40-49','50-59'}
@attribute 'node-caps' {yes,no}
@attribute Class {'recurrence-events','no-recurrence-events'}

@data
'40-49',no,'no-recurrence-events'
'50-59',yes,'recurrence-events' % trailing comment

'30-39',no,'no-recurrence-events'
";

    fn stream(text: &str) -> Result<ArffFileStream, DataError> {
        ArffFileStream::from_reader(text.as_bytes(), None)
    }

    fn drain(s: &mut ArffFileStream) -> Vec<Vec<usize>> {
        let mut rows = Vec::new();
        while let Some(next) = s.next_instance() {
            rows.push(next.unwrap().to_vec());
        }
        rows
    }

    #[test]
    fn parses_header_and_rows() {
        let mut s = stream(CANCER).unwrap();
        let header = s.header();
        assert_eq!(header.relation_name(), "breast-cancer");
        assert_eq!(header.number_of_attributes(), 3);
        assert_eq!(header.class_index(), 2);
        assert_eq!(header.attribute_at_index(1).unwrap().name(), "node-caps");
        assert_eq!(
            header.class_attribute().unwrap().value(0),
            Some("recurrence-events")
        );

        assert!(s.has_more_instances());
        let rows = drain(&mut s);
        assert_eq!(rows, vec![vec![1, 1, 1], vec![2, 0, 0], vec![0, 1, 1]]);
        assert!(!s.has_more_instances());
    }

    #[test]
    fn restart_replays_rows() {
        let mut s = stream(CANCER).unwrap();
        let first = drain(&mut s);
        s.restart().unwrap();
        assert_eq!(drain(&mut s), first);
    }

    #[test]
    fn explicit_class_index_must_be_binary() {
        let err = ArffFileStream::from_reader(CANCER.as_bytes(), Some(0)).err().unwrap();
        assert!(matches!(err, DataError::NonBinaryClass { values: 3, .. }));

        let err = ArffFileStream::from_reader(CANCER.as_bytes(), Some(9)).err().unwrap();
        assert!(matches!(err, DataError::AttributeOutOfRange { index: 9, .. }));
    }

    #[test]
    fn numeric_attributes_are_rejected() {
        let text = "@relation r\n@attribute size numeric\n@attribute c {a,b}\n@data\n";
        let err = stream(text).err().unwrap();
        assert!(matches!(err, DataError::UnsupportedAttribute(name) if name == "size"));
    }

    #[test]
    fn missing_data_section_is_malformed() {
        let err = stream("@relation r\n@attribute c {a,b}\n").err().unwrap();
        assert!(matches!(err, DataError::Malformed { .. }));
    }

    #[test]
    fn bad_rows_carry_their_line_number() {
        let text = "@relation r\n@attribute x {u,v}\n@attribute c {a,b}\n@data\nu,a\nw,b\n";
        let mut s = stream(text).unwrap();
        assert!(s.next_instance().unwrap().is_ok());
        let err = s.next_instance().unwrap().err().unwrap();
        match err {
            DataError::AtLine { line, source } => {
                assert_eq!(line, 6);
                assert!(matches!(*source, DataError::ValueOutOfDomain { .. }));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(s.next_instance().is_none());
    }

    #[test]
    fn missing_values_and_arity_are_errors() {
        let text = "@relation r\n@attribute x {u,v}\n@attribute c {a,b}\n@data\n?,a\n";
        let mut s = stream(text).unwrap();
        let err = s.next_instance().unwrap().err().unwrap();
        assert!(matches!(err, DataError::AtLine { ref source, .. }
            if matches!(**source, DataError::MissingValue(ref n) if n == "x")));

        let text = "@relation r\n@attribute x {u,v}\n@attribute c {a,b}\n@data\nu\n";
        let mut s = stream(text).unwrap();
        let err = s.next_instance().unwrap().err().unwrap();
        assert!(err.to_string().contains("instance has 1 values"));
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CANCER.as_bytes()).unwrap();
        let mut s = ArffFileStream::new(file.path(), None).unwrap();
        assert_eq!(drain(&mut s).len(), 3);
        s.restart().unwrap();
        assert_eq!(drain(&mut s).len(), 3);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ArffFileStream::new("/definitely/not/here.arff", None).err().unwrap();
        assert!(matches!(err, DataError::Io(_)));
    }
}
