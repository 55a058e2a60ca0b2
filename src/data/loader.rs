use std::{error::Error, fmt, io, path::Path};

use futures::StreamExt;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::{fs::File, io::AsyncRead};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

use super::observation::{LabelSet, Observation};

/// Longest line accepted from a source file.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

const DELIMITER: char = ',';

/// Reasons a dataset could not be loaded. All of them end the session start.
#[derive(Debug)]
pub enum DataLoadError {
    Io(io::Error),
    /// A line exceeded [`MAX_LINE_LENGTH`].
    LineTooLong,
    /// The header row lacks some of the configured columns.
    MissingColumns { missing: Vec<String> },
    /// Every row was empty, unparseable or of an unknown class.
    NoUsableRows { dropped: usize },
}

impl fmt::Display for DataLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLoadError::Io(e) => write!(f, "io error: {e}"),
            DataLoadError::LineTooLong => {
                write!(f, "line longer than {MAX_LINE_LENGTH} bytes")
            }
            DataLoadError::MissingColumns { missing } => {
                write!(f, "required columns not found: {}", missing.join(", "))
            }
            DataLoadError::NoUsableRows { dropped } => {
                write!(f, "no usable rows ({dropped} dropped)")
            }
        }
    }
}

impl Error for DataLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DataLoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for DataLoadError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<LinesCodecError> for DataLoadError {
    fn from(value: LinesCodecError) -> Self {
        match value {
            LinesCodecError::MaxLineLengthExceeded => Self::LineTooLong,
            LinesCodecError::Io(e) => Self::Io(e),
        }
    }
}

/// Header names of the three columns the engine consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    pub label: String,
    pub x: String,
    pub y: String,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            label: "species".into(),
            x: "bill_length_mm".into(),
            y: "bill_depth_mm".into(),
        }
    }
}

/// Rows that survived parsing, plus how many were discarded.
#[derive(Debug, Clone, Default)]
pub struct LoadedRows {
    pub observations: Vec<Observation>,
    pub dropped: usize,
}

impl LoadedRows {
    fn finish(self) -> Result<Self, DataLoadError> {
        info!(
            "loaded {} observation(s), dropped {} row(s)",
            self.observations.len(),
            self.dropped
        );

        if self.observations.is_empty() {
            return Err(DataLoadError::NoUsableRows {
                dropped: self.dropped,
            });
        }
        Ok(self)
    }
}

struct RowParser<'a> {
    labels: &'a LabelSet,
    label_idx: usize,
    x_idx: usize,
    y_idx: usize,
}

impl<'a> RowParser<'a> {
    fn from_header(
        header: &str,
        columns: &ColumnSpec,
        labels: &'a LabelSet,
    ) -> Result<Self, DataLoadError> {
        let names: Vec<&str> = header.split(DELIMITER).map(str::trim).collect();
        let find = |name: &str| names.iter().position(|n| *n == name);

        match (
            find(columns.label.as_str()),
            find(columns.x.as_str()),
            find(columns.y.as_str()),
        ) {
            (Some(label_idx), Some(x_idx), Some(y_idx)) => Ok(Self {
                labels,
                label_idx,
                x_idx,
                y_idx,
            }),
            (label, x, y) => {
                let missing = [(label, &columns.label), (x, &columns.x), (y, &columns.y)]
                    .into_iter()
                    .filter(|(idx, _)| idx.is_none())
                    .map(|(_, name)| name.clone())
                    .collect();
                Err(DataLoadError::MissingColumns { missing })
            }
        }
    }

    /// `None` for rows of an unknown class or with unparseable numbers.
    fn parse(&self, line: &str) -> Option<Observation> {
        let fields: Vec<&str> = line.split(DELIMITER).collect();
        let label = self.labels.parse(fields.get(self.label_idx)?)?;
        let x = parse_measure(fields.get(self.x_idx)?)?;
        let y = parse_measure(fields.get(self.y_idx)?)?;
        Some(Observation::new(label, x, y))
    }

    fn feed(&self, line: &str, rows: &mut LoadedRows) {
        if line.trim().is_empty() {
            return;
        }

        match self.parse(line) {
            Some(obs) => rows.observations.push(obs),
            None => {
                debug!("dropping row: {line}");
                rows.dropped += 1;
            }
        }
    }
}

fn parse_measure(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses delimited text already held in memory.
///
/// # Errors
/// Returns a `DataLoadError` if the header misses a column or no row survives.
pub fn parse_delimited(
    text: &str,
    columns: &ColumnSpec,
    labels: &LabelSet,
) -> Result<LoadedRows, DataLoadError> {
    let mut lines = text.lines();
    let header = lines.next().unwrap_or_default();
    let parser = RowParser::from_header(header, columns, labels)?;

    let mut rows = LoadedRows::default();
    for line in lines {
        parser.feed(line, &mut rows);
    }
    rows.finish()
}

/// Reads delimited text line by line from any async source.
///
/// # Errors
/// Returns a `DataLoadError` on I/O failure, on a missing column, or if no
/// row survives.
pub async fn read_delimited<R>(
    reader: R,
    columns: &ColumnSpec,
    labels: &LabelSet,
) -> Result<LoadedRows, DataLoadError>
where
    R: AsyncRead + Unpin,
{
    let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));

    let header = match lines.next().await {
        Some(line) => line?,
        None => String::new(),
    };
    let parser = RowParser::from_header(&header, columns, labels)?;

    let mut rows = LoadedRows::default();
    while let Some(line) = lines.next().await {
        parser.feed(&line?, &mut rows);
    }
    rows.finish()
}

/// Opens `path` and reads it with [`read_delimited`]. A single attempt, no retry.
///
/// # Errors
/// Same as [`read_delimited`], plus failure to open the file.
pub async fn load_path(
    path: impl AsRef<Path>,
    columns: &ColumnSpec,
    labels: &LabelSet,
) -> Result<LoadedRows, DataLoadError> {
    let path = path.as_ref();
    info!("loading dataset from {}", path.display());
    let file = File::open(path).await?;
    read_delimited(file, columns, labels).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Label;

    const PENGUINS: &str = "\
species,island,bill_length_mm,bill_depth_mm,flipper_length_mm
Adelie,Torgersen,39.1,18.7,181
Adelie,Torgersen,NA,NA,NA
Chinstrap,Dream,46.5,17.9,192

Gentoo,Biscoe,46.1,13.2,211
Chinstrap,Dream,50.0,19.5,196
";

    #[test]
    fn keeps_known_classes_with_valid_numbers() {
        let rows =
            parse_delimited(PENGUINS, &ColumnSpec::default(), &LabelSet::default()).unwrap();

        assert_eq!(
            rows.observations,
            vec![
                Observation::new(Label::A, 39.1, 18.7),
                Observation::new(Label::B, 46.5, 17.9),
                Observation::new(Label::B, 50.0, 19.5),
            ]
        );
        // the NA row and the Gentoo row
        assert_eq!(rows.dropped, 2);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let text = "species,bill_length_mm,bill_depth_mm\r\nAdelie,40.3,18.0\r\n";
        let rows = parse_delimited(text, &ColumnSpec::default(), &LabelSet::default()).unwrap();
        assert_eq!(rows.observations, vec![Observation::new(Label::A, 40.3, 18.0)]);
    }

    #[test]
    fn reports_every_missing_column() {
        let text = "species,island\nAdelie,Dream\n";
        let err = parse_delimited(text, &ColumnSpec::default(), &LabelSet::default()).unwrap_err();
        match err {
            DataLoadError::MissingColumns { missing } => {
                assert_eq!(missing, vec!["bill_length_mm", "bill_depth_mm"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn no_usable_rows_is_an_error() {
        let text = "species,bill_length_mm,bill_depth_mm\nGentoo,46.1,13.2\n";
        let err = parse_delimited(text, &ColumnSpec::default(), &LabelSet::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::NoUsableRows { dropped: 1 }));
    }

    #[test]
    fn rejects_non_finite_measurements() {
        assert_eq!(parse_measure(" 12.5 "), Some(12.5));
        assert_eq!(parse_measure("inf"), None);
        assert_eq!(parse_measure("NaN"), None);
        assert_eq!(parse_measure(""), None);
    }
}
