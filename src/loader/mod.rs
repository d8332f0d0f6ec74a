// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Loading road networks from their line-oriented text description.
//!
//! Every non-empty line is one comma-separated record:
//!
//! - `V,<id>,<lat>,<lon>` - a vertex with a 32-bit id and a position in decimal degrees,
//! - `E,<from>,<to>,<name>` - a directed edge between two previously-defined vertices;
//!   the street name is ignored and may be omitted.
//!
//! Edge weights are the [Manhattan distance](crate::manhattan_distance) between
//! the endpoints, in fixed-point units.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use builder::GraphBuilder;
use records::RecordReader;

use crate::Graph;

mod builder;
mod records;

/// Format of the input road network file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Unknown format - guess the compression based on the content
    Unknown,

    /// Force uncompressed text
    Text,

    /// Force text with [gzip](https://en.wikipedia.org/wiki/Gzip) compression
    TextGz,

    /// Force text with [bzip2](https://en.wikipedia.org/wiki/Bzip2) compression
    TextBz2,
}

impl FileFormat {
    /// Guesses the format of the data based on its first few bytes.
    fn detect(prefix: &[u8]) -> Self {
        if prefix.starts_with(&[0x1F, 0x8B]) {
            Self::TextGz
        } else if prefix.starts_with(b"BZh") {
            Self::TextBz2
        } else {
            Self::Text
        }
    }
}

/// Additional controls for loading a road network into a [Graph].
#[derive(Debug, Clone)]
pub struct Options {
    /// Format of the input data.
    pub file_format: FileFormat,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            file_format: FileFormat::Unknown,
        }
    }
}

/// Error conditions which may occur when loading a road network.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: unrecognized record: {record:?}")]
    InvalidRecord { line: usize, record: String },

    #[error("line {line}: invalid {field}: {value:?}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: vertex id {id} does not fit in 32 bits")]
    VertexIdOutOfRange { line: usize, id: i64 },

    #[error("line {line}: edge references unknown vertex {id}")]
    UnknownVertex { line: usize, id: i32 },
}

/// Parse a road network from a reader into a [Graph] as per the provided [Options].
///
/// The provided stream will be automatically wrapped in a buffered reader.
pub fn add_features_from_io<R: io::Read>(
    g: &mut Graph,
    options: &Options,
    reader: R,
) -> Result<(), Error> {
    let mut b = io::BufReader::new(reader);

    let file_format = match options.file_format {
        FileFormat::Unknown => {
            let detected = FileFormat::detect(b.fill_buf()?);
            log::debug!("detected road network format: {:?}", detected);
            detected
        }
        known => known,
    };

    match file_format {
        FileFormat::Unknown | FileFormat::Text => {
            GraphBuilder::new(g).add_records(RecordReader::new(b))
        }

        FileFormat::TextGz => {
            let d = flate2::bufread::MultiGzDecoder::new(b);
            let b = io::BufReader::new(d);
            GraphBuilder::new(g).add_records(RecordReader::new(b))
        }

        FileFormat::TextBz2 => {
            let d = bzip2::bufread::MultiBzDecoder::new(b);
            let b = io::BufReader::new(d);
            GraphBuilder::new(g).add_records(RecordReader::new(b))
        }
    }
}

/// Parse a road network from a file at the provided path into a [Graph] as per the provided [Options].
pub fn add_features_from_file<P: AsRef<Path>>(
    g: &mut Graph,
    options: &Options,
    path: P,
) -> Result<(), Error> {
    let f = File::open(path)?;
    add_features_from_io(g, options, f)
}

/// Parse a road network from a static buffer into a [Graph] as per the provided [Options].
pub fn add_features_from_buffer(
    g: &mut Graph,
    options: &Options,
    data: &[u8],
) -> Result<(), Error> {
    if options.file_format == FileFormat::Text {
        // Fast path is available for in-memory text data
        GraphBuilder::new(g).add_records(RecordReader::new(data))
    } else {
        add_features_from_io(g, options, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Edge, Point};

    fn check_small_graph(g: &Graph) {
        //   1 ─── 2
        //   │   ↗ │
        //   ↓  /  ↓
        //   3     4     5
        assert_eq!(g.len(), 5);
        assert_eq!(g.edge_count(), 6);

        assert_eq!(
            g.get_vertex(1).map(|v| v.position),
            Some(Point::new(5_353_000, -11_351_000))
        );
        assert_eq!(
            g.get_vertex(4).map(|v| v.position),
            Some(Point::new(5_352_500, -11_350_500))
        );

        assert_eq!(g.get_edge(1, 2), Some(500));
        assert_eq!(g.get_edge(2, 1), Some(500));
        assert_eq!(g.get_edge(1, 3), Some(500));
        assert_eq!(g.get_edge(3, 1), None);
        assert_eq!(g.get_edge(3, 2), Some(1000));
        assert_eq!(g.get_edge(2, 4), Some(500));
        assert!(g.neighbors(5).is_empty());

        // Parallel edges are loaded as-is
        assert_eq!(
            g.neighbors(1)
                .iter()
                .filter(|&&e| e == Edge { to: 2, weight: 500 })
                .count(),
            2
        );
    }

    fn load(data: &[u8], file_format: FileFormat) -> Result<Graph, Error> {
        let mut g = Graph::default();
        add_features_from_buffer(&mut g, &Options { file_format }, data)?;
        Ok(g)
    }

    #[test]
    fn test_load_text() {
        const DATA: &[u8] = include_bytes!("test_fixtures/small.txt");
        check_small_graph(&load(DATA, FileFormat::Text).unwrap());
        check_small_graph(&load(DATA, FileFormat::Unknown).unwrap());
    }

    #[test]
    fn test_load_gz() {
        const DATA: &[u8] = include_bytes!("test_fixtures/small.txt.gz");
        check_small_graph(&load(DATA, FileFormat::TextGz).unwrap());
        check_small_graph(&load(DATA, FileFormat::Unknown).unwrap());
    }

    #[test]
    fn test_load_bz2() {
        const DATA: &[u8] = include_bytes!("test_fixtures/small.txt.bz2");
        check_small_graph(&load(DATA, FileFormat::TextBz2).unwrap());
        check_small_graph(&load(DATA, FileFormat::Unknown).unwrap());
    }

    #[test]
    fn test_detect() {
        assert_eq!(FileFormat::detect(b"V,1,0,0\n"), FileFormat::Text);
        assert_eq!(FileFormat::detect(b""), FileFormat::Text);
        assert_eq!(FileFormat::detect(&[0x1F, 0x8B, 0x08]), FileFormat::TextGz);
        assert_eq!(FileFormat::detect(b"BZh91AY"), FileFormat::TextBz2);
    }

    #[test]
    fn test_unknown_vertex() {
        let err = load(b"V,1,53.5,-113.5\nE,1,2,Nowhere Street\n", FileFormat::Text).unwrap_err();
        assert!(matches!(err, Error::UnknownVertex { line: 2, id: 2 }), "{}", err);
    }

    #[test]
    fn test_vertex_id_out_of_range() {
        let err = load(b"V,4294967296,53.5,-113.5\n", FileFormat::Text).unwrap_err();
        assert!(
            matches!(err, Error::VertexIdOutOfRange { line: 1, id: 4294967296 }),
            "{}",
            err
        );
    }

    #[test]
    fn test_invalid_records() {
        let err = load(b"V,1,53.5,-113.5\nX,1,2,3\n", FileFormat::Text).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 2, .. }), "{}", err);

        let err = load(b"V,1,53.5\n", FileFormat::Text).unwrap_err();
        assert!(matches!(err, Error::InvalidRecord { line: 1, .. }), "{}", err);

        let err = load(b"V,1,north,-113.5\n", FileFormat::Text).unwrap_err();
        assert!(
            matches!(err, Error::InvalidNumber { line: 1, field: "latitude", .. }),
            "{}",
            err
        );

        let err = load(b"V,1,NaN,-113.5\n", FileFormat::Text).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { line: 1, .. }), "{}", err);
    }

    #[test]
    fn test_out_of_range_coordinates() {
        let err = load(
            b"V,1,1e300,1e300\nV,2,-1e300,-1e300\nE,1,2\n",
            FileFormat::Text,
        )
        .unwrap_err();
        assert!(
            matches!(err, Error::InvalidNumber { line: 1, field: "latitude", .. }),
            "{}",
            err
        );

        let g = load(b"V,1,90,180\nV,2,-90,-180\nE,1,2\n", FileFormat::Text).unwrap();
        assert_eq!(g.get_edge(1, 2), Some(18_000_000 + 36_000_000));
    }

    #[test]
    fn test_edge_without_name_and_blank_lines() {
        let g = load(
            b"V,1,0.001,0.001\r\n\r\nV,2,0.002,0.003\r\nE,1,2\r\n\n",
            FileFormat::Text,
        )
        .unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.get_edge(1, 2), Some(300));
    }
}
