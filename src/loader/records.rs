// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::io;

use super::Error;
use crate::{is_valid_degrees, Point, VertexId, MAX_LATITUDE, MAX_LONGITUDE};

/// A single line of the road network description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Vertex { id: VertexId, position: Point },
    Edge { from: VertexId, to: VertexId },
}

/// A [Record] together with the (1-based) number of the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberedRecord {
    pub line: usize,
    pub record: Record,
}

/// RecordReader reads [Records](Record) from a line-oriented text stream,
/// skipping blank lines.
pub struct RecordReader<R: io::BufRead> {
    reader: R,
    buffer: String,
    line: usize,
}

impl<R: io::BufRead> RecordReader<R> {
    #[inline]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::default(),
            line: 0,
        }
    }
}

impl<R: io::BufRead> Iterator for RecordReader<R> {
    type Item = Result<NumberedRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line += 1;

            let text = self.buffer.trim();
            if !text.is_empty() {
                return Some(
                    parse_record(self.line, text).map(|record| NumberedRecord {
                        line: self.line,
                        record,
                    }),
                );
            }
        }
    }
}

fn parse_record(line: usize, text: &str) -> Result<Record, Error> {
    // The street name of an edge may itself contain commas
    let fields: Vec<&str> = text.splitn(4, ',').map(str::trim).collect();

    match fields.as_slice() {
        ["V", id, lat, lon] => {
            let id = parse_id(line, id)?;
            let lat = parse_degrees(line, "latitude", lat, MAX_LATITUDE)?;
            let lon = parse_degrees(line, "longitude", lon, MAX_LONGITUDE)?;
            Ok(Record::Vertex {
                id,
                position: Point::from_degrees(lat, lon),
            })
        }

        ["E", from, to] | ["E", from, to, _] => Ok(Record::Edge {
            from: parse_id(line, from)?,
            to: parse_id(line, to)?,
        }),

        _ => Err(Error::InvalidRecord {
            line,
            record: text.to_string(),
        }),
    }
}

fn parse_id(line: usize, value: &str) -> Result<VertexId, Error> {
    let id: i64 = value.parse().map_err(|_| Error::InvalidNumber {
        line,
        field: "vertex id",
        value: value.to_string(),
    })?;

    VertexId::try_from(id).map_err(|_| Error::VertexIdOutOfRange { line, id })
}

fn parse_degrees(
    line: usize,
    field: &'static str,
    value: &str,
    limit: f64,
) -> Result<f64, Error> {
    match value.parse::<f64>() {
        Ok(degrees) if is_valid_degrees(degrees, limit) => Ok(degrees),
        _ => Err(Error::InvalidNumber {
            line,
            field,
            value: value.to_string(),
        }),
    }
}
