// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Line-oriented request/response framing between a route server and its client.
//!
//! A request is either the shutdown token (a line starting with `Q`), or two lines
//! with the start and end coordinates: `"<lat> <lon>"`, in decimal degrees.
//!
//! A response is a sequence of `"<lat> <lon>"` waypoint lines with exactly 5 decimal
//! places, terminated by a line with the sentinel `E`. A response without any waypoints
//! signals that no route exists.

use std::io;

use crate::Point;

/// The line terminating every [Response].
pub const END_SENTINEL: &str = "E";

/// The token requesting the server to shut down.
pub const QUIT_TOKEN: &str = "Q";

/// Error conditions which may occur when reading or writing protocol messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("invalid coordinates: {0:?}")]
    InvalidCoordinates(String),

    #[error("stream ended in the middle of a message")]
    UnexpectedEof,
}

/// A message sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Find a route between the vertices nearest to the given positions.
    Route { start: Point, end: Point },

    /// Stop serving requests.
    Quit,
}

/// A message sent by the server in response to a [Request::Route].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Positions of consecutive vertices along the route.
    Route(Vec<Point>),

    /// The end is not reachable from the start.
    NoRoute,
}

/// Reads the next [Request] from the stream.
///
/// Blank lines before a request are skipped. End of stream before a request
/// is treated as [Request::Quit].
pub fn read_request<R: io::BufRead>(reader: &mut R) -> Result<Request, Error> {
    let first = match read_non_empty_line(reader)? {
        Some(line) => line,
        None => return Ok(Request::Quit),
    };

    if first.starts_with(QUIT_TOKEN) {
        return Ok(Request::Quit);
    }

    let start = parse_point(&first)?;
    let second = read_non_empty_line(reader)?.ok_or(Error::UnexpectedEof)?;
    let end = parse_point(&second)?;

    Ok(Request::Route { start, end })
}

/// Writes a [Request] to the stream, flushing it afterwards.
pub fn write_request<W: io::Write>(writer: &mut W, request: &Request) -> Result<(), Error> {
    match request {
        Request::Route { start, end } => {
            writeln!(writer, "{}", start)?;
            writeln!(writer, "{}", end)?;
        }
        Request::Quit => writeln!(writer, "{}", QUIT_TOKEN)?,
    }
    writer.flush()?;
    Ok(())
}

/// Reads a complete [Response] from the stream, up to and including the end sentinel.
pub fn read_response<R: io::BufRead>(reader: &mut R) -> Result<Response, Error> {
    let mut waypoints = Vec::default();

    loop {
        let line = read_non_empty_line(reader)?.ok_or(Error::UnexpectedEof)?;
        if line == END_SENTINEL {
            break;
        }
        waypoints.push(parse_point(&line)?);
    }

    if waypoints.is_empty() {
        Ok(Response::NoRoute)
    } else {
        Ok(Response::Route(waypoints))
    }
}

/// Writes a [Response] to the stream, flushing it afterwards.
pub fn write_response<W: io::Write>(writer: &mut W, response: &Response) -> Result<(), Error> {
    if let Response::Route(waypoints) = response {
        for waypoint in waypoints {
            writeln!(writer, "{}", waypoint)?;
        }
    }
    writeln!(writer, "{}", END_SENTINEL)?;
    writer.flush()?;
    Ok(())
}

/// Reads the next line with any non-whitespace content, returning it trimmed.
/// Returns [None] at end of stream.
fn read_non_empty_line<R: io::BufRead>(reader: &mut R) -> Result<Option<String>, Error> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
}

fn parse_point(line: &str) -> Result<Point, Error> {
    let invalid = || Error::InvalidCoordinates(line.to_string());

    let mut parts = line.split_whitespace();
    let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
        (Some(lat), Some(lon), None) => (lat, lon),
        _ => return Err(invalid()),
    };

    let lat: f64 = lat.parse().map_err(|_| invalid())?;
    let lon: f64 = lon.parse().map_err(|_| invalid())?;
    Point::try_from_degrees(lat, lon).ok_or_else(invalid)
}
