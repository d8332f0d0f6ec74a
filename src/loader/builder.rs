// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::records::{NumberedRecord, Record};
use super::Error;
use crate::{Graph, Vertex, VertexId};

/// Helper object used for converting [Records](Record) into a [Graph].
pub(super) struct GraphBuilder<'a> {
    g: &'a mut Graph,
    vertices: usize,
    edges: usize,
}

impl<'a> GraphBuilder<'a> {
    /// Create a new graph builder, adding to the provided graph.
    pub(super) fn new(g: &'a mut Graph) -> Self {
        Self {
            g,
            vertices: 0,
            edges: 0,
        }
    }

    /// Add all records from the provided iterator, stopping at the first error.
    pub(super) fn add_records<I>(mut self, records: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Result<NumberedRecord, Error>>,
    {
        for r in records {
            self.add_record(r?)?;
        }

        log::debug!(
            "loaded {} vertices and {} edges (graph now has {} vertices)",
            self.vertices,
            self.edges,
            self.g.len(),
        );
        Ok(())
    }

    fn add_record(&mut self, r: NumberedRecord) -> Result<(), Error> {
        match r.record {
            Record::Vertex { id, position } => {
                if self.g.contains(id) {
                    log::warn!("line {}: vertex {} redefined", r.line, id);
                }
                self.g.add_vertex(Vertex { id, position });
                self.vertices += 1;
            }

            Record::Edge { from, to } => {
                self.ensure_exists(r.line, from)?;
                self.ensure_exists(r.line, to)?;
                self.g.add_road(from, to);
                self.edges += 1;
            }
        }
        Ok(())
    }

    fn ensure_exists(&self, line: usize, id: VertexId) -> Result<(), Error> {
        if self.g.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownVertex { line, id })
        }
    }
}
