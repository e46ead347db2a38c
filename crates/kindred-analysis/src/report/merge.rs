//! Merge metric records onto node attributes.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use kindred_core::Node;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::graph::build::FamilyGraph;
use crate::metrics::MetricRecord;

/// One node with every metric merged onto it.
///
/// `None` marks a metric that is not applicable to this node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRow {
    #[serde(flatten)]
    pub node: Node,
    pub metrics: BTreeMap<String, Option<f64>>,
}

impl NodeRow {
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied().flatten()
    }
}

/// One row per node, in name order, carrying every record's value.
///
/// Each row lists every record name; values for names the record does not
/// cover are `None`. Record entries naming unknown nodes are ignored.
#[must_use]
#[instrument(skip(graph, records), fields(nodes = graph.node_count(), records = records.len()))]
pub fn merge(graph: &FamilyGraph, records: &[MetricRecord]) -> Vec<NodeRow> {
    for record in records {
        let stray = record
            .values
            .keys()
            .filter(|name| graph.node_index(name).is_none())
            .count();
        if stray > 0 {
            debug!(metric = %record.name, stray, "ignoring values for unknown nodes");
        }
    }

    graph
        .sorted_names()
        .iter()
        .filter_map(|name| graph.node(name))
        .map(|node| NodeRow {
            node: node.clone(),
            metrics: records
                .iter()
                .map(|r| (r.name.clone(), r.get(&node.name)))
                .collect(),
        })
        .collect()
}

const ATTRIBUTE_COLUMNS: [&str; 8] = [
    "name",
    "male",
    "culture",
    "house",
    "popularity",
    "house_group",
    "color",
    "shape",
];

/// Write merged rows as CSV: node attributes, then one column per metric.
///
/// Missing values (N/A metrics, absent culture/house) are empty cells.
///
/// # Errors
///
/// Returns any I/O or CSV error from the underlying writer.
pub fn write_csv<W: Write>(rows: &[NodeRow], writer: W) -> Result<(), csv::Error> {
    let metric_names: BTreeSet<&str> = rows
        .iter()
        .flat_map(|r| r.metrics.keys().map(String::as_str))
        .collect();

    let mut out = csv::Writer::from_writer(writer);

    let header = ATTRIBUTE_COLUMNS.iter().copied().chain(metric_names.iter().copied());
    out.write_record(header)?;

    for row in rows {
        let n = &row.node;
        let mut record = vec![
            n.name.clone(),
            n.male.to_string(),
            n.culture.clone().unwrap_or_default(),
            n.house.clone().unwrap_or_default(),
            n.popularity.to_string(),
            n.house_group.clone(),
            n.color.clone(),
            n.shape.clone(),
        ];
        record.extend(
            metric_names
                .iter()
                .map(|m| row.metric(m).map(|v| v.to_string()).unwrap_or_default()),
        );
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}
