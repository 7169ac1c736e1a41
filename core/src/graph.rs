use crate::error::{GraphError, GraphResult};

/// Node identifier: an index into the station list, `0..node_count`.
pub type NodeId = usize;

/// Security clearance a traveler may hold.
///
/// A closed set: the `None` sentinel plus the named levels. Gating compares
/// clearances by equality only — there is no hierarchy, and holding `Green`
/// does not open a `Red`-gated segment. Any ordering on this type is
/// incidental (heap tie-breaking) and never feeds routing decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clearance {
    None,
    Red,
    Blue,
    Green,
}

impl Clearance {
    /// All clearance levels, sentinel included. Handy for enumerating the
    /// augmented state space in callers and tests.
    pub const ALL: [Clearance; 4] = [
        Clearance::None,
        Clearance::Red,
        Clearance::Blue,
        Clearance::Green,
    ];

    /// Whether this is the "no clearance" sentinel.
    pub fn is_none(self) -> bool {
        self == Clearance::None
    }
}

/// A directed segment in the adjacency list: destination, travel time, and
/// the clearance required to traverse it (`Clearance::None` = ungated).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub to: NodeId,
    pub duration: f64,
    pub required: Clearance,
}

impl Segment {
    /// Exact-match gating: a segment is passable when it is ungated or the
    /// traveler holds precisely the required clearance.
    pub fn passable(&self, held: Clearance) -> bool {
        self.required == Clearance::None || self.required == held
    }
}

/// Immutable routing graph: per-node granted clearance plus outgoing
/// adjacency lists.
///
/// Built once per input via [`Graph::build`], then shared read-only across
/// any number of searches. Multi-edges and self-loops are preserved as
/// given. All structural validation happens at build time, so the search
/// engine never re-checks endpoints or durations.
#[derive(Debug)]
pub struct Graph {
    grants: Vec<Clearance>,
    outgoing: Vec<Vec<Segment>>,
}

impl Graph {
    /// Build the adjacency structure from the station list and segment list.
    ///
    /// `grants[i]` is the clearance station `i` hands out (`Clearance::None`
    /// if it grants nothing). Each segment is `(from, to, duration,
    /// required)`. Fails fast on the first out-of-range endpoint or
    /// negative/non-finite duration; on error no graph is produced.
    pub fn build<I>(grants: Vec<Clearance>, segments: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (NodeId, NodeId, f64, Clearance)>,
    {
        let node_count = grants.len();
        let mut outgoing: Vec<Vec<Segment>> = vec![Vec::new(); node_count];

        for (from, to, duration, required) in segments {
            if from >= node_count {
                return Err(GraphError::NodeOutOfRange { index: from, node_count });
            }
            if to >= node_count {
                return Err(GraphError::NodeOutOfRange { index: to, node_count });
            }
            // `!(x >= 0.0)` also rejects NaN.
            if !(duration >= 0.0) || !duration.is_finite() {
                return Err(GraphError::InvalidDuration { from, to, duration });
            }
            outgoing[from].push(Segment { to, duration, required });
        }

        Ok(Self { grants, outgoing })
    }

    /// The clearance granted at `node`, or the sentinel if it grants nothing.
    pub fn grant(&self, node: NodeId) -> Clearance {
        self.grants[node]
    }

    /// Outgoing segments from `node`.
    pub fn outgoing(&self, node: NodeId) -> &[Segment] {
        &self.outgoing[node]
    }

    pub fn node_count(&self) -> usize {
        self.grants.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|v| v.len()).sum()
    }
}
