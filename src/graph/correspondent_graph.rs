use crate::core::catalog::Catalog;
use crate::core::institution::InstitutionId;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Precomputed adjacency between institutions that share a correspondent.
///
/// An edge `A - B` exists exactly when
/// `A.shares_correspondent_with(B)` holds. Building the graph costs one
/// pass over the catalog's correspondent sets; afterwards adjacency
/// checks do not re-intersect sets.
///
/// # Examples
///
/// ```
/// use transfer_router::core::border::BorderFeeTable;
/// use transfer_router::core::catalog::Catalog;
/// use transfer_router::core::institution::{CountryCode, Institution, InstitutionId};
/// use transfer_router::graph::correspondent_graph::CorrespondentGraph;
///
/// let a = Institution::new(InstitutionId::new("A"), CountryCode::new("X"))
///     .with_correspondents(["HUB"]);
/// let b = Institution::new(InstitutionId::new("B"), CountryCode::new("Y"))
///     .with_correspondents(["HUB"]);
/// let catalog = Catalog::new(vec![a, b], BorderFeeTable::new()).unwrap();
///
/// let graph = CorrespondentGraph::build(&catalog);
/// assert!(graph.adjacent(&InstitutionId::new("A"), &InstitutionId::new("B")));
/// ```
#[derive(Debug, Clone)]
pub struct CorrespondentGraph {
    graph: UnGraph<InstitutionId, ()>,
    nodes: HashMap<InstitutionId, NodeIndex>,
    /// Institutions with at least one correspondent
    linked: HashSet<NodeIndex>,
}

impl CorrespondentGraph {
    pub fn build(catalog: &Catalog) -> Self {
        let mut graph = UnGraph::new_undirected();
        let mut nodes = HashMap::new();
        for institution in catalog.institutions() {
            let idx = graph.add_node(institution.id().clone());
            nodes.insert(institution.id().clone(), idx);
        }

        // correspondent -> institutions that list it
        let mut members: HashMap<&InstitutionId, Vec<NodeIndex>> = HashMap::new();
        let mut linked = HashSet::new();
        for institution in catalog.institutions() {
            let idx = nodes[institution.id()];
            if !institution.correspondents().is_empty() {
                linked.insert(idx);
            }
            for correspondent in institution.correspondents() {
                members.entry(correspondent).or_default().push(idx);
            }
        }

        for group in members.values() {
            for (i, &a) in group.iter().enumerate() {
                for &b in &group[i + 1..] {
                    if graph.find_edge(a, b).is_none() {
                        graph.add_edge(a, b, ());
                    }
                }
            }
        }

        Self {
            graph,
            nodes,
            linked,
        }
    }

    /// Whether two institutions can exchange funds directly.
    ///
    /// Unknown names are never adjacent. An institution is adjacent to
    /// itself when it has any correspondent at all.
    pub fn adjacent(&self, a: &InstitutionId, b: &InstitutionId) -> bool {
        match (self.nodes.get(a), self.nodes.get(b)) {
            (Some(&a), Some(&b)) if a == b => self.linked.contains(&a),
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    /// Institutions adjacent to `id`, ascending by name.
    pub fn neighbors(&self, id: &InstitutionId) -> BTreeSet<&InstitutionId> {
        self.nodes
            .get(id)
            .map(|&idx| {
                self.graph
                    .neighbors(idx)
                    .map(|n| &self.graph[n])
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn institution_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
