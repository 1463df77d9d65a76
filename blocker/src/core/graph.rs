//! Arena-backed undirected graph of nodes and links.
//!
//! Nodes and links live in two flat vectors and refer to each other by index:
//! a link stores its two endpoint node ids, a node stores the ids of its
//! incident links in input order. Links are never removed, only severed.

use std::fmt;

use serde::Serialize;

/// Index of a node in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// Index of a link in the graph arena (input order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LinkId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    /// Incident links, in the order they appeared in the input.
    pub links: Vec<LinkId>,
    pub is_gateway: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    /// Endpoints as stored at creation; this is also the output order.
    pub endpoints: (NodeId, NodeId),
    pub severed: bool,
}

impl Link {
    /// The endpoint that is not `from`.
    ///
    /// Only meaningful when `from` is one of the endpoints; callers walking a
    /// node's own incident links always satisfy that.
    pub fn other(&self, from: NodeId) -> NodeId {
        if from == self.endpoints.1 {
            self.endpoints.0
        } else {
            self.endpoints.1
        }
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.endpoints.0 == node || self.endpoints.1 == node
    }

    pub fn is_active(&self) -> bool {
        !self.severed
    }
}

/// Error raised when a node id falls outside the initialised range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNodeError {
    pub id: usize,
    pub node_count: usize,
}

impl fmt::Display for UnknownNodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node {} does not exist (graph has {} nodes)",
            self.id, self.node_count
        )
    }
}

impl std::error::Error for UnknownNodeError {}

/// Owns every node and link for the lifetime of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

impl Graph {
    /// Create `node_count` isolated, non-gateway nodes.
    pub fn with_nodes(node_count: usize) -> Self {
        let nodes = (0..node_count)
            .map(|index| Node {
                id: NodeId(index),
                links: Vec::new(),
                is_gateway: false,
            })
            .collect();
        Self {
            nodes,
            links: Vec::new(),
        }
    }

    /// Add a link between two existing nodes and return its id.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) -> Result<LinkId, UnknownNodeError> {
        self.check(a.0)?;
        self.check(b.0)?;
        let id = LinkId(self.links.len());
        self.links.push(Link {
            id,
            endpoints: (a, b),
            severed: false,
        });
        self.nodes[a.0].links.push(id);
        if a != b {
            self.nodes[b.0].links.push(id);
        }
        Ok(id)
    }

    pub fn mark_gateway(&mut self, node: NodeId) -> Result<(), UnknownNodeError> {
        self.check(node.0)?;
        self.nodes[node.0].is_gateway = true;
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Resolve a raw id coming from outside the core.
    pub fn resolve(&self, raw: usize) -> Result<NodeId, UnknownNodeError> {
        self.check(raw)?;
        Ok(NodeId(raw))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn is_gateway(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_gateway
    }

    /// Every incident `(link, other_node)` pair, severed links included.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (LinkId, NodeId)> + '_ {
        self.nodes[node.0]
            .links
            .iter()
            .map(move |&link| (link, self.links[link.0].other(node)))
    }

    /// Incident pairs whose link has not been severed.
    pub fn active_neighbors(&self, node: NodeId) -> impl Iterator<Item = (LinkId, NodeId)> + '_ {
        self.neighbors(node)
            .filter(|(link, _)| self.links[link.0].is_active())
    }

    /// Active links from `node` whose other endpoint is a gateway.
    pub fn gateway_links(&self, node: NodeId) -> impl Iterator<Item = LinkId> + '_ {
        self.active_neighbors(node)
            .filter(|&(_, other)| self.is_gateway(other))
            .map(|(link, _)| link)
    }

    /// Number of active links from `node` straight into a gateway.
    pub fn gateway_degree(&self, node: NodeId) -> usize {
        self.gateway_links(node).count()
    }

    /// The endpoint of `link` that is not `node`, or `None` when `node` is
    /// not incident to `link`.
    pub fn other_endpoint(&self, link: LinkId, node: NodeId) -> Option<NodeId> {
        let link = &self.links[link.0];
        link.touches(node).then(|| link.other(node))
    }

    /// Permanently remove `link` from traversal.
    ///
    /// # Panics
    ///
    /// Panics if the link was already severed.
    pub fn sever(&mut self, link: LinkId) {
        let entry = &mut self.links[link.0];
        assert!(!entry.severed, "link {} severed twice", link);
        entry.severed = true;
    }

    fn check(&self, raw: usize) -> Result<(), UnknownNodeError> {
        if raw < self.nodes.len() {
            Ok(())
        } else {
            Err(UnknownNodeError {
                id: raw,
                node_count: self.nodes.len(),
            })
        }
    }
}
