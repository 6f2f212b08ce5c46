use super::{LinkId, NodeId, ResourceId, ScenarioError};
use geo::Coord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// directed rail network produced by the network importer and possibly
/// adjusted by the mapper.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    #[serde(default)]
    pub nodes: BTreeMap<NodeId, Node>,
    #[serde(default)]
    pub links: BTreeMap<LinkId, Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub coord: Coord<f64>,
}

/// a directed link between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub from_node: NodeId,
    pub to_node: NodeId,
    /// length in meters
    #[serde(default)]
    pub length: f64,
    /// free speed in meters per second
    #[serde(default)]
    pub freespeed: f64,
    /// flow capacity in vehicles per hour
    #[serde(default)]
    pub capacity: f64,
    #[serde(default)]
    pub allowed_modes: BTreeSet<String>,
    /// number of trains that may occupy the link at once
    #[serde(default)]
    pub train_capacity: Option<u32>,
    #[serde(default)]
    pub resource_id: Option<ResourceId>,
}

impl Network {
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn add_link(&mut self, link: Link) {
        self.links.insert(link.id.clone(), link);
    }

    pub fn contains_link(&self, link_id: &LinkId) -> bool {
        self.links.contains_key(link_id)
    }

    pub fn get_link(&self, link_id: &LinkId) -> Option<&Link> {
        self.links.get(link_id)
    }

    /// helper with error handling for getting the coordinate of a node
    /// referenced by a link.
    pub fn get_node_coord(&self, link: &Link, node_id: &NodeId) -> Result<Coord<f64>, ScenarioError> {
        self.nodes
            .get(node_id)
            .map(|n| n.coord)
            .ok_or_else(|| ScenarioError::MissingNode {
                link: link.id.clone(),
                node: node_id.clone(),
            })
    }

    /// the points along a link that are tested against a region: its from-node
    /// and its to-node coordinates.
    pub fn link_points(&self, link: &Link) -> Result<[Coord<f64>; 2], ScenarioError> {
        let src = self.get_node_coord(link, &link.from_node)?;
        let dst = self.get_node_coord(link, &link.to_node)?;
        Ok([src, dst])
    }

    /// builds the out-link adjacency of every node that has outgoing links.
    /// links are listed in link id order.
    pub fn out_links(&self) -> HashMap<&NodeId, Vec<&Link>> {
        let mut adj: HashMap<&NodeId, Vec<&Link>> = HashMap::new();
        for link in self.links.values() {
            adj.entry(&link.from_node).or_default().push(link);
        }
        adj
    }

    /// confirms that both endpoints of every link exist.
    pub fn validate_node_references(&self) -> Result<(), ScenarioError> {
        for link in self.links.values() {
            self.link_points(link)?;
        }
        Ok(())
    }
}

impl Node {
    pub fn new(id: &str, x: f64, y: f64) -> Node {
        Node {
            id: NodeId::from(id),
            coord: Coord { x, y },
        }
    }
}

impl Link {
    pub fn new(id: &str, from_node: &str, to_node: &str) -> Link {
        Link {
            id: LinkId::from(id),
            from_node: NodeId::from(from_node),
            to_node: NodeId::from(to_node),
            length: 0.0,
            freespeed: 0.0,
            capacity: 0.0,
            allowed_modes: BTreeSet::from([String::from("rail")]),
            train_capacity: None,
            resource_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_links_and_points() {
        let mut network = Network::default();
        network.add_node(Node::new("n1", 0.0, 0.0));
        network.add_node(Node::new("n2", 10.0, 0.0));
        network.add_link(Link::new("l1", "n1", "n2"));
        network.add_link(Link::new("l2", "n2", "n1"));

        let adj = network.out_links();
        let from_n2 = adj.get(&NodeId::from("n2")).expect("n2 has out links");
        assert_eq!(from_n2.len(), 1);
        assert_eq!(from_n2[0].id, LinkId::from("l2"));

        let l1 = network.get_link(&LinkId::from("l1")).expect("l1 exists");
        let [src, dst] = network.link_points(l1).expect("nodes exist");
        assert_eq!(src, Coord { x: 0.0, y: 0.0 });
        assert_eq!(dst, Coord { x: 10.0, y: 0.0 });
    }

    #[test]
    fn test_missing_node() {
        let mut network = Network::default();
        network.add_node(Node::new("n1", 0.0, 0.0));
        network.add_link(Link::new("l1", "n1", "ghost"));
        match network.validate_node_references() {
            Err(ScenarioError::MissingNode { link, node }) => {
                assert_eq!(link, LinkId::from("l1"));
                assert_eq!(node, NodeId::from("ghost"));
            }
            other => panic!("expected missing node error, found {other:?}"),
        }
    }
}
