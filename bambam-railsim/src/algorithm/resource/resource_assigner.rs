use crate::model::{Link, LinkId, Network, ResourceId, ScenarioError};
use kdam::tqdm;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// assigns capacity resources to the links of a rail network. a link and its
/// inverse (the link running from its to-node back to its from-node) model the
/// same single track and share one resource; any other link gets a resource
/// of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceAssigner {
    /// train capacity written to every link. `None` leaves link capacities as imported.
    pub train_capacity: Option<u32>,
    pub resource_id_prefix: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceSummary {
    pub resources: usize,
    pub paired_links: usize,
    pub single_links: usize,
}

impl Default for ResourceAssigner {
    fn default() -> Self {
        Self {
            train_capacity: Some(1),
            resource_id_prefix: String::from("resource_"),
        }
    }
}

impl ResourceAssigner {
    /// replaces the resource id of every link. resources are numbered from 0 in
    /// link id order; a link and its inverse are always assigned together.
    pub fn assign(&self, network: &mut Network) -> Result<ResourceSummary, ScenarioError> {
        network.validate_node_references()?;
        let inverses = find_inverse_links(network)?;

        let mut assignments: HashMap<LinkId, ResourceId> = HashMap::new();
        let mut summary = ResourceSummary::default();
        let iter = tqdm!(
            network.links.values(),
            desc = "assign link resources",
            total = network.links.len()
        );
        for link in iter {
            if assignments.contains_key(&link.id) {
                continue;
            }
            let resource_id =
                ResourceId(format!("{}{}", self.resource_id_prefix, summary.resources));
            summary.resources += 1;
            match inverses.get(&link.id).cloned().flatten() {
                Some(inverse_id) => {
                    summary.paired_links += 2;
                    assignments.insert(inverse_id, resource_id.clone());
                    assignments.insert(link.id.clone(), resource_id);
                }
                None => {
                    summary.single_links += 1;
                    assignments.insert(link.id.clone(), resource_id);
                }
            }
        }
        eprintln!();

        for link in network.links.values_mut() {
            link.resource_id = assignments.remove(&link.id);
            if let Some(capacity) = self.train_capacity {
                link.train_capacity = Some(capacity);
            }
        }
        log::info!(
            "assigned {} resources to {} links ({} paired, {} single-direction)",
            summary.resources,
            summary.paired_links + summary.single_links,
            summary.paired_links,
            summary.single_links
        );
        Ok(summary)
    }
}

/// finds the inverse of every link. among the out-links of a link's to-node,
/// the inverse is the one leading back to the link's from-node. a link is
/// never its own inverse. more than one candidate means the network is
/// malformed and fails the whole search.
fn find_inverse_links(
    network: &Network,
) -> Result<HashMap<LinkId, Option<LinkId>>, ScenarioError> {
    let out_links = network.out_links();
    let result = network
        .links
        .par_iter()
        .map(|(link_id, link)| {
            let candidates = inverse_candidates(link, out_links.get(&link.to_node));
            match candidates.as_slice() {
                [] => Ok((link_id.clone(), None)),
                [inverse] => Ok((link_id.clone(), Some((*inverse).clone()))),
                _ => Err(ScenarioError::ResourceAssignmentAmbiguity {
                    link: link_id.clone(),
                    candidates: candidates.iter().map(|c| (*c).clone()).collect(),
                }),
            }
        })
        .collect::<Result<HashMap<_, _>, _>>()?;
    Ok(result)
}

fn inverse_candidates<'a>(
    link: &Link,
    to_node_out_links: Option<&Vec<&'a Link>>,
) -> Vec<&'a LinkId> {
    match to_node_out_links {
        None => vec![],
        Some(links) => links
            .iter()
            .copied()
            .filter(|candidate| candidate.id != link.id && candidate.to_node == link.from_node)
            .map(|candidate| &candidate.id)
            .collect(),
    }
}

/// confirms the resource contract of a network: every link carries a resource,
/// and links sharing a resource are at most two that traverse the same node
/// pair in opposite directions.
pub fn validate_resource_groups(network: &Network) -> Result<(), ScenarioError> {
    let mut groups: HashMap<&ResourceId, Vec<&Link>> = HashMap::new();
    for link in network.links.values() {
        let resource_id = link.resource_id.as_ref().ok_or_else(|| {
            ScenarioError::InvalidResourceGroup {
                resource: None,
                links: vec![link.id.clone()],
            }
        })?;
        groups.entry(resource_id).or_default().push(link);
    }
    for (resource_id, links) in groups.iter() {
        let valid = match links.as_slice() {
            [_] => true,
            [l1, l2] => l1.from_node == l2.to_node && l1.to_node == l2.from_node,
            _ => false,
        };
        if !valid {
            return Err(ScenarioError::InvalidResourceGroup {
                resource: Some((*resource_id).clone()),
                links: links.iter().map(|l| l.id.clone()).collect(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use std::collections::HashSet;

    fn network(links: &[(&str, &str, &str)]) -> Network {
        let mut network = Network::default();
        for (id, x) in [("a", 0.0), ("b", 1.0), ("c", 2.0), ("d", 3.0)] {
            network.add_node(Node::new(id, x, 0.0));
        }
        for (id, src, dst) in links {
            network.add_link(Link::new(id, src, dst));
        }
        network
    }

    fn resource_of(network: &Network, link_id: &str) -> ResourceId {
        network
            .get_link(&LinkId::from(link_id))
            .and_then(|l| l.resource_id.clone())
            .expect("link should have a resource")
    }

    #[test]
    fn test_two_opposite_pairs_share_two_resources() {
        let mut network = network(&[
            ("ab", "a", "b"),
            ("ba", "b", "a"),
            ("cd", "c", "d"),
            ("dc", "d", "c"),
        ]);
        let summary = ResourceAssigner::default()
            .assign(&mut network)
            .expect("assignment should succeed");
        assert_eq!(summary.resources, 2);
        assert_eq!(summary.paired_links, 4);
        assert_eq!(resource_of(&network, "ab"), resource_of(&network, "ba"));
        assert_eq!(resource_of(&network, "cd"), resource_of(&network, "dc"));
        assert_ne!(resource_of(&network, "ab"), resource_of(&network, "cd"));
        let distinct: HashSet<ResourceId> = network
            .links
            .values()
            .filter_map(|l| l.resource_id.clone())
            .collect();
        assert_eq!(distinct.len(), 2);
    }

    #[test]
    fn test_resources_are_numbered_in_link_order() {
        let mut network = network(&[("ab", "a", "b"), ("ba", "b", "a"), ("bc", "b", "c")]);
        ResourceAssigner::default()
            .assign(&mut network)
            .expect("assignment should succeed");
        assert_eq!(resource_of(&network, "ab"), ResourceId::from("resource_0"));
        assert_eq!(resource_of(&network, "ba"), ResourceId::from("resource_0"));
        assert_eq!(resource_of(&network, "bc"), ResourceId::from("resource_1"));
    }

    #[test]
    fn test_one_way_link_has_its_own_resource() {
        let mut network = network(&[("ab", "a", "b"), ("ba", "b", "a"), ("bc", "b", "c")]);
        let summary = ResourceAssigner::default()
            .assign(&mut network)
            .expect("assignment should succeed");
        assert_eq!(summary.single_links, 1);
        let siding = resource_of(&network, "bc");
        let sharing = network
            .links
            .values()
            .filter(|l| l.resource_id.as_ref() == Some(&siding))
            .count();
        assert_eq!(sharing, 1);
    }

    #[test]
    fn test_pairs_are_symmetric_and_inverse() {
        let mut network = network(&[
            ("ab", "a", "b"),
            ("ba", "b", "a"),
            ("bc", "b", "c"),
            ("cb", "c", "b"),
            ("cd", "c", "d"),
        ]);
        ResourceAssigner::default()
            .assign(&mut network)
            .expect("assignment should succeed");
        let mut groups: HashMap<ResourceId, Vec<&Link>> = HashMap::new();
        for link in network.links.values() {
            let rid = link.resource_id.clone().expect("every link assigned");
            groups.entry(rid).or_default().push(link);
        }
        for links in groups.values() {
            assert!(links.len() <= 2);
            if let [l1, l2] = links.as_slice() {
                assert_eq!(l1.to_node, l2.from_node);
                assert_eq!(l1.from_node, l2.to_node);
            }
        }
        assert!(validate_resource_groups(&network).is_ok());
    }

    #[test]
    fn test_validate_rejects_unrelated_links_sharing_a_resource() {
        let mut network = network(&[("ab", "a", "b"), ("cd", "c", "d")]);
        for link in network.links.values_mut() {
            link.resource_id = Some(ResourceId::from("shared"));
        }
        match validate_resource_groups(&network) {
            Err(ScenarioError::InvalidResourceGroup { resource, links }) => {
                assert_eq!(resource, Some(ResourceId::from("shared")));
                assert_eq!(links.len(), 2);
            }
            other => panic!("expected invalid resource group, found {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_unassigned_link() {
        let network = network(&[("ab", "a", "b")]);
        assert!(matches!(
            validate_resource_groups(&network),
            Err(ScenarioError::InvalidResourceGroup { resource: None, .. })
        ));
    }

    #[test]
    fn test_parallel_links_are_ambiguous() {
        let mut network = network(&[("ab", "a", "b"), ("ba1", "b", "a"), ("ba2", "b", "a")]);
        match ResourceAssigner::default().assign(&mut network) {
            Err(ScenarioError::ResourceAssignmentAmbiguity { link, candidates }) => {
                assert_eq!(link, LinkId::from("ab"));
                assert_eq!(candidates, vec![LinkId::from("ba1"), LinkId::from("ba2")]);
            }
            other => panic!("expected ambiguity, found {other:?}"),
        }
        assert!(network.links.values().all(|l| l.resource_id.is_none()));
    }

    #[test]
    fn test_self_loop_is_not_its_own_inverse() {
        let mut network = network(&[("aa", "a", "a"), ("ab", "a", "b")]);
        let summary = ResourceAssigner::default()
            .assign(&mut network)
            .expect("assignment should succeed");
        assert_eq!(summary.resources, 2);
        assert_eq!(summary.single_links, 2);
    }

    #[test]
    fn test_capacity_and_replacement() {
        let mut network = network(&[("ab", "a", "b")]);
        if let Some(link) = network.links.get_mut(&LinkId::from("ab")) {
            link.resource_id = Some(ResourceId::from("stale"));
        }
        let assigner = ResourceAssigner {
            train_capacity: Some(2),
            resource_id_prefix: String::from("track_"),
        };
        assigner.assign(&mut network).expect("assignment should succeed");
        let link = network.get_link(&LinkId::from("ab")).expect("link exists");
        assert_eq!(link.resource_id, Some(ResourceId::from("track_0")));
        assert_eq!(link.train_capacity, Some(2));
    }
}
