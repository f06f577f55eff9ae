use std::collections::{BTreeMap, BTreeSet};

use crate::ids::{ArgNodeId, CfaNodeId, NodeRef};
use crate::report::Report;

/// Bidirectional map between CFA locations and the ARG states placed
/// at them.
#[derive(Debug, Clone, Default)]
pub struct NodeCorrespondence {
    cfa_to_arg: BTreeMap<CfaNodeId, BTreeSet<ArgNodeId>>,
    arg_to_cfa: BTreeMap<ArgNodeId, CfaNodeId>,
}

impl NodeCorrespondence {
    /// Build from a validated report. ARG nodes appearing in several
    /// renderings share one location, so the first occurrence wins.
    pub fn build(report: &Report) -> Self {
        let mut correspondence = NodeCorrespondence::default();
        let nodes = report.error_paths.iter().flat_map(|path| {
            path.collapsed.nodes.iter().chain(path.full.nodes.iter())
        });
        for node in nodes {
            if let Some(cfa) = node.cfa_node {
                correspondence
                    .cfa_to_arg
                    .entry(cfa)
                    .or_default()
                    .insert(node.id);
                correspondence.arg_to_cfa.entry(node.id).or_insert(cfa);
            }
        }
        correspondence
    }

    /// ARG states at `cfa`, lowest identifier first.
    pub fn arg_nodes_for(
        &self,
        cfa: CfaNodeId,
    ) -> impl Iterator<Item = ArgNodeId> + '_ {
        self.cfa_to_arg.get(&cfa).into_iter().flatten().copied()
    }

    pub fn cfa_node_for(&self, arg: ArgNodeId) -> Option<CfaNodeId> {
        self.arg_to_cfa.get(&arg).copied()
    }

    /// Counterpart of `node` in the other representation. Several
    /// candidates resolve to the lowest identifier.
    pub fn resolve(&self, node: NodeRef) -> Option<NodeRef> {
        match node {
            NodeRef::Cfa(cfa) => {
                self.arg_nodes_for(cfa).next().map(NodeRef::Arg)
            }
            NodeRef::Arg(arg) => self.cfa_node_for(arg).map(NodeRef::Cfa),
        }
    }
}
