//! Recursive command-chain executor.
//!
//! Walks a [`CommandNode`] tree, invoking one command plugin per leaf and
//! producing a [`ResultTree`] that mirrors the command tree's nesting. An
//! unresolved leaf name fails that leaf alone; siblings in the chain still
//! run. A chain reports the success of its last-evaluated child, exactly as
//! the reference protocol does (an empty chain reports failure).

use crate::registry::CapabilityRegistry;
use payload::{CommandNode, CommandResult, DispatchError, ResultTree, Value};

pub fn execute(registry: &CapabilityRegistry, node: &CommandNode) -> (bool, ResultTree) {
    match node {
        CommandNode::Leaf { name, params } => {
            let result = run_leaf(registry, name, params);
            (result.success, ResultTree::Leaf(result))
        }
        CommandNode::Chain(children) => {
            log::debug!("beginning sub command chain");
            let mut results = Vec::with_capacity(children.len());
            let mut success = false;
            for child in children {
                let (child_success, child_results) = execute(registry, child);
                // Last-evaluated child's outcome is the chain's outcome.
                success = child_success;
                results.push(child_results);
            }
            log::debug!("finishing sub command chain");
            (success, ResultTree::Chain(results))
        }
    }
}

fn run_leaf(registry: &CapabilityRegistry, name: &str, params: &Value) -> CommandResult {
    let factory = match registry.command(name) {
        Ok(factory) => factory,
        Err(_) => {
            let err = DispatchError::UnknownCommand(name.to_string());
            log::warn!("{}", err);
            return CommandResult::failed(name, params.clone(), err.to_string());
        }
    };
    let command = factory();
    log::info!("executing: {}", command.name());
    match command.execute(params) {
        Ok(value) => CommandResult::succeeded(name, params.clone(), value),
        Err(err) => {
            log::warn!("command '{}' failed: {}", name, err);
            CommandResult::failed(name, params.clone(), err.to_string())
        }
    }
}
