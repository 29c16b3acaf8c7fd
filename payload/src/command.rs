//! Command tree decoded from an inbound payload, and the result tree the
//! executor produces from it.
//!
//! A leaf is exactly one command invocation; a chain is an ordered batch of
//! nodes. The result tree mirrors the command tree's nesting so that the
//! encode stage can render it back into a plain [`Value`].

use crate::error::{DispatchError, DispatchResult};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// Mapping keys used when rendering a [`CommandResult`] for the encode stage.
pub const SUCCESS_KEY: &str = "success";
pub const RESULT_KEY: &str = "result";
pub const NAME_KEY: &str = "name";
pub const ARGS_KEY: &str = "args";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandNode {
    Leaf { name: String, params: Value },
    Chain(Vec<CommandNode>),
}

impl CommandNode {
    /// Classifies a decoded value tree as a command tree.
    ///
    /// A mapping with exactly one scalar-keyed entry is a leaf; a sequence is
    /// a chain of its classified elements. Anything else, including a mapping
    /// that packs several (name, params) entries into one node, is a
    /// [`DispatchError::MalformedCommand`].
    pub fn from_value(value: &Value) -> DispatchResult<CommandNode> {
        match value {
            Value::Mapping(entries) => match entries.as_slice() {
                [(name, params)] => {
                    let name = name.as_scalar().ok_or_else(|| {
                        DispatchError::MalformedCommand(format!(
                            "command name must be a scalar, got {}",
                            name.type_name()
                        ))
                    })?;
                    Ok(CommandNode::Leaf {
                        name: name.to_string(),
                        params: params.clone(),
                    })
                }
                [] => Err(DispatchError::MalformedCommand(
                    "empty command mapping".to_string(),
                )),
                entries => Err(DispatchError::MalformedCommand(format!(
                    "command mapping must hold exactly one entry, got {}",
                    entries.len()
                ))),
            },
            Value::Sequence(items) => {
                let children: DispatchResult<Vec<_>> =
                    items.iter().map(CommandNode::from_value).collect();
                Ok(CommandNode::Chain(children?))
            }
            Value::Scalar(s) => Err(DispatchError::MalformedCommand(s.clone())),
        }
    }
}

/// Outcome of one leaf invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    pub value: Value,
    pub name: String,
    pub args: Value,
}

impl CommandResult {
    pub fn succeeded(name: impl Into<String>, args: Value, value: Value) -> Self {
        CommandResult {
            success: true,
            value,
            name: name.into(),
            args,
        }
    }

    pub fn failed(name: impl Into<String>, args: Value, reason: impl Into<String>) -> Self {
        CommandResult {
            success: false,
            value: Value::scalar(reason.into()),
            name: name.into(),
            args,
        }
    }
}

/// Result tree mirroring a command tree's nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultTree {
    Leaf(CommandResult),
    Chain(Vec<ResultTree>),
}

impl ResultTree {
    /// Renders the results as a value tree for the encode stage. A leaf
    /// becomes a mapping keyed `success`/`result`/`name`/`args`, a chain a
    /// sequence, so the output conforms to the shape contract codecs expect.
    pub fn to_value(&self) -> Value {
        match self {
            ResultTree::Leaf(result) => Value::mapping([
                (
                    Value::scalar(SUCCESS_KEY),
                    Value::scalar(result.success.to_string()),
                ),
                (Value::scalar(RESULT_KEY), result.value.clone()),
                (Value::scalar(NAME_KEY), Value::scalar(&*result.name)),
                (Value::scalar(ARGS_KEY), result.args.clone()),
            ]),
            ResultTree::Chain(children) => {
                Value::Sequence(children.iter().map(ResultTree::to_value).collect())
            }
        }
    }
}
