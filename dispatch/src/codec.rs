//! Recursive layered codec engine.
//!
//! One primitive serves both directions: [`apply_one`] walks a value tree
//! with a single transform, and [`run_chain`] threads the tree through an
//! ordered list of codec plugins, decode and encode differing only in which
//! plugin list and trait method they use. The first failing stage aborts the
//! whole chain; no partial output is ever returned.

use crate::registry::CapabilityRegistry;
use payload::{CodecFactory, DispatchResult, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Decode,
    Encode,
}

impl Direction {
    fn verb(self) -> &'static str {
        match self {
            Direction::Decode => "decoded",
            Direction::Encode => "encoded",
        }
    }
}

/// Applies one transform across a value tree.
///
/// Scalars, and whole trees when `whole_input` is set, go through the
/// transform as a single unit. Mapping keys are always transformed directly;
/// mapping values and sequence elements recurse, and recursion never inherits
/// the whole-input override. Entry and element order are preserved. The first
/// failing node aborts with its error.
pub fn apply_one<F>(transform: &F, input: &Value, whole_input: bool) -> DispatchResult<Value>
where
    F: Fn(&Value) -> DispatchResult<Value>,
{
    match input {
        Value::Scalar(_) => transform(input),
        _ if whole_input => transform(input),
        Value::Mapping(entries) => {
            let mut out = Vec::with_capacity(entries.len());
            for (key, value) in entries {
                let key = transform(key)?;
                let value = if value.is_container() {
                    apply_one(transform, value, false)?
                } else {
                    transform(value)?
                };
                out.push((key, value));
            }
            Ok(Value::Mapping(out))
        }
        Value::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(apply_one(transform, item, false)?);
            }
            Ok(Value::Sequence(out))
        }
    }
}

/// Threads `input` through every codec in list order, honoring each plugin's
/// declared whole-input flag, and aborts on the first stage failure.
pub fn run_chain(
    codecs: &[CodecFactory],
    direction: Direction,
    input: &Value,
) -> DispatchResult<Value> {
    let mut data = input.clone();
    for factory in codecs {
        let codec = factory();
        let whole_input = codec.whole_input_only();
        let transform = |value: &Value| match direction {
            Direction::Decode => codec.decode(value),
            Direction::Encode => codec.encode(value),
        };
        data = apply_one(&transform, &data, whole_input)?;
        log::debug!("{} {} to '{}'", codec.name(), direction.verb(), data);
    }
    Ok(data)
}

/// Decode chain over the registry's decoder list.
pub fn decode(registry: &CapabilityRegistry, input: &Value) -> DispatchResult<Value> {
    log::info!("decoding...");
    run_chain(registry.decoders(), Direction::Decode, input)
}

/// Encode chain over the registry's encoder list.
pub fn encode(registry: &CapabilityRegistry, input: &Value) -> DispatchResult<Value> {
    log::info!("encoding results...");
    run_chain(registry.encoders(), Direction::Encode, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use payload::{Codec, DispatchError};
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn identity(value: &Value) -> DispatchResult<Value> {
        Ok(value.clone())
    }

    fn deep_tree() -> Value {
        // Depth 5: mapping -> sequence -> mapping -> sequence -> scalar.
        Value::mapping([
            (
                Value::scalar("outer"),
                Value::sequence([
                    Value::mapping([(
                        Value::scalar("inner"),
                        Value::sequence([Value::scalar("leaf"), Value::scalar("leaf2")]),
                    )]),
                    Value::scalar("sibling"),
                ]),
            ),
            (Value::scalar("tail"), Value::scalar("end")),
        ])
    }

    #[test]
    fn identity_preserves_every_shape_and_order() {
        let tree = deep_tree();
        assert_eq!(apply_one(&identity, &tree, false).unwrap(), tree);
        assert_eq!(
            apply_one(&identity, &Value::scalar("hi"), false).unwrap(),
            Value::scalar("hi")
        );
    }

    #[test]
    fn whole_input_applies_transform_to_the_entire_tree() {
        let tree = deep_tree();
        let stringify = |value: &Value| Ok(Value::scalar(value.to_string()));
        let out = apply_one(&stringify, &tree, true).unwrap();
        assert_eq!(out, Value::scalar(tree.to_string()));
    }

    #[test]
    fn recursion_does_not_inherit_whole_input() {
        // Upper-cases scalars only; containers must be walked, not handed over.
        let upper = |value: &Value| match value {
            Value::Scalar(s) => Ok(Value::Scalar(s.to_uppercase())),
            other => Err(DispatchError::Codec {
                codec: "upper".to_string(),
                message: format!("expected scalar, got {}", other.type_name()),
            }),
        };
        let tree = Value::mapping([(
            Value::scalar("k"),
            Value::sequence([Value::scalar("a"), Value::scalar("b")]),
        )]);
        let out = apply_one(&upper, &tree, false).unwrap();
        assert_eq!(
            out,
            Value::mapping([(
                Value::scalar("K"),
                Value::sequence([Value::scalar("A"), Value::scalar("B")]),
            )])
        );
    }

    #[test]
    fn failing_sequence_element_aborts_with_no_partial_output() {
        let fail_on_bad = |value: &Value| match value.as_scalar() {
            Some("bad") => Err(DispatchError::Codec {
                codec: "picky".to_string(),
                message: "bad node".to_string(),
            }),
            _ => Ok(value.clone()),
        };
        let tree = Value::sequence([
            Value::scalar("ok"),
            Value::scalar("bad"),
            Value::scalar("never"),
        ]);
        assert!(matches!(
            apply_one(&fail_on_bad, &tree, false),
            Err(DispatchError::Codec { .. })
        ));
    }

    struct CountingCodec {
        name: &'static str,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl Codec for CountingCodec {
        fn name(&self) -> &str {
            self.name
        }
        fn decode(&self, input: &Value) -> DispatchResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(DispatchError::Codec {
                    codec: self.name.to_string(),
                    message: "stage failure".to_string(),
                })
            } else {
                Ok(input.clone())
            }
        }
        fn encode(&self, input: &Value) -> DispatchResult<Value> {
            self.decode(input)
        }
    }

    #[test]
    fn chain_aborts_on_stage_two_and_never_runs_stage_three() {
        let calls: Vec<Arc<AtomicUsize>> =
            (0..3).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        let codecs: Vec<CodecFactory> = [("one", false), ("two", true), ("three", false)]
            .iter()
            .zip(calls.iter())
            .map(|(&(name, fail), calls)| {
                let calls = calls.clone();
                let factory: CodecFactory = Arc::new(move || {
                    Box::new(CountingCodec {
                        name,
                        fail,
                        calls: calls.clone(),
                    }) as Box<dyn Codec>
                });
                factory
            })
            .collect();

        let result = run_chain(&codecs, Direction::Decode, &Value::scalar("payload"));
        assert!(matches!(result, Err(DispatchError::Codec { .. })));
        assert_eq!(calls[0].load(Ordering::SeqCst), 1);
        assert_eq!(calls[1].load(Ordering::SeqCst), 1);
        assert_eq!(calls[2].load(Ordering::SeqCst), 0);
    }

    struct StringifyWholeCodec {
        calls: Arc<AtomicUsize>,
    }

    impl Codec for StringifyWholeCodec {
        fn name(&self) -> &str {
            "stringify"
        }
        fn decode(&self, input: &Value) -> DispatchResult<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Value::scalar(input.to_string()))
        }
        fn encode(&self, input: &Value) -> DispatchResult<Value> {
            self.decode(input)
        }
        fn whole_input_only(&self) -> bool {
            true
        }
    }

    #[test]
    fn decode_chain_hands_a_whole_input_codec_the_entire_tree_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let codec_calls = calls.clone();
        let factory: CodecFactory = Arc::new(move || {
            Box::new(StringifyWholeCodec {
                calls: codec_calls.clone(),
            }) as Box<dyn Codec>
        });
        let tree = deep_tree();
        let out = run_chain(&[factory], Direction::Decode, &tree).unwrap();
        assert_eq!(out, Value::scalar(tree.to_string()));
        // One call over the whole tree, not one per node.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_chain_is_identity() {
        let tree = deep_tree();
        assert_eq!(
            run_chain(&[], Direction::Encode, &tree).unwrap(),
            tree
        );
    }
}
