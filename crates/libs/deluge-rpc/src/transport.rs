use std::collections::BTreeMap;

use async_trait::async_trait;
use rmpv::Value;

use crate::envelope::Response;
use crate::error::TransportError;
use crate::value::{text, text_list};

/// Ordered positional arguments of one call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: Value) -> Self {
        self.0.push(value);
        self
    }

    pub fn text(self, value: &str) -> Self {
        self.value(text(value))
    }

    pub fn flag(self, value: bool) -> Self {
        self.value(Value::from(value))
    }

    pub fn ids<S: AsRef<str>>(self, ids: &[S]) -> Self {
        self.value(text_list(ids))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

/// Named options of one call, kept in key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Kwargs(BTreeMap<String, Value>);

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wire form: a dictionary with string keys in key order.
    pub fn to_value(&self) -> Value {
        Value::Map(self.0.iter().map(|(key, value)| (text(key), value.clone())).collect())
    }
}

/// Carries one method invocation to the daemon and returns its reply.
///
/// Connection setup, authentication and framing are the implementation's
/// concern. Implementations are shared between tasks, so any serialisation of
/// concurrent calls over a single connection happens here, not in the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        args: Args,
        kwargs: Kwargs,
    ) -> Result<Response, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_keep_insertion_order() {
        let args = Args::new().text("hash").flag(true).ids(&["a", "b"]);
        assert_eq!(args.len(), 3);
        assert_eq!(
            args.into_vec(),
            vec![
                Value::from("hash"),
                Value::from(true),
                Value::Array(vec![Value::from("a"), Value::from("b")]),
            ]
        );
    }

    #[test]
    fn kwargs_serialise_in_key_order() {
        let kwargs = Kwargs::new().insert("zeta", Value::from(1)).insert("alpha", Value::from(2));
        assert_eq!(
            kwargs.to_value(),
            Value::Map(vec![
                (Value::from("alpha"), Value::from(2)),
                (Value::from("zeta"), Value::from(1)),
            ])
        );
    }
}
