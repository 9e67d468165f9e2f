//! Declarative request pipeline.
//!
//! Each exposed method is a [`MethodSpec`]: an ordered list of named
//! argument decoders, a handler, and an optional result encoder. Binding
//! runs the decoders in declaration order and aborts on the first failure,
//! so the handler never observes a partially-decoded argument set.
//! Arguments the method does not declare pass through as raw JSON.

use std::sync::Arc;

use futures::future::BoxFuture;
use jsonrpsee::types::Params;
use serde_json::Value;

use braid_core::types::{Address, Branch, Quantity};

use crate::codec::BlockId;
use crate::error::{CodecError, GatewayError};
use crate::server::GatewayState;

// ── Decoded argument values ──────────────────────────────────────────────────

/// A decoded argument or result value flowing through the pipeline.
#[derive(Clone, Debug)]
pub enum ArgValue {
    /// Undeclared pass-through, or a value the handler encodes itself.
    Json(Value),
    Quantity(Quantity),
    Data(Vec<u8>),
    Address(Address),
    Branch(Branch),
    Block(BlockId),
    Bool(bool),
}

pub type DecodeFn = fn(&Value) -> Result<ArgValue, CodecError>;
pub type EncodeFn = fn(ArgValue) -> Result<Value, CodecError>;
pub type HandlerFn =
    fn(Arc<GatewayState>, Args) -> BoxFuture<'static, Result<ArgValue, GatewayError>>;

/// One declared argument: its name, its decoder, and the value used when
/// the caller omits it. No default means the argument is required.
pub struct ParamSpec {
    pub name: &'static str,
    pub decode: DecodeFn,
    pub default: Option<ArgValue>,
}

/// A fully-described method: the registry entry the server binds by name.
pub struct MethodSpec {
    pub name: &'static str,
    pub params: Vec<ParamSpec>,
    pub encode_result: Option<EncodeFn>,
    pub handler: HandlerFn,
}

// ── Bound arguments ──────────────────────────────────────────────────────────

/// The decoded argument set handed to a handler. Getters are typed; asking
/// for a name or type the registry never produced is a programmer error.
#[derive(Debug, Default)]
pub struct Args {
    values: Vec<(String, ArgValue)>,
}

impl Args {
    pub(crate) fn from_values(values: Vec<(String, ArgValue)>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn quantity(&self, name: &str) -> Result<Quantity, GatewayError> {
        match self.get(name) {
            Some(ArgValue::Quantity(q)) => Ok(*q),
            other => Err(mismatch(name, "a quantity", other)),
        }
    }

    pub fn data(&self, name: &str) -> Result<Vec<u8>, GatewayError> {
        match self.get(name) {
            Some(ArgValue::Data(b)) => Ok(b.clone()),
            other => Err(mismatch(name, "data", other)),
        }
    }

    pub fn address(&self, name: &str) -> Result<Address, GatewayError> {
        match self.get(name) {
            Some(ArgValue::Address(a)) => Ok(*a),
            other => Err(mismatch(name, "an address", other)),
        }
    }

    pub fn branch(&self, name: &str) -> Result<Branch, GatewayError> {
        match self.get(name) {
            Some(ArgValue::Branch(b)) => Ok(*b),
            other => Err(mismatch(name, "a branch", other)),
        }
    }

    pub fn block(&self, name: &str) -> Result<BlockId, GatewayError> {
        match self.get(name) {
            Some(ArgValue::Block(b)) => Ok(*b),
            other => Err(mismatch(name, "a block id", other)),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool, GatewayError> {
        match self.get(name) {
            Some(ArgValue::Bool(b)) => Ok(*b),
            other => Err(mismatch(name, "a boolean", other)),
        }
    }

    pub fn json(&self, name: &str) -> Result<Value, GatewayError> {
        match self.get(name) {
            Some(ArgValue::Json(v)) => Ok(v.clone()),
            other => Err(mismatch(name, "raw JSON", other)),
        }
    }
}

fn mismatch(name: &str, expected: &str, got: Option<&ArgValue>) -> GatewayError {
    CodecError::Precondition(format!(
        "argument {name} is not {expected} (got {got:?})"
    ))
    .into()
}

// ── Binding and dispatch ─────────────────────────────────────────────────────

/// Bind raw JSON-RPC params (positional array or named object) against the
/// method's declared parameters.
pub(crate) fn bind_params(spec: &MethodSpec, raw: &Value) -> Result<Args, GatewayError> {
    let mut values = Vec::new();
    match raw {
        Value::Array(items) => {
            for (i, p) in spec.params.iter().enumerate() {
                let value = match items.get(i) {
                    Some(v) => (p.decode)(v)?,
                    None => default_or_missing(p)?,
                };
                values.push((p.name.to_string(), value));
            }
            for (i, extra) in items.iter().enumerate().skip(spec.params.len()) {
                values.push((format!("arg{i}"), ArgValue::Json(extra.clone())));
            }
        }
        Value::Object(map) => {
            for p in &spec.params {
                let value = match map.get(p.name) {
                    Some(v) => (p.decode)(v)?,
                    None => default_or_missing(p)?,
                };
                values.push((p.name.to_string(), value));
            }
            for (key, value) in map {
                if spec.params.iter().all(|p| p.name != key) {
                    values.push((key.clone(), ArgValue::Json(value.clone())));
                }
            }
        }
        Value::Null => {
            for p in &spec.params {
                values.push((p.name.to_string(), default_or_missing(p)?));
            }
        }
        _ => {
            return Err(
                CodecError::InvalidParams("Parameters must be an array or an object".into())
                    .into(),
            )
        }
    }
    Ok(Args::from_values(values))
}

fn default_or_missing(p: &ParamSpec) -> Result<ArgValue, GatewayError> {
    p.default
        .clone()
        .ok_or_else(|| CodecError::InvalidParams(format!("Missing {}", p.name)).into())
}

/// Run one request through the full pipeline: bind, invoke, encode.
pub(crate) async fn dispatch(
    spec: &MethodSpec,
    params: Params<'static>,
    state: Arc<GatewayState>,
) -> Result<Value, GatewayError> {
    let raw: Value = params
        .parse()
        .map_err(|e| CodecError::InvalidParams(e.message().to_string()))?;
    let args = bind_params(spec, &raw)?;
    let out = (spec.handler)(state, args).await?;
    match spec.encode_result {
        Some(encode) => Ok(encode(out)?),
        None => match out {
            ArgValue::Json(v) => Ok(v),
            other => Err(CodecError::Precondition(format!(
                "handler for {} returned an unencoded value: {other:?}",
                spec.name
            ))
            .into()),
        },
    }
}
