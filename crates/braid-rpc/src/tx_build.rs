//! The `sendTransaction` handler: field extraction, validation, and
//! construction of a signed transaction from a loosely-typed parameter
//! object.

use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::{Map, Value};
use tracing::debug;

use braid_core::constants::{DEFAULT_GAS_PRICE, DEFAULT_START_GAS, WITHDRAW_SIGN};
use braid_core::{Branch, Transaction, WireSerialize};

use crate::codec;
use crate::error::{CodecError, GatewayError};
use crate::pipeline::{ArgValue, Args};
use crate::server::GatewayState;

/// Key aliases for the gas limit field, first match wins.
const GAS_KEYS: [&str; 2] = ["gas", "startgas"];

/// Key aliases for the gas price field, first match wins.
const GAS_PRICE_KEYS: [&str; 2] = ["gasPrice", "gasprice"];

pub(crate) fn send_transaction(
    state: Arc<GatewayState>,
    args: Args,
) -> BoxFuture<'static, Result<ArgValue, GatewayError>> {
    Box::pin(async move {
        let raw = args.json("data")?;
        let Value::Object(fields) = raw else {
            return Err(
                CodecError::InvalidParams("Transaction must be an object".into()).into(),
            );
        };

        let (tx, branch) = build_transaction(&fields)?;
        let hash = tx.hash();

        state.master()?.add_tx(tx, branch).await?;
        debug!(tx = %hash, %branch, "transaction accepted for submission");

        Ok(ArgValue::Json(Value::String(codec::encode_data(
            hash.as_bytes(),
            None,
        ))))
    })
}

/// Decode and validate the raw field map into a submission-ready
/// transaction and its target branch.
///
/// Required: `nonce`, `branch`, non-zero `v`/`r`/`s`, and `withdrawTo`
/// whenever `withdraw` is positive. Everything else falls back to the
/// protocol defaults.
pub fn build_transaction(
    fields: &Map<String, Value>,
) -> Result<(Transaction, Branch), CodecError> {
    let to = decode_field(fields, &["to"], codec::decode_address)?;
    let start_gas =
        decode_field(fields, &GAS_KEYS, codec::decode_quantity)?.unwrap_or(DEFAULT_START_GAS);
    let gas_price =
        decode_field(fields, &GAS_PRICE_KEYS, codec::decode_quantity)?.unwrap_or(DEFAULT_GAS_PRICE);
    let value = decode_field(fields, &["value"], codec::decode_quantity)?.unwrap_or(0);
    let data = decode_field(fields, &["data"], codec::decode_data)?.unwrap_or_default();
    let v = decode_field(fields, &["v"], codec::decode_quantity)?.unwrap_or(0);
    let r = decode_field(fields, &["r"], codec::decode_quantity)?.unwrap_or(0);
    let s = decode_field(fields, &["s"], codec::decode_quantity)?.unwrap_or(0);
    let nonce = decode_field(fields, &["nonce"], codec::decode_quantity)?;
    let branch = decode_field(fields, &["branch"], codec::decode_branch)?;
    let withdraw = decode_field(fields, &["withdraw"], codec::decode_quantity)?.unwrap_or(0);
    let withdraw_to = decode_field(fields, &["withdrawTo"], codec::decode_address)?;

    let Some(nonce) = nonce else {
        return Err(CodecError::InvalidParams("Missing nonce".into()));
    };
    if v == 0 || r == 0 || s == 0 {
        return Err(CodecError::InvalidParams("Missing v, r, s".into()));
    }
    let Some(branch) = branch else {
        return Err(CodecError::InvalidParams("Missing branch".into()));
    };
    if withdraw > 0 && withdraw_to.is_none() {
        return Err(CodecError::InvalidParams("Missing withdrawTo".into()));
    }

    let tx = Transaction {
        nonce,
        gas_price,
        start_gas,
        to: to.map(|a| a.recipient),
        value,
        data,
        v,
        r,
        s,
        branch_value: branch.value(),
        withdraw,
        withdraw_sign: WITHDRAW_SIGN,
        withdraw_to: withdraw_to
            .map(|a| a.to_wire_bytes())
            .unwrap_or_default(),
    };
    Ok((tx, branch))
}

/// Look the field up under each alias in priority order, decoding the first
/// key present. Absent fields are not an error here.
fn decode_field<T>(
    fields: &Map<String, Value>,
    keys: &[&str],
    decode: impl Fn(&Value) -> Result<T, CodecError>,
) -> Result<Option<T>, CodecError> {
    for key in keys {
        if let Some(value) = fields.get(*key) {
            return decode(value).map(Some);
        }
    }
    Ok(None)
}
