use std::net::SocketAddr;
use std::sync::Arc;

use futures::future::BoxFuture;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;
use serde_json::{json, Value};
use tracing::info;

use braid_core::types::Quantity;

use crate::codec::{self, BlockId};
use crate::error::{CodecError, GatewayError};
use crate::master::MasterClient;
use crate::pipeline::{self, ArgValue, Args, MethodSpec, ParamSpec};
use crate::tx_build;

/// Shared state passed to every handler. Immutable for the lifetime of the
/// server; the master connection is the only capability handlers reach for.
#[derive(Clone, Default)]
pub struct GatewayState {
    /// Optional connection to the master service executing transactions.
    pub master: Option<Arc<dyn MasterClient>>,
}

impl GatewayState {
    pub fn new(master: Option<Arc<dyn MasterClient>>) -> Self {
        Self { master }
    }

    pub(crate) fn master(&self) -> Result<Arc<dyn MasterClient>, GatewayError> {
        self.master.clone().ok_or(GatewayError::MasterUnavailable)
    }
}

/// The JSON-RPC gateway server: a registry of pipelined method entries
/// bound to the jsonrpsee transport.
pub struct RpcServer {
    state: GatewayState,
    registry: Vec<MethodSpec>,
}

impl RpcServer {
    /// Build the server and its method registry.
    pub fn new(state: GatewayState) -> Self {
        Self {
            state,
            registry: registry(),
        }
    }

    /// Register every method entry on a jsonrpsee module.
    pub fn into_module(self) -> anyhow::Result<RpcModule<GatewayState>> {
        let mut module = RpcModule::new(self.state);
        for spec in self.registry {
            let spec = Arc::new(spec);
            let name = spec.name;
            module.register_async_method(name, move |params, state, _| {
                let spec = Arc::clone(&spec);
                async move {
                    pipeline::dispatch(&spec, params, state)
                        .await
                        .map_err(ErrorObjectOwned::from)
                }
            })?;
        }
        Ok(module)
    }

    /// Start the JSON-RPC server on `addr`. Returns a handle to stop it.
    pub async fn start(self, addr: SocketAddr) -> anyhow::Result<ServerHandle> {
        let server = Server::builder().build(addr).await?;
        let module = self.into_module()?;
        let handle = server.start(module);
        info!(%addr, "JSON-RPC gateway started");
        Ok(handle)
    }
}

/// The method table: every exposed method with its argument decoders and
/// result encoder. Built once per server.
fn registry() -> Vec<MethodSpec> {
    vec![
        MethodSpec {
            name: "echo",
            params: vec![ParamSpec {
                name: "data",
                decode: dec_data,
                default: None,
            }],
            encode_result: Some(enc_data),
            handler: echo,
        },
        MethodSpec {
            name: "getTransactionCount",
            params: vec![
                ParamSpec {
                    name: "address",
                    decode: dec_address,
                    default: None,
                },
                ParamSpec {
                    name: "blockId",
                    decode: dec_block_id,
                    default: Some(ArgValue::Block(BlockId::Pending)),
                },
            ],
            encode_result: None,
            handler: get_transaction_count,
        },
        MethodSpec {
            name: "sendTransaction",
            params: vec![ParamSpec {
                name: "data",
                decode: dec_raw,
                default: None,
            }],
            encode_result: None,
            handler: tx_build::send_transaction,
        },
    ]
}

// ── Decoder / encoder adapters ───────────────────────────────────────────────

fn dec_data(v: &Value) -> Result<ArgValue, CodecError> {
    codec::decode_data(v).map(ArgValue::Data)
}

fn dec_address(v: &Value) -> Result<ArgValue, CodecError> {
    codec::decode_address(v).map(ArgValue::Address)
}

fn dec_block_id(v: &Value) -> Result<ArgValue, CodecError> {
    codec::decode_block_id(v).map(ArgValue::Block)
}

fn dec_raw(v: &Value) -> Result<ArgValue, CodecError> {
    Ok(ArgValue::Json(v.clone()))
}

fn enc_data(out: ArgValue) -> Result<Value, CodecError> {
    match out {
        ArgValue::Data(bytes) => Ok(Value::String(codec::encode_data(&bytes, None))),
        other => Err(CodecError::Precondition(format!(
            "result is not data: {other:?}"
        ))),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

fn echo(
    _state: Arc<GatewayState>,
    args: Args,
) -> BoxFuture<'static, Result<ArgValue, GatewayError>> {
    Box::pin(async move { Ok(ArgValue::Data(args.data("data")?)) })
}

fn get_transaction_count(
    state: Arc<GatewayState>,
    args: Args,
) -> BoxFuture<'static, Result<ArgValue, GatewayError>> {
    Box::pin(async move {
        let address = args.address("address")?;
        // Validated but unused: the master resolves counts on the pending
        // state regardless of the requested block.
        let _block_id = args.block("blockId")?;

        let (branch, count) = state.master()?.get_transaction_count(address).await?;
        Ok(ArgValue::Json(json!({
            "branch": codec::encode_branch(&branch),
            "count": codec::encode_quantity(Quantity::from(count)),
        })))
    })
}
