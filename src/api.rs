//! HTTP transport for the ledger.
//!
//! Thin adapter exposing the four ledger operations as REST endpoints. All
//! validation of request envelopes (missing fields) happens here, before any
//! core operation runs; core errors are mapped to client rejections without
//! partial state changes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::chain::{Block, Ledger, ProofOfWork};
use crate::config::Config;
use crate::error::Error;
use crate::logger::Logger;
use crate::tx::Amount;

/// Shared node state handed to every request handler.
///
/// A single lock guards `chain` and `pending` jointly: mining holds the write
/// guard across read-last-block, build, append, and reward queueing, so no two
/// block creations can interleave.
pub struct Node {
    ledger: RwLock<Ledger>,
    pow: ProofOfWork,
    enforce_proof: bool,
    node_id: String,
}

impl Node {
    pub fn new(pow: ProofOfWork, enforce_proof: bool) -> Self {
        Node {
            ledger: RwLock::new(Ledger::new()),
            pow,
            enforce_proof,
            node_id: Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }
}

#[derive(Debug)]
pub enum ApiError {
    Ledger(Error),
    BadProof,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Ledger(e @ Error::InvalidAmount(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Ledger(e @ Error::MissingField(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Ledger(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::BadProof => (StatusCode::BAD_REQUEST, "Bad Proof".to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Ledger(err)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Deserialize)]
struct NewTransactionRequest {
    sender: Option<String>,
    recipient: Option<String>,
    amount: Option<Amount>,
}

#[derive(Serialize)]
struct NewTransactionResponse {
    message: String,
    index: usize,
    transaction_id: String,
}

#[derive(Deserialize)]
struct MineRequest {
    proof: Option<u64>,
    id: Option<String>,
}

#[derive(Serialize)]
struct MineResponse {
    status: String,
    block: Block,
    reward: String,
}

#[derive(Serialize)]
struct ChainResponse {
    length: usize,
    chain: Vec<Block>,
}

#[derive(Serialize)]
struct LastBlockResponse {
    last_block: Block,
}

fn require<T>(field: Option<T>, name: &str) -> Result<T, ApiError> {
    field.ok_or_else(|| ApiError::Ledger(Error::MissingField(name.to_string())))
}

pub fn build_router(node: Arc<Node>) -> Router {
    Router::new()
        .route("/mine", post(mine))
        .route("/transactions/new", post(new_transaction))
        .route("/chain", get(full_chain))
        .route("/last_block", get(last_block))
        .route("/health", get(health_check))
        .with_state(node)
}

/// Run the HTTP node until the process exits.
pub async fn serve(config: &Config) -> crate::error::Result<()> {
    let node = Arc::new(Node::new(
        ProofOfWork::new(config.difficulty),
        config.enforce_proof,
    ));
    Logger::info(&format!("Node identifier: {}", node.node_id()));

    let app = build_router(node);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    Logger::info(&format!("Listening on http://{}", addr));

    axum::serve(listener, app).await?;
    Ok(())
}

async fn new_transaction(
    State(node): State<Arc<Node>>,
    Json(req): Json<NewTransactionRequest>,
) -> Result<Json<NewTransactionResponse>, ApiError> {
    let sender = require(req.sender, "sender")?;
    let recipient = require(req.recipient, "recipient")?;
    let amount = require(req.amount, "amount")?;

    let mut ledger = node.ledger.write().await;
    let receipt = ledger.queue_transaction(&sender, &recipient, amount)?;

    Ok(Json(NewTransactionResponse {
        message: format!("Transaction will be included in block {}", receipt.index),
        index: receipt.index,
        transaction_id: receipt.id,
    }))
}

async fn mine(
    State(node): State<Arc<Node>>,
    Json(req): Json<MineRequest>,
) -> Result<Json<MineResponse>, ApiError> {
    let proof = require(req.proof, "proof")?;
    let recipient = require(req.id, "id")?;

    let mut ledger = node.ledger.write().await;

    let (block_string, previous_hash) = {
        let last = ledger.last_block()?;
        (last.canonical_json()?, last.compute_hash()?)
    };

    if node.enforce_proof && !node.pow.valid_proof(&block_string, proof) {
        return Err(ApiError::BadProof);
    }

    let block = ledger.create_block(proof, Some(previous_hash))?;
    let receipt = ledger.queue_transaction("0", &recipient, Amount::from(1.0))?;

    Ok(Json(MineResponse {
        status: "SUCCESS".to_string(),
        block,
        reward: format!("Reward amount: {} qoins", receipt.index),
    }))
}

async fn full_chain(State(node): State<Arc<Node>>) -> Json<ChainResponse> {
    let ledger = node.ledger.read().await;
    Json(ChainResponse {
        length: ledger.len(),
        chain: ledger.chain().to_vec(),
    })
}

async fn last_block(
    State(node): State<Arc<Node>>,
) -> Result<Json<LastBlockResponse>, ApiError> {
    let ledger = node.ledger.read().await;
    let block = ledger.last_block()?.clone();
    Ok(Json(LastBlockResponse { last_block: block }))
}

async fn health_check(State(node): State<Arc<Node>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "node_id": node.node_id(),
        "timestamp": crate::current_timestamp(),
    }))
}
