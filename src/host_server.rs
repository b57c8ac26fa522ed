//! Quick Define host: newline-delimited JSON over stdin/stdout.
//!
//! Protocol: one JSON object per line.
//! Request:  {"id":1, "method":"runtime.message", "params":{"action":"searchWord","word":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! A single actor task owns the `App`; the stdin reader forwards each request
//! over a channel and waits for the reply, so settings writes never interleave.

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot};

use quickdefine::app::App;
use quickdefine::config::{init_tracing, HostConfig};
use quickdefine::rpc_handler::handle_method;

const REQUEST_QUEUE_DEPTH: usize = 64;

struct Request {
    method: String,
    params: Value,
    reply: oneshot::Sender<Result<Value, String>>,
}

async fn run_actor(mut app: App, mut requests: mpsc::Receiver<Request>) {
    app.startup();
    while let Some(request) = requests.recv().await {
        let result = handle_method(&mut app, &request.method, &request.params);
        if let Err(e) = &result {
            tracing::debug!(method = %request.method, error = %e, "request failed");
        }
        // The reader may have gone away; nothing to do then.
        let _ = request.reply.send(result);
    }
    tracing::info!("request channel closed; actor stopping");
}

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> io::Result<()> {
    let mut line = value.to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = HostConfig::from_env();
    init_tracing(&config);

    let db_path = config.database_path();
    tracing::info!(path = %db_path.display(), "opening settings database");
    let app = App::new(&db_path)?;

    let (tx, rx) = mpsc::channel::<Request>(REQUEST_QUEUE_DEPTH);
    let actor = tokio::spawn(run_actor(app, rx));

    let mut stdout = io::stdout();
    write_line(
        &mut stdout,
        &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}),
    )
    .await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_line(&mut stdout, &json!({"id": null, "error": format!("parse error: {}", e)})).await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("").to_string();
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let (reply_tx, reply_rx) = oneshot::channel();
        let request = Request {
            method,
            params,
            reply: reply_tx,
        };
        if tx.send(request).await.is_err() {
            tracing::error!("actor stopped; shutting down");
            break;
        }

        let response = match reply_rx.await {
            Ok(Ok(val)) => json!({"id": id, "result": val}),
            Ok(Err(err)) => json!({"id": id, "error": err}),
            Err(_) => json!({"id": id, "error": "request dropped"}),
        };
        write_line(&mut stdout, &response).await?;
    }

    drop(tx);
    if let Err(e) = actor.await {
        tracing::error!(error = %e, "actor task panicked");
    }
    Ok(())
}
