use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
};
use futures_util::{SinkExt, StreamExt};
use log::{error, info, warn};
use watchparty_collab::ClientEvent;

use crate::{context::ServerContext, Router};

async fn gateway(ws: WebSocketUpgrade, State(context): State<ServerContext>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, context))
}

/// Pumps events between one websocket and its session until either side closes.
async fn handle_socket(socket: WebSocket, context: ServerContext) {
    let mut connection = context.collab.connect();
    let session = connection.id();
    let (mut sender, mut receiver) = socket.split();

    info!("Gateway opened for session {}", session);

    // Owns the connection, so the session is dropped along with this task
    let outgoing = tokio::spawn(async move {
        while let Some(event) = connection.next().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!("Could not serialize {:?}: {}", event, e);
                    continue;
                }
            };

            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => context.collab.handle(session, event),
                Err(e) => warn!("Ignored malformed event from session {}: {}", session, e),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Gateway error for session {}: {}", session, e);
                break;
            }
        }
    }

    outgoing.abort();
    info!("Gateway closed for session {}", session);
}

pub fn router() -> Router {
    Router::new().route("/", get(gateway))
}
