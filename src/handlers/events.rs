use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::events::hub::Topic;
use crate::events::protocol::{ClientMessage, ServerMessage};
use crate::lifecycle::service::RepairService;

/// Query params for the WebSocket handshake endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Watch one repair; omit to watch every repair.
    pub repair_id: Option<i32>,
}

/// GET /api/events/ws?repair_id=<id>
///
/// Upgrades the HTTP connection to a WebSocket that receives repair events.
/// A detail view passes the repair id and gets the current view straight
/// away; a list view omits it.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    query: web::Query<WsQuery>,
    service: web::Data<Arc<RepairService>>,
) -> Result<HttpResponse, actix_web::Error> {
    let topic = match query.repair_id {
        Some(id) => {
            // Reject unknown ids before upgrading.
            service
                .load(id)
                .await
                .map_err(crate::error::AppError::from)?;
            Topic::Repair(id)
        }
        None => Topic::AllRepairs,
    };

    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    let (subscriber_id, rx) = service.events().subscribe(topic).await;
    tracing::debug!(%subscriber_id, ?topic, "event subscriber connected");

    actix_web::rt::spawn(handle_ws_session(
        session,
        msg_stream,
        rx,
        topic,
        subscriber_id,
        service.get_ref().clone(),
    ));

    Ok(response)
}

/// Drives the WebSocket session: answers client requests, forwards hub
/// events, and unsubscribes on disconnect.
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    topic: Topic,
    subscriber_id: uuid::Uuid,
    service: Arc<RepairService>,
) {
    if let Topic::Repair(id) = topic {
        send_current(&mut session, &service, id).await;
    }

    loop {
        tokio::select! {
            // Incoming message from the WebSocket client.
            msg = msg_stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_message(&text, &mut session, topic, &service).await;
                    }
                    Some(Ok(Message::Ping(bytes))) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    // A stream that ends without a Close frame is a dropped client.
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            // Outgoing event from the hub to this client.
            Some(server_msg) = rx.recv() => {
                if send(&mut session, &server_msg).await.is_err() {
                    break;
                }
            }
            else => break,
        }
    }

    service.events().unsubscribe(topic, subscriber_id).await;
    tracing::debug!(%subscriber_id, "event subscriber disconnected");
    let _ = session.close(None).await;
}

async fn send(
    session: &mut actix_ws::Session,
    message: &ServerMessage,
) -> Result<(), actix_ws::Closed> {
    match serde_json::to_string(message) {
        Ok(json) => session.text(json).await,
        Err(_) => Ok(()),
    }
}

async fn send_current(session: &mut actix_ws::Session, service: &RepairService, id: i32) {
    let message = match service.view(id).await {
        Ok(view) => ServerMessage::RepairUpdated {
            repair: Box::new(view),
        },
        Err(e) => ServerMessage::Error {
            message: e.to_string(),
        },
    };
    let _ = send(session, &message).await;
}

/// Parse and handle an incoming client message.
async fn handle_client_message(
    text: &str,
    session: &mut actix_ws::Session,
    topic: Topic,
    service: &RepairService,
) {
    let client_msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            let err = ServerMessage::Error {
                message: format!("Invalid message format: {e}"),
            };
            let _ = send(session, &err).await;
            return;
        }
    };

    match client_msg {
        ClientMessage::Refresh => match topic {
            Topic::Repair(id) => send_current(session, service, id).await,
            Topic::AllRepairs => {
                let err = ServerMessage::Error {
                    message: "Refresh needs a repair_id subscription".to_string(),
                };
                let _ = send(session, &err).await;
            }
        },
        ClientMessage::Ping => {
            let _ = send(session, &ServerMessage::Pong).await;
        }
    }
}
