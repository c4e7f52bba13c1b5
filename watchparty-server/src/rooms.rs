use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json,
};

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{EnqueueSchema, ValidatedJson},
    serialized::{CreatedRoom, RoomInfo, Success},
    Router,
};

async fn create_room(State(context): State<ServerContext>) -> Json<CreatedRoom> {
    let room = context.collab.rooms.create_room();

    Json(CreatedRoom {
        room_id: room.id().clone(),
    })
}

async fn room(State(context): State<ServerContext>, Path(id): Path<String>) -> Json<RoomInfo> {
    let room = context.collab.rooms.room_by_id(&id).ok().map(|r| r.data());

    Json(room.into())
}

async fn add_to_queue(
    State(context): State<ServerContext>,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<EnqueueSchema>,
) -> ServerResult<Json<Success>> {
    let room = context.collab.rooms.room_by_id(&id)?;
    room.enqueue(&body.video_id)?;

    Ok(Json(Success::new()))
}

async fn remove_from_queue(
    State(context): State<ServerContext>,
    Path((id, media_ref)): Path<(String, String)>,
) -> ServerResult<Json<Success>> {
    let room = context.collab.rooms.room_by_id(&id)?;
    room.remove(&media_ref)?;

    Ok(Json(Success::new()))
}

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_room))
        .route("/:id", get(room))
        .route("/:id/queue", post(add_to_queue))
        .route("/:id/queue/:media_ref", delete(remove_from_queue))
}
