use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::error::ServiceError;
use crate::application::use_cases::tickets::book_ticket::{BookTicket, BookTicketRequest as BookDto};
use crate::application::use_cases::tickets::get_ticket::GetTicket;
use crate::application::use_cases::tickets::list_tickets::ListTickets;
use crate::application::use_cases::tickets::validate_ticket::ValidateTicket;
use crate::bootstrap::app_context::AppContext;
use crate::domain::tickets::ticket::Ticket;
use crate::presentation::http::auth::Authenticated;
use crate::presentation::http::response::{
    ApiError, ErrorBody, JsonBody, ListParams, OK, PathId, QueryParams, failed,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketView {
    pub id: Uuid,
    pub user: Uuid,
    pub train: Uuid,
    pub validated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketView {
    fn from(t: Ticket) -> Self {
        Self {
            id: t.id,
            user: t.user_id,
            train: t.train_id,
            validated_at: t.validated_at,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketResponse {
    pub error: u8,
    pub message: String,
    pub ticket: TicketView,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketListResponse {
    pub error: u8,
    pub message: String,
    pub tickets: Vec<TicketView>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookTicketRequest {
    /// Passenger; the caller when omitted. Requires employee otherwise.
    pub user: Option<Uuid>,
    pub train: Option<Uuid>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/book", post(book_ticket))
        .route("/get", post(list_tickets))
        .route("/get/:id", post(get_ticket))
        .route("/validate/:id", post(validate_ticket))
        .with_state(ctx)
}

fn ticket_response(status: StatusCode, message: &str, ticket: Ticket) -> (StatusCode, Json<TicketResponse>) {
    (
        status,
        Json(TicketResponse {
            error: OK,
            message: message.to_string(),
            ticket: ticket.into(),
        }),
    )
}

#[utoipa::path(post, path = "/tickets/book", tag = "Tickets", request_body = BookTicketRequest, responses(
    (status = 201, body = TicketResponse),
    (status = 403, body = ErrorBody),
    (status = 404, body = ErrorBody)
))]
pub async fn book_ticket(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    JsonBody(req): JsonBody<BookTicketRequest>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let train = req.train.ok_or_else(|| {
        ApiError::from_service(
            ServiceError::validation("`train` is required"),
            "booking the ticket",
        )
    })?;
    let users = ctx.user_repo();
    let trains = ctx.train_repo();
    let tickets = ctx.ticket_repo();
    let uc = BookTicket {
        users: users.as_ref(),
        trains: trains.as_ref(),
        tickets: tickets.as_ref(),
    };
    let ticket = uc
        .execute(
            &actor,
            &BookDto {
                user: req.user,
                train,
            },
        )
        .await
        .map_err(failed("booking the ticket"))?;
    Ok(ticket_response(StatusCode::CREATED, "Ticket booked !", ticket))
}

#[utoipa::path(post, path = "/tickets/get", tag = "Tickets", params(ListParams), responses(
    (status = 202, body = TicketListResponse),
    (status = 403, body = ErrorBody)
))]
pub async fn list_tickets(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<(StatusCode, Json<TicketListResponse>), ApiError> {
    let users = ctx.user_repo();
    let tickets = ctx.ticket_repo();
    let uc = ListTickets {
        users: users.as_ref(),
        tickets: tickets.as_ref(),
    };
    let items = uc
        .execute(&actor, &params.to_query())
        .await
        .map_err(failed("getting tickets"))?;
    Ok((
        StatusCode::ACCEPTED,
        Json(TicketListResponse {
            error: OK,
            message: "Tickets found !".into(),
            tickets: items.into_iter().map(TicketView::from).collect(),
        }),
    ))
}

#[utoipa::path(post, path = "/tickets/get/{id}", tag = "Tickets",
    params(("id" = Uuid, Path, description = "Ticket id")),
    responses((status = 202, body = TicketResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn get_ticket(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let users = ctx.user_repo();
    let tickets = ctx.ticket_repo();
    let uc = GetTicket {
        users: users.as_ref(),
        tickets: tickets.as_ref(),
    };
    let ticket = uc
        .execute(&actor, id)
        .await
        .map_err(failed("getting the ticket"))?;
    Ok(ticket_response(StatusCode::ACCEPTED, "Ticket found !", ticket))
}

#[utoipa::path(post, path = "/tickets/validate/{id}", tag = "Tickets",
    params(("id" = Uuid, Path, description = "Ticket id")),
    responses((status = 202, body = TicketResponse), (status = 403, body = ErrorBody), (status = 404, body = ErrorBody)))]
pub async fn validate_ticket(
    State(ctx): State<AppContext>,
    Authenticated(actor): Authenticated,
    PathId(id): PathId<Uuid>,
) -> Result<(StatusCode, Json<TicketResponse>), ApiError> {
    let users = ctx.user_repo();
    let tickets = ctx.ticket_repo();
    let uc = ValidateTicket {
        users: users.as_ref(),
        tickets: tickets.as_ref(),
    };
    let ticket = uc
        .execute(&actor, id)
        .await
        .map_err(failed("validating the ticket"))?;
    Ok(ticket_response(StatusCode::ACCEPTED, "Ticket validated !", ticket))
}
