use super::{TicketsService, TicketsServiceConfig};
use crate::{
    dto::{input, output},
    error::Error,
    repository::{self, TicketsRepository},
    service::qr_code_service::QrCodeService,
};
use axum::async_trait;
use std::sync::Arc;
use uuid::Uuid;

const VATIN_LEN: usize = 11;

pub struct TicketsServiceImpl {
    config: TicketsServiceConfig,
    repository: Arc<dyn TicketsRepository>,
    qr_code_service: Arc<dyn QrCodeService>,
}

impl TicketsServiceImpl {
    pub fn new(
        config: TicketsServiceConfig,
        repository: Arc<dyn TicketsRepository>,
        qr_code_service: Arc<dyn QrCodeService>,
    ) -> Self {
        Self {
            config,
            repository,
            qr_code_service,
        }
    }

    fn validate_create_ticket(ticket: &input::Ticket) -> Result<(), Error> {
        Self::validate_fields_present(ticket)?;
        Self::validate_vatin_format(&ticket.vatin)?;

        Ok(())
    }

    fn validate_fields_present(ticket: &input::Ticket) -> Result<(), Error> {
        let any_empty = [&ticket.vatin, &ticket.first_name, &ticket.last_name]
            .into_iter()
            .any(|field| field.trim().is_empty());

        match any_empty {
            true => Err(Error::Validation("missing field")),
            false => Ok(()),
        }
    }

    fn validate_vatin_format(vatin: &str) -> Result<(), Error> {
        let valid = vatin.len() == VATIN_LEN && vatin.bytes().all(|byte| byte.is_ascii_digit());

        match valid {
            true => Ok(()),
            false => Err(Error::Validation("bad vatin format")),
        }
    }

    fn ticket_url(&self, id: Uuid) -> String {
        format!("{}/ticket/{id}", self.config.public_base_url)
    }
}

#[async_trait]
impl TicketsService for TicketsServiceImpl {
    async fn create_ticket(&self, ticket: input::Ticket) -> Result<output::CreatedTicket, Error> {
        tracing::info!("creating ticket");
        tracing::trace!(?ticket);

        Self::validate_create_ticket(&ticket)?;

        let input::Ticket {
            vatin,
            first_name,
            last_name,
        } = ticket;
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let max = self.config.max_tickets_per_vatin;

        let count = self.repository.count_by_vatin(&vatin).await?;
        if count >= max {
            return Err(Error::QuotaExceeded { max });
        }

        let id = Uuid::new_v4();
        let inserted_ticket = self
            .repository
            .insert(id, &vatin, first_name, last_name, max)
            .await
            .map_err(|err| match err {
                repository::Error::QuotaExceeded => Error::QuotaExceeded { max },
                err => Error::Database(err),
            })?;
        tracing::info!(id = %inserted_ticket.id, "created ticket");

        let ticket_url = self.ticket_url(inserted_ticket.id);
        let qr_code_image = self.qr_code_service.encode_data_url(&ticket_url)?;

        Ok(output::CreatedTicket {
            message: "Ticket created",
            ticket_id: inserted_ticket.id,
            ticket_url,
            qr_code_image,
        })
    }

    async fn count_tickets(&self) -> Result<i64, Error> {
        let count = self.repository.count_all().await?;
        tracing::debug!(count, "counted tickets");

        Ok(count)
    }

    async fn find_ticket(&self, id: Uuid) -> Result<output::Ticket, Error> {
        tracing::info!(%id, "finding ticket");

        let ticket = self
            .repository
            .find(id)
            .await?
            .ok_or(Error::TicketNotExist)?;

        tracing::info!(%id, "found ticket");

        Ok(ticket.into())
    }
}
