use uuid::Uuid;

use crate::{
    EngineError, NewService, ResultEngine, Service,
    util::{normalize_optional_text, normalize_required_name},
};

use super::Engine;

impl Engine {
    /// Lists services ordered by display name.
    pub async fn list_services(&self, active_only: bool) -> ResultEngine<Vec<Service>> {
        self.store.list_services(active_only).await
    }

    pub async fn service(&self, service_id: Uuid) -> ResultEngine<Service> {
        self.require_service(service_id).await
    }

    /// Creates an active service. The name must be unique.
    pub async fn create_service(&self, new: NewService) -> ResultEngine<Service> {
        let name = normalize_required_name(&new.name, "service name")?;
        let display_name = normalize_required_name(&new.display_name, "display name")?;

        let existing = self.store.list_services(false).await?;
        if existing.iter().any(|s| s.name.eq_ignore_ascii_case(&name)) {
            return Err(EngineError::ExistingKey(name));
        }

        let service = self
            .store
            .insert_service(NewService {
                name,
                display_name,
                emoji: normalize_optional_text(new.emoji.as_deref()),
                description: normalize_optional_text(new.description.as_deref()),
            })
            .await?;
        tracing::info!("service {} created", service.name);
        Ok(service)
    }

    /// Updates the presentational fields of a service.
    pub async fn update_service(
        &self,
        service_id: Uuid,
        display_name: &str,
        emoji: Option<&str>,
        description: Option<&str>,
    ) -> ResultEngine<Service> {
        let mut service = self.require_service(service_id).await?;
        service.display_name = normalize_required_name(display_name, "display name")?;
        service.emoji = normalize_optional_text(emoji);
        service.description = normalize_optional_text(description);
        self.store.update_service(&service).await?;
        Ok(service)
    }

    /// Activates or deactivates a service. Services are never deleted.
    pub async fn set_service_active(&self, service_id: Uuid, active: bool) -> ResultEngine<Service> {
        let mut service = self.require_service(service_id).await?;
        if service.is_active != active {
            service.is_active = active;
            self.store.update_service(&service).await?;
            tracing::info!(
                "service {} {}",
                service.name,
                if active { "activated" } else { "deactivated" }
            );
        }
        Ok(service)
    }
}
