use uuid::Uuid;

use crate::{
    ResultEngine,
    export::{self, ExportFormat},
};

use super::Engine;

impl Engine {
    /// Every planning of a service rendered as CSV or JSON.
    pub async fn export_plannings(
        &self,
        service_id: Uuid,
        format: ExportFormat,
    ) -> ResultEngine<String> {
        let plannings = self.list_plannings(service_id).await?;
        tracing::debug!(
            "exporting {} plannings of service {service_id}",
            plannings.len()
        );
        export::render(&plannings, format)
    }
}
