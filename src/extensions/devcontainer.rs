use super::{Extension, ExtensionId, ExtensionOutcome};
use crate::constants::DEVCONTAINER_DIR;
use crate::devcontainer::{active_integrations, compose, DevcontainerConfig};
use crate::error::Result;
use crate::packages::GenerationContext;
use log::info;

/// Writes `.devcontainer/` from a normalized configuration.
pub struct DevcontainerExtension {
    config: DevcontainerConfig,
}

impl DevcontainerExtension {
    pub fn new(config: DevcontainerConfig) -> Self {
        Self { config }
    }
}

impl Extension for DevcontainerExtension {
    fn id(&self) -> ExtensionId {
        ExtensionId::Devcontainer
    }

    fn apply(&self, ctx: &GenerationContext) -> Result<ExtensionOutcome> {
        let plan = compose(ctx.data, &self.config);
        let written = plan.write(ctx.root.join(DEVCONTAINER_DIR))?;
        info!(
            "Created {} devcontainer files ({} service(s))",
            written.len(),
            self.config.services().len()
        );

        let active = active_integrations(&self.config);
        let mut outcome = ExtensionOutcome::new(self.id());
        outcome.warnings.extend(
            self.config
                .integrations
                .iter()
                .filter(|id| !active.iter().any(|integration| integration.id == id.as_str()))
                .map(|id| format!("Tool integration '{}' was not enabled.", id)),
        );
        Ok(outcome)
    }
}
