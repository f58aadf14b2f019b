use anyhow::Result;
use ballot_modules_api::WorkingSet;

use crate::Election;

impl<C: ballot_modules_api::Context> Election<C> {
    /// Initializes the module with the `admin` role and an empty registry.
    pub(crate) fn init_module(
        &self,
        config: &<Self as ballot_modules_api::Module>::Config,
        working_set: &mut WorkingSet<C::Storage>,
    ) -> Result<()> {
        self.admin.set(&config.admin, working_set);
        self.candidate_count.set(&0, working_set);
        Ok(())
    }
}
