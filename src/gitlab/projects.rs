use super::client::{GitLabClient, Transport, PER_PAGE};
use crate::error::Result;
use crate::model::Project;
use crate::observer::Observer;
use log::Level;

impl<T: Transport> GitLabClient<T> {
    /// Every project visible to the token, in server order.
    pub fn fetch_projects(&self, observer: &dyn Observer) -> Result<Vec<Project>> {
        observer.log(Level::Debug, "Fetching projects...");
        self.paginate(
            "projects",
            "projects",
            |page| self.endpoint(&format!("projects?per_page={PER_PAGE}&page={page}")),
            observer,
            |page| page,
        )
    }
}
